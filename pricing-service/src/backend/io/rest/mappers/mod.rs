//! Conversions between domain models and the shared DTOs.

pub mod discount_mapper;
pub mod pricing_mapper;
