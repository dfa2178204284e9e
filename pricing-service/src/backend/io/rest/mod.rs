//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the gym pricing service.
//! This layer handles:
//! - HTTP request/response serialization and deserialization
//! - Error translation from domain to HTTP status codes
//! - Request logging
//!
//! ## Status Codes
//!
//! - **422**: The pricing engine rejected the request; the body carries the
//!   typed `error_kind`
//! - **400**: Malformed input (bad discount, negative config price, unknown pass)
//! - **404 / 409**: Unknown discount or usage cap reached on confirm-usage
//! - **500**: Storage failure; details are logged, not returned

pub mod discount_apis;
pub mod mappers;
pub mod pricing_apis;
pub mod promo_code_apis;
