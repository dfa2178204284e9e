//! # CSV Storage
//!
//! File-backed storage for the pricing service. Everything lives in a single
//! data directory:
//!
//! ```text
//! data/
//! ├── pricing_config.yaml   ← price table
//! └── discounts.csv         ← commitment tiers and promo codes
//! ```

pub mod connection;
pub mod discount_repository;
pub mod pricing_config_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use discount_repository::DiscountRepository;
pub use pricing_config_repository::PricingConfigRepository;
