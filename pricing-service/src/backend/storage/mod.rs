//! # Storage Module
//!
//! Read-only snapshots of the price table and the discount catalog, plus the
//! one write the redemption path needs: an atomic "increment usage if below
//! cap" on a promo code.
//!
//! The domain layer only sees the traits in [`traits`]; the CSV/YAML files
//! under the data directory are one implementation of them.

pub mod csv;
pub mod traits;

pub use self::csv::CsvConnection;
pub use traits::{Connection, DiscountStorage, PricingConfigStorage, UsageIncrement};
