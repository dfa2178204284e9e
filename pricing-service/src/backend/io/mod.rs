//! # IO Module
//!
//! Adapter layer between HTTP clients (checkout flow, admin screens) and the
//! domain. Translates JSON requests into domain commands and domain results
//! into the shared DTOs.
//!
//! ## Supported Operations
//!
//! - **POST /api/pricing/calculate**: Monthly price and first payment
//! - **GET/PUT /api/pricing/config**: Price table
//! - **GET /api/pricing/drop-in/{pass}**: Single class and day pass prices
//! - **POST /api/promo-codes/validate**: Check a code without consuming it
//! - **POST /api/promo-codes/{id}/confirm-usage**: Record a paid redemption
//! - **GET/POST /api/discounts**: Discount catalog
//! - **GET /api/discounts/commitment?months=N**: Commitment tier lookup

pub mod rest;

pub use rest::*;
