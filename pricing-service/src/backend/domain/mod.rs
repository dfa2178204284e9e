//! # Domain Module
//!
//! Contains all business logic for the gym membership pricing engine.
//!
//! The engine itself (commitment resolver, promo validator, price calculator
//! and orchestrator) is pure: it works on snapshots of the price table and the
//! discount catalog and never touches storage. `PricingService` loads those
//! snapshots and owns the one mutation in the system, the post-payment promo
//! usage confirmation.
//!
//! ## Module Organization
//!
//! - **models**: Price table, discounts, breakdown and error types
//! - **commands**: Internal command and result types used by the service
//! - **commitment_resolver**: Picks the commitment tier for a plan length
//! - **promo_code_validator**: Checks a code against the catalog
//! - **price_calculator**: Integer-cent price arithmetic
//! - **pricing_orchestrator**: Runs the three steps above as one calculation
//! - **pricing_service**: Storage-backed entry point used by the REST layer
//!
//! ## Business Rules
//!
//! - All money is integer cents; percentages round half up
//! - Commitment and promo percentages stack multiplicatively
//! - The monthly price never goes below zero
//! - Calculating or validating never consumes a promo use

pub mod commands;
pub mod commitment_resolver;
pub mod models;
pub mod price_calculator;
pub mod pricing_orchestrator;
pub mod pricing_service;
pub mod promo_code_validator;

pub use pricing_service::{PricingService, PricingServiceError};
