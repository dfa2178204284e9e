//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::discount::Discount;
use crate::backend::domain::models::pricing_config::PricingConfig;

/// Outcome of an atomic usage increment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageIncrement {
    /// Counter moved; carries the discount as stored afterwards
    Incremented(Discount),
    /// Counter already at `max_uses`; nothing was written
    CapReached(Discount),
    NotFound,
}

/// Trait defining the interface for discount catalog storage operations
///
/// The pricing engine only ever reads from the catalog. The single write that
/// happens on the redemption path is `increment_usage_if_below_cap`, which
/// implementations must make atomic: two concurrent confirmations must never
/// both succeed past a usage cap.
#[async_trait]
pub trait DiscountStorage: Send + Sync {
    /// List every discount in catalog order
    async fn list_discounts(&self) -> Result<Vec<Discount>>;

    /// List only discounts flagged active
    async fn list_active_discounts(&self) -> Result<Vec<Discount>> {
        let discounts = self.list_discounts().await?;
        Ok(discounts.into_iter().filter(|d| d.is_active).collect())
    }

    /// Retrieve a specific discount by ID
    async fn get_discount(&self, discount_id: &str) -> Result<Option<Discount>>;

    /// Insert a new discount or replace the one with the same ID
    async fn store_discount(&self, discount: &Discount) -> Result<()>;

    /// Increment `current_uses` by one unless the usage cap is already reached
    async fn increment_usage_if_below_cap(&self, discount_id: &str) -> Result<UsageIncrement>;
}

/// Trait defining the interface for the pricing config snapshot
#[async_trait]
pub trait PricingConfigStorage: Send + Sync {
    /// Current config, or `None` when none has been stored yet
    async fn get_pricing_config(&self) -> Result<Option<PricingConfig>>;

    /// Replace the stored config
    async fn store_pricing_config(&self, config: &PricingConfig) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides factory
/// methods for creating repositories, so the domain layer can work with any
/// storage backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    type DiscountRepository: DiscountStorage + Clone;
    type PricingConfigRepository: PricingConfigStorage + Clone;

    fn create_discount_repository(&self) -> Self::DiscountRepository;

    fn create_pricing_config_repository(&self) -> Self::PricingConfigRepository;
}
