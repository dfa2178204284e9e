//! Pricing service for the gym membership backend.
//!
//! Loads the price table and the active discount catalog from storage and
//! hands them, as immutable snapshots, to the pure pricing engine. Also owns
//! the post-payment `confirm_promo_usage` step, which is the only path that
//! moves a promo code's usage counter.

use anyhow::Result;
use chrono::Utc;
use shared::DropInPass;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use crate::backend::domain::commands::discounts::{
    CommitmentDiscountResult, ConfirmPromoUsageResult, StoreDiscountResult,
};
use crate::backend::domain::commands::pricing::{CalculatePriceCommand, ValidatePromoCodeCommand};
use crate::backend::domain::commitment_resolver::find_commitment_discount;
use crate::backend::domain::models::breakdown::PricingQuote;
use crate::backend::domain::models::discount::Discount;
use crate::backend::domain::models::pricing_config::PricingConfig;
use crate::backend::domain::models::pricing_error::PricingError;
use crate::backend::domain::price_calculator::drop_in_price;
use crate::backend::domain::pricing_orchestrator;
use crate::backend::domain::promo_code_validator::validate_promo_code;
use crate::backend::storage::{Connection, DiscountStorage, PricingConfigStorage, UsageIncrement};

/// Either the engine rejected the request or storage could not be read
#[derive(Debug, thiserror::Error)]
pub enum PricingServiceError {
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct PricingService<C: Connection> {
    discount_repository: C::DiscountRepository,
    pricing_config_repository: C::PricingConfigRepository,
}

impl<C: Connection> PricingService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            discount_repository: connection.create_discount_repository(),
            pricing_config_repository: connection.create_pricing_config_repository(),
        }
    }

    /// Current price table; the defaults when none has been stored
    pub async fn get_pricing_config(&self) -> Result<PricingConfig> {
        match self.pricing_config_repository.get_pricing_config().await? {
            Some(config) => Ok(config),
            None => {
                warn!("No pricing config stored, using defaults");
                Ok(PricingConfig::default())
            }
        }
    }

    /// Store the default price table if none exists yet
    pub async fn ensure_pricing_config(&self) -> Result<PricingConfig> {
        if let Some(config) = self.pricing_config_repository.get_pricing_config().await? {
            return Ok(config);
        }

        let config = PricingConfig::default();
        self.pricing_config_repository.store_pricing_config(&config).await?;
        info!("Seeded default pricing config");
        Ok(config)
    }

    pub async fn update_pricing_config(&self, config: PricingConfig) -> Result<PricingConfig> {
        info!("Updating pricing config: {:?}", config);
        self.pricing_config_repository.store_pricing_config(&config).await?;
        Ok(config)
    }

    /// Price a membership against the current snapshots
    pub async fn calculate(&self, command: CalculatePriceCommand) -> Result<PricingQuote, PricingServiceError> {
        info!(
            "Calculating price: {} modalities, {} months, promo {:?}, status {}",
            command.modality_ids.len(),
            command.commitment_months,
            command.promo_code,
            command.member_status
        );

        let config = self.get_pricing_config().await?;
        let discounts = self.discount_repository.list_active_discounts().await?;

        match pricing_orchestrator::calculate(&command, &config, &discounts) {
            Ok(quote) => {
                info!(
                    "Monthly price {} {}, first payment {}",
                    quote.breakdown.monthly_price_cents,
                    quote.breakdown.currency,
                    quote.breakdown.total_first_payment_cents
                );
                Ok(quote)
            }
            Err(error) => {
                info!("Calculation rejected: {}", error);
                Err(error.into())
            }
        }
    }

    /// Check a promo code without consuming a use
    pub async fn validate_promo_code(&self, command: ValidatePromoCodeCommand) -> Result<Discount, PricingServiceError> {
        info!("Validating promo code '{}' for {}", command.code, command.member_status);

        let discounts = self.discount_repository.list_active_discounts().await?;
        let discount = validate_promo_code(&command.code, &discounts, command.member_status, Utc::now())?;
        Ok(discount.clone())
    }

    pub async fn find_commitment_discount(&self, months: u32) -> Result<CommitmentDiscountResult> {
        let discounts = self.discount_repository.list_active_discounts().await?;
        let found = find_commitment_discount(&discounts, months);

        Ok(CommitmentDiscountResult {
            percentage: found.percentage,
            discount: found.discount.cloned(),
        })
    }

    /// Record one redemption of a promo. Call only after the payment that used
    /// the promo has been confirmed, exactly once per payment. Commitment tiers
    /// and inactive promos have no usage to confirm and report `NotFound`.
    pub async fn confirm_promo_usage(&self, discount_id: &str) -> Result<ConfirmPromoUsageResult> {
        info!("Confirming usage of discount {}", discount_id);

        match self.discount_repository.get_discount(discount_id).await? {
            Some(discount) if discount.is_active_promo() => {}
            Some(_) => {
                warn!("Discount {} is not an active promo code", discount_id);
                return Ok(ConfirmPromoUsageResult::NotFound);
            }
            None => return Ok(ConfirmPromoUsageResult::NotFound),
        }

        let result = match self.discount_repository.increment_usage_if_below_cap(discount_id).await? {
            UsageIncrement::Incremented(discount) => ConfirmPromoUsageResult::Confirmed { discount },
            UsageIncrement::CapReached(discount) => ConfirmPromoUsageResult::CapReached { discount },
            UsageIncrement::NotFound => ConfirmPromoUsageResult::NotFound,
        };

        Ok(result)
    }

    pub async fn drop_in_price(&self, pass: DropInPass) -> Result<(i64, String), PricingServiceError> {
        let config = self.get_pricing_config().await?;
        let price = drop_in_price(&config, pass)?;
        Ok((price, config.currency))
    }

    pub async fn list_discounts(&self) -> Result<Vec<Discount>> {
        self.discount_repository.list_discounts().await
    }

    /// Validate and store a catalog entry, assigning an ID to new entries
    pub async fn store_discount(&self, mut discount: Discount) -> Result<StoreDiscountResult> {
        discount.validate()?;

        let is_new = discount.id.trim().is_empty();
        if is_new {
            discount.id = self.next_discount_id(&discount).await?;
        }

        self.discount_repository.store_discount(&discount).await?;

        let success_message = if is_new {
            format!("Discount {} created", discount.code)
        } else {
            format!("Discount {} updated", discount.code)
        };
        Ok(StoreDiscountResult {
            discount,
            success_message,
        })
    }

    /// Timestamp-based ID, moved forward a millisecond at a time past any
    /// entry created in the same millisecond
    async fn next_discount_id(&self, discount: &Discount) -> Result<String> {
        let mut millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        loop {
            let id = Discount::generate_id(discount.category, millis);
            if self.discount_repository.get_discount(&id).await?.is_none() {
                return Ok(id);
            }
            millis += 1;
        }
    }
}
