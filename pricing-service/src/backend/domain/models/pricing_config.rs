//! Domain model for the price table and per-plan overrides.
use serde::{Deserialize, Serialize};
use shared::DropInPass;

use super::pricing_error::PricingError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub base_price_cents: i64,
    pub extra_modality_price_cents: i64,
    pub single_class_price_cents: i64,
    pub day_pass_price_cents: i64,
    pub enrollment_fee_cents: i64,
    pub currency: String,
}

impl PricingConfig {
    /// Check that every money field is non-negative and the currency looks like ISO 4217
    pub fn validate(&self) -> Result<(), PricingError> {
        let fields = [
            ("base_price_cents", self.base_price_cents),
            ("extra_modality_price_cents", self.extra_modality_price_cents),
            ("single_class_price_cents", self.single_class_price_cents),
            ("day_pass_price_cents", self.day_pass_price_cents),
            ("enrollment_fee_cents", self.enrollment_fee_cents),
        ];

        if let Some((name, value)) = fields.iter().find(|(_, value)| *value < 0) {
            return Err(PricingError::InvalidConfig(format!(
                "{} cannot be negative (got {})",
                name, value
            )));
        }

        let currency = self.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PricingError::InvalidConfig(format!(
                "currency must be a 3-letter ISO 4217 code (got '{}')",
                self.currency
            )));
        }

        Ok(())
    }

    pub fn drop_in_price_cents(&self, pass: DropInPass) -> i64 {
        match pass {
            DropInPass::SingleClass => self.single_class_price_cents,
            DropInPass::DayPass => self.day_pass_price_cents,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_price_cents: 6000,
            extra_modality_price_cents: 3000,
            single_class_price_cents: 2500,
            day_pass_price_cents: 3500,
            enrollment_fee_cents: 5000,
            currency: "BRL".to_string(),
        }
    }
}

/// Prices negotiated for a specific plan. Each present field replaces the
/// matching config field for one calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPricingOverride {
    pub base_price_cents: Option<i64>,
    pub extra_modality_price_cents: Option<i64>,
    pub enrollment_fee_cents: Option<i64>,
}

impl PlanPricingOverride {
    pub fn validate(&self) -> Result<(), PricingError> {
        let fields = [
            ("base_price_cents", self.base_price_cents),
            ("extra_modality_price_cents", self.extra_modality_price_cents),
            ("enrollment_fee_cents", self.enrollment_fee_cents),
        ];

        for (name, value) in fields {
            if let Some(value) = value {
                if value < 0 {
                    return Err(PricingError::InvalidOverride(format!(
                        "{} cannot be negative (got {})",
                        name, value
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Rates actually used for a calculation after applying any override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveRates {
    pub base_price_cents: i64,
    pub extra_modality_price_cents: i64,
    pub enrollment_fee_cents: i64,
}

impl EffectiveRates {
    pub fn resolve(config: &PricingConfig, plan_override: Option<&PlanPricingOverride>) -> Self {
        let plan = plan_override.cloned().unwrap_or_default();
        Self {
            base_price_cents: plan.base_price_cents.unwrap_or(config.base_price_cents),
            extra_modality_price_cents: plan
                .extra_modality_price_cents
                .unwrap_or(config.extra_modality_price_cents),
            enrollment_fee_cents: plan.enrollment_fee_cents.unwrap_or(config.enrollment_fee_cents),
        }
    }
}
