//! Single entry point for price calculations.
//!
//! Wires the commitment resolver, the promo validator and the price calculator
//! together over caller-supplied snapshots. Pure: it never reads storage, and
//! the same inputs always produce the same result. A rejected promo code fails
//! the whole calculation; there is no fallback to an undiscounted price.

use tracing::debug;

use crate::backend::domain::commands::pricing::CalculatePriceCommand;
use crate::backend::domain::commitment_resolver::find_commitment_discount;
use crate::backend::domain::models::breakdown::PricingQuote;
use crate::backend::domain::models::discount::Discount;
use crate::backend::domain::models::pricing_config::PricingConfig;
use crate::backend::domain::models::pricing_error::PricingError;
use crate::backend::domain::price_calculator::{calculate_price, PriceCalculationInput};
use crate::backend::domain::promo_code_validator::validate_promo_code;

pub fn calculate(
    command: &CalculatePriceCommand,
    config: &PricingConfig,
    discounts: &[Discount],
) -> Result<PricingQuote, PricingError> {
    if command.modality_ids.is_empty() {
        return Err(PricingError::NoModalitySelected);
    }

    let commitment = find_commitment_discount(discounts, command.commitment_months);

    let promo = match command.promo_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => {
            Some(validate_promo_code(code, discounts, command.member_status, command.as_of)?)
        }
        _ => None,
    };

    let input = PriceCalculationInput {
        config,
        modality_count: u32::try_from(command.modality_ids.len()).unwrap_or(u32::MAX),
        commitment_months: command.commitment_months,
        commitment_discount_pct: commitment.percentage,
        promo_discount: promo.map(|discount| discount.value),
        is_first_time: command.member_status.is_new_lead(),
        plan_override: command.plan_override.as_ref(),
    };
    let breakdown = calculate_price(&input)?;

    let matched_discount_ids: Vec<String> = commitment
        .discount
        .into_iter()
        .chain(promo)
        .map(|discount| discount.id.clone())
        .collect();

    debug!(
        "Calculated monthly price {} {} with discounts {:?}",
        breakdown.monthly_price_cents, breakdown.currency, matched_discount_ids
    );

    Ok(PricingQuote {
        breakdown,
        matched_discount_ids,
        promo_discount_id: promo.map(|discount| discount.id.clone()),
    })
}
