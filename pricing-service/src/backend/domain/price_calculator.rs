//! Monthly price arithmetic.
//!
//! All amounts are integer cents. The order of operations is fixed:
//!
//! 1. resolve effective rates (plan override fields win over config)
//! 2. subtotal = base + extra modalities
//! 3. commitment percentage off the subtotal
//! 4. promo off the post-commitment price (percentages stack multiplicatively)
//! 5. enrollment fee added for first-time members
//!
//! Percentages round half-up: `(amount * pct + 50) / 100`.

use shared::DropInPass;
use tracing::debug;

use crate::backend::domain::models::breakdown::PriceBreakdown;
use crate::backend::domain::models::discount::DiscountValue;
use crate::backend::domain::models::pricing_config::{EffectiveRates, PlanPricingOverride, PricingConfig};
use crate::backend::domain::models::pricing_error::PricingError;

/// Everything the calculator needs, already resolved by the caller
#[derive(Debug, Clone)]
pub struct PriceCalculationInput<'a> {
    pub config: &'a PricingConfig,
    /// Number of selected modalities; 0 is priced like 1
    pub modality_count: u32,
    pub commitment_months: u32,
    pub commitment_discount_pct: u8,
    pub promo_discount: Option<DiscountValue>,
    pub is_first_time: bool,
    pub plan_override: Option<&'a PlanPricingOverride>,
}

/// `pct` percent of a non-negative amount, rounded half-up. `pct` is capped at 100.
pub fn percentage_of(amount_cents: i64, pct: u8) -> i64 {
    let amount = i128::from(amount_cents.max(0));
    let pct = i128::from(pct.min(100));
    ((amount * pct + 50) / 100) as i64
}

pub fn calculate_price(input: &PriceCalculationInput<'_>) -> Result<PriceBreakdown, PricingError> {
    input.config.validate()?;
    if let Some(plan) = input.plan_override {
        plan.validate()?;
    }

    let rates = EffectiveRates::resolve(input.config, input.plan_override);

    let extra_modalities_count = input.modality_count.max(1) - 1;
    let extra_modalities_cents =
        i64::from(extra_modalities_count).saturating_mul(rates.extra_modality_price_cents);
    let subtotal_cents = rates.base_price_cents.saturating_add(extra_modalities_cents);

    let commitment_discount_pct = input.commitment_discount_pct.min(100);
    let commitment_discount_cents = percentage_of(subtotal_cents, commitment_discount_pct);
    let price_after_commitment = subtotal_cents - commitment_discount_cents;

    let (promo_discount_pct, promo_discount_cents) = match input.promo_discount {
        Some(DiscountValue::Percentage(pct)) => {
            let pct = pct.min(100);
            (pct, percentage_of(price_after_commitment, pct))
        }
        Some(DiscountValue::Fixed(cents)) => (0, cents.clamp(0, price_after_commitment)),
        None => (0, 0),
    };

    let monthly_price_cents = (price_after_commitment - promo_discount_cents).max(0);
    let enrollment_fee_cents = if input.is_first_time {
        rates.enrollment_fee_cents
    } else {
        0
    };
    let total_first_payment_cents = monthly_price_cents.saturating_add(enrollment_fee_cents);

    debug!(
        "Priced {} modalities over {} months: subtotal={} commitment=-{} promo=-{} monthly={} first_payment={}",
        input.modality_count,
        input.commitment_months,
        subtotal_cents,
        commitment_discount_cents,
        promo_discount_cents,
        monthly_price_cents,
        total_first_payment_cents
    );

    Ok(PriceBreakdown {
        base_price_cents: rates.base_price_cents,
        extra_modalities_count,
        extra_modalities_cents,
        subtotal_cents,
        commitment_discount_pct,
        commitment_discount_cents,
        promo_discount_pct,
        promo_discount_cents,
        monthly_price_cents,
        enrollment_fee_cents,
        total_first_payment_cents,
        currency: input.config.currency.clone(),
    })
}

/// Price of a single class or day pass from the same config snapshot
pub fn drop_in_price(config: &PricingConfig, pass: DropInPass) -> Result<i64, PricingError> {
    config.validate()?;
    Ok(config.drop_in_price_cents(pass))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PricingConfig {
        PricingConfig {
            base_price_cents: 6000,
            extra_modality_price_cents: 3000,
            single_class_price_cents: 2500,
            day_pass_price_cents: 3500,
            enrollment_fee_cents: 5000,
            currency: "BRL".to_string(),
        }
    }

    fn input(config: &PricingConfig, modality_count: u32) -> PriceCalculationInput<'_> {
        PriceCalculationInput {
            config,
            modality_count,
            commitment_months: 1,
            commitment_discount_pct: 0,
            promo_discount: None,
            is_first_time: false,
            plan_override: None,
        }
    }

    #[test]
    fn test_scenario_a_single_modality() {
        let config = config();
        let breakdown = calculate_price(&input(&config, 1)).unwrap();

        assert_eq!(breakdown.subtotal_cents, 6000);
        assert_eq!(breakdown.extra_modalities_count, 0);
        assert_eq!(breakdown.extra_modalities_cents, 0);
        assert_eq!(breakdown.monthly_price_cents, 6000);
        assert_eq!(breakdown.total_first_payment_cents, 6000);
        assert_eq!(breakdown.currency, "BRL");
    }

    #[test]
    fn test_scenario_b_two_modalities() {
        let config = config();
        let breakdown = calculate_price(&input(&config, 2)).unwrap();

        assert_eq!(breakdown.extra_modalities_count, 1);
        assert_eq!(breakdown.extra_modalities_cents, 3000);
        assert_eq!(breakdown.subtotal_cents, 9000);
        assert_eq!(breakdown.monthly_price_cents, 9000);
    }

    #[test]
    fn test_scenario_c_commitment_tier() {
        let config = config();
        let mut request = input(&config, 1);
        request.commitment_months = 3;
        request.commitment_discount_pct = 10;

        let breakdown = calculate_price(&request).unwrap();
        assert_eq!(breakdown.subtotal_cents, 6000);
        assert_eq!(breakdown.commitment_discount_pct, 10);
        assert_eq!(breakdown.commitment_discount_cents, 600);
        assert_eq!(breakdown.monthly_price_cents, 5400);
    }

    #[test]
    fn test_scenario_d_commitment_then_promo() {
        let config = config();
        let mut request = input(&config, 1);
        request.commitment_discount_pct = 10;
        request.promo_discount = Some(DiscountValue::Percentage(15));

        let breakdown = calculate_price(&request).unwrap();
        assert_eq!(breakdown.commitment_discount_cents, 600);
        assert_eq!(breakdown.promo_discount_pct, 15);
        assert_eq!(breakdown.promo_discount_cents, 810);
        assert_eq!(breakdown.monthly_price_cents, 4590);
    }

    #[test]
    fn test_scenario_e_fixed_promo_capped() {
        let config = config();
        let mut request = input(&config, 1);
        request.promo_discount = Some(DiscountValue::Fixed(10_000));

        let breakdown = calculate_price(&request).unwrap();
        assert_eq!(breakdown.promo_discount_pct, 0);
        assert_eq!(breakdown.promo_discount_cents, 6000);
        assert_eq!(breakdown.monthly_price_cents, 0);
    }

    #[test]
    fn test_fixed_promo_applies_after_commitment() {
        let config = config();
        let mut request = input(&config, 1);
        request.commitment_discount_pct = 10;
        request.promo_discount = Some(DiscountValue::Fixed(1000));

        let breakdown = calculate_price(&request).unwrap();
        assert_eq!(breakdown.promo_discount_cents, 1000);
        assert_eq!(breakdown.monthly_price_cents, 4400);

        request.promo_discount = Some(DiscountValue::Fixed(5401));
        let breakdown = calculate_price(&request).unwrap();
        assert_eq!(breakdown.promo_discount_cents, 5400);
        assert_eq!(breakdown.monthly_price_cents, 0);
    }

    #[test]
    fn test_discounts_stack_multiplicatively() {
        let config = config();
        for commitment in [0u8, 5, 10, 15, 20, 33, 50, 100] {
            for promo in [0u8, 1, 15, 25, 50, 99, 100] {
                let mut request = input(&config, 1);
                request.commitment_discount_pct = commitment;
                request.promo_discount = Some(DiscountValue::Percentage(promo));

                let breakdown = calculate_price(&request).unwrap();
                let after_commitment = 6000 - percentage_of(6000, commitment);
                let expected = after_commitment - percentage_of(after_commitment, promo);
                assert_eq!(
                    breakdown.monthly_price_cents, expected,
                    "commitment {}% then promo {}%",
                    commitment, promo
                );
            }
        }

        // 10% + 15% additive would be 4500
        let mut request = input(&config, 1);
        request.commitment_discount_pct = 10;
        request.promo_discount = Some(DiscountValue::Percentage(15));
        assert_ne!(calculate_price(&request).unwrap().monthly_price_cents, 4500);
    }

    #[test]
    fn test_subtotal_formula_and_monotonicity() {
        let config = config();
        let mut previous = 0;
        for count in 1..=12u32 {
            let breakdown = calculate_price(&input(&config, count)).unwrap();
            let expected = 6000 + i64::from(count - 1) * 3000;
            assert_eq!(breakdown.subtotal_cents, expected);
            assert_eq!(breakdown.extra_modalities_cents, i64::from(count - 1) * 3000);
            assert!(breakdown.subtotal_cents >= previous);
            previous = breakdown.subtotal_cents;
        }
    }

    #[test]
    fn test_zero_modalities_priced_as_one() {
        let config = config();
        let zero = calculate_price(&input(&config, 0)).unwrap();
        let one = calculate_price(&input(&config, 1)).unwrap();

        assert_eq!(zero.extra_modalities_count, 0);
        assert_eq!(zero.monthly_price_cents, one.monthly_price_cents);
    }

    #[test]
    fn test_enrollment_fee_only_first_time() {
        let config = config();
        let mut request = input(&config, 1);

        let returning = calculate_price(&request).unwrap();
        assert_eq!(returning.enrollment_fee_cents, 0);
        assert_eq!(returning.total_first_payment_cents, 6000);

        request.is_first_time = true;
        let first = calculate_price(&request).unwrap();
        assert_eq!(first.enrollment_fee_cents, 5000);
        assert_eq!(first.total_first_payment_cents, 11_000);
    }

    #[test]
    fn test_enrollment_fee_not_discounted() {
        let config = config();
        let mut request = input(&config, 1);
        request.is_first_time = true;
        request.promo_discount = Some(DiscountValue::Fixed(50_000));

        let breakdown = calculate_price(&request).unwrap();
        assert_eq!(breakdown.monthly_price_cents, 0);
        assert_eq!(breakdown.total_first_payment_cents, 5000);
    }

    #[test]
    fn test_plan_override_replaces_rates() {
        let config = config();
        let plan = PlanPricingOverride {
            base_price_cents: Some(4000),
            extra_modality_price_cents: Some(1500),
            enrollment_fee_cents: Some(0),
        };
        let mut request = input(&config, 3);
        request.plan_override = Some(&plan);
        request.is_first_time = true;

        let breakdown = calculate_price(&request).unwrap();
        assert_eq!(breakdown.base_price_cents, 4000);
        assert_eq!(breakdown.extra_modalities_cents, 3000);
        assert_eq!(breakdown.subtotal_cents, 7000);
        assert_eq!(breakdown.enrollment_fee_cents, 0);
        assert_eq!(breakdown.total_first_payment_cents, 7000);
    }

    #[test]
    fn test_negative_override_rejected() {
        let config = config();
        let plan = PlanPricingOverride {
            base_price_cents: Some(-1),
            ..PlanPricingOverride::default()
        };
        let mut request = input(&config, 1);
        request.plan_override = Some(&plan);

        assert!(matches!(calculate_price(&request), Err(PricingError::InvalidOverride(_))));
    }

    #[test]
    fn test_negative_config_rejected() {
        let config = PricingConfig {
            extra_modality_price_cents: -3000,
            ..config()
        };

        assert!(matches!(
            calculate_price(&input(&config, 2)),
            Err(PricingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_round_half_up_on_non_exact_splits() {
        assert_eq!(percentage_of(5, 10), 1); // 0.5
        assert_eq!(percentage_of(999, 50), 500); // 499.5
        assert_eq!(percentage_of(333, 10), 33); // 33.3
        assert_eq!(percentage_of(6001, 15), 900); // 900.15
        assert_eq!(percentage_of(7777, 33), 2566); // 2566.41
        assert_eq!(percentage_of(1, 49), 0); // 0.49
        assert_eq!(percentage_of(1, 50), 1); // 0.5
        assert_eq!(percentage_of(6000, 100), 6000);
        assert_eq!(percentage_of(6000, 0), 0);
        assert_eq!(percentage_of(6000, 250), 6000);
    }

    #[test]
    fn test_odd_subtotal_with_odd_percentages() {
        let config = PricingConfig {
            base_price_cents: 9999,
            ..config()
        };
        let mut request = input(&config, 1);
        request.commitment_discount_pct = 10;
        request.promo_discount = Some(DiscountValue::Percentage(15));

        let breakdown = calculate_price(&request).unwrap();
        // 999.9 -> 1000, then 8999 * 15% = 1349.85 -> 1350
        assert_eq!(breakdown.commitment_discount_cents, 1000);
        assert_eq!(breakdown.promo_discount_cents, 1350);
        assert_eq!(breakdown.monthly_price_cents, 7649);
    }

    #[test]
    fn test_percentages_capped_at_100() {
        let config = config();
        let mut request = input(&config, 1);
        request.commitment_discount_pct = 180;

        let breakdown = calculate_price(&request).unwrap();
        assert_eq!(breakdown.commitment_discount_pct, 100);
        assert_eq!(breakdown.monthly_price_cents, 0);
    }

    #[test]
    fn test_extreme_modality_count_saturates() {
        let config = PricingConfig {
            extra_modality_price_cents: i64::MAX / 2,
            ..config()
        };

        let breakdown = calculate_price(&input(&config, u32::MAX)).unwrap();
        assert_eq!(breakdown.subtotal_cents, i64::MAX);
        assert!(breakdown.monthly_price_cents >= 0);
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let config = config();
        let plan = PlanPricingOverride {
            extra_modality_price_cents: Some(2750),
            ..PlanPricingOverride::default()
        };
        let request = PriceCalculationInput {
            config: &config,
            modality_count: 3,
            commitment_months: 6,
            commitment_discount_pct: 20,
            promo_discount: Some(DiscountValue::Percentage(7)),
            is_first_time: true,
            plan_override: Some(&plan),
        };

        let first = calculate_price(&request).unwrap();
        let second = calculate_price(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_drop_in_price() {
        let config = config();
        assert_eq!(drop_in_price(&config, DropInPass::SingleClass), Ok(2500));
        assert_eq!(drop_in_price(&config, DropInPass::DayPass), Ok(3500));
    }
}
