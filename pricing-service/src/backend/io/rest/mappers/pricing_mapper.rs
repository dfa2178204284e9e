//! Mappers for the price table, plan overrides and calculation results.

use crate::backend::domain::models::breakdown::{PriceBreakdown as DomainPriceBreakdown, PricingQuote};
use crate::backend::domain::models::pricing_config::{
    PlanPricingOverride as DomainPlanPricingOverride, PricingConfig as DomainPricingConfig,
};
use crate::backend::domain::models::pricing_error::PricingError;
use shared::{
    CalculatePriceResponse, PlanPricingOverride as SharedPlanPricingOverride,
    PriceBreakdown as SharedPriceBreakdown, PricingConfig as SharedPricingConfig,
};

pub struct PricingConfigMapper;

impl PricingConfigMapper {
    pub fn to_dto(domain: DomainPricingConfig) -> SharedPricingConfig {
        SharedPricingConfig {
            base_price_cents: domain.base_price_cents,
            extra_modality_price_cents: domain.extra_modality_price_cents,
            single_class_price_cents: domain.single_class_price_cents,
            day_pass_price_cents: domain.day_pass_price_cents,
            enrollment_fee_cents: domain.enrollment_fee_cents,
            currency: domain.currency,
        }
    }

    pub fn to_domain(dto: SharedPricingConfig) -> DomainPricingConfig {
        DomainPricingConfig {
            base_price_cents: dto.base_price_cents,
            extra_modality_price_cents: dto.extra_modality_price_cents,
            single_class_price_cents: dto.single_class_price_cents,
            day_pass_price_cents: dto.day_pass_price_cents,
            enrollment_fee_cents: dto.enrollment_fee_cents,
            currency: dto.currency.trim().to_ascii_uppercase(),
        }
    }
}

pub struct PlanOverrideMapper;

impl PlanOverrideMapper {
    pub fn to_domain(dto: SharedPlanPricingOverride) -> DomainPlanPricingOverride {
        DomainPlanPricingOverride {
            base_price_cents: dto.base_price_cents,
            extra_modality_price_cents: dto.extra_modality_price_cents,
            enrollment_fee_cents: dto.enrollment_fee_cents,
        }
    }
}

pub struct PriceBreakdownMapper;

impl PriceBreakdownMapper {
    pub fn to_dto(domain: DomainPriceBreakdown) -> SharedPriceBreakdown {
        SharedPriceBreakdown {
            base_price_cents: domain.base_price_cents,
            extra_modalities_count: domain.extra_modalities_count,
            extra_modalities_cents: domain.extra_modalities_cents,
            subtotal_cents: domain.subtotal_cents,
            commitment_discount_pct: domain.commitment_discount_pct,
            commitment_discount_cents: domain.commitment_discount_cents,
            promo_discount_pct: domain.promo_discount_pct,
            promo_discount_cents: domain.promo_discount_cents,
            monthly_price_cents: domain.monthly_price_cents,
            enrollment_fee_cents: domain.enrollment_fee_cents,
            total_first_payment_cents: domain.total_first_payment_cents,
            currency: domain.currency,
        }
    }

    pub fn quote_to_response(quote: PricingQuote) -> CalculatePriceResponse {
        CalculatePriceResponse::Success {
            breakdown: Self::to_dto(quote.breakdown),
            matched_discount_ids: quote.matched_discount_ids,
            promo_discount_id: quote.promo_discount_id,
        }
    }

    pub fn error_to_response(error: &PricingError) -> CalculatePriceResponse {
        CalculatePriceResponse::Failure {
            error_kind: error.kind(),
            message: error.to_string(),
        }
    }
}
