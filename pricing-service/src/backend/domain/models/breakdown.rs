//! Domain model for calculation output.

/// Itemized monthly price. Built once per calculation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub base_price_cents: i64,
    pub extra_modalities_count: u32,
    pub extra_modalities_cents: i64,
    pub subtotal_cents: i64,
    pub commitment_discount_pct: u8,
    pub commitment_discount_cents: i64,
    pub promo_discount_pct: u8,
    pub promo_discount_cents: i64,
    pub monthly_price_cents: i64,
    pub enrollment_fee_cents: i64,
    pub total_first_payment_cents: i64,
    pub currency: String,
}

/// Successful result of the pricing orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingQuote {
    pub breakdown: PriceBreakdown,
    /// Commitment tier first, then promo, when present
    pub matched_discount_ids: Vec<String>,
    /// Promo whose usage must be confirmed after payment
    pub promo_discount_id: Option<String>,
}
