use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership status of the member a price is being calculated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Prospect who has never been activated (pays the enrollment fee)
    NewLead,
    Active,
    Blocked,
    Cancelled,
}

impl MemberStatus {
    /// A new lead is a first-time member for pricing purposes
    pub fn is_new_lead(&self) -> bool {
        matches!(self, MemberStatus::NewLead)
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MemberStatus::NewLead => "new_lead",
            MemberStatus::Active => "active",
            MemberStatus::Blocked => "blocked",
            MemberStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

/// Which bucket of the catalog a discount belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountCategory {
    /// Tier unlocked by committing to a minimum number of months
    Commitment,
    /// Code entered by the member at checkout
    Promo,
}

impl DiscountCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountCategory::Commitment => "commitment",
            DiscountCategory::Promo => "promo",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "commitment" => Some(DiscountCategory::Commitment),
            "promo" => Some(DiscountCategory::Promo),
            _ => None,
        }
    }
}

/// How `discount_value` on the wire is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Whole percent in [0, 100]
    Percentage,
    /// Amount in cents
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "percentage" => Some(DiscountType::Percentage),
            "fixed" => Some(DiscountType::Fixed),
            _ => None,
        }
    }
}

/// Discount catalog entry as exposed over the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    /// Discount ID in format: "discount::<commitment|promo>::epoch_millis".
    /// Empty when submitting a new discount.
    #[serde(default)]
    pub id: String,
    /// Code members type in (promo) or a label for the tier (commitment)
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub category: DiscountCategory,
    pub discount_type: DiscountType,
    /// Percent (0-100) or cents depending on `discount_type`
    pub discount_value: i64,
    /// Minimum commitment length that unlocks this tier (commitment only)
    pub min_commitment_months: Option<u32>,
    /// Start of the redemption window (RFC 3339, promo only)
    pub valid_from: Option<String>,
    /// End of the redemption window (RFC 3339, promo only)
    pub valid_until: Option<String>,
    /// Usage cap, `None` means unlimited
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub current_uses: u32,
    #[serde(default)]
    pub new_members_only: bool,
    pub is_active: bool,
}

/// Price table used for every calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub base_price_cents: i64,
    pub extra_modality_price_cents: i64,
    pub single_class_price_cents: i64,
    pub day_pass_price_cents: i64,
    pub enrollment_fee_cents: i64,
    /// ISO 4217 currency code, carried along but never used in arithmetic
    pub currency: String,
}

/// Per-plan prices that replace the configured ones for a single calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanPricingOverride {
    pub base_price_cents: Option<i64>,
    pub extra_modality_price_cents: Option<i64>,
    pub enrollment_fee_cents: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatePriceRequest {
    /// Selected modalities; only the count affects the price
    pub modality_ids: Vec<String>,
    pub commitment_months: u32,
    pub promo_code: Option<String>,
    pub member_status: MemberStatus,
    pub plan_override: Option<PlanPricingOverride>,
}

/// Itemized result of a price calculation, all amounts in cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price_cents: i64,
    pub extra_modalities_count: u32,
    pub extra_modalities_cents: i64,
    pub subtotal_cents: i64,
    pub commitment_discount_pct: u8,
    pub commitment_discount_cents: i64,
    /// Zero when the promo is a fixed amount
    pub promo_discount_pct: u8,
    pub promo_discount_cents: i64,
    pub monthly_price_cents: i64,
    pub enrollment_fee_cents: i64,
    pub total_first_payment_cents: i64,
    pub currency: String,
}

/// Typed reason a calculation or promo validation was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingErrorKind {
    NoModalitySelected,
    InvalidCode,
    ExpiredCode,
    NotYetValidCode,
    ExhaustedCode,
    RestrictedToNewMembers,
    InvalidOverride,
    InvalidConfig,
}

/// Outcome of `POST /api/pricing/calculate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculatePriceResponse {
    Success {
        breakdown: PriceBreakdown,
        /// IDs of every discount that contributed to the price
        matched_discount_ids: Vec<String>,
        /// Promo to confirm via `confirm-usage` once payment clears
        promo_discount_id: Option<String>,
    },
    Failure {
        error_kind: PricingErrorKind,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatePromoCodeRequest {
    pub code: String,
    pub member_status: MemberStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoCodeValidationResponse {
    pub valid: bool,
    pub discount: Option<Discount>,
    pub error_kind: Option<PricingErrorKind>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmPromoUsageResponse {
    pub discount_id: String,
    pub current_uses: u32,
    pub max_uses: Option<u32>,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitmentDiscountRequest {
    pub months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitmentDiscountResponse {
    pub percentage: u8,
    pub discount: Option<Discount>,
}

/// Passes priced directly from the config rather than per month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropInPass {
    SingleClass,
    DayPass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropInPriceResponse {
    pub pass: DropInPass,
    pub price_cents: i64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountListResponse {
    pub discounts: Vec<Discount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDiscountResponse {
    pub discount: Discount,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePricingConfigResponse {
    pub pricing_config: PricingConfig,
    pub success_message: String,
}
