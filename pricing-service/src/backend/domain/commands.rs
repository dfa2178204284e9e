//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod pricing {
    use chrono::{DateTime, Utc};
    use shared::MemberStatus;

    use crate::backend::domain::models::pricing_config::PlanPricingOverride;

    /// Input for a monthly price calculation.
    #[derive(Debug, Clone)]
    pub struct CalculatePriceCommand {
        /// Only the count matters for pricing
        pub modality_ids: Vec<String>,
        pub commitment_months: u32,
        pub promo_code: Option<String>,
        pub member_status: MemberStatus,
        pub plan_override: Option<PlanPricingOverride>,
        /// Instant promo windows are checked against
        pub as_of: DateTime<Utc>,
    }

    /// Input for checking a promo code without calculating a price.
    #[derive(Debug, Clone)]
    pub struct ValidatePromoCodeCommand {
        pub code: String,
        pub member_status: MemberStatus,
    }
}

pub mod discounts {
    use crate::backend::domain::models::discount::Discount;

    /// Result of looking up the commitment tier for a length.
    #[derive(Debug, Clone)]
    pub struct CommitmentDiscountResult {
        pub percentage: u8,
        pub discount: Option<Discount>,
    }

    /// Result of a post-payment usage confirmation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ConfirmPromoUsageResult {
        Confirmed { discount: Discount },
        CapReached { discount: Discount },
        NotFound,
    }

    /// Result of storing a discount.
    #[derive(Debug, Clone)]
    pub struct StoreDiscountResult {
        pub discount: Discount,
        pub success_message: String,
    }
}
