//! Promo code eligibility checks.
//!
//! Checks run in a fixed order and stop at the first failure:
//! unknown code, expired, not yet started, usage cap reached, new-members-only.
//! Validation never consumes a use; the counter only moves through
//! `DiscountStorage::increment_usage_if_below_cap` after payment.

use chrono::{DateTime, Utc};
use shared::MemberStatus;
use tracing::debug;

use crate::backend::domain::models::discount::Discount;
use crate::backend::domain::models::pricing_error::PricingError;

/// Value form of a validation, for callers that report rather than propagate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCodeValidation<'a> {
    pub discount: Option<&'a Discount>,
    pub error: Option<PricingError>,
}

impl<'a> PromoCodeValidation<'a> {
    pub fn is_valid(&self) -> bool {
        self.discount.is_some()
    }
}

impl<'a> From<Result<&'a Discount, PricingError>> for PromoCodeValidation<'a> {
    fn from(result: Result<&'a Discount, PricingError>) -> Self {
        match result {
            Ok(discount) => Self {
                discount: Some(discount),
                error: None,
            },
            Err(error) => Self {
                discount: None,
                error: Some(error),
            },
        }
    }
}

/// Find the active promo matching `code` and check that `member_status` may redeem it at `now`
pub fn validate_promo_code<'a>(
    code: &str,
    discounts: &'a [Discount],
    member_status: MemberStatus,
    now: DateTime<Utc>,
) -> Result<&'a Discount, PricingError> {
    let discount = discounts
        .iter()
        .filter(|d| d.is_active_promo())
        .find(|d| d.matches_code(code))
        .ok_or(PricingError::InvalidCode)?;

    if discount.is_expired_at(now) {
        debug!("Promo {} expired at {:?}", discount.id, discount.valid_until);
        return Err(PricingError::ExpiredCode);
    }

    if discount.is_not_yet_valid_at(now) {
        debug!("Promo {} starts at {:?}", discount.id, discount.valid_from);
        return Err(PricingError::NotYetValidCode);
    }

    if discount.usage_cap_reached() {
        debug!(
            "Promo {} exhausted ({}/{:?})",
            discount.id, discount.current_uses, discount.max_uses
        );
        return Err(PricingError::ExhaustedCode);
    }

    if discount.new_members_only && !member_status.is_new_lead() {
        debug!("Promo {} refused for member status {}", discount.id, member_status);
        return Err(PricingError::RestrictedToNewMembers);
    }

    Ok(discount)
}
