//! Domain errors produced by the pricing engine.

use shared::PricingErrorKind;

/// Every way a price calculation or promo validation can be rejected.
///
/// All variants are user-facing and recoverable; retrying with the same
/// inputs yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("At least one modality must be selected")]
    NoModalitySelected,
    #[error("Promo code is not valid")]
    InvalidCode,
    #[error("Promo code has expired")]
    ExpiredCode,
    #[error("Promo code is not valid yet")]
    NotYetValidCode,
    #[error("Promo code has reached its usage limit")]
    ExhaustedCode,
    #[error("Promo code is only available to new members")]
    RestrictedToNewMembers,
    #[error("Invalid plan override: {0}")]
    InvalidOverride(String),
    #[error("Invalid pricing configuration: {0}")]
    InvalidConfig(String),
}

impl PricingError {
    pub fn kind(&self) -> PricingErrorKind {
        match self {
            PricingError::NoModalitySelected => PricingErrorKind::NoModalitySelected,
            PricingError::InvalidCode => PricingErrorKind::InvalidCode,
            PricingError::ExpiredCode => PricingErrorKind::ExpiredCode,
            PricingError::NotYetValidCode => PricingErrorKind::NotYetValidCode,
            PricingError::ExhaustedCode => PricingErrorKind::ExhaustedCode,
            PricingError::RestrictedToNewMembers => PricingErrorKind::RestrictedToNewMembers,
            PricingError::InvalidOverride(_) => PricingErrorKind::InvalidOverride,
            PricingError::InvalidConfig(_) => PricingErrorKind::InvalidConfig,
        }
    }
}
