//! Domain model for discount catalog entries.
use chrono::{DateTime, Utc};
use shared::{DiscountCategory, DiscountType};

/// Amount of a discount. Percentages are whole percent in [0, 100], fixed
/// amounts are non-negative cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountValue {
    Percentage(u8),
    Fixed(i64),
}

impl DiscountValue {
    pub fn percentage(value: i64) -> Result<Self, DiscountValidationError> {
        if !(0..=100).contains(&value) {
            return Err(DiscountValidationError::PercentageOutOfRange(value));
        }
        Ok(DiscountValue::Percentage(value as u8))
    }

    pub fn fixed(cents: i64) -> Result<Self, DiscountValidationError> {
        if cents < 0 {
            return Err(DiscountValidationError::NegativeFixedAmount(cents));
        }
        Ok(DiscountValue::Fixed(cents))
    }

    /// Build from the loosely typed `type + value` pair used on the wire and on disk
    pub fn from_parts(discount_type: DiscountType, value: i64) -> Result<Self, DiscountValidationError> {
        match discount_type {
            DiscountType::Percentage => Self::percentage(value),
            DiscountType::Fixed => Self::fixed(value),
        }
    }

    pub fn discount_type(&self) -> DiscountType {
        match self {
            DiscountValue::Percentage(_) => DiscountType::Percentage,
            DiscountValue::Fixed(_) => DiscountType::Fixed,
        }
    }

    pub fn raw_value(&self) -> i64 {
        match self {
            DiscountValue::Percentage(pct) => i64::from(*pct),
            DiscountValue::Fixed(cents) => *cents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discount {
    pub id: String,
    pub code: String,
    pub description: String,
    pub category: DiscountCategory,
    pub value: DiscountValue,
    pub min_commitment_months: Option<u32>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub max_uses: Option<u32>,
    pub current_uses: u32,
    pub new_members_only: bool,
    pub is_active: bool,
}

impl Discount {
    /// Generate a discount ID based on category and timestamp
    pub fn generate_id(category: DiscountCategory, epoch_millis: u64) -> String {
        format!("discount::{}::{}", category.as_str(), epoch_millis)
    }

    pub fn is_active_promo(&self) -> bool {
        self.is_active && self.category == DiscountCategory::Promo
    }

    pub fn is_active_commitment(&self) -> bool {
        self.is_active && self.category == DiscountCategory::Commitment
    }

    /// Case-insensitive comparison (Unicode lowercase), ignoring surrounding whitespace
    pub fn matches_code(&self, code: &str) -> bool {
        let code = code.trim();
        !code.is_empty() && self.code.trim().to_lowercase() == code.to_lowercase()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_until.map_or(false, |until| until < now)
    }

    pub fn is_not_yet_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_from.map_or(false, |from| from > now)
    }

    pub fn usage_cap_reached(&self) -> bool {
        self.max_uses.map_or(false, |max| self.current_uses >= max)
    }

    /// Enforce catalog invariants before a discount is stored
    pub fn validate(&self) -> Result<(), DiscountValidationError> {
        // Re-run the constructor checks in case the value was built directly
        DiscountValue::from_parts(self.value.discount_type(), self.value.raw_value())?;

        if self.code.trim().is_empty() {
            return Err(DiscountValidationError::EmptyCode);
        }

        if self.category == DiscountCategory::Commitment && self.min_commitment_months.is_none() {
            return Err(DiscountValidationError::MissingMinCommitment);
        }

        if let Some(max) = self.max_uses {
            if self.current_uses > max {
                return Err(DiscountValidationError::UsesExceedCap {
                    current: self.current_uses,
                    max,
                });
            }
        }

        if let (Some(from), Some(until)) = (self.valid_from, self.valid_until) {
            if from > until {
                return Err(DiscountValidationError::InvertedValidityWindow);
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscountValidationError {
    #[error("Percentage discount must be between 0 and 100 (got {0})")]
    PercentageOutOfRange(i64),
    #[error("Fixed discount cannot be negative (got {0} cents)")]
    NegativeFixedAmount(i64),
    #[error("Discount code cannot be empty")]
    EmptyCode,
    #[error("Commitment discounts need a minimum commitment length")]
    MissingMinCommitment,
    #[error("Current uses ({current}) exceed the usage cap ({max})")]
    UsesExceedCap { current: u32, max: u32 },
    #[error("valid_from must not be after valid_until")]
    InvertedValidityWindow,
    #[error("Invalid timestamp '{0}', expected RFC 3339")]
    InvalidTimestamp(String),
}

/// Parse an RFC 3339 timestamp, empty meaning "no bound"
pub fn parse_timestamp(value: &str) -> Result<Option<DateTime<Utc>>, DiscountValidationError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(value.trim())
        .map(|t| Some(t.with_timezone(&Utc)))
        .map_err(|_| DiscountValidationError::InvalidTimestamp(value.to_string()))
}
