//! Commitment tier resolution.
//!
//! A tier is a percentage discount unlocked by committing to at least
//! `min_commitment_months`. The member gets the best tier at or below the
//! requested length: with tiers at 1/3/6 months, a 4-month commitment lands on
//! the 3-month tier.

use tracing::debug;

use crate::backend::domain::models::discount::{Discount, DiscountValue};

/// Result of a tier lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitmentMatch<'a> {
    pub percentage: u8,
    pub discount: Option<&'a Discount>,
}

impl<'a> CommitmentMatch<'a> {
    pub fn none() -> Self {
        Self {
            percentage: 0,
            discount: None,
        }
    }
}

/// Pick the active commitment tier with the largest threshold that does not
/// exceed `months`. Fixed-amount commitment entries are not tiers and are skipped.
///
/// Thresholds are expected to be unique; on a tie the first entry in catalog
/// order wins.
pub fn find_commitment_discount(discounts: &[Discount], months: u32) -> CommitmentMatch<'_> {
    let mut best: Option<(&Discount, u32, u8)> = None;

    for discount in discounts.iter().filter(|d| d.is_active_commitment()) {
        let (Some(threshold), DiscountValue::Percentage(pct)) =
            (discount.min_commitment_months, discount.value)
        else {
            continue;
        };

        if threshold > months {
            continue;
        }

        match best {
            Some((_, best_threshold, _)) if best_threshold >= threshold => {}
            _ => best = Some((discount, threshold, pct)),
        }
    }

    match best {
        Some((discount, threshold, pct)) => {
            debug!(
                "Commitment of {} months matched tier {} ({} months, {}%)",
                months, discount.id, threshold, pct
            );
            CommitmentMatch {
                percentage: pct.min(100),
                discount: Some(discount),
            }
        }
        None => {
            debug!("No commitment tier applies to {} months", months);
            CommitmentMatch::none()
        }
    }
}
