//! Subscription price tiers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when an amount does not name a tier.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("KES {0} is not an offered subscription tier")]
pub struct TierError(pub i64);

/// One of the fixed subscription price points, in Kenyan shillings.
///
/// The payment widget only ever charges one of these amounts; there is no
/// arbitrary-amount entry anywhere in the product. Keeping the set closed
/// in the type system means a receipt amount is either a known tier or a
/// rejected charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriptionTier {
    /// KES 20 - single tip access.
    Single,
    /// KES 50 - daily tips.
    Daily,
    /// KES 75 - 3-day premium access.
    ThreeDay,
    /// KES 100 - weekly expert picks.
    Weekly,
    /// KES 150 - full premium month.
    Monthly,
}

impl SubscriptionTier {
    /// Every tier, in ascending price order. This is the set rendered on
    /// the subscribe view.
    pub const ALL: [Self; 5] = [
        Self::Single,
        Self::Daily,
        Self::ThreeDay,
        Self::Weekly,
        Self::Monthly,
    ];

    /// ISO 4217 code of the only currency charged.
    pub const CURRENCY: &str = "KES";

    /// Price in whole shillings.
    #[must_use]
    pub const fn amount_kes(self) -> i64 {
        match self {
            Self::Single => 20,
            Self::Daily => 50,
            Self::ThreeDay => 75,
            Self::Weekly => 100,
            Self::Monthly => 150,
        }
    }

    /// Price in minor currency units (cents), as the payment widget
    /// expects it.
    #[must_use]
    pub const fn amount_minor_units(self) -> i64 {
        self.amount_kes() * 100
    }

    /// Plan copy shown next to the price.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "Single tip access",
            Self::Daily => "Daily tips",
            Self::ThreeDay => "3-day premium access",
            Self::Weekly => "Weekly expert picks",
            Self::Monthly => "Full premium month",
        }
    }

    /// Resolve a whole-shilling amount back to its tier.
    ///
    /// # Errors
    ///
    /// Returns [`TierError`] for any amount outside the offered set.
    pub const fn from_kes(amount: i64) -> Result<Self, TierError> {
        match amount {
            20 => Ok(Self::Single),
            50 => Ok(Self::Daily),
            75 => Ok(Self::ThreeDay),
            100 => Ok(Self::Weekly),
            150 => Ok(Self::Monthly),
            other => Err(TierError(other)),
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KES {}", self.amount_kes())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_set_is_exactly_the_offered_amounts() {
        let amounts: Vec<i64> = SubscriptionTier::ALL
            .iter()
            .map(|t| t.amount_kes())
            .collect();
        assert_eq!(amounts, vec![20, 50, 75, 100, 150]);
    }

    #[test]
    fn test_from_kes_accepts_every_tier() {
        for tier in SubscriptionTier::ALL {
            assert_eq!(SubscriptionTier::from_kes(tier.amount_kes()), Ok(tier));
        }
    }

    #[test]
    fn test_from_kes_rejects_everything_else() {
        for amount in [0, 1, 19, 21, 49, 99, 151, 2000, -20] {
            assert_eq!(
                SubscriptionTier::from_kes(amount),
                Err(TierError(amount)),
                "KES {amount} must not resolve to a tier"
            );
        }
    }

    #[test]
    fn test_minor_units_are_cents() {
        assert_eq!(SubscriptionTier::Single.amount_minor_units(), 2000);
        assert_eq!(SubscriptionTier::Monthly.amount_minor_units(), 15000);
    }

    #[test]
    fn test_display() {
        assert_eq!(SubscriptionTier::Daily.to_string(), "KES 50");
    }
}
