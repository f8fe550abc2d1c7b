//! Payment receipt domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use elite_tips_core::{Email, SubscriptionTier};

use crate::paystack::ChargeVerification;

/// The durable record written after a verified payment.
///
/// Exactly one row exists per paying email; a later payment by the same
/// email fully replaces the previous row. Entitlement ("may view gated
/// predictions") is derived purely from the existence of this record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PaymentReceipt {
    /// The paying identity (row key).
    pub email: Email,
    /// Opaque transaction reference from the payment provider.
    pub reference: String,
    /// Charged amount in whole shillings - always one of the offered tiers.
    pub amount_kes: i64,
    /// When the charge was captured.
    pub paid_at: DateTime<Utc>,
}

impl PaymentReceipt {
    /// Build the receipt for a verified charge.
    ///
    /// Keyed by the session email, not the charge's customer record; the
    /// amount recorded is the tier, which verification has already matched
    /// against the charge. Capture time falls back to now when the
    /// provider omits it.
    #[must_use]
    pub fn from_charge(email: Email, tier: SubscriptionTier, charge: &ChargeVerification) -> Self {
        Self {
            email,
            reference: charge.reference.clone(),
            amount_kes: tier.amount_kes(),
            paid_at: charge.paid_at.unwrap_or_else(Utc::now),
        }
    }
}
