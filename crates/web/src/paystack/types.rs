//! Paystack API response types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use elite_tips_core::SubscriptionTier;

use super::PaystackError;

/// Envelope every Paystack response is wrapped in.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub status: bool,
    pub message: String,
    pub data: Option<T>,
}

/// A verified transaction, as returned by `GET /transaction/verify/{ref}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeVerification {
    /// The transaction reference (echoed back).
    pub reference: String,
    /// Charge status: "success", "failed", "abandoned", ...
    pub status: String,
    /// Charged amount in minor currency units.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// When the charge was captured, if it was.
    pub paid_at: Option<DateTime<Utc>>,
    /// The payer, as Paystack saw them.
    pub customer: ChargeCustomer,
}

/// Payer details attached to a charge.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeCustomer {
    pub email: Option<String>,
}

impl ChargeVerification {
    /// Check that this charge settles the given tier.
    ///
    /// # Errors
    ///
    /// Returns `ChargeNotSuccessful` if the charge did not complete, or
    /// `ChargeMismatch` if it completed for the wrong currency or amount.
    pub fn ensure_settles(&self, tier: SubscriptionTier) -> Result<(), PaystackError> {
        if self.status != "success" {
            return Err(PaystackError::ChargeNotSuccessful {
                status: self.status.clone(),
            });
        }

        if self.currency != SubscriptionTier::CURRENCY {
            return Err(PaystackError::ChargeMismatch(format!(
                "charged in {} instead of {}",
                self.currency,
                SubscriptionTier::CURRENCY
            )));
        }

        if self.amount != tier.amount_minor_units() {
            return Err(PaystackError::ChargeMismatch(format!(
                "charged {} minor units for a {} tier",
                self.amount, tier
            )));
        }

        Ok(())
    }
}
