//! Paystack error types.

use thiserror::Error;

/// Errors that can occur when verifying a charge with Paystack.
#[derive(Debug, Error)]
pub enum PaystackError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status of the response.
        status: u16,
        /// Response body or API message.
        message: String,
    },

    /// The charge exists but did not complete ("abandoned", "failed", ...).
    #[error("charge not successful: {status}")]
    ChargeNotSuccessful {
        /// Charge status reported by Paystack.
        status: String,
    },

    /// The charge completed but does not match what was owed.
    #[error("{0}")]
    ChargeMismatch(String),

    /// Failed to parse a response.
    #[error("parse error: {0}")]
    Parse(String),
}
