//! HTTP client for the Paystack API.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;

use super::types::ApiEnvelope;
use super::{ChargeVerification, PaystackError};
use crate::config::PaystackConfig;

/// Paystack API client.
#[derive(Clone)]
pub struct PaystackClient {
    client: reqwest::Client,
    base_url: String,
}

impl PaystackClient {
    /// Create a new Paystack client authenticated with the secret key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &PaystackConfig) -> Result<Self, PaystackError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.secret_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| PaystackError::Parse(format!("invalid secret key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert("Authorization", auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    /// Verify a transaction by the reference the popup reported.
    ///
    /// # Errors
    ///
    /// Returns `PaystackError::Api` for unknown references and provider
    /// failures, `Parse` for malformed responses.
    pub async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<ChargeVerification, PaystackError> {
        let url = format!("{}/transaction/verify/{reference}", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaystackError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<ChargeVerification> = response
            .json()
            .await
            .map_err(|e| PaystackError::Parse(e.to_string()))?;

        if !envelope.status {
            return Err(PaystackError::Api {
                status: status.as_u16(),
                message: envelope.message,
            });
        }

        envelope
            .data
            .ok_or_else(|| PaystackError::Parse("verification response carried no data".to_owned()))
    }
}
