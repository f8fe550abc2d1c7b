//! HTTP client for the email/password identity provider.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use elite_tips_core::Email;

use super::IdentityError;
use crate::config::IdentityConfig;

/// A provider-authenticated identity.
#[derive(Debug, Clone)]
pub struct IdentityUser {
    /// Provider-assigned stable user id.
    pub user_id: String,
    /// The authenticated email, as the provider canonicalized it.
    pub email: Email,
}

/// Request body for both the sign-in and sign-up operations.
#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

/// Success payload common to sign-in and sign-up.
#[derive(Debug, Deserialize)]
struct AccountResponse {
    #[serde(rename = "localId")]
    local_id: String,
    email: String,
}

/// Error envelope the provider wraps rejections in.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Identity provider API client.
#[derive(Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    base_url: String,
    api_key: secrecy::SecretString,
}

impl IdentityClient {
    /// Create a new identity client.
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        }
    }

    /// Authenticate an existing account by email and password.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidCredentials` when the provider
    /// rejects the pair (without saying which half was wrong), or a
    /// structured error for transport/provider failures.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityUser, IdentityError> {
        self.call_accounts("signInWithPassword", email, password)
            .await
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::EmailTaken` if the email is already
    /// registered, or a structured error for transport/provider failures.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityUser, IdentityError> {
        self.call_accounts("signUp", email, password).await
    }

    async fn call_accounts(
        &self,
        operation: &str,
        email: &str,
        password: &str,
    ) -> Result<IdentityUser, IdentityError> {
        let url = format!(
            "{}/v1/accounts:{operation}?key={}",
            self.base_url,
            self.api_key.expose_secret()
        );

        let response = self
            .client
            .post(&url)
            .json(&CredentialsRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let envelope: ErrorEnvelope = response
                .json()
                .await
                .map_err(|e| IdentityError::Parse(e.to_string()))?;
            // Provider codes sometimes carry a trailing reason, e.g.
            // "TOO_MANY_ATTEMPTS_TRY_LATER : ..." - match on the code only.
            let code = envelope
                .error
                .message
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_owned();
            return Err(IdentityError::from_provider_code(status.as_u16(), &code));
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))?;

        let email = Email::parse(&account.email)
            .map_err(|e| IdentityError::Parse(format!("provider returned invalid email: {e}")))?;

        Ok(IdentityUser {
            user_id: account.local_id,
            email,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_account_response_parses() {
        let json = r#"{"localId":"u-123","email":"punter@example.com","idToken":"eyJ..."}"#;
        let account: AccountResponse = serde_json::from_str(json).unwrap();
        assert_eq!(account.local_id, "u-123");
        assert_eq!(account.email, "punter@example.com");
    }

    #[test]
    fn test_error_envelope_parses() {
        let json = r#"{"error":{"code":400,"message":"EMAIL_NOT_FOUND","errors":[]}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.message, "EMAIL_NOT_FOUND");
    }

    #[test]
    fn test_credentials_request_wire_shape() {
        let body = CredentialsRequest {
            email: "punter@example.com",
            password: "hunter2!",
            return_secure_token: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["email"], "punter@example.com");
        assert_eq!(json["returnSecureToken"], true);
    }
}
