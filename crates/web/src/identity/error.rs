//! Identity provider error types.

use thiserror::Error;

/// Errors that can occur when talking to the identity provider.
///
/// The provider's error codes are kept structured here; the UI collapses
/// them to a generic failure message at the boundary.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider rejected the credentials (unknown user or wrong password -
    /// the provider does not say which, and neither do we).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account already exists for this email.
    #[error("email already registered")]
    EmailTaken,

    /// Provider returned an error this client does not map.
    #[error("provider error: {status} - {code}")]
    Api {
        /// HTTP status of the response.
        status: u16,
        /// Provider error code, verbatim.
        code: String,
    },

    /// Failed to parse a provider response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl IdentityError {
    /// Map a provider error code to a structured error.
    ///
    /// Credential problems deliberately collapse into one variant: the
    /// public surface must not distinguish "no such user" from "wrong
    /// password".
    #[must_use]
    pub fn from_provider_code(status: u16, code: &str) -> Self {
        match code {
            "EMAIL_EXISTS" => Self::EmailTaken,
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS"
            | "USER_DISABLED" => Self::InvalidCredentials,
            other => Self::Api {
                status,
                code: other.to_owned(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_exists_maps_to_taken() {
        assert!(matches!(
            IdentityError::from_provider_code(400, "EMAIL_EXISTS"),
            IdentityError::EmailTaken
        ));
    }

    #[test]
    fn test_credential_codes_collapse() {
        for code in [
            "EMAIL_NOT_FOUND",
            "INVALID_PASSWORD",
            "INVALID_LOGIN_CREDENTIALS",
            "USER_DISABLED",
        ] {
            assert!(
                matches!(
                    IdentityError::from_provider_code(400, code),
                    IdentityError::InvalidCredentials
                ),
                "{code} must map to InvalidCredentials"
            );
        }
    }

    #[test]
    fn test_unknown_codes_stay_structured() {
        match IdentityError::from_provider_code(429, "QUOTA_EXCEEDED") {
            IdentityError::Api { status, code } => {
                assert_eq!(status, 429);
                assert_eq!(code, "QUOTA_EXCEEDED");
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
