//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ELITETIPS_DATABASE_URL` - `PostgreSQL` connection string
//! - `ELITETIPS_BASE_URL` - Public URL for the site
//! - `ELITETIPS_SESSION_SECRET` - Session signing secret (min 32 chars)
//! - `IDENTITY_BASE_URL` - Identity provider REST endpoint
//! - `IDENTITY_API_KEY` - Identity provider API key
//! - `PAYSTACK_PUBLIC_KEY` - Paystack public key (exposed to the browser widget)
//! - `PAYSTACK_SECRET_KEY` - Paystack secret key (server-side verification)
//!
//! ## Optional
//! - `ELITETIPS_HOST` - Bind address (default: 127.0.0.1)
//! - `ELITETIPS_PORT` - Listen port (default: 3000)
//! - `ADMIN_EMAILS` - Comma-separated allow-list of admin identities
//! - `PAYSTACK_BASE_URL` - Paystack API base (default: <https://api.paystack.co>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

use elite_tips_core::Email;

const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: Url,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Identity provider configuration
    pub identity: IdentityConfig,
    /// Paystack configuration
    pub paystack: PaystackConfig,
    /// Admin authorization policy
    pub admins: AdminAllowList,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
}

/// Identity provider configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct IdentityConfig {
    /// Base URL of the provider's REST API
    pub base_url: Url,
    /// Provider API key
    pub api_key: SecretString,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Paystack configuration.
///
/// Implements `Debug` manually to redact the secret key.
#[derive(Clone)]
pub struct PaystackConfig {
    /// API base URL
    pub base_url: Url,
    /// Public key (safe to expose to the browser widget)
    pub public_key: String,
    /// Secret key (server-side only, used for charge verification)
    pub secret_key: SecretString,
}

impl std::fmt::Debug for PaystackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaystackConfig")
            .field("base_url", &self.base_url.as_str())
            .field("public_key", &self.public_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// The set of identities allowed to use the admin panel.
///
/// Supplied as configuration rather than compiled in. Membership is exact
/// string equality on the email - no trimming beyond list parsing, no case
/// folding - so `Admin@x.com` is not an admin when `admin@x.com` is listed.
#[derive(Debug, Clone, Default)]
pub struct AdminAllowList(Vec<String>);

impl AdminAllowList {
    /// Parse a comma-separated allow-list, ignoring empty segments.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Whether this email may use the admin panel.
    #[must_use]
    pub fn is_admin(&self, email: &Email) -> bool {
        self.0.iter().any(|entry| entry == email.as_str())
    }

    /// Number of configured admin identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no admin identity is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the session secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("ELITETIPS_DATABASE_URL")?;
        let host = get_env_or_default("ELITETIPS_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ELITETIPS_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("ELITETIPS_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ELITETIPS_PORT".to_owned(), e.to_string()))?;
        let base_url = get_url("ELITETIPS_BASE_URL")?;

        let session_secret = SecretString::from(get_required_env("ELITETIPS_SESSION_SECRET")?);
        validate_session_secret(&session_secret, "ELITETIPS_SESSION_SECRET")?;

        let identity = IdentityConfig {
            base_url: get_url("IDENTITY_BASE_URL")?,
            api_key: SecretString::from(get_required_env("IDENTITY_API_KEY")?),
        };

        let paystack = PaystackConfig {
            base_url: get_optional_env("PAYSTACK_BASE_URL")
                .as_deref()
                .unwrap_or("https://api.paystack.co")
                .parse::<Url>()
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("PAYSTACK_BASE_URL".to_owned(), e.to_string())
                })?,
            public_key: get_required_env("PAYSTACK_PUBLIC_KEY")?,
            secret_key: SecretString::from(get_required_env("PAYSTACK_SECRET_KEY")?),
        };

        let admins = AdminAllowList::parse(&get_optional_env("ADMIN_EMAILS").unwrap_or_default());
        if admins.is_empty() {
            tracing::warn!("ADMIN_EMAILS is empty; the admin panel is unreachable");
        }

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            identity,
            paystack,
            admins,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public base URL is served over HTTPS (controls the
    /// session cookie's `Secure` attribute).
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get a required environment variable parsed as a URL.
fn get_url(key: &str) -> Result<Url, ConfigError> {
    get_required_env(key)?
        .parse::<Url>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL` (set by managed
/// Postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Validate that a session secret is long enough and not a placeholder.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }

    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_owned(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[test]
    fn test_allow_list_exact_match() {
        let admins = AdminAllowList::parse("boss@elitetips.ke");
        assert!(admins.is_admin(&email("boss@elitetips.ke")));
        assert!(!admins.is_admin(&email("someone@elitetips.ke")));
    }

    #[test]
    fn test_allow_list_no_case_normalization() {
        let admins = AdminAllowList::parse("boss@elitetips.ke");
        assert!(!admins.is_admin(&email("Boss@elitetips.ke")));
        assert!(!admins.is_admin(&email("boss@ELITETIPS.KE")));
    }

    #[test]
    fn test_allow_list_parsing_skips_empty_segments() {
        let admins = AdminAllowList::parse(" boss@elitetips.ke, ,second@elitetips.ke,");
        assert_eq!(admins.len(), 2);
        assert!(admins.is_admin(&email("second@elitetips.ke")));
    }

    #[test]
    fn test_allow_list_empty() {
        let admins = AdminAllowList::parse("");
        assert!(admins.is_empty());
        assert!(!admins.is_admin(&email("anyone@example.com")));
    }

    #[test]
    fn test_session_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_session_secret(&secret, "TEST_SESSION").is_err());
    }

    #[test]
    fn test_session_secret_placeholder() {
        let secret = SecretString::from("changeme-changeme-changeme-changeme");
        assert!(validate_session_secret(&secret, "TEST_SESSION").is_err());
    }

    #[test]
    fn test_session_secret_valid() {
        let secret = SecretString::from("kT9qW2zR8vN4mB6xC1jH5fD7gL3pY0aS");
        assert!(validate_session_secret(&secret, "TEST_SESSION").is_ok());
    }

    #[test]
    fn test_identity_config_debug_redacts_api_key() {
        let config = IdentityConfig {
            base_url: "https://identity.example.com".parse().unwrap(),
            api_key: SecretString::from("super_secret_api_key"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("identity.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_api_key"));
    }

    #[test]
    fn test_paystack_config_debug_redacts_secret_key() {
        let config = PaystackConfig {
            base_url: "https://api.paystack.co".parse().unwrap(),
            public_key: "pk_test_visible".to_owned(),
            secret_key: SecretString::from("sk_test_hidden"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("pk_test_visible"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sk_test_hidden"));
    }
}
