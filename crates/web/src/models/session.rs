//! Session-stored types.

use serde::{Deserialize, Serialize};

use elite_tips_core::Email;

/// Session-stored user identity.
///
/// `has_paid` is derived from the entitlement store exactly once at login
/// (and flipped by a successful payment); it is a session-local cache, not
/// an authoritative record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// The authenticated email.
    pub email: Email,
    /// Whether a payment receipt existed for this email when last derived.
    pub has_paid: bool,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the dark-mode flag.
    pub const DARK_MODE: &str = "dark_mode";
}
