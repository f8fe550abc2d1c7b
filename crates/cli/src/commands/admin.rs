//! Admin policy inspection command.
//!
//! The admin panel is gated by the `ADMIN_EMAILS` allow-list; this command
//! evaluates an email against it exactly the way the server does
//! (exact-match, no normalization).

use elite_tips_core::Email;
use elite_tips_web::config::AdminAllowList;

use super::CommandError;

/// Report whether `email` may use the admin panel.
///
/// # Errors
///
/// Returns `CommandError::InvalidInput` if the email does not parse.
pub fn check(email: &str) -> Result<(), CommandError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email).map_err(|e| CommandError::InvalidInput(e.to_string()))?;
    let admins = AdminAllowList::parse(&std::env::var("ADMIN_EMAILS").unwrap_or_default());

    let verdict = if admins.is_admin(&email) {
        "admin"
    } else {
        "not an admin"
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{email}: {verdict} ({} identities configured)", admins.len());
    }

    Ok(())
}
