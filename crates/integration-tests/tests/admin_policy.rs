//! Integration tests for the admin authorization policy.
//!
//! The allow-list is exact-match: exactly the configured identities are
//! admins, and nothing else - including case variants of a configured
//! identity.

use elite_tips_core::Email;
use elite_tips_web::config::AdminAllowList;

fn email(s: &str) -> Email {
    Email::parse(s).expect("valid test email")
}

#[test]
fn test_single_configured_identity_is_the_only_admin() {
    let admins = AdminAllowList::parse("boss@elitetips.ke");

    assert!(admins.is_admin(&email("boss@elitetips.ke")));

    for other in [
        "someone@elitetips.ke",
        "boss@elitetips.co",
        "bboss@elitetips.ke",
        "boss@elitetips.ke.evil.com",
    ] {
        assert!(!admins.is_admin(&email(other)), "{other} must not be admin");
    }
}

#[test]
fn test_case_variants_are_not_admins() {
    let admins = AdminAllowList::parse("boss@elitetips.ke");

    for variant in [
        "Boss@elitetips.ke",
        "BOSS@elitetips.ke",
        "boss@Elitetips.ke",
        "boss@ELITETIPS.KE",
    ] {
        assert!(
            !admins.is_admin(&email(variant)),
            "{variant} must not match - no normalization is applied"
        );
    }
}

#[test]
fn test_multiple_identities() {
    let admins = AdminAllowList::parse("first@elitetips.ke,second@elitetips.ke");

    assert!(admins.is_admin(&email("first@elitetips.ke")));
    assert!(admins.is_admin(&email("second@elitetips.ke")));
    assert!(!admins.is_admin(&email("third@elitetips.ke")));
}

#[test]
fn test_empty_policy_grants_nobody() {
    let admins = AdminAllowList::parse("");
    assert!(admins.is_empty());
    assert!(!admins.is_admin(&email("boss@elitetips.ke")));
}
