//! Integration tests for the entitlement flow invariants.
//!
//! These walk the signup -> pay -> unlock scenario at the library level:
//! a fresh session starts unpaid without any entitlement query, a verified
//! tier-50 charge produces exactly the receipt whose existence means
//! "entitled", and draft validation keeps empty submits away from the
//! store.

use serde_json::json;

use elite_tips_core::{Email, SubscriptionTier};
use elite_tips_web::identity::IdentityError;
use elite_tips_web::models::{CurrentUser, PaymentReceipt, PredictionDraft};
use elite_tips_web::paystack::ChargeVerification;

#[test]
fn test_fresh_signup_is_unpaid_then_payment_entitles() {
    let email = Email::parse("newuser@example.com").expect("valid email");

    // Signup: logged in, unpaid, no entitlement query performed.
    let session_user = CurrentUser {
        email: email.clone(),
        has_paid: false,
    };
    assert!(!session_user.has_paid);

    // User pays tier 50; the popup reports a reference and the charge
    // verifies.
    let tier = SubscriptionTier::from_kes(50).expect("50 is an offered tier");
    let charge: ChargeVerification = serde_json::from_value(json!({
        "reference": "T100200300400500",
        "status": "success",
        "amount": 5000,
        "currency": "KES",
        "paid_at": "2026-08-01T12:00:00.000Z",
        "customer": {"email": "newuser@example.com"}
    }))
    .expect("charge fixture must deserialize");
    charge.ensure_settles(tier).expect("charge settles the tier");

    // Exactly one receipt for this email, carrying the tier amount.
    let receipt = PaymentReceipt::from_charge(email.clone(), tier, &charge);
    assert_eq!(receipt.email, email);
    assert_eq!(receipt.amount_kes, 50);

    // The session flips entitled; the gated list becomes visible.
    let entitled = CurrentUser {
        email,
        has_paid: true,
    };
    assert!(entitled.has_paid);
}

#[test]
fn test_session_user_roundtrips_through_storage() {
    // The session store serializes CurrentUser; the entitlement flag must
    // survive the roundtrip.
    let user = CurrentUser {
        email: Email::parse("punter@example.com").expect("valid email"),
        has_paid: true,
    };

    let stored = serde_json::to_string(&user).expect("serializes");
    let restored: CurrentUser = serde_json::from_str(&stored).expect("deserializes");

    assert_eq!(restored.email, user.email);
    assert!(restored.has_paid);
}

#[test]
fn test_empty_drafts_never_reach_the_store() {
    let missing_tip = PredictionDraft {
        matchup: "Arsenal vs Chelsea".to_owned(),
        tip: String::new(),
        confidence: String::new(),
    };
    assert!(missing_tip.validate().is_err());

    let missing_matchup = PredictionDraft {
        matchup: String::new(),
        tip: "Over 2.5".to_owned(),
        confidence: String::new(),
    };
    assert!(missing_matchup.validate().is_err());

    let complete = PredictionDraft {
        matchup: "Arsenal vs Chelsea".to_owned(),
        tip: "Over 2.5".to_owned(),
        confidence: String::new(),
    };
    assert!(complete.validate().is_ok());
}

#[test]
fn test_login_failures_stay_generic_but_structured() {
    // Wrong-password and unknown-user collapse into one variant; the page
    // can only ever say "Login failed".
    let wrong_password = IdentityError::from_provider_code(400, "INVALID_PASSWORD");
    let unknown_user = IdentityError::from_provider_code(400, "EMAIL_NOT_FOUND");

    assert!(matches!(wrong_password, IdentityError::InvalidCredentials));
    assert!(matches!(unknown_user, IdentityError::InvalidCredentials));

    // Signup collisions keep their own kind so the page can hint.
    assert!(matches!(
        IdentityError::from_provider_code(400, "EMAIL_EXISTS"),
        IdentityError::EmailTaken
    ));
}
