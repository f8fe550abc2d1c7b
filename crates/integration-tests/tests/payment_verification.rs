//! Integration tests for charge verification and receipt building.
//!
//! These verify that a popup-reported charge only ever becomes a receipt
//! when it settles the selected tier exactly, and that the written receipt
//! carries the tier amount.

use chrono::{TimeZone, Utc};
use serde_json::json;

use elite_tips_core::{Email, SubscriptionTier};
use elite_tips_web::models::PaymentReceipt;
use elite_tips_web::paystack::{ChargeVerification, PaystackError};

fn charge_json(amount: i64, currency: &str, status: &str) -> ChargeVerification {
    let value = json!({
        "reference": "T685312322670591",
        "status": status,
        "amount": amount,
        "currency": currency,
        "paid_at": "2026-03-14T09:21:44.000Z",
        "channel": "card",
        "customer": {"id": 181873, "email": "punter@example.com"}
    });
    serde_json::from_value(value).expect("charge fixture must deserialize")
}

// =============================================================================
// Verification Matrix
// =============================================================================

#[test]
fn test_every_tier_settles_its_own_charge() {
    for tier in SubscriptionTier::ALL {
        let charge = charge_json(tier.amount_minor_units(), "KES", "success");
        assert!(
            charge.ensure_settles(tier).is_ok(),
            "{tier} must settle a charge of its own minor-unit amount"
        );
    }
}

#[test]
fn test_no_tier_settles_another_tiers_charge() {
    for paid in SubscriptionTier::ALL {
        for owed in SubscriptionTier::ALL {
            if paid == owed {
                continue;
            }
            let charge = charge_json(paid.amount_minor_units(), "KES", "success");
            assert!(
                matches!(
                    charge.ensure_settles(owed),
                    Err(PaystackError::ChargeMismatch(_))
                ),
                "a {paid} charge must not settle the {owed} tier"
            );
        }
    }
}

#[test]
fn test_incomplete_charges_never_settle() {
    for status in ["failed", "abandoned", "pending", "reversed"] {
        let charge = charge_json(2000, "KES", status);
        assert!(matches!(
            charge.ensure_settles(SubscriptionTier::Single),
            Err(PaystackError::ChargeNotSuccessful { .. })
        ));
    }
}

#[test]
fn test_foreign_currency_never_settles() {
    // Right amount, wrong currency
    let charge = charge_json(2000, "NGN", "success");
    assert!(matches!(
        charge.ensure_settles(SubscriptionTier::Single),
        Err(PaystackError::ChargeMismatch(_))
    ));
}

// =============================================================================
// Receipt Building
// =============================================================================

#[test]
fn test_receipt_records_the_tier_amount() {
    let email = Email::parse("punter@example.com").expect("valid email");
    let charge = charge_json(5000, "KES", "success");

    let receipt = PaymentReceipt::from_charge(email.clone(), SubscriptionTier::Daily, &charge);

    assert_eq!(receipt.email, email);
    assert_eq!(receipt.reference, "T685312322670591");
    // Whole shillings, not minor units
    assert_eq!(receipt.amount_kes, 50);
}

#[test]
fn test_receipt_uses_provider_capture_time() {
    let email = Email::parse("punter@example.com").expect("valid email");
    let charge = charge_json(5000, "KES", "success");

    let receipt = PaymentReceipt::from_charge(email, SubscriptionTier::Daily, &charge);

    let expected = Utc.with_ymd_and_hms(2026, 3, 14, 9, 21, 44).single();
    assert_eq!(Some(receipt.paid_at), expected);
}

#[test]
fn test_receipt_falls_back_to_now_without_capture_time() {
    let email = Email::parse("punter@example.com").expect("valid email");
    let mut charge = charge_json(5000, "KES", "success");
    charge.paid_at = None;

    let before = Utc::now();
    let receipt = PaymentReceipt::from_charge(email, SubscriptionTier::Daily, &charge);
    let after = Utc::now();

    assert!(receipt.paid_at >= before && receipt.paid_at <= after);
}
