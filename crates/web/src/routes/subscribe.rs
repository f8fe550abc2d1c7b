//! Subscription purchase view and payment confirmation.
//!
//! The page lists the fixed tiers and opens the provider's popup with the
//! session email, the tier in minor units, and the KES currency code. The
//! popup's success callback posts the transaction reference back here;
//! the charge is verified server-side before anything is written. Closing
//! the popup posts nothing - the page just shows a non-fatal notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use elite_tips_core::SubscriptionTier;

use crate::db::ReceiptRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth, set_current_user};
use crate::models::{CurrentUser, PaymentReceipt};
use crate::routes::theme::dark_mode;
use crate::state::AppState;

/// Query parameters for notice display.
#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    pub error: Option<String>,
}

/// Confirmation form posted by the popup's success callback.
#[derive(Debug, Deserialize)]
pub struct ConfirmForm {
    /// Transaction reference reported by the popup.
    pub reference: String,
    /// The tier the payer selected, in whole shillings.
    pub amount_kes: i64,
}

/// Subscribe page template.
#[derive(Template, WebTemplate)]
#[template(path = "subscribe.html")]
pub struct SubscribeTemplate {
    pub dark: bool,
    pub user: Option<CurrentUser>,
    pub tiers: [SubscriptionTier; 5],
    pub public_key: String,
    pub closed_notice: bool,
}

/// Render the subscription plans.
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<NoticeQuery>,
) -> impl IntoResponse {
    SubscribeTemplate {
        dark: dark_mode(&session).await,
        user,
        tiers: SubscriptionTier::ALL,
        public_key: state.config().paystack.public_key.clone(),
        closed_notice: query.error.as_deref() == Some("closed"),
    }
}

/// Confirm a reported charge and write the receipt.
///
/// The receipt fully replaces any earlier one for the same email; "has
/// paid" stays a per-email boolean, not a payment count.
#[instrument(skip(state, session, user), fields(email = %user.email, reference = %form.reference))]
pub async fn confirm(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ConfirmForm>,
) -> Result<impl IntoResponse> {
    let tier = SubscriptionTier::from_kes(form.amount_kes)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let charge = state.paystack().verify_transaction(&form.reference).await?;
    charge.ensure_settles(tier)?;

    let receipt = PaymentReceipt::from_charge(user.email.clone(), tier, &charge);
    ReceiptRepository::new(state.pool()).upsert(&receipt).await?;

    // Entitlement flips on the session without waiting for the next login.
    let entitled = CurrentUser {
        email: user.email,
        has_paid: true,
    };
    set_current_user(&session, &entitled).await?;

    state.snapshots().invalidate_predictions().await;
    state.snapshots().invalidate_payment_history().await;

    tracing::info!(amount_kes = tier.amount_kes(), "Payment verified and receipt written");
    Ok(Redirect::to("/predictions?paid=1"))
}
