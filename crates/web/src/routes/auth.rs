//! Authentication route handlers.
//!
//! Login and signup both delegate to the external identity provider; the
//! session only ever holds the provider-confirmed email plus the derived
//! entitlement flag.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::ReceiptRepository;
use crate::identity::IdentityError;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::theme::dark_mode;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup form data. Same fields; the original product has one form with
/// two buttons.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login / signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub dark: bool,
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login / signup page.
pub async fn login_page(session: Session, Query(query): Query<MessageQuery>) -> impl IntoResponse {
    // One generic line per failure class; provider detail never reaches
    // the page.
    let error = query.error.as_deref().map(|marker| {
        match marker {
            "credentials" => "Login failed",
            "email_taken" => "An account with this email already exists",
            "signup" => "Signup failed",
            _ => "Something went wrong. Please try again.",
        }
        .to_owned()
    });

    LoginTemplate {
        dark: dark_mode(&session).await,
        user: None,
        error,
    }
}

/// Handle login form submission.
///
/// On success the entitlement flag is derived for this email - the one
/// receipt-presence query this session will make until the next login or a
/// payment - and both read snapshots are dropped so the views reload.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let identity = match state.identity().sign_in(&form.email, &form.password).await {
        Ok(identity) => identity,
        Err(e) => {
            // Structured kind stays in the logs; the page shows the same
            // generic failure for every cause.
            tracing::warn!(error = %e, "Login failed");
            return Redirect::to("/auth/login?error=credentials").into_response();
        }
    };

    tracing::debug!(user_id = %identity.user_id, "Provider authenticated user");

    let has_paid = match ReceiptRepository::new(state.pool())
        .exists(&identity.email)
        .await
    {
        Ok(present) => present,
        Err(e) => {
            tracing::error!(error = %e, "Entitlement lookup failed during login");
            return Redirect::to("/auth/login?error=store").into_response();
        }
    };

    let user = CurrentUser {
        email: identity.email,
        has_paid,
    };

    if let Err(e) = set_current_user(&session, &user).await {
        tracing::error!("Failed to set session: {}", e);
        return Redirect::to("/auth/login?error=session").into_response();
    }

    // Login reloads both projections: the content view re-reads after the
    // entitlement check, and the payment history is re-read for the admin
    // panel.
    state.snapshots().invalidate_predictions().await;
    state.snapshots().invalidate_payment_history().await;

    Redirect::to("/predictions").into_response()
}

/// Handle signup form submission.
///
/// A fresh account is logged in unpaid. Entitlement is deliberately NOT
/// derived here; the first receipt-presence query for this email happens
/// on its next login.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let identity = match state.identity().sign_up(&form.email, &form.password).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(error = %e, "Signup failed");
            let marker = match e {
                IdentityError::EmailTaken => "email_taken",
                _ => "signup",
            };
            return Redirect::to(&format!("/auth/login?error={marker}")).into_response();
        }
    };

    tracing::debug!(user_id = %identity.user_id, "Provider created account");

    let user = CurrentUser {
        email: identity.email,
        has_paid: false,
    };

    if let Err(e) = set_current_user(&session, &user).await {
        tracing::error!("Failed to set session: {}", e);
        return Redirect::to("/auth/login?error=session").into_response();
    }

    Redirect::to("/predictions").into_response()
}

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    Redirect::to("/").into_response()
}
