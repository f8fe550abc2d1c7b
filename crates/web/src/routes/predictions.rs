//! The gated predictions view.
//!
//! The gate is binary: an entitled session sees the full list, everyone
//! else sees a locked placeholder (plus a login prompt when anonymous).
//! There is no partial or blurred preview.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, Prediction};
use crate::routes::theme::dark_mode;
use crate::state::AppState;

/// Query parameters for one-shot notices.
#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    /// Set after a successful payment redirect.
    pub paid: Option<String>,
}

/// Predictions page template.
#[derive(Template, WebTemplate)]
#[template(path = "predictions.html")]
pub struct PredictionsTemplate {
    pub dark: bool,
    pub user: Option<CurrentUser>,
    pub has_paid: bool,
    pub predictions: Vec<Prediction>,
    pub paid_notice: bool,
}

/// Redirect the root to the predictions view (the default tab).
pub async fn index() -> Redirect {
    Redirect::to("/predictions")
}

/// Render the predictions view.
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let has_paid = user.as_ref().is_some_and(|u| u.has_paid);

    // The list is only fetched for entitled sessions; the gate hides it
    // from everyone else anyway.
    let predictions = if has_paid {
        state.snapshots().predictions(state.pool()).await?.as_ref().clone()
    } else {
        Vec::new()
    };

    Ok(PredictionsTemplate {
        dark: dark_mode(&session).await,
        user,
        has_paid,
        predictions,
        paid_notice: query.paid.is_some(),
    })
}
