//! Admin content-management panel.
//!
//! Gated by the configured allow-list, independent of paid state. Offers
//! the prediction draft form (create or edit-in-place), the manage list,
//! and the payment history projection.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use elite_tips_core::PredictionId;

use crate::db::{PredictionRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, PaymentReceipt, Prediction, PredictionDraft};
use crate::routes::theme::dark_mode;
use crate::state::AppState;

// =============================================================================
// Form / Query Types
// =============================================================================

/// Dashboard query parameters.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Prediction id whose fields should prefill the draft form.
    pub edit: Option<PredictionId>,
    /// One-shot error marker.
    pub error: Option<String>,
}

/// Draft form submission: the three draft fields plus the edit target.
#[derive(Debug, Deserialize)]
pub struct UpsertForm {
    pub matchup: String,
    pub tip: String,
    #[serde(default)]
    pub confidence: String,
    /// Present (non-empty) when updating an existing prediction.
    #[serde(default)]
    pub editing_id: String,
}

impl UpsertForm {
    fn into_parts(self) -> (PredictionDraft, String) {
        (
            PredictionDraft {
                matchup: self.matchup,
                tip: self.tip,
                confidence: self.confidence,
            },
            self.editing_id,
        )
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub dark: bool,
    pub user: Option<CurrentUser>,
    pub draft: PredictionDraft,
    pub editing_id: Option<String>,
    pub predictions: Vec<Prediction>,
    pub payments: Vec<PaymentReceipt>,
    pub error: Option<String>,
}

/// Not-authorized template, rendered inside the admin tab like every other
/// view (no redirect).
#[derive(Template, WebTemplate)]
#[template(path = "admin/forbidden.html")]
pub struct ForbiddenTemplate {
    pub dark: bool,
    pub user: Option<CurrentUser>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the admin dashboard.
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Query(query): Query<DashboardQuery>,
) -> Result<Response> {
    let dark = dark_mode(&session).await;

    if !state.config().admins.is_admin(&user.email) {
        return Ok((
            StatusCode::FORBIDDEN,
            ForbiddenTemplate {
                dark,
                user: Some(user),
            },
        )
            .into_response());
    }

    // Prefill the draft from the edit target, if one was picked.
    let (draft, editing_id) = match query.edit {
        Some(id) => {
            let existing = PredictionRepository::new(state.pool())
                .get(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("prediction {id}")))?;
            (
                PredictionDraft {
                    matchup: existing.matchup,
                    tip: existing.tip,
                    confidence: existing.confidence.unwrap_or_default(),
                },
                Some(id.to_string()),
            )
        }
        None => (PredictionDraft::default(), None),
    };

    let predictions = state
        .snapshots()
        .predictions(state.pool())
        .await?
        .as_ref()
        .clone();
    let payments = state
        .snapshots()
        .payment_history(state.pool())
        .await?
        .as_ref()
        .clone();

    Ok(DashboardTemplate {
        dark,
        user: Some(user),
        draft,
        editing_id,
        predictions,
        payments,
        error: query.error,
    }
    .into_response())
}

/// Create a new prediction, or update the edit target in place.
///
/// An empty matchup or tip makes the whole submit a no-op: the store is
/// never called and the list stays as it was.
#[instrument(skip(state, user, form), fields(email = %user.email))]
pub async fn upsert_prediction(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<UpsertForm>,
) -> Result<Response> {
    require_admin(&state, &user)?;

    let (draft, editing_id) = form.into_parts();

    if draft.validate().is_err() {
        return Ok(Redirect::to("/admin?error=missing_fields").into_response());
    }

    if editing_id.is_empty() {
        PredictionRepository::new(state.pool()).create(&draft).await?;
    } else {
        let id: PredictionId = editing_id
            .parse()
            .map_err(|_| AppError::BadRequest("malformed prediction id".to_owned()))?;

        PredictionRepository::new(state.pool())
            .update(id, &draft)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AppError::NotFound(format!("prediction {id}")),
                other => AppError::Database(other),
            })?;
    }

    // Reload the list; the redirect clears the draft and edit target.
    state.snapshots().invalidate_predictions().await;

    Ok(Redirect::to("/admin").into_response())
}

/// Delete a prediction. Immediate, no confirmation step.
#[instrument(skip(state, user), fields(email = %user.email, id = %id))]
pub async fn delete_prediction(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<PredictionId>,
) -> Result<Response> {
    require_admin(&state, &user)?;

    PredictionRepository::new(state.pool()).delete(id).await?;
    state.snapshots().invalidate_predictions().await;

    Ok(Redirect::to("/admin").into_response())
}

/// Allow-list gate for the mutating admin operations.
fn require_admin(state: &AppState, user: &CurrentUser) -> Result<()> {
    if state.config().admins.is_admin(&user.email) {
        Ok(())
    } else {
        Err(AppError::Forbidden("admin access required".to_owned()))
    }
}
