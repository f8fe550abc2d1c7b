//! Dark-mode toggle.
//!
//! The flag is plain view state kept on the session; nothing else reads it.

use axum::{
    Form,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::models::session_keys;

/// Toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    /// Where to return to after toggling.
    #[serde(default)]
    pub next: String,
}

/// Read the session's dark-mode flag.
pub async fn dark_mode(session: &Session) -> bool {
    session
        .get::<bool>(session_keys::DARK_MODE)
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}

/// Flip the dark-mode flag and bounce back.
pub async fn toggle(session: Session, Form(form): Form<ToggleForm>) -> impl IntoResponse {
    let current = dark_mode(&session).await;
    if let Err(e) = session.insert(session_keys::DARK_MODE, !current).await {
        tracing::warn!("Failed to store dark-mode flag: {}", e);
    }

    // Only bounce to local paths
    let next = if form.next.starts_with('/') && !form.next.starts_with("//") {
        form.next
    } else {
        "/predictions".to_owned()
    };

    Redirect::to(&next)
}
