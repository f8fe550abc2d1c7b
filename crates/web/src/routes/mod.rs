//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Redirect to the predictions view
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Readiness check (DB connectivity)
//!
//! # Predictions (the gated content view)
//! GET  /predictions              - Full list when entitled, locked placeholder otherwise
//!
//! # Subscribe
//! GET  /subscribe                - Plans, tier selector, payment popup
//! POST /subscribe/confirm        - Verify a reported charge, write the receipt
//!
//! # Auth
//! GET  /auth/login               - Login / signup page
//! POST /auth/login               - Login action
//! POST /auth/register            - Signup action
//! POST /auth/logout              - Logout action
//!
//! # Admin (allow-list gated)
//! GET  /admin                    - Dashboard: draft form, manage list, payment history
//! POST /admin/predictions        - Create or update a prediction
//! POST /admin/predictions/{id}/delete - Delete a prediction
//!
//! # View state
//! POST /theme                    - Toggle the dark-mode flag
//! ```

pub mod admin;
pub mod auth;
pub mod predictions;
pub mod subscribe;
pub mod theme;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the subscribe routes router.
pub fn subscribe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(subscribe::show))
        .route("/confirm", post(subscribe::confirm))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/predictions", post(admin::upsert_prediction))
        .route("/predictions/{id}/delete", post(admin::delete_prediction))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(predictions::index))
        .route("/predictions", get(predictions::show))
        .nest("/subscribe", subscribe_routes())
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
        .route("/theme", post(theme::toggle))
}
