//! Database migration command.
//!
//! Runs the web crate's migrations against the database named by
//! `ELITETIPS_DATABASE_URL` (or `DATABASE_URL`).

use super::CommandError;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
