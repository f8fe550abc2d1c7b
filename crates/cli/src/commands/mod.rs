//! CLI subcommands.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the database-backed commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] elite_tips_web::db::RepositoryError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Connect to the site database named by the environment.
///
/// Accepts `ELITETIPS_DATABASE_URL` with a `DATABASE_URL` fallback, same
/// as the server.
pub(crate) async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ELITETIPS_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("ELITETIPS_DATABASE_URL"))?;

    Ok(elite_tips_web::db::create_pool(&database_url).await?)
}
