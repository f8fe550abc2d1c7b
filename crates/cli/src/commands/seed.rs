//! Seed command: sample prediction content for a fresh database.

use elite_tips_web::db::PredictionRepository;
use elite_tips_web::models::PredictionDraft;

use super::CommandError;

/// Sample fixtures inserted by `et-cli seed`.
const SAMPLES: &[(&str, &str, &str)] = &[
    ("Arsenal vs Chelsea", "Over 2.5 goals", "80%"),
    ("Gor Mahia vs AFC Leopards", "Home win", "70%"),
    ("Real Madrid vs Barcelona", "Both teams to score", ""),
];

/// Insert the sample predictions.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;
    let repo = PredictionRepository::new(&pool);

    for (matchup, tip, confidence) in SAMPLES {
        let draft = PredictionDraft {
            matchup: (*matchup).to_owned(),
            tip: (*tip).to_owned(),
            confidence: (*confidence).to_owned(),
        };
        let created = repo.create(&draft).await?;
        tracing::info!(id = %created.id, matchup = %created.matchup, "Seeded prediction");
    }

    tracing::info!("Seeded {} predictions", SAMPLES.len());
    Ok(())
}
