//! Prediction repository.

use sqlx::PgPool;

use elite_tips_core::PredictionId;

use super::RepositoryError;
use crate::models::{Prediction, PredictionDraft};

/// Repository for prediction content.
pub struct PredictionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PredictionRepository<'a> {
    /// Create a new prediction repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Read the full prediction list.
    ///
    /// No ORDER BY: row order is store-assigned and not stable across
    /// reads. Consumers must treat the result as a set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Prediction>, RepositoryError> {
        let rows = sqlx::query_as::<_, Prediction>(
            r"
            SELECT id, matchup, tip, confidence
            FROM predictions
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Fetch a single prediction by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: PredictionId) -> Result<Option<Prediction>, RepositoryError> {
        let row = sqlx::query_as::<_, Prediction>(
            r"
            SELECT id, matchup, tip, confidence
            FROM predictions
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Create a new prediction from a validated draft.
    ///
    /// The id is assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, draft: &PredictionDraft) -> Result<Prediction, RepositoryError> {
        let row = sqlx::query_as::<_, Prediction>(
            r"
            INSERT INTO predictions (matchup, tip, confidence)
            VALUES ($1, $2, $3)
            RETURNING id, matchup, tip, confidence
            ",
        )
        .bind(&draft.matchup)
        .bind(&draft.tip)
        .bind(draft.confidence_opt())
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// Update an existing prediction's fields in place.
    ///
    /// The id itself is immutable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: PredictionId,
        draft: &PredictionDraft,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE predictions
            SET matchup = $2, tip = $3, confidence = $4, updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&draft.matchup)
        .bind(&draft.tip)
        .bind(draft.confidence_opt())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a prediction by id. Immediate and irreversible.
    ///
    /// # Returns
    ///
    /// Returns `true` if a row was deleted, `false` if the id was unknown.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: PredictionId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM predictions
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
