//! Read-snapshot cache for the two rendered projections.
//!
//! Every view render serves the latest committed snapshot; every write
//! invalidates its projection before redirecting into the next read. Two
//! rapid edits therefore cannot interleave into a stale list - the last
//! applied write always wins, and the next read recomputes from the store.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::db::{PredictionRepository, ReceiptRepository, RepositoryError};
use crate::models::{PaymentReceipt, Prediction};

/// Cache key for the read projections.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum ProjectionKey {
    Predictions,
    PaymentHistory,
}

/// Cached projection values.
#[derive(Debug, Clone)]
enum ProjectionValue {
    Predictions(Arc<Vec<Prediction>>),
    PaymentHistory(Arc<Vec<PaymentReceipt>>),
}

/// How long a snapshot may serve reads before it is recomputed anyway.
const SNAPSHOT_TTL: Duration = Duration::from_secs(30);

/// Snapshot cache over the prediction list and payment history.
#[derive(Clone)]
pub struct SnapshotCache {
    inner: Cache<ProjectionKey, ProjectionValue>,
}

impl SnapshotCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(4)
                .time_to_live(SNAPSHOT_TTL)
                .build(),
        }
    }

    /// The prediction list snapshot, loading from the store on miss.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a reload from the store fails.
    pub async fn predictions(
        &self,
        pool: &PgPool,
    ) -> Result<Arc<Vec<Prediction>>, RepositoryError> {
        if let Some(ProjectionValue::Predictions(list)) =
            self.inner.get(&ProjectionKey::Predictions).await
        {
            return Ok(list);
        }

        let fresh = Arc::new(PredictionRepository::new(pool).list().await?);
        self.inner
            .insert(
                ProjectionKey::Predictions,
                ProjectionValue::Predictions(Arc::clone(&fresh)),
            )
            .await;
        Ok(fresh)
    }

    /// The payment history snapshot, loading from the store on miss.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a reload from the store fails.
    pub async fn payment_history(
        &self,
        pool: &PgPool,
    ) -> Result<Arc<Vec<PaymentReceipt>>, RepositoryError> {
        if let Some(ProjectionValue::PaymentHistory(list)) =
            self.inner.get(&ProjectionKey::PaymentHistory).await
        {
            return Ok(list);
        }

        let fresh = Arc::new(ReceiptRepository::new(pool).list_all().await?);
        self.inner
            .insert(
                ProjectionKey::PaymentHistory,
                ProjectionValue::PaymentHistory(Arc::clone(&fresh)),
            )
            .await;
        Ok(fresh)
    }

    /// Drop the prediction snapshot after a content write.
    pub async fn invalidate_predictions(&self) {
        self.inner.invalidate(&ProjectionKey::Predictions).await;
    }

    /// Drop the payment history snapshot after a receipt write.
    pub async fn invalidate_payment_history(&self) {
        self.inner.invalidate(&ProjectionKey::PaymentHistory).await;
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}
