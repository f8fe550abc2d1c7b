//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::SnapshotCache;
use crate::config::AppConfig;
use crate::identity::IdentityClient;
use crate::paystack::{PaystackClient, PaystackError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to shared resources like
/// the database pool, collaborator clients, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    identity: IdentityClient,
    paystack: PaystackClient,
    snapshots: SnapshotCache,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if a collaborator client cannot be built from the
    /// configuration.
    pub fn new(config: AppConfig, pool: PgPool) -> Result<Self, PaystackError> {
        let identity = IdentityClient::new(&config.identity);
        let paystack = PaystackClient::new(&config.paystack)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                identity,
                paystack,
                snapshots: SnapshotCache::new(),
            }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the identity provider client.
    #[must_use]
    pub fn identity(&self) -> &IdentityClient {
        &self.inner.identity
    }

    /// Get a reference to the Paystack client.
    #[must_use]
    pub fn paystack(&self) -> &PaystackClient {
        &self.inner.paystack
    }

    /// Get a reference to the read-snapshot cache.
    #[must_use]
    pub fn snapshots(&self) -> &SnapshotCache {
        &self.inner.snapshots
    }
}
