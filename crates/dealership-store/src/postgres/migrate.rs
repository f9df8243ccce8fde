//! Embedded schema migrations.

use std::time::{Duration, Instant};

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use super::PgClient;
use crate::{MIGRATIONS, StoreError, StoreResult, TRACING_TARGET_MIGRATION};

/// Outcome of [`run_pending_migrations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    /// Versions applied by this run, oldest first.
    pub applied_versions: Vec<String>,
    /// Wall time spent applying them.
    pub duration: Duration,
}

impl MigrationResult {
    /// Returns whether the schema was already up to date.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.applied_versions.is_empty()
    }
}

/// Applies every embedded migration that the database has not seen yet.
///
/// Diesel's migration harness is synchronous, so it runs on the blocking
/// thread pool over a wrapped async connection.
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> StoreResult<MigrationResult> {
    let start = Instant::now();
    let conn = pg.get_connection().await?;
    let mut conn: AsyncConnectionWrapper<_> = conn.into();

    let versions = spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.into_iter().map(|v| v.to_string()).collect::<Vec<_>>())
    })
    .await
    .map_err(|err| {
        tracing::error!(target: TRACING_TARGET_MIGRATION, error = %err, "migration task panicked");
        StoreError::Migration(err.into())
    })?
    .map_err(|err| {
        tracing::error!(target: TRACING_TARGET_MIGRATION, error = %err, "database migration failed");
        StoreError::Migration(err)
    })?;

    let result = MigrationResult {
        applied_versions: versions,
        duration: start.elapsed(),
    };

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        applied = result.applied_versions.len(),
        duration = ?result.duration,
        "database schema is up to date"
    );

    Ok(result)
}
