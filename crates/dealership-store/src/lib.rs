#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Embeds all migrations into the final binary.
pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!("./src/migrations");

// Tracing target constants for consistent logging.

/// Tracing target for client-related operations.
///
/// Use this target for logging client initialization, configuration, and lifecycle events.
pub const TRACING_TARGET_CLIENT: &str = "dealership_store::client";

/// Tracing target for repository query operations.
pub const TRACING_TARGET_QUERY: &str = "dealership_store::queries";

/// Tracing target for database migration operations.
pub const TRACING_TARGET_MIGRATION: &str = "dealership_store::migrations";

/// Tracing target for database connection operations.
///
/// Use this target for logging connection establishment, pool management, and connection errors.
pub const TRACING_TARGET_CONNECTION: &str = "dealership_store::connection";

mod error;
mod memory;
pub mod model;
mod postgres;
pub mod query;
mod schema;
pub mod types;

pub use diesel_async::AsyncPgConnection as PgConnection;

pub use crate::error::{BoxError, StoreError, StoreResult};
pub use crate::memory::MemoryStore;
pub use crate::postgres::{
    ConnectionPool, MigrationResult, PgClient, PgConfig, PgPoolStatus, PooledConnection,
    run_pending_migrations,
};
pub use crate::query::{SharedStore, Store};
