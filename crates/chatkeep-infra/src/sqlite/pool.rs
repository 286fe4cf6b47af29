//! Database pool with split reader/writer connections in WAL mode.
//!
//! SQLite allows only one writer at a time. This module provides a `DatabasePool`
//! with a multi-connection reader pool for concurrent reads and a single-connection
//! writer pool for serialized writes. Both use WAL journal mode and enforce foreign keys.

use std::str::FromStr;
use std::time::Duration;

use chatkeep_types::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

/// Split read/write pool for SQLite with WAL mode.
///
/// - `reader`: Multi-connection read-only pool for SELECT queries.
/// - `writer`: Single-connection pool; every write transaction holds it for
///   its whole lifetime, so check-then-insert sequences never interleave.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open a pool with default settings. Runs migrations.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        Self::connect(database_url, &DatabaseConfig::default()).await
    }

    /// Open a pool with explicit settings.
    ///
    /// Runs migrations automatically on the writer pool before the reader
    /// pool is opened. In-memory URLs are rejected: every connection would
    /// get its own empty database, so the reader would never see the writer.
    pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        if is_in_memory(database_url) {
            return Err(sqlx::Error::Configuration(
                format!("in-memory database URL is not supported: {database_url}").into(),
            ));
        }

        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(write_opts)
            .await?;

        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(config.max_read_connections.max(1))
            .connect_with(read_opts)
            .await?;

        info!(
            max_read_connections = config.max_read_connections,
            busy_timeout_secs = config.busy_timeout_secs,
            "SQLite pools ready"
        );

        Ok(Self { reader, writer })
    }

    /// Close both pools, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.reader.close().await;
        self.writer.close().await;
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
