//! # sdg-db
//!
//! libSQL persistence and orchestration for the label consensus engine.
//!
//! Stores publications, upstream predictions, votes, decisions, histories and
//! per-SDG summaries, and hosts [`service::LabelService`], which runs every
//! vote submission and manual confirmation as one serialized transaction.
//!
//! Uses the `libsql` crate in local mode.

pub mod engine;
pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod retry;
pub mod service;

#[cfg(test)]
mod test_support;

use std::time::Duration;

use error::DatabaseError;
use libsql::{Builder, Transaction, TransactionBehavior};
use sdg_core::ids::format_id;

/// Database handle for all consensus state.
pub struct LabelDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl LabelDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open_local_with_timeout(path, Duration::from_secs(5)).await
    }

    /// Open a local database, waiting up to `busy_timeout` on other writers.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local_with_timeout(
        path: &str,
        busy_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        // busy_timeout echoes the new value back as a row
        let millis = u64::try_from(busy_timeout.as_millis()).unwrap_or(u64::MAX);
        let mut rows = conn
            .query(&format!("PRAGMA busy_timeout = {millis}"), ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA busy_timeout: {e}")))?;
        while rows.next().await?.is_some() {}

        let label_db = Self { db, conn };
        label_db.run_migrations().await?;
        Ok(label_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Begin a write transaction that takes the database write lock up front.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the lock cannot be acquired within the busy
    /// timeout.
    pub async fn begin_write(&self) -> Result<Transaction, DatabaseError> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?)
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"dec-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        generate_id(&self.conn, prefix).await
    }
}

/// Generate a prefixed ID on any connection, including an open transaction.
///
/// Uses `randomblob(4)` in SQL to produce 8 hex chars.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails or returns no rows.
pub async fn generate_id(
    conn: &libsql::Connection,
    prefix: &str,
) -> Result<String, DatabaseError> {
    let mut rows = conn.query("SELECT lower(hex(randomblob(4)))", ()).await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(format_id(prefix, &row.get::<String>(0)?))
}
