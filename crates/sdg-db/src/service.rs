//! Service layer serializing every mutation of consensus state.
//!
//! `LabelService` wraps `LabelDb` together with the consensus thresholds and
//! retry policy from `SdgConfig`. Repository lookups and the engine
//! operations are implemented as `impl LabelService` blocks.

use std::future::Future;
use std::time::Duration;

use libsql::Transaction;
use sdg_config::{ConsensusConfig, SdgConfig};
use sdg_core::consensus::ScenarioThresholds;
use tokio::sync::Mutex;
use tracing::warn;

use crate::LabelDb;
use crate::error::{DatabaseError, LabelError};
use crate::retry::RetryConfig;

/// Orchestrates vote submission, consensus and finalization.
///
/// Every mutating unit of work follows this protocol:
/// 1. Take the service write lock
/// 2. `BEGIN IMMEDIATE`
/// 3. Locate, insert, recompute, finalize, project
/// 4. Commit, or roll back on any error
/// 5. On a conflict with another writer, back off and rerun from step 1
pub struct LabelService {
    db: LabelDb,
    consensus: ConsensusConfig,
    prediction_model: String,
    retry: RetryConfig,
    write_lock: Mutex<()>,
}

impl LabelService {
    /// Open the database at `db_path` (`":memory:"` for tests) and build a
    /// service from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str, config: &SdgConfig) -> Result<Self, DatabaseError> {
        let db = LabelDb::open_local_with_timeout(
            db_path,
            Duration::from_millis(config.database.busy_timeout_ms),
        )
        .await?;
        Ok(Self::from_db(db, config))
    }

    /// Create from an existing `LabelDb`.
    #[must_use]
    pub fn from_db(db: LabelDb, config: &SdgConfig) -> Self {
        Self {
            db,
            consensus: config.consensus.clone(),
            prediction_model: config.prediction.model.clone(),
            retry: RetryConfig::from(&config.database),
            write_lock: Mutex::new(()),
        }
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &LabelDb {
        &self.db
    }

    /// Consensus thresholds in effect.
    #[must_use]
    pub const fn consensus(&self) -> &ConsensusConfig {
        &self.consensus
    }

    /// Upstream model whose predictions seed `suggested_label`.
    #[must_use]
    pub fn prediction_model(&self) -> &str {
        &self.prediction_model
    }

    pub(crate) const fn thresholds(&self) -> ScenarioThresholds {
        self.consensus.scenario_thresholds()
    }

    /// Run `unit` under the write lock, rerunning it while it reports a
    /// `ConcurrentModification`.
    ///
    /// After `max_attempts` conflicts the last one surfaces as
    /// `Persistence(RetriesExhausted)`.
    pub(crate) async fn write<T, F, Fut>(&self, operation: &str, mut unit: F) -> Result<T, LabelError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LabelError>>,
    {
        let mut attempt = 1u32;
        loop {
            let result = {
                let _guard = self.write_lock.lock().await;
                unit().await
            };

            match result {
                Err(LabelError::ConcurrentModification(reason)) => {
                    if attempt >= self.retry.max_attempts {
                        return Err(LabelError::Persistence(DatabaseError::RetriesExhausted {
                            attempts: attempt,
                            last_error: reason,
                        }));
                    }
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        operation,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %reason,
                        "Conflicting writer, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Start the transaction for one unit of work.
    pub(crate) async fn begin(&self) -> Result<Transaction, LabelError> {
        Ok(self.db.begin_write().await?)
    }
}

/// Commit on success, roll back on failure.
///
/// A failed rollback is logged and the original error is returned.
pub(crate) async fn finish<T>(
    tx: Transaction,
    result: Result<T, LabelError>,
) -> Result<T, LabelError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Rollback failed");
            }
            Err(err)
        }
    }
}
