//! Retry of units of work that collide with a concurrent writer.
//!
//! A conflict is either SQLite reporting the database as busy/locked after
//! `busy_timeout` expired, or the one-open-decision index rejecting a second
//! open decision created by another process. Both are safe to retry because
//! the whole unit of work is rolled back and consensus recomputation is
//! idempotent.

use std::time::Duration;

use sdg_config::DatabaseConfig;

use crate::error::DatabaseError;

/// Configuration for retry behavior on conflicting writes.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl From<&DatabaseConfig> for RetryConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_attempts: config.retry_attempts.max(1),
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            ..Self::default()
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt` (1-based): exponential, capped.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Detect errors caused by a concurrent writer rather than by the statement.
///
/// The predicate is intentionally narrow so genuine SQL or constraint errors
/// are never retried.
pub fn is_conflict(err: &DatabaseError) -> bool {
    let msg = err.to_string();
    msg.contains("database is locked")
        || msg.contains("database table is locked")
        || msg.contains("SQLITE_BUSY")
        || msg.contains("UNIQUE constraint failed: decisions.history_id")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        let config = RetryConfig {
            max_attempts: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(500),
        };
        assert_eq!(config.delay_for(1), Duration::from_millis(100));
        assert_eq!(config.delay_for(2), Duration::from_millis(200));
        assert_eq!(config.delay_for(3), Duration::from_millis(400));
        assert_eq!(config.delay_for(4), Duration::from_millis(500));
        assert_eq!(config.delay_for(40), Duration::from_millis(500));
    }

    #[test]
    fn built_from_database_config() {
        let db = DatabaseConfig {
            retry_attempts: 5,
            retry_base_delay_ms: 10,
            ..DatabaseConfig::default()
        };
        let retry = RetryConfig::from(&db);
        assert_eq!(retry.max_attempts, 5);
        assert_eq!(retry.base_delay, Duration::from_millis(10));
    }

    #[test]
    fn conflict_predicate_is_narrow() {
        assert!(is_conflict(&DatabaseError::Query("database is locked".into())));
        assert!(is_conflict(&DatabaseError::Query(
            "UNIQUE constraint failed: decisions.history_id".into()
        )));
        assert!(!is_conflict(&DatabaseError::Query(
            "UNIQUE constraint failed: publications.id".into()
        )));
        assert!(!is_conflict(&DatabaseError::NoResult));
    }
}
