//! libSQL database and write-retry configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_path() -> String {
    ".sdg/labels.db".to_string()
}

const fn default_busy_timeout_ms() -> u64 {
    5_000
}

const fn default_retry_attempts() -> u32 {
    3
}

const fn default_retry_base_delay_ms() -> u64 {
    50
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the local database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,

    /// How long a writer waits on another process's lock before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Attempts (including the first) for a unit of work that hits a
    /// concurrent modification.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Delay before the first retry; doubles on each further attempt.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            retry_attempts: default_retry_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty path or zero retry attempts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::invalid("database.path", "must not be empty"));
        }
        if self.retry_attempts == 0 {
            return Err(ConfigError::invalid(
                "database.retry_attempts",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, ".sdg/labels.db");
        assert_eq!(config.busy_timeout_ms, 5_000);
        assert_eq!(config.retry_attempts, 3);
        assert!(!config.is_in_memory());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_attempts_rejected() {
        let config = DatabaseConfig {
            retry_attempts: 0,
            ..DatabaseConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
