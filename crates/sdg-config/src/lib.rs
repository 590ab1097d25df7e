//! # sdg-config
//!
//! Layered configuration loading for the consensus engine using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SDG_*` prefix, `__` as separator)
//! 2. Project-level `.sdg/config.toml`
//! 3. User-level `~/.config/sdg/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SDG_CONSENSUS__VOTES_NEEDED_FOR_CONSENSUS` ->
//! `consensus.votes_needed_for_consensus`, `SDG_DATABASE__PATH` ->
//! `database.path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use sdg_config::SdgConfig;
//!
//! let config = SdgConfig::load_with_dotenv().expect("config");
//! println!("votes needed: {}", config.consensus.votes_needed_for_consensus);
//! ```

mod consensus;
mod database;
mod error;
mod prediction;

pub use consensus::ConsensusConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use prediction::PredictionConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SdgConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub consensus: ConsensusConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
}

impl SdgConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Load configuration with an explicit project config file layered on top
    /// of the user-global one (env vars still win).
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_from(project_config: &std::path::Path) -> Result<Self, ConfigError> {
        let config: Self = Self::base_figment()
            .merge(Toml::file(project_config))
            .merge(Env::prefixed("SDG_").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Self::base_figment();

        let local_path = PathBuf::from(".sdg/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SDG_").split("__"))
    }

    /// Check cross-field constraints after extraction.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.consensus.validate()?;
        if self.prediction.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "prediction.model".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Defaults plus the user-global config file, if present.
    fn base_figment() -> Figment {
        let figment = Figment::from(Serialized::defaults(Self::default()));
        match Self::global_config_path() {
            Some(global_path) if global_path.exists() => figment.merge(Toml::file(global_path)),
            _ => figment,
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sdg").join("config.toml"))
    }

    /// Load `.env` from the workspace root, or the current directory.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SdgConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.prediction.model, "aurora");
    }

    #[test]
    fn empty_model_rejected() {
        let mut config = SdgConfig::default();
        config.prediction.model = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "prediction.model"
        ));
    }
}
