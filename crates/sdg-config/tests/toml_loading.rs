//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed env var manipulation.

use std::io::Write;

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use sdg_config::{ConfigError, SdgConfig};

#[test]
fn loads_consensus_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[consensus]
votes_needed_for_consensus = 3
votes_needed_for_scenario = 4
significant_threshold = 0.25
"#,
        )?;

        let config: SdgConfig = Figment::from(Serialized::defaults(SdgConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.consensus.votes_needed_for_consensus, 3);
        assert_eq!(config.consensus.votes_needed_for_scenario, 4);
        assert!((config.consensus.significant_threshold - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.database.retry_attempts, 3);
        Ok(())
    });
}

#[test]
fn loads_database_and_prediction_sections() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/sdg/labels.db"
busy_timeout_ms = 250
retry_attempts = 5

[prediction]
model = "bert"
"#,
        )?;

        let config: SdgConfig = Figment::from(Serialized::defaults(SdgConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/sdg/labels.db");
        assert_eq!(config.database.busy_timeout_ms, 250);
        assert_eq!(config.database.retry_attempts, 5);
        assert_eq!(config.database.retry_base_delay_ms, 50);
        assert_eq!(config.prediction.model, "bert");
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[prediction]\nmodel = \"bert\"\n")?;

        let config: SdgConfig = Figment::from(Serialized::defaults(SdgConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.consensus, SdgConfig::default().consensus);
        assert_eq!(config.database, SdgConfig::default().database);
        Ok(())
    });
}

#[test]
fn load_from_validates_values() {
    Jail::expect_with(|_jail| {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).expect("create config");
        writeln!(file, "[consensus]\nsignificant_threshold = 1.5").expect("write config");

        let err = SdgConfig::load_from(&path).expect_err("threshold 1.5 must be rejected");
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. }
            if field == "consensus.significant_threshold"));
        Ok(())
    });
}

#[test]
fn load_from_reads_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "project.toml",
            "[consensus]\nvotes_needed_for_consensus = 7\n",
        )?;

        let config = SdgConfig::load_from(std::path::Path::new("project.toml"))
            .expect("config loads");
        assert_eq!(config.consensus.votes_needed_for_consensus, 7);
        Ok(())
    });
}
