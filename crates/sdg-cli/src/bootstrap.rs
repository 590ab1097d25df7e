use anyhow::Context;
use sdg_config::SdgConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration, then apply CLI overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SdgConfig> {
    load_dotenv()?;

    let mut config = match &flags.config {
        Some(path) => {
            anyhow::ensure!(path.exists(), "config file {} does not exist", path.display());
            SdgConfig::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?
        }
        None => SdgConfig::load().context("failed to load configuration")?,
    };

    if let Some(db) = &flags.db {
        config.database.path.clone_from(db);
    }
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}
