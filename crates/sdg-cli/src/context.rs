use std::path::Path;

use anyhow::Context;
use sdg_config::SdgConfig;
use sdg_db::service::LabelService;

/// Everything a command handler needs.
pub struct AppContext {
    pub config: SdgConfig,
    pub service: LabelService,
}

impl AppContext {
    pub async fn init(config: SdgConfig) -> anyhow::Result<Self> {
        if !config.database.is_in_memory()
            && let Some(parent) = Path::new(&config.database.path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let service = LabelService::new_local(&config.database.path, &config).await?;
        tracing::debug!(path = %config.database.path, "Label database opened");
        Ok(Self { config, service })
    }
}
