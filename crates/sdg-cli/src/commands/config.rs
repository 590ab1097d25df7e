use sdg_config::SdgConfig;

use crate::cli::{GlobalFlags, OutputFormat};

/// Handle `sdg config`: print the effective configuration as TOML, or as
/// JSON with `--format raw`.
pub fn handle(config: &SdgConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match flags.format {
        OutputFormat::Json => {
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        OutputFormat::Raw => crate::output::output(config, flags.format),
    }
}
