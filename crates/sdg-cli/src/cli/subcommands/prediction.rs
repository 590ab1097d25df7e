use clap::Subcommand;
use sdg_core::label::SdgLabel;

use super::parse_label;

/// Upstream prediction commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PredictionCommands {
    /// Record a model score for one SDG.
    Record {
        publication_id: String,
        #[arg(long, value_parser = parse_label)]
        sdg: SdgLabel,
        #[arg(long)]
        score: f64,
        /// Defaults to `prediction.model`
        #[arg(long)]
        model: Option<String>,
    },
    /// List predictions for a publication.
    List { publication_id: String },
    /// Highest-confidence SDG of a model.
    Top {
        publication_id: String,
        #[arg(long)]
        model: Option<String>,
    },
}
