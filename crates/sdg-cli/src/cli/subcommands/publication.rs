use clap::Subcommand;

/// Publication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PublicationCommands {
    /// Register a publication with an active history and empty summary.
    Register {
        #[arg(long)]
        title: String,
        /// Use this id instead of a generated one
        #[arg(long)]
        id: Option<String>,
    },
    /// Get a publication.
    Get { id: String },
    /// Per-SDG summary of a publication.
    Summary { id: String },
    /// Mark the history inactive so the next vote opens a new decision.
    Deactivate { id: String },
    /// Mark the history active.
    Activate { id: String },
}
