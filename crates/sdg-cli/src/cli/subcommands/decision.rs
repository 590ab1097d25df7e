use clap::Subcommand;

/// Decision commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DecisionCommands {
    /// Get a decision with its current scenario.
    Get { id: String },
    /// All decisions of a publication, oldest first.
    List { publication_id: String },
    /// Votes attached to a decision.
    Votes { id: String },
    /// Recompute consensus for a decision.
    Recompute { id: String },
}
