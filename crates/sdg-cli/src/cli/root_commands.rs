use clap::{Args, Subcommand};
use sdg_core::label::SdgLabel;

use crate::cli::subcommands::{
    DecisionCommands, PredictionCommands, PublicationCommands, parse_label,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Publications: registration, summary, voting switch.
    Publication {
        #[command(subcommand)]
        action: PublicationCommands,
    },
    /// Upstream model predictions.
    Prediction {
        #[command(subcommand)]
        action: PredictionCommands,
    },
    /// Cast a vote on a publication or decision.
    Vote(VoteArgs),
    /// Confirm the majority of a decision as an expert.
    Confirm(ConfirmArgs),
    /// Vote statistics of a decision.
    Stats { decision_id: String },
    /// Decisions.
    Decision {
        #[command(subcommand)]
        action: DecisionCommands,
    },
    /// Print the effective configuration.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct VoteArgs {
    /// Publication id, or a `dec-` decision id
    pub target: String,
    /// Voting user
    #[arg(long)]
    pub user: String,
    /// SDG 1-17, or 18 / `none` for no SDG
    #[arg(long, value_parser = parse_label)]
    pub label: SdgLabel,
    /// Alternative label the voter proposes
    #[arg(long, value_parser = parse_label)]
    pub proposed: Option<SdgLabel>,
    #[arg(long)]
    pub comment: Option<String>,
    /// Treat TARGET as a decision id regardless of its prefix
    #[arg(long)]
    pub decision: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ConfirmArgs {
    pub decision_id: String,
    /// Expert confirming the majority
    #[arg(long)]
    pub user: String,
    #[arg(long, value_parser = parse_label)]
    pub label: SdgLabel,
    #[arg(long)]
    pub comment: Option<String>,
}
