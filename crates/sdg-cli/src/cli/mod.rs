use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `sdg` binary.
#[derive(Debug, Parser)]
#[command(name = "sdg", version, about = "SDG label consensus engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project config file (defaults to .sdg/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database path, overriding `database.path`
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{DecisionCommands, PublicationCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["sdg", "--format", "raw", "--verbose", "config"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["sdg", "stats", "dec-1", "--db", ":memory:", "--quiet"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.global_flags().db.as_deref(), Some(":memory:"));
        assert!(matches!(cli.command, Commands::Stats { ref decision_id } if decision_id == "dec-1"));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["sdg", "--format", "xml", "config"]).is_err());
    }

    #[test]
    fn vote_parses_labels_in_every_spelling() {
        for spelling in ["7", "sdg7", "SDG7"] {
            let cli = Cli::try_parse_from([
                "sdg", "vote", "pub-1", "--user", "ann", "--label", spelling,
            ])
            .expect("cli should parse");
            let Commands::Vote(args) = cli.command else {
                panic!("expected vote");
            };
            assert_eq!(args.label.value(), 7);
        }

        let cli = Cli::try_parse_from(["sdg", "vote", "pub-1", "--user", "ann", "--label", "none"])
            .expect("cli should parse");
        let Commands::Vote(args) = cli.command else {
            panic!("expected vote");
        };
        assert!(args.label.is_not_relevant());
    }

    #[test]
    fn vote_rejects_out_of_range_label() {
        for bad in ["0", "19", "sdg", "seven"] {
            let parsed =
                Cli::try_parse_from(["sdg", "vote", "pub-1", "--user", "ann", "--label", bad]);
            assert!(parsed.is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn nested_subcommands_parse() {
        let cli = Cli::try_parse_from(["sdg", "publication", "register", "--title", "Rivers"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Publication {
                action: PublicationCommands::Register { ref title, id: None }
            } if title == "Rivers"
        ));

        let cli = Cli::try_parse_from(["sdg", "decision", "list", "pub-1"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Decision {
                action: DecisionCommands::List { .. }
            }
        ));

        let cli =
            Cli::try_parse_from(["sdg", "publication", "deactivate", "pub-1"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Publication {
                action: PublicationCommands::Deactivate { ref id }
            } if id == "pub-1"
        ));
        assert!(Cli::try_parse_from(["sdg", "publication", "close", "pub-1"]).is_err());
    }
}
