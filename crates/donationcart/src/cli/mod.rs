//! Command-line interface for donationcart.
//!
//! This module provides the CLI structure for the `dcart` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{CheckoutCommand, ConfigCommand, TotalsCommand};

/// dcart - Review and complete a donation cart
///
/// Reads a donor session file, shows the subtotal, processing fee and total,
/// and completes checkout with a display-only confirmation.
#[derive(Debug, Parser)]
#[command(name = "dcart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for every cart change)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show subtotal, processing fee and total for a session
    Totals(TotalsCommand),

    /// Complete checkout for a session
    Checkout(CheckoutCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn totals_cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Totals(TotalsCommand {
                session: PathBuf::from("cart.json"),
                json: false,
            }),
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "dcart");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(totals_cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(totals_cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(totals_cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(totals_cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_totals() {
        let cli = Cli::try_parse_from(["dcart", "totals", "cart.json", "--json"]).unwrap();
        match cli.command {
            Command::Totals(cmd) => {
                assert_eq!(cmd.session, PathBuf::from("cart.json"));
                assert!(cmd.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_checkout() {
        let cli = Cli::try_parse_from([
            "dcart",
            "checkout",
            "cart.json",
            "--name",
            "Amina",
            "--email",
            "amina@example.org",
            "--honoree",
            "Jane Doe",
        ])
        .unwrap();
        match cli.command {
            Command::Checkout(cmd) => {
                assert_eq!(cmd.name, "Amina");
                assert_eq!(cmd.honoree.as_deref(), Some("Jane Doe"));
                assert!(cmd.employer.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_checkout_requires_donor() {
        assert!(Cli::try_parse_from(["dcart", "checkout", "cart.json"]).is_err());
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["dcart", "-c", "/custom/config.toml", "config", "path"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));
    }

    #[test]
    fn test_parse_with_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["dcart", "-vv", "totals", "cart.json"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["dcart", "-q", "totals", "cart.json"]).unwrap();
        assert!(cli.quiet);
    }
}
