//! # Triplex CLI Module
//!
//! ## Available Commands
//!
//! - `run` - Import a statement file, then answer a query file
//! - `query` - Import statement files and answer one pattern
//! - `stats` - Import statement files and show store metrics

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use triplex_core::{KgError, MalformedPolicy};

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Triplex - in-memory subject-predicate-object fact store
///
/// Statements are case-insensitive `subject predicate object.` lines;
/// patterns use `?` as a wildcard in any position.
#[derive(Parser, Debug)]
#[command(name = "triplex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a triplex.toml configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Malformed line policy: "abort" or "skip" (overrides the config file)
    #[arg(long, global = true)]
    pub on_malformed: Option<MalformedPolicy>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a statement file, then answer every pattern in a query file
    Run {
        /// Statement file, one `subject predicate object.` per line
        triples: PathBuf,

        /// Query file, one pattern per line
        queries: PathBuf,
    },

    /// Answer a single pattern
    Query {
        /// Statement files to import first
        #[arg(short, long = "triples", required = true)]
        triples: Vec<PathBuf>,

        /// Pattern such as "bob is_in ?"
        pattern: String,
    },

    /// Show store metrics
    Stats {
        /// Statement files to import first
        #[arg(short, long = "triples", required = true)]
        triples: Vec<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), KgError> {
    let config = Config::resolve(cli.config.as_deref())?.with_policy(cli.on_malformed);
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Run { triples, queries } => cmd_run(&config, &triples, &queries),
        Commands::Query { triples, pattern } => cmd_query(&config, json_mode, &triples, &pattern),
        Commands::Stats { triples } => cmd_stats(&config, json_mode, &triples),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_with_global_flags() {
        let cli = Cli::try_parse_from([
            "triplex",
            "run",
            "facts.nt",
            "queries.txt",
            "--on-malformed",
            "skip",
            "-v",
        ])
        .expect("parse");

        assert!(cli.verbose);
        assert_eq!(cli.on_malformed, Some(MalformedPolicy::Skip));
        assert!(matches!(cli.command, Commands::Run { .. }));
    }

    #[test]
    fn query_accepts_repeated_triples() {
        let cli = Cli::try_parse_from([
            "triplex", "query", "-t", "a.nt", "-t", "b.nt", "bob is_in ?",
        ])
        .expect("parse");

        assert!(matches!(
            cli.command,
            Commands::Query { ref triples, ref pattern }
                if triples.len() == 2 && pattern == "bob is_in ?"
        ));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let result = Cli::try_parse_from([
            "triplex",
            "stats",
            "-t",
            "a.nt",
            "--on-malformed",
            "retry",
        ]);
        assert!(result.is_err());
    }
}
