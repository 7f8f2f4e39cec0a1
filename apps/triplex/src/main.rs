//! # Triplex
//!
//! Command-line front end for the triplex fact store.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │             apps/triplex (THE BINARY)         │
//! │                                               │
//! │  ┌─────────────┐   ┌──────────┐   ┌────────┐  │
//! │  │    CLI      │   │  config  │   │ source │  │
//! │  │   (clap)    │   │  (toml)  │   │ (files)│  │
//! │  └──────┬──────┘   └────┬─────┘   └───┬────┘  │
//! │         └───────────────┼─────────────┘       │
//! │                         ▼                     │
//! │                 ┌───────────────┐             │
//! │                 │ triplex-core  │             │
//! │                 │  (THE STORE)  │             │
//! │                 └───────────────┘             │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! triplex run facts.nt queries.txt
//! triplex query -t facts.nt "bob is_in ?"
//! triplex stats -t facts.nt --json-mode
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triplex::cli;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // TRIPLEX_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("TRIPLEX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_level = if cli.verbose {
        "triplex=debug"
    } else if cli.quiet {
        "triplex=warn"
    } else {
        "triplex=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_level.into());

    // stdout carries query answers, so logs go to stderr.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
