//! # Configuration
//!
//! Optional `triplex.toml`:
//!
//! ```toml
//! [import]
//! on_malformed = "abort"      # or "skip"
//! max_file_size = 104857600
//!
//! [query]
//! echo = true
//! null_marker = "<null>"
//! ```
//!
//! Resolution order: built-in defaults, then the file named by `--config` or
//! `TRIPLEX_CONFIG`, then CLI flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use triplex_core::primitives::NULL_MARKER;
use triplex_core::{KgError, MalformedPolicy, QueryRunner};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "TRIPLEX_CONFIG";

/// Maximum input file size (100 MB).
///
/// This prevents memory exhaustion from accidental large files.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Statement file settings.
    pub import: ImportConfig,
    /// Query file settings.
    pub query: QueryConfig,
}

/// `[import]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// What to do with malformed lines.
    pub on_malformed: MalformedPolicy,
    /// Files larger than this are rejected before reading.
    pub max_file_size: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            on_malformed: MalformedPolicy::Abort,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// `[query]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Print each pattern before its results.
    pub echo: bool,
    /// Printed when a pattern was never indexed.
    pub null_marker: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            echo: true,
            null_marker: NULL_MARKER.to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, KgError> {
        toml::from_str(text).map_err(|e| KgError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, KgError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            KgError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Load from `explicit`, else from `TRIPLEX_CONFIG`, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, KgError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {:?}", path);
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply a CLI override of the malformed-line policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Option<MalformedPolicy>) -> Self {
        if let Some(policy) = policy {
            self.import.on_malformed = policy;
        }
        self
    }

    /// A query runner configured from the `[query]` section.
    #[must_use]
    pub fn query_runner(&self) -> QueryRunner {
        QueryRunner::new(self.import.on_malformed)
            .with_echo(self.query.echo)
            .with_null_marker(self.query.null_marker.clone())
    }
}
