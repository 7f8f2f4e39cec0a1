//! # Triplex
//!
//! The binary's library half: CLI definitions, configuration and the file
//! boundary in front of `triplex-core`.

pub mod cli;
pub mod config;
pub mod source;

pub use config::Config;
