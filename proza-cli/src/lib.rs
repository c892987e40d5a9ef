//! Proza CLI library
//!
//! This library provides the command-line interface for extracting Dutch
//! prose from TEI/HTML documents and turning it into chunked term-frequency
//! rows.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use commands::Cli;
pub use error::{CliError, CliResult};
