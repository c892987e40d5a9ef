//! Configuration loading for the CLI
//!
//! The configuration file is the engine's [`ProzaConfig`] TOML. Command-line
//! flags override individual values afterwards.

use anyhow::{Context, Result};
use proza_engine::ProzaConfig;
use std::path::Path;

/// Load the configuration file, or defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<ProzaConfig> {
    match path {
        Some(path) => {
            let config = ProzaConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration: {}", path.display()))?;
            log::info!("loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(ProzaConfig::default()),
    }
}

/// Overrides for the chunking table
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkingOverrides {
    /// Replaces `chunking.chunk_size`
    pub chunk_size: Option<usize>,
    /// Replaces `chunking.skip_first`
    pub skip_first: Option<usize>,
    /// Replaces `chunking.skip_last`
    pub skip_last: Option<usize>,
}

impl ChunkingOverrides {
    /// Apply the overrides and re-validate
    pub fn apply(&self, mut config: ProzaConfig) -> Result<ProzaConfig> {
        if let Some(size) = self.chunk_size {
            config.chunking.chunk_size = size;
        }
        if let Some(skip) = self.skip_first {
            config.chunking.skip_first = skip;
        }
        if let Some(skip) = self.skip_last {
            config.chunking.skip_last = skip;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Commented default configuration
pub fn config_template() -> Result<String> {
    let body = ProzaConfig::default().to_toml_string()?;
    Ok(format!(
        "# proza configuration\n\
         #\n\
         # [classifier]  which divisions and paragraphs count as Dutch prose\n\
         # [chunking]    chunk size and trimming, measured in tokens\n\
         # [annotation]  lexicon = \"path.toml\" replaces the built-in Dutch lexicon\n\
         \n{body}"
    ))
}
