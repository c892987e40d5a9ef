//! Configuration types for the engine
//!
//! A configuration file is TOML with three optional tables:
//!
//! ```toml
//! [classifier]
//! target_language = "nl"
//! language_attributes = ["lang", "xml:lang"]
//!
//! [chunking]
//! chunk_size = 5000
//! skip_first = 1000
//! skip_last = 1000
//!
//! [annotation]
//! lexicon = "my-lexicon.toml"
//! ```

use crate::error::{EngineError, Result};
use proza_core::{ChunkOptions, ClassifierConfig, DEFAULT_CHUNK_SIZE, POS_PUNCT, POS_SPACE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Chunking settings as written in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Tokens after which a chunk is closed at the next sentence end
    pub chunk_size: usize,
    /// Leading tokens to skip, in whole sentences
    pub skip_first: usize,
    /// Trailing tokens to skip, in whole sentences
    pub skip_last: usize,
    /// Tags never counted
    pub excluded_pos: Vec<String>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            skip_first: 0,
            skip_last: 0,
            excluded_pos: vec![POS_SPACE.to_string(), POS_PUNCT.to_string()],
        }
    }
}

impl From<&ChunkingConfig> for ChunkOptions {
    fn from(config: &ChunkingConfig) -> Self {
        ChunkOptions {
            chunk_size: config.chunk_size,
            skip_first: config.skip_first,
            skip_last: config.skip_last,
            excluded_pos: config.excluded_pos.clone(),
        }
    }
}

/// Annotation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// External lexicon replacing the embedded Dutch one
    pub lexicon: Option<PathBuf>,
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProzaConfig {
    /// Prose/language classification
    pub classifier: ClassifierConfig,
    /// Chunking and trimming
    pub chunking: ChunkingConfig,
    /// Rule-based annotator
    pub annotation: AnnotationConfig,
}

impl ProzaConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ProzaConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Io(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            EngineError::Config(msg) => EngineError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Reject settings the pipeline cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(EngineError::Config(
                "chunking.chunk_size must be greater than zero".to_string(),
            ));
        }
        let classifier = &self.classifier;
        if classifier.target_language.is_empty() {
            return Err(EngineError::Config(
                "classifier.target_language must not be empty".to_string(),
            ));
        }
        if classifier.division_element.is_empty() || classifier.paragraph_element.is_empty() {
            return Err(EngineError::Config(
                "classifier element names must not be empty".to_string(),
            ));
        }
        if classifier.language_attributes.is_empty() {
            return Err(EngineError::Config(
                "classifier.language_attributes needs at least one key".to_string(),
            ));
        }
        Ok(())
    }

    /// Chunking settings in core form
    pub fn chunk_options(&self) -> ChunkOptions {
        ChunkOptions::from(&self.chunking)
    }
}
