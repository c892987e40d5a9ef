//! Closed-class lexicon for the rule-based annotator
//!
//! Lexicons are TOML files (see `configs/languages/dutch.toml`). The Dutch
//! lexicon is embedded in the binary; others can be loaded from disk.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

static DUTCH: OnceLock<std::result::Result<Lexicon, String>> = OnceLock::new();

const DUTCH_TOML: &str = include_str!("../../configs/languages/dutch.toml");

/// On-disk lexicon layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Language metadata
    pub metadata: LexiconMetadata,
    /// Words that keep their trailing period
    #[serde(default)]
    pub abbreviations: AbbreviationConfig,
    /// Tag → words carrying that tag
    #[serde(default)]
    pub pos: BTreeMap<String, Vec<String>>,
    /// Inflected form → lemma
    #[serde(default)]
    pub lemmas: BTreeMap<String, String>,
}

/// Lexicon metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconMetadata {
    /// Language code, matched against the classifier's target language
    pub code: String,
    /// Display name
    pub name: String,
}

/// Abbreviation list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbbreviationConfig {
    /// Abbreviations without trailing period
    pub words: Vec<String>,
}

/// Lookup tables built from a [`LexiconConfig`]
#[derive(Debug, Clone)]
pub struct Lexicon {
    code: String,
    name: String,
    abbreviations: HashSet<String>,
    tags: HashMap<String, String>,
    lemmas: HashMap<String, String>,
}

impl Lexicon {
    /// The embedded Dutch lexicon
    pub fn dutch() -> Result<&'static Lexicon> {
        DUTCH
            .get_or_init(|| Self::from_toml_str(DUTCH_TOML).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|e| EngineError::Lexicon(e.clone()))
    }

    /// Parse a lexicon from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LexiconConfig =
            toml::from_str(content).map_err(|e| EngineError::Lexicon(e.to_string()))?;
        Self::from_config(config)
    }

    /// Load a lexicon file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Io(format!("Failed to read lexicon {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Build lookup tables, rejecting words listed under two tags
    pub fn from_config(config: LexiconConfig) -> Result<Self> {
        if config.metadata.code.is_empty() {
            return Err(EngineError::Lexicon("metadata.code is empty".to_string()));
        }

        let mut tags = HashMap::new();
        for (tag, words) in &config.pos {
            for word in words {
                let word = word.to_lowercase();
                if let Some(previous) = tags.insert(word.clone(), tag.clone()) {
                    return Err(EngineError::Lexicon(format!(
                        "'{word}' listed under both {previous} and {tag}"
                    )));
                }
            }
        }

        Ok(Self {
            code: config.metadata.code,
            name: config.metadata.name,
            abbreviations: config
                .abbreviations
                .words
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            tags,
            lemmas: config
                .lemmas
                .into_iter()
                .map(|(form, lemma)| (form.to_lowercase(), lemma))
                .collect(),
        })
    }

    /// Language code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag of a lowercase word form
    pub fn tag(&self, lower: &str) -> Option<&str> {
        self.tags.get(lower).map(String::as_str)
    }

    /// Lemma of a lowercase word form, if irregular
    pub fn lemma(&self, lower: &str) -> Option<&str> {
        self.lemmas.get(lower).map(String::as_str)
    }

    /// Whether a lowercase word is a known abbreviation
    pub fn is_abbreviation(&self, lower: &str) -> bool {
        self.abbreviations.contains(lower)
    }
}
