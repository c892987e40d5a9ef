//! Application orchestration for Dutch prose chunking
//!
//! This crate supplies what `proza-core` deliberately leaves out: reading
//! (possibly gzip-compressed) inputs, parsing TEI/HTML markup, annotating
//! text, configuration files, and a processor running the whole pipeline.

#![warn(missing_docs)]

pub mod annotate;
pub mod config;
pub mod error;
pub mod input;
pub mod parser;
pub mod processor;

// Re-export key types
pub use annotate::{parse_conllu, Annotator, Lexicon, RuleBasedAnnotator};
pub use config::{AnnotationConfig, ChunkingConfig, ProzaConfig};
pub use error::{EngineError, Result};
pub use input::{document_id_from_path, Input};
pub use parser::parse_markup;
pub use processor::{
    ChunkProcessor, ChunkProcessorBuilder, Extraction, Output, ProcessingMetadata,
};

// Re-export from core for convenience
pub use proza_core::{
    AnnotatedDoc, ChunkOptions, ChunkRow, ClassificationSummary, ClassifierConfig, Token,
};
