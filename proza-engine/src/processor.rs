//! Main chunk processor and builder
//!
//! Ties the pipeline together: markup → Dutch prose text → annotated
//! tokens → chunks → frequency rows.

use crate::{
    annotate::{Annotator, Lexicon, RuleBasedAnnotator},
    config::ProzaConfig,
    error::{EngineError, Result},
    input::Input,
    parser::parse_markup,
};
use proza_core::{chunk_rows, AnnotatedDoc, ChunkRow, ClassificationSummary, ProseClassifier};
use std::sync::Arc;
use std::time::Instant;

/// Extracted Dutch prose and how it was selected
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Dutch prose, one stripped string per line
    pub text: String,
    /// Paragraph counts per class
    pub summary: ClassificationSummary,
}

/// Rows with metadata
#[derive(Debug, Clone)]
pub struct Output {
    /// Term-frequency rows, chunk by chunk
    pub rows: Vec<ChunkRow>,
    /// Processing metadata
    pub metadata: ProcessingMetadata,
}

/// Processing metadata
#[derive(Debug, Clone, Default)]
pub struct ProcessingMetadata {
    /// Document id used in the rows
    pub doc_id: String,
    /// Paragraph counts, when the input was markup
    pub classification: Option<ClassificationSummary>,
    /// Tokens produced by annotation
    pub token_count: usize,
    /// Sentences produced by annotation
    pub sentence_count: usize,
    /// Sentences kept after trimming
    pub selected_sentence_count: usize,
    /// Chunks produced
    pub chunk_count: usize,
    /// Wall-clock time in milliseconds
    pub processing_time_ms: f64,
}

/// Main chunk processor
pub struct ChunkProcessor {
    config: ProzaConfig,
    classifier: ProseClassifier,
    annotator: Arc<dyn Annotator>,
}

impl std::fmt::Debug for ChunkProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkProcessor")
            .field("config", &self.config)
            .field("annotator", &self.annotator.name())
            .finish()
    }
}

impl ChunkProcessor {
    /// Processor with default settings and the embedded Dutch annotator
    pub fn new() -> Result<Self> {
        ChunkProcessorBuilder::new().build()
    }

    /// Processor for the given configuration
    pub fn with_config(config: ProzaConfig) -> Result<Self> {
        ChunkProcessorBuilder::new().config(config).build()
    }

    /// Start a builder
    pub fn builder() -> ChunkProcessorBuilder {
        ChunkProcessorBuilder::new()
    }

    /// Active configuration
    pub fn config(&self) -> &ProzaConfig {
        &self.config
    }

    /// Parse markup and keep its Dutch prose
    pub fn extract_text(&self, input: Input) -> Result<Extraction> {
        let markup = input.read_text()?;
        let doc = parse_markup(&markup)?;
        let summary = self.classifier.summary(&doc);
        log::info!(
            "{} of {} paragraphs are Dutch prose",
            summary.dutch_prose,
            summary.paragraphs
        );
        Ok(Extraction {
            text: self.classifier.extract_dutch_prose_text(&doc),
            summary,
        })
    }

    /// Full pipeline for a markup document
    pub fn process_markup(&self, doc_id: &str, input: Input) -> Result<Output> {
        let start = Instant::now();
        let extraction = self.extract_text(input)?;
        let mut output = self.process_text_inner(doc_id, &extraction.text, start)?;
        output.metadata.classification = Some(extraction.summary);
        Ok(output)
    }

    /// Annotate and chunk plain text
    pub fn process_text(&self, doc_id: &str, text: &str) -> Result<Output> {
        self.process_text_inner(doc_id, text, Instant::now())
    }

    fn process_text_inner(&self, doc_id: &str, text: &str, start: Instant) -> Result<Output> {
        log::debug!("annotating {doc_id} with '{}'", self.annotator.name());
        let annotated = self.annotator.annotate(text)?;
        self.chunk(doc_id, &annotated, start)
    }

    /// Chunk an already annotated document
    pub fn process_annotated(&self, doc_id: &str, doc: &AnnotatedDoc) -> Result<Output> {
        self.chunk(doc_id, doc, Instant::now())
    }

    fn chunk(&self, doc_id: &str, doc: &AnnotatedDoc, start: Instant) -> Result<Output> {
        let (rows, stats) = chunk_rows(doc_id, doc, &self.config.chunk_options())?;
        log::info!(
            "{doc_id}: {} tokens, {}/{} sentences kept, {} chunks, {} rows",
            stats.token_count,
            stats.selected_sentence_count,
            stats.sentence_count,
            stats.chunk_count,
            rows.len()
        );

        Ok(Output {
            rows,
            metadata: ProcessingMetadata {
                doc_id: doc_id.to_string(),
                classification: None,
                token_count: stats.token_count,
                sentence_count: stats.sentence_count,
                selected_sentence_count: stats.selected_sentence_count,
                chunk_count: stats.chunk_count,
                processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            },
        })
    }
}

/// Builder for [`ChunkProcessor`]
#[derive(Default)]
pub struct ChunkProcessorBuilder {
    config: ProzaConfig,
    annotator: Option<Arc<dyn Annotator>>,
}

impl ChunkProcessorBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ProzaConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the chunk size
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunking.chunk_size = size;
        self
    }

    /// Set leading/trailing trimming in tokens
    pub fn skip(mut self, skip_first: usize, skip_last: usize) -> Self {
        self.config.chunking.skip_first = skip_first;
        self.config.chunking.skip_last = skip_last;
        self
    }

    /// Set the target language tag
    pub fn target_language(mut self, language: impl Into<String>) -> Self {
        self.config.classifier.target_language = language.into();
        self
    }

    /// Use a custom annotator
    pub fn annotator(mut self, annotator: Arc<dyn Annotator>) -> Self {
        self.annotator = Some(annotator);
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<ChunkProcessor> {
        self.config.validate()?;

        let annotator = match self.annotator {
            Some(annotator) => annotator,
            None => match &self.config.annotation.lexicon {
                Some(path) => {
                    let lexicon = Lexicon::from_file(path)?;
                    if lexicon.code() != self.config.classifier.target_language {
                        log::warn!(
                            "lexicon language '{}' differs from target language '{}'",
                            lexicon.code(),
                            self.config.classifier.target_language
                        );
                    }
                    Arc::new(RuleBasedAnnotator::new(lexicon))
                }
                None => Arc::new(RuleBasedAnnotator::dutch()?),
            },
        };

        Ok(ChunkProcessor {
            classifier: ProseClassifier::new(self.config.classifier.clone()),
            config: self.config,
            annotator,
        })
    }
}

impl TryFrom<ProzaConfig> for ChunkProcessor {
    type Error = EngineError;

    fn try_from(config: ProzaConfig) -> Result<Self> {
        Self::with_config(config)
    }
}
