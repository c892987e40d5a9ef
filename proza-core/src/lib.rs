//! Dutch prose classification and sentence-aware chunking
//!
//! This crate holds the decision logic of the proza pipeline and nothing
//! else: it never touches files, parses markup or runs a tagger.
//!
//! - [`markup`]: a navigable element/text tree filled in by a parser
//! - [`classify`]: which paragraphs count as Dutch prose
//! - [`token`]: the annotated token stream produced by a tagger
//! - [`chunk`]: sentence trimming, chunking and term-frequency rows
//!
//! # Example
//!
//! ```rust
//! use proza_core::{chunk_doc, make_chunk_rows, AnnotatedDoc, ChunkOptions, Token};
//!
//! let doc = AnnotatedDoc::from_sentences(vec![vec![
//!     Token::new("Het", "het", "DET"),
//!     Token::new("huis", "huis", "NOUN"),
//!     Token::new(".", ".", "PUNCT"),
//! ]]);
//!
//! let chunks = chunk_doc(&doc, &ChunkOptions::default()).unwrap();
//! let rows = make_chunk_rows("ti001", &chunks).unwrap();
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].chunk_id, "ti001-chunk-001");
//! ```

#![warn(missing_docs)]

pub mod chunk;
pub mod classify;
pub mod error;
pub mod markup;
pub mod token;

pub use chunk::{
    chunk_doc, chunk_id, chunk_rows, make_chunk_rows, select_sentences, Chunk, ChunkOptions,
    ChunkRow, ChunkStats, DEFAULT_CHUNK_SIZE,
};
pub use classify::{
    extract_dutch_prose_text, ClassificationSummary, ClassifierConfig, ProseClassifier,
};
pub use error::{CoreError, Result};
pub use markup::{Document, NodeId, NodeKind};
pub use token::{AnnotatedDoc, AnnotatedDocBuilder, Token, POS_PUNCT, POS_SPACE};
