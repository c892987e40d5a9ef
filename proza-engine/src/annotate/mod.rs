//! Linguistic annotation
//!
//! The [`Annotator`] trait is the seam where a tagging engine plugs in.
//! Two sources ship with the engine: [`conllu::parse_conllu`] for output
//! of an external tagger, and [`RuleBasedAnnotator`] for plain text.

pub mod conllu;
pub mod lexicon;
pub mod rules;

use crate::error::Result;
use proza_core::AnnotatedDoc;

pub use conllu::parse_conllu;
pub use lexicon::{Lexicon, LexiconConfig};
pub use rules::RuleBasedAnnotator;

/// Turns raw text into lemmatised, tagged, sentence-split tokens
pub trait Annotator: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Annotate `text`
    fn annotate(&self, text: &str) -> Result<AnnotatedDoc>;
}
