//! CoNLL-U reader
//!
//! Reads the output of an external tagger/lemmatizer in the ten-column
//! CoNLL-U format. Only ID, FORM, LEMMA and UPOS are used; sentence
//! boundaries come from blank lines.

use crate::error::{EngineError, Result};
use proza_core::{AnnotatedDoc, Token};

/// Parse CoNLL-U text into an annotated document
///
/// Comment lines are skipped, as are multiword ranges (`3-4`) and empty
/// nodes (`5.1`), so surface tokens are never counted twice. A `_` lemma
/// falls back to the lowercased form.
pub fn parse_conllu(text: &str) -> Result<AnnotatedDoc> {
    let mut builder = AnnotatedDoc::builder();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() {
            builder.end_sentence();
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() < 4 {
            return Err(EngineError::Annotation {
                line: line_no,
                reason: format!(
                    "expected at least 4 tab-separated columns, found {}",
                    columns.len()
                ),
            });
        }

        let id = columns[0];
        if id.contains('-') || id.contains('.') {
            continue;
        }
        if id.parse::<usize>().is_err() {
            return Err(EngineError::Annotation {
                line: line_no,
                reason: format!("invalid token id '{id}'"),
            });
        }

        let form = columns[1];
        let lemma = match columns[2] {
            "_" if form != "_" => form.to_lowercase(),
            lemma => lemma.to_string(),
        };
        builder.push(Token::new(form, lemma, columns[3]));
    }

    let doc = builder.build();
    log::debug!(
        "read {} tokens in {} sentences from CoNLL-U",
        doc.len(),
        doc.sentence_count()
    );
    Ok(doc)
}
