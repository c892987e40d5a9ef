//! Sentence selection, chunking and per-chunk term frequencies

use crate::error::{CoreError, Result};
use crate::token::{AnnotatedDoc, Token, POS_PUNCT, POS_SPACE};
use std::collections::HashMap;

/// Default number of content tokens per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 5000;

/// Chunking parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkOptions {
    /// A chunk is closed once it holds more than this many tokens
    pub chunk_size: usize,
    /// Skip whole sentences until this many tokens have been passed
    pub skip_first: usize,
    /// Skip whole sentences once fewer than this many tokens remain
    pub skip_last: usize,
    /// Tags whose tokens never enter a chunk
    pub excluded_pos: Vec<String>,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            skip_first: 0,
            skip_last: 0,
            excluded_pos: vec![POS_SPACE.to_string(), POS_PUNCT.to_string()],
        }
    }
}

impl ChunkOptions {
    /// Options with the given chunk size and default trimming
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            ..Self::default()
        }
    }

    /// Reject settings that cannot produce chunks
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(CoreError::InvalidChunkSize);
        }
        Ok(())
    }

    fn is_excluded(&self, token: &Token) -> bool {
        self.excluded_pos.iter().any(|pos| *pos == token.pos)
    }
}

/// Tokens of one chunk, borrowed from the annotated document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk<'a> {
    tokens: Vec<&'a Token>,
}

impl<'a> Chunk<'a> {
    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True for a chunk without tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in order
    pub fn tokens(&self) -> &[&'a Token] {
        &self.tokens
    }
}

/// One `(lemma, pos)` frequency row of a chunk
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkRow {
    /// Source document id
    pub doc_id: String,
    /// Chunk id, see [`chunk_id`]
    pub chunk_id: String,
    /// Lemma
    pub term: String,
    /// Part-of-speech tag
    pub pos: String,
    /// Occurrences in the chunk
    pub frequency: usize,
}

/// Counts gathered while chunking a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkStats {
    /// Tokens in the document
    pub token_count: usize,
    /// Sentences in the document
    pub sentence_count: usize,
    /// Sentences surviving `skip_first`/`skip_last`
    pub selected_sentence_count: usize,
    /// Chunks produced
    pub chunk_count: usize,
    /// Tokens across all chunks
    pub chunked_token_count: usize,
}

/// Sentences left after trimming leading and trailing material.
///
/// A sentence is skipped while fewer than `skip_first` tokens precede it,
/// or when fewer than `skip_last` tokens remain from its start to the end
/// of the document. Token counts include punctuation and whitespace.
pub fn select_sentences(
    doc: &AnnotatedDoc,
    skip_first: usize,
    skip_last: usize,
) -> Vec<&[Token]> {
    let num_tokens = doc.len();
    let mut cumu_tokens = 0;
    let mut selected = Vec::with_capacity(doc.sentence_count());

    for (si, sentence) in doc.sentences().enumerate() {
        if cumu_tokens < skip_first {
            log::debug!(
                "skip_first skipping sentence {si} ({num_tokens} tokens, {cumu_tokens} passed)"
            );
        } else if num_tokens - cumu_tokens < skip_last {
            log::debug!(
                "skip_last skipping sentence {si} ({num_tokens} tokens, {cumu_tokens} passed)"
            );
        } else {
            selected.push(sentence);
        }
        cumu_tokens += sentence.len();
    }

    selected
}

/// Split the selected sentences of `doc` into chunks of content tokens.
///
/// Sentences are never split: a chunk is closed after the sentence that
/// pushes it past `chunk_size` tokens. The final chunk is emitted if it
/// holds any token.
pub fn chunk_doc<'a>(doc: &'a AnnotatedDoc, options: &ChunkOptions) -> Result<Vec<Chunk<'a>>> {
    options.validate()?;
    let selected = select_sentences(doc, options.skip_first, options.skip_last);
    Ok(chunk_sentences(&selected, options))
}

fn chunk_sentences<'a>(sentences: &[&'a [Token]], options: &ChunkOptions) -> Vec<Chunk<'a>> {
    let mut chunks = Vec::new();
    let mut chunk = Chunk::default();

    for &sentence in sentences {
        chunk
            .tokens
            .extend(sentence.iter().filter(|token| !options.is_excluded(token)));
        if chunk.len() > options.chunk_size {
            chunks.push(std::mem::take(&mut chunk));
        }
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }

    chunks
}

/// Chunk identifier: `{doc_id}-chunk-{n}` with a one-based, three-digit `n`
pub fn chunk_id(doc_id: &str, index: usize) -> String {
    format!("{doc_id}-chunk-{:0>3}", index + 1)
}

/// Frequency rows for every chunk.
///
/// Rows follow the first occurrence of each `(lemma, pos)` pair within a
/// chunk; chunks keep their order.
pub fn make_chunk_rows(doc_id: &str, chunks: &[Chunk<'_>]) -> Result<Vec<ChunkRow>> {
    if doc_id.is_empty() {
        return Err(CoreError::EmptyDocumentId);
    }

    let mut rows: Vec<ChunkRow> = Vec::new();
    for (ci, chunk) in chunks.iter().enumerate() {
        let id = chunk_id(doc_id, ci);
        let first = rows.len();
        let mut index: HashMap<(&str, &str), usize> = HashMap::new();

        for token in chunk.tokens() {
            let key = (token.lemma.as_str(), token.pos.as_str());
            match index.get(&key) {
                Some(&row) => rows[row].frequency += 1,
                None => {
                    index.insert(key, rows.len());
                    rows.push(ChunkRow {
                        doc_id: doc_id.to_string(),
                        chunk_id: id.clone(),
                        term: token.lemma.clone(),
                        pos: token.pos.clone(),
                        frequency: 1,
                    });
                }
            }
        }
        log::trace!("{id}: {} tokens, {} terms", chunk.len(), rows.len() - first);
    }

    Ok(rows)
}

/// Chunk `doc` and count terms in one pass
pub fn chunk_rows(
    doc_id: &str,
    doc: &AnnotatedDoc,
    options: &ChunkOptions,
) -> Result<(Vec<ChunkRow>, ChunkStats)> {
    options.validate()?;
    let selected = select_sentences(doc, options.skip_first, options.skip_last);
    let chunks = chunk_sentences(&selected, options);
    let rows = make_chunk_rows(doc_id, &chunks)?;

    let stats = ChunkStats {
        token_count: doc.len(),
        sentence_count: doc.sentence_count(),
        selected_sentence_count: selected.len(),
        chunk_count: chunks.len(),
        chunked_token_count: chunks.iter().map(Chunk::len).sum(),
    };
    Ok((rows, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(words: &[&str]) -> Vec<Token> {
        let mut tokens: Vec<Token> = words
            .iter()
            .map(|w| Token::new(*w, w.to_lowercase(), "NOUN"))
            .collect();
        tokens.push(Token::new(".", ".", POS_PUNCT));
        tokens
    }

    fn doc(sentences: &[&[&str]]) -> AnnotatedDoc {
        AnnotatedDoc::from_sentences(sentences.iter().map(|s| sentence(s)))
    }

    #[test]
    fn test_select_without_skipping() {
        let d = doc(&[&["a", "b"], &["c"], &["d", "e", "f"]]);
        assert_eq!(select_sentences(&d, 0, 0).len(), 3);
    }

    #[test]
    fn test_skip_first_whole_sentences() {
        // sentence lengths (with punctuation): 3, 2, 4
        let d = doc(&[&["a", "b"], &["c"], &["d", "e", "f"]]);
        let kept = select_sentences(&d, 1, 0);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0][0].text, "c");

        let kept = select_sentences(&d, 4, 0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0][0].text, "d");
    }

    #[test]
    fn test_skip_last_whole_sentences() {
        let d = doc(&[&["a", "b"], &["c"], &["d", "e", "f"]]);
        // remaining at sentence starts: 9, 6, 4
        let kept = select_sentences(&d, 0, 5);
        assert_eq!(kept.len(), 2);
        let kept = select_sentences(&d, 0, 7);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0][0].text, "a");
        assert!(select_sentences(&d, 0, 10).is_empty());
    }

    #[test]
    fn test_chunk_closes_after_exceeding_size() {
        let d = doc(&[&["a", "b"], &["c"], &["d", "e", "f"]]);
        let chunks = chunk_doc(&d, &ChunkOptions::with_chunk_size(2)).unwrap();
        let lens: Vec<_> = chunks.iter().map(Chunk::len).collect();
        assert_eq!(lens, vec![3, 3]);
    }

    #[test]
    fn test_chunk_exact_size_stays_open() {
        let d = doc(&[&["a", "b"], &["c", "d"]]);
        let chunks = chunk_doc(&d, &ChunkOptions::with_chunk_size(2)).unwrap();
        let lens: Vec<_> = chunks.iter().map(Chunk::len).collect();
        assert_eq!(lens, vec![4]);
    }

    #[test]
    fn test_punctuation_only_sentences_produce_no_chunk() {
        let d = AnnotatedDoc::from_sentences(vec![vec![
            Token::new("!", "!", POS_PUNCT),
            Token::new("\n", "\n", POS_SPACE),
        ]]);
        assert!(chunk_doc(&d, &ChunkOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let d = doc(&[&["a"]]);
        assert_eq!(
            chunk_doc(&d, &ChunkOptions::with_chunk_size(0)).unwrap_err(),
            CoreError::InvalidChunkSize
        );
    }

    #[test]
    fn test_chunk_id_format() {
        assert_eq!(chunk_id("dbnl001", 0), "dbnl001-chunk-001");
        assert_eq!(chunk_id("dbnl001", 41), "dbnl001-chunk-042");
        assert_eq!(chunk_id("x", 1234), "x-chunk-1235");
    }

    #[test]
    fn test_rows_in_first_occurrence_order() {
        let tokens = vec![
            Token::new("De", "de", "DET"),
            Token::new("kat", "kat", "NOUN"),
            Token::new("zag", "zien", "VERB"),
            Token::new("de", "de", "DET"),
            Token::new("katten", "kat", "NOUN"),
            Token::new("de", "de", "PRON"),
        ];
        let d = AnnotatedDoc::from_sentences(vec![tokens]);
        let chunks = chunk_doc(&d, &ChunkOptions::default()).unwrap();
        let rows = make_chunk_rows("t1", &chunks).unwrap();

        let got: Vec<_> = rows
            .iter()
            .map(|r| (r.term.as_str(), r.pos.as_str(), r.frequency))
            .collect();
        assert_eq!(
            got,
            vec![
                ("de", "DET", 2),
                ("kat", "NOUN", 2),
                ("zien", "VERB", 1),
                ("de", "PRON", 1),
            ]
        );
        assert!(rows.iter().all(|r| r.chunk_id == "t1-chunk-001"));
    }

    #[test]
    fn test_empty_doc_id_rejected() {
        assert_eq!(make_chunk_rows("", &[]).unwrap_err(), CoreError::EmptyDocumentId);
    }

    #[test]
    fn test_chunk_rows_stats() {
        let d = doc(&[&["a", "b"], &["c"], &["d", "e", "f"]]);
        let options = ChunkOptions {
            chunk_size: 1,
            skip_first: 1,
            ..ChunkOptions::default()
        };
        let (rows, stats) = chunk_rows("doc", &d, &options).unwrap();
        assert_eq!(stats.token_count, 9);
        assert_eq!(stats.sentence_count, 3);
        assert_eq!(stats.selected_sentence_count, 2);
        // "c" alone does not exceed the size, "d e f" closes the chunk
        assert_eq!(stats.chunk_count, 1);
        assert_eq!(stats.chunked_token_count, 4);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows.last().unwrap().chunk_id, "doc-chunk-001");
    }
}
