//! Annotated token stream

use core::ops::Range;

/// Part-of-speech tag for whitespace tokens
pub const POS_SPACE: &str = "SPACE";
/// Part-of-speech tag for punctuation tokens
pub const POS_PUNCT: &str = "PUNCT";

/// A token with its lemma and coarse part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Surface form
    pub text: String,
    /// Dictionary form
    pub lemma: String,
    /// Coarse part-of-speech tag
    pub pos: String,
}

impl Token {
    /// Create a token
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, pos: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos: pos.into(),
        }
    }
}

/// Tokens of one document with their sentence spans
///
/// Spans are contiguous, non-empty and cover every token in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedDoc {
    tokens: Vec<Token>,
    sentences: Vec<Range<usize>>,
}

impl AnnotatedDoc {
    /// Build from per-sentence token lists; empty sentences are dropped
    pub fn from_sentences<I>(sentences: I) -> Self
    where
        I: IntoIterator<Item = Vec<Token>>,
    {
        let mut builder = Self::builder();
        for sentence in sentences {
            builder.extend(sentence);
            builder.end_sentence();
        }
        builder.build()
    }

    /// Incremental builder
    pub fn builder() -> AnnotatedDocBuilder {
        AnnotatedDocBuilder::default()
    }

    /// Number of tokens, whitespace and punctuation included
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the document has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All tokens in order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of sentences
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Sentences as token slices, in order
    pub fn sentences(&self) -> impl ExactSizeIterator<Item = &[Token]> + '_ {
        self.sentences.iter().map(|span| &self.tokens[span.clone()])
    }
}

/// Builder for [`AnnotatedDoc`]
#[derive(Debug, Default)]
pub struct AnnotatedDocBuilder {
    tokens: Vec<Token>,
    sentences: Vec<Range<usize>>,
    sentence_start: usize,
}

impl AnnotatedDocBuilder {
    /// Append a token to the open sentence
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append several tokens to the open sentence
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) -> &mut Self {
        self.tokens.extend(tokens);
        self
    }

    /// Tokens in the open sentence
    pub fn open_len(&self) -> usize {
        self.tokens.len() - self.sentence_start
    }

    /// Close the open sentence; no-op when it is empty
    pub fn end_sentence(&mut self) -> &mut Self {
        if self.tokens.len() > self.sentence_start {
            self.sentences.push(self.sentence_start..self.tokens.len());
            self.sentence_start = self.tokens.len();
        }
        self
    }

    /// Finish, closing any open sentence
    pub fn build(mut self) -> AnnotatedDoc {
        self.end_sentence();
        AnnotatedDoc {
            tokens: self.tokens,
            sentences: self.sentences,
        }
    }
}
