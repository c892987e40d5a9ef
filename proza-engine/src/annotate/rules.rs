//! Deterministic rule-based annotator
//!
//! A stand-in for a full tagging pipeline when no external annotations are
//! available. Tokenization and sentence splitting follow simple surface
//! rules; tags and lemmas come from a closed-class [`Lexicon`].

use super::{lexicon::Lexicon, Annotator};
use crate::error::Result;
use proza_core::{AnnotatedDoc, AnnotatedDocBuilder, Token, POS_PUNCT, POS_SPACE};
use regex::Regex;
use std::sync::OnceLock;

/// Tag for numbers
pub const POS_NUM: &str = "NUM";
/// Tag for capitalised words inside a sentence
pub const POS_PROPN: &str = "PROPN";
/// Tag for everything the lexicon does not know
pub const POS_UNKNOWN: &str = "X";

const TERMINATORS: [&str; 4] = [".", "!", "?", "…"];
const CLOSERS: [&str; 8] = ["\"", "'", "”", "’", "»", ")", "]", "…"];

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn token_pattern() -> &'static Regex {
    TOKEN_PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"(?P<space>\n+)",
            r"|(?P<abbr>(?:\p{L}\.){2,})",
            r"|(?P<clitic>['’][stn]\b)",
            r"|(?P<word>[\p{L}\p{M}]+(?:['’\-][\p{L}\p{M}]+)*)",
            r"|(?P<num>\p{N}+(?:[.,]\p{N}+)*)",
            r"|(?P<punct>\.{3}|[^\s\p{L}\p{M}\p{N}])",
        ))
        .expect("token pattern is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Space,
    Abbreviation,
    Word,
    Number,
    Punct,
}

/// Rule-based annotator backed by a lexicon
#[derive(Debug, Clone)]
pub struct RuleBasedAnnotator {
    lexicon: Lexicon,
}

impl RuleBasedAnnotator {
    /// Annotator using the embedded Dutch lexicon
    pub fn dutch() -> Result<Self> {
        Ok(Self::new(Lexicon::dutch()?.clone()))
    }

    /// Annotator using a custom lexicon
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Active lexicon
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn word_token(&self, text: &str, sentence_initial: bool) -> Token {
        let lower = text.to_lowercase();
        if let Some(tag) = self.lexicon.tag(&lower) {
            let lemma = self.lexicon.lemma(&lower).unwrap_or(&lower).to_string();
            return Token::new(text, lemma, tag);
        }
        let capitalised = text.chars().next().is_some_and(char::is_uppercase);
        if capitalised && !sentence_initial {
            return Token::new(text, text, POS_PROPN);
        }
        let lemma = self.lexicon.lemma(&lower).map(str::to_string).unwrap_or(lower);
        Token::new(text, lemma, POS_UNKNOWN)
    }
}

/// Sentence assembly state
struct SentenceState {
    builder: AnnotatedDocBuilder,
    /// A terminator was seen; the sentence ends before the next opener
    pending_end: bool,
    /// A word or number has been added to the open sentence
    has_content: bool,
}

impl SentenceState {
    fn new() -> Self {
        Self {
            builder: AnnotatedDoc::builder(),
            pending_end: false,
            has_content: false,
        }
    }

    fn end(&mut self) {
        self.builder.end_sentence();
        self.pending_end = false;
        self.has_content = false;
    }

    /// Close a pending sentence unless `text` continues it
    fn before(&mut self, kind: Kind, text: &str) {
        if !self.pending_end {
            return;
        }
        let continues = kind == Kind::Punct
            && (TERMINATORS.contains(&text) || CLOSERS.contains(&text));
        if !continues {
            self.end();
        }
    }
}

impl Annotator for RuleBasedAnnotator {
    fn name(&self) -> &str {
        "rules"
    }

    fn annotate(&self, text: &str) -> Result<AnnotatedDoc> {
        let mut state = SentenceState::new();
        let mut matches = token_pattern().captures_iter(text).peekable();

        while let Some(caps) = matches.next() {
            let (kind, m) = if let Some(m) = caps.name("space") {
                (Kind::Space, m)
            } else if let Some(m) = caps.name("abbr") {
                (Kind::Abbreviation, m)
            } else if let Some(m) = caps.name("clitic").or_else(|| caps.name("word")) {
                (Kind::Word, m)
            } else if let Some(m) = caps.name("num") {
                (Kind::Number, m)
            } else if let Some(m) = caps.name("punct") {
                (Kind::Punct, m)
            } else {
                continue;
            };
            let surface = m.as_str();

            match kind {
                Kind::Space => {
                    // whitespace attaches to the sentence it ends
                    state.builder.push(Token::new(surface, surface, POS_SPACE));
                    state.end();
                }
                Kind::Abbreviation => {
                    state.before(kind, surface);
                    let lower = surface.to_lowercase();
                    state.builder.push(Token::new(surface, lower, POS_UNKNOWN));
                    state.has_content = true;
                }
                Kind::Word => {
                    state.before(kind, surface);
                    let lower = surface.to_lowercase();
                    let period_follows = matches.peek().is_some_and(|next| {
                        next.name("punct")
                            .is_some_and(|p| p.as_str() == "." && p.start() == m.end())
                    });
                    if period_follows && self.lexicon.is_abbreviation(&lower) {
                        matches.next();
                        let full = &text[m.start()..m.end() + 1];
                        state.builder.push(Token::new(full, format!("{lower}."), POS_UNKNOWN));
                    } else {
                        let token = self.word_token(surface, !state.has_content);
                        state.builder.push(token);
                    }
                    state.has_content = true;
                }
                Kind::Number => {
                    state.before(kind, surface);
                    state.builder.push(Token::new(surface, surface, POS_NUM));
                    state.has_content = true;
                }
                Kind::Punct => {
                    state.before(kind, surface);
                    state.builder.push(Token::new(surface, surface, POS_PUNCT));
                    if TERMINATORS.contains(&surface) || surface == "..." {
                        state.pending_end = true;
                    }
                }
            }
        }

        let doc = state.builder.build();
        log::debug!(
            "annotated {} bytes into {} tokens, {} sentences",
            text.len(),
            doc.len(),
            doc.sentence_count()
        );
        Ok(doc)
    }
}
