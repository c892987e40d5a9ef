//! Input kind selection

use clap::ValueEnum;
use std::path::Path;

/// How an input file is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputKind {
    /// Decide from the file extension
    Auto,
    /// TEI/HTML markup; Dutch prose is extracted first
    Markup,
    /// Plain text, annotated with the built-in annotator
    Text,
    /// CoNLL-U output of an external tagger
    Conllu,
}

impl InputKind {
    /// All kinds with a short description
    pub const ALL: [(InputKind, &'static str); 4] = [
        (InputKind::Auto, "pick by extension (.conllu, .txt, otherwise markup)"),
        (InputKind::Markup, "TEI/HTML markup, Dutch prose paragraphs only"),
        (InputKind::Text, "plain text, annotated by the rule-based annotator"),
        (InputKind::Conllu, "pre-annotated CoNLL-U (lemma and UPOS columns)"),
    ];

    /// Name as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Auto => "auto",
            InputKind::Markup => "markup",
            InputKind::Text => "text",
            InputKind::Conllu => "conllu",
        }
    }

    /// Concrete kind for `path`; `Auto` is resolved from the extension
    /// after a trailing `.gz`
    pub fn resolve(self, path: &Path) -> InputKind {
        if self != InputKind::Auto {
            return self;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        match Path::new(name).extension().and_then(|e| e.to_str()) {
            Some("conllu") => InputKind::Conllu,
            Some("txt") => InputKind::Text,
            _ => InputKind::Markup,
        }
    }
}
