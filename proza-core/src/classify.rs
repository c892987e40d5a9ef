//! Dutch prose classification
//!
//! Decides which paragraphs of a markup tree count as prose in the target
//! language. Two independent judgements are combined:
//!
//! - **Prose**: a paragraph is non-prose when any enclosing division carries
//!   one of the non-prose marker attributes (e.g. `ebook-type`,
//!   `wpg-type`). Everything else is prose.
//! - **Language**: a paragraph is non-Dutch when it sits inside a division
//!   tagged with another language, or when it is a prose paragraph tagged
//!   with another language itself. Untagged elements are Dutch.
//!
//! Only paragraphs that are both Dutch and prose contribute text.

use crate::markup::{Document, NodeId};
use std::collections::{BTreeSet, HashSet};

/// Element names, marker attributes and language settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassifierConfig {
    /// Name of division elements
    pub division_element: String,
    /// Name of paragraph elements
    pub paragraph_element: String,
    /// Attribute keys marking a division as non-prose
    pub non_prose_markers: Vec<String>,
    /// Attribute keys holding a language tag, first match wins
    pub language_attributes: Vec<String>,
    /// Language tag of the text to keep
    pub target_language: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            division_element: "div".to_string(),
            paragraph_element: "p".to_string(),
            non_prose_markers: vec!["ebook-type".to_string(), "wpg-type".to_string()],
            language_attributes: vec!["lang".to_string()],
            target_language: "nl".to_string(),
        }
    }
}

/// Paragraph counts per class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassificationSummary {
    /// All paragraphs
    pub paragraphs: usize,
    /// Paragraphs outside non-prose divisions
    pub prose: usize,
    /// Paragraphs not excluded by language
    pub dutch: usize,
    /// Paragraphs that are both
    pub dutch_prose: usize,
}

/// Classifies divisions and paragraphs of a [`Document`]
#[derive(Debug, Clone, Default)]
pub struct ProseClassifier {
    config: ClassifierConfig,
}

impl ProseClassifier {
    /// Create a classifier with the given settings
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Active settings
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Whether `el` is a division element
    pub fn is_div(&self, doc: &Document, el: NodeId) -> bool {
        doc.name(el) == Some(self.config.division_element.as_str())
    }

    /// Division carrying at least one non-prose marker
    pub fn is_non_prose_div(&self, doc: &Document, el: NodeId) -> bool {
        self.is_div(doc, el)
            && self
                .config
                .non_prose_markers
                .iter()
                .any(|marker| doc.has_attr(el, marker))
    }

    /// Division without non-prose markers
    pub fn is_prose_div(&self, doc: &Document, el: NodeId) -> bool {
        self.is_div(doc, el) && !self.is_non_prose_div(doc, el)
    }

    /// Language tag of `el`, if any configured attribute is present
    pub fn language_of<'d>(&self, doc: &'d Document, el: NodeId) -> Option<&'d str> {
        self.config
            .language_attributes
            .iter()
            .find_map(|key| doc.attr(el, key))
    }

    /// Element explicitly tagged with a language other than the target.
    /// Untagged elements are never non-Dutch.
    pub fn is_non_dutch_element(&self, doc: &Document, el: NodeId) -> bool {
        match self.language_of(doc, el) {
            Some(lang) => lang != self.config.target_language,
            None => false,
        }
    }

    fn divisions<'a>(&'a self, doc: &'a Document) -> impl Iterator<Item = NodeId> + 'a {
        doc.find_all(&self.config.division_element)
    }

    /// All paragraphs in document order
    pub fn paragraphs<'a>(&'a self, doc: &'a Document) -> impl Iterator<Item = NodeId> + 'a {
        doc.find_all(&self.config.paragraph_element)
    }

    fn paragraphs_within(&self, doc: &Document, divs: &[NodeId]) -> BTreeSet<NodeId> {
        unique_by_value(
            doc,
            divs.iter()
                .flat_map(|&div| doc.find_all_in(div, &self.config.paragraph_element)),
        )
    }

    /// Non-prose divisions in document order
    pub fn non_prose_divs(&self, doc: &Document) -> Vec<NodeId> {
        self.divisions(doc)
            .filter(|&div| self.is_non_prose_div(doc, div))
            .collect()
    }

    /// Prose divisions in document order
    pub fn prose_divs(&self, doc: &Document) -> Vec<NodeId> {
        self.divisions(doc)
            .filter(|&div| self.is_prose_div(doc, div))
            .collect()
    }

    /// Paragraphs nested at any depth in a non-prose division
    pub fn non_prose_paragraphs(&self, doc: &Document) -> BTreeSet<NodeId> {
        self.paragraphs_within(doc, &self.non_prose_divs(doc))
    }

    /// Paragraphs equal to none inside a non-prose division
    pub fn prose_paragraphs(&self, doc: &Document) -> BTreeSet<NodeId> {
        let non_prose = keys(doc, &self.non_prose_paragraphs(doc));
        unique_by_value(
            doc,
            self.paragraphs(doc)
                .filter(|&para| !non_prose.contains(&doc.structural_key(para))),
        )
    }

    /// Divisions tagged with a non-target language, prose or not
    pub fn non_dutch_divs(&self, doc: &Document) -> Vec<NodeId> {
        self.divisions(doc)
            .filter(|&div| self.is_non_dutch_element(doc, div))
            .collect()
    }

    /// Paragraphs inside a non-Dutch division, plus prose paragraphs that
    /// are tagged non-Dutch themselves
    pub fn non_dutch_paragraphs(&self, doc: &Document) -> BTreeSet<NodeId> {
        let in_divs = self.paragraphs_within(doc, &self.non_dutch_divs(doc));
        let tagged = self
            .prose_paragraphs(doc)
            .into_iter()
            .filter(|&para| self.is_non_dutch_element(doc, para));
        unique_by_value(doc, in_divs.into_iter().chain(tagged))
    }

    /// Paragraphs equal to no non-Dutch paragraph
    pub fn dutch_paragraphs(&self, doc: &Document) -> BTreeSet<NodeId> {
        let non_dutch = keys(doc, &self.non_dutch_paragraphs(doc));
        unique_by_value(
            doc,
            self.paragraphs(doc)
                .filter(|&para| !non_dutch.contains(&doc.structural_key(para))),
        )
    }

    /// Paragraphs that are both Dutch and prose, in document order.
    ///
    /// Paragraphs are compared by value: a paragraph equal to an earlier
    /// one is emitted once.
    pub fn dutch_prose_paragraphs(&self, doc: &Document) -> Vec<NodeId> {
        let dutch = keys(doc, &self.dutch_paragraphs(doc));
        let prose = keys(doc, &self.prose_paragraphs(doc));
        let mut seen = HashSet::new();
        self.paragraphs(doc)
            .filter(|&para| {
                let key = doc.structural_key(para);
                dutch.contains(&key) && prose.contains(&key) && seen.insert(key)
            })
            .collect()
    }

    /// Stripped text strings of the Dutch prose paragraphs, in order
    pub fn dutch_prose_strings<'d>(&self, doc: &'d Document) -> Vec<&'d str> {
        self.dutch_prose_paragraphs(doc)
            .into_iter()
            .flat_map(|para| doc.stripped_strings(para))
            .collect()
    }

    /// Dutch prose text, one stripped string per line
    pub fn extract_dutch_prose_text(&self, doc: &Document) -> String {
        let strings = self.dutch_prose_strings(doc);
        log::debug!("extracted {} dutch prose strings", strings.len());
        strings.join("\n")
    }

    /// Paragraph counts for reporting
    pub fn summary(&self, doc: &Document) -> ClassificationSummary {
        ClassificationSummary {
            paragraphs: self.paragraphs(doc).count(),
            prose: self.prose_paragraphs(doc).len(),
            dutch: self.dutch_paragraphs(doc).len(),
            dutch_prose: self.dutch_prose_paragraphs(doc).len(),
        }
    }
}

/// First node of every group of structurally equal nodes
fn unique_by_value(doc: &Document, nodes: impl IntoIterator<Item = NodeId>) -> BTreeSet<NodeId> {
    let mut seen = HashSet::new();
    nodes
        .into_iter()
        .filter(|&id| seen.insert(doc.structural_key(id)))
        .collect()
}

fn keys(doc: &Document, nodes: &BTreeSet<NodeId>) -> HashSet<String> {
    nodes.iter().map(|&id| doc.structural_key(id)).collect()
}

/// Dutch prose text of `doc` with default settings
pub fn extract_dutch_prose_text(doc: &Document) -> String {
    ProseClassifier::default().extract_dutch_prose_text(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [(&str, &str); 0] = [];

    fn para(doc: &mut Document, parent: NodeId, attrs: &[(&str, &str)], text: &str) -> NodeId {
        let p = doc.append_element(parent, "p", attrs.iter().copied()).unwrap();
        doc.append_text(p, text).unwrap();
        p
    }

    #[test]
    fn test_div_predicates() {
        let mut doc = Document::new();
        let root = doc.root();
        let plain = doc.append_element(root, "div", NONE).unwrap();
        let ebook = doc.append_element(root, "div", [("ebook-type", "colofon")]).unwrap();
        let wpg = doc.append_element(root, "div", [("wpg-type", "")]).unwrap();
        let section = doc.append_element(root, "section", [("ebook-type", "x")]).unwrap();

        let c = ProseClassifier::default();
        assert!(c.is_prose_div(&doc, plain));
        assert!(!c.is_non_prose_div(&doc, plain));
        assert!(c.is_non_prose_div(&doc, ebook));
        assert!(c.is_non_prose_div(&doc, wpg));
        assert!(!c.is_div(&doc, section));
        assert!(!c.is_non_prose_div(&doc, section));
        assert!(!c.is_prose_div(&doc, section));
    }

    #[test]
    fn test_non_dutch_element() {
        let mut doc = Document::new();
        let root = doc.root();
        let nl = doc.append_element(root, "p", [("lang", "nl")]).unwrap();
        let fr = doc.append_element(root, "p", [("lang", "fr")]).unwrap();
        let untagged = doc.append_element(root, "p", NONE).unwrap();

        let c = ProseClassifier::default();
        assert!(!c.is_non_dutch_element(&doc, nl));
        assert!(c.is_non_dutch_element(&doc, fr));
        assert!(!c.is_non_dutch_element(&doc, untagged));
    }

    #[test]
    fn test_nested_non_prose_paragraph() {
        let mut doc = Document::new();
        let root = doc.root();
        let outer = doc.append_element(root, "div", [("wpg-type", "note")]).unwrap();
        let inner = doc.append_element(outer, "div", NONE).unwrap();
        let p = para(&mut doc, inner, &[], "Voetnoot");
        let q = para(&mut doc, root, &[], "Tekst");

        let c = ProseClassifier::default();
        assert!(c.non_prose_paragraphs(&doc).contains(&p));
        assert_eq!(c.prose_paragraphs(&doc).into_iter().collect::<Vec<_>>(), vec![q]);
    }

    #[test]
    fn test_dutch_paragraph_in_foreign_div_excluded() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.append_element(root, "div", [("lang", "fr")]).unwrap();
        para(&mut doc, div, &[("lang", "nl")], "Hallo");

        let c = ProseClassifier::default();
        assert!(c.dutch_prose_paragraphs(&doc).is_empty());
        assert_eq!(c.extract_dutch_prose_text(&doc), "");
    }

    #[test]
    fn test_language_attribute_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc
            .append_element(root, "p", [("xml:lang", "de"), ("lang", "nl")])
            .unwrap();

        let c = ProseClassifier::new(ClassifierConfig {
            language_attributes: vec!["xml:lang".to_string(), "lang".to_string()],
            ..ClassifierConfig::default()
        });
        assert_eq!(c.language_of(&doc, p), Some("de"));
        assert!(c.is_non_dutch_element(&doc, p));
    }

    #[test]
    fn test_repeated_paragraph_emitted_once() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.append_element(root, "div", NONE).unwrap();
        para(&mut doc, div, &[], "* * *");
        para(&mut doc, div, &[], "Tekst een.");
        para(&mut doc, div, &[], "* * *");
        para(&mut doc, div, &[], "Tekst twee.");

        let c = ProseClassifier::default();
        assert_eq!(c.dutch_prose_paragraphs(&doc).len(), 3);
        assert_eq!(
            c.extract_dutch_prose_text(&doc),
            "* * *\nTekst een.\nTekst twee."
        );
    }

    #[test]
    fn test_prose_paragraph_equal_to_non_prose_one_dropped() {
        let mut doc = Document::new();
        let root = doc.root();
        let colofon = doc.append_element(root, "div", [("ebook-type", "x")]).unwrap();
        para(&mut doc, colofon, &[], "Einde");
        let body = doc.append_element(root, "div", NONE).unwrap();
        para(&mut doc, body, &[], "Einde");
        para(&mut doc, body, &[], "Ja.");

        let c = ProseClassifier::default();
        assert_eq!(c.prose_paragraphs(&doc).len(), 1);
        assert_eq!(c.extract_dutch_prose_text(&doc), "Ja.");
    }

    #[test]
    fn test_paragraphs_differing_in_attributes_are_distinct() {
        let mut doc = Document::new();
        let root = doc.root();
        para(&mut doc, root, &[("n", "1")], "Ja.");
        para(&mut doc, root, &[("n", "2")], "Ja.");

        let c = ProseClassifier::default();
        assert_eq!(c.extract_dutch_prose_text(&doc), "Ja.\nJa.");
    }

    #[test]
    fn test_summary_counts() {
        let mut doc = Document::new();
        let root = doc.root();
        let note = doc.append_element(root, "div", [("ebook-type", "noot")]).unwrap();
        para(&mut doc, note, &[], "noot");
        para(&mut doc, root, &[("lang", "en")], "english");
        para(&mut doc, root, &[], "nederlands");

        let summary = ProseClassifier::default().summary(&doc);
        assert_eq!(
            summary,
            ClassificationSummary {
                paragraphs: 3,
                prose: 2,
                dutch: 2,
                dutch_prose: 1,
            }
        );
    }
}
