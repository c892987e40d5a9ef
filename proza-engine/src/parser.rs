//! Markup parsing into the core document tree
//!
//! Built on quick-xml's pull reader. The reader is configured to be
//! forgiving so that loosely formed HTML exports parse as well as TEI:
//! end tags close the nearest matching open element, stray end tags are
//! ignored and unclosed elements end at EOF.

use crate::error::{EngineError, Result};
use proza_core::{Document, NodeId};
use quick_xml::escape::unescape_with;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;
use std::borrow::Cow;

/// HTML elements that never have content
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Parse TEI/XML or HTML markup into a [`Document`]
///
/// Element names become lowercase local names (`tei:DIV` → `div`);
/// attribute keys are lowercased but keep their prefix (`xml:lang`).
pub fn parse_markup(text: &str) -> Result<Document> {
    let mut reader = Reader::from_str(text);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut doc = Document::new();
    let mut open: Vec<(NodeId, String)> = vec![(doc.root(), String::new())];

    loop {
        let event = reader.read_event().map_err(|e| EngineError::Markup {
            position: reader.error_position() as u64,
            reason: e.to_string(),
        })?;
        let parent = open.last().map(|(id, _)| *id).unwrap_or_else(|| doc.root());

        match event {
            Event::Start(ref e) => {
                let name = element_name(e);
                let id = doc.append_element(parent, name.clone(), attributes(e))?;
                if !VOID_ELEMENTS.contains(&name.as_str()) {
                    open.push((id, name));
                }
            }
            Event::Empty(ref e) => {
                doc.append_element(parent, element_name(e), attributes(e))?;
            }
            Event::End(ref e) => {
                let name = local_name(e.local_name().as_ref());
                // index 0 is the root and never closes
                match open.iter().rposition(|(_, n)| *n == name) {
                    Some(pos) if pos > 0 => open.truncate(pos),
                    _ => log::trace!("ignoring unmatched end tag </{name}>"),
                }
            }
            Event::Text(ref t) => {
                let text = unescape_text(t);
                if !text.is_empty() {
                    doc.append_text(parent, text)?;
                }
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                if !text.is_empty() {
                    doc.append_text(parent, text)?;
                }
            }
            Event::Eof => break,
            // comments, declarations, processing instructions, doctype
            _ => {}
        }
    }

    if open.len() > 1 {
        log::debug!("{} elements left open at end of input", open.len() - 1);
    }
    log::debug!("parsed markup into {} nodes", doc.len());
    Ok(doc)
}

fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn element_name(e: &BytesStart<'_>) -> String {
    local_name(e.local_name().as_ref())
}

fn attributes(e: &BytesStart<'_>) -> Vec<(String, String)> {
    e.html_attributes()
        .filter_map(|attr| attr.ok())
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
            let value = match attr.unescape_value() {
                Ok(value) => value.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            (key, value)
        })
        .collect()
}

/// Resolve references one at a time; unknown ones stay as written
fn unescape_text(t: &BytesText<'_>) -> String {
    let raw: Cow<'_, str> = String::from_utf8_lossy(t);
    let mut out = String::with_capacity(raw.len());
    let mut rest: &str = &raw;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let end = tail[1..]
            .find(|c: char| c == ';' || c == '&' || c.is_whitespace())
            .map(|i| i + 1)
            .filter(|&i| tail[i..].starts_with(';'));
        match end {
            Some(end) => {
                let reference = &tail[..=end];
                match unescape_with(reference, resolve_entity) {
                    Ok(value) => out.push_str(&value),
                    Err(_) => out.push_str(reference),
                }
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// XML predefined entities plus the HTML ones common in digitised texts
fn resolve_entity(entity: &str) -> Option<&'static str> {
    let value = match entity {
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "apos" => "'",
        "quot" => "\"",
        "nbsp" => "\u{a0}",
        "shy" => "\u{ad}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bdquo" => "\u{201e}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "eacute" => "é",
        "euml" => "ë",
        "iuml" => "ï",
        "ouml" => "ö",
        "uuml" => "ü",
        "egrave" => "è",
        "agrave" => "à",
        "ccedil" => "ç",
        _ => return None,
    };
    Some(value)
}
