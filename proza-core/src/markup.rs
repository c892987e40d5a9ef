//! Navigable markup tree
//!
//! A minimal arena-backed element/text tree. Parsers (see `proza-engine`)
//! build a [`Document`] with [`Document::append_element`] and
//! [`Document::append_text`]; the classifier only reads it.

use crate::error::{CoreError, Result};

/// Name of the synthetic root element
pub const ROOT_NAME: &str = "#document";

/// Index of a node inside a single [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

/// Payload of a tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Element with name and attributes in source order
    Element {
        /// Element name
        name: String,
        /// Attribute key/value pairs
        attributes: Vec<(String, String)>,
    },
    /// Character data
    Text(String),
}

/// A node and its links
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Node payload
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }
}

/// Arena-backed document tree with a synthetic root element
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root element
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Element {
                    name: ROOT_NAME.to_string(),
                    attributes: Vec::new(),
                },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The synthetic root
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Total number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing but the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Look up a node, failing for ids from another document
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(CoreError::UnknownNode(id.0))
    }

    /// Append a child element under `parent`
    pub fn append_element<N, I, K, V>(
        &mut self,
        parent: NodeId,
        name: N,
        attributes: I,
    ) -> Result<NodeId>
    where
        N: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attributes = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.push(
            parent,
            NodeKind::Element {
                name: name.into(),
                attributes,
            },
        )
    }

    /// Append a text child under `parent`
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> Result<NodeId> {
        self.push(parent, NodeKind::Text(text.into()))
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId> {
        if parent.0 >= self.nodes.len() {
            return Err(CoreError::UnknownNode(parent.0));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Element name, `None` for text nodes
    pub fn name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element { name, .. } => Some(name),
            NodeKind::Text(_) => None,
        }
    }

    /// Text content of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    /// Attribute value by key
    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// Whether the element carries `key`, regardless of its value
    pub fn has_attr(&self, id: NodeId, key: &str) -> bool {
        self.attr(id, key).is_some()
    }

    /// Parent node, `None` for the root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    /// Direct children in order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Preorder descendants of `id`, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Every element named `name`, in document order
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.find_all_in(self.root(), name)
    }

    /// Every descendant element of `id` named `name`, in document order
    pub fn find_all_in<'a>(
        &'a self,
        id: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(id).filter(move |&d| self.name(d) == Some(name))
    }

    /// Whether `ancestor` lies on the parent chain of `id`
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Trimmed, non-empty descendant text nodes of `id` in document order
    pub fn stripped_strings(&self, id: NodeId) -> impl Iterator<Item = &str> + '_ {
        self.descendants(id)
            .filter_map(move |d| self.text(d))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Serialized subtree of `id`.
    ///
    /// Two nodes have the same key exactly when they have the same name,
    /// the same attributes (in any order) and equal content, so the key
    /// identifies a node by value rather than by position.
    pub fn structural_key(&self, id: NodeId) -> String {
        let mut key = String::new();
        self.write_key(id, &mut key);
        key
    }

    fn write_key(&self, id: NodeId, out: &mut String) {
        match self.nodes.get(id.0).map(|n| &n.kind) {
            Some(NodeKind::Element { name, attributes }) => {
                let mut sorted: Vec<_> = attributes.iter().collect();
                sorted.sort();
                out.push('<');
                out.push_str(name);
                for (k, v) in sorted {
                    out.push(' ');
                    out.push_str(k);
                    out.push_str("=\"");
                    push_escaped(out, v);
                    out.push('"');
                }
                out.push('>');
                for &child in self.children(id) {
                    self.write_key(child, out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
            Some(NodeKind::Text(text)) => push_escaped(out, text),
            None => {}
        }
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Preorder iterator returned by [`Document::descendants`]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}
