//! Owned markup tree for the Sieve scraper.
//!
//! This crate provides the tree the parser builds and the two small
//! collaborators that consume it:
//! - **AST** - [`Document`], [`Node`], [`ElementData`], [`Attribute`]
//! - **Query** - depth-first class-name search ([`query::first`], [`query::all`])
//! - **Printer** - indented text rendering ([`printer::print_tree`])
//!
//! # Design
//!
//! Unlike an arena DOM with parent and sibling links, every node exclusively
//! owns its children and its attribute list. The tree is built bottom-up by a
//! recursive-descent parser, so an element is only ever handed out once all
//! of its children are in place.

use serde::Serialize;

pub mod printer;
pub mod query;

pub use printer::{print_tree, write_tree};
pub use query::{all, first};

/// Root container produced by one parse.
///
/// "Document → top-level nodes → children": the document owns the ordered
/// sequence of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Top-level nodes in source order.
    pub nodes: Vec<Node>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// First node (pre-order, across all top-level nodes) whose class list
    /// contains `class_name`.
    #[must_use]
    pub fn first_by_class(&self, class_name: &str) -> Option<&Node> {
        self.nodes.iter().find_map(|node| first(node, class_name))
    }

    /// Every node whose class list contains `class_name`, in pre-order.
    #[must_use]
    pub fn all_by_class(&self, class_name: &str) -> Vec<&Node> {
        self.nodes
            .iter()
            .flat_map(|node| all(node, class_name))
            .collect()
    }
}

/// A node in the markup tree.
///
/// Closed over four shapes. Traversal and attribute access work uniformly on
/// all of them: non-element variants simply report no attributes and no
/// children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// A structural element with attributes and children.
    Element(ElementData),
    /// A closing tag found where an opening construct was expected.
    ///
    /// Carries the tag name only; attributes and children are always empty.
    Illegal(ElementData),
    /// Raw text content, verbatim.
    Text {
        /// The text as it appeared in the source.
        content: String,
    },
    /// A comment or doctype declaration. Its source text is discarded.
    Comment,
}

impl Node {
    /// Create an element node.
    #[must_use]
    pub fn element(
        tag_name: impl Into<String>,
        attributes: Vec<Attribute>,
        children: Vec<Self>,
    ) -> Self {
        Self::Element(ElementData {
            tag_name: tag_name.into(),
            attributes,
            children,
        })
    }

    /// Create a recovered node for a stray closing tag.
    #[must_use]
    pub fn illegal(tag_name: impl Into<String>) -> Self {
        Self::Illegal(ElementData::new(tag_name))
    }

    /// Create a text node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// The node's tag name. Text and comment nodes report the fixed names
    /// `TextNode` and `Comment`.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        match self {
            Self::Element(data) | Self::Illegal(data) => &data.tag_name,
            Self::Text { .. } => "TextNode",
            Self::Comment => "Comment",
        }
    }

    /// Attributes in source order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Self::Element(data) | Self::Illegal(data) => &data.attributes,
            Self::Text { .. } | Self::Comment => &[],
        }
    }

    /// Children in source order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Element(data) | Self::Illegal(data) => &data.children,
            Self::Text { .. } | Self::Comment => &[],
        }
    }

    /// True only for nodes recovered from a stray closing tag.
    #[must_use]
    pub const fn is_illegal(&self) -> bool {
        matches!(self, Self::Illegal(_))
    }

    /// Element data for [`Node::Element`]; `None` for every other variant.
    #[must_use]
    pub const fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Text content for [`Node::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content } => Some(content),
            _ => None,
        }
    }

    /// First attribute called `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes().iter().find(|attr| attr.name == name)
    }

    /// Whether the node's first `class` attribute lists `class_name`.
    #[must_use]
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attribute("class")
            .is_some_and(|attr| attr.contains(class_name))
    }

    /// Concatenated text of this node and all of its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Self::Text { content } = self {
            out.push_str(content);
        }
        for child in self.children() {
            child.collect_text(out);
        }
    }
}

/// Element-specific data.
///
/// Only the tag name, the ordered attribute list, and the children are kept;
/// there is no namespace handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementData {
    /// Tag name exactly as written in the source.
    pub tag_name: String,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// Children in source order.
    pub children: Vec<Node>,
}

impl ElementData {
    /// Element with no attributes and no children.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Value tokens of the first `id` attribute, if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == "id")
            .and_then(|attr| attr.values().first())
            .map(String::as_str)
    }

    /// Class tokens of the first `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == "class")
            .map(Attribute::values)
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
    }
}

/// A single attribute on an element.
///
/// The value is already split on whitespace, since downstream consumers treat
/// multi-valued attributes such as `class` as token sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Attribute name as written.
    pub name: String,
    /// `None` when the attribute had no `=`.
    pub value: Option<Vec<String>>,
}

impl Attribute {
    /// Attribute written without `=`, e.g. `hidden`.
    #[must_use]
    pub fn valueless(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Attribute with a raw value, split on whitespace. Empty runs are dropped.
    #[must_use]
    pub fn with_raw_value(name: impl Into<String>, raw: &str) -> Self {
        Self {
            name: name.into(),
            value: Some(raw.split_whitespace().map(str::to_owned).collect()),
        }
    }

    /// Value tokens; empty for a valueless attribute.
    #[must_use]
    pub fn values(&self) -> &[String] {
        self.value.as_deref().unwrap_or_default()
    }

    /// Whether `token` is one of the value tokens.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.values().iter().any(|value| value == token)
    }

    /// Whether the value set is exactly the single token `token`.
    #[must_use]
    pub fn is_exactly(&self, token: &str) -> bool {
        matches!(self.values(), [only] if only == token)
    }
}
