//! Depth-first class-name search.
//!
//! A node matches when its first `class` attribute lists the requested name.
//! Both searches are pre-order and treat a node without children as a leaf.

use crate::Node;

/// First matching node in pre-order, descending through non-matching
/// ancestors.
#[must_use]
pub fn first<'a>(node: &'a Node, class_name: &str) -> Option<&'a Node> {
    if node.has_class(class_name) {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|child| first(child, class_name))
}

/// Every matching node in pre-order. A match's own descendants are searched
/// too.
#[must_use]
pub fn all<'a>(node: &'a Node, class_name: &str) -> Vec<&'a Node> {
    let mut found = Vec::new();
    collect(node, class_name, &mut found);
    found
}

fn collect<'a>(node: &'a Node, class_name: &str, found: &mut Vec<&'a Node>) {
    if node.has_class(class_name) {
        found.push(node);
    }
    for child in node.children() {
        collect(child, class_name, found);
    }
}
