//! Indented text rendering of a markup tree, for debugging.
//!
//! Each level of depth is one tab. An element prints its tag name, a `^`
//! underline when it was recovered from a stray closing tag, then one line
//! per attribute in the form `{ name: [a, b] }`.

use std::fmt::{self, Write};

use crate::{Attribute, Document, Node};

/// Render `node` and its subtree into `out`, starting at `depth`.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn write_tree(out: &mut impl Write, node: &Node, depth: usize) -> fmt::Result {
    let indent = "\t".repeat(depth);
    match node {
        Node::Text { content } => {
            let display = content.replace('\n', "\\n");
            writeln!(out, "{indent}\"{display}\"")?;
        }
        Node::Comment => writeln!(out, "{indent}{}", node.tag_name())?,
        Node::Element(_) | Node::Illegal(_) => {
            let tag_name = node.tag_name();
            writeln!(out, "{indent}{tag_name}")?;
            if node.is_illegal() {
                writeln!(out, "{indent}{}", "^".repeat(tag_name.chars().count()))?;
            }
            for attr in node.attributes() {
                writeln!(out, "{indent}\t{}", format_attribute(attr))?;
            }
        }
    }
    for child in node.children() {
        write_tree(out, child, depth + 1)?;
    }
    Ok(())
}

fn format_attribute(attr: &Attribute) -> String {
    match &attr.value {
        Some(values) => format!("{{ {}: [{}] }}", attr.name, values.join(", ")),
        None => format!("{{ {} }}", attr.name),
    }
}

/// Print a tree to stdout.
pub fn print_tree(node: &Node, depth: usize) {
    let mut out = String::new();
    // Writing into a String cannot fail.
    if write_tree(&mut out, node, depth).is_ok() {
        print!("{out}");
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write_tree(f, node, 0)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self, 0)
    }
}
