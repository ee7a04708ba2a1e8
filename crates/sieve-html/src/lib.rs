//! Markup lexer and tree builder for the Sieve scraper.
//!
//! # Scope
//!
//! This crate implements:
//! - **Lexer** ([`tokenizer::Lexer`])
//!   - Tag, attribute, quoted-string, and text tokens with line/column/offset
//!   - Raw-text handling for `<script>` and `<style>` content
//!   - Unterminated quotes emitted as illegal tokens instead of strings
//!
//! - **Parser** ([`parser::Parser`])
//!   - Recursive descent over a two-token window
//!   - Void elements, self-closing tags, stray closing tags recovered as
//!     illegal nodes
//!   - Caller-configured subtree suppression ([`parser::ParserConfig`])
//!
//! # Not Implemented
//!
//! - Character references (`&amp;` and friends are kept verbatim)
//! - Implicit end tags (`<p>` and `<li>` must be closed explicitly)
//! - Namespaces, foreign content, and any WHATWG insertion-mode logic
//!
//! Every failure is fatal: a parse yields either a complete
//! [`sieve_dom::Document`] or a single [`Error`].

/// Lexing and parsing errors.
pub mod error;
/// Tree construction.
pub mod parser;
/// Markup lexer.
pub mod tokenizer;

pub use error::{Error, LexError, ParseError};
pub use parser::{Parser, ParserConfig, SuppressionAction, SuppressionRule};
pub use tokenizer::{Lexer, Token, TokenKind};

use sieve_dom::Document;

/// Parse `input` with no suppression rules.
///
/// # Errors
///
/// Returns the first lexing or parsing error.
pub fn parse(input: &str) -> Result<Document, Error> {
    parse_with_config(input, ParserConfig::default())
}

/// Parse `input`, applying `config`'s suppression rules.
///
/// # Errors
///
/// Returns the first lexing or parsing error.
pub fn parse_with_config(input: &str, config: ParserConfig) -> Result<Document, Error> {
    Parser::with_config(Lexer::new(input), config).parse_document()
}
