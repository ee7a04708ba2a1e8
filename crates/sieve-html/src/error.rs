//! Fatal lexing and parsing errors.
//!
//! Every error aborts the whole parse; there is no partial document. The two
//! recoveries the parser does perform (stray closing tags and malformed
//! trailing attribute content) are not errors and never show up here.

use std::fmt;

use thiserror::Error;

use crate::tokenizer::{Position, Token, TokenKind};

/// Any failure of a parse run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed character-level input.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// Malformed tag structure.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A character-level failure, reported at the offending character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[line: {line}, column: {column}, position: {offset}]{kind}")]
pub struct LexError {
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
    /// Byte offset.
    pub offset: usize,
    /// What went wrong.
    pub kind: LexErrorKind,
}

impl LexError {
    pub(crate) const fn new(position: Position, kind: LexErrorKind) -> Self {
        Self {
            line: position.line,
            column: position.column,
            offset: position.offset,
            kind,
        }
    }
}

/// Kinds of lexical failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A `/` outside raw-text content that does not close a tag.
    #[error("unexpected /")]
    UnexpectedSlash,
    /// An identifier was required but no identifier character was found.
    #[error("unexpected identifier: '{found}'.")]
    EmptyIdentifier {
        /// The character found instead (`EOF` at end of input).
        found: String,
    },
    /// A closing tag name was followed by something other than `>`.
    #[error("lexing tag ending: expected >, got {found}")]
    UnterminatedEndTag {
        /// The character found instead (`EOF` at end of input).
        found: String,
    },
}

/// A structural failure, reported at the line of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[line:{line}]: {kind}")]
pub struct ParseError {
    /// 1-based line of the offending token.
    pub line: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

/// Kinds of structural failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A token that cannot start a node appeared in node position.
    #[error("expected COMMENT or TAG_START, got {0}")]
    UnexpectedToken(FoundToken),
    /// An element's start tag was not closed by `>`.
    #[error("expected TAG_CLOSE, got {0}")]
    ExpectedTagClose(FoundToken),
    /// Input ended while an element was still open.
    #[error("expected TAG_END, got {0}")]
    ExpectedClosingTag(FoundToken),
    /// A closing tag named an enclosing element instead of the current one.
    #[error("expected ending for tag '{expected}', got {found}")]
    MismatchedEndTag {
        /// Name of the element being closed.
        expected: String,
        /// Name found in the closing tag.
        found: String,
    },
    /// `=` was not followed by a quoted string or an identifier.
    #[error("expected STRING or IDENTIFIER, got {0}")]
    ExpectedAttributeValue(FoundToken),
    /// `<` or `</` was not followed by a tag name.
    #[error("expected IDENTIFIER, got {0}")]
    ExpectedTagName(FoundToken),
    /// A forward skip ran off the end of the input.
    #[error("unexpected end of input while {0}")]
    UnexpectedEof(String),
}

/// The offending token of a parse error, rendered as `KIND(literal)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundToken {
    /// Kind of the offending token.
    pub kind: TokenKind,
    /// Its literal text.
    pub literal: String,
}

impl From<&Token<'_>> for FoundToken {
    fn from(token: &Token<'_>) -> Self {
        Self {
            kind: token.kind,
            literal: token.literal.to_owned(),
        }
    }
}

impl fmt::Display for FoundToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.literal)
    }
}
