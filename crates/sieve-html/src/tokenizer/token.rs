use strum_macros::Display;

/// Where a token (or a lexical error) starts in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// Byte offset from the start of the input.
    pub offset: usize,
}

/// The closed set of token kinds.
///
/// The `Display` form of each kind is the name used in error messages, e.g.
/// `expected TAG_CLOSE, got TAG_START(<)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// A quote with no matching quote before the next `>`.
    Illegal,
    /// End of input. Repeats forever once reached.
    Eof,
    /// `<!...>`: a comment or a doctype, not told apart.
    Comment,
    /// Tag name, attribute name, or unquoted attribute value.
    Identifier,
    /// Content between a matching pair of quotes.
    #[strum(serialize = "STRING")]
    QuotedString,
    /// Text between tags, or the whole content of a raw-text element.
    TextNode,
    /// `<`
    TagStart,
    /// `/>`
    #[strum(serialize = "SINGLE_TAG_END")]
    SelfClose,
    /// `>`
    TagClose,
    /// `</`
    #[strum(serialize = "TAG_END")]
    EndTagStart,
    /// `=`
    Bind,
}

/// One lexed token.
///
/// The literal borrows from the input; tokens are consumed by the parser and
/// never stored in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The token's text.
    pub literal: &'a str,
    /// Position of the token's first character.
    pub position: Position,
}

impl<'a> Token<'a> {
    /// Create a token.
    #[must_use]
    pub const fn new(kind: TokenKind, literal: &'a str, position: Position) -> Self {
        Self {
            kind,
            literal,
            position,
        }
    }

    /// Create an end-of-input token.
    #[must_use]
    pub const fn eof(position: Position) -> Self {
        Self::new(TokenKind::Eof, "", position)
    }

    /// Returns true if this is an end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
