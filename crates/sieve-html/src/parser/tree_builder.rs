use sieve_common::warning::warn_once;
use sieve_dom::{Attribute, Document, Node};

use super::suppression::{ParserConfig, RuleState, SuppressionAction};
use crate::error::{Error, FoundToken, ParseError, ParseErrorKind};
use crate::tokenizer::{Lexer, Token, TokenKind};

/// Elements that may be written as a bare start tag with no closing tag.
pub const VOID_ELEMENTS: [&str; 15] = [
    "img", "input", "hr", "area", "link", "br", "meta", "base", "col", "embed", "keygen", "param",
    "source", "track", "wbr",
];

/// Whether `tag_name` is one of [`VOID_ELEMENTS`]. Case-sensitive.
#[must_use]
pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

/// Recursive-descent tree builder.
///
/// Reads the lexer's output through a two-token window: `current` is the
/// token being examined and `peek` the one after it. Both advance together.
///
/// ```text
/// Document := Node*
/// Node     := Comment | Text | Element | StrayClose
/// Element  := '<' Name Attribute* ('/>' | '>' Node* '</' Name '>')
/// ```
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token<'a>,
    peek: Token<'a>,

    /// Suppression rules with their per-parse counters.
    rules: Vec<RuleState>,

    /// Names of the elements whose children are being parsed, outermost
    /// first.
    open_elements: Vec<&'a str>,

    /// Index into `open_elements` of an element whose closing tag a
    /// structural skip has already consumed. Everything nested inside it
    /// ends where it stands.
    unwind_to: Option<usize>,
}

impl<'a> Parser<'a> {
    /// Create a parser with no suppression rules.
    #[must_use]
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self::with_config(lexer, ParserConfig::default())
    }

    /// Create a parser that applies `config`'s suppression rules.
    #[must_use]
    pub fn with_config(lexer: Lexer<'a>, config: ParserConfig) -> Self {
        let start = Token::eof(lexer.position());
        Self {
            lexer,
            current: start,
            peek: start,
            rules: config.rules.into_iter().map(RuleState::new).collect(),
            open_elements: Vec::new(),
            unwind_to: None,
        }
    }

    /// Parse the whole input.
    ///
    /// # Errors
    ///
    /// Returns the first lexing or parsing error. No partial document is
    /// produced.
    pub fn parse_document(mut self) -> Result<Document, Error> {
        self.advance()?;
        self.advance()?;

        let mut document = Document::new();
        while !self.current.is_eof() {
            document.nodes.push(self.parse_node()?);
        }
        Ok(document)
    }

    fn advance(&mut self) -> Result<(), Error> {
        let next = self.lexer.next_token()?;
        self.current = self.peek;
        self.peek = next;
        Ok(())
    }

    fn error(&self, kind: ParseErrorKind) -> Error {
        ParseError {
            line: self.current.position.line,
            kind,
        }
        .into()
    }

    /// Error reporting the current token as the offending one.
    fn unexpected(&self, kind: fn(FoundToken) -> ParseErrorKind) -> Error {
        self.error(kind(FoundToken::from(&self.current)))
    }

    fn parse_node(&mut self) -> Result<Node, Error> {
        match self.current.kind {
            TokenKind::Comment => {
                self.advance()?;
                Ok(Node::Comment)
            }
            TokenKind::TextNode => {
                let node = Node::text(self.current.literal);
                self.advance()?;
                Ok(node)
            }
            TokenKind::EndTagStart => self.parse_stray_close(),
            TokenKind::TagStart => self.parse_element(),
            _ => Err(self.unexpected(ParseErrorKind::UnexpectedToken)),
        }
    }

    /// `</name>` where a node was expected. Recovered as an illegal node.
    fn parse_stray_close(&mut self) -> Result<Node, Error> {
        let name = self.consume_end_tag()?;
        warn_once("Parser", &format!("recovered stray closing tag </{name}>"));
        Ok(Node::illegal(name))
    }

    fn parse_element(&mut self) -> Result<Node, Error> {
        self.advance()?; // skip '<'
        if self.current.kind != TokenKind::Identifier {
            return Err(self.unexpected(ParseErrorKind::ExpectedTagName));
        }
        let tag_name = self.current.literal;
        self.advance()?;
        let attributes = self.parse_attributes(tag_name)?;

        if let Some(action) = self.fired_action(&attributes) {
            self.suppress(tag_name, &action)?;
            return Ok(Node::element(tag_name, attributes, Vec::new()));
        }

        if self.at_childless_end(tag_name) {
            self.advance()?;
            return Ok(Node::element(tag_name, attributes, Vec::new()));
        }

        self.expect_tag_close()?;
        let (children, closed) = self.parse_children(tag_name)?;
        if !closed {
            let _ = self.consume_end_tag()?;
        }
        Ok(Node::element(tag_name, attributes, children))
    }

    /// Children of `tag_name`, up to but not including its closing tag.
    ///
    /// The flag is true when a structural skip already consumed the closing
    /// tag of this element or of one of its ancestors.
    fn parse_children(&mut self, tag_name: &'a str) -> Result<(Vec<Node>, bool), Error> {
        let index = self.open_elements.len();
        self.open_elements.push(tag_name);
        let mut children = Vec::new();
        let closed = loop {
            if let Some(target) = self.unwind_to {
                if target == index {
                    self.unwind_to = None;
                }
                break true;
            }
            match self.current.kind {
                _ if self.at_end_tag(tag_name) => break false,
                TokenKind::EndTagStart if self.open_elements.contains(&self.peek.literal) => {
                    return Err(self.error(ParseErrorKind::MismatchedEndTag {
                        expected: tag_name.to_owned(),
                        found: self.peek.literal.to_owned(),
                    }));
                }
                TokenKind::Eof => {
                    return Err(self.unexpected(ParseErrorKind::ExpectedClosingTag));
                }
                _ => children.push(self.parse_node()?),
            }
        };
        self.open_elements.truncate(index);
        Ok((children, closed))
    }

    /// `Name ('=' (String | Name))?` repeated.
    ///
    /// A string or illegal token straight after a value means the quoting is
    /// broken beyond repair; everything up to the next `/>` is dropped and the
    /// attributes read so far are kept.
    fn parse_attributes(&mut self, tag_name: &str) -> Result<Vec<Attribute>, Error> {
        let mut attributes = Vec::new();
        while matches!(
            self.current.kind,
            TokenKind::Identifier | TokenKind::QuotedString | TokenKind::Illegal
        ) {
            let name = self.current.literal;
            self.advance()?;
            if self.current.kind != TokenKind::Bind {
                attributes.push(Attribute::valueless(name));
                continue;
            }

            self.advance()?; // skip '='
            if !matches!(
                self.current.kind,
                TokenKind::QuotedString | TokenKind::Identifier
            ) {
                return Err(self.unexpected(ParseErrorKind::ExpectedAttributeValue));
            }
            attributes.push(Attribute::with_raw_value(name, self.current.literal));
            self.advance()?;

            if matches!(
                self.current.kind,
                TokenKind::QuotedString | TokenKind::Illegal
            ) {
                self.skip_to_self_close()?;
                warn_once(
                    "Parser",
                    &format!("dropped malformed attribute content in <{tag_name}>"),
                );
                break;
            }
        }
        Ok(attributes)
    }

    fn skip_to_self_close(&mut self) -> Result<(), Error> {
        while self.current.kind != TokenKind::SelfClose {
            if self.current.is_eof() {
                return Err(self.error(ParseErrorKind::UnexpectedEof(
                    "recovering malformed attributes".to_owned(),
                )));
            }
            self.advance()?;
        }
        Ok(())
    }

    /// The action of the first rule that matches `attributes` and fires.
    fn fired_action(&mut self, attributes: &[Attribute]) -> Option<SuppressionAction> {
        for state in &mut self.rules {
            if state.rule.matches(attributes) && state.fires() {
                return Some(state.rule.action.clone());
            }
        }
        None
    }

    fn suppress(&mut self, tag_name: &str, action: &SuppressionAction) -> Result<(), Error> {
        match action {
            SuppressionAction::SkipTo { anchor } => {
                // A childless element has no closer of its own to skip to.
                let childless = self.at_childless_end(tag_name);
                self.discard_until_close(anchor, || format!("skipping to </{anchor}>"))?;
                let _ = self.consume_end_tag()?;
                if childless || anchor != tag_name {
                    // The closer may have belonged to an enclosing element.
                    self.unwind_to = self
                        .open_elements
                        .iter()
                        .rposition(|name| *name == anchor.as_str());
                }
                warn_once("Parser", &format!("skipped <{tag_name}> up to </{anchor}>"));
            }
            SuppressionAction::Collapse => {
                // Only the end of the start tag goes; the content that
                // follows is parsed as siblings.
                self.advance()?;
                warn_once("Parser", &format!("collapsed repeated <{tag_name}>"));
            }
        }
        Ok(())
    }

    /// Drop tokens until `current` is the `</` of the first `</name>` that
    /// does not close a `name` element opened during the scan.
    fn discard_until_close(
        &mut self,
        name: &str,
        context: impl Fn() -> String,
    ) -> Result<(), Error> {
        let mut depth = 0_usize;
        // Inside the start tag of a nested `name` element.
        let mut in_nested_start = false;
        loop {
            match self.current.kind {
                TokenKind::Eof => {
                    return Err(self.error(ParseErrorKind::UnexpectedEof(context())));
                }
                _ if self.at_end_tag(name) => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                TokenKind::TagStart if self.peek.literal == name => {
                    depth += 1;
                    in_nested_start = true;
                }
                TokenKind::SelfClose if in_nested_start => {
                    depth -= 1;
                    in_nested_start = false;
                }
                TokenKind::TagClose => in_nested_start = false,
                _ => {}
            }
            self.advance()?;
        }
    }

    /// `current` is the `</` of a `</name>`.
    fn at_end_tag(&self, name: &str) -> bool {
        self.current.kind == TokenKind::EndTagStart && self.peek.literal == name
    }

    /// The start tag of `tag_name` ends here and no children follow: `/>`, or
    /// a plain `>` after a void element.
    fn at_childless_end(&self, tag_name: &str) -> bool {
        match self.current.kind {
            TokenKind::SelfClose => true,
            TokenKind::TagClose => is_void_element(tag_name),
            _ => false,
        }
    }

    fn expect_tag_close(&mut self) -> Result<(), Error> {
        if self.current.kind != TokenKind::TagClose {
            return Err(self.unexpected(ParseErrorKind::ExpectedTagClose));
        }
        self.advance()
    }

    /// Consume `</ name >` and return the name.
    fn consume_end_tag(&mut self) -> Result<&'a str, Error> {
        self.advance()?; // skip '</'
        if self.current.kind != TokenKind::Identifier {
            return Err(self.unexpected(ParseErrorKind::ExpectedTagName));
        }
        let name = self.current.literal;
        self.advance()?;
        self.expect_tag_close()?;
        Ok(name)
    }
}
