use super::helpers::{
    RAW_TEXT_ELEMENTS, describe, has_closing_quote, is_identifier_char, is_self_close,
};
use super::token::{Position, Token, TokenKind};
use crate::error::{LexError, LexErrorKind};

/// Pull-based markup lexer.
///
/// Each call to [`Lexer::next_token`] produces exactly one token. The lexer
/// only moves forward; decisions that need to see past the current character
/// are made on an immutable view of the remaining input.
///
/// Leading whitespace is skipped before every token, so whitespace-only text
/// between tags never produces a text token.
pub struct Lexer<'a> {
    pub(super) input: &'a str,
    /// Byte offset of `current`.
    pub(super) offset: usize,
    /// Byte offset just past `current`.
    pub(super) read_offset: usize,
    pub(super) current: Option<char>,
    pub(super) line: usize,
    pub(super) column: usize,

    /// Between `<`/`</` and the matching `>` or `/>`.
    pub(super) inside_tag: bool,
    /// The next identifier is an opening tag's name.
    pub(super) lexing_tag_name: bool,
    /// Inside `</name ...>`; the name must be followed by `>`.
    pub(super) lexing_closing_tag_name: bool,
    /// Inside the content of a `<script>` or `<style>` element.
    pub(super) inside_raw_text: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned on the first character of `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input,
            offset: 0,
            read_offset: 0,
            current: None,
            line: 1,
            column: 1,
            inside_tag: false,
            lexing_tag_name: false,
            lexing_closing_tag_name: false,
            inside_raw_text: false,
        };
        lexer.read_char();
        lexer
    }

    /// Produce the next token.
    ///
    /// Once the input is exhausted this keeps returning [`TokenKind::Eof`].
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for a stray `/`, an empty identifier inside a
    /// tag, or a closing-tag name not followed by `>`. Lexing errors are not
    /// recoverable.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        self.skip_whitespace();
        let start = self.position();

        // Script and style content is text up to the exact closing tag, even
        // when it starts with `<`, `/`, or a quote.
        if self.inside_raw_text
            && !self.inside_tag
            && self.current.is_some()
            && !self.at_raw_text_end()
        {
            return Ok(Token::new(TokenKind::TextNode, self.read_text_node(), start));
        }

        let Some(c) = self.current else {
            return Ok(Token::eof(start));
        };

        match c {
            '<' => Ok(self.lex_tag_open(start)),
            '>' => {
                self.inside_tag = false;
                self.lexing_tag_name = false;
                self.lexing_closing_tag_name = false;
                self.read_char();
                Ok(Token::new(TokenKind::TagClose, ">", start))
            }
            '/' => self.lex_slash(start),
            '"' | '\'' => Ok(self.lex_quoted(c, start)),
            '=' => {
                self.read_char();
                Ok(Token::new(TokenKind::Bind, "=", start))
            }
            _ if self.inside_tag => self.lex_identifier(start),
            _ => Ok(Token::new(TokenKind::TextNode, self.read_text_node(), start)),
        }
    }

    /// `<`, `</`, or `<!...>`.
    fn lex_tag_open(&mut self, start: Position) -> Token<'a> {
        match self.peek_char() {
            Some('/') => {
                self.read_char();
                self.read_char();
                self.inside_tag = true;
                self.lexing_closing_tag_name = true;
                Token::new(TokenKind::EndTagStart, "</", start)
            }
            Some('!') => {
                // Doctype or comment; both end at the first `>`.
                self.skip_past_tag_close();
                Token::new(TokenKind::Comment, "<!--", start)
            }
            _ => {
                self.read_char();
                self.inside_tag = true;
                self.lexing_tag_name = true;
                Token::new(TokenKind::TagStart, "<", start)
            }
        }
    }

    /// `/>` inside a tag; any other `/` outside raw text is fatal.
    fn lex_slash(&mut self, start: Position) -> Result<Token<'a>, LexError> {
        if !self.inside_tag || !is_self_close(self.rest()) {
            return Err(LexError::new(start, LexErrorKind::UnexpectedSlash));
        }
        self.read_char(); // skip '/'
        self.skip_whitespace();
        self.read_char(); // skip '>'
        self.inside_tag = false;
        self.lexing_tag_name = false;
        self.lexing_closing_tag_name = false;
        // <script src="..." /> has no content to scan.
        self.inside_raw_text = false;
        Ok(Token::new(TokenKind::SelfClose, "/>", start))
    }

    /// A quoted attribute value, or an illegal quote when no matching quote
    /// appears before the next `>`.
    fn lex_quoted(&mut self, quote: char, start: Position) -> Token<'a> {
        let quote_literal = &self.input[self.offset..self.read_offset];
        if !has_closing_quote(&self.input[self.read_offset..], quote) {
            self.read_char();
            return Token::new(TokenKind::Illegal, quote_literal, start);
        }

        self.read_char(); // skip opening quote
        let begin = self.offset;
        while self.current.is_some_and(|c| c != quote) {
            self.read_char();
        }
        let literal = &self.input[begin..self.offset];
        self.read_char(); // skip closing quote
        Token::new(TokenKind::QuotedString, literal, start)
    }

    /// Tag name, attribute name, or unquoted attribute value.
    fn lex_identifier(&mut self, start: Position) -> Result<Token<'a>, LexError> {
        let literal = self.read_identifier()?;
        if self.lexing_tag_name {
            self.inside_raw_text = RAW_TEXT_ELEMENTS.contains(&literal);
            self.lexing_tag_name = false;
        }
        self.skip_whitespace();

        if self.lexing_closing_tag_name {
            self.inside_raw_text = false;
            if self.current != Some('>') {
                return Err(LexError::new(
                    self.position(),
                    LexErrorKind::UnterminatedEndTag {
                        found: describe(self.current),
                    },
                ));
            }
        }
        Ok(Token::new(TokenKind::Identifier, literal, start))
    }

    fn read_identifier(&mut self) -> Result<&'a str, LexError> {
        let begin = self.offset;
        while self.current.is_some_and(is_identifier_char) {
            self.read_char();
        }
        if self.offset == begin {
            return Err(LexError::new(
                self.position(),
                LexErrorKind::EmptyIdentifier {
                    found: describe(self.current),
                },
            ));
        }
        Ok(&self.input[begin..self.offset])
    }

    /// Text up to the next `<`. Inside raw text, `<` does not stop the scan;
    /// only the exact closing `</script` or `</style` does.
    fn read_text_node(&mut self) -> &'a str {
        let begin = self.offset;
        while let Some(c) = self.current {
            let stop = if self.inside_raw_text {
                self.at_raw_text_end()
            } else {
                c == '<'
            };
            if stop {
                break;
            }
            self.read_char();
        }
        &self.input[begin..self.offset]
    }
}
