//! Helper functions for the lexer.
//!
//! Lookahead here never writes back to the lexer: every decision that needs
//! to peek past the current character is made by scanning an immutable slice
//! of the remaining input.

use super::lexer::Lexer;
use super::token::Position;

/// Raw-text elements; their content is scanned verbatim up to the exact
/// matching closing tag.
pub const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Whether `c` may appear in a tag name, attribute name, or unquoted value.
///
/// `%` is allowed so that `width=100%` lexes as a single value.
#[must_use]
pub const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '%')
}

/// Whether `rest` (the input just after an opening quote) contains the same
/// quote before the next `>`.
#[must_use]
pub fn has_closing_quote(rest: &str, quote: char) -> bool {
    for c in rest.chars() {
        if c == '>' {
            return false;
        }
        if c == quote {
            return true;
        }
    }
    false
}

/// Whether `rest` starts with `</script` or `</style` immediately followed by
/// `>` or whitespace.
#[must_use]
pub fn is_raw_text_end(rest: &str) -> bool {
    let Some(after_slash) = rest.strip_prefix("</") else {
        return false;
    };
    RAW_TEXT_ELEMENTS.iter().any(|name| {
        after_slash
            .strip_prefix(name)
            .and_then(|tail| tail.chars().next())
            .is_some_and(|c| c == '>' || c.is_whitespace())
    })
}

/// Whether `rest` (starting at a `/`) is a self-closing `/>`, allowing
/// whitespace between the two characters.
#[must_use]
pub fn is_self_close(rest: &str) -> bool {
    rest.strip_prefix('/')
        .is_some_and(|tail| tail.trim_start().starts_with('>'))
}

/// Render a character for an error message.
pub(super) fn describe(c: Option<char>) -> String {
    c.map_or_else(|| String::from("EOF"), String::from)
}

// =============================================================================
// Cursor Helpers
// =============================================================================

impl<'a> Lexer<'a> {
    /// Advance to the next character, keeping line and column in step.
    ///
    /// `\n` ends a line, and so does a `\r` that is not part of `\r\n`.
    pub(super) fn read_char(&mut self) {
        if let Some(previous) = self.current {
            let ends_line =
                previous == '\n' || (previous == '\r' && self.peek_char() != Some('\n'));
            if ends_line {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = self.read_offset;
        self.current = self.input[self.read_offset..].chars().next();
        if let Some(c) = self.current {
            self.read_offset += c.len_utf8();
        }
    }

    /// The character after the current one, without consuming anything.
    pub(super) fn peek_char(&self) -> Option<char> {
        self.input[self.read_offset..].chars().next()
    }

    /// The input from the current character on.
    pub(super) fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    pub(super) fn skip_whitespace(&mut self) {
        while self.current.is_some_and(char::is_whitespace) {
            self.read_char();
        }
    }

    /// Consume through the next `>` (or to end of input).
    pub(super) fn skip_past_tag_close(&mut self) {
        while self.current.is_some_and(|c| c != '>') {
            self.read_char();
        }
        self.read_char();
    }

    /// Position of the current character.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }

    pub(super) fn at_raw_text_end(&self) -> bool {
        is_raw_text_end(self.rest())
    }
}
