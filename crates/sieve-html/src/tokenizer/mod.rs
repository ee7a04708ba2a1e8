//! Markup lexer.
//!
//! A single-pass, pull-based scanner: the parser asks for one token at a time
//! and the lexer keeps only a cursor and a few mode flags.

/// Pure lookahead helpers and cursor movement.
pub mod helpers;
/// The lexer state machine.
pub mod lexer;
/// Token types produced by the lexer.
pub mod token;

pub use lexer::Lexer;
pub use token::{Position, Token, TokenKind};

use crate::error::LexError;

/// Lex the whole input, up to and including the first end-of-input token.
///
/// # Errors
///
/// Returns the first [`LexError`] encountered.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        tokens.push(token);
        if token.is_eof() {
            return Ok(tokens);
        }
    }
}
