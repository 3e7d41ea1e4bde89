//! mixcss Lexer
//!
//! Tokenizes stylesheet source into a stream of raw-text tokens.
//! Handles whitespace and comments as tokens, string literals, `@` words,
//! punctuation, and the grouping of simple `( ... )` spans into a single
//! `Brackets` token.
//!
//! # Example
//!
//! ```
//! use mixcss_lexer::{Scanner, TokenKind};
//!
//! let tokens = Scanner::tokenize("left(10);").unwrap();
//! assert_eq!(tokens[1].kind, TokenKind::Brackets("(10)".into()));
//! ```

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{join_text, Span, Token, TokenKind};

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Lexer error at line {line}, column {column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
