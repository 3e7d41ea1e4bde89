//! mixcss Parser
//!
//! Parses a token stream into a stylesheet Abstract Syntax Tree.
//! Plain CSS statements are parsed as opaque selectors, params and values;
//! mixin calls (`name(args);`) become `Node::Mixin` with their arguments
//! already split by the argument parser.

pub mod arguments;
pub mod ast;
pub mod parser;

pub use arguments::parse_arguments;
pub use ast::{Argument, MixinCall, Node, Stylesheet};
pub use parser::Parser;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
