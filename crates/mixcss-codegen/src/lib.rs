//! mixcss Code Generator
//!
//! Renders a stylesheet AST back to CSS text.
//!
//! ```text
//! Stylesheet AST → stringify() → String
//! ```
//!
//! Output is canonical: two-space indentation, one statement per line and a
//! blank line between top-level statements. Re-parsing the output of a sheet
//! without mixin calls gives back the same tree.

pub mod css;

pub use css::stringify;
