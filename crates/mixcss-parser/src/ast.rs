//! Abstract Syntax Tree for mixcss stylesheets.
//!
//! Plain CSS statements (rules, at-rules, declarations, comments) plus the
//! `Mixin` statement: an unexpanded `name(args);` call that the evaluator
//! replaces with the nodes it expands to.

use indexmap::IndexMap;

/// A complete stylesheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

/// A statement in a stylesheet or block.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `selector { ... }`
    Rule(Rule),

    /// `@name params;` or `@name params { ... }`
    AtRule(AtRule),

    /// `prop: value;`
    Declaration(Declaration),

    /// `/* text */`
    Comment(Comment),

    /// `name(args);`
    Mixin(MixinCall),
}

impl Node {
    pub fn source(&self) -> Source {
        match self {
            Node::Rule(n) => n.source,
            Node::AtRule(n) => n.source,
            Node::Declaration(n) => n.source,
            Node::Comment(n) => n.source,
            Node::Mixin(n) => n.source,
        }
    }
}

/// Line and column (1-based) of a token in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Where a node starts and ends in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Source {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: String,
    pub nodes: Vec<Node>,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// Name without the leading `@`.
    pub name: String,
    pub params: String,
    /// `None` for statement at-rules such as `@import`.
    pub nodes: Option<Vec<Node>>,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
    pub source: Source,
}

/// An unexpanded mixin call.
///
/// When the call used `key: value` syntax, `arguments` holds exactly one
/// `Argument::Map`.
#[derive(Debug, Clone, PartialEq)]
pub struct MixinCall {
    /// Possibly dotted name, e.g. `grid.row`.
    pub name: String,
    pub arguments: Vec<Argument>,
    pub raws: MixinRaws,
    pub source: Source,
}

/// Raw source text around a mixin call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MixinRaws {
    /// Whitespace and comments consumed ahead of the name.
    pub before: String,
    /// The argument tokens exactly as written.
    pub arguments: String,
}

/// A parsed mixin argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// A single value: `20`, `#fff`, `url('x.png')`, `'Open Sans'`.
    Text(String),

    /// A list literal: `[a, b, c]`.
    List(Vec<Argument>),

    /// Keyed arguments: `(top: 1, left: 2)`. A key written without a value
    /// maps to an empty `Text`.
    Map(IndexMap<String, Argument>),
}

impl Argument {
    pub fn text(value: impl Into<String>) -> Self {
        Argument::Text(value.into())
    }
}

impl std::fmt::Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Argument::Text(s) => f.write_str(s),
            Argument::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Argument::Map(entries) => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                Ok(())
            }
        }
    }
}
