//! mixcss Evaluator
//!
//! Expands mixin calls in a parsed stylesheet. Mixins are looked up by
//! (possibly dotted) name in a [`Registry`], called with normalized
//! arguments, and replaced in place by the declarations and rules they
//! return.
//!
//! # Example
//!
//! ```
//! use mixcss_eval::{builtins, Processor, Theme};
//! use mixcss_parser::ast::Node;
//!
//! let processor = Processor::new(builtins::registry(Theme::default()));
//! let processed = processor.process(".a { left(10); }").unwrap();
//!
//! let Node::Rule(rule) = &processed.stylesheet.nodes[0] else { panic!() };
//! let Node::Declaration(decl) = &rule.nodes[0] else { panic!() };
//! assert_eq!((decl.prop.as_str(), decl.value.as_str()), ("left", "10rem"));
//! assert!(processed.warnings.is_empty());
//! ```

pub mod builtins;
pub mod expand;
pub mod model;
pub mod registry;
pub mod units;
pub mod value;

pub use builtins::Theme;
pub use expand::{Evaluation, Evaluator};
pub use model::{Declaration, MixinOutput, OutputNode, Rule};
pub use registry::{Entry, Mixin, MixinResult, Registry, Scope};
pub use units::Units;
pub use value::{Args, Value};

use mixcss_parser::ast::{MixinCall, Stylesheet};
use mixcss_parser::{ParseError, Parser};
use std::fmt;

/// Error raised by a mixin while it runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MixinError {
    #[error("Mixin '{name}' not found")]
    NotFound { name: String },

    #[error("Invalid argument for '{mixin}': {message}")]
    InvalidArgument { mixin: String, message: String },

    #[error("{0}")]
    Message(String),
}

/// Fatal error for a processing run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Mixin error at line {line}, column {column} in '{name}': {source}")]
    Mixin {
        name: String,
        line: usize,
        column: usize,
        source: MixinError,
    },
}

/// A non-fatal problem found while expanding, such as an unknown mixin.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Warning {
    pub message: String,
    /// Name of the mixin call as written.
    pub mixin: String,
    pub line: usize,
    pub column: usize,
}

impl Warning {
    pub fn for_call(message: impl Into<String>, call: &MixinCall) -> Self {
        Self {
            message: message.into(),
            mixin: call.name.clone(),
            line: call.source.start.line,
            column: call.source.start.column,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} ({})",
            self.line, self.column, self.message, self.mixin
        )
    }
}

/// A parsed and expanded stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    pub stylesheet: Stylesheet,
    pub warnings: Vec<Warning>,
}

/// A mixin registry paired with the units for a run.
#[derive(Debug)]
pub struct Processor {
    registry: Registry,
    units: Units,
}

impl Processor {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            units: Units::default(),
        }
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    /// Expand every mixin call in `sheet` in place.
    pub fn expand(&self, sheet: &mut Stylesheet) -> Result<Vec<Warning>, ProcessError> {
        let evaluator = Evaluator::new(&self.registry, &self.units);
        expand::expand(sheet, &evaluator)
    }

    /// Parse `source` and expand it.
    pub fn process(&self, source: &str) -> Result<Processed, ProcessError> {
        let mut stylesheet = Parser::parse(source)?;
        let warnings = self.expand(&mut stylesheet)?;
        Ok(Processed {
            stylesheet,
            warnings,
        })
    }
}

impl Default for Processor {
    /// A processor with the built-in catalog and default units.
    fn default() -> Self {
        Self::new(builtins::registry(Theme::default()))
    }
}
