//! Normalized mixin argument values.

use crate::units::is_number;
use indexmap::IndexMap;
use mixcss_parser::Argument;
use std::fmt;

/// A mixin argument after normalization.
///
/// Numeric text becomes `Number`, empty text becomes `Undefined`, and lists
/// and maps are normalized element by element.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Number(f64),
    Str(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    pub fn from_argument(argument: &Argument) -> Self {
        match argument {
            Argument::Text(text) if text.is_empty() => Value::Undefined,
            Argument::Text(text) if is_number(text) => {
                text.parse().map(Value::Number).unwrap_or_else(|_| Value::Str(text.clone()))
            }
            Argument::Text(text) => Value::Str(text.clone()),
            Argument::List(items) => Value::List(items.iter().map(Value::from_argument).collect()),
            Argument::Map(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::from_argument(value)))
                    .collect(),
            ),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// False for `Undefined`, `0`, `NaN` and the empty string.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined => false,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric value of a `Number` or of numeric text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Str(s) if is_number(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// `self` if truthy, otherwise `fallback`.
    pub fn or(&self, fallback: impl Into<Value>) -> Value {
        if self.is_truthy() {
            self.clone()
        } else {
            fallback.into()
        }
    }
}

pub(crate) fn format_number(n: f64) -> String {
    if n == 0.0 {
        // avoids "-0"
        return "0".into();
    }
    format!("{n}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => Ok(()),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Map(entries) => {
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

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

/// Positional arguments handed to a mixin.
///
/// Reading past the end yields `Undefined`, so mixins can treat optional
/// arguments uniformly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Args(Vec<Value>);

static UNDEFINED: Value = Value::Undefined;

impl Args {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn from_arguments(arguments: &[Argument]) -> Self {
        arguments.iter().map(Value::from_argument).collect()
    }

    pub fn get(&self, index: usize) -> &Value {
        self.0.get(index).unwrap_or(&UNDEFINED)
    }

    /// Argument `index` if truthy, otherwise `fallback`.
    pub fn or(&self, index: usize, fallback: impl Into<Value>) -> Value {
        self.get(index).or(fallback)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no arguments were given, or the first is `Undefined`.
    pub fn is_empty(&self) -> bool {
        self.get(0).is_undefined()
    }

    /// The entries of a keyed call.
    pub fn map(&self) -> Option<&IndexMap<String, Value>> {
        self.get(0).as_map()
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// The arguments after the first `n`.
    pub fn skip(&self, n: usize) -> Args {
        self.0.iter().skip(n).cloned().collect()
    }

    /// All arguments as one list value.
    pub fn to_list(&self) -> Value {
        Value::List(self.0.clone())
    }
}

impl FromIterator<Value> for Args {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl From<Value> for Args {
    fn from(value: Value) -> Self {
        Self(vec![value])
    }
}
