//! Nodes produced by mixins.

use crate::units::{prefix, Units};
use crate::value::Value;
use indexmap::IndexMap;

/// A declaration whose value has already been unit-normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    prop: String,
    value: String,
}

impl Declaration {
    /// Build a declaration, appending the default unit to a bare number.
    pub fn new(prop: impl Into<String>, value: impl Into<Value>, units: &Units) -> Self {
        let prop = prop.into();
        let value = units.apply(&value.into(), Some(&prop));
        Self { prop, value }
    }

    /// Pair `props` with `values` in order. A list is zipped against the
    /// names; any other value is repeated for every name.
    pub fn create_many(
        props: &[&str],
        values: &Value,
        prefix_with: Option<&str>,
        units: &Units,
    ) -> Vec<Self> {
        let name = |prop: &str| prefix(prop, prefix_with, &[]);
        match values {
            Value::Undefined => Vec::new(),
            Value::List(items) => props
                .iter()
                .zip(items)
                .map(|(prop, value)| Self::new(name(prop), value.clone(), units))
                .collect(),
            value => props
                .iter()
                .map(|prop| Self::new(name(prop), value.clone(), units))
                .collect(),
        }
    }

    /// One declaration per map entry, in insertion order. Keys are
    /// dash-cased and prefixed unless the prefix is in `ignored`.
    pub fn create_many_from_map(
        entries: &IndexMap<String, Value>,
        prefix_with: Option<&str>,
        ignored: &[&str],
        units: &Units,
    ) -> Vec<Self> {
        entries
            .iter()
            .map(|(key, value)| Self::new(prefix(key, prefix_with, ignored), value.clone(), units))
            .collect()
    }

    pub fn prop(&self) -> &str {
        &self.prop
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A nested rule produced by a mixin, e.g. `&:after { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    pub fn new(selector: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            selector: selector.into(),
            declarations,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputNode {
    Declaration(Declaration),
    Rule(Rule),
    /// Stylesheet text parsed and spliced in as-is. Mixin calls inside it
    /// are not expanded.
    ///
    /// Legacy form kept for mixins written before `Rule` existed; new mixins
    /// should return `Rule`.
    RawCss(String),
}

impl OutputNode {
    pub fn raw_css(css: impl Into<String>) -> Self {
        OutputNode::RawCss(css.into())
    }
}

impl From<Declaration> for OutputNode {
    fn from(declaration: Declaration) -> Self {
        OutputNode::Declaration(declaration)
    }
}

impl From<Rule> for OutputNode {
    fn from(rule: Rule) -> Self {
        OutputNode::Rule(rule)
    }
}

/// What a mixin invocation returned.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MixinOutput {
    /// Nothing to insert.
    #[default]
    None,
    /// Remove the call without inserting anything.
    Removed,
    One(OutputNode),
    Many(Vec<OutputNode>),
}

impl MixinOutput {
    pub fn into_nodes(self) -> Vec<OutputNode> {
        match self {
            MixinOutput::None | MixinOutput::Removed => Vec::new(),
            MixinOutput::One(node) => vec![node],
            MixinOutput::Many(nodes) => nodes,
        }
    }

    pub fn first(self) -> Option<OutputNode> {
        self.into_nodes().into_iter().next()
    }
}

impl From<Declaration> for MixinOutput {
    fn from(declaration: Declaration) -> Self {
        MixinOutput::One(declaration.into())
    }
}

impl From<Rule> for MixinOutput {
    fn from(rule: Rule) -> Self {
        MixinOutput::One(rule.into())
    }
}

impl From<OutputNode> for MixinOutput {
    fn from(node: OutputNode) -> Self {
        MixinOutput::One(node)
    }
}

impl From<Vec<Declaration>> for MixinOutput {
    fn from(declarations: Vec<Declaration>) -> Self {
        MixinOutput::Many(declarations.into_iter().map(OutputNode::from).collect())
    }
}

impl From<Vec<OutputNode>> for MixinOutput {
    fn from(nodes: Vec<OutputNode>) -> Self {
        MixinOutput::Many(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(declarations: &[Declaration]) -> Vec<(&str, &str)> {
        declarations.iter().map(|d| (d.prop(), d.value())).collect()
    }

    #[test]
    fn test_declaration_normalizes_once() {
        let units = Units::default();
        let decl = Declaration::new("left", 10, &units);
        assert_eq!((decl.prop(), decl.value()), ("left", "10rem"));

        let weight = Declaration::new("font-weight", 600, &units);
        assert_eq!(weight.value(), "600");
    }

    #[test]
    fn test_create_many_zips_list() {
        let units = Units::default();
        let values = Value::List(vec![Value::Number(1.0), Value::from("auto")]);
        let decls = Declaration::create_many(&["top", "right", "left"], &values, None, &units);
        assert_eq!(pairs(&decls), vec![("top", "1rem"), ("right", "auto")]);
    }

    #[test]
    fn test_create_many_broadcasts_scalar() {
        let units = Units::default();
        let decls = Declaration::create_many(
            &["left", "right"],
            &Value::from("1px solid #000"),
            Some("border"),
            &units,
        );
        assert_eq!(
            pairs(&decls),
            vec![
                ("border-left", "1px solid #000"),
                ("border-right", "1px solid #000"),
            ]
        );
    }

    #[test]
    fn test_create_many_from_map() {
        let units = Units::default();
        let mut entries = IndexMap::new();
        entries.insert("top".to_string(), Value::Number(1.0));
        entries.insert("bottom".to_string(), Value::from("5%"));
        let decls = Declaration::create_many_from_map(&entries, Some("margin"), &[], &units);
        assert_eq!(
            pairs(&decls),
            vec![("margin-top", "1rem"), ("margin-bottom", "5%")]
        );
    }

    #[test]
    fn test_output_into_nodes() {
        let units = Units::default();
        assert!(MixinOutput::None.into_nodes().is_empty());
        assert!(MixinOutput::Removed.into_nodes().is_empty());

        let output = MixinOutput::from(Declaration::new("color", "red", &units));
        assert_eq!(output.into_nodes().len(), 1);
    }
}
