//! Mixin evaluation and tree rewriting.
//!
//! Every `Mixin` node in the stylesheet, at any depth, is replaced in place
//! by the nodes its mixin returns. Unknown mixins are removed and reported as
//! warnings; mixin failures abort the run.

use crate::model::{MixinOutput, OutputNode};
use crate::registry::{Registry, Scope};
use crate::units::Units;
use crate::value::Args;
use crate::{MixinError, ProcessError, Warning};
use mixcss_parser::ast::{self, MixinCall, Node, Source, Stylesheet};
use mixcss_parser::Parser;
use tracing::{debug, instrument, warn};

pub const MIXIN_NOT_FOUND: &str = "Mixin not found.";

/// Outcome of evaluating one call.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// No mixin is registered under the call's name.
    Unresolved,
    Output(MixinOutput),
}

/// Resolves and invokes mixin calls against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    registry: &'a Registry,
    units: &'a Units,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a Registry, units: &'a Units) -> Self {
        Self { registry, units }
    }

    pub fn evaluate(&self, call: &MixinCall) -> Result<Evaluation, MixinError> {
        let Some(resolved) = self.registry.resolve(&call.name) else {
            return Ok(Evaluation::Unresolved);
        };

        let args = Args::from_arguments(&call.arguments);
        debug!(mixin = %call.name, args = args.len(), "Expanding mixin");

        let scope = Scope::nested(self.registry, resolved.namespace, self.units);
        resolved.mixin.call(&scope, &args).map(Evaluation::Output)
    }
}

/// Expand every mixin call in `sheet`, returning the warnings collected.
#[instrument(skip_all, fields(nodes = sheet.nodes.len()))]
pub fn expand(sheet: &mut Stylesheet, evaluator: &Evaluator<'_>) -> Result<Vec<Warning>, ProcessError> {
    let mut warnings = Vec::new();
    expand_nodes(&mut sheet.nodes, evaluator, &mut warnings)?;
    Ok(warnings)
}

fn expand_nodes(
    nodes: &mut Vec<Node>,
    evaluator: &Evaluator<'_>,
    warnings: &mut Vec<Warning>,
) -> Result<(), ProcessError> {
    let mut expanded = Vec::with_capacity(nodes.len());

    for node in std::mem::take(nodes) {
        match node {
            Node::Mixin(call) => expanded.extend(expand_call(&call, evaluator, warnings)?),
            Node::Rule(mut rule) => {
                expand_nodes(&mut rule.nodes, evaluator, warnings)?;
                expanded.push(Node::Rule(rule));
            }
            Node::AtRule(mut at_rule) => {
                if let Some(children) = at_rule.nodes.as_mut() {
                    expand_nodes(children, evaluator, warnings)?;
                }
                expanded.push(Node::AtRule(at_rule));
            }
            other => expanded.push(other),
        }
    }

    *nodes = expanded;
    Ok(())
}

fn expand_call(
    call: &MixinCall,
    evaluator: &Evaluator<'_>,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<Node>, ProcessError> {
    let start = call.source.start;
    let evaluation = evaluator.evaluate(call).map_err(|source| ProcessError::Mixin {
        name: call.name.clone(),
        line: start.line,
        column: start.column,
        source,
    })?;

    let output = match evaluation {
        Evaluation::Unresolved => {
            warn!(mixin = %call.name, line = start.line, column = start.column, "Mixin not found");
            warnings.push(Warning::for_call(MIXIN_NOT_FOUND, call));
            return Ok(Vec::new());
        }
        Evaluation::Output(output) => output,
    };

    let mut nodes = Vec::new();
    for node in output.into_nodes() {
        nodes.extend(to_ast(node, call.source)?);
    }
    Ok(nodes)
}

/// Convert a mixin result node into stylesheet nodes positioned at the call.
fn to_ast(node: OutputNode, source: Source) -> Result<Vec<Node>, ProcessError> {
    match node {
        OutputNode::Declaration(decl) => Ok(vec![declaration(decl, source)]),
        OutputNode::Rule(rule) => Ok(vec![Node::Rule(ast::Rule {
            selector: rule.selector,
            nodes: rule
                .declarations
                .into_iter()
                .map(|decl| declaration(decl, source))
                .collect(),
            source,
        })]),
        OutputNode::RawCss(css) => raw_css(&css),
    }
}

fn declaration(decl: crate::model::Declaration, source: Source) -> Node {
    Node::Declaration(ast::Declaration {
        prop: decl.prop().to_string(),
        value: decl.value().to_string(),
        source,
    })
}

fn raw_css(css: &str) -> Result<Vec<Node>, ProcessError> {
    Ok(Parser::parse(css)?.nodes)
}
