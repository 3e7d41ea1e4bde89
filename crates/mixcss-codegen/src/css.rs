//! CSS code generator.
//!
//! Walks the stylesheet AST and writes CSS text. Unexpanded mixin calls are
//! written back as `name(args);`.

use mixcss_parser::ast::{AtRule, MixinCall, Node, Rule, Stylesheet};

/// Generate CSS text from a stylesheet.
pub fn stringify(sheet: &Stylesheet) -> String {
    let mut css = String::new();

    for (i, node) in sheet.nodes.iter().enumerate() {
        if i > 0 {
            css.push('\n');
        }
        generate_node(node, &mut css, 0);
    }

    css
}

fn generate_node(node: &Node, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);

    match node {
        Node::Rule(rule) => generate_rule(rule, out, depth),
        Node::AtRule(at_rule) => generate_at_rule(at_rule, out, depth),
        Node::Declaration(decl) => {
            out.push_str(&format!("{indent}{}: {};\n", decl.prop, decl.value));
        }
        Node::Comment(comment) => {
            out.push_str(&format!("{indent}/* {} */\n", comment.text));
        }
        Node::Mixin(call) => {
            out.push_str(&indent);
            out.push_str(&mixin_call(call));
            out.push_str(";\n");
        }
    }
}

fn generate_rule(rule: &Rule, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}{} ", rule.selector));
    generate_block(&rule.nodes, out, depth);
}

fn generate_at_rule(at_rule: &AtRule, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push('@');
    out.push_str(&at_rule.name);
    if !at_rule.params.is_empty() {
        out.push(' ');
        out.push_str(&at_rule.params);
    }

    match &at_rule.nodes {
        Some(nodes) => {
            out.push(' ');
            generate_block(nodes, out, depth);
        }
        None => out.push_str(";\n"),
    }
}

fn generate_block(nodes: &[Node], out: &mut String, depth: usize) {
    if nodes.is_empty() {
        out.push_str("{}\n");
        return;
    }

    out.push_str("{\n");
    for child in nodes {
        generate_node(child, out, depth + 1);
    }
    out.push_str(&"  ".repeat(depth));
    out.push_str("}\n");
}

/// `name(args)`, preferring the argument text as written.
fn mixin_call(call: &MixinCall) -> String {
    let raw = call.raws.arguments.trim();
    if !raw.is_empty() {
        return format!("{}{raw}", call.name);
    }

    let arguments = call
        .arguments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({arguments})", call.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixcss_parser::ast::{Argument, MixinRaws, Source};
    use mixcss_parser::Parser;
    use pretty_assertions::assert_eq;

    fn gen(source: &str) -> String {
        stringify(&Parser::parse(source).unwrap())
    }

    // =========================================================================
    // Plain CSS
    // =========================================================================

    #[test]
    fn test_empty_stylesheet() {
        assert_eq!(gen(""), "");
    }

    #[test]
    fn test_rule_with_declarations() {
        assert_eq!(
            gen(".a{color:red;margin : 0 auto}"),
            ".a {\n  color: red;\n  margin: 0 auto;\n}\n"
        );
    }

    #[test]
    fn test_empty_rule() {
        assert_eq!(gen(".a {   }"), ".a {}\n");
    }

    #[test]
    fn test_nested_rules() {
        assert_eq!(
            gen(".a { &:after { content: ''; } }"),
            ".a {\n  &:after {\n    content: '';\n  }\n}\n"
        );
    }

    #[test]
    fn test_top_level_separation() {
        assert_eq!(gen(".a { color: red; } .b { color: blue; }"), ".a {\n  color: red;\n}\n\n.b {\n  color: blue;\n}\n");
    }

    #[test]
    fn test_at_rules() {
        assert_eq!(gen("@import 'x.css';"), "@import 'x.css';\n");
        assert_eq!(
            gen("@media (min-width: 10px) { .a { color: red; } }"),
            "@media (min-width: 10px) {\n  .a {\n    color: red;\n  }\n}\n"
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(gen("/*  note */ .a { /* inner */ }"), "/* note */\n\n.a {\n  /* inner */\n}\n");
    }

    // =========================================================================
    // Mixin calls
    // =========================================================================

    #[test]
    fn test_mixin_as_written() {
        assert_eq!(
            gen(".a { background(#fff, url('x.png')); }"),
            ".a {\n  background(#fff, url('x.png'));\n}\n"
        );
        assert_eq!(gen(".a { bold(); }"), ".a {\n  bold();\n}\n");
    }

    #[test]
    fn test_mixin_without_raws() {
        let call = MixinCall {
            name: "grid.row".into(),
            arguments: vec![Argument::text("10"), Argument::List(vec![Argument::text("a")])],
            raws: MixinRaws::default(),
            source: Source::default(),
        };
        let sheet = Stylesheet {
            nodes: vec![Node::Mixin(call)],
        };
        assert_eq!(stringify(&sheet), "grid.row(10, [a]);\n");
    }

    // =========================================================================
    // Round trip
    // =========================================================================

    #[test]
    fn test_fixed_point() {
        let source = "@charset 'utf-8';\n.a, .b {\n  color: red;\n  &:hover { color: blue }\n}\n@media print { .a { display: none; } }";
        let first = gen(source);
        assert_eq!(gen(&first), first);
    }
}
