//! The built-in mixin catalog.
//!
//! Layout, typography, grid and visibility helpers. Design variables such as
//! the grid size come from a [`Theme`].

use crate::model::{Declaration, OutputNode, Rule};
use crate::registry::{MixinResult, Registry, Scope};
use crate::units::{calc_opacity, hex_to_rgba, is_color, is_percentage, prefix};
use crate::value::{format_number, Args, Value};
use crate::{MixinError, MixinOutput};
use indexmap::IndexMap;
use std::sync::Arc;

/// Design variables used by the built-in mixins.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// `font-weight` for `bold()`.
    pub bold_weight: f64,
    /// Bottom margin for `spaced()` without an argument.
    pub block_spacing: f64,
    /// Gutter for `row()` and `column(spaced, ...)`, as a percentage.
    pub grid_margin: String,
    pub grid_columns: f64,
    pub border_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bold_weight: 600.0,
            block_spacing: 2.0,
            grid_margin: "5%".into(),
            grid_columns: 8.0,
            border_color: "#bfbfbf".into(),
        }
    }
}

const POSITION_SIDES: &[&str] = &["top", "right", "left", "bottom"];
const MARGIN_SIDES: &[&str] = &["margin-top", "margin-right", "margin-left", "margin-bottom"];
const BORDER_KEYWORDS: &[&str] = &["top", "right", "bottom", "left", "vertical", "horizontal"];

/// Build a registry holding every built-in mixin.
pub fn registry(theme: Theme) -> Registry {
    let theme = Arc::new(theme);

    Registry::new()
        .with("absolute", |s: &Scope<'_>, a: &Args| positioned(s, a, "absolute"))
        .with("align", |s: &Scope<'_>, a: &Args| single(s, "text-align", a.get(0)))
        .with("background", background)
        .with("block", |s: &Scope<'_>, a: &Args| sized_display(s, a, "block"))
        .with("bold", {
            let theme = Arc::clone(&theme);
            move |s: &Scope<'_>, _: &Args| single(s, "font-weight", &Value::Number(theme.bold_weight))
        })
        .with("border", {
            let theme = Arc::clone(&theme);
            move |s: &Scope<'_>, a: &Args| border(s, a, &theme)
        })
        .with("centeredBlock", centered_block)
        .with("clear", |s: &Scope<'_>, a: &Args| single(s, "clear", &a.or(0, "both")))
        .with("clearfix", clearfix)
        .with("color", |s: &Scope<'_>, a: &Args| single(s, "color", a.get(0)))
        .with("column", {
            let theme = Arc::clone(&theme);
            move |s: &Scope<'_>, a: &Args| column(s, a, &theme)
        })
        .with("display", |s: &Scope<'_>, a: &Args| single(s, "display", a.get(0)))
        .with("fixed", |s: &Scope<'_>, a: &Args| positioned(s, a, "fixed"))
        .with("font", font)
        .with("hidden", |s: &Scope<'_>, _: &Args| s.call("visibility", Value::from("hidden")))
        .with("hide", |s: &Scope<'_>, _: &Args| s.call("display", Value::from("none")))
        .with("inline", |s: &Scope<'_>, _: &Args| s.call("display", Value::from("inline")))
        .with("inlineBlock", |s: &Scope<'_>, a: &Args| sized_display(s, a, "inline-block"))
        .with("italic", |s: &Scope<'_>, _: &Args| single(s, "font-style", &Value::from("italic")))
        .with("left", |s: &Scope<'_>, a: &Args| float_or_offset(s, a, "left"))
        .with("margin", margin)
        .with("minSize", |s: &Scope<'_>, a: &Args| dimensions(s, a, "min-width", "min-height"))
        .with("opacity", |s: &Scope<'_>, a: &Args| single(s, "opacity", &calc_opacity(a.get(0))))
        .with("opaque", |s: &Scope<'_>, _: &Args| s.call("opacity", Value::Number(1.0)))
        .with("right", |s: &Scope<'_>, a: &Args| float_or_offset(s, a, "right"))
        .with("row", {
            let theme = Arc::clone(&theme);
            move |s: &Scope<'_>, a: &Args| row(s, a, &theme, true)
        })
        .with("rowModify", {
            let theme = Arc::clone(&theme);
            move |s: &Scope<'_>, a: &Args| row(s, a, &theme, false)
        })
        .with("rowReset", row_reset)
        .with("show", |s: &Scope<'_>, _: &Args| s.call("display", Value::from("inherit")))
        .with("size", |s: &Scope<'_>, a: &Args| dimensions(s, a, "width", "height"))
        .with("spaced", {
            let theme = Arc::clone(&theme);
            move |s: &Scope<'_>, a: &Args| spaced(s, a, &theme)
        })
        .with("spacedBlock", spaced_block)
        .with("transparent", |s: &Scope<'_>, _: &Args| s.call("opacity", Value::Number(0.0)))
        .with("unstyled", |s: &Scope<'_>, _: &Args| single(s, "list-style", &Value::from("none")))
        .with("vAlign", |s: &Scope<'_>, a: &Args| single(s, "vertical-align", a.get(0)))
        .with("visibility", |s: &Scope<'_>, a: &Args| single(s, "visibility", a.get(0)))
        .with("visible", |s: &Scope<'_>, _: &Args| s.call("visibility", Value::from("visible")))
}

fn single(scope: &Scope<'_>, prop: &str, value: &Value) -> MixinResult {
    Ok(scope.decl(prop, value.clone()).into())
}

fn declarations(decls: Vec<Declaration>) -> impl Iterator<Item = OutputNode> {
    decls.into_iter().map(OutputNode::from)
}

fn keyed(scope: &Scope<'_>, name: &str, key: &str, value: impl Into<Value>) -> MixinResult {
    let mut entries = IndexMap::new();
    entries.insert(key.to_string(), value.into());
    scope.call(name, Value::Map(entries))
}

fn invalid(mixin: &str, message: impl Into<String>) -> MixinError {
    MixinError::InvalidArgument {
        mixin: mixin.to_string(),
        message: message.into(),
    }
}

fn positioned(scope: &Scope<'_>, args: &Args, position: &str) -> MixinResult {
    let mut decls = vec![scope.decl("position", position)];
    if let Some(entries) = args.map() {
        decls.extend(scope.create_many_from_map(entries, None, &[]));
    } else if !args.is_empty() {
        decls.extend(scope.create_many(POSITION_SIDES, &args.to_list(), None));
    }
    Ok(decls.into())
}

/// `background(color, opacity?, ...)`: a numeric second argument turns a
/// hex color into `rgba()`; everything else is joined with spaces.
fn background(scope: &Scope<'_>, args: &Args) -> MixinResult {
    let color = args.get(0);
    if !color.is_truthy() {
        return Ok(MixinOutput::None);
    }

    let mut values = args.values().to_vec();
    if args.get(1).as_number().is_some() {
        if let Some(rgba) = hex_to_rgba(&color.to_string(), Some(args.get(1))) {
            values[0] = Value::Str(rgba);
            values.remove(1);
        }
    }

    let value = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    Ok(scope.decl("background", value).into())
}

fn sized_display(scope: &Scope<'_>, args: &Args, display: &str) -> MixinResult {
    let mut nodes = scope.call("display", Value::from(display))?.into_nodes();

    if let Some(entries) = args.map() {
        nodes.extend(declarations(scope.create_many_from_map(entries, None, &[])));
    } else if !args.is_empty() {
        nodes.push(scope.decl("width", args.get(0).clone()).into());
        if args.get(1).is_truthy() {
            nodes.push(scope.decl("height", args.get(1).clone()).into());
        }
    }

    Ok(nodes.into())
}

fn border(scope: &Scope<'_>, args: &Args, theme: &Theme) -> MixinResult {
    let default = format!("1px solid {}", theme.border_color);
    if args.is_empty() {
        return Ok(scope.decl("border", default).into());
    }

    let side = args.get(0).to_string();
    let value = if args.len() == 1 {
        if !BORDER_KEYWORDS.contains(&side.as_str()) {
            let value = match side.as_str() {
                "0" | "none" => "none".to_string(),
                color if is_color(color) => format!("1px solid {color}"),
                other => other.to_string(),
            };
            return Ok(scope.decl("border", value).into());
        }
        default
    } else {
        let value = args.get(1).to_string();
        if is_color(&value) {
            format!("1px solid {value}")
        } else {
            value
        }
    };

    let decls = match side.as_str() {
        "vertical" => scope.create_many(&["border-left", "border-right"], &Value::Str(value), None),
        "horizontal" => scope.create_many(&["border-top", "border-bottom"], &Value::Str(value), None),
        side => vec![scope.decl(prefix(side, Some("border"), &[]), value)],
    };
    Ok(decls.into())
}

fn centered_block(scope: &Scope<'_>, args: &Args) -> MixinResult {
    let mut nodes = scope.call("block", args.clone())?.into_nodes();

    let mut sides = IndexMap::new();
    sides.insert("left".to_string(), Value::from("auto"));
    sides.insert("right".to_string(), Value::from("auto"));
    nodes.extend(scope.call("margin", Value::Map(sides))?.into_nodes());

    Ok(nodes.into())
}

fn clearfix(scope: &Scope<'_>, _: &Args) -> MixinResult {
    Ok(Rule::new(
        "&:after",
        vec![
            scope.decl("clear", "both"),
            scope.decl("content", "''"),
            scope.decl("display", "block"),
        ],
    )
    .into())
}

/// `column()`, `column(50%)`, `column(share, columns?)` or
/// `column(spaced, share, columns?, margin?)`.
fn column(scope: &Scope<'_>, args: &Args, theme: &Theme) -> MixinResult {
    let mut nodes: Vec<OutputNode> = vec![scope.decl("float", "left").into()];

    if args.is_empty() {
        nodes.push(scope.decl("width", "100%").into());
        return Ok(nodes.into());
    }

    let first = args.get(0);
    if is_percentage(&first.to_string()) {
        nodes.push(scope.decl("width", first.clone()).into());
    } else if first.as_str() == Some("spaced") {
        let columns = grid_columns(args.get(2), theme)?;
        let share = share(args.get(1))?;
        let margin = args.or(3, theme.grid_margin.as_str());

        nodes.push(scope.decl("width", column_width(share, columns)).into());
        if let Some(node) = keyed(scope, "margin", "left", scope.unit(&margin))?.first() {
            nodes.push(node);
        }
    } else {
        let columns = grid_columns(args.get(1), theme)?;
        nodes.push(scope.decl("width", column_width(share(first)?, columns)).into());
    }

    Ok(nodes.into())
}

fn grid_columns(value: &Value, theme: &Theme) -> Result<f64, MixinError> {
    if value.is_undefined() {
        return Ok(theme.grid_columns);
    }
    match value.as_number() {
        Some(columns) if columns > 0.0 => Ok(columns),
        _ => Err(invalid("column", format!("'{value}' is not a column count"))),
    }
}

fn share(value: &Value) -> Result<f64, MixinError> {
    value
        .as_number()
        .ok_or_else(|| invalid("column", format!("'{value}' is not a column share")))
}

fn column_width(share: f64, columns: f64) -> String {
    format!("{}%", format_number(100.0 / columns * share))
}

/// Positional font shorthand `font(family, size?, weight?, lineHeight?, style?)`
/// or keyed `font(family: ..., lineHeight: ...)`.
fn font(scope: &Scope<'_>, args: &Args) -> MixinResult {
    if let Some(entries) = args.map() {
        let decls = entries
            .iter()
            .map(|(key, value)| {
                let prop = if key == "lineHeight" {
                    "line-height".to_string()
                } else {
                    prefix(key, Some("font"), &[])
                };
                scope.decl(prop, value.clone())
            })
            .collect::<Vec<_>>();
        return Ok(decls.into());
    }

    if args.is_empty() {
        return Ok(MixinOutput::None);
    }

    let mut decls = vec![scope.decl("font-family", args.get(0).clone())];
    let optional = ["font-size", "font-weight", "line-height", "font-style"];
    for (i, prop) in optional.into_iter().enumerate() {
        let value = args.get(i + 1);
        if value.is_truthy() {
            decls.push(scope.decl(prop, value.clone()));
        }
    }
    Ok(decls.into())
}

fn float_or_offset(scope: &Scope<'_>, args: &Args, side: &str) -> MixinResult {
    if args.is_empty() {
        Ok(scope.decl("float", side).into())
    } else {
        Ok(scope.decl(side, args.get(0).clone()).into())
    }
}

/// `margin(value)`, `margin(top, right, left, bottom)` or
/// `margin(top: ..., bottom: ...)`.
fn margin(scope: &Scope<'_>, args: &Args) -> MixinResult {
    if let Some(entries) = args.map() {
        return Ok(scope.create_many_from_map(entries, Some("margin"), &[]).into());
    }
    if args.is_empty() {
        return Ok(MixinOutput::None);
    }
    if args.len() > 1 {
        return Ok(scope.create_many(MARGIN_SIDES, &args.to_list(), None).into());
    }
    Ok(scope.decl("margin", args.get(0).clone()).into())
}

fn dimensions(scope: &Scope<'_>, args: &Args, width: &str, height: &str) -> MixinResult {
    let w = args.get(0);
    let h = args.get(1);
    Ok(vec![
        scope.decl(width, w.clone()),
        scope.decl(height, if h.is_truthy() { h.clone() } else { w.clone() }),
    ]
    .into())
}

fn row(scope: &Scope<'_>, args: &Args, theme: &Theme, clearfix: bool) -> MixinResult {
    let margin = args.or(0, theme.grid_margin.as_str());
    let margin = leading_integer(&margin.to_string())
        .ok_or_else(|| invalid("row", format!("'{margin}' is not a grid margin")))?;

    let out_of_range = || invalid("row", format!("grid margin {margin}% is out of range"));
    let offset = margin.checked_neg().ok_or_else(out_of_range)?;
    let max_width = margin.checked_add(100).ok_or_else(out_of_range)?;

    let mut nodes = Vec::new();
    if let Some(node) = keyed(scope, "margin", "left", format!("{offset}%"))?.first() {
        nodes.push(node);
    }
    nodes.push(scope.decl("max-width", format!("{max_width}%")).into());
    if clearfix {
        nodes.extend(scope.call("clearfix", Args::default())?.into_nodes());
    }
    Ok(nodes.into())
}

fn row_reset(scope: &Scope<'_>, _: &Args) -> MixinResult {
    let mut nodes = Vec::new();
    if let Some(node) = keyed(scope, "margin", "left", 0)?.first() {
        nodes.push(node);
    }
    nodes.push(scope.decl("max-width", "none").into());
    Ok(nodes.into())
}

/// The integer at the start of `value`: `5%` gives 5.
fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(value.len(), |(i, _)| i);
    value[..end].parse().ok()
}

fn spaced(scope: &Scope<'_>, args: &Args, theme: &Theme) -> MixinResult {
    let value = if args.is_empty() || args.map().is_some() {
        Value::Number(theme.block_spacing)
    } else {
        args.get(0).clone()
    };
    keyed(scope, "margin", "bottom", scope.unit(&value))
}

/// `spaced()` followed by `block()`; extra positional arguments size the block.
fn spaced_block(scope: &Scope<'_>, args: &Args) -> MixinResult {
    let mut nodes = scope.call("spaced", args.clone())?.into_nodes();

    if let Some(entries) = args.map() {
        nodes.extend(declarations(scope.create_many_from_map(entries, None, &[])));
        nodes.extend(scope.call("block", Args::default())?.into_nodes());
    } else if args.len() > 1 {
        nodes.extend(scope.call("block", args.skip(1))?.into_nodes());
    } else {
        nodes.extend(scope.call("block", Args::default())?.into_nodes());
    }

    Ok(nodes.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Units;
    use pretty_assertions::assert_eq;

    fn run(name: &str, args: Vec<Value>) -> Vec<(String, String)> {
        let registry = registry(Theme::default());
        let units = Units::default();
        let output = Scope::new(&registry, &units).call(name, args).unwrap();
        output
            .into_nodes()
            .into_iter()
            .map(|node| match node {
                OutputNode::Declaration(d) => (d.prop().to_string(), d.value().to_string()),
                OutputNode::Rule(r) => (r.selector, format!("{} declarations", r.declarations.len())),
                OutputNode::RawCss(css) => ("raw".to_string(), css),
            })
            .collect()
    }

    fn expect(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(p, v)| (p.to_string(), v.to_string())).collect()
    }

    fn map(entries: &[(&str, Value)]) -> Value {
        Value::Map(entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
    }

    fn n(value: f64) -> Value {
        Value::Number(value)
    }

    fn s(value: &str) -> Value {
        Value::from(value)
    }

    // =========================================================================
    // Positioning
    // =========================================================================

    #[test]
    fn test_absolute_positional() {
        assert_eq!(
            run("absolute", vec![n(1.0), n(2.0)]),
            expect(&[("position", "absolute"), ("top", "1rem"), ("right", "2rem")])
        );
    }

    #[test]
    fn test_fixed_keyed() {
        assert_eq!(
            run("fixed", vec![map(&[("left", n(0.0)), ("bottom", s("10px"))])]),
            expect(&[("position", "fixed"), ("left", "0"), ("bottom", "10px")])
        );
    }

    #[test]
    fn test_left_and_right() {
        assert_eq!(run("left", vec![]), expect(&[("float", "left")]));
        assert_eq!(run("left", vec![n(10.0)]), expect(&[("left", "10rem")]));
        assert_eq!(run("right", vec![]), expect(&[("float", "right")]));
    }

    // =========================================================================
    // Box model
    // =========================================================================

    #[test]
    fn test_margin_forms() {
        assert_eq!(run("margin", vec![s("0 auto")]), expect(&[("margin", "0 auto")]));
        assert_eq!(
            run("margin", vec![n(1.0), n(2.0), n(3.0), n(4.0)]),
            expect(&[
                ("margin-top", "1rem"),
                ("margin-right", "2rem"),
                ("margin-left", "3rem"),
                ("margin-bottom", "4rem"),
            ])
        );
        assert_eq!(
            run("margin", vec![map(&[("bottom", n(10.0))])]),
            expect(&[("margin-bottom", "10rem")])
        );
        assert_eq!(run("margin", vec![]), expect(&[]));
    }

    #[test]
    fn test_block_and_inline_block() {
        assert_eq!(run("block", vec![]), expect(&[("display", "block")]));
        assert_eq!(
            run("inlineBlock", vec![map(&[("height", n(20.0))])]),
            expect(&[("display", "inline-block"), ("height", "20rem")])
        );
        assert_eq!(
            run("block", vec![n(20.0), n(30.0)]),
            expect(&[("display", "block"), ("width", "20rem"), ("height", "30rem")])
        );
    }

    #[test]
    fn test_centered_block() {
        assert_eq!(
            run("centeredBlock", vec![n(20.0)]),
            expect(&[
                ("display", "block"),
                ("width", "20rem"),
                ("margin-left", "auto"),
                ("margin-right", "auto"),
            ])
        );
    }

    #[test]
    fn test_size_defaults_height_to_width() {
        assert_eq!(
            run("size", vec![n(10.0)]),
            expect(&[("width", "10rem"), ("height", "10rem")])
        );
        assert_eq!(
            run("minSize", vec![n(10.0), s("50%")]),
            expect(&[("min-width", "10rem"), ("min-height", "50%")])
        );
    }

    #[test]
    fn test_spaced() {
        assert_eq!(run("spaced", vec![]), expect(&[("margin-bottom", "2rem")]));
        assert_eq!(run("spaced", vec![n(10.0)]), expect(&[("margin-bottom", "10rem")]));
    }

    #[test]
    fn test_spaced_block() {
        assert_eq!(
            run("spacedBlock", vec![n(1.0), n(20.0)]),
            expect(&[("margin-bottom", "1rem"), ("display", "block"), ("width", "20rem")])
        );
    }

    // =========================================================================
    // Grid
    // =========================================================================

    #[test]
    fn test_column() {
        assert_eq!(
            run("column", vec![]),
            expect(&[("float", "left"), ("width", "100%")])
        );
        assert_eq!(
            run("column", vec![n(3.0)]),
            expect(&[("float", "left"), ("width", "37.5%")])
        );
        assert_eq!(
            run("column", vec![n(1.0), n(4.0)]),
            expect(&[("float", "left"), ("width", "25%")])
        );
        assert_eq!(
            run("column", vec![s("50%")]),
            expect(&[("float", "left"), ("width", "50%")])
        );
    }

    #[test]
    fn test_column_spaced() {
        assert_eq!(
            run("column", vec![s("spaced"), n(2.0)]),
            expect(&[("float", "left"), ("width", "25%"), ("margin-left", "5%")])
        );
    }

    #[test]
    fn test_column_invalid_share() {
        let registry = registry(Theme::default());
        let units = Units::default();
        let err = Scope::new(&registry, &units)
            .call("column", vec![s("wide")])
            .unwrap_err();
        assert!(matches!(err, MixinError::InvalidArgument { ref mixin, .. } if mixin == "column"));
    }

    #[test]
    fn test_row() {
        assert_eq!(
            run("row", vec![]),
            expect(&[
                ("margin-left", "-5%"),
                ("max-width", "105%"),
                ("&:after", "3 declarations"),
            ])
        );
        assert_eq!(
            run("rowModify", vec![n(10.0)]),
            expect(&[("margin-left", "-10%"), ("max-width", "110%")])
        );
        assert_eq!(
            run("rowReset", vec![]),
            expect(&[("margin-left", "0"), ("max-width", "none")])
        );
    }

    #[test]
    fn test_row_margin_out_of_range() {
        let registry = registry(Theme::default());
        let units = Units::default();
        let scope = Scope::new(&registry, &units);

        for margin in ["9223372036854775807%", "-9223372036854775808%"] {
            let err = scope.call("row", vec![s(margin)]).unwrap_err();
            assert!(
                matches!(err, MixinError::InvalidArgument { ref mixin, .. } if mixin == "row"),
                "{margin}: {err:?}"
            );
        }
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("5%"), Some(5));
        assert_eq!(leading_integer("12"), Some(12));
        assert_eq!(leading_integer("-3px"), Some(-3));
        assert_eq!(leading_integer("abc"), None);
    }

    // =========================================================================
    // Typography and color
    // =========================================================================

    #[test]
    fn test_font_positional() {
        assert_eq!(
            run(
                "font",
                vec![
                    Value::List(vec![s("'Open Sans'"), s("Arial"), s("sans-serif")]),
                    n(12.0),
                    n(600.0),
                    n(1.5),
                ]
            ),
            expect(&[
                ("font-family", "'Open Sans', Arial, sans-serif"),
                ("font-size", "12rem"),
                ("font-weight", "600"),
                ("line-height", "1.5em"),
            ])
        );
    }

    #[test]
    fn test_font_keyed() {
        assert_eq!(
            run("font", vec![map(&[("size", n(2.0)), ("lineHeight", n(1.2))])]),
            expect(&[("font-size", "2rem"), ("line-height", "1.2em")])
        );
    }

    #[test]
    fn test_bold_italic() {
        assert_eq!(run("bold", vec![]), expect(&[("font-weight", "600")]));
        assert_eq!(run("italic", vec![]), expect(&[("font-style", "italic")]));
    }

    #[test]
    fn test_background() {
        assert_eq!(run("background", vec![s("#fff")]), expect(&[("background", "#fff")]));
        assert_eq!(
            run("background", vec![s("#000"), n(50.0)]),
            expect(&[("background", "rgba(0, 0, 0, 0.5)")])
        );
        assert_eq!(
            run("background", vec![s("#fff"), s("url('x.png')"), s("no-repeat")]),
            expect(&[("background", "#fff url('x.png') no-repeat")])
        );
        assert_eq!(run("background", vec![]), expect(&[]));
    }

    #[test]
    fn test_border() {
        assert_eq!(run("border", vec![]), expect(&[("border", "1px solid #bfbfbf")]));
        assert_eq!(run("border", vec![n(0.0)]), expect(&[("border", "none")]));
        assert_eq!(run("border", vec![s("#f00")]), expect(&[("border", "1px solid #f00")]));
        assert_eq!(
            run("border", vec![s("top")]),
            expect(&[("border-top", "1px solid #bfbfbf")])
        );
        assert_eq!(
            run("border", vec![s("vertical"), s("#000")]),
            expect(&[("border-left", "1px solid #000"), ("border-right", "1px solid #000")])
        );
        assert_eq!(
            run("border", vec![s("horizontal"), s("2px dashed red")]),
            expect(&[("border-top", "2px dashed red"), ("border-bottom", "2px dashed red")])
        );
    }

    #[test]
    fn test_opacity() {
        assert_eq!(run("opacity", vec![s("20%")]), expect(&[("opacity", "0.2")]));
        assert_eq!(run("opaque", vec![]), expect(&[("opacity", "1")]));
        assert_eq!(run("transparent", vec![]), expect(&[("opacity", "0")]));
    }

    // =========================================================================
    // Display and visibility
    // =========================================================================

    #[test]
    fn test_display_shortcuts() {
        assert_eq!(run("hide", vec![]), expect(&[("display", "none")]));
        assert_eq!(run("show", vec![]), expect(&[("display", "inherit")]));
        assert_eq!(run("inline", vec![]), expect(&[("display", "inline")]));
        assert_eq!(run("hidden", vec![]), expect(&[("visibility", "hidden")]));
        assert_eq!(run("visible", vec![]), expect(&[("visibility", "visible")]));
    }

    #[test]
    fn test_misc() {
        assert_eq!(run("clear", vec![]), expect(&[("clear", "both")]));
        assert_eq!(run("unstyled", vec![]), expect(&[("list-style", "none")]));
        assert_eq!(run("vAlign", vec![n(10.0)]), expect(&[("vertical-align", "10rem")]));
        assert_eq!(run("align", vec![s("center")]), expect(&[("text-align", "center")]));
    }

    #[test]
    fn test_theme_overrides() {
        let theme = Theme {
            bold_weight: 700.0,
            grid_columns: 4.0,
            ..Theme::default()
        };
        let registry = registry(theme);
        let units = Units::default();
        let scope = Scope::new(&registry, &units);

        let bold = scope.call("bold", Args::default()).unwrap().into_nodes();
        assert_eq!(
            bold,
            vec![OutputNode::Declaration(Declaration::new("font-weight", 700, &units))]
        );

        let column = scope.call("column", Value::Number(2.0)).unwrap().into_nodes();
        assert_eq!(
            column.last(),
            Some(&OutputNode::Declaration(Declaration::new("width", "50%", &units)))
        );
    }
}
