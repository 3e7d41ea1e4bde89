//! WASM bindings for the mixcss preprocessor.
//!
//! Exposes `process()` to JavaScript via wasm-bindgen.
//! Returns a JS object `{ css, warnings }` or throws on error.

use mixcss_eval::{builtins, ProcessError, Processor, Theme, Units, Warning};
use wasm_bindgen::prelude::*;

/// The expanded CSS and the warnings raised while expanding it.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub css: String,
    pub warnings: Vec<Warning>,
}

/// Expand `source` with the built-in mixins and render it to CSS.
pub fn run(source: &str, units: Units) -> Result<Output, ProcessError> {
    let processor = Processor::new(builtins::registry(Theme::default())).with_units(units);
    let processed = processor.process(source)?;

    Ok(Output {
        css: mixcss_codegen::stringify(&processed.stylesheet),
        warnings: processed.warnings,
    })
}

/// Expand mixins in a stylesheet.
///
/// `options` may be omitted or an object such as
/// `{ default: "px", lineHeight: "em" }`.
///
/// Returns a JS object with `{ css: string, warnings: [{ message, mixin, line, column }] }`.
/// Throws a JS error if parsing fails or a mixin raises an error.
#[wasm_bindgen]
pub fn process(source: &str, options: JsValue) -> Result<JsValue, JsError> {
    let units = if options.is_undefined() || options.is_null() {
        Units::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("Invalid options: {e}")))?
    };

    let output = run(source, units).map_err(|e| JsError::new(&e.to_string()))?;

    let warnings = serde_wasm_bindgen::to_value(&output.warnings)
        .map_err(|e| JsError::new(&e.to_string()))?;

    let js_obj = js_sys::Object::new();
    js_sys::Reflect::set(&js_obj, &"css".into(), &output.css.into())
        .map_err(|_| JsError::new("Failed to set css property"))?;
    js_sys::Reflect::set(&js_obj, &"warnings".into(), &warnings)
        .map_err(|_| JsError::new("Failed to set warnings property"))?;

    Ok(js_obj.into())
}

/// Get the preprocessor version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Native tests (non-WASM): the process pipeline without the JS boundary
    // =========================================================================

    fn native_process(source: &str) -> Output {
        run(source, Units::default()).unwrap()
    }

    #[test]
    fn test_empty_stylesheet() {
        let output = native_process("");
        assert_eq!(output.css, "");
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_plain_css_passes_through() {
        let output = native_process(".a { color: red; }");
        assert_eq!(output.css, ".a {\n  color: red;\n}\n");
    }

    #[test]
    fn test_expands_builtin() {
        let output = native_process(".block {\n  inlineBlock(height: 20);\n}");
        assert_eq!(
            output.css,
            ".block {\n  display: inline-block;\n  height: 20rem;\n}\n"
        );
    }

    #[test]
    fn test_custom_units() {
        let output = run(".a { left(10); font(Arial, 2, 400, 1.5); }", Units::new("px", "rem")).unwrap();
        assert_eq!(
            output.css,
            ".a {\n  left: 10px;\n  font-family: Arial;\n  font-size: 2px;\n  font-weight: 400;\n  line-height: 1.5rem;\n}\n"
        );
    }

    #[test]
    fn test_unknown_mixin_warns() {
        let output = native_process(".a {\n  nope(1);\n  color: red;\n}");
        assert_eq!(output.css, ".a {\n  color: red;\n}\n");
        assert_eq!(
            output.warnings,
            vec![Warning {
                message: "Mixin not found.".into(),
                mixin: "nope".into(),
                line: 2,
                column: 3,
            }]
        );
    }

    #[test]
    fn test_parse_error() {
        let err = run(".a { left(10) }", Units::default()).unwrap_err();
        assert!(matches!(err, ProcessError::Parse(_)));
        assert!(err.to_string().contains("Missing semicolon"));
    }

    #[test]
    fn test_mixin_error() {
        let err = run(".a { column(wide); }", Units::default()).unwrap_err();
        assert!(matches!(err, ProcessError::Mixin { ref name, .. } if name == "column"));
    }

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
        assert!(v.contains('.'));
    }

    #[test]
    fn test_multiple_runs() {
        // Units from one run must not leak into the next
        let px = run(".a { left(1); }", Units::new("px", "em")).unwrap();
        let rem = native_process(".a { left(1); }");
        assert!(px.css.contains("1px"));
        assert!(rem.css.contains("1rem"));
    }
}
