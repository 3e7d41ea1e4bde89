//! Mixin registry, dotted-name resolution and the scope mixins run in.

use crate::model::Declaration;
use crate::units::Units;
use crate::value::{Args, Value};
use crate::{MixinError, MixinOutput};
use indexmap::IndexMap;
use std::fmt;

pub type MixinResult = Result<MixinOutput, MixinError>;

type MixinFn = dyn Fn(&Scope<'_>, &Args) -> MixinResult + Send + Sync;

/// A registered mixin function.
pub struct Mixin(Box<MixinFn>);

impl Mixin {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Scope<'_>, &Args) -> MixinResult + Send + Sync + 'static,
    {
        Self(Box::new(f))
    }

    pub fn call(&self, scope: &Scope<'_>, args: &Args) -> MixinResult {
        (self.0)(scope, args)
    }
}

impl fmt::Debug for Mixin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mixin(..)")
    }
}

#[derive(Debug)]
pub enum Entry {
    Mixin(Mixin),
    Namespace(Registry),
}

/// Named mixins and namespaces of further mixins.
#[derive(Debug, Default)]
pub struct Registry {
    entries: IndexMap<String, Entry>,
}

/// A resolved mixin together with the namespace that holds it.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub mixin: &'a Mixin,
    pub namespace: &'a Registry,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a mixin.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Scope<'_>, &Args) -> MixinResult + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Entry::Mixin(Mixin::new(f)));
        self
    }

    /// Register (or replace) a namespace.
    pub fn register_namespace(&mut self, name: impl Into<String>, namespace: Registry) -> &mut Self {
        self.entries.insert(name.into(), Entry::Namespace(namespace));
        self
    }

    pub fn with<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Scope<'_>, &Args) -> MixinResult + Send + Sync + 'static,
    {
        self.register(name, f);
        self
    }

    pub fn with_namespace(mut self, name: impl Into<String>, namespace: Registry) -> Self {
        self.register_namespace(name, namespace);
        self
    }

    /// Move every entry of `other` into this registry, replacing entries
    /// with the same name.
    pub fn extend(&mut self, other: Registry) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a possibly dotted name such as `grid.row`.
    ///
    /// Each segment after the first must name an entry inside the namespace
    /// reached so far. Resolution fails if a segment is missing, if a segment
    /// follows a mixin, or if the final entry is a namespace.
    pub fn resolve(&self, name: &str) -> Option<Resolved<'_>> {
        let mut segments = name.split('.');
        let mut namespace = self;
        let mut entry = self.entries.get(segments.next()?)?;

        for segment in segments {
            let Entry::Namespace(inner) = entry else {
                return None;
            };
            namespace = inner;
            entry = inner.entries.get(segment)?;
        }

        match entry {
            Entry::Mixin(mixin) => Some(Resolved { mixin, namespace }),
            Entry::Namespace(_) => None,
        }
    }
}

/// What a running mixin sees: the namespace it was found in and the root
/// registry, for calling other mixins, and the active units.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    root: &'a Registry,
    namespace: &'a Registry,
    units: &'a Units,
}

impl<'a> Scope<'a> {
    /// A scope at the top level of `root`.
    pub fn new(root: &'a Registry, units: &'a Units) -> Self {
        Self::nested(root, root, units)
    }

    /// A scope for a mixin found in `namespace` somewhere under `root`.
    pub fn nested(root: &'a Registry, namespace: &'a Registry, units: &'a Units) -> Self {
        Self {
            root,
            namespace,
            units,
        }
    }

    pub fn units(&self) -> &'a Units {
        self.units
    }

    pub fn namespace(&self) -> &'a Registry {
        self.namespace
    }

    pub fn root(&self) -> &'a Registry {
        self.root
    }

    pub fn decl(&self, prop: impl Into<String>, value: impl Into<Value>) -> Declaration {
        Declaration::new(prop, value, self.units)
    }

    pub fn create_many(&self, props: &[&str], values: &Value, prefix: Option<&str>) -> Vec<Declaration> {
        Declaration::create_many(props, values, prefix, self.units)
    }

    pub fn create_many_from_map(
        &self,
        entries: &IndexMap<String, Value>,
        prefix: Option<&str>,
        ignored: &[&str],
    ) -> Vec<Declaration> {
        Declaration::create_many_from_map(entries, prefix, ignored, self.units)
    }

    /// Render a value with the default unit, as for an unnamed property.
    pub fn unit(&self, value: &Value) -> String {
        self.units.bare(value)
    }

    /// Invoke another mixin. `name` is looked up in this scope's namespace
    /// first, then from the root.
    pub fn call(&self, name: &str, args: impl Into<Args>) -> MixinResult {
        let resolved = self
            .namespace
            .resolve(name)
            .or_else(|| self.root.resolve(name))
            .ok_or_else(|| MixinError::NotFound {
                name: name.to_string(),
            })?;
        let scope = Scope::nested(self.root, resolved.namespace, self.units);
        resolved.mixin.call(&scope, &args.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputNode;
    use pretty_assertions::assert_eq;

    fn echo(tag: &'static str) -> impl Fn(&Scope<'_>, &Args) -> MixinResult + Send + Sync {
        move |scope: &Scope<'_>, _: &Args| Ok(scope.decl("tag", tag).into())
    }

    fn tag_of(output: MixinOutput) -> String {
        match output.first() {
            Some(OutputNode::Declaration(d)) => d.value().to_string(),
            other => panic!("expected a declaration, got {other:?}"),
        }
    }

    fn sample() -> Registry {
        Registry::new()
            .with("top", echo("top"))
            .with_namespace(
                "grid",
                Registry::new()
                    .with("row", echo("grid.row"))
                    .with_namespace("nested", Registry::new().with("cell", echo("cell"))),
            )
    }

    #[test]
    fn test_resolve_top_level() {
        let registry = sample();
        let units = Units::default();
        let resolved = registry.resolve("top").unwrap();
        let output = resolved.mixin.call(&Scope::new(resolved.namespace, &units), &Args::default());
        assert_eq!(tag_of(output.unwrap()), "top");
    }

    #[test]
    fn test_resolve_dotted() {
        let registry = sample();
        assert!(registry.resolve("grid.row").is_some());
        assert!(registry.resolve("grid.nested.cell").is_some());
    }

    #[test]
    fn test_resolve_failures() {
        let registry = sample();
        assert!(registry.resolve("missing").is_none());
        assert!(registry.resolve("grid").is_none());
        assert!(registry.resolve("grid.missing").is_none());
        assert!(registry.resolve("top.extra").is_none());
        assert!(registry.resolve("").is_none());
    }

    #[test]
    fn test_scope_calls_sibling_in_namespace() {
        let registry = Registry::new().with_namespace(
            "grid",
            Registry::new()
                .with("inner", echo("inner"))
                .with("outer", |scope: &Scope<'_>, _: &Args| scope.call("inner", Args::default())),
        );
        let units = Units::default();
        let scope = Scope::new(&registry, &units);
        assert_eq!(tag_of(scope.call("grid.outer", Args::default()).unwrap()), "inner");
    }

    #[test]
    fn test_scope_call_falls_back_to_root() {
        let registry = Registry::new().with("top", echo("top")).with_namespace(
            "ui",
            Registry::new()
                .with("top", echo("ui.top"))
                .with("card", |scope: &Scope<'_>, _: &Args| scope.call("top", Args::default()))
                .with("panel", |scope: &Scope<'_>, _: &Args| {
                    scope.call("grid.cell", Args::default())
                }),
        )
        .with_namespace("grid", Registry::new().with("cell", echo("cell")));
        let units = Units::default();
        let scope = Scope::new(&registry, &units);

        // Own namespace wins over the root
        assert_eq!(tag_of(scope.call("ui.card", Args::default()).unwrap()), "ui.top");
        assert_eq!(tag_of(scope.call("ui.panel", Args::default()).unwrap()), "cell");
    }

    #[test]
    fn test_scope_call_missing() {
        let registry = Registry::new();
        let units = Units::default();
        let err = Scope::new(&registry, &units)
            .call("nope", Args::default())
            .unwrap_err();
        assert_eq!(err, MixinError::NotFound { name: "nope".into() });
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = sample();
        registry.register("top", echo("replaced"));
        registry.extend(Registry::new().with("extra", echo("extra")));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["top", "grid", "extra"]);
    }
}
