//! End-to-end behaviour of a scope tree driven through the in-memory
//! catalog, the way an evaluator would use it.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use kestrel_scope::registration::{child_scope, register_class, register_resource};
use kestrel_scope::{
    BufferSink, Catalog, ClassDecl, DefaultSpec, InMemoryCatalog, Lookup, LookupMode, Resource,
    ScopeError, ScopeId, ScopeOptions, SourceLocation, TypeTable, Value,
};
use pretty_assertions::assert_eq;

fn here() -> SourceLocation {
    SourceLocation::unknown()
}

fn bind(catalog: &mut InMemoryCatalog, scope: ScopeId, name: &str, value: &str) {
    catalog
        .scope_mut(scope)
        .expect("scope exists")
        .set(name, value, here())
        .unwrap();
}

fn lookup_str(catalog: &InMemoryCatalog, scope: ScopeId, name: &str) -> String {
    catalog
        .scope(scope)
        .unwrap()
        .lookup_string(catalog, name)
        .unwrap()
}

#[test]
fn write_once_keeps_first_value() {
    let mut catalog = InMemoryCatalog::default();
    let top = catalog.top();
    bind(&mut catalog, top, "x", "v1");

    let err = catalog
        .scope_mut(top)
        .unwrap()
        .set("x", "v2", here())
        .unwrap_err();
    assert!(matches!(err, ScopeError::DuplicateBinding { .. }));
    assert_eq!(lookup_str(&catalog, top, "x"), "v1");
}

#[test]
fn parent_fallback() {
    let mut catalog = InMemoryCatalog::default();
    let root = catalog.top();
    let child = child_scope(&mut catalog, root, ScopeOptions::default()).unwrap();
    bind(&mut catalog, root, "x", "1");

    assert_eq!(lookup_str(&catalog, child, "x"), "1");
}

#[test]
fn shadowing() {
    let mut catalog = InMemoryCatalog::default();
    let root = catalog.top();
    let child = child_scope(&mut catalog, root, ScopeOptions::default()).unwrap();
    bind(&mut catalog, root, "x", "1");
    bind(&mut catalog, child, "x", "2");

    assert_eq!(lookup_str(&catalog, child, "x"), "2");
    assert_eq!(lookup_str(&catalog, root, "x"), "1");
}

#[test]
fn qualified_lookup_from_any_scope() {
    kestrel_diagnostic::init_tracing();
    let registry = TypeTable::new().with_class(ClassDecl::class("foo::bar"));
    let mut catalog = InMemoryCatalog::new(registry);
    let root = catalog.top();
    let bar = child_scope(
        &mut catalog,
        root,
        ScopeOptions::typed("foo::bar").with_namespace("foo::bar"),
    )
    .unwrap();
    register_class(&mut catalog, bar, &ClassDecl::class("foo::bar")).unwrap();
    bind(&mut catalog, bar, "y", "z");

    let sibling = child_scope(&mut catalog, root, ScopeOptions::typed("other")).unwrap();
    let nested = child_scope(&mut catalog, sibling, ScopeOptions::default()).unwrap();
    for scope in [root, bar, sibling, nested] {
        assert_eq!(lookup_str(&catalog, scope, "foo::bar::y"), "z");
    }

    let err = catalog
        .scope(nested)
        .unwrap()
        .lookup(&catalog, "other::class::y", LookupMode::AsString)
        .unwrap_err();
    assert!(matches!(err, ScopeError::UnresolvedClass { .. }));
}

#[test]
fn defaults_override() {
    let mut catalog = InMemoryCatalog::default();
    let root = catalog.top();
    let child = child_scope(&mut catalog, root, ScopeOptions::default()).unwrap();
    catalog
        .scope_mut(root)
        .unwrap()
        .set_defaults("File", [DefaultSpec::new("mode", "644")])
        .unwrap();
    catalog
        .scope_mut(child)
        .unwrap()
        .set_defaults("File", [DefaultSpec::new("mode", "755")])
        .unwrap();

    let child_defaults = catalog
        .scope(child)
        .unwrap()
        .collect_defaults(&catalog, "File")
        .unwrap();
    let root_defaults = catalog
        .scope(root)
        .unwrap()
        .collect_defaults(&catalog, "File")
        .unwrap();
    assert_eq!(child_defaults["mode"].value, Value::from("755"));
    assert_eq!(root_defaults["mode"].value, Value::from("644"));
}

#[test]
fn tag_aggregation() {
    let mut catalog = InMemoryCatalog::default();
    let top = catalog.top();
    let base = child_scope(&mut catalog, top, ScopeOptions::typed("base")).unwrap();
    let web = child_scope(&mut catalog, base, ScopeOptions::typed("web")).unwrap();
    catalog.scope_mut(base).unwrap().add_tags(["a"]).unwrap();
    catalog.scope_mut(web).unwrap().add_tags(["b", "a"]).unwrap();

    let tags = catalog
        .scope(web)
        .unwrap()
        .effective_tags(&catalog)
        .unwrap();
    assert_eq!(tags, vec!["a", "b", "base", "web"]);
}

#[test]
fn interpolation_round_trip() {
    kestrel_diagnostic::init_tracing();
    let mut catalog = InMemoryCatalog::default();
    let top = catalog.top();
    bind(&mut catalog, top, "x", "42");

    let sink = BufferSink::new();
    let out = catalog
        .scope(top)
        .unwrap()
        .interpolate(&catalog, "Value is ${x}\\n", &here(), &sink)
        .unwrap();
    assert_eq!(out, "Value is 42\n");
    assert!(sink.is_empty());
}

#[test]
fn escape_passthrough_warns() {
    let catalog = InMemoryCatalog::default();
    let sink = BufferSink::new();
    let out = catalog
        .scope(catalog.top())
        .unwrap()
        .interpolate(&catalog, "\\q", &here(), &sink)
        .unwrap();
    assert_eq!(out, "\\q");
    assert_eq!(sink.len(), 1);
    assert!(sink.diagnostics()[0].is_warning());
}

#[test]
fn line_continuation() {
    let catalog = InMemoryCatalog::default();
    let sink = BufferSink::new();
    let out = catalog
        .scope(catalog.top())
        .unwrap()
        .interpolate(&catalog, "a\\\nb", &here(), &sink)
        .unwrap();
    assert_eq!(out, "ab");
}

#[test]
fn virtual_and_exported_propagation() {
    let mut catalog = InMemoryCatalog::default();
    let top = catalog.top();
    let exported = child_scope(
        &mut catalog,
        top,
        ScopeOptions {
            exported: true,
            ..ScopeOptions::default()
        },
    )
    .unwrap();
    let virtual_only = child_scope(
        &mut catalog,
        top,
        ScopeOptions {
            is_virtual: true,
            ..ScopeOptions::default()
        },
    )
    .unwrap();

    let exported_ref =
        register_resource(&mut catalog, exported, Resource::new("Host", "a")).unwrap();
    let virtual_ref =
        register_resource(&mut catalog, virtual_only, Resource::new("User", "b")).unwrap();

    assert!(catalog.find_resource(&exported_ref).unwrap().exported);
    assert!(catalog.find_resource(&virtual_ref).unwrap().is_virtual);
    assert!(catalog.scope(exported).unwrap().is_virtual());
    assert!(catalog.scope(virtual_only).unwrap().is_virtual());
    assert!(!catalog.scope(virtual_only).unwrap().is_exported());
}

#[test]
fn raw_lookup_tells_undef_from_unbound() {
    let mut catalog = InMemoryCatalog::default();
    let top = catalog.top();
    catalog
        .scope_mut(top)
        .unwrap()
        .set("gone", Value::Undef, here())
        .unwrap();
    let child = child_scope(&mut catalog, top, ScopeOptions::default()).unwrap();
    let scope = catalog.scope(child).unwrap();

    assert_eq!(
        scope.lookup(&catalog, "gone", LookupMode::Raw).unwrap(),
        Lookup::Value(Value::Undef)
    );
    assert_eq!(
        scope.lookup(&catalog, "never", LookupMode::Raw).unwrap(),
        Lookup::Undefined
    );
    assert_eq!(lookup_str(&catalog, child, "gone"), "");
    assert_eq!(lookup_str(&catalog, child, "never"), "");
}

#[test]
fn options_from_evaluator_pairs() {
    use kestrel_scope::OptionValue;

    let mut catalog = InMemoryCatalog::default();
    let top = catalog.top();
    let options = ScopeOptions::from_pairs([
        ("type", OptionValue::from("apache::vhost")),
        ("name", OptionValue::from("site")),
        ("virtual", OptionValue::from(true)),
        ("configuration", OptionValue::Catalog),
    ])
    .unwrap();
    let id = child_scope(&mut catalog, top, options).unwrap();
    let scope = catalog.scope(id).unwrap();
    assert_eq!(scope.to_string(), "Scope(apache::vhost[site])");
    assert!(scope.is_virtual());

    let err = ScopeOptions::from_pairs([("colour", OptionValue::from("red"))]).unwrap_err();
    assert!(matches!(err, ScopeError::Construction { .. }));
}
