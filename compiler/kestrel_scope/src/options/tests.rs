use super::*;
use pretty_assertions::assert_eq;

#[test]
fn recognised_keys_populate_fields() {
    let options = ScopeOptions::from_pairs([
        ("type", OptionValue::from("apache::vhost")),
        ("name", OptionValue::from("www")),
        ("namespace", OptionValue::from("apache")),
        ("keyword", OptionValue::from("define")),
        ("source", OptionValue::from("apache::vhost")),
        ("exported", OptionValue::from(true)),
        ("level", OptionValue::from(3u32)),
        ("parent", OptionValue::from(ScopeId::new(0))),
        ("configuration", OptionValue::Catalog),
    ])
    .unwrap();

    assert_eq!(options.type_name.as_deref(), Some("apache::vhost"));
    assert_eq!(options.name.as_deref(), Some("www"));
    assert_eq!(options.namespace.as_deref(), Some("apache"));
    assert_eq!(options.keyword.as_deref(), Some("define"));
    assert!(options.exported);
    assert!(!options.is_virtual);
    assert_eq!(options.level, Some(3));
    assert_eq!(options.parent, Some(ScopeId::new(0)));
}

#[test]
fn unknown_key_is_construction_error() {
    let err = ScopeOptions::from_pairs([("colour", OptionValue::from("red"))]).unwrap_err();
    assert_eq!(
        err,
        ScopeError::construction("unknown scope option `colour`")
    );
}

#[test]
fn only_configuration_names_the_catalog_handle() {
    assert!(ScopeOptions::from_pairs([("configuration", OptionValue::Catalog)]).is_ok());
    let err = ScopeOptions::from_pairs([("compiler", OptionValue::Catalog)]).unwrap_err();
    assert_eq!(
        err,
        ScopeError::construction("unknown scope option `compiler`")
    );
}

#[test]
fn wrongly_typed_value_is_construction_error() {
    let err = ScopeOptions::from_pairs([("virtual", OptionValue::from("yes"))]).unwrap_err();
    assert!(matches!(err, ScopeError::Construction { .. }));

    let err = ScopeOptions::from_pairs([("level", OptionValue::from(true))]).unwrap_err();
    assert!(matches!(err, ScopeError::Construction { .. }));
}

#[test]
fn empty_pairs_give_defaults() {
    let options = ScopeOptions::from_pairs(Vec::<(&str, OptionValue)>::new()).unwrap();
    assert_eq!(options, ScopeOptions::default());
}

#[test]
fn builder_helpers() {
    let options = ScopeOptions::typed("web")
        .with_name("frontend")
        .with_namespace("web");
    assert_eq!(options.type_name.as_deref(), Some("web"));
    assert_eq!(options.name.as_deref(), Some("frontend"));
    assert_eq!(options.namespace.as_deref(), Some("web"));
}
