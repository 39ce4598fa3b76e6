//! Property-based tests for scope bindings, tags and interpolation.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use kestrel_scope::registration::child_scope;
use kestrel_scope::{
    is_valid_tag, BufferSink, Catalog, InMemoryCatalog, ScopeError, ScopeOptions, SourceLocation,
    Value,
};
use proptest::prelude::*;

// -- Strategies --

fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_][a-z0-9_]{0,12}").expect("valid regex")
}

fn tag_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9_][-A-Za-z0-9_]{0,20}").expect("valid regex")
}

/// Text that contains neither `$` nor `\`.
fn plain_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^$\\\\]{0,64}").expect("valid regex")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// A second binding in the same scope always fails and never changes
    /// the first value.
    #[test]
    fn prop_write_once(name in name_strategy(), first in ".{0,16}", second in ".{0,16}") {
        let mut catalog = InMemoryCatalog::default();
        let top = catalog.top();
        let scope = catalog.scope_mut(top).unwrap();
        scope.set(name.as_str(), first.as_str(), SourceLocation::unknown()).unwrap();

        let err = scope
            .set(name.as_str(), second.as_str(), SourceLocation::unknown())
            .unwrap_err();
        let is_duplicate = matches!(err, ScopeError::DuplicateBinding { .. });
        prop_assert!(is_duplicate);
        let expected = Value::from(first);
        prop_assert_eq!(scope.local_value(&name), Some(&expected));
    }

    /// A child sees every parent binding it does not shadow.
    #[test]
    fn prop_parent_fallback(name in name_strategy(), value in ".{0,16}", depth in 1usize..6) {
        let mut catalog = InMemoryCatalog::default();
        let top = catalog.top();
        catalog
            .scope_mut(top)
            .unwrap()
            .set(name.as_str(), value.as_str(), SourceLocation::unknown())
            .unwrap();

        let mut current = top;
        for _ in 0..depth {
            current = child_scope(&mut catalog, current, ScopeOptions::default()).unwrap();
        }
        let scope = catalog.scope(current).unwrap();
        prop_assert_eq!(scope.level() as usize, depth + 1);
        prop_assert_eq!(scope.lookup_string(&catalog, &name).unwrap(), value);
    }

    /// Every string matching the tag grammar is accepted.
    #[test]
    fn prop_valid_tags_accepted(tag in tag_strategy()) {
        prop_assert!(is_valid_tag(&tag));
        let mut catalog = InMemoryCatalog::default();
        let top = catalog.top();
        prop_assert!(catalog.scope_mut(top).unwrap().add_tags([tag.as_str()]).is_ok());
    }

    /// A tag containing a character outside the grammar is rejected.
    #[test]
    fn prop_invalid_tags_rejected(prefix in tag_strategy(), bad in "[ .:/@!*]") {
        let tag = format!("{prefix}{bad}");
        prop_assert!(!is_valid_tag(&tag));
        let dashed = format!("-{prefix}");
        prop_assert!(!is_valid_tag(&dashed));
    }

    /// Text without `$` or `\` interpolates to itself with no warnings.
    #[test]
    fn prop_plain_text_identity(text in plain_text_strategy()) {
        let catalog = InMemoryCatalog::default();
        let sink = BufferSink::new();
        let out = catalog
            .scope(catalog.top())
            .unwrap()
            .interpolate(&catalog, &text, &SourceLocation::unknown(), &sink)
            .unwrap();
        prop_assert_eq!(out, text);
        prop_assert!(sink.is_empty());
    }

    /// A braced reference interpolates to the bound value.
    #[test]
    fn prop_reference_substitution(
        name in name_strategy(),
        value in "[^$\\\\]{0,16}",
        before in "[a-z ]{0,8}",
        after in "[a-z ]{0,8}",
    ) {
        let mut catalog = InMemoryCatalog::default();
        let top = catalog.top();
        catalog
            .scope_mut(top)
            .unwrap()
            .set(name.as_str(), value.as_str(), SourceLocation::unknown())
            .unwrap();
        let text = format!("{before}${{{name}}}{after}");
        let out = catalog
            .scope(top)
            .unwrap()
            .interpolate(&catalog, &text, &SourceLocation::unknown(), &BufferSink::new())
            .unwrap();
        prop_assert_eq!(out, format!("{before}{value}{after}"));
    }
}
