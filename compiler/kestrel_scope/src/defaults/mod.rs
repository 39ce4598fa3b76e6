//! Resource type defaults.
//!
//! `File { mode => '0644' }` style defaults are recorded per scope and per
//! resource type. The defaults that apply in a scope are its own entries
//! laid over everything its ancestors set, so the closest scope wins for
//! each parameter.
//!
//! Collected defaults are never cached: ancestors may still gain defaults
//! while a descendant is being evaluated.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use kestrel_diagnostic::SourceLocation;

use crate::{Catalog, Scope, ScopeError, ScopeResult, Value};

/// One default parameter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultSpec {
    pub param: String,
    pub value: Value,
    pub location: SourceLocation,
}

impl DefaultSpec {
    pub fn new(param: impl Into<String>, value: impl Into<Value>) -> Self {
        DefaultSpec {
            param: param.into(),
            value: value.into(),
            location: SourceLocation::unknown(),
        }
    }

    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

/// Defaults for one resource type, keyed by parameter name.
pub type DefaultMap = BTreeMap<String, DefaultSpec>;

/// Defaults set directly in one scope.
#[derive(Clone, Debug, Default)]
pub struct DefaultTable {
    by_type: FxHashMap<String, DefaultMap>,
}

impl DefaultTable {
    /// Record a default; a parameter may be set once per type.
    pub fn insert(&mut self, type_name: &str, spec: DefaultSpec) -> ScopeResult<()> {
        let params = self.by_type.entry(type_name.to_string()).or_default();
        if params.contains_key(&spec.param) {
            return Err(ScopeError::DuplicateDefault {
                type_name: type_name.to_string(),
                param: spec.param,
                location: spec.location,
            });
        }
        params.insert(spec.param.clone(), spec);
        Ok(())
    }

    /// Defaults set locally for `type_name`.
    pub fn get(&self, type_name: &str) -> Option<&DefaultMap> {
        self.by_type.get(type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.values().all(BTreeMap::is_empty)
    }
}

impl Scope {
    /// Set one or more defaults for `type_name` in this scope.
    ///
    /// Values are not checked here; whoever applies the default does that.
    /// Specs before a duplicate stay recorded.
    pub fn set_defaults<I>(&mut self, type_name: &str, specs: I) -> ScopeResult<()>
    where
        I: IntoIterator<Item = DefaultSpec>,
    {
        for spec in specs {
            self.defaults.insert(type_name, spec)?;
        }
        Ok(())
    }

    /// Defaults set in this scope alone.
    pub fn local_defaults(&self, type_name: &str) -> Option<&DefaultMap> {
        self.defaults.get(type_name)
    }

    /// All defaults in effect for `type_name`, closer scopes winning.
    #[tracing::instrument(level = "trace", skip(self, catalog), fields(scope = %self.id))]
    pub fn collect_defaults<C>(&self, catalog: &C, type_name: &str) -> ScopeResult<DefaultMap>
    where
        C: Catalog + ?Sized,
    {
        let mut merged = match self.parent_scope(catalog)? {
            Some(parent) => parent.collect_defaults(catalog, type_name)?,
            None => DefaultMap::new(),
        };
        if let Some(local) = self.defaults.get(type_name) {
            for (param, spec) in local {
                merged.insert(param.clone(), spec.clone());
            }
        }
        Ok(merged)
    }
}
