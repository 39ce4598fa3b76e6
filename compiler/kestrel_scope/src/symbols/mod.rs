//! Per-scope symbol table with write-once bindings.
//!
//! A name bound in a scope can never be rebound in that same scope. A
//! descendant scope may shadow it with its own binding.

use rustc_hash::FxHashMap;

use kestrel_diagnostic::SourceLocation;

use crate::{ScopeError, ScopeResult, Value};

/// A variable binding.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Binding {
    value: Value,
    /// Where the binding was made, for reassignment errors.
    location: SourceLocation,
}

/// Variable bindings of one scope.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    bindings: FxHashMap<String, Binding>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Bind `name` to `value`.
    ///
    /// Fails with [`ScopeError::DuplicateBinding`] if `name` is already bound
    /// here; the existing binding is left untouched.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: Value,
        location: SourceLocation,
    ) -> ScopeResult<()> {
        let name = name.into();
        if let Some(existing) = self.bindings.get(&name) {
            return Err(ScopeError::DuplicateBinding {
                name,
                location,
                previous: existing.location.clone(),
            });
        }
        self.bindings.insert(name, Binding { value, location });
        Ok(())
    }

    /// The value bound locally to `name`, ignoring ancestors.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name).map(|binding| &binding.value)
    }

    /// Where `name` was bound, if it is bound here.
    pub fn location_of(&self, name: &str) -> Option<&SourceLocation> {
        self.bindings.get(name).map(|binding| &binding.location)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Remove a local binding. Only for test and debug resets.
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name).map(|binding| binding.value)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over local bindings in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings
            .iter()
            .map(|(name, binding)| (name.as_str(), &binding.value))
    }
}
