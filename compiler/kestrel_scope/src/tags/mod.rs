//! Scope tags.
//!
//! A scope's effective tags are its own tags, its type, and everything its
//! ancestors carry. Like defaults, they are recomputed on every call.

use std::collections::BTreeSet;

use crate::{Catalog, Scope, ScopeError, ScopeResult};

/// Check a tag against `[A-Za-z0-9_][-A-Za-z0-9_]*`.
pub fn is_valid_tag(tag: &str) -> bool {
    let mut bytes = tag.bytes();
    let Some(first) = bytes.next() else {
        return false;
    };
    is_tag_start(first) && bytes.all(|b| is_tag_start(b) || b == b'-')
}

#[inline]
fn is_tag_start(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl Scope {
    /// Add tags to this scope. Adding an existing tag is a no-op.
    ///
    /// Tags before an invalid one stay added.
    pub fn add_tags<I, S>(&mut self, names: I) -> ScopeResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if !is_valid_tag(name) {
                return Err(ScopeError::InvalidTag {
                    tag: name.to_string(),
                });
            }
            if !self.tags.contains(name) {
                self.tags.insert(name.to_string());
            }
        }
        Ok(())
    }

    /// Tags set directly on this scope.
    pub fn local_tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Own tags, type, and all ancestors' tags, sorted and deduplicated.
    pub fn effective_tags<C>(&self, catalog: &C) -> ScopeResult<Vec<String>>
    where
        C: Catalog + ?Sized,
    {
        let mut tags = BTreeSet::new();
        self.collect_tags(catalog, &mut tags)?;
        Ok(tags.into_iter().collect())
    }

    fn collect_tags<C>(&self, catalog: &C, into: &mut BTreeSet<String>) -> ScopeResult<()>
    where
        C: Catalog + ?Sized,
    {
        into.extend(self.tags.iter().cloned());
        if let Some(type_name) = self.type_name().filter(|t| !t.is_empty()) {
            into.insert(type_name.to_string());
        }
        match self.parent_scope(catalog)? {
            Some(parent) => parent.collect_tags(catalog, into),
            None => Ok(()),
        }
    }
}
