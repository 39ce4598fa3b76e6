//! The slice of the resource model the scope engine touches.
//!
//! Resources are owned by the catalog. Scopes only stamp the
//! exported/virtual flags on them when registering, and look them up by
//! reference (`File[/etc/motd]`).

use std::collections::BTreeMap;
use std::fmt;

use kestrel_diagnostic::SourceLocation;

use crate::Value;

/// A reference to a resource: its type and title.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceRef {
    pub type_name: String,
    pub title: String,
}

impl ResourceRef {
    pub fn new(type_name: impl Into<String>, title: impl Into<String>) -> Self {
        ResourceRef {
            type_name: type_name.into(),
            title: title.into(),
        }
    }

    /// Parse `Type[title]`. Returns `None` for anything else.
    pub fn parse(reference: &str) -> Option<Self> {
        let (type_name, rest) = reference.split_once('[')?;
        let title = rest.strip_suffix(']')?;
        if type_name.is_empty() || title.is_empty() {
            return None;
        }
        Some(ResourceRef::new(type_name, title))
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.type_name, self.title)
    }
}

/// A declared resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    pub reference: ResourceRef,
    pub parameters: BTreeMap<String, Value>,
    pub exported: bool,
    pub is_virtual: bool,
    pub location: SourceLocation,
}

impl Resource {
    pub fn new(type_name: impl Into<String>, title: impl Into<String>) -> Self {
        Resource {
            reference: ResourceRef::new(type_name, title),
            parameters: BTreeMap::new(),
            exported: false,
            is_virtual: false,
            location: SourceLocation::unknown(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

#[cfg(test)]
mod tests;
