//! Scope construction options.
//!
//! The evaluator describes a new scope with a small option map. Only the
//! keys below are recognised; anything else is a construction error.
//!
//! | key | value |
//! |-----|-------|
//! | `namespace` | initial namespace |
//! | `type` | scope type (class or define name, `""` for main) |
//! | `name` | scope name (resource title, node name) |
//! | `parent` | parent scope id |
//! | `source` | class or define that created the scope |
//! | `keyword` | declaring keyword (`class`, `define`, `node`) |
//! | `exported`, `virtual`, `top`, `translated` | flags |
//! | `level` | explicit depth |
//! | `configuration` | catalog handle, ignored (always passed explicitly) |

use crate::{ScopeError, ScopeId, ScopeResult};

/// A raw option value as supplied by the evaluator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    Str(String),
    Bool(bool),
    Int(u32),
    Scope(ScopeId),
    /// Placeholder for the catalog handle.
    Catalog,
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<u32> for OptionValue {
    fn from(n: u32) -> Self {
        OptionValue::Int(n)
    }
}

impl From<ScopeId> for OptionValue {
    fn from(id: ScopeId) -> Self {
        OptionValue::Scope(id)
    }
}

/// Validated options for a new scope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeOptions {
    pub namespace: Option<String>,
    pub type_name: Option<String>,
    pub name: Option<String>,
    pub parent: Option<ScopeId>,
    pub source: Option<String>,
    pub keyword: Option<String>,
    pub exported: bool,
    pub is_virtual: bool,
    pub top: bool,
    pub translated: bool,
    pub level: Option<u32>,
}

impl ScopeOptions {
    /// Build options from `(key, value)` pairs, rejecting unknown keys.
    pub fn from_pairs<I, K>(pairs: I) -> ScopeResult<Self>
    where
        I: IntoIterator<Item = (K, OptionValue)>,
        K: AsRef<str>,
    {
        let mut options = ScopeOptions::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            match key {
                "namespace" => options.namespace = Some(expect_str(key, value)?),
                "type" => options.type_name = Some(expect_str(key, value)?),
                "name" => options.name = Some(expect_str(key, value)?),
                "source" => options.source = Some(expect_str(key, value)?),
                "keyword" => options.keyword = Some(expect_str(key, value)?),
                "exported" => options.exported = expect_bool(key, value)?,
                "virtual" => options.is_virtual = expect_bool(key, value)?,
                "top" => options.top = expect_bool(key, value)?,
                "translated" => options.translated = expect_bool(key, value)?,
                "level" => match value {
                    OptionValue::Int(level) => options.level = Some(level),
                    other => return Err(wrong_type(key, "an integer", &other)),
                },
                "parent" => match value {
                    OptionValue::Scope(id) => options.parent = Some(id),
                    other => return Err(wrong_type(key, "a scope", &other)),
                },
                "configuration" => {}
                unknown => {
                    return Err(ScopeError::construction(format!(
                        "unknown scope option `{unknown}`"
                    )))
                }
            }
        }
        Ok(options)
    }

    /// Options for a scope of the given type.
    pub fn typed(type_name: impl Into<String>) -> Self {
        ScopeOptions {
            type_name: Some(type_name.into()),
            ..ScopeOptions::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

fn expect_str(key: &str, value: OptionValue) -> ScopeResult<String> {
    match value {
        OptionValue::Str(s) => Ok(s),
        other => Err(wrong_type(key, "a string", &other)),
    }
}

fn expect_bool(key: &str, value: OptionValue) -> ScopeResult<bool> {
    match value {
        OptionValue::Bool(b) => Ok(b),
        other => Err(wrong_type(key, "a boolean", &other)),
    }
}

#[cold]
fn wrong_type(key: &str, expected: &str, found: &OptionValue) -> ScopeError {
    ScopeError::construction(format!(
        "scope option `{key}` expects {expected}, found {found:?}"
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
