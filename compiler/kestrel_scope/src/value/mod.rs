//! Variable values and lookup results.
//!
//! Two "nothing" states exist and must stay distinct:
//! - [`Value::Undef`]: a variable explicitly bound to `undef`
//! - [`Lookup::Undefined`]: no binding anywhere in the scope chain
//!
//! Both render as the empty string when interpolated, but raw lookups
//! preserve the difference.

use std::collections::BTreeMap;
use std::fmt;

/// A value bound to a variable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    Str(String),
    Bool(bool),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// Explicit `undef`.
    Undef,
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// The empty string, which is what unset variables interpolate to.
    #[inline]
    pub fn empty() -> Self {
        Value::Str(String::new())
    }

    #[inline]
    pub fn is_undef(&self) -> bool {
        matches!(self, Value::Undef)
    }

    /// Borrow the string contents if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Append the interpolated string form of this value to `out`.
    ///
    /// Lists concatenate their elements; maps concatenate each key followed
    /// by its value, in key order.
    pub fn write_interpolated(&self, out: &mut String) {
        match self {
            Value::Str(s) => out.push_str(s),
            Value::Bool(true) => out.push_str("true"),
            Value::Bool(false) => out.push_str("false"),
            Value::List(items) => {
                for item in items {
                    item.write_interpolated(out);
                }
            }
            Value::Map(entries) => {
                for (key, value) in entries {
                    out.push_str(key);
                    value.write_interpolated(out);
                }
            }
            Value::Undef => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_interpolated(&mut out);
        f.write_str(&out)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

/// How a lookup should treat missing and `undef` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LookupMode {
    /// Missing and `undef` both come back as the empty string.
    #[default]
    AsString,
    /// `undef` comes back as [`Value::Undef`], missing as [`Lookup::Undefined`].
    Raw,
}

/// Result of a variable lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The variable resolved to a value.
    Value(Value),
    /// No scope in the chain binds the variable.
    Undefined,
}

impl Lookup {
    /// The value, or `None` for [`Lookup::Undefined`].
    pub fn into_value(self) -> Option<Value> {
        match self {
            Lookup::Value(value) => Some(value),
            Lookup::Undefined => None,
        }
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Lookup::Undefined)
    }

    /// Interpolated string form; undefined renders as empty.
    pub fn to_interpolated(&self) -> String {
        match self {
            Lookup::Value(value) => value.to_string(),
            Lookup::Undefined => String::new(),
        }
    }
}
