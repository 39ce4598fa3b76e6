//! Source locations for manifest-level diagnostics.
//!
//! The configuration compiler reports positions as `file:line` pairs taken
//! from the AST node being evaluated. Either half may be missing: values
//! set by the driver (facts, command-line settings) have no file, and some
//! AST nodes carry no line.

use std::fmt;

/// Where a binding, default, or string literal came from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Manifest path, if known.
    pub file: Option<String>,
    /// 1-based line number, if known.
    pub line: Option<u32>,
}

impl SourceLocation {
    /// Create a location with both file and line.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        SourceLocation {
            file: Some(file.into()),
            line: Some(line),
        }
    }

    /// A location with no information at all.
    pub fn unknown() -> Self {
        SourceLocation::default()
    }

    /// A location with only a line number.
    pub fn at_line(line: u32) -> Self {
        SourceLocation {
            file: None,
            line: Some(line),
        }
    }

    /// Returns `true` when neither file nor line is known.
    pub fn is_unknown(&self) -> bool {
        self.file.is_none() && self.line.is_none()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{file}:{line}"),
            (Some(file), None) => write!(f, "{file}"),
            (None, Some(line)) => write!(f, "line {line}"),
            (None, None) => write!(f, "<unknown>"),
        }
    }
}
