//! Error codes for all compiler diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E3001`) with the first digit
//! indicating the compiler phase.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E3xxx: Scope and symbol resolution errors
/// - E9xxx: Internal compiler errors
/// - W3xxx: Scope and interpolation warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Scope Errors (E3xxx)
    /// Variable reassigned in the same scope
    E3001,
    /// Resource default set twice for the same parameter
    E3002,
    /// Qualified name does not resolve to a class
    E3003,
    /// Class exists but has not been evaluated
    E3004,
    /// Invalid tag
    E3005,
    /// String could not be interpolated
    E3006,
    /// Invalid scope construction
    E3007,

    // Internal Errors (E9xxx)
    /// Internal invariant violated
    E9001,

    // Warnings
    /// Unrecognised escape sequence in a string
    W3001,
}

impl ErrorCode {
    /// Every error code, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E3006,
        ErrorCode::E3007,
        ErrorCode::E9001,
        ErrorCode::W3001,
    ];

    /// Get the numeric code as a string (e.g., "E3001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E9001 => "E9001",
            ErrorCode::W3001 => "W3001",
        }
    }

    /// Short human-readable summary of the code.
    pub fn summary(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "variable reassigned in the same scope",
            ErrorCode::E3002 => "duplicate resource default",
            ErrorCode::E3003 => "unresolved class in qualified name",
            ErrorCode::E3004 => "class has not been evaluated",
            ErrorCode::E3005 => "invalid tag",
            ErrorCode::E3006 => "string could not be interpolated",
            ErrorCode::E3007 => "invalid scope construction",
            ErrorCode::E9001 => "internal compiler error",
            ErrorCode::W3001 => "unrecognised escape sequence",
        }
    }

    /// Check if this is a scope resolution error (E3xxx range).
    pub fn is_scope_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E3001
                | ErrorCode::E3002
                | ErrorCode::E3003
                | ErrorCode::E3004
                | ErrorCode::E3005
                | ErrorCode::E3006
                | ErrorCode::E3007
        )
    }

    /// Check if this is an internal compiler error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }

    /// Check if this is a warning code (Wxxx range).
    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W3001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E3001"` or `"w3001"`.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
