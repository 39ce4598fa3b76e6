//! Errors raised by scope operations.
//!
//! Every variant is fatal to the current compilation. The evaluator that
//! drives the scope tree attaches wider context (which class or resource
//! was being evaluated) and reports the error; nothing here retries or
//! rolls back partial state.

use kestrel_diagnostic::{Diagnostic, ErrorCode, SourceLocation};

/// A fatal scope error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    /// A variable was bound twice in the same scope.
    #[error("cannot reassign variable `{name}`")]
    DuplicateBinding {
        name: String,
        location: SourceLocation,
        previous: SourceLocation,
    },
    /// A resource default was set twice for the same parameter in one scope.
    #[error("default for parameter `{param}` of `{type_name}` is already set in this scope")]
    DuplicateDefault {
        type_name: String,
        param: String,
        location: SourceLocation,
    },
    /// The namespace of a qualified variable names no known class.
    #[error("could not find class `{class}` for variable `{variable}`")]
    UnresolvedClass { class: String, variable: String },
    /// The class exists but has not produced a scope yet.
    #[error("class `{class}` has not been evaluated, so `{variable}` cannot be looked up")]
    UnevaluatedClass { class: String, variable: String },
    /// Tag does not match `[A-Za-z0-9_][-A-Za-z0-9_]*`.
    #[error("invalid tag `{tag}`")]
    InvalidTag { tag: String },
    /// The interpolation scanner could not make progress.
    #[error("could not interpolate string `{text}`")]
    StringParse {
        text: String,
        location: SourceLocation,
    },
    /// Unknown or ill-typed scope option.
    #[error("invalid scope construction: {message}")]
    Construction { message: String },
    /// An internal invariant was violated.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ScopeError {
    #[cold]
    pub fn construction(message: impl Into<String>) -> Self {
        ScopeError::Construction {
            message: message.into(),
        }
    }

    #[cold]
    pub fn internal(message: impl Into<String>) -> Self {
        ScopeError::Internal {
            message: message.into(),
        }
    }

    /// Stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ScopeError::DuplicateBinding { .. } => ErrorCode::E3001,
            ScopeError::DuplicateDefault { .. } => ErrorCode::E3002,
            ScopeError::UnresolvedClass { .. } => ErrorCode::E3003,
            ScopeError::UnevaluatedClass { .. } => ErrorCode::E3004,
            ScopeError::InvalidTag { .. } => ErrorCode::E3005,
            ScopeError::StringParse { .. } => ErrorCode::E3006,
            ScopeError::Construction { .. } => ErrorCode::E3007,
            ScopeError::Internal { .. } => ErrorCode::E9001,
        }
    }

    /// Convert to a diagnostic with helpful notes.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            ScopeError::DuplicateBinding {
                location, previous, ..
            } => {
                let diag = diag.with_location(location.clone());
                if previous.is_unknown() {
                    diag
                } else {
                    diag.with_note(format!("previously set at {previous}"))
                }
            }
            ScopeError::DuplicateDefault { location, .. } => diag.with_location(location.clone()),
            ScopeError::UnresolvedClass { class, .. } => diag
                .with_suggestion(format!("check that class `{class}` is declared and spelled correctly")),
            ScopeError::UnevaluatedClass { class, .. } => {
                diag.with_suggestion(format!("include `{class}` before referring to its variables"))
            }
            ScopeError::InvalidTag { .. } => diag.with_note(
                "tags may contain only letters, digits, underscores and dashes, and may not start with a dash",
            ),
            ScopeError::StringParse { location, .. } => diag.with_location(location.clone()),
            ScopeError::Construction { .. } => diag,
            ScopeError::Internal { .. } => diag.with_note("this is a bug in the compiler"),
        }
    }
}

/// Result type for scope operations.
pub type ScopeResult<T> = Result<T, ScopeError>;
