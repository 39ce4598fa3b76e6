//! Diagnostic system for the Kestrel configuration compiler.
//!
//! Every fatal error and non-fatal warning produced while compiling a
//! configuration program is described by a [`Diagnostic`]:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Source location (which manifest file and line)
//! - Notes and suggestions (why, and how to fix it)
//!
//! Warnings are not buffered by the compiler itself; they are handed to a
//! [`DiagnosticSink`], which forwards them to `tracing` or captures them.

mod diagnostic;
mod error_code;
mod location;
pub mod sink;
pub mod tracing_setup;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use location::SourceLocation;
pub use sink::{BufferSink, DiagnosticSink, SilentSink, TracingSink};
pub use tracing_setup::init_tracing;
