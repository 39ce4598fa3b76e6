//! Sinks for non-fatal diagnostics.
//!
//! The compiler never buffers or formats warnings itself. It builds a
//! [`Diagnostic`] and hands it to whatever sink the driver installed:
//! - [`TracingSink`]: forwards to `tracing` (default)
//! - [`BufferSink`]: captures for tests and embedding
//! - [`SilentSink`]: discards everything

use parking_lot::Mutex;

use crate::{Diagnostic, Severity};

/// Destination for diagnostics emitted during evaluation.
pub trait DiagnosticSink {
    /// Report one diagnostic.
    fn emit(&self, diagnostic: Diagnostic);
}

/// Default sink that logs through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        let location = diagnostic.location.clone().unwrap_or_default();
        match diagnostic.severity {
            Severity::Error => tracing::error!(
                code = %diagnostic.code,
                %location,
                "{}",
                diagnostic.message
            ),
            Severity::Warning => tracing::warn!(
                code = %diagnostic.code,
                %location,
                "{}",
                diagnostic.message
            ),
            Severity::Note | Severity::Help => tracing::info!(
                code = %diagnostic.code,
                %location,
                "{}",
                diagnostic.message
            ),
        }
    }
}

/// Sink that captures diagnostics in memory.
#[derive(Debug, Default)]
pub struct BufferSink {
    buffer: Mutex<Vec<Diagnostic>>,
}

impl BufferSink {
    /// Create an empty buffer sink.
    pub fn new() -> Self {
        BufferSink::default()
    }

    /// Snapshot of everything captured so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.buffer.lock().clone()
    }

    /// Remove and return everything captured so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.buffer.lock())
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }
}

impl DiagnosticSink for BufferSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.buffer.lock().push(diagnostic);
    }
}

/// Sink that discards all diagnostics.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn emit(&self, _diagnostic: Diagnostic) {}
}

#[cfg(test)]
mod tests;
