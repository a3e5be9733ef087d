//! Diagnostic collection.
//!
//! [`DiagnosticSink`] is the fire-and-forget interface checkers report into.
//! [`DiagnosticQueue`] is the per-compilation, append-only implementation:
//! it counts errors, enforces an optional error limit and hands back the
//! collected diagnostics ordered by source position.

use kiln_ir::Span;

use crate::{Diagnostic, DiagnosticKind, ErrorGuaranteed};

/// Append-only destination for diagnostics.
pub trait DiagnosticSink {
    /// Record a fully built diagnostic.
    fn emit(&mut self, diagnostic: Diagnostic);

    /// Record a structured rule violation at `span`.
    fn report(&mut self, kind: DiagnosticKind, span: Span) {
        self.emit(Diagnostic::from_kind(kind, span));
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Configuration for diagnostic collection.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited). Errors past the limit
    /// are counted but not stored.
    pub error_limit: usize,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig { error_limit: 100 }
    }
}

impl DiagnosticConfig {
    /// No limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig { error_limit: 0 }
    }
}

/// Per-compilation diagnostic collection.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.report(DiagnosticKind::SealedSupertypeInLocalScope, span);
/// if let Some(_guar) = queue.has_errors() { /* abandon lowering */ }
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    /// Errors recorded, including ones dropped by the limit.
    error_count: usize,
    /// Errors not stored because the limit was reached.
    suppressed: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Emit an error and get proof it was recorded.
    pub fn emit_error(&mut self, diagnostic: Diagnostic) -> ErrorGuaranteed {
        debug_assert!(diagnostic.is_error(), "emit_error called with a non-error");
        self.emit(diagnostic);
        ErrorGuaranteed::new()
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn suppressed_count(&self) -> usize {
        self.suppressed
    }

    /// Proof of errors if any were recorded.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics in report order, without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Take all diagnostics, ordered by primary span start.
    ///
    /// The sort is stable, so diagnostics at the same position keep their
    /// report order. Diagnostics without a primary span sort last.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut result = std::mem::take(&mut self.diagnostics);
        result.sort_by_key(|d| d.primary_span().map_or(u32::MAX, |s| s.start));
        self.error_count = 0;
        self.suppressed = 0;
        result
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            if self.limit_reached() {
                self.error_count += 1;
                self.suppressed += 1;
                return;
            }
            self.error_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }
}
