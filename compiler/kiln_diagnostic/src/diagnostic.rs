//! Core diagnostic types.

use kiln_ir::Span;
use std::fmt;

use crate::{DiagnosticKind, ErrorCode};

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A labeled span with a message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    /// Whether this is the primary error location.
    pub is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A diagnostic record. Built once, never mutated after it is reported.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    /// Structured kind for rule violations; `None` for free-form diagnostics.
    pub kind: Option<DiagnosticKind>,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            kind: None,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    #[cold]
    pub fn note(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Note)
    }

    /// Build the diagnostic for a structured rule violation at `span`.
    pub fn from_kind(kind: DiagnosticKind, span: Span) -> Self {
        let mut diag = Self::new_with_severity(kind.code(), kind.default_severity())
            .with_message(kind.message())
            .with_label(span, kind.label());
        diag.kind = Some(kind);
        diag
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// First primary label's span.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {} {:?}: {}", marker, label.span, label.message)?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_collects_labels_and_notes() {
        let diag = Diagnostic::error(ErrorCode::E9001)
            .with_message("bad IR")
            .with_label(Span::new(0, 5), "here")
            .with_secondary_label(Span::new(7, 9), "related")
            .with_note("context");

        assert!(diag.is_error());
        assert_eq!(diag.kind, None);
        assert_eq!(diag.primary_span(), Some(Span::new(0, 5)));
        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.notes, vec!["context".to_owned()]);
    }

    #[test]
    fn from_kind_uses_kind_metadata() {
        let diag = Diagnostic::from_kind(
            DiagnosticKind::CrossModuleSealedInheritance,
            Span::new(3, 8),
        );
        assert_eq!(diag.code, ErrorCode::E3003);
        assert_eq!(diag.kind, Some(DiagnosticKind::CrossModuleSealedInheritance));
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.primary_span(), Some(Span::new(3, 8)));
    }

    #[test]
    fn display_format() {
        let diag = Diagnostic::warning(ErrorCode::E4001)
            .with_message("unit skipped")
            .with_label(Span::new(1, 2), "here")
            .with_note("a note");
        assert_eq!(
            diag.to_string(),
            "warning [E4001]: unit skipped\n  --> 1..2: here\n  = note: a note"
        );
    }
}
