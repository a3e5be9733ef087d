//! Diagnostics for checkers and lowering phases.
//!
//! Diagnostics are data, not control flow: checkers report them into a
//! [`DiagnosticSink`] and keep going. A compilation collects everything into a
//! [`DiagnosticQueue`] and emits the sorted list once processing is done.
//!
//! Every diagnostic carries:
//! - an [`ErrorCode`] for searchability
//! - a [`Severity`]
//! - a message and a primary [`Label`] at the offending source location
//!
//! Structured rule violations additionally carry a [`DiagnosticKind`], which
//! is what tests and tooling match on.

mod diagnostic;
pub mod emitter;
mod error_code;
mod guarantee;
mod kind;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use kind::DiagnosticKind;
pub use queue::{DiagnosticConfig, DiagnosticQueue, DiagnosticSink};
