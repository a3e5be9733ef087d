//! Declaration checkers.
//!
//! Checkers walk IR with the read-only [`Visitor`](kiln_ir::Visitor) and
//! report rule violations into a [`DiagnosticSink`](kiln_diagnostic::DiagnosticSink).
//! They never mutate the tree and never stop early: every declaration is
//! checked even after an earlier one produced errors.

mod sealed;

pub use sealed::SealedSupertypeChecker;
