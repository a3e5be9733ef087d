//! Kiln lowering - phase scheduling and tree rewriting.
//!
//! A lowering phase is a named [`RewriteRule`] with prerequisite phases. The
//! [`PhaseRegistry`] holds every phase a session knows about; a [`Schedule`]
//! is the deterministic order computed for one requested set, and running it
//! applies each phase to every tree of a compilation unit exactly once.
//!
//! # Phases
//!
//! - [`FlattenConcatenation`]: splices nested concatenations and turns
//!   `String.plus` calls into concatenation nodes.
//! - [`LowerConcatenation`]: replaces every concatenation with builder calls,
//!   conversion calls or the two-argument intrinsic.
//!
//! After lowering, [`validate_file`] checks the tree is ready for code
//! generation.

mod concat;
mod context;
mod engine;
mod error;
mod flatten;
mod phase;
mod schedule;
mod validate;

#[cfg(test)]
mod test_support;

pub use concat::LowerConcatenation;
pub use context::LowerCx;
pub use engine::RewriteEngine;
pub use error::SchedulerError;
pub use flatten::FlattenConcatenation;
pub use phase::{Phase, PhaseName, PhaseRegistry, RewriteRule};
pub use schedule::{CompletedPhases, RunSummary, Schedule};
pub use validate::{validate_file, ValidationError};

/// Name of the flattening phase.
pub const FLATTEN_CONCATENATION: PhaseName = "flatten-concatenation";

/// Name of the concatenation lowering phase.
pub const CONCATENATION: PhaseName = "concatenation";
