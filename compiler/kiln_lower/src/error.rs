//! Phase setup errors.

use thiserror::Error;

use crate::PhaseName;

/// Errors registering phases or computing a schedule. Fatal for setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("phase `{0}` is already registered")]
    DuplicatePhase(PhaseName),

    #[error("{}", unknown_phase_message(phase, *required_by))]
    UnknownPhase {
        phase: PhaseName,
        /// The phase listing `phase` as a prerequisite; `None` when `phase`
        /// was requested directly.
        required_by: Option<PhaseName>,
    },

    #[error("phase prerequisites form a cycle: {}", cycle.join(" -> "))]
    CyclicDependency {
        /// The cycle path, first phase repeated at the end.
        cycle: Vec<PhaseName>,
    },
}

fn unknown_phase_message(phase: &str, required_by: Option<&str>) -> String {
    match required_by {
        Some(parent) => format!("unknown phase `{phase}`, required by `{parent}`"),
        None => format!("unknown phase `{phase}` requested"),
    }
}
