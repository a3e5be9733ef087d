//! Session setup errors.

use kiln_lower::SchedulerError;
use kiln_symbols::SymbolError;
use thiserror::Error;

/// A session could not be built. Unit-level problems are diagnostics, not
/// errors; this only covers inconsistent symbols or phases.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("symbol table: {0}")]
    Symbols(#[from] SymbolError),

    #[error("phase schedule: {0}")]
    Schedule(#[from] SchedulerError),
}
