//! Compilation units.

use kiln_diagnostic::{Diagnostic, ErrorGuaranteed};
use kiln_ir::IrFile;
use kiln_lower::{CompletedPhases, RunSummary};

use crate::UnitOptions;

/// The trees lowered together by one worker, plus the phases already
/// applied to them.
#[derive(Debug)]
pub struct CompilationUnit {
    pub name: String,
    pub files: Vec<IrFile>,
    pub completed_phases: CompletedPhases,
    pub options: UnitOptions,
}

impl CompilationUnit {
    pub fn new(name: impl Into<String>) -> Self {
        CompilationUnit {
            name: name.into(),
            files: Vec::new(),
            completed_phases: CompletedPhases::new(),
            options: UnitOptions::default(),
        }
    }

    #[must_use]
    pub fn with_file(mut self, file: IrFile) -> Self {
        self.files.push(file);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: UnitOptions) -> Self {
        self.options = options;
        self
    }
}

/// Result of [`Session::compile_unit`](crate::Session::compile_unit).
///
/// Diagnostics in both variants are sorted by source position.
#[derive(Debug)]
pub enum UnitOutcome {
    /// Every scheduled phase ran; `unit` holds the lowered trees.
    Lowered {
        unit: CompilationUnit,
        summary: RunSummary,
        diagnostics: Vec<Diagnostic>,
    },
    /// The unit's trees were discarded. The last diagnostic is the
    /// abandonment note.
    Abandoned {
        name: String,
        diagnostics: Vec<Diagnostic>,
        guar: ErrorGuaranteed,
    },
}

impl UnitOutcome {
    pub fn name(&self) -> &str {
        match self {
            UnitOutcome::Lowered { unit, .. } => &unit.name,
            UnitOutcome::Abandoned { name, .. } => name,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            UnitOutcome::Lowered { diagnostics, .. } | UnitOutcome::Abandoned { diagnostics, .. } => {
                diagnostics
            }
        }
    }

    pub fn is_lowered(&self) -> bool {
        matches!(self, UnitOutcome::Lowered { .. })
    }

    /// The lowered unit, if lowering completed.
    pub fn into_unit(self) -> Option<CompilationUnit> {
        match self {
            UnitOutcome::Lowered { unit, .. } => Some(unit),
            UnitOutcome::Abandoned { .. } => None,
        }
    }
}
