//! Compilation sessions.
//!
//! A [`Session`] owns everything shared between units: the interner, the
//! frozen symbol table, the phase registry and the schedule computed from
//! the configuration. Units are moved in, checked, lowered and moved back
//! out inside a [`UnitOutcome`]; nothing about one unit is visible to
//! another.

use kiln_check::SealedSupertypeChecker;
use kiln_diagnostic::{
    Diagnostic, DiagnosticKind, DiagnosticQueue, ErrorCode, ErrorGuaranteed,
};
use kiln_ir::{Span, StringInterner};
use kiln_lower::{
    validate_file, LowerCx, PhaseRegistry, Schedule, SchedulerError, CONCATENATION,
};
use kiln_symbols::{SymbolTable, SymbolTableBuilder};
use rayon::prelude::*;

use crate::{standard_registry, CompilationUnit, PipelineConfig, SetupError, UnitOutcome};

/// Stack size for lowering workers. `stacker` still grows past it on very
/// deep trees.
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

pub struct Session {
    interner: StringInterner,
    symbols: SymbolTable,
    registry: PhaseRegistry,
    schedule: Schedule,
    config: PipelineConfig,
}

impl Session {
    /// Build a session, computing the schedule for `config.requested_phases`.
    pub fn new(
        interner: StringInterner,
        symbols: SymbolTable,
        registry: PhaseRegistry,
        config: PipelineConfig,
    ) -> Result<Self, SchedulerError> {
        let schedule = registry.compute_order(&config.requested_phases)?;
        tracing::debug!(phases = ?schedule.phases(), "session schedule");
        Ok(Session {
            interner,
            symbols,
            registry,
            schedule,
            config,
        })
    }

    /// Freeze `builder` and use the standard phases.
    pub fn with_standard_phases(
        interner: StringInterner,
        builder: SymbolTableBuilder,
        config: PipelineConfig,
    ) -> Result<Self, SetupError> {
        let symbols = builder.freeze()?;
        Ok(Self::new(interner, symbols, standard_registry()?, config)?)
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Check and lower one unit.
    ///
    /// Checker errors abandon the unit when `abort_on_error` is set. A lowered
    /// tree that fails validation is abandoned too, with one E9001 error per
    /// problem.
    pub fn compile_unit(&self, mut unit: CompilationUnit) -> UnitOutcome {
        let _span = tracing::info_span!("unit", name = %unit.name).entered();
        let mut queue = DiagnosticQueue::with_config(self.config.diagnostic_config());

        for file in &unit.files {
            SealedSupertypeChecker::check_file(file, &self.symbols, &mut queue);
        }
        if let Some(guar) = queue.has_errors() {
            if self.config.abort_on_error {
                tracing::info!(errors = queue.error_count(), "declaration errors, abandoning unit");
                return abandon(unit.name, queue, guar);
            }
            tracing::debug!(errors = queue.error_count(), "declaration errors, lowering anyway");
        }

        let mut cx = LowerCx::new(&self.symbols, &self.interner);
        let summary = match self.schedule.run(
            &self.registry,
            &mut unit.files,
            &mut unit.completed_phases,
            &mut cx,
        ) {
            Ok(summary) => summary,
            Err(err) => {
                tracing::error!(error = %err, "lowering schedule failed");
                let guar = queue.emit_error(
                    Diagnostic::error(ErrorCode::E9001).with_message(err.to_string()),
                );
                return abandon(unit.name, queue, guar);
            }
        };
        tracing::debug!(
            applied = ?summary.applied,
            skipped = ?summary.skipped,
            rewrites = summary.rewrites,
            "unit lowered"
        );

        if unit.options.validate_or(&self.config) {
            let concat_lowered = unit.completed_phases.contains(CONCATENATION);
            let mut invalid = None;
            for file in &unit.files {
                for err in validate_file(file, &self.symbols, concat_lowered) {
                    invalid = Some(queue.emit_error(
                        Diagnostic::error(ErrorCode::E9001)
                            .with_message(err.to_string())
                            .with_label(err.span(), "produced by lowering"),
                    ));
                }
            }
            if let Some(guar) = invalid {
                return abandon(unit.name, queue, guar);
            }
        }

        UnitOutcome::Lowered {
            unit,
            summary,
            diagnostics: queue.flush(),
        }
    }

    /// Compile `units` in parallel. Outcomes come back in input order.
    #[tracing::instrument(level = "info", skip_all, fields(units = units.len()))]
    pub fn compile_all(&self, units: Vec<CompilationUnit>) -> Vec<UnitOutcome> {
        if self.config.threads == 1 || units.len() <= 1 {
            return units.into_iter().map(|unit| self.compile_unit(unit)).collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .stack_size(WORKER_STACK_SIZE)
            .build();
        match pool {
            Ok(pool) => pool.install(|| {
                units
                    .into_par_iter()
                    .map(|unit| self.compile_unit(unit))
                    .collect()
            }),
            Err(e) => {
                tracing::warn!("failed to create thread pool ({e}), running sequentially");
                units.into_iter().map(|unit| self.compile_unit(unit)).collect()
            }
        }
    }
}

fn abandon(name: String, mut queue: DiagnosticQueue, guar: ErrorGuaranteed) -> UnitOutcome {
    let mut diagnostics = queue.flush();
    diagnostics.push(
        Diagnostic::from_kind(DiagnosticKind::LoweringAbandoned, Span::DUMMY)
            .with_note(format!("compilation unit `{name}`")),
    );
    UnitOutcome::Abandoned {
        name,
        diagnostics,
        guar,
    }
}
