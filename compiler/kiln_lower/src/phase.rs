//! Phases and the phase registry.

use std::fmt;

use kiln_ir::IrExpr;
use rustc_hash::FxHashMap;

use crate::{LowerCx, SchedulerError};

/// Stable phase identifier.
pub type PhaseName = &'static str;

/// A node-level rewrite applied bottom-up by the [`RewriteEngine`].
///
/// The engine hands every expression to the rule by value after its
/// children were rewritten. A rule returns either the node unchanged or a
/// replacement that reuses the node's children by move.
///
/// [`RewriteEngine`]: crate::RewriteEngine
pub trait RewriteRule: Send + Sync {
    fn rewrite(&self, expr: IrExpr, cx: &mut LowerCx<'_>) -> IrExpr;
}

/// A registered phase. Immutable once registered.
pub struct Phase {
    name: PhaseName,
    prerequisites: Vec<PhaseName>,
    rule: Box<dyn RewriteRule>,
}

impl Phase {
    #[inline]
    pub fn name(&self) -> PhaseName {
        self.name
    }

    #[inline]
    pub fn prerequisites(&self) -> &[PhaseName] {
        &self.prerequisites
    }

    #[inline]
    pub fn rule(&self) -> &dyn RewriteRule {
        &*self.rule
    }
}

impl fmt::Debug for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Phase")
            .field("name", &self.name)
            .field("prerequisites", &self.prerequisites)
            .finish_non_exhaustive()
    }
}

/// Every phase a session can run, in registration order.
///
/// Registration order is the tie-breaker when several phases are ready to
/// run, so the same registration sequence always yields the same schedule.
#[derive(Default, Debug)]
pub struct PhaseRegistry {
    phases: Vec<Phase>,
    by_name: FxHashMap<PhaseName, usize>,
}

impl PhaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a phase. Prerequisites may name phases registered later;
    /// they are resolved when a schedule is computed.
    pub fn register(
        &mut self,
        name: PhaseName,
        prerequisites: &[PhaseName],
        rule: impl RewriteRule + 'static,
    ) -> Result<(), SchedulerError> {
        if self.by_name.contains_key(name) {
            return Err(SchedulerError::DuplicatePhase(name));
        }
        tracing::debug!(phase = name, ?prerequisites, "registering phase");
        self.by_name.insert(name, self.phases.len());
        self.phases.push(Phase {
            name,
            prerequisites: prerequisites.to_vec(),
            rule: Box::new(rule),
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Phase> {
        self.by_name.get(name).map(|&index| &self.phases[index])
    }

    /// Registration index of `name`.
    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub(crate) fn phase_at(&self, index: usize) -> &Phase {
        &self.phases[index]
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Phase names in registration order.
    pub fn names(&self) -> impl Iterator<Item = PhaseName> + '_ {
        self.phases.iter().map(|phase| phase.name)
    }
}
