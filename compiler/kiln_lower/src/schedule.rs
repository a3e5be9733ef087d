//! Phase ordering and execution.
//!
//! [`PhaseRegistry::compute_order`] closes the requested set over
//! prerequisites and orders it with Kahn's algorithm. Among phases whose
//! prerequisites have all run, the one registered earliest goes first.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use kiln_ir::IrFile;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{LowerCx, PhaseName, PhaseRegistry, RewriteEngine, SchedulerError};

/// A deterministic phase order for one requested set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    order: Vec<PhaseName>,
}

/// Phases already applied to a compilation unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletedPhases {
    phases: FxHashSet<PhaseName>,
}

impl CompletedPhases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, phase: &str) -> bool {
        self.phases.contains(phase)
    }

    /// Returns `false` if `phase` was already recorded.
    pub fn insert(&mut self, phase: PhaseName) -> bool {
        self.phases.insert(phase)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

/// What one [`Schedule::run`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Phases applied, in order.
    pub applied: Vec<PhaseName>,
    /// Phases skipped because the unit had already completed them.
    pub skipped: Vec<PhaseName>,
    /// Nodes replaced by rules during this run.
    pub rewrites: usize,
}

impl PhaseRegistry {
    /// Order `requested` and everything it transitively requires.
    ///
    /// # Errors
    ///
    /// - [`SchedulerError::UnknownPhase`] if a requested phase or a
    ///   prerequisite is not registered.
    /// - [`SchedulerError::CyclicDependency`] if prerequisites form a cycle.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn compute_order(&self, requested: &[PhaseName]) -> Result<Schedule, SchedulerError> {
        let members = self.close_over_prerequisites(requested)?;

        let mut in_degree: FxHashMap<usize, usize> = FxHashMap::default();
        let mut dependents: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
        for &index in &members {
            let phase = self.phase_at(index);
            in_degree.insert(index, phase.prerequisites().len());
            for prerequisite in phase.prerequisites() {
                // Closure guarantees every prerequisite resolves.
                if let Some(pre) = self.index_of(prerequisite) {
                    dependents.entry(pre).or_default().push(index);
                }
            }
        }

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .filter(|&(_, &degree)| degree == 0)
            .map(|(&index, _)| Reverse(index))
            .collect();

        let mut order = Vec::with_capacity(members.len());
        while let Some(Reverse(index)) = ready.pop() {
            order.push(self.phase_at(index).name());
            for &dependent in dependents.get(&index).map_or(&[][..], Vec::as_slice) {
                if let Some(degree) = in_degree.get_mut(&dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(Reverse(dependent));
                    }
                }
            }
        }

        if order.len() < members.len() {
            let cycle = self.find_cycle(&in_degree);
            tracing::debug!(?cycle, "phase prerequisites are cyclic");
            return Err(SchedulerError::CyclicDependency { cycle });
        }

        tracing::debug!(?order, "computed phase order");
        Ok(Schedule { order })
    }

    /// Registration indices of `requested` plus all transitive prerequisites.
    fn close_over_prerequisites(
        &self,
        requested: &[PhaseName],
    ) -> Result<FxHashSet<usize>, SchedulerError> {
        let mut members = FxHashSet::default();
        let mut stack: Vec<(PhaseName, Option<PhaseName>)> =
            requested.iter().rev().map(|&name| (name, None)).collect();

        while let Some((name, required_by)) = stack.pop() {
            let index = self.index_of(name).ok_or(SchedulerError::UnknownPhase {
                phase: name,
                required_by,
            })?;
            if !members.insert(index) {
                continue;
            }
            let phase = self.phase_at(index);
            for &prerequisite in phase.prerequisites().iter().rev() {
                stack.push((prerequisite, Some(phase.name())));
            }
        }
        Ok(members)
    }

    /// Extract one cycle from the phases Kahn's algorithm could not order.
    ///
    /// Every such phase still has an unordered prerequisite, so following
    /// unordered prerequisites from any of them must revisit a phase.
    fn find_cycle(&self, in_degree: &FxHashMap<usize, usize>) -> Vec<PhaseName> {
        let stuck = |index: usize| in_degree.get(&index).is_some_and(|&d| d > 0);
        let Some(start) = in_degree.keys().copied().filter(|&i| stuck(i)).min() else {
            return Vec::new();
        };

        let mut path: Vec<usize> = Vec::new();
        let mut position: FxHashMap<usize, usize> = FxHashMap::default();
        let mut current = start;
        loop {
            if let Some(&at) = position.get(&current) {
                let mut cycle: Vec<PhaseName> =
                    path[at..].iter().map(|&i| self.phase_at(i).name()).collect();
                cycle.push(self.phase_at(current).name());
                return cycle;
            }
            position.insert(current, path.len());
            path.push(current);

            let next = self
                .phase_at(current)
                .prerequisites()
                .iter()
                .filter_map(|name| self.index_of(name))
                .find(|&i| stuck(i));
            match next {
                Some(next) => current = next,
                None => return path.iter().map(|&i| self.phase_at(i).name()).collect(),
            }
        }
    }
}

impl Schedule {
    pub fn phases(&self) -> &[PhaseName] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Apply each scheduled phase to every file, in order.
    ///
    /// A phase recorded in `completed` is skipped; every applied phase is
    /// recorded there, so running the same schedule twice is a no-op.
    pub fn run(
        &self,
        registry: &PhaseRegistry,
        files: &mut [IrFile],
        completed: &mut CompletedPhases,
        cx: &mut LowerCx<'_>,
    ) -> Result<RunSummary, SchedulerError> {
        let mut summary = RunSummary::default();
        let before = cx.rewrites();

        for &name in &self.order {
            let phase = registry.get(name).ok_or(SchedulerError::UnknownPhase {
                phase: name,
                required_by: None,
            })?;
            if completed.contains(name) {
                tracing::debug!(phase = name, "phase already completed, skipping");
                summary.skipped.push(name);
                continue;
            }

            let _span = tracing::debug_span!("phase", phase = name).entered();
            let start = cx.rewrites();
            let mut engine = RewriteEngine::new(phase.rule(), cx);
            for file in files.iter_mut() {
                engine.run_file(file);
            }
            completed.insert(name);
            summary.applied.push(name);
            tracing::debug!(rewrites = cx.rewrites() - start, "phase applied");
        }

        summary.rewrites = cx.rewrites() - before;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests;
