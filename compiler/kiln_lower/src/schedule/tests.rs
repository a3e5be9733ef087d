#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "proptest macros generate code with these patterns"
)]

use super::*;
use crate::test_support::Fixture;
use crate::RewriteRule;
use kiln_ir::{ConstValue, Decl, ExprKind, FunctionDecl, IrExpr, IrType, Span};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

struct Identity;

impl RewriteRule for Identity {
    fn rewrite(&self, expr: IrExpr, _cx: &mut LowerCx<'_>) -> IrExpr {
        expr
    }
}

struct Bump;

impl RewriteRule for Bump {
    fn rewrite(&self, mut expr: IrExpr, cx: &mut LowerCx<'_>) -> IrExpr {
        if let ExprKind::Const(ConstValue::Int(v)) = &mut expr.kind {
            *v += 1;
            cx.note_rewrite();
        }
        expr
    }
}

/// Phases with whitespace-separated prerequisites, in registration order.
fn registry(phases: &[(PhaseName, &'static str)]) -> PhaseRegistry {
    let mut registry = PhaseRegistry::new();
    for &(name, prerequisites) in phases {
        let prerequisites: Vec<PhaseName> = prerequisites.split_whitespace().collect();
        registry
            .register(name, &prerequisites, Identity)
            .unwrap_or_else(|e| panic!("{e}"));
    }
    registry
}

#[test]
fn prerequisites_run_first() {
    let registry = registry(&[
        ("concatenation", "flatten for-loops"),
        ("flatten", ""),
        ("for-loops", "flatten"),
    ]);
    let schedule = registry
        .compute_order(&["concatenation"])
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(schedule.phases(), &["flatten", "for-loops", "concatenation"]);
}

#[test]
fn independent_phases_keep_registration_order() {
    let registry = registry(&[("c", ""), ("a", ""), ("b", "")]);
    let schedule = registry
        .compute_order(&["b", "a", "c"])
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(schedule.phases(), &["c", "a", "b"]);
}

#[test]
fn unrequested_phases_are_left_out() {
    let registry = registry(&[("a", ""), ("b", "a"), ("c", "c")]);
    let schedule = registry.compute_order(&["b"]).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(schedule.phases(), &["a", "b"]);
    assert!(registry.compute_order(&[]).is_ok_and(|s| s.is_empty()));
}

#[test]
fn two_phase_cycle_is_reported() {
    let registry = registry(&[("a", "b"), ("b", "a")]);
    assert_eq!(
        registry.compute_order(&["a"]),
        Err(SchedulerError::CyclicDependency {
            cycle: vec!["a", "b", "a"]
        })
    );
}

#[test]
fn self_dependency_is_a_cycle() {
    let registry = registry(&[("ok", ""), ("loop", "ok loop")]);
    let err = registry.compute_order(&["loop"]);
    assert_eq!(
        err,
        Err(SchedulerError::CyclicDependency {
            cycle: vec!["loop", "loop"]
        })
    );
    assert_eq!(
        err.map_err(|e| e.to_string()),
        Err("phase prerequisites form a cycle: loop -> loop".to_owned())
    );
}

#[test]
fn unknown_phases_are_reported_with_their_dependent() {
    let registry = registry(&[("a", "missing")]);
    assert_eq!(
        registry.compute_order(&["nope"]),
        Err(SchedulerError::UnknownPhase {
            phase: "nope",
            required_by: None
        })
    );
    let err = registry.compute_order(&["a"]);
    assert_eq!(
        err,
        Err(SchedulerError::UnknownPhase {
            phase: "missing",
            required_by: Some("a")
        })
    );
    assert_eq!(
        err.map_err(|e| e.to_string()),
        Err("unknown phase `missing`, required by `a`".to_owned())
    );
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = registry(&[("a", "")]);
    assert_eq!(
        registry.register("a", &[], Identity),
        Err(SchedulerError::DuplicatePhase("a"))
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn run_applies_each_phase_once_per_unit() {
    let fx = Fixture::new();
    let mut registry = PhaseRegistry::new();
    registry
        .register("first", &[], Bump)
        .unwrap_or_else(|e| panic!("{e}"));
    registry
        .register("second", &["first"], Bump)
        .unwrap_or_else(|e| panic!("{e}"));
    let schedule = registry
        .compute_order(&["second"])
        .unwrap_or_else(|e| panic!("{e}"));

    let mut files = vec![IrFile::new(fx.name("a.kt"), fx.name("app")).with_decl(
        Decl::Function(FunctionDecl {
            name: fx.name("f"),
            params: Vec::new(),
            return_type: IrType::INT,
            body: Some(IrExpr::int(0, IrType::INT, Span::DUMMY)),
            span: Span::DUMMY,
        }),
    )];
    let mut completed = CompletedPhases::new();
    let mut cx = fx.cx();

    let summary = schedule
        .run(&registry, &mut files, &mut completed, &mut cx)
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(summary.applied, vec!["first", "second"]);
    assert_eq!(summary.rewrites, 2);

    let again = schedule
        .run(&registry, &mut files, &mut completed, &mut cx)
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(again.applied, Vec::<PhaseName>::new());
    assert_eq!(again.skipped, vec!["first", "second"]);
    assert_eq!(again.rewrites, 0);

    let Decl::Function(f) = &files[0].declarations[0] else {
        panic!("expected function");
    };
    assert_eq!(f.body, Some(IrExpr::int(2, IrType::INT, Span::DUMMY)));
}

#[test]
fn run_with_foreign_registry_fails() {
    let fx = Fixture::new();
    let schedule = registry(&[("a", "")])
        .compute_order(&["a"])
        .unwrap_or_else(|e| panic!("{e}"));
    let mut cx = fx.cx();
    let result = schedule.run(
        &PhaseRegistry::new(),
        &mut [],
        &mut CompletedPhases::new(),
        &mut cx,
    );
    assert!(matches!(result, Err(SchedulerError::UnknownPhase { .. })));
}

// -- Property tests --

const NAMES: [PhaseName; 10] = ["p0", "p1", "p2", "p3", "p4", "p5", "p6", "p7", "p8", "p9"];

/// Random DAG over `NAMES[..n]` (edges only point to lower indices) and a
/// random registration order.
fn dag_strategy() -> impl Strategy<Value = (Vec<Vec<usize>>, Vec<usize>)> {
    (1usize..=NAMES.len())
        .prop_flat_map(|n| {
            (
                prop::collection::vec(prop::collection::vec(any::<bool>(), n), n),
                Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
            )
        })
        .prop_map(|(edges, order)| {
            let prerequisites = edges
                .iter()
                .enumerate()
                .map(|(i, row)| (0..i).filter(|&j| row[j]).collect())
                .collect();
            (prerequisites, order)
        })
}

fn build(prerequisites: &[Vec<usize>], order: &[usize]) -> PhaseRegistry {
    let mut registry = PhaseRegistry::new();
    for &i in order {
        let pre: Vec<PhaseName> = prerequisites[i].iter().map(|&j| NAMES[j]).collect();
        registry
            .register(NAMES[i], &pre, Identity)
            .unwrap_or_else(|e| panic!("{e}"));
    }
    registry
}

proptest! {
    #[test]
    fn every_phase_follows_its_prerequisites((prerequisites, order) in dag_strategy()) {
        let registry = build(&prerequisites, &order);
        let requested: Vec<PhaseName> = NAMES[..order.len()].to_vec();
        let schedule = registry.compute_order(&requested).unwrap_or_else(|e| panic!("{e}"));
        prop_assert_eq!(schedule.len(), order.len());

        let position = |name: PhaseName| schedule.phases().iter().position(|&p| p == name);
        for (i, pre) in prerequisites.iter().enumerate() {
            for &j in pre {
                prop_assert!(position(NAMES[j]) < position(NAMES[i]));
            }
        }
    }

    #[test]
    fn ready_ties_break_by_registration_order((prerequisites, order) in dag_strategy()) {
        let registry = build(&prerequisites, &order);
        let requested: Vec<PhaseName> = NAMES[..order.len()].to_vec();
        let schedule = registry.compute_order(&requested).unwrap_or_else(|e| panic!("{e}"));

        let registered_at = |name: PhaseName| order.iter().position(|&i| NAMES[i] == name);
        let mut done: Vec<PhaseName> = Vec::new();
        for &next in schedule.phases() {
            // No earlier-registered phase may have been ready at this step.
            for &i in &order {
                let name = NAMES[i];
                if done.contains(&name) || registered_at(name) >= registered_at(next) {
                    continue;
                }
                let ready = prerequisites[i].iter().all(|&j| done.contains(&NAMES[j]));
                prop_assert!(!ready, "{} was ready before {}", name, next);
            }
            done.push(next);
        }
    }

    #[test]
    fn order_is_deterministic((prerequisites, order) in dag_strategy(), pick in 0usize..NAMES.len()) {
        let registry = build(&prerequisites, &order);
        let target = NAMES[pick % order.len()];
        let first = registry.compute_order(&[target]);
        let second = build(&prerequisites, &order).compute_order(&[target]);
        prop_assert_eq!(&first, &second);

        // Exactly the transitive prerequisites of `target`, plus itself.
        let mut closure = vec![pick % order.len()];
        let mut k = 0;
        while k < closure.len() {
            for &j in &prerequisites[closure[k]] {
                if !closure.contains(&j) {
                    closure.push(j);
                }
            }
            k += 1;
        }
        prop_assert_eq!(first.map(|s| s.len()), Ok(closure.len()));
    }
}
