//! Kiln driver.
//!
//! Ties the crates together for whole compilation units:
//!
//! 1. [`SealedSupertypeChecker`](kiln_check::SealedSupertypeChecker) checks
//!    every class declaration and reports into the unit's diagnostic queue.
//! 2. The session's [`Schedule`](kiln_lower::Schedule) applies each requested
//!    lowering phase, prerequisites first.
//! 3. [`validate_file`](kiln_lower::validate_file) checks the lowered trees.
//!
//! Units are independent and can be compiled in parallel with
//! [`Session::compile_all`].

mod config;
mod error;
mod session;
mod unit;

use std::sync::Once;

use kiln_lower::{
    FlattenConcatenation, LowerConcatenation, PhaseRegistry, SchedulerError, CONCATENATION,
    FLATTEN_CONCATENATION,
};

pub use config::{PipelineConfig, UnitOptions};
pub use error::SetupError;
pub use session::Session;
pub use unit::{CompilationUnit, UnitOutcome};

/// Registry with the built-in lowering phases.
pub fn standard_registry() -> Result<PhaseRegistry, SchedulerError> {
    let mut registry = PhaseRegistry::new();
    registry.register(FLATTEN_CONCATENATION, &[], FlattenConcatenation)?;
    registry.register(CONCATENATION, &[FLATTEN_CONCATENATION], LowerConcatenation)?;
    Ok(registry)
}

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set. With `KILN_LOG_TREE` also set,
/// spans are rendered as an indented tree instead of flat lines.
///
/// ```bash
/// RUST_LOG=kiln_lower=debug KILN_LOG_TREE=1 cargo test -p kilnc
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let registry = tracing_subscriber::registry().with(filter);
        let result = if std::env::var_os("KILN_LOG_TREE").is_some() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_target(true).with_level(true))
                .try_init()
        };
        if let Err(e) = result {
            eprintln!("kilnc: tracing already initialized: {e}");
        }
    });
}
