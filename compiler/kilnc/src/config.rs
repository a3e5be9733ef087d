//! Pipeline configuration.

use kiln_diagnostic::DiagnosticConfig;
use kiln_lower::{PhaseName, CONCATENATION};

/// Session-wide settings for checking and lowering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Phases to run; prerequisites are added automatically.
    pub requested_phases: Vec<PhaseName>,
    /// Worker threads for [`Session::compile_all`](crate::Session::compile_all).
    /// 0 lets rayon pick.
    pub threads: usize,
    /// Drop a unit's lowering when the checker reported an error.
    pub abort_on_error: bool,
    /// Validate lowered trees before handing them back. On by default in
    /// debug builds.
    pub validate: bool,
    /// Errors kept per unit (0 = unlimited).
    pub error_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            requested_phases: vec![CONCATENATION],
            threads: 0,
            abort_on_error: true,
            validate: cfg!(debug_assertions),
            error_limit: DiagnosticConfig::default().error_limit,
        }
    }
}

impl PipelineConfig {
    /// Defaults, overridden by `KILN_THREADS` and `KILN_VALIDATE`.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = var("KILN_THREADS") {
            if let Ok(threads) = raw.trim().parse::<usize>() {
                config.threads = threads;
            } else {
                tracing::warn!(value = %raw, "ignoring invalid KILN_THREADS");
            }
        }
        if let Some(raw) = var("KILN_VALIDATE") {
            if let Some(validate) = parse_flag(&raw) {
                config.validate = validate;
            } else {
                tracing::warn!(value = %raw, "ignoring invalid KILN_VALIDATE");
            }
        }
        config
    }

    #[must_use]
    pub fn with_phases(mut self, phases: &[PhaseName]) -> Self {
        self.requested_phases = phases.to_vec();
        self
    }

    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    #[must_use]
    pub fn with_abort_on_error(mut self, abort: bool) -> Self {
        self.abort_on_error = abort;
        self
    }

    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    #[must_use]
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit;
        self
    }

    pub(crate) fn diagnostic_config(&self) -> DiagnosticConfig {
        DiagnosticConfig {
            error_limit: self.error_limit,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Per-unit overrides of the session settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitOptions {
    /// Validation for this unit; `None` follows the session.
    pub validate: Option<bool>,
}

impl UnitOptions {
    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = Some(validate);
        self
    }

    pub fn validate_or(&self, config: &PipelineConfig) -> bool {
        self.validate.unwrap_or(config.validate)
    }
}
