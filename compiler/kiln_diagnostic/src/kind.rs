//! Structured diagnostic kinds.

use std::fmt;

use crate::{ErrorCode, Severity};

/// Enumerated rule violations reported through [`DiagnosticSink::report`].
///
/// [`DiagnosticSink::report`]: crate::DiagnosticSink::report
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DiagnosticKind {
    /// The sealed supertype was declared in foreign (non-native) code.
    ForeignSealedInheritance,
    /// The sealed supertype lives in another package than the subclass.
    CrossPackageSealedInheritance,
    /// The sealed supertype lives in another module than the subclass.
    CrossModuleSealedInheritance,
    /// A local class lists a sealed supertype.
    SealedSupertypeInLocalScope,
    /// A unit's lowering was dropped after an earlier fatal diagnostic.
    LoweringAbandoned,
}

impl DiagnosticKind {
    pub fn code(self) -> ErrorCode {
        match self {
            DiagnosticKind::ForeignSealedInheritance => ErrorCode::E3001,
            DiagnosticKind::CrossPackageSealedInheritance => ErrorCode::E3002,
            DiagnosticKind::CrossModuleSealedInheritance => ErrorCode::E3003,
            DiagnosticKind::SealedSupertypeInLocalScope => ErrorCode::E3004,
            DiagnosticKind::LoweringAbandoned => ErrorCode::E4001,
        }
    }

    pub fn default_severity(self) -> Severity {
        match self {
            DiagnosticKind::LoweringAbandoned => Severity::Note,
            _ => Severity::Error,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            DiagnosticKind::ForeignSealedInheritance => {
                "inheritance of sealed classes declared in foreign code is prohibited"
            }
            DiagnosticKind::CrossPackageSealedInheritance => {
                "inheritor of sealed class must be declared in the same package"
            }
            DiagnosticKind::CrossModuleSealedInheritance => {
                "inheritor of sealed class must be declared in the same module"
            }
            DiagnosticKind::SealedSupertypeInLocalScope => {
                "local class cannot extend a sealed class"
            }
            DiagnosticKind::LoweringAbandoned => {
                "lowering skipped because of previous errors"
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DiagnosticKind::ForeignSealedInheritance => "sealed class from foreign code",
            DiagnosticKind::CrossPackageSealedInheritance => "sealed class from another package",
            DiagnosticKind::CrossModuleSealedInheritance => "sealed class from another module",
            DiagnosticKind::SealedSupertypeInLocalScope => "sealed supertype",
            DiagnosticKind::LoweringAbandoned => "in this compilation unit",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
