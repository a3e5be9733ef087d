//! Error codes for all diagnostics.
//!
//! Format: `E####`, the first digit naming the component:
//! - E3xxx: declaration checker errors
//! - E4xxx: lowering pipeline errors
//! - E9xxx: internal compiler errors

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Class inherits a sealed class declared in foreign code
    E3001,
    /// Sealed inheritor declared in a different package
    E3002,
    /// Sealed inheritor declared in a different module
    E3003,
    /// Local class has a sealed supertype
    E3004,
    /// Lowering of a compilation unit was abandoned
    E4001,
    /// Lowered IR failed validation
    E9001,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E4001,
        ErrorCode::E9001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line description used by `--explain` style output.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "class inherits a sealed class declared in foreign code",
            ErrorCode::E3002 => "sealed class inheritor declared in a different package",
            ErrorCode::E3003 => "sealed class inheritor declared in a different module",
            ErrorCode::E3004 => "local class cannot extend a sealed class",
            ErrorCode::E4001 => "lowering abandoned for compilation unit",
            ErrorCode::E9001 => "lowered IR failed validation",
        }
    }

    pub fn is_checker_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E3001 | ErrorCode::E3002 | ErrorCode::E3003 | ErrorCode::E3004
        )
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }

    /// Parse a code string like `"E3002"`, case-insensitively.
    pub fn parse(s: &str) -> Option<ErrorCode> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
