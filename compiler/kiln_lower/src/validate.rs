//! Post-lowering validation.
//!
//! Checks a lowered tree is ready for code generation:
//! - no `Concat` node survives the concatenation phase
//! - every call references an operation known to the oracle
//! - argument counts match parameter counts
//! - member operations have a receiver and nothing else does
//!
//! Violations are bugs in a phase, not in user code. They are collected
//! rather than asserted so the driver can report them and drop the unit.

use kiln_ir::{ExprKind, IrExpr, IrFile, OperationId, Span, Visitor};
use kiln_symbols::TypeOracle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("concatenation node survived lowering at {span:?}")]
    ConcatAfterLowering { span: Span },

    #[error("call to unknown operation {op:?} at {span:?}")]
    UnknownOperation { op: OperationId, span: Span },

    #[error("call to {op:?} passes {found} argument(s), expected {expected}, at {span:?}")]
    ArityMismatch {
        op: OperationId,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("call to {op:?} has {} receiver at {span:?}", if *expected { "no" } else { "an unexpected" })]
    ReceiverMismatch {
        op: OperationId,
        /// Whether the operation takes a receiver.
        expected: bool,
        span: Span,
    },
}

impl ValidationError {
    pub fn span(&self) -> Span {
        match self {
            ValidationError::ConcatAfterLowering { span }
            | ValidationError::UnknownOperation { span, .. }
            | ValidationError::ArityMismatch { span, .. }
            | ValidationError::ReceiverMismatch { span, .. } => *span,
        }
    }
}

/// Validate one lowered file. `concat_lowered` says whether the
/// concatenation phase has run, which makes any remaining `Concat` an error.
pub fn validate_file(
    file: &IrFile,
    oracle: &dyn TypeOracle,
    concat_lowered: bool,
) -> Vec<ValidationError> {
    let mut validator = Validator {
        oracle,
        concat_lowered,
        errors: Vec::new(),
    };
    validator.visit_file(file);
    for error in &validator.errors {
        tracing::warn!(%error, "lowered IR failed validation");
    }
    validator.errors
}

struct Validator<'a> {
    oracle: &'a dyn TypeOracle,
    concat_lowered: bool,
    errors: Vec<ValidationError>,
}

impl Visitor for Validator<'_> {
    fn visit_expr(&mut self, expr: &IrExpr) {
        kiln_ir::stack::ensure_sufficient_stack(|| {
            match &expr.kind {
                ExprKind::Concat(_) if self.concat_lowered => {
                    self.errors
                        .push(ValidationError::ConcatAfterLowering { span: expr.span });
                }
                ExprKind::Call(call) => {
                    let op = call.callee;
                    match self.oracle.operation(op) {
                        None => self
                            .errors
                            .push(ValidationError::UnknownOperation { op, span: expr.span }),
                        Some(operation) => {
                            if operation.arity() != call.args.len() {
                                self.errors.push(ValidationError::ArityMismatch {
                                    op,
                                    expected: operation.arity(),
                                    found: call.args.len(),
                                    span: expr.span,
                                });
                            }
                            if operation.has_receiver() != call.receiver.is_some() {
                                self.errors.push(ValidationError::ReceiverMismatch {
                                    op,
                                    expected: operation.has_receiver(),
                                    span: expr.span,
                                });
                            }
                        }
                    }
                }
                _ => {}
            }
            self.walk_expr(expr);
        });
    }
}
