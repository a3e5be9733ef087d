//! Symbol table setup errors.

use kiln_ir::{ClassId, IrType, OperationId};
use thiserror::Error;

/// Fatal errors while populating or freezing a symbol table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error(
        "operation on {receiver} taking {parameter} registered twice \
         ({existing:?} and {duplicate:?})"
    )]
    DuplicateOperation {
        receiver: IrType,
        parameter: IrType,
        existing: OperationId,
        duplicate: OperationId,
    },

    #[error("conversion for {ty} registered twice ({existing:?} and {duplicate:?})")]
    DuplicateConversion {
        ty: IrType,
        existing: OperationId,
        duplicate: OperationId,
    },

    #[error("unknown class {0:?}")]
    UnknownClass(ClassId),

    #[error("unknown operation {0:?}")]
    UnknownOperation(OperationId),

    #[error("{0} table is full")]
    TableFull(&'static str),

    #[error("required built-in `{0}` was never registered")]
    MissingBuiltin(&'static str),
}
