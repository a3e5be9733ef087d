//! The query interface lowering phases select call targets through.

use kiln_ir::{ClassId, IrType, OperationId};

use crate::{ClassSymbol, Operation};

/// Read-only type and symbol queries.
///
/// Implementations are immutable for the lifetime of a session and are
/// shared between worker threads, hence the `Sync` bound.
pub trait TypeOracle: Sync {
    fn class(&self, id: ClassId) -> Option<&ClassSymbol>;

    fn operation(&self, id: OperationId) -> Option<&Operation>;

    /// Type of the text-builder class.
    fn builder_type(&self) -> IrType;

    /// Zero-argument builder constructor.
    fn builder_constructor(&self) -> OperationId;

    /// Builder member producing the final text (`toString`).
    fn builder_materialize(&self) -> OperationId;

    /// Member of `receiver` whose single parameter type is exactly
    /// `parameter`. Identity comparison: `String` does not match `String?`.
    fn find_exact_operation(&self, receiver: IrType, parameter: IrType) -> Option<OperationId>;

    /// Member of `receiver` taking `Any?`.
    fn find_generic_operation(&self, receiver: IrType) -> OperationId;

    /// Static text conversion (`valueOf`) for `ty`, or the `Any?` one when
    /// none is registered for exactly `ty`.
    fn resolve_conversion_function(&self, ty: IrType) -> OperationId;

    /// Static two-argument concatenation `(String?, Any?) -> String`.
    fn text_plus_intrinsic(&self) -> OperationId;

    /// The `String.plus(Any?)` member, if the front-end uses one.
    fn text_plus_member(&self) -> Option<OperationId>;

    /// Whether `op` is a zero-argument member converting its receiver to text.
    fn is_text_conversion_member(&self, op: OperationId) -> bool;

    /// The text conversion member declared by an inline class.
    fn inline_class_to_text(&self, class: ClassId) -> Option<OperationId>;

    /// Static replacement for a member of an inline class, taking the
    /// underlying value as its first argument.
    fn lowered_replacement(&self, op: OperationId) -> Option<OperationId>;
}
