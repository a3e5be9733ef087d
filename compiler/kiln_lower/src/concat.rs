//! Concatenation lowering.
//!
//! Replaces every `Concat` node with calls the code generator understands.
//! The shape depends on the operand count:
//!
//! | operands                 | lowered to                                 |
//! |--------------------------|--------------------------------------------|
//! | none                     | the constant `""`                          |
//! | one                      | `valueOf(x)` for the operand's type        |
//! | two, first is text       | `stringPlus(a, b)`                         |
//! | otherwise                | `StringBuilder().append(..)...toString()`  |
//!
//! Before that, inline-class operands are routed through the lowered
//! replacement of their text conversion.
//!
//! # Implicit not-null assertions
//!
//! An operand of platform text type may be wrapped in an `IMPLICIT_NOTNULL`
//! type operator. The established target behavior does not check such
//! operands for null during concatenation, so the assertion is stripped from
//! the single operand, from the first operand of the intrinsic, and from
//! every builder append argument. The second intrinsic argument keeps its
//! assertion; the intrinsic accepts `Any?` there anyway.

use kiln_ir::{ExprKind, IrExpr, IrType, Name, OperationId, Span};
use kiln_symbols::TypeOracle;

use crate::{LowerCx, RewriteRule};

/// Rule of the concatenation phase.
#[derive(Copy, Clone, Debug, Default)]
pub struct LowerConcatenation;

impl RewriteRule for LowerConcatenation {
    fn rewrite(&self, expr: IrExpr, cx: &mut LowerCx<'_>) -> IrExpr {
        match expr.kind {
            ExprKind::Concat(operands) => {
                cx.note_rewrite();
                lower_concat(operands, expr.span, cx.oracle())
            }
            kind => IrExpr::new(kind, expr.ty, expr.span),
        }
    }
}

#[tracing::instrument(level = "trace", skip_all, fields(operands = operands.len()))]
fn lower_concat(operands: Vec<IrExpr>, span: Span, oracle: &dyn TypeOracle) -> IrExpr {
    let mut operands: Vec<IrExpr> = operands
        .into_iter()
        .map(|operand| lower_inline_class_operand(operand, oracle))
        .collect();

    match operands.len() {
        0 => IrExpr::text(Name::EMPTY, span),
        1 => {
            let single = operands.swap_remove(0);
            call_to_text(single.unwrap_implicit_not_null(), span, oracle)
        }
        2 if operands[0].ty.is_text_class() => {
            let second = operands.swap_remove(1);
            let first = operands.swap_remove(0);
            let intrinsic = oracle.text_plus_intrinsic();
            call(intrinsic, span, oracle)
                .with_arg(first.unwrap_implicit_not_null())
                .with_arg(second)
        }
        _ => build_with_builder(operands, span, oracle),
    }
}

/// Route a non-null inline-class operand through the static replacement of
/// its class's text conversion. Operands without both pieces are unchanged.
fn lower_inline_class_operand(operand: IrExpr, oracle: &dyn TypeOracle) -> IrExpr {
    if operand.ty.nullable {
        return operand;
    }
    let Some(class) = operand.ty.as_class() else {
        return operand;
    };
    if !oracle.class(class).is_some_and(|symbol| symbol.is_inline()) {
        return operand;
    }
    let Some(replacement) = oracle
        .inline_class_to_text(class)
        .and_then(|to_text| oracle.lowered_replacement(to_text))
    else {
        tracing::trace!(?class, "inline class has no lowered text conversion");
        return operand;
    };
    let span = operand.span;
    call(replacement, span, oracle).with_arg(operand)
}

/// The target has no text conversion or append for `Byte`/`Short`.
fn widen_integer_type(expr: IrExpr) -> IrExpr {
    if expr.ty.is_narrow_integer() {
        IrExpr::implicit_cast(expr, IrType::INT)
    } else {
        expr
    }
}

fn call_to_text(operand: IrExpr, span: Span, oracle: &dyn TypeOracle) -> IrExpr {
    let argument = widen_integer_type(operand);
    let argument_type = if argument.ty.is_primitive() {
        argument.ty
    } else {
        IrType::NULLABLE_ANY
    };
    let conversion = oracle.resolve_conversion_function(argument_type);
    call(conversion, span, oracle).with_arg(argument)
}

fn build_with_builder(operands: Vec<IrExpr>, span: Span, oracle: &dyn TypeOracle) -> IrExpr {
    let builder_type = oracle.builder_type();
    let mut chain = call(oracle.builder_constructor(), span, oracle);

    for operand in operands {
        let argument = widen_integer_type(operand);
        let append = oracle
            .find_exact_operation(builder_type, argument.ty)
            .unwrap_or_else(|| {
                tracing::trace!(ty = %argument.ty, "no exact append, using the Any? append");
                oracle.find_generic_operation(builder_type)
            });
        // Any operand may hide a flattened `String.plus` on a platform
        // receiver, so every argument loses its assertion. A widened
        // `Byte`/`Short` keeps it under the cast.
        chain = call(append, span, oracle)
            .with_receiver(chain)
            .with_arg(argument.unwrap_implicit_not_null());
    }

    call(oracle.builder_materialize(), span, oracle).with_receiver(chain)
}

/// A call node typed by the callee's declared return type.
fn call(op: OperationId, span: Span, oracle: &dyn TypeOracle) -> IrExpr {
    let ty = oracle
        .operation(op)
        .map_or(IrType::TEXT, |operation| operation.return_type);
    IrExpr::call(op, ty, span)
}
