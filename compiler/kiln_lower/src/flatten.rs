//! Concatenation flattening.
//!
//! The front-end produces binary `String.plus` calls and nested
//! concatenation nodes. Lowering wants one n-ary node per chain:
//!
//! ```text
//! ("a" + x) + y.toString()   ==>   CONCAT("a", x, y)
//! ```
//!
//! Flattening runs children first, so every operand is already flat when
//! its parent is visited and one level of splicing suffices.

use kiln_ir::{ExprKind, IrCall, IrExpr, IrType, Span};

use crate::{LowerCx, RewriteRule};

/// Rule of the flatten-concatenation phase.
#[derive(Copy, Clone, Debug, Default)]
pub struct FlattenConcatenation;

impl RewriteRule for FlattenConcatenation {
    fn rewrite(&self, expr: IrExpr, cx: &mut LowerCx<'_>) -> IrExpr {
        let IrExpr { kind, ty, span } = expr;
        match kind {
            ExprKind::Concat(operands) => {
                let (operands, spliced) = splice(operands);
                if spliced {
                    cx.note_rewrite();
                }
                IrExpr::new(ExprKind::Concat(operands), ty, span)
            }
            ExprKind::Call(call) => match flatten_call(call, span, cx) {
                Ok(replacement) => {
                    cx.note_rewrite();
                    replacement
                }
                Err(call) => IrExpr::new(ExprKind::Call(call), ty, span),
            },
            kind => IrExpr::new(kind, ty, span),
        }
    }
}

/// Rewrite `text.plus(x)` or `text.toString()`; any other call is handed
/// back unchanged.
fn flatten_call(mut call: IrCall, span: Span, cx: &LowerCx<'_>) -> Result<IrExpr, IrCall> {
    let oracle = cx.oracle();
    let Some(receiver) = call.receiver.take() else {
        return Err(call);
    };

    if oracle.text_plus_member() == Some(call.callee)
        && receiver.ty.is_text_class()
        && call.args.len() == 1
    {
        let mut operands = Vec::with_capacity(2);
        operands.push(*receiver);
        operands.append(&mut call.args);
        let (operands, _) = splice(operands);
        return Ok(IrExpr::concat(operands, span));
    }

    // Only a non-null receiver: `null.toString()` is the text "null".
    if oracle.is_text_conversion_member(call.callee)
        && call.args.is_empty()
        && receiver.ty == IrType::TEXT
    {
        return Ok(*receiver);
    }

    call.receiver = Some(receiver);
    Err(call)
}

/// Splice operands that are themselves concatenations.
///
/// A concatenation wrapped in a type operator, such as an implicit not-null
/// assertion, is an ordinary operand and is kept whole.
fn splice(operands: Vec<IrExpr>) -> (Vec<IrExpr>, bool) {
    if !operands.iter().any(|op| op.as_concat().is_some()) {
        return (operands, false);
    }
    let mut flat = Vec::with_capacity(operands.len());
    for operand in operands {
        match operand.kind {
            ExprKind::Concat(inner) => flat.extend(inner),
            kind => flat.push(IrExpr::new(kind, operand.ty, operand.span)),
        }
    }
    (flat, true)
}
