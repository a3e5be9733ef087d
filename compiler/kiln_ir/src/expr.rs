//! Expression trees.
//!
//! Every `IrExpr` owns its children exclusively. Phases rewrite a tree by
//! taking a node out of its slot ([`IrExpr::take`]), building a replacement
//! that reuses the old children by move, and writing the replacement back.

use super::{ClassDecl, IrType, Name, OperationId, Span};

/// Compile-time constant.
///
/// Floats are stored as their bit pattern so the tree can derive `Eq`/`Hash`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstValue {
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    Float(u64),
    Text(Name),
}

/// Type operators, including the ones the front-end inserts implicitly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeOperator {
    /// Checked cast written in source (`x as T`).
    Cast,
    /// Compiler-inserted conversion with no runtime check.
    ImplicitCast,
    /// Compiler-inserted assertion that a platform-typed value is not null.
    ImplicitNotNull,
    /// `x as? T`
    SafeCast,
    /// `x is T`
    InstanceOf,
}

impl TypeOperator {
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeOperator::Cast => "CAST",
            TypeOperator::ImplicitCast => "IMPLICIT_CAST",
            TypeOperator::ImplicitNotNull => "IMPLICIT_NOTNULL",
            TypeOperator::SafeCast => "SAFE_CAST",
            TypeOperator::InstanceOf => "INSTANCEOF",
        }
    }
}

/// A call to a resolved operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IrCall {
    pub callee: OperationId,
    /// Dispatch receiver for member operations.
    pub receiver: Option<Box<IrExpr>>,
    pub args: Vec<IrExpr>,
}

/// One arm of a `When` expression. An `else` arm has a `true` condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WhenBranch {
    pub condition: IrExpr,
    pub result: IrExpr,
}

/// Expression node kinds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Const(ConstValue),
    /// Read of a local variable or parameter.
    GetValue(Name),
    Call(IrCall),
    /// N-ary text concatenation; operands are evaluated left to right.
    Concat(Vec<IrExpr>),
    TypeOp {
        op: TypeOperator,
        operand: Box<IrExpr>,
        target: IrType,
    },
    Block(Vec<IrExpr>),
    Return(Box<IrExpr>),
    SetValue {
        name: Name,
        value: Box<IrExpr>,
    },
    When(Vec<WhenBranch>),
    /// A class declared inside a body.
    LocalClass(Box<ClassDecl>),
}

/// A typed expression node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IrExpr {
    pub kind: ExprKind,
    pub ty: IrType,
    pub span: Span,
}

impl IrExpr {
    #[inline]
    pub fn new(kind: ExprKind, ty: IrType, span: Span) -> Self {
        IrExpr { kind, ty, span }
    }

    /// An empty `Unit` block. Used as the filler left behind by [`IrExpr::take`].
    #[inline]
    pub fn empty() -> Self {
        IrExpr::new(ExprKind::Block(Vec::new()), IrType::UNIT, Span::DUMMY)
    }

    /// Move this node out, leaving [`IrExpr::empty`] in its place.
    #[inline]
    pub fn take(&mut self) -> IrExpr {
        std::mem::replace(self, IrExpr::empty())
    }

    pub fn text(value: Name, span: Span) -> Self {
        IrExpr::new(ExprKind::Const(ConstValue::Text(value)), IrType::TEXT, span)
    }

    pub fn int(value: i64, ty: IrType, span: Span) -> Self {
        IrExpr::new(ExprKind::Const(ConstValue::Int(value)), ty, span)
    }

    pub fn boolean(value: bool, span: Span) -> Self {
        IrExpr::new(ExprKind::Const(ConstValue::Bool(value)), IrType::BOOL, span)
    }

    pub fn null(ty: IrType, span: Span) -> Self {
        IrExpr::new(ExprKind::Const(ConstValue::Null), ty.make_nullable(), span)
    }

    pub fn get(name: Name, ty: IrType, span: Span) -> Self {
        IrExpr::new(ExprKind::GetValue(name), ty, span)
    }

    /// A call with no receiver and no arguments yet.
    pub fn call(callee: OperationId, ty: IrType, span: Span) -> Self {
        IrExpr::new(
            ExprKind::Call(IrCall {
                callee,
                receiver: None,
                args: Vec::new(),
            }),
            ty,
            span,
        )
    }

    /// Set the dispatch receiver of a call node. No-op on other kinds.
    #[must_use]
    pub fn with_receiver(mut self, receiver: IrExpr) -> Self {
        if let ExprKind::Call(call) = &mut self.kind {
            call.receiver = Some(Box::new(receiver));
        }
        self
    }

    /// Append an argument to a call node. No-op on other kinds.
    #[must_use]
    pub fn with_arg(mut self, arg: IrExpr) -> Self {
        if let ExprKind::Call(call) = &mut self.kind {
            call.args.push(arg);
        }
        self
    }

    pub fn concat(operands: Vec<IrExpr>, span: Span) -> Self {
        IrExpr::new(ExprKind::Concat(operands), IrType::TEXT, span)
    }

    pub fn type_op(op: TypeOperator, operand: IrExpr, target: IrType) -> Self {
        let span = operand.span;
        IrExpr::new(
            ExprKind::TypeOp {
                op,
                operand: Box::new(operand),
                target,
            },
            target,
            span,
        )
    }

    /// Wrap a platform-typed value in an implicit not-null assertion.
    pub fn implicit_not_null(operand: IrExpr) -> Self {
        let target = operand.ty.make_non_null();
        IrExpr::type_op(TypeOperator::ImplicitNotNull, operand, target)
    }

    pub fn implicit_cast(operand: IrExpr, target: IrType) -> Self {
        IrExpr::type_op(TypeOperator::ImplicitCast, operand, target)
    }

    pub fn block(statements: Vec<IrExpr>, ty: IrType, span: Span) -> Self {
        IrExpr::new(ExprKind::Block(statements), ty, span)
    }

    pub fn ret(value: IrExpr, span: Span) -> Self {
        IrExpr::new(ExprKind::Return(Box::new(value)), IrType::NOTHING, span)
    }

    pub fn local_class(class: ClassDecl) -> Self {
        let span = class.span;
        IrExpr::new(ExprKind::LocalClass(Box::new(class)), IrType::UNIT, span)
    }

    #[inline]
    pub fn is_implicit_not_null(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::TypeOp {
                op: TypeOperator::ImplicitNotNull,
                ..
            }
        )
    }

    /// Strip one implicit not-null assertion, returning the asserted operand.
    pub fn unwrap_implicit_not_null(self) -> IrExpr {
        match self.kind {
            ExprKind::TypeOp {
                op: TypeOperator::ImplicitNotNull,
                operand,
                ..
            } => *operand,
            kind => IrExpr {
                kind,
                ty: self.ty,
                span: self.span,
            },
        }
    }

    pub fn as_call(&self) -> Option<&IrCall> {
        match &self.kind {
            ExprKind::Call(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_concat(&self) -> Option<&[IrExpr]> {
        match &self.kind {
            ExprKind::Concat(operands) => Some(operands),
            _ => None,
        }
    }
}
