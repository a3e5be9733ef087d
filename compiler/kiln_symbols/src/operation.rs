//! Operation symbols: functions, constructors and intrinsics.

use kiln_ir::{ClassId, IrType, Name};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperationKind {
    Constructor,
    /// Dispatched on a receiver.
    Member,
    /// No receiver; includes intrinsics and lowered replacements.
    Static,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Operation {
    pub name: Name,
    pub owner: Option<ClassId>,
    pub kind: OperationKind,
    /// Value parameter types, excluding the receiver.
    pub params: Vec<IrType>,
    pub return_type: IrType,
}

impl Operation {
    pub fn constructor(name: Name, owner: ClassId, params: Vec<IrType>) -> Self {
        Operation {
            name,
            owner: Some(owner),
            kind: OperationKind::Constructor,
            params,
            return_type: IrType::class(owner),
        }
    }

    pub fn member(name: Name, owner: ClassId, params: Vec<IrType>, return_type: IrType) -> Self {
        Operation {
            name,
            owner: Some(owner),
            kind: OperationKind::Member,
            params,
            return_type,
        }
    }

    pub fn function(name: Name, params: Vec<IrType>, return_type: IrType) -> Self {
        Operation {
            name,
            owner: None,
            kind: OperationKind::Static,
            params,
            return_type,
        }
    }

    /// Receiver-less member of a built-in type such as `String.plus`, where
    /// the owner is not a class symbol.
    pub fn builtin_member(name: Name, params: Vec<IrType>, return_type: IrType) -> Self {
        Operation {
            name,
            owner: None,
            kind: OperationKind::Member,
            params,
            return_type,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn has_receiver(&self) -> bool {
        self.kind == OperationKind::Member
    }
}
