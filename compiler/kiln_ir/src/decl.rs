//! Declarations and files.

use super::{ClassId, IrExpr, IrType, Name, Span};

/// Function parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: Name,
    pub ty: IrType,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionDecl {
    pub name: Name,
    pub params: Vec<Param>,
    pub return_type: IrType,
    /// `None` for abstract or external functions.
    pub body: Option<IrExpr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyDecl {
    pub name: Name,
    pub ty: IrType,
    pub initializer: Option<IrExpr>,
    pub span: Span,
}

/// A supertype as written in a class header.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SuperTypeRef {
    /// `None` when the front-end could not resolve the reference.
    pub class: Option<ClassId>,
    pub span: Span,
}

impl SuperTypeRef {
    pub const fn resolved(class: ClassId, span: Span) -> Self {
        SuperTypeRef {
            class: Some(class),
            span,
        }
    }

    pub const fn unresolved(span: Span) -> Self {
        SuperTypeRef { class: None, span }
    }
}

/// A class declaration. Its package, module and modality live on the
/// symbol referenced by `symbol`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassDecl {
    pub symbol: ClassId,
    pub supertypes: Vec<SuperTypeRef>,
    pub members: Vec<Decl>,
    pub span: Span,
}

impl ClassDecl {
    pub fn new(symbol: ClassId, span: Span) -> Self {
        ClassDecl {
            symbol,
            supertypes: Vec::new(),
            members: Vec::new(),
            span,
        }
    }

    #[must_use]
    pub fn with_supertype(mut self, supertype: SuperTypeRef) -> Self {
        self.supertypes.push(supertype);
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: Decl) -> Self {
        self.members.push(member);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Decl {
    Function(FunctionDecl),
    Property(PropertyDecl),
    Class(ClassDecl),
}

/// One source file's worth of IR.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IrFile {
    pub name: Name,
    pub package: Name,
    pub declarations: Vec<Decl>,
}

impl IrFile {
    pub fn new(name: Name, package: Name) -> Self {
        IrFile {
            name,
            package,
            declarations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_decl(mut self, decl: Decl) -> Self {
        self.declarations.push(decl);
        self
    }
}
