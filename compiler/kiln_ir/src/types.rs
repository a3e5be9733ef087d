//! Static types attached to every IR expression.
//!
//! `IrType` equality is identity: the classifier *and* its nullability must
//! match. Lowering phases rely on this when choosing between an exact-match
//! operation and a generic fallback.

use std::fmt;

/// Index of a class symbol owned by the symbol table.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ClassId(u32);

impl ClassId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        ClassId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// Index of an operation (function, constructor, intrinsic) in the symbol table.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct OperationId(u32);

impl OperationId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        OperationId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OperationId({})", self.0)
    }
}

/// Primitive value kinds of the target platform.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrimitiveKind {
    Bool,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    /// Integer kinds narrower than `Int`. The target has no dedicated text
    /// conversion or builder append for them.
    #[inline]
    pub const fn is_narrow_integer(self) -> bool {
        matches!(self, PrimitiveKind::Byte | PrimitiveKind::Short)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "Boolean",
            PrimitiveKind::Char => "Char",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Int => "Int",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }
}

/// The classifier of a type, ignoring nullability.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    /// The built-in text (string) class.
    Text,
    /// Top of the class hierarchy.
    Any,
    Unit,
    Nothing,
    /// A user or library class, including the text-builder class.
    Class(ClassId),
}

/// A static type: classifier plus nullability.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct IrType {
    pub kind: TypeKind,
    pub nullable: bool,
}

impl IrType {
    pub const BOOL: IrType = IrType::primitive(PrimitiveKind::Bool);
    pub const CHAR: IrType = IrType::primitive(PrimitiveKind::Char);
    pub const BYTE: IrType = IrType::primitive(PrimitiveKind::Byte);
    pub const SHORT: IrType = IrType::primitive(PrimitiveKind::Short);
    pub const INT: IrType = IrType::primitive(PrimitiveKind::Int);
    pub const LONG: IrType = IrType::primitive(PrimitiveKind::Long);
    pub const FLOAT: IrType = IrType::primitive(PrimitiveKind::Float);
    pub const DOUBLE: IrType = IrType::primitive(PrimitiveKind::Double);
    pub const TEXT: IrType = IrType::non_null(TypeKind::Text);
    pub const NULLABLE_TEXT: IrType = IrType::TEXT.make_nullable();
    pub const ANY: IrType = IrType::non_null(TypeKind::Any);
    pub const NULLABLE_ANY: IrType = IrType::ANY.make_nullable();
    pub const UNIT: IrType = IrType::non_null(TypeKind::Unit);
    pub const NOTHING: IrType = IrType::non_null(TypeKind::Nothing);

    #[inline]
    pub const fn non_null(kind: TypeKind) -> Self {
        IrType {
            kind,
            nullable: false,
        }
    }

    #[inline]
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        IrType::non_null(TypeKind::Primitive(kind))
    }

    #[inline]
    pub const fn class(id: ClassId) -> Self {
        IrType::non_null(TypeKind::Class(id))
    }

    #[inline]
    #[must_use]
    pub const fn make_nullable(self) -> Self {
        IrType {
            kind: self.kind,
            nullable: true,
        }
    }

    #[inline]
    #[must_use]
    pub const fn make_non_null(self) -> Self {
        IrType {
            kind: self.kind,
            nullable: false,
        }
    }

    /// Non-nullable primitive. `Int?` is a boxed reference, not a primitive.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        !self.nullable && matches!(self.kind, TypeKind::Primitive(_))
    }

    #[inline]
    pub const fn as_primitive(self) -> Option<PrimitiveKind> {
        match self.kind {
            TypeKind::Primitive(kind) if !self.nullable => Some(kind),
            _ => None,
        }
    }

    /// Non-nullable `Byte` or `Short`.
    #[inline]
    pub const fn is_narrow_integer(self) -> bool {
        match self.as_primitive() {
            Some(kind) => kind.is_narrow_integer(),
            None => false,
        }
    }

    /// The classifier is the text class; nullability is not considered.
    #[inline]
    pub const fn is_text_class(self) -> bool {
        matches!(self.kind, TypeKind::Text)
    }

    #[inline]
    pub const fn as_class(self) -> Option<ClassId> {
        match self.kind {
            TypeKind::Class(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TypeKind::Primitive(kind) => f.write_str(kind.as_str())?,
            TypeKind::Text => f.write_str("String")?,
            TypeKind::Any => f.write_str("Any")?,
            TypeKind::Unit => f.write_str("Unit")?,
            TypeKind::Nothing => f.write_str("Nothing")?,
            TypeKind::Class(id) => write!(f, "class#{}", id.raw())?,
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}
