//! The frozen symbol table.

use kiln_ir::{ClassId, IrType, OperationId, StringInterner, SymbolNames, TypeKind};

use crate::builder::{Tables, TextBuilder};
use crate::{ClassSymbol, Operation, TypeOracle};

/// Immutable symbol table produced by
/// [`SymbolTableBuilder::freeze`](crate::SymbolTableBuilder::freeze).
pub struct SymbolTable {
    tables: Tables,
    text_builder: TextBuilder,
    builder_generic: OperationId,
    generic_conversion: OperationId,
    text_plus_intrinsic: OperationId,
}

impl SymbolTable {
    pub(crate) fn from_parts(
        tables: Tables,
        text_builder: TextBuilder,
        builder_generic: OperationId,
        generic_conversion: OperationId,
        text_plus_intrinsic: OperationId,
    ) -> Self {
        SymbolTable {
            tables,
            text_builder,
            builder_generic,
            generic_conversion,
            text_plus_intrinsic,
        }
    }

    pub fn class_count(&self) -> usize {
        self.tables.classes.len()
    }

    pub fn operation_count(&self) -> usize {
        self.tables.operations.len()
    }

    /// The class symbol behind a class-typed `ty`.
    pub fn class_of(&self, ty: IrType) -> Option<&ClassSymbol> {
        ty.as_class().and_then(|id| self.class(id))
    }

    /// Display names resolved through `interner`.
    pub fn names<'a>(&'a self, interner: &'a StringInterner) -> SymbolDisplay<'a> {
        SymbolDisplay {
            table: self,
            interner,
        }
    }
}

impl TypeOracle for SymbolTable {
    #[inline]
    fn class(&self, id: ClassId) -> Option<&ClassSymbol> {
        self.tables.classes.get(id.index())
    }

    #[inline]
    fn operation(&self, id: OperationId) -> Option<&Operation> {
        self.tables.operations.get(id.index())
    }

    fn builder_type(&self) -> IrType {
        IrType::class(self.text_builder.class)
    }

    fn builder_constructor(&self) -> OperationId {
        self.text_builder.constructor
    }

    fn builder_materialize(&self) -> OperationId {
        self.text_builder.materialize
    }

    fn find_exact_operation(&self, receiver: IrType, parameter: IrType) -> Option<OperationId> {
        self.tables.exact.get(&(receiver, parameter)).copied()
    }

    /// Falls back to the builder's generic append for receivers without
    /// their own.
    fn find_generic_operation(&self, receiver: IrType) -> OperationId {
        self.tables
            .generic
            .get(&receiver)
            .copied()
            .unwrap_or(self.builder_generic)
    }

    fn resolve_conversion_function(&self, ty: IrType) -> OperationId {
        if let Some(&op) = self.tables.conversions.get(&ty) {
            return op;
        }
        tracing::trace!(%ty, "no exact text conversion, using the Any? conversion");
        self.generic_conversion
    }

    fn text_plus_intrinsic(&self) -> OperationId {
        self.text_plus_intrinsic
    }

    fn text_plus_member(&self) -> Option<OperationId> {
        self.tables.text_plus_member
    }

    fn is_text_conversion_member(&self, op: OperationId) -> bool {
        self.tables.text_conversion_members.contains(&op)
    }

    fn inline_class_to_text(&self, class: ClassId) -> Option<OperationId> {
        self.tables.inline_to_text.get(&class).copied()
    }

    fn lowered_replacement(&self, op: OperationId) -> Option<OperationId> {
        self.tables.replacements.get(&op).copied()
    }
}

/// [`SymbolNames`] view of a table, for IR dumps.
#[derive(Copy, Clone)]
pub struct SymbolDisplay<'a> {
    table: &'a SymbolTable,
    interner: &'a StringInterner,
}

impl SymbolDisplay<'_> {
    fn type_name(&self, ty: IrType) -> String {
        let base = match ty.kind {
            TypeKind::Class(id) => self.class_name(id),
            _ => ty.make_non_null().to_string(),
        };
        if ty.nullable {
            format!("{base}?")
        } else {
            base
        }
    }
}

impl SymbolNames for SymbolDisplay<'_> {
    fn operation_name(&self, id: OperationId) -> String {
        let Some(op) = self.table.operation(id) else {
            return format!("<op#{}>", id.raw());
        };
        let params: Vec<String> = op.params.iter().map(|&p| self.type_name(p)).collect();
        let name = self.interner.lookup(op.name);
        match op.owner {
            Some(owner) => format!("{}.{name}({})", self.class_name(owner), params.join(", ")),
            None => format!("{name}({})", params.join(", ")),
        }
    }

    /// Simple name: the qualified name after its last `.`.
    fn class_name(&self, id: ClassId) -> String {
        match self.table.class(id) {
            Some(class) => {
                let qualified = self.interner.lookup(class.qualified_name);
                qualified
                    .rsplit_once('.')
                    .map_or(qualified, |(_, simple)| simple)
                    .to_owned()
            }
            None => format!("<class#{}>", id.raw()),
        }
    }
}
