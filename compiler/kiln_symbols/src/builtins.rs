//! Standard library symbols of the target platform.
//!
//! Registers the text builder with its appends, the static `valueOf`
//! conversions and the text `plus` operations. The target has no dedicated
//! append or conversion for `Byte` and `Short`; lowering widens those to
//! `Int` first.

use kiln_ir::{ClassId, IrType, OperationId, StringInterner};
use rustc_hash::FxHashMap;

use crate::{ClassSymbol, Operation, Origin, SymbolError, SymbolTableBuilder};

/// Parameter types with an exact builder append.
pub const APPEND_TYPES: [IrType; 7] = [
    IrType::TEXT,
    IrType::BOOL,
    IrType::CHAR,
    IrType::INT,
    IrType::LONG,
    IrType::FLOAT,
    IrType::DOUBLE,
];

/// Argument types with an exact static text conversion.
pub const CONVERSION_TYPES: [IrType; 6] = [
    IrType::BOOL,
    IrType::CHAR,
    IrType::INT,
    IrType::LONG,
    IrType::FLOAT,
    IrType::DOUBLE,
];

/// Ids of the registered standard symbols.
#[derive(Clone, Debug)]
pub struct Builtins {
    pub string_builder: ClassId,
    pub builder_init: OperationId,
    pub builder_to_string: OperationId,
    /// `StringBuilder.append(Any?)`
    pub append_any: OperationId,
    appends: FxHashMap<IrType, OperationId>,
    /// `String.valueOf(Any?)`
    pub value_of_any: OperationId,
    value_ofs: FxHashMap<IrType, OperationId>,
    /// Static `stringPlus(String?, Any?)`.
    pub string_plus: OperationId,
    /// Member `String.plus(Any?)`.
    pub string_plus_member: OperationId,
    /// Member `String.toString()`.
    pub string_to_string: OperationId,
}

impl Builtins {
    /// Register every standard symbol into `builder`.
    pub fn install(
        builder: &SymbolTableBuilder,
        interner: &StringInterner,
    ) -> Result<Builtins, SymbolError> {
        let package = interner.intern("kotlin.text");
        let module = interner.intern("stdlib");
        let string_builder = builder.add_class(
            ClassSymbol::new(interner.intern("kotlin.text.StringBuilder"), package, module)
                .with_origin(Origin::Foreign),
        )?;
        let builder_ty = IrType::class(string_builder);

        let builder_init = builder.add_operation(Operation::constructor(
            interner.intern("<init>"),
            string_builder,
            Vec::new(),
        ))?;
        let to_string = interner.intern("toString");
        let builder_to_string = builder.add_operation(Operation::member(
            to_string,
            string_builder,
            Vec::new(),
            IrType::TEXT,
        ))?;
        builder.set_text_builder(string_builder, builder_init, builder_to_string)?;
        builder.register_text_conversion_member(builder_to_string)?;

        let append = interner.intern("append");
        let mut appends = FxHashMap::default();
        for ty in APPEND_TYPES {
            let op = builder.add_operation(Operation::member(
                append,
                string_builder,
                vec![ty],
                builder_ty,
            ))?;
            builder.register_exact_operation(builder_ty, ty, op)?;
            appends.insert(ty, op);
        }
        let append_any = builder.add_operation(Operation::member(
            append,
            string_builder,
            vec![IrType::NULLABLE_ANY],
            builder_ty,
        ))?;
        builder.register_generic_operation(builder_ty, append_any)?;

        let value_of = interner.intern("valueOf");
        let mut value_ofs = FxHashMap::default();
        for ty in CONVERSION_TYPES {
            let op = builder.add_operation(Operation::function(value_of, vec![ty], IrType::TEXT))?;
            builder.register_conversion(ty, op)?;
            value_ofs.insert(ty, op);
        }
        let value_of_any = builder.add_operation(Operation::function(
            value_of,
            vec![IrType::NULLABLE_ANY],
            IrType::TEXT,
        ))?;
        builder.register_conversion(IrType::NULLABLE_ANY, value_of_any)?;

        let string_plus = builder.add_operation(Operation::function(
            interner.intern("stringPlus"),
            vec![IrType::NULLABLE_TEXT, IrType::NULLABLE_ANY],
            IrType::TEXT,
        ))?;
        builder.set_text_plus_intrinsic(string_plus)?;

        let string_plus_member = builder.add_operation(Operation::builtin_member(
            interner.intern("plus"),
            vec![IrType::NULLABLE_ANY],
            IrType::TEXT,
        ))?;
        builder.set_text_plus_member(string_plus_member)?;

        let string_to_string =
            builder.add_operation(Operation::builtin_member(to_string, Vec::new(), IrType::TEXT))?;
        builder.register_text_conversion_member(string_to_string)?;

        Ok(Builtins {
            string_builder,
            builder_init,
            builder_to_string,
            append_any,
            appends,
            value_of_any,
            value_ofs,
            string_plus,
            string_plus_member,
            string_to_string,
        })
    }

    /// The exact append for `ty`, if the builder declares one.
    pub fn append_for(&self, ty: IrType) -> Option<OperationId> {
        self.appends.get(&ty).copied()
    }

    /// The exact `valueOf` for `ty`, if one is declared.
    pub fn value_of(&self, ty: IrType) -> Option<OperationId> {
        self.value_ofs.get(&ty).copied()
    }

    pub fn builder_type(&self) -> IrType {
        IrType::class(self.string_builder)
    }
}

#[cfg(test)]
mod tests;
