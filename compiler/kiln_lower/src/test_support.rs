//! Shared fixtures for unit tests.

use kiln_ir::{
    ClassId, IrExpr, IrPrinter, IrType, Name, Span, StringInterner,
};
use kiln_symbols::{
    Builtins, ClassFlags, ClassSymbol, Operation, SymbolTable, SymbolTableBuilder,
};

use crate::LowerCx;

/// Standard symbols plus one inline class `app.Meters` with a lowered
/// text conversion.
pub(crate) struct Fixture {
    pub interner: StringInterner,
    pub table: SymbolTable,
    pub stdlib: Builtins,
    pub meters: ClassId,
    /// Inline class without a registered replacement.
    pub opaque: ClassId,
}

impl Fixture {
    pub fn new() -> Self {
        let interner = StringInterner::new();
        let builder = SymbolTableBuilder::new();
        let stdlib = Builtins::install(&builder, &interner).unwrap_or_else(|e| panic!("{e}"));
        let app = interner.intern("app");
        let main = interner.intern("main");

        let meters = builder.add_class(
            ClassSymbol::new(interner.intern("app.Meters"), app, main)
                .with_flags(ClassFlags::INLINE),
        ).unwrap_or_else(|e| panic!("{e}"));
        let meters_to_string = builder.add_operation(Operation::member(
            interner.intern("toString"),
            meters,
            Vec::new(),
            IrType::TEXT,
        )).unwrap_or_else(|e| panic!("{e}"));
        let meters_to_string_impl = builder.add_operation(Operation::function(
            interner.intern("toString-impl"),
            vec![IrType::class(meters)],
            IrType::TEXT,
        )).unwrap_or_else(|e| panic!("{e}"));
        builder
            .register_inline_to_text(meters, meters_to_string)
            .unwrap_or_else(|e| panic!("{e}"));
        builder
            .register_lowered_replacement(meters_to_string, meters_to_string_impl)
            .unwrap_or_else(|e| panic!("{e}"));

        let opaque = builder.add_class(
            ClassSymbol::new(interner.intern("app.Opaque"), app, main)
                .with_flags(ClassFlags::INLINE),
        ).unwrap_or_else(|e| panic!("{e}"));

        let table = builder.freeze().unwrap_or_else(|e| panic!("{e}"));
        Fixture {
            interner,
            table,
            stdlib,
            meters,
            opaque,
        }
    }

    pub fn cx(&self) -> LowerCx<'_> {
        LowerCx::new(&self.table, &self.interner)
    }

    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    pub fn get(&self, name: &str, ty: IrType) -> IrExpr {
        IrExpr::get(self.name(name), ty, Span::DUMMY)
    }

    pub fn text(&self, value: &str) -> IrExpr {
        IrExpr::text(self.name(value), Span::DUMMY)
    }

    pub fn dump(&self, expr: &IrExpr) -> String {
        let names = self.table.names(&self.interner);
        IrPrinter::new(&names, &self.interner).print_expr(expr)
    }
}
