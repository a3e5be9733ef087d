use super::*;
use crate::TypeOracle;
use kiln_ir::{IrExpr, IrPrinter, Span, SymbolNames};
use pretty_assertions::assert_eq;

#[test]
fn narrow_integers_have_no_dedicated_symbols() {
    let interner = StringInterner::new();
    let builder = SymbolTableBuilder::new();
    let stdlib = Builtins::install(&builder, &interner).unwrap_or_else(|e| panic!("{e}"));
    for ty in [IrType::BYTE, IrType::SHORT] {
        assert_eq!(stdlib.append_for(ty), None);
        assert_eq!(stdlib.value_of(ty), None);
    }
    assert!(stdlib.append_for(IrType::TEXT).is_some());
    assert_eq!(stdlib.value_of(IrType::TEXT), None);
}

#[test]
fn installing_twice_is_rejected() {
    let interner = StringInterner::new();
    let builder = SymbolTableBuilder::new();
    assert!(Builtins::install(&builder, &interner).is_ok());
    assert!(matches!(
        Builtins::install(&builder, &interner),
        Err(SymbolError::DuplicateConversion { .. })
    ));
}

#[test]
fn display_names() {
    let interner = StringInterner::new();
    let builder = SymbolTableBuilder::new();
    let stdlib = Builtins::install(&builder, &interner).unwrap_or_else(|e| panic!("{e}"));
    let table = builder.freeze().unwrap_or_else(|e| panic!("{e}"));
    let names = table.names(&interner);

    let call = IrExpr::call(stdlib.builder_to_string, IrType::TEXT, Span::DUMMY).with_receiver(
        IrExpr::call(stdlib.append_any, table.builder_type(), Span::DUMMY)
            .with_receiver(IrExpr::call(
                stdlib.builder_init,
                table.builder_type(),
                Span::DUMMY,
            ))
            .with_arg(IrExpr::null(IrType::ANY, Span::DUMMY)),
    );
    assert_eq!(
        IrPrinter::new(&names, &interner).print_expr(&call),
        "CALL StringBuilder.toString(): String\n\
         \x20 $this: CALL StringBuilder.append(Any?): StringBuilder\n\
         \x20   $this: CALL StringBuilder.<init>(): StringBuilder\n\
         \x20   arg0: CONST null: Any?\n"
    );
    assert_eq!(names.operation_name(stdlib.string_plus), "stringPlus(String?, Any?)");
}
