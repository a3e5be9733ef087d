use super::*;
use kiln_diagnostic::Diagnostic;
use kiln_ir::{ClassId, Decl, FunctionDecl, IrExpr, IrType, Span, StringInterner};
use kiln_symbols::{
    Builtins, ClassFlags, Modality, Origin, SymbolTable, SymbolTableBuilder,
};
use pretty_assertions::assert_eq;

/// `app` / `main` classes plus sealed bases in various places.
struct Classes {
    table: SymbolTable,
    /// Sealed, `app` / `main`.
    shape: ClassId,
    /// Sealed, foreign, `lib` / `vendor`.
    foreign_sealed: ClassId,
    /// Sealed, `other` / `main`.
    other_package: ClassId,
    /// Sealed, `app` / `plugin`.
    other_module: ClassId,
    /// Open, foreign, `lib` / `vendor`.
    open_base: ClassId,
    /// Sealed but local.
    local_sealed: ClassId,
    /// Subject classes.
    circle: ClassId,
    local: ClassId,
}

fn classes() -> Classes {
    let interner = StringInterner::new();
    let builder = SymbolTableBuilder::new();
    Builtins::install(&builder, &interner).unwrap_or_else(|e| panic!("{e}"));
    let class = |name: &str, package: &str, module: &str| {
        ClassSymbol::new(
            interner.intern(name),
            interner.intern(package),
            interner.intern(module),
        )
    };

    let add = |symbol: ClassSymbol| builder.add_class(symbol).unwrap_or_else(|e| panic!("{e}"));

    let shape = add(class("app.Shape", "app", "main").with_modality(Modality::Sealed));
    let foreign_sealed = add(
        class("lib.Node", "lib", "vendor")
            .with_modality(Modality::Sealed)
            .with_origin(Origin::Foreign),
    );
    let other_package = add(class("other.Expr", "other", "main").with_modality(Modality::Sealed));
    let other_module = add(class("app.Token", "app", "plugin").with_modality(Modality::Sealed));
    let open_base = add(
        class("lib.Base", "lib", "vendor")
            .with_modality(Modality::Open)
            .with_origin(Origin::Foreign),
    );
    let local_sealed = add(
        class("app.f.Inner", "app", "main")
            .with_modality(Modality::Sealed)
            .with_flags(ClassFlags::LOCAL),
    );
    let circle = add(class("app.Circle", "app", "main"));
    let local = add(class("app.f.Local", "app", "main").with_flags(ClassFlags::LOCAL));

    Classes {
        table: builder.freeze().unwrap_or_else(|e| panic!("{e}")),
        shape,
        foreign_sealed,
        other_package,
        other_module,
        open_base,
        local_sealed,
        circle,
        local,
    }
}

fn extends(symbol: ClassId, supertypes: &[(Option<ClassId>, u32)]) -> ClassDecl {
    supertypes
        .iter()
        .fold(ClassDecl::new(symbol, Span::DUMMY), |decl, &(class, at)| {
            let span = Span::new(at, at + 5);
            decl.with_supertype(match class {
                Some(class) => SuperTypeRef::resolved(class, span),
                None => SuperTypeRef::unresolved(span),
            })
        })
}

fn check(decl: &ClassDecl, table: &SymbolTable) -> Vec<Diagnostic> {
    let mut out: Vec<Diagnostic> = Vec::new();
    SealedSupertypeChecker::check(decl, table, &mut out);
    out
}

fn kinds(diagnostics: &[Diagnostic]) -> Vec<(Option<DiagnosticKind>, Option<Span>)> {
    diagnostics
        .iter()
        .map(|d| (d.kind, d.primary_span()))
        .collect()
}

#[test]
fn same_package_and_module_is_allowed() {
    let c = classes();
    assert!(check(&extends(c.circle, &[(Some(c.shape), 10)]), &c.table).is_empty());
}

#[test]
fn foreign_sealed_in_other_package_and_module_reports_all_three() {
    let c = classes();
    let diagnostics = check(&extends(c.circle, &[(Some(c.foreign_sealed), 20)]), &c.table);
    let at = Some(Span::new(20, 25));
    assert_eq!(
        kinds(&diagnostics),
        vec![
            (Some(DiagnosticKind::ForeignSealedInheritance), at),
            (Some(DiagnosticKind::CrossPackageSealedInheritance), at),
            (Some(DiagnosticKind::CrossModuleSealedInheritance), at),
        ]
    );
}

#[test]
fn package_and_module_are_checked_separately() {
    let c = classes();
    let diagnostics = check(
        &extends(c.circle, &[(Some(c.other_package), 0), (Some(c.other_module), 30)]),
        &c.table,
    );
    assert_eq!(
        kinds(&diagnostics),
        vec![
            (
                Some(DiagnosticKind::CrossPackageSealedInheritance),
                Some(Span::new(0, 5))
            ),
            (
                Some(DiagnosticKind::CrossModuleSealedInheritance),
                Some(Span::new(30, 35))
            ),
        ]
    );
}

#[test]
fn unresolved_local_and_open_supertypes_are_skipped() {
    let c = classes();
    let decl = extends(
        c.circle,
        &[
            (None, 0),
            (Some(c.local_sealed), 10),
            (Some(c.open_base), 20),
            (Some(ClassId::new(9_999)), 30),
        ],
    );
    assert!(check(&decl, &c.table).is_empty());
}

#[test]
fn local_class_reports_only_its_first_sealed_supertype() {
    let c = classes();
    let decl = extends(
        c.local,
        &[
            (Some(c.open_base), 0),
            (Some(c.shape), 10),
            (Some(c.foreign_sealed), 20),
        ],
    );
    assert_eq!(
        kinds(&check(&decl, &c.table)),
        vec![(
            Some(DiagnosticKind::SealedSupertypeInLocalScope),
            Some(Span::new(10, 15))
        )]
    );
}

#[test]
fn local_class_ignores_local_sealed_supertypes() {
    let c = classes();
    let decl = extends(c.local, &[(Some(c.local_sealed), 0), (None, 10)]);
    assert!(check(&decl, &c.table).is_empty());
}

#[test]
fn unknown_subclass_symbol_is_not_checked() {
    let c = classes();
    let decl = extends(ClassId::new(9_999), &[(Some(c.foreign_sealed), 0)]);
    assert!(check(&decl, &c.table).is_empty());
}

#[test]
fn check_file_reaches_nested_and_local_classes() {
    let c = classes();
    let interner = StringInterner::new();
    let local = extends(c.local, &[(Some(c.shape), 40)]);
    let body = IrExpr::block(
        vec![IrExpr::local_class(local), IrExpr::int(1, IrType::INT, Span::DUMMY)],
        IrType::INT,
        Span::DUMMY,
    );
    let nested = extends(c.circle, &[(Some(c.other_module), 20)]);
    let outer = extends(c.circle, &[(Some(c.other_package), 0)])
        .with_member(Decl::Class(nested))
        .with_member(Decl::Function(FunctionDecl {
            name: interner.intern("f"),
            params: Vec::new(),
            return_type: IrType::INT,
            body: Some(body),
            span: Span::DUMMY,
        }));
    let file = IrFile::new(interner.intern("shapes.kt"), interner.intern("app"))
        .with_decl(Decl::Class(outer));

    let mut out: Vec<Diagnostic> = Vec::new();
    SealedSupertypeChecker::check_file(&file, &c.table, &mut out);
    let mut found: Vec<_> = out.iter().filter_map(|d| d.kind).collect();
    found.sort_by_key(|k| k.code().as_str());
    assert_eq!(
        found,
        vec![
            DiagnosticKind::CrossPackageSealedInheritance,
            DiagnosticKind::CrossModuleSealedInheritance,
            DiagnosticKind::SealedSupertypeInLocalScope,
        ]
    );
}
