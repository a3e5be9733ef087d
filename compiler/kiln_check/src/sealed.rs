//! Sealed supertype rules.
//!
//! A sealed class restricts its direct subclasses:
//!
//! - a subclass may not extend a sealed class declared in foreign code
//!   (E3001)
//! - a subclass must live in the same package (E3002)
//! - a subclass must live in the same module (E3003)
//! - a local class may not extend a sealed class at all (E3004)
//!
//! The first three are independent; one supertype reference can violate
//! all of them at once. The local rule reports once per class.

use kiln_diagnostic::{DiagnosticKind, DiagnosticSink};
use kiln_ir::{ClassDecl, IrFile, SuperTypeRef, Visitor};
use kiln_symbols::{ClassSymbol, TypeOracle};

/// Checks the supertype list of class declarations.
pub struct SealedSupertypeChecker<'a> {
    symbols: &'a dyn TypeOracle,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> SealedSupertypeChecker<'a> {
    pub fn new(symbols: &'a dyn TypeOracle, sink: &'a mut dyn DiagnosticSink) -> Self {
        SealedSupertypeChecker { symbols, sink }
    }

    /// Check one class declaration. Nested and local classes inside it are
    /// not visited; use [`check_file`](Self::check_file) for that.
    pub fn check(class: &ClassDecl, symbols: &dyn TypeOracle, sink: &mut dyn DiagnosticSink) {
        SealedSupertypeChecker::new(symbols, sink).check_class(class);
    }

    /// Check every class declared in `file`: top-level, nested, and local
    /// classes inside function bodies and property initializers.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn check_file(file: &IrFile, symbols: &dyn TypeOracle, sink: &mut dyn DiagnosticSink) {
        SealedSupertypeChecker::new(symbols, sink).visit_file(file);
    }

    fn check_class(&mut self, class: &ClassDecl) {
        let symbols = self.symbols;
        let Some(subclass) = symbols.class(class.symbol) else {
            tracing::trace!(class = ?class.symbol, "class symbol unknown, not checked");
            return;
        };
        if subclass.is_local() {
            self.check_local(class);
        } else {
            self.check_global(class, subclass);
        }
    }

    /// The sealed supertype behind `supertype`, skipping unresolved, local
    /// and unknown classes.
    fn supertype_symbol(&self, supertype: &SuperTypeRef) -> Option<&'a ClassSymbol> {
        let symbols = self.symbols;
        let symbol = symbols.class(supertype.class?)?;
        (!symbol.is_local()).then_some(symbol)
    }

    fn check_global(&mut self, class: &ClassDecl, subclass: &ClassSymbol) {
        for supertype in &class.supertypes {
            let Some(superclass) = self.supertype_symbol(supertype) else {
                continue;
            };
            if !superclass.is_sealed() {
                continue;
            }
            if superclass.is_foreign() {
                self.sink
                    .report(DiagnosticKind::ForeignSealedInheritance, supertype.span);
            }
            if superclass.package != subclass.package {
                self.sink
                    .report(DiagnosticKind::CrossPackageSealedInheritance, supertype.span);
            }
            if superclass.module != subclass.module {
                self.sink
                    .report(DiagnosticKind::CrossModuleSealedInheritance, supertype.span);
            }
        }
    }

    fn check_local(&mut self, class: &ClassDecl) {
        let sealed = class.supertypes.iter().find(|supertype| {
            self.supertype_symbol(supertype)
                .is_some_and(ClassSymbol::is_sealed)
        });
        if let Some(supertype) = sealed {
            self.sink
                .report(DiagnosticKind::SealedSupertypeInLocalScope, supertype.span);
        }
    }
}

impl Visitor for SealedSupertypeChecker<'_> {
    fn visit_class(&mut self, class: &ClassDecl) {
        self.check_class(class);
        self.walk_class(class);
    }
}

#[cfg(test)]
mod tests;
