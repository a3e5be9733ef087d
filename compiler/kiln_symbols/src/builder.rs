//! Lazy population of the symbol table.
//!
//! Front-end collaborators register classes and operations as they discover
//! them, possibly from several threads. All registration goes through one
//! `parking_lot::RwLock`; [`SymbolTableBuilder::freeze`] consumes the builder
//! and checks the built-ins every lowering phase relies on are present.

use kiln_ir::{ClassId, IrType, OperationId};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{ClassSymbol, Operation, SymbolError, SymbolTable};

/// The text-builder class and the two operations lowering always emits.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct TextBuilder {
    pub(crate) class: ClassId,
    pub(crate) constructor: OperationId,
    pub(crate) materialize: OperationId,
}

/// Registered symbols. Shared layout of the builder and the frozen table.
#[derive(Default)]
pub(crate) struct Tables {
    pub(crate) classes: Vec<ClassSymbol>,
    pub(crate) operations: Vec<Operation>,
    /// `(receiver, parameter)` -> single-parameter member.
    pub(crate) exact: FxHashMap<(IrType, IrType), OperationId>,
    /// receiver -> member taking `Any?`.
    pub(crate) generic: FxHashMap<IrType, OperationId>,
    /// argument type -> static text conversion.
    pub(crate) conversions: FxHashMap<IrType, OperationId>,
    pub(crate) text_conversion_members: FxHashSet<OperationId>,
    pub(crate) inline_to_text: FxHashMap<ClassId, OperationId>,
    pub(crate) replacements: FxHashMap<OperationId, OperationId>,
    pub(crate) text_builder: Option<TextBuilder>,
    pub(crate) text_plus_intrinsic: Option<OperationId>,
    pub(crate) text_plus_member: Option<OperationId>,
}

impl Tables {
    fn check_class(&self, id: ClassId) -> Result<(), SymbolError> {
        if id.index() < self.classes.len() {
            Ok(())
        } else {
            Err(SymbolError::UnknownClass(id))
        }
    }

    fn check_operation(&self, id: OperationId) -> Result<(), SymbolError> {
        if id.index() < self.operations.len() {
            Ok(())
        } else {
            Err(SymbolError::UnknownOperation(id))
        }
    }
}

/// Id for the next entry of a table currently holding `len` entries.
fn next_index(len: usize, table: &'static str) -> Result<u32, SymbolError> {
    u32::try_from(len).map_err(|_| SymbolError::TableFull(table))
}

/// Thread-safe, append-only symbol registration.
#[derive(Default)]
pub struct SymbolTableBuilder {
    tables: RwLock<Tables>,
}

impl SymbolTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&self, symbol: ClassSymbol) -> Result<ClassId, SymbolError> {
        let mut tables = self.tables.write();
        let raw = next_index(tables.classes.len(), "class")?;
        tables.classes.push(symbol);
        Ok(ClassId::new(raw))
    }

    pub fn add_operation(&self, operation: Operation) -> Result<OperationId, SymbolError> {
        let mut tables = self.tables.write();
        let raw = next_index(tables.operations.len(), "operation")?;
        tables.operations.push(operation);
        Ok(OperationId::new(raw))
    }

    /// Snapshot of a registered class.
    pub fn class(&self, id: ClassId) -> Option<ClassSymbol> {
        self.tables.read().classes.get(id.index()).cloned()
    }

    pub fn class_count(&self) -> usize {
        self.tables.read().classes.len()
    }

    pub fn operation_count(&self) -> usize {
        self.tables.read().operations.len()
    }

    /// Designate the text-builder class with its zero-argument constructor
    /// and its materialize (`toString`) member.
    pub fn set_text_builder(
        &self,
        class: ClassId,
        constructor: OperationId,
        materialize: OperationId,
    ) -> Result<(), SymbolError> {
        let mut tables = self.tables.write();
        tables.check_class(class)?;
        tables.check_operation(constructor)?;
        tables.check_operation(materialize)?;
        tables.text_builder = Some(TextBuilder {
            class,
            constructor,
            materialize,
        });
        Ok(())
    }

    /// Register the member of `receiver` taking exactly `parameter`.
    ///
    /// A second registration for the same pair is an error: exact selection
    /// must be unambiguous.
    pub fn register_exact_operation(
        &self,
        receiver: IrType,
        parameter: IrType,
        op: OperationId,
    ) -> Result<(), SymbolError> {
        let mut tables = self.tables.write();
        tables.check_operation(op)?;
        if let Some(&existing) = tables.exact.get(&(receiver, parameter)) {
            return Err(SymbolError::DuplicateOperation {
                receiver,
                parameter,
                existing,
                duplicate: op,
            });
        }
        tables.exact.insert((receiver, parameter), op);
        Ok(())
    }

    /// Register the member of `receiver` taking `Any?`.
    pub fn register_generic_operation(
        &self,
        receiver: IrType,
        op: OperationId,
    ) -> Result<(), SymbolError> {
        let mut tables = self.tables.write();
        tables.check_operation(op)?;
        if let Some(&existing) = tables.generic.get(&receiver) {
            return Err(SymbolError::DuplicateOperation {
                receiver,
                parameter: IrType::NULLABLE_ANY,
                existing,
                duplicate: op,
            });
        }
        tables.generic.insert(receiver, op);
        Ok(())
    }

    /// Register the static text conversion for values of type `ty`.
    /// Registering for `Any?` sets the generic fallback.
    pub fn register_conversion(&self, ty: IrType, op: OperationId) -> Result<(), SymbolError> {
        let mut tables = self.tables.write();
        tables.check_operation(op)?;
        if let Some(&existing) = tables.conversions.get(&ty) {
            return Err(SymbolError::DuplicateConversion {
                ty,
                existing,
                duplicate: op,
            });
        }
        tables.conversions.insert(ty, op);
        Ok(())
    }

    pub fn set_text_plus_intrinsic(&self, op: OperationId) -> Result<(), SymbolError> {
        let mut tables = self.tables.write();
        tables.check_operation(op)?;
        tables.text_plus_intrinsic = Some(op);
        Ok(())
    }

    pub fn set_text_plus_member(&self, op: OperationId) -> Result<(), SymbolError> {
        let mut tables = self.tables.write();
        tables.check_operation(op)?;
        tables.text_plus_member = Some(op);
        Ok(())
    }

    /// Mark `op` as a zero-argument member converting its receiver to text.
    pub fn register_text_conversion_member(&self, op: OperationId) -> Result<(), SymbolError> {
        let mut tables = self.tables.write();
        tables.check_operation(op)?;
        tables.text_conversion_members.insert(op);
        Ok(())
    }

    /// Record the text conversion member of an inline class. The member is
    /// also marked as a text conversion member.
    pub fn register_inline_to_text(
        &self,
        class: ClassId,
        op: OperationId,
    ) -> Result<(), SymbolError> {
        let mut tables = self.tables.write();
        tables.check_class(class)?;
        tables.check_operation(op)?;
        tables.inline_to_text.insert(class, op);
        tables.text_conversion_members.insert(op);
        Ok(())
    }

    /// Record the static replacement produced by inline-class lowering for
    /// `op`. A later registration for the same `op` wins.
    pub fn register_lowered_replacement(
        &self,
        op: OperationId,
        replacement: OperationId,
    ) -> Result<(), SymbolError> {
        let mut tables = self.tables.write();
        tables.check_operation(op)?;
        tables.check_operation(replacement)?;
        if let Some(previous) = tables.replacements.insert(op, replacement) {
            tracing::debug!(?op, ?previous, ?replacement, "lowered replacement overridden");
        }
        Ok(())
    }

    /// Finish population.
    ///
    /// Fails with [`SymbolError::MissingBuiltin`] when the text builder, its
    /// generic append, the `Any?` conversion or the text plus intrinsic were
    /// never registered.
    pub fn freeze(self) -> Result<SymbolTable, SymbolError> {
        let tables = self.tables.into_inner();
        let text_builder = tables
            .text_builder
            .ok_or(SymbolError::MissingBuiltin("text builder"))?;
        let builder_generic = tables
            .generic
            .get(&IrType::class(text_builder.class))
            .copied()
            .ok_or(SymbolError::MissingBuiltin("generic builder append"))?;
        let generic_conversion = tables
            .conversions
            .get(&IrType::NULLABLE_ANY)
            .copied()
            .ok_or(SymbolError::MissingBuiltin("Any? text conversion"))?;
        let text_plus_intrinsic = tables
            .text_plus_intrinsic
            .ok_or(SymbolError::MissingBuiltin("text plus intrinsic"))?;

        tracing::debug!(
            classes = tables.classes.len(),
            operations = tables.operations.len(),
            exact = tables.exact.len(),
            "symbol table frozen"
        );

        Ok(SymbolTable::from_parts(
            tables,
            text_builder,
            builder_generic,
            generic_conversion,
            text_plus_intrinsic,
        ))
    }
}
