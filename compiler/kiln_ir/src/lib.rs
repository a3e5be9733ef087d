//! Kiln IR - typed intermediate representation.
//!
//! This crate contains the data structures every lowering phase works on:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Types (`IrType`) with identity-based equality
//! - Expression and declaration trees (`IrExpr`, `Decl`, `IrFile`)
//! - The read-only [`Visitor`] and mutating [`MutVisitor`] walks
//! - A textual printer used for IR dumps and tests
//!
//! # Design
//!
//! - **Trees, not DAGs**: every node owns its children. A rewrite moves old
//!   subtrees into new parents; nothing is aliased.
//! - **Intern names**: identifiers are `Name(u32)` for O(1) equality.
//! - **Symbols live elsewhere**: calls and class declarations refer to
//!   `OperationId` / `ClassId`, resolved through `kiln_symbols`.

mod decl;
mod expr;
mod interner;
mod name;
pub mod printer;
mod span;
pub mod stack;
mod types;
pub mod visitor;

pub use decl::{ClassDecl, Decl, FunctionDecl, IrFile, Param, PropertyDecl, SuperTypeRef};
pub use expr::{ConstValue, ExprKind, IrCall, IrExpr, TypeOperator, WhenBranch};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use printer::{IrPrinter, SymbolNames};
pub use span::{Span, SpanError};
pub use types::{ClassId, IrType, OperationId, PrimitiveKind, TypeKind};
pub use visitor::{MutVisitor, Visitor};
