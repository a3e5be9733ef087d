//! Kiln symbols - classes, operations and the type oracle.
//!
//! Lowering never resolves names. Everything a phase needs to pick a call
//! target is answered by a [`TypeOracle`]:
//!
//! - exact-match operations keyed by `(receiver, parameter)` type identity
//! - generic fallbacks taking `Any?`
//! - per-type text conversion functions
//! - the text-builder class, its constructor and materialize operation
//! - inline-class text conversions and their lowered static replacements
//!
//! # Lifecycle
//!
//! Callers populate a [`SymbolTableBuilder`] (possibly from several threads),
//! then [`freeze`](SymbolTableBuilder::freeze) it into an immutable
//! [`SymbolTable`]. The frozen table is `Sync` and read without locks by
//! every compilation unit of a session.

mod builder;
pub mod builtins;
mod class;
mod error;
mod operation;
mod oracle;
mod table;

pub use builder::SymbolTableBuilder;
pub use builtins::Builtins;
pub use class::{ClassFlags, ClassSymbol, Modality, Origin};
pub use error::SymbolError;
pub use operation::{Operation, OperationKind};
pub use oracle::TypeOracle;
pub use table::{SymbolDisplay, SymbolTable};
