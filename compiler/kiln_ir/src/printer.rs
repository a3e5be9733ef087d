//! Textual IR dumps.
//!
//! The printer renders one node per line, children indented by two spaces
//! and prefixed with their role (`$this:` for a dispatch receiver, `argN:`
//! for call arguments). Operation and class names come from a
//! [`SymbolNames`] implementation so this crate stays independent of the
//! symbol table.
//!
//! ```text
//! FUN render(n: Int): String
//!   CALL StringBuilder.toString(): String
//!     $this: CALL StringBuilder.append(Int): StringBuilder
//!       $this: CALL StringBuilder.<init>(): StringBuilder
//!       arg0: GET n: Int
//! ```

use std::fmt::Write;

use super::{
    ClassDecl, ConstValue, Decl, ExprKind, IrExpr, IrFile, IrType, StringInterner, TypeKind,
};
use crate::{ClassId, OperationId};

/// Resolves ids to display names.
pub trait SymbolNames {
    /// Display name of an operation, e.g. `StringBuilder.append(Int)`.
    fn operation_name(&self, id: OperationId) -> String;

    /// Display name of a class, e.g. `StringBuilder`.
    fn class_name(&self, id: ClassId) -> String;
}

/// Renders IR trees as indented text.
pub struct IrPrinter<'a> {
    names: &'a dyn SymbolNames,
    interner: &'a StringInterner,
    out: String,
}

impl<'a> IrPrinter<'a> {
    pub fn new(names: &'a dyn SymbolNames, interner: &'a StringInterner) -> Self {
        IrPrinter {
            names,
            interner,
            out: String::new(),
        }
    }

    /// Render a whole file.
    pub fn print_file(mut self, file: &IrFile) -> String {
        let _ = writeln!(
            self.out,
            "FILE {} package={}",
            self.interner.lookup(file.name),
            self.interner.lookup(file.package)
        );
        for decl in &file.declarations {
            self.decl(decl, 1);
        }
        self.out
    }

    /// Render a single expression tree.
    pub fn print_expr(mut self, expr: &IrExpr) -> String {
        self.expr(expr, None, 0);
        self.out
    }

    /// Render a type using class names from the symbol table.
    pub fn type_name(&self, ty: IrType) -> String {
        let base = match ty.kind {
            TypeKind::Class(id) => self.names.class_name(id),
            _ => ty.make_non_null().to_string(),
        };
        if ty.nullable {
            format!("{base}?")
        } else {
            base
        }
    }

    fn line(&mut self, depth: usize, label: Option<&str>, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        if let Some(label) = label {
            self.out.push_str(label);
            self.out.push_str(": ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn decl(&mut self, decl: &Decl, depth: usize) {
        match decl {
            Decl::Function(function) => {
                let params: Vec<String> = function
                    .params
                    .iter()
                    .map(|p| format!("{}: {}", self.interner.lookup(p.name), self.type_name(p.ty)))
                    .collect();
                let header = format!(
                    "FUN {}({}): {}",
                    self.interner.lookup(function.name),
                    params.join(", "),
                    self.type_name(function.return_type)
                );
                self.line(depth, None, &header);
                if let Some(body) = &function.body {
                    self.expr(body, None, depth + 1);
                }
            }
            Decl::Property(property) => {
                let header = format!(
                    "PROPERTY {}: {}",
                    self.interner.lookup(property.name),
                    self.type_name(property.ty)
                );
                self.line(depth, None, &header);
                if let Some(init) = &property.initializer {
                    self.expr(init, None, depth + 1);
                }
            }
            Decl::Class(class) => self.class(class, None, depth),
        }
    }

    fn class(&mut self, class: &ClassDecl, label: Option<&str>, depth: usize) {
        let supers: Vec<String> = class
            .supertypes
            .iter()
            .map(|s| match s.class {
                Some(id) => self.names.class_name(id),
                None => "<unresolved>".to_owned(),
            })
            .collect();
        let mut header = format!("CLASS {}", self.names.class_name(class.symbol));
        if !supers.is_empty() {
            let _ = write!(header, " : {}", supers.join(", "));
        }
        self.line(depth, label, &header);
        for member in &class.members {
            self.decl(member, depth + 1);
        }
    }

    fn constant(&self, value: &ConstValue) -> String {
        match value {
            ConstValue::Null => "null".to_owned(),
            ConstValue::Bool(b) => b.to_string(),
            ConstValue::Char(c) => format!("{c:?}"),
            ConstValue::Int(i) => i.to_string(),
            ConstValue::Float(bits) => f64::from_bits(*bits).to_string(),
            ConstValue::Text(name) => format!("{:?}", self.interner.lookup(*name)),
        }
    }

    fn expr(&mut self, expr: &IrExpr, label: Option<&str>, depth: usize) {
        crate::stack::ensure_sufficient_stack(|| {
            let ty = self.type_name(expr.ty);
            match &expr.kind {
                ExprKind::Const(value) => {
                    let text = format!("CONST {}: {ty}", self.constant(value));
                    self.line(depth, label, &text);
                }
                ExprKind::GetValue(name) => {
                    let text = format!("GET {}: {ty}", self.interner.lookup(*name));
                    self.line(depth, label, &text);
                }
                ExprKind::Call(call) => {
                    let text = format!("CALL {}: {ty}", self.names.operation_name(call.callee));
                    self.line(depth, label, &text);
                    if let Some(receiver) = &call.receiver {
                        self.expr(receiver, Some("$this"), depth + 1);
                    }
                    for (i, arg) in call.args.iter().enumerate() {
                        self.expr(arg, Some(&format!("arg{i}")), depth + 1);
                    }
                }
                ExprKind::Concat(operands) => {
                    self.line(depth, label, &format!("CONCAT: {ty}"));
                    for operand in operands {
                        self.expr(operand, None, depth + 1);
                    }
                }
                ExprKind::TypeOp {
                    op,
                    operand,
                    target,
                } => {
                    let text = format!("TYPE_OP {} {}: {ty}", op.as_str(), self.type_name(*target));
                    self.line(depth, label, &text);
                    self.expr(operand, None, depth + 1);
                }
                ExprKind::Block(statements) => {
                    self.line(depth, label, &format!("BLOCK: {ty}"));
                    for statement in statements {
                        self.expr(statement, None, depth + 1);
                    }
                }
                ExprKind::Return(value) => {
                    self.line(depth, label, "RETURN");
                    self.expr(value, None, depth + 1);
                }
                ExprKind::SetValue { name, value } => {
                    let text = format!("SET {}", self.interner.lookup(*name));
                    self.line(depth, label, &text);
                    self.expr(value, None, depth + 1);
                }
                ExprKind::When(branches) => {
                    self.line(depth, label, &format!("WHEN: {ty}"));
                    for branch in branches {
                        self.expr(&branch.condition, Some("if"), depth + 1);
                        self.expr(&branch.result, Some("then"), depth + 1);
                    }
                }
                ExprKind::LocalClass(class) => self.class(class, label, depth),
            }
        });
    }
}
