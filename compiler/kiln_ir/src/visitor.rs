//! IR walkers.
//!
//! One macro generates two visitor traits with identical traversal order:
//!
//! - [`Visitor`] takes shared references. Checkers use it; they may update
//!   their own state but never the tree.
//! - [`MutVisitor`] takes mutable references. Lowering phases use it to
//!   replace nodes in their slots.
//!
//! Every `visit_*` method defaults to the matching `walk_*` method, which
//! visits the node's children depth-first, left to right. Override `visit_*`
//! and call `walk_*` where the children should be visited; calling it before
//! handling the node itself gives a children-first (post-order) walk.
//!
//! # Example
//!
//! ```text
//! struct CountConcats(usize);
//!
//! impl Visitor for CountConcats {
//!     fn visit_expr(&mut self, expr: &IrExpr) {
//!         if let ExprKind::Concat(_) = expr.kind {
//!             self.0 += 1;
//!         }
//!         self.walk_expr(expr);
//!     }
//! }
//! ```

use super::{ClassDecl, Decl, ExprKind, FunctionDecl, IrExpr, IrFile, PropertyDecl};

macro_rules! make_visitor {
    ($(#[$attr:meta])* $visitor_trait:ident, $($mutability:ident)?) => {
        $(#[$attr])*
        pub trait $visitor_trait {
            fn visit_file(&mut self, file: & $($mutability)? IrFile) {
                self.walk_file(file);
            }

            fn visit_decl(&mut self, decl: & $($mutability)? Decl) {
                self.walk_decl(decl);
            }

            fn visit_function(&mut self, function: & $($mutability)? FunctionDecl) {
                self.walk_function(function);
            }

            fn visit_property(&mut self, property: & $($mutability)? PropertyDecl) {
                self.walk_property(property);
            }

            fn visit_class(&mut self, class: & $($mutability)? ClassDecl) {
                self.walk_class(class);
            }

            fn visit_expr(&mut self, expr: & $($mutability)? IrExpr) {
                self.walk_expr(expr);
            }

            fn walk_file(&mut self, file: & $($mutability)? IrFile) {
                for decl in & $($mutability)? file.declarations {
                    self.visit_decl(decl);
                }
            }

            fn walk_decl(&mut self, decl: & $($mutability)? Decl) {
                match decl {
                    Decl::Function(function) => self.visit_function(function),
                    Decl::Property(property) => self.visit_property(property),
                    Decl::Class(class) => self.visit_class(class),
                }
            }

            fn walk_function(&mut self, function: & $($mutability)? FunctionDecl) {
                if let Some(body) = & $($mutability)? function.body {
                    self.visit_expr(body);
                }
            }

            fn walk_property(&mut self, property: & $($mutability)? PropertyDecl) {
                if let Some(initializer) = & $($mutability)? property.initializer {
                    self.visit_expr(initializer);
                }
            }

            fn walk_class(&mut self, class: & $($mutability)? ClassDecl) {
                for member in & $($mutability)? class.members {
                    self.visit_decl(member);
                }
            }

            fn walk_expr(&mut self, expr: & $($mutability)? IrExpr) {
                match & $($mutability)? expr.kind {
                    ExprKind::Const(_) | ExprKind::GetValue(_) => {}
                    ExprKind::Call(call) => {
                        if let Some(receiver) = & $($mutability)? call.receiver {
                            self.visit_expr(receiver);
                        }
                        for arg in & $($mutability)? call.args {
                            self.visit_expr(arg);
                        }
                    }
                    ExprKind::Concat(operands) | ExprKind::Block(operands) => {
                        for operand in operands {
                            self.visit_expr(operand);
                        }
                    }
                    ExprKind::TypeOp { operand, .. } => self.visit_expr(operand),
                    ExprKind::Return(value) | ExprKind::SetValue { value, .. } => {
                        self.visit_expr(value);
                    }
                    ExprKind::When(branches) => {
                        for branch in branches {
                            self.visit_expr(& $($mutability)? branch.condition);
                            self.visit_expr(& $($mutability)? branch.result);
                        }
                    }
                    ExprKind::LocalClass(class) => self.visit_class(class),
                }
            }
        }
    };
}

make_visitor!(
    /// Read-only IR visitor.
    Visitor,
);

make_visitor!(
    /// Mutating IR visitor. Children are visited through their owning slots.
    MutVisitor,
    mut
);
