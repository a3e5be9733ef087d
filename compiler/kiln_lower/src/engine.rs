//! Bottom-up application of a rewrite rule.

use kiln_ir::stack::ensure_sufficient_stack;
use kiln_ir::{IrExpr, IrFile, MutVisitor};

use crate::{LowerCx, RewriteRule};

/// Applies one rule to every expression slot of a tree, children first.
///
/// Every declaration body is reached: function bodies, property
/// initializers and the members of nested and local classes. The node
/// currently being rewritten is moved out of its slot, handed to the rule by
/// value, and the rule's result is written back.
pub struct RewriteEngine<'r, 'c, 'a> {
    rule: &'r dyn RewriteRule,
    cx: &'c mut LowerCx<'a>,
}

impl<'r, 'c, 'a> RewriteEngine<'r, 'c, 'a> {
    pub fn new(rule: &'r dyn RewriteRule, cx: &'c mut LowerCx<'a>) -> Self {
        RewriteEngine { rule, cx }
    }

    pub fn run_file(&mut self, file: &mut IrFile) {
        self.visit_file(file);
    }

    /// Rewrite a single expression tree in place.
    pub fn run_expr(&mut self, expr: &mut IrExpr) {
        self.visit_expr(expr);
    }
}

impl MutVisitor for RewriteEngine<'_, '_, '_> {
    fn visit_expr(&mut self, expr: &mut IrExpr) {
        ensure_sufficient_stack(|| {
            self.walk_expr(expr);
            let node = expr.take();
            *expr = self.rule.rewrite(node, self.cx);
        });
    }
}

#[cfg(test)]
mod tests;
