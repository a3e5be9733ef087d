use super::*;
use crate::test_support::Fixture;
use kiln_ir::{
    ClassDecl, ClassId, ConstValue, Decl, ExprKind, FunctionDecl, IrType, PropertyDecl, Span,
};

/// Folds a block of integer constants into their sum.
struct SumBlocks;

impl RewriteRule for SumBlocks {
    fn rewrite(&self, expr: IrExpr, cx: &mut LowerCx<'_>) -> IrExpr {
        let ExprKind::Block(statements) = &expr.kind else {
            return expr;
        };
        let values: Option<Vec<i64>> = statements
            .iter()
            .map(|s| match s.kind {
                ExprKind::Const(ConstValue::Int(v)) => Some(v),
                _ => None,
            })
            .collect();
        match values {
            Some(values) if !values.is_empty() => {
                cx.note_rewrite();
                IrExpr::int(values.iter().sum(), IrType::INT, expr.span)
            }
            _ => expr,
        }
    }
}

/// Increments every integer constant.
struct Bump;

impl RewriteRule for Bump {
    fn rewrite(&self, mut expr: IrExpr, cx: &mut LowerCx<'_>) -> IrExpr {
        if let ExprKind::Const(ConstValue::Int(v)) = &mut expr.kind {
            *v += 1;
            cx.note_rewrite();
        }
        expr
    }
}

fn int(v: i64) -> IrExpr {
    IrExpr::int(v, IrType::INT, Span::DUMMY)
}

fn block(statements: Vec<IrExpr>) -> IrExpr {
    IrExpr::block(statements, IrType::INT, Span::DUMMY)
}

#[test]
fn children_are_rewritten_before_parents() {
    let fx = Fixture::new();
    let mut cx = fx.cx();
    let mut expr = block(vec![int(1), block(vec![int(2), int(3)])]);
    RewriteEngine::new(&SumBlocks, &mut cx).run_expr(&mut expr);
    assert_eq!(expr, int(6));
    assert_eq!(cx.rewrites(), 2);
}

#[test]
fn every_declaration_body_is_reached() {
    let fx = Fixture::new();
    let function = |body: IrExpr| {
        Decl::Function(FunctionDecl {
            name: fx.name("f"),
            params: Vec::new(),
            return_type: IrType::INT,
            body: Some(body),
            span: Span::DUMMY,
        })
    };
    let local = ClassDecl::new(ClassId::new(0), Span::DUMMY).with_member(function(int(10)));
    let nested = ClassDecl::new(ClassId::new(0), Span::DUMMY).with_member(Decl::Property(
        PropertyDecl {
            name: fx.name("p"),
            ty: IrType::INT,
            initializer: Some(int(20)),
            span: Span::DUMMY,
        },
    ));
    let mut file = kiln_ir::IrFile::new(fx.name("a.kt"), fx.name("app"))
        .with_decl(function(block(vec![IrExpr::local_class(local), int(1)])))
        .with_decl(Decl::Class(nested))
        .with_decl(Decl::Function(FunctionDecl {
            name: fx.name("abstract"),
            params: Vec::new(),
            return_type: IrType::UNIT,
            body: None,
            span: Span::DUMMY,
        }));

    let mut cx = fx.cx();
    RewriteEngine::new(&Bump, &mut cx).run_file(&mut file);
    assert_eq!(cx.rewrites(), 3);

    let mut seen = Vec::new();
    collect_ints(&file, &mut seen);
    seen.sort_unstable();
    assert_eq!(seen, vec![2, 11, 21]);
}

fn collect_ints(file: &kiln_ir::IrFile, out: &mut Vec<i64>) {
    struct Ints<'a>(&'a mut Vec<i64>);

    impl kiln_ir::Visitor for Ints<'_> {
        fn visit_expr(&mut self, expr: &IrExpr) {
            if let ExprKind::Const(ConstValue::Int(v)) = expr.kind {
                self.0.push(v);
            }
            self.walk_expr(expr);
        }
    }

    kiln_ir::Visitor::visit_file(&mut Ints(out), file);
}

#[test]
fn deep_trees_do_not_overflow_the_stack() {
    let fx = Fixture::new();
    let mut expr = int(0);
    for _ in 0..50_000 {
        expr = IrExpr::ret(expr, Span::DUMMY);
    }
    let mut cx = fx.cx();
    RewriteEngine::new(&Bump, &mut cx).run_expr(&mut expr);
    assert_eq!(cx.rewrites(), 1);
    // Dropping a deep tree recurses too; unwind it iteratively.
    let mut current = expr;
    while let ExprKind::Return(inner) = current.kind {
        current = *inner;
    }
    assert_eq!(current, int(1));
}
