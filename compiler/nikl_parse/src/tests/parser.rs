#![allow(clippy::unwrap_used, clippy::expect_used)]

use nikl_ir::{
    AssignTarget, BinaryOp, ExprKind, Literal, StmtKind, StringInterner, TypeTag, UnaryOp,
};
use pretty_assertions::assert_eq;

use super::parse_source;

#[test]
fn test_parse_let_with_annotation() {
    let interner = StringInterner::new();
    let block = parse_source("let cats: Array = [1, 2, [3, 4]]", &interner).unwrap();

    assert_eq!(block.stmts.len(), 1);
    let StmtKind::Let { name, ty, value } = &block.stmts[0].kind else {
        panic!("expected let, got {:?}", block.stmts[0].kind);
    };
    assert_eq!(interner.lookup(*name), "cats");
    assert_eq!(*ty, Some(TypeTag::Array));
    let ExprKind::Array(elems) = &value.kind else {
        panic!("expected array literal");
    };
    assert_eq!(elems.len(), 3);
    assert!(matches!(elems[2].kind, ExprKind::Array(ref inner) if inner.len() == 2));
}

#[test]
fn test_parse_let_without_annotation() {
    let interner = StringInterner::new();
    let block = parse_source("let a = 1.5;", &interner).unwrap();

    assert!(matches!(
        block.stmts[0].kind,
        StmtKind::Let {
            ty: None,
            value: nikl_ir::Expr {
                kind: ExprKind::Literal(Literal::Float(f)),
                ..
            },
            ..
        } if f == 1.5
    ));
}

#[test]
fn test_parse_binary_precedence() {
    let interner = StringInterner::new();
    let block = parse_source("1 + 2 * 3 == 7", &interner).unwrap();

    // Eq(Add(1, Mul(2, 3)), 7)
    let StmtKind::Expr(expr) = &block.stmts[0].kind else {
        panic!("expected expression statement");
    };
    let ExprKind::Binary {
        op: BinaryOp::Eq,
        left,
        ..
    } = &expr.kind
    else {
        panic!("expected comparison at the root, got {:?}", expr.kind);
    };
    let ExprKind::Binary {
        op: BinaryOp::Add,
        right,
        ..
    } = &left.kind
    else {
        panic!("expected addition");
    };
    assert!(matches!(
        right.kind,
        ExprKind::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn test_parse_subtraction_is_left_associative() {
    let interner = StringInterner::new();
    let block = parse_source("10 - 3 - 2", &interner).unwrap();

    let StmtKind::Expr(expr) = &block.stmts[0].kind else {
        panic!("expected expression statement");
    };
    let ExprKind::Binary { left, right, .. } = &expr.kind else {
        panic!("expected binary");
    };
    assert!(matches!(
        left.kind,
        ExprKind::Binary {
            op: BinaryOp::Sub,
            ..
        }
    ));
    assert!(matches!(right.kind, ExprKind::Literal(Literal::Int(2))));
}

#[test]
fn test_parse_unary_binds_tighter_than_multiplication() {
    let interner = StringInterner::new();
    let block = parse_source("-a * !b", &interner).unwrap();

    let StmtKind::Expr(expr) = &block.stmts[0].kind else {
        panic!("expected expression statement");
    };
    let ExprKind::Binary {
        op: BinaryOp::Mul,
        left,
        right,
    } = &expr.kind
    else {
        panic!("expected multiplication");
    };
    assert!(matches!(
        left.kind,
        ExprKind::Unary {
            op: UnaryOp::Neg,
            ..
        }
    ));
    assert!(matches!(
        right.kind,
        ExprKind::Unary {
            op: UnaryOp::Not,
            ..
        }
    ));
}

#[test]
fn test_parse_function_def() {
    let interner = StringInterner::new();
    let source = "fn test_fn(f, x: Int) -> None {\n    print(f(x))\n    return\n}";
    let block = parse_source(source, &interner).unwrap();

    let StmtKind::FunctionDef(def) = &block.stmts[0].kind else {
        panic!("expected function definition");
    };
    assert_eq!(interner.lookup(def.name), "test_fn");
    assert_eq!(def.params.len(), 2);
    assert_eq!(def.params[0].ty, None);
    assert_eq!(def.params[1].ty, Some(TypeTag::Int));
    assert_eq!(def.return_type, Some(TypeTag::None));
    assert_eq!(def.body.stmts.len(), 2);
    assert!(matches!(def.body.stmts[1].kind, StmtKind::Return(None)));
}

#[test]
fn test_parse_return_value_on_same_line_only() {
    let interner = StringInterner::new();
    let block = parse_source("fn f() {\n    return\n    g()\n}\nfn h() { return 1 }", &interner)
        .unwrap();

    let StmtKind::FunctionDef(f) = &block.stmts[0].kind else {
        panic!("expected function definition");
    };
    assert!(matches!(f.body.stmts[0].kind, StmtKind::Return(None)));
    assert!(matches!(f.body.stmts[1].kind, StmtKind::Expr(_)));

    let StmtKind::FunctionDef(h) = &block.stmts[1].kind else {
        panic!("expected function definition");
    };
    assert!(matches!(h.body.stmts[0].kind, StmtKind::Return(Some(_))));
}

#[test]
fn test_parse_if_else_if_chain() {
    let interner = StringInterner::new();
    let source = "if a { x() } else if b { y() } else { z() }";
    let block = parse_source(source, &interner).unwrap();

    let StmtKind::If { else_branch, .. } = &block.stmts[0].kind else {
        panic!("expected if");
    };
    let else_block = else_branch.as_ref().unwrap();
    assert_eq!(else_block.stmts.len(), 1);
    let StmtKind::If {
        else_branch: inner_else,
        ..
    } = &else_block.stmts[0].kind
    else {
        panic!("expected nested if");
    };
    assert!(inner_else.is_some());
}

#[test]
fn test_parse_for_with_two_bindings() {
    let interner = StringInterner::new();
    let block = parse_source("for k, v in {\"a\": 1, \"b\": 2} { print(k, v) }", &interner)
        .unwrap();

    let StmtKind::For {
        bindings,
        iterable,
        body,
    } = &block.stmts[0].kind
    else {
        panic!("expected for loop");
    };
    assert_eq!(interner.lookup(bindings.first), "k");
    assert_eq!(bindings.second.map(|n| interner.lookup(n)), Some("v"));
    assert!(matches!(iterable.kind, ExprKind::HashMap(ref entries) if entries.len() == 2));
    assert_eq!(body.stmts.len(), 1);
}

#[test]
fn test_parse_del_and_assign() {
    let interner = StringInterner::new();
    let block = parse_source("del cats\ncats = \"cats\"\nitems[0] = 5", &interner).unwrap();

    assert!(matches!(block.stmts[0].kind, StmtKind::Del(_)));
    assert!(matches!(
        block.stmts[1].kind,
        StmtKind::Assign {
            target: AssignTarget::Name(_),
            ..
        }
    ));
    assert!(matches!(
        block.stmts[2].kind,
        StmtKind::Assign {
            target: AssignTarget::Index { .. },
            ..
        }
    ));
}

#[test]
fn test_parse_tuples_and_grouping() {
    let interner = StringInterner::new();
    let block = parse_source("()\n(1,)\n(1, \"two\", 3.0,)\n(4)", &interner).unwrap();

    let exprs: Vec<_> = block
        .stmts
        .iter()
        .map(|s| match &s.kind {
            StmtKind::Expr(e) => e.kind.clone(),
            other => panic!("expected expression statement, got {other:?}"),
        })
        .collect();

    assert!(matches!(&exprs[0], ExprKind::Tuple(elems) if elems.is_empty()));
    assert!(matches!(&exprs[1], ExprKind::Tuple(elems) if elems.len() == 1));
    assert!(matches!(&exprs[2], ExprKind::Tuple(elems) if elems.len() == 3));
    assert!(matches!(&exprs[3], ExprKind::Literal(Literal::Int(4))));
}

#[test]
fn test_newline_stops_postfix_chain() {
    let interner = StringInterner::new();
    let block = parse_source("print(1)\n(2, 3)\nitems\n[4]", &interner).unwrap();

    assert_eq!(block.stmts.len(), 4);
    assert!(matches!(
        block.stmts[0].kind,
        StmtKind::Expr(nikl_ir::Expr {
            kind: ExprKind::Call { .. },
            ..
        })
    ));
    assert!(matches!(
        block.stmts[1].kind,
        StmtKind::Expr(nikl_ir::Expr {
            kind: ExprKind::Tuple(_),
            ..
        })
    ));
    assert!(matches!(
        block.stmts[3].kind,
        StmtKind::Expr(nikl_ir::Expr {
            kind: ExprKind::Array(_),
            ..
        })
    ));
}

#[test]
fn test_parse_chained_postfix() {
    let interner = StringInterner::new();
    let block = parse_source("table[0][1](x)", &interner).unwrap();

    let StmtKind::Expr(expr) = &block.stmts[0].kind else {
        panic!("expected expression statement");
    };
    let ExprKind::Call { callee, args } = &expr.kind else {
        panic!("expected call at the root");
    };
    assert_eq!(args.len(), 1);
    assert!(matches!(callee.kind, ExprKind::Index { .. }));
}

#[test]
fn test_semicolons_are_optional() {
    let interner = StringInterner::new();
    let with = parse_source("let a=[1,2,3]; print(len(a));", &interner).unwrap();
    let without = parse_source("let a=[1,2,3]\nprint(len(a))", &interner).unwrap();

    assert_eq!(with.stmts.len(), 2);
    assert_eq!(without.stmts.len(), 2);
}

#[test]
fn test_empty_program() {
    let interner = StringInterner::new();
    let block = parse_source("// nothing here\n", &interner).unwrap();
    assert!(block.is_empty());
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let interner = StringInterner::new();
    let depth = 5_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let block = parse_source(&source, &interner).unwrap();
    assert_eq!(block.stmts.len(), 1);
}
