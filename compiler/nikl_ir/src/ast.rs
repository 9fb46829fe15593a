//! Syntax tree for Nikl programs.
//!
//! The tree is immutable after parsing. Function definitions sit behind an
//! `Rc` so a function value can keep its body alive after the statement
//! that defined it (e.g. a REPL line) has been dropped.

use std::fmt;
use std::rc::Rc;

use crate::{Name, Span};

/// Declared type in `let x: T` and function signatures.
///
/// Annotations are advisory: the evaluator records them but never checks them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeTag {
    Int,
    Float,
    String,
    Bool,
    Array,
    HashMap,
    Tuple,
    None,
}

impl TypeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Int => "Int",
            TypeTag::Float => "Float",
            TypeTag::String => "String",
            TypeTag::Bool => "Bool",
            TypeTag::Array => "Array",
            TypeTag::HashMap => "HashMap",
            TypeTag::Tuple => "Tuple",
            TypeTag::None => "None",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
        }
    }

    /// Ordering comparisons (`<`, `<=`, `>`, `>=`).
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq
        )
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(Name),
    Bool(bool),
    None,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Move the kind out, leaving a `None` literal behind.
    pub fn take_kind(&mut self) -> ExprKind {
        std::mem::replace(&mut self.kind, ExprKind::Literal(Literal::None))
    }
}

/// Tear down nested expressions with a work list. A long operator chain
/// such as `- - - ... 1` would otherwise be freed one native frame per level.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.kind.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.kind.detach_children(&mut pending);
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    Literal(Literal),
    Array(Vec<Expr>),
    /// Key/value pairs in source order. Keys are arbitrary expressions.
    HashMap(Vec<(Expr, Expr)>),
    Tuple(Vec<Expr>),
    Ident(Name),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
}

impl ExprKind {
    /// Move every direct subexpression into `out`.
    fn detach_children(&mut self, out: &mut Vec<Expr>) {
        match self {
            ExprKind::Literal(_) | ExprKind::Ident(_) => {}
            ExprKind::Array(items) | ExprKind::Tuple(items) => out.append(items),
            ExprKind::HashMap(entries) => {
                for (key, value) in entries.drain(..) {
                    out.push(key);
                    out.push(value);
                }
            }
            ExprKind::Binary { left, right, .. } | ExprKind::Index { target: left, index: right } => {
                out.push(detach(left));
                out.push(detach(right));
            }
            ExprKind::Unary { operand, .. } => out.push(detach(operand)),
            ExprKind::Call { callee, args } => {
                out.push(detach(callee));
                out.append(args);
            }
        }
    }
}

fn detach(expr: &mut Expr) -> Expr {
    Expr::new(expr.take_kind(), expr.span)
}

#[derive(Clone, PartialEq, Debug)]
pub struct Param {
    pub name: Name,
    pub ty: Option<TypeTag>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Vec<Param>,
    /// `Some` when the signature carries `-> T`.
    pub return_type: Option<TypeTag>,
    pub body: Block,
    pub span: Span,
}

/// Left-hand side of an assignment.
#[derive(Clone, PartialEq, Debug)]
pub enum AssignTarget {
    /// `x = v` rebinds a name.
    Name(Name),
    /// `a[i] = v` mutates the shared collection in place.
    Index { target: Expr, index: Expr },
}

/// Names bound by a `for` loop: `for x in ..` or `for k, v in ..`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ForBindings {
    pub first: Name,
    pub second: Option<Name>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    Expr(Expr),
    Let {
        name: Name,
        ty: Option<TypeTag>,
        value: Expr,
    },
    Assign {
        target: AssignTarget,
        value: Expr,
    },
    Del(Name),
    FunctionDef(Rc<FunctionDef>),
    If {
        condition: Expr,
        then_branch: Block,
        /// `else if` chains are nested as a block holding a single `If`.
        else_branch: Option<Block>,
    },
    For {
        bindings: ForBindings,
        iterable: Expr,
        body: Block,
    },
    Return(Option<Expr>),
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Block { stmts, span }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_op_symbols() {
        assert_eq!(BinaryOp::NotEq.as_symbol(), "!=");
        assert!(BinaryOp::GtEq.is_ordering());
        assert!(!BinaryOp::Eq.is_ordering());
    }

    #[test]
    fn type_tag_display() {
        assert_eq!(TypeTag::HashMap.to_string(), "HashMap");
        assert_eq!(TypeTag::None.to_string(), "None");
    }

    #[test]
    fn long_unary_chain_drops_iteratively() {
        let mut expr = Expr::new(ExprKind::Literal(Literal::Int(1)), Span::DUMMY);
        for _ in 0..300_000 {
            expr = Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(expr),
                },
                Span::DUMMY,
            );
        }
        drop(expr);
    }

    #[test]
    fn take_kind_leaves_a_placeholder() {
        let mut expr = Expr::new(ExprKind::Ident(Name::EMPTY), Span::new(0, 1));
        assert_eq!(expr.take_kind(), ExprKind::Ident(Name::EMPTY));
        assert_eq!(expr.kind, ExprKind::Literal(Literal::None));
    }
}
