//! Nikl IR - shared data structures for every stage of the interpreter.
//!
//! - [`Span`]: byte range into the source text
//! - [`Name`] / [`StringInterner`]: interned identifiers and string literals
//! - [`Token`] / [`TokenKind`] / [`TokenList`]: lexer output
//! - [`ast`]: the syntax tree produced by the parser and walked by the evaluator

pub mod ast;
mod interner;
mod name;
mod span;
mod token;

pub use ast::{
    AssignTarget, BinaryOp, Block, Expr, ExprKind, ForBindings, FunctionDef, Literal, Param,
    Stmt, StmtKind, TypeTag, UnaryOp,
};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
