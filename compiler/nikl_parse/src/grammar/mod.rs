//! Grammar productions, split by syntactic category.
//!
//! - `stmt.rs`: statements and blocks
//! - `expr.rs`: precedence chain, postfix forms, primaries and literals

mod expr;
mod stmt;
