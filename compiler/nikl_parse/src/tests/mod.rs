//! Parser tests.
//!
//! - `parser`: statements, expressions and precedence
//! - `errors`: error codes, messages and contexts

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod parser;

use nikl_ir::{Block, StringInterner};

use crate::{parse, ParseError};

fn parse_source(source: &str, interner: &StringInterner) -> Result<Block, ParseError> {
    let tokens = nikl_lexer::lex(source, interner).unwrap();
    parse(&tokens, interner)
}
