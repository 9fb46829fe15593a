//! Source text to result: lex, parse, evaluate.

use nikl_eval::Interpreter;
use nikl_ir::{Block, StringInterner};
use tracing::debug;

use crate::NiklError;

/// Lex and parse a whole program.
pub fn parse_source(source: &str, interner: &StringInterner) -> Result<Block, NiklError> {
    let tokens = nikl_lexer::lex(source, interner)?;
    debug!(tokens = tokens.len(), "lexed");
    let program = nikl_parse::parse(&tokens, interner)?;
    Ok(program)
}

/// Parse `source` and run it against `interpreter`'s global scope.
pub fn run_source(source: &str, interpreter: &mut Interpreter<'_>) -> Result<(), NiklError> {
    let program = parse_source(source, interpreter.interner())?;
    interpreter.run(&program)?;
    Ok(())
}
