//! One error type for the whole pipeline.

use nikl_diagnostic::Diagnostic;
use nikl_eval::{ErrorClass, EvalError};
use nikl_lexer::LexError;
use nikl_parse::ParseError;

/// Failure from any stage. `Display` is the class-prefixed message, e.g.
/// `NameError: undefined variable: foo`.
#[derive(Debug, thiserror::Error)]
pub enum NiklError {
    #[error("LexError: {0}")]
    Lex(#[from] LexError),
    #[error("ParseError: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl NiklError {
    pub fn class(&self) -> ErrorClass {
        match self {
            NiklError::Lex(_) => ErrorClass::LexError,
            NiklError::Parse(_) => ErrorClass::ParseError,
            NiklError::Eval(err) => err.class(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            NiklError::Lex(err) => err.to_diagnostic(),
            NiklError::Parse(err) => err.to_diagnostic(),
            NiklError::Eval(err) => err.to_diagnostic(),
        }
    }
}
