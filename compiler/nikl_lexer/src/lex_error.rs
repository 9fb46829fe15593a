//! Lexer errors.

use nikl_diagnostic::{Diagnostic, ErrorCode};
use nikl_ir::Span;

/// Error produced while turning source text into tokens.
///
/// Lexing stops at the first error.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexError {
    /// Missing closing `"`, or a raw newline inside a string.
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("unexpected character `{ch}`")]
    UnexpectedChar { ch: char, span: Span },

    /// Integer literal that does not fit in an `Int`.
    #[error("invalid number literal `{text}`")]
    InvalidNumber { text: String, span: Span },

    #[error("invalid escape sequence `\\{escape}`")]
    InvalidEscape { escape: char, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::UnexpectedChar { span, .. }
            | LexError::InvalidNumber { span, .. }
            | LexError::InvalidEscape { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LexError::UnterminatedString { .. } => ErrorCode::E0001,
            LexError::UnexpectedChar { .. } => ErrorCode::E0002,
            LexError::InvalidNumber { .. } => ErrorCode::E0003,
            LexError::InvalidEscape { .. } => ErrorCode::E0004,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self {
            LexError::UnterminatedString { .. } => "string starts here",
            LexError::UnexpectedChar { .. } => "not valid here",
            LexError::InvalidNumber { .. } => "does not fit in a 64-bit integer",
            LexError::InvalidEscape { .. } => "unknown escape",
        };
        let diag = Diagnostic::error(self.code())
            .with_message(format!("LexError: {self}"))
            .with_label(self.span(), label);
        match self {
            LexError::InvalidEscape { .. } => {
                diag.with_note("valid escapes are \\n \\t \\r \\\\ \\\" and \\0")
            }
            _ => diag,
        }
    }
}
