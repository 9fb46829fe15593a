//! Parse errors.
//!
//! - `ParseError`: code, message, location, plus the opening delimiter for
//!   unclosed-bracket errors
//! - `ErrorContext` for "while parsing X" labels

use std::fmt;

use nikl_diagnostic::{Diagnostic, ErrorCode};
use nikl_ir::{Span, TokenKind};

/// What the parser was in the middle of when an error occurred.
///
/// The innermost context wins: `in_error_context` only fills the context of
/// errors that do not already carry one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    FunctionDef,
    FunctionParams,
    LetBinding,
    Assignment,
    IfStatement,
    ForLoop,
    ReturnStatement,
    DelStatement,
    Block,
    FunctionCall,
    IndexExpression,
    ArrayLiteral,
    MapLiteral,
    TupleLiteral,
    TypeAnnotation,
}

impl ErrorContext {
    /// Phrase suitable for "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            Self::FunctionDef => "a function definition",
            Self::FunctionParams => "function parameters",
            Self::LetBinding => "a let binding",
            Self::Assignment => "an assignment",
            Self::IfStatement => "an if statement",
            Self::ForLoop => "a for loop",
            Self::ReturnStatement => "a return statement",
            Self::DelStatement => "a del statement",
            Self::Block => "a block",
            Self::FunctionCall => "a function call",
            Self::IndexExpression => "an index expression",
            Self::ArrayLiteral => "an array literal",
            Self::MapLiteral => "a map literal",
            Self::TupleLiteral => "a tuple literal",
            Self::TypeAnnotation => "a type annotation",
        }
    }
}

/// Parse error with error code for rich diagnostics.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    pub context: Option<ErrorContext>,
    /// Opening delimiter of an unclosed `(`, `[` or `{`.
    pub opener: Option<Span>,
    pub help: Vec<String>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            context: None,
            opener: None,
            help: Vec::new(),
        }
    }

    #[cold]
    pub fn expected_token(expected: &TokenKind, found: &TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1001,
            format!(
                "expected {}, found {}",
                expected.display_name(),
                found.display_name()
            ),
            span,
        )
    }

    #[cold]
    pub fn expected_expression(found: &TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1002,
            format!("expected expression, found {}", found.display_name()),
            span,
        )
    }

    #[cold]
    pub fn expected_ident(found: &TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1004,
            format!("expected identifier, found {}", found.display_name()),
            span,
        )
    }

    #[cold]
    pub fn expected_type(found: &TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1005,
            format!("expected type name, found {}", found.display_name()),
            span,
        )
        .with_help("type names are Int, Float, String, Bool, Array, HashMap, Tuple and None")
    }

    /// End of input reached before the delimiter opened at `open` was closed.
    #[cold]
    pub fn unclosed(close: &TokenKind, open: Span, span: Span) -> Self {
        let mut err = ParseError::new(
            ErrorCode::E1003,
            format!("unclosed delimiter: expected {}", close.display_name()),
            span,
        );
        err.opener = Some(open);
        err
    }

    #[cold]
    pub fn invalid_assignment_target(span: Span) -> Self {
        ParseError::new(ErrorCode::E1006, "invalid assignment target", span)
            .with_help("only names and index expressions like `a[i]` can be assigned to")
    }

    /// Separator or terminator expected inside a bracketed list.
    #[cold]
    pub fn expected_separator_or_terminator(
        terminator: &TokenKind,
        found: &TokenKind,
        span: Span,
    ) -> Self {
        ParseError::new(
            ErrorCode::E1001,
            format!(
                "expected `,` or {}, found {}",
                terminator.display_name(),
                found.display_name()
            ),
            span,
        )
    }

    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the context unless an inner parse already did.
    #[must_use]
    pub fn or_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.context {
            Some(context) => format!("while parsing {}", context.description()),
            None => "here".to_owned(),
        };
        let mut diag = Diagnostic::error(self.code)
            .with_message(format!("ParseError: {}", self.message))
            .with_label(self.span, label);

        if let Some(open) = self.opener {
            diag = diag.with_secondary_label(open, "unclosed delimiter opened here");
        }
        for help in &self.help {
            diag = diag.with_note(help);
        }

        diag
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(context) = self.context {
            write!(f, " (while parsing {})", context.description())?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
