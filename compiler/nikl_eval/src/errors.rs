//! Runtime error types.
//!
//! `EvalErrorKind` carries the structured data for each failure; the factory
//! functions below are the way errors are created. Every kind maps to an
//! [`ErrorClass`] (the name users see in front of the message) and an
//! `E6xxx` error code.

use std::fmt;

use nikl_diagnostic::{Diagnostic, ErrorCode};
use nikl_ir::{BinaryOp, Span, UnaryOp};

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// User-facing error category, printed before the message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    LexError,
    ParseError,
    NameError,
    TypeError,
    ValueError,
    StackOverflow,
}

impl ErrorClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::LexError => "LexError",
            ErrorClass::ParseError => "ParseError",
            ErrorClass::NameError => "NameError",
            ErrorClass::TypeError => "TypeError",
            ErrorClass::ValueError => "ValueError",
            ErrorClass::StackOverflow => "StackOverflow",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Names
    UndefinedVariable {
        name: String,
    },
    DeletedVariable {
        name: String,
    },
    /// `del` of a name that is not bound in the innermost scope.
    CannotDelete {
        name: String,
    },

    // Calls
    NotCallable {
        type_name: &'static str,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    StackOverflow {
        depth: usize,
    },

    // Operators
    InvalidBinaryOp {
        type_name: &'static str,
        op: BinaryOp,
    },
    BinaryTypeMismatch {
        left: &'static str,
        right: &'static str,
        op: BinaryOp,
    },
    InvalidUnaryOp {
        type_name: &'static str,
        op: UnaryOp,
    },
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow {
        operation: &'static str,
    },

    // Collections
    NoLength {
        type_name: &'static str,
    },
    NotIterable {
        type_name: &'static str,
    },
    /// Two loop names bound to an element that is not a pair.
    DestructureMismatch {
        found: String,
    },
    CannotIndex {
        receiver: &'static str,
        index: &'static str,
    },
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },
    KeyNotFound {
        key: String,
    },
    ImmutableTuple,
    ItemAssignment {
        type_name: &'static str,
    },
}

impl EvalErrorKind {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::UndefinedVariable { .. }
            | Self::DeletedVariable { .. }
            | Self::CannotDelete { .. } => ErrorClass::NameError,
            Self::NotCallable { .. }
            | Self::ArityMismatch { .. }
            | Self::InvalidBinaryOp { .. }
            | Self::BinaryTypeMismatch { .. }
            | Self::InvalidUnaryOp { .. }
            | Self::NoLength { .. }
            | Self::NotIterable { .. }
            | Self::DestructureMismatch { .. }
            | Self::CannotIndex { .. }
            | Self::ImmutableTuple
            | Self::ItemAssignment { .. } => ErrorClass::TypeError,
            Self::DivisionByZero
            | Self::ModuloByZero
            | Self::IntegerOverflow { .. }
            | Self::IndexOutOfBounds { .. }
            | Self::KeyNotFound { .. } => ErrorClass::ValueError,
            Self::StackOverflow { .. } => ErrorClass::StackOverflow,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::UndefinedVariable { .. } | Self::CannotDelete { .. } => ErrorCode::E6001,
            Self::DeletedVariable { .. } => ErrorCode::E6002,
            Self::InvalidBinaryOp { .. }
            | Self::BinaryTypeMismatch { .. }
            | Self::InvalidUnaryOp { .. } => ErrorCode::E6003,
            Self::NotCallable { .. } => ErrorCode::E6004,
            Self::ArityMismatch { .. } => ErrorCode::E6005,
            Self::NoLength { .. } => ErrorCode::E6006,
            Self::NotIterable { .. } => ErrorCode::E6007,
            Self::IndexOutOfBounds { .. } => ErrorCode::E6008,
            Self::KeyNotFound { .. } => ErrorCode::E6009,
            Self::DivisionByZero | Self::ModuloByZero => ErrorCode::E6010,
            Self::IntegerOverflow { .. } => ErrorCode::E6011,
            Self::StackOverflow { .. } => ErrorCode::E6012,
            Self::DestructureMismatch { .. } => ErrorCode::E6013,
            Self::ImmutableTuple | Self::ItemAssignment { .. } => ErrorCode::E6014,
            Self::CannotIndex { .. } => ErrorCode::E6015,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::DeletedVariable { name } => write!(f, "name '{name}' was deleted"),
            Self::CannotDelete { name } => {
                write!(f, "cannot delete '{name}': not bound in the current scope")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth exceeded (limit: {depth})")
            }
            Self::InvalidBinaryOp { type_name, op } => write!(
                f,
                "operator `{}` cannot be applied to {type_name}",
                op.as_symbol()
            ),
            Self::BinaryTypeMismatch { left, right, op } => write!(
                f,
                "operator `{}` cannot be applied to {left} and {right}",
                op.as_symbol()
            ),
            Self::InvalidUnaryOp { type_name, op } => write!(
                f,
                "operator `{}` cannot be applied to {type_name}",
                op.as_symbol()
            ),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),
            Self::NoLength { type_name } => write!(f, "{type_name} has no length"),
            Self::NotIterable { type_name } => write!(f, "{type_name} is not iterable"),
            Self::DestructureMismatch { found } => {
                write!(f, "cannot unpack {found} into two loop variables")
            }
            Self::CannotIndex { receiver, index } => {
                write!(f, "cannot index {receiver} with {index}")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::KeyNotFound { key } => write!(f, "key not found: {key}"),
            Self::ImmutableTuple => write!(f, "tuples cannot be modified"),
            Self::ItemAssignment { type_name } => {
                write!(f, "{type_name} does not support item assignment")
            }
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
    /// Source location of the call site.
    pub span: Option<Span>,
}

/// Snapshot of the call stack at an error site, most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

/// Frames rendered before the rest of a backtrace is summarized.
const MAX_BACKTRACE_NOTES: usize = 8;

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Equals `kind.to_string()` for factory-created errors.
    pub message: String,
    pub span: Option<Span>,
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
            backtrace: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.error_code()
    }

    /// Convert to a diagnostic. Backtrace frames become notes.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.to_string());
        if let Some(span) = self.span {
            diag = diag.with_label(span, self.kind.label());
        }
        if let Some(backtrace) = &self.backtrace {
            for frame in backtrace.frames().iter().take(MAX_BACKTRACE_NOTES) {
                diag = diag.with_note(format!("in call to `{}`", frame.name));
            }
            if backtrace.len() > MAX_BACKTRACE_NOTES {
                let hidden = backtrace.len() - MAX_BACKTRACE_NOTES;
                diag = diag.with_note(format!("... and {hidden} more calls"));
            }
        }
        diag
    }
}

impl EvalErrorKind {
    /// Short text for the primary label under the error location.
    fn label(&self) -> &'static str {
        match self {
            Self::UndefinedVariable { .. } => "not found in this scope",
            Self::DeletedVariable { .. } => "deleted earlier in this scope",
            Self::CannotDelete { .. } => "not a local binding",
            Self::NotCallable { .. } => "called here",
            Self::ArityMismatch { .. } => "in this call",
            Self::StackOverflow { .. } => "call exceeds the depth limit",
            Self::DivisionByZero | Self::ModuloByZero => "divisor is zero",
            Self::IndexOutOfBounds { .. } | Self::KeyNotFound { .. } => "lookup fails here",
            _ => "here",
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class(), self.message)
    }
}

impl std::error::Error for EvalError {}

// Name errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn deleted_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DeletedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn cannot_delete(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotDelete {
        name: name.to_string(),
    })
}

// Call errors

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth: limit })
}

// Operator errors

#[cold]
pub fn invalid_binary_op(type_name: &'static str, op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp { type_name, op })
}

#[cold]
pub fn binary_type_mismatch(left: &'static str, right: &'static str, op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch { left, right, op })
}

#[cold]
pub fn invalid_unary_op(type_name: &'static str, op: UnaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp { type_name, op })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

// Collection errors

#[cold]
pub fn no_length(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoLength { type_name })
}

#[cold]
pub fn not_iterable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIterable { type_name })
}

#[cold]
pub fn destructure_mismatch(found: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DestructureMismatch {
        found: found.into(),
    })
}

#[cold]
pub fn cannot_index(receiver: &'static str, index: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotIndex { receiver, index })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn key_not_found(key: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeyNotFound {
        key: key.to_string(),
    })
}

#[cold]
pub fn immutable_tuple() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImmutableTuple)
}

#[cold]
pub fn item_assignment(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ItemAssignment { type_name })
}
