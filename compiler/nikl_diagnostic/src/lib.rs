//! Diagnostic and error reporting for the Nikl interpreter.
//!
//! Every stage (lexer, parser, evaluator) converts its own error type into a
//! [`Diagnostic`], which an emitter renders for the user:
//!
//! ```text
//! error[E6001]: NameError: undefined variable: foo
//!   --> main.nk:3:7
//!    |
//!  3 | print(foo)
//!    |       ^^^ not found in this scope
//! ```

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
