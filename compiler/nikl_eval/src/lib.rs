//! Nikl Eval - tree-walking evaluator for Nikl programs.
//!
//! # Architecture
//!
//! - [`Value`]: runtime values; Arrays and HashMaps are shared by reference
//! - [`Environment`]: lexical scopes on a scope stack
//! - [`evaluate_binary`] / [`evaluate_unary`]: operator dispatch
//! - [`Builtin`]: `print` and `len`
//! - [`Interpreter`]: statement and expression evaluation
//! - [`EvalError`]: runtime errors with span, class and backtrace

mod builtins;
mod diagnostics;
mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
mod print_handler;
mod value;

pub use builtins::Builtin;
pub use diagnostics::{CallFrame, CallStack};
pub use environment::{Environment, LocalScope, LookupError, Scope};
pub use errors::{BacktraceFrame, ErrorClass, EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::{FunctionValue, Heap, OrderedMap, Value};

#[cfg(test)]
mod tests;
