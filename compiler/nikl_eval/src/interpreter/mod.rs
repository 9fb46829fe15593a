//! Tree-walking interpreter for Nikl.
//!
//! # Architecture
//!
//! - `exec`: statements, blocks and `for` loops
//! - `expr`: expressions, indexing and index assignment
//! - `call`: calls to user functions and built-ins
//!
//! Statements return a [`ControlSignal`] so that `return` can unwind through
//! nested blocks and loops to the enclosing call without using the error
//! channel. Every block that pushes a scope pops it again on both the
//! success and the error path, which keeps the environment usable after a
//! failed REPL line.

mod builder;
mod call;
mod exec;
mod expr;

pub use builder::InterpreterBuilder;

use nikl_ir::{Block, StringInterner};
use tracing::debug;

use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::print_handler::SharedPrintHandler;
use crate::value::Value;

/// Default bound on nested user-function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Outcome of executing a statement.
#[derive(Debug)]
pub(crate) enum ControlSignal {
    Normal,
    Return(Value),
}

/// Evaluates programs against a persistent global scope.
pub struct Interpreter<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) env: Environment,
    pub(crate) call_stack: CallStack,
    pub(crate) print_handler: SharedPrintHandler,
}

impl<'a> Interpreter<'a> {
    /// Interpreter printing to stdout with the default depth limit.
    pub fn new(interner: &'a StringInterner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    pub fn builder(interner: &'a StringInterner) -> InterpreterBuilder<'a> {
        InterpreterBuilder::new(interner)
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Execute a program's top-level statements in the global scope.
    ///
    /// Globals persist across calls, so a REPL can feed one line at a time.
    /// A top-level `return` ends the program successfully.
    pub fn run(&mut self, program: &Block) -> EvalResult<()> {
        debug!(statements = program.stmts.len(), "run");
        match self.exec_stmts(&program.stmts)? {
            ControlSignal::Normal => {}
            ControlSignal::Return(value) => debug!(?value, "top-level return"),
        }
        Ok(())
    }
}
