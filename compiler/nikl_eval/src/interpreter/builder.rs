//! `InterpreterBuilder` for creating Interpreter instances.

use nikl_ir::StringInterner;

use super::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use crate::builtins;
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Self {
            interner,
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Where `print` writes. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Maximum number of nested user-function calls before `StackOverflow`.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Build the interpreter and bind the built-ins in its global scope.
    pub fn build(self) -> Interpreter<'a> {
        let mut env = Environment::new();
        builtins::register(&mut env, self.interner);

        Interpreter {
            interner: self.interner,
            env,
            call_stack: CallStack::new(self.max_call_depth),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
        }
    }
}
