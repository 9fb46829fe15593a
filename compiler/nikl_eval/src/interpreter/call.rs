//! Function call evaluation.

use nikl_ir::Span;

use super::{ControlSignal, Interpreter};
use crate::diagnostics::CallFrame;
use crate::errors::{arity_mismatch, not_callable, EvalResult};
use crate::value::{FunctionValue, Value};

impl Interpreter<'_> {
    /// Call any callable value with already-evaluated arguments.
    pub(crate) fn call_value(
        &mut self,
        callee: &Value,
        args: Vec<Value>,
        call_span: Span,
    ) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(func, args, call_span),
            Value::BuiltIn(builtin) => builtin.call(&args, &self.print_handler),
            other => Err(not_callable(other.type_name())),
        }
    }

    /// Call a user function.
    ///
    /// Parameters and body share one scope whose parent is the scope the
    /// function captured. Errors leaving the body carry a backtrace.
    #[tracing::instrument(level = "debug", skip_all, fields(function = func.name()))]
    fn call_function(
        &mut self,
        func: &FunctionValue,
        args: Vec<Value>,
        call_span: Span,
    ) -> EvalResult {
        let def = func.def();
        if args.len() != def.params.len() {
            return Err(arity_mismatch(func.name(), def.params.len(), args.len()));
        }

        self.call_stack.push(CallFrame {
            name: def.name,
            call_span: Some(call_span),
        })?;
        self.env.push_call_scope(func.captured().clone());
        for (param, arg) in def.params.iter().zip(args) {
            self.env.define(param.name, arg);
        }

        let result = self
            .exec_stmts(&def.body.stmts)
            .map_err(|e| self.call_stack.attach_backtrace(e, self.interner));

        self.env.pop_scope();
        self.call_stack.pop();

        match result? {
            ControlSignal::Return(value) => Ok(value),
            ControlSignal::Normal => Ok(Value::None),
        }
    }
}
