//! Built-in functions available in every program's global scope.

use nikl_ir::StringInterner;
use tracing::debug;

use crate::environment::Environment;
use crate::errors::{arity_mismatch, no_length, EvalResult};
use crate::print_handler::PrintHandlerImpl;
use crate::value::Value;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `print(a, b, ...)`: space-separated display forms and a newline.
    Print,
    /// `len(x)`: element count of a String, Array, HashMap or Tuple.
    Len,
}

impl Builtin {
    pub const ALL: [Builtin; 2] = [Builtin::Print, Builtin::Len];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Len => "len",
        }
    }

    pub fn call(self, args: &[Value], out: &PrintHandlerImpl) -> EvalResult {
        match self {
            Builtin::Print => {
                let line = args
                    .iter()
                    .map(Value::display_value)
                    .collect::<Vec<_>>()
                    .join(" ");
                out.println(&line);
                Ok(Value::None)
            }
            Builtin::Len => {
                let [arg] = args else {
                    return Err(arity_mismatch(self.name(), 1, args.len()));
                };
                let len = arg.len().ok_or_else(|| no_length(arg.type_name()))?;
                // A collection cannot hold more than i64::MAX elements.
                Ok(Value::Int(i64::try_from(len).unwrap_or(i64::MAX)))
            }
        }
    }
}

/// Bind every built-in in the global scope.
pub fn register(env: &mut Environment, interner: &StringInterner) {
    for builtin in Builtin::ALL {
        debug!(name = builtin.name(), "registering built-in");
        env.define_global(interner.intern(builtin.name()), Value::BuiltIn(builtin));
    }
}
