//! Expression evaluation, indexing and index assignment.

use nikl_ir::{Expr, ExprKind, Literal};
use nikl_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::environment::LookupError;
use crate::errors::{
    cannot_index, deleted_variable, immutable_tuple, index_out_of_bounds, item_assignment,
    key_not_found, undefined_variable, EvalResult,
};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::value::{OrderedMap, Value};

impl Interpreter<'_> {
    /// Evaluate an expression. Errors without a location get this
    /// expression's span.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr)).map_err(|e| e.or_span(expr.span))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(self.eval_literal(*literal)),
            ExprKind::Ident(name) => self.env.lookup(*name).map_err(|err| {
                let text = self.interner.lookup(*name);
                match err {
                    LookupError::Undefined => undefined_variable(text),
                    LookupError::Deleted => deleted_variable(text),
                }
            }),
            ExprKind::Array(items) => Ok(Value::array(self.eval_exprs(items)?)),
            ExprKind::Tuple(items) => Ok(Value::tuple(self.eval_exprs(items)?)),
            ExprKind::HashMap(entries) => {
                let mut map = OrderedMap::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = self.eval_expr(key)?;
                    let value = self.eval_expr(value)?;
                    map.insert(key, value);
                }
                Ok(Value::hashmap(map))
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(&left, &right, *op)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.eval_expr(operand)?;
                evaluate_unary(&operand, *op)
            }
            ExprKind::Call { callee, args } => {
                let callee = self.eval_expr(callee)?;
                let args = self.eval_exprs(args)?;
                self.call_value(&callee, args, expr.span)
            }
            ExprKind::Index { target, index } => {
                let target = self.eval_expr(target)?;
                let index = self.eval_expr(index)?;
                index_value(&target, &index)
            }
        }
    }

    fn eval_literal(&self, literal: Literal) -> Value {
        match literal {
            Literal::Int(n) => Value::Int(n),
            Literal::Float(x) => Value::Float(x),
            Literal::Bool(b) => Value::Bool(b),
            Literal::String(name) => Value::string(self.interner.lookup(name)),
            Literal::None => Value::None,
        }
    }

    fn eval_exprs(&mut self, exprs: &[Expr]) -> EvalResult<Vec<Value>> {
        exprs.iter().map(|e| self.eval_expr(e)).collect()
    }
}

/// Convert an Int index into a position, rejecting negatives.
fn position(index: i64, len: usize) -> EvalResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| index_out_of_bounds(index, len))
}

/// `target[index]`.
pub(crate) fn index_value(target: &Value, index: &Value) -> EvalResult {
    match (target, index) {
        (Value::Array(items), Value::Int(i)) => {
            let items = items.borrow();
            Ok(items[position(*i, items.len())?].clone())
        }
        (Value::Tuple(items), Value::Int(i)) => Ok(items[position(*i, items.len())?].clone()),
        (Value::Str(s), Value::Int(i)) => {
            let len = s.chars().count();
            let at = position(*i, len)?;
            Ok(s.chars()
                .nth(at)
                .map_or(Value::None, |c| Value::string(c.to_string())))
        }
        (Value::HashMap(map), key) => map
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| key_not_found(&key.to_string())),
        _ => Err(cannot_index(target.type_name(), index.type_name())),
    }
}

/// `target[index] = value`, mutating the shared collection in place.
pub(crate) fn assign_index(target: &Value, index: Value, value: Value) -> EvalResult<()> {
    match (target, &index) {
        (Value::Array(items), Value::Int(i)) => {
            let mut items = items.borrow_mut();
            let at = position(*i, items.len())?;
            items[at] = value;
            Ok(())
        }
        (Value::Array(_), _) => Err(cannot_index("Array", index.type_name())),
        (Value::HashMap(map), _) => {
            // Key comparison may borrow other collections, so find the
            // slot before taking the mutable borrow.
            let existing = map.borrow().position(&index);
            let mut map = map.borrow_mut();
            match existing {
                Some(at) => {
                    map.replace_at(at, value);
                }
                None => map.push_new(index, value),
            }
            Ok(())
        }
        (Value::Tuple(_), _) => Err(immutable_tuple()),
        (other, _) => Err(item_assignment(other.type_name())),
    }
}
