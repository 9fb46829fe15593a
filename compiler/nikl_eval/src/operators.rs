//! Binary and unary operator implementations for the evaluator.
//!
//! The type set is fixed, so dispatch is a direct match on the operand
//! pair rather than a trait per type.

use std::cmp::Ordering;

use nikl_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, invalid_binary_op,
    invalid_unary_op, modulo_by_zero, EvalResult,
};
use crate::value::Value;

/// Checked integer arithmetic; the only failure is overflow.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate a binary operation.
///
/// `==` and `!=` are structural and accept any pair. Everything else is
/// defined on a fixed set of operand types; mixed `Int`/`Float` operands
/// are promoted to `Float`.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => return Ok(Value::Bool(left != right)),
        _ => {}
    }

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        (Value::Int(a), Value::Float(b)) => eval_float_binary(promote(*a), *b, op),
        (Value::Float(a), Value::Int(b)) => eval_float_binary(*a, promote(*b), op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        (Value::Array(a), Value::Array(b)) if op == BinaryOp::Add => {
            let mut joined = a.borrow().clone();
            joined.extend(b.borrow().iter().cloned());
            Ok(Value::array(joined))
        }
        _ => Err(mismatch(left, right, op)),
    }
}

#[expect(clippy::cast_precision_loss, reason = "Int to Float promotion")]
#[inline]
fn promote(n: i64) -> f64 {
    n as f64
}

#[cold]
fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> crate::errors::EvalError {
    if std::mem::discriminant(left) == std::mem::discriminant(right) {
        invalid_binary_op(left.type_name(), op)
    } else {
        binary_type_mismatch(left.type_name(), right.type_name(), op)
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(a.checked_div(b), "division")
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                Err(modulo_by_zero())
            } else {
                checked_arith(a.checked_rem(b), "remainder")
            }
        }
        _ => Ok(compare(a.cmp(&b), op)),
    }
}

fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div if b == 0.0 => Err(division_by_zero()),
        BinaryOp::Div => Ok(Value::Float(a / b)),
        BinaryOp::Mod if b == 0.0 => Err(modulo_by_zero()),
        BinaryOp::Mod => Ok(Value::Float(a % b)),
        // NaN is unordered: every ordering comparison is False.
        _ => Ok(a
            .partial_cmp(&b)
            .map_or(Value::Bool(false), |ord| compare(ord, op))),
    }
}

fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        op if op.is_ordering() => Ok(compare(a.cmp(b), op)),
        _ => Err(invalid_binary_op("String", op)),
    }
}

/// Map an ordering onto one of `< <= > >=`.
#[inline]
fn compare(ord: Ordering, op: BinaryOp) -> Value {
    let result = match op {
        BinaryOp::Lt => ord.is_lt(),
        BinaryOp::LtEq => ord.is_le(),
        BinaryOp::Gt => ord.is_gt(),
        BinaryOp::GtEq => ord.is_ge(),
        BinaryOp::Eq => ord.is_eq(),
        BinaryOp::NotEq => ord.is_ne(),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => false,
    };
    Value::Bool(result)
}

/// Evaluate a unary operation.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    match (value, op) {
        (Value::Int(n), UnaryOp::Neg) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (Value::Float(f), UnaryOp::Neg) => Ok(Value::Float(-f)),
        (_, UnaryOp::Not) => Ok(Value::Bool(!value.is_truthy())),
        (_, UnaryOp::Neg) => Err(invalid_unary_op(value.type_name(), op)),
    }
}
