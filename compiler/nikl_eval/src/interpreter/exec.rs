//! Statement execution.

use nikl_ir::{AssignTarget, Block, ForBindings, Stmt, StmtKind};
use tracing::trace;

use super::{ControlSignal, Interpreter};
use crate::errors::{cannot_delete, destructure_mismatch, not_iterable, EvalResult};
use crate::value::{FunctionValue, Value};

/// One loop iteration's bindings.
type LoopItem = (Value, Option<Value>);

impl Interpreter<'_> {
    /// Run `f` inside a fresh block scope, popping it on every path.
    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> EvalResult<T>) -> EvalResult<T> {
        self.env.push_scope();
        let result = f(self);
        self.env.pop_scope();
        result
    }

    /// Execute statements in the current scope, stopping at `return`.
    pub(crate) fn exec_stmts(&mut self, stmts: &[Stmt]) -> EvalResult<ControlSignal> {
        for stmt in stmts {
            if let ControlSignal::Return(value) = self.exec_stmt(stmt)? {
                return Ok(ControlSignal::Return(value));
            }
        }
        Ok(ControlSignal::Normal)
    }

    fn exec_block(&mut self, block: &Block) -> EvalResult<ControlSignal> {
        self.scoped(|this| this.exec_stmts(&block.stmts))
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<ControlSignal> {
        self.exec_stmt_inner(stmt).map_err(|e| e.or_span(stmt.span))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt) -> EvalResult<ControlSignal> {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.eval_expr(expr)?;
            }
            StmtKind::Let { name, value, .. } => {
                let value = self.eval_expr(value)?;
                self.env.define(*name, value);
            }
            StmtKind::Assign { target, value } => match target {
                AssignTarget::Name(name) => {
                    let value = self.eval_expr(value)?;
                    self.env.assign(*name, value);
                }
                AssignTarget::Index { target, index } => {
                    let container = self.eval_expr(target)?;
                    let key = self.eval_expr(index)?;
                    let value = self.eval_expr(value)?;
                    super::expr::assign_index(&container, key, value)?;
                }
            },
            StmtKind::Del(name) => {
                if !self.env.delete(*name) {
                    return Err(cannot_delete(self.interner.lookup(*name)));
                }
            }
            StmtKind::FunctionDef(def) => {
                let name = self.interner.lookup(def.name);
                trace!(function = name, params = def.params.len(), "define function");
                let func = FunctionValue::new(def.clone(), name, self.env.current_scope());
                self.env.define(def.name, Value::Function(func));
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(condition)?.is_truthy() {
                    return self.exec_block(then_branch);
                }
                if let Some(else_branch) = else_branch {
                    return self.exec_block(else_branch);
                }
            }
            StmtKind::For {
                bindings,
                iterable,
                body,
            } => {
                let iterable = self.eval_expr(iterable)?;
                let items = loop_items(&iterable, bindings.second.is_some())?;
                return self.exec_for(*bindings, items, body);
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::None,
                };
                return Ok(ControlSignal::Return(value));
            }
        }
        Ok(ControlSignal::Normal)
    }

    fn exec_for(
        &mut self,
        bindings: ForBindings,
        items: Vec<LoopItem>,
        body: &Block,
    ) -> EvalResult<ControlSignal> {
        for (first, second) in items {
            let signal = self.scoped(|this| {
                this.env.define(bindings.first, first);
                if let (Some(name), Some(value)) = (bindings.second, second) {
                    this.env.define(name, value);
                }
                this.exec_stmts(&body.stmts)
            })?;
            if let ControlSignal::Return(value) = signal {
                return Ok(ControlSignal::Return(value));
            }
        }
        Ok(ControlSignal::Normal)
    }
}

/// Snapshot what a `for` loop iterates over.
///
/// With `pairs`, Array and Tuple elements are unpacked into two values and
/// HashMaps yield key/value; otherwise HashMaps yield their keys.
fn loop_items(iterable: &Value, pairs: bool) -> EvalResult<Vec<LoopItem>> {
    let elements: Vec<Value> = match iterable {
        Value::HashMap(map) => {
            let map = map.borrow();
            return Ok(if pairs {
                map.iter().map(|(k, v)| (k.clone(), Some(v.clone()))).collect()
            } else {
                map.keys().map(|k| (k.clone(), None)).collect()
            });
        }
        Value::Array(items) => items.borrow().clone(),
        Value::Tuple(items) => items.to_vec(),
        Value::Str(s) => s.chars().map(|c| Value::string(c.to_string())).collect(),
        other => return Err(not_iterable(other.type_name())),
    };

    if !pairs {
        return Ok(elements.into_iter().map(|e| (e, None)).collect());
    }
    elements.iter().map(unpack_pair).collect()
}

fn unpack_pair(element: &Value) -> EvalResult<LoopItem> {
    let pair = match element {
        Value::Tuple(items) => items.to_vec(),
        Value::Array(items) => items.borrow().clone(),
        other => return Err(destructure_mismatch(other.type_name())),
    };
    match <[Value; 2]>::try_from(pair) {
        Ok([first, second]) => Ok((first, Some(second))),
        Err(items) => Err(destructure_mismatch(format!(
            "{} of length {}",
            element.type_name(),
            items.len()
        ))),
    }
}
