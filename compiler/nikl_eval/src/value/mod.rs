//! Runtime values.
//!
//! Scalars (`Int`, `Float`, `Bool`, `None`) are stored inline. Strings and
//! tuples are immutable and shared through `Rc`. Arrays and hash maps are
//! mutable and shared through [`Heap`], so every binding that refers to the
//! same collection observes in-place updates.
//!
//! Collections are built through the factory methods (`Value::array`,
//! `Value::hashmap`, ...); `Heap::new` is private to this module.

mod function;
mod heap;
mod map;

use std::fmt;
use std::rc::Rc;

use nikl_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

pub use function::FunctionValue;
pub use heap::Heap;
pub use map::OrderedMap;

use crate::builtins::Builtin;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(Rc<str>),
    Array(Heap<Vec<Value>>),
    HashMap(Heap<OrderedMap>),
    Tuple(Rc<[Value]>),
    Function(FunctionValue),
    BuiltIn(Builtin),
    None,
}

impl Value {
    #[inline]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    #[inline]
    pub fn hashmap(map: OrderedMap) -> Self {
        Value::HashMap(Heap::new(map))
    }

    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(items.into())
    }

    /// Name shown in type errors and by the REPL.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Bool(_) => "Bool",
            Value::Str(_) => "String",
            Value::Array(_) => "Array",
            Value::HashMap(_) => "HashMap",
            Value::Tuple(_) => "Tuple",
            Value::Function(_) => "Function",
            Value::BuiltIn(_) => "BuiltIn",
            Value::None => "None",
        }
    }

    /// Truthiness used by `if` and `!`.
    ///
    /// `False`, `None`, numeric zero and empty collections are falsy;
    /// everything else, including every callable, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Array(items) => !items.borrow().is_empty(),
            Value::HashMap(map) => !map.borrow().is_empty(),
            Value::Tuple(items) => !items.is_empty(),
            Value::None => false,
            Value::Function(_) | Value::BuiltIn(_) => true,
        }
    }

    /// Element count for `len`. Strings count characters, not bytes.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::Array(items) => Some(items.borrow().len()),
            Value::HashMap(map) => Some(map.borrow().len()),
            Value::Tuple(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Text written by `print`: strings appear without quotes at the top
    /// level, every other value uses its `Display` form.
    pub fn display_value(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            other => other.to_string(),
        }
    }

    /// Write the literal-like form. `open` holds the collections currently
    /// being written so that a self-containing collection prints `[...]`
    /// or `{...}` instead of recursing forever.
    fn write_repr(&self, f: &mut dyn fmt::Write, open: &mut FxHashSet<usize>) -> fmt::Result {
        ensure_sufficient_stack(|| self.write_repr_inner(f, open))
    }

    fn write_repr_inner(&self, f: &mut dyn fmt::Write, open: &mut FxHashSet<usize>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Str(s) => write!(f, "{:?}", &**s),
            Value::None => f.write_str("None"),
            Value::Function(func) => write!(f, "<fn {}>", func.name()),
            Value::BuiltIn(builtin) => write!(f, "<built-in {}>", builtin.name()),
            Value::Tuple(items) => {
                f.write_char('(')?;
                write_items(f, items, open)?;
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            Value::Array(items) => {
                let addr = items.addr();
                if !open.insert(addr) {
                    return f.write_str("[...]");
                }
                f.write_char('[')?;
                write_items(f, &items.borrow(), open)?;
                open.remove(&addr);
                f.write_char(']')
            }
            Value::HashMap(map) => {
                let addr = map.addr();
                if !open.insert(addr) {
                    return f.write_str("{...}");
                }
                f.write_char('{')?;
                for (i, (key, value)) in map.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    key.write_repr(f, open)?;
                    f.write_str(": ")?;
                    value.write_repr(f, open)?;
                }
                open.remove(&addr);
                f.write_char('}')
            }
        }
    }

    /// Move the elements of a collection this value solely owns into `out`.
    /// Shared collections are left alone; their last owner detaches them.
    fn detach_children(&mut self, out: &mut Vec<Value>) {
        match self {
            Value::Array(items) => {
                if let Some(items) = items.get_mut() {
                    out.append(items);
                }
            }
            Value::HashMap(map) => {
                if let Some(map) = map.get_mut() {
                    map.drain_into(out);
                }
            }
            Value::Tuple(items) => {
                if let Some(items) = Rc::get_mut(items) {
                    out.extend(items.iter_mut().map(|item| std::mem::replace(item, Value::None)));
                }
            }
            _ => {}
        }
    }
}

fn write_items(
    f: &mut dyn fmt::Write,
    items: &[Value],
    open: &mut FxHashSet<usize>,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.write_repr(f, open)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_repr(f, &mut FxHashSet::default())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Function(func) => write!(f, "Function({})", func.name()),
            Value::BuiltIn(builtin) => write!(f, "BuiltIn({})", builtin.name()),
            Value::None => f.write_str("None"),
            collection => write!(f, "{}({collection})", collection.type_name()),
        }
    }
}

/// Structural equality.
///
/// No numeric promotion: `1 == 1.0` is false. Two shared collections are
/// equal when they are the same allocation or hold equal elements.
/// Functions compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| self.structurally_equal(other))
    }
}

impl Value {
    fn structurally_equal(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::None, Value::None) => true,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
            (Value::HashMap(a), Value::HashMap(b)) => {
                if a.ptr_eq(b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            (Value::Function(a), Value::Function(b)) => a.same_closure(b),
            (Value::BuiltIn(a), Value::BuiltIn(b)) => a == b,
            _ => false,
        }
    }
}

/// Free nested collections with a work list. A chain built by
/// `v = [v]` in a loop would otherwise be released one native frame per
/// level.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.detach_children(&mut pending);
        }
    }
}
