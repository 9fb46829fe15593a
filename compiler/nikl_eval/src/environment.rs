//! Environment for variable scoping in the interpreter.
//!
//! Uses a scope stack (not cloning) for scope management. Function calls push
//! a scope whose parent is the function's captured scope, so name resolution
//! follows the lexical chain rather than the call stack.

use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use nikl_ir::Name;
use tracing::trace;

use crate::value::Value;

/// Why a name could not be resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupError {
    /// No scope in the chain binds the name.
    Undefined,
    /// The name was removed with `del` and no outer binding remains.
    Deleted,
}

/// A single-threaded scope wrapper for reference-counted interior mutability.
///
/// All scope allocations go through `LocalScope::new()`. Scopes are shared
/// between the environment's stack and any function that captured them.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// True when both handles refer to the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single scope containing variable bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    /// Names removed with `del` while bound in this scope.
    deleted: FxHashSet<Name>,
    /// Parent scope (for lexical scoping).
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            parent: Some(parent),
            ..Self::default()
        }
    }

    /// Bind `name` in this scope, replacing any existing binding here.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.deleted.remove(&name);
        self.bindings.insert(name, value);
    }

    /// Resolve `name` through this scope and its ancestors.
    ///
    /// A deletion only hides the binding of the scope it happened in; an
    /// outer binding of the same name is still found.
    pub fn lookup(&self, name: Name) -> Result<Value, LookupError> {
        if let Some(value) = self.bindings.get(&name) {
            return Ok(value.clone());
        }
        let here = if self.deleted.contains(&name) {
            LookupError::Deleted
        } else {
            LookupError::Undefined
        };
        match &self.parent {
            Some(parent) => match parent.borrow().lookup(name) {
                Err(LookupError::Undefined) => Err(here),
                other => other,
            },
            None => Err(here),
        }
    }

    /// Overwrite the nearest existing binding of `name`.
    ///
    /// Hands the value back when no scope in the chain binds the name.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), Value> {
        if let Some(slot) = self.bindings.get_mut(&name) {
            *slot = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(value),
        }
    }

    /// Remove a binding made in this scope. Returns `false` if `name` is
    /// not bound here, even when an enclosing scope binds it.
    pub fn remove(&mut self, name: Name) -> bool {
        if self.bindings.remove(&name).is_some() {
            self.deleted.insert(name);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }
}

/// Environment for the interpreter using a scope stack.
pub struct Environment {
    /// Stack of scopes, with current scope at the top.
    scopes: Vec<LocalScope<Scope>>,
    /// Global scope (always at the bottom).
    global: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    /// Number of scopes on the stack, global included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push a block scope nested in the current one.
    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Push the scope of a function call, nested in the scope the function
    /// captured at definition time.
    #[inline]
    pub fn push_call_scope(&mut self, captured: LocalScope<Scope>) {
        self.scopes
            .push(LocalScope::new(Scope::with_parent(captured)));
    }

    /// Pop the current scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Handle to the current scope, captured by function definitions.
    #[inline]
    pub fn current_scope(&self) -> LocalScope<Scope> {
        self.current().clone()
    }

    #[inline]
    fn current(&self) -> &LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global)
    }

    /// Define a variable in the current scope.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        trace!(?name, depth = self.depth(), "define");
        self.current().borrow_mut().define(name, value);
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Result<Value, LookupError> {
        self.current().borrow().lookup(name)
    }

    /// Rebind `name` where it is visible, or create it in the global scope
    /// when no enclosing scope binds it.
    pub fn assign(&mut self, name: Name, value: Value) {
        let unbound = self.current().borrow_mut().assign(name, value);
        if let Err(value) = unbound {
            trace!(?name, "assign creates global");
            self.global.borrow_mut().define(name, value);
        }
    }

    /// Remove `name` from the current scope only.
    pub fn delete(&mut self, name: Name) -> bool {
        let removed = self.current().borrow_mut().remove(name);
        trace!(?name, removed, "delete");
        removed
    }

    pub fn define_global(&mut self, name: Name, value: Value) {
        self.global.borrow_mut().define(name, value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
