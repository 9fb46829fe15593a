//! User-defined function values.

use std::fmt;
use std::rc::Rc;

use nikl_ir::FunctionDef;

use crate::environment::{LocalScope, Scope};

/// A user function paired with the scope it was defined in.
///
/// The captured scope is shared, not copied: bindings made in that scope
/// after the definition are visible to the function when it runs.
#[derive(Clone)]
pub struct FunctionValue {
    def: Rc<FunctionDef>,
    name: &'static str,
    captured: LocalScope<Scope>,
}

impl FunctionValue {
    pub fn new(def: Rc<FunctionDef>, name: &'static str, captured: LocalScope<Scope>) -> Self {
        FunctionValue {
            def,
            name,
            captured,
        }
    }

    pub fn def(&self) -> &FunctionDef {
        &self.def
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> usize {
        self.def.params.len()
    }

    pub fn captured(&self) -> &LocalScope<Scope> {
        &self.captured
    }

    /// Same definition closed over the same scope.
    pub fn same_closure(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.def, &other.def) && self.captured.ptr_eq(&other.captured)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}
