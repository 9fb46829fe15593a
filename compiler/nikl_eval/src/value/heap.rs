//! Shared, interior-mutable storage for Array and HashMap values.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Reference-counted cell backing the mutable collection variants.
///
/// Cloning a `Heap` clones the handle, not the contents: every binding that
/// holds the same Array sees mutations made through any of them. The
/// constructor is private to `value`, so collections are only created
/// through the `Value` factories.
#[repr(transparent)]
pub struct Heap<T>(Rc<RefCell<T>>);

impl<T> Heap<T> {
    pub(super) fn new(value: T) -> Self {
        Heap(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// True when both handles point at the same collection.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Contents, when this is the last handle to the collection.
    pub(super) fn get_mut(&mut self) -> Option<&mut T> {
        Rc::get_mut(&mut self.0).map(RefCell::get_mut)
    }

    /// Identity of the allocation, used to detect cycles while printing.
    pub(super) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(inner) => inner.fmt(f),
            Err(_) => f.write_str("<borrowed>"),
        }
    }
}
