//! String interner for identifiers and string literals.
//!
//! Interned strings are leaked to obtain `'static` lifetimes, so lookups hand
//! out plain `&'static str` without holding the lock.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::Name;

struct InternTable {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl InternTable {
    fn with_empty() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        InternTable {
            map,
            strings: vec![empty],
        }
    }
}

/// Interner mapping strings to compact [`Name`] handles.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

/// Interner shared between the parser, the evaluator and the CLI.
pub type SharedInterner = Arc<StringInterner>;

impl StringInterner {
    /// Create an interner with only the empty string pre-interned.
    pub fn new() -> Self {
        StringInterner {
            table: RwLock::new(InternTable::with_empty()),
        }
    }

    /// Intern a string, returning its `Name`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        // Fast path: already interned
        if let Some(&index) = self.table.read().map.get(s) {
            return Name::from_index(index);
        }

        let mut table = self.table.write();
        // Double-check after acquiring write lock
        if let Some(&index) = table.map.get(s) {
            return Name::from_index(index);
        }

        let index = u32::try_from(table.strings.len())
            .unwrap_or_else(|_| panic!("interner exceeded {} strings", u32::MAX));
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        table.strings.push(leaked);
        table.map.insert(leaked, index);
        Name::from_index(index)
    }

    /// Resolve a `Name` to its string. Unknown names resolve to `""`.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let interner = StringInterner::new();
        let a = interner.intern("cats");
        let b = interner.intern("cats");
        assert_eq!(a, b);
        assert_eq!(interner.lookup(a), "cats");
    }

    #[test]
    fn distinct_strings_get_distinct_names() {
        let interner = StringInterner::new();
        let a = interner.intern("x");
        let b = interner.intern("y");
        assert_ne!(a, b);
        assert_eq!(interner.len(), 3);
    }

    #[test]
    fn empty_string_is_preinterned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }

    #[test]
    fn shared_interner_default() {
        let interner = SharedInterner::default();
        let n = interner.intern("len");
        let clone = Arc::clone(&interner);
        assert_eq!(clone.lookup(n), "len");
    }
}
