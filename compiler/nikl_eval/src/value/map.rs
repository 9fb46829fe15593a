//! Insertion-ordered map keyed by structural equality.

use std::slice;

use super::Value;

/// Backing store of a `HashMap` value.
///
/// Values are neither `Hash` nor `Eq` (floats, shared cells), so keys are
/// matched with `==` over an association list. Re-inserting an existing key
/// replaces its value and keeps its original position.
#[derive(Clone, Debug, Default)]
pub struct OrderedMap {
    entries: Vec<(Value, Value)>,
}

impl OrderedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace, returning the previous value for `key`.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Position of `key` in insertion order.
    pub fn position(&self, key: &Value) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Replace the value at `position`, returning the old one.
    pub fn replace_at(&mut self, position: usize, value: Value) -> Option<Value> {
        self.entries
            .get_mut(position)
            .map(|slot| std::mem::replace(&mut slot.1, value))
    }

    /// Append an entry. The caller has checked that `key` is absent.
    pub fn push_new(&mut self, key: Value, value: Value) {
        self.entries.push((key, value));
    }

    /// Move every key and value into `out`, leaving the map empty.
    pub(super) fn drain_into(&mut self, out: &mut Vec<Value>) {
        for (key, value) in self.entries.drain(..) {
            out.push(key);
            out.push(value);
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, (Value, Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl<'a> IntoIterator for &'a OrderedMap {
    type Item = &'a (Value, Value);
    type IntoIter = slice::Iter<'a, (Value, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(Value, Value)> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
