use alloc::string::String;
use alloc::vec::{self, Vec};
use core::fmt;
use core::hash::BuildHasher;
use core::slice;

use recast_utils::hash::{FixedHashState, HashTable};

use crate::Value;

// -----------------------------------------------------------------------------
// Document

/// An insertion-ordered, string-keyed map of [`Value`]s.
///
/// Entries live in a `Vec` in insertion order; a hash table of indices into
/// that `Vec` serves key lookup. Re-inserting an existing key replaces the
/// value in place and keeps the original position.
///
/// Equality ignores order: two documents are equal when they hold the same
/// keys mapped to equal values.
#[derive(Clone, Default)]
pub struct Document {
    entries: Vec<(String, Value)>,
    index: HashTable<usize>,
}

#[inline]
fn hash_key(key: &str) -> u64 {
    FixedHashState.hash_one(key)
}

impl Document {
    /// Creates an empty document.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashTable::new(),
        }
    }

    /// Creates an empty document with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashTable::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        let entries = &self.entries;
        self.index
            .find(hash_key(key), |&i| entries[i].0 == key)
            .copied()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.position(key).map(|i| &mut self.entries[i].1)
    }

    /// Returns the string stored under `key`, `None` if absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Inserts `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();

        if let Some(i) = self.position(&key) {
            return Some(core::mem::replace(&mut self.entries[i].1, value));
        }

        let entries = &self.entries;
        self.index.insert_unique(hash_key(&key), entries.len(), |&i| {
            hash_key(&entries[i].0)
        });
        self.entries.push((key, value));
        None
    }

    /// Removes `key`, shifting later entries down to keep the order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let entries = &self.entries;
        let removed = match self.index.find_entry(hash_key(key), |&i| entries[i].0 == key) {
            Ok(entry) => entry.remove().0,
            Err(_) => return None,
        };

        for i in self.index.iter_mut() {
            if *i > removed {
                *i -= 1;
            }
        }
        Some(self.entries.remove(removed).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Iterates over the entries in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.entries.iter())
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates over the values in insertion order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }
}

// -----------------------------------------------------------------------------
// Iterators

/// Borrowing iterator over a [`Document`], see [`Document::iter`].
#[derive(Clone)]
pub struct Iter<'a>(slice::Iter<'a, (String, Value)>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, value)| (key.as_str(), value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Owning iterator over a [`Document`].
pub struct IntoIter(vec::IntoIter<(String, Value)>);

impl Iterator for IntoIter {
    type Item = (String, Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for IntoIter {}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.entries.into_iter())
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut document = Document::new();
        document.extend(iter);
        document
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Document {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

// -----------------------------------------------------------------------------
// Traits

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::{Value, doc};

    #[test]
    fn keeps_insertion_order() {
        let mut document = Document::new();
        document.insert("b", 1);
        document.insert("a", 2);
        document.insert("c", 3);
        assert_eq!(document.keys().collect::<Vec<_>>(), ["b", "a", "c"]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut document = doc! { "x" => 1, "y" => 2 };
        assert_eq!(document.insert("x", 10), Some(Value::Int(1)));
        assert_eq!(document.keys().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(document.get("x"), Some(&Value::Int(10)));
    }

    #[test]
    fn remove_reindexes() {
        let mut document = doc! { "a" => 1, "b" => 2, "c" => 3 };
        assert_eq!(document.remove("a"), Some(Value::Int(1)));
        assert_eq!(document.remove("a"), None);
        assert_eq!(document.get("b"), Some(&Value::Int(2)));
        assert_eq!(document.get("c"), Some(&Value::Int(3)));
        document.insert("d", 4);
        assert_eq!(document.keys().collect::<Vec<_>>(), ["b", "c", "d"]);
        assert_eq!(document.get("d"), Some(&Value::Int(4)));
    }

    #[test]
    fn equality_ignores_order() {
        let left = doc! { "a" => 1, "b" => "x" };
        let right = doc! { "b" => "x", "a" => 1 };
        assert_eq!(left, right);
        assert_ne!(left, doc! { "a" => 1 });
        assert_ne!(left, doc! { "a" => 1_i64, "b" => "x" });
    }

    #[test]
    fn collect_and_iterate() {
        let document: Document = [("k", 1), ("l", 2)].into_iter().collect();
        let pairs: Vec<(String, Value)> = document.clone().into_iter().collect();
        assert_eq!(pairs[1], ("l".to_owned(), Value::Int(2)));
        assert_eq!(document.iter().len(), 2);
        assert_eq!(document.get_str("k"), None);
    }
}
