//! Insertion-ordered mapping from string keys to values.

use std::ops::{Index, IndexMut};

use indexmap::IndexMap;

use crate::value::{drop_nested, Value};

static NULL: Value = Value::Null;

/// A JSON object with unique keys kept in insertion order.
///
/// Reading a missing key through `obj["k"]` yields `Null`; writing through
/// `obj["k"] = ...` creates the member. Typed extraction treats a missing
/// key as an error instead (see [`crate::extract`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object(IndexMap<String, Value>);

impl Object {
    pub fn new() -> Self {
        Object(IndexMap::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Object(IndexMap::with_capacity(capacity))
    }

    /// Inserts or overwrites a member. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns the member for `key`, appending a `Null` member if absent.
    pub fn field_mut(&mut self, key: &str) -> &mut Value {
        self.0.entry(key.to_string()).or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a member; the remaining members keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.0.iter_mut()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    pub(crate) fn drain_values(&mut self) -> impl Iterator<Item = Value> + '_ {
        self.0.drain(..).map(|(_, v)| v)
    }
}

impl Drop for Object {
    fn drop(&mut self) {
        if self.0.values().any(|v| v.is_array() || v.is_object()) {
            drop_nested(self.drain_values().collect());
        }
    }
}

impl Index<&str> for Object {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&NULL)
    }
}

impl IndexMut<&str> for Object {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.field_mut(key)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Object {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(mut self) -> Self::IntoIter {
        std::mem::take(&mut self.0).into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_write_auto_creates() {
        let mut obj = Object::new();
        obj["a"] = Value::from("Hello");
        obj["c"] = Value::from(25);
        assert_eq!(obj["a"].as_str().unwrap(), "Hello");
        assert_eq!(obj["c"].as_i64().unwrap(), 25);
        assert!(obj["missing"].is_null());
        assert!(!obj.contains_key("missing"));
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut obj: Object = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(obj.insert("a", 10), Some(Value::from(1)));
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(obj["a"], Value::from(10));
    }

    #[test]
    fn remove_preserves_order() {
        let mut obj: Object = [("x", 1), ("y", 2), ("z", 3)].into_iter().collect();
        obj.remove("x");
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["y", "z"]);
    }
}
