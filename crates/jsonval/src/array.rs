//! Ordered sequence of values.

use std::ops::{Index, IndexMut};

use crate::error::{JsonError, Result};
use crate::value::{drop_nested, Value};

/// A JSON array: 0-indexed, mixed element types and duplicates allowed.
///
/// `Index`/`IndexMut` panic on out-of-range positions the same way `Vec`
/// does; use [`Array::get`] or [`Array::set`] for checked access.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array(Vec<Value>);

impl Array {
    pub fn new() -> Self {
        Array(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Array(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.0.get_mut(index)
    }

    /// Overwrites the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Value> {
        let size = self.0.len();
        let slot = self
            .0
            .get_mut(index)
            .ok_or(JsonError::IndexOutOfRange { index, size })?;
        Ok(std::mem::replace(slot, value.into()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in order; call `.rev()` for reverse order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.0.iter_mut()
    }

    /// Removes every element matching `pred`, keeping the relative order of
    /// the rest. Returns how many were removed.
    pub fn remove_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&Value) -> bool,
    {
        let before = self.0.len();
        self.0.retain(|v| !pred(v));
        before - self.0.len()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn into_vec(mut self) -> Vec<Value> {
        std::mem::take(&mut self.0)
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Value> {
        &mut self.0
    }
}

impl Drop for Array {
    fn drop(&mut self) {
        if self.0.iter().any(|v| v.is_array() || v.is_object()) {
            drop_nested(std::mem::take(&mut self.0));
        }
    }
}

impl Index<usize> for Array {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.0[index]
    }
}

impl IndexMut<usize> for Array {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        &mut self.0[index]
    }
}

impl From<Vec<Value>> for Array {
    fn from(values: Vec<Value>) -> Self {
        Array(values)
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Array(iter.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> Extend<V> for Array {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(mut self) -> Self::IntoIter {
        std::mem::take(&mut self.0).into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a mut Array {
    type Item = &'a mut Value;
    type IntoIter = std::slice::IterMut<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(n: i32) -> Array {
        (0..n).collect()
    }

    #[test]
    fn remove_if_keeps_order_of_survivors() {
        let mut arr = counting(10);
        let removed = arr.remove_if(|v| v.as_i64().map(|n| n % 2 == 0).unwrap_or(false));
        assert_eq!(removed, 5);
        let left: Vec<i64> = arr.iter().map(|v| v.as_i64().unwrap()).collect();
        assert_eq!(left, vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn remove_if_matching_nothing() {
        let mut arr = counting(10);
        assert_eq!(arr.remove_if(|v| v.as_i64().unwrap() > 32), 0);
        assert_eq!(arr.len(), 10);
    }

    #[test]
    fn remove_if_on_empty() {
        let mut arr = Array::new();
        assert_eq!(arr.remove_if(|_| true), 0);
        assert!(arr.is_empty());
    }

    #[test]
    fn set_out_of_range() {
        let mut arr = counting(2);
        assert_eq!(
            arr.set(5, 1),
            Err(JsonError::IndexOutOfRange { index: 5, size: 2 })
        );
        assert_eq!(arr.set(1, "x").unwrap(), Value::from(1));
        assert_eq!(arr[1], Value::from("x"));
    }

    #[test]
    fn forward_and_reverse_iteration() {
        let mut arr = counting(4);
        arr.extend([8, 10, 12]);
        let fwd: Vec<i64> = arr.iter().map(|v| v.as_i64().unwrap()).collect();
        let rev: Vec<i64> = arr.iter().rev().map(|v| v.as_i64().unwrap()).collect();
        assert_eq!(fwd, vec![0, 1, 2, 3, 8, 10, 12]);
        assert_eq!(rev, vec![12, 10, 8, 3, 2, 1, 0]);
    }
}
