//! The tagged `Value` type and its checked accessors.
//!
//! A `Value` holds exactly one JSON datum. Each accessor returns the payload
//! when the tag matches and a [`JsonError::TypeMismatch`] otherwise; the only
//! cross-tag read is [`Value::as_f64`], which also accepts integers.
//!
//! Containers can be read two ways, chosen at the call site:
//!
//! - `as_array_mut` / `as_object_mut` borrow the value's own storage, so
//!   writes through the handle land in the value (alias);
//! - `to_array` / `to_object` return a deep copy that is independent of the
//!   value from then on.

use std::fmt;
use std::str::FromStr;

use crate::array::Array;
use crate::error::{JsonError, Location, Result};
use crate::number::Integer;
use crate::object::Object;

/// Tag of the variant a [`Value`] currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    Integer,
    Real,
    String,
    Array,
    Object,
}

impl ValueType {
    /// Lowercase name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "boolean",
            ValueType::Integer => "integer",
            ValueType::Real => "real",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON value.
///
/// Equality is structural and tag-strict: `Integer(1)` is not equal to
/// `Real(1.0)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(Integer),
    Real(f64),
    String(String),
    Array(Array),
    Object(Object),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Integer(_) => ValueType::Integer,
            Value::Real(_) => ValueType::Real,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Value::Real(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    fn mismatch(&self, expected: ValueType) -> JsonError {
        JsonError::mismatch(Location::TopLevel, expected.name(), self.value_type())
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(ValueType::Bool)),
        }
    }

    pub fn as_integer(&self) -> Result<Integer> {
        match self {
            Value::Integer(n) => Ok(*n),
            _ => Err(self.mismatch(ValueType::Integer)),
        }
    }

    /// Reads an integer that must fit in `i64`.
    pub fn as_i64(&self) -> Result<i64> {
        self.as_integer()?
            .as_i64()
            .ok_or_else(|| JsonError::mismatch(Location::TopLevel, "i64", ValueType::Integer))
    }

    /// Reads an integer that must be non-negative.
    pub fn as_u64(&self) -> Result<u64> {
        self.as_integer()?
            .as_u64()
            .ok_or_else(|| JsonError::mismatch(Location::TopLevel, "u64", ValueType::Integer))
    }

    /// Reads a real, widening integers to the nearest `f64`.
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Value::Real(f) => Ok(*f),
            Value::Integer(n) => Ok(n.as_f64()),
            _ => Err(self.mismatch(ValueType::Real)),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(ValueType::String)),
        }
    }

    pub fn as_array(&self) -> Result<&Array> {
        match self {
            Value::Array(a) => Ok(a),
            _ => Err(self.mismatch(ValueType::Array)),
        }
    }

    /// Borrows the array storage; writes through it are visible in `self`.
    pub fn as_array_mut(&mut self) -> Result<&mut Array> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other.mismatch(ValueType::Array)),
        }
    }

    /// Deep-copies the array; the copy does not share storage with `self`.
    pub fn to_array(&self) -> Result<Array> {
        self.as_array().cloned()
    }

    pub fn as_object(&self) -> Result<&Object> {
        match self {
            Value::Object(o) => Ok(o),
            _ => Err(self.mismatch(ValueType::Object)),
        }
    }

    /// Borrows the object storage; writes through it are visible in `self`.
    pub fn as_object_mut(&mut self) -> Result<&mut Object> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(other.mismatch(ValueType::Object)),
        }
    }

    /// Deep-copies the object; the copy does not share storage with `self`.
    pub fn to_object(&self) -> Result<Object> {
        self.as_object().cloned()
    }

    pub fn into_array(self) -> Result<Array> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other.mismatch(ValueType::Array)),
        }
    }

    pub fn into_object(self) -> Result<Object> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(other.mismatch(ValueType::Object)),
        }
    }

    pub fn into_string(self) -> Result<String> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(ValueType::String)),
        }
    }

    /// Replaces the value with `Null` and returns what was there.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }
}

/// Tears down nested containers with a work list instead of recursion, so
/// dropping a deeply nested tree cannot exhaust the stack.
pub(crate) fn drop_nested(mut pending: Vec<Value>) {
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(mut items) => pending.append(items.items_mut()),
            Value::Object(mut members) => pending.extend(members.drain_values()),
            _ => {}
        }
    }
}

impl fmt::Display for Value {
    /// Writes the compact JSON form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::writer::write(self))
    }
}

impl FromStr for Value {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Integer(Integer::from(n))
            }
        }
    )*};
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<Integer> for Value {
    fn from(n: Integer) -> Self {
        Value::Integer(n)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Real(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Real(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(Array::from(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
