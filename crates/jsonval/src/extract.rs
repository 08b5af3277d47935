//! Typed extraction: bind object members or array elements into typed
//! variables.
//!
//! A request is an ordered sequence of descriptors, each pairing a location
//! (field name or position) with a `&mut` output slot. Descriptors are
//! processed in order and the first failure stops the call; slots bound
//! before the failure keep their new values, later slots are untouched.
//!
//! | entry point           | source  | descriptors        |
//! |-----------------------|---------|--------------------|
//! | [`read_object`]       | object  | [`Field`] by name  |
//! | [`read_params`]       | array   | [`Slot`] by index  |
//! | [`read_object_param`] | array   | [`Field`] on the object at one index |
//!
//! Conversion rules live in [`FromValue`]: integer slots accept integers that
//! fit their width, float slots accept integers or reals, and every other
//! slot wants an exact tag.
//!
//! # Example
//! ```
//! use jsonval::extract::{field, read_object};
//! use jsonval::parse;
//!
//! let value = parse(r#"{"a": 1, "b": false, "c": "Hello there"}"#).unwrap();
//! let (mut a, mut b, mut c) = (0i32, true, String::new());
//! read_object(
//!     value.as_object().unwrap(),
//!     [field("a", &mut a), field("b", &mut b), field("c", &mut c)],
//! )
//! .unwrap();
//! assert_eq!((a, b, c.as_str()), (1, false, "Hello there"));
//! ```

use tracing::debug;

use crate::array::Array;
use crate::error::{JsonError, Location, Result};
use crate::number::Integer;
use crate::object::Object;
use crate::value::Value;

/// Types that can be read out of a [`Value`].
pub trait FromValue: Sized {
    /// Name of the target type in mismatch diagnostics.
    const EXPECTED: &'static str;

    /// Returns `None` when the value's tag or magnitude does not fit.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

macro_rules! integer_from_value {
    ($($t:ty),*) => {$(
        impl FromValue for $t {
            const EXPECTED: &'static str = stringify!($t);

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Integer(n) => <$t>::try_from(n.to_i128()).ok(),
                    _ => None,
                }
            }
        }
    )*};
}

integer_from_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for Integer {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "real";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Real(f) => Some(*f),
            Value::Integer(n) => Some(n.as_f64()),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    const EXPECTED: &'static str = "f32";

    fn from_value(value: &Value) -> Option<Self> {
        let f = f64::from_value(value)?;
        let narrowed = f as f32;
        // Finite reals beyond f32 range would silently become infinite.
        (narrowed.is_finite() || !f.is_finite()).then_some(narrowed)
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for Array {
    const EXPECTED: &'static str = "array";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(a) => Some(a.clone()),
            _ => None,
        }
    }
}

impl FromValue for Object {
    const EXPECTED: &'static str = "object";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(o) => Some(o.clone()),
            _ => None,
        }
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

/// An output slot that a value can be stored into.
///
/// Implemented for every [`FromValue`] type, so `&mut x` coerces to
/// `&mut dyn Bind` for any supported `x`.
pub trait Bind {
    /// Stores a converted copy of `value`, or returns the expected type name.
    fn bind(&mut self, value: &Value) -> std::result::Result<(), &'static str>;
}

impl<T: FromValue> Bind for T {
    fn bind(&mut self, value: &Value) -> std::result::Result<(), &'static str> {
        *self = T::from_value(value).ok_or(T::EXPECTED)?;
        Ok(())
    }
}

/// A named object member and where to put it.
pub struct Field<'a> {
    name: &'a str,
    slot: &'a mut dyn Bind,
}

/// Describe a member to read into `slot`.
pub fn field<'a>(name: &'a str, slot: &'a mut dyn Bind) -> Field<'a> {
    Field { name, slot }
}

/// An array position; positions are implied by order in the request.
pub struct Slot<'a>(&'a mut dyn Bind);

/// Describe the next array element to read into `target`.
pub fn slot(target: &mut dyn Bind) -> Slot<'_> {
    Slot(target)
}

/// Bind object members by name, in request order.
///
/// Fails with `MissingField` for an absent member and `TypeMismatch` for an
/// incompatible one, stopping at the first failure.
pub fn read_object<'a>(object: &Object, fields: impl IntoIterator<Item = Field<'a>>) -> Result<()> {
    let result = bind_fields(object, fields);
    if let Err(err) = &result {
        debug!("read_object failed: {err}");
    }
    result
}

/// Bind array elements `0..k` where `k` is the number of slots requested.
///
/// Extra elements are ignored; running out of elements is
/// `IndexOutOfRange`.
pub fn read_params<'a>(array: &Array, slots: impl IntoIterator<Item = Slot<'a>>) -> Result<()> {
    let result = bind_positions(array, slots);
    if let Err(err) = &result {
        debug!("read_params failed: {err}");
    }
    result
}

/// Bind members of the object stored at `array[index]`.
///
/// An out-of-range index is `IndexOutOfRange` and a non-object element is
/// `NotAnObject`; failures inside the object are reported as by
/// [`read_object`].
pub fn read_object_param<'a>(
    array: &Array,
    index: usize,
    fields: impl IntoIterator<Item = Field<'a>>,
) -> Result<()> {
    let result = array
        .get(index)
        .ok_or(JsonError::IndexOutOfRange {
            index,
            size: array.len(),
        })
        .and_then(|element| match element {
            Value::Object(object) => bind_fields(object, fields),
            other => Err(JsonError::NotAnObject {
                index,
                actual: other.value_type(),
            }),
        });
    if let Err(err) = &result {
        debug!("read_object_param failed: {err}");
    }
    result
}

fn bind_fields<'a>(object: &Object, fields: impl IntoIterator<Item = Field<'a>>) -> Result<()> {
    for Field { name, slot } in fields {
        let value = object
            .get(name)
            .ok_or_else(|| JsonError::MissingField(name.to_string()))?;
        slot.bind(value).map_err(|expected| {
            JsonError::mismatch(Location::Field(name.to_string()), expected, value.value_type())
        })?;
    }
    Ok(())
}

fn bind_positions<'a>(array: &Array, slots: impl IntoIterator<Item = Slot<'a>>) -> Result<()> {
    for (index, Slot(target)) in slots.into_iter().enumerate() {
        let value = array.get(index).ok_or(JsonError::IndexOutOfRange {
            index,
            size: array.len(),
        })?;
        target.bind(value).map_err(|expected| {
            JsonError::mismatch(Location::Index(index), expected, value.value_type())
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;

    #[test]
    fn integer_slots_check_width() {
        let v = Value::from(300);
        assert_eq!(u8::from_value(&v), None);
        assert_eq!(i16::from_value(&v), Some(300));
        assert_eq!(u32::from_value(&Value::from(-1)), None);
        assert_eq!(i64::from_value(&Value::from(u64::MAX)), None);
        assert_eq!(u64::from_value(&Value::from(u64::MAX)), Some(u64::MAX));
    }

    #[test]
    fn float_slots_widen_integers() {
        assert_eq!(f64::from_value(&Value::from(7)), Some(7.0));
        assert_eq!(f32::from_value(&Value::from(0.5)), Some(0.5));
        assert_eq!(f32::from_value(&Value::from(1e300)), None);
        assert_eq!(f32::from_value(&Value::from(-1e300)), None);
        assert_eq!(f32::from_value(&Value::from(f64::from(f32::MAX))), Some(f32::MAX));
        assert_eq!(f64::from_value(&Value::from("7")), None);
    }

    #[test]
    fn integer_slot_rejects_real() {
        assert_eq!(i64::from_value(&Value::from(1.0)), None);
    }

    #[test]
    fn mismatch_names_slot_type() {
        let obj: Object = [("n", Value::from(70000))].into_iter().collect();
        let mut n = 0u16;
        let err = read_object(&obj, [field("n", &mut n)]).unwrap_err();
        assert_eq!(
            err,
            JsonError::TypeMismatch {
                location: Location::Field("n".to_string()),
                expected: "u16",
                actual: ValueType::Integer,
            }
        );
        assert_eq!(n, 0);
    }

    #[test]
    fn value_slot_takes_anything() {
        let arr: Array = [Value::Null, Value::from("x")].into_iter().collect();
        let (mut first, mut second) = (Value::from(1), Value::Null);
        read_params(&arr, [slot(&mut first), slot(&mut second)]).unwrap();
        assert!(first.is_null());
        assert_eq!(second, Value::from("x"));
    }
}
