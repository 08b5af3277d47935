//! Error types for parsing, accessing, and extracting JSON values.

use std::fmt;

use thiserror::Error;

use crate::value::ValueType;

/// Where in a document a type or lookup failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A named member of an object.
    Field(String),
    /// A position within an array.
    Index(usize),
    /// The value the accessor was called on directly.
    TopLevel,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Field(name) => write!(f, "field '{name}'"),
            Location::Index(index) => write!(f, "index {index}"),
            Location::TopLevel => f.write_str("top-level value"),
        }
    }
}

/// Errors that can occur while parsing, accessing, or extracting values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JsonError {
    /// The input text was not valid JSON. `offset` is a byte offset into the
    /// input; `line` and `column` are 1-based (column counts characters).
    #[error("JSON parse error at line {line}, column {column} (offset {offset}): {message}")]
    Parse {
        offset: usize,
        line: usize,
        column: usize,
        message: String,
    },

    /// A value was read as a type its tag (or magnitude) does not allow.
    #[error("{location}: expected {expected}, got {actual}")]
    TypeMismatch {
        location: Location,
        expected: &'static str,
        actual: ValueType,
    },

    /// Object extraction asked for a member the object does not have.
    #[error("missing field '{0}'")]
    MissingField(String),

    /// Array extraction asked for a position past the end of the array.
    #[error("index {index} out of range for array of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Object-at-index extraction found something other than an object.
    #[error("index {index}: expected object, got {actual}")]
    NotAnObject { index: usize, actual: ValueType },
}

impl JsonError {
    pub(crate) fn mismatch(location: Location, expected: &'static str, actual: ValueType) -> Self {
        JsonError::TypeMismatch {
            location,
            expected,
            actual,
        }
    }

    /// Returns true for errors produced by the parser.
    pub fn is_parse(&self) -> bool {
        matches!(self, JsonError::Parse { .. })
    }
}

/// Convenience alias used throughout jsonval.
pub type Result<T> = std::result::Result<T, JsonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_field_and_types() {
        let err = JsonError::mismatch(
            Location::Field("b".to_string()),
            "boolean",
            ValueType::String,
        );
        assert_eq!(err.to_string(), "field 'b': expected boolean, got string");
    }

    #[test]
    fn location_display() {
        assert_eq!(Location::Index(3).to_string(), "index 3");
        assert_eq!(Location::TopLevel.to_string(), "top-level value");
    }
}
