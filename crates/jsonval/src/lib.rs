//! # jsonval
//!
//! An in-memory JSON value model with a parser, a compact writer, and a
//! typed extractor that binds object members or array elements into Rust
//! variables.
//!
//! Every container read is explicit about whether it aliases the stored
//! value or copies it: `as_object_mut` hands out the storage itself, while
//! `to_object` returns an independent deep copy.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonval::{parse, write};
//! use jsonval::extract::{field, read_object};
//!
//! let mut doc = parse(r#"{"name":"Alice","scores":[95,87,92]}"#).unwrap();
//!
//! // Alias: edits land in `doc`.
//! doc.as_object_mut().unwrap()["active"] = true.into();
//! assert_eq!(write(&doc), r#"{"name":"Alice","scores":[95,87,92],"active":true}"#);
//!
//! // Typed extraction, fail-fast.
//! let (mut name, mut active) = (String::new(), false);
//! read_object(doc.as_object().unwrap(), [field("name", &mut name), field("active", &mut active)]).unwrap();
//! assert_eq!((name.as_str(), active), ("Alice", true));
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value` and its checked accessors
//! - [`array`] / [`object`]: the container types
//! - [`number`]: `Integer`, covering `i64::MIN..=u64::MAX`
//! - [`parser`]: JSON text → `Value`
//! - [`writer`]: `Value` → compact or indented JSON text
//! - [`extract`]: `read_object`, `read_params`, `read_object_param`
//! - [`interop`]: serde and `serde_json::Value` conversions
//! - [`rpc`]: `JsonRpcResponse` result envelope
//! - [`error`]: `JsonError` and `Location`

pub mod array;
pub mod error;
pub mod extract;
pub mod interop;
pub mod number;
pub mod object;
pub mod parser;
pub mod rpc;
pub mod value;
pub mod writer;

pub use array::Array;
pub use error::{JsonError, Location, Result};
pub use extract::{field, read_object, read_object_param, read_params, slot, FromValue};
pub use number::Integer;
pub use object::Object;
pub use parser::{parse, parse_bytes};
pub use rpc::JsonRpcResponse;
pub use value::{Value, ValueType};
pub use writer::{write, write_pretty};
