//! `Value` → JSON text.
//!
//! [`write`] produces the compact canonical form: no whitespace between
//! tokens, object members in insertion order. The same tree always writes to
//! the same bytes, and the output parses back to an equal tree:
//!
//! - integers are written exactly, with no decimal point or exponent;
//! - reals use Rust's shortest round-trip formatting and always carry a `.`
//!   or an exponent, so they read back as reals;
//! - non-finite reals have no JSON spelling and are written as `null`.
//!
//! [`write_pretty`] is the same output indented by two spaces per level.
//!
//! # Example
//! ```
//! use jsonval::{write, Object, Value};
//! let mut obj = Object::new();
//! obj["a"] = Value::from("Hello");
//! obj["c"] = Value::from(25);
//! assert_eq!(write(&Value::from(obj)), r#"{"a":"Hello","c":25}"#);
//! ```

use crate::array::Array;
use crate::object::Object;
use crate::value::Value;

/// Write a value as compact JSON.
pub fn write(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, None, 0, &mut out);
    out
}

/// Write a value as JSON indented by two spaces per nesting level.
pub fn write_pretty(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, Some("  "), 0, &mut out);
    out
}

/// Dispatch on the variant. `indent` is `None` for compact output.
fn write_value(value: &Value, indent: Option<&str>, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Real(f) => write_real(*f, out),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => write_array(items, indent, depth, out),
        Value::Object(members) => write_object(members, indent, depth, out),
    }
}

fn write_array(items: &Array, indent: Option<&str>, depth: usize, out: &mut String) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        newline(indent, depth + 1, out);
        write_value(item, indent, depth + 1, out);
    }
    newline(indent, depth, out);
    out.push(']');
}

fn write_object(members: &Object, indent: Option<&str>, depth: usize, out: &mut String) {
    if members.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push('{');
    for (i, (key, value)) in members.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        newline(indent, depth + 1, out);
        write_string(key, out);
        out.push(':');
        if indent.is_some() {
            out.push(' ');
        }
        write_value(value, indent, depth + 1, out);
    }
    newline(indent, depth, out);
    out.push('}');
}

/// Line break plus indentation in pretty mode; nothing in compact mode.
fn newline(indent: Option<&str>, depth: usize, out: &mut String) {
    if let Some(unit) = indent {
        out.push('\n');
        for _ in 0..depth {
            out.push_str(unit);
        }
    }
}

fn write_real(f: f64, out: &mut String) {
    if !f.is_finite() {
        out.push_str("null");
        return;
    }
    // `{:?}` is shortest round-trip and always includes `.` or an exponent.
    out.push_str(&format!("{f:?}"));
}

/// Emit a quoted, escaped string. Non-ASCII text is written through as UTF-8.
fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if u32::from(c) < 0x20 => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
}
