//! JSON text → `Value`.
//!
//! The parser walks the input once with an explicit stack of open containers
//! instead of recursing, so nesting depth is limited only by memory. It
//! either returns a complete tree or an error; a partially built tree is
//! never handed back.
//!
//! # Behaviour worth knowing
//!
//! - Integer literals keep their exact magnitude up to `u64::MAX`; literals
//!   outside `i64::MIN..=u64::MAX` fall back to a real.
//! - Reals that would overflow to infinity are rejected.
//! - Duplicate object keys: the last value wins and the key stays where it
//!   first appeared.
//! - Error offsets are byte offsets; line and column are 1-based.

use tracing::debug;

use crate::array::Array;
use crate::error::{JsonError, Result};
use crate::number::Integer;
use crate::object::Object;
use crate::value::Value;

/// Parse a JSON document.
///
/// # Example
/// ```
/// use jsonval::parse;
/// let value = parse(r#"{"a": [1, 2.5, "x"]}"#).unwrap();
/// assert_eq!(value.as_object().unwrap()["a"].as_array().unwrap().len(), 3);
/// ```
pub fn parse(text: &str) -> Result<Value> {
    let result = Parser::new(text).parse_document();
    if let Err(err) = &result {
        debug!("parse failed: {err}");
    }
    result
}

/// Parse a JSON document from raw bytes, rejecting invalid UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> Result<Value> {
    match std::str::from_utf8(bytes) {
        Ok(text) => parse(text),
        Err(e) => {
            let err = error_at(bytes, e.valid_up_to(), "invalid UTF-8");
            debug!("parse failed: {err}");
            Err(err)
        }
    }
}

/// Build a parse error, deriving line and column from the bytes before
/// `offset`.
fn error_at(bytes: &[u8], offset: usize, message: impl Into<String>) -> JsonError {
    let prefix = &bytes[..offset.min(bytes.len())];
    let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = prefix
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |p| p + 1);
    // Count characters, not bytes: skip UTF-8 continuation bytes.
    let column = prefix[line_start..]
        .iter()
        .filter(|&&b| b & 0xC0 != 0x80)
        .count()
        + 1;
    JsonError::Parse {
        offset,
        line,
        column,
        message: message.into(),
    }
}

/// An open container waiting for more members.
enum Frame {
    Array(Array),
    /// Members so far plus the key whose value is being parsed.
    Object(Object, String),
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> JsonError {
        error_at(self.bytes, self.pos, message)
    }

    /// Error for a token that is not what the grammar wants here.
    fn unexpected(&self) -> JsonError {
        match self.text.get(self.pos..).and_then(|rest| rest.chars().next()) {
            None => self.error("unexpected end of input"),
            Some(c) => self.error(format!("unexpected character '{}'", c.escape_debug())),
        }
    }

    /// Like `unexpected`, but names what was expected when input remains.
    fn expected(&self, what: &str) -> JsonError {
        if self.pos >= self.bytes.len() {
            self.error("unexpected end of input")
        } else {
            self.error(format!("expected {what}"))
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
    }

    fn parse_document(mut self) -> Result<Value> {
        let mut stack: Vec<Frame> = Vec::new();

        'value: loop {
            self.skip_whitespace();
            let mut value = match self.peek() {
                Some(b'{') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    if self.peek() == Some(b'}') {
                        self.pos += 1;
                        Value::Object(Object::new())
                    } else {
                        let key = self.parse_key()?;
                        stack.push(Frame::Object(Object::new(), key));
                        continue 'value;
                    }
                }
                Some(b'[') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    if self.peek() == Some(b']') {
                        self.pos += 1;
                        Value::Array(Array::new())
                    } else {
                        stack.push(Frame::Array(Array::new()));
                        continue 'value;
                    }
                }
                Some(b'"') => Value::String(self.parse_string()?),
                Some(b't') => self.parse_literal("true", Value::Bool(true))?,
                Some(b'f') => self.parse_literal("false", Value::Bool(false))?,
                Some(b'n') => self.parse_literal("null", Value::Null)?,
                Some(b'-' | b'0'..=b'9') => self.parse_number()?,
                _ => return Err(self.unexpected()),
            };

            // A value is complete: hand it to its container, closing every
            // container that ends right after it.
            loop {
                self.skip_whitespace();
                let Some(frame) = stack.pop() else {
                    if self.pos < self.bytes.len() {
                        return Err(self.error("trailing characters"));
                    }
                    return Ok(value);
                };
                match frame {
                    Frame::Array(mut items) => {
                        items.push(value);
                        match self.peek() {
                            Some(b',') => {
                                self.pos += 1;
                                stack.push(Frame::Array(items));
                                continue 'value;
                            }
                            Some(b']') => {
                                self.pos += 1;
                                value = Value::Array(items);
                            }
                            _ => return Err(self.expected("',' or ']'")),
                        }
                    }
                    Frame::Object(mut members, key) => {
                        members.insert(key, value);
                        match self.peek() {
                            Some(b',') => {
                                self.pos += 1;
                                self.skip_whitespace();
                                let key = self.parse_key()?;
                                stack.push(Frame::Object(members, key));
                                continue 'value;
                            }
                            Some(b'}') => {
                                self.pos += 1;
                                value = Value::Object(members);
                            }
                            _ => return Err(self.expected("',' or '}'")),
                        }
                    }
                }
            }
        }
    }

    /// Parse `"key"` followed by `:`.
    fn parse_key(&mut self) -> Result<String> {
        if self.peek() != Some(b'"') {
            return Err(self.expected("string key"));
        }
        let key = self.parse_string()?;
        self.skip_whitespace();
        if self.peek() != Some(b':') {
            return Err(self.expected("':'"));
        }
        self.pos += 1;
        Ok(key)
    }

    fn parse_literal(&mut self, word: &str, value: Value) -> Result<Value> {
        if self.bytes[self.pos..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            Ok(value)
        } else {
            Err(self.unexpected())
        }
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.error("invalid number")),
        }

        let mut integral = true;
        if self.peek() == Some(b'.') {
            integral = false;
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error("invalid number"));
            }
            self.skip_digits();
        }
        if let Some(b'e' | b'E') = self.peek() {
            integral = false;
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error("invalid number"));
            }
            self.skip_digits();
        }

        let literal = &self.text[start..self.pos];
        if integral {
            let exact = if literal.starts_with('-') {
                literal.parse::<i64>().ok().map(Integer::from)
            } else {
                literal.parse::<u64>().ok().map(Integer::from)
            };
            if let Some(n) = exact {
                return Ok(Value::Integer(n));
            }
        }
        match literal.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Real(f)),
            _ => Err(error_at(self.bytes, start, "number out of range")),
        }
    }

    /// Parse a string literal starting at the opening quote.
    fn parse_string(&mut self) -> Result<String> {
        let open = self.pos;
        self.pos += 1;
        let mut out = String::new();
        let mut run_start = self.pos;

        loop {
            match self.peek() {
                None => return Err(error_at(self.bytes, open, "unterminated string")),
                Some(b'"') => {
                    out.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    self.parse_escape(&mut out, open)?;
                    run_start = self.pos;
                }
                Some(b) if b < 0x20 => return Err(self.error("control character in string")),
                // Multi-byte UTF-8 sequences never contain '"' or '\\', so
                // stepping a byte at a time keeps run boundaries on chars.
                Some(_) => self.pos += 1,
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String, open: usize) -> Result<()> {
        let Some(b) = self.peek() else {
            return Err(error_at(self.bytes, open, "unterminated string"));
        };
        let c = match b {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => {
                self.pos += 1;
                out.push(self.parse_unicode_escape()?);
                return Ok(());
            }
            _ => return Err(self.error("invalid escape")),
        };
        self.pos += 1;
        out.push(c);
        Ok(())
    }

    /// Parse the `XXXX` of `\uXXXX`, joining a following low surrogate.
    fn parse_unicode_escape(&mut self) -> Result<char> {
        let escape_start = self.pos - 2;
        let first = self.parse_hex4()?;
        let code = match first {
            0xD800..=0xDBFF => {
                if !self.bytes[self.pos..].starts_with(b"\\u") {
                    return Err(error_at(self.bytes, escape_start, "lone surrogate"));
                }
                self.pos += 2;
                let second = self.parse_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(error_at(self.bytes, escape_start, "lone surrogate"));
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(error_at(self.bytes, escape_start, "lone surrogate")),
            other => other,
        };
        char::from_u32(code).ok_or_else(|| error_at(self.bytes, escape_start, "invalid unicode escape"))
    }

    fn parse_hex4(&mut self) -> Result<u32> {
        let bytes = self.bytes;
        let digits = bytes
            .get(self.pos..self.pos + 4)
            .ok_or_else(|| self.error("invalid unicode escape"))?;
        let mut code = 0u32;
        for &d in digits {
            let nibble = char::from(d)
                .to_digit(16)
                .ok_or_else(|| self.error("invalid unicode escape"))?;
            code = code * 16 + nibble;
        }
        self.pos += 4;
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(input: &str) -> String {
        match parse(input) {
            Err(JsonError::Parse { message, .. }) => message,
            other => panic!("expected parse error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn reports_reasons() {
        assert_eq!(message(""), "unexpected end of input");
        assert_eq!(message("[1,]"), "unexpected character ']'");
        assert_eq!(message("{\"a\":1,}"), "expected string key");
        assert_eq!(message("{\"a\" 1}"), "expected ':'");
        assert_eq!(message("[1 2]"), "expected ',' or ']'");
        assert_eq!(message("{\"a\":1 \"b\":2}"), "expected ',' or '}'");
        assert_eq!(message("\"abc"), "unterminated string");
        assert_eq!(message("\"a\u{1}b\""), "control character in string");
        assert_eq!(message(r#""\q""#), "invalid escape");
        assert_eq!(message(r#""\u12G4""#), "invalid unicode escape");
        assert_eq!(message(r#""\uD800""#), "lone surrogate");
        assert_eq!(message(r#""\uDC00""#), "lone surrogate");
        assert_eq!(message("-"), "invalid number");
        assert_eq!(message("1."), "invalid number");
        assert_eq!(message("1e"), "invalid number");
        assert_eq!(message("1e400"), "number out of range");
        assert_eq!(message("true false"), "trailing characters");
        assert_eq!(message("tru"), "unexpected character 't'");
    }

    #[test]
    fn error_position_is_line_and_character_column() {
        let err = parse("{\n  \"é\": tru\n}").unwrap_err();
        match err {
            JsonError::Parse {
                offset,
                line,
                column,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, 8);
                assert_eq!(offset, 10);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_offset() {
        let err = parse_bytes(b"[\"ab\xFFc\"]").unwrap_err();
        assert!(matches!(err, JsonError::Parse { offset: 4, .. }));
    }

    #[test]
    fn surrogate_pair_joins() {
        let v = parse(r#""\uD83D\uDE00""#).unwrap();
        assert_eq!(v.as_str().unwrap(), "\u{1F600}");
    }

    #[test]
    fn integer_range_and_fallback() {
        assert_eq!(
            parse("18446744073709550615").unwrap().as_u64().unwrap(),
            18446744073709550615
        );
        assert_eq!(
            parse("-9223372036854775808").unwrap().as_i64().unwrap(),
            i64::MIN
        );
        assert!(parse("18446744073709551616").unwrap().is_real());
        assert!(parse("-9223372036854775809").unwrap().is_real());
        assert!(parse("-0").unwrap().is_integer());
    }

    #[test]
    fn leading_zero_is_rejected() {
        assert!(parse("01").is_err());
        assert!(parse("[01]").is_err());
    }

    #[test]
    fn duplicate_key_last_wins_first_position() {
        let v = parse(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        let obj = v.as_object().unwrap();
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(obj["a"].as_i64().unwrap(), 3);
    }

    #[test]
    fn very_deep_nesting_parses_and_drops() {
        let depth = 100_000;
        let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let value = parse(&text).unwrap();
        let mut seen = 1;
        let mut current = &value;
        while let Some(inner) = current.as_array().ok().and_then(|a| a.get(0)) {
            seen += 1;
            current = inner;
        }
        assert_eq!(seen, depth);
        drop(value);
    }
}
