//! JSON-RPC response envelope.
//!
//! A response carries either a `result` payload or an `error` object, and is
//! rendered as a JSON object with the matching member. The payload is any
//! already-built [`Value`]; the envelope never inspects it.

use std::fmt;

use crate::object::Object;
use crate::value::Value;

/// Error member of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// A response holding a result, an error, or neither (yet).
///
/// Setting one side clears the other, so a response never carries both.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the result payload, discarding any error.
    pub fn set_result(&mut self, result: impl Into<Value>) {
        self.result = Some(result.into());
        self.error = None;
    }

    /// Stores an error, discarding any result.
    pub fn set_error(&mut self, code: i64, message: impl Into<String>) {
        self.error = Some(RpcError {
            code,
            message: message.into(),
        });
        self.result = None;
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&RpcError> {
        self.error.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Builds the wire object. An empty response renders as `{"result":null}`.
    pub fn to_value(&self) -> Value {
        let mut envelope = Object::new();
        match &self.error {
            Some(err) => {
                let mut body = Object::new();
                body.insert("code", err.code);
                body.insert("message", err.message.as_str());
                envelope.insert("error", body);
            }
            None => {
                envelope.insert("result", self.result.clone().unwrap_or_default());
            }
        }
        Value::Object(envelope)
    }
}

impl fmt::Display for JsonRpcResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::writer::write(&self.to_value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_envelope() {
        let mut resp = JsonRpcResponse::new();
        let payload: Object = [("a", 1)].into_iter().collect();
        resp.set_result(payload);
        assert_eq!(resp.to_string(), r#"{"result":{"a":1}}"#);
        assert_eq!(resp.result().unwrap().as_object().unwrap()["a"], Value::from(1));
    }

    #[test]
    fn error_replaces_result() {
        let mut resp = JsonRpcResponse::new();
        resp.set_result(true);
        resp.set_error(-32602, "Invalid params");
        assert!(resp.result().is_none());
        assert!(resp.is_error());
        assert_eq!(
            resp.to_string(),
            r#"{"error":{"code":-32602,"message":"Invalid params"}}"#
        );
    }

    #[test]
    fn empty_response_has_null_result() {
        assert_eq!(JsonRpcResponse::new().to_string(), r#"{"result":null}"#);
    }
}
