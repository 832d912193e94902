//! Line codec
//!
//! One JSON object per line in each direction. Decoding is permissive about
//! the request shape; encoding never fails from the caller's point of view.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::params;
use super::types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Pre-serialized reply used when even the internal-error response cannot be
/// encoded.
pub const FALLBACK_LINE: &str =
    r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"Internal error"}}"#;

/// Why a line could not be turned into a request.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid UTF-8 in request line")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode one line of text into a request.
///
/// Any JSON object is accepted. A missing or wrongly typed `jsonrpc` becomes
/// an empty string, a missing `method` becomes an empty string and a
/// non-string `method` becomes its JSON text. A non-object `params` becomes
/// an empty map. Either way the request still reaches dispatch and its id
/// is echoed.
pub fn decode(line: &str) -> Result<JsonRpcRequest, DecodeError> {
    let value: Value = serde_json::from_str(line)?;
    let Value::Object(fields) = value else {
        return Err(DecodeError::NotAnObject(kind_of(&value)));
    };

    Ok(JsonRpcRequest {
        jsonrpc: params::string_or(&fields, "jsonrpc", "").value.to_string(),
        id: fields.get("id").cloned(),
        method: method_name(fields.get("method")),
        params: params::object_or_empty(&fields, "params").into_value(),
    })
}

fn method_name(method: Option<&Value>) -> String {
    match method {
        None => String::new(),
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
    }
}

/// Decode raw line bytes, as read from the transport.
pub fn decode_bytes(line: &[u8]) -> Result<JsonRpcRequest, DecodeError> {
    decode(std::str::from_utf8(line)?)
}

/// Encode a request as a line (without the trailing newline).
pub fn encode_request(request: &JsonRpcRequest) -> Result<String, serde_json::Error> {
    serde_json::to_string(request)
}

/// The encoded form of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub line: String,
    /// Serialization error that forced a fallback line, if any.
    pub failure: Option<String>,
}

/// Encode a response as a line (without the trailing newline).
pub fn encode(response: &JsonRpcResponse) -> Encoded {
    encode_with(&response.id, response)
}

/// Encode any serializable message answering the request `id`.
///
/// If `message` cannot be serialized, an internal-error response for the same
/// id is encoded instead, and failing that [`FALLBACK_LINE`].
pub fn encode_with<T: Serialize + ?Sized>(id: &Value, message: &T) -> Encoded {
    match serde_json::to_string(message) {
        Ok(line) => Encoded {
            line,
            failure: None,
        },
        Err(e) => {
            let failure = e.to_string();
            let replacement = JsonRpcResponse::error(
                id.clone(),
                JsonRpcError::internal_error("failed to serialize response"),
            );
            let line = serde_json::to_string(&replacement)
                .unwrap_or_else(|_| FALLBACK_LINE.to_string());
            Encoded {
                line,
                failure: Some(failure),
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
