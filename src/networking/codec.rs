//! JSON payload encoding and response decoding.
//!
//! Every request body leaves the client with snake_case keys, whatever naming
//! the serialised type uses. Response bodies are normalised the same way
//! before deserialisation, so wire types can be declared with plain Rust
//! field names and still accept camelCase payloads.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::NetworkingError;

/// Serialises request bodies to bytes.
pub trait PayloadEncoder: fmt::Debug + Send + Sync {
    /// Encodes a JSON value into the request body bytes.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkingError::EncodingFailed`] when the value cannot be
    /// serialised.
    fn encode(&self, body: Value) -> Result<Vec<u8>, NetworkingError>;

    /// Returns the `Content-Type` advertised for encoded bodies.
    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

/// JSON encoder that rewrites every object key to snake_case.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCaseJsonEncoder;

impl PayloadEncoder for SnakeCaseJsonEncoder {
    fn encode(&self, body: Value) -> Result<Vec<u8>, NetworkingError> {
        serde_json::to_vec(&snake_case_keys(body)).map_err(|error| {
            NetworkingError::EncodingFailed {
                message: error.to_string(),
            }
        })
    }
}

/// Converts a serialisable model into a JSON value ready for encoding.
///
/// # Errors
///
/// Returns [`NetworkingError::EncodingFailed`] when serialisation fails, for
/// example for maps with non-string keys.
pub fn to_json_value<B: Serialize + ?Sized>(body: &B) -> Result<Value, NetworkingError> {
    serde_json::to_value(body).map_err(|error| NetworkingError::EncodingFailed {
        message: error.to_string(),
    })
}

/// Decodes a JSON body after normalising its keys to snake_case.
///
/// # Errors
///
/// Returns [`NetworkingError::DecodingFailed`] when the bytes are not JSON or
/// do not match the expected shape.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, NetworkingError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|error| NetworkingError::DecodingFailed {
            message: error.to_string(),
        })?;
    serde_json::from_value(snake_case_keys(value)).map_err(|error| {
        NetworkingError::DecodingFailed {
            message: error.to_string(),
        }
    })
}

/// Recursively rewrites object keys to snake_case.
#[must_use]
pub fn snake_case_keys(value: Value) -> Value {
    match value {
        Value::Object(object) => Value::Object(
            object
                .into_iter()
                .map(|(key, nested)| (to_snake_case(&key), snake_case_keys(nested)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(elements) => {
            Value::Array(elements.into_iter().map(snake_case_keys).collect())
        }
        scalar => scalar,
    }
}

/// Converts a camelCase or PascalCase identifier to snake_case.
///
/// Acronyms are kept together (`userID` becomes `user_id`, `HTTPStatus`
/// becomes `http_status`) and keys that are already snake_case are returned
/// unchanged.
#[must_use]
pub fn to_snake_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut output = String::with_capacity(key.len() + 4);

    for (index, current) in chars.iter().copied().enumerate() {
        if current.is_uppercase() {
            let previous = index.checked_sub(1).and_then(|prev| chars.get(prev));
            let next = chars.get(index + 1);
            let starts_word = previous.is_some_and(|prev| {
                prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next.is_some_and(|ch| ch.is_lowercase()))
            });
            if starts_word && !output.ends_with('_') {
                output.push('_');
            }
            output.extend(current.to_lowercase());
        } else {
            output.push(current);
        }
    }

    output
}
