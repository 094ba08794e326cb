use serde_json::Value;

/// Response body returned on success.
///
/// No shape validation is performed; callers deserialize as needed.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Decodes a raw body. In JSON mode a body that does not parse as JSON
    /// (including an empty one) is kept as text.
    pub(crate) fn decode(raw: String, json: bool) -> Self {
        if !json {
            return Payload::Text(raw);
        }
        match serde_json::from_str(&raw) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(raw),
        }
    }

    /// Body as it appears in an error response: structured values are
    /// re-serialized compactly, strings are kept as-is.
    pub(crate) fn into_error_body(self) -> String {
        match self {
            Payload::Json(Value::String(text)) => text,
            Payload::Json(value) => value.to_string(),
            Payload::Text(text) => text,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Payload::Json(_))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Json(_) => None,
            Payload::Text(text) => Some(text),
        }
    }

    /// Converts into a JSON value; text becomes a JSON string.
    pub fn into_json(self) -> Value {
        match self {
            Payload::Json(value) => value,
            Payload::Text(text) => Value::String(text),
        }
    }
}
