// file: src/models/payload.rs
// description: raw provider responses and the tagged extraction payload
// reference: internal data structures

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One element of a multi-part provider response. Providers that stream or
/// mix modalities return a list of parts; only text parts carry content we
/// care about, everything else is rendered through its JSON string form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsePart {
    Text { text: String },
    Data(Value),
}

/// Opaque text returned by a completion provider for one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawModelResponse {
    Text(String),
    Parts(Vec<ResponsePart>),
}

impl RawModelResponse {
    /// Collapse the response into a single string.
    pub fn flatten(&self) -> String {
        match self {
            RawModelResponse::Text(text) => text.clone(),
            RawModelResponse::Parts(parts) => parts
                .iter()
                .map(|part| match part {
                    ResponsePart::Text { text } => text.clone(),
                    ResponsePart::Data(value) => value.to_string(),
                })
                .collect(),
        }
    }
}

impl From<String> for RawModelResponse {
    fn from(text: String) -> Self {
        RawModelResponse::Text(text)
    }
}

impl From<&str> for RawModelResponse {
    fn from(text: &str) -> Self {
        RawModelResponse::Text(text.to_string())
    }
}

/// The shape a stage expects its response to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedShape {
    Structured,
    Document,
}

/// Result of one extraction attempt. Exactly one variant per attempt,
/// never a hybrid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExtractedPayload {
    /// A parsed JSON object.
    Structured(Map<String, Value>),
    /// Text assumed to be an HTML document.
    Document(String),
}

impl ExtractedPayload {
    pub fn as_structured(&self) -> Option<&Map<String, Value>> {
        match self {
            ExtractedPayload::Structured(map) => Some(map),
            ExtractedPayload::Document(_) => None,
        }
    }

    pub fn as_document(&self) -> Option<&str> {
        match self {
            ExtractedPayload::Document(text) => Some(text),
            ExtractedPayload::Structured(_) => None,
        }
    }

    /// String-typed field of a structured payload, `None` for anything else.
    /// Absent fields default at the call site; looking one up never panics.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.as_structured()?.get(key)?.as_str()
    }

    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.as_structured()?.get(key)?.as_bool()
    }

    pub fn to_value(&self) -> Value {
        match self {
            ExtractedPayload::Structured(map) => Value::Object(map.clone()),
            ExtractedPayload::Document(text) => Value::String(text.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_text() {
        let raw = RawModelResponse::Text("hello".to_string());
        assert_eq!(raw.flatten(), "hello");
    }

    #[test]
    fn test_flatten_parts_joins_text_and_renders_data() {
        let raw = RawModelResponse::Parts(vec![
            ResponsePart::Text {
                text: "{\"a\":".to_string(),
            },
            ResponsePart::Text {
                text: " 1}".to_string(),
            },
        ]);
        assert_eq!(raw.flatten(), "{\"a\": 1}");

        let mixed = RawModelResponse::Parts(vec![ResponsePart::Data(json!(42))]);
        assert_eq!(mixed.flatten(), "42");
    }

    #[test]
    fn test_str_field_on_structured() {
        let mut map = Map::new();
        map.insert("index.html".to_string(), json!("<html></html>"));
        let payload = ExtractedPayload::Structured(map);

        assert_eq!(payload.str_field("index.html"), Some("<html></html>"));
        assert_eq!(payload.str_field("missing"), None);
    }

    #[test]
    fn test_str_field_on_document_is_none() {
        let payload = ExtractedPayload::Document("<html></html>".to_string());
        assert_eq!(payload.str_field("index.html"), None);
        assert_eq!(payload.as_document(), Some("<html></html>"));
    }
}
