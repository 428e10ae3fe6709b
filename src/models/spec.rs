// file: src/models/spec.rs
// description: concept specification loading with tolerant key access
// reference: internal data structures

use crate::error::{PipelineError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A free-form JSON document describing an educational concept. No schema
/// is enforced beyond "well-formed JSON object"; key lookup tolerates the
/// capitalization variants seen in real spec files.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptSpec {
    fields: Map<String, Value>,
}

impl ConceptSpec {
    /// Load a spec from disk. This is the only operation in a run allowed
    /// to fail fatally.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::SpecLoad(format!("cannot read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
            .map_err(|e| PipelineError::SpecLoad(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(content)?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(serde::de::Error::custom(format!(
                "spec root must be a JSON object, got {}",
                match other {
                    Value::Array(_) => "an array",
                    Value::String(_) => "a string",
                    Value::Number(_) => "a number",
                    Value::Bool(_) => "a boolean",
                    _ => "null",
                }
            ))),
        }
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    fn get_str(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.fields.get(*key).and_then(Value::as_str))
    }

    /// Concept name, defaulting like the generation prompts expect.
    pub fn concept(&self) -> &str {
        self.get_str(&["Concept", "concept", "Title", "title"])
            .unwrap_or("Unknown Concept")
    }

    pub fn description(&self) -> Option<&str> {
        self.get_str(&["Description", "description"])
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&Value::Object(self.fields.clone()))
            .unwrap_or_else(|_| "{}".to_string())
    }
}
