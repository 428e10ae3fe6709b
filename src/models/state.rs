// file: src/models/state.rs
// description: per-run pipeline state and the run status machine
// reference: internal data structures

use crate::models::payload::ExtractedPayload;
use crate::models::stage::Stage;
use serde_json::Value;
use std::collections::BTreeMap;

/// State accumulated across one generation run: the most recent payload per
/// stage plus run metadata. Owned exclusively by the orchestrator, mutated
/// once per stage in strict sequence, discarded when the run ends.
///
/// Every accessor degrades to a default when a stage or field is absent;
/// downstream stages must never crash on missing upstream data.
#[derive(Debug, Clone, Default)]
pub struct PipelineState {
    payloads: BTreeMap<Stage, ExtractedPayload>,
    pub concept: String,
    pub iteration: u32,
    pub approved: bool,
}

impl PipelineState {
    pub fn new(concept: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, stage: Stage, payload: ExtractedPayload) {
        self.payloads.insert(stage, payload);
    }

    pub fn payload(&self, stage: Stage) -> Option<&ExtractedPayload> {
        self.payloads.get(&stage)
    }

    pub fn has_payload(&self, stage: Stage) -> bool {
        self.payloads.contains_key(&stage)
    }

    /// Planner blueprint as pretty JSON, `{}` when planning produced
    /// nothing structured.
    pub fn blueprint_json(&self) -> String {
        self.payload(Stage::Planner)
            .and_then(ExtractedPayload::as_structured)
            .map(|map| {
                serde_json::to_string_pretty(&Value::Object(map.clone()))
                    .unwrap_or_else(|_| "{}".to_string())
            })
            .unwrap_or_else(|| "{}".to_string())
    }

    /// The most recent HTML document, preferring later stages. A stage that
    /// answered with a JSON wrapper contributes its `index.html` field; a
    /// wrapper without that field falls through to the previous stage.
    pub fn html(&self) -> Option<&str> {
        for stage in [Stage::IncorporateFeedback, Stage::Bugfix, Stage::Creator] {
            if let Some(payload) = self.payload(stage) {
                if let Some(document) = payload.as_document() {
                    return Some(document);
                }
                if let Some(html) = payload.str_field("index.html") {
                    return Some(html);
                }
            }
        }
        None
    }

    /// Student-interaction payload serialized for the feedback prompt.
    pub fn feedback_text(&self) -> String {
        self.payload(Stage::StudentInteraction)
            .map(|payload| {
                serde_json::to_string_pretty(&payload.to_value())
                    .unwrap_or_else(|_| payload.to_value().to_string())
            })
            .unwrap_or_else(|| "No student feedback was collected for this simulation.".to_string())
    }
}

/// Lifecycle of one run. Only spec loading can abort; every later failure
/// degrades into a completed-but-not-approved run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    NotStarted,
    Running(Stage),
    Completed { approved: bool },
    Aborted(String),
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::NotStarted => write!(f, "not started"),
            RunStatus::Running(stage) => write!(f, "running ({})", stage),
            RunStatus::Completed { approved: true } => write!(f, "completed (approved)"),
            RunStatus::Completed { approved: false } => write!(f, "completed (not approved)"),
            RunStatus::Aborted(reason) => write!(f, "aborted: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn structured(entries: &[(&str, Value)]) -> ExtractedPayload {
        let mut map = Map::new();
        for (key, value) in entries {
            map.insert(key.to_string(), value.clone());
        }
        ExtractedPayload::Structured(map)
    }

    #[test]
    fn test_html_prefers_latest_stage() {
        let mut state = PipelineState::new("Heat");
        state.record(Stage::Creator, ExtractedPayload::Document("<html>v1</html>".to_string()));
        assert_eq!(state.html(), Some("<html>v1</html>"));

        state.record(
            Stage::Bugfix,
            structured(&[("index.html", json!("<html>v2</html>"))]),
        );
        assert_eq!(state.html(), Some("<html>v2</html>"));
    }

    #[test]
    fn test_html_missing_field_falls_through() {
        let mut state = PipelineState::new("Heat");
        state.record(Stage::Creator, ExtractedPayload::Document("<html>v1</html>".to_string()));
        // wrapper without index.html must not shadow the creator output
        state.record(Stage::Bugfix, structured(&[("notes", json!("looks fine"))]));
        assert_eq!(state.html(), Some("<html>v1</html>"));
    }

    #[test]
    fn test_html_empty_state() {
        let state = PipelineState::new("Heat");
        assert_eq!(state.html(), None);
    }

    #[test]
    fn test_blueprint_json_defaults_to_empty_object() {
        let state = PipelineState::new("Heat");
        assert_eq!(state.blueprint_json(), "{}");

        let mut state = PipelineState::new("Heat");
        state.record(Stage::Planner, structured(&[("key_concepts", json!(["heat"]))]));
        assert!(state.blueprint_json().contains("key_concepts"));
    }

    #[test]
    fn test_feedback_text_defaults_when_absent() {
        let state = PipelineState::new("Heat");
        assert!(state.feedback_text().contains("No student feedback"));

        let mut state = PipelineState::new("Heat");
        state.record(
            Stage::StudentInteraction,
            structured(&[("questions", json!([{"question": "Why?"}]))]),
        );
        assert!(state.feedback_text().contains("Why?"));
    }

    #[test]
    fn test_run_status_display() {
        assert_eq!(
            RunStatus::Completed { approved: false }.to_string(),
            "completed (not approved)"
        );
        assert_eq!(RunStatus::Running(Stage::Bugfix).to_string(), "running (bugfix)");
    }
}
