// file: src/models/stage.rs
// description: pipeline stage roster and per-stage run outcomes
// reference: internal data structures

use crate::models::payload::{ExpectedShape, ExtractedPayload};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed stage sequence of one generation run. Declaration order is
/// execution order; `Ord` follows it so state maps iterate in run order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Planner,
    Creator,
    Bugfix,
    StudentInteraction,
    IncorporateFeedback,
    Review,
}

impl Stage {
    pub const SEQUENCE: [Stage; 6] = [
        Stage::Planner,
        Stage::Creator,
        Stage::Bugfix,
        Stage::StudentInteraction,
        Stage::IncorporateFeedback,
        Stage::Review,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Planner => "planner",
            Stage::Creator => "creator",
            Stage::Bugfix => "bugfix",
            Stage::StudentInteraction => "student_interaction",
            Stage::IncorporateFeedback => "incorporate_feedback",
            Stage::Review => "review",
        }
    }

    /// 1-based position used for artifact file prefixes.
    pub fn order(&self) -> usize {
        Stage::SEQUENCE
            .iter()
            .position(|stage| stage == self)
            .map(|index| index + 1)
            .unwrap_or(0)
    }

    /// The creator answers with a full HTML document; every other stage is
    /// asked for a JSON object.
    pub fn expected(&self) -> ExpectedShape {
        match self {
            Stage::Creator => ExpectedShape::Document,
            _ => ExpectedShape::Structured,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    Success(ExtractedPayload),
    Failure(String),
}

/// Outcome of running one stage. Persisted as an artifact whether the
/// stage succeeded or not.
#[derive(Debug, Clone, PartialEq)]
pub struct StageResult {
    pub stage: Stage,
    pub outcome: StageOutcome,
}

impl StageResult {
    pub fn success(stage: Stage, payload: ExtractedPayload) -> Self {
        Self {
            stage,
            outcome: StageOutcome::Success(payload),
        }
    }

    pub fn failure(stage: Stage, error: impl Into<String>) -> Self {
        Self {
            stage,
            outcome: StageOutcome::Failure(error.into()),
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, StageOutcome::Success(_))
    }

    pub fn payload(&self) -> Option<&ExtractedPayload> {
        match &self.outcome {
            StageOutcome::Success(payload) => Some(payload),
            StageOutcome::Failure(_) => None,
        }
    }

    pub fn error_text(&self) -> Option<&str> {
        match &self.outcome {
            StageOutcome::Failure(text) => Some(text),
            StageOutcome::Success(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_order_is_one_based() {
        assert_eq!(Stage::Planner.order(), 1);
        assert_eq!(Stage::Review.order(), 6);
    }

    #[test]
    fn test_expected_shapes() {
        assert_eq!(Stage::Creator.expected(), ExpectedShape::Document);
        assert_eq!(Stage::Planner.expected(), ExpectedShape::Structured);
        assert_eq!(Stage::Review.expected(), ExpectedShape::Structured);
    }

    #[test]
    fn test_stage_names_are_filename_safe() {
        for stage in Stage::SEQUENCE {
            assert!(stage.name().chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }

    #[test]
    fn test_stage_result_accessors() {
        let ok = StageResult::success(
            Stage::Planner,
            ExtractedPayload::Document("<html></html>".to_string()),
        );
        assert!(ok.succeeded());
        assert!(ok.payload().is_some());
        assert!(ok.error_text().is_none());

        let failed = StageResult::failure(Stage::Creator, "provider timeout");
        assert!(!failed.succeeded());
        assert_eq!(failed.error_text(), Some("provider timeout"));
    }
}
