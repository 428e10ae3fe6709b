// file: src/models/verdict.rs
// description: review verdict parsing and the approval policy
// reference: internal data structures

use crate::models::payload::ExtractedPayload;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Terminal review outcome: named numeric scores, the model's own pass
/// claim, and the changes it asked for. The model's `pass` flag is kept
/// for inspection only; approval is computed by [`ApprovalPolicy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub scores: BTreeMap<String, f64>,
    pub model_pass: bool,
    pub required_changes: Vec<String>,
}

impl Verdict {
    /// Tolerant parse from a structured payload. Non-numeric scores are
    /// skipped, missing sections default to empty; a document payload
    /// yields no verdict.
    pub fn from_payload(payload: &ExtractedPayload) -> Option<Self> {
        let map = payload.as_structured()?;

        let scores = map
            .get("scores")
            .and_then(|value| value.as_object())
            .map(|scores| {
                scores
                    .iter()
                    .filter_map(|(name, value)| value.as_f64().map(|n| (name.clone(), n)))
                    .collect()
            })
            .unwrap_or_default();

        let model_pass = map.get("pass").and_then(|value| value.as_bool()).unwrap_or(false);

        let required_changes = map
            .get("required_changes")
            .and_then(|value| value.as_array())
            .map(|changes| {
                changes
                    .iter()
                    .filter_map(|change| change.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            scores,
            model_pass,
            required_changes,
        })
    }

    pub fn mean_score(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.values().sum::<f64>() / self.scores.len() as f64
    }
}

/// Pure approval rule over the verdict scores: every score at or above the
/// floor and the mean at or above the (higher) mean floor. No scores means
/// no approval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApprovalPolicy {
    pub score_floor: f64,
    pub mean_floor: f64,
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self {
            score_floor: 3.0,
            mean_floor: 4.0,
        }
    }
}

impl ApprovalPolicy {
    pub fn new(score_floor: f64, mean_floor: f64) -> Self {
        Self {
            score_floor,
            mean_floor,
        }
    }

    pub fn evaluate(&self, scores: &BTreeMap<String, f64>) -> bool {
        if scores.is_empty() {
            return false;
        }

        let all_above_floor = scores.values().all(|score| *score >= self.score_floor);
        let mean = scores.values().sum::<f64>() / scores.len() as f64;

        all_above_floor && mean >= self.mean_floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn verdict_payload(value: serde_json::Value) -> ExtractedPayload {
        match value {
            serde_json::Value::Object(map) => ExtractedPayload::Structured(map),
            _ => panic!("verdict payload must be an object"),
        }
    }

    fn scores(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_parse_full_verdict() {
        let payload = verdict_payload(json!({
            "scores": {"clarity": 4, "interactivity": 5, "reliability": 4.5},
            "pass": true,
            "required_changes": ["shrink header"]
        }));

        let verdict = Verdict::from_payload(&payload).unwrap();
        assert_eq!(verdict.scores.len(), 3);
        assert!(verdict.model_pass);
        assert_eq!(verdict.required_changes, vec!["shrink header".to_string()]);
        assert!((verdict.mean_score() - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_skips_non_numeric_scores() {
        let payload = verdict_payload(json!({
            "scores": {"clarity": 4, "vibe": "good"},
        }));

        let verdict = Verdict::from_payload(&payload).unwrap();
        assert_eq!(verdict.scores.len(), 1);
        assert!(!verdict.model_pass);
        assert!(verdict.required_changes.is_empty());
    }

    #[test]
    fn test_document_payload_has_no_verdict() {
        let payload = ExtractedPayload::Document("<html></html>".to_string());
        assert!(Verdict::from_payload(&payload).is_none());
    }

    #[test]
    fn test_policy_approves_floor_and_mean() {
        let policy = ApprovalPolicy::default();
        assert!(policy.evaluate(&scores(&[("a", 4.0), ("b", 4.0), ("c", 5.0)])));
    }

    #[test]
    fn test_policy_rejects_single_low_score() {
        let policy = ApprovalPolicy::default();
        // mean is 4.33 but one criterion sits below the floor
        assert!(!policy.evaluate(&scores(&[("a", 2.0), ("b", 5.0), ("c", 5.0), ("d", 5.333)])));
    }

    #[test]
    fn test_policy_rejects_low_mean() {
        let policy = ApprovalPolicy::default();
        assert!(!policy.evaluate(&scores(&[("a", 3.0), ("b", 3.0), ("c", 3.0)])));
    }

    #[test]
    fn test_policy_rejects_empty_scores() {
        let policy = ApprovalPolicy::default();
        assert!(!policy.evaluate(&BTreeMap::new()));
    }
}
