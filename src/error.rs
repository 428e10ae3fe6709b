// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Failures produced while turning raw model output into a payload.
///
/// Every variant carries enough text to be persisted as a stage artifact;
/// none of them should escape the stage boundary unhandled.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("model returned empty content")]
    EmptyResponse,

    #[error("could not find a JSON object in response; first chars: {snippet}")]
    NoJsonFound { snippet: String },

    #[error("JSON decode failed: {message}; snippet: {snippet}")]
    JsonDecode { message: String, snippet: String },
}

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The only fatal error: a run cannot start without a concept spec.
    #[error("failed to load concept spec: {0}")]
    SpecLoad(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("provider invocation failed: {0}")]
    Invocation(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    /// Recoverable errors degrade the run; fatal ones abort it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PipelineError::SpecLoad(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_spec_load_is_fatal() {
        assert!(PipelineError::SpecLoad("missing".to_string()).is_fatal());
        assert!(!PipelineError::Invocation("timeout".to_string()).is_fatal());
        assert!(!PipelineError::Extraction(ExtractError::EmptyResponse).is_fatal());
    }

    #[test]
    fn test_extract_error_display_carries_snippet() {
        let err = ExtractError::JsonDecode {
            message: "expected value at line 1".to_string(),
            snippet: "not json".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("expected value"));
        assert!(text.contains("not json"));
    }
}
