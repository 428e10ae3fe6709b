// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_spec_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(PipelineError::Validation(format!(
                "Spec file does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(PipelineError::Validation(format!(
                "Spec path is not a file: {}",
                path.display()
            )));
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(()),
            _ => Err(PipelineError::Validation(format!(
                "Spec file is not a JSON file: {}",
                path.display()
            ))),
        }
    }

    /// Truncate to at most `max_length` bytes without splitting a character.
    pub fn truncate_text(text: &str, max_length: usize) -> String {
        if text.len() <= max_length {
            return text.to_string();
        }

        let mut end = max_length;
        while end > 0 && !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_spec_path() {
        let temp = TempDir::new().unwrap();
        let spec_path = temp.path().join("spec.json");
        fs::write(&spec_path, "{}").unwrap();

        assert!(Validator::validate_spec_path(&spec_path).is_ok());
        assert!(Validator::validate_spec_path(Path::new("/nonexistent/spec.json")).is_err());
    }

    #[test]
    fn test_validate_spec_path_requires_json_extension() {
        let temp = TempDir::new().unwrap();
        let text_path = temp.path().join("spec.txt");
        fs::write(&text_path, "{}").unwrap();

        assert!(Validator::validate_spec_path(&text_path).is_err());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
    }

    #[test]
    fn test_truncate_text_respects_char_boundaries() {
        let text = "héllo wörld with ümlauts";
        let truncated = Validator::truncate_text(text, 3);
        assert!(truncated.ends_with("..."));
        // must not panic on the multi-byte é at the cut point
    }
}
