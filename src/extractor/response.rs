// file: src/extractor/response.rs
// description: tolerant extraction of JSON objects or HTML documents from model output
// reference: internal extraction core

use crate::error::{ExtractError, ExtractResult};
use crate::extractor::patterns::{
    DOCTYPE_OPEN, DOCUMENT_PREFIX, HTML_CLOSE, HTML_MARKER, HTML_OPEN,
};
use crate::extractor::scanner;
use crate::models::payload::{ExpectedShape, ExtractedPayload, RawModelResponse};
use serde_json::Value;
use tracing::debug;

const DEFAULT_SNIPPET_LIMIT: usize = 300;

/// Turns unpredictable completion-provider text into a structured mapping
/// or a best-effort HTML document. Ugly formatting (markdown fences,
/// prose around the payload, HTML where JSON was requested) is tolerated;
/// only the genuinely hopeless cases fail, and then always with a typed
/// error the stage can persist.
#[derive(Debug, Clone)]
pub struct ResponseExtractor {
    snippet_limit: usize,
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self {
            snippet_limit: DEFAULT_SNIPPET_LIMIT,
        }
    }
}

impl ResponseExtractor {
    pub fn new(snippet_limit: usize) -> Self {
        Self {
            snippet_limit: snippet_limit.max(1),
        }
    }

    pub fn extract(
        &self,
        raw: &RawModelResponse,
        expected: ExpectedShape,
    ) -> ExtractResult<ExtractedPayload> {
        let flattened = raw.flatten();
        let trimmed = flattened.trim();

        if trimmed.is_empty() {
            return Err(ExtractError::EmptyResponse);
        }

        let text = strip_fence(trimmed);

        if expected == ExpectedShape::Document || DOCUMENT_PREFIX.is_match(text) {
            if let Some(document) = document_span(text) {
                debug!("extracted HTML document ({} bytes)", document.len());
                return Ok(ExtractedPayload::Document(document.to_string()));
            }
            // no document marker anywhere; some providers wrap HTML in a
            // JSON property, so try structured extraction before failing
        }

        self.extract_structured(text)
    }

    fn extract_structured(&self, text: &str) -> ExtractResult<ExtractedPayload> {
        let candidate = match scanner::balanced_object_span(text)
            .or_else(|| scanner::fallback_span(text))
        {
            Some((start, end)) => &text[start..end],
            None => {
                if DOCTYPE_OPEN.is_match(text) || HTML_OPEN.is_match(text) {
                    debug!("no JSON object found, treating whole response as HTML");
                    return Ok(ExtractedPayload::Document(text.to_string()));
                }
                return Err(ExtractError::NoJsonFound {
                    snippet: self.snippet(text),
                });
            }
        };

        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Object(map)) => Ok(ExtractedPayload::Structured(map)),
            Ok(_) => Err(ExtractError::JsonDecode {
                message: "candidate parsed but is not a JSON object".to_string(),
                snippet: self.snippet(candidate),
            }),
            Err(parse_error) => {
                // a common provider failure mode is raw HTML where a JSON
                // wrapper was requested
                if HTML_MARKER.is_match(candidate) {
                    debug!("JSON decode failed on HTML-looking candidate, reinterpreting");
                    return Ok(ExtractedPayload::Document(candidate.to_string()));
                }
                Err(ExtractError::JsonDecode {
                    message: parse_error.to_string(),
                    snippet: self.snippet(candidate),
                })
            }
        }
    }

    fn snippet(&self, text: &str) -> String {
        let mut end = self.snippet_limit.min(text.len());
        while end < text.len() && !text.is_char_boundary(end) {
            end -= 1;
        }
        text[..end].replace('\n', "\\n")
    }
}

/// Strip a leading triple-backtick fence, dropping a `json`/`html`
/// language tag line only when it genuinely reads as one.
fn strip_fence(text: &str) -> &str {
    if !text.starts_with("```") {
        return text;
    }

    let inner = text.trim_matches('`').trim();

    if let Some((first_line, rest)) = inner.split_once('\n') {
        let tag = first_line.trim();
        if tag.eq_ignore_ascii_case("json") || tag.eq_ignore_ascii_case("html") {
            return rest.trim_start();
        }
    }

    inner
}

/// Document span: from the first doctype-or-`<html` marker (whichever
/// appears first) to the end of the last `</html>`, or to end of input
/// when the closing tag is missing.
fn document_span(text: &str) -> Option<&str> {
    let doctype_at = DOCTYPE_OPEN.find(text).map(|m| m.start());
    let html_at = HTML_OPEN.find(text).map(|m| m.start());

    let start = match (doctype_at, html_at) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };

    let end = HTML_CLOSE
        .find_iter(text)
        .last()
        .map(|m| m.end())
        .filter(|end| *end > start)
        .unwrap_or(text.len());

    Some(&text[start..end])
}
