// file: src/extractor/patterns.rs
// description: compiled regex patterns for locating HTML markers in model output
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A doctype declaration, any capitalization.
    pub static ref DOCTYPE_OPEN: Regex =
        Regex::new(r"(?i)<!doctype").expect("Invalid doctype pattern");

    /// An opening `<html` tag, any capitalization.
    pub static ref HTML_OPEN: Regex =
        Regex::new(r"(?i)<html").expect("Invalid html-open pattern");

    /// A closing `</html>` tag, any capitalization.
    pub static ref HTML_CLOSE: Regex =
        Regex::new(r"(?i)</html>").expect("Invalid html-close pattern");

    /// Text that begins as an HTML document after optional whitespace.
    pub static ref DOCUMENT_PREFIX: Regex =
        Regex::new(r"^\s*(?i:<!doctype|<html)").expect("Invalid document-prefix pattern");

    /// Markers that identify a failed-JSON candidate as embedded HTML.
    pub static ref HTML_MARKER: Regex =
        Regex::new(r"(?i)<html|<!doctype|<style").expect("Invalid html-marker pattern");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_case_insensitive() {
        assert!(DOCTYPE_OPEN.is_match("<!DOCTYPE html>"));
        assert!(DOCTYPE_OPEN.is_match("<!doctype html>"));
        assert!(HTML_CLOSE.is_match("</HTML>"));
        assert!(HTML_MARKER.is_match("before <STYLE> after"));
    }

    #[test]
    fn test_document_prefix_allows_leading_whitespace() {
        assert!(DOCUMENT_PREFIX.is_match("  \n<!doctype html>"));
        assert!(DOCUMENT_PREFIX.is_match("<HTML lang=\"en\">"));
        assert!(!DOCUMENT_PREFIX.is_match("text before <html>"));
    }
}
