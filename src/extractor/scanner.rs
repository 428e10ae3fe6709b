// file: src/extractor/scanner.rs
// description: balanced-brace span location with bounded nesting
// reference: internal extraction helpers

/// Locate a balanced `{...}` region starting at the first `{`, tolerating
/// one level of nested brace pairs. Returns byte offsets `(start, end)`
/// with `end` exclusive.
///
/// Known limitation: braces inside JSON string literals are counted like
/// structural braces, so a quoted `{` can distort the span. Callers fall
/// back to [`fallback_span`] when this scanner gives up.
pub fn balanced_object_span(text: &str) -> Option<(usize, usize)> {
    let start = text.find('{')?;
    let mut depth = 0usize;

    for (offset, ch) in text[start..].char_indices() {
        match ch {
            '{' => {
                depth += 1;
                if depth > 2 {
                    // deeper nesting than this scanner tolerates
                    return None;
                }
            }
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some((start, start + offset + ch.len_utf8()));
                }
            }
            _ => {}
        }
    }

    None
}

/// Best-effort span from the first `{` to the last `}`, used when the
/// balanced scan fails.
pub fn fallback_span(text: &str) -> Option<(usize, usize)> {
    let first = text.find('{')?;
    let last = text.rfind('}')?;

    if last > first {
        Some((first, last + 1))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_object() {
        let text = "prefix {\"a\": 1} suffix";
        let (start, end) = balanced_object_span(text).unwrap();
        assert_eq!(&text[start..end], "{\"a\": 1}");
    }

    #[test]
    fn test_one_level_of_nesting() {
        let text = "{\"a\": {\"b\": 1}, \"c\": 2}";
        let (start, end) = balanced_object_span(text).unwrap();
        assert_eq!(&text[start..end], text);
    }

    #[test]
    fn test_two_levels_exceed_tolerance() {
        let text = "{\"a\": {\"b\": {\"c\": 1}}}";
        assert_eq!(balanced_object_span(text), None);

        let (start, end) = fallback_span(text).unwrap();
        assert_eq!(&text[start..end], text);
    }

    #[test]
    fn test_no_braces() {
        assert_eq!(balanced_object_span("plain text"), None);
        assert_eq!(fallback_span("plain text"), None);
    }

    #[test]
    fn test_unclosed_object() {
        assert_eq!(balanced_object_span("{\"a\": 1"), None);
        assert_eq!(fallback_span("{\"a\": 1"), None);
    }

    #[test]
    fn test_close_before_open_fallback() {
        assert_eq!(fallback_span("} then {"), None);
    }

    #[test]
    fn test_multibyte_content() {
        let text = "前置 {\"emoji\": \"🎌\"} 後置";
        let (start, end) = balanced_object_span(text).unwrap();
        assert_eq!(&text[start..end], "{\"emoji\": \"🎌\"}");
    }
}
