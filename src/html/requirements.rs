// file: src/html/requirements.rs
// description: single-file HTML minimum requirement checks and repairs
// reference: internal output validation

const VIEWPORT_META: &str =
    r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#;

/// Check single-file HTML requirements. Returns one message per missing
/// requirement; an empty list means the document passes.
pub fn check_minimum_requirements(html: &str) -> Vec<String> {
    let lower = html.to_lowercase();
    let mut issues = Vec::new();

    if !lower.contains("<!doctype html>") {
        issues.push("Missing DOCTYPE declaration.".to_string());
    }

    if !lower.contains(r#"<meta name="viewport""#) {
        issues.push("Missing viewport meta tag for mobile.".to_string());
    }

    let has_controls = ["<input", "<button", "<select", "onclick", "addeventlistener"]
        .iter()
        .any(|control| lower.contains(control));
    if !has_controls {
        issues.push("No interactive controls found.".to_string());
    }

    if !lower.contains("<style>") && !lower.contains("style=") {
        issues.push("No styling found (inline or embedded).".to_string());
    }

    issues
}

/// Apply minimal fixes for missing basics: inject a viewport meta tag into
/// the head (or a new head right after the html tag) and prepend a DOCTYPE
/// when absent. Anything beyond that is the bug-fix stage's job.
pub fn enforce_minimum_requirements(html: &str) -> String {
    let mut html = html.to_string();
    let lower = html.to_lowercase();

    if !lower.contains(r#"<meta name="viewport""#) {
        if let Some(head_at) = lower.find("<head>") {
            let insert_at = head_at + "<head>".len();
            html.insert_str(insert_at, &format!("\n    {}", VIEWPORT_META));
        } else if let Some(html_at) = lower.find("<html>") {
            let insert_at = html_at + "<html>".len();
            html.insert_str(
                insert_at,
                &format!("\n<head>\n    {}\n</head>", VIEWPORT_META),
            );
        }
        // a fragment with neither tag is left for the doctype fix below
    }

    if !html.to_lowercase().contains("<!doctype") {
        html = format!("<!DOCTYPE html>\n{}", html);
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_PAGE: &str = concat!(
        "<!DOCTYPE html>\n<html>\n<head>\n",
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        "    <style>body { margin: 0; }</style>\n</head>\n",
        "<body><button onclick=\"go()\">Start</button></body>\n</html>",
    );

    #[test]
    fn test_complete_page_has_no_issues() {
        assert!(check_minimum_requirements(GOOD_PAGE).is_empty());
    }

    #[test]
    fn test_missing_everything() {
        let issues = check_minimum_requirements("<p>just text</p>");
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn test_doctype_check_is_case_insensitive() {
        let issues = check_minimum_requirements("<!doctype HTML><html></html>");
        assert!(!issues.iter().any(|issue| issue.contains("DOCTYPE")));
    }

    #[test]
    fn test_enforce_injects_viewport_into_head() {
        let fixed = enforce_minimum_requirements("<!DOCTYPE html><html><head></head><body></body></html>");
        assert!(fixed.contains(r#"<meta name="viewport""#));
        let head_at = fixed.find("<head>").unwrap();
        let meta_at = fixed.find("<meta name=\"viewport\"").unwrap();
        assert!(meta_at > head_at);
    }

    #[test]
    fn test_enforce_creates_head_when_missing() {
        let fixed = enforce_minimum_requirements("<html><body></body></html>");
        assert!(fixed.contains("<head>"));
        assert!(fixed.contains(r#"<meta name="viewport""#));
        assert!(fixed.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_enforce_prepends_doctype() {
        let fixed = enforce_minimum_requirements(GOOD_PAGE.trim_start_matches("<!DOCTYPE html>\n"));
        assert!(fixed.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_enforce_is_idempotent_on_complete_page() {
        assert_eq!(enforce_minimum_requirements(GOOD_PAGE), GOOD_PAGE);
    }

    #[test]
    fn test_enforce_on_empty_input_yields_minimal_shell() {
        let fixed = enforce_minimum_requirements("");
        assert!(fixed.starts_with("<!DOCTYPE html>"));
    }
}
