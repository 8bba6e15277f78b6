//! Hidden form field extraction from portal HTML

use scraper::{Html, Selector};

/// Name of the portal's anti-forgery form field
pub const CSRF_FIELD: &str = "_csrf";

/// Pulls a token out of an HTML document.
///
/// Extraction failure is `None`, never an error.
pub trait TokenExtractor: Send + Sync {
    fn extract(&self, html: &str) -> Option<String>;
}

/// Extracts the `value` of the first `<input name="...">` with a given name
#[derive(Debug, Clone)]
pub struct HiddenFieldExtractor {
    field: String,
}

impl HiddenFieldExtractor {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl Default for HiddenFieldExtractor {
    fn default() -> Self {
        Self::new(CSRF_FIELD)
    }
}

impl TokenExtractor for HiddenFieldExtractor {
    fn extract(&self, html: &str) -> Option<String> {
        extract_input_value(html, &self.field)
    }
}

/// Value of the first `_csrf` input in document order
pub fn extract_csrf_token(html: &str) -> Option<String> {
    extract_input_value(html, CSRF_FIELD)
}

fn extract_input_value(html: &str, field: &str) -> Option<String> {
    // html5ever recovers from malformed markup, so parsing itself never fails
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!("input[name=\"{}\"]", field.replace('"', "\\\""))).ok()?;

    document
        .select(&selector)
        .next()
        .map(|input| input.value().attr("value").unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_hidden_token() {
        let html = r#"<html><body><form>
            <input type="hidden" name="_csrf" value="dummyCsrfToken">
            <input name="login"></form></body></html>"#;
        assert_eq!(extract_csrf_token(html), Some("dummyCsrfToken".to_string()));
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(extract_csrf_token("<html><form></form></html>"), None);
    }

    #[test]
    fn test_empty_value_is_returned_verbatim() {
        let html = r#"<input type="hidden" name="_csrf" value="">"#;
        assert_eq!(extract_csrf_token(html), Some(String::new()));
    }

    #[test]
    fn test_first_match_wins() {
        let html = r#"<form><input name="_csrf" value="first"></form>
            <form><input name="_csrf" value="second"></form>"#;
        assert_eq!(extract_csrf_token(html), Some("first".to_string()));
    }

    #[test]
    fn test_malformed_html_does_not_fail() {
        let html = "<html><body><div><input type='hidden' name='_csrf' value='tok1'<p>unclosed";
        // Tolerated either way; must not panic
        let _ = extract_csrf_token(html);
        assert_eq!(extract_csrf_token("<<<>>>"), None);
        assert_eq!(extract_csrf_token(""), None);
    }

    #[test]
    fn test_single_quoted_attributes() {
        let html = "<html><input type='hidden' name='_csrf' value='abc-123'></html>";
        assert_eq!(extract_csrf_token(html), Some("abc-123".to_string()));
    }

    #[test]
    fn test_custom_field_extractor() {
        let extractor = HiddenFieldExtractor::new("__VIEWSTATE");
        let html = r#"<input name="__VIEWSTATE" value="vs"><input name="_csrf" value="c">"#;
        assert_eq!(extractor.extract(html), Some("vs".to_string()));
        assert_eq!(HiddenFieldExtractor::default().extract(html), Some("c".to_string()));
    }
}
