//! Label-then-lookahead extraction over plain description text.

use serde_json::Value;

use super::DescriptionExtractor;
use crate::document::Description;

/// Label preceding the release-notes URL on version support tickets.
pub const RELEASE_NOTES_LABEL: &str = "Release Information:";

/// Extracts the first token following a literal, case-sensitive label.
#[derive(Debug, Clone)]
pub struct LabeledValueExtractor {
    label: String,
}

impl LabeledValueExtractor {
    /// Create an extractor for `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// The label searched for.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Search plain text directly.
    pub fn extract_from_text(&self, text: &str) -> Option<String> {
        if self.label.is_empty() {
            return None;
        }

        let (_, rest) = text.split_once(self.label.as_str())?;
        rest.split_whitespace().next().map(str::to_string)
    }
}

impl Default for LabeledValueExtractor {
    fn default() -> Self {
        Self::new(RELEASE_NOTES_LABEL)
    }
}

impl DescriptionExtractor for LabeledValueExtractor {
    type Output = Option<String>;

    fn extract(&self, description: &Description) -> Self::Output {
        self.extract_from_text(&description.search_text())
    }
}

/// Extract the token after `label` from a raw description value.
///
/// Accepts a plain string or an ADF document; every other shape yields
/// `None`.
pub fn extract_labeled_value(description: &Value, label: &str) -> Option<String> {
    LabeledValueExtractor::new(label).extract_value(description)
}

/// Extract the release-notes URL from a version support ticket description.
pub fn extract_release_notes(description: &Value) -> Option<String> {
    LabeledValueExtractor::default().extract_value(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with_runs(runs: &[&str]) -> Value {
        json!({
            "type": "doc",
            "version": 1,
            "content": [{
                "type": "paragraph",
                "content": runs.iter().map(|t| json!({"type": "text", "text": t})).collect::<Vec<_>>()
            }]
        })
    }

    #[test]
    fn test_structured_description_with_release_info() {
        let desc = doc_with_runs(&[
            "This is a test ticket. ",
            "Release Information: https://example.com/release-notes",
            " Additional text here.",
        ]);
        assert_eq!(
            extract_release_notes(&desc),
            Some("https://example.com/release-notes".to_string())
        );
    }

    #[test]
    fn test_structured_description_without_release_info() {
        let desc = doc_with_runs(&["This is a test ticket without release info."]);
        assert_eq!(extract_release_notes(&desc), None);
    }

    #[test]
    fn test_plain_text() {
        let desc = json!("This is a plain text description. Release Information: https://example.com/release-notes More text.");
        assert_eq!(
            extract_release_notes(&desc),
            Some("https://example.com/release-notes".to_string())
        );
        assert_eq!(extract_release_notes(&json!("no release info here")), None);
    }

    #[test]
    fn test_absent_and_empty_input() {
        assert_eq!(extract_labeled_value(&Value::Null, RELEASE_NOTES_LABEL), None);
        assert_eq!(extract_labeled_value(&json!(""), RELEASE_NOTES_LABEL), None);
        assert_eq!(extract_labeled_value(&json!(12345), RELEASE_NOTES_LABEL), None);
        assert_eq!(
            extract_labeled_value(&json!({"type": "doc", "version": 1, "content": []}), RELEASE_NOTES_LABEL),
            None
        );
    }

    #[test]
    fn test_case_sensitive_label() {
        let desc = json!("release information: https://x.com");
        assert_eq!(extract_labeled_value(&desc, "Release Information:"), None);
    }

    #[test]
    fn test_only_first_token() {
        let desc = json!("Release Information: https://a.com https://b.com");
        assert_eq!(
            extract_labeled_value(&desc, "Release Information:"),
            Some("https://a.com".to_string())
        );
    }

    #[test]
    fn test_label_at_end_without_value() {
        assert_eq!(extract_release_notes(&json!("Some text. Release Information:   ")), None);
        assert_eq!(extract_release_notes(&json!("Release Information:")), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let desc = json!("Release Information: https://first.com Release Information: https://second.com");
        assert_eq!(extract_release_notes(&desc), Some("https://first.com".to_string()));
    }

    #[test]
    fn test_runs_joined_without_separator() {
        // hardBreak contributes nothing, so the label and URL are glued.
        let desc = json!({
            "content": [{"type": "paragraph", "content": [
                {"type": "text", "text": "Release Information:"},
                {"type": "hardBreak"},
                {"type": "text", "text": "https://mixed.com/release"},
                {"type": "hardBreak"},
                {"type": "text", "text": "trailing"}
            ]}]
        });
        assert_eq!(
            extract_release_notes(&desc),
            Some("https://mixed.com/releasetrailing".to_string())
        );
    }

    #[test]
    fn test_label_across_paragraphs() {
        let desc = json!({
            "type": "doc",
            "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "First paragraph. "}]},
                {"type": "paragraph", "content": [{"type": "text", "text": "Release Information: https://nested.example.com/release"}]}
            ]
        });
        assert_eq!(
            extract_release_notes(&desc),
            Some("https://nested.example.com/release".to_string())
        );
    }

    #[test]
    fn test_malformed_paragraph() {
        let desc = json!({"type": "doc", "content": [{"type": "paragraph"}]});
        assert_eq!(extract_release_notes(&desc), None);
    }

    #[test]
    fn test_empty_label() {
        assert_eq!(extract_labeled_value(&json!("anything"), ""), None);
    }

    #[test]
    fn test_idempotent() {
        let desc = doc_with_runs(&["Release Information: https://example.com/r"]);
        let extractor = LabeledValueExtractor::default();
        assert_eq!(extractor.extract_value(&desc), extractor.extract_value(&desc));
    }
}
