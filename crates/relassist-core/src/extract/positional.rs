//! Positional version extraction from sign-off ticket paragraphs.
//!
//! Sign-off descriptions are written as label runs followed by the version
//! in monospace, e.g. `Current Connector Version:` `25.3.0.20250904-1757`.
//! A version run is paired with the nearest label run before it in the
//! same paragraph.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::DescriptionExtractor;
use crate::document::{Description, Document, Inline, Mark};

/// Minimum number of characters a version run must exceed.
const MIN_VERSION_LEN: usize = 10;

/// Version fields recovered from a sign-off description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionFields {
    pub current_connector_version: Option<String>,
    pub current_sdk_version: Option<String>,
    pub current_platform_version: Option<String>,
}

impl VersionFields {
    /// Whether no field was found.
    pub fn is_empty(&self) -> bool {
        self.current_connector_version.is_none()
            && self.current_sdk_version.is_none()
            && self.current_platform_version.is_none()
    }

    fn assign(&mut self, label: VersionLabel, value: &str) {
        let value = value.to_string();
        match label {
            VersionLabel::Platform => self.current_platform_version = Some(value),
            VersionLabel::CurrentConnector => self.current_connector_version = Some(value),
            VersionLabel::CurrentSdk => self.current_sdk_version = Some(value),
            VersionLabel::PreviousConnector => {
                self.current_connector_version.get_or_insert(value);
            }
            VersionLabel::PreviousSdk => {
                self.current_sdk_version.get_or_insert(value);
            }
        }
    }
}

/// Label runs recognised in front of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionLabel {
    Platform,
    CurrentConnector,
    CurrentSdk,
    PreviousConnector,
    PreviousSdk,
}

impl VersionLabel {
    /// Matching order when a run contains more than one label.
    pub const ALL: [VersionLabel; 5] = [
        VersionLabel::Platform,
        VersionLabel::CurrentConnector,
        VersionLabel::CurrentSdk,
        VersionLabel::PreviousConnector,
        VersionLabel::PreviousSdk,
    ];

    /// Literal substring identifying the label.
    pub fn text(self) -> &'static str {
        match self {
            VersionLabel::Platform => "Platform Version",
            VersionLabel::CurrentConnector => "Current Connector Version",
            VersionLabel::CurrentSdk => "Current SDK Version",
            VersionLabel::PreviousConnector => "Previous Connector Version",
            VersionLabel::PreviousSdk => "Previous SDK Version",
        }
    }

    /// First label contained in `text`, in [`VersionLabel::ALL`] order.
    pub fn find_in(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| text.contains(label.text()))
    }
}

/// Text of a run that looks like a version value.
fn candidate_text(node: &Inline) -> Option<&str> {
    let text = node.as_text()?;
    let matches = node.has_mark(&Mark::Code)
        && text.contains('.')
        && text.chars().count() > MIN_VERSION_LEN;
    matches.then_some(text)
}

/// Nearest label among the text runs before `index`.
fn preceding_label(content: &[Inline], index: usize) -> Option<VersionLabel> {
    content[..index]
        .iter()
        .rev()
        .filter_map(Inline::as_text)
        .find_map(VersionLabel::find_in)
}

/// Sign-off version field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionExtractor;

impl VersionExtractor {
    /// Create a new version extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract version fields from a document.
    pub fn extract_document(&self, doc: &Document) -> VersionFields {
        let mut fields = VersionFields::default();

        for content in doc.paragraphs() {
            for (index, node) in content.iter().enumerate() {
                let Some(value) = candidate_text(node) else {
                    continue;
                };
                if let Some(label) = preceding_label(content, index) {
                    fields.assign(label, value);
                }
            }
        }

        debug!(?fields, "extracted sign-off versions");
        fields
    }
}

impl DescriptionExtractor for VersionExtractor {
    type Output = VersionFields;

    fn extract(&self, description: &Description) -> Self::Output {
        description
            .as_document()
            .map(|doc| self.extract_document(doc))
            .unwrap_or_default()
    }
}

/// Extract sign-off version fields from a raw description value.
///
/// Plain strings and malformed values yield all-absent fields.
pub fn extract_positional_fields(description: &Value) -> VersionFields {
    VersionExtractor::new().extract_value(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn text(t: &str) -> Value {
        json!({"type": "text", "text": t})
    }

    fn code(t: &str) -> Value {
        json!({"type": "text", "text": t, "marks": [{"type": "code"}]})
    }

    fn doc(paragraphs: Vec<Vec<Value>>) -> Value {
        json!({
            "type": "doc",
            "content": paragraphs
                .into_iter()
                .map(|runs| json!({"type": "paragraph", "content": runs}))
                .collect::<Vec<_>>()
        })
    }

    #[test]
    fn test_basic_connector_version() {
        let desc = doc(vec![vec![
            text("Current Connector Version:"),
            code("25.3.0.20250904-1757"),
        ]]);

        let fields = extract_positional_fields(&desc);
        assert_eq!(
            fields.current_connector_version.as_deref(),
            Some("25.3.0.20250904-1757")
        );
        assert_eq!(fields.current_sdk_version, None);
        assert_eq!(fields.current_platform_version, None);
    }

    #[test]
    fn test_all_fields() {
        let desc = doc(vec![
            vec![text("Current Connector Version: "), code("25.3.0.20250904-1757")],
            vec![text("Current SDK Version: "), code("25.3.0.20250804-1138")],
            vec![
                text("Platform Version: "),
                json!({"type": "hardBreak"}),
                code("25.3.0.20250919-0941"),
            ],
        ]);

        assert_eq!(
            extract_positional_fields(&desc),
            VersionFields {
                current_connector_version: Some("25.3.0.20250904-1757".to_string()),
                current_sdk_version: Some("25.3.0.20250804-1138".to_string()),
                current_platform_version: Some("25.3.0.20250919-0941".to_string()),
            }
        );
    }

    #[test]
    fn test_previous_does_not_override_current() {
        let desc = doc(vec![vec![
            text("Current Connector Version: "),
            code("25.3.0.AAAAAAAA"),
            text(" Previous Connector Version: "),
            code("25.2.0.BBBBBBBB"),
        ]]);

        let fields = extract_positional_fields(&desc);
        assert_eq!(fields.current_connector_version.as_deref(), Some("25.3.0.AAAAAAAA"));
    }

    #[test]
    fn test_previous_fills_missing_current() {
        let desc = doc(vec![vec![text("Previous SDK Version:"), code("25.2.0.20250101-0000")]]);
        assert_eq!(
            extract_positional_fields(&desc).current_sdk_version.as_deref(),
            Some("25.2.0.20250101-0000")
        );
    }

    #[test]
    fn test_current_overrides_earlier_previous() {
        let desc = doc(vec![
            vec![text("Previous Connector Version:"), code("25.2.0.20250101-0000")],
            vec![text("Current Connector Version:"), code("25.3.0.20250904-1757")],
        ]);
        assert_eq!(
            extract_positional_fields(&desc).current_connector_version.as_deref(),
            Some("25.3.0.20250904-1757")
        );
    }

    #[test]
    fn test_paragraph_boundary_isolation() {
        let desc = doc(vec![
            vec![text("Current SDK Version:")],
            vec![text("no label here"), code("25.3.0.20250804-1138")],
        ]);
        assert!(extract_positional_fields(&desc).is_empty());
    }

    #[test]
    fn test_nearest_label_wins() {
        let desc = doc(vec![vec![
            text("Current Connector Version:"),
            text("Current SDK Version:"),
            code("25.3.0.20250804-1138"),
        ]]);

        let fields = extract_positional_fields(&desc);
        assert_eq!(fields.current_sdk_version.as_deref(), Some("25.3.0.20250804-1138"));
        assert_eq!(fields.current_connector_version, None);
    }

    #[test]
    fn test_candidate_criteria() {
        // Not code-marked, no dot, too short (exactly 10 chars).
        let desc = doc(vec![vec![
            text("Current Connector Version:"),
            text("25.3.0.20250904-1757"),
            code("2530202509041757"),
            code("25.3.0.202"),
        ]]);
        assert!(extract_positional_fields(&desc).is_empty());

        let desc = doc(vec![vec![text("Current Connector Version:"), code("25.3.0.2025")]]);
        assert_eq!(
            extract_positional_fields(&desc).current_connector_version.as_deref(),
            Some("25.3.0.2025")
        );
    }

    #[test]
    fn test_label_inside_same_run_is_not_used() {
        // Label and value in one plain run: not a candidate.
        let desc = doc(vec![vec![text("Platform Version: 25.3.0.20250919-0941")]]);
        assert!(extract_positional_fields(&desc).is_empty());
    }

    #[test]
    fn test_absent_and_plain_input() {
        assert!(extract_positional_fields(&Value::Null).is_empty());
        assert!(extract_positional_fields(&json!("Current SDK Version: 25.3.0.1")).is_empty());
        assert!(extract_positional_fields(&json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_label_matching_order() {
        assert_eq!(
            VersionLabel::find_in("Platform Version / Current SDK Version"),
            Some(VersionLabel::Platform)
        );
        assert_eq!(VersionLabel::find_in("platform version"), None);
    }

    #[test]
    fn test_idempotent() {
        let desc = doc(vec![vec![text("Current SDK Version:"), code("25.3.0.20250804-1138")]]);
        assert_eq!(extract_positional_fields(&desc), extract_positional_fields(&desc));
    }
}
