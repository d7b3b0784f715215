//! Description and comment edits made on release sign-off tickets.

use serde_json::Value;

use crate::document::{Document, Inline};
use crate::error::{Result, TicketError};
use crate::extract::VersionFields;
use crate::models::ticket::{Issue, SearchResponse};
use crate::vcs::task_url;
use crate::version::ReleaseVersion;

pub const PREVIOUS_CONNECTOR_LABEL: &str = "Previous Connector Version: ";
pub const PREVIOUS_SDK_LABEL: &str = "Previous SDK Version: ";

/// Paragraphs recording the previous release's connector and SDK builds.
///
/// Takes the *current* versions of the previous sign-off ticket. Returns
/// `None` when neither is known.
pub fn previous_versions_paragraphs(previous: &VersionFields) -> Option<Document> {
    let entries = [
        (PREVIOUS_CONNECTOR_LABEL, &previous.current_connector_version),
        (PREVIOUS_SDK_LABEL, &previous.current_sdk_version),
    ];

    let doc = entries
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| (label, v)))
        .fold(Document::new(), |doc, (label, value)| {
            doc.with_paragraph(vec![Inline::text(label), Inline::code(value.as_str())])
        });

    (!doc.blocks.is_empty()).then_some(doc)
}

/// Append `addition` to a description fetched from Jira.
///
/// The fetched value is kept as is; only the new blocks pass through the
/// typed model. A plain-text description becomes its own paragraph and an
/// absent one is replaced.
pub fn append_to_description(description: &Value, addition: &Document) -> Value {
    let mut rendered = addition.to_value();
    let Value::Array(new_blocks) = rendered["content"].take() else {
        return description.clone();
    };

    match description {
        Value::Object(doc) if doc.get("content").is_some_and(Value::is_array) => {
            let mut doc = doc.clone();
            if let Some(Value::Array(content)) = doc.get_mut("content") {
                content.extend(new_blocks);
            }
            Value::Object(doc)
        }
        Value::String(text) if !text.trim().is_empty() => {
            let mut doc = Document::from_text(text.as_str());
            doc.extend(addition.clone());
            doc.to_value()
        }
        _ => addition.to_value(),
    }
}

/// Current and previous release for a version string such as `25.3.4`.
pub fn release_pair(version: &str) -> Result<(ReleaseVersion, ReleaseVersion)> {
    let current: ReleaseVersion = version.parse()?;
    let previous = current.previous()?;
    Ok((current, previous))
}

/// First issue of a search, or `NotFound` naming `what`.
pub fn first_issue(response: SearchResponse, what: &str) -> Result<Issue> {
    response
        .issues
        .into_iter()
        .next()
        .ok_or_else(|| TicketError::NotFound(what.to_string()).into())
}

/// Comment body listing one link card per task.
pub fn task_urls_comment(keys: &[String], browse_url: &str) -> Document {
    keys.iter().fold(
        Document::from_text(format!("Tasks included in this release ({}):", keys.len())),
        |doc, key| doc.with_paragraph(vec![Inline::card(task_url(browse_url, key))]),
    )
}
