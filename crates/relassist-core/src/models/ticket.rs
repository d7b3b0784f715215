//! Jira issue payloads and the ticket views produced from them.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TicketError};
use crate::extract::{DescriptionExtractor, LabeledValueExtractor, VersionExtractor, VersionFields};

/// Response of `GET /rest/api/3/search/jql`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub issues: Vec<Issue>,
    pub total: Option<u64>,
}

/// A Jira issue as returned by search or `GET /issue/{key}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

/// Requested issue fields. Everything is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueFields {
    pub summary: String,
    pub status: Option<Named>,
    pub assignee: Option<User>,
    pub reporter: Option<User>,
    pub created: String,
    /// Plain string, ADF document, or null.
    pub description: Value,
    pub fix_versions: Vec<Named>,
}

/// Any `{ "name": ... }` reference (status, version).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Named {
    #[serde(default)]
    pub name: String,
}

/// A Jira user reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub display_name: String,
}

/// Response of `GET /rest/api/3/issue/{key}/transitions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransitionsResponse {
    pub transitions: Vec<Transition>,
}

/// A workflow transition available on an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct Transition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub to: Named,
}

impl TransitionsResponse {
    /// Transition leading to `status` (case-insensitive).
    pub fn find_to(&self, status: &str) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.to.name.eq_ignore_ascii_case(status))
    }

    /// Like [`find_to`](Self::find_to), failing with `NoTransition` for `key`.
    pub fn require_to(&self, key: &str, status: &str) -> Result<&Transition> {
        self.find_to(status).ok_or_else(|| {
            TicketError::NoTransition {
                key: key.to_string(),
                status: status.to_string(),
            }
            .into()
        })
    }
}

/// Timestamp layout of Jira `created` fields (`2025-09-23T07:35:46.553-0700`).
pub const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Parse a Jira timestamp; `None` for anything else.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, JIRA_TIMESTAMP_FORMAT).ok()
}

/// Fields requested for version support searches.
pub const VERSION_SUPPORT_FIELDS: &str = "key,summary,status,assignee,created,description";

/// Fields requested for sign-off searches.
pub const SIGNOFF_FIELDS: &str =
    "key,summary,status,assignee,reporter,created,description,fixVersions";

impl Issue {
    /// Status name, empty when absent.
    pub fn status(&self) -> &str {
        self.fields
            .status
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or_default()
    }

    pub fn assignee(&self) -> Option<String> {
        self.fields.assignee.as_ref().map(|u| u.display_name.clone())
    }

    pub fn reporter(&self) -> Option<String> {
        self.fields.reporter.as_ref().map(|u| u.display_name.clone())
    }

    pub fn fix_versions(&self) -> Vec<String> {
        self.fields.fix_versions.iter().map(|v| v.name.clone()).collect()
    }

}

/// Version support ticket as reported by `tickets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketOutput {
    pub id: String,
    pub summary: String,
    pub status: String,
    pub assignee: Option<String>,
    pub created: String,
    #[serde(rename = "releaseNotes")]
    pub release_notes: Option<String>,
}

impl TicketOutput {
    pub fn from_issue(issue: &Issue, extractor: &LabeledValueExtractor) -> Self {
        Self {
            id: issue.key.clone(),
            summary: issue.fields.summary.clone(),
            status: issue.status().to_string(),
            assignee: issue.assignee(),
            created: issue.fields.created.clone(),
            release_notes: extractor.extract_value(&issue.fields.description),
        }
    }
}

/// Release sign-off ticket with its extracted versions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignoffTicket {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub created: String,
    pub assignee: Option<String>,
    pub reporter: Option<String>,
    pub fix_versions: Vec<String>,
    pub versions: VersionFields,
}

impl SignoffTicket {
    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            key: issue.key.clone(),
            summary: issue.fields.summary.clone(),
            status: issue.status().to_string(),
            created: issue.fields.created.clone(),
            assignee: issue.assignee(),
            reporter: issue.reporter(),
            fix_versions: issue.fix_versions(),
            versions: VersionExtractor::new().extract_value(&issue.fields.description),
        }
    }
}
