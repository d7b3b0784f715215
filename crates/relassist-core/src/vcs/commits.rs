//! Commit log parsing and task-key discovery.

use regex::Regex;
use serde::Serialize;

use super::patterns::{CHANGE_ID_TRAILER, FIELD_SEP, RECORD_SEP, TASK_KEY};
use crate::error::{RelassistError, Result};

/// One commit from `git log`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub hash: String,
    pub subject: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
    /// Task keys referenced in subject or body, first occurrence order.
    pub task_keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_id: Option<String>,
}

/// Finds Jira issue keys in commit messages.
#[derive(Debug, Clone)]
pub struct TaskKeyMatcher {
    regex: Regex,
}

impl TaskKeyMatcher {
    /// Build a matcher from a key pattern such as `CON-\d+`.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!(r"\b(?:{pattern})\b"))
            .map_err(|e| RelassistError::Config(format!("invalid task key pattern: {e}")))?;
        Ok(Self { regex })
    }

    /// Unique keys in `text`, in order of first occurrence.
    pub fn find_all(&self, text: &str) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for m in self.regex.find_iter(text) {
            if !keys.iter().any(|k| k == m.as_str()) {
                keys.push(m.as_str().to_string());
            }
        }
        keys
    }
}

impl Default for TaskKeyMatcher {
    fn default() -> Self {
        Self {
            regex: TASK_KEY.clone(),
        }
    }
}

/// Parse output of `git log` run with [`super::patterns::LOG_FORMAT`].
pub fn parse_log(output: &str, matcher: &TaskKeyMatcher) -> Vec<Commit> {
    output
        .split(RECORD_SEP)
        .filter_map(|record| {
            let record = record.trim_start_matches(['\n', '\r']);
            if record.trim().is_empty() {
                return None;
            }

            let mut fields = record.splitn(3, FIELD_SEP);
            let hash = fields.next()?.trim().to_string();
            let subject = fields.next().unwrap_or_default().trim().to_string();
            let body = fields.next().unwrap_or_default().trim().to_string();

            let task_keys = matcher.find_all(&format!("{subject}\n{body}"));
            let change_id = CHANGE_ID_TRAILER
                .captures(&body)
                .map(|caps| caps[1].to_string());

            Some(Commit {
                hash,
                subject,
                body,
                task_keys,
                change_id,
            })
        })
        .collect()
}

/// Task keys across all commits, deduplicated, first occurrence order.
pub fn unique_task_keys(commits: &[Commit]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in commits.iter().flat_map(|c| c.task_keys.iter()) {
        if !keys.contains(key) {
            keys.push(key.clone());
        }
    }
    keys
}
