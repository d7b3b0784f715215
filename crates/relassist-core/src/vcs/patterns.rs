//! Common regex patterns for commit message parsing.

use lazy_static::lazy_static;
use regex::Regex;

/// Default Jira issue key pattern (`CON-1234`).
pub const DEFAULT_TASK_KEY: &str = r"[A-Z][A-Z0-9]+-\d+";

lazy_static! {
    pub static ref TASK_KEY: Regex = Regex::new(&format!(r"\b{DEFAULT_TASK_KEY}\b")).unwrap();

    // Gerrit Change-Id trailer
    pub static ref CHANGE_ID_TRAILER: Regex = Regex::new(
        r"(?m)^Change-Id:\s*(I[0-9a-f]{40})\s*$"
    ).unwrap();
}

/// Separators used with `git log --format=%H%x1f%s%x1f%b%x1e`.
pub const FIELD_SEP: char = '\u{1f}';
pub const RECORD_SEP: char = '\u{1e}';

/// `git log` format producing records understood by [`super::parse_log`].
pub const LOG_FORMAT: &str = "--format=%H%x1f%s%x1f%b%x1e";
