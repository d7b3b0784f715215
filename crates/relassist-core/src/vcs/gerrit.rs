//! Gerrit review conventions: commit messages, refspecs and push output.

use serde::Serialize;

/// Browse URL of a Jira issue.
pub fn task_url(browse_url: &str, key: &str) -> String {
    format!("{}/{key}", browse_url.trim_end_matches('/'))
}

/// Commit message linking the change to its ticket.
///
/// ```text
/// CON-12345 : Fix version support issue
///
/// Task-Url: https://tasktop.atlassian.net/browse/CON-12345
/// ```
pub fn commit_message(key: &str, description: &str, browse_url: &str) -> String {
    format!(
        "{key} : {description}\n\nTask-Url: {}",
        task_url(browse_url, key)
    )
}

/// Refspec pushing `HEAD` for review on `branch`.
pub fn push_refspec(branch: &str, wip: bool) -> String {
    let flag = if wip { "%wip" } else { "" };
    format!("HEAD:refs/for/{branch}{flag}")
}

/// Change id and review URL reported by Gerrit on push.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PushOutcome {
    pub change_id: Option<String>,
    pub pr_url: Option<String>,
}

impl PushOutcome {
    /// Parse the stderr of `git push` to a Gerrit remote.
    ///
    /// A `remote:` line holding a URL gives the review URL; a
    /// `Change-Id:` line gives the change id. Later lines win.
    pub fn parse(stderr: &str) -> Self {
        let mut outcome = Self::default();

        for line in stderr.lines() {
            if line.contains("remote:") && line.contains("https://") {
                if let Some((_, rest)) = line.split_once("remote:") {
                    outcome.pr_url = Some(rest.trim().to_string());
                }
            } else if let Some((_, rest)) = line.split_once("Change-Id:") {
                outcome.change_id = Some(rest.trim().to_string());
            }
        }

        outcome
    }
}
