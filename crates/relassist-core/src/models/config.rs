//! Configuration structures for the assistants.

use serde::{Deserialize, Serialize};

use crate::error::{RelassistError, Result};
use crate::extract::RELEASE_NOTES_LABEL;
use crate::vcs::patterns::DEFAULT_TASK_KEY;

/// Main configuration for the relassist tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Jira connection and query configuration.
    pub jira: JiraConfig,

    /// Gerrit push configuration.
    pub gerrit: GerritConfig,

    /// Release sign-off configuration.
    pub release: ReleaseConfig,
}

/// Jira configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    /// Site URL, e.g. `https://example.atlassian.net` (`JIRA_URL` overrides).
    pub base_url: Option<String>,

    /// Account e-mail (`JIRA_USER` overrides).
    pub user: Option<String>,

    /// API token (`JIRA_TOKEN` overrides).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Project key searched by the assistants.
    pub project: String,

    /// Base URL for issue links written into commits and comments.
    pub browse_url: String,

    /// Transition id moving a version support ticket to Accepted.
    pub accepted_transition_id: String,

    /// Issue type of version support tickets.
    pub version_support_type: String,

    /// Status of tickets waiting for triage.
    pub triage_status: String,

    /// Summary phrase identifying release sign-off tickets.
    pub signoff_summary: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Default page size for searches.
    pub max_results: u32,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user: None,
            token: None,
            project: "CON".to_string(),
            browse_url: "https://tasktop.atlassian.net/browse".to_string(),
            accepted_transition_id: "71".to_string(),
            version_support_type: "Version Support".to_string(),
            triage_status: "To Triage".to_string(),
            signoff_summary: "Release sign-off".to_string(),
            timeout_secs: 30,
            max_results: 100,
        }
    }
}

/// Gerrit push configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GerritConfig {
    /// Remote to push review refs to.
    pub remote: String,

    /// Target branch when none is given.
    pub default_branch: String,

    /// Push changes as work in progress.
    pub wip: bool,
}

impl Default for GerritConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            default_branch: "master".to_string(),
            wip: true,
        }
    }
}

/// Release sign-off configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Prefix of release tags (`""` for tags named `25.3.4`).
    pub tag_prefix: String,

    /// Regex matching task keys in commit messages.
    pub task_key_pattern: String,

    /// Label preceding the release-notes URL.
    pub release_notes_label: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            tag_prefix: String::new(),
            task_key_pattern: DEFAULT_TASK_KEY.to_string(),
            release_notes_label: RELEASE_NOTES_LABEL.to_string(),
        }
    }
}

impl AssistantConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| RelassistError::Config(format!("{}: {e}", path.display())))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.jira.project, "CON");
        assert_eq!(config.jira.accepted_transition_id, "71");
        assert_eq!(config.jira.max_results, 100);
        assert_eq!(config.gerrit.remote, "origin");
        assert_eq!(config.gerrit.default_branch, "master");
        assert!(config.gerrit.wip);
        assert_eq!(config.release.release_notes_label, "Release Information:");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"jira": {"project": "PLAT"}, "gerrit": {"wip": false}}"#).unwrap();

        let config = AssistantConfig::from_file(&path).unwrap();
        assert_eq!(config.jira.project, "PLAT");
        assert_eq!(config.jira.triage_status, "To Triage");
        assert!(!config.gerrit.wip);
        assert_eq!(config.gerrit.remote, "origin");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AssistantConfig::default();
        config.release.tag_prefix = "v".to_string();
        config.save(&path).unwrap();

        let loaded = AssistantConfig::from_file(&path).unwrap();
        assert_eq!(loaded.release.tag_prefix, "v");
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            AssistantConfig::from_file(&path),
            Err(RelassistError::Config(_))
        ));
    }
}
