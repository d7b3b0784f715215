//! CLI subcommands.

pub mod config;
pub mod extract;
pub mod pr;
pub mod signoff;
pub mod tickets;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::debug;

use relassist_core::models::config::AssistantConfig;

use crate::jira::{JiraClient, JiraCredentials};

/// Options shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Jira site URL
    #[arg(long, env = "JIRA_URL", global = true)]
    pub jira_url: Option<String>,

    /// Jira account
    #[arg(long, env = "JIRA_USER", global = true)]
    pub jira_user: Option<String>,

    /// Jira API token
    #[arg(long, env = "JIRA_TOKEN", global = true, hide_env_values = true)]
    pub jira_token: Option<String>,
}

impl GlobalArgs {
    /// Load the configuration from `--config`, the default location, or defaults.
    ///
    /// An explicit `--config` must exist; the default location may not.
    pub fn load_config(&self) -> anyhow::Result<AssistantConfig> {
        let path = self.config_path();
        if self.config.is_none() && !path.exists() {
            return Ok(AssistantConfig::default());
        }

        debug!("Loading configuration from {}", path.display());
        AssistantConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    /// `--config` if given, otherwise the default location.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    /// Resolve credentials and build a Jira client.
    pub fn jira_client(&self, config: &AssistantConfig) -> anyhow::Result<JiraClient> {
        let credentials = JiraCredentials::resolve(
            self.jira_url.as_deref(),
            self.jira_user.as_deref(),
            self.jira_token.as_deref(),
            &config.jira,
        )?;
        JiraClient::new(credentials, Duration::from_secs(config.jira.timeout_secs))
    }
}

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("relassist")
        .join("config.json")
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Write `content` to `output` or stdout.
pub fn write_output(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Output written to {}",
                console::style("✓").green(),
                path.display()
            );
        }
        None => println!("{content}"),
    }
    Ok(())
}
