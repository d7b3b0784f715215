//! Thin async wrapper around the `git` executable.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::debug;

use relassist_core::vcs::patterns::LOG_FORMAT;

/// Output of a successful git invocation.
#[derive(Debug)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs git commands inside one working tree.
pub struct Git {
    repo: PathBuf,
}

impl Git {
    pub fn new(repo: impl AsRef<Path>) -> Self {
        Self {
            repo: repo.as_ref().to_path_buf(),
        }
    }

    async fn run(&self, args: &[&str]) -> anyhow::Result<GitOutput> {
        debug!("git {} (in {})", args.join(" "), self.repo.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo)
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("Failed to run git in {}", self.repo.display()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            anyhow::bail!("Git command failed: {}", stderr.trim());
        }

        Ok(GitOutput { stdout, stderr })
    }

    /// `git add .`
    pub async fn add_all(&self) -> anyhow::Result<()> {
        self.run(&["add", "."]).await.map(drop)
    }

    /// `git commit -m <message>`
    pub async fn commit(&self, message: &str) -> anyhow::Result<()> {
        self.run(&["commit", "-m", message]).await.map(drop)
    }

    /// `git push <remote> <refspec>`; returns stderr, where Gerrit reports.
    pub async fn push(&self, remote: &str, refspec: &str) -> anyhow::Result<String> {
        self.run(&["push", remote, refspec]).await.map(|out| out.stderr)
    }

    /// Raw log records of commits in `to` but not in `from`.
    pub async fn log_between(&self, from: &str, to: &str) -> anyhow::Result<String> {
        let range = format!("{from}..{to}");
        self.run(&["log", LOG_FORMAT, &range]).await.map(|out| out.stdout)
    }
}
