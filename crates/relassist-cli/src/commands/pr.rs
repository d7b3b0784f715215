//! Commit local changes and push them to Gerrit for review.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::info;

use relassist_core::models::config::AssistantConfig;
use relassist_core::vcs::{PushOutcome, commit_message, push_refspec};

use super::{GlobalArgs, print_json};
use crate::git::Git;

/// Arguments for the pr command.
#[derive(Args)]
pub struct PrArgs {
    /// Ticket key the change belongs to
    pub ticket_id: String,

    /// Short change description
    pub description: String,

    /// Target branch (defaults to the configured branch)
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Repository to commit in
    #[arg(short, long, default_value = ".")]
    pub repo: PathBuf,

    /// Push as a ready change instead of work in progress
    #[arg(long)]
    pub ready: bool,
}

#[derive(Debug, Default, Serialize)]
struct GerritPrOutput {
    success: bool,
    change_id: Option<String>,
    pr_url: Option<String>,
    error: Option<String>,
}

async fn create_change(args: &PrArgs, config: &AssistantConfig) -> anyhow::Result<PushOutcome> {
    if !args.repo.is_dir() {
        anyhow::bail!("Repository path does not exist: {}", args.repo.display());
    }

    let git = Git::new(&args.repo);
    let branch = args
        .branch
        .as_deref()
        .unwrap_or(&config.gerrit.default_branch);

    git.add_all().await?;
    git.commit(&commit_message(
        &args.ticket_id,
        &args.description,
        &config.jira.browse_url,
    ))
    .await?;

    let refspec = push_refspec(branch, config.gerrit.wip && !args.ready);
    info!("Pushing {refspec} to {}", config.gerrit.remote);
    let stderr = git.push(&config.gerrit.remote, &refspec).await?;

    Ok(PushOutcome::parse(&stderr))
}

pub async fn run(args: PrArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = global.load_config()?;

    let output = match create_change(&args, &config).await {
        Ok(outcome) => GerritPrOutput {
            success: true,
            change_id: outcome.change_id,
            pr_url: outcome.pr_url,
            error: None,
        },
        Err(e) => GerritPrOutput {
            error: Some(format!("{e:#}")),
            ..Default::default()
        },
    };

    print_json(&output)?;
    match output.error {
        Some(error) => anyhow::bail!(error),
        None => Ok(()),
    }
}
