//! Version support ticket commands: fetch, comment, accept.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use relassist_core::document::Document;
use relassist_core::extract::LabeledValueExtractor;
use relassist_core::models::jql::version_support_jql;
use relassist_core::models::ticket::{TicketOutput, VERSION_SUPPORT_FIELDS};

use super::{GlobalArgs, print_json, write_output};
use crate::output::{OutputFormat, format_tickets};

/// Arguments for the tickets command.
#[derive(Args)]
pub struct TicketsArgs {
    /// Issue type to search (defaults to the configured type)
    #[arg(long = "type")]
    pub issue_type: Option<String>,

    /// Ticket status to search (defaults to the configured triage status)
    #[arg(long)]
    pub status: Option<String>,

    /// Maximum number of tickets
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the comment command.
#[derive(Args)]
pub struct CommentArgs {
    /// Ticket key (e.g. CON-12345)
    pub ticket_id: String,

    /// Comment text
    pub text: String,
}

/// Arguments for the accept command.
#[derive(Args)]
pub struct AcceptArgs {
    /// Ticket key (e.g. CON-12345)
    pub ticket_id: String,
}

#[derive(Debug, Serialize)]
struct CommentOutput {
    success: bool,
    comment_id: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatusUpdateOutput {
    success: bool,
    error: Option<String>,
}

pub async fn run_fetch(args: TicketsArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = global.load_config()?;
    let client = global.jira_client(&config)?;

    let issue_type = args
        .issue_type
        .as_deref()
        .unwrap_or(&config.jira.version_support_type);
    let status = args.status.as_deref().unwrap_or(&config.jira.triage_status);
    let jql = version_support_jql(&config.jira.project, issue_type, status);

    let response = client
        .search(
            &jql,
            VERSION_SUPPORT_FIELDS,
            args.limit.unwrap_or(config.jira.max_results),
        )
        .await?;

    let extractor = LabeledValueExtractor::new(config.release.release_notes_label.as_str());
    let tickets: Vec<TicketOutput> = response
        .issues
        .iter()
        .map(|issue| TicketOutput::from_issue(issue, &extractor))
        .collect();

    let missing = tickets.iter().filter(|t| t.release_notes.is_none()).count();
    if missing > 0 {
        warn!("{missing} ticket(s) have no release notes link");
    }
    info!("Found {} ticket(s)", tickets.len());

    let content = format_tickets(&tickets, args.format)?;
    write_output(&content, args.output.as_deref())
}

pub async fn run_comment(args: CommentArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = global.load_config()?;
    let client = global.jira_client(&config)?;

    let output = match client
        .add_comment(&args.ticket_id, &Document::from_text(args.text.as_str()))
        .await
    {
        Ok(created) => CommentOutput {
            success: true,
            comment_id: created.id,
            error: None,
        },
        Err(e) => CommentOutput {
            success: false,
            comment_id: None,
            error: Some(format!("{e:#}")),
        },
    };

    print_json(&output)?;
    match output.error {
        Some(error) => anyhow::bail!(error),
        None => Ok(()),
    }
}

pub async fn run_accept(args: AcceptArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = global.load_config()?;
    let client = global.jira_client(&config)?;

    let output = match client
        .transition(&args.ticket_id, &config.jira.accepted_transition_id)
        .await
    {
        Ok(()) => StatusUpdateOutput {
            success: true,
            error: None,
        },
        Err(e) => StatusUpdateOutput {
            success: false,
            error: Some(format!("{e:#}")),
        },
    };

    print_json(&output)?;
    match output.error {
        Some(error) => anyhow::bail!(error),
        None => Ok(()),
    }
}
