//! Release sign-off commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use relassist_core::models::config::AssistantConfig;
use relassist_core::models::jql::signoff_jql;
use relassist_core::models::ticket::{Issue, SIGNOFF_FIELDS, SignoffTicket};
use relassist_core::signoff::{
    append_to_description, first_issue, previous_versions_paragraphs, release_pair,
    task_urls_comment,
};
use relassist_core::vcs::{Commit, TaskKeyMatcher, parse_log, task_url, unique_task_keys};
use relassist_core::ReleaseVersion;

use super::{GlobalArgs, print_json, write_output};
use crate::git::Git;
use crate::jira::JiraClient;
use crate::output::{OutputFormat, format_signoffs};

/// Arguments for the signoff command.
#[derive(Args)]
pub struct SignoffArgs {
    #[command(subcommand)]
    command: SignoffCommand,
}

#[derive(Subcommand)]
enum SignoffCommand {
    /// List release sign-off tickets
    List(ListArgs),

    /// Show one sign-off ticket with its versions
    Show {
        /// Ticket key (e.g. CON-25671)
        ticket_id: String,
    },

    /// Find the sign-off ticket of the release before VERSION
    Previous {
        /// Current release (e.g. 25.3.4)
        version: String,
    },

    /// List commits between the previous release tag and VERSION
    Commits(CommitsArgs),

    /// Comment the task links of a release on its sign-off ticket
    TaskUrls(TaskUrlsArgs),

    /// Record the previous release's versions on the sign-off ticket
    PreviousVersions(PreviousVersionsArgs),

    /// Move a sign-off ticket to another status
    Status {
        /// Ticket key
        ticket_id: String,
        /// Target status name (e.g. Done)
        status: String,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Only tickets with this fix version
    #[arg(long)]
    fix_version: Option<String>,

    /// Only tickets in this status
    #[arg(long)]
    status: Option<String>,

    /// Maximum number of tickets
    #[arg(short, long)]
    limit: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct CommitsArgs {
    /// Current release (e.g. 25.3.4)
    version: String,

    /// Repository holding the release tags
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,
}

#[derive(Args)]
struct TaskUrlsArgs {
    /// Current release (e.g. 25.3.4)
    version: String,

    /// Sign-off ticket to comment on (looked up by fix version if omitted)
    #[arg(short, long)]
    ticket: Option<String>,

    /// Repository holding the release tags
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,

    /// Print the links without commenting
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct PreviousVersionsArgs {
    /// Current release (e.g. 25.3.4)
    version: String,

    /// Sign-off ticket to update (looked up by fix version if omitted)
    #[arg(short, long)]
    ticket: Option<String>,

    /// Print the new description without saving it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Serialize)]
struct CommitsOutput {
    success: bool,
    from_tag: String,
    to_tag: String,
    total: usize,
    commits: Vec<Commit>,
}

#[derive(Debug, Serialize)]
struct TaskUrlsOutput {
    success: bool,
    ticket: String,
    task_urls: Vec<String>,
    commented: bool,
}

pub async fn run(args: SignoffArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = global.load_config()?;

    match args.command {
        SignoffCommand::List(list) => list_tickets(list, global, &config).await,
        SignoffCommand::Show { ticket_id } => {
            let client = global.jira_client(&config)?;
            let issue = client.get_issue(&ticket_id, SIGNOFF_FIELDS).await?;
            print_json(&json!({
                "success": true,
                "ticket": SignoffTicket::from_issue(&issue),
            }))
        }
        SignoffCommand::Previous { version } => {
            let client = global.jira_client(&config)?;
            let (_, previous) = release_pair(&version)?;
            let issue = find_signoff(&client, &config, &previous).await?;
            print_json(&json!({
                "success": true,
                "previous_version": previous.to_string(),
                "ticket": SignoffTicket::from_issue(&issue),
            }))
        }
        SignoffCommand::Commits(commits) => {
            print_json(&release_commits(&commits.repo, &config, &commits.version).await?)
        }
        SignoffCommand::TaskUrls(task_urls) => post_task_urls(task_urls, global, &config).await,
        SignoffCommand::PreviousVersions(previous) => {
            record_previous_versions(previous, global, &config).await
        }
        SignoffCommand::Status { ticket_id, status } => {
            let client = global.jira_client(&config)?;
            let transitions = client.transitions(&ticket_id).await?;
            let transition = transitions.require_to(&ticket_id, &status)?;

            client.transition(&ticket_id, &transition.id).await?;
            print_json(&json!({
                "success": true,
                "ticket": ticket_id,
                "status_updated": status,
            }))
        }
    }
}

async fn list_tickets(
    args: ListArgs,
    global: &GlobalArgs,
    config: &AssistantConfig,
) -> anyhow::Result<()> {
    let client = global.jira_client(config)?;
    let jql = signoff_jql(
        &config.jira.project,
        &config.jira.signoff_summary,
        args.fix_version.as_deref(),
        args.status.as_deref(),
    );

    let response = client
        .search(&jql, SIGNOFF_FIELDS, args.limit.unwrap_or(config.jira.max_results))
        .await?;
    let tickets: Vec<SignoffTicket> = response.issues.iter().map(SignoffTicket::from_issue).collect();
    info!("Found {} sign-off ticket(s)", tickets.len());

    let content = format_signoffs(&tickets, args.format)?;
    write_output(&content, args.output.as_deref())
}

/// Most recent sign-off ticket whose fix version is `version`.
async fn find_signoff(
    client: &JiraClient,
    config: &AssistantConfig,
    version: &ReleaseVersion,
) -> anyhow::Result<Issue> {
    let fix_version = version.to_string();
    let jql = signoff_jql(
        &config.jira.project,
        &config.jira.signoff_summary,
        Some(&fix_version),
        None,
    );

    let response = client.search(&jql, SIGNOFF_FIELDS, 1).await?;
    Ok(first_issue(response, &format!("sign-off ticket for {fix_version}"))?)
}

async fn release_commits(
    repo: &Path,
    config: &AssistantConfig,
    version: &str,
) -> anyhow::Result<CommitsOutput> {
    let (current, previous) = release_pair(version)?;
    let from_tag = previous.tag(&config.release.tag_prefix);
    let to_tag = current.tag(&config.release.tag_prefix);

    let matcher = TaskKeyMatcher::new(&config.release.task_key_pattern)?;
    let log = Git::new(repo).log_between(&from_tag, &to_tag).await?;
    let commits = parse_log(&log, &matcher);
    info!("{} commit(s) between {from_tag} and {to_tag}", commits.len());

    Ok(CommitsOutput {
        success: true,
        from_tag,
        to_tag,
        total: commits.len(),
        commits,
    })
}

async fn post_task_urls(
    args: TaskUrlsArgs,
    global: &GlobalArgs,
    config: &AssistantConfig,
) -> anyhow::Result<()> {
    let commits = release_commits(&args.repo, config, &args.version).await?;
    let keys = unique_task_keys(&commits.commits);

    let task_urls: Vec<String> = keys
        .iter()
        .map(|key| task_url(&config.jira.browse_url, key))
        .collect();

    if args.dry_run {
        return print_json(&TaskUrlsOutput {
            success: true,
            ticket: args.ticket.unwrap_or_default(),
            task_urls,
            commented: false,
        });
    }

    let client = global.jira_client(config)?;
    let ticket = match args.ticket {
        Some(ticket) => ticket,
        None => {
            let (current, _) = release_pair(&args.version)?;
            find_signoff(&client, config, &current).await?.key
        }
    };

    if keys.is_empty() {
        warn!("No task keys found between {} and {}", commits.from_tag, commits.to_tag);
    } else {
        client
            .add_comment(&ticket, &task_urls_comment(&keys, &config.jira.browse_url))
            .await?;
    }

    print_json(&TaskUrlsOutput {
        success: true,
        ticket,
        commented: !keys.is_empty(),
        task_urls,
    })
}

async fn record_previous_versions(
    args: PreviousVersionsArgs,
    global: &GlobalArgs,
    config: &AssistantConfig,
) -> anyhow::Result<()> {
    let client = global.jira_client(config)?;
    let (current, previous) = release_pair(&args.version)?;

    let previous_ticket = SignoffTicket::from_issue(&find_signoff(&client, config, &previous).await?);
    let Some(paragraphs) = previous_versions_paragraphs(&previous_ticket.versions) else {
        anyhow::bail!(
            "Sign-off ticket {} for {previous} lists no connector or SDK version",
            previous_ticket.key
        );
    };

    let issue = match args.ticket {
        Some(ticket) => client.get_issue(&ticket, SIGNOFF_FIELDS).await?,
        None => find_signoff(&client, config, &current).await?,
    };

    let description = append_to_description(&issue.fields.description, &paragraphs);

    if !args.dry_run {
        client.update_description(&issue.key, &description).await?;
    }

    print_json(&json!({
        "success": true,
        "ticket": issue.key,
        "previous_ticket": previous_ticket.key,
        "previous_version": previous.to_string(),
        "previous_versions": previous_ticket.versions,
        "updated": !args.dry_run,
        "description": args.dry_run.then_some(&description),
    }))
}
