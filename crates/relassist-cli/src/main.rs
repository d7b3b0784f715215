//! CLI assistants for Jira release sign-off and version support workflows.

mod commands;
mod git;
mod jira;
mod output;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{config, extract, pr, signoff, tickets, GlobalArgs};

/// Release assistants - triage version support tickets and prepare release sign-offs
#[derive(Parser)]
#[command(name = "relassist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch version support tickets
    Tickets(tickets::TicketsArgs),

    /// Add a comment to a ticket
    Comment(tickets::CommentArgs),

    /// Move a version support ticket to Accepted
    Accept(tickets::AcceptArgs),

    /// Commit local changes and push them to Gerrit for review
    Pr(pr::PrArgs),

    /// Release sign-off workflows
    Signoff(signoff::SignoffArgs),

    /// Extract release notes and versions from a description file
    Extract(extract::ExtractArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // RUST_LOG, when set, refines the -v level
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Tickets(args) => tickets::run_fetch(args, &cli.global).await,
        Commands::Comment(args) => tickets::run_comment(args, &cli.global).await,
        Commands::Accept(args) => tickets::run_accept(args, &cli.global).await,
        Commands::Pr(args) => pr::run(args, &cli.global).await,
        Commands::Signoff(args) => signoff::run(args, &cli.global).await,
        Commands::Extract(args) => extract::run(args, &cli.global),
        Commands::Config(args) => config::run(args, &cli.global),
    }
}
