// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Tessera CLI - the Tessera community platform from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Log in (the session cookie persists across runs)
//! tessera login --user mira
//!
//! # Who am I?
//! tessera whoami
//!
//! # First page of the feed, then everything
//! tessera feed
//! tessera feed --all
//!
//! # Threaded comments under a post
//! tessera comments 42
//!
//! # Inbox
//! tessera notifications
//! tessera notifications --mark-read 9
//!
//! # Home screen aggregate (three concurrent fetches)
//! tessera home
//!
//! # Point the client at another backend (clears the session)
//! tessera config set-base-url https://staging.tessera.social
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{comments, config, feed, home, notifications, session};

// ============================================================================
// CLI Definition
// ============================================================================

/// Tessera community platform CLI.
#[derive(Parser)]
#[command(name = "tessera")]
#[command(about = "Tessera community platform CLI")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Log in and persist the session.
    Login(session::LoginArgs),

    /// Log out and discard the session.
    Logout,

    /// Show the logged-in user, verifying the stored session.
    Whoami,

    /// Show the post feed.
    #[command(visible_alias = "f")]
    Feed(feed::FeedArgs),

    /// Show threaded comments under a post.
    #[command(visible_alias = "c")]
    Comments(comments::CommentsArgs),

    /// Show inbox notifications.
    #[command(visible_alias = "n")]
    Notifications(notifications::NotificationsArgs),

    /// Load the home screen aggregate.
    Home(home::HomeArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("tessera=debug,info")
    } else {
        EnvFilter::new("tessera=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Login(args) => session::login(args, &cli).await,
        Commands::Logout => session::logout(&cli).await,
        Commands::Whoami => session::whoami(&cli).await,
        Commands::Feed(args) => feed::run(args, &cli).await,
        Commands::Comments(args) => comments::run(args, &cli).await,
        Commands::Notifications(args) => notifications::run(args, &cli).await,
        Commands::Home(args) => home::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }

    Ok(())
}
