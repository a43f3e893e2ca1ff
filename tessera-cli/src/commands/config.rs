//! Configuration management.

use anyhow::Result;
use clap::{Args, Subcommand};
use tessera_store::{SessionStore, SettingsStore};

use crate::output::{print_json, wants_json};
use crate::Cli;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    /// Config action to run.
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config actions.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration.
    Show,

    /// Set the backend base URL. Sessions are host-scoped, so this
    /// clears the stored session and cookies.
    SetBaseUrl {
        /// The new base URL, e.g. `https://staging.tessera.social`.
        url: String,
    },

    /// Set the default page size for list commands.
    SetPageLimit {
        /// Items per page.
        limit: u32,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    let settings = SettingsStore::load_default().await;

    match &args.action {
        ConfigAction::Show => {
            let current = settings.get().await;
            if wants_json(cli) {
                print_json(&current, cli)?;
            } else {
                println!("base_url           {}", current.base_url);
                println!("request_timeout    {}s", current.request_timeout_secs);
                println!("resource_timeout   {}s", current.resource_timeout_secs);
                println!("default_page_limit {}", current.default_page_limit);
            }
        }
        ConfigAction::SetBaseUrl { url } => {
            let session = SessionStore::open_default().await;
            settings.set_base_url(url, &session).await?;
            if !cli.quiet && !wants_json(cli) {
                println!("Base URL set to {url}; session cleared");
            }
        }
        ConfigAction::SetPageLimit { limit } => {
            {
                let current = settings.get().await;
                if current.default_page_limit == *limit {
                    return Ok(());
                }
            }
            settings.update(|s| s.default_page_limit = *limit).await;
            settings.save().await?;
            if !cli.quiet && !wants_json(cli) {
                println!("Default page limit set to {limit}");
            }
        }
    }
    Ok(())
}
