//! The aggregated home screen load.

use anyhow::Result;
use clap::Args;
use tessera_client::HomeService;

use super::Services;
use crate::output::{print_json, wants_json};
use crate::Cli;

/// Arguments for the home command.
#[derive(Args)]
pub struct HomeArgs {
    /// Feed page size; defaults to the configured limit.
    #[arg(long, short)]
    pub limit: Option<u32>,
}

/// Runs the home command.
pub async fn run(args: &HomeArgs, cli: &Cli) -> Result<()> {
    let services = Services::init().await?;
    let limit = match args.limit {
        Some(limit) => limit,
        None => services.settings.get().await.default_page_limit,
    };

    let home = HomeService::new(services.api);
    let summary = home.load(limit).await?;

    if wants_json(cli) {
        print_json(&summary, cli)?;
        return Ok(());
    }

    println!(
        "{} · {} unread notification(s)",
        summary.user.visible_name(),
        summary.unread.count
    );
    println!();
    for post in &summary.feed.items {
        println!("#{:<6} {}", post.id, post.title);
    }
    Ok(())
}
