//! The post feed, driven through the pagination cursor.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use tessera_client::{PageCursor, PostService};
use tessera_core::Post;

use super::Services;
use crate::output::{local_time, print_json, wants_json};
use crate::Cli;

/// Arguments for the feed command.
#[derive(Args)]
pub struct FeedArgs {
    /// Page size; defaults to the configured limit.
    #[arg(long, short)]
    pub limit: Option<u32>,

    /// Keep loading pages until the server reports no more data.
    #[arg(long)]
    pub all: bool,
}

/// Runs the feed command.
pub async fn run(args: &FeedArgs, cli: &Cli) -> Result<()> {
    let services = Services::init().await?;
    let limit = match args.limit {
        Some(limit) => limit,
        None => services.settings.get().await.default_page_limit,
    };

    let posts = PostService::new(services.api);
    let cursor = PageCursor::new(Arc::new(posts.feed_loader()), limit);

    cursor.load_initial().await?;
    if args.all {
        // `has_more` is authoritative; a full page alone means nothing.
        while cursor.has_more().await {
            cursor.load_more().await?;
        }
    }

    let items = cursor.items().await;
    if wants_json(cli) {
        print_json(&items, cli)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("Feed is empty");
        return Ok(());
    }
    for post in &items {
        print_post(post);
    }
    if cursor.has_more().await && !cli.quiet {
        println!("... more available (rerun with --all)");
    }
    Ok(())
}

fn print_post(post: &Post) {
    println!(
        "#{:<6} {:>4}  {}  by {} · {} · {} comments",
        post.id,
        post.score,
        post.title,
        post.author.visible_name(),
        local_time(post.created_at),
        post.comment_count,
    );
}
