//! Threaded comments under a post.

use anyhow::Result;
use clap::Args;
use tessera_client::{filter_forest, CommentService};
use tessera_core::CommentNode;

use super::Services;
use crate::output::{local_time, print_json, wants_json};
use crate::Cli;

/// Arguments for the comments command.
#[derive(Args)]
pub struct CommentsArgs {
    /// Post to show comments for.
    pub post_id: u64,

    /// Page size; defaults to the configured limit.
    #[arg(long, short)]
    pub limit: Option<u32>,

    /// Offset to start from.
    #[arg(long, default_value_t = 0)]
    pub offset: u64,

    /// Include soft-deleted comments (and their subtrees).
    #[arg(long)]
    pub show_deleted: bool,
}

/// Runs the comments command.
pub async fn run(args: &CommentsArgs, cli: &Cli) -> Result<()> {
    let services = Services::init().await?;
    let limit = match args.limit {
        Some(limit) => limit,
        None => services.settings.get().await.default_page_limit,
    };

    let comments = CommentService::new(services.api);
    let forest = comments.thread(args.post_id, args.offset, limit).await?;

    // Hidden comments take their whole subtree with them.
    let forest = if args.show_deleted {
        forest
    } else {
        filter_forest(&forest, &|node| !node.comment.deleted)
    };

    if wants_json(cli) {
        print_json(&forest, cli)?;
        return Ok(());
    }

    if forest.is_empty() {
        println!("No comments");
        return Ok(());
    }
    for node in &forest {
        print_node(node, 0);
    }
    Ok(())
}

fn print_node(node: &CommentNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let comment = &node.comment;
    println!(
        "{indent}[{}] {} · {}",
        comment.id,
        comment.author.visible_name(),
        local_time(comment.created_at),
    );
    for line in comment.text.lines() {
        println!("{indent}    {line}");
    }
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
