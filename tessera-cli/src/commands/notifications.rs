//! Inbox notifications.

use anyhow::Result;
use clap::Args;
use tessera_client::NotificationService;
use tessera_core::{Notification, NotificationKind};

use super::Services;
use crate::output::{local_time, print_json, wants_json};
use crate::Cli;

/// Arguments for the notifications command.
#[derive(Args)]
pub struct NotificationsArgs {
    /// Page size; defaults to the configured limit.
    #[arg(long, short)]
    pub limit: Option<u32>,

    /// Offset to start from.
    #[arg(long, default_value_t = 0)]
    pub offset: u64,

    /// Mark a notification as read instead of listing.
    #[arg(long, value_name = "ID")]
    pub mark_read: Option<u64>,
}

/// Runs the notifications command.
pub async fn run(args: &NotificationsArgs, cli: &Cli) -> Result<()> {
    let services = Services::init().await?;
    let notifications = NotificationService::new(services.api);

    if let Some(id) = args.mark_read {
        let updated = notifications.mark_read(id).await?;
        if wants_json(cli) {
            print_json(&updated, cli)?;
        } else if !cli.quiet {
            println!("Notification {id} marked read");
        }
        return Ok(());
    }

    let limit = match args.limit {
        Some(limit) => limit,
        None => services.settings.get().await.default_page_limit,
    };
    let page = notifications.list(args.offset, limit).await?;

    if wants_json(cli) {
        print_json(&page, cli)?;
        return Ok(());
    }

    if page.items.is_empty() {
        println!("Inbox is empty");
        return Ok(());
    }
    for notification in &page.items {
        print_notification(notification);
    }
    Ok(())
}

fn print_notification(notification: &Notification) {
    let marker = if notification.read { " " } else { "*" };
    let actor = notification
        .actor
        .as_ref()
        .map_or("someone", |person| person.visible_name());
    let what = match notification.kind {
        NotificationKind::Reply => "replied to you",
        NotificationKind::Mention => "mentioned you",
        NotificationKind::Follow => "followed you",
        NotificationKind::Reaction => "reacted to your content",
        NotificationKind::Unknown => "did something new",
    };
    println!(
        "{marker} [{}] {actor} {what} · {}",
        notification.id,
        local_time(notification.created_at),
    );
}
