//! Inbox notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::person::Person;
use crate::codec::wire_instant;

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone replied to the user's post or comment.
    Reply,
    /// Someone mentioned the user.
    Mention,
    /// Someone followed the user.
    Follow,
    /// Someone reacted to the user's content.
    Reaction,
    /// A kind introduced by a newer server version.
    #[serde(other)]
    Unknown,
}

/// A single inbox entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier.
    pub id: u64,
    /// What triggered this notification.
    pub kind: NotificationKind,
    /// Who triggered it; absent for system notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<Person>,
    /// Related post, when applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<u64>,
    /// Related comment, when applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<u64>,
    /// Whether the user has read this notification.
    #[serde(default)]
    pub read: bool,
    /// When the notification was created.
    #[serde(with = "wire_instant")]
    pub created_at: DateTime<Utc>,
}

/// Response body for the unread-count endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCount {
    /// Number of unread notifications.
    pub count: u64,
}
