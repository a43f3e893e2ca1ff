//! Author identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::wire_instant;

/// A person on the platform, as attached to posts, comments, and
/// notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier.
    pub id: u64,
    /// Login/handle, unique per instance.
    pub username: String,
    /// Optional display name shown instead of the username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// When the account was created.
    #[serde(with = "wire_instant")]
    pub created_at: DateTime<Utc>,
}

impl Person {
    /// Returns the name to show in UI: display name when set, username
    /// otherwise.
    pub fn visible_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}
