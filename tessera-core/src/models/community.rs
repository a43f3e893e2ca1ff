//! Communities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::wire_instant;

/// A community that posts are published into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    /// Unique identifier.
    pub id: u64,
    /// URL-safe identifier, unique per instance.
    pub slug: String,
    /// Human-readable title.
    pub title: String,
    /// Optional description shown on the community page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of members.
    #[serde(default)]
    pub member_count: u64,
    /// Whether the calling user follows this community.
    #[serde(default)]
    pub followed: bool,
    /// When the community was created.
    #[serde(with = "wire_instant")]
    pub created_at: DateTime<Utc>,
}
