//! Posts and reactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::person::Person;
use crate::codec::{wire_instant, wire_instant_opt};

// ============================================================================
// Post
// ============================================================================

/// A post in a community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier.
    pub id: u64,
    /// The community this post belongs to.
    pub community_id: u64,
    /// Post author.
    pub author: Person,
    /// Post title.
    pub title: String,
    /// Text body; absent for pure link posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// External link; absent for pure text posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// When the post was created.
    #[serde(with = "wire_instant")]
    pub created_at: DateTime<Utc>,
    /// When the post was last edited, if ever.
    #[serde(default, with = "wire_instant_opt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Number of comments under the post.
    #[serde(default)]
    pub comment_count: u64,
    /// Aggregate reaction score.
    #[serde(default)]
    pub score: i64,
    /// The calling user's own reaction, when authenticated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_reaction: Option<ReactionKind>,
}

/// Payload for creating a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    /// Target community.
    pub community_id: u64,
    /// Post title.
    pub title: String,
    /// Text body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// External link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ============================================================================
// Reactions
// ============================================================================

/// The kind of reaction a user can place on content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    /// Positive reaction.
    Upvote,
    /// Negative reaction.
    Downvote,
}

/// Payload for placing a reaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    /// Which reaction to place.
    pub kind: ReactionKind,
}
