//! Comments, flat on the wire and as a client-side forest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::person::Person;
use crate::codec::{wire_instant, wire_instant_opt};

// ============================================================================
// Wire Comment
// ============================================================================

/// A single comment as the server returns it: flat, threaded only through
/// `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier.
    pub id: u64,
    /// The post this comment belongs to.
    pub post_id: u64,
    /// Parent comment; `None` for top-level comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    /// Comment author.
    pub author: Person,
    /// Plain-text content.
    pub text: String,
    /// Optional rich-text rendering of the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rich_text: Option<String>,
    /// When the comment was created.
    #[serde(with = "wire_instant")]
    pub created_at: DateTime<Utc>,
    /// When the comment was last edited, if ever.
    #[serde(default, with = "wire_instant_opt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Whether the comment was soft-deleted by its author or a moderator.
    #[serde(default)]
    pub deleted: bool,
}

/// Payload for creating a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    /// The post to comment on.
    pub post_id: u64,
    /// Parent comment for replies; `None` for top-level comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    /// Plain-text content.
    pub text: String,
}

// ============================================================================
// Comment Forest
// ============================================================================

/// A comment together with its nested replies.
///
/// Multiple roots under a post form a forest. The forest is owned by the
/// response that produced it; tree operations return new forests rather
/// than mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    /// The comment at this node.
    pub comment: Comment,
    /// Direct replies, in server order.
    #[serde(default)]
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    /// Wraps a flat comment into a leaf node.
    pub fn leaf(comment: Comment) -> Self {
        Self {
            comment,
            children: Vec::new(),
        }
    }

    /// Counts this node plus all descendants.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(CommentNode::subtree_len)
            .sum::<usize>()
    }
}
