// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Tessera Core
//!
//! Core types and wire models for the Tessera community platform client.
//!
//! This crate provides the foundational pieces shared by all other Tessera
//! crates, with no I/O of its own:
//!
//! - Domain models (posts, comments, communities, people, notifications)
//! - The pagination envelope every list endpoint follows
//! - The structured error envelope servers return on failure paths
//! - The wire codec (JSON bytes <-> typed values, timestamp normalization)
//!
//! ## Key Types
//!
//! ### Content
//! - [`Post`] / [`NewPost`] - Posts and the create payload
//! - [`Comment`] / [`NewComment`] - Flat comments as the server returns them
//! - [`CommentNode`] - A comment with its nested replies (client-side forest)
//! - [`Community`] - A community and its follow state
//! - [`Reaction`] / [`ReactionKind`] - Reactions on posts and comments
//!
//! ### People & Notifications
//! - [`Person`] - Author identity
//! - [`Notification`] / [`NotificationKind`] - Inbox entries
//!
//! ### Protocol
//! - [`Page`] - Offset/limit/has_more pagination metadata
//! - [`Paged`] - A page of items plus its [`Page`] metadata
//! - [`ErrorEnvelope`] - The `{"error": {code, message}}` failure shape

pub mod codec;
pub mod error;
pub mod models;

// Re-export error types
pub use codec::CodecError;
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // People
    Person,
    // Posts & reactions
    NewPost,
    Post,
    Reaction,
    ReactionKind,
    // Comments
    Comment,
    CommentNode,
    NewComment,
    // Communities
    Community,
    // Notifications
    Notification,
    NotificationKind,
    UnreadCount,
    // Auth
    LoginRequest,
    LoginResponse,
    // Protocol envelopes
    Acknowledged,
    ErrorBody,
    ErrorEnvelope,
    Page,
    Paged,
};
