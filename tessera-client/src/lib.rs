// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Tessera Client
//!
//! The data-access layer for the Tessera platform: a typed HTTP client,
//! a closed error taxonomy, the shared pagination cursor, the comment
//! forest algorithms, and thin feature services over the API.
//!
//! Every call through [`ApiClient`] either returns a fully decoded typed
//! value or fails with exactly one [`ApiError`] kind - never a partially
//! decoded value and never an unclassified raw error. Data calls carry no
//! built-in retry; retry policy belongs to callers.
//!
//! ## Layout
//!
//! - [`client`] - [`ApiClient`], the generic GET/POST/PUT/DELETE contract
//! - [`error`] / [`classify`] - [`ApiError`] and response classification
//! - [`cursor`] - [`PageCursor`], the refresh/load-more state machine
//! - [`tree`] - comment forest assembly and filtering
//! - [`services`] - auth, posts, comments, communities, notifications,
//!   and the fan-out home load

pub mod classify;
pub mod client;
pub mod cursor;
pub mod error;
pub mod services;
pub mod tree;

pub use client::ApiClient;
pub use cursor::{CursorPhase, PageCursor, PageLoader};
pub use error::ApiError;
pub use services::{
    AuthService, CommentService, CommunityService, HomeService, HomeSummary,
    NotificationService, PostService,
};
pub use tree::{build_forest, filter_forest};
