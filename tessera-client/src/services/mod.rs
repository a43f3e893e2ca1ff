//! Feature services over the typed client.
//!
//! Each service is a thin wrapper owning an [`ApiClient`](crate::ApiClient)
//! clone: it knows its endpoint paths and types, and nothing about
//! transport, sessions, or classification. List endpoints also expose a
//! [`PageLoader`](crate::PageLoader) adapter so view-state can drive them
//! through a [`PageCursor`](crate::PageCursor).

mod auth;
mod comments;
mod communities;
mod home;
mod notifications;
mod posts;

pub use auth::AuthService;
pub use comments::{CommentService, CommentsLoader};
pub use communities::{CommunitiesLoader, CommunityService};
pub use home::{HomeService, HomeSummary};
pub use notifications::{NotificationService, NotificationsLoader};
pub use posts::{FeedLoader, PostService};

/// Standard pagination query pairs.
pub(crate) fn page_query(offset: u64, limit: u32) -> [(&'static str, String); 2] {
    [("offset", offset.to_string()), ("limit", limit.to_string())]
}
