//! The fan-out home screen load.

use serde::Serialize;
use tessera_core::{Paged, Person, Post, UnreadCount};
use tracing::instrument;

use super::{AuthService, NotificationService, PostService};
use crate::client::ApiClient;
use crate::error::ApiError;

/// Everything the home screen needs in one shot.
#[derive(Debug, Clone, Serialize)]
pub struct HomeSummary {
    /// The calling user.
    pub user: Person,
    /// First page of the feed.
    pub feed: Paged<Post>,
    /// Unread notification count.
    pub unread: UnreadCount,
}

/// Aggregated load for the home screen.
#[derive(Debug, Clone)]
pub struct HomeService {
    auth: AuthService,
    posts: PostService,
    notifications: NotificationService,
}

impl HomeService {
    /// Creates the service over a client handle.
    pub fn new(api: ApiClient) -> Self {
        Self {
            auth: AuthService::new(api.clone()),
            posts: PostService::new(api.clone()),
            notifications: NotificationService::new(api),
        }
    }

    /// Loads the home screen: three independent fetches dispatched
    /// concurrently and joined.
    ///
    /// All three calls run to completion - one failing does not cancel
    /// its siblings - and the aggregate fails if any single call failed.
    ///
    /// # Errors
    ///
    /// The first failing call's [`ApiError`].
    #[instrument(skip(self))]
    pub async fn load(&self, feed_limit: u32) -> Result<HomeSummary, ApiError> {
        let (user, feed, unread) = tokio::join!(
            self.auth.whoami(),
            self.posts.feed(0, feed_limit),
            self.notifications.unread_count(),
        );

        Ok(HomeSummary {
            user: user?,
            feed: feed?,
            unread: unread?,
        })
    }
}
