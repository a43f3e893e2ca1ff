//! Post feed and post mutations.

use async_trait::async_trait;
use tessera_core::{NewPost, Paged, Post, Reaction, ReactionKind};
use tracing::instrument;

use super::page_query;
use crate::client::ApiClient;
use crate::cursor::PageLoader;
use crate::error::ApiError;

/// Posts endpoints.
#[derive(Debug, Clone)]
pub struct PostService {
    api: ApiClient,
}

impl PostService {
    /// Creates the service over a client handle.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetches one page of the home feed.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn feed(&self, offset: u64, limit: u32) -> Result<Paged<Post>, ApiError> {
        self.api.get("posts", &page_query(offset, limit)).await
    }

    /// Fetches a single post.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn get(&self, id: u64) -> Result<Post, ApiError> {
        self.api.get(&format!("posts/{id}"), &[]).await
    }

    /// Creates a post.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    #[instrument(skip(self, new_post), fields(community_id = new_post.community_id))]
    pub async fn create(&self, new_post: &NewPost) -> Result<Post, ApiError> {
        self.api.post("posts", new_post).await
    }

    /// Places or replaces the calling user's reaction on a post, returning
    /// the updated post.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn react(&self, post_id: u64, kind: ReactionKind) -> Result<Post, ApiError> {
        self.api
            .post(&format!("posts/{post_id}/reactions"), &Reaction { kind })
            .await
    }

    /// Removes the calling user's reaction, returning the updated post.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn retract_reaction(&self, post_id: u64) -> Result<Post, ApiError> {
        self.api.delete(&format!("posts/{post_id}/reactions")).await
    }

    /// Page loader over the home feed, for cursor composition.
    pub fn feed_loader(&self) -> FeedLoader {
        FeedLoader {
            service: self.clone(),
        }
    }
}

/// [`PageLoader`] over the home feed.
#[derive(Debug, Clone)]
pub struct FeedLoader {
    service: PostService,
}

#[async_trait]
impl PageLoader<Post> for FeedLoader {
    async fn load(&self, offset: u64, limit: u32) -> Result<Paged<Post>, ApiError> {
        self.service.feed(offset, limit).await
    }
}
