//! Comments under a post.

use async_trait::async_trait;
use tessera_core::{Comment, CommentNode, NewComment, Paged};

use super::page_query;
use crate::client::ApiClient;
use crate::cursor::PageLoader;
use crate::error::ApiError;
use crate::tree::build_forest;

/// Comment endpoints.
#[derive(Debug, Clone)]
pub struct CommentService {
    api: ApiClient,
}

impl CommentService {
    /// Creates the service over a client handle.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetches one flat page of a post's comments, in server order.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn for_post(
        &self,
        post_id: u64,
        offset: u64,
        limit: u32,
    ) -> Result<Paged<Comment>, ApiError> {
        self.api
            .get(
                &format!("posts/{post_id}/comments"),
                &page_query(offset, limit),
            )
            .await
    }

    /// Fetches one page of a post's comments assembled into a forest.
    ///
    /// Replies whose parent sits on another page are promoted to roots;
    /// see [`build_forest`].
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn thread(
        &self,
        post_id: u64,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<CommentNode>, ApiError> {
        let page = self.for_post(post_id, offset, limit).await?;
        Ok(build_forest(page.items))
    }

    /// Creates a comment or reply.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn create(&self, new_comment: &NewComment) -> Result<Comment, ApiError> {
        self.api
            .post(
                &format!("posts/{}/comments", new_comment.post_id),
                new_comment,
            )
            .await
    }

    /// Page loader over a post's flat comments, for cursor composition.
    pub fn comments_loader(&self, post_id: u64) -> CommentsLoader {
        CommentsLoader {
            service: self.clone(),
            post_id,
        }
    }
}

/// [`PageLoader`] over one post's comments.
#[derive(Debug, Clone)]
pub struct CommentsLoader {
    service: CommentService,
    post_id: u64,
}

#[async_trait]
impl PageLoader<Comment> for CommentsLoader {
    async fn load(&self, offset: u64, limit: u32) -> Result<Paged<Comment>, ApiError> {
        self.service.for_post(self.post_id, offset, limit).await
    }
}
