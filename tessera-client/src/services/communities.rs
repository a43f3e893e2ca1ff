//! Communities and follow state.

use async_trait::async_trait;
use tessera_core::{Community, Paged};

use super::page_query;
use crate::client::ApiClient;
use crate::cursor::PageLoader;
use crate::error::ApiError;

/// Community endpoints.
#[derive(Debug, Clone)]
pub struct CommunityService {
    api: ApiClient,
}

impl CommunityService {
    /// Creates the service over a client handle.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetches one page of communities.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn list(&self, offset: u64, limit: u32) -> Result<Paged<Community>, ApiError> {
        self.api.get("communities", &page_query(offset, limit)).await
    }

    /// Fetches a single community by slug.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn get(&self, slug: &str) -> Result<Community, ApiError> {
        self.api.get(&format!("communities/{slug}"), &[]).await
    }

    /// Follows a community, returning its updated state.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn follow(&self, id: u64) -> Result<Community, ApiError> {
        self.api
            .post_empty(&format!("communities/{id}/follow"))
            .await
    }

    /// Unfollows a community, returning its updated state.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn unfollow(&self, id: u64) -> Result<Community, ApiError> {
        self.api.delete(&format!("communities/{id}/follow")).await
    }

    /// Page loader over the community list, for cursor composition.
    pub fn list_loader(&self) -> CommunitiesLoader {
        CommunitiesLoader {
            service: self.clone(),
        }
    }
}

/// [`PageLoader`] over the community list.
#[derive(Debug, Clone)]
pub struct CommunitiesLoader {
    service: CommunityService,
}

#[async_trait]
impl PageLoader<Community> for CommunitiesLoader {
    async fn load(&self, offset: u64, limit: u32) -> Result<Paged<Community>, ApiError> {
        self.service.list(offset, limit).await
    }
}
