//! Inbox notifications.

use async_trait::async_trait;
use tessera_core::{Notification, Paged, UnreadCount};

use super::page_query;
use crate::client::ApiClient;
use crate::cursor::PageLoader;
use crate::error::ApiError;

/// Notification endpoints.
#[derive(Debug, Clone)]
pub struct NotificationService {
    api: ApiClient,
}

impl NotificationService {
    /// Creates the service over a client handle.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetches one page of the inbox.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn list(&self, offset: u64, limit: u32) -> Result<Paged<Notification>, ApiError> {
        self.api
            .get("notifications", &page_query(offset, limit))
            .await
    }

    /// Marks a notification as read, returning its updated state.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn mark_read(&self, id: u64) -> Result<Notification, ApiError> {
        self.api
            .post_empty(&format!("notifications/{id}/read"))
            .await
    }

    /// Fetches the unread badge count.
    ///
    /// Background refreshes of this count are best-effort: callers that
    /// poll it periodically are expected to drop the error rather than
    /// surface it to the user.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn unread_count(&self) -> Result<UnreadCount, ApiError> {
        self.api.get("notifications/unread_count", &[]).await
    }

    /// Page loader over the inbox, for cursor composition.
    pub fn list_loader(&self) -> NotificationsLoader {
        NotificationsLoader {
            service: self.clone(),
        }
    }
}

/// [`PageLoader`] over the inbox.
#[derive(Debug, Clone)]
pub struct NotificationsLoader {
    service: NotificationService,
}

#[async_trait]
impl PageLoader<Notification> for NotificationsLoader {
    async fn load(&self, offset: u64, limit: u32) -> Result<Paged<Notification>, ApiError> {
        self.service.list(offset, limit).await
    }
}
