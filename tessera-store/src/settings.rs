//! User preferences store.
//!
//! Holds the runtime-configurable backend base URL and client tuning
//! knobs, persisted as app-private JSON.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json, save_json};
use crate::session::SessionStore;

/// Production backend host.
pub const DEFAULT_BASE_URL: &str = "https://tessera.social";

// ============================================================================
// Settings
// ============================================================================

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend base URL. Sessions are scoped to this host.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Total-resource timeout in seconds; bounds the whole call including
    /// body transfer. Always longer than the request timeout.
    pub resource_timeout_secs: u64,

    /// Page size used when an endpoint caller does not pick one.
    pub default_page_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            resource_timeout_secs: 120,
            default_page_limit: 20,
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persisted user preferences with shared in-memory state.
///
/// Cheap to clone; clones share the same settings.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
}

impl SettingsStore {
    /// Loads settings from the default path.
    pub async fn load_default() -> Self {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path, falling back to defaults on any
    /// missing or unreadable file.
    pub async fn load(path: PathBuf) -> Self {
        let settings = match load_json(&path).await {
            Ok(settings) => settings,
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Settings file not found, using defaults");
                Settings::default()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load settings, using defaults");
                Settings::default()
            }
        };

        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
        }
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings in place.
    ///
    /// The base URL must go through [`Self::set_base_url`] instead, so
    /// the session-clearing rule cannot be bypassed.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.settings.write().await;
        let base_url = settings.base_url.clone();
        f(&mut settings);
        settings.base_url = base_url;
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the file cannot be written.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Changes the backend base URL.
    ///
    /// Session state is host-scoped: stale cookies sent to a different
    /// backend are a security hazard, so the session store is cleared in
    /// full BEFORE the new URL becomes visible to dispatches. Setting the
    /// current value again is a no-op and keeps the session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] for an unparsable or host-less URL,
    /// or the session/persistence failure encountered while switching.
    pub async fn set_base_url(
        &self,
        new_url: &str,
        session: &SessionStore,
    ) -> Result<(), StoreError> {
        let parsed =
            Url::parse(new_url).map_err(|e| StoreError::Config(format!("invalid base URL: {e}")))?;
        if parsed.host_str().is_none() {
            return Err(StoreError::Config(format!("base URL has no host: {new_url}")));
        }
        let normalized = new_url.trim_end_matches('/').to_string();

        {
            let settings = self.settings.read().await;
            if settings.base_url == normalized {
                return Ok(());
            }
        }

        session.clear_all().await?;
        info!(base_url = %normalized, "Base URL changed, session cleared");

        self.settings.write().await.base_url = normalized;
        self.save().await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.json")).await;
        let settings = store.get().await;
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_settings_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        {
            let store = SettingsStore::load(path.clone()).await;
            store.update(|s| s.default_page_limit = 50).await;
            store.save().await.unwrap();
        }

        let reopened = SettingsStore::load(path).await;
        assert_eq!(reopened.get().await.default_page_limit, 50);
    }

    #[tokio::test]
    async fn test_update_cannot_bypass_base_url_rule() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.json")).await;

        store
            .update(|s| s.base_url = "https://evil.example".to_string())
            .await;
        assert_eq!(store.get().await.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_set_base_url_rejects_invalid_urls() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.json")).await;
        let session = SessionStore::open(dir.path().join("cookies.json")).await;

        assert!(store.set_base_url("not a url", &session).await.is_err());
        assert!(store.set_base_url("file:///tmp", &session).await.is_err());
    }

    #[tokio::test]
    async fn test_set_base_url_clears_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.json")).await;
        let session = SessionStore::open(dir.path().join("cookies.json")).await;

        session
            .store_cookies("tessera.social", &["session=abc".to_string()])
            .await
            .unwrap();

        store
            .set_base_url("https://staging.tessera.social", &session)
            .await
            .unwrap();

        assert!(!session.has_cookies().await);
        assert_eq!(
            store.get().await.base_url,
            "https://staging.tessera.social"
        );
    }

    #[tokio::test]
    async fn test_set_same_base_url_keeps_session_cookies() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.json")).await;
        let session = SessionStore::open(dir.path().join("cookies.json")).await;

        session
            .store_cookies("tessera.social", &["session=abc".to_string()])
            .await
            .unwrap();

        store
            .set_base_url(DEFAULT_BASE_URL, &session)
            .await
            .unwrap();
        assert!(session.has_cookies().await);
    }
}
