//! CLI command implementations.

pub mod comments;
pub mod config;
pub mod feed;
pub mod home;
pub mod notifications;
pub mod session;

use anyhow::Result;
use tessera_client::ApiClient;
use tessera_store::{SessionStore, SettingsStore};

/// Shared handles every data command starts from: persisted settings and
/// a client bound to the configured base URL, reading the persisted
/// session.
pub struct Services {
    /// Persisted user preferences.
    pub settings: SettingsStore,
    /// Client bound to the configured backend.
    pub api: ApiClient,
}

impl Services {
    /// Loads stores from their default locations and builds the client.
    pub async fn init() -> Result<Self> {
        let settings = SettingsStore::load_default().await;
        let session = SessionStore::open_default().await;
        let api = ApiClient::new(&settings.get().await, session)?;
        Ok(Self { settings, api })
    }
}
