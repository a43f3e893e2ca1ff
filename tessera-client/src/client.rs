//! The typed HTTP client every feature service depends on.
//!
//! [`ApiClient`] issues GET/POST/PUT/DELETE with a typed request body and
//! a typed response body or a classified [`ApiError`]. The pipeline for
//! every call:
//!
//! 1. build the URL under the versioned API prefix (failure is
//!    [`ApiError::InvalidRequest`], before any network activity)
//! 2. encode the body through the wire codec
//! 3. snapshot the session cookie header from the store
//! 4. dispatch with a per-request timeout (reqwest) and a longer
//!    total-resource timeout (tokio); either elapsing classifies as
//!    transport failure
//! 5. capture `Set-Cookie` headers back into the store
//! 6. classify the `(status, body)` pair - see [`crate::classify`]
//!
//! The client is cheap to clone and safe to call from concurrent tasks.
//! Data calls never retry internally.

use reqwest::{header, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tessera_store::{SessionStore, Settings};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::classify;
use crate::error::ApiError;
use tessera_core::codec;

/// Versioned prefix all endpoints live under.
const API_PREFIX: &str = "api/v1";

/// User agent string for the Tessera client.
const USER_AGENT: &str = concat!("tessera/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Api Client
// ============================================================================

/// Typed HTTP client bound to one base URL and one session store.
///
/// Constructed once at process start and handed to feature services; a
/// base-URL change (which also clears the session) is followed by
/// constructing a fresh client for the new host.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
    resource_timeout: Duration,
}

impl ApiClient {
    /// Creates a client from user settings and the shared session store.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the configured base URL is
    /// unusable, or [`ApiError::Transport`] if the HTTP stack cannot be
    /// built (broken TLS configuration).
    pub fn new(settings: &Settings, session: SessionStore) -> Result<Self, ApiError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid base URL: {e}")))?;
        if base_url.host_str().is_none() {
            return Err(ApiError::InvalidRequest(format!(
                "base URL has no host: {}",
                settings.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::transport)?;

        Ok(Self {
            http,
            base_url,
            session,
            resource_timeout: Duration::from_secs(settings.resource_timeout_secs),
        })
    }

    /// The session store this client reads cookies from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Host the client is bound to.
    pub fn host(&self) -> &str {
        // Validated host presence in `new`.
        self.base_url.host_str().unwrap_or_default()
    }

    // ========================================================================
    // Typed Verbs
    // ========================================================================

    /// Performs a typed GET.
    ///
    /// A failing status short-circuits to error-envelope interpretation;
    /// the success type is only attempted against 2xx bodies.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.build_url(path, query)?;
        let (status, body) = self.execute(Method::GET, url, None).await?;
        classify::classify_read(status, &body)
    }

    /// Performs a typed POST with a JSON body.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(path, &[])?;
        let bytes = codec::encode(body).map_err(ApiError::Encode)?;
        let (status, body) = self.execute(Method::POST, url, Some(bytes)).await?;
        classify::classify_write(status, &body)
    }

    /// Performs a typed POST without a body.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.build_url(path, &[])?;
        let (status, body) = self.execute(Method::POST, url, None).await?;
        classify::classify_write(status, &body)
    }

    /// Performs a typed PUT with a JSON body.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(path, &[])?;
        let bytes = codec::encode(body).map_err(ApiError::Encode)?;
        let (status, body) = self.execute(Method::PUT, url, Some(bytes)).await?;
        classify::classify_write(status, &body)
    }

    /// Performs a typed DELETE.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.build_url(path, &[])?;
        let (status, body) = self.execute(Method::DELETE, url, None).await?;
        classify::classify_write(status, &body)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Joins a relative endpoint path onto the versioned base URL.
    ///
    /// Query strings and fragments belong in the `query` argument, never
    /// in the path.
    fn build_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        if path.contains(['?', '#']) || path.contains(char::is_whitespace) {
            return Err(ApiError::InvalidRequest(format!(
                "malformed endpoint path {path:?}"
            )));
        }
        let trimmed = path.trim_matches('/');
        let joined = format!(
            "{}/{API_PREFIX}/{trimmed}",
            self.base_url.as_str().trim_end_matches('/')
        );
        let mut url = Url::parse(&joined)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid path {path:?}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Dispatches a request and returns the raw `(status, body)` pair.
    ///
    /// The session cookie header is snapshotted here, once per dispatch;
    /// a concurrent logout does not affect this call. `Set-Cookie`
    /// headers on the response are captured back into the store, with
    /// persistence failures logged rather than failing a successful call.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let host = self.host().to_string();

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie_header) = self.session.cookie_header(&host).await {
            request = request.header(header::COOKIE, cookie_header);
        }
        if let Some(bytes) = body {
            request = request.body(bytes);
        }

        debug!(method = %method, "Dispatching request");
        let outcome = tokio::time::timeout(self.resource_timeout, async {
            let response = request.send().await?;
            let status = response.status();
            let set_cookies: Vec<String> = response
                .headers()
                .get_all(header::SET_COOKIE)
                .iter()
                .filter_map(|v| v.to_str().ok().map(str::to_string))
                .collect();
            let bytes = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, set_cookies, bytes.to_vec()))
        })
        .await
        .map_err(|_| ApiError::timeout(self.resource_timeout))?;

        let (status, set_cookies, bytes) = outcome.map_err(ApiError::transport)?;
        debug!(status = %status, bytes = bytes.len(), "Response received");

        if !set_cookies.is_empty() {
            if let Err(e) = self.session.store_cookies(&host, &set_cookies).await {
                warn!(error = %e, "Failed to persist session cookies");
            }
        }

        Ok((status, bytes))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_client(base_url: &str) -> ApiClient {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::open(dir.path().join("cookies.json")).await;
        let settings = Settings {
            base_url: base_url.to_string(),
            ..Settings::default()
        };
        ApiClient::new(&settings, session).unwrap()
    }

    #[tokio::test]
    async fn test_build_url_joins_versioned_prefix() {
        let client = test_client("https://tessera.social").await;
        let url = client.build_url("posts/42/comments", &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://tessera.social/api/v1/posts/42/comments"
        );
    }

    #[tokio::test]
    async fn test_build_url_appends_query_pairs() {
        let client = test_client("https://tessera.social").await;
        let url = client
            .build_url(
                "posts",
                &[("offset", "18".to_string()), ("limit", "20".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://tessera.social/api/v1/posts?offset=18&limit=20"
        );
    }

    #[tokio::test]
    async fn test_build_url_tolerates_leading_slash() {
        let client = test_client("https://tessera.social/").await;
        let url = client.build_url("/me", &[]).unwrap();
        assert_eq!(url.as_str(), "https://tessera.social/api/v1/me");
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_rejected_before_any_call() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::open(dir.path().join("cookies.json")).await;
        let settings = Settings {
            base_url: "not a url".to_string(),
            ..Settings::default()
        };
        let err = ApiClient::new(&settings, session).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_path_with_inline_query_is_invalid_request() {
        let client = test_client("https://tessera.social").await;
        let err = client.build_url("posts?offset=0", &[]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
