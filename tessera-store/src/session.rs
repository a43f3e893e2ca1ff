//! Authenticated-session state: cookie jar + "was authenticated" flag.
//!
//! The two halves are stored independently and must never be conflated:
//!
//! - The **cookie jar** holds server-issued session cookies, persisted to
//!   an app-private JSON file so the session survives a process restart.
//! - The **flag** records that this installation authenticated at some
//!   point, in the system keychain. A restored flag does not guarantee a
//!   valid session; callers re-verify with a `whoami` call before trusting
//!   it.
//!
//! Requests snapshot their `Cookie` header at dispatch time, so a
//! concurrent [`SessionStore::clear_all`] (logout, account deletion,
//! base-URL change) never affects calls already in flight.

use chrono::{DateTime, Utc};
use keyring::Entry;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::persistence::{default_cookies_path, load_json, remove_file_if_exists, save_json};

/// Keychain service name for Tessera credentials.
const KEYCHAIN_SERVICE: &str = "Tessera";

/// Keychain account under which the session flag is stored.
const KEYCHAIN_SESSION_FLAG: &str = "session-authenticated";

// ============================================================================
// Cookie
// ============================================================================

/// A single session cookie as captured from a `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Host scope, without a leading dot.
    pub domain: String,
    /// Path scope.
    #[serde(default = "default_cookie_path")]
    pub path: String,
    /// Expiry instant; `None` means session-lifetime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    /// Secure attribute.
    #[serde(default)]
    pub secure: bool,
    /// HttpOnly attribute.
    #[serde(default)]
    pub http_only: bool,
}

fn default_cookie_path() -> String {
    "/".to_string()
}

impl Cookie {
    /// Parses a `Set-Cookie` header value.
    ///
    /// `default_domain` scopes cookies whose header carries no `Domain`
    /// attribute. Returns `None` for headers without a `name=value` pair.
    pub fn parse_set_cookie(header: &str, default_domain: &str) -> Option<Self> {
        let mut segments = header.split(';').map(str::trim);

        let (name, value) = segments.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut cookie = Self {
            name: name.to_string(),
            value: value.trim().to_string(),
            domain: default_domain.trim_start_matches('.').to_string(),
            path: default_cookie_path(),
            expires: None,
            secure: false,
            http_only: false,
        };

        let mut max_age: Option<i64> = None;
        for segment in segments {
            let (key, val) = match segment.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => (segment, ""),
            };
            match key.to_ascii_lowercase().as_str() {
                "domain" if !val.is_empty() => {
                    cookie.domain = val.trim_start_matches('.').to_string();
                }
                "path" if !val.is_empty() => cookie.path = val.to_string(),
                "expires" => cookie.expires = parse_cookie_expiry(val),
                "max-age" => max_age = val.parse().ok(),
                "secure" => cookie.secure = true,
                "httponly" => cookie.http_only = true,
                _ => {}
            }
        }

        // Max-Age wins over Expires when both are present.
        if let Some(secs) = max_age {
            cookie.expires = Some(Utc::now() + chrono::Duration::seconds(secs));
        }

        Some(cookie)
    }

    /// Returns true if this cookie has expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }

    /// Returns true if this cookie applies to the given host.
    pub fn matches_host(&self, host: &str) -> bool {
        host == self.domain || host.ends_with(&format!(".{}", self.domain))
    }

    /// Identity for upserts: a later cookie replaces an earlier one with
    /// the same name, domain, and path.
    fn key(&self) -> (&str, &str, &str) {
        (&self.name, &self.domain, &self.path)
    }
}

/// Parses the `Expires` attribute (RFC 1123, always GMT).
fn parse_cookie_expiry(raw: &str) -> Option<DateTime<Utc>> {
    chrono::NaiveDateTime::parse_from_str(raw, "%a, %d %b %Y %H:%M:%S GMT")
        .ok()
        .map(|naive| naive.and_utc())
}

// ============================================================================
// Session Store
// ============================================================================

/// Process-wide authenticated-session state.
///
/// Cheap to clone; clones share the same jar.
#[derive(Debug, Clone)]
pub struct SessionStore {
    jar: Arc<RwLock<Vec<Cookie>>>,
    cookies_path: PathBuf,
}

impl SessionStore {
    /// Opens the session store at the default cookie jar location.
    pub async fn open_default() -> Self {
        Self::open(default_cookies_path()).await
    }

    /// Opens a session store backed by the given cookie jar file.
    ///
    /// A missing or unreadable jar yields an empty one: storage denial
    /// means "not authenticated", never a startup failure. Expired cookies
    /// are dropped on load.
    pub async fn open(cookies_path: PathBuf) -> Self {
        let mut cookies: Vec<Cookie> = match load_json(&cookies_path).await {
            Ok(cookies) => cookies,
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to load cookie jar, starting empty");
                Vec::new()
            }
        };

        let now = Utc::now();
        cookies.retain(|c| !c.is_expired(now));
        debug!(count = cookies.len(), "Cookie jar opened");

        Self {
            jar: Arc::new(RwLock::new(cookies)),
            cookies_path,
        }
    }

    // ========================================================================
    // Authenticated Flag
    // ========================================================================

    /// Records that this installation authenticated successfully.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Keychain`] if the system keychain denies the
    /// write.
    pub fn persist_authenticated(&self) -> Result<(), StoreError> {
        let entry = Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_SESSION_FLAG)
            .map_err(|e| StoreError::Keychain(e.to_string()))?;
        entry
            .set_password("true")
            .map_err(|e| StoreError::Keychain(e.to_string()))?;
        debug!("Authenticated flag persisted");
        Ok(())
    }

    /// Clears the authenticated flag. Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Keychain`] for keychain failures other than
    /// the flag not existing.
    pub fn clear_authenticated(&self) -> Result<(), StoreError> {
        let entry = Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_SESSION_FLAG)
            .map_err(|e| StoreError::Keychain(e.to_string()))?;
        match entry.delete_credential() {
            Ok(()) => {
                debug!("Authenticated flag cleared");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StoreError::Keychain(e.to_string())),
        }
    }

    /// Returns whether the authenticated flag is set.
    ///
    /// Fails closed: any keychain denial or absence reads as `false`.
    pub fn is_authenticated_flag_set(&self) -> bool {
        Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_SESSION_FLAG)
            .and_then(|entry| entry.get_password())
            .is_ok()
    }

    // ========================================================================
    // Cookie Jar
    // ========================================================================

    /// Captures cookies from `Set-Cookie` response headers and persists
    /// the jar.
    ///
    /// `host` scopes cookies that carry no `Domain` attribute.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the jar cannot be written to disk; the
    /// in-memory jar is updated regardless, so the running process keeps
    /// its session either way.
    pub async fn store_cookies(
        &self,
        host: &str,
        set_cookie_headers: &[String],
    ) -> Result<(), StoreError> {
        let parsed: Vec<Cookie> = set_cookie_headers
            .iter()
            .filter_map(|header| Cookie::parse_set_cookie(header, host))
            .collect();
        if parsed.is_empty() {
            return Ok(());
        }

        let snapshot = {
            let mut jar = self.jar.write().await;
            for cookie in parsed {
                jar.retain(|existing| existing.key() != cookie.key());
                debug!(name = %cookie.name, domain = %cookie.domain, "Cookie stored");
                jar.push(cookie);
            }
            let now = Utc::now();
            jar.retain(|c| !c.is_expired(now));
            jar.clone()
        };

        save_json(&self.cookies_path, &snapshot).await
    }

    /// Returns the unexpired cookies that apply to `host`.
    pub async fn cookies_for(&self, host: &str) -> Vec<Cookie> {
        let now = Utc::now();
        self.jar
            .read()
            .await
            .iter()
            .filter(|c| c.matches_host(host) && !c.is_expired(now))
            .cloned()
            .collect()
    }

    /// Formats the `Cookie` request header for `host`.
    ///
    /// Callers take this snapshot once per dispatch; a concurrent clear
    /// does not affect requests already carrying their header.
    pub async fn cookie_header(&self, host: &str) -> Option<String> {
        let cookies = self.cookies_for(host).await;
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|c| format!("{}={}", c.name, c.value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Returns true if the jar currently holds any unexpired cookie.
    pub async fn has_cookies(&self) -> bool {
        let now = Utc::now();
        self.jar.read().await.iter().any(|c| !c.is_expired(now))
    }

    // ========================================================================
    // Clearing
    // ========================================================================

    /// Clears the cookie jar, in memory and on disk.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the jar file cannot be removed.
    pub async fn clear_cookies(&self) -> Result<(), StoreError> {
        self.jar.write().await.clear();
        remove_file_if_exists(&self.cookies_path).await
    }

    /// Clears the flag and all cookies together.
    ///
    /// Used on logout, account deletion, and base-URL change. The
    /// in-memory jar is emptied first so no new dispatch can observe a
    /// partially cleared session; durable artifacts are then all
    /// attempted even if one of them fails. Keychain denial is tolerated
    /// (logged, not raised): an unreadable flag already reads as "not
    /// authenticated".
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the jar file cannot be removed.
    pub async fn clear_all(&self) -> Result<(), StoreError> {
        self.jar.write().await.clear();

        if let Err(e) = self.clear_authenticated() {
            warn!(error = %e, "Failed to clear authenticated flag");
        }
        remove_file_if_exists(&self.cookies_path).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // Keychain-backed flag operations require platform access and are
    // exercised as integration tests; these cover parsing and the jar.

    fn store_at(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore {
            jar: Arc::new(RwLock::new(Vec::new())),
            cookies_path: dir.path().join("cookies.json"),
        }
    }

    #[test]
    fn test_parse_basic_set_cookie() {
        let cookie =
            Cookie::parse_set_cookie("session=abc123; Path=/; Secure; HttpOnly", "tessera.social")
                .unwrap();
        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.domain, "tessera.social");
        assert_eq!(cookie.path, "/");
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert!(cookie.expires.is_none());
    }

    #[test]
    fn test_parse_domain_attribute_strips_leading_dot() {
        let cookie =
            Cookie::parse_set_cookie("session=v; Domain=.tessera.social", "api.tessera.social")
                .unwrap();
        assert_eq!(cookie.domain, "tessera.social");
        assert!(cookie.matches_host("tessera.social"));
        assert!(cookie.matches_host("api.tessera.social"));
        assert!(!cookie.matches_host("other.example"));
    }

    #[test]
    fn test_parse_expires_attribute() {
        let cookie = Cookie::parse_set_cookie(
            "session=v; Expires=Wed, 21 Oct 2015 07:28:00 GMT",
            "tessera.social",
        )
        .unwrap();
        assert!(cookie.is_expired(Utc::now()));
    }

    #[test]
    fn test_max_age_wins_over_expires() {
        let cookie = Cookie::parse_set_cookie(
            "session=v; Expires=Wed, 21 Oct 2015 07:28:00 GMT; Max-Age=3600",
            "tessera.social",
        )
        .unwrap();
        assert!(!cookie.is_expired(Utc::now()));
    }

    #[test]
    fn test_parse_rejects_header_without_pair() {
        assert!(Cookie::parse_set_cookie("garbage", "tessera.social").is_none());
        assert!(Cookie::parse_set_cookie("=nameless", "tessera.social").is_none());
    }

    #[tokio::test]
    async fn test_store_and_read_back_cookies() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        store
            .store_cookies("tessera.social", &["session=abc; Path=/".to_string()])
            .await
            .unwrap();

        let header = store.cookie_header("tessera.social").await.unwrap();
        assert_eq!(header, "session=abc");
        assert!(store.cookie_header("evil.example").await.is_none());
    }

    #[tokio::test]
    async fn test_later_cookie_replaces_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        store
            .store_cookies("tessera.social", &["session=old".to_string()])
            .await
            .unwrap();
        store
            .store_cookies("tessera.social", &["session=new".to_string()])
            .await
            .unwrap();

        let header = store.cookie_header("tessera.social").await.unwrap();
        assert_eq!(header, "session=new");
    }

    #[tokio::test]
    async fn test_jar_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        {
            let store = SessionStore {
                jar: Arc::new(RwLock::new(Vec::new())),
                cookies_path: path.clone(),
            };
            store
                .store_cookies("tessera.social", &["session=persisted".to_string()])
                .await
                .unwrap();
        }

        // Fresh store over the same path, as after a process restart.
        let reopened = SessionStore::open(path).await;
        let header = reopened.cookie_header("tessera.social").await.unwrap();
        assert_eq!(header, "session=persisted");
    }

    #[tokio::test]
    async fn test_expired_cookies_dropped_on_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        {
            let store = SessionStore {
                jar: Arc::new(RwLock::new(Vec::new())),
                cookies_path: path.clone(),
            };
            store
                .store_cookies(
                    "tessera.social",
                    &[
                        "stale=v; Expires=Wed, 21 Oct 2015 07:28:00 GMT".to_string(),
                        "fresh=v; Max-Age=86400".to_string(),
                    ],
                )
                .await
                .unwrap();
        }

        let reopened = SessionStore::open(path).await;
        let header = reopened.cookie_header("tessera.social").await.unwrap();
        assert_eq!(header, "fresh=v");
    }

    #[tokio::test]
    async fn test_clear_cookies_empties_jar_and_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        store
            .store_cookies("tessera.social", &["session=abc".to_string()])
            .await
            .unwrap();
        store.clear_cookies().await.unwrap();

        assert!(!store.has_cookies().await);
        assert!(!dir.path().join("cookies.json").exists());
    }

    #[tokio::test]
    async fn test_snapshot_at_dispatch_semantics() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        store
            .store_cookies("tessera.social", &["session=abc".to_string()])
            .await
            .unwrap();

        // A dispatch captures its header, then a logout clears the jar.
        let captured = store.cookie_header("tessera.social").await.unwrap();
        store.clear_cookies().await.unwrap();

        // The in-flight request still carries the captured snapshot while
        // new dispatches see nothing.
        assert_eq!(captured, "session=abc");
        assert!(store.cookie_header("tessera.social").await.is_none());
    }
}
