//! Authentication and session lifecycle.
//!
//! Authentication is cookie-based: a successful login response carries
//! the session cookie, which the client captures into the session store
//! as a side effect of the call itself. This service only manages the
//! "was authenticated" flag and the session-destroying transitions.

use tessera_core::{Acknowledged, LoginRequest, LoginResponse, Person};
use tracing::{debug, info, instrument, warn};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Auth endpoints and silent session verification.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    /// Creates the service over a client handle.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Logs in with a username (or email) and password.
    ///
    /// On success the session cookie has already been captured by the
    /// client; this additionally persists the authenticated flag. A
    /// denied flag write is logged, not raised - the login itself
    /// succeeded and the running process has its session.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind; bad credentials arrive as
    /// [`ApiError::Server`] with the server's error code.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username_or_email: &str, password: &str) -> Result<Person, ApiError> {
        let request = LoginRequest {
            username_or_email: username_or_email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.api.post("auth/login", &request).await?;

        if let Err(e) = self.api.session().persist_authenticated() {
            warn!(error = %e, "Could not persist authenticated flag");
        }
        info!(user = %response.user.username, "Logged in");
        Ok(response.user)
    }

    /// Logs out.
    ///
    /// Local session state is destroyed regardless of whether the server
    /// call succeeds; there is no meaningful recovery from a failed
    /// logout besides discarding the session locally.
    ///
    /// # Errors
    ///
    /// The server call's [`ApiError`], after local state is cleared.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result: Result<Acknowledged, ApiError> = self.api.post_empty("auth/logout").await;

        if let Err(e) = self.api.session().clear_all().await {
            warn!(error = %e, "Could not clear session state");
        }
        info!("Logged out");
        result.map(|_| ())
    }

    /// Fetches the calling user.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind.
    pub async fn whoami(&self) -> Result<Person, ApiError> {
        self.api.get("me", &[]).await
    }

    /// Silently verifies a restored session at startup.
    ///
    /// The persisted flag only means verification is worth attempting.
    /// Returns `Ok(Some(user))` for a live session. When the server
    /// rejects the session (expired cookie and the like), local session
    /// state is cleared and the result is `Ok(None)` - never an error
    /// dialog for a background check. Transport failures propagate: an
    /// offline start says nothing about session validity.
    ///
    /// # Errors
    ///
    /// Non-session failures only (transport, malformed or undecodable
    /// responses).
    #[instrument(skip(self))]
    pub async fn verify_session(&self) -> Result<Option<Person>, ApiError> {
        let session = self.api.session();
        if !session.is_authenticated_flag_set() && !session.has_cookies().await {
            debug!("No restored session to verify");
            return Ok(None);
        }

        match self.whoami().await {
            Ok(user) => {
                // Repair the flag if only the cookies survived.
                if let Err(e) = session.persist_authenticated() {
                    warn!(error = %e, "Could not persist authenticated flag");
                }
                Ok(Some(user))
            }
            Err(ApiError::Server { code, .. }) => {
                info!(code = %code, "Stored session rejected, transitioning to logged out");
                if let Err(e) = session.clear_all().await {
                    warn!(error = %e, "Could not clear rejected session");
                }
                Ok(None)
            }
            Err(other) => Err(other),
        }
    }

    /// Whether the current session is worth treating as authenticated.
    ///
    /// This is the session-validity signal exposed to companion
    /// collaborators (e.g. device-token registration); it reflects local
    /// state only and does not call the server.
    pub async fn has_session(&self) -> bool {
        self.api.session().is_authenticated_flag_set() || self.api.session().has_cookies().await
    }

    /// Deletes the calling user's account and destroys the session.
    ///
    /// # Errors
    ///
    /// One classified [`ApiError`] kind; local state is only cleared
    /// after the server confirms the deletion.
    #[instrument(skip(self))]
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        let _: Acknowledged = self.api.delete("me").await?;
        if let Err(e) = self.api.session().clear_all().await {
            warn!(error = %e, "Could not clear session after account deletion");
        }
        info!("Account deleted");
        Ok(())
    }
}
