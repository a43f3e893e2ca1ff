//! Authentication payloads.
//!
//! Authentication is cookie-based: the login response carries a
//! server-issued session cookie, not a token in the body.

use serde::{Deserialize, Serialize};

use super::person::Person;

/// Payload for the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username or registered email address.
    pub username_or_email: String,
    /// Account password.
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The authenticated user.
    pub user: Person,
}
