// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Tessera Store
//!
//! Durable local state for the Tessera client.
//!
//! This crate owns the two pieces of state that must survive a process
//! restart:
//!
//! - **SessionStore**: the authenticated-session cookie jar (app-private
//!   JSON file) and the "was authenticated" flag (system keychain). The
//!   two are stored independently; a restored flag only means a silent
//!   session verification is worth attempting, never that the session is
//!   still valid.
//! - **SettingsStore**: user preferences, most importantly the backend
//!   base URL. Changing the base URL clears the session store first,
//!   because sessions are host-scoped.
//!
//! ## Usage
//!
//! ```ignore
//! use tessera_store::{SessionStore, SettingsStore};
//!
//! let session = SessionStore::open_default().await;
//! let settings = SettingsStore::load_default().await;
//!
//! if session.is_authenticated_flag_set() {
//!     // attempt a silent whoami before trusting the session
//! }
//! ```

pub mod error;
pub mod persistence;
pub mod session;
pub mod settings;

pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_cookies_path, default_settings_path, load_json,
    load_json_or_default, save_json,
};
pub use session::{Cookie, SessionStore};
pub use settings::{Settings, SettingsStore};
