//! The shared pagination cursor.
//!
//! Every list-fetching feature drives the same state machine:
//!
//! ```text
//! Empty -> Loading -> Loaded{offset, has_more} -> LoadingMore -> Loaded -> ...
//! ```
//!
//! with error-absorbing transitions back to `Loaded` (or `Empty` when the
//! initial load fails). The cursor enforces the concurrency rules that
//! make pull-to-refresh and infinite scroll safe to race:
//!
//! - duplicate `load_initial` / `load_more` triggers are no-ops while a
//!   fetch is in flight
//! - a `refresh` invalidates any in-flight `load_more`; its page is
//!   discarded rather than appended to the replaced dataset
//!
//! Offsets always come from the server's reported pagination, never from
//! local arithmetic over the requested limit, and `has_more` is the only
//! signal for whether another page exists.

use async_trait::async_trait;
use std::sync::Arc;
use tessera_core::Paged;
use tokio::sync::{watch, RwLock};
use tracing::{debug, warn};

use crate::error::ApiError;

// ============================================================================
// Loader
// ============================================================================

/// Source of pages for a [`PageCursor`].
///
/// Feature services implement this per endpoint (e.g. the post feed, a
/// notification list) so the cursor stays agnostic of paths and types.
#[async_trait]
pub trait PageLoader<T>: Send + Sync {
    /// Fetches one page at the given offset.
    async fn load(&self, offset: u64, limit: u32) -> Result<Paged<T>, ApiError>;
}

// ============================================================================
// State
// ============================================================================

/// Which phase the cursor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPhase {
    /// Nothing loaded yet.
    Empty,
    /// Initial load or refresh in flight.
    Loading,
    /// A dataset is present.
    Loaded,
    /// A follow-up page is in flight.
    LoadingMore,
}

/// Internal cursor state.
struct CursorInner<T> {
    phase: CursorPhase,
    items: Vec<T>,
    next_offset: u64,
    has_more: bool,
    /// Bumped by every refresh; in-flight operations from an older
    /// generation discard their results.
    generation: u64,
    last_error: Option<String>,
}

impl<T> CursorInner<T> {
    fn new() -> Self {
        Self {
            phase: CursorPhase::Empty,
            items: Vec::new(),
            next_offset: 0,
            has_more: false,
            generation: 0,
            last_error: None,
        }
    }

    /// Replaces the dataset with a fresh first page.
    fn replace_with(&mut self, paged: Paged<T>) {
        self.next_offset = paged.next_offset();
        self.has_more = paged.pagination.has_more;
        self.items = paged.items;
        self.phase = CursorPhase::Loaded;
        self.last_error = None;
    }

    /// Appends a follow-up page.
    fn append(&mut self, paged: Paged<T>) {
        self.next_offset = paged.next_offset();
        self.has_more = paged.pagination.has_more;
        self.items.extend(paged.items);
        self.phase = CursorPhase::Loaded;
        self.last_error = None;
    }
}

// ============================================================================
// Page Cursor
// ============================================================================

/// Incremental-load state for one list view.
///
/// Owned by a single feature's view-state; the only supported concurrent
/// calls are the `load_initial`/`load_more`/`refresh` operations below.
/// Observable via a watch channel for UI updates.
pub struct PageCursor<T> {
    inner: Arc<RwLock<CursorInner<T>>>,
    loader: Arc<dyn PageLoader<T>>,
    limit: u32,
    notify: watch::Sender<u64>,
    version: Arc<RwLock<u64>>,
}

impl<T> Clone for PageCursor<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            loader: Arc::clone(&self.loader),
            limit: self.limit,
            notify: self.notify.clone(),
            version: Arc::clone(&self.version),
        }
    }
}

impl<T: Send + Sync + 'static> PageCursor<T> {
    /// Creates a cursor over the given loader and page size.
    pub fn new(loader: Arc<dyn PageLoader<T>>, limit: u32) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            inner: Arc::new(RwLock::new(CursorInner::new())),
            loader,
            limit,
            notify,
            version: Arc::new(RwLock::new(0)),
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Loads the first page.
    ///
    /// Only acts from `Empty`: overlapping lifecycle events that trigger
    /// it twice, or after data already loaded, are no-ops.
    ///
    /// # Errors
    ///
    /// The loader's [`ApiError`] on a failed initial load; the cursor
    /// returns to `Empty`.
    pub async fn load_initial(&self) -> Result<(), ApiError> {
        let generation = {
            let mut inner = self.inner.write().await;
            if inner.phase != CursorPhase::Empty {
                debug!(phase = ?inner.phase, "load_initial ignored");
                return Ok(());
            }
            inner.phase = CursorPhase::Loading;
            inner.generation
        };
        self.notify_change().await;

        let result = self.loader.load(0, self.limit).await;

        let mut inner = self.inner.write().await;
        if inner.generation != generation {
            debug!("load_initial superseded by refresh, result dropped");
            return Ok(());
        }
        let outcome = match result {
            Ok(paged) => {
                inner.replace_with(paged);
                Ok(())
            }
            Err(e) => {
                inner.phase = CursorPhase::Empty;
                inner.last_error = Some(e.to_string());
                Err(e)
            }
        };
        drop(inner);
        self.notify_change().await;
        outcome
    }

    /// Loads the next page and appends it.
    ///
    /// Only acts from `Loaded` with `has_more == true`; rapid
    /// scroll-triggered calls while a page is already in flight are
    /// no-ops, as are calls once the list is exhausted. The request
    /// starts at the offset the server reported for the previous page
    /// plus the number of items it actually returned.
    ///
    /// # Errors
    ///
    /// The loader's [`ApiError`] on a failed page; the dataset is kept
    /// and the cursor returns to `Loaded`.
    pub async fn load_more(&self) -> Result<(), ApiError> {
        let (generation, offset) = {
            let mut inner = self.inner.write().await;
            if inner.phase != CursorPhase::Loaded || !inner.has_more {
                debug!(phase = ?inner.phase, has_more = inner.has_more, "load_more ignored");
                return Ok(());
            }
            inner.phase = CursorPhase::LoadingMore;
            (inner.generation, inner.next_offset)
        };
        self.notify_change().await;

        let result = self.loader.load(offset, self.limit).await;

        let mut inner = self.inner.write().await;
        if inner.generation != generation {
            // A refresh replaced the dataset while this page was in
            // flight; appending it now would mix stale data.
            debug!("Stale page dropped after refresh");
            return Ok(());
        }
        let outcome = match result {
            Ok(paged) => {
                inner.append(paged);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "load_more failed");
                inner.phase = CursorPhase::Loaded;
                inner.last_error = Some(e.to_string());
                Err(e)
            }
        };
        drop(inner);
        self.notify_change().await;
        outcome
    }

    /// Replaces the dataset with a fresh first page.
    ///
    /// Valid from any state. The new dataset replaces the old one (never
    /// appends), the next offset is reset to the server-reported value,
    /// and any in-flight `load_more` result is invalidated.
    ///
    /// # Errors
    ///
    /// The loader's [`ApiError`]; an existing dataset is kept (`Loaded`),
    /// an empty cursor returns to `Empty`.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let generation = {
            let mut inner = self.inner.write().await;
            inner.generation += 1;
            inner.phase = CursorPhase::Loading;
            inner.generation
        };
        self.notify_change().await;

        let result = self.loader.load(0, self.limit).await;

        let mut inner = self.inner.write().await;
        if inner.generation != generation {
            debug!("Refresh superseded by newer refresh, result dropped");
            return Ok(());
        }
        let outcome = match result {
            Ok(paged) => {
                inner.replace_with(paged);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "refresh failed");
                inner.phase = if inner.items.is_empty() {
                    CursorPhase::Empty
                } else {
                    CursorPhase::Loaded
                };
                inner.last_error = Some(e.to_string());
                Err(e)
            }
        };
        drop(inner);
        self.notify_change().await;
        outcome
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current phase.
    pub async fn phase(&self) -> CursorPhase {
        self.inner.read().await.phase
    }

    /// Number of accumulated items.
    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    /// True when no items are accumulated.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.items.is_empty()
    }

    /// Whether the server reported more data past the accumulated set.
    pub async fn has_more(&self) -> bool {
        self.inner.read().await.has_more
    }

    /// The offset the next `load_more` would request.
    pub async fn next_offset(&self) -> u64 {
        self.inner.read().await.next_offset
    }

    /// The last absorbed error, for presentation.
    pub async fn last_error(&self) -> Option<String> {
        self.inner.read().await.last_error.clone()
    }

    /// Subscribes to cursor changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    /// Notifies subscribers of a change.
    async fn notify_change(&self) {
        let mut version = self.version.write().await;
        *version += 1;
        let _ = self.notify.send(*version);
    }
}

impl<T: Clone + Send + Sync + 'static> PageCursor<T> {
    /// A copy of the accumulated items.
    pub async fn items(&self) -> Vec<T> {
        self.inner.read().await.items.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
