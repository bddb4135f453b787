//! Pull-merge-persist procedure with a two-state lifecycle.
//!
//! # Responsibility
//! - Fetch from a `RemoteSource`, merge with remote-wins semantics, persist.
//! - Report every run as a typed `SyncOutcome`; never alert on its own.
//!
//! # Invariants
//! - The fetch runs without holding the store lock.
//! - State returns to `Idle` after every run, including failures.
//! - A trigger arriving while a run is in flight is skipped.

use super::merge::{merge_remote_wins, IdentityStrategy, MergeSummary, TextIdentity};
use super::remote::RemoteSource;
use super::{SyncError, SyncResult};
use crate::store::{lock_store, SharedStore};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Syncing,
}

/// Result of one sync trigger.
#[derive(Debug)]
pub enum SyncOutcome {
    Synced(MergeSummary),
    /// Another run was already in flight.
    Skipped,
    Failed(SyncError),
}

impl SyncOutcome {
    /// Short user-facing summary for a transient notice.
    pub fn notice_message(&self) -> String {
        match self {
            Self::Synced(summary) => format!(
                "Synced with server: server quotes prioritized ({} updated, {} added).",
                summary.replaced, summary.appended
            ),
            Self::Skipped => "Sync already in progress.".to_string(),
            Self::Failed(err) => format!("Sync failed: {err}"),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Synced(_))
    }
}

pub struct Synchronizer {
    store: SharedStore,
    source: Arc<dyn RemoteSource>,
    identity: Arc<dyn IdentityStrategy>,
    in_flight: AtomicBool,
}

impl Synchronizer {
    /// Creates a synchronizer using text identity.
    pub fn new(store: SharedStore, source: Arc<dyn RemoteSource>) -> Self {
        Self {
            store,
            source,
            identity: Arc::new(TextIdentity),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityStrategy>) -> Self {
        self.identity = identity;
        self
    }

    pub fn state(&self) -> SyncState {
        if self.in_flight.load(Ordering::Acquire) {
            SyncState::Syncing
        } else {
            SyncState::Idle
        }
    }

    /// Runs one sync unless another is in flight.
    pub fn sync_now(&self) -> SyncOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            info!("event=sync_run module=sync status=skip reason=in_flight");
            return SyncOutcome::Skipped;
        }
        let _idle_on_exit = IdleOnDrop(&self.in_flight);

        let started_at = Instant::now();
        match self.pull_and_merge() {
            Ok(summary) => {
                info!(
                    "event=sync_run module=sync status=ok duration_ms={} replaced={} appended={} unchanged={}",
                    started_at.elapsed().as_millis(),
                    summary.replaced,
                    summary.appended,
                    summary.unchanged
                );
                SyncOutcome::Synced(summary)
            }
            Err(err) => {
                warn!(
                    "event=sync_run module=sync status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                SyncOutcome::Failed(err)
            }
        }
    }

    fn pull_and_merge(&self) -> SyncResult<MergeSummary> {
        let incoming = self.source.fetch_quotes()?;

        let mut store = lock_store(&self.store)?;
        let mut merged = store.quotes().to_vec();
        let summary = merge_remote_wins(&mut merged, incoming, self.identity.as_ref());
        store.save_all(merged).map_err(SyncError::from)?;
        Ok(summary)
    }
}

struct IdleOnDrop<'a>(&'a AtomicBool);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
