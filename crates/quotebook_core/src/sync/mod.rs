//! Remote pull/push and the remote-wins merge.
//!
//! # Responsibility
//! - Fetch a bounded remote record set and adapt it to `Quote`.
//! - Merge it into the store with remote-wins semantics.
//! - Drive periodic syncs from a cancellable background task.
//!
//! # Invariants
//! - A failed sync leaves the store unchanged.
//! - At most one sync runs at a time per `Synchronizer`.
//! - No causality tracking: a local edit colliding with a remote record is
//!   overwritten without notice.

pub mod merge;
pub mod remote;
pub mod scheduler;
pub mod synchronizer;

use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SyncResult<T> = Result<T, SyncError>;

/// Remote fetch/push failure.
#[derive(Debug)]
pub enum SyncError {
    /// Transport failure (DNS, connect, timeout, body read).
    Network(reqwest::Error),
    /// Remote answered with a non-success status.
    Status(u16),
    /// Response body is not the expected collection shape.
    Decode(serde_json::Error),
    /// Merged result could not be persisted.
    Store(StoreError),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(err) => write!(f, "remote request failed: {err}"),
            Self::Status(status) => write!(f, "remote returned status {status}"),
            Self::Decode(err) => write!(f, "remote payload is malformed: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Network(err) => Some(err),
            Self::Status(_) => None,
            Self::Decode(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(value: reqwest::Error) -> Self {
        Self::Network(value)
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

impl From<StoreError> for SyncError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
