//! Core logic for Quotebook: a local quote store with random display,
//! JSON transfer and a simulated remote sync.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notice;
pub mod repo;
pub mod service;
pub mod store;
pub mod sync;

pub use config::{ConfigError, QuotebookConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::quote::{default_quotes, Quote, QuoteValidationError};
pub use notice::{Notice, NoticeBoard};
pub use repo::kv_repo::{KeyValueStorage, MemoryStorage, RepoError, SqliteLocalStorage};
pub use service::editor::{AddOutcome, Editor, EditorError, PushHandle};
pub use service::selector::{
    distinct_categories, filter_by_category, pick_random, pick_random_with, CategoryFilter,
};
pub use service::transfer::{
    export_all, export_to_file, parse_import, ImportSummary, ParseError, Transfer, TransferError,
};
pub use service::viewer::{QuoteViewer, NO_QUOTE_MESSAGE};
pub use store::{lock_store, QuoteStore, SharedStore, StoreError, StoreResult};
pub use sync::merge::{
    merge_remote_wins, IdentityKind, IdentityStrategy, MergeSummary, SourceIdIdentity,
    TextIdentity,
};
pub use sync::remote::{HttpRemote, PushReceipt, RemoteCollector, RemoteSource};
pub use sync::scheduler::{SchedulerHandle, SyncScheduler};
pub use sync::synchronizer::{SyncOutcome, SyncState, Synchronizer};
pub use sync::{SyncError, SyncResult};

/// Minimal health-check API for host wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
