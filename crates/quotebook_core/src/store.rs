//! Quote store: the in-memory sequence mirrored to durable storage.
//!
//! # Responsibility
//! - Own the ordered quote sequence and the storage handle it is mirrored to.
//! - Load with fallback to the built-in defaults.
//! - Persist the whole sequence on every mutation.
//!
//! # Invariants
//! - In-memory state changes only after the storage write succeeded.
//! - An explicitly stored empty array is honoured; only absent or malformed
//!   values fall back to defaults.

use crate::model::quote::{default_quotes, Quote};
use crate::repo::kv_repo::{KeyValueStorage, RepoError};
use crate::service::selector::{distinct_categories, CategoryFilter};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

pub const QUOTES_KEY: &str = "quotes";
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store shared by editor, transfer, viewer and synchronizer.
pub type SharedStore = Arc<Mutex<QuoteStore>>;

#[derive(Debug)]
pub enum StoreError {
    Storage(RepoError),
    Serialize(serde_json::Error),
    /// Another holder of the shared store panicked mid-operation.
    Poisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "quote storage failed: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize quotes: {err}"),
            Self::Poisoned => write!(f, "quote store lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Poisoned => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Locks a shared store, mapping poisoning to `StoreError::Poisoned`.
pub fn lock_store(store: &SharedStore) -> StoreResult<MutexGuard<'_, QuoteStore>> {
    store.lock().map_err(|_| StoreError::Poisoned)
}

pub struct QuoteStore {
    storage: Box<dyn KeyValueStorage>,
    quotes: Vec<Quote>,
}

impl QuoteStore {
    /// Loads the sequence stored under `quotes`.
    ///
    /// Falls back to `default_quotes()` when the key is absent, is not a JSON
    /// array of quotes, or holds a record with blank fields. Storage read
    /// errors are returned.
    pub fn load(storage: impl KeyValueStorage + 'static) -> StoreResult<Self> {
        let storage: Box<dyn KeyValueStorage> = Box::new(storage);
        let quotes = match storage.get_item(QUOTES_KEY)? {
            None => {
                info!("event=store_load module=store status=ok source=defaults reason=absent");
                default_quotes()
            }
            Some(raw) => match decode_quotes(&raw) {
                Some(quotes) => {
                    info!(
                        "event=store_load module=store status=ok source=storage count={}",
                        quotes.len()
                    );
                    quotes
                }
                None => {
                    warn!(
                        "event=store_load module=store status=fallback source=defaults reason=malformed bytes={}",
                        raw.len()
                    );
                    default_quotes()
                }
            },
        };

        Ok(Self { storage, quotes })
    }

    /// Wraps the store for sharing across components.
    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Overwrites durable storage with `quotes`, then adopts them in memory.
    pub fn save_all(&mut self, quotes: Vec<Quote>) -> StoreResult<()> {
        let payload = serde_json::to_string(&quotes)?;
        self.storage.set_item(QUOTES_KEY, &payload)?;
        self.quotes = quotes;
        Ok(())
    }

    /// Appends one quote and persists.
    pub fn append(&mut self, quote: Quote) -> StoreResult<()> {
        self.extend(vec![quote])
    }

    /// Appends quotes in order and persists.
    pub fn extend(&mut self, quotes: Vec<Quote>) -> StoreResult<()> {
        let mut next = Vec::with_capacity(self.quotes.len() + quotes.len());
        next.extend_from_slice(&self.quotes);
        next.extend(quotes);
        self.save_all(next)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        distinct_categories(&self.quotes)
    }

    /// Persisted category filter; `All` when nothing was stored.
    pub fn selected_category(&self) -> StoreResult<CategoryFilter> {
        let stored = self.storage.get_item(SELECTED_CATEGORY_KEY)?;
        Ok(stored
            .as_deref()
            .map(CategoryFilter::parse)
            .unwrap_or_default())
    }

    pub fn set_selected_category(&mut self, filter: &CategoryFilter) -> StoreResult<()> {
        self.storage
            .set_item(SELECTED_CATEGORY_KEY, filter.as_storage_value())?;
        Ok(())
    }
}

fn decode_quotes(raw: &str) -> Option<Vec<Quote>> {
    let quotes: Vec<Quote> = serde_json::from_str(raw).ok()?;
    if quotes.iter().any(|quote| quote.validate().is_err()) {
        return None;
    }
    Some(quotes)
}
