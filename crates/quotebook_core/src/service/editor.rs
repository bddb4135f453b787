//! Add-quote use case.
//!
//! # Responsibility
//! - Validate user input, append, persist.
//! - Fire an optional best-effort push of the new quote.
//!
//! # Invariants
//! - Validation or storage failure leaves the store unchanged.
//! - The push runs after the local append is persisted and never rolls it
//!   back; it is attempted at most once.

use crate::model::quote::{Quote, QuoteValidationError};
use crate::store::{lock_store, SharedStore, StoreError};
use crate::sync::remote::{PushReceipt, RemoteCollector};
use crate::sync::SyncResult;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::thread::JoinHandle;

#[derive(Debug)]
pub enum EditorError {
    Validation(QuoteValidationError),
    Store(StoreError),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<QuoteValidationError> for EditorError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for EditorError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Pending background push. Dropping it detaches the push.
pub struct PushHandle {
    worker: JoinHandle<SyncResult<PushReceipt>>,
}

impl PushHandle {
    /// Waits for the push. `None` when the push thread panicked.
    pub fn wait(self) -> Option<SyncResult<PushReceipt>> {
        self.worker.join().ok()
    }
}

/// Successful add.
pub struct AddOutcome {
    pub quote: Quote,
    pub push: Option<PushHandle>,
}

pub struct Editor {
    store: SharedStore,
    collector: Option<Arc<dyn RemoteCollector>>,
}

impl Editor {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            collector: None,
        }
    }

    /// Enables best-effort push of every added quote.
    pub fn with_collector(mut self, collector: Arc<dyn RemoteCollector>) -> Self {
        self.collector = Some(collector);
        self
    }

    /// Validates, appends and persists one quote.
    ///
    /// # Errors
    /// - `Validation` when either field is blank after trimming.
    /// - `Store` when persisting fails.
    pub fn add_quote(&self, text: &str, category: &str) -> Result<AddOutcome, EditorError> {
        let quote = Quote::new(text, category)?;

        {
            let mut store = lock_store(&self.store)?;
            store.append(quote.clone())?;
            info!(
                "event=quote_add module=editor status=ok count={}",
                store.len()
            );
        }

        let push = self
            .collector
            .as_ref()
            .and_then(|collector| spawn_push(Arc::clone(collector), quote.clone()));

        Ok(AddOutcome { quote, push })
    }
}

fn spawn_push(collector: Arc<dyn RemoteCollector>, quote: Quote) -> Option<PushHandle> {
    let spawned = std::thread::Builder::new()
        .name("quotebook-push".to_string())
        .spawn(move || {
            let result = collector.push_quote(&quote);
            if let Err(err) = &result {
                warn!("event=remote_push module=editor status=error error={}", err);
            }
            result
        });

    match spawned {
        Ok(worker) => Some(PushHandle { worker }),
        Err(err) => {
            warn!(
                "event=remote_push module=editor status=error error_code=spawn_failed error={}",
                err
            );
            None
        }
    }
}
