//! Remote collection adapters.
//!
//! # Responsibility
//! - Define the pull (`RemoteSource`) and push (`RemoteCollector`) seams.
//! - Provide the HTTP adapter for a JSONPlaceholder-style `posts` collection.
//!
//! # Invariants
//! - Pulled items are bounded by `fetch_limit` before adaptation.
//! - Adapted categories are `ServerCategory{n}`, `n` being the 1-based item
//!   position in the remote response.

use super::{SyncError, SyncResult};
use crate::model::quote::Quote;
use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_FETCH_LIMIT: usize = 5;

/// Pull side of the sync.
pub trait RemoteSource: Send + Sync {
    fn fetch_quotes(&self) -> SyncResult<Vec<Quote>>;
}

/// Push side; receives quotes added locally.
pub trait RemoteCollector: Send + Sync {
    fn push_quote(&self, quote: &Quote) -> SyncResult<PushReceipt>;
}

/// Acknowledgement of an accepted push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushReceipt {
    pub status: u16,
}

#[derive(Debug, Deserialize)]
struct RemotePost {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    title: String,
}

/// Decodes a remote collection and adapts its first `limit` items.
///
/// Only the outer array must be well-formed. Items past `limit` are never
/// decoded. Items that are malformed or have a blank title are skipped but
/// still consume their position, so category numbering tracks the remote
/// ordering.
pub fn decode_collection(raw: &str, limit: usize) -> SyncResult<Vec<Quote>> {
    let items: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    Ok(items
        .into_iter()
        .take(limit)
        .enumerate()
        .filter_map(|(index, item)| adapt_item(index, item))
        .collect())
}

fn adapt_item(index: usize, item: serde_json::Value) -> Option<Quote> {
    let post: RemotePost = match serde_json::from_value(item) {
        Ok(post) => post,
        Err(err) => {
            debug!(
                "event=remote_item_skipped module=sync status=skipped position={} error={}",
                index + 1,
                err
            );
            return None;
        }
    };
    let category = format!("ServerCategory{}", index + 1);
    let mut quote = Quote::new(&post.title, category).ok()?;
    quote.source_id = post.id.and_then(|id| match id {
        serde_json::Value::String(value) => Some(value),
        serde_json::Value::Number(value) => Some(value.to_string()),
        _ => None,
    });
    Some(quote)
}

/// Blocking HTTP adapter for both pull and push.
pub struct HttpRemote {
    client: Client,
    endpoint: String,
    fetch_limit: usize,
}

impl HttpRemote {
    pub fn new(
        endpoint: impl Into<String>,
        fetch_limit: usize,
        timeout: Duration,
    ) -> SyncResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            fetch_limit,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RemoteSource for HttpRemote {
    fn fetch_quotes(&self) -> SyncResult<Vec<Quote>> {
        debug!(
            "event=remote_fetch module=sync status=start limit={}",
            self.fetch_limit
        );
        let response = self.client.get(&self.endpoint).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }
        let body = response.text()?;
        let quotes = decode_collection(&body, self.fetch_limit)?;
        debug!(
            "event=remote_fetch module=sync status=ok count={}",
            quotes.len()
        );
        Ok(quotes)
    }
}

impl RemoteCollector for HttpRemote {
    fn push_quote(&self, quote: &Quote) -> SyncResult<PushReceipt> {
        let response = self.client.post(&self.endpoint).json(quote).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }
        info!(
            "event=remote_push module=sync status=ok http_status={}",
            status.as_u16()
        );
        Ok(PushReceipt {
            status: status.as_u16(),
        })
    }
}
