//! "Show a random quote" flow.
//!
//! # Responsibility
//! - Apply the persisted category filter and pick a quote.
//! - Remember the last shown quote in session storage and restore it when a
//!   view starts.
//!
//! # Invariants
//! - Session storage is best-effort: failures to read or write it are logged
//!   and never fail the operation.

use super::selector::{filter_by_category, pick_random, CategoryFilter};
use crate::model::quote::Quote;
use crate::repo::kv_repo::KeyValueStorage;
use crate::store::{lock_store, SharedStore, StoreResult};
use log::{debug, warn};

pub const LAST_QUOTE_KEY: &str = "lastQuote";
pub const NO_QUOTE_MESSAGE: &str = "No quote found in this category.";

pub struct QuoteViewer<S: KeyValueStorage> {
    store: SharedStore,
    session: S,
}

impl<S: KeyValueStorage> QuoteViewer<S> {
    pub fn new(store: SharedStore, session: S) -> Self {
        Self { store, session }
    }

    /// Picks a random quote under the persisted filter.
    ///
    /// Returns `None` when the filtered pool is empty; hosts render
    /// `NO_QUOTE_MESSAGE`.
    pub fn show_random(&mut self) -> StoreResult<Option<Quote>> {
        let picked = {
            let store = lock_store(&self.store)?;
            let filter = store.selected_category()?;
            let pool = filter_by_category(store.quotes(), &filter);
            pick_random(&pool).cloned()
        };

        if let Some(quote) = &picked {
            self.remember(quote);
        }
        Ok(picked)
    }

    /// Persists a new filter and shows a quote under it.
    pub fn select_category(&mut self, filter: CategoryFilter) -> StoreResult<Option<Quote>> {
        lock_store(&self.store)?.set_selected_category(&filter)?;
        self.show_random()
    }

    /// `"all"` followed by every distinct category, for the selector.
    pub fn category_options(&self) -> StoreResult<Vec<String>> {
        let store = lock_store(&self.store)?;
        let mut options = vec![CategoryFilter::All.as_storage_value().to_string()];
        options.extend(store.categories());
        Ok(options)
    }

    /// Startup display: the quote remembered in this session if the store
    /// still holds it, otherwise a fresh random pick.
    pub fn restore_or_show(&mut self) -> StoreResult<Option<Quote>> {
        if let Some(last) = self.last_shown() {
            if lock_store(&self.store)?.quotes().contains(&last) {
                debug!("event=session_restore module=viewer status=ok");
                return Ok(Some(last));
            }
        }
        self.show_random()
    }

    /// Quote shown last in this session, if recorded and still decodable.
    pub fn last_shown(&self) -> Option<Quote> {
        let raw = match self.session.get_item(LAST_QUOTE_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!("event=session_read module=viewer status=error error={}", err);
                return None;
            }
        };
        serde_json::from_str(&raw).ok()
    }

    fn remember(&mut self, quote: &Quote) {
        let payload = match serde_json::to_string(quote) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("event=session_write module=viewer status=error error={}", err);
                return;
            }
        };
        match self.session.set_item(LAST_QUOTE_KEY, &payload) {
            Ok(()) => debug!("event=session_write module=viewer status=ok"),
            Err(err) => warn!("event=session_write module=viewer status=error error={}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QuoteViewer;
    use crate::model::quote::Quote;
    use crate::repo::kv_repo::{KeyValueStorage, MemoryStorage};
    use crate::service::selector::CategoryFilter;
    use crate::store::{lock_store, QuoteStore, SharedStore};

    fn shared_with(quotes: Vec<Quote>) -> SharedStore {
        let mut store = QuoteStore::load(MemoryStorage::new()).expect("store should load");
        store.save_all(quotes).expect("save_all should succeed");
        store.into_shared()
    }

    fn viewer_with(quotes: Vec<Quote>) -> QuoteViewer<MemoryStorage> {
        QuoteViewer::new(shared_with(quotes), MemoryStorage::new())
    }

    #[test]
    fn show_random_honours_selected_category_and_remembers() {
        let wanted = Quote::new("b", "y").expect("quote fields should be valid");
        let mut viewer = viewer_with(vec![
            Quote::new("a", "x").expect("quote fields should be valid"),
            wanted.clone(),
        ]);

        let shown = viewer
            .select_category(CategoryFilter::Named("y".to_string()))
            .expect("select_category should succeed");
        assert_eq!(shown.as_ref(), Some(&wanted));
        assert_eq!(viewer.last_shown(), Some(wanted));
    }

    #[test]
    fn unknown_category_shows_nothing() {
        let mut viewer =
            viewer_with(vec![Quote::new("a", "x").expect("quote fields should be valid")]);
        let shown = viewer
            .select_category(CategoryFilter::Named("missing".to_string()))
            .expect("select_category should succeed");
        assert!(shown.is_none());
        assert!(viewer.last_shown().is_none());
    }

    #[test]
    fn category_options_start_with_all() {
        let viewer = viewer_with(vec![
            Quote::new("a", "x").expect("quote fields should be valid"),
            Quote::new("b", "y").expect("quote fields should be valid"),
            Quote::new("c", "x").expect("quote fields should be valid"),
        ]);
        let options = viewer
            .category_options()
            .expect("category options should load");
        assert_eq!(options, vec!["all", "x", "y"]);
    }

    #[test]
    fn restart_restores_last_quote_from_session() {
        let store = shared_with(vec![
            Quote::new("a", "x").expect("quote fields should be valid"),
            Quote::new("b", "y").expect("quote fields should be valid"),
        ]);
        let session = MemoryStorage::new();

        let mut first = QuoteViewer::new(store.clone(), session.clone());
        let shown = first
            .select_category(CategoryFilter::Named("y".to_string()))
            .expect("select_category should succeed");

        lock_store(&store)
            .expect("store lock should not be poisoned")
            .set_selected_category(&CategoryFilter::All)
            .expect("set_selected_category should succeed");
        let mut restarted = QuoteViewer::new(store, session);
        for _ in 0..5 {
            let restored = restarted
                .restore_or_show()
                .expect("restore should succeed");
            assert_eq!(restored, shown);
        }
    }

    #[test]
    fn restore_falls_back_when_remembered_quote_is_gone() {
        let gone = Quote::new("gone", "x").expect("quote fields should be valid");
        let kept = Quote::new("kept", "y").expect("quote fields should be valid");
        let store = shared_with(vec![kept.clone()]);
        let mut session = MemoryStorage::new();
        session
            .set_item(
                super::LAST_QUOTE_KEY,
                &serde_json::to_string(&gone).expect("quote should serialize"),
            )
            .expect("set_item should succeed");

        let mut viewer = QuoteViewer::new(store, session);
        let shown = viewer.restore_or_show().expect("restore should succeed");
        assert_eq!(shown, Some(kept.clone()));
        assert_eq!(viewer.last_shown(), Some(kept));
    }
}
