use quotebook_core::db::open_db_in_memory;
use quotebook_core::{
    lock_store, IdentityKind, Quote, QuoteStore, RemoteSource, SharedStore, SqliteLocalStorage,
    SyncError, SyncOutcome, SyncResult, SyncState, Synchronizer,
};
use std::sync::Arc;

struct StaticSource(Vec<Quote>);

impl RemoteSource for StaticSource {
    fn fetch_quotes(&self) -> SyncResult<Vec<Quote>> {
        Ok(self.0.clone())
    }
}

struct DownSource;

impl RemoteSource for DownSource {
    fn fetch_quotes(&self) -> SyncResult<Vec<Quote>> {
        Err(SyncError::Status(502))
    }
}

fn q(text: &str, category: &str) -> Quote {
    Quote::new(text, category).unwrap()
}

fn sqlite_store(quotes: Vec<Quote>) -> SharedStore {
    let storage = SqliteLocalStorage::new(open_db_in_memory().unwrap());
    let mut store = QuoteStore::load(storage).unwrap();
    store.save_all(quotes).unwrap();
    store.into_shared()
}

#[test]
fn remote_wins_on_matching_text_and_new_records_append() {
    let store = sqlite_store(vec![q("A", "x")]);
    let sync = Synchronizer::new(
        store.clone(),
        Arc::new(StaticSource(vec![q("A", "y"), q("B", "z")])),
    );

    match sync.sync_now() {
        SyncOutcome::Synced(summary) => {
            assert_eq!(summary.replaced, 1);
            assert_eq!(summary.appended, 1);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(
        lock_store(&store).unwrap().quotes(),
        &[q("A", "y"), q("B", "z")]
    );
}

#[test]
fn repeated_sync_is_stable() {
    let store = sqlite_store(vec![q("A", "x")]);
    let sync = Synchronizer::new(
        store.clone(),
        Arc::new(StaticSource(vec![q("A", "y"), q("B", "z")])),
    );

    sync.sync_now();
    match sync.sync_now() {
        SyncOutcome::Synced(summary) => assert!(!summary.changed()),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(lock_store(&store).unwrap().len(), 2);
}

#[test]
fn failure_returns_to_idle_with_store_unchanged() {
    let store = sqlite_store(vec![q("A", "x")]);
    let sync = Synchronizer::new(store.clone(), Arc::new(DownSource));

    let outcome = sync.sync_now();
    assert!(!outcome.is_success());
    assert!(outcome.notice_message().starts_with("Sync failed"));
    assert_eq!(sync.state(), SyncState::Idle);
    assert_eq!(lock_store(&store).unwrap().quotes(), &[q("A", "x")]);
}

#[test]
fn identity_strategy_is_injectable() {
    let local = q("old wording", "ServerCategory1").with_source_id("1");
    let remote = q("new wording", "ServerCategory1").with_source_id("1");

    let by_text = sqlite_store(vec![local.clone()]);
    Synchronizer::new(by_text.clone(), Arc::new(StaticSource(vec![remote.clone()]))).sync_now();
    assert_eq!(lock_store(&by_text).unwrap().len(), 2);

    let by_id = sqlite_store(vec![local]);
    Synchronizer::new(by_id.clone(), Arc::new(StaticSource(vec![remote.clone()])))
        .with_identity(IdentityKind::SourceId.strategy())
        .sync_now();
    assert_eq!(lock_store(&by_id).unwrap().quotes(), &[remote]);
}
