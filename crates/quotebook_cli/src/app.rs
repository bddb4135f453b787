//! Command handlers over one shared quote store.
//!
//! # Responsibility
//! - Wire the store, viewer, editor, transfer and sync components for the CLI.
//! - Render quotes, notices and categories to stdout.
//!
//! # Invariants
//! - Session storage lives for one process run.
//! - Input and import rejections are printed, not returned as errors.

use crate::cli::Commands;
use anyhow::Context;
use log::info;
use quotebook_core::db::open_db;
use quotebook_core::{
    lock_store, CategoryFilter, Editor, EditorError, HttpRemote, MemoryStorage, NoticeBoard,
    Quote, QuoteStore, QuoteViewer, QuotebookConfig, SharedStore, SqliteLocalStorage,
    SyncOutcome, SyncScheduler, Synchronizer, Transfer, TransferError, NO_QUOTE_MESSAGE,
};
use std::sync::mpsc::channel;
use std::sync::Arc;

/// Components wired over one shared store.
pub struct App {
    config: QuotebookConfig,
    store: SharedStore,
    viewer: QuoteViewer<MemoryStorage>,
    notices: NoticeBoard,
}

impl App {
    pub fn open(config: QuotebookConfig) -> anyhow::Result<Self> {
        let db_path = config.storage.resolved_db_path();
        let conn = open_db(&db_path)
            .with_context(|| format!("failed to open quote storage `{}`", db_path.display()))?;
        let store = QuoteStore::load(SqliteLocalStorage::new(conn))?.into_shared();
        let viewer = QuoteViewer::new(store.clone(), MemoryStorage::new());

        Ok(Self {
            config,
            store,
            viewer,
            notices: NoticeBoard::default(),
        })
    }

    pub fn dispatch(&mut self, command: Commands) -> anyhow::Result<()> {
        match command {
            Commands::Ping => {
                println!("quotebook_core ping={}", quotebook_core::ping());
                println!("quotebook_core version={}", quotebook_core::core_version());
                Ok(())
            }
            Commands::Show => {
                let shown = self.viewer.show_random()?;
                render_quote(shown.as_ref());
                Ok(())
            }
            Commands::Categories => {
                for option in self.viewer.category_options()? {
                    println!("{option}");
                }
                Ok(())
            }
            Commands::Filter { category } => {
                let shown = self.viewer.select_category(CategoryFilter::parse(&category))?;
                render_quote(shown.as_ref());
                Ok(())
            }
            Commands::Add { text, category } => self.add(&text, &category),
            Commands::Export { out } => {
                Transfer::new(self.store.clone())
                    .export_to_file(&out)
                    .with_context(|| format!("failed to export to `{}`", out.display()))?;
                println!("Exported to {}", out.display());
                Ok(())
            }
            Commands::Import { file } => {
                match Transfer::new(self.store.clone()).import_from_file(&file) {
                    Ok(summary) => {
                        println!("Quotes imported successfully! ({} added)", summary.imported);
                        render_quote(self.viewer.show_random()?.as_ref());
                    }
                    Err(TransferError::Parse(err)) => eprintln!("Import failed: {err}"),
                    Err(err) => return Err(err.into()),
                }
                Ok(())
            }
            Commands::Sync => {
                let outcome = self.synchronizer()?.sync_now();
                self.report(&outcome);
                Ok(())
            }
            Commands::Watch { ticks } => self.watch(ticks),
        }
    }

    fn add(&mut self, text: &str, category: &str) -> anyhow::Result<()> {
        let mut editor = Editor::new(self.store.clone());
        if self.config.sync.push_enabled {
            editor = editor.with_collector(Arc::new(self.remote()?));
        }

        match editor.add_quote(text, category) {
            Ok(outcome) => {
                render_quote(Some(&outcome.quote));
                // The process exits right after, so wait instead of detaching.
                if let Some(push) = outcome.push {
                    let _ = push.wait();
                }
                Ok(())
            }
            Err(EditorError::Validation(_)) => {
                eprintln!("Please fill both fields.");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn watch(&mut self, ticks: Option<usize>) -> anyhow::Result<()> {
        render_quote(self.viewer.restore_or_show()?.as_ref());

        let (tx, rx) = channel();
        let handle = SyncScheduler::start(
            Arc::new(self.synchronizer()?),
            self.config.sync.interval(),
            move |outcome| {
                let _ = tx.send(outcome);
            },
        )
        .context("failed to start sync scheduler")?;
        info!(
            "event=watch_start module=cli status=ok interval_secs={}",
            self.config.sync.interval_secs
        );

        let mut seen = 0usize;
        while ticks.map_or(true, |limit| seen < limit) {
            let Ok(outcome) = rx.recv() else {
                break;
            };
            seen += 1;
            self.report(&outcome);
            if outcome.is_success() {
                render_quote(self.viewer.show_random()?.as_ref());
            }
        }

        handle.stop();
        Ok(())
    }

    fn report(&mut self, outcome: &SyncOutcome) {
        self.notices.post(outcome.notice_message());
        if let Some(message) = self.notices.visible() {
            println!("{message}");
        }
        if let Ok(store) = lock_store(&self.store) {
            println!("Categories: {}", store.categories().join(", "));
        }
    }

    fn remote(&self) -> anyhow::Result<HttpRemote> {
        let sync = &self.config.sync;
        HttpRemote::new(sync.endpoint.clone(), sync.fetch_limit, sync.timeout())
            .context("failed to build HTTP client")
    }

    fn synchronizer(&self) -> anyhow::Result<Synchronizer> {
        Ok(
            Synchronizer::new(self.store.clone(), Arc::new(self.remote()?))
                .with_identity(self.config.sync.identity.strategy()),
        )
    }
}

fn render_quote(quote: Option<&Quote>) {
    match quote {
        Some(quote) => println!("\"{}\"\n  - {}", quote.text, quote.category),
        None => println!("{NO_QUOTE_MESSAGE}"),
    }
}
