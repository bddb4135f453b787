//! Terminal host for the quote store.
//!
//! Renders quotes, category options and transient notices, and maps core
//! errors to inline alerts.

mod app;
mod cli;

use clap::Parser;

fn main() {
    if let Err(error) = run() {
        eprintln!("quotebook error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let mut config = quotebook_core::QuotebookConfig::load()?;
    if let Some(db) = &cli.db {
        config.storage.db_path = db.display().to_string();
    }

    if let Err(err) = quotebook_core::init_from_config(&config.logging) {
        eprintln!("quotebook warning: file logging disabled: {err}");
    }

    let mut app = app::App::open(config)?;
    app.dispatch(cli.command)
}
