//! Uses figment::Jail for sandboxed files and env vars.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::{Figment, Jail};
use quotebook_core::{IdentityKind, QuotebookConfig};
use std::time::Duration;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "quotebook.toml",
            r#"
[storage]
db_path = "/var/lib/quotebook/q.sqlite3"

[sync]
endpoint = "http://localhost:8080/posts"
interval_secs = 60
fetch_limit = 3
push_enabled = true
identity = "source_id"

[logging]
level = "warn"
dir = "/var/log/quotebook"
"#,
        )?;

        let config: QuotebookConfig = QuotebookConfig::figment().extract()?;
        assert_eq!(config.storage.db_path, "/var/lib/quotebook/q.sqlite3");
        assert_eq!(config.sync.endpoint, "http://localhost:8080/posts");
        assert_eq!(config.sync.interval(), Duration::from_secs(60));
        assert_eq!(config.sync.fetch_limit, 3);
        assert!(config.sync.push_enabled);
        assert_eq!(config.sync.identity, IdentityKind::SourceId);
        assert_eq!(config.logging.level, "warn");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("quotebook.toml", "[sync]\ninterval_secs = 60\n")?;
        jail.set_env("QUOTEBOOK_SYNC__INTERVAL_SECS", "5");
        jail.set_env("QUOTEBOOK_SYNC__PUSH_ENABLED", "true");

        let config: QuotebookConfig = QuotebookConfig::figment().extract()?;
        assert_eq!(config.sync.interval_secs, 5);
        assert!(config.sync.push_enabled);
        assert_eq!(config.sync.fetch_limit, 5);
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("partial.toml", "[sync]\nfetch_limit = 10\n")?;

        let config: QuotebookConfig =
            Figment::from(Serialized::defaults(QuotebookConfig::default()))
                .merge(Toml::file("partial.toml"))
                .merge(Env::prefixed("QUOTEBOOK_").split("__"))
                .extract()?;

        assert_eq!(config.sync.fetch_limit, 10);
        assert_eq!(config.sync.interval_secs, 30);
        assert_eq!(config.sync.identity, IdentityKind::Text);
        assert!(config.storage.db_path.is_empty());
        Ok(())
    });
}
