//! JSON export and append-only import.
//!
//! # Responsibility
//! - Serialize the full sequence as a pretty-printed `quotes.json`.
//! - Parse an uploaded file and append its records to the store.
//!
//! # Invariants
//! - Import appends; it never deduplicates or replaces.
//! - A rejected import leaves memory and durable storage untouched.

use crate::model::quote::{Quote, QuoteValidationError};
use crate::store::{lock_store, SharedStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Import content rejection.
#[derive(Debug)]
pub enum ParseError {
    /// Not JSON, or not an array of `{text, category}` objects.
    Json(serde_json::Error),
    /// Element at `index` decoded but has a blank field.
    InvalidRecord {
        index: usize,
        source: QuoteValidationError,
    },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "import file is not a JSON array of quotes: {err}"),
            Self::InvalidRecord { index, source } => {
                write!(f, "import record {index} is invalid: {source}")
            }
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidRecord { source, .. } => Some(source),
        }
    }
}

#[derive(Debug)]
pub enum TransferError {
    Parse(ParseError),
    Serialize(serde_json::Error),
    Io(std::io::Error),
    Store(StoreError),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize export: {err}"),
            Self::Io(err) => write!(f, "file access failed: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ParseError> for TransferError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<std::io::Error> for TransferError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<StoreError> for TransferError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Pretty-printed (2-space) UTF-8 JSON array of the given quotes.
pub fn export_all(quotes: &[Quote]) -> Result<Vec<u8>, TransferError> {
    serde_json::to_vec_pretty(quotes).map_err(TransferError::Serialize)
}

pub fn export_to_file(quotes: &[Quote], path: impl AsRef<Path>) -> Result<(), TransferError> {
    let bytes = export_all(quotes)?;
    std::fs::write(path.as_ref(), bytes)?;
    info!(
        "event=quotes_export module=transfer status=ok count={}",
        quotes.len()
    );
    Ok(())
}

/// Parses import content into validated quotes.
///
/// Fields are trimmed like user input, so imported categories match the
/// selector options they produce. `source_id` is kept.
pub fn parse_import(contents: &str) -> Result<Vec<Quote>, ParseError> {
    let records: Vec<Quote> = serde_json::from_str(contents).map_err(ParseError::Json)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let quote = Quote::new(&record.text, &record.category)
                .map_err(|source| ParseError::InvalidRecord { index, source })?;
            Ok(match record.source_id {
                Some(source_id) => quote.with_source_id(source_id),
                None => quote,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub total: usize,
}

pub struct Transfer {
    store: SharedStore,
}

impl Transfer {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Exports the current store contents.
    pub fn export(&self) -> Result<Vec<u8>, TransferError> {
        let store = lock_store(&self.store)?;
        export_all(store.quotes())
    }

    /// Writes the current store contents to `path`.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<(), TransferError> {
        let store = lock_store(&self.store)?;
        export_to_file(store.quotes(), path)
    }

    /// Appends the records in `contents` and persists.
    pub fn import_all(&self, contents: &str) -> Result<ImportSummary, TransferError> {
        let quotes = match parse_import(contents) {
            Ok(quotes) => quotes,
            Err(err) => {
                warn!(
                    "event=quotes_import module=transfer status=error error={}",
                    err
                );
                return Err(err.into());
            }
        };
        let imported = quotes.len();

        let mut store = lock_store(&self.store)?;
        store.extend(quotes)?;
        info!(
            "event=quotes_import module=transfer status=ok imported={} total={}",
            imported,
            store.len()
        );
        Ok(ImportSummary {
            imported,
            total: store.len(),
        })
    }

    pub fn import_from_file(&self, path: impl AsRef<Path>) -> Result<ImportSummary, TransferError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        self.import_all(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::{export_all, parse_import, ParseError};
    use crate::model::quote::Quote;

    #[test]
    fn export_is_pretty_printed_with_two_space_indent() {
        let quote = Quote::new("a", "x").expect("quote fields should be valid");
        let bytes = export_all(&[quote]).expect("export should succeed");
        let text = String::from_utf8(bytes).expect("export should be UTF-8");
        assert_eq!(
            text,
            "[\n  {\n    \"text\": \"a\",\n    \"category\": \"x\"\n  }\n]"
        );
    }

    #[test]
    fn parse_rejects_object_and_garbage() {
        assert!(matches!(
            parse_import(r#"{"text":"a","category":"x"}"#),
            Err(ParseError::Json(_))
        ));
        assert!(matches!(parse_import("nope"), Err(ParseError::Json(_))));
        assert!(matches!(
            parse_import(r#"[{"text":"a"}]"#),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn parse_rejects_blank_records_with_index() {
        let err = parse_import(r#"[{"text":"a","category":"x"},{"text":" ","category":"y"}]"#)
            .expect_err("blank record should be rejected");
        assert!(matches!(err, ParseError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn parse_trims_fields_and_keeps_source_id() {
        let quotes = parse_import(
            r#"[{"text":"  a ","category":" Life ","source_id":"7"},{"text":"b","category":"x"}]"#,
        )
        .expect("padded records should parse");

        assert_eq!(
            quotes,
            vec![
                Quote::new("a", "Life")
                    .expect("quote fields should be valid")
                    .with_source_id("7"),
                Quote::new("b", "x").expect("quote fields should be valid"),
            ]
        );
    }

    #[test]
    fn parse_accepts_empty_array() {
        assert!(parse_import("[]").expect("empty array should parse").is_empty());
    }
}
