//! Quote domain model.
//!
//! # Responsibility
//! - Define the canonical `{text, category}` record.
//! - Provide trimming constructors and validation for user and file input.
//!
//! # Invariants
//! - `text` and `category` are non-empty after trimming.
//! - `source_id` is set only for records adapted from the remote collection
//!   and is omitted from JSON when absent.
//! - Text is the default identity, but uniqueness by text is not enforced.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for quote fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteValidationError {
    /// `text` is empty after trimming whitespace.
    EmptyText,
    /// `category` is empty after trimming whitespace.
    EmptyCategory,
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "quote text must not be empty"),
            Self::EmptyCategory => write!(f, "quote category must not be empty"),
        }
    }
}

impl Error for QuoteValidationError {}

/// One quote record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
    /// Identifier of the remote item this record was adapted from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl Quote {
    /// Creates a quote from user input, trimming both fields.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is blank (checked first).
    /// - `EmptyCategory` when `category` is blank.
    pub fn new(
        text: impl AsRef<str>,
        category: impl AsRef<str>,
    ) -> Result<Self, QuoteValidationError> {
        let quote = Self {
            text: text.as_ref().trim().to_string(),
            category: category.as_ref().trim().to_string(),
            source_id: None,
        };
        quote.validate()?;
        Ok(quote)
    }

    /// Attaches the remote identifier used by id-based merge strategies.
    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    /// Re-checks field invariants, e.g. after deserialization.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        if self.text.trim().is_empty() {
            return Err(QuoteValidationError::EmptyText);
        }
        if self.category.trim().is_empty() {
            return Err(QuoteValidationError::EmptyCategory);
        }
        Ok(())
    }
}

/// Built-in sequence used when durable storage holds nothing usable.
pub fn default_quotes() -> Vec<Quote> {
    [
        (
            "The best way to get started is to quit talking and begin doing.",
            "Motivation",
        ),
        (
            "Don't let yesterday take up too much of today.",
            "Inspiration",
        ),
        (
            "It’s not whether you get knocked down, it’s whether you get up.",
            "Perseverance",
        ),
    ]
    .into_iter()
    .map(|(text, category)| Quote {
        text: text.to_string(),
        category: category.to_string(),
        source_id: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{default_quotes, Quote, QuoteValidationError};

    #[test]
    fn new_trims_fields() {
        let quote =
            Quote::new("  stay hungry ", "\tLife\n").expect("quote fields should be valid");
        assert_eq!(quote.text, "stay hungry");
        assert_eq!(quote.category, "Life");
        assert!(quote.source_id.is_none());
    }

    #[test]
    fn new_rejects_blank_fields_text_first() {
        assert_eq!(
            Quote::new("", "x").expect_err("blank field should be rejected"),
            QuoteValidationError::EmptyText
        );
        assert_eq!(
            Quote::new("x", "   ").expect_err("blank field should be rejected"),
            QuoteValidationError::EmptyCategory
        );
        assert_eq!(
            Quote::new(" ", "").expect_err("blank field should be rejected"),
            QuoteValidationError::EmptyText
        );
    }

    #[test]
    fn serializes_without_source_id_when_absent() {
        let quote = Quote::new("a", "b").expect("quote fields should be valid");
        let json = serde_json::to_string(&quote).expect("quote should serialize");
        assert_eq!(json, r#"{"text":"a","category":"b"}"#);

        let remote = quote.with_source_id("7");
        let json = serde_json::to_string(&remote).expect("quote should serialize");
        assert!(json.contains(r#""source_id":"7""#));
    }

    #[test]
    fn default_quotes_are_valid() {
        let defaults = default_quotes();
        assert_eq!(defaults.len(), 3);
        assert!(defaults.iter().all(|quote| quote.validate().is_ok()));
    }
}
