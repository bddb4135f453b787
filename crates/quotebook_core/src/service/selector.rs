//! Random selection over a category-filtered view.
//!
//! # Invariants
//! - Filtering preserves the original order.
//! - `CategoryFilter::All` is the identity filter.

use crate::model::quote::Quote;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Sentinel used by the category selector and storage for "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Category selector value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Parses a selector value; `"all"` and blank input mean no filter.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    pub fn as_storage_value(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(category) => category.as_str(),
        }
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            Self::All => true,
            Self::Named(category) => quote.category == *category,
        }
    }
}

/// Returns the quotes passing `filter`, in original order.
pub fn filter_by_category(all: &[Quote], filter: &CategoryFilter) -> Vec<Quote> {
    all.iter()
        .filter(|quote| filter.matches(quote))
        .cloned()
        .collect()
}

/// Uniformly picks one quote; `None` for an empty pool.
pub fn pick_random(pool: &[Quote]) -> Option<&Quote> {
    pick_random_with(pool, &mut rand::rng())
}

pub fn pick_random_with<'a, R: Rng + ?Sized>(pool: &'a [Quote], rng: &mut R) -> Option<&'a Quote> {
    pool.choose(rng)
}

/// Distinct categories in first-seen order.
pub fn distinct_categories(all: &[Quote]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for quote in all {
        if !categories.iter().any(|seen| *seen == quote.category) {
            categories.push(quote.category.clone());
        }
    }
    categories
}
