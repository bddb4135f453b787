//! Domain model for quote records.
//!
//! # Responsibility
//! - Define the single domain entity shared by store, transfer and sync.
//! - Keep field validation next to the data shape.
//!
//! # Invariants
//! - A persisted or imported quote always has non-blank `text` and `category`.
//! - Quotes are never deleted; the whole sequence is rewritten on mutation.

pub mod quote;
