//! Key/value storage contracts and implementations.
//!
//! # Responsibility
//! - Model browser-style local and session storage behind one trait.
//! - Isolate SQLite query details from the quote store.
//!
//! # Invariants
//! - A `set_item` call is a single statement; readers never observe a partial
//!   value.

pub mod kv_repo;
