//! Quote use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into user-facing operations.
//! - Keep hosts (CLI, tests) decoupled from storage details.

pub mod editor;
pub mod selector;
pub mod transfer;
pub mod viewer;
