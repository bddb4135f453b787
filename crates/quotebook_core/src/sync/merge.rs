//! Remote-wins merge with injectable record identity.
//!
//! # Invariants
//! - Every local record matching an incoming one is overwritten in place.
//! - Incoming records without a match are appended in incoming order.
//! - Only records present before the merge are matched, so every incoming
//!   record of one batch survives even when two share an identity.
//! - Local records never matched are kept, order unchanged.

use crate::model::quote::Quote;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Decides whether a local and an incoming record denote the same quote.
///
/// Closures `Fn(&Quote, &Quote) -> bool` implement this directly.
pub trait IdentityStrategy: Send + Sync {
    fn same_quote(&self, local: &Quote, incoming: &Quote) -> bool;
}

impl<F> IdentityStrategy for F
where
    F: Fn(&Quote, &Quote) -> bool + Send + Sync,
{
    fn same_quote(&self, local: &Quote, incoming: &Quote) -> bool {
        self(local, incoming)
    }
}

/// Text equality. Two distinct quotes with identical wording collide.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextIdentity;

impl IdentityStrategy for TextIdentity {
    fn same_quote(&self, local: &Quote, incoming: &Quote) -> bool {
        local.text == incoming.text
    }
}

/// Matches on `source_id` when both sides carry one, else on text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceIdIdentity;

impl IdentityStrategy for SourceIdIdentity {
    fn same_quote(&self, local: &Quote, incoming: &Quote) -> bool {
        match (&local.source_id, &incoming.source_id) {
            (Some(left), Some(right)) => left == right,
            _ => local.text == incoming.text,
        }
    }
}

/// Configurable identity selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityKind {
    #[default]
    Text,
    SourceId,
}

impl IdentityKind {
    pub fn strategy(self) -> Arc<dyn IdentityStrategy> {
        match self {
            Self::Text => Arc::new(TextIdentity),
            Self::SourceId => Arc::new(SourceIdIdentity),
        }
    }
}

/// Counts of local records touched by one merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Local records overwritten with different content.
    pub replaced: usize,
    /// Incoming records appended because nothing matched.
    pub appended: usize,
    /// Local records matched by an identical incoming record.
    pub unchanged: usize,
}

impl MergeSummary {
    pub fn changed(&self) -> bool {
        self.replaced > 0 || self.appended > 0
    }
}

/// Merges `incoming` into `local`; incoming wins every identity collision.
pub fn merge_remote_wins(
    local: &mut Vec<Quote>,
    incoming: Vec<Quote>,
    identity: &dyn IdentityStrategy,
) -> MergeSummary {
    let mut summary = MergeSummary::default();
    let existing_len = local.len();

    for remote in incoming {
        let mut matched = false;
        for existing in local[..existing_len].iter_mut() {
            if !identity.same_quote(existing, &remote) {
                continue;
            }
            matched = true;
            if *existing == remote {
                summary.unchanged += 1;
            } else {
                *existing = remote.clone();
                summary.replaced += 1;
            }
        }

        if !matched {
            local.push(remote);
            summary.appended += 1;
        }
    }

    summary
}
