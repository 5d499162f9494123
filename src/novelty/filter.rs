//! Novelty filter over signal tuples

use super::NoveltySet;
use crate::source::SignalTuple;

/// Outcome of classifying one batch
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Tuples seen for the first time, in input order
    pub fresh: Vec<SignalTuple>,
    /// Per-input flag, `true` where the input tuple was new
    pub flags: Vec<bool>,
    /// Identifiers evicted after the batch was admitted
    pub evicted: usize,
}

impl Classification {
    /// Number of inputs that were already seen
    pub fn seen_count(&self) -> usize {
        self.flags.iter().filter(|new| !**new).count()
    }
}

/// Drops tuples whose identifier was observed in an earlier cycle
///
/// Pure admission filter: it has no opinion on scores or thresholds.
#[derive(Debug, Clone)]
pub struct NoveltyFilter {
    seen: NoveltySet,
}

impl NoveltyFilter {
    /// Create a filter remembering at most `capacity` identifiers
    pub fn new(capacity: usize) -> Self {
        Self {
            seen: NoveltySet::new(capacity),
        }
    }

    /// Classify a batch, remembering every new identifier
    ///
    /// Within one batch the first occurrence of an identifier wins. Eviction
    /// runs once the whole batch has been admitted.
    pub fn classify(&mut self, batch: Vec<SignalTuple>) -> Classification {
        let mut classification = Classification {
            fresh: Vec::new(),
            flags: Vec::with_capacity(batch.len()),
            evicted: 0,
        };

        for tuple in batch {
            let is_new = self.seen.insert(&tuple.mint);
            classification.flags.push(is_new);
            if is_new {
                classification.fresh.push(tuple);
            }
        }

        classification.evicted = self.seen.evict_overflow();
        if classification.evicted > 0 {
            tracing::debug!(
                evicted = classification.evicted,
                retained = self.seen.len(),
                "Evicted oldest identifiers from novelty set"
            );
        }

        classification
    }

    /// Whether an identifier is currently remembered
    pub fn has_seen(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Number of remembered identifiers
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
