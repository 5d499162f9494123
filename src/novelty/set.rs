//! Bounded, insertion-ordered identifier set

use std::collections::{HashSet, VecDeque};

/// Remembers the most recently inserted identifiers up to a fixed capacity
///
/// A hash index answers membership; a queue keeps insertion order so the
/// oldest identifiers can be evicted in O(1).
#[derive(Debug, Clone)]
pub struct NoveltySet {
    capacity: usize,
    index: HashSet<String>,
    order: VecDeque<String>,
}

impl NoveltySet {
    /// Create an empty set retaining at most `capacity` identifiers
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            index: HashSet::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Whether the identifier has been seen and not yet evicted
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// Insert an identifier. Returns `false` if it was already present.
    ///
    /// Does not evict; call [`NoveltySet::evict_overflow`] once the batch is done.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.index.contains(id) {
            return false;
        }
        self.index.insert(id.to_string());
        self.order.push_back(id.to_string());
        true
    }

    /// Evict oldest identifiers until the set fits its capacity.
    /// Returns the number evicted.
    pub fn evict_overflow(&mut self) -> usize {
        let mut evicted = 0;
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.index.remove(&oldest);
                evicted += 1;
            }
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
