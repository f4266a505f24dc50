//! Generic transposition table for caching search results.
//!
//! Entries are only reused at exactly the depth they were stored at. A
//! shallower or deeper entry for the same position is a miss.

use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;
use rustc_hash::FxHashMap;

use super::traits::Score;

#[derive(Clone, Debug, PartialEq)]
pub struct TTEntry<M: Clone> {
    pub score: Score,
    pub depth: u8,
    pub best_move: Option<M>,
}

enum Storage<K: Hash + Eq, M: Clone> {
    Unbounded(FxHashMap<K, TTEntry<M>>),
    Bounded(LruCache<K, TTEntry<M>>),
}

pub struct TranspositionTable<K: Hash + Eq, M: Clone> {
    storage: Storage<K, M>,
    hits: usize,
    misses: usize,
    depth_rejected: usize,
    overwrites: usize,
}

impl<K: Hash + Eq, M: Clone> Default for TranspositionTable<K, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, M: Clone> TranspositionTable<K, M> {
    /// A table that grows without bound for as long as it lives.
    pub fn new() -> Self {
        Self::with_storage(Storage::Unbounded(FxHashMap::default()))
    }

    /// A table holding at most `capacity` entries; the least recently used
    /// entry is evicted to make room.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self::with_storage(Storage::Bounded(LruCache::new(capacity)))
    }

    fn with_storage(storage: Storage<K, M>) -> Self {
        Self {
            storage,
            hits: 0,
            misses: 0,
            depth_rejected: 0,
            overwrites: 0,
        }
    }

    pub fn put(&mut self, key: K, depth: u8, score: Score, best_move: Option<M>) {
        let entry = TTEntry {
            score,
            depth,
            best_move,
        };

        // Simple replacement strategy: always replace
        let replaced = match &mut self.storage {
            Storage::Unbounded(table) => table.insert(key, entry).is_some(),
            Storage::Bounded(table) => table.put(key, entry).is_some(),
        };
        if replaced {
            self.overwrites += 1;
        }
    }

    pub fn get(&mut self, key: &K, depth: u8) -> Option<TTEntry<M>> {
        let entry = match &mut self.storage {
            Storage::Unbounded(table) => table.get(key),
            Storage::Bounded(table) => table.get(key),
        };

        match entry {
            Some(entry) if entry.depth == depth => {
                let entry = entry.clone();
                self.hits += 1;
                Some(entry)
            }
            Some(_) => {
                self.depth_rejected += 1;
                self.misses += 1;
                None
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn clear(&mut self) {
        match &mut self.storage {
            Storage::Unbounded(table) => table.clear(),
            Storage::Bounded(table) => table.clear(),
        }
        self.hits = 0;
        self.misses = 0;
        self.depth_rejected = 0;
        self.overwrites = 0;
    }

    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Unbounded(table) => table.len(),
            Storage::Bounded(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries, or `None` for an unbounded table.
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        match &self.storage {
            Storage::Unbounded(_) => None,
            Storage::Bounded(table) => Some(table.cap()),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn depth_rejected(&self) -> usize {
        self.depth_rejected
    }

    pub fn overwrites(&self) -> usize {
        self.overwrites
    }
}
