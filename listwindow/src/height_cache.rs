use alloc::vec::Vec;

use crate::key::{KeyCacheKey, KeyHeightMap};

/// What happens to cached measurements when the item sequence is replaced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Keep every measurement, including keys no longer present in the sequence.
    #[default]
    Retain,
    /// Drop measurements whose key is absent from the new sequence.
    PruneMissing,
}

/// Last measured height per item key.
///
/// Entries are created on first measurement and overwritten by later ones. Lookups that miss
/// fall back to the caller's estimate; the cache never invents a height.
#[derive(Clone, Debug)]
pub struct HeightCache<K> {
    heights: KeyHeightMap<K>,
}

impl<K: KeyCacheKey> HeightCache<K> {
    pub fn new() -> Self {
        Self {
            heights: KeyHeightMap::<K>::new(),
        }
    }

    /// Stores `height` for `key`. Returns `true` when the cached value changed.
    ///
    /// Re-recording the same height is a no-op, so callers can use the return value to decide
    /// whether the window needs recomputing.
    pub fn record(&mut self, key: K, height: u32) -> bool {
        match self.heights.insert(key, height) {
            Some(prev) => prev != height,
            None => true,
        }
    }

    pub fn get(&self, key: &K) -> Option<u32> {
        self.heights.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.heights.contains_key(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<u32> {
        self.heights.remove(key)
    }

    pub fn clear(&mut self) {
        self.heights.clear();
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Keeps only the entries for which `keep` returns `true`. Returns how many were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) -> usize {
        let before = self.heights.len();
        self.heights.retain(|k, _| keep(k));
        before - self.heights.len()
    }

    /// Cached entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u32)> + '_ {
        self.heights.iter().map(|(k, v)| (k, *v))
    }

    /// Iterates over the cached entries without allocations.
    pub fn for_each(&self, mut f: impl FnMut(&K, u32)) {
        for (k, v) in self.iter() {
            f(k, v);
        }
    }

    /// Exports the cached entries as a `Vec`.
    pub fn export(&self) -> Vec<(K, u32)> {
        let mut out = Vec::with_capacity(self.heights.len());
        self.for_each(|k, v| out.push((k.clone(), v)));
        out
    }

    /// Replaces the cached entries. Zero heights are skipped.
    pub fn import(&mut self, entries: impl IntoIterator<Item = (K, u32)>) {
        self.heights.clear();
        for (k, v) in entries {
            if v > 0 {
                self.heights.insert(k, v);
            }
        }
    }
}

impl<K: KeyCacheKey> Default for HeightCache<K> {
    fn default() -> Self {
        Self::new()
    }
}
