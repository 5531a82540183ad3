#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyHeightMap<K> = HashMap<K, u32>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyHeightMap<K> = BTreeMap<K, u32>;

/// Bounds required of item keys used by the height cache.
///
/// With `std` this is `Hash + Eq`; without it, keys must be `Ord`.
#[cfg(feature = "std")]
pub trait KeyCacheKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> KeyCacheKey for K {}

#[cfg(not(feature = "std"))]
pub trait KeyCacheKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> KeyCacheKey for K {}
