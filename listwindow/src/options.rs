use alloc::sync::Arc;

use crate::error::ConfigurationError;
use crate::height_cache::CachePolicy;
use crate::scroll_state::DEFAULT_SCROLLING_DELAY_MS;
use crate::WindowResult;

/// Estimated height of the item at an index, used until the item is measured.
pub type EstimateHeightFn = Arc<dyn Fn(usize) -> u32 + Send + Sync>;

/// A callback fired after each window recomputation and on each scrolling-flag flip.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback<K> = Arc<dyn Fn(&WindowResult<K>, bool) + Send + Sync>;

/// How item keys are derived.
///
/// Keys identify measurements in the height cache. `Identity` keys follow an item when the
/// sequence is reordered; `Index` keys stay bound to a position, so a reorder leaves measurements
/// attached to whatever item lands on that index.
pub enum ItemKeyFn<T, K> {
    /// Key derived from the item itself (for example an id field).
    Identity(Arc<dyn Fn(&T) -> K + Send + Sync>),
    /// Key derived from the item's index.
    Index(Arc<dyn Fn(usize) -> K + Send + Sync>),
}

impl<T, K> ItemKeyFn<T, K> {
    /// Key of the item at `index`, or `None` when an identity key has no item to read.
    pub fn key_for(&self, items: &[T], index: usize) -> Option<K> {
        match self {
            Self::Identity(f) => items.get(index).map(|item| f(item)),
            Self::Index(f) => Some(f(index)),
        }
    }

    pub fn is_index_based(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}

impl<T, K> Clone for ItemKeyFn<T, K> {
    fn clone(&self) -> Self {
        match self {
            Self::Identity(f) => Self::Identity(Arc::clone(f)),
            Self::Index(f) => Self::Index(Arc::clone(f)),
        }
    }
}

impl<T, K> core::fmt::Debug for ItemKeyFn<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Identity(_) => f.write_str("Identity(..)"),
            Self::Index(_) => f.write_str("Index(..)"),
        }
    }
}

/// Configuration for [`crate::EngineState`].
///
/// Closures live in `Arc`s so options are cheap to clone and tweak.
pub struct EngineOptions<T, K> {
    /// Uniform item height. When set, the engine runs in fixed-size mode and ignores
    /// measurements.
    pub item_height: Option<u32>,
    /// Extra items rendered on each side of the visible range.
    pub overscan: usize,
    /// How long after the last scroll notification the list is considered idle.
    pub scrolling_delay_ms: u64,
    /// Height estimate for unmeasured items. Required when `item_height` is `None`.
    pub estimate_height: Option<EstimateHeightFn>,
    pub item_key: ItemKeyFn<T, K>,
    /// Viewport extent to use until the first resize notification.
    pub initial_extent: Option<u32>,
    pub cache_policy: CachePolicy,
    pub on_change: Option<OnChangeCallback<K>>,
}

impl<T, K> Clone for EngineOptions<T, K> {
    fn clone(&self) -> Self {
        Self {
            item_height: self.item_height,
            overscan: self.overscan,
            scrolling_delay_ms: self.scrolling_delay_ms,
            estimate_height: self.estimate_height.clone(),
            item_key: self.item_key.clone(),
            initial_extent: self.initial_extent,
            cache_policy: self.cache_policy,
            on_change: self.on_change.clone(),
        }
    }
}

impl<T, K> EngineOptions<T, K> {
    /// Creates options keyed by item identity.
    ///
    /// `item_key(item)` should return a stable identity (an id field, a path, ...). This is the
    /// recommended mode: measurements follow items across reordering.
    pub fn new(item_key: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        Self::with_key_fn(ItemKeyFn::Identity(Arc::new(item_key)))
    }

    /// Creates options keyed by index.
    ///
    /// Measurements stay bound to positions: after a reorder, an index inherits the height
    /// measured for whatever item previously occupied it.
    pub fn new_index_keyed(item_key: impl Fn(usize) -> K + Send + Sync + 'static) -> Self {
        Self::with_key_fn(ItemKeyFn::Index(Arc::new(item_key)))
    }

    fn with_key_fn(item_key: ItemKeyFn<T, K>) -> Self {
        Self {
            item_height: None,
            overscan: 1,
            scrolling_delay_ms: DEFAULT_SCROLLING_DELAY_MS,
            estimate_height: None,
            item_key,
            initial_extent: None,
            cache_policy: CachePolicy::Retain,
            on_change: None,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.item_height.is_some()
    }

    /// Checks the options for contradictions. Called by the engine constructor.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self.item_height {
            Some(0) => return Err(ConfigurationError::ZeroItemHeight),
            None if self.estimate_height.is_none() => {
                return Err(ConfigurationError::MissingEstimate);
            }
            _ => {}
        }
        if self.scrolling_delay_ms == 0 {
            return Err(ConfigurationError::ZeroScrollingDelay);
        }
        Ok(())
    }

    pub fn with_item_height(mut self, item_height: u32) -> Self {
        self.item_height = Some(item_height);
        self
    }

    pub fn with_estimate_height(
        mut self,
        estimate_height: impl Fn(usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.estimate_height = Some(Arc::new(estimate_height));
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_scrolling_delay_ms(mut self, delay_ms: u64) -> Self {
        self.scrolling_delay_ms = delay_ms;
        self
    }

    pub fn with_item_key(mut self, item_key: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        self.item_key = ItemKeyFn::Identity(Arc::new(item_key));
        self
    }

    pub fn with_index_key(mut self, item_key: impl Fn(usize) -> K + Send + Sync + 'static) -> Self {
        self.item_key = ItemKeyFn::Index(Arc::new(item_key));
        self
    }

    pub fn with_initial_extent(mut self, initial_extent: Option<u32>) -> Self {
        self.initial_extent = initial_extent;
        self
    }

    pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&WindowResult<K>, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T, K> core::fmt::Debug for EngineOptions<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineOptions")
            .field("item_height", &self.item_height)
            .field("overscan", &self.overscan)
            .field("scrolling_delay_ms", &self.scrolling_delay_ms)
            .field("item_key", &self.item_key)
            .field("initial_extent", &self.initial_extent)
            .field("cache_policy", &self.cache_policy)
            .finish_non_exhaustive()
    }
}
