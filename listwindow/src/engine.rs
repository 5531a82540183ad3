use alloc::string::ToString;
use alloc::vec::Vec;

use crate::container::ContainerSizeTracker;
use crate::error::{ConfigurationError, Error, ValidationError};
use crate::height_cache::{CachePolicy, HeightCache};
use crate::item_list::ItemListStore;
use crate::key::KeyCacheKey;
use crate::options::{EngineOptions, ItemKeyFn};
use crate::scroll_state::{ScrollStateTracker, ScrollTransition};
use crate::window::{OffsetIndex, fixed_window};
use crate::{ContainerExtent, ScrollPhase, ScrollState, VirtualItem, WindowResult};

/// A rendered item element that can report its own height.
///
/// Rendering layers implement this for whatever handle they have on a laid-out row. The element
/// must carry the item index as an attribute (for example `data-index`) so the measurement can be
/// attributed to an item.
pub trait MeasuredElement {
    /// Raw value of the index attribute, if the element has one.
    fn index_attribute(&self) -> Option<&str>;

    /// Laid-out height along the scroll axis.
    fn measured_height(&self) -> u32;
}

/// A notification delivered to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The scroll container moved to `position`.
    Scroll { position: u64, now_ms: u64 },
    /// The scroll container's extent along the scroll axis changed.
    Resize { height: u32 },
    /// Time advanced; drives the scrolling debounce.
    Tick { now_ms: u64 },
    /// Item `index` was laid out at `height`.
    Measure { index: usize, height: u32 },
}

/// The windowing engine: item sequence, measurements, scroll and viewport state, and the most
/// recently computed window.
///
/// Every notification is applied synchronously and the window is recomputed before the call
/// returns, so reads always reflect all prior notifications. Use
/// [`EngineState::batch_update`] to coalesce several notifications into one recomputation.
#[derive(Clone, Debug)]
pub struct EngineState<T, K> {
    options: EngineOptions<T, K>,
    items: ItemListStore<T>,
    cache: HeightCache<K>,
    scroll: ScrollStateTracker,
    container: ContainerSizeTracker,
    scroll_position: u64,

    offsets: OffsetIndex, // variable-height mode only
    window: WindowResult<K>,
    revision: u64,

    batch_depth: usize,
    pending_recompute: bool,
    pending_notify: bool,
}

impl<T, K: KeyCacheKey> EngineState<T, K> {
    /// Creates an engine over `items`.
    ///
    /// Fails when the options are inconsistent, e.g. variable-height mode without an estimate.
    pub fn new(items: Vec<T>, options: EngineOptions<T, K>) -> Result<Self, ConfigurationError> {
        options.validate()?;
        vdebug!(
            count = items.len(),
            item_height = ?options.item_height,
            overscan = options.overscan,
            "EngineState::new"
        );
        let mut engine = Self {
            items: ItemListStore::new(items),
            cache: HeightCache::new(),
            scroll: ScrollStateTracker::new(options.scrolling_delay_ms),
            container: ContainerSizeTracker::new(options.initial_extent.unwrap_or(0)),
            scroll_position: 0,
            offsets: OffsetIndex::new(),
            window: WindowResult::empty(),
            revision: 0,
            batch_depth: 0,
            pending_recompute: false,
            pending_notify: false,
            options,
        };
        engine.rebuild_offsets();
        engine.recompute();
        Ok(engine)
    }

    pub fn options(&self) -> &EngineOptions<T, K> {
        &self.options
    }

    /// Replaces the options. Invalid options are rejected and leave the engine unchanged.
    pub fn set_options(&mut self, options: EngineOptions<T, K>) -> Result<(), ConfigurationError> {
        options.validate()?;
        vdebug!(
            item_height = ?options.item_height,
            overscan = options.overscan,
            "EngineState::set_options"
        );
        self.scroll.set_delay_ms(options.scrolling_delay_ms);
        self.options = options;
        self.rebuild_offsets();
        self.recompute();
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut EngineOptions<T, K>),
    ) -> Result<(), ConfigurationError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.recompute();
    }

    pub fn is_fixed(&self) -> bool {
        self.options.is_fixed()
    }

    // --- outputs -------------------------------------------------------------------------

    /// The items to render, ordered by index.
    pub fn virtual_items(&self) -> &[VirtualItem<K>] {
        &self.window.virtual_items
    }

    pub fn window(&self) -> &WindowResult<K> {
        &self.window
    }

    /// Total scrollable extent: the sum of every item height.
    pub fn total_height(&self) -> u64 {
        self.window.total_extent
    }

    /// Alias of [`EngineState::total_height`], for sizing a spacer element.
    pub fn total_list_height(&self) -> u64 {
        self.total_height()
    }

    /// Number of window recomputations so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn scroll_position(&self) -> u64 {
        self.scroll_position
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling()
    }

    pub fn scroll_phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            scroll_position: self.scroll_position,
            is_scrolling: self.scroll.is_scrolling(),
        }
    }

    pub fn scroll_tracker(&self) -> &ScrollStateTracker {
        &self.scroll
    }

    pub fn container_extent(&self) -> ContainerExtent {
        self.container.extent()
    }

    // --- items ---------------------------------------------------------------------------

    pub fn items(&self) -> &[T] {
        self.items.items()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Replaces the item sequence.
    ///
    /// Cached measurements are kept unless the cache policy prunes them. With index-based keys
    /// this leaves each index bound to the measurement of its previous occupant.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items.set_items(items);
        self.after_items_changed();
    }

    /// Replaces the item sequence with `update(old)`.
    pub fn update_items(&mut self, update: impl FnOnce(Vec<T>) -> Vec<T>) {
        self.items.update_items(update);
        self.after_items_changed();
    }

    pub fn reverse_items(&mut self) {
        self.items.reverse();
        self.after_items_changed();
    }

    fn after_items_changed(&mut self) {
        vdebug!(
            count = self.items.len(),
            cached = self.cache.len(),
            "items replaced"
        );
        if self.options.cache_policy == CachePolicy::PruneMissing {
            self.prune_cache();
        }
        self.rebuild_offsets();
        self.recompute();
    }

    fn prune_cache(&mut self) {
        let items = self.items.items();
        let mut kept = HeightCache::new();
        for index in 0..items.len() {
            let Some(key) = self.options.item_key.key_for(items, index) else {
                continue;
            };
            if let Some(height) = self.cache.get(&key) {
                kept.record(key, height);
            }
        }
        vdebug!(
            dropped = self.cache.len().saturating_sub(kept.len()),
            kept = kept.len(),
            "pruned height cache"
        );
        self.cache = kept;
    }

    pub fn key_for(&self, index: usize) -> Option<K> {
        self.options.item_key.key_for(self.items.items(), index)
    }

    // --- notifications -------------------------------------------------------------------

    /// Applies a scroll notification: updates the position, marks the list as scrolling, and
    /// recomputes the window.
    pub fn on_scroll(&mut self, position: u64, now_ms: u64) {
        vtrace!(position, now_ms, "on_scroll");
        self.scroll_position = position;
        if let Some(ScrollTransition::Started) = self.scroll.on_scroll(now_ms) {
            vtrace!(now_ms, "scrolling started");
        }
        self.recompute();
    }

    /// Moves the scroll position without marking the list as scrolling.
    ///
    /// Use this for programmatic positioning (initial sync, restoring a view); user scrolling
    /// should go through [`EngineState::on_scroll`].
    pub fn set_scroll_position(&mut self, position: u64) {
        if self.scroll_position == position {
            return;
        }
        self.scroll_position = position;
        self.recompute();
    }

    /// Applies a resize notification. Always recomputes, even when the height is unchanged.
    pub fn on_resize(&mut self, height: u32) {
        vtrace!(height, "on_resize");
        self.container.on_resize(height);
        self.recompute();
    }

    /// Advances the scrolling debounce clock.
    ///
    /// Returns `Some(Stopped)` when the list just became idle; `on_change` is fired in that case.
    pub fn tick(&mut self, now_ms: u64) -> Option<ScrollTransition> {
        let transition = self.scroll.tick(now_ms);
        if transition.is_some() {
            vtrace!(now_ms, "scrolling stopped");
            self.notify();
        }
        transition
    }

    /// Marks the list idle immediately, cancelling the debounce timer.
    pub fn stop_scrolling(&mut self) {
        if self.scroll.reset().is_some() {
            self.notify();
        }
    }

    /// Records a measured height for item `index`.
    ///
    /// Returns `Ok(true)` when the measurement changed a cached height (and the window was
    /// recomputed once), `Ok(false)` when it was a no-op. In fixed-size mode measurements are
    /// validated and then ignored.
    pub fn record_measurement(&mut self, index: usize, height: u32) -> Result<bool, ValidationError> {
        let count = self.items.len();
        if index >= count {
            vwarn!(index, count, "measurement for out-of-range index");
            return Err(ValidationError::IndexOutOfRange { index, count });
        }
        if height == 0 {
            vwarn!(index, "zero-height measurement");
            return Err(ValidationError::ZeroHeight { index });
        }
        if self.options.is_fixed() {
            vtrace!(index, height, "measurement ignored in fixed-size mode");
            return Ok(false);
        }
        let Some(key) = self.key_for(index) else {
            return Err(ValidationError::IndexOutOfRange { index, count });
        };

        vtrace!(index, height, "record_measurement");
        let cache_changed = self.cache.record(key.clone(), height);
        let mut offsets_changed = self.offsets.set_height(index, height) != 0;
        if cache_changed {
            // Every index sharing the key resolves to the new height.
            for other in (0..count).filter(|&i| i != index) {
                if self.key_for(other).as_ref() == Some(&key) {
                    offsets_changed |= self.offsets.set_height(other, height) != 0;
                }
            }
        }
        if !cache_changed && !offsets_changed {
            return Ok(false);
        }
        self.recompute();
        Ok(true)
    }

    /// Measures a rendered element and records its height.
    ///
    /// `None` (no element yet) is a no-op. The element's index attribute must parse as a
    /// non-negative integer addressing a current item.
    pub fn measure_height_ref<E: MeasuredElement + ?Sized>(
        &mut self,
        element: Option<&E>,
    ) -> Result<bool, ValidationError> {
        let Some(element) = element else {
            return Ok(false);
        };
        let index = parse_index(element.index_attribute())?;
        self.record_measurement(index, element.measured_height())
    }

    /// Applies a single notification.
    pub fn apply(&mut self, event: Event) -> Result<(), Error> {
        match event {
            Event::Scroll { position, now_ms } => self.on_scroll(position, now_ms),
            Event::Resize { height } => self.on_resize(height),
            Event::Tick { now_ms } => {
                self.tick(now_ms);
            }
            Event::Measure { index, height } => {
                self.record_measurement(index, height)?;
            }
        }
        Ok(())
    }

    /// Returns the state that results from applying `event` to a copy of this one.
    pub fn with_event(&self, event: Event) -> Result<Self, Error>
    where
        T: Clone,
    {
        let mut next = self.clone();
        next.apply(event)?;
        Ok(next)
    }

    /// Batches several updates into one window recomputation and one `on_change` call.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);

        f(self);

        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth > 0 {
            return;
        }
        if self.pending_recompute {
            self.recompute();
        } else if self.pending_notify {
            self.notify();
        }
    }

    // --- measurements --------------------------------------------------------------------

    pub fn height_cache(&self) -> &HeightCache<K> {
        &self.cache
    }

    /// Height used for item `index`: the fixed height, else the measurement, else the estimate.
    pub fn item_height(&self, index: usize) -> Option<u32> {
        if index >= self.items.len() {
            return None;
        }
        match self.options.item_height {
            Some(h) => Some(h),
            None => self.offsets.height(index),
        }
    }

    /// Offset of item `index`'s leading edge.
    pub fn item_offset(&self, index: usize) -> Option<u64> {
        if index >= self.items.len() {
            return None;
        }
        match self.options.item_height {
            Some(h) => Some((index as u64).saturating_mul(h as u64)),
            None => self.offsets.offset(index),
        }
    }

    /// Index of the item covering `offset`, clamped to the last item.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let count = self.items.len();
        if count == 0 {
            return None;
        }
        match self.options.item_height {
            Some(h) => {
                let index = usize::try_from(offset / h as u64).unwrap_or(usize::MAX);
                Some(index.min(count - 1))
            }
            None => self.offsets.index_at_offset(offset),
        }
    }

    /// Whether item `index` has a cached measurement under its current key.
    pub fn is_measured(&self, index: usize) -> bool {
        self.key_for(index)
            .is_some_and(|key| self.cache.contains(&key))
    }

    /// Drops every cached measurement and falls back to estimates.
    pub fn reset_measurements(&mut self) {
        self.cache.clear();
        self.rebuild_offsets();
        self.recompute();
    }

    /// Exports cached measurements (key → height).
    pub fn export_measurements(&self) -> Vec<(K, u32)> {
        self.cache.export()
    }

    /// Replaces cached measurements and re-resolves every item height.
    pub fn import_measurements(&mut self, entries: impl IntoIterator<Item = (K, u32)>) {
        self.cache.import(entries);
        vdebug!(entries = self.cache.len(), "import_measurements");
        self.rebuild_offsets();
        self.recompute();
    }

    // --- internals -----------------------------------------------------------------------

    fn rebuild_offsets(&mut self) {
        if self.options.item_height.is_some() {
            self.offsets = OffsetIndex::new();
            return;
        }
        let Some(estimate) = self.options.estimate_height.as_ref() else {
            return;
        };
        let items = self.items.items();
        let item_key = &self.options.item_key;
        let cache = &self.cache;
        self.offsets.rebuild(items.len(), |index| {
            item_key
                .key_for(items, index)
                .and_then(|key| cache.get(&key))
                .unwrap_or_else(|| estimate(index))
        });
        vdebug!(
            count = items.len(),
            total = self.offsets.total(),
            "rebuilt offset index"
        );
    }

    fn compute(&self) -> WindowResult<K> {
        let items = self.items.items();
        let item_key = &self.options.item_key;
        let scroll_position = self.scroll_position;
        let extent = self.container.height();
        let overscan = self.options.overscan;
        match self.options.item_height {
            Some(h) => fixed_window(items.len(), h, scroll_position, extent, overscan, |i| {
                key_at(item_key, items, i)
            }),
            None => self
                .offsets
                .window(scroll_position, extent, overscan, |i| key_at(item_key, items, i)),
        }
    }

    fn recompute(&mut self) {
        if self.batch_depth > 0 {
            self.pending_recompute = true;
            return;
        }
        self.pending_recompute = false;
        self.window = self.compute();
        self.revision = self.revision.saturating_add(1);
        vtrace!(
            revision = self.revision,
            start = self.window.range().start_index,
            end = self.window.range().end_index,
            total = self.window.total_extent,
            "window recomputed"
        );
        self.notify();
    }

    fn notify(&mut self) {
        if self.batch_depth > 0 {
            self.pending_notify = true;
            return;
        }
        self.pending_notify = false;
        if let Some(cb) = &self.options.on_change {
            cb(&self.window, self.scroll.is_scrolling());
        }
    }
}

fn key_at<T, K>(item_key: &ItemKeyFn<T, K>, items: &[T], index: usize) -> K {
    match item_key {
        ItemKeyFn::Identity(f) => f(&items[index]),
        ItemKeyFn::Index(f) => f(index),
    }
}

/// Parses an element's index attribute.
pub fn parse_index(attribute: Option<&str>) -> Result<usize, ValidationError> {
    let Some(raw) = attribute else {
        return Err(ValidationError::MissingIndex);
    };
    raw.trim()
        .parse::<usize>()
        .map_err(|_| ValidationError::InvalidIndex {
            value: raw.to_string(),
        })
}
