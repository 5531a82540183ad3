//! Window computation: which items to render, where, and how tall the whole list is.
//!
//! Two interchangeable strategies share the same boundary rules:
//! - [`fixed_window`] for uniform heights, constant time in the item count;
//! - [`compute_window`], a linear prefix-sum walk over arbitrary heights.
//!
//! [`OffsetIndex`] answers the same queries as [`compute_window`] in logarithmic time and is what
//! the engine uses for measured lists.
//!
//! Boundary rules: the first visible item is the first one whose trailing edge is strictly below
//! the viewport top; the last visible item is the first one whose trailing edge reaches the
//! viewport bottom. Items exactly touching either edge are therefore included, before overscan.

use alloc::vec::Vec;

use crate::fenwick::Fenwick;
use crate::{VirtualItem, WindowRange, WindowResult};

/// Visible (not overscanned) range for a list of `count` items of uniform `item_height`.
pub fn fixed_visible_range(
    count: usize,
    item_height: u32,
    scroll_position: u64,
    container_extent: u32,
) -> WindowRange {
    if count == 0 || item_height == 0 {
        return WindowRange::EMPTY;
    }
    let h = item_height as u64;
    let bottom = scroll_position.saturating_add(container_extent as u64);
    // A bottom edge at 0 is reached by the first item, as in the variable-height scan.
    let end = if bottom == 0 { 1 } else { to_index(bottom.div_ceil(h)) };
    WindowRange::new(to_index(scroll_position / h).min(count), end.min(count))
}

/// Computes the window for a list of `count` items of uniform `item_height`.
pub fn fixed_window<K>(
    count: usize,
    item_height: u32,
    scroll_position: u64,
    container_extent: u32,
    overscan: usize,
    mut key_of: impl FnMut(usize) -> K,
) -> WindowResult<K> {
    if count == 0 || item_height == 0 {
        return WindowResult::empty();
    }
    let range = fixed_visible_range(count, item_height, scroll_position, container_extent)
        .widen(overscan, count);
    let h = item_height as u64;
    let virtual_items = (range.start_index..range.end_index)
        .map(|index| VirtualItem {
            key: key_of(index),
            index,
            offset_top: (index as u64).saturating_mul(h),
            height: item_height,
        })
        .collect();
    WindowResult {
        virtual_items,
        total_extent: (count as u64).saturating_mul(h),
    }
}

/// Computes the window by walking every item and accumulating offsets.
///
/// `size_of` is called exactly once per item; `key_of` only for items in the window. This is the
/// reference algorithm: `O(count)` per call, since the total extent needs every height.
pub fn compute_window<K>(
    count: usize,
    mut size_of: impl FnMut(usize) -> u32,
    mut key_of: impl FnMut(usize) -> K,
    scroll_position: u64,
    container_extent: u32,
    overscan: usize,
) -> WindowResult<K> {
    if count == 0 {
        return WindowResult::empty();
    }

    let top = scroll_position;
    let bottom = scroll_position.saturating_add(container_extent as u64);

    let mut heights = Vec::with_capacity(count);
    let mut offsets = Vec::with_capacity(count);
    let mut start: Option<usize> = None;
    let mut end: Option<usize> = None;
    let mut total = 0u64;

    for index in 0..count {
        let height = size_of(index);
        let offset_top = total;
        let trailing = offset_top.saturating_add(height as u64);
        heights.push(height);
        offsets.push(offset_top);
        total = trailing;

        if start.is_none() && trailing > top {
            start = Some(index);
        }
        if end.is_none() && trailing >= bottom {
            end = Some(index + 1);
        }
    }

    let visible = WindowRange::new(start.unwrap_or(count), end.unwrap_or(count));
    let range = visible.widen(overscan, count);
    let virtual_items = (range.start_index..range.end_index)
        .map(|index| VirtualItem {
            key: key_of(index),
            index,
            offset_top: offsets[index],
            height: heights[index],
        })
        .collect();

    WindowResult {
        virtual_items,
        total_extent: total,
    }
}

/// Per-item heights plus a cumulative-offset index over them.
///
/// Offsets, totals, and window searches are `O(log n)`; changing one height is `O(log n)`.
#[derive(Clone, Debug)]
pub struct OffsetIndex {
    heights: Vec<u32>,
    sums: Fenwick,
}

impl OffsetIndex {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            sums: Fenwick::new(),
        }
    }

    pub fn from_heights(heights: Vec<u32>) -> Self {
        let sums = Fenwick::from_heights(&heights);
        Self { heights, sums }
    }

    /// Replaces all heights, resolving each index through `height_of`.
    pub fn rebuild(&mut self, count: usize, height_of: impl FnMut(usize) -> u32) {
        self.heights.clear();
        self.heights.reserve_exact(count);
        self.heights.extend((0..count).map(height_of));
        self.sums = Fenwick::from_heights(&self.heights);
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn height(&self, index: usize) -> Option<u32> {
        self.heights.get(index).copied()
    }

    /// Sets the height of one item. Returns the signed change, `0` when out of range or equal.
    pub fn set_height(&mut self, index: usize, height: u32) -> i64 {
        let Some(cur) = self.heights.get_mut(index) else {
            return 0;
        };
        if *cur == height {
            return 0;
        }
        let delta = height as i64 - *cur as i64;
        *cur = height;
        debug_assert_eq!(self.sums.len(), self.heights.len(), "offset index out of sync");
        self.sums.add(index, delta);
        delta
    }

    pub fn offset(&self, index: usize) -> Option<u64> {
        (index < self.heights.len()).then(|| self.sums.prefix_sum(index))
    }

    pub fn total(&self) -> u64 {
        self.sums.total()
    }

    /// Index of the item covering `offset`, clamped to the last item.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let count = self.heights.len();
        if count == 0 {
            return None;
        }
        Some(self.sums.lower_bound(offset).min(count - 1))
    }

    /// Visible (not overscanned) range, using the same boundary rules as [`compute_window`].
    pub fn visible_range(&self, scroll_position: u64, container_extent: u32) -> WindowRange {
        let count = self.heights.len();
        if count == 0 {
            return WindowRange::EMPTY;
        }
        let bottom = scroll_position.saturating_add(container_extent as u64);
        let start = self.sums.lower_bound(scroll_position);
        let end = match bottom.checked_sub(1) {
            // The first item always reaches a bottom edge at 0.
            None => 1,
            Some(before_bottom) => self.sums.lower_bound(before_bottom).saturating_add(1),
        };
        WindowRange::new(start, end.min(count))
    }

    /// Computes the overscanned window.
    pub fn window<K>(
        &self,
        scroll_position: u64,
        container_extent: u32,
        overscan: usize,
        mut key_of: impl FnMut(usize) -> K,
    ) -> WindowResult<K> {
        let count = self.heights.len();
        let range = self
            .visible_range(scroll_position, container_extent)
            .widen(overscan, count);
        let mut virtual_items = Vec::with_capacity(range.len());
        let mut offset_top = self.sums.prefix_sum(range.start_index);
        for index in range.start_index..range.end_index {
            let height = self.heights[index];
            virtual_items.push(VirtualItem {
                key: key_of(index),
                index,
                offset_top,
                height,
            });
            offset_top = offset_top.saturating_add(height as u64);
        }
        WindowResult {
            virtual_items,
            total_extent: self.total(),
        }
    }
}

impl Default for OffsetIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn to_index(v: u64) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}
