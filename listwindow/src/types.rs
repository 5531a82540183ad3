use alloc::vec::Vec;

/// A half-open range of item indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl WindowRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    /// Widens the range by `overscan` items on each side and clamps it to `[0, count - 1]`.
    ///
    /// A range that starts past the last item is pulled back onto the last item, so a non-empty
    /// list always yields a non-empty window unless both the range and `overscan` are empty at
    /// the very top.
    pub fn widen(self, overscan: usize, count: usize) -> Self {
        if count == 0 {
            return Self::EMPTY;
        }
        let start_index = self.start_index.saturating_sub(overscan).min(count - 1);
        let end_index = self
            .end_index
            .max(self.start_index)
            .saturating_add(overscan)
            .min(count);
        if end_index <= start_index {
            return Self::EMPTY;
        }
        Self {
            start_index,
            end_index,
        }
    }
}

/// A single item to render: its key, position in the sequence, and placement on the scroll axis.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem<K> {
    pub key: K,
    pub index: usize,
    /// Distance from the top of the list to the item's leading edge.
    pub offset_top: u64,
    pub height: u32,
}

impl<K> VirtualItem<K> {
    /// Offset of the item's trailing edge.
    pub fn offset_bottom(&self) -> u64 {
        self.offset_top.saturating_add(self.height as u64)
    }
}

/// The output of a window computation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowResult<K> {
    /// Items to render, ordered by index.
    pub virtual_items: Vec<VirtualItem<K>>,
    /// Sum of all item heights, rendered or not.
    pub total_extent: u64,
}

impl<K> WindowResult<K> {
    pub fn empty() -> Self {
        Self {
            virtual_items: Vec::new(),
            total_extent: 0,
        }
    }

    /// The range of indexes covered by `virtual_items`.
    pub fn range(&self) -> WindowRange {
        match (self.virtual_items.first(), self.virtual_items.last()) {
            (Some(first), Some(last)) => WindowRange::new(first.index, last.index + 1),
            _ => WindowRange::EMPTY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.virtual_items.is_empty()
    }
}

impl<K> Default for WindowResult<K> {
    fn default() -> Self {
        Self::empty()
    }
}

/// The viewport size along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerExtent {
    pub height: u32,
}

/// Whether the list is currently being scrolled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    #[default]
    Idle,
    Scrolling,
}

/// A snapshot of the scroll position plus the debounced scrolling flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub scroll_position: u64,
    pub is_scrolling: bool,
}
