//! A headless windowing engine for very large lists.
//!
//! Given a scroll position, a viewport extent, per-item heights, and an overscan margin, the
//! engine works out which items must be rendered, where each one sits on the scroll axis, and how
//! tall the whole list is. Rendering cost then scales with the viewport, not with the item count.
//!
//! Heights come from one of two places:
//! - a fixed `item_height`, in which case every query is constant time;
//! - an estimate per index, refined by measurements of rendered items. Measurements are cached by
//!   item key and kept in a cumulative-offset index so offsets and window searches stay
//!   logarithmic.
//!
//! The crate is UI-agnostic. A host layer is expected to deliver:
//! - scroll position changes ([`EngineState::on_scroll`]),
//! - viewport resizes ([`EngineState::on_resize`]),
//! - a clock for the "is scrolling" debounce ([`EngineState::tick`]),
//! - measurements of rendered items ([`EngineState::measure_height_ref`]).
//!
//! ```rust
//! use listwindow::{EngineOptions, EngineState};
//!
//! let items: Vec<u32> = (0..10_000).collect();
//! let options = EngineOptions::new(|id: &u32| *id)
//!     .with_item_height(40)
//!     .with_overscan(5);
//! let mut engine = EngineState::new(items, options).unwrap();
//! engine.on_resize(750);
//!
//! assert_eq!(engine.total_height(), 400_000);
//! assert_eq!(engine.virtual_items().len(), 24);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod container;
mod engine;
mod error;
mod fenwick;
mod height_cache;
mod item_list;
mod key;
mod options;
mod scroll_state;
mod types;
pub mod window;

#[cfg(test)]
mod tests;

pub use container::ContainerSizeTracker;
pub use engine::{EngineState, Event, MeasuredElement, parse_index};
pub use error::{ConfigurationError, Error, ValidationError};
pub use height_cache::{CachePolicy, HeightCache};
pub use item_list::ItemListStore;
pub use key::KeyCacheKey;
pub use options::{EngineOptions, EstimateHeightFn, ItemKeyFn, OnChangeCallback};
pub use scroll_state::{
    DEFAULT_SCROLLING_DELAY_MS, DebounceTimer, ScrollStateTracker, ScrollTransition,
};
pub use types::{ContainerExtent, ScrollPhase, ScrollState, VirtualItem, WindowRange, WindowResult};
pub use window::{OffsetIndex, compute_window, fixed_visible_range, fixed_window};
