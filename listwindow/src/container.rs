use crate::ContainerExtent;

/// Tracks the viewport extent from resize notifications.
///
/// No smoothing is applied: the latest notification always wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContainerSizeTracker {
    extent: ContainerExtent,
}

impl ContainerSizeTracker {
    pub fn new(height: u32) -> Self {
        Self {
            extent: ContainerExtent { height },
        }
    }

    pub fn extent(&self) -> ContainerExtent {
        self.extent
    }

    pub fn height(&self) -> u32 {
        self.extent.height
    }

    /// Applies a resize notification. Returns `true` when the height changed.
    pub fn on_resize(&mut self, height: u32) -> bool {
        let changed = self.extent.height != height;
        self.extent.height = height;
        changed
    }
}
