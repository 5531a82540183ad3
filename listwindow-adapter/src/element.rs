use alloc::rc::Rc;
use alloc::sync::Arc;

/// The scrollable container a list is rendered into.
///
/// Hosts implement this for their own handle type (a DOM element wrapper, a TUI scroll view, a
/// test double). The controller reads it whenever a notification arrives.
pub trait ScrollElement {
    /// Current scroll position along the list axis.
    fn scroll_top(&self) -> u64;

    /// Visible extent along the list axis.
    fn client_height(&self) -> u32;
}

impl<E: ScrollElement + ?Sized> ScrollElement for &E {
    fn scroll_top(&self) -> u64 {
        (**self).scroll_top()
    }

    fn client_height(&self) -> u32 {
        (**self).client_height()
    }
}

impl<E: ScrollElement + ?Sized> ScrollElement for Rc<E> {
    fn scroll_top(&self) -> u64 {
        (**self).scroll_top()
    }

    fn client_height(&self) -> u32 {
        (**self).client_height()
    }
}

impl<E: ScrollElement + ?Sized> ScrollElement for Arc<E> {
    fn scroll_top(&self) -> u64 {
        (**self).scroll_top()
    }

    fn client_height(&self) -> u32 {
        (**self).client_height()
    }
}
