use alloc::sync::Arc;

use listwindow::{
    ConfigurationError, EngineOptions, EngineState, Error, KeyCacheKey, ScrollTransition,
};

use crate::{Delivery, ScrollElement, Subscription};

/// Resolves the scroll element, or `None` while it does not exist yet (not mounted, torn down).
pub type ScrollElementGetter<E> = Arc<dyn Fn() -> Option<E> + Send + Sync>;

/// Binds an [`EngineState`] to a host scroll element.
///
/// The controller holds no UI objects itself. It asks the getter for the element each time the
/// host forwards a notification, reads `scroll_top`/`client_height`, and feeds the engine.
///
/// Lifecycle:
/// - [`Controller::attach`] starts a subscription and syncs position and extent without marking
///   the list as scrolling;
/// - [`Controller::on_scroll`] / [`Controller::on_resize`] deliver notifications;
/// - [`Controller::tick`] drives the "is scrolling" debounce;
/// - [`Controller::detach`] ends the subscription. Notifications tagged with an old subscription
///   are dropped.
pub struct Controller<T, K, E> {
    engine: EngineState<T, K>,
    get_scroll_element: ScrollElementGetter<E>,
    attached: Option<u64>,
    next_id: u64,
}

impl<T, K: KeyCacheKey, E: ScrollElement> Controller<T, K, E> {
    pub fn new(
        items: alloc::vec::Vec<T>,
        options: EngineOptions<T, K>,
        get_scroll_element: impl Fn() -> Option<E> + Send + Sync + 'static,
    ) -> Result<Self, ConfigurationError> {
        let engine = EngineState::new(items, options)?;
        Ok(Self::from_engine(engine, get_scroll_element))
    }

    pub fn from_engine(
        engine: EngineState<T, K>,
        get_scroll_element: impl Fn() -> Option<E> + Send + Sync + 'static,
    ) -> Self {
        Self {
            engine,
            get_scroll_element: Arc::new(get_scroll_element),
            attached: None,
            next_id: 1,
        }
    }

    pub fn engine(&self) -> &EngineState<T, K> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EngineState<T, K> {
        &mut self.engine
    }

    pub fn into_engine(self) -> EngineState<T, K> {
        self.engine
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// Starts a subscription, replacing any previous one.
    ///
    /// If the element is available, the engine picks up its scroll position and extent. A missing
    /// element is not an error here; the first delivered notification (or [`Controller::try_sync`])
    /// syncs later.
    pub fn attach(&mut self) -> Subscription {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        if self.attached.replace(id).is_some() {
            vdebug!(id, "attach replaced a live subscription");
        }
        if self.try_sync().is_err() {
            vdebug!(id, "attach without scroll element; waiting for first notification");
        }
        Subscription { id }
    }

    /// Ends `subscription`. Returns `false` for a stale token.
    ///
    /// A list that was scrolling is marked idle, since no further notifications will arrive.
    pub fn detach(&mut self, subscription: Subscription) -> bool {
        if !self.is_current(&subscription) {
            return false;
        }
        vtrace!(id = subscription.id, "detach");
        self.attached = None;
        self.engine.stop_scrolling();
        true
    }

    /// Reads the element's scroll position and marks the list as scrolling.
    pub fn on_scroll(&mut self, subscription: &Subscription, now_ms: u64) -> Delivery {
        if !self.is_current(subscription) {
            return Delivery::Detached;
        }
        let Some(element) = (self.get_scroll_element)() else {
            vwarn!("scroll notification without scroll element");
            return Delivery::MissingElement;
        };
        self.engine.on_scroll(element.scroll_top(), now_ms);
        Delivery::Applied
    }

    /// Reads the element's client height and recomputes the window.
    pub fn on_resize(&mut self, subscription: &Subscription) -> Delivery {
        if !self.is_current(subscription) {
            return Delivery::Detached;
        }
        let Some(element) = (self.get_scroll_element)() else {
            vwarn!("resize notification without scroll element");
            return Delivery::MissingElement;
        };
        self.engine.on_resize(element.client_height());
        Delivery::Applied
    }

    /// Advances the debounce clock. Runs whether or not a subscription is live.
    pub fn tick(&mut self, now_ms: u64) -> Option<ScrollTransition> {
        self.engine.tick(now_ms)
    }

    /// Pulls position and extent from the element without marking the list as scrolling.
    pub fn try_sync(&mut self) -> Result<(), Error> {
        let element = (self.get_scroll_element)().ok_or(Error::MissingCollaborator)?;
        let extent = element.client_height();
        let position = element.scroll_top();
        self.engine.batch_update(|engine| {
            engine.set_scroll_position(position);
            engine.on_resize(extent);
        });
        Ok(())
    }

    fn is_current(&self, subscription: &Subscription) -> bool {
        self.attached == Some(subscription.id)
    }
}

impl<T: core::fmt::Debug, K: core::fmt::Debug, E> core::fmt::Debug for Controller<T, K, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("engine", &self.engine)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}
