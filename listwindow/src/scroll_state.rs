use crate::ScrollPhase;

/// Default delay, in milliseconds, before a quiet list is considered idle again.
pub const DEFAULT_SCROLLING_DELAY_MS: u64 = 150;

/// A single-slot timer: scheduling replaces the pending deadline instead of stacking.
///
/// Time is supplied by the caller (`now_ms`), so the timer never reads a clock itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebounceTimer {
    deadline_ms: Option<u64>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self { deadline_ms: None }
    }

    /// Arms the timer to fire `delay_ms` after `now_ms`, cancelling any pending deadline.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Fires (and disarms) the timer if its deadline has passed.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}

/// A change of [`ScrollPhase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollTransition {
    /// Idle → Scrolling.
    Started,
    /// Scrolling → Idle.
    Stopped,
}

/// Derives a debounced "is scrolling" flag from scroll notifications.
///
/// The first notification flips the phase to `Scrolling` immediately; the phase returns to
/// `Idle` once `delay_ms` has elapsed since the *last* notification. Hosts advance time with
/// [`ScrollStateTracker::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollStateTracker {
    phase: ScrollPhase,
    delay_ms: u64,
    timer: DebounceTimer,
}

impl ScrollStateTracker {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            phase: ScrollPhase::Idle,
            delay_ms,
            timer: DebounceTimer::new(),
        }
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_scrolling(&self) -> bool {
        self.phase == ScrollPhase::Scrolling
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// When the pending return to `Idle` is due, if any.
    pub fn idle_deadline_ms(&self) -> Option<u64> {
        self.timer.deadline_ms()
    }

    /// Records a scroll notification at `now_ms`.
    pub fn on_scroll(&mut self, now_ms: u64) -> Option<ScrollTransition> {
        self.timer.schedule(now_ms, self.delay_ms);
        match self.phase {
            ScrollPhase::Idle => {
                self.phase = ScrollPhase::Scrolling;
                Some(ScrollTransition::Started)
            }
            ScrollPhase::Scrolling => None,
        }
    }

    /// Advances time; returns `Stopped` when the debounce timer fires.
    pub fn tick(&mut self, now_ms: u64) -> Option<ScrollTransition> {
        if self.phase != ScrollPhase::Scrolling || !self.timer.fire_if_due(now_ms) {
            return None;
        }
        self.phase = ScrollPhase::Idle;
        Some(ScrollTransition::Stopped)
    }

    /// Forces the phase back to `Idle` and cancels the pending timer.
    pub fn reset(&mut self) -> Option<ScrollTransition> {
        self.timer.cancel();
        match self.phase {
            ScrollPhase::Scrolling => {
                self.phase = ScrollPhase::Idle;
                Some(ScrollTransition::Stopped)
            }
            ScrollPhase::Idle => None,
        }
    }
}

impl Default for ScrollStateTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLLING_DELAY_MS)
    }
}
