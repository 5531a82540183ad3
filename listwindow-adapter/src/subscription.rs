/// Proof that a controller is attached to its scroll element.
///
/// Returned by [`crate::Controller::attach`] and required to deliver notifications. Detaching
/// consumes it; a token from an earlier attach is stale and its notifications are dropped.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "notifications are only delivered through a live subscription"]
pub struct Subscription {
    pub(crate) id: u64,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// What happened to a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Delivery {
    /// The engine state was updated.
    Applied,
    /// The subscription is not the current one; nothing changed.
    Detached,
    /// The scroll element is not available yet; nothing changed.
    MissingElement,
}

impl Delivery {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}
