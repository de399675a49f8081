//=========================================================================
// Subscription
//=========================================================================
//
// Handle returned by `Channel::subscribe`.
//
// Holds a weak reference to the channel's listener set, so it never keeps
// a channel alive. Unsubscribing from a channel that is already gone, or
// through a detached handle, does nothing.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Weak;

//=== ListenerSet =========================================================

/// Type-erased listener storage, so `Subscription` needs no type parameter.
pub(super) trait ListenerSet {
    /// Removes the listener; returns `true` if it was registered.
    fn remove(&self, id: u64) -> bool;

    /// Returns `true` if the listener is registered.
    fn contains(&self, id: u64) -> bool;
}

//=== Subscription ========================================================

/// Unsubscribe handle for one listener.
///
/// Dropping the handle does not unsubscribe; call
/// [`unsubscribe`](Self::unsubscribe) explicitly.
#[must_use = "dropping a Subscription does not unsubscribe"]
pub struct Subscription {
    target: Option<(Weak<dyn ListenerSet>, u64)>,
}

impl Subscription {
    pub(super) fn attached(set: Weak<dyn ListenerSet>, id: u64) -> Self {
        Self {
            target: Some((set, id)),
        }
    }

    /// A handle bound to nothing. Unsubscribing it is a no-op.
    pub fn detached() -> Self {
        Self { target: None }
    }

    /// Returns `true` while the listener is still registered on a live
    /// channel.
    pub fn is_active(&self) -> bool {
        match &self.target {
            Some((set, id)) => set.upgrade().is_some_and(|set| set.contains(*id)),
            None => false,
        }
    }

    /// Removes the listener from its channel, if both still exist.
    pub fn unsubscribe(self) {
        if let Some((set, id)) = self.target {
            if let Some(set) = set.upgrade() {
                set.remove(id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_handle_is_inactive_and_harmless() {
        let sub = Subscription::detached();
        assert!(!sub.is_active());
        sub.unsubscribe();
    }
}
