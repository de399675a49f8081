//=========================================================================
// Pointer Feed
//=========================================================================
//
// Core-side binding of a pointer registry to the host's event stream.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → pending events
//                                   ↓
//                       dispatch_into(&mut PointerRegistry)
//
// Lifecycle: attach() → (collect_frame → dispatch_into)* → dispose()
//
// Bounded polling prevents starvation when the host floods the channel.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::pointer::{PointerEvent, PointerRegistry};

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== PointerFeed =========================================================

/// Drains host pointer events and feeds them to a registry.
///
/// # Examples
///
/// ```
/// use aetheric_pointers::core::platform_bridge::{PlatformEvent, PointerFeed, TickControl};
/// use aetheric_pointers::core::pointer::{PointerEvent, PointerId, PointerRegistry, RawPointerSample};
/// use kurbo::Point;
///
/// let (tx, rx) = crossbeam_channel::unbounded();
/// let mut registry = PointerRegistry::new();
/// let mut feed = PointerFeed::attach(rx);
///
/// let sample = RawPointerSample::new(PointerId(3), Point::new(1.0, 1.0), Point::new(1.0, 1.0));
/// tx.send(PlatformEvent::Pointers(vec![PointerEvent::Down(sample)])).unwrap();
///
/// assert_eq!(feed.collect_frame(), TickControl::Continue);
/// feed.dispatch_into(&mut registry);
/// assert_eq!(registry.count(), 1);
///
/// feed.dispose(&mut registry);
/// assert_eq!(registry.count(), 0);
/// ```
pub struct PointerFeed {
    receiver: Receiver<PlatformEvent>,
    pending: Vec<PointerEvent>,
}

impl PointerFeed {
    /// Messages drained per frame before yielding.
    const MAX_EVENTS_PER_FRAME: usize = 100;

    /// Binds to the host's event stream.
    pub fn attach(receiver: Receiver<PlatformEvent>) -> Self {
        info!(target: "pointers", "Pointer feed attached");
        Self {
            receiver,
            pending: Vec::with_capacity(32),
        }
    }

    /// Collects pending host events (bounded to prevent starvation).
    ///
    /// Returns [`TickControl::Exit`] once the window closed or the host
    /// side of the channel is gone.
    pub fn collect_frame(&mut self) -> TickControl {
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Pointers(batch)) => {
                    self.pending.extend(batch);
                    drained += 1;
                }
                Ok(PlatformEvent::WindowClosed) => return TickControl::Exit,
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!(target: "pointers", "Event queue backlog: drained {} batches this frame", drained);
        }

        TickControl::Continue
    }

    /// Events collected but not yet dispatched.
    pub fn pending(&self) -> &[PointerEvent] {
        &self.pending
    }

    /// Feeds collected events to `registry` in arrival order.
    ///
    /// Returns the number of events dispatched.
    pub fn dispatch_into(&mut self, registry: &mut PointerRegistry) -> usize {
        let count = self.pending.len();

        for event in self.pending.drain(..) {
            registry.dispatch(&event);
        }

        if count > 0 {
            trace!(target: "pointers", "Dispatched {} pointer events", count);
        }

        count
    }

    /// Detaches from the host and forgets every tracked pointer.
    pub fn dispose(self, registry: &mut PointerRegistry) {
        drop(self.receiver);
        registry.clear();
        info!(target: "pointers", "Pointer feed disposed");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
