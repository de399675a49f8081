//=========================================================================
// Pointer Registry
//=========================================================================
//
// Live per-pointer gesture state with reactive access and aggregates.
//
// Architecture:
//   PointerEvent → dispatch() ─┬─ Down/Move → ingest()  ─┐
//                              └─ Up/Cancel → release() ─┤
//                                                        ↓
//              HashMap<PointerId, PointerEntry { pointer, channel, removal }>
//                                                        ↓
//            get() / subscribe() / values() / count() / centroid()
//
// Frame lifecycle: dispatch()* → queries → advance_frame() → repeat
//
// A released pointer stays tracked until the next advance_frame(), so code
// reacting to the release still sees it in `values()` and `centroid()`.
// A new sample for the id before that frame boundary cancels the removal.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::hash_map::{Entry as MapEntry, HashMap};

use kurbo::{Point, Vec2};
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::sample::{PointerEvent, PointerId, RawPointerSample};
use super::tracked::TrackedPointer;
use crate::core::frame_queue::{FrameQueue, FrameTicket};
use crate::core::reactive::{Channel, Subscription};

//=== PointerEntry ========================================================

#[derive(Debug)]
struct PointerEntry {
    pointer: TrackedPointer,
    channel: Channel<TrackedPointer>,
    removal: Option<FrameTicket>,
}

//=== PointerRegistry =====================================================

/// Tracks every active pointer and publishes its state.
///
/// Single-threaded: it lives on the thread that dispatches input to it.
/// Construct one explicitly and hand it to the consumers that need it.
///
/// # Example
///
/// ```
/// use aetheric_pointers::core::pointer::{PointerId, PointerRegistry, RawPointerSample};
/// use kurbo::Point;
///
/// let mut registry = PointerRegistry::new();
/// let sample = RawPointerSample::new(PointerId(1), Point::new(10.0, 10.0), Point::new(10.0, 10.0));
///
/// registry.ingest(&sample);
/// assert_eq!(registry.count(), 1);
///
/// registry.release(&sample);
/// assert_eq!(registry.count(), 1);
///
/// registry.advance_frame();
/// assert!(registry.get(PointerId(1)).is_none());
/// ```
#[derive(Debug, Default)]
pub struct PointerRegistry {
    entries: HashMap<PointerId, PointerEntry>,
    removals: FrameQueue<PointerId>,
}

impl PointerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    //=====================================================================
    // Ingestion
    //=====================================================================

    /// Records a down/move sample.
    ///
    /// A pointer seen for the first time starts with zero movement and
    /// `is_local == false`. Otherwise movement is measured against the
    /// previous sample, locality is kept and the new value is published to
    /// the pointer's subscribers. A pending removal for the id is
    /// cancelled.
    pub fn ingest(&mut self, sample: &RawPointerSample) -> &TrackedPointer {
        let entry = Self::upsert(&mut self.entries, sample);

        if let Some(ticket) = entry.removal.take() {
            self.removals.cancel(ticket);
            debug!(target: "pointers", "Pointer {} resumed before removal", sample.id);
        }

        &entry.pointer
    }

    /// Records an up/cancel sample.
    ///
    /// The sample is ingested first, so subscribers see the final position,
    /// then the pointer is scheduled for removal at the next
    /// [`advance_frame`](Self::advance_frame). Releasing again before that
    /// keeps the original schedule.
    pub fn release(&mut self, sample: &RawPointerSample) -> &TrackedPointer {
        let entry = Self::upsert(&mut self.entries, sample);

        if entry.removal.is_none() {
            entry.removal = Some(self.removals.schedule(sample.id));
            debug!(target: "pointers", "Pointer {} released, removal on next frame", sample.id);
        }

        &entry.pointer
    }

    /// Routes a lifecycle event to [`ingest`](Self::ingest) or
    /// [`release`](Self::release).
    pub fn dispatch(&mut self, event: &PointerEvent) -> &TrackedPointer {
        match event {
            PointerEvent::Down(sample) | PointerEvent::Move(sample) => self.ingest(sample),
            PointerEvent::Up(sample) | PointerEvent::Cancel(sample) => self.release(sample),
        }
    }

    //=====================================================================
    // Frame Boundary
    //=====================================================================

    /// Removes every pointer released before this call.
    ///
    /// Removal drops the pointer's channel; its subscriptions become
    /// inactive. Returns the number of pointers removed.
    pub fn advance_frame(&mut self) -> usize {
        let mut removed = 0;

        for (ticket, id) in self.removals.take_due() {
            match self.entries.get(&id) {
                Some(entry) if entry.removal == Some(ticket) => {
                    self.entries.remove(&id);
                    removed += 1;
                    debug!(target: "pointers", "Pointer {} removed", id);
                }
                _ => {
                    debug!(target: "pointers", "Skipping superseded removal of pointer {}", id);
                }
            }
        }

        removed
    }

    //=====================================================================
    // Point Queries
    //=====================================================================

    /// Returns the current state of a pointer, or `None` if it is not
    /// active.
    pub fn get(&self, id: PointerId) -> Option<&TrackedPointer> {
        self.entries.get(&id).map(|entry| &entry.pointer)
    }

    /// Returns `true` if the pointer was released and waits for removal.
    pub fn is_pending_removal(&self, id: PointerId) -> bool {
        self.entries
            .get(&id)
            .is_some_and(|entry| entry.removal.is_some())
    }

    /// Marks a pointer as local (self-generated) or not.
    ///
    /// The flag sticks until the pointer is removed. Subscribers are
    /// notified when the flag changes. Returns `false` if the pointer is
    /// not tracked.
    pub fn set_local(&mut self, id: PointerId, is_local: bool) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };

        if entry.pointer.is_local() != is_local {
            entry.pointer = entry.pointer.with_local(is_local);
            entry.channel.publish(entry.pointer);
            debug!(target: "pointers", "Pointer {} local: {}", id, is_local);
        }

        true
    }

    //=====================================================================
    // Reactive Access
    //=====================================================================

    /// Calls `listener` with the pointer's current state and then on every
    /// update, until unsubscribed or the pointer is removed.
    ///
    /// Unknown ids get a detached [`Subscription`]; the listener is never
    /// called.
    pub fn subscribe<F>(&self, id: PointerId, listener: F) -> Subscription
    where
        F: FnMut(&TrackedPointer) + 'static,
    {
        match self.entries.get(&id) {
            Some(entry) => entry.channel.subscribe(listener),
            None => {
                trace!(target: "pointers", "Subscribe to inactive pointer {}", id);
                Subscription::detached()
            }
        }
    }

    //=====================================================================
    // Aggregates
    //=====================================================================

    /// Tracked pointers that count toward gesture math (non-local ones).
    ///
    /// Iteration order is unspecified.
    pub fn values(&self) -> impl Iterator<Item = &TrackedPointer> {
        self.entries
            .values()
            .map(|entry| &entry.pointer)
            .filter(|pointer| !pointer.is_local())
    }

    /// Number of pointers in [`values`](Self::values).
    pub fn count(&self) -> usize {
        self.values().count()
    }

    /// Number of tracked pointers, local ones included.
    pub fn tracked_len(&self) -> usize {
        self.entries.len()
    }

    /// Mean client position over [`values`](Self::values).
    ///
    /// With no pointers the mean is 0/0 and both coordinates are NaN.
    /// Check `count() > 0` first.
    pub fn centroid(&self) -> Point {
        let (sum, n) = self
            .values()
            .fold((Vec2::ZERO, 0usize), |(sum, n), pointer| {
                (sum + pointer.client().to_vec2(), n + 1)
            });

        (sum / n as f64).to_point()
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    /// Drops every pointer and pending removal.
    pub fn clear(&mut self) {
        debug!(target: "pointers", "Clearing {} tracked pointers", self.entries.len());
        self.entries.clear();
        self.removals.clear();
    }

    //--- Internal Helpers -------------------------------------------------

    fn upsert<'a>(
        entries: &'a mut HashMap<PointerId, PointerEntry>,
        sample: &RawPointerSample,
    ) -> &'a mut PointerEntry {
        match entries.entry(sample.id) {
            MapEntry::Vacant(slot) => {
                debug!(target: "pointers", "Pointer {} tracked ({:?})", sample.id, sample.kind);
                let pointer = TrackedPointer::first(sample);
                slot.insert(PointerEntry {
                    pointer,
                    channel: Channel::new(pointer),
                    removal: None,
                })
            }
            MapEntry::Occupied(slot) => {
                let entry = slot.into_mut();
                entry.pointer = entry.pointer.advance(sample);
                trace!(
                    target: "pointers",
                    "Pointer {} at {:?} moved {:?}",
                    sample.id,
                    sample.screen,
                    entry.pointer.movement()
                );
                entry.channel.publish(entry.pointer);
                entry
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
