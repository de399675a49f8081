//=========================================================================
// Input Buffer
//
// Collects pointer events between two rendered frames. Acts as a transient
// aggregator between the winit callbacks and the core thread.
//
// Responsibilities:
// - Store incoming pointer events in arrival order
// - Hand the whole frame over at once via `drain()`
//
// Notes:
// Nothing is coalesced: the registry measures movement per sample, and a
// down/up pair inside one frame must both reach it.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::pointer::PointerEvent;

//=== InputBuffer Struct ==================================================

pub(crate) struct InputBuffer {
    events: Vec<PointerEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates for a busy multi-touch frame.
    //
    pub fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Event Handling ---------------------------------------------------
    pub fn push(&mut self, event: PointerEvent) {
        self.events.push(event);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns this frame's events and clears the buffer, or `None` when
    // nothing was buffered.
    //
    pub fn drain(&mut self) -> Option<Vec<PointerEvent>> {
        if self.events.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.events))
    }

    //--- Test Accessors ---------------------------------------------------
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pointer::{PointerId, RawPointerSample};
    use kurbo::Point;

    fn sample(id: u64) -> RawPointerSample {
        RawPointerSample::new(PointerId(id), Point::ZERO, Point::ZERO)
    }

    #[test]
    fn drain_empty_buffer_returns_none() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());
    }

    #[test]
    fn drain_keeps_arrival_order() {
        let mut buffer = InputBuffer::new();
        buffer.push(PointerEvent::Down(sample(1)));
        buffer.push(PointerEvent::Move(sample(1)));
        buffer.push(PointerEvent::Up(sample(1)));

        let events = buffer.drain().unwrap();
        assert_eq!(
            events,
            vec![
                PointerEvent::Down(sample(1)),
                PointerEvent::Move(sample(1)),
                PointerEvent::Up(sample(1)),
            ]
        );
    }

    #[test]
    fn repeated_moves_are_not_coalesced() {
        let mut buffer = InputBuffer::new();
        buffer.push(PointerEvent::Move(sample(1)));
        buffer.push(PointerEvent::Move(sample(1)));

        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn drain_clears_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push(PointerEvent::Down(sample(2)));

        buffer.drain();

        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }
}
