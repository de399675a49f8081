//=========================================================================
// Tracked Pointer
//=========================================================================
//
// Derived per-pointer state published to UI consumers.
//
// A new value is built for every sample. Movement is recomputed from
// absolute screen coordinates: native "movement since last event" fields
// disagree across platforms once several pointers are down or events are
// synthesized.
//
//=========================================================================

//=== External Dependencies ===============================================

use kurbo::{Point, Vec2};

//=== Internal Dependencies ===============================================

use super::sample::{PointerId, PointerKind, RawPointerSample};

//=== TrackedPointer ======================================================

/// Latest known state of one active pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPointer {
    sample: RawPointerSample,
    movement: Vec2,
    is_local: bool,
}

impl TrackedPointer {
    //--- Construction -----------------------------------------------------

    /// First sample of a new pointer: no movement, not local.
    pub(crate) fn first(sample: &RawPointerSample) -> Self {
        Self {
            sample: *sample,
            movement: Vec2::ZERO,
            is_local: false,
        }
    }

    /// Follow-up sample: movement against `self`, locality carried over.
    pub(crate) fn advance(&self, sample: &RawPointerSample) -> Self {
        Self {
            sample: *sample,
            movement: sample.screen - self.sample.screen,
            is_local: self.is_local,
        }
    }

    pub(crate) fn with_local(mut self, is_local: bool) -> Self {
        self.is_local = is_local;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> PointerId {
        self.sample.id
    }

    pub fn kind(&self) -> PointerKind {
        self.sample.kind
    }

    /// Absolute screen position of the latest sample.
    pub fn screen(&self) -> Point {
        self.sample.screen
    }

    /// Viewport-relative position of the latest sample.
    pub fn client(&self) -> Point {
        self.sample.client
    }

    pub fn pressure(&self) -> Option<f64> {
        self.sample.pressure
    }

    /// Screen-space delta against the previous sample of this pointer.
    pub fn movement(&self) -> Vec2 {
        self.movement
    }

    pub fn movement_x(&self) -> f64 {
        self.movement.x
    }

    pub fn movement_y(&self) -> f64 {
        self.movement.y
    }

    /// Whether the pointer was marked as self-generated.
    ///
    /// Local pointers stay queryable by id but are left out of
    /// [`PointerRegistry::values`](super::PointerRegistry::values) and the
    /// aggregates built on it.
    pub fn is_local(&self) -> bool {
        self.is_local
    }

    /// The sample this value was derived from.
    pub fn sample(&self) -> &RawPointerSample {
        &self.sample
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(sx: f64, sy: f64) -> RawPointerSample {
        RawPointerSample::new(PointerId(1), Point::new(sx, sy), Point::new(sx / 2.0, sy / 2.0))
    }

    #[test]
    fn first_sample_has_no_movement() {
        let p = TrackedPointer::first(&at(40.0, 50.0));
        assert_eq!(p.movement(), Vec2::ZERO);
        assert!(!p.is_local());
    }

    #[test]
    fn advance_measures_screen_delta() {
        let p = TrackedPointer::first(&at(10.0, 10.0)).advance(&at(13.0, 6.0));
        assert_eq!(p.movement_x(), 3.0);
        assert_eq!(p.movement_y(), -4.0);
        assert_eq!(p.client(), Point::new(6.5, 3.0));
    }

    #[test]
    fn advance_keeps_locality() {
        let p = TrackedPointer::first(&at(0.0, 0.0))
            .with_local(true)
            .advance(&at(1.0, 1.0));
        assert!(p.is_local());
    }
}
