//=========================================================================
// Pointer Samples
//=========================================================================
//
// Host-independent representation of raw pointer input.
//
// The platform layer converts whatever the windowing runtime delivers
// (winit touches, cursor motion, mouse buttons) into these types before
// they cross into the core thread.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    PointerEvent (this module)
//         ↓
//    PointerRegistry (ingest / release)
//         ↓
//    TrackedPointer (UI consumers)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use kurbo::Point;

//=== PointerId ===========================================================

/// Stable identifier of one physical contact for its active lifetime.
///
/// Touch ids come straight from the host. The mouse cursor has no host id
/// and uses [`PointerId::MOUSE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

impl PointerId {
    /// Reserved identifier for the mouse cursor.
    pub const MOUSE: PointerId = PointerId(u64::MAX);
}

impl From<u64> for PointerId {
    fn from(raw: u64) -> Self {
        PointerId(raw)
    }
}

impl std::fmt::Display for PointerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == PointerId::MOUSE {
            write!(f, "mouse")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

//=== PointerKind =========================================================

/// Device class that produced a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerKind {
    /// Mouse or trackpad cursor.
    #[default]
    Mouse,

    /// Finger on a touch surface.
    Touch,

    /// Stylus.
    Pen,
}

//=== RawPointerSample ====================================================

/// One pointer sample as delivered by the host.
///
/// Transient: the registry reads it and builds a
/// [`TrackedPointer`](super::TrackedPointer) from it, but never stores or
/// mutates the caller's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPointerSample {
    /// Identifier of the contact.
    pub id: PointerId,

    /// Absolute screen coordinates (physical pixels).
    pub screen: Point,

    /// Viewport-relative coordinates (logical pixels).
    pub client: Point,

    /// Device class.
    pub kind: PointerKind,

    /// Normalised contact force in `0.0..=1.0`, when the host reports one.
    pub pressure: Option<f64>,
}

impl RawPointerSample {
    /// Creates a mouse-kind sample without pressure information.
    pub fn new(id: PointerId, screen: Point, client: Point) -> Self {
        Self {
            id,
            screen,
            client,
            kind: PointerKind::Mouse,
            pressure: None,
        }
    }

    /// Sets the device class.
    pub fn with_kind(mut self, kind: PointerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the contact force.
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }
}

//=== PointerEvent ========================================================

/// Pointer lifecycle notification.
///
/// Down and Move are handled identically by the registry (ingest), as are
/// Up and Cancel (release).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(RawPointerSample),
    Move(RawPointerSample),
    Up(RawPointerSample),
    Cancel(RawPointerSample),
}

impl PointerEvent {
    /// Returns the sample carried by this event.
    pub fn sample(&self) -> &RawPointerSample {
        match self {
            PointerEvent::Down(s)
            | PointerEvent::Move(s)
            | PointerEvent::Up(s)
            | PointerEvent::Cancel(s) => s,
        }
    }

    /// Returns `true` for Up and Cancel.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PointerEvent::Up(_) | PointerEvent::Cancel(_))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: u64) -> RawPointerSample {
        RawPointerSample::new(PointerId(id), Point::new(1.0, 2.0), Point::new(3.0, 4.0))
    }

    #[test]
    fn sample_defaults_to_mouse_without_pressure() {
        let s = sample(1);
        assert_eq!(s.kind, PointerKind::Mouse);
        assert!(s.pressure.is_none());
    }

    #[test]
    fn sample_builders_set_extra_fields() {
        let s = sample(1).with_kind(PointerKind::Pen).with_pressure(0.5);
        assert_eq!(s.kind, PointerKind::Pen);
        assert_eq!(s.pressure, Some(0.5));
    }

    #[test]
    fn terminal_events_are_up_and_cancel() {
        assert!(!PointerEvent::Down(sample(1)).is_terminal());
        assert!(!PointerEvent::Move(sample(1)).is_terminal());
        assert!(PointerEvent::Up(sample(1)).is_terminal());
        assert!(PointerEvent::Cancel(sample(1)).is_terminal());
    }

    #[test]
    fn event_exposes_its_sample() {
        let event = PointerEvent::Cancel(sample(7));
        assert_eq!(event.sample().id, PointerId(7));
    }

    #[test]
    fn mouse_id_displays_by_name() {
        assert_eq!(PointerId::MOUSE.to_string(), "mouse");
        assert_eq!(PointerId(3).to_string(), "#3");
    }
}
