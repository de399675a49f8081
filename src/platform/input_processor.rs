//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit touch, cursor and mouse button events into pointer
// events.
//
// Architecture:
//   Winit Events → InputProcessor → PointerEvent → InputBuffer
//
// Stateful tracking:
// - Scale factor (client coordinates are logical pixels)
// - Window origin (screen coordinates = origin + physical location)
// - Last cursor position (mouse buttons carry no position)
// - Held mouse buttons (Down on the first press, Up on the last release)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use kurbo::Point;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Force, MouseButton, TouchPhase},
};

//=== Internal Dependencies ===============================================

use crate::core::pointer::{PointerEvent, PointerId, PointerKind, RawPointerSample};

//=== InputProcessor ======================================================

/// Converts winit pointer input to [`PointerEvent`]s.
pub(crate) struct InputProcessor {
    scale_factor: f64,
    window_origin: PhysicalPosition<i32>,
    cursor: Option<PhysicalPosition<f64>>,
    buttons_down: HashSet<MouseButton>,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            scale_factor: 1.0,
            window_origin: PhysicalPosition::new(0, 0),
            cursor: None,
            buttons_down: HashSet::new(),
        }
    }

    //--- Window State -----------------------------------------------------

    /// Updates the DPI scale used for client coordinates.
    pub(crate) fn update_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    /// Updates the screen position of the window's client area.
    pub(crate) fn update_window_origin(&mut self, origin: PhysicalPosition<i32>) {
        self.window_origin = origin;
    }

    //--- Touch ------------------------------------------------------------

    /// Converts one touch phase into a pointer event.
    pub(crate) fn process_touch(
        &self,
        id: u64,
        phase: TouchPhase,
        location: PhysicalPosition<f64>,
        force: Option<Force>,
    ) -> PointerEvent {
        let mut sample = self
            .sample(PointerId(id), location)
            .with_kind(PointerKind::Touch);
        if let Some(force) = force {
            sample = sample.with_pressure(force.normalized());
        }

        match phase {
            TouchPhase::Started => PointerEvent::Down(sample),
            TouchPhase::Moved => PointerEvent::Move(sample),
            TouchPhase::Ended => PointerEvent::Up(sample),
            TouchPhase::Cancelled => PointerEvent::Cancel(sample),
        }
    }

    //--- Mouse ------------------------------------------------------------

    /// Cursor motion is a Move of the mouse pointer, hover included.
    pub(crate) fn process_cursor_move(&mut self, position: PhysicalPosition<f64>) -> PointerEvent {
        self.cursor = Some(position);
        PointerEvent::Move(self.sample(PointerId::MOUSE, position))
    }

    /// Converts a button change into Down/Up of the mouse pointer.
    ///
    /// Chorded presses produce no extra events: Down fires for the first
    /// held button, Up once the last one is released. Returns `None` for
    /// intermediate chord changes and while the cursor position is
    /// unknown.
    pub(crate) fn process_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<PointerEvent> {
        let was_idle = self.buttons_down.is_empty();

        match state {
            ElementState::Pressed => {
                self.buttons_down.insert(button);
            }
            ElementState::Released => {
                self.buttons_down.remove(&button);
            }
        }

        let sample = self.sample(PointerId::MOUSE, self.cursor?);

        match state {
            ElementState::Pressed if was_idle => Some(PointerEvent::Down(sample)),
            ElementState::Released if !was_idle && self.buttons_down.is_empty() => {
                Some(PointerEvent::Up(sample))
            }
            _ => None,
        }
    }

    /// The cursor left the window: cancels the mouse pointer.
    pub(crate) fn process_cursor_left(&mut self) -> Option<PointerEvent> {
        self.buttons_down.clear();
        let position = self.cursor.take()?;
        Some(PointerEvent::Cancel(self.sample(PointerId::MOUSE, position)))
    }

    //--- Internal Helpers -------------------------------------------------

    fn sample(&self, id: PointerId, location: PhysicalPosition<f64>) -> RawPointerSample {
        let client = location.to_logical::<f64>(self.scale_factor);
        let screen = Point::new(
            f64::from(self.window_origin.x) + location.x,
            f64::from(self.window_origin.y) + location.y,
        );

        RawPointerSample::new(id, screen, Point::new(client.x, client.y))
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> PhysicalPosition<f64> {
        PhysicalPosition::new(x, y)
    }

    //=====================================================================
    // Coordinates
    //=====================================================================

    #[test]
    fn client_is_logical_and_screen_is_offset() {
        let mut processor = InputProcessor::new();
        processor.update_scale_factor(2.0);
        processor.update_window_origin(PhysicalPosition::new(100, 50));

        let event = processor.process_touch(1, TouchPhase::Started, at(40.0, 20.0), None);

        let sample = event.sample();
        assert_eq!(sample.client, Point::new(20.0, 10.0));
        assert_eq!(sample.screen, Point::new(140.0, 70.0));
    }

    //=====================================================================
    // Touch
    //=====================================================================

    #[test]
    fn touch_phases_map_to_lifecycle() {
        let processor = InputProcessor::new();
        let p = at(0.0, 0.0);

        assert!(matches!(processor.process_touch(1, TouchPhase::Started, p, None), PointerEvent::Down(_)));
        assert!(matches!(processor.process_touch(1, TouchPhase::Moved, p, None), PointerEvent::Move(_)));
        assert!(matches!(processor.process_touch(1, TouchPhase::Ended, p, None), PointerEvent::Up(_)));
        assert!(matches!(processor.process_touch(1, TouchPhase::Cancelled, p, None), PointerEvent::Cancel(_)));
    }

    #[test]
    fn touch_keeps_id_kind_and_force() {
        let processor = InputProcessor::new();
        let event = processor.process_touch(9, TouchPhase::Moved, at(1.0, 1.0), Some(Force::Normalized(0.25)));

        let sample = event.sample();
        assert_eq!(sample.id, PointerId(9));
        assert_eq!(sample.kind, PointerKind::Touch);
        assert_eq!(sample.pressure, Some(0.25));
    }

    //=====================================================================
    // Mouse
    //=====================================================================

    #[test]
    fn cursor_move_is_mouse_move() {
        let mut processor = InputProcessor::new();
        let event = processor.process_cursor_move(at(12.0, 34.0));

        match event {
            PointerEvent::Move(sample) => {
                assert_eq!(sample.id, PointerId::MOUSE);
                assert_eq!(sample.kind, PointerKind::Mouse);
                assert_eq!(sample.client, Point::new(12.0, 34.0));
            }
            other => panic!("Expected Move, got {:?}", other),
        }
    }

    #[test]
    fn button_without_cursor_position_is_ignored() {
        let mut processor = InputProcessor::new();
        let event = processor.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(event.is_none());
    }

    #[test]
    fn press_and_release_at_last_cursor_position() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_move(at(5.0, 6.0));

        let down = processor.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        let up = processor.process_mouse_button(MouseButton::Left, ElementState::Released);

        assert!(matches!(down, Some(PointerEvent::Down(s)) if s.client == Point::new(5.0, 6.0)));
        assert!(matches!(up, Some(PointerEvent::Up(_))));
    }

    #[test]
    fn chorded_buttons_emit_single_down_and_up() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_move(at(0.0, 0.0));

        let first = processor.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        let second = processor.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        let partial = processor.process_mouse_button(MouseButton::Left, ElementState::Released);
        let last = processor.process_mouse_button(MouseButton::Right, ElementState::Released);

        assert!(matches!(first, Some(PointerEvent::Down(_))));
        assert!(second.is_none());
        assert!(partial.is_none());
        assert!(matches!(last, Some(PointerEvent::Up(_))));
    }

    #[test]
    fn stray_release_is_ignored() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_move(at(0.0, 0.0));

        let event = processor.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert!(event.is_none());
    }

    #[test]
    fn cursor_left_cancels_mouse_pointer_once() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_move(at(3.0, 3.0));
        processor.process_mouse_button(MouseButton::Left, ElementState::Pressed);

        assert!(matches!(processor.process_cursor_left(), Some(PointerEvent::Cancel(_))));
        assert!(processor.process_cursor_left().is_none());

        // buttons were reset with the cancel
        processor.process_cursor_move(at(3.0, 3.0));
        let event = processor.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(matches!(event, Some(PointerEvent::Down(_))));
    }
}
