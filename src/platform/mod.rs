//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level pointer input) with the core thread via channel.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  PointerFeed     │
//  │   ↓                      │    │  ↓               │
//  │  InputProcessor          │    │  PointerRegistry │
//  │   ├─ Touch / Cursor      │    │  ↓               │
//  │   └─ Mouse buttons       │    │  PointerApp      │
//  │   ↓                      │    │                  │
//  │  InputBuffer (ordered)   │    └──────────────────┘
//  │   ↓                      │             ↑
//  │  RedrawRequested         │             │
//  │   ↓ (flush)              │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
//
//  Frame Boundary: RedrawRequested
//    → All buffered pointer events sent as one batch
//    → Empty buffers NOT sent
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: one batch per rendered frame,
//   arrival order preserved
// - **Graceful channel disconnect**: if the core thread dies, platform
//   logs a warning but keeps running to allow window closure
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Runtime::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{Touch, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowConfig ========================================================

/// Window settings chosen through the runtime builder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub size: (u32, u32),
}

//=== Platform ============================================================

/// Window manager and pointer event aggregator.
///
/// Runs on the main thread and sends one batch of pointer events per
/// rendered frame to the core thread.
///
/// This type is NOT Send/Sync; it must remain on the main thread.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Window attributes used on creation.
    config: WindowConfig,

    /// Buffers pointer events until frame boundary.
    buffer: InputBuffer,

    /// Channel to send events to core thread.
    event_sender: Sender<PlatformEvent>,

    /// Converts Winit events to pointer events.
    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a new platform instance with the given event sender.
    ///
    /// Does not create window yet; that happens lazily in `resumed()`.
    pub fn new(event_sender: Sender<PlatformEvent>, config: WindowConfig) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            config,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Flushes buffered pointer events to the core thread.
    ///
    /// If the channel is disconnected (core thread exited early), logs a
    /// warning and drops the events.
    fn flush_input_buffer(&mut self) {
        if let Some(events) = self.buffer.drain() {
            let count = events.len();

            trace!(target: "platform::input", "Flushing {} pointer events", count);

            if self.event_sender.send(PlatformEvent::Pointers(events)).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} pointer events",
                    count
                );
            }
        }
    }

    /// Re-reads the client-area origin after the window moved or was
    /// created. Some platforms (Wayland) cannot report it; the last known
    /// origin is kept.
    fn refresh_window_origin(&mut self) {
        if let Some(window) = &self.window {
            match window.inner_position() {
                Ok(origin) => self.input_processor.update_window_origin(origin),
                Err(e) => trace!(target: "platform", "Window origin unavailable: {}", e),
            }
        }
    }

    fn handle_touch(&mut self, touch: &Touch) {
        let event = self.input_processor.process_touch(
            touch.id,
            touch.phase,
            touch.location,
            touch.force,
        );
        self.buffer.push(event);
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.size.0, self.config.size.1));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.input_processor.update_scale_factor(window.scale_factor());
                window.request_redraw();
                self.window = Some(window);
                self.refresh_window_origin();
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.flush_input_buffer();
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                debug!(target: "platform", "Scale factor changed: {}", scale_factor);
                self.input_processor.update_scale_factor(*scale_factor);
            }

            WindowEvent::Moved(_) => self.refresh_window_origin(),

            WindowEvent::Touch(touch) => self.handle_touch(touch),

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_cursor_move(*position);
                self.buffer.push(event);
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(event) = self.input_processor.process_cursor_left() {
                    self.buffer.push(event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(event) = self.input_processor.process_mouse_button(*button, *state) {
                    self.buffer.push(event);
                } else {
                    trace!(target: "platform::input", "Mouse button change without pointer transition");
                }
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered input
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Ignore: Resized, Focused, keyboard, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
