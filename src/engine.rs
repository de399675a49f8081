//=========================================================================
// Aetheric Pointers Runtime
//
// Main entry point wiring the winit host to the pointer registry.
//
// Architecture:
// ```text
//     RuntimeBuilder  ──build()──>  Runtime  ──run(make_app)──>  [Runtime]
//         │                           │
//         ├─ with_tps()               └─ spawns core thread
//         ├─ with_channel_capacity()     runs platform
//         └─ with_window_*()             blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::core::pointer::PointerRegistry;
use crate::core::{CoreSystemsOrchestrator, PointerApp};
use crate::platform::{Platform, WindowConfig};

//=== RuntimeBuilder ======================================================

/// Builder for configuring and constructing a [`Runtime`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (core ticks, i.e. registry frames, per second)
/// - **Channel capacity**: 128 batches
/// - **Window**: "Aetheric Pointers", 800x600
///
/// # Examples
///
/// ```no_run
/// use aetheric_pointers::RuntimeBuilder;
/// use aetheric_pointers::core::pointer::PointerRegistry;
///
/// RuntimeBuilder::new()
///     .with_tps(120.0)
///     .with_window_title("Gestures")
///     .build()
///     .run(|_registry| {
///         |registry: &mut PointerRegistry| {
///             if registry.count() >= 2 {
///                 println!("centroid: {:?}", registry.centroid());
///             }
///         }
///     })
///     .unwrap();
/// ```
pub struct RuntimeBuilder {
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl RuntimeBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window: WindowConfig {
                title: "Aetheric Pointers".to_string(),
                size: (800, 600),
            },
        }
    }

    /// Sets the target ticks per second for the core thread.
    ///
    /// One tick is one registry frame: released pointers disappear one
    /// tick after their up/cancel event.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the window title.
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Sets the initial window size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero");
        self.window.size = (width, height);
        self
    }

    /// Builds the runtime.
    pub fn build(self) -> Runtime {
        info!("Building runtime (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        Runtime {
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Runtime =============================================================

/// Pointer runtime: a winit window feeding a [`PointerRegistry`] on a
/// dedicated core thread.
///
/// ```text
/// Runtime (Main Thread)
///   ├─► Core thread (@ TPS)
///   │     └─► PointerFeed → PointerRegistry → PointerApp
///   │
///   └─► Platform (Event Loop)
///         └─► Window, touch / cursor polling
///
/// Communication: bounded channel (PlatformEvent)
/// ```
pub struct Runtime {
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl Runtime {
    /// Starts the runtime and blocks until the window closes.
    ///
    /// `make_app` runs on the core thread with the fresh registry before
    /// the first tick; the app it returns is ticked once per frame.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates channel for platform → core communication
    /// 2. Spawns core thread running at configured TPS
    /// 3. Runs platform event loop (blocks here)
    /// 4. On window close: `WindowClosed` → core thread disposes the feed
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the winit event loop fails. The core
    /// thread is still joined before returning.
    pub fn run<A, F>(self, make_app: F) -> Result<(), PlatformError>
    where
        A: PointerApp,
        F: FnOnce(&mut PointerRegistry) -> A + Send + 'static,
    {
        info!("Starting pointer runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = CoreSystemsOrchestrator::new(self.tps).spawn_core_thread(rx, make_app);
        info!("Core thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, self.window);
        let result = platform.run();

        if let Err(e) = &result {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for core thread to terminate ---------------
        // The platform (and its sender) is gone, so the core thread sees a
        // disconnect even if WindowClosed was never sent.
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
