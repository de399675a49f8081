//=========================================================================
// Core Systems Orchestrator
//
// Runs the pointer registry on the logic (non-platform) thread.
//
// Responsibilities:
// - Own the `PointerRegistry` for its whole lifetime
// - Receive host pointer events via channel and dispatch them in order
// - Advance the frame boundary once per tick (deferred removals)
// - Drive the application hook at a fixed tick rate (TPS)
//
// Notes:
// The registry is single-threaded (reactive channels use `Rc`), so it is
// created inside the logic thread together with the application state.
// Communication with the platform occurs only through message passing.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================
use crossbeam_channel::Receiver;
use log::info;

//=== Public Modules ======================================================
pub mod frame_queue;
pub mod platform_bridge;
pub mod pointer;
pub mod reactive;

//=== Internal Modules ====================================================
use platform_bridge::{PlatformEvent, PointerFeed, TickControl};
use pointer::PointerRegistry;

//=== PointerApp ==========================================================

/// Application logic driven once per core tick.
///
/// Runs on the core thread with exclusive access to the registry. Closures
/// taking `&mut PointerRegistry` implement it directly.
///
/// ```
/// use aetheric_pointers::core::PointerApp;
/// use aetheric_pointers::core::pointer::PointerRegistry;
///
/// struct PinchWatcher {
///     pinching: bool,
/// }
///
/// impl PointerApp for PinchWatcher {
///     fn tick(&mut self, registry: &mut PointerRegistry) {
///         self.pinching = registry.count() >= 2;
///     }
/// }
/// ```
pub trait PointerApp {
    /// Called every tick after the tick's input has been dispatched.
    fn tick(&mut self, registry: &mut PointerRegistry);

    /// Called once before the registry is cleared at shutdown.
    ///
    /// Default implementation does nothing.
    fn on_exit(&mut self, _registry: &PointerRegistry) {}
}

impl<F> PointerApp for F
where
    F: FnMut(&mut PointerRegistry),
{
    fn tick(&mut self, registry: &mut PointerRegistry) {
        self(registry)
    }
}

//=== CoreSystemsOrchestrator =============================================

/// Owns the tick pacing of the logic thread.
pub(crate) struct CoreSystemsOrchestrator {
    tps: f64,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------
    pub fn new(tps: f64) -> Self {
        Self { tps }
    }

    //--- tick() -----------------------------------------------------------
    //
    // One core frame:
    //  1. Collect host events (stop on close / disconnect)
    //  2. Apply removals deferred by the previous frame
    //  3. Dispatch this frame's events in arrival order
    //  4. Run application logic
    //
    pub fn tick<A: PointerApp>(
        feed: &mut PointerFeed,
        registry: &mut PointerRegistry,
        app: &mut A,
    ) -> TickControl {
        if let TickControl::Exit = feed.collect_frame() {
            return TickControl::Exit;
        }

        registry.advance_frame();
        feed.dispatch_into(registry);
        app.tick(registry);

        TickControl::Continue
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread. `make_app` runs first, on that thread, with
    // the fresh registry (subscribe, mark local pointers, ...), and returns
    // the application driven every tick.
    //
    pub fn spawn_core_thread<A, F>(
        self,
        receiver: Receiver<PlatformEvent>,
        make_app: F,
    ) -> thread::JoinHandle<()>
    where
        A: PointerApp,
        F: FnOnce(&mut PointerRegistry) -> A + Send + 'static,
    {
        let frame_duration = Duration::from_secs_f64(1.0 / self.tps);

        thread::spawn(move || {
            let mut registry = PointerRegistry::new();
            let mut feed = PointerFeed::attach(receiver);
            let mut app = make_app(&mut registry);

            loop {
                let frame_start = Instant::now();

                if let TickControl::Exit = Self::tick(&mut feed, &mut registry, &mut app) {
                    info!("Core thread exiting.");
                    break;
                }

                //--- Maintain deterministic pacing ------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            app.on_exit(&registry);
            feed.dispose(&mut registry);
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
