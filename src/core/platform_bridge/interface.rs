//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events and errors).
//
// Defines the contract for communication between the host thread and the
// core thread that owns the pointer registry.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;
use winit::error::EventLoopError;

//=== Internal Dependencies ===============================================

use crate::core::pointer::PointerEvent;

//=== PlatformEvent =======================================================

/// Events sent from the host to the core thread.
///
/// These are the only messages that cross the thread boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Pointer events of one rendered frame, in arrival order.
    ///
    /// Empty batches are not sent.
    Pointers(Vec<PointerEvent>),

    /// Window close requested by user or OS.
    ///
    /// The core thread stops after receiving this.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: without an event loop there is no pointer input.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to create the event loop (OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),
}

//=========================================================================
// Unit Tests
//=========================================================================
