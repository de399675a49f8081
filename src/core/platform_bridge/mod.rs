//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the host runtime (winit or a test harness) with the pointer
// registry.
//
// This module defines the contract between host implementations and the
// core thread, so the registry can be driven without a window.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `pointer_feed`: Core-side attach / collect / dispatch / dispose
//
//=========================================================================

//=== Module Declarations =================================================

mod interface;
mod pointer_feed;

//=== Public API ==========================================================

pub use interface::{PlatformError, PlatformEvent};
pub use pointer_feed::{PointerFeed, TickControl};
