//=========================================================================
// Pointer Tracking
//=========================================================================
//
// Multi-pointer state for gesture handling (pinch, drag, rotate).
//
// Architecture:
//   RawPointerSample → PointerRegistry → TrackedPointer
//                            │
//                            ├─ get(id) / subscribe(id)
//                            └─ values() / count() / centroid()
//
//=========================================================================

//=== Module Declarations =================================================

mod registry;
mod sample;
mod tracked;

//=== Public API ==========================================================

pub use registry::PointerRegistry;
pub use sample::{PointerEvent, PointerId, PointerKind, RawPointerSample};
pub use tracked::TrackedPointer;
