//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_pointers::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Runtime, RuntimeBuilder};
pub use crate::core::PointerApp;

// Pointer tracking
pub use crate::core::pointer::{
    PointerEvent, PointerId, PointerKind, PointerRegistry, RawPointerSample, TrackedPointer,
};
pub use crate::core::reactive::Subscription;

// Context menu
pub use crate::menu::{ContextMenuItem, ContextMenuItems, MenuItemDescription};
