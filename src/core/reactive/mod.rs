//=========================================================================
// Reactive Primitives
//=========================================================================
//
// Minimal observable used to publish per-pointer state.
//
// Components:
// - `channel`: value holder with synchronous broadcast to listeners
// - `subscription`: unsubscribe handle (weak, never keeps a channel alive)
//
//=========================================================================

//=== Module Declarations =================================================

mod channel;
mod subscription;

//=== Public API ==========================================================

pub use channel::Channel;
pub use subscription::Subscription;
