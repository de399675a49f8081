//=========================================================================
// Aetheric Pointers: Library Root
//
// Multi-pointer tracking for touch, pen and mouse input.
//
// Responsibilities:
// - Expose the pointer registry and its reactive per-pointer channels
// - Expose the context-menu item registry
// - Keep the winit host (`platform`) hidden behind the `Runtime` facade
//
// Typical usage:
// ```no_run
// use aetheric_pointers::prelude::*;
//
// fn main() {
//     RuntimeBuilder::new()
//         .build()
//         .run(|_registry| |registry: &mut PointerRegistry| {
//             let _ = registry.centroid();
//         })
//         .unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the registry, the frame queue and the reactive channels.
// It is usable without a window, e.g. when events come from another host.
//
pub mod core;
pub mod menu;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` wraps the winit event loop and is not part of the public API.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Runtime, RuntimeBuilder};
