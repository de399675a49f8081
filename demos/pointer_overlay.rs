//=========================================================================
// Pointer Overlay Demo
//
// Opens a window and logs the live pointer set: count and centroid while
// pointers are down, and the context-menu entry a long press would show.
//
// Run with:
//   RUST_LOG=info,pointers=debug cargo run --example pointer_overlay
//
//=========================================================================

use aetheric_pointers::menu::ContextMenuItems;
use aetheric_pointers::prelude::*;
use log::info;
use serde_json::json;

//=== OverlayApp ==========================================================

struct OverlayApp {
    menu: ContextMenuItems,
    last_count: usize,
    watched: Option<Subscription>,
}

impl OverlayApp {
    fn new(_registry: &mut PointerRegistry) -> Self {
        Self {
            menu: ContextMenuItems::with_builtins(),
            last_count: 0,
            watched: None,
        }
    }
}

impl PointerApp for OverlayApp {
    fn tick(&mut self, registry: &mut PointerRegistry) {
        let count = registry.count();

        if count != self.last_count {
            info!("{} pointer(s) down", count);

            // follow the mouse whenever it (re)appears
            let watching = self.watched.as_ref().is_some_and(Subscription::is_active);
            if !watching && registry.get(PointerId::MOUSE).is_some() {
                self.watched = Some(registry.subscribe(PointerId::MOUSE, |pointer| {
                    log::trace!("mouse moved by {:?}", pointer.movement());
                }));
            }

            if count == 3 {
                let entry = self
                    .menu
                    .resolve_value(json!({ "type": "button", "label": "Reset view", "shortcut": "R" }));
                match entry {
                    Ok(item) => info!("three-finger menu: {:?}", item.render()),
                    Err(e) => log::warn!("menu entry rejected: {}", e),
                }
            }

            self.last_count = count;
        }

        if count > 0 {
            let centroid = registry.centroid();
            log::debug!("centroid ({:.1}, {:.1})", centroid.x, centroid.y);
        }
    }

    fn on_exit(&mut self, registry: &PointerRegistry) {
        info!("Exiting with {} tracked pointer(s)", registry.tracked_len());
        if let Some(subscription) = self.watched.take() {
            subscription.unsubscribe();
        }
    }
}

//=== Entry Point =========================================================

fn main() {
    env_logger::init();

    let result = RuntimeBuilder::new()
        .with_tps(60.0)
        .with_window_title("Pointer Overlay")
        .with_window_size(1024, 768)
        .build()
        .run(OverlayApp::new);

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
