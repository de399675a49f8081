//=========================================================================
// Context Menu Items
//=========================================================================
//
// Lookup from a string type tag to a context-menu component.
//
// Architecture:
//   {"type": "button", ...props}  →  MenuItemDescription
//                                          ↓
//                 ContextMenuItems::resolve() → factory(props)
//                                          ↓
//                         Box<dyn ContextMenuItem> → render()
//
// Callers describe menu entries as data; the registry turns descriptions
// into components. The pointer registry does not depend on this module.
//
//=========================================================================

//=== Module Declarations =================================================

mod button;
mod registry;

//=== Public API ==========================================================

pub use button::{Button, ButtonProps};
pub use registry::{ContextMenuItems, ItemFactory, MenuError, MenuItemDescription};

//=== ContextMenuItem Trait ===============================================

/// A component that can appear in a context menu.
pub trait ContextMenuItem: std::fmt::Debug {
    /// Type tag this component is registered under.
    fn tag(&self) -> &'static str;

    /// Produces the display model of the item.
    fn render(&self) -> RenderedItem;

    /// Called when the user picks the item. Returns `false` if the item is
    /// disabled and nothing happened.
    ///
    /// Default implementation accepts the activation.
    fn activate(&mut self) -> bool {
        true
    }
}

//=== RenderedItem ========================================================

/// Display model of one context-menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub tag: &'static str,
    pub label: String,
    pub enabled: bool,
    pub shortcut: Option<String>,
}
