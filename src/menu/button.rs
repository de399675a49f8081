//=========================================================================
// Button Item
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use super::{ContextMenuItem, RenderedItem};

//=== ButtonProps =========================================================

/// Props accepted by the `button` item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ButtonProps {
    pub label: String,

    #[serde(default)]
    pub disabled: bool,

    #[serde(default)]
    pub shortcut: Option<String>,
}

//=== Button ==============================================================

/// Plain clickable context-menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    props: ButtonProps,
    activations: u32,
}

impl Button {
    pub const TAG: &'static str = "button";

    pub fn new(props: ButtonProps) -> Self {
        Self {
            props,
            activations: 0,
        }
    }

    /// Number of accepted activations so far.
    pub fn activations(&self) -> u32 {
        self.activations
    }
}

impl ContextMenuItem for Button {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn render(&self) -> RenderedItem {
        RenderedItem {
            tag: Self::TAG,
            label: self.props.label.clone(),
            enabled: !self.props.disabled,
            shortcut: self.props.shortcut.clone(),
        }
    }

    fn activate(&mut self) -> bool {
        if self.props.disabled {
            debug!(target: "menu", "Ignoring activation of disabled button '{}'", self.props.label);
            return false;
        }
        self.activations += 1;
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn props(label: &str, disabled: bool) -> ButtonProps {
        ButtonProps {
            label: label.to_string(),
            disabled,
            shortcut: None,
        }
    }

    #[test]
    fn render_reflects_props() {
        let button = Button::new(ButtonProps {
            shortcut: Some("Ctrl+C".to_string()),
            ..props("Copy", false)
        });

        let rendered = button.render();
        assert_eq!(rendered.tag, "button");
        assert_eq!(rendered.label, "Copy");
        assert!(rendered.enabled);
        assert_eq!(rendered.shortcut.as_deref(), Some("Ctrl+C"));
    }

    #[test]
    fn disabled_button_rejects_activation() {
        let mut button = Button::new(props("Paste", true));

        assert!(!button.activate());
        assert_eq!(button.activations(), 0);
        assert!(!button.render().enabled);
    }

    #[test]
    fn enabled_button_counts_activations() {
        let mut button = Button::new(props("Cut", false));
        button.activate();
        button.activate();
        assert_eq!(button.activations(), 2);
    }
}
