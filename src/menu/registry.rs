//=========================================================================
// Context Menu Registry
//=========================================================================
//
// Tag → factory table resolving item descriptions into components.
//
// Pattern: register (startup) → resolve (per menu open) → render
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::{Button, ContextMenuItem};

//=== Public Types ========================================================

/// Builds a component from its props.
pub type ItemFactory =
    Box<dyn Fn(Map<String, Value>) -> Result<Box<dyn ContextMenuItem>, serde_json::Error> + Send + Sync>;

/// Data description of a menu entry: `{"type": <tag>, ...props}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemDescription {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(flatten)]
    pub props: Map<String, Value>,
}

impl MenuItemDescription {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            props: Map::new(),
        }
    }

    /// Adds or replaces one prop.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

/// Errors raised while resolving descriptions.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The JSON value is not a `{"type": ..}` description.
    #[error("invalid context menu description: {0}")]
    InvalidDescription(#[source] serde_json::Error),

    /// No component is registered under the tag.
    #[error("unknown context menu item type '{0}'")]
    UnknownType(String),

    /// The description sets a prop the menu supplies itself.
    #[error("context menu item '{kind}' may not set reserved prop '{prop}'")]
    ReservedProp { kind: String, prop: &'static str },

    /// The props do not match what the component accepts.
    #[error("invalid props for context menu item '{kind}': {source}")]
    InvalidProps {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

//=== ContextMenuItems ====================================================

/// Registry of context-menu components by type tag.
///
/// # Examples
///
/// ```
/// use aetheric_pointers::menu::{ContextMenuItems, MenuItemDescription};
///
/// let items = ContextMenuItems::with_builtins();
/// let description = MenuItemDescription::new("button").with_prop("label", "Copy");
///
/// let item = items.resolve(&description).unwrap();
/// assert_eq!(item.render().label, "Copy");
/// ```
pub struct ContextMenuItems {
    factories: BTreeMap<String, ItemFactory>,
}

impl ContextMenuItems {
    /// Props injected by the menu that descriptions may not carry.
    pub const RESERVED_PROPS: &'static [&'static str] = &["parent"];

    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Creates a registry with the built-in items (`button`).
    pub fn with_builtins() -> Self {
        let mut items = Self::new();
        items.register_typed(Button::TAG, Button::new);
        items
    }

    //--- Registration -----------------------------------------------------

    /// Registers `factory` under `tag`, replacing any previous entry.
    pub fn register(&mut self, tag: impl Into<String>, factory: ItemFactory) {
        let tag = tag.into();
        if self.factories.insert(tag.clone(), factory).is_some() {
            warn!(target: "menu", "Replacing context menu item '{}'", tag);
        } else {
            debug!(target: "menu", "Registered context menu item '{}'", tag);
        }
    }

    /// Registers a component built from typed props.
    pub fn register_typed<P, C>(&mut self, tag: impl Into<String>, build: fn(P) -> C)
    where
        P: DeserializeOwned + 'static,
        C: ContextMenuItem + 'static,
    {
        self.register(
            tag,
            Box::new(
                move |props: Map<String, Value>| -> Result<Box<dyn ContextMenuItem>, serde_json::Error> {
                    let props: P = serde_json::from_value(Value::Object(props))?;
                    Ok(Box::new(build(props)))
                },
            ),
        );
    }

    //--- Queries ----------------------------------------------------------

    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    //--- Resolution -------------------------------------------------------

    /// Builds the component a description names.
    pub fn resolve(&self, description: &MenuItemDescription) -> Result<Box<dyn ContextMenuItem>, MenuError> {
        let factory = self
            .factories
            .get(&description.kind)
            .ok_or_else(|| MenuError::UnknownType(description.kind.clone()))?;

        if let Some(prop) = Self::RESERVED_PROPS
            .iter()
            .copied()
            .find(|prop| description.props.contains_key(*prop))
        {
            return Err(MenuError::ReservedProp {
                kind: description.kind.clone(),
                prop,
            });
        }

        factory(description.props.clone()).map_err(|source| MenuError::InvalidProps {
            kind: description.kind.clone(),
            source,
        })
    }

    /// Parses a JSON description and builds its component.
    pub fn resolve_value(&self, value: Value) -> Result<Box<dyn ContextMenuItem>, MenuError> {
        let description: MenuItemDescription =
            serde_json::from_value(value).map_err(MenuError::InvalidDescription)?;
        self.resolve(&description)
    }

    /// Builds every description, stopping at the first error.
    pub fn resolve_all(
        &self,
        descriptions: &[MenuItemDescription],
    ) -> Result<Vec<Box<dyn ContextMenuItem>>, MenuError> {
        descriptions.iter().map(|d| self.resolve(d)).collect()
    }
}

impl Default for ContextMenuItems {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for ContextMenuItems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextMenuItems")
            .field("tags", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::RenderedItem;
    use serde_json::json;

    #[derive(Debug)]
    struct Separator;

    impl ContextMenuItem for Separator {
        fn tag(&self) -> &'static str {
            "separator"
        }

        fn render(&self) -> RenderedItem {
            RenderedItem {
                tag: "separator",
                label: String::new(),
                enabled: false,
                shortcut: None,
            }
        }
    }

    #[test]
    fn builtins_contain_button() {
        let items = ContextMenuItems::with_builtins();
        assert!(items.contains("button"));
        assert_eq!(items.tags().collect::<Vec<_>>(), vec!["button"]);
    }

    #[test]
    fn resolve_builds_button_from_props() {
        let items = ContextMenuItems::with_builtins();
        let description = MenuItemDescription::new("button")
            .with_prop("label", "Delete")
            .with_prop("disabled", true);

        let item = items.resolve(&description).unwrap();

        assert_eq!(item.tag(), "button");
        let rendered = item.render();
        assert_eq!(rendered.label, "Delete");
        assert!(!rendered.enabled);
    }

    #[test]
    fn resolve_value_reads_type_tag_from_json() {
        let items = ContextMenuItems::with_builtins();
        let item = items
            .resolve_value(json!({ "type": "button", "label": "Rename", "shortcut": "F2" }))
            .unwrap();

        assert_eq!(item.render().shortcut.as_deref(), Some("F2"));
    }

    #[test]
    fn resolve_value_without_type_is_invalid_description() {
        let items = ContextMenuItems::with_builtins();
        let err = items.resolve_value(json!({ "label": "Orphan" })).unwrap_err();
        assert!(matches!(err, MenuError::InvalidDescription(_)));
    }

    #[test]
    fn unknown_type_is_reported() {
        let items = ContextMenuItems::with_builtins();
        let err = items.resolve(&MenuItemDescription::new("slider")).unwrap_err();

        assert!(matches!(err, MenuError::UnknownType(ref tag) if tag == "slider"));
        assert_eq!(err.to_string(), "unknown context menu item type 'slider'");
    }

    #[test]
    fn parent_prop_is_reserved() {
        let items = ContextMenuItems::with_builtins();
        let description = MenuItemDescription::new("button")
            .with_prop("label", "Copy")
            .with_prop("parent", "menu-1");

        let err = items.resolve(&description).unwrap_err();
        assert!(matches!(err, MenuError::ReservedProp { prop: "parent", .. }));
    }

    #[test]
    fn bad_props_are_reported_with_kind() {
        let items = ContextMenuItems::with_builtins();
        let err = items
            .resolve(&MenuItemDescription::new("button").with_prop("colour", "red"))
            .unwrap_err();

        match err {
            MenuError::InvalidProps { kind, .. } => assert_eq!(kind, "button"),
            other => panic!("Expected InvalidProps, got {:?}", other),
        }
    }

    #[test]
    fn custom_items_can_be_registered() {
        let mut items = ContextMenuItems::new();
        items.register(
            "separator",
            Box::new(|_: Map<String, Value>| -> Result<Box<dyn ContextMenuItem>, serde_json::Error> {
                Ok(Box::new(Separator))
            }),
        );

        let item = items.resolve(&MenuItemDescription::new("separator")).unwrap();
        assert_eq!(item.tag(), "separator");
        assert!(!items.contains("button"));
    }

    #[test]
    fn resolve_all_stops_at_first_error() {
        let items = ContextMenuItems::with_builtins();
        let descriptions = vec![
            MenuItemDescription::new("button").with_prop("label", "Ok"),
            MenuItemDescription::new("missing"),
        ];

        assert!(items.resolve_all(&descriptions).is_err());
        assert_eq!(items.resolve_all(&descriptions[..1]).unwrap().len(), 1);
    }

    #[test]
    fn description_round_trips_through_json() {
        let description = MenuItemDescription::new("button").with_prop("label", "Open");
        let value = serde_json::to_value(&description).unwrap();

        assert_eq!(value, json!({ "type": "button", "label": "Open" }));
    }
}
