#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Everything the page markup decides (menu ids, marker classes, which button
//! opens which dropdown) is collected in [`PageMenuConfig`]. The host can pass
//! it as JSON; every field is optional and falls back to the stock page
//! layout.

use core::fmt;
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::registry::{EntityKind, MenuClassRegistry};

pub const DEFAULT_OPERATOR_MENU_CLASS: &str = "OperatorMenu";
pub const DEFAULT_MENU_CONTAINER_CLASS: &str = "menu";
pub const DEFAULT_ACTIVE_BUTTON_CLASS: &str = "menuButtonActive";

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON did not match the schema.
    Parse(serde_json::Error),
    /// A marker class is empty or contains whitespace.
    InvalidClass { field: &'static str, value: String },
    /// A button binding has an empty button or menu id.
    EmptyId { index: usize },
    /// Two bindings name the same button.
    DuplicateButton(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid page menu config: {err}"),
            Self::InvalidClass { field, value } => {
                write!(f, "{field} must be a single class name, got {value:?}")
            }
            Self::EmptyId { index } => write!(f, "button binding #{index} has an empty id"),
            Self::DuplicateButton(id) => write!(f, "button {id:?} is bound twice"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Association of a menu bar button with its dropdown panel, by element id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonBinding {
    pub button: String,
    pub menu: String,
}

impl ButtonBinding {
    #[must_use]
    pub fn new(button: impl Into<String>, menu: impl Into<String>) -> Self {
        Self {
            button: button.into(),
            menu: menu.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageMenuConfig {
    /// Menu id overrides, keyed by entity class.
    pub menus: BTreeMap<EntityKind, String>,
    /// Marks a context menu whose items pick a filter operator.
    pub operator_menu_class: String,
    /// Marks containers belonging to the dropdown system.
    pub menu_container_class: String,
    /// Applied to the pressed menu bar button.
    pub active_button_class: String,
    /// Menu bar buttons known up front.
    pub buttons: Vec<ButtonBinding>,
}

impl Default for PageMenuConfig {
    fn default() -> Self {
        Self {
            menus: BTreeMap::new(),
            operator_menu_class: DEFAULT_OPERATOR_MENU_CLASS.to_string(),
            menu_container_class: DEFAULT_MENU_CONTAINER_CLASS.to_string(),
            active_button_class: DEFAULT_ACTIVE_BUTTON_CLASS.to_string(),
            buttons: Vec::new(),
        }
    }
}

impl PageMenuConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("operator_menu_class", &self.operator_menu_class),
            ("menu_container_class", &self.menu_container_class),
            ("active_button_class", &self.active_button_class),
        ] {
            if !is_single_class(value) {
                return Err(ConfigError::InvalidClass {
                    field,
                    value: value.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for (index, binding) in self.buttons.iter().enumerate() {
            if binding.button.is_empty() || binding.menu.is_empty() {
                return Err(ConfigError::EmptyId { index });
            }
            if !seen.insert(binding.button.as_str()) {
                return Err(ConfigError::DuplicateButton(binding.button.clone()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn registry(&self) -> MenuClassRegistry {
        MenuClassRegistry::with_overrides(&self.menus)
    }
}

fn is_single_class(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}
