#![forbid(unsafe_code)]

//! Entity classes and the context menu each one opens.
//!
//! Elements rendering a domain object carry the object's type as a CSS class
//! (`<td class="resource">Machine 1</td>`). The registry maps those classes to
//! the id of the pre-rendered overlay listing the actions for that type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Domain-object type named by an entity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Buffer,
    Resource,
    Operation,
    Location,
    Item,
    Demand,
    Forecast,
    Customer,
    /// Operator span of a numeric filter field.
    NumFilterOper,
    /// Operator span of a date filter field.
    DateFilterOper,
    /// Operator span of a text filter field.
    TextFilterOper,
}

impl EntityKind {
    pub const ALL: [Self; 11] = [
        Self::Buffer,
        Self::Resource,
        Self::Operation,
        Self::Location,
        Self::Item,
        Self::Demand,
        Self::Forecast,
        Self::Customer,
        Self::NumFilterOper,
        Self::DateFilterOper,
        Self::TextFilterOper,
    ];

    /// The CSS class naming this kind.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Buffer => "buffer",
            Self::Resource => "resource",
            Self::Operation => "operation",
            Self::Location => "location",
            Self::Item => "item",
            Self::Demand => "demand",
            Self::Forecast => "forecast",
            Self::Customer => "customer",
            Self::NumFilterOper => "numfilteroper",
            Self::DateFilterOper => "datefilteroper",
            Self::TextFilterOper => "textfilteroper",
        }
    }

    /// Exact, case-sensitive class lookup.
    #[must_use]
    pub fn from_class(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.css_class() == class)
    }

    /// Overlay shown when no override is configured.
    #[must_use]
    pub const fn default_menu_id(self) -> &'static str {
        match self {
            Self::Buffer => "buffercontext",
            Self::Resource => "resourcecontext",
            Self::Operation => "operationcontext",
            Self::Location => "locationcontext",
            Self::Item => "itemcontext",
            Self::Demand => "demandcontext",
            Self::Forecast => "forecastcontext",
            Self::Customer => "customercontext",
            // Numeric fields share the comparison operators of dates.
            Self::NumFilterOper | Self::DateFilterOper => "datefilter",
            Self::TextFilterOper => "textfilter",
        }
    }

    /// Kinds whose menu picks a filter operator rather than navigating.
    #[must_use]
    pub const fn is_filter_operator(self) -> bool {
        matches!(
            self,
            Self::NumFilterOper | Self::DateFilterOper | Self::TextFilterOper
        )
    }
}

/// Immutable class-to-menu table, fixed at page initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuClassRegistry {
    menus: BTreeMap<EntityKind, String>,
}

impl Default for MenuClassRegistry {
    fn default() -> Self {
        Self::with_overrides(&BTreeMap::new())
    }
}

impl MenuClassRegistry {
    /// Default table with some menu ids replaced.
    #[must_use]
    pub fn with_overrides(overrides: &BTreeMap<EntityKind, String>) -> Self {
        let menus = EntityKind::ALL
            .into_iter()
            .map(|kind| {
                let id = overrides
                    .get(&kind)
                    .cloned()
                    .unwrap_or_else(|| kind.default_menu_id().to_string());
                (kind, id)
            })
            .collect();
        Self { menus }
    }

    /// First token of a `class` attribute that names an entity kind.
    ///
    /// Tokens are compared whole, in attribute order.
    #[must_use]
    pub fn classify(&self, class_attr: &str) -> Option<EntityKind> {
        class_attr.split_whitespace().find_map(EntityKind::from_class)
    }

    #[must_use]
    pub fn menu_id(&self, kind: EntityKind) -> &str {
        self.menus
            .get(&kind)
            .map_or_else(|| kind.default_menu_id(), String::as_str)
    }
}
