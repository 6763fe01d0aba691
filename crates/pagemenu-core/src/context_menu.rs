#![forbid(unsafe_code)]

//! Context menu dispatch.
//!
//! One handler sees every click on the page. In order, it:
//!
//! 1. hides the open context menu, committing an operator pick when the open
//!    menu is an operator menu and the click landed on one of its items;
//! 2. leaves non-primary clicks to the browser;
//! 3. walks up from the click target to the first element carrying an
//!    entity class;
//! 4. opens that entity's menu at the pointer, with links pointing at the
//!    clicked entity.
//!
//! At most one context menu is displayed at any time.

use crate::config::PageMenuConfig;
use crate::dom::{Display, Document, is_text_entry};
use crate::escape::{encode_entity_name, expand_link_template};
use crate::event::{ClickOutcome, PassReason, PointerEvent};
use crate::filter::{FilterFieldName, FilterLookup, filter_field_id};
use crate::registry::{EntityKind, MenuClassRegistry};

/// Operator picked from an operator menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorSelection {
    /// Operator id of the picked item, e.g. `lt`.
    pub operator: String,
    /// Markup copied into the operator span.
    pub label: String,
    /// Id of the rewritten filter input, when one was found.
    pub field_id: Option<String>,
    /// New `name` of the filter input.
    pub field_name: Option<String>,
}

impl OperatorSelection {
    /// The operator as a backend lookup, if it is one the backend knows.
    #[must_use]
    pub fn lookup(&self) -> Option<FilterLookup> {
        FilterLookup::parse(&self.operator)
    }
}

/// Routes document clicks to entity context menus.
#[derive(Debug, Clone)]
pub struct ContextMenuDispatcher<N> {
    registry: MenuClassRegistry,
    operator_menu_class: String,
    /// Element the current menu was opened for.
    attached: Option<N>,
    /// Displayed overlay.
    active_menu: Option<N>,
    last_selection: Option<OperatorSelection>,
}

impl<N: Clone + PartialEq> ContextMenuDispatcher<N> {
    #[must_use]
    pub fn new(registry: MenuClassRegistry, operator_menu_class: impl Into<String>) -> Self {
        Self {
            registry,
            operator_menu_class: operator_menu_class.into(),
            attached: None,
            active_menu: None,
            last_selection: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &PageMenuConfig) -> Self {
        Self::new(config.registry(), config.operator_menu_class.clone())
    }

    #[must_use]
    pub const fn active_menu(&self) -> Option<&N> {
        self.active_menu.as_ref()
    }

    #[must_use]
    pub const fn attached(&self) -> Option<&N> {
        self.attached.as_ref()
    }

    /// Operator committed by the most recent click that closed an operator
    /// menu on one of its items.
    #[must_use]
    pub const fn last_selection(&self) -> Option<&OperatorSelection> {
        self.last_selection.as_ref()
    }

    /// Route one document click.
    ///
    /// [`ClickOutcome::Handled`] means a menu was opened and the host must
    /// suppress the browser's default action.
    pub fn on_document_click<D>(&mut self, doc: &mut D, event: &PointerEvent<N>) -> ClickOutcome
    where
        D: Document<Node = N>,
    {
        self.last_selection = None;
        if let Some(menu) = self.active_menu.take() {
            doc.set_display(&menu, Display::None);
            crate::debug!("context menu hidden");
            if doc.has_class(&menu, &self.operator_menu_class) {
                self.commit_operator(doc, &menu, &event.target);
            }
        }

        if !event.button.is_primary() {
            return ClickOutcome::PassThrough(PassReason::NonPrimaryButton);
        }

        let Some((element, kind)) = self.classify_target(&*doc, &event.target) else {
            self.attached = None;
            if is_text_entry(&*doc, &event.target) {
                return ClickOutcome::PassThrough(PassReason::TextEntry);
            }
            return ClickOutcome::PassThrough(PassReason::Unclassified);
        };
        self.attached = Some(element.clone());

        let menu_id = self.registry.menu_id(kind);
        let Some(menu) = doc.element_by_id(menu_id) else {
            crate::warn!(menu = %menu_id, "context menu element not found");
            return ClickOutcome::PassThrough(PassReason::MenuMissing);
        };

        let name = encode_entity_name(&doc.inner_html(&element));
        for link in doc.links(&menu) {
            let Some(template) = doc.element_id(&link) else {
                continue;
            };
            if let Some(href) = expand_link_template(&template, &name) {
                doc.set_href(&link, &href);
            }
        }

        let at = event.client + doc.scroll_offset();
        doc.set_position(&menu, at);
        doc.set_display(&menu, Display::Block);
        crate::debug!(menu = %menu_id, entity = %name, x = at.x, y = at.y, "context menu shown");
        self.active_menu = Some(menu);
        ClickOutcome::Handled
    }

    /// First element on the ancestor chain of `target` with an entity class.
    fn classify_target<D>(&self, doc: &D, target: &N) -> Option<(N, EntityKind)>
    where
        D: Document<Node = N>,
    {
        doc.ancestors_inclusive(target).find_map(|node| {
            let kind = self.registry.classify(&doc.class_attr(&node)?)?;
            crate::trace!(kind = ?kind, "entity class matched");
            Some((node, kind))
        })
    }

    /// Apply an operator pick if `target` is an item of the closing `menu`.
    ///
    /// A click anywhere else dismisses the menu without changing the filter.
    fn commit_operator<D>(&mut self, doc: &mut D, menu: &N, target: &N)
    where
        D: Document<Node = N>,
    {
        let Some(span) = self.attached.clone() else {
            return;
        };
        if doc.parent(target).as_ref() != Some(menu) {
            return;
        }
        let Some(operator) = doc.element_id(target).filter(|id| !id.is_empty()) else {
            return;
        };

        let label = doc.inner_html(target);
        doc.set_inner_html(&span, &label);

        let field_id = doc.element_id(&span).as_deref().and_then(filter_field_id);
        let field = field_id.as_deref().and_then(|id| doc.element_by_id(id));
        let field_name = field.and_then(|field| {
            let current = doc.name_attr(&field)?;
            let renamed = FilterFieldName::parse(&current).with_operator(&operator);
            doc.set_name_attr(&field, &renamed);
            Some(renamed)
        });

        let selection = OperatorSelection {
            operator,
            label,
            field_id,
            field_name,
        };
        if selection.lookup().is_none() {
            crate::warn!(operator = %selection.operator, "operator is not a known filter lookup");
        }
        crate::debug!(operator = %selection.operator, "filter operator selected");
        self.last_selection = Some(selection);
    }
}
