#![forbid(unsafe_code)]

//! Menu bar dropdown activation.
//!
//! Each menu bar button owns one dropdown panel. The bar is either idle or
//! has exactly one active button whose panel is visible directly beneath it:
//!
//! - clicking a button opens its panel, clicking it again closes it;
//! - while a panel is open, hovering another button moves the open panel to
//!   that button;
//! - a mousedown outside the button and outside every menu container closes
//!   the open panel.

use crate::config::PageMenuConfig;
use crate::dom::Document;
use crate::event::PointerEvent;

/// State change caused by one menu bar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarTransition<N> {
    /// Idle to active.
    Opened(N),
    /// One button replaced another as the active button.
    Switched { from: N, to: N },
    /// Active to idle; carries the button that was deactivated.
    Closed(N),
    Unchanged,
}

#[derive(Debug, Clone)]
struct Binding<N> {
    button: N,
    menu_id: String,
    panel: Option<N>,
}

/// Keeps at most one menu bar dropdown open.
#[derive(Debug, Clone)]
pub struct MenuBarController<N> {
    active_class: String,
    container_class: String,
    bindings: Vec<Binding<N>>,
    /// Index into `bindings`.
    active: Option<usize>,
}

impl<N: Clone + PartialEq> MenuBarController<N> {
    #[must_use]
    pub fn new(active_class: impl Into<String>, container_class: impl Into<String>) -> Self {
        Self {
            active_class: active_class.into(),
            container_class: container_class.into(),
            bindings: Vec::new(),
            active: None,
        }
    }

    /// Controller with the configured button bindings resolved against `doc`.
    ///
    /// Bindings whose button is not on the page are skipped.
    pub fn from_config<D>(config: &PageMenuConfig, doc: &D) -> Self
    where
        D: Document<Node = N>,
    {
        let mut bar = Self::new(
            config.active_button_class.clone(),
            config.menu_container_class.clone(),
        );
        for binding in &config.buttons {
            match doc.element_by_id(&binding.button) {
                Some(button) => {
                    bar.bind(doc, &button, &binding.menu);
                }
                None => {
                    crate::warn!(button = %binding.button, "menu bar button not found");
                }
            }
        }
        bar
    }

    #[must_use]
    pub fn active_button(&self) -> Option<&N> {
        self.active.map(|idx| &self.bindings[idx].button)
    }

    /// Panel bound to `button`, if the button is known and its panel exists.
    #[must_use]
    pub fn panel_for(&self, button: &N) -> Option<&N> {
        self.bindings
            .iter()
            .find(|b| b.button == *button)
            .and_then(|b| b.panel.as_ref())
    }

    /// Menu id `button` is bound to.
    #[must_use]
    pub fn menu_id_for(&self, button: &N) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.button == *button)
            .map(|b| b.menu_id.as_str())
    }

    /// Bind `button` to the panel with id `menu_id` unless already bound.
    ///
    /// A binding whose panel was missing is resolved again.
    fn bind<D>(&mut self, doc: &D, button: &N, menu_id: &str) -> usize
    where
        D: Document<Node = N>,
    {
        if let Some(idx) = self.bindings.iter().position(|b| b.button == *button) {
            let binding = &mut self.bindings[idx];
            if binding.panel.is_none() {
                binding.panel = doc.element_by_id(menu_id);
                binding.menu_id = menu_id.to_string();
            }
            return idx;
        }
        self.bindings.push(Binding {
            button: button.clone(),
            menu_id: menu_id.to_string(),
            panel: doc.element_by_id(menu_id),
        });
        self.bindings.len() - 1
    }

    /// Click on a menu bar button.
    ///
    /// Deactivates the active button first; activates `button` unless it was
    /// the active one. A button whose panel cannot be found is ignored.
    pub fn on_button_activate<D>(
        &mut self,
        doc: &mut D,
        button: &N,
        menu_id: &str,
    ) -> BarTransition<N>
    where
        D: Document<Node = N>,
    {
        let idx = self.bind(&*doc, button, menu_id);
        doc.blur(button);
        if self.bindings[idx].panel.is_none() {
            crate::warn!(menu = %self.bindings[idx].menu_id, "dropdown panel not found");
            return BarTransition::Unchanged;
        }

        let previous = self.active.take();
        if let Some(prev) = previous {
            self.reset(doc, prev);
        }
        if previous == Some(idx) {
            crate::debug!(menu = %self.bindings[idx].menu_id, "dropdown closed");
            return BarTransition::Closed(button.clone());
        }

        self.activate(doc, idx);
        match previous {
            Some(prev) => BarTransition::Switched {
                from: self.bindings[prev].button.clone(),
                to: button.clone(),
            },
            None => BarTransition::Opened(button.clone()),
        }
    }

    /// Pointer entered a menu bar button.
    ///
    /// Only follows the mouse once some other dropdown is open; the first
    /// dropdown always needs a click.
    pub fn on_button_hover<D>(&mut self, doc: &mut D, button: &N, menu_id: &str) -> BarTransition<N>
    where
        D: Document<Node = N>,
    {
        let other_open = self
            .active_button()
            .is_some_and(|active| active != button);
        if !other_open {
            return BarTransition::Unchanged;
        }
        self.on_button_activate(doc, button, menu_id)
    }

    /// Mousedown anywhere on the page.
    pub fn on_global_mouse_down<D>(
        &mut self,
        doc: &mut D,
        event: &PointerEvent<N>,
    ) -> BarTransition<N>
    where
        D: Document<Node = N>,
    {
        let Some(idx) = self.active else {
            return BarTransition::Unchanged;
        };
        let button = self.bindings[idx].button.clone();
        // The click handler owns toggling of the active button itself.
        if event.target == button {
            return BarTransition::Unchanged;
        }
        let inside_menu = doc
            .ancestors_inclusive(&event.target)
            .any(|node| doc.has_class(&node, &self.container_class));
        if inside_menu {
            return BarTransition::Unchanged;
        }

        self.active = None;
        self.reset(doc, idx);
        crate::debug!(menu = %self.bindings[idx].menu_id, "dropdown closed by outside mousedown");
        BarTransition::Closed(button)
    }

    fn activate<D>(&mut self, doc: &mut D, idx: usize)
    where
        D: Document<Node = N>,
    {
        let binding = &self.bindings[idx];
        let Some(panel) = &binding.panel else {
            return;
        };
        doc.add_class(&binding.button, &self.active_class);
        let at = doc
            .cumulative_offset(&binding.button)
            .below(doc.height(&binding.button));
        doc.set_position(panel, at);
        doc.set_visible(panel, true);
        crate::debug!(menu = %binding.menu_id, x = at.x, y = at.y, "dropdown opened");
        self.active = Some(idx);
    }

    fn reset<D>(&self, doc: &mut D, idx: usize)
    where
        D: Document<Node = N>,
    {
        let binding = &self.bindings[idx];
        doc.remove_class(&binding.button, &self.active_class);
        if let Some(panel) = &binding.panel {
            doc.set_visible(panel, false);
        }
    }
}
