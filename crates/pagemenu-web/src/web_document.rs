#![forbid(unsafe_code)]

//! [`Document`] over the browser DOM.
//!
//! DOM calls that can throw are best-effort: a failed style or attribute
//! write leaves the page as it was.

use pagemenu_core::{Display, Document, MouseButton, Point, PointerEvent};
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Element, Event, HtmlElement, MouseEvent, Window};

/// The live page.
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    /// Bind to the global `window.document`, if there is one.
    #[must_use]
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    #[must_use]
    pub const fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

fn style(node: &Element) -> Option<CssStyleDeclaration> {
    node.dyn_ref::<HtmlElement>().map(HtmlElement::style)
}

fn set_style(node: &Element, property: &str, value: &str) {
    if let Some(style) = style(node) {
        let _ = style.set_property(property, value);
    }
}

/// Element an event was dispatched to.
///
/// Text-node targets resolve to their parent element.
#[must_use]
pub fn event_target(event: &Event) -> Option<Element> {
    match event.target()?.dyn_into::<Element>() {
        Ok(element) => Some(element),
        Err(other) => other.dyn_into::<web_sys::Node>().ok()?.parent_element(),
    }
}

/// Convert a DOM mouse event for the controllers.
#[must_use]
pub fn pointer_event(event: &MouseEvent) -> Option<PointerEvent<Element>> {
    Some(PointerEvent::new(
        event_target(event)?,
        MouseButton::from_dom(event.button()),
        Point::new(event.client_x(), event.client_y()),
    ))
}

impl Document for WebDocument {
    type Node = Element;

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn class_attr(&self, node: &Element) -> Option<String> {
        node.get_attribute("class")
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn element_id(&self, node: &Element) -> Option<String> {
        let id = node.id();
        (!id.is_empty()).then_some(id)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn inner_html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_inner_html(&mut self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn links(&self, node: &Element) -> Vec<Element> {
        let links = node.get_elements_by_tag_name("a");
        (0..links.length()).filter_map(|i| links.item(i)).collect()
    }

    fn set_href(&mut self, node: &Element, href: &str) {
        let _ = node.set_attribute("href", href);
    }

    fn name_attr(&self, node: &Element) -> Option<String> {
        node.get_attribute("name")
    }

    fn set_name_attr(&mut self, node: &Element, name: &str) {
        let _ = node.set_attribute("name", name);
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn set_position(&mut self, node: &Element, at: Point) {
        set_style(node, "left", &format!("{}px", at.x));
        set_style(node, "top", &format!("{}px", at.y));
    }

    fn set_display(&mut self, node: &Element, display: Display) {
        set_style(node, "display", display.as_css());
    }

    fn set_visible(&mut self, node: &Element, visible: bool) {
        set_style(node, "visibility", if visible { "visible" } else { "hidden" });
    }

    fn cumulative_offset(&self, node: &Element) -> Point {
        let mut at = Point::ORIGIN;
        let mut current = node.dyn_ref::<HtmlElement>().cloned();
        while let Some(element) = current {
            at = at + Point::new(element.offset_left(), element.offset_top());
            current = element
                .offset_parent()
                .and_then(|parent| parent.dyn_into::<HtmlElement>().ok());
        }
        at
    }

    fn height(&self, node: &Element) -> i32 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0, HtmlElement::offset_height)
    }

    fn scroll_offset(&self) -> Point {
        let x = self.window.scroll_x().unwrap_or(0.0);
        let y = self.window.scroll_y().unwrap_or(0.0);
        Point::new(x.round() as i32, y.round() as i32)
    }

    fn blur(&mut self, node: &Element) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.blur();
        }
    }
}
