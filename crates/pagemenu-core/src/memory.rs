#![forbid(unsafe_code)]

//! Deterministic in-memory [`Document`].
//!
//! `MemoryDocument` is a small arena of elements with just enough state to
//! drive the menu controllers: ids, classes, inner HTML, link targets, form
//! field names and the style properties the controllers write. Every write
//! is kept, so tests can assert page-wide invariants after any sequence of
//! events.
//!
//! Geometry is not laid out: each element carries a fixed cumulative offset
//! and height set through the builder.
//!
//! Each element holds one run of text (`with_html`). `inner_html` serializes
//! that text followed by the markup of its child elements, the way a browser
//! reports `innerHTML`.

use crate::dom::{Display, Document};
use crate::event::Point;

/// Handle to an element of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    tag: String,
    id: Option<String>,
    class: Option<String>,
    html: String,
    name: Option<String>,
    href: Option<String>,
    offset: Point,
    height: i32,
    position: Option<Point>,
    display: Option<Display>,
    visible: Option<bool>,
}

/// Arena-backed document rooted at an `html` element.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    scroll: Point,
    focused: Option<NodeId>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                tag: "html".to_string(),
                ..Node::default()
            }],
            scroll: Point::ORIGIN,
            focused: None,
        }
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element under `parent`.
    pub fn element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn with_id(&mut self, node: NodeId, id: &str) -> NodeId {
        self.nodes[node.0].id = Some(id.to_string());
        node
    }

    pub fn with_class(&mut self, node: NodeId, class: &str) -> NodeId {
        self.nodes[node.0].class = Some(class.to_string());
        node
    }

    pub fn with_html(&mut self, node: NodeId, html: &str) -> NodeId {
        self.nodes[node.0].html = html.to_string();
        node
    }

    pub fn with_name(&mut self, node: NodeId, name: &str) -> NodeId {
        self.nodes[node.0].name = Some(name.to_string());
        node
    }

    /// Fix the element's cumulative document offset.
    pub fn with_offset(&mut self, node: NodeId, offset: Point) -> NodeId {
        self.nodes[node.0].offset = offset;
        node
    }

    pub fn with_height(&mut self, node: NodeId, height: i32) -> NodeId {
        self.nodes[node.0].height = height;
        node
    }

    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll = scroll;
    }

    pub fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
    }

    #[must_use]
    pub const fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    #[must_use]
    pub fn display(&self, node: NodeId) -> Option<Display> {
        self.nodes[node.0].display
    }

    #[must_use]
    pub fn visibility(&self, node: NodeId) -> Option<bool> {
        self.nodes[node.0].visible
    }

    #[must_use]
    pub fn position(&self, node: NodeId) -> Option<Point> {
        self.nodes[node.0].position
    }

    #[must_use]
    pub fn href(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].href.as_deref()
    }

    #[must_use]
    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].name.as_deref()
    }

    #[must_use]
    pub fn html(&self, node: NodeId) -> &str {
        &self.nodes[node.0].html
    }

    /// Elements whose `display` was last set to `block`.
    #[must_use]
    pub fn displayed(&self) -> Vec<NodeId> {
        self.ids()
            .filter(|id| self.nodes[id.0].display == Some(Display::Block))
            .collect()
    }

    /// Elements whose `visibility` was last set to `visible`.
    #[must_use]
    pub fn visible(&self) -> Vec<NodeId> {
        self.ids()
            .filter(|id| self.nodes[id.0].visible == Some(true))
            .collect()
    }

    #[must_use]
    pub fn with_class_token(&self, class: &str) -> Vec<NodeId> {
        self.ids().filter(|id| self.has_class(id, class)).collect()
    }

    fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    fn write_outer_html(&self, node: NodeId, out: &mut String) {
        let element = &self.nodes[node.0];
        out.push('<');
        out.push_str(&element.tag);
        for (attr, value) in [
            ("id", &element.id),
            ("class", &element.class),
            ("name", &element.name),
            ("href", &element.href),
        ] {
            if let Some(value) = value {
                out.push_str(&format!(" {attr}=\"{}\"", value.replace('"', "&quot;")));
            }
        }
        out.push('>');
        self.write_inner_html(node, out);
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }

    fn write_inner_html(&self, node: NodeId, out: &mut String) {
        let element = &self.nodes[node.0];
        out.push_str(&element.html);
        for &child in &element.children {
            self.write_outer_html(child, out);
        }
    }

    fn collect_links(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[node.0].children {
            if self.nodes[child.0].tag == "a" {
                out.push(child);
            }
            self.collect_links(child, out);
        }
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    fn class_attr(&self, node: &NodeId) -> Option<String> {
        self.nodes.get(node.0)?.class.clone()
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.nodes[node.0].tag.clone()
    }

    fn element_id(&self, node: &NodeId) -> Option<String> {
        self.nodes.get(node.0)?.id.clone()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids()
            .find(|node| self.nodes[node.0].id.as_deref() == Some(id))
    }

    fn inner_html(&self, node: &NodeId) -> String {
        let mut out = String::new();
        self.write_inner_html(*node, &mut out);
        out
    }

    /// Replaces the element's text and detaches its children. The markup is
    /// not parsed into new elements.
    fn set_inner_html(&mut self, node: &NodeId, html: &str) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        self.nodes[node.0].html = html.to_string();
    }

    fn links(&self, node: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_links(*node, &mut out);
        out
    }

    fn set_href(&mut self, node: &NodeId, href: &str) {
        self.nodes[node.0].href = Some(href.to_string());
    }

    fn name_attr(&self, node: &NodeId) -> Option<String> {
        self.nodes.get(node.0)?.name.clone()
    }

    fn set_name_attr(&mut self, node: &NodeId, name: &str) {
        self.nodes[node.0].name = Some(name.to_string());
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let slot = &mut self.nodes[node.0].class;
        let joined = match slot.as_deref() {
            Some(attr) if !attr.trim().is_empty() => format!("{} {class}", attr.trim()),
            _ => class.to_string(),
        };
        *slot = Some(joined);
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        if let Some(attr) = &mut self.nodes[node.0].class {
            let kept: Vec<&str> = attr.split_whitespace().filter(|t| *t != class).collect();
            *attr = kept.join(" ");
        }
    }

    fn set_position(&mut self, node: &NodeId, at: Point) {
        self.nodes[node.0].position = Some(at);
    }

    fn set_display(&mut self, node: &NodeId, display: Display) {
        self.nodes[node.0].display = Some(display);
    }

    fn set_visible(&mut self, node: &NodeId, visible: bool) {
        self.nodes[node.0].visible = Some(visible);
    }

    fn cumulative_offset(&self, node: &NodeId) -> Point {
        self.nodes[node.0].offset
    }

    fn height(&self, node: &NodeId) -> i32 {
        self.nodes[node.0].height
    }

    fn scroll_offset(&self) -> Point {
        self.scroll
    }

    fn blur(&mut self, node: &NodeId) {
        if self.focused == Some(*node) {
            self.focused = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_are_collected_in_document_order() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let menu = doc.element(root, "div");
        let first = doc.element(menu, "a");
        let list = doc.element(menu, "ul");
        let li = doc.element(list, "li");
        let nested = doc.element(li, "A");
        let _other = doc.element(root, "a");

        assert_eq!(doc.links(&menu), vec![first, nested]);
    }

    #[test]
    fn inner_html_includes_child_markup() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let row = doc.element(root, "tr");
        doc.with_class(row, "resource");
        let cell = doc.element(row, "TD");
        doc.with_class(cell, "name \"x\"");
        doc.with_html(cell, "A &amp; B");
        let bold = doc.element(cell, "b");
        doc.with_html(bold, "1");

        assert_eq!(doc.inner_html(&bold), "1");
        assert_eq!(doc.inner_html(&cell), "A &amp; B<b>1</b>");
        assert_eq!(
            doc.inner_html(&row),
            "<td class=\"name &quot;x&quot;\">A &amp; B<b>1</b></td>"
        );
    }

    #[test]
    fn set_inner_html_detaches_children() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let span = doc.element(root, "span");
        let child = doc.element(span, "i");
        doc.with_html(child, "old");

        doc.set_inner_html(&span, "&lt;");

        assert_eq!(doc.inner_html(&span), "&lt;");
        assert_eq!(doc.html(span), "&lt;");
        assert_eq!(doc.parent(&child), None);
        assert_eq!(doc.parent(&span), Some(root));
    }

    #[test]
    fn class_edits_keep_other_tokens() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let button = doc.element(root, "a");
        doc.with_class(button, "menuButton");

        doc.add_class(&button, "menuButtonActive");
        doc.add_class(&button, "menuButtonActive");
        assert_eq!(
            doc.class_attr(&button).as_deref(),
            Some("menuButton menuButtonActive")
        );

        doc.remove_class(&button, "menuButtonActive");
        assert_eq!(doc.class_attr(&button).as_deref(), Some("menuButton"));
    }

    #[test]
    fn lookup_by_id_and_style_tracking() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let panel = doc.element(root, "div");
        doc.with_id(panel, "menu1");

        assert_eq!(doc.element_by_id("menu1"), Some(panel));
        assert_eq!(doc.element_by_id("missing"), None);

        doc.set_display(&panel, Display::Block);
        doc.set_visible(&panel, true);
        assert_eq!(doc.displayed(), vec![panel]);
        assert_eq!(doc.visible(), vec![panel]);

        doc.set_display(&panel, Display::None);
        assert!(doc.displayed().is_empty());
    }

    #[test]
    fn blur_clears_focus_only_for_that_node() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let a = doc.element(root, "a");
        let b = doc.element(root, "a");

        doc.focus(a);
        doc.blur(&b);
        assert_eq!(doc.focused(), Some(a));
        doc.blur(&a);
        assert_eq!(doc.focused(), None);
    }
}
