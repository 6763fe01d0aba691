#![forbid(unsafe_code)]

//! The page seam.
//!
//! [`Document`] is the only way the controllers touch the page. It exposes the
//! handful of DOM capabilities the menus need and nothing else, so the same
//! logic drives a real browser document (`pagemenu-web`) and the
//! deterministic [`MemoryDocument`](crate::memory::MemoryDocument).
//!
//! Lookups return `Option` instead of errors: a missing element is a normal
//! page state, and callers degrade to "leave the DOM alone".

use crate::event::Point;

/// CSS `display` states used for context-menu overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Display {
    Block,
    None,
}

impl Display {
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::None => "none",
        }
    }
}

/// Host document capabilities.
pub trait Document {
    /// Element handle. Equality must be element identity.
    type Node: Clone + PartialEq;

    /// Parent element, or `None` once the root has been reached.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Raw `class` attribute.
    fn class_attr(&self, node: &Self::Node) -> Option<String>;

    /// Lower-cased tag name.
    fn tag_name(&self, node: &Self::Node) -> String;

    fn element_id(&self, node: &Self::Node) -> Option<String>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn inner_html(&self, node: &Self::Node) -> String;

    fn set_inner_html(&mut self, node: &Self::Node, html: &str);

    /// All `<a>` descendants, in document order.
    fn links(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn set_href(&mut self, node: &Self::Node, href: &str);

    /// The `name` attribute (form fields).
    fn name_attr(&self, node: &Self::Node) -> Option<String>;

    fn set_name_attr(&mut self, node: &Self::Node, name: &str);

    fn add_class(&mut self, node: &Self::Node, class: &str);

    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Set `left`/`top` (in px) of an absolutely positioned element.
    fn set_position(&mut self, node: &Self::Node, at: Point);

    fn set_display(&mut self, node: &Self::Node, display: Display);

    /// Toggle CSS `visibility` between `visible` and `hidden`.
    fn set_visible(&mut self, node: &Self::Node, visible: bool);

    /// Offset of the element relative to the document, summed over its
    /// offset parents.
    fn cumulative_offset(&self, node: &Self::Node) -> Point;

    /// Rendered height in px.
    fn height(&self, node: &Self::Node) -> i32;

    /// Current page scroll offset.
    fn scroll_offset(&self) -> Point;

    /// Drop keyboard focus from the element.
    fn blur(&mut self, node: &Self::Node);

    /// Whether `class` is one of the whitespace-separated class tokens.
    ///
    /// Token comparison is exact: `numfilteroperx` does not contain
    /// `numfilteroper`.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool {
        self.class_attr(node)
            .is_some_and(|attr| attr.split_whitespace().any(|token| token == class))
    }

    /// Walk from `node` up to the root, `node` included.
    fn ancestors_inclusive(&self, node: &Self::Node) -> Ancestors<'_, Self>
    where
        Self: Sized,
    {
        Ancestors {
            document: self,
            next: Some(node.clone()),
        }
    }
}

/// Iterator returned by [`Document::ancestors_inclusive`].
pub struct Ancestors<'a, D: Document> {
    document: &'a D,
    next: Option<D::Node>,
}

impl<D: Document> Iterator for Ancestors<'_, D> {
    type Item = D::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.document.parent(&current);
        Some(current)
    }
}

/// Whether the element is a text-entry control.
pub fn is_text_entry<D: Document>(document: &D, node: &D::Node) -> bool {
    matches!(document.tag_name(node).as_str(), "input" | "textarea")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;

    #[test]
    fn has_class_matches_whole_tokens_only() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let el = doc.element(root, "span");
        doc.with_class(el, "  numfilteroperx   resource\tfoo ");

        assert!(doc.has_class(&el, "resource"));
        assert!(doc.has_class(&el, "foo"));
        assert!(doc.has_class(&el, "numfilteroperx"));
        assert!(!doc.has_class(&el, "numfilteroper"));
        assert!(!doc.has_class(&el, "res"));
    }

    #[test]
    fn ancestor_walk_ends_at_root() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let div = doc.element(root, "div");
        let span = doc.element(div, "span");

        let chain: Vec<_> = doc.ancestors_inclusive(&span).collect();
        assert_eq!(chain, vec![span, div, root]);
    }

    #[test]
    fn text_entry_tags() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let input = doc.element(root, "INPUT");
        let area = doc.element(root, "textarea");
        let div = doc.element(root, "div");

        assert!(is_text_entry(&doc, &input));
        assert!(is_text_entry(&doc, &area));
        assert!(!is_text_entry(&doc, &div));
    }
}
