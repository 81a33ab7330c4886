//! Read-only element capability the detection rules are written against.

use super::element_ref::ElementRef;

/// What the qualifier and language detector may ask of an element.
///
/// Only elements are ever handed out: `parent`, the sibling accessors and the
/// child iterators skip text, comment and document nodes.
pub trait TreeNode: Sized + PartialEq {
    /// Lowercase local tag name.
    fn tag(&self) -> &str;

    fn attr(&self, name: &str) -> Option<&str>;

    fn classes(&self) -> impl Iterator<Item = &str> + '_;

    fn parent(&self) -> Option<Self>;

    fn prev_sibling(&self) -> Option<Self>;

    fn next_sibling(&self) -> Option<Self>;

    /// Element children in document order.
    fn children(&self) -> impl Iterator<Item = Self> + '_;

    /// Element descendants in document order, excluding `self`.
    fn descendants(&self) -> impl Iterator<Item = Self> + '_;

    /// Concatenated descendant text, like DOM `textContent`.
    fn text(&self) -> String;

    fn is_tag(&self, tag: &str) -> bool {
        self.tag() == tag
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }
}

impl<'a> TreeNode for ElementRef<'a> {
    fn tag(&self) -> &str {
        self.dom.element_name(self.id).map_or("", |n| n.as_ref())
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.dom.get_attr(self.id, name)
    }

    fn classes(&self) -> impl Iterator<Item = &str> + '_ {
        self.dom.element_classes(self.id).iter().map(String::as_str)
    }

    fn parent(&self) -> Option<Self> {
        selectors::Element::parent_element(self)
    }

    fn prev_sibling(&self) -> Option<Self> {
        selectors::Element::prev_sibling_element(self)
    }

    fn next_sibling(&self) -> Option<Self> {
        selectors::Element::next_sibling_element(self)
    }

    fn children(&self) -> impl Iterator<Item = Self> + '_ {
        let dom = self.dom;
        dom.children(self.id)
            .filter_map(move |id| ElementRef::element(dom, id))
    }

    fn descendants(&self) -> impl Iterator<Item = Self> + '_ {
        let dom = self.dom;
        dom.descendants(self.id)
            .filter_map(move |id| ElementRef::element(dom, id))
    }

    fn text(&self) -> String {
        self.dom.text(self.id)
    }
}
