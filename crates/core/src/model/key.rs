//! Elements as map keys.
//!
//! By default two elements are equal when their kinds and attribute values
//! match, child lists compared element by element. An element switched to
//! [`IdentityMode::Identity`] is only equal to itself and hashes its tree
//! path, which is much cheaper on large subtrees.

use std::fmt::Write as _;
use std::hash::{Hash, Hasher};

use crate::arena::{ElementId, ListId};
use crate::document::Document;
use crate::units::Length;

use super::attribute::{Attribute, AttributeKind};
use super::element::IdentityMode;
use super::visitor::AttributeVisitor;

/// An element of a borrowed document, usable as a hash map key.
///
/// The key borrows the document, so an element's identity mode cannot change
/// while keys referring to it are alive.
#[derive(Clone, Copy, Debug)]
pub struct ElementKey<'a> {
    doc: &'a Document,
    id: ElementId,
}

impl<'a> ElementKey<'a> {
    pub fn new(doc: &'a Document, id: ElementId) -> Self {
        Self { doc, id }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    fn is_identity(&self) -> bool {
        self.doc
            .element(self.id)
            .is_some_and(|e| e.identity_mode() == IdentityMode::Identity)
    }
}

impl PartialEq for ElementKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_identity() || other.is_identity() {
            return std::ptr::eq(self.doc, other.doc) && self.id == other.id;
        }
        structurally_equal(self.doc, self.id, other.doc, other.id)
    }
}

impl Eq for ElementKey<'_> {}

impl Hash for ElementKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_identity() {
            self.doc.path_string(self.id).hash(state);
        } else {
            hash_structure(self.doc, self.id, state);
        }
    }
}

fn sorted_attributes(doc: &Document, id: ElementId) -> Vec<&Attribute> {
    let mut attributes: Vec<&Attribute> = doc
        .element(id)
        .map(|e| e.attributes().collect())
        .unwrap_or_default();
    attributes.sort_by_key(|a| a.kind());
    attributes
}

fn structurally_equal(a_doc: &Document, a: ElementId, b_doc: &Document, b: ElementId) -> bool {
    let (Some(ea), Some(eb)) = (a_doc.element(a), b_doc.element(b)) else {
        return false;
    };
    if ea.kind() != eb.kind() {
        return false;
    }
    let left = sorted_attributes(a_doc, a);
    let right = sorted_attributes(b_doc, b);
    left.len() == right.len()
        && left.iter().zip(&right).all(|(x, y)| match (x.value().list(), y.value().list()) {
            (Some(lx), Some(ly)) => x.kind() == y.kind() && lists_equal(a_doc, lx, b_doc, ly),
            (None, None) => x.value() == y.value(),
            _ => false,
        })
}

fn lists_equal(a_doc: &Document, a: ListId, b_doc: &Document, b: ListId) -> bool {
    let (Some(la), Some(lb)) = (a_doc.list(a), b_doc.list(b)) else {
        return false;
    };
    la.is_positional() == lb.is_positional()
        && la.len() == lb.len()
        && la
            .elements()
            .iter()
            .zip(lb.elements())
            .all(|(&x, &y)| structurally_equal(a_doc, x, b_doc, y))
}

fn hash_structure<H: Hasher>(doc: &Document, id: ElementId, state: &mut H) {
    let Some(element) = doc.element(id) else {
        return;
    };
    element.kind().hash(state);
    let mut hasher = StructuralHasher { doc, state };
    for attribute in sorted_attributes(doc, id) {
        attribute.kind().hash(hasher.state);
        attribute.value().accept(&mut hasher);
    }
}

/// Feeds attribute values into a hasher, descending into child lists.
struct StructuralHasher<'d, 'h, H: Hasher> {
    doc: &'d Document,
    state: &'h mut H,
}

impl<H: Hasher> AttributeVisitor for StructuralHasher<'_, '_, H> {
    type Output = ();

    fn visit_position(&mut self, top: &Length, left: &Length) {
        top.hash(self.state);
        left.hash(self.state);
    }

    fn visit_size(&mut self, width: &Length, height: &Length) {
        width.hash(self.state);
        height.hash(self.state);
    }

    fn visit_text(&mut self, text: &str) {
        text.hash(self.state);
    }

    fn visit_font_size(&mut self, size: &Length) {
        size.hash(self.state);
    }

    fn visit_layout(&mut self, slots: &[AttributeKind]) {
        slots.hash(self.state);
    }

    fn visit_list(&mut self, _kind: AttributeKind, list: ListId) {
        let Some(list) = self.doc.list(list) else {
            return;
        };
        list.is_positional().hash(self.state);
        list.len().hash(self.state);
        for &child in list.elements() {
            hash_structure(self.doc, child, self.state);
        }
    }
}

impl Document {
    /// Map key over `element`, see [`ElementKey`].
    pub fn key(&self, element: ElementId) -> ElementKey<'_> {
        ElementKey::new(self, element)
    }

    /// True if both elements have equal kinds and attribute values, child
    /// lists compared recursively.
    pub fn structurally_equal(&self, a: ElementId, b: ElementId) -> bool {
        structurally_equal(self, a, self, b)
    }

    /// Slash separated slot path from the root, e.g.
    /// `/PositionalContent[3]/Content[0]`.
    ///
    /// The root is `/`. Elements outside the root's tree start with `~`
    /// followed by the handle of their topmost ancestor.
    pub fn path_string(&self, element: ElementId) -> String {
        let mut segments: Vec<(AttributeKind, usize)> = Vec::new();
        let mut current = element;
        while let Some(location) = self.element(current).and_then(|e| e.location()) {
            let Some(enclosing) = self.list(location.list).and_then(|l| l.enclosing()) else {
                break;
            };
            segments.push((enclosing.slot, location.index));
            current = enclosing.owner;
        }

        let mut path = String::new();
        if current != self.root() {
            let _ = write!(path, "~{}", current.index());
        }
        for (slot, index) in segments.iter().rev() {
            let _ = write!(path, "/{slot:?}[{index}]");
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::model::ElementKind;

    fn text(doc: &mut Document, value: &str) -> ElementId {
        let id = doc.new_element(ElementKind::Text);
        doc.add_attribute(id, Attribute::text(value)).unwrap();
        id
    }

    #[test]
    fn structural_keys_collapse_equal_elements() {
        let mut doc = Document::default();
        let a = text(&mut doc, "same");
        let b = text(&mut doc, "same");
        let c = text(&mut doc, "other");

        let keys: HashSet<ElementKey<'_>> = [a, b, c].into_iter().map(|id| doc.key(id)).collect();
        assert_eq!(keys.len(), 2);
        assert!(doc.structurally_equal(a, b));
        assert!(!doc.structurally_equal(a, c));
    }

    #[test]
    fn identity_keys_keep_equal_elements_apart() {
        let mut doc = Document::default();
        let a = text(&mut doc, "same");
        let b = text(&mut doc, "same");
        doc.set_identity_mode(a, IdentityMode::Identity).unwrap();

        assert_ne!(doc.key(a), doc.key(b));
        assert_eq!(doc.key(a), doc.key(a));
    }

    #[test]
    fn path_string_names_slots_and_indices() {
        let mut doc = Document::default();
        let para = doc.new_element(ElementKind::Paragraph);
        let first = text(&mut doc, "a");
        let second = text(&mut doc, "b");
        let content = doc.new_list(vec![first, second]).unwrap();
        doc.add_attribute(para, Attribute::content(content)).unwrap();
        let page = doc.new_positional_list(vec![para], false).unwrap();
        let root = doc.root();
        doc.add_attribute(root, Attribute::positional_content(page)).unwrap();

        assert_eq!(doc.path_string(root), "/");
        assert_eq!(doc.path_string(second), "/PositionalContent[0]/Content[1]");

        let loose = text(&mut doc, "c");
        assert_eq!(doc.path_string(loose), format!("~{}", loose.index()));
    }
}
