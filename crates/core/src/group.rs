//! Non-owning element groups.

use crate::arena::{ElementId, ElementLookup};
use crate::geometry::Extent;

/// A shared view over elements that live in some list.
///
/// Groups never own their members; dropping or cloning a group leaves the
/// elements and their lists untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementGroup {
    pub(crate) elements: Vec<ElementId>,
}

impl ElementGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<ElementId>) -> Self {
        Self { elements }
    }

    pub fn add(&mut self, element: ElementId) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.elements.contains(&element)
    }

    /// Smallest box covering every member, `None` for an empty group.
    pub fn bounding_box<L: ElementLookup + ?Sized>(&self, lookup: &L) -> Option<Extent> {
        self.elements
            .iter()
            .map(|&id| Extent::of(lookup.lookup(id)))
            .reduce(|a, b| a.union(&b))
    }

    pub(crate) fn remap(&self, mut map: impl FnMut(ElementId) -> ElementId) -> Self {
        Self {
            elements: self.elements.iter().map(|&id| map(id)).collect(),
        }
    }
}
