//! Cells of a table grid.

use crate::arena::{ElementId, ElementLookup};
use crate::context::Side;
use crate::document::Document;
use crate::geometry::reading_order_position;
use crate::group::ElementGroup;

/// One cell of a [`TabularElementGroup`](super::TabularElementGroup).
///
/// A merged cell holds no authority of its own: it continues the cell above
/// (vertically merged) or to its left (horizontally merged).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabularCellElementGroup {
    pub(crate) group: ElementGroup,
    vertically_merged: bool,
    horizontally_merged: bool,
    borders: [bool; 4],
}

impl TabularCellElementGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `element` in reading order, right after the last member that
    /// does not follow it.
    pub fn add<L: ElementLookup + ?Sized>(&mut self, lookup: &L, element: ElementId) {
        let at = reading_order_position(lookup, self.group.elements(), element);
        self.group.elements.insert(at, element);
    }

    pub fn elements(&self) -> &[ElementId] {
        self.group.elements()
    }

    pub fn group(&self) -> &ElementGroup {
        &self.group
    }

    pub fn is_empty(&self) -> bool {
        self.group.is_empty()
    }

    pub fn is_vertically_merged(&self) -> bool {
        self.vertically_merged
    }

    pub fn set_vertically_merged(&mut self, merged: bool) {
        self.vertically_merged = merged;
    }

    pub fn is_horizontally_merged(&self) -> bool {
        self.horizontally_merged
    }

    pub fn set_horizontally_merged(&mut self, merged: bool) {
        self.horizontally_merged = merged;
    }

    /// True for cells that continue another one.
    pub fn is_merged(&self) -> bool {
        self.vertically_merged || self.horizontally_merged
    }

    pub fn has_border(&self, side: Side) -> bool {
        self.borders[side.index()]
    }

    pub fn set_border(&mut self, side: Side, present: bool) {
        self.borders[side.index()] = present;
    }

    /// Cell text joined geometrically, like a positional list.
    pub fn get_text_str(&self, doc: &Document) -> String {
        doc.join_positional(self.elements())
    }

    /// Absorbs the content of the cell merged below this one; the bottom
    /// border is taken over from it.
    pub(crate) fn absorb_below<L: ElementLookup + ?Sized>(&mut self, lookup: &L, below: Self) {
        for element in below.group.elements {
            self.add(lookup, element);
        }
        self.borders[Side::Bottom.index()] = below.borders[Side::Bottom.index()];
    }

    pub(crate) fn remap(&self, map: impl FnMut(ElementId) -> ElementId) -> Self {
        Self {
            group: self.group.remap(map),
            vertically_merged: self.vertically_merged,
            horizontally_merged: self.horizontally_merged,
            borders: self.borders,
        }
    }
}
