//! Per-element geometric context.
//!
//! A [`PositionalContext`] caches what later passes learned about an
//! element's surroundings: its nearest neighbors on each side, the visual
//! rules drawn around it and, once a table claims it, its grid coordinates.

use std::cmp::Ordering;

use itertools::Itertools;
use tracing::debug;

use crate::arena::{ElementId, ElementLookup, ListId, TableId};
use crate::document::Document;
use crate::error::{FolioError, Result};
use crate::geometry::{Extent, compare_by_horizontal_alignment};
use crate::group::ElementGroup;

/// Distance below which two edges count as touching.
const EDGE_EPSILON: f64 = 1e-6;

/// One side of a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub const fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Bottom => 1,
            Side::Left => 2,
            Side::Right => 3,
        }
    }
}

/// Where an element sits in a detected table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TableCoordinates {
    pub table: TableId,
    pub row: usize,
    pub column: usize,
}

/// Computed neighbor, border and table cache of one element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionalContext {
    pub(crate) neighbors: [ElementGroup; 4],
    pub(crate) shadowed: [Option<ElementId>; 4],
    pub(crate) borders: [Option<f64>; 4],
    pub(crate) table: Option<TableCoordinates>,
}

impl PositionalContext {
    /// Nearest elements on `side`, all tied for nearest.
    pub fn neighbors(&self, side: Side) -> &ElementGroup {
        &self.neighbors[side.index()]
    }

    /// The single nearest element on `side`, even when several are tied.
    pub fn shadowed(&self, side: Side) -> Option<ElementId> {
        self.shadowed[side.index()]
    }

    pub fn set_neighbors(&mut self, side: Side, group: ElementGroup, shadowed: Option<ElementId>) {
        self.neighbors[side.index()] = group;
        self.shadowed[side.index()] = shadowed;
    }

    /// Coordinate, in points, of the rule drawn on `side`.
    pub fn visual_border(&self, side: Side) -> Option<f64> {
        self.borders[side.index()]
    }

    pub fn has_visual_border(&self, side: Side) -> bool {
        self.borders[side.index()].is_some()
    }

    pub fn set_visual_border(&mut self, side: Side, coordinate: Option<f64>) {
        self.borders[side.index()] = coordinate;
    }

    pub fn table_coordinates(&self) -> Option<TableCoordinates> {
        self.table
    }

    pub fn set_table_coordinates(&mut self, coordinates: Option<TableCoordinates>) {
        self.table = coordinates;
    }

    /// Drops the coordinates if they point into `table`.
    pub(crate) fn clear_table(&mut self, table: TableId) {
        if self.table.is_some_and(|c| c.table == table) {
            self.table = None;
        }
    }
}

impl Document {
    /// True if a bottom rule hugs `element` closely enough to underline it.
    ///
    /// The rule must sit within `border_gap_ratio` font sizes of the bottom
    /// edge and nearer to it than to the element below.
    pub fn has_underlined_border(&self, element: ElementId) -> bool {
        self.hugging_border(element, Side::Bottom)
    }

    /// Top-side counterpart of [`Document::has_underlined_border`].
    pub fn has_overlined_border(&self, element: ElementId) -> bool {
        self.hugging_border(element, Side::Top)
    }

    fn hugging_border(&self, element: ElementId, side: Side) -> bool {
        let Some(node) = self.element(element) else {
            return false;
        };
        let Some(context) = node.get_positional_context() else {
            return false;
        };
        let Some(border) = context.visual_border(side) else {
            return false;
        };
        let extent = Extent::of(node);
        let gap = match side {
            Side::Bottom => border - extent.bottom(),
            _ => extent.top - border,
        };
        if gap < 0.0 {
            return false;
        }
        let font_size = node
            .font_size()
            .map(|size| size.to_points())
            .unwrap_or(extent.height);
        if gap >= font_size * self.params.border_gap_ratio {
            return false;
        }
        match context.shadowed(side) {
            None => true,
            Some(other) => {
                let other = Extent::of(self.lookup(other));
                let other_gap = match side {
                    Side::Bottom => other.top - border,
                    _ => border - other.bottom(),
                };
                gap < other_gap
            }
        }
    }

    /// True if at least two elements directly below `element` share a line
    /// and each carries a few characters of text: the shape of a header
    /// spanning several sub-headers.
    pub fn is_plural_header(&self, element: ElementId) -> bool {
        let Some(context) = self.get_positional_context(element) else {
            return false;
        };
        let min_len = self.params.plural_header_min_text_len;
        let candidates: Vec<ElementId> = context
            .neighbors(Side::Bottom)
            .elements()
            .iter()
            .copied()
            .filter(|&id| self.get_text_str(id).chars().count() >= min_len)
            .collect();
        candidates.iter().tuple_combinations().any(|(&a, &b)| {
            compare_by_horizontal_alignment(self.lookup(a), self.lookup(b)) == Ordering::Equal
        })
    }

    pub fn set_visual_border(
        &mut self,
        element: ElementId,
        side: Side,
        coordinate: Option<f64>,
    ) -> Result<()> {
        self.positional_context_mut(element)?
            .set_visual_border(side, coordinate);
        Ok(())
    }

    /// Fills the neighbor groups of every positioned element of `list`.
    ///
    /// On each side the candidates are the elements past that edge whose
    /// extent overlaps on the other axis. All candidates within
    /// `neighbor_tie_tolerance` of the nearest form the side's group, kept
    /// in list order; the one overlapping most is the shadowed neighbor.
    /// Borders and table coordinates already in the context are kept.
    pub fn compute_neighbors(&mut self, list: ListId) -> Result<()> {
        let members: Vec<(ElementId, Extent)> = self
            .list(list)
            .ok_or(FolioError::UnknownHandle("list"))?
            .elements()
            .iter()
            .map(|&id| self.lookup(id))
            .filter(|e| e.position().is_some())
            .map(|e| (e.id(), Extent::of(e)))
            .collect();
        let tolerance = self.params.neighbor_tie_tolerance;

        let mut computed = Vec::with_capacity(members.len());
        for &(id, extent) in &members {
            let sides = Side::ALL.map(|side| nearest_on_side(id, &extent, &members, side, tolerance));
            computed.push((id, sides));
        }

        for (id, sides) in computed {
            let context = self.positional_context_mut(id)?;
            for (side, (group, shadowed)) in Side::ALL.into_iter().zip(sides) {
                context.set_neighbors(side, group, shadowed);
            }
        }
        debug!(list = list.index(), elements = members.len(), "computed neighbors");
        Ok(())
    }
}

fn nearest_on_side(
    id: ElementId,
    extent: &Extent,
    members: &[(ElementId, Extent)],
    side: Side,
    tolerance: f64,
) -> (ElementGroup, Option<ElementId>) {
    let candidates: Vec<(ElementId, f64, f64)> = members
        .iter()
        .filter(|(other, _)| *other != id)
        .filter_map(|(other, o)| {
            let (distance, overlap) = match side {
                Side::Bottom => (o.top - extent.bottom(), extent.horizontal_overlap(o)),
                Side::Top => (extent.top - o.bottom(), extent.horizontal_overlap(o)),
                Side::Right => (o.left - extent.right(), extent.vertical_overlap(o)),
                Side::Left => (extent.left - o.right(), extent.vertical_overlap(o)),
            };
            (distance >= -EDGE_EPSILON && overlap > 0.0).then_some((*other, distance.max(0.0), overlap))
        })
        .collect();

    let Some(nearest) = candidates
        .iter()
        .map(|&(_, distance, _)| distance)
        .min_by(f64::total_cmp)
    else {
        return (ElementGroup::new(), None);
    };

    let mut group = ElementGroup::new();
    let mut shadowed: Option<(ElementId, f64)> = None;
    for (other, distance, overlap) in candidates {
        if distance > nearest + tolerance {
            continue;
        }
        group.add(other);
        if shadowed.is_none_or(|(_, best)| overlap > best) {
            shadowed = Some((other, overlap));
        }
    }
    (group, shadowed.map(|(other, _)| other))
}
