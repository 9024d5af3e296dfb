//! Geometric comparison of positioned elements.
//!
//! All coordinates are in points, with `top` growing down the document.
//! None of the comparators here are total orders: two elements can share a
//! line with a third without sharing one with each other. Ordering
//! therefore goes through [`reading_order_position`], which only relies on
//! the comparator being antisymmetric.

use std::cmp::Ordering;

use crate::arena::{ElementId, ElementLookup};
use crate::model::Element;

/// Same-line threshold applied when either element is a form field.
/// Checkbox glyphs jitter around the text baseline.
pub const FORM_FIELD_OVERLAP_EPSILON: f64 = 0.02;

/// Extent assumed, in points, for an element without a Size attribute.
pub const DEFAULT_EXTENT: f64 = 1.0;

/// Axis-aligned box of an element, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Extent {
    /// Box of `element`. A missing Position counts as the origin and a
    /// missing Size as [`DEFAULT_EXTENT`] in both directions.
    pub fn of(element: &Element) -> Self {
        let (top, left) = element.position().unwrap_or((0.0, 0.0));
        let (width, height) = element.size().unwrap_or((DEFAULT_EXTENT, DEFAULT_EXTENT));
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &Extent) -> Extent {
        let top = self.top.min(other.top);
        let left = self.left.min(other.left);
        Extent {
            top,
            left,
            width: self.right().max(other.right()) - left,
            height: self.bottom().max(other.bottom()) - top,
        }
    }

    /// Length of the shared vertical span, 0 when disjoint.
    pub fn vertical_overlap(&self, other: &Extent) -> f64 {
        (self.bottom().min(other.bottom()) - self.top.max(other.top)).max(0.0)
    }

    /// Length of the shared horizontal span, 0 when disjoint.
    pub fn horizontal_overlap(&self, other: &Extent) -> f64 {
        (self.right().min(other.right()) - self.left.max(other.left)).max(0.0)
    }
}

/// Orders two elements top to bottom, treating them as equal when they
/// share a line.
///
/// Two elements share a line when their vertical overlap, relative to the
/// smaller of the two heights, exceeds 0 (or [`FORM_FIELD_OVERLAP_EPSILON`]
/// if either is a form field). Otherwise the higher element comes first;
/// equal tops fall back to the bottom edge.
pub fn compare_by_horizontal_alignment(a: &Element, b: &Element) -> Ordering {
    let ea = Extent::of(a);
    let eb = Extent::of(b);
    let threshold = if a.kind().is_form_field() || b.kind().is_form_field() {
        FORM_FIELD_OVERLAP_EPSILON
    } else {
        0.0
    };
    let smaller = ea.height.min(eb.height);
    if smaller > 0.0 && ea.vertical_overlap(&eb) / smaller > threshold {
        return Ordering::Equal;
    }
    ea.top
        .total_cmp(&eb.top)
        .then_with(|| ea.bottom().total_cmp(&eb.bottom()))
}

/// Orders two elements left to right, treating them as equal when their
/// left edges are within half the narrower width of each other.
pub fn compare_by_vertical_alignment(a: &Element, b: &Element) -> Ordering {
    let ea = Extent::of(a);
    let eb = Extent::of(b);
    if (ea.left - eb.left).abs() <= ea.width.min(eb.width) / 2.0 {
        return Ordering::Equal;
    }
    ea.left.total_cmp(&eb.left)
}

/// Reading order: left to right within a line, otherwise top to bottom.
pub fn compare_by_horizontal_and_then_vertical_alignment(a: &Element, b: &Element) -> Ordering {
    match compare_by_horizontal_alignment(a, b) {
        Ordering::Equal => Extent::of(a).left.total_cmp(&Extent::of(b).left),
        other => other,
    }
}

/// Index at which `new` enters `ordered` in reading order.
///
/// Scans from the end and returns the slot right after the last element
/// that does not follow `new`. Elements tied with `new` stay in front of
/// it, so repeated insertion keeps arrival order among ties.
pub fn reading_order_position<L: ElementLookup + ?Sized>(
    lookup: &L,
    ordered: &[ElementId],
    new: ElementId,
) -> usize {
    let candidate = lookup.lookup(new);
    let mut at = ordered.len();
    while at > 0 {
        let prev = lookup.lookup(ordered[at - 1]);
        if compare_by_horizontal_and_then_vertical_alignment(prev, candidate) != Ordering::Greater {
            break;
        }
        at -= 1;
    }
    at
}

/// Stable insertion sort into reading order.
///
/// Afterwards every adjacent pair is non-decreasing under
/// [`compare_by_horizontal_and_then_vertical_alignment`].
pub fn sort_in_reading_order<L: ElementLookup + ?Sized>(lookup: &L, ids: &mut [ElementId]) {
    for i in 1..ids.len() {
        let at = reading_order_position(lookup, &ids[..i], ids[i]);
        ids[at..=i].rotate_right(1);
    }
}
