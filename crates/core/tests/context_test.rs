mod common;

use folio_core::{Attribute, Document, ElementId, Length, Side};

use common::{attach_page, text_at};

struct Layout {
    doc: Document,
    header: ElementId,
    sub_one: ElementId,
    sub_two: ElementId,
    footer: ElementId,
}

/// A header spanning two sub-headers on one line, with a footer below.
fn header_layout() -> Layout {
    let mut doc = Document::default();
    let header = text_at(&mut doc, "Header", 0.0, 0.0, 100.0, 10.0);
    let sub_one = text_at(&mut doc, "Sub one", 20.0, 0.0, 45.0, 10.0);
    let sub_two = text_at(&mut doc, "Sub two", 20.0, 55.0, 45.0, 10.0);
    let footer = text_at(&mut doc, "Footer", 50.0, 0.0, 100.0, 10.0);
    let list = attach_page(&mut doc, vec![footer, sub_two, header, sub_one], true);
    doc.compute_neighbors(list).unwrap();
    Layout {
        doc,
        header,
        sub_one,
        sub_two,
        footer,
    }
}

// =============================================================================
// Neighbors
// =============================================================================

#[test]
fn test_neighbors_group_ties_in_reading_order() {
    let l = header_layout();
    let ctx = l.doc.get_positional_context(l.header).unwrap();
    assert_eq!(ctx.neighbors(Side::Bottom).elements(), &[l.sub_one, l.sub_two]);
    assert_eq!(ctx.shadowed(Side::Bottom), Some(l.sub_one));
    assert!(ctx.neighbors(Side::Top).is_empty());
    assert_eq!(ctx.shadowed(Side::Top), None);

    let ctx = l.doc.get_positional_context(l.footer).unwrap();
    assert_eq!(ctx.neighbors(Side::Top).elements(), &[l.sub_one, l.sub_two]);
}

#[test]
fn test_neighbors_on_every_side() {
    let l = header_layout();
    let ctx = l.doc.get_positional_context(l.sub_one).unwrap();
    assert_eq!(ctx.neighbors(Side::Top).elements(), &[l.header]);
    assert_eq!(ctx.neighbors(Side::Bottom).elements(), &[l.footer]);
    assert_eq!(ctx.neighbors(Side::Right).elements(), &[l.sub_two]);
    assert!(ctx.neighbors(Side::Left).is_empty());

    let ctx = l.doc.get_positional_context(l.sub_two).unwrap();
    assert_eq!(ctx.neighbors(Side::Left).elements(), &[l.sub_one]);
}

#[test]
fn test_group_bounding_box() {
    let l = header_layout();
    let ctx = l.doc.get_positional_context(l.header).unwrap();
    let bbox = ctx.neighbors(Side::Bottom).bounding_box(&l.doc).unwrap();
    assert_eq!((bbox.top, bbox.left, bbox.width, bbox.height), (20.0, 0.0, 100.0, 10.0));
}

#[test]
fn test_recomputing_neighbors_keeps_borders() {
    let mut l = header_layout();
    l.doc
        .set_visual_border(l.header, Side::Bottom, Some(12.0))
        .unwrap();
    let list = l.doc.element(l.header).unwrap().location().unwrap().list;
    l.doc.compute_neighbors(list).unwrap();
    let ctx = l.doc.get_positional_context(l.header).unwrap();
    assert_eq!(ctx.visual_border(Side::Bottom), Some(12.0));
    assert!(!ctx.has_visual_border(Side::Top));
}

// =============================================================================
// Borders and headers
// =============================================================================

#[test]
fn test_underline_within_font_size_ratio() {
    let mut l = header_layout();
    l.doc
        .add_attribute(l.header, Attribute::font_size(Length::pt(10.0)).unwrap())
        .unwrap();
    l.doc
        .set_visual_border(l.header, Side::Bottom, Some(12.0))
        .unwrap();
    assert!(l.doc.has_underlined_border(l.header));

    l.doc
        .set_visual_border(l.header, Side::Bottom, Some(18.0))
        .unwrap();
    assert!(!l.doc.has_underlined_border(l.header));
    assert!(!l.doc.has_overlined_border(l.header));
}

#[test]
fn test_border_goes_to_nearer_element() {
    let mut doc = Document::default();
    let upper = text_at(&mut doc, "upper", 0.0, 0.0, 100.0, 10.0);
    let lower = text_at(&mut doc, "lower", 12.0, 0.0, 100.0, 10.0);
    let list = attach_page(&mut doc, vec![upper, lower], true);
    doc.compute_neighbors(list).unwrap();

    doc.set_visual_border(upper, Side::Bottom, Some(11.5)).unwrap();
    doc.set_visual_border(lower, Side::Top, Some(11.5)).unwrap();
    assert!(!doc.has_underlined_border(upper));
    assert!(doc.has_overlined_border(lower));
}

#[test]
fn test_border_inside_element_is_ignored() {
    let mut l = header_layout();
    l.doc
        .set_visual_border(l.footer, Side::Bottom, Some(55.0))
        .unwrap();
    assert!(!l.doc.has_underlined_border(l.footer));
}

#[test]
fn test_plural_header() {
    let l = header_layout();
    assert!(l.doc.is_plural_header(l.header));
    assert!(!l.doc.is_plural_header(l.sub_one));
    assert!(!l.doc.is_plural_header(l.footer));
}

#[test]
fn test_plural_header_needs_text_on_each_sub_header() {
    let mut doc = Document::default();
    let header = text_at(&mut doc, "Header", 0.0, 0.0, 100.0, 10.0);
    let left = text_at(&mut doc, "No", 20.0, 0.0, 45.0, 10.0);
    let right = text_at(&mut doc, "Yes", 20.0, 55.0, 45.0, 10.0);
    let list = attach_page(&mut doc, vec![header, left, right], true);
    doc.compute_neighbors(list).unwrap();
    assert!(!doc.is_plural_header(header));
}

#[test]
fn test_clearing_context() {
    let mut l = header_layout();
    l.doc.clear_positional_context(l.header).unwrap();
    assert!(l.doc.get_positional_context(l.header).is_none());
    assert!(!l.doc.has_underlined_border(l.header));
    assert!(!l.doc.is_plural_header(l.header));
}
