mod common;

use std::cmp::Ordering;

use folio_core::geometry::{
    compare_by_horizontal_alignment, compare_by_horizontal_and_then_vertical_alignment,
    compare_by_vertical_alignment,
};
use folio_core::{
    Attribute, AttributeKind, AttributeValue, Document, ElementKind, FolioError, Length, Unit,
};

use common::{attach_page, page_break, paragraph, positioned, text, text_at};

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn test_size_attribute_validity() {
    assert!(Attribute::size(Length::pt(0.0), Length::pt(12.0)).is_err());
    assert!(Attribute::size(Length::pt(12.0), Length::pt(-1.0)).is_err());

    let mut doc = Document::default();
    let id = doc.new_element(ElementKind::Text);
    let size = Attribute::font_size(Length::new(12.0, Unit::Pt)).unwrap();
    doc.add_attribute(id, size).unwrap();

    let stored = doc.element(id).unwrap().font_size().unwrap();
    assert_eq!(stored.magnitude(), 12.0);
    assert_eq!(stored.unit(), Unit::Pt);
    assert_eq!(
        doc.get_attribute(id, AttributeKind::FontSize).unwrap().owner(),
        Some(id)
    );
}

#[test]
fn test_capability_is_checked() {
    let mut doc = Document::default();
    let image = doc.new_element(ElementKind::Image);
    let err = doc.add_attribute(image, Attribute::text("alt")).unwrap_err();
    assert_eq!(
        err,
        FolioError::Capability {
            element: ElementKind::Image,
            attribute: AttributeKind::Text,
        }
    );

    let root = doc.root();
    let err = doc
        .add_attribute(root, Attribute::size(Length::pt(1.0), Length::pt(1.0)).unwrap())
        .unwrap_err();
    assert!(matches!(err, FolioError::Capability { .. }));
}

#[test]
fn test_duplicate_attribute_rejected() {
    let mut doc = Document::default();
    let id = text(&mut doc, "first");
    let err = doc.add_attribute(id, Attribute::text("second")).unwrap_err();
    assert_eq!(
        err,
        FolioError::DuplicateAttribute {
            kind: AttributeKind::Text
        }
    );
    assert_eq!(doc.element(id).unwrap().text(), Some("first"));
}

#[test]
fn test_set_attribute_replaces_values_but_not_slots() {
    let mut doc = Document::default();
    let id = text(&mut doc, "first");
    doc.set_attribute(id, Attribute::text("second")).unwrap();
    assert_eq!(doc.element(id).unwrap().text(), Some("second"));

    let para = paragraph(&mut doc, vec![]);
    let other = doc.new_list(vec![]).unwrap();
    let err = doc
        .set_attribute(para, Attribute::content(other))
        .unwrap_err();
    assert!(matches!(err, FolioError::UnsupportedMutation(_)));
}

#[test]
fn test_attribute_value_default() {
    let mut doc = Document::default();
    let id = doc.new_element(ElementKind::Text);
    let fallback = AttributeValue::Text("none".to_string());
    assert_eq!(
        doc.get_attribute_value(id, AttributeKind::Text, &fallback),
        &fallback
    );
}

// =============================================================================
// Lists and ownership
// =============================================================================

#[test]
fn test_slot_must_match_list_ordering() {
    let mut doc = Document::default();
    let logical = doc.new_list(vec![]).unwrap();
    let root = doc.root();
    let err = doc
        .add_attribute(root, Attribute::positional_content(logical))
        .unwrap_err();
    assert!(matches!(
        err,
        FolioError::InvalidValue {
            kind: AttributeKind::PositionalContent,
            ..
        }
    ));
}

#[test]
fn test_elements_and_lists_attach_once() {
    let mut doc = Document::default();
    let t = text(&mut doc, "x");
    let list = doc.new_list(vec![t]).unwrap();
    assert_eq!(
        doc.new_list(vec![t]).unwrap_err(),
        FolioError::AlreadyAttached("element")
    );

    let a = doc.new_element(ElementKind::Paragraph);
    let b = doc.new_element(ElementKind::Paragraph);
    doc.add_attribute(a, Attribute::content(list)).unwrap();
    assert_eq!(
        doc.add_attribute(b, Attribute::content(list)).unwrap_err(),
        FolioError::AlreadyAttached("list")
    );

    let loose = text(&mut doc, "y");
    assert!(doc.new_list(vec![loose, loose]).is_err());
}

#[test]
fn test_parent_is_derived_from_enclosing_slot() {
    let mut doc = Document::default();
    let leaf = text(&mut doc, "leaf");
    let para = paragraph(&mut doc, vec![leaf]);
    attach_page(&mut doc, vec![para], false);

    assert_eq!(doc.parent(leaf), Some(para));
    assert_eq!(doc.parent(para), Some(doc.root()));
    assert_eq!(doc.parent(doc.root()), None);
    assert_eq!(
        doc.get_element_list_elements(para, AttributeKind::Content),
        &[leaf]
    );
    assert!(doc
        .get_element_list_elements(para, AttributeKind::Header)
        .is_empty());
}

#[test]
fn test_append_to_positional_list_rejected() {
    let mut doc = Document::default();
    let a = text_at(&mut doc, "a", 0.0, 0.0, 10.0, 10.0);
    let list = attach_page(&mut doc, vec![a], true);
    let b = text_at(&mut doc, "b", 20.0, 0.0, 10.0, 10.0);
    assert!(matches!(
        doc.append_element(list, b).unwrap_err(),
        FolioError::UnsupportedMutation(_)
    ));
}

// =============================================================================
// Page breaks
// =============================================================================

#[test]
fn test_page_break_numbers_and_ranges() {
    let mut doc = Document::default();
    let mut elems = Vec::new();
    for i in 0..10 {
        let top = i as f64 * 10.0;
        let id = if i == 3 || i == 7 {
            page_break(&mut doc, top)
        } else {
            text_at(&mut doc, &format!("e{i}"), top, 0.0, 50.0, 5.0)
        };
        elems.push(id);
    }
    let list = doc.new_positional_list(elems.clone(), false).unwrap();
    assert_eq!(doc.list(list).unwrap().page_breaks(), &[3, 7]);

    assert_eq!(doc.get_page_break_number(list, elems[5]), Some(1));
    assert_eq!(doc.get_page_break_number(list, elems[0]), Some(0));
    assert_eq!(doc.get_page_break_number(list, elems[9]), Some(2));

    assert_eq!(
        doc.get_elements_between_page_breaks(list, 1, 2).unwrap(),
        &elems[4..7]
    );
    assert_eq!(doc.get_elements_till_page_break(list, 1).unwrap(), &elems[0..3]);
    assert_eq!(doc.get_elements_from_page_break(list, 2).unwrap(), &elems[8..10]);
    assert_eq!(
        doc.get_elements_between_page_breaks(list, 0, 4).unwrap_err(),
        FolioError::PageBreakOutOfRange { ordinal: 4, max: 3 }
    );
}

#[test]
fn test_page_breaks_indexed_after_sorting() {
    let mut doc = Document::default();
    let mut elems = Vec::new();
    for i in (0..10).rev() {
        let top = i as f64 * 10.0;
        let id = if i == 3 || i == 7 {
            page_break(&mut doc, top)
        } else {
            text_at(&mut doc, &format!("e{i}"), top, 0.0, 50.0, 5.0)
        };
        elems.push(id);
    }
    let list = doc.new_positional_list(elems, true).unwrap();
    assert_eq!(doc.list(list).unwrap().page_breaks(), &[3, 7]);
}

// =============================================================================
// Geometry
// =============================================================================

#[test]
fn test_horizontal_alignment_is_reflexive() {
    let mut doc = Document::default();
    let ids = [
        text_at(&mut doc, "a", 0.0, 0.0, 50.0, 10.0),
        positioned(&mut doc, ElementKind::FormField, 3.0, 60.0, 8.0, 8.0),
        positioned(&mut doc, ElementKind::Image, 100.0, 0.0, 200.0, 120.0),
        text(&mut doc, "unplaced"),
    ];
    for id in ids {
        let e = doc.element(id).unwrap();
        assert_eq!(compare_by_horizontal_alignment(e, e), Ordering::Equal);
    }
}

#[test]
fn test_form_fields_need_real_overlap() {
    let mut doc = Document::default();
    let label = text_at(&mut doc, "label", 0.0, 0.0, 50.0, 10.0);
    let field = positioned(&mut doc, ElementKind::FormField, 9.9, 60.0, 10.0, 10.0);
    let brushing = text_at(&mut doc, "next", 9.9, 60.0, 10.0, 10.0);

    let label = doc.element(label).unwrap();
    let field = doc.element(field).unwrap();
    let brushing = doc.element(brushing).unwrap();
    assert_eq!(compare_by_horizontal_alignment(label, field), Ordering::Less);
    assert_eq!(compare_by_horizontal_alignment(label, brushing), Ordering::Equal);
}

#[test]
fn test_vertical_alignment_tolerates_half_width() {
    let mut doc = Document::default();
    let a = text_at(&mut doc, "a", 0.0, 0.0, 20.0, 10.0);
    let b = text_at(&mut doc, "b", 20.0, 8.0, 40.0, 10.0);
    let c = text_at(&mut doc, "c", 40.0, 30.0, 40.0, 10.0);
    let (a, b, c) = (
        doc.element(a).unwrap(),
        doc.element(b).unwrap(),
        doc.element(c).unwrap(),
    );
    assert_eq!(compare_by_vertical_alignment(a, b), Ordering::Equal);
    assert_eq!(compare_by_vertical_alignment(a, c), Ordering::Less);
    assert_eq!(compare_by_vertical_alignment(c, a), Ordering::Greater);
}

#[test]
fn test_sorted_list_is_pairwise_non_decreasing() {
    let mut doc = Document::default();
    let a = text_at(&mut doc, "A", 0.0, 100.0, 50.0, 10.0);
    let b = text_at(&mut doc, "B", 0.0, 0.0, 50.0, 10.0);
    let c = text_at(&mut doc, "C", 20.0, 0.0, 50.0, 10.0);
    let d = text_at(&mut doc, "D", 5.0, 200.0, 50.0, 10.0);
    let e = text_at(&mut doc, "E", 40.0, 0.0, 50.0, 10.0);
    let list = attach_page(&mut doc, vec![a, b, c, d, e], true);

    let sorted = doc.list(list).unwrap().elements();
    assert_eq!(sorted, &[b, a, d, c, e]);
    for pair in sorted.windows(2) {
        let ord = compare_by_horizontal_and_then_vertical_alignment(
            doc.element(pair[0]).unwrap(),
            doc.element(pair[1]).unwrap(),
        );
        assert_ne!(ord, Ordering::Greater);
    }
    for (index, &id) in sorted.iter().enumerate() {
        assert_eq!(doc.element(id).unwrap().location().unwrap().index, index);
    }
}
