#![allow(dead_code)]

use folio_core::{Attribute, Document, ElementId, ElementKind, Length, ListId};

pub fn positioned(
    doc: &mut Document,
    kind: ElementKind,
    top: f64,
    left: f64,
    width: f64,
    height: f64,
) -> ElementId {
    let id = doc.new_element(kind);
    doc.add_attribute(id, Attribute::position(Length::pt(top), Length::pt(left)).unwrap())
        .unwrap();
    doc.add_attribute(id, Attribute::size(Length::pt(width), Length::pt(height)).unwrap())
        .unwrap();
    id
}

pub fn text_at(doc: &mut Document, text: &str, top: f64, left: f64, width: f64, height: f64) -> ElementId {
    let id = positioned(doc, ElementKind::Text, top, left, width, height);
    doc.add_attribute(id, Attribute::text(text)).unwrap();
    id
}

pub fn text(doc: &mut Document, text: &str) -> ElementId {
    let id = doc.new_element(ElementKind::Text);
    doc.add_attribute(id, Attribute::text(text)).unwrap();
    id
}

pub fn page_break(doc: &mut Document, top: f64) -> ElementId {
    positioned(doc, ElementKind::PageBreak, top, 0.0, 600.0, 1.0)
}

pub fn paragraph(doc: &mut Document, children: Vec<ElementId>) -> ElementId {
    let id = doc.new_element(ElementKind::Paragraph);
    let content = doc.new_list(children).unwrap();
    doc.add_attribute(id, Attribute::content(content)).unwrap();
    id
}

pub fn section(doc: &mut Document, header: Vec<ElementId>, content: Vec<ElementId>) -> ElementId {
    let id = doc.new_element(ElementKind::Section);
    let header = doc.new_list(header).unwrap();
    let content = doc.new_list(content).unwrap();
    doc.add_attribute(id, Attribute::header(header)).unwrap();
    doc.add_attribute(id, Attribute::content(content)).unwrap();
    id
}

/// Hangs `children` from the root as its positional content.
pub fn attach_page(doc: &mut Document, children: Vec<ElementId>, sort: bool) -> ListId {
    let list = doc.new_positional_list(children, sort).unwrap();
    let root = doc.root();
    doc.add_attribute(root, Attribute::positional_content(list))
        .unwrap();
    list
}
