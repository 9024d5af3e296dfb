//! Text reconstruction over the element tree.

use std::cmp::Ordering;

use crate::arena::{ElementId, ElementLookup, ListId};
use crate::document::Document;
use crate::geometry::compare_by_horizontal_alignment;

impl Document {
    /// Concatenated text of `element` and its descendants in layout order.
    ///
    /// Terminal elements contribute their Text attribute. Child slots are
    /// joined with the block separator; inside a slot, see
    /// [`Document::join_positional`] and [`Document::join_logical`].
    pub fn get_text_str(&self, element: ElementId) -> String {
        let Some(node) = self.element(element) else {
            return String::new();
        };
        let layout = node.get_final_layout();
        if layout.is_empty() {
            return node.text().unwrap_or_default().to_string();
        }

        let mut out = String::new();
        for slot in layout {
            let Some(list_id) = node.get_element_list(slot) else {
                continue;
            };
            let text = self.list_text(list_id);
            if text.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push_str(&self.params.block_separator);
            }
            out.push_str(&text);
        }
        out
    }

    fn list_text(&self, list: ListId) -> String {
        match self.list(list) {
            Some(l) if l.is_positional() => self.join_positional(l.elements()),
            Some(l) => self.join_logical(l.elements()),
            None => String::new(),
        }
    }

    /// Joins element texts by geometry: the same-line separator between
    /// elements sharing a line, the line separator otherwise.
    pub fn join_positional(&self, ids: &[ElementId]) -> String {
        self.join_with(ids, |doc, prev, next| {
            let same_line = compare_by_horizontal_alignment(doc.lookup(prev), doc.lookup(next))
                == Ordering::Equal;
            if same_line {
                doc.params.same_line_separator.as_str()
            } else {
                doc.params.line_separator.as_str()
            }
        })
    }

    /// Joins element texts logically: nothing between two inline elements,
    /// the block separator otherwise.
    pub fn join_logical(&self, ids: &[ElementId]) -> String {
        self.join_with(ids, |doc, prev, next| {
            let inline = doc.lookup(prev).kind().is_inline() && doc.lookup(next).kind().is_inline();
            if inline {
                ""
            } else {
                doc.params.block_separator.as_str()
            }
        })
    }

    fn join_with<'a>(
        &'a self,
        ids: &[ElementId],
        separator: impl Fn(&'a Document, ElementId, ElementId) -> &'a str,
    ) -> String {
        let mut out = String::new();
        let mut prev: Option<ElementId> = None;
        for &id in ids {
            let text = self.get_text_str(id);
            if text.is_empty() {
                continue;
            }
            if let Some(p) = prev {
                out.push_str(separator(self, p, id));
            }
            out.push_str(&text);
            prev = Some(id);
        }
        out
    }
}
