//! Visitor over the closed set of attribute values.

use crate::arena::ListId;
use crate::units::Length;

use super::attribute::AttributeKind;

/// One method per attribute value kind; see [`AttributeValue::accept`].
///
/// [`AttributeValue::accept`]: super::AttributeValue::accept
pub trait AttributeVisitor {
    type Output;

    fn visit_position(&mut self, top: &Length, left: &Length) -> Self::Output;
    fn visit_size(&mut self, width: &Length, height: &Length) -> Self::Output;
    fn visit_text(&mut self, text: &str) -> Self::Output;
    fn visit_font_size(&mut self, size: &Length) -> Self::Output;
    fn visit_layout(&mut self, slots: &[AttributeKind]) -> Self::Output;
    /// Child slots: `PositionalContent`, `Content` and `Header`.
    fn visit_list(&mut self, kind: AttributeKind, list: ListId) -> Self::Output;
}
