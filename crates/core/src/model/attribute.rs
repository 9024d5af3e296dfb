//! Typed attributes attached to elements.

use crate::arena::{ElementId, ListId};
use crate::error::{FolioError, Result};
use crate::units::Length;

use super::element::Capability;
use super::visitor::AttributeVisitor;

/// Kind of an attribute. An element holds at most one attribute per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeKind {
    Position,
    Size,
    Text,
    FontSize,
    Layout,
    PositionalContent,
    Content,
    Header,
}

impl AttributeKind {
    /// Capability an element must declare to hold this kind.
    pub const fn holder(self) -> Capability {
        match self {
            AttributeKind::Position | AttributeKind::Size => Capability::Positional,
            AttributeKind::Text => Capability::Textual,
            AttributeKind::FontSize => Capability::Styled,
            AttributeKind::Layout => Capability::Configurable,
            AttributeKind::PositionalContent => Capability::PositionalContainer,
            AttributeKind::Content | AttributeKind::Header => Capability::LogicalContainer,
        }
    }

    /// True for kinds whose value is an owned child list.
    pub const fn is_child_slot(self) -> bool {
        matches!(
            self,
            AttributeKind::PositionalContent | AttributeKind::Content | AttributeKind::Header
        )
    }
}

/// Value of an attribute.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    Position { top: Length, left: Length },
    Size { width: Length, height: Length },
    Text(String),
    FontSize(Length),
    Layout(Vec<AttributeKind>),
    PositionalContent(ListId),
    Content(ListId),
    Header(ListId),
}

impl AttributeValue {
    pub const fn kind(&self) -> AttributeKind {
        match self {
            AttributeValue::Position { .. } => AttributeKind::Position,
            AttributeValue::Size { .. } => AttributeKind::Size,
            AttributeValue::Text(_) => AttributeKind::Text,
            AttributeValue::FontSize(_) => AttributeKind::FontSize,
            AttributeValue::Layout(_) => AttributeKind::Layout,
            AttributeValue::PositionalContent(_) => AttributeKind::PositionalContent,
            AttributeValue::Content(_) => AttributeKind::Content,
            AttributeValue::Header(_) => AttributeKind::Header,
        }
    }

    /// Child list held by this value, if it is a child slot.
    pub const fn list(&self) -> Option<ListId> {
        match self {
            AttributeValue::PositionalContent(list)
            | AttributeValue::Content(list)
            | AttributeValue::Header(list) => Some(*list),
            _ => None,
        }
    }

    /// Kind-specific validity check applied before a value is stored.
    pub fn validate(&self) -> Result<()> {
        let kind = self.kind();
        let invalid = |reason| Err(FolioError::InvalidValue { kind, reason });
        match self {
            AttributeValue::Position { top, left } => {
                if !top.is_finite() || !left.is_finite() {
                    return invalid("coordinates must be finite");
                }
            }
            AttributeValue::Size { width, height } => {
                if !width.is_positive() || !height.is_positive() {
                    return invalid("width and height must be positive");
                }
            }
            AttributeValue::FontSize(size) => {
                if !size.is_positive() {
                    return invalid("font size must be positive");
                }
            }
            AttributeValue::Layout(slots) => {
                if slots.iter().any(|slot| !slot.is_child_slot()) {
                    return invalid("layout may only name child slots");
                }
                for (i, slot) in slots.iter().enumerate() {
                    if slots[..i].contains(slot) {
                        return invalid("layout names a slot twice");
                    }
                }
            }
            AttributeValue::Text(_)
            | AttributeValue::PositionalContent(_)
            | AttributeValue::Content(_)
            | AttributeValue::Header(_) => {}
        }
        Ok(())
    }

    /// Dispatches to the visitor method for this value's kind.
    pub fn accept<V: AttributeVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            AttributeValue::Position { top, left } => visitor.visit_position(top, left),
            AttributeValue::Size { width, height } => visitor.visit_size(width, height),
            AttributeValue::Text(text) => visitor.visit_text(text),
            AttributeValue::FontSize(size) => visitor.visit_font_size(size),
            AttributeValue::Layout(slots) => visitor.visit_layout(slots),
            AttributeValue::PositionalContent(list)
            | AttributeValue::Content(list)
            | AttributeValue::Header(list) => visitor.visit_list(self.kind(), *list),
        }
    }
}

/// A validated attribute value, optionally bound to the element holding it.
#[derive(Clone, Debug)]
pub struct Attribute {
    value: AttributeValue,
    owner: Option<ElementId>,
}

impl Attribute {
    /// Validates `value` and wraps it in an unbound attribute.
    pub fn new(value: AttributeValue) -> Result<Self> {
        value.validate()?;
        Ok(Self { value, owner: None })
    }

    pub fn position(top: Length, left: Length) -> Result<Self> {
        Self::new(AttributeValue::Position { top, left })
    }

    pub fn size(width: Length, height: Length) -> Result<Self> {
        Self::new(AttributeValue::Size { width, height })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            value: AttributeValue::Text(text.into()),
            owner: None,
        }
    }

    pub fn font_size(size: Length) -> Result<Self> {
        Self::new(AttributeValue::FontSize(size))
    }

    pub fn layout(slots: Vec<AttributeKind>) -> Result<Self> {
        Self::new(AttributeValue::Layout(slots))
    }

    pub fn positional_content(list: ListId) -> Self {
        Self {
            value: AttributeValue::PositionalContent(list),
            owner: None,
        }
    }

    pub fn content(list: ListId) -> Self {
        Self {
            value: AttributeValue::Content(list),
            owner: None,
        }
    }

    pub fn header(list: ListId) -> Self {
        Self {
            value: AttributeValue::Header(list),
            owner: None,
        }
    }

    pub const fn kind(&self) -> AttributeKind {
        self.value.kind()
    }

    pub const fn value(&self) -> &AttributeValue {
        &self.value
    }

    /// Element holding this attribute, once attached.
    pub const fn owner(&self) -> Option<ElementId> {
        self.owner
    }

    /// Wraps an already validated value, bound to `owner`.
    pub(crate) fn bound(value: AttributeValue, owner: ElementId) -> Self {
        Self {
            value,
            owner: Some(owner),
        }
    }

    pub(crate) fn bind(mut self, owner: ElementId) -> Self {
        self.owner = Some(owner);
        self
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Attribute {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Unit;

    #[test]
    fn size_requires_positive_magnitudes() {
        let err = Attribute::size(Length::pt(0.0), Length::pt(10.0)).unwrap_err();
        assert_eq!(
            err,
            FolioError::InvalidValue {
                kind: AttributeKind::Size,
                reason: "width and height must be positive",
            }
        );
        assert!(Attribute::size(Length::pt(10.0), Length::pt(-2.0)).is_err());
        assert!(Attribute::font_size(Length::new(-12.0, Unit::Pt)).is_err());
    }

    #[test]
    fn font_size_round_trips_magnitude_and_unit() {
        let attr = Attribute::font_size(Length::new(12.0, Unit::Px)).unwrap();
        match attr.value() {
            AttributeValue::FontSize(size) => {
                assert_eq!(size.magnitude(), 12.0);
                assert_eq!(size.unit(), Unit::Px);
            }
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn layout_only_names_child_slots_once() {
        assert!(Attribute::layout(vec![AttributeKind::Content, AttributeKind::Header]).is_ok());
        assert!(Attribute::layout(vec![AttributeKind::Text]).is_err());
        assert!(Attribute::layout(vec![AttributeKind::Content, AttributeKind::Content]).is_err());
    }

    #[test]
    fn position_rejects_non_finite() {
        assert!(Attribute::position(Length::pt(f64::INFINITY), Length::pt(0.0)).is_err());
        assert!(Attribute::position(Length::pt(-5.0), Length::pt(0.0)).is_ok());
    }
}
