//! Document tree nodes.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::arena::{ElementId, ListId};
use crate::context::PositionalContext;
use crate::units::Length;

use super::attribute::{Attribute, AttributeKind, AttributeValue};

/// Requirement an element kind must satisfy to hold an attribute kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Carries position and size.
    Positional,
    /// Carries text.
    Textual,
    /// Carries font styling.
    Styled,
    /// Accepts a layout override.
    Configurable,
    /// Owns a geometry-sorted child list.
    PositionalContainer,
    /// Owns logical child lists.
    LogicalContainer,
}

/// Kind of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Document,
    Section,
    Paragraph,
    Text,
    FormField,
    Image,
    PageBreak,
}

impl ElementKind {
    pub const fn capabilities(self) -> &'static [Capability] {
        use Capability::*;
        match self {
            ElementKind::Document => &[PositionalContainer, Configurable],
            ElementKind::Section | ElementKind::Paragraph => {
                &[Positional, LogicalContainer, Configurable]
            }
            ElementKind::Text | ElementKind::FormField => &[Positional, Textual, Styled],
            ElementKind::Image | ElementKind::PageBreak => &[Positional],
        }
    }

    pub fn supports(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Child slots walked, in order, when no layout override is present.
    pub const fn default_layout(self) -> &'static [AttributeKind] {
        match self {
            ElementKind::Document => &[AttributeKind::PositionalContent],
            ElementKind::Section => &[AttributeKind::Header, AttributeKind::Content],
            ElementKind::Paragraph => &[AttributeKind::Content],
            ElementKind::Text
            | ElementKind::FormField
            | ElementKind::Image
            | ElementKind::PageBreak => &[],
        }
    }

    /// Inline elements join without a separator inside logical lists.
    pub const fn is_inline(self) -> bool {
        matches!(self, ElementKind::Text | ElementKind::FormField)
    }

    pub const fn is_form_field(self) -> bool {
        matches!(self, ElementKind::FormField)
    }

    pub const fn is_page_break(self) -> bool {
        matches!(self, ElementKind::PageBreak)
    }
}

/// How an element takes part in equality and hashing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IdentityMode {
    /// Compared by kind and attribute contents.
    #[default]
    Structural,
    /// Compared by handle, hashed by tree path.
    Identity,
}

/// Where an element sits: its containing list and index within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub list: ListId,
    pub index: usize,
}

pub type Layout = SmallVec<[AttributeKind; 2]>;

/// A node of the document tree.
#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) kind: ElementKind,
    pub(crate) attributes: IndexMap<AttributeKind, Attribute>,
    pub(crate) location: Option<Location>,
    pub(crate) context: Option<PositionalContext>,
    pub(crate) identity_mode: IdentityMode,
}

impl Element {
    pub(crate) fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            attributes: IndexMap::new(),
            location: None,
            context: None,
            identity_mode: IdentityMode::Structural,
        }
    }

    pub const fn id(&self) -> ElementId {
        self.id
    }

    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    pub const fn location(&self) -> Option<Location> {
        self.location
    }

    pub const fn identity_mode(&self) -> IdentityMode {
        self.identity_mode
    }

    pub fn get_attribute(&self, kind: AttributeKind) -> Option<&Attribute> {
        self.attributes.get(&kind)
    }

    /// Value of `kind`, or `default` when the element does not hold it.
    pub fn get_attribute_value<'a>(
        &'a self,
        kind: AttributeKind,
        default: &'a AttributeValue,
    ) -> &'a AttributeValue {
        self.attributes
            .get(&kind)
            .map(Attribute::value)
            .unwrap_or(default)
    }

    pub fn has_attribute(&self, kind: AttributeKind) -> bool {
        self.attributes.contains_key(&kind)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    /// Layout override if present, else the kind's default child slots.
    pub fn get_final_layout(&self) -> Layout {
        match self.attributes.get(&AttributeKind::Layout).map(Attribute::value) {
            Some(AttributeValue::Layout(slots)) => slots.iter().copied().collect(),
            _ => self.kind.default_layout().iter().copied().collect(),
        }
    }

    /// True when the element walks no child slots.
    pub fn is_terminal(&self) -> bool {
        self.get_final_layout().is_empty()
    }

    /// Child list held in `slot`, if any.
    pub fn get_element_list(&self, slot: AttributeKind) -> Option<ListId> {
        self.attributes.get(&slot).and_then(|a| a.value().list())
    }

    pub fn text(&self) -> Option<&str> {
        match self.attributes.get(&AttributeKind::Text).map(Attribute::value) {
            Some(AttributeValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// `(top, left)` in points.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self.attributes.get(&AttributeKind::Position).map(Attribute::value) {
            Some(AttributeValue::Position { top, left }) => Some((top.to_points(), left.to_points())),
            _ => None,
        }
    }

    /// `(width, height)` in points.
    pub fn size(&self) -> Option<(f64, f64)> {
        match self.attributes.get(&AttributeKind::Size).map(Attribute::value) {
            Some(AttributeValue::Size { width, height }) => {
                Some((width.to_points(), height.to_points()))
            }
            _ => None,
        }
    }

    pub fn font_size(&self) -> Option<Length> {
        match self.attributes.get(&AttributeKind::FontSize).map(Attribute::value) {
            Some(AttributeValue::FontSize(size)) => Some(*size),
            _ => None,
        }
    }

    pub fn get_positional_context(&self) -> Option<&PositionalContext> {
        self.context.as_ref()
    }
}
