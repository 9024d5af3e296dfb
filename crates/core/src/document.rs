//! The document arena.
//!
//! A [`Document`] owns every element, child list, vertical group and table
//! of one laid-out document. Elements are created attribute-less, receive
//! their attributes once, and are then wired into exactly one list.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::arena::{ElementId, ElementLookup, ElementStore, GroupId, ListId, TableId};
use crate::context::PositionalContext;
use crate::error::{FolioError, Result};
use crate::geometry::sort_in_reading_order;
use crate::group::ElementGroup;
use crate::list::{ElementList, Enclosing};
use crate::model::{
    Attribute, AttributeKind, AttributeValue, Element, ElementKind, IdentityMode, Location,
};
use crate::params::DocParams;
use crate::table::TabularElementGroup;

/// Arena holding one document tree and everything derived from it.
#[derive(Clone, Debug)]
pub struct Document {
    pub(crate) elements: ElementStore,
    pub(crate) lists: Vec<ElementList>,
    pub(crate) groups: Vec<ElementGroup>,
    pub(crate) tables: Vec<TabularElementGroup>,
    pub(crate) params: DocParams,
    root: ElementId,
}

impl Document {
    /// Creates an empty document whose root is a `Document` element.
    pub fn new(params: DocParams) -> Self {
        let mut elements = ElementStore::new();
        let root = elements.push(|id| Element::new(id, ElementKind::Document));
        Self {
            elements,
            lists: Vec::new(),
            groups: Vec::new(),
            tables: Vec::new(),
            params,
            root,
        }
    }

    pub const fn root(&self) -> ElementId {
        self.root
    }

    pub const fn params(&self) -> &DocParams {
        &self.params
    }

    /// Creates a detached element with no attributes.
    pub fn new_element(&mut self, kind: ElementKind) -> ElementId {
        self.elements.push(|id| Element::new(id, kind))
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn elements(&self) -> &ElementStore {
        &self.elements
    }

    pub fn list(&self, id: ListId) -> Option<&ElementList> {
        self.lists.get(id.index())
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.elements
            .get_mut(id)
            .ok_or(FolioError::UnknownHandle("element"))
    }

    pub(crate) fn list_mut(&mut self, id: ListId) -> Result<&mut ElementList> {
        self.lists
            .get_mut(id.index())
            .ok_or(FolioError::UnknownHandle("list"))
    }

    fn check_holder(element: &Element, attribute: &Attribute) -> Result<()> {
        let kind = attribute.kind();
        if !element.kind().supports(kind.holder()) {
            return Err(FolioError::Capability {
                element: element.kind(),
                attribute: kind,
            });
        }
        attribute.value().validate()
    }

    /// Attaches `attribute` to `element`.
    ///
    /// Child-slot attributes also bind their list to `element`: a
    /// `PositionalContent` slot takes a positional list, `Content` and
    /// `Header` take logical ones.
    pub fn add_attribute(&mut self, element: ElementId, attribute: Attribute) -> Result<()> {
        let kind = attribute.kind();
        {
            let target = self
                .elements
                .get(element)
                .ok_or(FolioError::UnknownHandle("element"))?;
            if target.has_attribute(kind) {
                return Err(FolioError::DuplicateAttribute { kind });
            }
            Self::check_holder(target, &attribute)?;
        }

        if let Some(list_id) = attribute.value().list() {
            let list = self.list_mut(list_id)?;
            if list.enclosing.is_some() {
                return Err(FolioError::AlreadyAttached("list"));
            }
            let wants_positional = kind == AttributeKind::PositionalContent;
            if list.is_positional() != wants_positional {
                return Err(FolioError::InvalidValue {
                    kind,
                    reason: "slot and list ordering do not match",
                });
            }
            list.enclosing = Some(Enclosing {
                owner: element,
                slot: kind,
            });
        }

        let target = self.element_mut(element)?;
        target.attributes.insert(kind, attribute.bind(element));
        Ok(())
    }

    /// Replaces the value of a non child-slot attribute, adding it when absent.
    pub fn set_attribute(&mut self, element: ElementId, attribute: Attribute) -> Result<()> {
        if attribute.kind().is_child_slot() {
            return Err(FolioError::UnsupportedMutation(
                "child slots are bound once and never replaced",
            ));
        }
        let target = self.element_mut(element)?;
        Self::check_holder(target, &attribute)?;
        target
            .attributes
            .insert(attribute.kind(), attribute.bind(element));
        Ok(())
    }

    pub fn get_attribute(&self, element: ElementId, kind: AttributeKind) -> Option<&Attribute> {
        self.elements.get(element)?.get_attribute(kind)
    }

    pub fn get_attribute_value<'a>(
        &'a self,
        element: ElementId,
        kind: AttributeKind,
        default: &'a AttributeValue,
    ) -> &'a AttributeValue {
        match self.elements.get(element) {
            Some(e) => e.get_attribute_value(kind, default),
            None => default,
        }
    }

    pub fn get_element_list(&self, element: ElementId, slot: AttributeKind) -> Option<&ElementList> {
        let id = self.elements.get(element)?.get_element_list(slot)?;
        self.list(id)
    }

    /// Children held in `slot`, empty when the slot is absent.
    pub fn get_element_list_elements(&self, element: ElementId, slot: AttributeKind) -> &[ElementId] {
        self.get_element_list(element, slot)
            .map(ElementList::elements)
            .unwrap_or(&[])
    }

    /// Owner of the attribute whose value is `element`'s containing list.
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        let location = self.elements.get(element)?.location()?;
        Some(self.list(location.list)?.enclosing?.owner)
    }

    fn check_detached(&self, children: &[ElementId]) -> Result<()> {
        let mut seen = FxHashSet::default();
        for &child in children {
            let element = self
                .elements
                .get(child)
                .ok_or(FolioError::UnknownHandle("element"))?;
            if element.location().is_some() || child == self.root || !seen.insert(child) {
                return Err(FolioError::AlreadyAttached("element"));
            }
        }
        Ok(())
    }

    pub(crate) fn place(&mut self, list: ListId, children: &[ElementId]) {
        for (index, &child) in children.iter().enumerate() {
            if let Some(element) = self.elements.get_mut(child) {
                element.location = Some(Location { list, index });
            }
        }
    }

    /// Creates a logical list owning `children` in the given order.
    pub fn new_list(&mut self, children: Vec<ElementId>) -> Result<ListId> {
        self.check_detached(&children)?;
        let id = ListId::new(self.lists.len());
        self.place(id, &children);
        self.lists.push(ElementList::logical(id, children));
        Ok(id)
    }

    /// Creates a positional list owning `children`.
    ///
    /// With `sort_by_position` the children are put in reading order first;
    /// otherwise the producer's order is trusted. Page breaks are indexed in
    /// both cases.
    pub fn new_positional_list(
        &mut self,
        mut children: Vec<ElementId>,
        sort_by_position: bool,
    ) -> Result<ListId> {
        self.check_detached(&children)?;
        if sort_by_position {
            sort_in_reading_order(&self.elements, &mut children);
        }
        let page_breaks: Vec<usize> = children
            .iter()
            .enumerate()
            .filter(|(_, id)| self.elements.lookup(**id).kind().is_page_break())
            .map(|(index, _)| index)
            .collect();

        let id = ListId::new(self.lists.len());
        debug!(
            list = id.index(),
            elements = children.len(),
            page_breaks = page_breaks.len(),
            sorted = sort_by_position,
            "built positional list"
        );
        self.place(id, &children);
        self.lists
            .push(ElementList::positional(id, children, page_breaks));
        Ok(id)
    }

    /// Appends a detached element to a logical list.
    pub fn append_element(&mut self, list: ListId, element: ElementId) -> Result<()> {
        let target = self.list(list).ok_or(FolioError::UnknownHandle("list"))?;
        if target.is_positional() {
            return Err(FolioError::UnsupportedMutation(
                "positional lists are fixed once indexed",
            ));
        }
        self.check_detached(&[element])?;
        let index = target.len();
        self.list_mut(list)?.elements.push(element);
        self.element_mut(element)?.location = Some(Location { list, index });
        Ok(())
    }

    /// Number of page breaks before `element` in `list`, or `None` if the
    /// element does not live in that list.
    pub fn get_page_break_number(&self, list: ListId, element: ElementId) -> Option<usize> {
        let location = self.elements.get(element)?.location()?;
        if location.list != list {
            return None;
        }
        Some(self.list(list)?.page_break_number_at(location.index))
    }

    /// Elements after page break `from` and before page break `to`.
    /// See [`ElementList::page_break_range`] for the ordinals.
    pub fn get_elements_between_page_breaks(
        &self,
        list: ListId,
        from: usize,
        to: usize,
    ) -> Result<&[ElementId]> {
        let list = self.list(list).ok_or(FolioError::UnknownHandle("list"))?;
        let range = list.page_break_range(from, to)?;
        Ok(&list.elements()[range])
    }

    pub fn get_elements_till_page_break(&self, list: ListId, to: usize) -> Result<&[ElementId]> {
        self.get_elements_between_page_breaks(list, 0, to)
    }

    pub fn get_elements_from_page_break(&self, list: ListId, from: usize) -> Result<&[ElementId]> {
        let end = self
            .list(list)
            .ok_or(FolioError::UnknownHandle("list"))?
            .page_breaks()
            .len()
            + 1;
        self.get_elements_between_page_breaks(list, from, end)
    }

    /// Registers a vertical group derived from `list`.
    pub fn add_vertical_group(&mut self, list: ListId, group: ElementGroup) -> Result<GroupId> {
        let id = GroupId::new(self.groups.len());
        self.list_mut(list)?.positional_mut()?.vertical_groups.push(id);
        self.groups.push(group);
        Ok(id)
    }

    pub fn group(&self, id: GroupId) -> Option<&ElementGroup> {
        self.groups.get(id.index())
    }

    pub fn get_vertical_groups(&self, list: ListId) -> &[GroupId] {
        self.list(list)
            .map(ElementList::get_vertical_groups)
            .unwrap_or(&[])
    }

    pub fn get_tabular_groups(&self, list: ListId) -> &[TableId] {
        self.list(list)
            .map(ElementList::get_tabular_groups)
            .unwrap_or(&[])
    }

    pub fn set_identity_mode(&mut self, element: ElementId, mode: IdentityMode) -> Result<()> {
        self.element_mut(element)?.identity_mode = mode;
        Ok(())
    }

    pub fn get_positional_context(&self, element: ElementId) -> Option<&PositionalContext> {
        self.elements.get(element)?.get_positional_context()
    }

    /// Context of `element`, created empty on first access.
    pub fn positional_context_mut(&mut self, element: ElementId) -> Result<&mut PositionalContext> {
        Ok(self.element_mut(element)?.context.get_or_insert_with(Default::default))
    }

    pub fn clear_positional_context(&mut self, element: ElementId) -> Result<()> {
        self.element_mut(element)?.context = None;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DocParams::default())
    }
}

impl ElementLookup for Document {
    fn lookup(&self, id: ElementId) -> &Element {
        self.elements.lookup(id)
    }
}
