//! Deep cloning of subtrees.
//!
//! A clone runs in two phases over one [`ClonePass`]. The first copies the
//! owning tree: elements, their attributes and the lists they own. The
//! second copies what later passes derived from that tree (vertical groups,
//! tables, positional contexts), remapping every handle through the pass'
//! memo. An element reached twice, say through its list and through a table
//! cell, therefore resolves to one clone.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::arena::{ElementId, GroupId, ListId, TableId};
use crate::context::PositionalContext;
use crate::document::Document;
use crate::error::{FolioError, Result};
use crate::list::{ElementList, Enclosing};
use crate::model::{Attribute, AttributeKind, AttributeValue, AttributeVisitor};
use crate::units::Length;

/// Memo tables of a single clone operation.
#[derive(Debug, Default)]
pub struct ClonePass {
    elements: FxHashMap<ElementId, ElementId>,
    lists: FxHashMap<ListId, ListId>,
    groups: FxHashMap<GroupId, GroupId>,
    tables: FxHashMap<TableId, TableId>,
    positional_lists: Vec<(ListId, ListId)>,
}

impl ClonePass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone made of `source` in this pass, if any.
    pub fn current_clone(&self, source: ElementId) -> Option<ElementId> {
        self.elements.get(&source).copied()
    }

    pub fn current_list_clone(&self, source: ListId) -> Option<ListId> {
        self.lists.get(&source).copied()
    }

    pub fn current_table_clone(&self, source: TableId) -> Option<TableId> {
        self.tables.get(&source).copied()
    }

    fn element_or_shared(&self, source: ElementId) -> ElementId {
        self.current_clone(source).unwrap_or(source)
    }

    /// Clones `source` and everything it owns, once per pass.
    ///
    /// The clone is detached: it sits in no list until the caller places it.
    pub fn clone_element(&mut self, doc: &mut Document, source: ElementId) -> ElementId {
        if let Some(clone) = self.current_clone(source) {
            return clone;
        }
        let Some(original) = doc.element(source).cloned() else {
            return source;
        };
        let clone = doc.new_element(original.kind());
        self.elements.insert(source, clone);

        for attribute in original.attributes() {
            let mut cloner = ListCloner {
                pass: &mut *self,
                doc: &mut *doc,
            };
            let value = attribute.value().accept(&mut cloner);
            if let Some(list) = value.list() {
                if let Some(cloned) = doc.lists.get_mut(list.index()) {
                    cloned.enclosing = Some(Enclosing {
                        owner: clone,
                        slot: value.kind(),
                    });
                }
            }
            if let Some(target) = doc.elements.get_mut(clone) {
                target
                    .attributes
                    .insert(value.kind(), Attribute::bound(value, clone));
            }
        }
        if let Some(target) = doc.elements.get_mut(clone) {
            target.identity_mode = original.identity_mode();
        }
        clone
    }

    fn clone_list(&mut self, doc: &mut Document, source: ListId) -> ListId {
        if let Some(&clone) = self.lists.get(&source) {
            return clone;
        }
        let Some(original) = doc.list(source).cloned() else {
            return source;
        };
        let children: Vec<ElementId> = original
            .elements()
            .iter()
            .map(|&child| self.clone_element(doc, child))
            .collect();

        let id = ListId::new(doc.lists.len());
        doc.place(id, &children);
        let list = if original.is_positional() {
            self.positional_lists.push((source, id));
            ElementList::positional(id, children, original.page_breaks().to_vec())
        } else {
            ElementList::logical(id, children)
        };
        doc.lists.push(list);
        self.lists.insert(source, id);
        id
    }

    /// Second phase: copies the registries of every cloned positional list
    /// and the context of every cloned element.
    pub fn finish(&mut self, doc: &mut Document) {
        for (source, clone) in std::mem::take(&mut self.positional_lists) {
            let (groups, tables) = match doc.list(source) {
                Some(list) => (
                    list.get_vertical_groups().to_vec(),
                    list.get_tabular_groups().to_vec(),
                ),
                None => continue,
            };
            for group in groups {
                let copy = self.clone_group(doc, group);
                if let Some(index) = doc.lists[clone.index()].positional.as_mut() {
                    index.vertical_groups.push(copy);
                }
            }
            for table in tables {
                let copy = self.clone_table(doc, table, clone);
                if let Some(index) = doc.lists[clone.index()].positional.as_mut() {
                    index.tables.push(copy);
                }
            }
        }

        let pairs: Vec<(ElementId, ElementId)> =
            self.elements.iter().map(|(&s, &c)| (s, c)).collect();
        for (source, clone) in pairs {
            let Some(context) = doc.element(source).and_then(|e| e.get_positional_context()) else {
                continue;
            };
            let remapped = self.remap_context(context);
            if let Some(target) = doc.elements.get_mut(clone) {
                target.context = Some(remapped);
            }
        }
    }

    fn clone_group(&mut self, doc: &mut Document, source: GroupId) -> GroupId {
        if let Some(&clone) = self.groups.get(&source) {
            return clone;
        }
        let copy = doc.groups[source.index()].remap(|e| self.element_or_shared(e));
        let id = GroupId::new(doc.groups.len());
        doc.groups.push(copy);
        self.groups.insert(source, id);
        id
    }

    fn clone_table(&mut self, doc: &mut Document, source: TableId, owner: ListId) -> TableId {
        if let Some(&clone) = self.tables.get(&source) {
            return clone;
        }
        let id = TableId::new(doc.tables.len());
        let copy = doc.tables[source.index()].remapped(id, owner, |e| self.element_or_shared(e));
        doc.tables.push(copy);
        self.tables.insert(source, id);
        id
    }

    fn remap_context(&self, context: &PositionalContext) -> PositionalContext {
        let mut copy = context.clone();
        copy.neighbors = context
            .neighbors
            .each_ref()
            .map(|group| group.remap(|e| self.element_or_shared(e)));
        copy.shadowed = context
            .shadowed
            .map(|shadowed| shadowed.map(|e| self.element_or_shared(e)));
        copy.table = context.table.map(|mut coordinates| {
            coordinates.table = self
                .current_table_clone(coordinates.table)
                .unwrap_or(coordinates.table);
            coordinates
        });
        copy
    }
}

/// Rebuilds an attribute value, cloning the lists child slots hold.
struct ListCloner<'p, 'd> {
    pass: &'p mut ClonePass,
    doc: &'d mut Document,
}

impl AttributeVisitor for ListCloner<'_, '_> {
    type Output = AttributeValue;

    fn visit_position(&mut self, top: &Length, left: &Length) -> AttributeValue {
        AttributeValue::Position {
            top: *top,
            left: *left,
        }
    }

    fn visit_size(&mut self, width: &Length, height: &Length) -> AttributeValue {
        AttributeValue::Size {
            width: *width,
            height: *height,
        }
    }

    fn visit_text(&mut self, text: &str) -> AttributeValue {
        AttributeValue::Text(text.to_string())
    }

    fn visit_font_size(&mut self, size: &Length) -> AttributeValue {
        AttributeValue::FontSize(*size)
    }

    fn visit_layout(&mut self, slots: &[AttributeKind]) -> AttributeValue {
        AttributeValue::Layout(slots.to_vec())
    }

    fn visit_list(&mut self, kind: AttributeKind, list: ListId) -> AttributeValue {
        let cloned = self.pass.clone_list(self.doc, list);
        match kind {
            AttributeKind::PositionalContent => AttributeValue::PositionalContent(cloned),
            AttributeKind::Header => AttributeValue::Header(cloned),
            _ => AttributeValue::Content(cloned),
        }
    }
}

impl Document {
    /// Deep-clones `source` and its subtree, derived groups and tables
    /// included. The returned clone is detached.
    pub fn deep_clone(&mut self, source: ElementId) -> Result<ElementId> {
        if self.element(source).is_none() {
            return Err(FolioError::UnknownHandle("element"));
        }
        let mut pass = ClonePass::new();
        let clone = pass.clone_element(self, source);
        pass.finish(self);
        debug!(
            source = source.index(),
            clone = clone.index(),
            elements = pass.elements.len(),
            tables = pass.tables.len(),
            "cloned subtree"
        );
        Ok(clone)
    }

    /// Deep-clones `source` and appends the clone to the logical `list`.
    pub fn clone_into_list(&mut self, source: ElementId, list: ListId) -> Result<ElementId> {
        let clone = self.deep_clone(source)?;
        self.append_element(list, clone)?;
        Ok(clone)
    }
}
