//! Owned child lists.
//!
//! A logical [`ElementList`] keeps elements in the order the producer gave
//! them. A positional list fixes a geometric reading order once, at
//! construction, and indexes its page breaks so page ranges resolve with a
//! binary search. It also carries registries of the derived groupings
//! (vertical groups, tables) later passes attach to it.

use std::ops::Range;

use crate::arena::{ElementId, GroupId, ListId, TableId};
use crate::error::{FolioError, Result};
use crate::model::AttributeKind;

/// The attribute a list is the value of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Enclosing {
    pub owner: ElementId,
    pub slot: AttributeKind,
}

/// Extra state owned by a positional list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionalIndex {
    /// Indices of page-break elements, strictly increasing.
    pub(crate) page_breaks: Vec<usize>,
    pub(crate) vertical_groups: Vec<GroupId>,
    pub(crate) tables: Vec<TableId>,
}

/// Ordered sequence of sibling elements.
#[derive(Clone, Debug)]
pub struct ElementList {
    pub(crate) id: ListId,
    pub(crate) elements: Vec<ElementId>,
    pub(crate) enclosing: Option<Enclosing>,
    pub(crate) positional: Option<PositionalIndex>,
}

impl ElementList {
    pub(crate) fn logical(id: ListId, elements: Vec<ElementId>) -> Self {
        Self {
            id,
            elements,
            enclosing: None,
            positional: None,
        }
    }

    pub(crate) fn positional(id: ListId, elements: Vec<ElementId>, page_breaks: Vec<usize>) -> Self {
        Self {
            id,
            elements,
            enclosing: None,
            positional: Some(PositionalIndex {
                page_breaks,
                ..PositionalIndex::default()
            }),
        }
    }

    pub const fn id(&self) -> ListId {
        self.id
    }

    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<ElementId> {
        self.elements.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Owner element and slot this list hangs from.
    pub const fn enclosing(&self) -> Option<Enclosing> {
        self.enclosing
    }

    pub const fn is_positional(&self) -> bool {
        self.positional.is_some()
    }

    pub fn page_breaks(&self) -> &[usize] {
        self.positional
            .as_ref()
            .map(|p| p.page_breaks.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_vertical_groups(&self) -> &[GroupId] {
        self.positional
            .as_ref()
            .map(|p| p.vertical_groups.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_tabular_groups(&self) -> &[TableId] {
        self.positional
            .as_ref()
            .map(|p| p.tables.as_slice())
            .unwrap_or(&[])
    }

    /// Number of page breaks strictly before `index`.
    pub fn page_break_number_at(&self, index: usize) -> usize {
        self.page_breaks().partition_point(|&pb| pb < index)
    }

    /// Index range between two page-break ordinals.
    ///
    /// Ordinal 0 is the start of the list, `1..=N` the N page breaks and
    /// `N + 1` the end of the list. The range starts right after break
    /// `from` and stops right before break `to`.
    pub fn page_break_range(&self, from: usize, to: usize) -> Result<Range<usize>> {
        let breaks = self.page_breaks();
        let max = breaks.len() + 1;
        for ordinal in [from, to] {
            if ordinal > max {
                return Err(FolioError::PageBreakOutOfRange { ordinal, max });
            }
        }
        if from > to {
            return Err(FolioError::PageBreakOutOfRange { ordinal: from, max: to });
        }
        let start = if from == 0 {
            0
        } else if from == max {
            self.elements.len()
        } else {
            breaks[from - 1] + 1
        };
        let end = if to == max {
            self.elements.len()
        } else if to == 0 {
            0
        } else {
            breaks[to - 1]
        };
        Ok(start..end.max(start))
    }

    pub(crate) fn positional_mut(&mut self) -> Result<&mut PositionalIndex> {
        self.positional
            .as_mut()
            .ok_or(FolioError::UnsupportedMutation(
                "derived groups attach to positional lists only",
            ))
    }
}
