//! Handles into a document arena.
//!
//! Elements, lists, groups and tables live in flat vectors owned by a
//! [`Document`](crate::document::Document). Cross references between them
//! (parent links, table membership, neighbors) are plain handles, so the
//! cyclic reference graph of a laid-out page never needs shared ownership.

use crate::model::Element;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(index: usize) -> Self {
                Self(index as u32)
            }

            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// Handle of an element.
    ElementId
);
arena_id!(
    /// Handle of an owned child list.
    ListId
);
arena_id!(
    /// Handle of a registered vertical element group.
    GroupId
);
arena_id!(
    /// Handle of a registered table.
    TableId
);

/// Read access to elements by handle.
///
/// Implemented by the document itself and by its element store, so that
/// passes holding a mutable borrow on one part of the document (a table,
/// say) can still resolve element geometry through the other.
pub trait ElementLookup {
    fn lookup(&self, id: ElementId) -> &Element;
}

/// Flat storage of every element of a document.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, build: impl FnOnce(ElementId) -> Element) -> ElementId {
        let id = ElementId::new(self.elements.len());
        self.elements.push(build(id));
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }
}

impl ElementLookup for ElementStore {
    fn lookup(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }
}
