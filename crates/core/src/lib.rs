//! folio - An in-memory document tree for laid-out pages.
//!
//! Front ends decode pages into elements carrying typed attributes
//! (position, size, text, child lists). The tree then supports geometric
//! reading order, page-break range queries, neighbor and border analysis,
//! table grids, depth-first traversal, text reconstruction and deep cloning.

pub mod arena;
pub mod clone;
pub mod context;
pub mod document;
pub mod error;
pub mod geometry;
pub mod group;
pub mod list;
pub mod model;
pub mod params;
pub mod table;
mod text;
pub mod traversal;
pub mod units;

pub use arena::{ElementId, ElementLookup, GroupId, ListId, TableId};
pub use clone::ClonePass;
pub use context::{PositionalContext, Side, TableCoordinates};
pub use document::Document;
pub use error::{FolioError, Result};
pub use group::ElementGroup;
pub use list::ElementList;
pub use model::{
    Attribute, AttributeKind, AttributeValue, Element, ElementKey, ElementKind, IdentityMode,
};
pub use params::DocParams;
pub use table::{BorderType, GridLine, GridType, TabularCellElementGroup, TabularElementGroup};
pub use traversal::{Direction, ElementIterable};
pub use units::{Length, Unit};
