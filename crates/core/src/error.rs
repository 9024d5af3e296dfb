//! Error types for folio document trees.

use thiserror::Error;

use crate::model::{AttributeKind, ElementKind};

/// Primary error type for document tree operations.
///
/// Every variant is a precondition failure raised by the surrounding
/// pipeline; none of them describe a state the tree can recover from.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FolioError {
    #[error("element already holds a {kind:?} attribute")]
    DuplicateAttribute { kind: AttributeKind },

    #[error("{element:?} elements cannot hold a {attribute:?} attribute")]
    Capability {
        element: ElementKind,
        attribute: AttributeKind,
    },

    #[error("invalid {kind:?} value: {reason}")]
    InvalidValue {
        kind: AttributeKind,
        reason: &'static str,
    },

    #[error("unsupported mutation: {0}")]
    UnsupportedMutation(&'static str),

    #[error("index ({row}, {column}) out of bounds for {rows}x{columns} grid")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("page break ordinal {ordinal} out of range 0..={max}")]
    PageBreakOutOfRange { ordinal: usize, max: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("{0} is already attached to a list")]
    AlreadyAttached(&'static str),

    #[error("unknown {0} handle")]
    UnknownHandle(&'static str),
}

/// Convenience Result type alias for FolioError.
pub type Result<T> = std::result::Result<T, FolioError>;
