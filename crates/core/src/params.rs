//! Document analysis parameters.
//!
//! Contains DocParams struct for controlling text reconstruction and the
//! geometric passes run over a document tree.

use crate::error::{FolioError, Result};

/// Parameters for text reconstruction and geometric classification.
#[derive(Debug, Clone, PartialEq)]
pub struct DocParams {
    /// Joins adjacent positional elements that sit on the same line.
    pub same_line_separator: String,

    /// Joins adjacent positional elements that sit on different lines.
    pub line_separator: String,

    /// Joins adjacent logical elements unless both are inline. Never empty.
    pub block_separator: String,

    /// A border closer to an element's edge than this fraction of its font
    /// size is treated as an underline or overline.
    pub border_gap_ratio: f64,

    /// Neighbors whose distances differ by less than this many points are
    /// considered tied.
    pub neighbor_tie_tolerance: f64,

    /// Minimum text length of each sub-header for plural header detection.
    pub plural_header_min_text_len: usize,
}

impl Default for DocParams {
    fn default() -> Self {
        Self {
            same_line_separator: " ".to_string(),
            line_separator: "\n".to_string(),
            block_separator: "\n".to_string(),
            border_gap_ratio: 0.5,
            neighbor_tie_tolerance: 1.0,
            plural_header_min_text_len: 3,
        }
    }
}

impl DocParams {
    /// Creates parameters with custom separators and default thresholds.
    ///
    /// Fails with [`FolioError::InvalidParameter`] if `block_separator` is
    /// empty.
    pub fn with_separators(
        same_line_separator: &str,
        line_separator: &str,
        block_separator: &str,
    ) -> Result<Self> {
        if block_separator.is_empty() {
            return Err(FolioError::InvalidParameter(
                "block_separator must not be empty",
            ));
        }
        Ok(Self {
            same_line_separator: same_line_separator.to_string(),
            line_separator: line_separator.to_string(),
            block_separator: block_separator.to_string(),
            ..Self::default()
        })
    }
}
