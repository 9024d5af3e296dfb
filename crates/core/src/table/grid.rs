//! Border classification of table rows and columns.

use itertools::Itertools;

use crate::context::Side;

use super::{TabularCellElementGroup, TabularElementGroup};

/// How consistently the non-empty cells of a grid line carry a border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BorderType {
    ConsistentPresent,
    ConsistentAbsent,
    Inconsistent,
}

/// A whole row or column of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridLine {
    Row(usize),
    Column(usize),
}

/// Which rulings a table is required to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridType {
    /// Ruled between rows and between columns.
    RowAndColumn,
    /// Ruled between rows.
    Row,
    /// Ruled between columns.
    Column,
    Any,
}

impl TabularElementGroup {
    /// True if the cell across the edge on `side` of `(row, column)` records
    /// a rule on that edge. Only top and bottom rules are shared this way.
    fn rule_across(&self, row: usize, column: usize, side: Side) -> bool {
        match side {
            Side::Top => row > 0 && self.rows[row - 1][column].has_border(Side::Bottom),
            Side::Bottom => {
                row + 1 < self.rows.len() && self.rows[row + 1][column].has_border(Side::Top)
            }
            Side::Left | Side::Right => false,
        }
    }

    /// True if the cell at `(row, column)` shows a border on `side`, also
    /// counting a top or bottom rule recorded only by the cell across it.
    fn shows_border(&self, row: usize, column: usize, side: Side) -> bool {
        self.rows[row][column].has_border(side) || self.rule_across(row, column, side)
    }

    /// Classifies `(cell, shows_border)` pairs. Empty cells are skipped; the
    /// first non-empty cell fixes the expectation and the first disagreeing
    /// one ends the scan as inconsistent. A line with no content counts as
    /// absent.
    fn classify<'a>(
        cells: impl IntoIterator<Item = (&'a TabularCellElementGroup, bool)>,
    ) -> BorderType {
        let mut seen: Option<BorderType> = None;
        for (cell, shown) in cells {
            if cell.is_empty() {
                continue;
            }
            let found = if shown {
                BorderType::ConsistentPresent
            } else {
                BorderType::ConsistentAbsent
            };
            match seen {
                None => seen = Some(found),
                Some(expected) if expected != found => return BorderType::Inconsistent,
                Some(_) => {}
            }
        }
        seen.unwrap_or(BorderType::ConsistentAbsent)
    }

    /// Border consistency of one side along a whole row or column.
    ///
    /// Cells are read as stored, merged or not. Out-of-range lines have no
    /// cells and report [`BorderType::ConsistentAbsent`].
    pub fn get_border_type(&self, line: GridLine, side: Side) -> BorderType {
        let cells: Vec<(usize, usize)> = match line {
            GridLine::Row(row) if row < self.rows.len() => {
                (0..self.columns).map(|column| (row, column)).collect()
            }
            GridLine::Column(column) if column < self.columns => {
                (0..self.rows.len()).map(|row| (row, column)).collect()
            }
            GridLine::Row(_) | GridLine::Column(_) => return BorderType::ConsistentAbsent,
        };
        Self::classify(
            cells
                .into_iter()
                .map(|(row, column)| (&self.rows[row][column], self.shows_border(row, column, side))),
        )
    }

    /// Classifies one vertical edge: the left edge of `column` for
    /// [`Side::Left`], its right edge for [`Side::Right`].
    ///
    /// Slots the edge does not cross (the next column continues the same
    /// cell) are skipped. The others resolve to their anchor cell, each
    /// anchor counted once, and the anchor's own rule decides.
    fn column_edge(&self, column: usize, side: Side) -> BorderType {
        let anchors = (0..self.rows.len())
            .filter(|&row| {
                side == Side::Left
                    || column + 1 >= self.columns
                    || !self.rows[row][column + 1].is_horizontally_merged()
            })
            .filter_map(|row| self.merged_position(row, column).ok())
            .dedup();
        Self::classify(anchors.map(|(r, c)| {
            let anchor = &self.rows[r][c];
            (anchor, anchor.has_border(side))
        }))
    }

    /// Horizontal counterpart of [`Self::column_edge`]: the top edge of
    /// `row` for [`Side::Top`], its bottom edge for [`Side::Bottom`]. A rule
    /// recorded by the cell across the edge also counts.
    fn row_edge(&self, row: usize, side: Side) -> BorderType {
        let anchors = (0..self.columns)
            .filter(|&column| {
                side == Side::Top
                    || row + 1 >= self.rows.len()
                    || !self.rows[row + 1][column].is_vertically_merged()
            })
            .filter_map(|column| self.merged_position(row, column).ok().map(|at| (at, column)))
            .dedup_by(|a, b| a.0 == b.0);
        Self::classify(anchors.map(|((r, c), column)| {
            let anchor = &self.rows[r][c];
            (anchor, anchor.has_border(side) || self.rule_across(row, column, side))
        }))
    }

    /// Left edge of the first column, then the right edge of every column.
    fn column_border_types(&self) -> Vec<BorderType> {
        let mut types = Vec::with_capacity(self.columns + 1);
        if self.columns > 0 {
            types.push(self.column_edge(0, Side::Left));
        }
        types.extend((0..self.columns).map(|column| self.column_edge(column, Side::Right)));
        types
    }

    /// Top edge of the first row, then the bottom edge of every row.
    fn row_border_types(&self) -> Vec<BorderType> {
        let rows = self.rows.len();
        let mut types = Vec::with_capacity(rows + 1);
        if rows > 0 {
            types.push(self.row_edge(0, Side::Top));
        }
        types.extend((0..rows).map(|row| self.row_edge(row, Side::Bottom)));
        types
    }

    fn is_ruled(types: &[BorderType]) -> bool {
        types.contains(&BorderType::ConsistentPresent) && !types.contains(&BorderType::Inconsistent)
    }

    /// True if every column edge and every row edge, read through merged
    /// cells to their anchors, is consistent and at least one of each is
    /// ruled.
    pub fn is_row_and_column_grid(&self) -> bool {
        Self::is_ruled(&self.column_border_types()) && Self::is_ruled(&self.row_border_types())
    }

    pub fn is_grid_type_satisfied(&self, grid_type: GridType) -> bool {
        match grid_type {
            GridType::RowAndColumn => self.is_row_and_column_grid(),
            GridType::Row => Self::is_ruled(&self.row_border_types()),
            GridType::Column => Self::is_ruled(&self.column_border_types()),
            GridType::Any => true,
        }
    }
}
