//! Tables detected over a positional list.
//!
//! A [`TabularElementGroup`] is a rectangular grid of
//! [`TabularCellElementGroup`] cells. Cells only reference elements that live
//! in the list the table is registered on; the table never owns them.
//! Merges are boolean chains: a merged cell points at its upper or left
//! neighbor, never at an explicit span.

mod cell;
mod grid;

use std::ops::Range;

use tracing::debug;

use crate::arena::{ElementId, ElementLookup, ElementStore, ListId, TableId};
use crate::context::TableCoordinates;
use crate::document::Document;
use crate::error::{FolioError, Result};

pub use cell::TabularCellElementGroup;
pub use grid::{BorderType, GridLine, GridType};

/// Grid of cells referencing elements of one positional list.
#[derive(Clone, Debug, PartialEq)]
pub struct TabularElementGroup {
    pub(crate) rows: Vec<Vec<TabularCellElementGroup>>,
    columns: usize,
    header_rows: usize,
    column_header_count: usize,
    pub(crate) id: Option<TableId>,
    pub(crate) owner: Option<ListId>,
}

impl TabularElementGroup {
    /// Creates an empty `rows` x `columns` grid whose first `header_rows`
    /// rows are headers. Fails if `header_rows` exceeds `rows`.
    pub fn new(rows: usize, columns: usize, header_rows: usize) -> Result<Self> {
        if header_rows > rows {
            return Err(FolioError::OutOfBounds {
                row: header_rows,
                column: 0,
                rows,
                columns,
            });
        }
        Ok(Self {
            rows: vec![vec![TabularCellElementGroup::new(); columns]; rows],
            columns,
            header_rows,
            column_header_count: 0,
            id: None,
            owner: None,
        })
    }

    /// Handle under which the table is registered, once registered.
    pub fn id(&self) -> Option<TableId> {
        self.id
    }

    /// List the table is registered on, `None` once detached.
    pub fn owner(&self) -> Option<ListId> {
        self.owner
    }

    pub fn number_of_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn number_of_columns(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get_header_row_count(&self) -> usize {
        self.header_rows
    }

    pub fn get_column_header_count(&self) -> usize {
        self.column_header_count
    }

    /// Marks the leftmost `count` columns as row headers.
    pub fn set_column_header_count(&mut self, count: usize) -> Result<()> {
        if count > self.columns {
            return Err(self.out_of_bounds(0, count));
        }
        self.column_header_count = count;
        Ok(())
    }

    fn out_of_bounds(&self, row: usize, column: usize) -> FolioError {
        FolioError::OutOfBounds {
            row,
            column,
            rows: self.rows.len(),
            columns: self.columns,
        }
    }

    fn check(&self, row: usize, column: usize) -> Result<()> {
        if row >= self.rows.len() || column >= self.columns {
            return Err(self.out_of_bounds(row, column));
        }
        Ok(())
    }

    pub fn get_cell(&self, row: usize, column: usize) -> Result<&TabularCellElementGroup> {
        self.check(row, column)?;
        Ok(&self.rows[row][column])
    }

    pub fn get_cell_mut(&mut self, row: usize, column: usize) -> Result<&mut TabularCellElementGroup> {
        self.check(row, column)?;
        Ok(&mut self.rows[row][column])
    }

    /// Coordinates of the cell that owns `(row, column)`.
    ///
    /// Walks up while the cell at the original column is vertically merged,
    /// then left from the row reached while horizontally merged.
    pub fn merged_position(&self, row: usize, column: usize) -> Result<(usize, usize)> {
        self.check(row, column)?;
        let mut r = row;
        while r > 0 && self.rows[r][column].is_vertically_merged() {
            r -= 1;
        }
        let mut c = column;
        while c > 0 && self.rows[r][c].is_horizontally_merged() {
            c -= 1;
        }
        Ok((r, c))
    }

    pub fn get_merged_cell(&self, row: usize, column: usize) -> Result<&TabularCellElementGroup> {
        let (r, c) = self.merged_position(row, column)?;
        Ok(&self.rows[r][c])
    }

    /// Adds `element` to the cell at `(row, column)` in reading order.
    pub fn add_element<L: ElementLookup + ?Sized>(
        &mut self,
        lookup: &L,
        row: usize,
        column: usize,
        element: ElementId,
    ) -> Result<()> {
        self.get_cell_mut(row, column)?.add(lookup, element);
        Ok(())
    }

    /// Every cell with its coordinates, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &TabularCellElementGroup)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, cell)| (r, c, cell))
        })
    }

    /// Copy registered as `id` on `owner`, with every cell member mapped.
    pub(crate) fn remapped(
        &self,
        id: TableId,
        owner: ListId,
        mut map: impl FnMut(ElementId) -> ElementId,
    ) -> Self {
        let mut rows = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let mut cells = Vec::with_capacity(row.len());
            for cell in row {
                cells.push(cell.remap(&mut map));
            }
            rows.push(cells);
        }
        Self {
            rows,
            columns: self.columns,
            header_rows: self.header_rows,
            column_header_count: self.column_header_count,
            id: Some(id),
            owner: Some(owner),
        }
    }

    fn write_references(&self, store: &mut ElementStore, table: TableId, rows: Range<usize>) {
        for row in rows {
            for (column, cell) in self.rows[row].iter().enumerate() {
                if cell.is_merged() {
                    continue;
                }
                for &element in cell.elements() {
                    if let Some(context) = store.get_mut(element).and_then(|e| e.context.as_mut()) {
                        context.set_table_coordinates(Some(TableCoordinates { table, row, column }));
                    }
                }
            }
        }
    }

    fn clear_references(&self, store: &mut ElementStore, table: TableId, rows: Range<usize>) {
        for row in rows {
            for cell in self.rows[row].iter().filter(|cell| !cell.is_merged()) {
                for &element in cell.elements() {
                    if let Some(context) = store.get_mut(element).and_then(|e| e.context.as_mut()) {
                        context.clear_table(table);
                    }
                }
            }
        }
    }

    /// Writes `(table, row, column)` into the context of every element of
    /// every non-merged cell that already holds a context.
    pub(crate) fn set_back_references(&self, store: &mut ElementStore, table: TableId) {
        self.write_references(store, table, 0..self.rows.len());
    }

    /// Removes row `index`.
    ///
    /// Cells of the next row that were merged into a deleted anchor cell
    /// inherit its content and become anchors themselves.
    pub(crate) fn delete_row(
        &mut self,
        store: &mut ElementStore,
        table: TableId,
        index: usize,
    ) -> Result<()> {
        if index >= self.rows.len() {
            return Err(self.out_of_bounds(index, 0));
        }
        self.clear_references(store, table, index..self.rows.len());

        if index + 1 < self.rows.len() {
            for column in 0..self.columns {
                let below = &self.rows[index + 1][column];
                if !below.is_vertically_merged() || self.rows[index][column].is_vertically_merged() {
                    continue;
                }
                let mut anchor = std::mem::take(&mut self.rows[index][column]);
                let below = std::mem::take(&mut self.rows[index + 1][column]);
                anchor.absorb_below(&*store, below);
                self.rows[index + 1][column] = anchor;
            }
        }

        self.rows.remove(index);
        if index < self.header_rows {
            self.header_rows -= 1;
        }
        self.write_references(store, table, index..self.rows.len());
        Ok(())
    }

    /// Keeps the first `keep_rows` rows and drops the rest.
    pub(crate) fn curtail(&mut self, store: &mut ElementStore, table: TableId, keep_rows: usize) {
        if keep_rows >= self.rows.len() {
            return;
        }
        self.clear_references(store, table, keep_rows..self.rows.len());
        self.rows.truncate(keep_rows);
        self.header_rows = self.header_rows.min(keep_rows);
    }
}

impl Document {
    /// Registers `table` on the positional list `list`.
    pub fn add_tabular_group(&mut self, list: ListId, mut table: TabularElementGroup) -> Result<TableId> {
        let id = TableId::new(self.tables.len());
        self.list_mut(list)?.positional_mut()?.tables.push(id);
        table.id = Some(id);
        table.owner = Some(list);
        debug!(
            table = id.index(),
            list = list.index(),
            rows = table.number_of_rows(),
            columns = table.number_of_columns(),
            "registered table"
        );
        self.tables.push(table);
        Ok(id)
    }

    pub fn table(&self, id: TableId) -> Option<&TabularElementGroup> {
        self.tables.get(id.index())
    }

    pub fn table_mut(&mut self, id: TableId) -> Option<&mut TabularElementGroup> {
        self.tables.get_mut(id.index())
    }

    fn table_entry(&mut self, id: TableId) -> Result<&mut TabularElementGroup> {
        self.tables
            .get_mut(id.index())
            .ok_or(FolioError::UnknownHandle("table"))
    }

    /// Adds `element` to a registered table's cell in reading order.
    pub fn add_table_element(
        &mut self,
        table: TableId,
        row: usize,
        column: usize,
        element: ElementId,
    ) -> Result<()> {
        if self.elements.get(element).is_none() {
            return Err(FolioError::UnknownHandle("element"));
        }
        let grid = self
            .tables
            .get_mut(table.index())
            .ok_or(FolioError::UnknownHandle("table"))?;
        grid.add_element(&self.elements, row, column, element)
    }

    pub fn set_table_back_references(&mut self, table: TableId) -> Result<()> {
        let grid = self
            .tables
            .get(table.index())
            .ok_or(FolioError::UnknownHandle("table"))?;
        grid.set_back_references(&mut self.elements, table);
        Ok(())
    }

    /// Deletes one row of a registered table, keeping merged content.
    pub fn delete_table_row(&mut self, table: TableId, row: usize) -> Result<()> {
        let grid = self
            .tables
            .get_mut(table.index())
            .ok_or(FolioError::UnknownHandle("table"))?;
        grid.delete_row(&mut self.elements, table, row)?;
        debug!(table = table.index(), row, remaining = grid.number_of_rows(), "deleted table row");
        Ok(())
    }

    /// Truncates a registered table to `keep_rows` rows, detaching it from
    /// its list once no rows remain. Returns true if it was detached.
    pub fn curtail_table(&mut self, table: TableId, keep_rows: usize) -> Result<bool> {
        let grid = self
            .tables
            .get_mut(table.index())
            .ok_or(FolioError::UnknownHandle("table"))?;
        grid.curtail(&mut self.elements, table, keep_rows);
        if !grid.is_empty() {
            return Ok(false);
        }
        self.detach_table(table)?;
        Ok(true)
    }

    /// Clears every back reference of `table` and unregisters it.
    pub fn remove_tabular_group(&mut self, table: TableId) -> Result<()> {
        self.curtail_table(table, 0).map(|_| ())
    }

    fn detach_table(&mut self, table: TableId) -> Result<()> {
        let Some(owner) = self.table_entry(table)?.owner.take() else {
            return Ok(());
        };
        if let Some(index) = self.list_mut(owner)?.positional.as_mut() {
            index.tables.retain(|&t| t != table);
        }
        debug!(table = table.index(), list = owner.index(), "detached empty table");
        Ok(())
    }
}
