use std::collections::{BTreeMap, HashSet};

use blake3::Hash;
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};

/// Item identifier, unique across the whole layout.
pub type ItemId = String;

/// Row identifier. Display order of rows is tracked separately from the id.
pub type RowId = u32;

/// Host item with an opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item<T> {
    pub id: ItemId,
    pub data: T,
}

impl<T> Item<T> {
    pub fn new(id: impl Into<ItemId>, data: T) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// Flat (row, order) coordinate of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub item_id: ItemId,
    pub row: RowId,
    pub order: usize,
    /// Fraction of the row width in `(0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
}

impl Placement {
    pub fn new(item_id: impl Into<ItemId>, row: RowId, order: usize) -> Self {
        Self {
            item_id: item_id.into(),
            row,
            order,
            width: None,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }
}

/// One slot in a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub item_id: ItemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
}

impl Cell {
    pub fn new(item_id: impl Into<ItemId>) -> Self {
        Self {
            item_id: item_id.into(),
            width: None,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }
}

/// A row of cells. The index of a cell is its `order`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    id: RowId,
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(id: RowId, cells: Vec<Cell>) -> Self {
        Self { id, cells }
    }

    /// Shorthand for a row of width-less cells.
    pub fn of<I, S>(id: RowId, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        Self::new(id, items.into_iter().map(Cell::new).collect())
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.iter().map(|cell| cell.item_id.as_str())
    }

    pub fn position(&self, item_id: &str) -> Option<usize> {
        self.cells.iter().position(|cell| cell.item_id == item_id)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut Vec<Cell> {
        &mut self.cells
    }
}

/// Ordered rows of cells; the single source of truth for rendering.
///
/// A `Layout` never holds an empty row and never holds an item twice. Orders
/// are dense because they are cell indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    rows: Vec<Row>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from flat placements. Rows are ordered by ascending id and
    /// sortable orders are renumbered densely.
    pub fn from_placements<I>(placements: I) -> Result<Self>
    where
        I: IntoIterator<Item = Placement>,
    {
        let mut seen = HashSet::new();
        let mut grouped: BTreeMap<RowId, Vec<(usize, Cell)>> = BTreeMap::new();

        for placement in placements {
            validate_width(&placement.item_id, placement.width)?;
            if !seen.insert(placement.item_id.clone()) {
                return Err(BoardError::DuplicateItem(placement.item_id));
            }
            grouped.entry(placement.row).or_default().push((
                placement.order,
                Cell {
                    item_id: placement.item_id,
                    width: placement.width,
                },
            ));
        }

        let mut rows = Vec::with_capacity(grouped.len());
        for (row, mut entries) in grouped {
            entries.sort_by_key(|(order, _)| *order);
            if let Some(pair) = entries.windows(2).find(|pair| pair[0].0 == pair[1].0) {
                return Err(BoardError::DuplicateOrder {
                    row,
                    order: pair[0].0,
                });
            }
            rows.push(Row::new(row, entries.into_iter().map(|(_, cell)| cell).collect()));
        }

        Ok(Self { rows })
    }

    /// Build from rows in display order. Empty rows are dropped.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut seen_rows = HashSet::new();
        let mut seen_items = HashSet::new();
        let mut kept = Vec::new();

        for row in rows {
            if !seen_rows.insert(row.id) {
                return Err(BoardError::DuplicateRow(row.id));
            }
            for cell in &row.cells {
                validate_width(&cell.item_id, cell.width)?;
                if !seen_items.insert(cell.item_id.clone()) {
                    return Err(BoardError::DuplicateItem(cell.item_id.clone()));
                }
            }
            if !row.is_empty() {
                kept.push(row);
            }
        }

        Ok(Self { rows: kept })
    }

    /// Caller guarantees unique row and item ids and no empty rows.
    pub(crate) fn from_rows_unchecked(rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|row| !row.is_empty()));
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn row_ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|row| row.id).collect()
    }

    pub fn row_position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Number of items in the layout.
    pub fn len(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.locate(item_id).is_some()
    }

    /// Row position and cell index of an item.
    pub fn locate(&self, item_id: &str) -> Option<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .find_map(|(row_pos, row)| row.position(item_id).map(|idx| (row_pos, idx)))
    }

    /// Row id holding an item.
    pub fn row_of(&self, item_id: &str) -> Option<RowId> {
        self.locate(item_id).map(|(row_pos, _)| self.rows[row_pos].id)
    }

    pub fn placement(&self, item_id: &str) -> Option<Placement> {
        self.locate(item_id).map(|(row_pos, idx)| {
            let row = &self.rows[row_pos];
            let cell = &row.cells[idx];
            Placement {
                item_id: cell.item_id.clone(),
                row: row.id,
                order: idx,
                width: cell.width,
            }
        })
    }

    /// Flat placements in row-major display order.
    pub fn placements(&self) -> impl Iterator<Item = Placement> + '_ {
        self.rows.iter().flat_map(|row| {
            row.cells.iter().enumerate().map(move |(order, cell)| Placement {
                item_id: cell.item_id.clone(),
                row: row.id,
                order,
                width: cell.width,
            })
        })
    }

    /// Item ids grouped by row in display order, ignoring row ids and widths.
    pub fn arrangement(&self) -> Vec<Vec<ItemId>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|cell| cell.item_id.clone()).collect())
            .collect()
    }

    /// True when both layouts show the same cells in the same places, even if
    /// their row ids differ.
    pub fn same_arrangement(&self, other: &Layout) -> bool {
        self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(&other.rows)
                .all(|(left, right)| left.cells == right.cells)
    }

    /// Smallest id greater than every existing row id.
    pub fn next_row_id(&self) -> RowId {
        match self.rows.iter().map(|row| row.id).max() {
            None => 0,
            Some(max) => match max.checked_add(1) {
                Some(next) => next,
                None => (0..RowId::MAX)
                    .find(|candidate| self.row(*candidate).is_none())
                    .unwrap_or(RowId::MAX),
            },
        }
    }

    /// Digest of the canonical form, including row ids and widths.
    pub fn fingerprint(&self) -> Hash {
        let mut hasher = blake3::Hasher::new();
        for row in &self.rows {
            hasher.update(&row.id.to_le_bytes());
            hasher.update(&(row.cells.len() as u64).to_le_bytes());
            for cell in &row.cells {
                hasher.update(&(cell.item_id.len() as u64).to_le_bytes());
                hasher.update(cell.item_id.as_bytes());
                match cell.width {
                    Some(width) => {
                        hasher.update(&[1]);
                        hasher.update(&width.to_bits().to_le_bytes());
                    }
                    None => {
                        hasher.update(&[0]);
                    }
                }
            }
        }
        hasher.finalize()
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    /// Remove an item's cell. Returns the cell, its former row position, and
    /// whether the row was pruned because it became empty.
    pub(crate) fn take_cell(&mut self, item_id: &str) -> Option<TakenCell> {
        let (row_pos, index) = self.locate(item_id)?;
        let row = &mut self.rows[row_pos];
        let cell = row.cells.remove(index);
        let source_row = row.id;
        let pruned = row.cells.is_empty();
        if pruned {
            self.rows.remove(row_pos);
        }
        Some(TakenCell {
            cell,
            source_row,
            row_pos,
            pruned,
        })
    }
}

impl TryFrom<Vec<Placement>> for Layout {
    type Error = BoardError;

    fn try_from(placements: Vec<Placement>) -> Result<Self> {
        Self::from_placements(placements)
    }
}

/// A cell lifted out of the layout by [`Layout::take_cell`].
#[derive(Debug, Clone)]
pub(crate) struct TakenCell {
    pub cell: Cell,
    pub source_row: RowId,
    pub row_pos: usize,
    pub pruned: bool,
}

fn validate_width(item_id: &str, width: Option<f32>) -> Result<()> {
    match width {
        Some(width) if !(width.is_finite() && width > 0.0 && width <= 1.0) => {
            Err(BoardError::InvalidWidth {
                item: item_id.to_string(),
                width,
            })
        }
        _ => Ok(()),
    }
}
