use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{ItemId, RowId};

pub const ROW_PREFIX: &str = "row-";
pub const VERTICAL_LEFT_PREFIX: &str = "v-indicator-left-";
pub const VERTICAL_RIGHT_PREFIX: &str = "v-indicator-right-";
pub const HORIZONTAL_ABOVE_PREFIX: &str = "h-indicator-above-";
pub const HORIZONTAL_BELOW_PREFIX: &str = "h-indicator-below-";
pub const DROPZONE_ABOVE_PREFIX: &str = "dropzone-above-";
pub const DROPZONE_BELOW_PREFIX: &str = "dropzone-below-";
pub const DROPZONE_END: &str = "dropzone-end";
/// Escape for card ids that would otherwise read as a drop zone.
pub const ITEM_PREFIX: &str = "item:";

/// Where a freshly created row is spliced into row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewRow {
    Above(RowId),
    Below(RowId),
    End,
}

/// Something a dragged item can be dropped onto.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// Another card. Ids that start with a drop-zone prefix (or with
    /// `item:`) are written with an `item:` escape by `Display`.
    Item(ItemId),
    /// A row container; the item goes to the end of the row.
    Row(RowId),
    /// A gap between cards. `index` counts gaps in the row as displayed
    /// before the move.
    Slot { row: RowId, index: usize },
    /// A horizontal indicator or drop zone that creates a row.
    NewRow(NewRow),
}

impl DropTarget {
    pub fn item(id: impl Into<ItemId>) -> Self {
        Self::Item(id.into())
    }

    /// The row this target points into, if any.
    pub fn row(&self) -> Option<RowId> {
        match self {
            DropTarget::Item(_) => None,
            DropTarget::Row(row) | DropTarget::Slot { row, .. } => Some(*row),
            DropTarget::NewRow(NewRow::Above(row) | NewRow::Below(row)) => Some(*row),
            DropTarget::NewRow(NewRow::End) => None,
        }
    }

    /// True for host drop zones that are not cards.
    pub fn is_indicator(&self) -> bool {
        matches!(self, DropTarget::Slot { .. } | DropTarget::NewRow(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetParseError {
    #[error("empty drop target id")]
    Empty,
    #[error("invalid row id in `{0}`")]
    InvalidRow(String),
    #[error("invalid slot index in `{0}`")]
    InvalidIndex(String),
}

impl FromStr for DropTarget {
    type Err = TargetParseError;

    /// Parses host drop-zone ids. Ids without a known prefix are card ids;
    /// `item:` forces a card id.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(TargetParseError::Empty);
        }
        if let Some(id) = raw.strip_prefix(ITEM_PREFIX) {
            return Ok(DropTarget::Item(id.to_string()));
        }
        if raw == DROPZONE_END {
            return Ok(DropTarget::NewRow(NewRow::End));
        }
        if let Some(rest) = raw.strip_prefix(VERTICAL_LEFT_PREFIX) {
            let (row, index) = parse_slot(raw, rest)?;
            return Ok(DropTarget::Slot { row, index });
        }
        if let Some(rest) = raw.strip_prefix(VERTICAL_RIGHT_PREFIX) {
            let (row, index) = parse_slot(raw, rest)?;
            let index = index
                .checked_add(1)
                .ok_or_else(|| TargetParseError::InvalidIndex(raw.to_string()))?;
            return Ok(DropTarget::Slot { row, index });
        }
        for prefix in [HORIZONTAL_ABOVE_PREFIX, DROPZONE_ABOVE_PREFIX] {
            if let Some(rest) = raw.strip_prefix(prefix) {
                return Ok(DropTarget::NewRow(NewRow::Above(parse_row(raw, rest)?)));
            }
        }
        for prefix in [HORIZONTAL_BELOW_PREFIX, DROPZONE_BELOW_PREFIX] {
            if let Some(rest) = raw.strip_prefix(prefix) {
                return Ok(DropTarget::NewRow(NewRow::Below(parse_row(raw, rest)?)));
            }
        }
        if let Some(rest) = raw.strip_prefix(ROW_PREFIX) {
            return Ok(DropTarget::Row(parse_row(raw, rest)?));
        }
        Ok(DropTarget::Item(raw.to_string()))
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropTarget::Item(id) if needs_escape(id) => write!(f, "{ITEM_PREFIX}{id}"),
            DropTarget::Item(id) => f.write_str(id),
            DropTarget::Row(row) => write!(f, "{ROW_PREFIX}{row}"),
            DropTarget::Slot { row, index } => write!(f, "{VERTICAL_LEFT_PREFIX}{row}-{index}"),
            DropTarget::NewRow(NewRow::Above(row)) => write!(f, "{HORIZONTAL_ABOVE_PREFIX}{row}"),
            DropTarget::NewRow(NewRow::Below(row)) => write!(f, "{HORIZONTAL_BELOW_PREFIX}{row}"),
            DropTarget::NewRow(NewRow::End) => f.write_str(DROPZONE_END),
        }
    }
}

/// True when `id` written bare would not parse back as the same card.
fn needs_escape(id: &str) -> bool {
    match id.parse::<DropTarget>() {
        Ok(DropTarget::Item(parsed)) => parsed != id,
        _ => true,
    }
}

fn parse_row(raw: &str, digits: &str) -> Result<RowId, TargetParseError> {
    digits
        .parse::<RowId>()
        .map_err(|_| TargetParseError::InvalidRow(raw.to_string()))
}

fn parse_slot(raw: &str, rest: &str) -> Result<(RowId, usize), TargetParseError> {
    let (row, index) = rest
        .rsplit_once('-')
        .ok_or_else(|| TargetParseError::InvalidIndex(raw.to_string()))?;
    let row = parse_row(raw, row)?;
    let index = index
        .parse::<usize>()
        .map_err(|_| TargetParseError::InvalidIndex(raw.to_string()))?;
    Ok((row, index))
}
