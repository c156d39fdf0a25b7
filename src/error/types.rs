use thiserror::Error;

use crate::logging::LoggingError;
use crate::model::{ItemId, RowId};
use crate::target::TargetParseError;

/// Unified result type for the Room board crate.
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors surfaced when building layouts or driving a drag session.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("item `{0}` appears more than once")]
    DuplicateItem(ItemId),
    #[error("row {row} has more than one item at order {order}")]
    DuplicateOrder { row: RowId, order: usize },
    #[error("row {0} appears more than once")]
    DuplicateRow(RowId),
    #[error("item `{item}` has invalid width {width}")]
    InvalidWidth { item: ItemId, width: f32 },
    #[error("item `{0}` not found")]
    ItemNotFound(ItemId),
    #[error("a drag of `{0}` is already in progress")]
    DragInProgress(ItemId),
    #[error("no drag in progress")]
    NotDragging,
    #[error("drop target parse failure: {0}")]
    Target(#[from] TargetParseError),
    #[error("logging failure: {0}")]
    Logging(#[from] LoggingError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a reconciler leaves the layout untouched.
///
/// None of these are faults: the host treats every rejection as "nothing
/// happened" and keeps rendering the previous layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("item `{0}` not found")]
    ItemNotFound(ItemId),
    #[error("drop target `{0}` not found")]
    TargetNotFound(ItemId),
    #[error("row {0} not found")]
    RowNotFound(RowId),
    #[error("item dropped onto itself")]
    SelfTarget,
    #[error("target is in a different row")]
    CrossRow,
    #[error("row {row} already holds {capacity} items")]
    RowFull { row: RowId, capacity: usize },
    #[error("the last row cannot be removed")]
    LastRow,
    #[error("item `{0}` already exists")]
    DuplicateItem(ItemId),
    #[error("drop had no target")]
    NoTarget,
    #[error("layout unchanged")]
    Unchanged,
}

impl Rejection {
    /// Short machine-friendly label used in log fields and audit records.
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::ItemNotFound(_) => "item_not_found",
            Rejection::TargetNotFound(_) => "target_not_found",
            Rejection::RowNotFound(_) => "row_not_found",
            Rejection::SelfTarget => "self_target",
            Rejection::CrossRow => "cross_row",
            Rejection::RowFull { .. } => "row_full",
            Rejection::LastRow => "last_row",
            Rejection::DuplicateItem(_) => "duplicate_item",
            Rejection::NoTarget => "no_target",
            Rejection::Unchanged => "unchanged",
        }
    }
}
