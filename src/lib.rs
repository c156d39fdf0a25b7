//! Card layout state for drag-and-drop dashboards.
//!
//! A [`Layout`] is an ordered list of rows, each holding an ordered list of
//! cards. Reconcilers turn a drop (dragged card plus [`DropTarget`]) into a
//! new layout or a [`Rejection`]; [`DragController`] runs one drag session at
//! a time and notifies listeners once per committed change.

pub mod board;
pub mod demo;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod reconcile;
pub mod render;
pub mod session;
pub mod target;
pub mod width;

pub use board::{BoardView, CardContent, CardView, RowView};
pub use error::{BoardError, Rejection, Result};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, NullSink,
};
pub use metrics::{BoardMetrics, MetricSnapshot};
pub use model::{Cell, Item, ItemId, Layout, Placement, Row, RowId};
pub use reconcile::{
    Insertion, ReconcileRules, Reconciled, Reconciler, apply_drop, move_across_rows,
    move_to_new_row, move_to_slot, reconcile, reorder_within_row,
};
pub use render::{RendererSettings, TextRenderer};
pub use session::audit::{
    BufferedAudit, NullSessionAudit, SessionAudit, SessionAuditEvent, SessionAuditEventBuilder,
    SessionAuditStage,
};
pub use session::{
    BoardConfig, DragController, DragEvent, DragSession, DragState, DropOutcome, Edge, Edit, Hover,
    Indicator, LayoutListener,
};
pub use target::{DropTarget, NewRow, TargetParseError};
pub use width::display_width;
