//! Drop targets and the host drop-zone id format.

mod core;

pub use self::core::{
    DROPZONE_ABOVE_PREFIX, DROPZONE_BELOW_PREFIX, DROPZONE_END, DropTarget,
    HORIZONTAL_ABOVE_PREFIX, HORIZONTAL_BELOW_PREFIX, ITEM_PREFIX, NewRow, ROW_PREFIX,
    TargetParseError, VERTICAL_LEFT_PREFIX, VERTICAL_RIGHT_PREFIX,
};
