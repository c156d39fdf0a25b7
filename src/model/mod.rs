//! Layout model orchestrator.
//!
//! Downstream code imports the layout types from here while the
//! implementation details live in the private `core` module.

mod core;

pub use self::core::{Cell, Item, ItemId, Layout, Placement, Row, RowId};
