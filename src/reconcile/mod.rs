//! Layout reconcilers.
//!
//! Pure functions from (layout, dragged item, target) to a new layout. The
//! free functions use [`ReconcileRules::default`]; hosts that cap row sizes
//! or rebalance widths hold a configured [`Reconciler`] instead.

mod core;
mod rules;

pub use self::core::{
    Insertion, Reconciled, Reconciler, apply_drop, move_across_rows, move_to_new_row,
    move_to_slot, reconcile, reorder_within_row,
};
pub use rules::ReconcileRules;
