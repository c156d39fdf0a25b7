use crate::error::Rejection;
use crate::model::{Cell, ItemId, Layout, Row, RowId};
use crate::target::{DropTarget, NewRow};
use crate::width::{clamp_fraction, equal_share};

use super::rules::ReconcileRules;

/// Outcome of a reconciler operation: the new layout, or why the input
/// layout stays as it is.
pub type Reconciled = std::result::Result<Layout, Rejection>;

/// Where [`Reconciler::insert_cell`] puts a new card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    EndOfRow(RowId),
    NewRowAtEnd,
}

/// Pure layout transformations driven by drops and edits.
///
/// Every operation borrows the current layout and returns a fresh one, so a
/// rejected operation leaves the caller's layout exactly as it was.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reconciler {
    rules: ReconcileRules,
}

impl Reconciler {
    pub fn new(rules: ReconcileRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ReconcileRules {
        &self.rules
    }

    /// Route a drop to the matching operation.
    pub fn apply_drop(&self, layout: &Layout, active: &str, target: &DropTarget) -> Reconciled {
        match target {
            DropTarget::Item(over) => {
                if over == active {
                    return Err(Rejection::SelfTarget);
                }
                let active_row = layout
                    .row_of(active)
                    .ok_or_else(|| Rejection::ItemNotFound(active.to_string()))?;
                let over_row = layout
                    .row_of(over)
                    .ok_or_else(|| Rejection::TargetNotFound(over.clone()))?;
                if active_row == over_row {
                    self.reorder_within_row(layout, active, over)
                } else {
                    self.move_across_rows(layout, active, over_row, Some(over))
                }
            }
            DropTarget::Row(row) => {
                let active_row = layout
                    .row_of(active)
                    .ok_or_else(|| Rejection::ItemNotFound(active.to_string()))?;
                if layout.row(*row).is_none() {
                    return Err(Rejection::RowNotFound(*row));
                }
                if active_row == *row {
                    return Err(Rejection::Unchanged);
                }
                self.move_across_rows(layout, active, *row, None)
            }
            DropTarget::Slot { row, index } => self.move_to_slot(layout, active, *row, *index),
            DropTarget::NewRow(new_row) => self.move_to_new_row(layout, active, *new_row),
        }
    }

    /// Array-move within one row: the active card takes the over card's index.
    pub fn reorder_within_row(&self, layout: &Layout, active: &str, over: &str) -> Reconciled {
        if active == over {
            return Err(Rejection::SelfTarget);
        }
        let (active_pos, old_index) = layout
            .locate(active)
            .ok_or_else(|| Rejection::ItemNotFound(active.to_string()))?;
        let (over_pos, new_index) = layout
            .locate(over)
            .ok_or_else(|| Rejection::TargetNotFound(over.to_string()))?;
        if active_pos != over_pos {
            return Err(Rejection::CrossRow);
        }

        let mut next = layout.clone();
        let row = &mut next.rows_mut()[active_pos];
        let row_id = row.id();
        let cells = row.cells_mut();
        let cell = cells.remove(old_index);
        cells.insert(new_index, cell);

        self.finish(layout, next, &[row_id])
    }

    /// Move a card into `target_row`, in front of `over` or at the row end.
    pub fn move_across_rows(
        &self,
        layout: &Layout,
        active: &str,
        target_row: RowId,
        over: Option<&str>,
    ) -> Reconciled {
        let (source_pos, _) = layout
            .locate(active)
            .ok_or_else(|| Rejection::ItemNotFound(active.to_string()))?;
        let target_pos = layout
            .row_position(target_row)
            .ok_or(Rejection::RowNotFound(target_row))?;

        match over {
            Some(over) => {
                if over == active {
                    return Err(Rejection::SelfTarget);
                }
                let index = layout.rows()[target_pos]
                    .position(over)
                    .ok_or_else(|| Rejection::TargetNotFound(over.to_string()))?;
                if source_pos == target_pos {
                    return self.reorder_within_row(layout, active, over);
                }
                self.move_to_slot(layout, active, target_row, index)
            }
            None => self.move_to_slot(layout, active, target_row, usize::MAX),
        }
    }

    /// Insert a card at a gap index of `row`, counted before the move.
    pub fn move_to_slot(
        &self,
        layout: &Layout,
        active: &str,
        row: RowId,
        index: usize,
    ) -> Reconciled {
        let (source_pos, source_index) = layout
            .locate(active)
            .ok_or_else(|| Rejection::ItemNotFound(active.to_string()))?;
        let target_pos = layout.row_position(row).ok_or(Rejection::RowNotFound(row))?;
        let target_len = layout.rows()[target_pos].len();
        let same_row = source_pos == target_pos;

        if same_row && target_len == 1 {
            return Err(Rejection::Unchanged);
        }
        if !same_row {
            self.check_capacity(row, target_len)?;
        }

        let mut index = index.min(target_len);
        if same_row && index > source_index {
            index -= 1;
        }

        let mut next = layout.clone();
        let taken = next
            .take_cell(active)
            .ok_or_else(|| Rejection::ItemNotFound(active.to_string()))?;
        let target_pos = next.row_position(row).ok_or(Rejection::RowNotFound(row))?;
        next.rows_mut()[target_pos]
            .cells_mut()
            .insert(index, taken.cell);

        self.finish(layout, next, &[taken.source_row, row])
    }

    /// Lift a card into a new row of its own.
    pub fn move_to_new_row(&self, layout: &Layout, active: &str, new_row: NewRow) -> Reconciled {
        if !layout.contains(active) {
            return Err(Rejection::ItemNotFound(active.to_string()));
        }
        let mut insert_at = match new_row {
            NewRow::Above(anchor) => layout
                .row_position(anchor)
                .ok_or(Rejection::RowNotFound(anchor))?,
            NewRow::Below(anchor) => {
                layout
                    .row_position(anchor)
                    .ok_or(Rejection::RowNotFound(anchor))?
                    + 1
            }
            NewRow::End => layout.rows().len(),
        };
        let new_id = layout.next_row_id();

        let mut next = layout.clone();
        let taken = next
            .take_cell(active)
            .ok_or_else(|| Rejection::ItemNotFound(active.to_string()))?;
        if taken.pruned && taken.row_pos < insert_at {
            insert_at -= 1;
        }
        next.rows_mut()
            .insert(insert_at, Row::new(new_id, vec![taken.cell]));

        self.finish(layout, next, &[taken.source_row, new_id])
    }

    /// Add a card that is not yet on the board.
    pub fn insert_cell(&self, layout: &Layout, cell: Cell, at: Insertion) -> Reconciled {
        if layout.contains(&cell.item_id) {
            return Err(Rejection::DuplicateItem(cell.item_id));
        }
        let cell = Cell {
            width: cell.width.map(|w| clamp_fraction(w, self.rules.min_width)),
            ..cell
        };

        let mut next = layout.clone();
        let touched = match at {
            Insertion::EndOfRow(row) => {
                let pos = layout.row_position(row).ok_or(Rejection::RowNotFound(row))?;
                self.check_capacity(row, layout.rows()[pos].len())?;
                next.rows_mut()[pos].cells_mut().push(cell);
                row
            }
            Insertion::NewRowAtEnd => {
                let row = layout.next_row_id();
                next.rows_mut().push(Row::new(row, vec![cell]));
                row
            }
        };

        self.finish(layout, next, &[touched])
    }

    pub fn insert_item(
        &self,
        layout: &Layout,
        item_id: impl Into<ItemId>,
        at: Insertion,
    ) -> Reconciled {
        self.insert_cell(layout, Cell::new(item_id), at)
    }

    /// Remove a card; its row goes too if nothing is left in it.
    pub fn remove_item(&self, layout: &Layout, item_id: &str) -> Reconciled {
        let mut next = layout.clone();
        let taken = next
            .take_cell(item_id)
            .ok_or_else(|| Rejection::ItemNotFound(item_id.to_string()))?;
        self.finish(layout, next, &[taken.source_row])
    }

    /// Remove a row with all of its cards. The last row is kept.
    pub fn remove_row(&self, layout: &Layout, row: RowId) -> Reconciled {
        let pos = layout.row_position(row).ok_or(Rejection::RowNotFound(row))?;
        if layout.rows().len() <= 1 {
            return Err(Rejection::LastRow);
        }
        let mut next = layout.clone();
        next.rows_mut().remove(pos);
        self.finish(layout, next, &[])
    }

    /// Grow or shrink a card by `delta` (a fraction of the row width).
    pub fn resize_item(&self, layout: &Layout, item_id: &str, delta: f32) -> Reconciled {
        let (row_pos, index) = layout
            .locate(item_id)
            .ok_or_else(|| Rejection::ItemNotFound(item_id.to_string()))?;

        let mut next = layout.clone();
        let row = &mut next.rows_mut()[row_pos];
        let share = equal_share(row.len());
        let cell = &mut row.cells_mut()[index];
        let current = cell.width.unwrap_or(share);
        cell.width = Some(clamp_fraction(current + delta, self.rules.min_width));

        if layout.same_arrangement(&next) {
            return Err(Rejection::Unchanged);
        }
        Ok(next)
    }

    /// Give every card in `row` an equal share of the width.
    pub fn equalize_row(&self, layout: &Layout, row: RowId) -> Reconciled {
        let pos = layout.row_position(row).ok_or(Rejection::RowNotFound(row))?;
        let mut next = layout.clone();
        equalize(&mut next.rows_mut()[pos]);
        if layout.same_arrangement(&next) {
            return Err(Rejection::Unchanged);
        }
        Ok(next)
    }

    fn check_capacity(&self, row: RowId, len: usize) -> Result<(), Rejection> {
        match self.rules.max_items_per_row {
            Some(capacity) if len >= capacity => Err(Rejection::RowFull { row, capacity }),
            _ => Ok(()),
        }
    }

    /// Rebalancing alone never turns a no-op into a change.
    fn finish(&self, before: &Layout, mut after: Layout, touched: &[RowId]) -> Reconciled {
        if before.same_arrangement(&after) {
            return Err(Rejection::Unchanged);
        }
        if self.rules.rebalance_widths {
            for row in after.rows_mut().iter_mut() {
                if touched.contains(&row.id()) {
                    equalize(row);
                }
            }
        }
        Ok(after)
    }
}

fn equalize(row: &mut Row) {
    let share = equal_share(row.len());
    for cell in row.cells_mut().iter_mut() {
        cell.width = Some(share);
    }
}

pub fn apply_drop(layout: &Layout, active: &str, target: &DropTarget) -> Reconciled {
    Reconciler::default().apply_drop(layout, active, target)
}

pub fn reorder_within_row(layout: &Layout, active: &str, over: &str) -> Reconciled {
    Reconciler::default().reorder_within_row(layout, active, over)
}

pub fn move_across_rows(
    layout: &Layout,
    active: &str,
    target_row: RowId,
    over: Option<&str>,
) -> Reconciled {
    Reconciler::default().move_across_rows(layout, active, target_row, over)
}

pub fn move_to_slot(layout: &Layout, active: &str, row: RowId, index: usize) -> Reconciled {
    Reconciler::default().move_to_slot(layout, active, row, index)
}

pub fn move_to_new_row(layout: &Layout, active: &str, new_row: NewRow) -> Reconciled {
    Reconciler::default().move_to_new_row(layout, active, new_row)
}

/// Apply a drop and fall back to the unchanged layout on any rejection.
pub fn reconcile(layout: &Layout, active: &str, target: &DropTarget) -> Layout {
    apply_drop(layout, active, target).unwrap_or_else(|_| layout.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Placement;

    fn board() -> Layout {
        Layout::from_rows([
            Row::of(0, ["a", "b", "c", "d"]),
            Row::of(1, ["e", "f"]),
            Row::of(2, ["g"]),
        ])
        .unwrap()
    }

    fn ids(layout: &Layout) -> Vec<Vec<&str>> {
        layout
            .rows()
            .iter()
            .map(|row| row.item_ids().collect())
            .collect()
    }

    #[test]
    fn move_to_row_end_renumbers_source() {
        let layout = Layout::from_placements([
            Placement::new("1", 0, 0),
            Placement::new("2", 0, 1),
            Placement::new("3", 1, 0),
        ])
        .unwrap();

        let next = move_across_rows(&layout, "1", 1, None).unwrap();
        assert_eq!(next.placement("2"), Some(Placement::new("2", 0, 0)));
        assert_eq!(next.placement("1"), Some(Placement::new("1", 1, 1)));
        assert_eq!(next.placement("3"), Some(Placement::new("3", 1, 0)));
    }

    #[test]
    fn reorder_uses_array_move_semantics() {
        let layout = board();
        let forward = reorder_within_row(&layout, "a", "c").unwrap();
        assert_eq!(ids(&forward)[0], vec!["b", "c", "a", "d"]);

        let backward = reorder_within_row(&layout, "d", "b").unwrap();
        assert_eq!(ids(&backward)[0], vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn reorder_onto_self_is_rejected() {
        let layout = board();
        assert_eq!(
            reorder_within_row(&layout, "a", "a"),
            Err(Rejection::SelfTarget)
        );
        assert_eq!(reconcile(&layout, "a", &DropTarget::item("a")), layout);
    }

    #[test]
    fn reorder_across_rows_is_refused() {
        assert_eq!(
            reorder_within_row(&board(), "a", "e"),
            Err(Rejection::CrossRow)
        );
    }

    #[test]
    fn missing_items_are_rejected() {
        let layout = board();
        assert_eq!(
            reorder_within_row(&layout, "zz", "a"),
            Err(Rejection::ItemNotFound("zz".to_string()))
        );
        assert_eq!(
            reorder_within_row(&layout, "a", "zz"),
            Err(Rejection::TargetNotFound("zz".to_string()))
        );
        assert_eq!(
            move_across_rows(&layout, "a", 9, None),
            Err(Rejection::RowNotFound(9))
        );
        assert_eq!(
            move_across_rows(&layout, "a", 1, Some("b")),
            Err(Rejection::TargetNotFound("b".to_string()))
        );
    }

    #[test]
    fn cross_row_move_inserts_before_over_item() {
        let next = move_across_rows(&board(), "b", 1, Some("f")).unwrap();
        assert_eq!(
            ids(&next),
            vec![vec!["a", "c", "d"], vec!["e", "b", "f"], vec!["g"]]
        );
    }

    #[test]
    fn emptied_source_row_is_pruned() {
        let next = move_across_rows(&board(), "g", 0, Some("a")).unwrap();
        assert_eq!(next.row_ids(), vec![0, 1]);
        assert_eq!(ids(&next)[0], vec!["g", "a", "b", "c", "d"]);
    }

    #[test]
    fn same_row_without_over_moves_to_end() {
        let next = move_across_rows(&board(), "a", 0, None).unwrap();
        assert_eq!(ids(&next)[0], vec!["b", "c", "d", "a"]);
        assert_eq!(
            move_across_rows(&board(), "d", 0, None),
            Err(Rejection::Unchanged)
        );
    }

    #[test]
    fn slot_moves_adjust_for_the_removed_cell() {
        let layout = board();
        let next = move_to_slot(&layout, "a", 0, 3).unwrap();
        assert_eq!(ids(&next)[0], vec!["b", "c", "a", "d"]);

        let next = move_to_slot(&layout, "d", 0, 0).unwrap();
        assert_eq!(ids(&next)[0], vec!["d", "a", "b", "c"]);

        assert_eq!(move_to_slot(&layout, "b", 0, 1), Err(Rejection::Unchanged));
        assert_eq!(move_to_slot(&layout, "b", 0, 2), Err(Rejection::Unchanged));
        assert_eq!(move_to_slot(&layout, "g", 2, 0), Err(Rejection::Unchanged));
    }

    #[test]
    fn slot_index_clamps_to_row_end() {
        let next = move_to_slot(&board(), "a", 1, 40).unwrap();
        assert_eq!(ids(&next)[1], vec!["e", "f", "a"]);
    }

    #[test]
    fn full_rows_refuse_new_cards() {
        let reconciler = Reconciler::new(ReconcileRules::default().with_max_items_per_row(4));
        let layout = board();
        assert_eq!(
            reconciler.move_to_slot(&layout, "e", 0, 1),
            Err(Rejection::RowFull { row: 0, capacity: 4 })
        );
        assert!(reconciler.reorder_within_row(&layout, "a", "d").is_ok());
        assert!(reconciler.move_across_rows(&layout, "a", 1, None).is_ok());
    }

    #[test]
    fn new_row_is_spliced_above_and_below() {
        let layout = board();
        let above = move_to_new_row(&layout, "b", NewRow::Above(1)).unwrap();
        assert_eq!(above.row_ids(), vec![0, 3, 1, 2]);
        assert_eq!(
            ids(&above),
            vec![vec!["a", "c", "d"], vec!["b"], vec!["e", "f"], vec!["g"]]
        );

        let below = move_to_new_row(&layout, "e", NewRow::Below(2)).unwrap();
        assert_eq!(below.row_ids(), vec![0, 1, 2, 3]);
        assert_eq!(ids(&below)[3], vec!["e"]);

        let end = move_to_new_row(&layout, "a", NewRow::End).unwrap();
        assert_eq!(end.row_ids(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn new_row_accounts_for_pruned_source() {
        let layout = board();
        let next = move_to_new_row(&layout, "g", NewRow::Above(0)).unwrap();
        assert_eq!(next.row_ids(), vec![3, 0, 1]);
        assert_eq!(ids(&next)[0], vec!["g"]);
    }

    #[test]
    fn lone_card_next_to_its_own_row_is_unchanged() {
        let layout = board();
        for anchor in [NewRow::Above(2), NewRow::Below(2), NewRow::Below(1), NewRow::End] {
            assert_eq!(
                move_to_new_row(&layout, "g", anchor),
                Err(Rejection::Unchanged),
                "{anchor:?}"
            );
        }
        assert_eq!(
            move_to_new_row(&layout, "a", NewRow::Above(7)),
            Err(Rejection::RowNotFound(7))
        );
    }

    #[test]
    fn drop_dispatch_routes_by_target() {
        let layout = board();
        let by_card = apply_drop(&layout, "a", &DropTarget::item("e")).unwrap();
        assert_eq!(ids(&by_card)[1], vec!["a", "e", "f"]);

        let by_row = apply_drop(&layout, "a", &DropTarget::Row(2)).unwrap();
        assert_eq!(ids(&by_row)[2], vec!["g", "a"]);

        assert_eq!(
            apply_drop(&layout, "a", &DropTarget::Row(0)),
            Err(Rejection::Unchanged)
        );

        let by_slot = apply_drop(&layout, "f", &DropTarget::Slot { row: 1, index: 0 }).unwrap();
        assert_eq!(ids(&by_slot)[1], vec!["f", "e"]);
    }

    #[test]
    fn before_then_after_restores_neighbours() {
        let layout = board();
        let before_c = move_to_slot(&layout, "a", 0, 2).unwrap();
        assert_eq!(ids(&before_c)[0], vec!["b", "a", "c", "d"]);
        let c_index = before_c.placement("c").unwrap().order;
        let after_c = move_to_slot(&before_c, "a", 0, c_index + 1).unwrap();
        assert_eq!(ids(&after_c)[0], vec!["b", "c", "a", "d"]);

        let others: Vec<_> = ids(&after_c)[0]
            .iter()
            .copied()
            .filter(|id| *id != "a")
            .collect();
        assert_eq!(others, vec!["b", "c", "d"]);
    }

    #[test]
    fn edits_insert_and_remove() {
        let reconciler = Reconciler::new(ReconcileRules::default().with_max_items_per_row(2));
        let layout = board();

        assert_eq!(
            reconciler.insert_item(&layout, "a", Insertion::NewRowAtEnd),
            Err(Rejection::DuplicateItem("a".to_string()))
        );
        assert_eq!(
            reconciler.insert_item(&layout, "h", Insertion::EndOfRow(1)),
            Err(Rejection::RowFull { row: 1, capacity: 2 })
        );
        let added = reconciler
            .insert_item(&layout, "h", Insertion::EndOfRow(2))
            .unwrap();
        assert_eq!(ids(&added)[2], vec!["g", "h"]);

        let fresh = reconciler
            .insert_item(&layout, "h", Insertion::NewRowAtEnd)
            .unwrap();
        assert_eq!(fresh.row_ids(), vec![0, 1, 2, 3]);

        let removed = reconciler.remove_item(&layout, "g").unwrap();
        assert_eq!(removed.row_ids(), vec![0, 1]);

        let dropped = reconciler.remove_row(&layout, 0).unwrap();
        assert_eq!(dropped.len(), 3);

        let single = Layout::from_rows([Row::of(0, ["x"])]).unwrap();
        assert_eq!(reconciler.remove_row(&single, 0), Err(Rejection::LastRow));
    }

    #[test]
    fn resizing_clamps_to_min_width() {
        let layout = board();
        let narrowed = Reconciler::default()
            .resize_item(&layout, "e", -0.9)
            .unwrap();
        assert_eq!(narrowed.placement("e").unwrap().width, Some(0.2));

        let widened = Reconciler::default()
            .resize_item(&layout, "e", 0.25)
            .unwrap();
        assert_eq!(widened.placement("e").unwrap().width, Some(0.75));

        let full = Layout::from_rows([Row::new(0, vec![Cell::new("x").with_width(1.0)])]).unwrap();
        assert_eq!(
            Reconciler::default().resize_item(&full, "x", 0.5),
            Err(Rejection::Unchanged)
        );
    }

    #[test]
    fn rebalance_equalizes_touched_rows() {
        let reconciler = Reconciler::new(ReconcileRules::default().rebalance_widths(true));
        let next = reconciler
            .move_across_rows(&board(), "a", 1, None)
            .unwrap();
        let row0: Vec<_> = next.rows()[0].cells().iter().map(|c| c.width).collect();
        let row1: Vec<_> = next.rows()[1].cells().iter().map(|c| c.width).collect();
        assert_eq!(row0, vec![Some(1.0 / 3.0); 3]);
        assert_eq!(row1, vec![Some(1.0 / 3.0); 3]);
        assert_eq!(next.rows()[2].cells()[0].width, None);

        for anchor in [NewRow::Above(2), NewRow::Below(1), NewRow::End] {
            assert_eq!(
                reconciler.move_to_new_row(&board(), "g", anchor),
                Err(Rejection::Unchanged),
                "{anchor:?}"
            );
        }
        assert_eq!(
            reconciler.move_to_slot(&board(), "d", 0, 4),
            Err(Rejection::Unchanged)
        );

        let equal = Reconciler::default().equalize_row(&board(), 1).unwrap();
        assert_eq!(equal.placement("e").unwrap().width, Some(0.5));
        assert_eq!(
            Reconciler::default().equalize_row(&equal, 1),
            Err(Rejection::Unchanged)
        );
    }
}
