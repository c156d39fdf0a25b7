//! Read-only views joining a [`Layout`] with host items.

use std::collections::HashMap;

use crate::model::{Item, Layout, RowId};
use crate::width::resolve_widths;

/// Text a payload exposes to renderers.
pub trait CardContent {
    fn title(&self) -> &str;

    fn body(&self) -> Option<&str> {
        None
    }
}

impl CardContent for String {
    fn title(&self) -> &str {
        self
    }
}

impl CardContent for &str {
    fn title(&self) -> &str {
        self
    }
}

#[derive(Debug)]
pub struct CardView<'a, T> {
    pub item: &'a Item<T>,
    pub order: usize,
    /// Resolved fraction of the row width.
    pub width: f32,
}

#[derive(Debug)]
pub struct RowView<'a, T> {
    pub id: RowId,
    pub cards: Vec<CardView<'a, T>>,
}

/// Rows of cards in display order.
#[derive(Debug)]
pub struct BoardView<'a, T> {
    rows: Vec<RowView<'a, T>>,
}

impl<'a, T> BoardView<'a, T> {
    /// Group `items` by the layout. Placements without a matching item are
    /// skipped, as are rows left with no cards.
    pub fn new(layout: &Layout, items: &'a [Item<T>]) -> Self {
        let by_id: HashMap<&str, &'a Item<T>> =
            items.iter().map(|item| (item.id.as_str(), item)).collect();

        let rows = layout
            .rows()
            .iter()
            .filter_map(|row| {
                let widths: Vec<Option<f32>> = row.cells().iter().map(|cell| cell.width).collect();
                let widths = resolve_widths(&widths);
                let cards: Vec<CardView<'a, T>> = row
                    .cells()
                    .iter()
                    .zip(widths)
                    .enumerate()
                    .filter_map(|(order, (cell, width))| {
                        by_id.get(cell.item_id.as_str()).map(|&item| CardView {
                            item,
                            order,
                            width,
                        })
                    })
                    .collect();
                (!cards.is_empty()).then(|| RowView { id: row.id(), cards })
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[RowView<'a, T>] {
        &self.rows
    }

    pub fn card_count(&self) -> usize {
        self.rows.iter().map(|row| row.cards.len()).sum()
    }

    pub fn card(&self, item_id: &str) -> Option<&CardView<'a, T>> {
        self.rows
            .iter()
            .flat_map(|row| row.cards.iter())
            .find(|card| card.item.id == item_id)
    }
}
