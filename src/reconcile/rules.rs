use crate::width::{DEFAULT_MAX_ITEMS_PER_ROW, DEFAULT_MIN_WIDTH};

/// Policy knobs shared by every reconciler operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcileRules {
    /// Cap on cards per row for moves that add a card to a row. `None`
    /// leaves rows unbounded.
    pub max_items_per_row: Option<usize>,
    /// Lower bound applied when resizing a card.
    pub min_width: f32,
    /// Reset every row touched by a move to equal widths.
    pub rebalance_widths: bool,
}

impl Default for ReconcileRules {
    fn default() -> Self {
        Self {
            max_items_per_row: None,
            min_width: DEFAULT_MIN_WIDTH,
            rebalance_widths: false,
        }
    }
}

impl ReconcileRules {
    /// Defaults plus the indicator editor's cap of
    /// [`DEFAULT_MAX_ITEMS_PER_ROW`] cards per row.
    pub fn capped() -> Self {
        Self::default().with_max_items_per_row(DEFAULT_MAX_ITEMS_PER_ROW)
    }

    pub fn with_max_items_per_row(mut self, max: usize) -> Self {
        self.max_items_per_row = Some(max);
        self
    }

    pub fn with_min_width(mut self, min_width: f32) -> Self {
        self.min_width = min_width;
        self
    }

    pub fn rebalance_widths(mut self, enabled: bool) -> Self {
        self.rebalance_widths = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_preset_uses_editor_limit() {
        let rules = ReconcileRules::capped();
        assert_eq!(rules.max_items_per_row, Some(4));
        assert_eq!(rules.min_width, DEFAULT_MIN_WIDTH);
        assert!(!rules.rebalance_widths);
        assert_eq!(ReconcileRules::default().max_items_per_row, None);
    }
}
