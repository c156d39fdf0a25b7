/// Default cap on cards per row used by the indicator-based editor.
pub const DEFAULT_MAX_ITEMS_PER_ROW: usize = 4;

/// Default minimum card width as a fraction of the row.
pub const DEFAULT_MIN_WIDTH: f32 = 0.2;

/// Equal share of a row for `count` cards.
pub fn equal_share(count: usize) -> f32 {
    if count == 0 { 1.0 } else { 1.0 / count as f32 }
}

/// Clamp a width fraction into `[min, 1.0]`. A `min` outside `(0, 1]` is
/// treated as the nearest valid bound.
pub fn clamp_fraction(width: f32, min: f32) -> f32 {
    let min = if min.is_finite() {
        min.clamp(f32::EPSILON, 1.0)
    } else {
        DEFAULT_MIN_WIDTH
    };
    if width.is_nan() {
        return min;
    }
    width.clamp(min, 1.0)
}

/// Resolve the widths of a row, filling missing entries with an equal share.
pub fn resolve_widths(widths: &[Option<f32>]) -> Vec<f32> {
    let share = equal_share(widths.len());
    widths.iter().map(|width| width.unwrap_or(share)).collect()
}
