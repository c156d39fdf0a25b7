//! Width helpers: card width fractions and terminal display widths.

mod fraction;
mod utils;

pub use fraction::{
    DEFAULT_MAX_ITEMS_PER_ROW, DEFAULT_MIN_WIDTH, clamp_fraction, equal_share, resolve_widths,
};
pub use utils::{display_width, truncate_to_width};
