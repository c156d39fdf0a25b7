//! Display width helpers.
//!
//! Provides ANSI-aware width calculation for rendered card text so box
//! padding stays aligned when payloads carry colour codes.

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

/// Truncate `text` so its display width fits in `max` columns.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    let mut out = String::new();
    let mut used = 0;
    for ch in clean_str.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
