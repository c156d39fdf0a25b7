//! Plain-text board renderer.
//!
//! Each row becomes a strip of boxes whose widths follow the card width
//! fractions. Titles are truncated by display width so wide glyphs and ANSI
//! colour codes never break the box edges.

use std::io::Write;

use crate::board::{BoardView, CardContent, CardView};
use crate::error::Result;
use crate::model::ItemId;
use crate::width::{display_width, truncate_to_width};

/// Narrowest box drawn for a card, borders included.
const MIN_CARD_COLUMNS: usize = 4;

#[derive(Debug, Clone)]
pub struct RendererSettings {
    /// Total columns available to a row.
    pub width: usize,
    pub show_row_ids: bool,
    /// Card drawn with a double border, usually the one being dragged.
    pub highlight: Option<ItemId>,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            width: 80,
            show_row_ids: false,
            highlight: None,
        }
    }
}

struct Border {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

const SINGLE: Border = Border {
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    horizontal: '─',
    vertical: '│',
};

const DOUBLE: Border = Border {
    top_left: '╔',
    top_right: '╗',
    bottom_left: '╚',
    bottom_right: '╝',
    horizontal: '═',
    vertical: '║',
};

pub struct TextRenderer {
    settings: RendererSettings,
}

impl TextRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(RendererSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut RendererSettings {
        &mut self.settings
    }

    pub fn render<T: CardContent>(
        &self,
        writer: &mut impl Write,
        view: &BoardView<'_, T>,
    ) -> Result<()> {
        for line in self.lines(view) {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn render_to_string<T: CardContent>(&self, view: &BoardView<'_, T>) -> String {
        self.lines(view).join("\n")
    }

    fn lines<T: CardContent>(&self, view: &BoardView<'_, T>) -> Vec<String> {
        let mut lines = Vec::new();
        for row in view.rows() {
            if self.settings.show_row_ids {
                lines.push(format!("row {}", row.id));
            }

            let columns = card_columns(&row.cards, self.settings.width);
            let has_body = row.cards.iter().any(|card| card.item.data.body().is_some());

            let mut top = String::new();
            let mut title = String::new();
            let mut body = String::new();
            let mut bottom = String::new();

            for (card, cols) in row.cards.iter().zip(columns) {
                let border = if self.is_highlighted(card) {
                    &DOUBLE
                } else {
                    &SINGLE
                };
                let inner = cols.saturating_sub(2);
                let edge: String = std::iter::repeat(border.horizontal).take(inner).collect();

                top.push(border.top_left);
                top.push_str(&edge);
                top.push(border.top_right);

                push_content(&mut title, border, card.item.data.title(), inner);
                if has_body {
                    push_content(&mut body, border, card.item.data.body().unwrap_or(""), inner);
                }

                bottom.push(border.bottom_left);
                bottom.push_str(&edge);
                bottom.push(border.bottom_right);
            }

            lines.push(top);
            lines.push(title);
            if has_body {
                lines.push(body);
            }
            lines.push(bottom);
        }
        lines
    }

    fn is_highlighted<T>(&self, card: &CardView<'_, T>) -> bool {
        self.settings.highlight.as_deref() == Some(card.item.id.as_str())
    }
}

fn push_content(line: &mut String, border: &Border, text: &str, inner: usize) {
    let mut cell = truncate_to_width(text, inner);
    pad_to_width(&mut cell, inner);
    line.push(border.vertical);
    line.push_str(&cell);
    line.push(border.vertical);
}

fn pad_to_width(text: &mut String, width: usize) {
    let display = display_width(text);
    if display < width {
        text.push_str(&" ".repeat(width - display));
    }
}

/// Split `total` columns across a row by width fraction. Over-full rows are
/// scaled down so the fractions sum to one.
fn card_columns<T>(cards: &[CardView<'_, T>], total: usize) -> Vec<usize> {
    let sum: f32 = cards.iter().map(|card| card.width).sum();
    let scale = if sum > 1.0 { 1.0 / sum } else { 1.0 };
    cards
        .iter()
        .map(|card| {
            let cols = (card.width * scale * total as f32).floor() as usize;
            cols.max(MIN_CARD_COLUMNS)
        })
        .collect()
}
