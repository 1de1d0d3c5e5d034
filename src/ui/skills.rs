//! Two marquee rows of skills drifting in opposite directions.

use ratatui::style::{Modifier, Style};

use crate::app::state::AppState;
use crate::core::content::{CONCEPTS, TECH_ITEMS};

use super::canvas::{spaced, Canvas};
use super::theme::Theme;

/// Marquee speed in columns per second.
pub const MARQUEE_COLS_PER_SEC: f64 = 12.0;

const SEPARATOR: &str = "  •  ";

pub fn render(state: &AppState, width: u16, height: u16) -> Canvas {
    let mut canvas = Canvas::new(width, height, Theme::PAGE_BG);
    let margin = if state.layout.is_narrow() { 2 } else { 6 };
    canvas.text(margin, 1, &spaced("04 — SKILLS"), Theme::label_style(), 1.0);

    let shift = if state.config.reduced_motion {
        0
    } else {
        (state.now as f64 / 1000.0 * MARQUEE_COLS_PER_SEC) as usize
    };

    let tech = marquee_line(TECH_ITEMS, width, shift, true);
    let concepts = marquee_line(CONCEPTS, width, shift, false);
    let strong = Style::default().fg(Theme::INK).add_modifier(Modifier::BOLD);
    canvas.text(0, 3, &tech, strong, 1.0);
    canvas.text(0, 5, &concepts, Theme::label_style(), 1.0);

    canvas
}

/// `width` columns of the endless `items` strip, `shift` columns along.
/// Leftward rows read further into the strip as time passes; rightward
/// rows read backwards.
pub fn marquee_line(items: &[&str], width: u16, shift: usize, leftward: bool) -> String {
    let strip: Vec<char> = items
        .iter()
        .flat_map(|item| item.chars().chain(SEPARATOR.chars()))
        .collect();
    if strip.is_empty() {
        return String::new();
    }
    let len = strip.len();
    let start = if leftward {
        shift % len
    } else {
        (len - shift % len) % len
    };
    (0..usize::from(width))
        .map(|col| strip[(start + col) % len])
        .collect()
}
