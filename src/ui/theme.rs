//! Colour palette and text styles used across the UI.
//!
//! Opacity has no terminal equivalent, so faded text is drawn in a colour
//! blended toward whatever is behind it (see [`fade`]).

use ratatui::style::{Color, Modifier, Style};

use crate::core::interpolate::lerp;

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── light page ─────────────────────────────────────────────
    pub const PAGE_BG: Color = Color::Rgb(255, 255, 255);
    pub const INK: Color = Color::Rgb(10, 10, 10);
    pub const MUTED: Color = Color::Rgb(113, 113, 122);
    pub const RULE: Color = Color::Rgb(228, 228, 231);
    pub const BODY: Color = Color::Rgb(63, 63, 70);

    // ── dark contact block and cards ───────────────────────────
    pub const NIGHT_BG: Color = Color::Rgb(0, 0, 0);
    pub const CARD_BG: Color = Color::Rgb(24, 24, 27);
    pub const PAPER: Color = Color::Rgb(255, 255, 255);
    pub const NIGHT_MUTED: Color = Color::Rgb(153, 153, 153);
    pub const NIGHT_FAINT: Color = Color::Rgb(38, 38, 38);

    pub fn heading_style() -> Style {
        Style::default().fg(Self::INK).add_modifier(Modifier::BOLD)
    }

    pub fn label_style() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn body_style() -> Style {
        Style::default().fg(Self::BODY)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .fg(Self::PAGE_BG)
            .bg(Self::INK)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

/// `fg` drawn at `opacity` over `bg`.  RGB colours blend per channel;
/// anything else snaps to whichever side is closer.
pub fn fade(fg: Color, bg: Color, opacity: f64) -> Color {
    let t = if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        1.0
    };
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => Color::Rgb(
            channel(br, fr, t),
            channel(bg_, fg_, t),
            channel(bb, fb, t),
        ),
        _ if t >= 0.5 => fg,
        _ => bg,
    }
}

fn channel(from: u8, to: u8, t: f64) -> u8 {
    lerp(f64::from(from), f64::from(to), t).round().clamp(0.0, 255.0) as u8
}

/// Rec. 601 luma, for the grayscale portrait on hover.
pub fn grayscale(r: u8, g: u8, b: u8) -> Color {
    let y = (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)).round() as u8;
    Color::Rgb(y, y, y)
}
