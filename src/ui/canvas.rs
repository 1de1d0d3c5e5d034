//! Off-screen section buffers.
//!
//! Each section draws itself into a [`Canvas`] in its own coordinates
//! (row 0 = section top).  The page composer then copies whichever rows
//! are inside the viewport onto the frame, so sections never deal with
//! negative screen positions or clipping.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
};

use unicode_width::UnicodeWidthChar;

use super::hit::{HitMap, Target};
use super::theme::fade;

pub struct Canvas {
    pub buf: Buffer,
    hits: Vec<(Rect, Target)>,
}

impl Canvas {
    /// Blank canvas filled with `bg`.
    pub fn new(width: u16, height: u16, bg: Color) -> Self {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Style::default().bg(bg));
        Self {
            buf,
            hits: Vec::new(),
        }
    }

    pub fn area(&self) -> Rect {
        self.buf.area
    }

    pub fn width(&self) -> u16 {
        self.buf.area.width
    }

    pub fn height(&self) -> u16 {
        self.buf.area.height
    }

    /// Register a hit zone in canvas coordinates.
    pub fn hit(&mut self, rect: Rect, target: Target) {
        let rect = rect.intersection(self.area());
        if !rect.is_empty() {
            self.hits.push((rect, target));
        }
    }

    /// Write `text` at a possibly off-canvas position, fading the
    /// foreground toward each cell's background.  Returns the drawn span.
    pub fn text(&mut self, x: i32, y: i32, text: &str, style: Style, opacity: f64) -> Rect {
        put_text(&mut self.buf, x, y, text, style, opacity)
    }

    /// Fill a rectangle's background.
    pub fn fill(&mut self, rect: Rect, bg: Color) {
        let rect = rect.intersection(self.area());
        self.buf.set_style(rect, Style::default().bg(bg));
    }

    /// Copy onto `dest`, with canvas row 0 landing on screen row
    /// `dest.y + top` (which may be above or below the viewport).
    /// Hit zones are translated and clipped the same way.
    pub fn blit(self, top: i32, dest: Rect, out: &mut Buffer, hits: &mut HitMap) {
        let src = self.area();
        for row in 0..src.height {
            let screen = i32::from(dest.y) + top + i32::from(row);
            if screen < i32::from(dest.y) || screen >= i32::from(dest.bottom()) {
                continue;
            }
            for col in 0..src.width.min(dest.width) {
                let (Some(from), Some(to)) = (
                    self.buf.cell(Position::new(col, row)),
                    out.cell_mut(Position::new(dest.x + col, screen as u16)),
                ) else {
                    continue;
                };
                *to = from.clone();
            }
        }

        for (rect, target) in self.hits {
            let y = i32::from(dest.y) + top + i32::from(rect.y);
            let y0 = y.max(i32::from(dest.y));
            let y1 = (y + i32::from(rect.height)).min(i32::from(dest.bottom()));
            if y1 <= y0 {
                continue;
            }
            let moved = Rect::new(dest.x + rect.x, y0 as u16, rect.width, (y1 - y0) as u16);
            hits.push(moved.intersection(dest), target);
        }
    }
}

/// Write `text` into any buffer at absolute `(x, y)`, clipping at the
/// buffer edges.  Wide glyphs take two cells; a glyph that would straddle
/// the right edge is dropped.
pub fn put_text(buf: &mut Buffer, x: i32, y: i32, text: &str, style: Style, opacity: f64) -> Rect {
    let area = buf.area;
    if y < i32::from(area.y) || y >= i32::from(area.bottom()) || opacity <= 0.0 {
        return Rect::default();
    }
    let row = y as u16;
    let mut col = x;
    let mut first: Option<u16> = None;
    let mut last = 0u16;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0) as i32;
        if w == 0 {
            continue;
        }
        if col + w > i32::from(area.right()) {
            break;
        }
        if col >= i32::from(area.x) {
            let c = col as u16;
            let mut bg = Color::Reset;
            if let Some(cell) = buf.cell_mut(Position::new(c, row)) {
                bg = style.bg.unwrap_or(cell.bg);
                let fg = style.fg.unwrap_or(cell.fg);
                cell.reset();
                cell.set_char(ch)
                    .set_style(style)
                    .set_fg(fade(fg, bg, opacity))
                    .set_bg(bg);
            }
            // Trailing half of a wide glyph.
            for extra in 1..w {
                if let Some(cell) = buf.cell_mut(Position::new(c + extra as u16, row)) {
                    cell.reset();
                    cell.set_bg(bg);
                }
            }
            first.get_or_insert(c);
            last = c + (w - 1) as u16;
        }
        col += w;
    }
    match first {
        Some(start) => Rect::new(start, row, last - start + 1, 1),
        None => Rect::default(),
    }
}

/// Display width in columns.
pub fn text_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Letter-spaced label text (`"ABC"` → `"A B C"`).
pub fn spaced(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, ch) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Greedy word wrap.  Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut len = 0usize;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if len > 0 {
                lines.push(std::mem::take(&mut line));
                len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }
        let needed = if len == 0 { word.len() } else { len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut line));
            len = 0;
        }
        if len > 0 {
            line.push(' ');
            len += 1;
        }
        line.extend(word.iter());
        len += word.len();
    }
    if len > 0 {
        lines.push(line);
    }
    lines
}
