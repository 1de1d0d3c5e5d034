//! Contact: dark panel with the copyable email, social links, an
//! availability note and the local-time strip along the bottom.

use std::f64::consts::TAU;

use ratatui::style::{Modifier, Style};

use crate::app::page::px_rows;
use crate::app::state::AppState;
use crate::core::clipboard::CopyState;
use crate::core::content::{PROFILE, SOCIAL_LINKS};

use super::canvas::{spaced, text_width, Canvas};
use super::hit::Target;
use super::theme::Theme;

/// Dot grid spacing and drift speed (columns per second).
const DOT_COLS: u16 = 4;
const DOT_ROWS: u16 = 2;
const DOT_DRIFT: f64 = 1.5;

const CTA_PULSE_MS: f64 = 2000.0;
const CLOCK_PULSE_MS: f64 = 3000.0;

pub fn render(state: &AppState, width: u16, height: u16) -> Canvas {
    let mut canvas = Canvas::new(width, height, Theme::NIGHT_BG);
    draw_dots(state, &mut canvas);

    let margin: i32 = if state.layout.is_narrow() { 2 } else { 6 };
    let progress = state.contact_progress();
    let dy = px_rows(state.motion.contact_y.sample(progress)).round() as i32;
    let opacity = state.motion.contact_opacity.sample(progress);
    draw_block(state, &mut canvas, margin, 2 + dy, opacity);
    draw_strip(state, &mut canvas, margin);

    canvas
}

/// Column offset of the dot grid `now_ms` into the session.
fn dot_shift(now_ms: u64, reduced_motion: bool) -> u16 {
    if reduced_motion {
        return 0;
    }
    let travelled = (now_ms as f64 / 1000.0 * DOT_DRIFT) as u64;
    (travelled % u64::from(DOT_COLS)) as u16
}

fn draw_dots(state: &AppState, canvas: &mut Canvas) {
    let shift = dot_shift(state.now, state.config.reduced_motion);
    let dot = Style::default().fg(Theme::NIGHT_FAINT);
    for row in (1..canvas.height()).step_by(usize::from(DOT_ROWS)) {
        let stagger = (row / DOT_ROWS) % 2 * (DOT_COLS / 2);
        let mut col = (shift + stagger) % DOT_COLS;
        while col < canvas.width() {
            canvas.text(i32::from(col), i32::from(row), "·", dot, 1.0);
            col += DOT_COLS;
        }
    }
}

fn pulse(state: &AppState, period_ms: f64, low: f64) -> f64 {
    if state.config.reduced_motion {
        return 1.0;
    }
    let phase = (state.now as f64 % period_ms) / period_ms;
    let wave = 0.5 - 0.5 * (phase * TAU).cos();
    1.0 - (1.0 - low) * wave
}

fn draw_block(state: &AppState, canvas: &mut Canvas, x: i32, top: i32, opacity: f64) {
    let muted = Style::default().fg(Theme::NIGHT_MUTED);
    let paper = Style::default().fg(Theme::PAPER).add_modifier(Modifier::BOLD);

    canvas.text(x, top, &spaced("06 — GET IN TOUCH"), muted, opacity);
    canvas.text(x, top + 2, "Let's Create", paper, opacity);
    canvas.text(
        x,
        top + 3,
        "Something Amazing",
        muted.add_modifier(Modifier::BOLD),
        opacity,
    );

    let email_y = top + 6;
    let mut email_style = paper;
    if state.is_hovered(Target::Email) {
        email_style = email_style.add_modifier(Modifier::UNDERLINED);
    }
    let email = canvas.text(x, email_y, PROFILE.email, email_style, opacity);
    let icon = match state.copy.state() {
        CopyState::Idle => "📋",
        CopyState::Copied => "✓",
    };
    let icon = canvas.text(x + text_width(PROFILE.email) as i32 + 2, email_y, icon, paper, opacity);
    if opacity > 0.0 {
        canvas.hit(email.union(icon), Target::Email);
    }

    let underline = (text_width(PROFILE.email) as f64 * state.contact_reveal.value()).round() as usize;
    canvas.text(x, email_y + 1, &"━".repeat(underline), muted, opacity);
    if state.copy.is_copied() {
        canvas.text(x, email_y + 2, "Email copied to clipboard!", muted, opacity);
    }

    let mut col = x;
    for (i, link) in SOCIAL_LINKS.iter().enumerate() {
        let mut style = muted;
        if state.is_hovered(Target::Social(i)) {
            style = Style::default().fg(Theme::PAPER).add_modifier(Modifier::UNDERLINED);
        }
        let label = format!("{} ↗", link.name);
        let drawn = canvas.text(col, top + 10, &label, style, opacity);
        if opacity > 0.0 {
            canvas.hit(drawn, Target::Social(i));
        }
        col += text_width(&label) as i32 + 4;
    }

    let cta = opacity * pulse(state, CTA_PULSE_MS, 0.5);
    canvas.text(x, top + 12, PROFILE.availability, Style::default().fg(Theme::PAPER), cta);
}

/// Rule, local time and copyright pinned to the bottom of the panel.
fn draw_strip(state: &AppState, canvas: &mut Canvas, margin: i32) {
    let width = canvas.width();
    let bottom = i32::from(canvas.height());
    let rule = "─".repeat(usize::from(width.saturating_sub(2 * margin as u16)));
    canvas.text(margin, bottom - 3, &rule, Style::default().fg(Theme::NIGHT_FAINT), 1.0);

    let muted = Style::default().fg(Theme::NIGHT_MUTED);
    let label = canvas.text(margin, bottom - 2, "LOCAL TIME", muted, 1.0);
    let clock = Style::default().fg(Theme::PAPER);
    canvas.text(
        margin + i32::from(label.width) + 2,
        bottom - 2,
        state.contact_clock.text(),
        clock,
        pulse(state, CLOCK_PULSE_MS, 0.6),
    );

    let copyright = format!("© {} {}", state.year, PROFILE.short_name);
    let x = i32::from(width) - margin - text_width(&copyright) as i32;
    canvas.text(x, bottom - 2, &copyright, muted, 1.0);
}
