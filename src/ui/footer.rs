//! Page footer: rule, a fast-ticking local clock, social links and the
//! copyright line.

use ratatui::style::{Modifier, Style};

use crate::app::state::AppState;
use crate::core::content::{PROFILE, SOCIAL_LINKS};

use super::canvas::{text_width, Canvas};
use super::hit::Target;
use super::theme::Theme;

pub fn render(state: &AppState, width: u16, height: u16) -> Canvas {
    let mut canvas = Canvas::new(width, height, Theme::NIGHT_BG);
    let margin: i32 = if state.layout.is_narrow() { 2 } else { 6 };
    let muted = Style::default().fg(Theme::NIGHT_MUTED);

    let rule = "─".repeat(usize::from(width.saturating_sub(2 * margin as u16)));
    canvas.text(margin, 0, &rule, Style::default().fg(Theme::NIGHT_FAINT), 1.0);

    let label = canvas.text(margin, 1, "LOCAL TIME", muted, 1.0);
    canvas.text(
        margin + i32::from(label.width) + 2,
        1,
        state.footer_clock.text(),
        Style::default().fg(Theme::PAPER),
        1.0,
    );

    let copyright = format!("© {} {}", state.year, PROFILE.short_name);
    let right = i32::from(width) - margin - text_width(&copyright) as i32;
    canvas.text(right, 1, &copyright, muted, 1.0);

    // Social links share the clock row when they fit between the two ends.
    let links: Vec<String> = SOCIAL_LINKS.iter().map(|l| l.name.to_string()).collect();
    let links_w: i32 = links.iter().map(|l| text_width(l) as i32 + 3).sum::<i32>() - 3;
    let (mut x, y) = if state.layout.is_narrow() {
        (margin, 2)
    } else {
        ((i32::from(width) - links_w) / 2, 1)
    };
    for (i, name) in links.iter().enumerate() {
        let mut style = muted;
        if state.is_hovered(Target::Social(i)) {
            style = Style::default().fg(Theme::PAPER).add_modifier(Modifier::UNDERLINED);
        }
        let drawn = canvas.text(x, y, name, style, 1.0);
        canvas.hit(drawn, Target::Social(i));
        x += text_width(name) as i32 + 3;
    }

    canvas
}
