//! The sticky hero frame: portrait, scrambled name, role, resume link and
//! the about-me block that fades in underneath.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::app::assets::ImageSlot;
use crate::app::state::AppState;
use crate::core::content::PROFILE;

use super::canvas::{wrap, Canvas};
use super::hit::Target;
use super::image::{render_halfblocks, render_placeholder, ImageStyle};
use super::motion::HeroMotion;
use super::theme::Theme;

/// Portrait aspect (width / height) in half-block cells: 3:4 in square
/// pixels, each cell being one pixel wide and two tall.
const PORTRAIT_COLS_PER_ROW: f64 = 1.5;

/// Draw the hero at the current scroll offset into a viewport-tall canvas.
pub fn render(state: &AppState, width: u16, height: u16) -> Canvas {
    let mut canvas = Canvas::new(width, height, Theme::PAGE_BG);
    let narrow = state.layout.is_narrow();
    let m = HeroMotion::at(
        state.scroll.offset(),
        state.layout.viewport_rows(),
        narrow,
    );

    let portrait = portrait_rect(width, height, narrow, &m);
    draw_portrait(state, &mut canvas, portrait);

    let (text_x, text_top) = if narrow {
        (2, i32::from(portrait.bottom()) + 1)
    } else {
        (i32::from(width / 2) + 2, (f64::from(height) * 0.38) as i32)
    };
    draw_intro(state, &mut canvas, &m, text_x, text_top);
    draw_about(&mut canvas, &m, text_x);

    canvas
}

fn portrait_rect(width: u16, height: u16, narrow: bool, m: &HeroMotion) -> Rect {
    let (col_w, avail_h, top) = if narrow {
        (f64::from(width), f64::from(height) * 0.45, 1.0)
    } else {
        (f64::from(width / 2), f64::from(height.saturating_sub(2)), 1.0)
    };
    let avail_w = (col_w - 4.0).max(1.0);
    let base_rows = avail_h.min(avail_w / PORTRAIT_COLS_PER_ROW);
    let rows = (base_rows * m.image_scale).round().max(1.0);
    let cols = (rows * PORTRAIT_COLS_PER_ROW).round().min(avail_w);

    let x = (col_w - cols) / 2.0 + m.image_shift * cols;
    let y = top + (avail_h - rows) / 2.0;
    let x0 = x.round().max(0.0);
    let cols = (cols - (x0 - x.round())).max(0.0);
    Rect::new(x0 as u16, y.round().max(0.0) as u16, cols as u16, rows as u16)
}

fn draw_portrait(state: &AppState, canvas: &mut Canvas, rect: Rect) {
    let hovered = state.is_hovered(Target::Portrait);
    match state.images.slot(PROFILE.portrait) {
        Some(ImageSlot::Ready(img)) => {
            let style = ImageStyle {
                grayscale: hovered,
                cover: true,
                ..ImageStyle::default()
            };
            render_halfblocks(img, rect, &mut canvas.buf, style);
        }
        Some(ImageSlot::Loading) => render_placeholder(rect, &mut canvas.buf, "loading…", Theme::PAGE_BG),
        _ => render_placeholder(rect, &mut canvas.buf, PROFILE.short_name, Theme::PAGE_BG),
    }
    canvas.hit(rect, Target::Portrait);
}

/// Name, role and resume link with their parallax drops.
fn draw_intro(state: &AppState, canvas: &mut Canvas, m: &HeroMotion, x: i32, top: i32) {
    let opacity = m.text_opacity;
    if opacity <= 0.0 {
        return;
    }

    let name_y = top + m.name_dy.round() as i32;
    let mut name_style = Theme::heading_style();
    if state.is_hovered(Target::HeroName) {
        name_style = name_style.add_modifier(Modifier::UNDERLINED);
    }
    let name = canvas.text(x, name_y, state.name.text(), name_style, opacity);
    canvas.hit(name, Target::HeroName);

    let role_y = top + 2 + m.role_dy.round() as i32;
    canvas.text(x, role_y, PROFILE.role, Style::default().fg(Theme::MUTED), opacity);

    let resume_y = top + 4 + m.resume_dy.round() as i32;
    let hovered = state.is_hovered(Target::Resume);
    let arrow_dx = if hovered { 2 } else { 1 };
    let label = canvas.text(x, resume_y, "My Resume", Theme::heading_style(), opacity);
    let arrow = canvas.text(
        x + label.width as i32 + arrow_dx,
        resume_y - i32::from(hovered),
        "↗",
        Theme::heading_style(),
        opacity,
    );
    let bar = if hovered { 16 } else { 10 };
    canvas.text(x, resume_y + 1, &"━".repeat(bar), Style::default().fg(Theme::INK), opacity);
    canvas.hit(label.union(arrow), Target::Resume);
}

/// Full name, tagline and bio sliding in from the left.
fn draw_about(canvas: &mut Canvas, m: &HeroMotion, x: i32) {
    if m.about <= 0.0 {
        return;
    }
    let width = canvas.width();
    let avail = f64::from(width.saturating_sub(x.max(0) as u16 + 2));
    let wrap_width = ((avail * m.about_scale()).floor() as usize).max(10);
    let bio = wrap(PROFILE.bio, wrap_width);
    let bio_rows = bio.len().min(6);

    let block_rows = 4 + bio_rows as i32;
    let top = i32::from(canvas.height()) - 1 - block_rows + m.about_dy().round() as i32;
    let [dx_name, dx_tag, dx_bio] = m.about_dx().map(|d| d.round() as i32);

    canvas.text(x + dx_name, top, PROFILE.full_name, Theme::heading_style(), m.about);
    canvas.text(
        x + dx_tag,
        top + 2,
        PROFILE.tagline,
        Theme::heading_style(),
        m.about,
    );
    for (i, line) in bio.iter().take(bio_rows).enumerate() {
        canvas.text(x + dx_bio, top + 4 + i as i32, line, Theme::body_style(), m.about);
    }

    if m.about_interactive() {
        let x0 = x.max(0) as u16;
        let y0 = top.max(0) as u16;
        let block = Rect::new(x0, y0, width.saturating_sub(x0), (block_rows + top.min(0)).max(0) as u16);
        canvas.hit(block, Target::About);
    }
}
