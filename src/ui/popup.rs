//! Overlays: the project detail modal and the controls help popup.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::assets::ImageSlot;
use crate::app::state::AppState;
use crate::config::{Action, AppConfig};
use crate::core::content::{Project, PROJECTS};

use super::canvas::{put_text, text_width, wrap};
use super::hit::{HitMap, Target};
use super::image::{render_halfblocks, render_placeholder, ImageStyle};
use super::theme::{fade, Theme};

// ───────────────────────────────────────── project modal ─────

/// Detail view of one project over a dimmed page.
pub struct ProjectModal<'a> {
    pub state: &'a AppState,
}

impl<'a> ProjectModal<'a> {
    /// Centred, 80% of the page.
    fn overlay_area(page: Rect) -> Rect {
        let margin_x = (f64::from(page.width) * 0.1).round() as u16;
        let margin_y = (f64::from(page.height) * 0.1).round() as u16;
        let w = page.width.saturating_sub(margin_x * 2).max(20).min(page.width);
        let h = page.height.saturating_sub(margin_y * 2).max(8).min(page.height);
        Rect::new(
            page.x + (page.width - w) / 2,
            page.y + (page.height - h) / 2,
            w,
            h,
        )
    }

    /// Render and register every clickable part.
    pub fn render_and_hit(self, page: Rect, buf: &mut Buffer, hits: &mut HitMap) {
        let Some(project) = self.state.modal.selected().and_then(|i| PROJECTS.get(*i)) else {
            return;
        };

        dim(page, buf);
        hits.push(page, Target::ModalBackdrop);

        let area = Self::overlay_area(page);
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::INK))
            .style(Style::default().bg(Theme::PAGE_BG))
            .title(Span::styled(
                format!(" {} · {} ", project.title, project.year),
                Theme::heading_style(),
            ));
        let inner = block.inner(area);
        block.render(area, buf);
        hits.push(area, Target::ModalPanel);

        let close = put_text(
            buf,
            i32::from(area.right()) - 5,
            i32::from(area.y),
            "[X]",
            Theme::heading_style(),
            1.0,
        );
        hits.push(close, Target::ModalClose);

        // Side by side when wide, stacked otherwise; one row kept for hints.
        let body = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
        let (image_area, text_area) = if body.width >= 70 {
            let image_w = body.width * 3 / 5;
            (
                Rect::new(body.x, body.y, image_w, body.height),
                Rect::new(body.x + image_w + 2, body.y, body.width.saturating_sub(image_w + 3), body.height),
            )
        } else {
            let image_h = body.height / 2;
            (
                Rect::new(body.x, body.y, body.width, image_h),
                Rect::new(body.x + 1, body.y + image_h + 1, body.width.saturating_sub(2), body.height.saturating_sub(image_h + 1)),
            )
        };

        self.draw_gallery(project, image_area, buf, hits);
        draw_details(project, text_area, buf, hits);

        let hint = " ←/→ browse   1-9 open link   Esc close ";
        put_text(
            buf,
            i32::from(inner.x),
            i32::from(inner.bottom()) - 1,
            hint,
            Style::default().fg(Theme::MUTED),
            1.0,
        );
    }

    fn draw_gallery(&self, project: &Project, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
        if area.width < 8 || area.height < 3 {
            return;
        }
        let gallery = &self.state.gallery;
        // Leave room for the arrows and the counter row.
        let image = Rect::new(area.x + 3, area.y, area.width.saturating_sub(6), area.height - 1);

        match project.images.get(gallery.index()) {
            Some(path) => match self.state.images.slot(path) {
                Some(ImageSlot::Ready(img)) => render_halfblocks(img, image, buf, ImageStyle::default()),
                Some(ImageSlot::Loading) => render_placeholder(image, buf, "loading…", Theme::PAGE_BG),
                _ => render_placeholder(image, buf, "image unavailable", Theme::PAGE_BG),
            },
            None => render_placeholder(image, buf, project.title, Theme::PAGE_BG),
        }
        hits.push(image, Target::ModalImage);

        if gallery.len() > 1 {
            let y = i32::from(area.y + image.height / 2);
            let arrow = Theme::heading_style();
            let prev = put_text(buf, i32::from(area.x), y, " ◀", arrow, 1.0);
            let next = put_text(buf, i32::from(area.right()) - 2, y, "▶ ", arrow, 1.0);
            hits.push(prev, Target::ModalPrev);
            hits.push(next, Target::ModalNext);

            let counter = format!("{} / {}", gallery.index() + 1, gallery.len());
            let x = i32::from(area.x) + (i32::from(area.width) - text_width(&counter) as i32) / 2;
            put_text(buf, x, i32::from(area.bottom()) - 1, &counter, Theme::label_style(), 1.0);
        }
    }
}

fn draw_details(project: &Project, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    if area.width < 4 || area.height == 0 {
        return;
    }
    let x = i32::from(area.x);
    let bottom = i32::from(area.bottom());
    let mut y = i32::from(area.y);

    put_text(buf, x, y, project.title, Theme::heading_style(), 1.0);
    y += 2;
    for line in wrap(project.description, usize::from(area.width)) {
        if y >= bottom {
            return;
        }
        put_text(buf, x, y, &line, Theme::body_style(), 1.0);
        y += 1;
    }
    y += 1;

    let tags = project
        .tags
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join("  ");
    for line in wrap(&tags, usize::from(area.width)) {
        if y >= bottom {
            return;
        }
        put_text(buf, x, y, &line, Theme::label_style(), 1.0);
        y += 1;
    }
    y += 1;

    for (i, link) in project.links.iter().enumerate().take(9) {
        if y >= bottom {
            return;
        }
        let label = format!("{} {} ↗", i + 1, link.label);
        let drawn = put_text(buf, x, y, &label, Theme::heading_style(), 1.0);
        hits.push(drawn, Target::ModalLink(i));
        y += 1;
    }
}

/// Darken everything already drawn in `area`.
fn dim(area: Rect, buf: &mut Buffer) {
    for row in area.top()..area.bottom() {
        for col in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut(Position::new(col, row)) {
                let fg = fade(cell.fg, Theme::NIGHT_BG, 0.4);
                let bg = fade(cell.bg, Theme::NIGHT_BG, 0.4);
                cell.set_fg(fg).set_bg(bg);
            }
        }
    }
}

// ───────────────────────────────────────── help popup ────────

/// Key binding reference.
pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
}

const MODAL_KEYS: &[(&str, &str)] = &[
    ("Previous / next image", "←/→ or h/l"),
    ("Open project link", "1-9"),
    ("Close project", "Esc"),
];

impl<'a> Widget for HelpPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (Action::ALL.len() + MODAL_KEYS.len()) as u16 + 8;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Controls ")
            .title_style(Style::default().fg(Theme::PAPER).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style())
            .style(Style::default().bg(Theme::CARD_BG));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let text = Style::default().fg(Theme::PAPER);
        let keys = Style::default().fg(Theme::NIGHT_MUTED);
        let row = |label: &str, binding: String| {
            // Fixed-width columns: label left-aligned, keys right-aligned.
            let label_col = format!("   {label:<24}");
            let keys_width = usize::from(inner.width)
                .saturating_sub(label_col.chars().count() + 1)
                .max(1);
            Line::from(vec![
                Span::styled(label_col, text),
                Span::styled(format!("{binding:>keys_width$}"), keys),
            ])
        };

        let mut lines = vec![Line::raw("")];
        for &action in Action::ALL {
            lines.push(row(action.label(), self.config.display_bindings(action)));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "   In a project",
            text.add_modifier(Modifier::BOLD),
        )));
        for &(label, binding) in MODAL_KEYS {
            lines.push(row(label, binding.to_string()));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("   Esc: close", keys)));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|row| {
                (area.left()..area.right())
                    .filter_map(|c| buf.cell(Position::new(c, row)).map(|cell| cell.symbol().to_string()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn centered_fixed_clamps() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_fixed(20, 4, area), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_fixed(80, 40, area), area);
    }

    #[test]
    fn modal_registers_controls_over_backdrop() {
        let mut state = test_state();
        let multi = PROJECTS.iter().position(|p| p.images.len() > 1).unwrap_or(0);
        state.open_project(multi);

        let page = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(page);
        let mut hits = HitMap::default();
        ProjectModal { state: &state }.render_and_hit(page, &mut buf, &mut hits);

        assert_eq!(hits.hit(0, 0), Some(Target::ModalBackdrop));
        for target in [Target::ModalClose, Target::ModalImage, Target::ModalPrev, Target::ModalNext] {
            assert!(hits.rect_of(target).is_some(), "{target:?}");
        }
        let close = hits.rect_of(Target::ModalClose).unwrap_or_default();
        assert_eq!(hits.hit(close.x, close.y), Some(Target::ModalClose));

        let text = screen_text(&buf);
        assert!(text.contains(PROJECTS[multi].title));
        assert!(text.contains(&format!("1 / {}", PROJECTS[multi].images.len())));
        for (i, link) in PROJECTS[multi].links.iter().enumerate() {
            assert!(text.contains(&format!("{} {}", i + 1, link.label)));
        }
    }

    #[test]
    fn closed_modal_draws_nothing() {
        let state = test_state();
        let page = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(page);
        let mut hits = HitMap::default();
        ProjectModal { state: &state }.render_and_hit(page, &mut buf, &mut hits);
        assert_eq!(hits, HitMap::default());
    }

    #[test]
    fn help_lists_bindings() {
        let config = AppConfig::default();
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        HelpPopup { config: &config }.render(area, &mut buf);
        let text = screen_text(&buf);
        for &action in Action::ALL {
            assert!(text.contains(action.label()), "{}", action.label());
        }
        assert!(text.contains("In a project"));
    }
}
