//! Floating navigation and the back-to-top button, drawn over the page.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use crate::app::page::{NavTarget, Section};
use crate::app::state::AppState;

use super::canvas::{put_text, text_width};
use super::hit::{HitMap, Target};
use super::motion::{nav_inverted, nav_opacity, show_scroll_top};
use super::theme::Theme;

const GAP: i32 = 3;

/// Entry labels, shortened to three letters when the full row won't fit.
fn labels(width: u16) -> Vec<(NavTarget, String)> {
    let full: Vec<(NavTarget, String)> = NavTarget::ALL
        .iter()
        .map(|t| (*t, t.label().to_string()))
        .collect();
    let needed: i32 = full.iter().map(|(_, l)| text_width(l) as i32 + GAP).sum::<i32>() + 2;
    if needed <= i32::from(width) {
        return full;
    }
    full.into_iter()
        .map(|(t, l)| (t, l.chars().take(3).collect()))
        .collect()
}

pub fn draw_nav(state: &AppState, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    let offset = state.scroll.offset();
    let contact_top = state.layout.bounds(Section::Contact).top - offset;
    let fg = if nav_inverted(contact_top) {
        Theme::PAPER
    } else {
        Theme::INK
    };
    let opacity = nav_opacity(offset);
    let current = state.current_section();

    let entries = labels(area.width);
    let total: i32 = entries.iter().map(|(_, l)| text_width(l) as i32).sum::<i32>()
        + GAP * (entries.len() as i32 - 1);
    let margin = if state.layout.is_narrow() { 2 } else { 6 };
    let mut x = i32::from(area.right()) - margin - total;
    let y = i32::from(area.y);

    for (target, label) in entries {
        let mut style = Style::default().fg(fg);
        let hovered = state.is_hovered(Target::Nav(target));
        if hovered {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if section_of(target) == Some(current) {
            style = style.add_modifier(Modifier::BOLD);
        }
        let alpha = if hovered { 1.0 } else { opacity };
        let drawn = put_text(buf, x, y, &label, style, alpha);
        hits.push(drawn, Target::Nav(target));
        x += text_width(&label) as i32 + GAP;
    }
}

fn section_of(target: NavTarget) -> Option<Section> {
    match target {
        NavTarget::Home | NavTarget::Me => None,
        NavTarget::Projects => Some(Section::Projects),
        NavTarget::Skills => Some(Section::Skills),
        NavTarget::Services => Some(Section::Services),
        NavTarget::Contact => Some(Section::Contact),
    }
}

pub fn draw_scroll_top(state: &AppState, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    if !show_scroll_top(state.scroll.offset()) || area.height < 3 {
        return;
    }
    let mut style = Style::default().fg(Theme::PAPER).bg(Theme::INK);
    if state.is_hovered(Target::ScrollTop) {
        style = style.add_modifier(Modifier::BOLD);
    }
    let x = i32::from(area.right()) - 7;
    let y = i32::from(area.bottom()) - 2;
    let drawn = put_text(buf, x, y, " ↑ ", style, 1.0);
    hits.push(drawn, Target::ScrollTop);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;
    use crate::ui::theme::fade;
    use ratatui::layout::Position;

    fn row_text(buf: &Buffer, row: u16) -> String {
        (0..buf.area.width)
            .filter_map(|c| buf.cell(Position::new(c, row)).map(|cell| cell.symbol().to_string()))
            .collect()
    }

    #[test]
    fn nav_lists_every_entry_with_hits() {
        let state = test_state();
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        let mut hits = HitMap::default();
        draw_nav(&state, area, &mut buf, &mut hits);

        let row = row_text(&buf, 0);
        for target in NavTarget::ALL {
            assert!(row.contains(target.label()));
            assert!(hits.rect_of(Target::Nav(target)).is_some());
        }
        assert!(row.trim_end().len() + 6 <= 100);
    }

    #[test]
    fn narrow_nav_abbreviates() {
        let names = labels(40);
        assert!(names.iter().all(|(_, l)| l.chars().count() <= 3));
        assert_eq!(labels(100)[2].1, "Projects");
    }

    #[test]
    fn nav_dims_then_inverts() {
        let mut state = test_state();
        let area = Rect::new(0, 0, 100, 30);
        let ink_cell = |state: &AppState| {
            let mut buf = Buffer::empty(area);
            buf.set_style(area, Style::default().bg(Theme::PAGE_BG));
            draw_nav(state, area, &mut buf, &mut HitMap::default());
            let rect = {
                let mut hits = HitMap::default();
                draw_nav(state, area, &mut Buffer::empty(area), &mut hits);
                hits.rect_of(Target::Nav(NavTarget::Home)).unwrap_or_default()
            };
            buf.cell(Position::new(rect.x, rect.y)).map(|c| c.fg)
        };
        assert_eq!(ink_cell(&state), Some(Theme::INK));

        state.scroll_to(20.0);
        while state.scroll.tick() {}
        assert_eq!(ink_cell(&state), Some(fade(Theme::INK, Theme::PAGE_BG, 0.4)));

        state.nav_to(NavTarget::Contact);
        while state.scroll.tick() {}
        assert_eq!(ink_cell(&state), Some(fade(Theme::PAPER, Theme::PAGE_BG, 0.4)));
    }

    #[test]
    fn scroll_top_appears_after_threshold() {
        let mut state = test_state();
        let area = Rect::new(0, 0, 100, 30);
        let mut hits = HitMap::default();
        draw_scroll_top(&state, area, &mut Buffer::empty(area), &mut hits);
        assert!(hits.rect_of(Target::ScrollTop).is_none());

        state.scroll_to(40.0);
        while state.scroll.tick() {}
        draw_scroll_top(&state, area, &mut Buffer::empty(area), &mut hits);
        assert!(hits.rect_of(Target::ScrollTop).is_some());
    }
}
