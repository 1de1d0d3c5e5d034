//! Frame composition: visible sections, overlays and the status bar.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};

use crate::app::page::Section;
use crate::app::state::{ActiveView, AppState};

use super::canvas::Canvas;
use super::hit::HitMap;
use super::layout::AppLayout;
use super::popup::{HelpPopup, ProjectModal};
use super::theme::Theme;
use super::{contact, footer, hero, nav, preview, projects, services, skills};

/// Draw one frame and return the hit zones it produced.
pub fn draw(frame: &mut Frame, state: &AppState) -> HitMap {
    let layout = AppLayout::from_area(frame.area());
    let full = frame.area();
    let buf = frame.buffer_mut();
    let mut hits = HitMap::default();

    draw_page(state, layout.page_area, buf, &mut hits);
    nav::draw_nav(state, layout.page_area, buf, &mut hits);
    nav::draw_scroll_top(state, layout.page_area, buf, &mut hits);
    preview::draw_preview(state, layout.page_area, buf, &hits);
    draw_status(state, layout.status_area, buf);

    if state.modal.is_open() {
        ProjectModal { state }.render_and_hit(layout.page_area, buf, &mut hits);
    }
    if state.active_view == ActiveView::Help {
        HelpPopup {
            config: &state.config,
        }
        .render(full, buf);
    }

    hits
}

/// Screen row (relative to the page top) where `section`'s canvas starts.
/// The hero holds still while its extra height scrolls past.
pub fn section_top(state: &AppState, section: Section) -> i32 {
    let offset = state.scroll.offset();
    let bounds = state.layout.bounds(section);
    let top = if section == Section::Home {
        let travel = (bounds.height - state.layout.viewport_rows()).max(0.0);
        bounds.top - offset + offset.clamp(0.0, travel)
    } else {
        bounds.top - offset
    };
    top.round() as i32
}

fn draw_page(state: &AppState, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    for section in Section::ALL {
        let rows = if section == Section::Home {
            area.height
        } else {
            state.layout.bounds(section).height.round() as u16
        };
        let top = section_top(state, section);
        if top >= i32::from(area.height) || top + i32::from(rows) <= 0 {
            continue;
        }
        let canvas = render_section(state, section, area.width, rows);
        canvas.blit(top, area, buf, hits);
    }
}

fn render_section(state: &AppState, section: Section, width: u16, height: u16) -> Canvas {
    match section {
        Section::Home => hero::render(state, width, height),
        Section::Projects => projects::render(state, width, height),
        Section::Skills => skills::render(state, width, height),
        Section::Services => services::render(state, width, height),
        Section::Contact => contact::render(state, width, height),
        Section::Footer => footer::render(state, width, height),
    }
}

fn draw_status(state: &AppState, area: Rect, buf: &mut Buffer) {
    let hint = state.config.status_bar_hint();
    let text = match state.active_view {
        ActiveView::Page if state.modal.is_open() => "←/→: browse | 1-9: open link | Esc: close",
        ActiveView::Page => state.status_message.as_deref().unwrap_or(&hint),
        ActiveView::Help => "Esc: close",
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", state.current_section().label()), Theme::selected_style()),
        Span::raw(" "),
        Span::raw(text),
    ]);
    Paragraph::new(line)
        .style(Theme::status_bar_style())
        .render(area, buf);

    let clock = format!("{} ", state.status_clock.text());
    Paragraph::new(clock)
        .alignment(Alignment::Right)
        .style(Theme::status_bar_style())
        .render(Rect::new(area.right().saturating_sub(10), area.y, 10.min(area.width), area.height), buf);
}
