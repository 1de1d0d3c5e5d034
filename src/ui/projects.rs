//! Project list: numbered rows that preview on hover and open the modal on
//! click.

use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::app::page::{PROJECTS_HEADER_ROWS, PROJECT_ROWS};
use crate::app::state::AppState;
use crate::core::content::PROJECTS;

use super::canvas::{spaced, text_width, Canvas};
use super::hit::Target;
use super::theme::Theme;

pub fn render(state: &AppState, width: u16, height: u16) -> Canvas {
    let mut canvas = Canvas::new(width, height, Theme::PAGE_BG);
    let reveal = state.projects_reveal.value();
    let lift = (1.0 - reveal).round() as i32;
    let margin = if state.layout.is_narrow() { 2 } else { 6 };

    canvas.text(margin, 1 + lift, &spaced("03 — PROJECTS"), Theme::label_style(), reveal);
    canvas.text(margin, 3 + lift, "Selected Work", Theme::heading_style(), reveal);

    let active = state.hovered_project.get().or(state.focused_project);
    for (i, project) in PROJECTS.iter().enumerate() {
        let y = i32::from(PROJECTS_HEADER_ROWS) + i32::from(PROJECT_ROWS) * i as i32;
        let hovered = active == Some(i);
        let x = margin + if hovered { 2 } else { 0 };

        if hovered {
            canvas.text(margin, y, "→", Theme::heading_style(), reveal);
        }
        let number = format!("{:02}", i + 1);
        canvas.text(x, y, &number, Theme::label_style(), reveal);
        canvas.text(x + 5, y, project.title, Theme::heading_style(), reveal);

        // Tags and year flush right, dropped when they would collide.
        let right = format!("{}   {}", project.tags.join(" · "), project.year);
        let right_x = i32::from(width) - margin - text_width(&right) as i32;
        let title_end = x + 5 + text_width(project.title) as i32 + 2;
        if right_x > title_end {
            canvas.text(right_x, y, &right, Theme::label_style(), reveal);
        } else {
            let year_x = i32::from(width) - margin - text_width(project.year) as i32;
            canvas.text(year_x, y, project.year, Theme::label_style(), reveal);
        }

        canvas.text(x + 5, y + 1, project.summary, Theme::body_style(), reveal);
        let rule = "─".repeat(usize::from(width.saturating_sub(2 * margin as u16)));
        canvas.text(margin, y + 2, &rule, Style::default().fg(Theme::RULE), reveal);

        canvas.hit(Rect::new(0, y as u16, width, 2), Target::Project(i));
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::Section;
    use crate::app::state::tests::test_state;
    use ratatui::layout::Position;

    fn row_text(canvas: &Canvas, row: u16) -> String {
        (0..canvas.width())
            .filter_map(|c| canvas.buf.cell(Position::new(c, row)).map(|cell| cell.symbol().to_string()))
            .collect()
    }

    fn revealed_state() -> AppState {
        let mut state = test_state();
        state.projects_reveal.observe(1.0);
        state
    }

    #[test]
    fn rows_line_up_with_page_layout() {
        let state = revealed_state();
        let height = state.layout.bounds(Section::Projects).height as u16;
        let canvas = render(&state, 100, height);
        let top = state.layout.bounds(Section::Projects).top;
        for (i, project) in PROJECTS.iter().enumerate() {
            let row = (state.layout.project_top(i) - top) as u16;
            assert!(row_text(&canvas, row).contains(project.title), "row {row}");
        }
    }

    #[test]
    fn hovered_row_is_marked() {
        let mut state = revealed_state();
        state.hovered_project.set(Some(1));
        let canvas = render(&state, 100, 30);
        let row = PROJECTS_HEADER_ROWS + PROJECT_ROWS;
        assert!(row_text(&canvas, row).trim_start().starts_with('→'));
        assert!(!row_text(&canvas, PROJECTS_HEADER_ROWS).contains('→'));
    }

    #[test]
    fn hidden_before_reveal() {
        let state = test_state();
        let canvas = render(&state, 100, 30);
        assert!(!row_text(&canvas, PROJECTS_HEADER_ROWS).contains(PROJECTS[0].title));
    }
}
