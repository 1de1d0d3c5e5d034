//! Floating thumbnail that trails the pointer over the project list.

use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::assets::ImageSlot;
use crate::app::state::AppState;
use crate::core::content::PROJECTS;

use super::hit::{HitMap, Target};
use super::image::{render_halfblocks, render_placeholder, ImageStyle};
use super::theme::Theme;

/// 4:3 in half-block pixels.
const PREVIEW_COLS: u16 = 32;
const PREVIEW_ROWS: u16 = 12;

/// Where the preview for the row at `row_rect` goes, given the pointer.
pub fn preview_rect(area: Rect, row_rect: Rect, pointer: Option<(u16, u16)>) -> Option<Rect> {
    let w = PREVIEW_COLS.min(area.width);
    let h = PREVIEW_ROWS.min(area.height);
    if w < 8 || h < 4 {
        return None;
    }
    let anchor_x = pointer.map_or(area.x + area.width * 11 / 20, |(c, _)| c.saturating_add(4));
    let x = anchor_x.min(area.right() - w).max(area.x);
    let centre = i32::from(row_rect.y) - i32::from(h / 2);
    let y = centre.clamp(i32::from(area.y), i32::from(area.bottom() - h)) as u16;
    Some(Rect::new(x, y, w, h))
}

/// Draw the preview for the hovered project, if any.  Registers no hit
/// zone so the row underneath keeps the pointer.
pub fn draw_preview(state: &AppState, area: Rect, buf: &mut Buffer, hits: &HitMap) {
    if state.layout.is_narrow() || state.modal.is_open() {
        return;
    }
    let Some(index) = state.hovered_project.get() else {
        return;
    };
    let (Some(project), Some(row)) = (PROJECTS.get(index), hits.rect_of(Target::Project(index))) else {
        return;
    };
    let Some(rect) = preview_rect(area, row, state.pointer) else {
        return;
    };

    let Some(path) = project.images.first() else {
        render_placeholder(rect, buf, project.title, Theme::PAGE_BG);
        return;
    };
    match state.images.slot(path) {
        Some(ImageSlot::Ready(img)) => {
            let style = ImageStyle {
                cover: true,
                ..ImageStyle::default()
            };
            render_halfblocks(img, rect, buf, style);
        }
        Some(ImageSlot::Loading) => render_placeholder(rect, buf, "loading…", Theme::PAGE_BG),
        _ => render_placeholder(rect, buf, project.title, Theme::PAGE_BG),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_pointer_and_stays_inside() {
        let area = Rect::new(0, 0, 100, 30);
        let row = Rect::new(0, 10, 100, 2);
        let rect = preview_rect(area, row, Some((20, 10))).unwrap_or_default();
        assert_eq!(rect, Rect::new(24, 4, PREVIEW_COLS, PREVIEW_ROWS));

        let edge = preview_rect(area, Rect::new(0, 28, 100, 2), Some((95, 28))).unwrap_or_default();
        assert_eq!(edge.right(), 100);
        assert_eq!(edge.bottom(), 30);
    }

    #[test]
    fn too_small_area_skips_preview() {
        assert_eq!(preview_rect(Rect::new(0, 0, 6, 3), Rect::new(0, 0, 6, 1), None), None);
    }

    #[test]
    fn only_shown_while_hovering() {
        let mut state = crate::app::state::tests::test_state();
        let area = Rect::new(0, 0, 100, 30);
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 10, 100, 2), Target::Project(0));
        let mut buf = Buffer::empty(area);
        draw_preview(&state, area, &mut buf, &hits);
        assert_eq!(buf, Buffer::empty(area));

        state.hovered_project.set(Some(0));
        draw_preview(&state, area, &mut buf, &hits);
        assert_ne!(buf, Buffer::empty(area));
    }
}
