//! Services: scroll-bound heading, the service list and the rotating card
//! stack.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::app::page::{px_cols, px_rows};
use crate::app::state::AppState;
use crate::core::content::{Service, SERVICES, SERVICES_INTRO};

use super::canvas::{spaced, wrap, Canvas};
use super::hit::Target;
use super::theme::Theme;

const LIST_TOP: u16 = 10;
const ITEM_ROWS: u16 = 4;
pub const CARD_ROWS: u16 = 12;
const CARD_MAX_COLS: u16 = 40;
/// Offset of each card behind the front one.
const CARD_STEP_X: u16 = 3;
const CARD_STEP_Y: u16 = 2;

pub fn render(state: &AppState, width: u16, height: u16) -> Canvas {
    let mut canvas = Canvas::new(width, height, Theme::PAGE_BG);
    let narrow = state.layout.is_narrow();
    let progress = state.services_progress();
    let margin: i32 = if narrow { 2 } else { 6 };

    let title_dy = px_rows(state.motion.services_title_y.sample(progress)).round() as i32;
    let title_op = state.motion.services_title_opacity.sample(progress);
    canvas.text(margin, 1 + title_dy, &spaced("05 — SERVICES"), Theme::label_style(), title_op);

    let column = if narrow {
        width.saturating_sub(4)
    } else {
        (width / 2).saturating_sub(margin as u16 + 2)
    };
    canvas.text(margin, 4, "What I Offer", Theme::heading_style(), 1.0);
    for (i, line) in wrap(SERVICES_INTRO, usize::from(column)).iter().take(3).enumerate() {
        canvas.text(margin, 6 + i as i32, line, Style::default().fg(Theme::MUTED), 1.0);
    }

    let reveal = state.services_reveal.value();
    let front = state.deck.front();
    for (i, service) in SERVICES.iter().enumerate() {
        let y = i32::from(LIST_TOP + ITEM_ROWS * i as u16);
        let op = item_reveal(reveal, i);
        let dx = (px_cols(-20.0) * (1.0 - op)).round() as i32;
        draw_item(&mut canvas, service, margin + dx, y, column, op, front == Some(i));
    }

    let list_end = LIST_TOP + ITEM_ROWS * SERVICES.len() as u16;
    let (deck_x, deck_top, deck_w) = if narrow {
        (2, list_end + 2, width.saturating_sub(4))
    } else {
        let x = width / 2 + 2;
        (x, 4, width.saturating_sub(x + 4))
    };
    draw_deck(state, &mut canvas, deck_x, deck_top, deck_w);

    canvas
}

/// Staggered "reveal once" fade for list entry `index`.
fn item_reveal(reveal: f64, index: usize) -> f64 {
    ((reveal - 0.15 - 0.05 * index as f64) / 0.15).clamp(0.0, 1.0)
}

/// List entry; the bar darkens while its card leads the deck.
fn draw_item(
    canvas: &mut Canvas,
    service: &Service,
    x: i32,
    y: i32,
    width: u16,
    opacity: f64,
    current: bool,
) {
    let bar = Style::default().fg(if current { Theme::INK } else { Theme::RULE });
    for row in 0..3 {
        canvas.text(x, y + row, "│", bar, opacity);
    }
    canvas.text(x + 2, y, service.title, Theme::heading_style(), opacity);
    let desc = wrap(service.description, usize::from(width.saturating_sub(2)));
    for (i, line) in desc.iter().take(2).enumerate() {
        canvas.text(x + 2, y + 1 + i as i32, line, Style::default().fg(Theme::MUTED), opacity);
    }
}

fn draw_deck(state: &AppState, canvas: &mut Canvas, x: u16, top: u16, avail: u16) {
    let order = state.deck.order();
    let n = order.len() as u16;
    if n == 0 || avail < 12 {
        return;
    }
    let card_w = avail.saturating_sub(CARD_STEP_X * (n - 1)).min(CARD_MAX_COLS);

    // Back to front; depth 0 is the front card, lowest and leftmost.
    for depth in (0..n).rev() {
        let index = order[usize::from(depth)];
        let rect = Rect::new(
            x + CARD_STEP_X * depth,
            top + CARD_STEP_Y * (n - 1 - depth),
            card_w,
            CARD_ROWS,
        );
        draw_card(canvas, index, rect);
    }

    let whole = Rect::new(x, top, card_w + CARD_STEP_X * (n - 1), CARD_ROWS + CARD_STEP_Y * (n - 1));
    canvas.hit(whole, Target::Cards);
}

fn draw_card(canvas: &mut Canvas, index: usize, rect: Rect) {
    let Some(service) = SERVICES.get(index) else {
        return;
    };
    canvas.fill(rect, Theme::CARD_BG);
    let x = i32::from(rect.x) + 2;
    let y = i32::from(rect.y);
    let inner = rect.width.saturating_sub(4);

    canvas.text(x, y + 1, &format!("{:02}", index + 1), Style::default().fg(Theme::PAPER), 0.2);
    let title = Style::default().fg(Theme::PAPER).add_modifier(Modifier::BOLD);
    canvas.text(x + 4, y + 1, service.title, title, 1.0);

    let muted = Style::default().fg(Theme::NIGHT_MUTED);
    for (i, line) in wrap(service.description, usize::from(inner)).iter().take(3).enumerate() {
        canvas.text(x, y + 3 + i as i32, line, muted, 1.0);
    }
    canvas.text(x, y + 7, &"─".repeat(usize::from(inner)), Style::default().fg(Theme::PAPER), 0.2);
    for (i, feature) in service.features.iter().take(4).enumerate() {
        canvas.text(x, y + 8 + i as i32, &format!("• {feature}"), muted, 1.0);
    }
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

    fn contains(canvas: &Canvas, needle: &str) -> bool {
        (0..canvas.height()).any(|r| row_text(canvas, r).contains(needle))
    }

    #[test]
    fn stagger_reveals_in_order() {
        assert_eq!(item_reveal(0.0, 0), 0.0);
        assert_eq!(item_reveal(1.0, 2), 1.0);
        let mid = 0.25;
        assert!(item_reveal(mid, 0) > item_reveal(mid, 1));
    }

    #[test]
    fn front_card_shows_first_service() {
        let state = test_state();
        let height = state.layout.bounds(Section::Services).height as u16;
        let canvas = render(&state, 100, height);
        assert!(contains(&canvas, "What I Offer"));
        // The front card's title row is unobstructed.
        let front_y = 4 + CARD_STEP_Y * (SERVICES.len() as u16 - 1) + 1;
        assert!(row_text(&canvas, front_y).contains(SERVICES[0].title));
    }

    #[test]
    fn rotation_changes_front_card() {
        let mut state = test_state();
        state.deck.on_tick();
        let height = state.layout.bounds(Section::Services).height as u16;
        let canvas = render(&state, 100, height);
        let front_y = 4 + CARD_STEP_Y * (SERVICES.len() as u16 - 1) + 1;
        assert!(row_text(&canvas, front_y).contains(SERVICES[1].title));
    }

    #[test]
    fn narrow_stacks_deck_below_list() {
        let mut state = test_state();
        state.resize(60, 31);
        let height = state.layout.bounds(Section::Services).height as u16;
        let canvas = render(&state, 60, height);
        let list_end = LIST_TOP + ITEM_ROWS * SERVICES.len() as u16;
        let front_y = list_end + 2 + CARD_STEP_Y * (SERVICES.len() as u16 - 1) + 1;
        assert!(row_text(&canvas, front_y).contains(SERVICES[0].title));
    }

    #[test]
    fn list_marks_the_front_card() {
        let mut state = test_state();
        state.services_reveal.observe(1.0);
        state.deck.on_tick();
        let height = state.layout.bounds(Section::Services).height as u16;
        let canvas = render(&state, 100, height);
        let bar_fg = |i: u16| {
            canvas
                .buf
                .cell(Position::new(6, LIST_TOP + ITEM_ROWS * i))
                .map(|cell| cell.fg)
        };
        assert_eq!(bar_fg(0), Some(Theme::RULE));
        assert_eq!(bar_fg(1), Some(Theme::INK));
    }
}
