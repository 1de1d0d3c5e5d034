//! Input handling. Maps key and mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::core::gallery::Step;
use crate::ui::hit::Target;

use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    state.status_message = None;

    match state.active_view {
        ActiveView::Help => handle_help_key(state, key),
        ActiveView::Page if state.modal.is_open() => handle_modal_key(state, key),
        ActiveView::Page => handle_page_key(state, key),
    }
}

// ── Page (configurable bindings) ────────────────────────────────

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::MoveUp => state.scroll_by(-1.0),
        Action::MoveDown => state.scroll_by(1.0),
        Action::PageUp => state.page_by(-1.0),
        Action::PageDown => state.page_by(1.0),
        Action::Top => state.scroll_to(0.0),
        Action::Bottom => state.scroll_to(state.layout.max_scroll()),
        Action::NextSection => state.next_section(),
        Action::PrevSection => state.prev_section(),
        Action::NextProject => state.focus_project(Step::Next),
        Action::PrevProject => state.focus_project(Step::Previous),
        Action::OpenProject => {
            if let Some(index) = state.focused_project {
                state.open_project(index);
            }
        }
        Action::CopyEmail => state.copy_email(),
        Action::OpenResume => state.open_resume(),
        Action::ToggleHelp => state.active_view = ActiveView::Help,
    }
}

// ── Project modal ───────────────────────────────────────────────

fn handle_modal_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => state.close_project(),
        KeyCode::Left | KeyCode::Char('h') => state.gallery_step(Step::Previous),
        KeyCode::Right | KeyCode::Char('l') => state.gallery_step(Step::Next),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            state.open_project_link(index);
        }
        _ => match state.config.match_key(key) {
            Some(Action::Quit) => state.should_quit = true,
            Some(Action::NextProject) => state.gallery_step(Step::Next),
            Some(Action::PrevProject) => state.gallery_step(Step::Previous),
            Some(Action::OpenProject) => state.close_project(),
            _ => {}
        },
    }
}

// ── Help popup ──────────────────────────────────────────────────

fn handle_help_key(state: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Esc || key.code == KeyCode::Enter {
        state.active_view = ActiveView::Page;
        return;
    }
    match state.config.match_key(key) {
        Some(Action::ToggleHelp) => state.active_view = ActiveView::Page,
        Some(Action::Quit) => state.should_quit = true,
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
            state.pointer_moved(col, row);
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
            if state.active_view != ActiveView::Page || state.modal.is_open() {
                return;
            }
            let rows = f64::from(state.config.wheel_rows);
            let delta = if mouse.kind == MouseEventKind::ScrollDown {
                rows
            } else {
                -rows
            };
            state.scroll_by(delta);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            state.pointer_moved(col, row);
            if state.active_view == ActiveView::Help {
                state.active_view = ActiveView::Page;
                return;
            }
            if let Some(target) = state.hits.hit(col, row) {
                click(state, target, col);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if state.swipe.is_dragging() {
                state.swipe_end(col);
            }
        }
        _ => {}
    }
}

fn click(state: &mut AppState, target: Target, col: u16) {
    tracing::debug!(?target, "click");
    match target {
        Target::Nav(nav) => state.nav_to(nav),
        Target::ScrollTop => state.scroll_to(0.0),
        Target::Resume => state.open_resume(),
        Target::Project(index) => state.open_project(index),
        Target::Email => state.copy_email(),
        Target::Social(index) => state.open_social(index),
        Target::ModalBackdrop | Target::ModalClose => state.close_project(),
        Target::ModalPrev => state.gallery_step(Step::Previous),
        Target::ModalNext => state.gallery_step(Step::Next),
        Target::ModalLink(index) => state.open_project_link(index),
        Target::ModalImage => state.swipe_begin(col),
        Target::HeroName | Target::About | Target::Portrait | Target::Cards | Target::ModalPanel => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::NavTarget;
    use crate::app::state::tests::test_state;
    use crate::core::content::PROJECTS;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn keys_move_the_scroll_target() {
        let mut state = test_state();
        handle_key(&mut state, key(KeyCode::Char('j')));
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.scroll.target(), 2.0);

        handle_key(&mut state, key(KeyCode::End));
        assert_eq!(state.scroll.target(), state.layout.max_scroll());
        handle_key(&mut state, key(KeyCode::Home));
        assert_eq!(state.scroll.target(), 0.0);

        handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.scroll.target(), state.layout.anchor(NavTarget::Me));
    }

    #[test]
    fn help_toggles_and_blocks_page_keys() {
        let mut state = test_state();
        handle_key(&mut state, key(KeyCode::Char('?')));
        assert_eq!(state.active_view, ActiveView::Help);

        handle_key(&mut state, key(KeyCode::Char('j')));
        assert_eq!(state.scroll.target(), 0.0);

        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.active_view, ActiveView::Page);
    }

    #[test]
    fn project_keys_open_and_browse_the_modal() {
        let mut state = test_state();
        handle_key(&mut state, key(KeyCode::Enter));
        assert!(!state.modal.is_open(), "nothing focused yet");

        handle_key(&mut state, key(KeyCode::Char(']')));
        handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.modal.selected(), Some(&0));

        handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(state.gallery.index(), 1 % PROJECTS[0].images.len());

        // Page keys are inert behind the modal.
        let target = state.scroll.target();
        handle_key(&mut state, key(KeyCode::Char('j')));
        assert_eq!(state.scroll.target(), target);

        handle_key(&mut state, key(KeyCode::Esc));
        assert!(!state.modal.is_open());
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let mut state = test_state();
        state.open_project(1);
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }

    #[test]
    fn wheel_scrolls_by_configured_rows() {
        let mut state = test_state();
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 5, 5));
        assert_eq!(state.scroll.target(), f64::from(state.config.wheel_rows));
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollUp, 5, 5));
        assert_eq!(state.scroll.target(), 0.0);
    }

    #[test]
    fn clicks_dispatch_on_hit_targets() {
        let mut state = test_state();
        state.hits.push(Rect::new(70, 1, 8, 1), Target::Nav(NavTarget::Contact));
        state.hits.push(Rect::new(10, 10, 20, 1), Target::Email);

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 72, 1));
        assert_eq!(state.scroll.target(), state.layout.anchor(NavTarget::Contact));

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 12, 10));
        assert!(state.copy.is_copied());

        // Empty space does nothing.
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 0, 20));
        assert!(!state.modal.is_open());
    }

    #[test]
    fn modal_swipe_and_backdrop() {
        let mut state = test_state();
        state.open_project(0);
        state.hits.push(Rect::new(0, 0, 100, 30), Target::ModalBackdrop);
        state.hits.push(Rect::new(20, 5, 60, 20), Target::ModalImage);

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 60, 10));
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 50, 10));
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 45, 10));
        assert_eq!(state.gallery.index(), 1 % PROJECTS[0].images.len());

        // A short drag does nothing.
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 60, 10));
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 58, 10));
        assert_eq!(state.gallery.index(), 1 % PROJECTS[0].images.len());

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 2, 2));
        assert!(!state.modal.is_open());
    }
}
