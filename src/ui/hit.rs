//! Clickable / hoverable regions collected while drawing.

use ratatui::layout::{Position, Rect};

use crate::app::page::NavTarget;

/// What a screen region stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Nav(NavTarget),
    ScrollTop,
    HeroName,
    /// About-me block once it is mostly visible; shields the intro below.
    About,
    Portrait,
    Resume,
    Project(usize),
    Cards,
    Email,
    Social(usize),
    ModalBackdrop,
    ModalPanel,
    ModalImage,
    ModalClose,
    ModalPrev,
    ModalNext,
    ModalLink(usize),
}

/// Regions in draw order; later entries sit on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitMap {
    zones: Vec<(Rect, Target)>,
}

impl HitMap {
    pub fn push(&mut self, rect: Rect, target: Target) {
        if rect.width > 0 && rect.height > 0 {
            self.zones.push((rect, target));
        }
    }

    /// Topmost target under a cell.
    pub fn hit(&self, column: u16, row: u16) -> Option<Target> {
        let p = Position::new(column, row);
        self.zones
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(p))
            .map(|(_, t)| *t)
    }

    pub fn rect_of(&self, target: Target) -> Option<Rect> {
        self.zones
            .iter()
            .rev()
            .find(|(_, t)| *t == target)
            .map(|(r, _)| *r)
    }
}
