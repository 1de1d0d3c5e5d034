//! Rotating card stack: the front card moves to the back on a fixed
//! cadence, paused while the pointer rests on the stack.

use std::time::Duration;

use super::timer::{Scheduler, TimerHandle};

pub const ROTATE_EVERY: Duration = Duration::from_millis(4000);

#[derive(Debug)]
pub struct CardDeck {
    order: Vec<usize>,
    hovered: bool,
    timer: Option<TimerHandle>,
}

impl CardDeck {
    pub fn new(count: usize) -> Self {
        Self {
            order: (0..count).collect(),
            hovered: false,
            timer: None,
        }
    }

    /// Card indices front to back.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn front(&self) -> Option<usize> {
        self.order.first().copied()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn start<T: Clone>(&mut self, sched: &mut Scheduler<T>, now: u64, task: T) {
        if !self.is_running() && self.order.len() > 1 {
            self.timer = Some(sched.repeating(now, ROTATE_EVERY, task));
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) -> bool {
        let changed = self.hovered != hovered;
        self.hovered = hovered;
        changed
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Rotation timer fired.  Returns `true` if the order changed.
    pub fn on_tick(&mut self) -> bool {
        if self.is_hovered() || self.order.len() < 2 {
            return false;
        }
        self.order.rotate_left(1);
        true
    }

    pub fn teardown<T: Clone>(&mut self, sched: &mut Scheduler<T>) {
        if let Some(handle) = self.timer.take() {
            sched.cancel(handle);
        }
    }
}
