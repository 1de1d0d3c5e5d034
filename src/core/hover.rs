//! "Which item is hovered": the one value shared between a list and the
//! floating preview that follows it.  Writes overwrite; nothing queues.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverSignal<T> {
    current: Option<T>,
}

impl<T> Default for HoverSignal<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T: PartialEq + Copy> HoverSignal<T> {
    /// Overwrite the hovered value.  Returns `true` if it changed.
    pub fn set(&mut self, value: Option<T>) -> bool {
        let changed = self.current != value;
        self.current = value;
        changed
    }

    pub fn get(&self) -> Option<T> {
        self.current
    }

    pub fn clear(&mut self) -> bool {
        self.set(None)
    }
}
