//! Open / closed overlay holding the selected item while open.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal<T> {
    selected: Option<T>,
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<T> Modal<T> {
    /// Open on `item`, replacing any current selection.
    pub fn open(&mut self, item: T) {
        self.selected = Some(item);
    }

    /// Dismiss (explicit close or backdrop).  Returns the item that was shown.
    pub fn close(&mut self) -> Option<T> {
        self.selected.take()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }
}
