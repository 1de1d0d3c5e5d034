//! Image gallery cursor with wraparound and swipe gestures.

/// Horizontal displacement (in pointer units) that counts as one swipe.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Cursor over a fixed-length image list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gallery {
    index: usize,
    len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

impl Gallery {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `(index + 1) mod len`.
    pub fn next(&mut self) -> usize {
        if !self.is_empty() {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// `(index − 1 + len) mod len`.
    pub fn prev(&mut self) -> usize {
        if !self.is_empty() {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    pub fn apply(&mut self, step: Step) -> usize {
        match step {
            Step::Next => self.next(),
            Step::Previous => self.prev(),
        }
    }
}

/// Drag tracker: a gesture yields at most one [`Step`] when released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    origin: Option<f64>,
    threshold: f64,
}

impl Default for Swipe {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

impl Swipe {
    pub fn new(threshold: f64) -> Self {
        Self {
            origin: None,
            threshold: threshold.abs(),
        }
    }

    pub fn begin(&mut self, x: f64) {
        self.origin = Some(x);
    }

    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    pub fn cancel(&mut self) {
        self.origin = None;
    }

    /// Release at `x`.  Dragging left past the threshold advances, dragging
    /// right goes back.
    pub fn end(&mut self, x: f64) -> Option<Step> {
        let origin = self.origin.take()?;
        let displacement = x - origin;
        if displacement <= -self.threshold {
            Some(Step::Next)
        } else if displacement >= self.threshold {
            Some(Step::Previous)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn three_nexts_from_zero() {
        let mut g = Gallery::new(5);
        g.next();
        g.next();
        assert_eq!(g.next(), 3);
    }

    #[test]
    fn prev_from_zero_wraps() {
        let mut g = Gallery::new(5);
        assert_eq!(g.prev(), 4);
        assert_eq!(g.next(), 0);
    }

    #[test]
    fn empty_gallery_stays_put() {
        let mut g = Gallery::new(0);
        assert_eq!(g.next(), 0);
        assert_eq!(g.prev(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn swipe_needs_the_threshold() {
        let mut s = Swipe::default();
        s.begin(200.0);
        assert_eq!(s.end(160.0), None);

        s.begin(200.0);
        assert_eq!(s.end(150.0), Some(Step::Next));

        s.begin(0.0);
        assert_eq!(s.end(75.0), Some(Step::Previous));

        // No gesture in progress.
        assert_eq!(s.end(500.0), None);
    }
}
