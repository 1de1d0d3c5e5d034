//! Scroll tracking: turns the page offset into per-element progress.
//!
//! Every scroll-bound component owns one [`ScrollTracker`] registered with
//! the [`ScrollHub`].  The hub is the only place that sees scroll / resize
//! events; it recomputes each subscriber synchronously on publish.  There
//! is no global listener: a component that is torn down unsubscribes and
//! its entry is gone.

/// Scroll position and viewport size, both in page rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSnapshot {
    pub offset: f64,
    pub viewport: f64,
}

/// Vertical extent of an element on the page, in rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBounds {
    pub top: f64,
    pub height: f64,
}

/// Intersection point between an edge of the element and an edge of the
/// viewport.  Both fields are fractions: `0.0` = top/start, `1.0` =
/// bottom/end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub element: f64,
    pub viewport: f64,
}

impl Anchor {
    /// Element top meets viewport bottom (element starts entering).
    pub const START_END: Anchor = Anchor {
        element: 0.0,
        viewport: 1.0,
    };
    /// Element bottom meets viewport top (element has left).
    pub const END_START: Anchor = Anchor {
        element: 1.0,
        viewport: 0.0,
    };
    /// Element bottom meets viewport bottom (element fully entered).
    pub const END_END: Anchor = Anchor {
        element: 1.0,
        viewport: 1.0,
    };

    /// Scroll offset at which this anchor is satisfied.
    fn scroll_offset(self, bounds: ElementBounds, viewport: f64) -> f64 {
        bounds.top + bounds.height * self.element - viewport * self.viewport
    }
}

/// Start / end anchor pair delimiting the tracked region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRange {
    pub start: Anchor,
    pub end: Anchor,
}

impl ScrollRange {
    /// From the first row entering at the bottom to the last row leaving
    /// at the top.
    pub const ENTER_TO_EXIT: ScrollRange = ScrollRange {
        start: Anchor::START_END,
        end: Anchor::END_START,
    };
    /// From the first row entering at the bottom until the whole element
    /// is on screen.
    pub const ENTERING: ScrollRange = ScrollRange {
        start: Anchor::START_END,
        end: Anchor::END_END,
    };

    /// Scroll offsets `(start, end)` for the given geometry.
    pub fn offsets(&self, bounds: ElementBounds, viewport: f64) -> (f64, f64) {
        (
            self.start.scroll_offset(bounds, viewport),
            self.end.scroll_offset(bounds, viewport),
        )
    }
}

/// `(offset − start) / (end − start)` clamped to `[0, 1]`.
///
/// A zero-length span is a step: 0 before the point, 1 at or after it.
pub fn normalized(offset: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if span.abs() < f64::EPSILON {
        return if offset >= start { 1.0 } else { 0.0 };
    }
    ((offset - start) / span).clamp(0.0, 1.0)
}

/// Fraction of `span` rows scrolled from the page top, capped at 1.
/// Not clamped below: callers only pass non-negative offsets.
pub fn page_progress(offset: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return 1.0;
    }
    (offset / span).min(1.0)
}

/// Progress tracker for a single element.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTracker {
    range: ScrollRange,
    bounds: Option<ElementBounds>,
    progress: f64,
}

impl ScrollTracker {
    pub fn new(range: ScrollRange) -> Self {
        Self {
            range,
            bounds: None,
            progress: 0.0,
        }
    }

    pub fn attach(&mut self, bounds: ElementBounds) {
        self.bounds = Some(bounds);
    }

    /// Recompute from a snapshot.  Returns `None` (and keeps the last
    /// value) while the element is not attached.
    pub fn update(&mut self, snapshot: ScrollSnapshot) -> Option<f64> {
        let bounds = self.bounds?;
        let (start, end) = self.range.offsets(bounds, snapshot.viewport);
        self.progress = normalized(snapshot.offset, start, end);
        Some(self.progress)
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }
}

/// Monotonic latch for "reveal once" animations: the returned value never
/// decreases, so an element that has faded in stays visible when the user
/// scrolls back up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reveal {
    peak: f64,
}

impl Reveal {
    pub fn observe(&mut self, progress: f64) -> f64 {
        if progress > self.peak {
            self.peak = progress;
        }
        self.peak
    }

    pub fn value(&self) -> f64 {
        self.peak
    }
}

// ───────────────────────────────────────── hub ───────────────

/// Identifies one subscription on a [`ScrollHub`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registry of component-scoped scroll trackers.
#[derive(Debug, Default)]
pub struct ScrollHub {
    next_id: u64,
    trackers: Vec<(SubscriptionId, ScrollTracker)>,
    last: Option<ScrollSnapshot>,
}

impl ScrollHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tracker.  If a snapshot has already been published the
    /// tracker is brought up to date immediately.
    pub fn subscribe(&mut self, mut tracker: ScrollTracker) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        if let Some(snapshot) = self.last {
            tracker.update(snapshot);
        }
        self.trackers.push((id, tracker));
        id
    }

    /// Remove a tracker.  Returns `false` for unknown / already removed ids.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.trackers.len();
        self.trackers.retain(|(sid, _)| *sid != id);
        self.trackers.len() != before
    }

    /// Update an element's geometry (after layout or resize).
    pub fn attach(&mut self, id: SubscriptionId, bounds: ElementBounds) -> bool {
        let last = self.last;
        let Some(tracker) = self.tracker_mut(id) else {
            return false;
        };
        tracker.attach(bounds);
        if let Some(snapshot) = last {
            tracker.update(snapshot);
        }
        true
    }

    /// Push a new scroll / resize snapshot to every subscriber.
    pub fn publish(&mut self, snapshot: ScrollSnapshot) {
        self.last = Some(snapshot);
        for (_, tracker) in &mut self.trackers {
            tracker.update(snapshot);
        }
    }

    pub fn progress(&self, id: SubscriptionId) -> Option<f64> {
        self.trackers
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, t)| t.progress())
    }

    pub fn listener_count(&self) -> usize {
        self.trackers.len()
    }

    fn tracker_mut(&mut self, id: SubscriptionId) -> Option<&mut ScrollTracker> {
        self.trackers
            .iter_mut()
            .find(|(sid, _)| *sid == id)
            .map(|(_, t)| t)
    }
}
