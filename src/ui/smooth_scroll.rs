//! Page-offset smooth scroll with exponential ease-out.
//!
//! Wheel, keys and navigation move the *target*; each frame the current
//! offset covers a fixed fraction of the remaining distance, so long jumps
//! start fast and decelerate into place.

/// Distance (rows) under which the animation snaps to the target.
const SNAP: f64 = 0.05;

/// Smooth scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    current: f64,
    target: f64,
    /// `current += (target − current) · speed` each tick.  1.0 jumps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 1.0),
        }
    }

    /// Set the destination, clamped to `[0, max]`.
    pub fn set_target(&mut self, target: f64, max: f64) {
        self.target = target.clamp(0.0, max.max(0.0));
    }

    /// Move the destination by `delta` rows.
    pub fn nudge(&mut self, delta: f64, max: f64) {
        self.set_target(self.target + delta, max);
    }

    /// Re-clamp after the page changed size.  Returns `true` if the visible
    /// offset moved.
    pub fn clamp_to(&mut self, max: f64) -> bool {
        let max = max.max(0.0);
        let before = self.current;
        self.target = self.target.clamp(0.0, max);
        self.current = self.current.clamp(0.0, max);
        self.current != before
    }

    /// Advance one frame.  Returns `true` if the visible offset moved.
    pub fn tick(&mut self) -> bool {
        if !self.is_animating() {
            return false;
        }
        let remaining = self.target - self.current;
        if remaining.abs() < SNAP || self.speed >= 1.0 {
            self.current = self.target;
        } else {
            self.current += remaining * self.speed;
        }
        true
    }

    /// Current (displayed) offset in rows.
    pub fn offset(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// True until the offset has settled on the target.
    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }
}
