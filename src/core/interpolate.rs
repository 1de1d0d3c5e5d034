//! Keyframe interpolation: maps a progress value to a display parameter.
//!
//! A keyframe list is an ordered set of `(progress, value)` stops.  Between
//! two stops the output is linear; outside the range it holds the nearest
//! end value.

use thiserror::Error;

/// One interpolation anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stop {
    pub at: f64,
    pub value: f64,
}

impl Stop {
    pub const fn new(at: f64, value: f64) -> Self {
        Self { at, value }
    }
}

/// Linear interpolation through `stops`.
///
/// `stops` must be sorted by `at` and non-empty; an empty slice yields
/// `0.0`.  At or beyond either end the outer stop's value holds.  An
/// interior point shared by several stops resolves to the last of them.
pub fn interpolate(progress: f64, stops: &[Stop]) -> f64 {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return 0.0;
    };
    if progress <= first.at {
        return first.value;
    }
    if progress >= last.at {
        return last.value;
    }

    if let Some(exact) = stops.iter().rev().find(|s| s.at == progress) {
        return exact.value;
    }

    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if progress < b.at {
            let span = b.at - a.at;
            if span <= 0.0 {
                return b.value;
            }
            return a.value + (b.value - a.value) * (progress - a.at) / span;
        }
    }
    last.value
}

/// Plain `a → b` blend, `t` unclamped.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[derive(Debug, Error, PartialEq)]
pub enum KeyframeError {
    #[error("keyframe list is empty")]
    Empty,
    #[error("keyframe {index} is not a finite number")]
    NonFinite { index: usize },
    #[error("keyframe {index} at {at} comes before the previous breakpoint")]
    OutOfOrder { index: usize, at: f64 },
}

/// A validated, non-empty, monotonically ordered keyframe list.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    stops: Vec<Stop>,
}

impl Keyframes {
    pub fn new(stops: impl Into<Vec<Stop>>) -> Result<Self, KeyframeError> {
        let stops = stops.into();
        if stops.is_empty() {
            return Err(KeyframeError::Empty);
        }
        for (index, stop) in stops.iter().enumerate() {
            if !stop.at.is_finite() || !stop.value.is_finite() {
                return Err(KeyframeError::NonFinite { index });
            }
            if index > 0 && stop.at < stops[index - 1].at {
                return Err(KeyframeError::OutOfOrder {
                    index,
                    at: stop.at,
                });
            }
        }
        Ok(Self { stops })
    }

    /// Build from parallel input/output ranges, the way motion libraries
    /// usually spell a transform (`[0, 0.3] → [0, 1]`).
    pub fn from_ranges(input: &[f64], output: &[f64]) -> Result<Self, KeyframeError> {
        let stops: Vec<Stop> = input
            .iter()
            .zip(output)
            .map(|(&at, &value)| Stop::new(at, value))
            .collect();
        Self::new(stops)
    }

    pub fn sample(&self, progress: f64) -> f64 {
        interpolate(progress, &self.stops)
    }
}
