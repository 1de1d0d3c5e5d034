//! "Decoding" text effect: characters resolve left to right while the
//! unresolved tail shows random glyphs.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::timer::{Scheduler, TimerHandle};

pub const DEFAULT_ALPHABET: &str =
    "01!@#$%^&*(){}[]<>?/\\|~`abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Characters revealed per tick.
pub const DEFAULT_RATE: f64 = 0.15;
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(60);

/// One scramble-able string plus the timer that animates it.
///
/// Only one run can be active at a time; the run owns a repeating timer
/// which is cancelled on completion or on [`TextScramble::teardown`].
#[derive(Debug)]
pub struct TextScramble {
    target: Vec<char>,
    alphabet: Vec<char>,
    rate: f64,
    interval: Duration,
    ticks: usize,
    text: String,
    timer: Option<TimerHandle>,
    rng: StdRng,
}

impl TextScramble {
    pub fn new(target: &str) -> Self {
        Self::with_params(
            target,
            DEFAULT_ALPHABET,
            DEFAULT_RATE,
            DEFAULT_INTERVAL,
            StdRng::from_entropy(),
        )
    }

    /// Fully parameterised constructor.  A non-positive rate falls back to
    /// [`DEFAULT_RATE`] and an empty alphabet to [`DEFAULT_ALPHABET`], so a
    /// run always terminates.
    pub fn with_params(
        target: &str,
        alphabet: &str,
        rate: f64,
        interval: Duration,
        rng: StdRng,
    ) -> Self {
        let alphabet = if alphabet.is_empty() {
            DEFAULT_ALPHABET
        } else {
            alphabet
        };
        let rate = if rate.is_finite() && rate > 0.0 {
            rate
        } else {
            DEFAULT_RATE
        };
        Self {
            target: target.chars().collect(),
            alphabet: alphabet.chars().collect(),
            rate,
            interval,
            ticks: 0,
            text: target.to_string(),
            timer: None,
            rng,
        }
    }

    /// Currently displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Ticks a full run takes: `ceil(len / rate)`.
    pub fn ticks_to_reveal(&self) -> usize {
        (self.target.len() as f64 / self.rate).ceil() as usize
    }

    /// Start a run.  No-op (returns `false`) while a run is active.
    pub fn trigger<T: Clone>(&mut self, sched: &mut Scheduler<T>, now: u64, task: T) -> bool {
        if self.is_active() {
            return false;
        }
        self.ticks = 0;
        self.timer = Some(sched.repeating(now, self.interval, task));
        tracing::debug!(target_len = self.target.len(), "scramble started");
        true
    }

    /// Advance one frame.  Returns `true` when this tick finished the run.
    pub fn on_tick<T: Clone>(&mut self, sched: &mut Scheduler<T>) -> bool {
        let Some(handle) = self.timer else {
            return false;
        };

        self.text = self.frame();
        self.ticks += 1;

        if self.ticks >= self.ticks_to_reveal() {
            sched.cancel(handle);
            self.timer = None;
            self.text = self.target();
            return true;
        }
        false
    }

    /// Restore the plain text.  Ignored while a run is active.
    pub fn reset(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.text = self.target();
        true
    }

    /// Cancel any live run and show the plain text.
    pub fn teardown<T: Clone>(&mut self, sched: &mut Scheduler<T>) {
        if let Some(handle) = self.timer.take() {
            sched.cancel(handle);
        }
        self.text = self.target();
    }

    fn frame(&mut self) -> String {
        let cursor = self.ticks as f64 * self.rate;
        let mut out = String::with_capacity(self.target.len());
        for (index, &ch) in self.target.iter().enumerate() {
            if ch == ' ' {
                out.push(' ');
            } else if (index as f64) < cursor {
                out.push(ch);
            } else {
                let pick = self.rng.gen_range(0..self.alphabet.len());
                out.push(self.alphabet[pick]);
            }
        }
        out
    }
}
