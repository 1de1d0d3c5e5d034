//! Local wall-clock readout refreshed by a repeating timer.

use std::time::Duration;

use chrono::Timelike;

use super::timer::{Scheduler, TimerHandle};

/// Shown until the clock has been mounted and read once.
pub const PLACEHOLDER: &str = "--:--:--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// `HH:MM:SS`
    Seconds,
    /// `HH:MM:SS.mmm`
    Millis,
}

/// Zero-padded 24-hour time.
pub fn format_time<T: Timelike>(t: &T, precision: Precision) -> String {
    let base = format!("{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second());
    match precision {
        Precision::Seconds => base,
        // Leap seconds report nanosecond() >= 1e9.
        Precision::Millis => format!("{base}.{:03}", (t.nanosecond() / 1_000_000).min(999)),
    }
}

#[derive(Debug)]
pub struct ClockDisplay {
    precision: Precision,
    interval: Duration,
    text: Option<String>,
    timer: Option<TimerHandle>,
}

impl ClockDisplay {
    pub fn new(precision: Precision, interval: Duration) -> Self {
        Self {
            precision,
            interval,
            text: None,
            timer: None,
        }
    }

    /// Start refreshing and render `current` right away.  Mounting twice
    /// keeps the existing timer.
    pub fn mount<T: Clone, C: Timelike>(
        &mut self,
        sched: &mut Scheduler<T>,
        now: u64,
        task: T,
        current: &C,
    ) {
        if !self.is_mounted() {
            self.timer = Some(sched.repeating(now, self.interval, task));
        }
        self.on_tick(current);
    }

    pub fn unmount<T: Clone>(&mut self, sched: &mut Scheduler<T>) {
        if let Some(handle) = self.timer.take() {
            sched.cancel(handle);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.timer.is_some()
    }

    pub fn on_tick<C: Timelike>(&mut self, current: &C) {
        self.text = Some(format_time(current, self.precision));
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or(PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    fn is_hh_mm_ss(s: &str) -> bool {
        let b = s.as_bytes();
        b.len() == 8
            && b[2] == b':'
            && b[5] == b':'
            && [0, 1, 3, 4, 6, 7].iter().all(|&i| b[i].is_ascii_digit())
    }

    #[test]
    fn formats_zero_padded() {
        let t = NaiveTime::from_hms_milli_opt(7, 5, 3, 42).unwrap();
        assert_eq!(format_time(&t, Precision::Seconds), "07:05:03");
        assert_eq!(format_time(&t, Precision::Millis), "07:05:03.042");
    }

    #[test]
    fn placeholder_until_mounted() {
        let mut sched = Scheduler::new();
        let mut clock = ClockDisplay::new(Precision::Seconds, Duration::from_millis(100));
        assert_eq!(clock.text(), PLACEHOLDER);

        clock.mount(&mut sched, 0, (), &chrono::Local::now());
        assert!(is_hh_mm_ss(clock.text()), "{}", clock.text());
        assert!(clock.is_mounted());

        clock.unmount(&mut sched);
        assert!(sched.is_empty());
    }

    #[test]
    fn ticks_follow_the_interval() {
        let mut sched = Scheduler::new();
        let mut clock = ClockDisplay::new(Precision::Millis, Duration::from_millis(10));
        let start = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        clock.mount(&mut sched, 0, "clock", &start);
        assert_eq!(clock.text(), "23:59:59.000");

        assert!(sched.due(9).is_empty());
        assert_eq!(sched.due(10).len(), 1);
        clock.on_tick(&NaiveTime::from_hms_milli_opt(0, 0, 0, 10).unwrap());
        assert_eq!(clock.text(), "00:00:00.010");
    }
}
