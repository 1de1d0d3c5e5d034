//! Scheduled tasks with explicit start / cancel handles.
//!
//! Every animation and periodic refresh in the app goes through one
//! [`Scheduler`] owned by the main loop.  Time is a monotonic millisecond
//! count supplied by the caller, so the state machines built on top of it
//! can be driven deterministically in tests.

use std::time::Duration;

/// Opaque handle returned when a task is scheduled.  Pass it back to
/// [`Scheduler::cancel`] to release the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: TimerHandle,
    deadline: u64,
    /// `Some` for repeating tasks.
    period: Option<u64>,
    task: T,
}

/// Deadline-ordered set of one-shot and repeating tasks.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once, `delay` after `now`.
    pub fn once(&mut self, now: u64, delay: Duration, task: T) -> TimerHandle {
        self.insert(now.saturating_add(millis(delay)), None, task)
    }

    /// Run `task` every `interval`, first firing one interval after `now`.
    pub fn repeating(&mut self, now: u64, interval: Duration, task: T) -> TimerHandle {
        let period = millis(interval).max(1);
        self.insert(now.saturating_add(period), Some(period), task)
    }

    /// Release a task.  Returns `false` if the handle was already gone
    /// (fired one-shot or cancelled twice).
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collect every task whose deadline is `<= now`, ordered by deadline.
    ///
    /// One-shot tasks are removed.  Repeating tasks fire once per call and
    /// are re-armed on their own cadence; periods missed while the loop was
    /// busy are skipped rather than replayed.
    pub fn due(&mut self, now: u64) -> Vec<(TimerHandle, T)> {
        let mut fired: Vec<(u64, TimerHandle, T)> = Vec::new();

        self.entries.retain_mut(|entry| {
            if entry.deadline > now {
                return true;
            }
            fired.push((entry.deadline, entry.handle, entry.task.clone()));
            match entry.period {
                Some(period) => {
                    let missed = (now - entry.deadline) / period;
                    entry.deadline += period * (missed + 1);
                    true
                }
                None => false,
            }
        });

        fired.sort_by_key(|(deadline, handle, _)| (*deadline, *handle));
        fired
            .into_iter()
            .map(|(_, handle, task)| (handle, task))
            .collect()
    }

    fn insert(&mut self, deadline: u64, period: Option<u64>, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            deadline,
            period,
            task,
        });
        handle
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn one_shot_fires_once_and_is_removed() {
        let mut s = Scheduler::new();
        let h = s.once(0, Duration::from_millis(2000), "reset");

        assert!(s.due(1999).is_empty());
        assert_eq!(s.due(2000), vec![(h, "reset")]);
        assert!(s.due(5000).is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn repeating_rearms_and_skips_missed_periods() {
        let mut s = Scheduler::new();
        let h = s.repeating(0, Duration::from_millis(60), 'x');

        assert_eq!(s.due(60), vec![(h, 'x')]);
        assert_eq!(s.next_deadline(), Some(120));

        // Loop stalled for several periods: one firing, next deadline in the future.
        assert_eq!(s.due(400), vec![(h, 'x')]);
        assert_eq!(s.next_deadline(), Some(420));
    }

    #[test]
    fn cancel_releases_the_task() {
        let mut s = Scheduler::new();
        let a = s.repeating(0, Duration::from_millis(10), 1);
        let b = s.once(0, Duration::from_millis(10), 2);

        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert_eq!(s.len(), 1);
        assert_eq!(s.due(10), vec![(b, 2)]);
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn due_orders_by_deadline() {
        let mut s = Scheduler::new();
        let late = s.once(0, Duration::from_millis(50), "late");
        let early = s.once(0, Duration::from_millis(10), "early");

        assert_eq!(s.due(100), vec![(early, "early"), (late, "late")]);
    }
}
