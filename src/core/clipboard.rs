//! Copy-to-clipboard with a transient "copied" indicator.
//!
//! Writing to the clipboard is the only fallible runtime operation in the
//! app.  A failure is logged and leaves the indicator where it was.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

use super::timer::{Scheduler, TimerHandle};

/// How long the "copied" state is shown.
pub const COPY_FEEDBACK: Duration = Duration::from_millis(2000);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(&'static str),
    #[error("failed to write clipboard sequence: {0}")]
    Io(#[from] io::Error),
}

/// Write-only clipboard access.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard over the OSC 52 escape sequence, understood by most modern
/// terminal emulators (and forwarded by tmux with `set-clipboard on`).
pub struct Osc52Clipboard<W: Write> {
    out: W,
    require_tty: bool,
}

impl Osc52Clipboard<io::Stdout> {
    /// Writes to stdout; refuses when stdout is not a terminal.
    pub fn stdout() -> Self {
        Self {
            require_tty: true,
            ..Self::new(io::stdout())
        }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            require_tty: false,
        }
    }
}

impl<W: Write> ClipboardSink for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.require_tty && !io::stdout().is_terminal() {
            return Err(ClipboardError::Unavailable("stdout is not a terminal"));
        }
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyState {
    #[default]
    Idle,
    Copied,
}

/// Two-state copy indicator: `Idle → Copied` on success, back to `Idle`
/// when the feedback timer fires.
#[derive(Debug)]
pub struct CopyIndicator {
    state: CopyState,
    delay: Duration,
    reset_timer: Option<TimerHandle>,
}

impl Default for CopyIndicator {
    fn default() -> Self {
        Self::new(COPY_FEEDBACK)
    }
}

impl CopyIndicator {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: CopyState::Idle,
            delay,
            reset_timer: None,
        }
    }

    pub fn state(&self) -> CopyState {
        self.state
    }

    pub fn is_copied(&self) -> bool {
        self.state == CopyState::Copied
    }

    /// Copy `text`.  On success the indicator switches to `Copied` and a
    /// reset is scheduled (a second copy restarts the delay).  On failure
    /// the error is logged and returned; state is untouched.
    pub fn copy<T: Clone>(
        &mut self,
        sink: &mut dyn ClipboardSink,
        text: &str,
        sched: &mut Scheduler<T>,
        now: u64,
        task: T,
    ) -> Result<(), ClipboardError> {
        if let Err(err) = sink.write_text(text) {
            tracing::error!(error = %err, "failed to copy to clipboard");
            return Err(err);
        }
        if let Some(previous) = self.reset_timer.take() {
            sched.cancel(previous);
        }
        self.state = CopyState::Copied;
        self.reset_timer = Some(sched.once(now, self.delay, task));
        Ok(())
    }

    /// The feedback timer fired.
    pub fn on_timer(&mut self) {
        self.state = CopyState::Idle;
        self.reset_timer = None;
    }

    pub fn teardown<T: Clone>(&mut self, sched: &mut Scheduler<T>) {
        if let Some(handle) = self.reset_timer.take() {
            sched.cancel(handle);
        }
        self.state = CopyState::Idle;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// In-memory sink; fails on demand.
    #[derive(Default)]
    pub(crate) struct MemoryClipboard {
        pub contents: Vec<String>,
        pub fail: bool,
    }

    impl ClipboardSink for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Unavailable("denied"));
            }
            self.contents.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn copied_then_idle_after_delay() {
        let mut sched = Scheduler::new();
        let mut sink = MemoryClipboard::default();
        let mut ind = CopyIndicator::default();

        ind.copy(&mut sink, "me@example.com", &mut sched, 1_000, "reset")
            .unwrap();
        assert_eq!(ind.state(), CopyState::Copied);
        assert_eq!(sink.contents, vec!["me@example.com".to_string()]);

        assert!(sched.due(2_999).is_empty());
        for (_, task) in sched.due(3_000) {
            assert_eq!(task, "reset");
            ind.on_timer();
        }
        assert_eq!(ind.state(), CopyState::Idle);
    }

    #[test]
    fn failure_keeps_idle_and_schedules_nothing() {
        let mut sched: Scheduler<()> = Scheduler::new();
        let mut sink = MemoryClipboard {
            fail: true,
            ..Default::default()
        };
        let mut ind = CopyIndicator::default();

        assert!(ind.copy(&mut sink, "x", &mut sched, 0, ()).is_err());
        assert_eq!(ind.state(), CopyState::Idle);
        assert!(sched.is_empty());
    }

    #[test]
    fn second_copy_restarts_the_delay() {
        let mut sched = Scheduler::new();
        let mut sink = MemoryClipboard::default();
        let mut ind = CopyIndicator::default();

        ind.copy(&mut sink, "x", &mut sched, 0, ()).unwrap();
        ind.copy(&mut sink, "x", &mut sched, 1_500, ()).unwrap();
        assert_eq!(sched.len(), 1);
        assert!(sched.due(2_000).is_empty());
        assert_eq!(sched.due(3_500).len(), 1);
    }

    #[test]
    fn osc52_sequence_is_base64_encoded() {
        let mut bytes = Vec::new();
        Osc52Clipboard::new(&mut bytes).write_text("hi").unwrap();
        assert_eq!(bytes, b"\x1b]52;c;aGk=\x07".to_vec());
    }
}
