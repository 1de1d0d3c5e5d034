//! Core state machines: scroll tracking, keyframes, timers, and the
//! widgets' behaviour (scramble, clipboard, gallery, clocks, cards).
//!
//! Nothing in this module depends on any TUI or rendering crate.  Time is
//! passed in as milliseconds, so every type here is driven deterministically
//! from tests.

pub mod cards;
pub mod clipboard;
pub mod clock;
pub mod content;
pub mod gallery;
pub mod hover;
pub mod interpolate;
pub mod modal;
pub mod progress;
pub mod scramble;
pub mod timer;
