//! Application orchestration: state, events and input handling.

pub mod assets;
pub mod event;
pub mod handler;
pub mod open;
pub mod page;
pub mod state;
