//! UI and rendering layer. Everything that touches Ratatui widgets.
//!
//! Each page section draws into its own [`canvas::Canvas`]; [`draw`]
//! stacks the visible ones, then the overlays and the status bar.  No
//! file or terminal I/O happens here.

pub mod canvas;
pub mod contact;
pub mod draw;
pub mod footer;
pub mod hero;
pub mod hit;
pub mod image;
pub mod layout;
pub mod motion;
pub mod nav;
pub mod popup;
pub mod preview;
pub mod projects;
pub mod services;
pub mod skills;
pub mod smooth_scroll;
pub mod theme;
