//! Scroll-to-visual mappings for every animated element on the page.
//!
//! Keyframe outputs are in design pixels; renderers convert to rows and
//! columns with [`px_rows`] / [`px_cols`].

use crate::app::page::{px_cols, px_rows};
use crate::core::interpolate::{KeyframeError, Keyframes};
use crate::core::progress::page_progress;

/// Scroll (px) after which the navigation dims.
pub const NAV_DIM_AFTER_PX: f64 = 100.0;
pub const NAV_DIM_OPACITY: f64 = 0.4;
/// The navigation inverts once the contact block is this close to the top.
pub const NAV_INVERT_WITHIN_PX: f64 = 100.0;
/// Scroll (px) after which the back-to-top button shows.
pub const SCROLL_TOP_AFTER_PX: f64 = 500.0;

/// Validated keyframe tables for the tracked sections.
#[derive(Debug, Clone)]
pub struct Motion {
    pub services_title_y: Keyframes,
    pub services_title_opacity: Keyframes,
    pub contact_y: Keyframes,
    pub contact_opacity: Keyframes,
}

impl Motion {
    pub fn new() -> Result<Self, KeyframeError> {
        Ok(Self {
            services_title_y: Keyframes::from_ranges(&[0.0, 0.5], &[100.0, 0.0])?,
            services_title_opacity: Keyframes::from_ranges(&[0.0, 0.3], &[0.0, 1.0])?,
            contact_y: Keyframes::from_ranges(&[0.0, 1.0], &[100.0, -100.0])?,
            contact_opacity: Keyframes::from_ranges(&[0.0, 0.2, 0.8, 1.0], &[0.0, 1.0, 1.0, 0.0])?,
        })
    }
}

/// Everything the hero frame needs for one scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroMotion {
    /// `min(scroll / vh, 1)`.
    pub progress: f64,
    pub image_scale: f64,
    /// Horizontal portrait shift as a fraction of its own width.
    pub image_shift: f64,
    pub text_opacity: f64,
    /// Parallax drops in rows.
    pub name_dy: f64,
    pub role_dy: f64,
    pub resume_dy: f64,
    /// About-me reveal, `[0, 1]`.
    pub about: f64,
}

impl HeroMotion {
    pub fn at(offset: f64, viewport: f64, narrow: bool) -> Self {
        let offset = offset.max(0.0);
        let progress = page_progress(offset, viewport);
        let about = if viewport > 0.0 {
            ((offset - viewport * 0.5) / (viewport * 0.3)).clamp(0.0, 1.0)
        } else {
            1.0
        };

        Self {
            progress,
            image_scale: (1.0 - progress * 0.35).max(0.65),
            image_shift: if narrow { -progress * 0.3 } else { 0.0 },
            text_opacity: (1.0 - progress * 2.0).max(0.0),
            name_dy: parallax(offset, 0.3, 50.0),
            role_dy: parallax(offset, 0.2, 30.0),
            resume_dy: parallax(offset, 0.15, 20.0),
            about,
        }
    }

    /// About-me block: vertical drop (rows) as it fades in.
    pub fn about_dy(&self) -> f64 {
        px_rows((1.0 - self.about) * 50.0)
    }

    pub fn about_scale(&self) -> f64 {
        0.95 + self.about * 0.05
    }

    /// Staggered horizontal lead-ins (columns, negative = left) for the
    /// about-me heading, role and bio.
    pub fn about_dx(&self) -> [f64; 3] {
        [-20.0, -15.0, -10.0].map(|px| px_cols((1.0 - self.about) * px))
    }

    /// The about-me block only takes pointer input once mostly visible.
    pub fn about_interactive(&self) -> bool {
        self.about > 0.5
    }
}

/// `min(scroll · k, cap)` with scroll in rows and cap in design pixels.
fn parallax(offset: f64, k: f64, cap_px: f64) -> f64 {
    (offset * k).min(px_rows(cap_px))
}

pub fn nav_opacity(offset: f64) -> f64 {
    if offset > px_rows(NAV_DIM_AFTER_PX) {
        NAV_DIM_OPACITY
    } else {
        1.0
    }
}

/// `contact_screen_top` is the contact block's row relative to the
/// viewport top (negative once scrolled past).
pub fn nav_inverted(contact_screen_top: f64) -> bool {
    contact_screen_top <= px_rows(NAV_INVERT_WITHIN_PX)
}

pub fn show_scroll_top(offset: f64) -> bool {
    offset > px_rows(SCROLL_TOP_AFTER_PX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hero_at_rest() {
        let m = HeroMotion::at(0.0, 40.0, false);
        assert_eq!(m.progress, 0.0);
        assert_eq!(m.image_scale, 1.0);
        assert_eq!(m.text_opacity, 1.0);
        assert_eq!(m.about, 0.0);
        assert_eq!(m.name_dy, 0.0);
    }

    #[test]
    fn hero_half_way() {
        let m = HeroMotion::at(20.0, 40.0, true);
        assert_eq!(m.progress, 0.5);
        assert!((m.image_scale - 0.825).abs() < 1e-9);
        assert_eq!(m.image_shift, -0.15);
        assert_eq!(m.text_opacity, 0.0);
        // Parallax is capped: 50px / 30px / 20px.
        assert_eq!(m.name_dy, 2.5);
        assert_eq!(m.role_dy, 1.5);
        assert_eq!(m.resume_dy, 1.0);
        assert_eq!(m.about, 0.0);
    }

    #[test]
    fn hero_scrolled_past() {
        let m = HeroMotion::at(400.0, 40.0, false);
        assert_eq!(m.progress, 1.0);
        assert!((m.image_scale - 0.65).abs() < 1e-9);
        assert_eq!(m.about, 1.0);
        assert_eq!(m.about_dy(), 0.0);
        assert_eq!(m.about_dx(), [0.0, 0.0, 0.0]);
        assert!(m.about_interactive());
    }

    #[test]
    fn about_reveal_window() {
        // Starts at half a viewport, complete 0.3 viewports later.
        assert_eq!(HeroMotion::at(20.0, 40.0, false).about, 0.0);
        assert_eq!(HeroMotion::at(26.0, 40.0, false).about, 0.5);
        assert_eq!(HeroMotion::at(32.0, 40.0, false).about, 1.0);
    }

    #[test]
    fn section_keyframes() {
        let m = Motion::new().unwrap();
        assert_eq!(m.services_title_y.sample(0.25), 50.0);
        assert_eq!(m.services_title_opacity.sample(0.9), 1.0);
        assert_eq!(m.contact_y.sample(0.5), 0.0);
        assert_eq!(m.contact_opacity.sample(0.1), 0.5);
        assert_eq!(m.contact_opacity.sample(0.5), 1.0);
        assert_eq!(m.contact_opacity.sample(1.0), 0.0);
    }

    #[test]
    fn chrome_thresholds() {
        assert_eq!(nav_opacity(5.0), 1.0);
        assert_eq!(nav_opacity(5.5), NAV_DIM_OPACITY);
        assert!(!show_scroll_top(25.0));
        assert!(show_scroll_top(25.5));
        assert!(nav_inverted(5.0));
        assert!(!nav_inverted(6.0));
    }
}
