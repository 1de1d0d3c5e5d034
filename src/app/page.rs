//! Page geometry: where each section sits on the scrolling page.
//!
//! Offsets are in rows.  Pixel constants from the visual design are
//! converted with [`px_rows`] / [`px_cols`].

use crate::core::content::{PROJECTS, SERVICES};
use crate::core::progress::ElementBounds;

/// Design pixels per terminal row.
pub const PX_PER_ROW: f64 = 20.0;
/// Design pixels per terminal column.
pub const PX_PER_COLUMN: f64 = 8.0;
/// Terminals narrower than this use the single-column layout.
pub const NARROW_COLUMNS: u16 = 80;

/// Rows above the first project entry (label and spacing).
pub const PROJECTS_HEADER_ROWS: u16 = 5;
/// Rows per project entry: title line, summary line, rule.
pub const PROJECT_ROWS: u16 = 3;
pub const SKILLS_ROWS: u16 = 9;
pub const FOOTER_ROWS: u16 = 3;

pub fn px_rows(px: f64) -> f64 {
    px / PX_PER_ROW
}

pub fn px_cols(px: f64) -> f64 {
    px / PX_PER_COLUMN
}

/// Top-level page sections, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Projects,
    Skills,
    Services,
    Contact,
    Footer,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Home,
        Section::Projects,
        Section::Skills,
        Section::Services,
        Section::Contact,
        Section::Footer,
    ];

    fn index(self) -> usize {
        match self {
            Section::Home => 0,
            Section::Projects => 1,
            Section::Skills => 2,
            Section::Services => 3,
            Section::Contact => 4,
            Section::Footer => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Projects => "Projects",
            Section::Skills => "Skills",
            Section::Services => "Services",
            Section::Contact => "Contact",
            Section::Footer => "Footer",
        }
    }
}

/// Entries of the navigation overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavTarget {
    Home,
    Me,
    Projects,
    Skills,
    Services,
    Contact,
}

impl NavTarget {
    pub const ALL: [NavTarget; 6] = [
        NavTarget::Home,
        NavTarget::Me,
        NavTarget::Projects,
        NavTarget::Skills,
        NavTarget::Services,
        NavTarget::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavTarget::Home => "Home",
            NavTarget::Me => "Me",
            NavTarget::Projects => "Projects",
            NavTarget::Skills => "Skills",
            NavTarget::Services => "Services",
            NavTarget::Contact => "Contact",
        }
    }
}

/// Section offsets for one terminal size.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: u16,
    pub viewport: u16,
    spans: [ElementBounds; 6],
    total: f64,
}

impl PageLayout {
    pub fn compute(width: u16, viewport: u16) -> Self {
        let vh = f64::from(viewport.max(1));
        let narrow = width < NARROW_COLUMNS;

        let heights = [
            (vh * 1.5).round(),
            f64::from(PROJECTS_HEADER_ROWS + PROJECT_ROWS * PROJECTS.len() as u16 + 2),
            f64::from(SKILLS_ROWS),
            services_rows(narrow).max(vh),
            contact_rows().max(vh),
            f64::from(FOOTER_ROWS),
        ];

        let mut spans = [ElementBounds {
            top: 0.0,
            height: 0.0,
        }; 6];
        let mut top = 0.0;
        for (span, height) in spans.iter_mut().zip(heights) {
            *span = ElementBounds { top, height };
            top += height;
        }

        Self {
            width,
            viewport,
            spans,
            total: top,
        }
    }

    pub fn is_narrow(&self) -> bool {
        self.width < NARROW_COLUMNS
    }

    pub fn viewport_rows(&self) -> f64 {
        f64::from(self.viewport.max(1))
    }

    pub fn bounds(&self, section: Section) -> ElementBounds {
        self.spans[section.index()]
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn max_scroll(&self) -> f64 {
        (self.total - self.viewport_rows()).max(0.0)
    }

    pub fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_scroll())
    }

    /// Scroll offset a navigation entry jumps to.  `Me` lands where the
    /// about-me block has fully faded in.
    pub fn anchor(&self, target: NavTarget) -> f64 {
        let raw = match target {
            NavTarget::Home => 0.0,
            NavTarget::Me => self.viewport_rows() * 0.8,
            NavTarget::Projects => self.bounds(Section::Projects).top,
            NavTarget::Skills => self.bounds(Section::Skills).top,
            NavTarget::Services => self.bounds(Section::Services).top,
            NavTarget::Contact => self.bounds(Section::Contact).top,
        };
        self.clamp(raw)
    }

    /// Section under the top row of the viewport.
    pub fn section_at(&self, offset: f64) -> Section {
        Section::ALL
            .iter()
            .rev()
            .copied()
            .find(|s| self.bounds(*s).top <= offset + 0.5)
            .unwrap_or(Section::Home)
    }

    /// First navigation anchor strictly below `offset`.
    pub fn next_anchor(&self, offset: f64) -> f64 {
        NavTarget::ALL
            .iter()
            .map(|t| self.anchor(*t))
            .find(|a| *a > offset + 0.5)
            .unwrap_or_else(|| self.max_scroll())
    }

    /// Last navigation anchor strictly above `offset`.
    pub fn prev_anchor(&self, offset: f64) -> f64 {
        NavTarget::ALL
            .iter()
            .rev()
            .map(|t| self.anchor(*t))
            .find(|a| *a < offset - 0.5)
            .unwrap_or(0.0)
    }

    /// Page row of a project entry's title line.
    pub fn project_top(&self, index: usize) -> f64 {
        self.bounds(Section::Projects).top
            + f64::from(PROJECTS_HEADER_ROWS)
            + f64::from(PROJECT_ROWS) * index as f64
    }
}

/// Content height of the services section: heading block, the service
/// list and the card stack (beside the list, or below it when narrow).
fn services_rows(narrow: bool) -> f64 {
    let list = 10 + SERVICES.len() * 4;
    let deck = 16;
    let rows = if narrow { list + deck + 2 } else { list.max(deck) + 4 };
    rows as f64
}

fn contact_rows() -> f64 {
    22.0
}
