//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! Every timer and scroll subscription is created in [`AppState::mount`] and
//! released in [`AppState::teardown`].

use std::path::PathBuf;
use std::time::Duration;

use chrono::{Datelike, Local};
use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    cards::CardDeck,
    clipboard::{ClipboardSink, CopyIndicator},
    clock::{ClockDisplay, Precision},
    content::{PROFILE, PROJECTS, SERVICES, SOCIAL_LINKS},
    gallery::{Gallery, Step, Swipe},
    hover::HoverSignal,
    modal::Modal,
    progress::{
        ElementBounds, Reveal, ScrollHub, ScrollRange, ScrollSnapshot, ScrollTracker, SubscriptionId,
    },
    scramble::TextScramble,
    timer::{Scheduler, TimerHandle},
};
use crate::ui::hit::{HitMap, Target};
use crate::ui::motion::Motion;
use crate::ui::smooth_scroll::SmoothScroll;

use super::assets::ImageStore;
use super::open::LinkOpener;
use super::page::{NavTarget, PageLayout, Section, PX_PER_COLUMN};

/// Animation frame period (smooth scroll, marquee, pulses).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
pub const CONTACT_CLOCK_EVERY: Duration = Duration::from_millis(100);
pub const FOOTER_CLOCK_EVERY: Duration = Duration::from_millis(10);
pub const STATUS_CLOCK_EVERY: Duration = Duration::from_millis(1000);
/// Rows of the projects header that must scroll in before the list is
/// fully revealed.
const PROJECTS_ENTER_ROWS: f64 = 4.0;

/// Work items the scheduler hands back to [`AppState::run_timers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    Scramble,
    CopyReset,
    ContactClock,
    FooterClock,
    StatusClock,
    DeckRotate,
    Frame,
}

/// Which view / overlay is currently active.  The project modal is tracked
/// by [`AppState::modal`] and sits between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    Help,
}

/// Top-level application state.
pub struct AppState {
    /// User-configurable keybindings and scroll settings.
    pub config: AppConfig,
    pub motion: Motion,
    /// Section offsets for the current terminal size.
    pub layout: PageLayout,
    /// Full terminal area, status bar included.
    pub area: Rect,
    pub scroll: SmoothScroll,
    pub sched: Scheduler<TimerTask>,
    pub hub: ScrollHub,
    projects_sub: Option<SubscriptionId>,
    services_sub: Option<SubscriptionId>,
    contact_sub: Option<SubscriptionId>,
    /// "Reveal once" latches for elements that stay visible after entering.
    pub projects_reveal: Reveal,
    pub services_reveal: Reveal,
    pub contact_reveal: Reveal,
    /// Hero name with the scramble effect.
    pub name: TextScramble,
    pub copy: CopyIndicator,
    pub contact_clock: ClockDisplay,
    pub footer_clock: ClockDisplay,
    pub status_clock: ClockDisplay,
    /// Services card stack.
    pub deck: CardDeck,
    /// Open project (index into `PROJECTS`).
    pub modal: Modal<usize>,
    pub gallery: Gallery,
    pub swipe: Swipe,
    /// Project row under the pointer, shared by the list and the preview.
    pub hovered_project: HoverSignal<usize>,
    /// Keyboard selection in the project list.
    pub focused_project: Option<usize>,
    /// Hit target under the pointer after the last draw.
    pub hover: Option<Target>,
    pub pointer: Option<(u16, u16)>,
    /// Clickable regions of the last frame.
    pub hits: HitMap,
    pub images: ImageStore,
    /// Directory holding the portrait, project images and resume.
    pub assets: PathBuf,
    clipboard: Box<dyn ClipboardSink>,
    opener: Box<dyn LinkOpener>,
    frame_timer: Option<TimerHandle>,
    /// Milliseconds since start, as of the last event or timer run.
    pub now: u64,
    /// Year shown in the copyright lines, read at mount.
    pub year: i32,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        motion: Motion,
        assets: PathBuf,
        clipboard: Box<dyn ClipboardSink>,
        opener: Box<dyn LinkOpener>,
    ) -> Self {
        let speed = if config.reduced_motion {
            1.0
        } else {
            config.scroll_speed
        };
        let area = Rect::new(0, 0, 80, 24);
        Self {
            config,
            motion,
            layout: PageLayout::compute(area.width, page_rows(area)),
            area,
            scroll: SmoothScroll::new(speed),
            sched: Scheduler::new(),
            hub: ScrollHub::new(),
            projects_sub: None,
            services_sub: None,
            contact_sub: None,
            projects_reveal: Reveal::default(),
            services_reveal: Reveal::default(),
            contact_reveal: Reveal::default(),
            name: TextScramble::new(PROFILE.short_name),
            copy: CopyIndicator::default(),
            contact_clock: ClockDisplay::new(Precision::Millis, CONTACT_CLOCK_EVERY),
            footer_clock: ClockDisplay::new(Precision::Millis, FOOTER_CLOCK_EVERY),
            status_clock: ClockDisplay::new(Precision::Seconds, STATUS_CLOCK_EVERY),
            deck: CardDeck::new(SERVICES.len()),
            modal: Modal::default(),
            gallery: Gallery::new(0),
            swipe: Swipe::default(),
            hovered_project: HoverSignal::default(),
            focused_project: None,
            hover: None,
            pointer: None,
            hits: HitMap::default(),
            images: ImageStore::default(),
            assets,
            clipboard,
            opener,
            frame_timer: None,
            now: 0,
            year: Local::now().year(),
            status_message: None,
            active_view: ActiveView::default(),
            should_quit: false,
        }
    }

    // ── lifecycle ───────────────────────────────────────────────

    /// Start clocks, card rotation, the frame timer and the scroll
    /// trackers.  `intro` runs the name scramble once.
    pub fn mount(&mut self, now: u64, intro: bool) {
        self.now = now;
        let local = Local::now();
        self.year = local.year();

        self.contact_clock
            .mount(&mut self.sched, now, TimerTask::ContactClock, &local);
        self.footer_clock
            .mount(&mut self.sched, now, TimerTask::FooterClock, &local);
        self.status_clock
            .mount(&mut self.sched, now, TimerTask::StatusClock, &local);
        self.deck.start(&mut self.sched, now, TimerTask::DeckRotate);
        if self.frame_timer.is_none() {
            self.frame_timer = Some(self.sched.repeating(now, FRAME_INTERVAL, TimerTask::Frame));
        }
        if intro {
            self.name.trigger(&mut self.sched, now, TimerTask::Scramble);
        }

        if self.projects_sub.is_none() {
            self.projects_sub = Some(self.hub.subscribe(ScrollTracker::new(ScrollRange::ENTERING)));
        }
        if self.services_sub.is_none() {
            self.services_sub = Some(self.hub.subscribe(ScrollTracker::new(ScrollRange::ENTER_TO_EXIT)));
        }
        if self.contact_sub.is_none() {
            self.contact_sub = Some(self.hub.subscribe(ScrollTracker::new(ScrollRange::ENTER_TO_EXIT)));
        }
        self.attach_trackers();
        self.publish_scroll();

        tracing::debug!(timers = self.sched.len(), listeners = self.hub.listener_count(), "mounted");
    }

    /// Cancel every timer and drop every scroll subscription.
    pub fn teardown(&mut self) {
        self.name.teardown(&mut self.sched);
        self.copy.teardown(&mut self.sched);
        self.contact_clock.unmount(&mut self.sched);
        self.footer_clock.unmount(&mut self.sched);
        self.status_clock.unmount(&mut self.sched);
        self.deck.teardown(&mut self.sched);
        if let Some(handle) = self.frame_timer.take() {
            self.sched.cancel(handle);
        }
        for id in [
            self.projects_sub.take(),
            self.services_sub.take(),
            self.contact_sub.take(),
        ]
            .into_iter()
            .flatten()
        {
            self.hub.unsubscribe(id);
        }
        self.modal.close();
        self.swipe.cancel();
        if !self.sched.is_empty() {
            tracing::warn!(timers = self.sched.len(), "timers left after teardown");
        }
        tracing::debug!(listeners = self.hub.listener_count(), "torn down");
    }

    /// The terminal changed size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
        self.layout = PageLayout::compute(width, page_rows(self.area));
        self.scroll.clamp_to(self.layout.max_scroll());
        self.attach_trackers();
        self.publish_scroll();
        tracing::debug!(width, height, total = self.layout.total(), "resized");
    }

    fn attach_trackers(&mut self) {
        if let Some(id) = self.projects_sub {
            // The list fades in over the header's first rows.
            let projects = self.layout.bounds(Section::Projects);
            self.hub.attach(
                id,
                ElementBounds {
                    top: projects.top,
                    height: PROJECTS_ENTER_ROWS,
                },
            );
        }
        if let Some(id) = self.services_sub {
            self.hub.attach(id, self.layout.bounds(Section::Services));
        }
        if let Some(id) = self.contact_sub {
            self.hub.attach(id, self.layout.bounds(Section::Contact));
        }
    }

    /// Push the current offset to every tracker and update the latches.
    pub fn publish_scroll(&mut self) {
        let snapshot = ScrollSnapshot {
            offset: self.scroll.offset(),
            viewport: self.layout.viewport_rows(),
        };
        self.hub.publish(snapshot);
        self.projects_reveal.observe(self.projects_progress());
        self.services_reveal.observe(self.services_progress());
        self.contact_reveal.observe(self.contact_progress());
    }

    pub fn projects_progress(&self) -> f64 {
        self.projects_sub
            .and_then(|id| self.hub.progress(id))
            .unwrap_or(0.0)
    }

    pub fn services_progress(&self) -> f64 {
        self.services_sub
            .and_then(|id| self.hub.progress(id))
            .unwrap_or(0.0)
    }

    pub fn contact_progress(&self) -> f64 {
        self.contact_sub
            .and_then(|id| self.hub.progress(id))
            .unwrap_or(0.0)
    }

    // ── timers ──────────────────────────────────────────────────

    /// Fire every task due at `now`.
    pub fn run_timers(&mut self, now: u64) {
        self.now = now;
        let due = self.sched.due(now);
        if due.is_empty() {
            return;
        }
        let local = Local::now();
        for (_, task) in due {
            match task {
                TimerTask::Scramble => {
                    self.name.on_tick(&mut self.sched);
                }
                TimerTask::CopyReset => self.copy.on_timer(),
                TimerTask::ContactClock => self.contact_clock.on_tick(&local),
                TimerTask::FooterClock => self.footer_clock.on_tick(&local),
                TimerTask::StatusClock => self.status_clock.on_tick(&local),
                TimerTask::DeckRotate => {
                    self.deck.on_tick();
                }
                TimerTask::Frame => self.on_frame(),
            }
        }
    }

    fn on_frame(&mut self) {
        if self.scroll.tick() {
            self.publish_scroll();
        }
    }

    // ── scrolling ───────────────────────────────────────────────

    pub fn scroll_by(&mut self, rows: f64) {
        self.scroll.nudge(rows, self.layout.max_scroll());
    }

    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll.set_target(offset, self.layout.max_scroll());
    }

    pub fn page_by(&mut self, pages: f64) {
        self.scroll_by(pages * (self.layout.viewport_rows() - 2.0).max(1.0));
    }

    pub fn nav_to(&mut self, target: NavTarget) {
        tracing::debug!(?target, "navigate");
        self.scroll_to(self.layout.anchor(target));
    }

    pub fn next_section(&mut self) {
        self.scroll_to(self.layout.next_anchor(self.scroll.target()));
    }

    pub fn prev_section(&mut self) {
        self.scroll_to(self.layout.prev_anchor(self.scroll.target()));
    }

    pub fn current_section(&self) -> Section {
        self.layout.section_at(self.scroll.offset())
    }

    // ── projects ────────────────────────────────────────────────

    /// Move the keyboard focus through the project list, scrolling the
    /// focused entry into view and previewing it.
    pub fn focus_project(&mut self, step: Step) {
        let len = PROJECTS.len();
        if len == 0 {
            return;
        }
        let next = match (self.focused_project, step) {
            (None, Step::Next) => 0,
            (None, Step::Previous) => len - 1,
            (Some(i), Step::Next) => (i + 1) % len,
            (Some(i), Step::Previous) => (i + len - 1) % len,
        };
        self.focused_project = Some(next);
        self.hovered_project.set(Some(next));
        let top = self.layout.project_top(next) - self.layout.viewport_rows() / 3.0;
        self.scroll_to(top);
    }

    pub fn open_project(&mut self, index: usize) {
        let Some(project) = PROJECTS.get(index) else {
            return;
        };
        tracing::debug!(project = project.title, "open project");
        self.modal.open(index);
        self.gallery = Gallery::new(project.images.len());
        self.swipe.cancel();
        self.focused_project = Some(index);
    }

    pub fn close_project(&mut self) {
        self.modal.close();
        self.swipe.cancel();
    }

    pub fn gallery_step(&mut self, step: Step) {
        if self.modal.is_open() {
            self.gallery.apply(step);
        }
    }

    /// Pointer pressed inside the modal image (column in cells).
    pub fn swipe_begin(&mut self, column: u16) {
        self.swipe.begin(f64::from(column) * PX_PER_COLUMN);
    }

    pub fn swipe_end(&mut self, column: u16) {
        if let Some(step) = self.swipe.end(f64::from(column) * PX_PER_COLUMN) {
            self.gallery_step(step);
        }
    }

    // ── contact / links ─────────────────────────────────────────

    pub fn copy_email(&mut self) {
        let result = self.copy.copy(
            self.clipboard.as_mut(),
            PROFILE.email,
            &mut self.sched,
            self.now,
            TimerTask::CopyReset,
        );
        if result.is_err() {
            self.status_message = Some("Could not copy the email address".to_string());
        }
    }

    pub fn open_link(&mut self, url: &str) {
        match self.opener.open(url) {
            Ok(()) => tracing::debug!(url, "opened"),
            Err(err) => {
                tracing::warn!(url, %err, "failed to open link");
                self.status_message = Some(format!("Could not open {url}"));
            }
        }
    }

    pub fn open_social(&mut self, index: usize) {
        if let Some(link) = SOCIAL_LINKS.get(index) {
            self.open_link(link.url);
        }
    }

    pub fn open_project_link(&mut self, index: usize) {
        let Some(project) = self.modal.selected().and_then(|i| PROJECTS.get(*i)) else {
            return;
        };
        if let Some(link) = project.links.get(index) {
            self.open_link(link.url);
        }
    }

    pub fn open_resume(&mut self) {
        let path = self.assets.join(PROFILE.resume);
        self.open_link(&path.to_string_lossy());
    }

    // ── pointer ─────────────────────────────────────────────────

    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        self.pointer = Some((column, row));
        self.refresh_hover();
    }

    /// Re-evaluate the hover target, e.g. after the page scrolled under a
    /// resting pointer.  Enter / leave effects fire only on change.
    pub fn refresh_hover(&mut self) {
        let target = self.pointer.and_then(|(c, r)| self.hits.hit(c, r));
        if target == self.hover {
            return;
        }
        let previous = std::mem::replace(&mut self.hover, target);

        match previous {
            Some(Target::HeroName) => {
                self.name.reset();
            }
            Some(Target::Cards) => {
                self.deck.set_hovered(false);
            }
            _ => {}
        }
        match target {
            Some(Target::HeroName) => {
                self.name.trigger(&mut self.sched, self.now, TimerTask::Scramble);
            }
            Some(Target::Cards) => {
                self.deck.set_hovered(true);
            }
            _ => {}
        }

        if let Some(Target::Project(i)) = target {
            self.hovered_project.set(Some(i));
            self.focused_project = Some(i);
        } else if matches!(previous, Some(Target::Project(_))) {
            self.hovered_project.clear();
        }
    }

    pub fn is_hovered(&self, target: Target) -> bool {
        self.hover == Some(target)
    }
}

/// Rows available to the page (the status bar takes the last one).
fn page_rows(area: Rect) -> u16 {
    area.height.saturating_sub(1).max(1)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::open::tests::RecordingOpener;
    use crate::core::clipboard::tests::MemoryClipboard;
    use crate::core::clipboard::CopyState;
    use crate::core::clipboard::COPY_FEEDBACK;
    use pretty_assertions::assert_eq;

    pub(crate) fn test_state() -> AppState {
        let mut state = AppState::new(
            AppConfig::default(),
            Motion::new().unwrap(),
            PathBuf::from("assets"),
            Box::new(MemoryClipboard::default()),
            Box::new(RecordingOpener::default()),
        );
        state.resize(100, 31);
        state
    }

    fn settle(state: &mut AppState) {
        for _ in 0..400 {
            if !state.scroll.is_animating() {
                break;
            }
            state.now += FRAME_INTERVAL.as_millis() as u64;
            state.run_timers(state.now);
        }
    }

    #[test]
    fn mount_then_teardown_releases_everything() {
        let mut state = test_state();
        state.mount(0, true);
        assert!(state.sched.len() >= 6);
        assert_eq!(state.hub.listener_count(), 3);
        assert!(state.name.is_active());

        state.copy_email();
        state.open_project(0);
        state.teardown();

        assert!(state.sched.is_empty());
        assert_eq!(state.hub.listener_count(), 0);
        assert!(!state.modal.is_open());
        assert!(!state.name.is_active());
        assert!(!state.contact_clock.is_mounted());
    }

    #[test]
    fn intro_scramble_finishes_on_target() {
        let mut state = test_state();
        state.mount(0, true);
        let ticks = state.name.ticks_to_reveal() as u64;
        for i in 1..=ticks {
            state.run_timers(i * 60);
        }
        assert!(!state.name.is_active());
        assert_eq!(state.name.text(), PROFILE.short_name);
    }

    #[test]
    fn clocks_show_time_after_mount() {
        let mut state = test_state();
        assert_eq!(state.status_clock.text(), crate::core::clock::PLACEHOLDER);
        state.mount(0, false);
        assert_eq!(state.status_clock.text().len(), 8);
        assert_eq!(state.footer_clock.text().len(), 12);
    }

    #[test]
    fn copy_email_then_reset() {
        let mut state = test_state();
        state.mount(0, false);
        state.now = 500;
        state.copy_email();
        assert_eq!(state.copy.state(), CopyState::Copied);

        state.run_timers(500 + COPY_FEEDBACK.as_millis() as u64);
        assert_eq!(state.copy.state(), CopyState::Idle);
    }

    #[test]
    fn copy_failure_keeps_idle() {
        let mut state = AppState::new(
            AppConfig::default(),
            Motion::new().unwrap(),
            PathBuf::from("assets"),
            Box::new(MemoryClipboard {
                fail: true,
                ..Default::default()
            }),
            Box::new(RecordingOpener::default()),
        );
        state.copy_email();
        assert_eq!(state.copy.state(), CopyState::Idle);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn opener_failure_sets_status() {
        let mut state = AppState::new(
            AppConfig::default(),
            Motion::new().unwrap(),
            PathBuf::from("assets"),
            Box::new(MemoryClipboard::default()),
            Box::new(RecordingOpener {
                fail: true,
                ..Default::default()
            }),
        );
        state.open_social(0);
        assert!(state.status_message.unwrap().contains(SOCIAL_LINKS[0].url));
    }

    #[test]
    fn nav_smooth_scrolls_to_anchor() {
        let mut state = test_state();
        state.mount(0, false);
        state.nav_to(NavTarget::Contact);
        assert!(state.scroll.is_animating());
        settle(&mut state);
        assert_eq!(state.scroll.offset(), state.layout.anchor(NavTarget::Contact));
        assert_eq!(state.current_section(), Section::Contact);
        assert!(state.contact_progress() > 0.0);
    }

    #[test]
    fn reduced_motion_jumps() {
        let config = AppConfig {
            reduced_motion: true,
            ..AppConfig::default()
        };
        let mut state = AppState::new(
            config,
            Motion::new().unwrap(),
            PathBuf::from("assets"),
            Box::new(MemoryClipboard::default()),
            Box::new(RecordingOpener::default()),
        );
        state.resize(100, 31);
        state.mount(0, false);
        state.nav_to(NavTarget::Projects);
        state.run_timers(16);
        assert_eq!(state.scroll.offset(), state.layout.anchor(NavTarget::Projects));
    }

    #[test]
    fn reveal_latches_survive_scrolling_back() {
        let mut state = test_state();
        state.mount(0, false);
        state.nav_to(NavTarget::Services);
        settle(&mut state);
        let seen = state.services_reveal.value();
        assert!(seen > 0.0);

        state.nav_to(NavTarget::Home);
        settle(&mut state);
        assert_eq!(state.services_progress(), 0.0);
        assert_eq!(state.services_reveal.value(), seen);
    }

    #[test]
    fn projects_reveal_follows_its_own_tracker() {
        let mut state = test_state();
        state.mount(0, false);
        assert_eq!(state.projects_progress(), 0.0);
        assert_eq!(state.projects_reveal.value(), 0.0);

        let top = state.layout.bounds(Section::Projects).top;
        let vh = state.layout.viewport_rows();
        state.scroll_to(top - vh + PROJECTS_ENTER_ROWS / 2.0);
        settle(&mut state);
        assert!((state.projects_progress() - 0.5).abs() < 1e-9);

        state.nav_to(NavTarget::Projects);
        settle(&mut state);
        assert_eq!(state.projects_reveal.value(), 1.0);

        state.teardown();
        assert_eq!(state.projects_progress(), 0.0);
        assert_eq!(state.projects_reveal.value(), 1.0);
    }

    #[test]
    fn resize_clamps_scroll() {
        let mut state = test_state();
        state.mount(0, false);
        state.scroll_to(f64::MAX);
        settle(&mut state);
        let bottom = state.scroll.offset();
        state.resize(200, 60);
        assert!(state.scroll.offset() <= state.layout.max_scroll());
        assert!(state.scroll.offset() <= bottom);
    }

    #[test]
    fn project_modal_and_gallery() {
        let mut state = test_state();
        state.open_project(0);
        assert_eq!(state.modal.selected(), Some(&0));
        assert_eq!(state.gallery.len(), PROJECTS[0].images.len());

        state.gallery_step(Step::Previous);
        assert_eq!(state.gallery.index(), PROJECTS[0].images.len() - 1);

        // 10 columns = 80 design px, past the swipe threshold.
        state.gallery_step(Step::Next);
        state.swipe_begin(40);
        state.swipe_end(30);
        assert_eq!(state.gallery.index(), 1 % PROJECTS[0].images.len());

        state.close_project();
        assert!(!state.modal.is_open());
        state.gallery_step(Step::Next);
        assert_eq!(state.gallery.index(), 1 % PROJECTS[0].images.len());
    }

    #[test]
    fn focus_wraps_and_previews() {
        let mut state = test_state();
        state.focus_project(Step::Previous);
        assert_eq!(state.focused_project, Some(PROJECTS.len() - 1));
        state.focus_project(Step::Next);
        assert_eq!(state.focused_project, Some(0));
        assert_eq!(state.hovered_project.get(), Some(0));
    }

    #[test]
    fn hover_enter_and_leave() {
        let mut state = test_state();
        state.mount(0, false);
        state.hits.push(Rect::new(0, 0, 10, 1), Target::HeroName);
        state.hits.push(Rect::new(0, 5, 10, 1), Target::Project(2));
        state.hits.push(Rect::new(0, 8, 10, 4), Target::Cards);

        state.pointer_moved(3, 0);
        assert!(state.name.is_active());

        state.pointer_moved(3, 5);
        assert_eq!(state.hovered_project.get(), Some(2));

        state.pointer_moved(3, 9);
        assert!(state.deck.is_hovered());
        assert_eq!(state.hovered_project.get(), None);

        state.pointer_moved(50, 20);
        assert!(!state.deck.is_hovered());
        assert_eq!(state.hover, None);
    }
}
