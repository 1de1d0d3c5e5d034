//! A personal portfolio page for the terminal.
//!
//! Run the binary to scroll through the hero, projects, skills, services
//! and contact sections.  Run with `--dump-config` to print the effective
//! key bindings as TOML.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

use crate::app::{
    assets::{spawn_image_loader, ImageLoaded},
    event::{spawn_event_reader, AppEvent},
    handler,
    open::SystemOpener,
    state::AppState,
};
use crate::core::clipboard::Osc52Clipboard;
use crate::ui::hit::HitMap;

type Tui = Terminal<CrosstermBackend<io::Stderr>>;

/// Wake-up used when nothing is scheduled.
const IDLE_WAIT: Duration = Duration::from_millis(250);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), version, about = "Scroll-reactive portfolio in the terminal")]
struct Cli {
    /// Directory holding the portrait, project images and resume.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Write logs to this file (filter with RUST_LOG, default `info`).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Skip the name scramble on start.
    #[arg(long)]
    no_intro: bool,

    /// Jump instead of easing and freeze ambient animation.
    #[arg(long)]
    reduced_motion: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    dump_config: bool,
}

// ───────────────────────────────────────── logging ───────────

/// Logs go to `--log-file` when given.  Otherwise they share stderr with
/// the UI, so nothing is emitted unless `RUST_LOG` asks for it.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    core::content::validate().context("built-in page content is invalid")?;
    let motion = ui::motion::Motion::new()?;
    let mut user_config = config::AppConfig::load()?;
    if cli.reduced_motion {
        user_config.reduced_motion = true;
    }

    if cli.dump_config {
        print!("{}", user_config.to_toml()?);
        return Ok(());
    }

    if !cli.assets.is_dir() {
        tracing::warn!(path = %cli.assets.display(), "asset directory not found; images will show placeholders");
    }

    let mut state = AppState::new(
        user_config,
        motion,
        cli.assets.clone(),
        Box::new(Osc52Clipboard::stdout()),
        Box::new(SystemOpener),
    );

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state, &cli).await;

    // ── teardown ──────────────────────────────────────────────
    // Restore the terminal even when the loop failed.
    state.teardown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

async fn run(terminal: &mut Tui, state: &mut AppState, cli: &Cli) -> Result<()> {
    let paths = core::content::image_paths();
    state.images.expect(&paths);
    let mut images: UnboundedReceiver<ImageLoaded> = spawn_image_loader(cli.assets.clone(), paths);
    let mut events = spawn_event_reader();

    let size = terminal.size()?;
    state.resize(size.width, size.height);
    let start = Instant::now();
    state.mount(0, !cli.no_intro);

    // ── event loop ────────────────────────────────────────────
    loop {
        let mut hits = HitMap::default();
        terminal.draw(|frame| hits = ui::draw::draw(frame, state))?;
        state.hits = hits;
        // The page may have moved under a resting pointer.
        state.refresh_hover();

        let wait = state.sched.next_deadline().map_or(IDLE_WAIT, |deadline| {
            Duration::from_millis(deadline.saturating_sub(elapsed_ms(start)))
        });

        let woke = tokio::select! {
            biased;

            Some(event) = events.recv() => Some(event),

            Some(loaded) = images.recv() => {
                state.images.insert(loaded);
                None
            }

            _ = tokio::time::sleep(wait) => None,
        };

        state.now = elapsed_ms(start);
        if let Some(event) = woke {
            dispatch(state, event);
            // Drain everything currently queued before redrawing so wheel
            // bursts don't cost a frame each.
            while let Ok(event) = events.try_recv() {
                dispatch(state, event);
            }
        }
        state.run_timers(state.now);

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

fn dispatch(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Key(k) => handler::handle_key(state, k),
        AppEvent::Mouse(m) => handler::handle_mouse(state, m),
        AppEvent::Resize(w, h) => state.resize(w, h),
    }
}
