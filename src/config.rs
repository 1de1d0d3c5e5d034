//! User configuration: key bindings and scroll feel.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/folio/config.toml` (default
//! `~/.config/folio/config.toml`).  Every field is optional; anything the
//! file leaves out keeps its built-in default.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    NextSection,
    PrevSection,
    NextProject,
    PrevProject,
    OpenProject,
    CopyEmail,
    OpenResume,
    ToggleHelp,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup).
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::PageUp,
        Action::PageDown,
        Action::Top,
        Action::Bottom,
        Action::NextSection,
        Action::PrevSection,
        Action::NextProject,
        Action::PrevProject,
        Action::OpenProject,
        Action::CopyEmail,
        Action::OpenResume,
        Action::ToggleHelp,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::MoveUp => "Scroll Up",
            Action::MoveDown => "Scroll Down",
            Action::PageUp => "Page Up",
            Action::PageDown => "Page Down",
            Action::Top => "Back to Top",
            Action::Bottom => "Jump to End",
            Action::NextSection => "Next Section",
            Action::PrevSection => "Previous Section",
            Action::NextProject => "Next Project",
            Action::PrevProject => "Previous Project",
            Action::OpenProject => "Open Project",
            Action::CopyEmail => "Copy Email",
            Action::OpenResume => "Open Resume",
            Action::ToggleHelp => "Controls",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::NextSection => "next_section",
            Action::PrevSection => "prev_section",
            Action::NextProject => "next_project",
            Action::PrevProject => "prev_project",
            Action::OpenProject => "open_project",
            Action::CopyEmail => "copy_email",
            Action::OpenResume => "open_resume",
            Action::ToggleHelp => "toggle_help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  CTRL and ALT are always
    /// compared; SHIFT only for non-character keys, since a shifted
    /// character already arrives as its own code (`G`, `?`).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = match self.code {
            KeyCode::Char(_) => KeyModifiers::CONTROL | KeyModifiers::ALT,
            _ => KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT,
        };
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Ctrl+c"`, `"↓"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::BackTab => "Tab".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Ctrl+c"`, `"PageDown"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::BackTab => "BackTab".into(),
            other => key_name(other),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"PageDown"`, `"G"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?.trim();

        for &part in &parts[..parts.len() - 1] {
            match part.trim().to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        // Single characters keep their case: `G` and `g` are different keys.
        let mut chars = key_part.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(KeyBind::new(KeyCode::Char(c), modifiers));
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => KeyCode::F(s[1..].parse().ok()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── file format ───────

/// On-disk shape.  Bindings are keyed by action name; unknown names and
/// unparseable keys are skipped with a warning.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    wheel_rows: Option<u16>,
    scroll_speed: Option<f64>,
    reduced_motion: Option<bool>,
    bindings: BTreeMap<String, Vec<String>>,
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: key bindings and scroll feel.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Rows moved per mouse-wheel notch.
    pub wheel_rows: u16,
    /// Fraction of the remaining distance covered per frame by the smooth
    /// scroll.
    pub scroll_speed: f64,
    /// Jump instead of easing, and hold the marquee still.
    pub reduced_motion: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            wheel_rows: 3,
            scroll_speed: 0.25,
            reduced_motion: false,
        }
    }
}

impl AppConfig {
    /// Built-in bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Action::MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(PageUp, n), KeyBind::new(Char('b'), n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Action::Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Action::Bottom, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), n)]);
        m.insert(Action::NextSection, vec![KeyBind::new(Tab, n), KeyBind::new(Char('n'), n)]);
        m.insert(
            Action::PrevSection,
            vec![KeyBind::new(BackTab, KeyModifiers::SHIFT), KeyBind::new(Char('p'), n)],
        );
        m.insert(Action::NextProject, vec![KeyBind::new(Char(']'), n)]);
        m.insert(Action::PrevProject, vec![KeyBind::new(Char('['), n)]);
        m.insert(Action::OpenProject, vec![KeyBind::new(Enter, n)]);
        m.insert(Action::CopyEmail, vec![KeyBind::new(Char('c'), n)]);
        m.insert(Action::OpenResume, vec![KeyBind::new(Char('r'), n)]);
        m.insert(Action::ToggleHelp, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Action::Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Format the binding list for a given action (e.g. `"↑/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: section | {}: copy email | {}: controls | {}: quit",
            self.short_binding(Action::MoveUp),
            self.short_binding(Action::MoveDown),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::CopyEmail),
            self.short_binding(Action::ToggleHelp),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults when no file exists.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a config document.  Syntax errors fail; bad individual entries
    /// are logged and skipped.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = toml::from_str(s)?;
        let mut config = Self::default();

        if let Some(rows) = file.wheel_rows {
            config.wheel_rows = rows.clamp(1, 20);
        }
        if let Some(speed) = file.scroll_speed {
            if speed.is_finite() {
                config.scroll_speed = speed.clamp(0.05, 1.0);
            } else {
                tracing::warn!("ignoring non-finite scroll_speed");
            }
        }
        if let Some(reduced) = file.reduced_motion {
            config.reduced_motion = reduced;
        }

        for (key, values) in &file.bindings {
            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!(action = %key, "unknown action in config, skipping");
                continue;
            };
            let mut parsed = Vec::new();
            for value in values {
                match KeyBind::parse(value) {
                    Some(bind) => parsed.push(bind),
                    None => tracing::warn!(action = %key, key = %value, "unparseable key"),
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        Ok(config)
    }

    /// Render the current settings as a config file.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        let mut bindings = BTreeMap::new();
        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys = binds.iter().map(|b| b.to_config_string()).collect();
                bindings.insert(action.config_key().to_string(), keys);
            }
        }
        let file = ConfigFile {
            wheel_rows: Some(self.wheel_rows),
            scroll_speed: Some(self.scroll_speed),
            reduced_motion: Some(self.reduced_motion),
            bindings,
        };
        Ok(toml::to_string_pretty(&file)?)
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/folio/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("folio").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn defaults_cover_every_action() {
        let config = AppConfig::default();
        for &action in Action::ALL {
            assert_ne!(config.display_bindings(action), "unbound", "{action:?}");
        }
    }

    #[test]
    fn shifted_characters_match_without_shift_in_the_binding() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Action::Bottom)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(Action::ToggleHelp)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn parses_keys() {
        assert_eq!(
            KeyBind::parse("Ctrl+c"),
            Some(KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            KeyBind::parse("PageDown"),
            Some(KeyBind::new(KeyCode::PageDown, KeyModifiers::NONE))
        );
        assert_eq!(
            KeyBind::parse("G"),
            Some(KeyBind::new(KeyCode::Char('G'), KeyModifiers::NONE))
        );
        assert_eq!(KeyBind::parse("Hyper+x"), None);
        assert_eq!(KeyBind::parse("NotAKey"), None);
    }

    #[test]
    fn file_overrides_and_skips_bad_entries() {
        let config = AppConfig::from_toml_str(
            r#"
            wheel_rows = 5
            reduced_motion = true

            [bindings]
            quit = ["x", "Ctrl+q"]
            copy_email = ["NotAKey"]
            launch_rockets = ["l"]
            "#,
        )
        .unwrap();

        assert_eq!(config.wheel_rows, 5);
        assert!(config.reduced_motion);
        assert_eq!(config.scroll_speed, 0.25);
        assert_eq!(config.display_bindings(Action::Quit), "x/Ctrl+q");
        // Nothing valid given: the default stays.
        assert_eq!(config.display_bindings(Action::CopyEmail), "c");
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert!(AppConfig::from_toml_str("wheel_rows = [").is_err());
    }

    #[test]
    fn dumped_config_reads_back() {
        let mut config = AppConfig::default();
        config.wheel_rows = 7;
        config
            .bindings
            .insert(Action::Quit, vec![KeyBind::new(KeyCode::Esc, KeyModifiers::NONE)]);

        let text = config.to_toml().unwrap();
        let back = AppConfig::from_toml_str(&text).unwrap();
        assert_eq!(back.wheel_rows, 7);
        assert_eq!(back.display_bindings(Action::Quit), "Esc");
        assert_eq!(back.display_bindings(Action::Bottom), "End/G");
    }
}
