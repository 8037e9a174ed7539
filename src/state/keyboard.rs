//! Keyboard navigation
//!
//! Two pieces: arrow-key navigation inside a radio group, and a dispatcher
//! mapping key chords to application shortcuts. Neither touches the terminal;
//! both take the key event and the state they need and report what to do.

use crate::platform::{NAVIGATION_MODIFIER, SHORTCUT_MODIFIER};
use crate::state::{Direction, RadioGroup};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;

/// Named places a shortcut can jump to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Home,
    Triage,
    Result,
    Accessibility,
    About,
}

impl Destination {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Triage => "Triage form",
            Self::Result => "Result",
            Self::Accessibility => "Accessibility",
            Self::About => "About",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "home" => Self::Home,
            "triage" => Self::Triage,
            "result" => Self::Result,
            "accessibility" => Self::Accessibility,
            "about" => Self::About,
            _ => return None,
        })
    }
}

/// Action bound to a key chord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Navigate(Destination),
    Cancel,
    Submit,
    LoadExample,
    Export,
    Print,
    CycleTheme,
    IncreaseFont,
    DecreaseFont,
}

impl Shortcut {
    /// Parse a binding target: `navigate:<destination>`, `cancel`, `submit`,
    /// `load-example`, `export`, `print`, `cycle-theme`, `font-up`, `font-down`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        if let Some(dest) = s.strip_prefix("navigate:") {
            return Destination::parse(dest).map(Self::Navigate);
        }
        Some(match s.as_str() {
            "cancel" => Self::Cancel,
            "submit" => Self::Submit,
            "load-example" => Self::LoadExample,
            "export" => Self::Export,
            "print" => Self::Print,
            "cycle-theme" => Self::CycleTheme,
            "font-up" => Self::IncreaseFont,
            "font-down" => Self::DecreaseFont,
            _ => return None,
        })
    }

    pub fn description(&self) -> String {
        match self {
            Self::Navigate(dest) => format!("Go to {}", dest.label()),
            Self::Cancel => "Close dialog / clear form".to_string(),
            Self::Submit => "Classify risk".to_string(),
            Self::LoadExample => "Load example patient".to_string(),
            Self::Export => "Save result as JSON".to_string(),
            Self::Print => "Print result".to_string(),
            Self::CycleTheme => "Switch theme".to_string(),
            Self::IncreaseFont => "Larger text".to_string(),
            Self::DecreaseFont => "Smaller text".to_string(),
        }
    }
}

/// What the application should do in response to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Navigate(Destination),
    CloseModal,
    /// Ask the user to confirm clearing the form
    ConfirmReset,
    Submit,
    LoadExample,
    Export,
    Print,
    CycleTheme,
    IncreaseFont,
    DecreaseFont,
}

/// Result of dispatching a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// The key is consumed and must not reach the focused control
    pub prevent_default: bool,
    pub command: Option<Command>,
}

impl KeyOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn consumed(command: Option<Command>) -> Self {
        Self {
            prevent_default: true,
            command,
        }
    }
}

/// A key plus modifiers, normalised so `Alt+T` and `Alt+Shift+t` compare equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        match code {
            KeyCode::Char(c) => Self {
                code: KeyCode::Char(c.to_ascii_lowercase()),
                modifiers: modifiers - KeyModifiers::SHIFT,
            },
            _ => Self { code, modifiers },
        }
    }

    pub fn from_event(key: &KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }

    /// Parse "t", "Ctrl+D", "Alt+T", "Ctrl+Up", "Esc"
    pub fn parse(shortcut: &str) -> Option<Self> {
        let parts: Vec<&str> = shortcut.split('+').map(str::trim).collect();
        let (key_str, mod_strs) = parts.split_last()?;

        let mut modifiers = KeyModifiers::NONE;
        for m in mod_strs {
            modifiers |= match m.to_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "shift" => KeyModifiers::SHIFT,
                "alt" | "option" => KeyModifiers::ALT,
                _ => return None,
            };
        }

        let code = match key_str.to_lowercase().as_str() {
            "enter" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" => KeyCode::Delete,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            s if s.chars().count() == 1 => KeyCode::Char(s.chars().next()?),
            _ => return None,
        };

        Some(Self::new(code, modifiers))
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "{}+", crate::platform::ALT_LABEL)?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "Shift+")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::Esc => write!(f, "Esc"),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Up => write!(f, "Up"),
            KeyCode::Down => write!(f, "Down"),
            KeyCode::Left => write!(f, "Left"),
            KeyCode::Right => write!(f, "Right"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// What the dispatcher needs to know about the screen
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchContext<'a> {
    pub modal_open: bool,
    pub form_active: bool,
    /// Destinations currently reachable
    pub links: &'a [Destination],
}

/// Maps key chords to shortcuts and resolves them against the screen state
#[derive(Debug, Clone, Default)]
pub struct KeyDispatcher {
    bindings: Vec<(KeyChord, Shortcut)>,
}

impl KeyDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_bindings() -> Self {
        let nav = NAVIGATION_MODIFIER;
        let cmd = SHORTCUT_MODIFIER;
        let mut dispatcher = Self::new();
        for (code, modifiers, shortcut) in [
            (KeyCode::Char('h'), nav, Shortcut::Navigate(Destination::Home)),
            (KeyCode::Char('t'), nav, Shortcut::Navigate(Destination::Triage)),
            (KeyCode::Char('r'), nav, Shortcut::Navigate(Destination::Result)),
            (KeyCode::Char('a'), nav, Shortcut::Navigate(Destination::Accessibility)),
            (KeyCode::Char('s'), nav, Shortcut::Navigate(Destination::About)),
            (KeyCode::Esc, KeyModifiers::NONE, Shortcut::Cancel),
            (KeyCode::Char('s'), cmd, Shortcut::Submit),
            (KeyCode::Char('l'), cmd, Shortcut::LoadExample),
            (KeyCode::Char('e'), cmd, Shortcut::Export),
            (KeyCode::Char('p'), cmd, Shortcut::Print),
            (KeyCode::Char('t'), cmd, Shortcut::CycleTheme),
            (KeyCode::Up, cmd, Shortcut::IncreaseFont),
            (KeyCode::Down, cmd, Shortcut::DecreaseFont),
        ] {
            dispatcher.bind(KeyChord::new(code, modifiers), shortcut);
        }
        dispatcher
    }

    /// Bind `chord`, replacing any previous binding for it
    pub fn bind(&mut self, chord: KeyChord, shortcut: Shortcut) {
        match self.bindings.iter_mut().find(|(c, _)| *c == chord) {
            Some(entry) => entry.1 = shortcut,
            None => self.bindings.push((chord, shortcut)),
        }
    }

    /// Apply user overrides of the form `"Alt+M" => "navigate:triage"`.
    ///
    /// Returns the entries that could not be parsed.
    pub fn apply_overrides<'a>(
        &mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Vec<String> {
        let mut rejected = Vec::new();
        for (chord, action) in overrides {
            match (KeyChord::parse(chord), Shortcut::parse(action)) {
                (Some(chord), Some(shortcut)) => self.bind(chord, shortcut),
                _ => rejected.push(format!("{chord} = {action}")),
            }
        }
        rejected
    }

    pub fn bindings(&self) -> &[(KeyChord, Shortcut)] {
        &self.bindings
    }

    pub fn shortcut_for(&self, key: &KeyEvent) -> Option<Shortcut> {
        let chord = KeyChord::from_event(key);
        self.bindings
            .iter()
            .find(|(c, _)| *c == chord)
            .map(|(_, s)| *s)
    }

    /// Resolve a key against the bindings and the current screen.
    ///
    /// Any bound chord is consumed, even when it ends up doing nothing. While
    /// a modal is open only the cancel shortcut is honoured.
    pub fn dispatch(&self, key: &KeyEvent, ctx: &DispatchContext) -> KeyOutcome {
        let Some(shortcut) = self.shortcut_for(key) else {
            return KeyOutcome::ignored();
        };

        if ctx.modal_open {
            return match shortcut {
                Shortcut::Cancel => KeyOutcome::consumed(Some(Command::CloseModal)),
                _ => KeyOutcome::ignored(),
            };
        }

        let command = match shortcut {
            Shortcut::Navigate(dest) => {
                ctx.links.contains(&dest).then_some(Command::Navigate(dest))
            }
            Shortcut::Cancel => ctx.form_active.then_some(Command::ConfirmReset),
            Shortcut::Submit => ctx.form_active.then_some(Command::Submit),
            Shortcut::LoadExample => ctx.form_active.then_some(Command::LoadExample),
            Shortcut::Export => Some(Command::Export),
            Shortcut::Print => Some(Command::Print),
            Shortcut::CycleTheme => Some(Command::CycleTheme),
            Shortcut::IncreaseFont => Some(Command::IncreaseFont),
            Shortcut::DecreaseFont => Some(Command::DecreaseFont),
        };
        KeyOutcome::consumed(command)
    }
}

/// Arrow navigation inside a radio group.
///
/// Up/Left select the previous option, Down/Right the next, wrapping at the
/// ends. The newly focused option is also checked. Returns the new index when
/// the key was consumed, `None` when it should be handled elsewhere.
pub fn navigate_radio(group: &mut RadioGroup, key: &KeyEvent) -> Option<usize> {
    if !key.modifiers.is_empty() && key.modifiers != KeyModifiers::SHIFT {
        return None;
    }
    let direction = match key.code {
        KeyCode::Up | KeyCode::Left => Direction::Previous,
        KeyCode::Down | KeyCode::Right => Direction::Next,
        _ => return None,
    };
    group.step(direction)
}
