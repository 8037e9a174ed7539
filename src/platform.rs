//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Modifier for application commands (submit, export, print, ...).
/// Terminals rarely forward Cmd, so Ctrl is used everywhere.
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Modifier for jumping between views
pub const NAVIGATION_MODIFIER: KeyModifiers = KeyModifiers::ALT;

/// How the navigation modifier is labelled on the keyboard
/// - macOS: "Option"
/// - Linux/Windows: "Alt"
#[cfg(target_os = "macos")]
pub const ALT_LABEL: &str = "Option";

#[cfg(not(target_os = "macos"))]
pub const ALT_LABEL: &str = "Alt";

