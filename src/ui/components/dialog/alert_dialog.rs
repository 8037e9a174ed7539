//! Alert dialog component

use super::base::{key_hint, render_dialog, DialogConfig};
use crate::ui::theme::Palette;
use ratatui::Frame;

/// Render a blocking alert centered on the screen
pub fn render_alert_dialog(frame: &mut Frame, title: &str, message: &str, palette: &Palette) {
    render_dialog(
        frame,
        DialogConfig {
            title,
            color: palette.error,
            message,
            hint: Some(key_hint(&[("Enter", "dismiss"), ("Esc", "dismiss")], palette)),
            ..Default::default()
        },
        palette,
    );
}
