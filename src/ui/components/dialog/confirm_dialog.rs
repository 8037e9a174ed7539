//! Confirmation dialog before the form is wiped

use super::base::{key_hint, render_dialog, DialogConfig};
use crate::ui::theme::Palette;
use ratatui::Frame;

const CONFIRM_RESET_MESSAGE: &str = "Clear every field of the form?";

/// `confirm_selected` is true when "Clear" is highlighted
pub fn render_confirm_reset_dialog(frame: &mut Frame, confirm_selected: bool, palette: &Palette) {
    render_dialog(
        frame,
        DialogConfig {
            title: "Clear form",
            color: palette.error,
            message: CONFIRM_RESET_MESSAGE,
            options: vec![("Cancel", !confirm_selected), ("Clear", confirm_selected)],
            hint: Some(key_hint(
                &[("←→", "select"), ("Enter", "confirm"), ("y/n", "answer"), ("Esc", "cancel")],
                palette,
            )),
            max_width: 56,
        },
        palette,
    );
}
