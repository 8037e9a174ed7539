//! Button component for TUI

use crate::ui::theme::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a button with border; the focused one gets the accent color and
/// an arrow marker so focus never depends on color alone
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    palette: &Palette,
) {
    let border_style = if is_selected {
        palette.accent()
    } else {
        palette.muted()
    };

    let text_style = if is_selected {
        palette.accent().add_modifier(Modifier::BOLD)
    } else {
        palette.text(Style::default().fg(palette.fg))
    };

    let content = if is_selected {
        format!("▸ {label}")
    } else {
        label.to_string()
    };

    let paragraph = Paragraph::new(content)
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
