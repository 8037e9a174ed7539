//! Home view with the main menu

use crate::app::App;
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Hospital triage",
            palette.accent().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            "Risk classification from vital signs and symptoms",
            palette.muted(),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
    ];

    for (i, dest) in app.state.menu_items().iter().enumerate() {
        let selected = i == app.state.selected_index;
        let (prefix, style) = if selected {
            ("▸ ", palette.accent().add_modifier(Modifier::BOLD))
        } else {
            ("  ", palette.base())
        };
        lines.push(
            Line::from(Span::styled(format!("{prefix}{}", dest.label()), style))
                .alignment(Alignment::Center),
        );
    }

    let block = Block::default()
        .title(" Home ")
        .borders(Borders::ALL)
        .border_style(palette.muted());
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(palette.base())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
