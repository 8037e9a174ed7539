//! Accessibility view: shortcuts, display preferences and the announcement
//! transcript

use crate::app::App;
use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let heading = palette.accent().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled("Display", heading)),
        Line::from(vec![
            Span::styled("  Theme:     ", palette.muted()),
            Span::styled(app.prefs.theme.label(), palette.base()),
        ]),
        Line::from(vec![
            Span::styled("  Text size: ", palette.muted()),
            Span::styled(app.prefs.font_size.label(), palette.base()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Keyboard shortcuts", heading)),
    ];

    for (chord, shortcut) in app.dispatcher.bindings() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", chord.to_string()), palette.accent()),
            Span::styled(shortcut.description(), palette.base()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Form keys", heading)));
    for (keys, action) in [
        ("Tab / ↓", "Next field (validates the one you leave)"),
        ("Shift+Tab / ↑", "Previous field"),
        ("← → ↑ ↓", "Choose an option inside a radio group"),
        ("Space", "Toggle a symptom"),
        ("Enter", "Classify risk"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<14}"), palette.accent()),
            Span::styled(action, palette.base()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Recent announcements", heading)));
    let history: Vec<_> = app.announcer.history().collect();
    if history.is_empty() {
        lines.push(Line::from(Span::styled("  Nothing announced yet", palette.muted())));
    }
    for announcement in history.iter().rev() {
        lines.push(Line::from(Span::styled(
            format!("  {}", announcement.message),
            palette.base(),
        )));
    }

    let block = Block::default()
        .title(" Accessibility ")
        .borders(Borders::ALL)
        .border_style(palette.muted());
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.state.scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
