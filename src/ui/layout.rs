//! Layout components (header, status bar)

use crate::app::App;
use crate::state::{Shortcut, View};
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Navigation links with their shortcut; the current view is highlighted
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let mut spans = vec![Span::styled(
        " Triage ",
        palette.accent().add_modifier(Modifier::BOLD | Modifier::REVERSED),
    )];

    for dest in app.state.links() {
        let chord = app
            .dispatcher
            .bindings()
            .iter()
            .find(|(_, s)| *s == Shortcut::Navigate(dest))
            .map(|(c, _)| c.to_string());
        let label = match chord {
            Some(chord) => format!(" {} [{chord}] ", dest.label()),
            None => format!(" {} ", dest.label()),
        };
        let style = if View::from(dest) == app.state.current_view {
            palette.accent().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            palette.muted()
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(label, style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Live region on the left, key hints after it, quit hint on the right
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let bar = Style::default().bg(palette.bar_bg);
    let mut spans = vec![];

    let region = app.announcer.region();
    if !region.text.is_empty() {
        spans.push(Span::styled(
            format!(" {} ", region.text),
            palette.text(Style::default().fg(palette.success).add_modifier(Modifier::BOLD)),
        ));
        spans.push(Span::raw("│"));
    }

    spans.push(Span::styled(
        format!(" {}", view_hints(&app.state.current_view)),
        palette.text(Style::default().fg(palette.fg)),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar), area);

    let quit_hint = " ^C:quit ";
    let width = quit_hint.len() as u16;
    if area.width > width {
        let quit_area = Rect {
            x: area.x + area.width - width,
            width,
            ..area
        };
        frame.render_widget(Paragraph::new(quit_hint).style(bar.fg(palette.fg)), quit_area);
    }
}

/// Get keyboard hints for the current view
fn view_hints(view: &View) -> &'static str {
    match view {
        View::Home => "↑↓:select  Enter:open  q:quit",
        View::Triage => {
            "Tab:next  ←→↑↓:choose  Space:toggle  Enter:classify  ^L:example  Esc:clear"
        }
        View::Result => "↑↓:scroll  ^E:export  ^P:print  n:new patient  Backspace:back",
        View::Accessibility => "↑↓:scroll  ^T:theme  ^↑/^↓:text size  Backspace:back",
        View::About => "↑↓:scroll  Backspace:back",
    }
}
