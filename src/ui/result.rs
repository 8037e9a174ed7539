//! Classification result view

use crate::app::App;
use crate::state::TriageResult;
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let block = Block::default()
        .title(" Result ")
        .borders(Borders::ALL)
        .border_style(palette.muted());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(result) = &app.state.result else {
        let empty = Paragraph::new("No result yet. Fill in the triage form first.")
            .style(palette.muted());
        frame.render_widget(empty, inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Risk badge
            Constraint::Length(1), // Confidence
            Constraint::Min(0),    // Details
        ])
        .split(inner);

    draw_badge(frame, chunks[0], result, palette);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(palette.risk(result.risk())))
        .ratio(result.confidence.clamp(0.0, 1.0))
        .label(format!("Confidence {}", result.confidence_percent()));
    frame.render_widget(gauge, chunks[1]);

    let details = Paragraph::new(detail_lines(result, palette))
        .wrap(Wrap { trim: false })
        .scroll((app.state.scroll_offset as u16, 0));
    frame.render_widget(details, chunks[2]);
}

/// Risk color block; the label repeats the color so it reads without it
fn draw_badge(frame: &mut Frame, area: Rect, result: &TriageResult, palette: &Palette) {
    let risk = result.risk();
    let color = palette.risk(risk);
    let badge = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", risk.label()),
            Style::default()
                .fg(palette.bg)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", result.classification), palette.base()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(badge, area);
}

fn detail_lines<'a>(result: &'a TriageResult, palette: &Palette) -> Vec<Line<'a>> {
    let heading = palette.accent().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Target wait: ", heading),
            Span::styled(result.risk().wait_description(), palette.base()),
        ]),
    ];
    if !result.timestamp.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Assessed at: ", heading),
            Span::styled(result.timestamp.as_str(), palette.base()),
        ]));
    }

    if !result.reasoning.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Reasoning", heading)));
        lines.push(Line::from(Span::styled(result.reasoning.as_str(), palette.base())));
    }

    if !result.recommendations.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Recommendations", heading)));
        for rec in &result.recommendations {
            lines.push(Line::from(Span::styled(format!("• {rec}"), palette.base())));
        }
    }
    lines
}
