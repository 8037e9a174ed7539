//! About view

use crate::app::App;
use crate::state::RiskColor;
use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const ABOUT: &str = "Collects a patient's vital signs and symptoms, checks them for \
obvious mistakes and sends them to a classification service that assigns a \
risk level based on the Manchester triage protocol. The result supports, \
but never replaces, the judgement of the triage professional.";

pub fn draw(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let heading = palette.accent().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled("About", heading)),
        Line::from(Span::styled(ABOUT, palette.base())),
        Line::from(""),
        Line::from(Span::styled("Risk levels", heading)),
    ];

    for risk in [RiskColor::Red, RiskColor::Yellow, RiskColor::Green] {
        lines.push(Line::from(vec![
            Span::styled("  ██ ", Style::default().fg(palette.risk(risk))),
            Span::styled(format!("{:<22}", risk.label()), palette.base()),
            Span::styled(risk.wait_description(), palette.muted()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Service: ", heading),
        Span::styled(app.service.base_url(), palette.base()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Version: ", heading),
        Span::styled(env!("CARGO_PKG_VERSION"), palette.base()),
    ]));

    let block = Block::default()
        .title(" About ")
        .borders(Borders::ALL)
        .border_style(palette.muted());
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.state.scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
