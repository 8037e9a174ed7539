//! Patient intake form

use super::field_renderer::{draw_field, field_height};
use crate::app::App;
use crate::state::FormButton;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the triage form with its buttons row
pub fn draw_triage_form(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let form = &app.state.form;
    let block = Block::default()
        .title(" Patient data ")
        .borders(Borders::ALL)
        .border_style(if form.is_buttons_row_active() {
            palette.muted()
        } else {
            palette.accent()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Legend
            Constraint::Min(0),                // Fields
            Constraint::Length(BUTTON_HEIGHT), // Buttons
        ])
        .split(inner);

    let mut legend = vec![Span::styled("* required", palette.muted())];
    let invalid = app.state.document.invalid_fields().len();
    if invalid > 0 {
        legend.push(Span::styled(
            format!("   ✗ {invalid} field(s) need attention"),
            palette.error(),
        ));
    }
    let legend = Line::from(legend);
    frame.render_widget(Paragraph::new(legend), chunks[0]);

    draw_fields(frame, chunks[1], app, palette);
    draw_buttons(frame, chunks[2], form.is_buttons_row_active(), form.selected_button, palette);
}

fn draw_fields(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let form = &app.state.form;
    let doc = &app.state.document;
    let gap = palette.field_gap();
    let heights: Vec<u16> = form
        .fields
        .iter()
        .map(|f| field_height(f, doc) + gap)
        .collect();

    // On the buttons row keep the tail of the form in view
    let focus = form.active_field_index.min(heights.len().saturating_sub(1));
    let start = first_visible(&heights, focus, area.height);

    let mut y = area.y;
    for (index, field) in form.fields.iter().enumerate().skip(start) {
        let height = heights[index] - gap;
        if y + height > area.y + area.height {
            break;
        }
        let field_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        let is_active = index == form.active_field_index;
        draw_field(frame, field_area, field, doc, is_active, palette);
        y += heights[index];
    }
}

fn draw_buttons(
    frame: &mut Frame,
    area: Rect,
    row_active: bool,
    selected: FormButton,
    palette: &Palette,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(FormButton::ALL.map(|_| Constraint::Ratio(1, FormButton::ALL.len() as u32)))
        .split(area);

    for (button, chunk) in FormButton::ALL.iter().zip(chunks.iter()) {
        render_button(
            frame,
            *chunk,
            button.label(),
            row_active && *button == selected,
            palette,
        );
    }
}

/// First field to draw so that `active` fits in `available` rows
fn first_visible(heights: &[u16], active: usize, available: u16) -> usize {
    let mut start = 0;
    let mut used: u16 = heights.iter().take(active + 1).sum();
    while used > available && start < active {
        used -= heights[start];
        start += 1;
    }
    start
}
