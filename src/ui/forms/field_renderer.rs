//! Field rendering utilities for forms

use crate::state::{FieldKind, FormDocument, FormField, ERROR_CLASS};
use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows a field occupies, including its inline error line
pub fn field_height(field: &FormField, doc: &FormDocument) -> u16 {
    let body = match field.kind() {
        FieldKind::Checkbox => 1,
        FieldKind::Text | FieldKind::Number | FieldKind::Radio => 3,
    };
    body + u16::from(doc.error_marker(&field.id).is_some())
}

/// Draw a field from the domain layer with its presented state
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    doc: &FormDocument,
    is_active: bool,
    palette: &Palette,
) {
    let marker = doc.error_marker(&field.id);
    let body_height = area.height.saturating_sub(u16::from(marker.is_some()));
    let body = Rect {
        height: body_height,
        ..area
    };

    match field.kind() {
        FieldKind::Checkbox => draw_checkbox(frame, body, field, is_active, palette),
        FieldKind::Text | FieldKind::Number | FieldKind::Radio => {
            draw_boxed(frame, body, field, doc, is_active, palette)
        }
    }

    if let Some(marker) = marker {
        let line_area = Rect {
            y: area.y + body_height,
            height: 1,
            ..area
        };
        let line = Line::from(Span::styled(format!("  ⚠ {}", marker.message), palette.error()));
        frame.render_widget(Paragraph::new(line), line_area);
    }
}

fn draw_boxed(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    doc: &FormDocument,
    is_active: bool,
    palette: &Palette,
) {
    let node = doc.field_node(&field.id);
    let invalid = node.is_some_and(|n| n.has_class(ERROR_CLASS));

    let border_style = match (invalid, is_active) {
        (true, _) => palette.error(),
        (false, true) => palette.accent(),
        (false, false) => palette.muted(),
    };

    let mut title = format!(" {}", field.label);
    if field.constraints.required {
        title.push_str(" *");
    }
    if invalid {
        title.push_str(" ✗");
    }
    title.push(' ');

    let mut block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(hint) = node.and_then(|n| n.hint.as_deref()) {
        block = block.title_bottom(Span::styled(format!(" {hint} "), palette.muted()));
    }

    let content = match field.radio_group() {
        Some(group) => {
            let mut spans = Vec::new();
            for (i, option) in group.options.iter().enumerate() {
                let mark = if group.checked() == Some(i) { "(•)" } else { "( )" };
                let mut style = palette.text(Style::default().fg(palette.fg));
                if is_active && group.focused() == i {
                    style = palette.accent().add_modifier(Modifier::UNDERLINED);
                }
                spans.push(Span::styled(format!("{mark} {}", option.label), style));
                spans.push(Span::raw("   "));
            }
            Line::from(spans)
        }
        None => {
            let value = field.display_value();
            let value_style = if is_active {
                palette.accent()
            } else {
                palette.text(Style::default().fg(palette.fg))
            };
            let mut spans = vec![Span::styled(value, value_style)];
            if is_active {
                spans.push(Span::styled("▌", palette.accent()));
            }
            if let Some(unit) = &field.unit {
                spans.push(Span::styled(format!(" {unit}"), palette.muted()));
            }
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn draw_checkbox(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    palette: &Palette,
) {
    let prefix = if is_active { "▸ " } else { "  " };
    let style = if is_active {
        palette.accent().add_modifier(Modifier::BOLD)
    } else {
        palette.text(Style::default().fg(palette.fg))
    };
    let line = Line::from(Span::styled(
        format!("{prefix}{} {}", field.display_value(), field.label),
        style,
    ));
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ids, TriageForm, ValidationResult};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(field: &FormField, doc: &FormDocument) -> String {
        let height = field_height(field, doc);
        let backend = TestBackend::new(40, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_field(frame, area, field, doc, true, &Palette::default())
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_error_adds_a_line() {
        let form = TriageForm::new();
        let mut doc = FormDocument::from_form(&form);
        let age = form.field(ids::AGE).unwrap();
        assert_eq!(field_height(age, &doc), 3);

        doc.present(ids::AGE, &ValidationResult::invalid("This field is required"));
        assert_eq!(field_height(age, &doc), 4);
        let text = render(age, &doc);
        assert!(text.contains("This field is required"));
        assert!(text.contains("Age * ✗"));
    }

    #[test]
    fn test_number_shows_range_hint() {
        let form = TriageForm::new();
        let doc = FormDocument::from_form(&form);
        let text = render(form.field(ids::HEART_RATE).unwrap(), &doc);
        assert!(text.contains("30–200 bpm"));
    }

    #[test]
    fn test_checkbox_is_one_line() {
        let mut form = TriageForm::new();
        form.field_mut(ids::FEVER).unwrap().toggle();
        let doc = FormDocument::from_form(&form);
        let fever = form.field(ids::FEVER).unwrap();
        assert_eq!(field_height(fever, &doc), 1);
        assert!(render(fever, &doc).contains("[x] Fever"));
    }

    #[test]
    fn test_radio_marks_checked_option() {
        let mut form = TriageForm::new();
        form.field_mut(ids::SEX)
            .and_then(|f| f.radio_group_mut())
            .unwrap()
            .check_value("M");
        let doc = FormDocument::from_form(&form);
        let text = render(form.field(ids::SEX).unwrap(), &doc);
        assert!(text.contains("(•) Male"));
        assert!(text.contains("( ) Female"));
    }
}
