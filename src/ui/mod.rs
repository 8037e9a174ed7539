//! UI module for rendering the TUI

mod about;
mod accessibility;
mod components;
mod forms;
mod home;
mod layout;
mod result;
mod theme;

use crate::app::App;
use crate::state::{Modal, View};
use components::{render_alert_dialog, render_confirm_reset_dialog};
use ratatui::{widgets::Block, Frame};
use theme::Palette;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = Palette::new(app.prefs.theme, app.prefs.font_size);
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let (header_area, main_area, status_area) = layout::create_layout(frame.area());
    layout::draw_header(frame, header_area, app, &palette);

    match app.state.current_view {
        View::Home => home::draw(frame, main_area, app, &palette),
        View::Triage => forms::draw_triage_form(frame, main_area, app, &palette),
        View::Result => result::draw(frame, main_area, app, &palette),
        View::Accessibility => accessibility::draw(frame, main_area, app, &palette),
        View::About => about::draw(frame, main_area, app, &palette),
    }

    layout::draw_status_bar(frame, status_area, app, &palette);

    // Modals render last so they sit on top
    match &app.state.modal {
        Some(Modal::Alert { title, message }) => {
            render_alert_dialog(frame, title, message, &palette)
        }
        Some(Modal::ConfirmReset { confirm_selected }) => {
            render_confirm_reset_dialog(frame, *confirm_selected, &palette)
        }
        None => {}
    }
}
