//! Application state definitions

use crate::state::{Destination, FormDocument, TriageForm, TriageResult};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Triage,
    Result,
    Accessibility,
    About,
}

impl View {
    pub const ALL: [View; 5] = [
        Self::Home,
        Self::Triage,
        Self::Result,
        Self::Accessibility,
        Self::About,
    ];

    pub fn destination(&self) -> Destination {
        match self {
            Self::Home => Destination::Home,
            Self::Triage => Destination::Triage,
            Self::Result => Destination::Result,
            Self::Accessibility => Destination::Accessibility,
            Self::About => Destination::About,
        }
    }

    /// Check if this view holds an editable form
    pub fn is_form_view(&self) -> bool {
        matches!(self, Self::Triage)
    }
}

impl From<Destination> for View {
    fn from(dest: Destination) -> Self {
        match dest {
            Destination::Home => Self::Home,
            Destination::Triage => Self::Triage,
            Destination::Result => Self::Result,
            Destination::Accessibility => Self::Accessibility,
            Destination::About => Self::About,
        }
    }
}

/// Blocking overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Message the user has to acknowledge
    Alert { title: String, message: String },
    /// Ask before wiping the form; `confirm_selected` is the highlighted option
    ConfirmReset { confirm_selected: bool },
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,
    /// Highlighted entry of the home menu
    pub selected_index: usize,
    pub scroll_offset: usize,

    // Form
    pub form: TriageForm,
    pub document: FormDocument,

    // Result of the last classification
    pub result: Option<TriageResult>,

    pub modal: Option<Modal>,
}

impl AppState {
    pub fn new() -> Self {
        let form = TriageForm::new();
        let document = FormDocument::from_form(&form);
        Self {
            form,
            document,
            ..Default::default()
        }
    }

    /// Destinations that currently exist; the result view needs a result
    pub fn links(&self) -> Vec<Destination> {
        View::ALL
            .iter()
            .filter(|v| **v != View::Result || self.result.is_some())
            .map(View::destination)
            .collect()
    }

    /// Entries of the home menu
    pub fn menu_items(&self) -> Vec<Destination> {
        self.links()
            .into_iter()
            .filter(|d| *d != Destination::Home)
            .collect()
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        if view == self.current_view {
            return;
        }
        self.view_history.push(self.current_view);
        self.current_view = view;
        self.scroll_offset = 0;
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        if let Some(view) = self.view_history.pop() {
            self.current_view = view;
            self.scroll_offset = 0;
        }
    }

    pub fn show_alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.modal = Some(Modal::Alert {
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Clear every value and error, focus returns to the first field
    pub fn reset_form(&mut self) {
        self.form.reset();
        self.document = FormDocument::from_form(&self.form);
    }

    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}
