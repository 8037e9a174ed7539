//! Application state and core logic

use crate::config::{Preferences, SERVER_URL_ENV};
use crate::report::{self, FileSpooler, Printer};
use crate::service::{HttpTriageService, TriageService};
use crate::state::{
    navigate_radio, Announcer, AppState, Command, DispatchContext, FieldKind, FieldRegistry,
    Form, FormButton, FormOrchestrator, KeyDispatcher, Modal, SubmitOutcome, View,
};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::time::Instant;

pub const FORM_CLEARED: &str = "Form cleared";
pub const EXAMPLE_LOADED: &str = "Example data loaded";

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Triage service client
    pub service: Box<dyn TriageService>,
    pub orchestrator: FormOrchestrator,
    pub announcer: Announcer,
    pub dispatcher: KeyDispatcher,
    pub registry: FieldRegistry,
    pub prefs: Preferences,
    /// Where preference changes are saved; `None` keeps them in memory
    prefs_path: Option<PathBuf>,
    printer: Box<dyn Printer>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create the app with the persisted preferences and the HTTP service
    pub fn new() -> Result<Self> {
        let prefs = Preferences::load().unwrap_or_else(|err| {
            tracing::warn!("could not load preferences, using defaults: {err:#}");
            Preferences::default()
        });
        let base_url = prefs.server_url(std::env::var(SERVER_URL_ENV).ok());
        tracing::info!(%base_url, "triage service");
        let service = HttpTriageService::new(base_url)?;

        let mut app = Self::with_service(Box::new(service), prefs);
        app.prefs_path = Preferences::config_path();
        Ok(app)
    }

    /// Create the app around an existing service; preferences are not saved
    pub fn with_service(service: Box<dyn TriageService>, prefs: Preferences) -> Self {
        let mut dispatcher = KeyDispatcher::with_default_bindings();
        for rejected in dispatcher.apply_overrides(&prefs.key_bindings) {
            tracing::warn!("ignoring key binding {rejected}");
        }
        let printer = Box::new(FileSpooler::new(prefs.export_dir()));

        Self {
            state: AppState::new(),
            service,
            orchestrator: FormOrchestrator::new(),
            announcer: Announcer::new(),
            dispatcher,
            registry: FieldRegistry::triage(),
            prefs,
            prefs_path: None,
            printer,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Fire due announcement clears. Returns true if the screen changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.announcer.tick(now)
    }

    fn announce(&mut self, message: impl Into<String>) {
        self.announcer.announce(message, Instant::now());
    }

    /// Announce a failure and block on an alert until acknowledged
    fn fail(&mut self, title: &str, message: String) {
        tracing::warn!("{title}: {message}");
        self.announce(message.clone());
        self.state.show_alert(title, message);
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let links = self.state.links();
        let ctx = DispatchContext {
            modal_open: self.state.modal.is_some(),
            form_active: self.state.current_view.is_form_view(),
            links: &links,
        };
        let outcome = self.dispatcher.dispatch(&key, &ctx);
        if let Some(command) = outcome.command {
            self.execute(command).await?;
        }
        if outcome.prevent_default {
            return Ok(());
        }

        if self.state.modal.is_some() {
            self.handle_modal_key(key);
            return Ok(());
        }

        match self.state.current_view {
            View::Home => self.handle_home_key(key),
            View::Triage => self.handle_triage_key(key).await?,
            View::Result | View::Accessibility | View::About => self.handle_page_key(key),
        }
        Ok(())
    }

    /// Run a command resolved by the dispatcher
    pub async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Navigate(dest) => {
                self.blur_active();
                self.state.navigate(dest.into());
            }
            Command::CloseModal => self.state.close_modal(),
            Command::ConfirmReset => {
                self.state.modal = Some(Modal::ConfirmReset {
                    confirm_selected: false,
                });
            }
            Command::Submit => self.submit().await,
            Command::LoadExample => self.load_example().await,
            Command::Export => self.export(),
            Command::Print => self.print(),
            Command::CycleTheme => {
                self.prefs.theme = self.prefs.theme.next();
                self.save_prefs();
                self.announce(format!("Theme: {}", self.prefs.theme.label()));
            }
            Command::IncreaseFont | Command::DecreaseFont => {
                self.prefs.font_size = if command == Command::IncreaseFont {
                    self.prefs.font_size.larger()
                } else {
                    self.prefs.font_size.smaller()
                };
                self.save_prefs();
                self.announce(format!("Text size: {}", self.prefs.font_size.label()));
            }
        }
        Ok(())
    }

    fn save_prefs(&self) {
        if let Some(path) = &self.prefs_path {
            if let Err(err) = self.prefs.save_to(path) {
                tracing::warn!("could not save preferences: {err:#}");
            }
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match self.state.modal.as_mut() {
            Some(Modal::Alert { .. }) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.state.close_modal();
                }
            }
            Some(Modal::ConfirmReset { confirm_selected }) => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
                    *confirm_selected = !*confirm_selected;
                }
                KeyCode::Enter => {
                    let confirmed = *confirm_selected;
                    self.state.close_modal();
                    if confirmed {
                        self.reset_form();
                    }
                }
                KeyCode::Char('y') => {
                    self.state.close_modal();
                    self.reset_form();
                }
                KeyCode::Char('n') => self.state.close_modal(),
                _ => {}
            },
            None => {}
        }
    }

    /// Clear the form, its errors and phases, and announce it
    pub fn reset_form(&mut self) {
        self.state.reset_form();
        self.orchestrator.reset();
        self.announce(FORM_CLEARED);
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        let items = self.state.menu_items();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(items.len()),
            KeyCode::Enter => {
                if let Some(dest) = items.get(self.state.selected_index) {
                    self.state.navigate((*dest).into());
                }
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Keys on read-only pages
    fn handle_page_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_down(),
            KeyCode::Backspace => self.state.go_back(),
            KeyCode::Char('n') if self.state.current_view == View::Result => {
                self.reset_form();
                self.state.navigate(View::Triage);
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Validate the field losing focus
    fn blur_active(&mut self) {
        if !self.state.current_view.is_form_view() {
            return;
        }
        if let Some(id) = self.state.form.active_field_id() {
            self.orchestrator
                .on_blur(&self.state.form, &mut self.state.document, id);
        }
    }

    /// The focused field changed value
    fn input_active(&mut self) {
        if let Some(id) = self.state.form.active_field_id() {
            self.orchestrator.on_input(&mut self.state.document, id);
        }
    }

    fn focus_next(&mut self) {
        self.blur_active();
        self.state.form.next_field();
    }

    fn focus_prev(&mut self) {
        self.blur_active();
        self.state.form.prev_field();
    }

    async fn handle_triage_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.form.is_buttons_row_active() {
            return self.handle_buttons_key(key).await;
        }

        let kind = self
            .state
            .form
            .get_field(self.state.form.active_field_index)
            .map(|f| f.kind());

        if kind == Some(FieldKind::Radio) {
            if let Some(group) = self
                .state
                .form
                .get_active_field_mut()
                .and_then(|f| f.radio_group_mut())
            {
                if navigate_radio(group, &key).is_some() {
                    self.input_active();
                    return Ok(());
                }
            }
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => self.submit().await,
            KeyCode::Char(' ') if kind == Some(FieldKind::Checkbox) => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.toggle();
                }
                self.input_active();
            }
            KeyCode::Char(' ') if kind == Some(FieldKind::Radio) => {
                if let Some(group) = self
                    .state
                    .form
                    .get_active_field_mut()
                    .and_then(|f| f.radio_group_mut())
                {
                    let focused = group.focused();
                    group.check(focused);
                }
                self.input_active();
            }
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let Some(field) = self.state.form.get_active_field_mut() else {
                    return Ok(());
                };
                if field.accepts_text() {
                    field.push_char(c);
                    self.input_active();
                }
            }
            KeyCode::Backspace => {
                let Some(field) = self.state.form.get_active_field_mut() else {
                    return Ok(());
                };
                if field.accepts_text() {
                    field.pop_char();
                    self.input_active();
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_buttons_key(&mut self, key: KeyEvent) -> Result<()> {
        let selected = self.state.form.selected_button;
        match key.code {
            KeyCode::Left => self.state.form.selected_button = selected.prev(),
            KeyCode::Right => self.state.form.selected_button = selected.next(),
            KeyCode::Tab | KeyCode::Down => self.state.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Enter | KeyCode::Char(' ') => match selected {
                FormButton::Submit => self.submit().await,
                FormButton::LoadExample => self.load_example().await,
                FormButton::Clear => self.execute(Command::ConfirmReset).await?,
            },
            _ => {}
        }
        Ok(())
    }

    /// Validate the form and, when valid, classify it
    pub async fn submit(&mut self) {
        let outcome = self.orchestrator.on_submit(
            &mut self.state.form,
            &mut self.state.document,
            &mut self.announcer,
            Instant::now(),
        );

        let patient = match outcome {
            Ok(SubmitOutcome::Ready(patient)) => patient,
            Ok(SubmitOutcome::Rejected { .. }) => return,
            Err(err) => {
                self.fail("Invalid form", err.to_string());
                return;
            }
        };

        match self.service.submit_triage(&patient).await {
            Ok(result) => {
                tracing::info!(risk = %result.risk_color, "patient classified");
                let message = format!(
                    "Classification complete: {}",
                    result.risk().label()
                );
                self.state.result = Some(result);
                self.state.navigate(View::Result);
                self.announce(message);
            }
            Err(err) => self.fail("Classification failed", err.to_string()),
        }
    }

    /// Fetch an example patient and fill the form with it
    pub async fn load_example(&mut self) {
        let payload = match self.service.fetch_example_patient().await {
            Ok(payload) => payload,
            Err(err) => {
                self.fail("Could not load example data", err.to_string());
                return;
            }
        };

        match self.registry.fill(&mut self.state.form, &payload) {
            Ok(touched) => {
                self.orchestrator.clear_fields(
                    &mut self.state.document,
                    touched.iter().map(String::as_str),
                );
                self.announce(EXAMPLE_LOADED);
            }
            Err(err) => self.fail("Could not load example data", err.to_string()),
        }
    }

    /// Save the current result as JSON
    pub fn export(&mut self) {
        let dir = self.prefs.export_dir();
        let today = Local::now().date_naive();
        match report::export_result(self.state.result.as_ref(), &dir, today) {
            Ok(path) => self.announce(format!("Result saved to {}", path.display())),
            Err(err) => self.fail("Export failed", err.to_string()),
        }
    }

    /// Print the current result
    pub fn print(&mut self) {
        let now = Local::now();
        match report::print_result(self.state.result.as_ref(), self.printer.as_ref(), now) {
            Ok(path) => self.announce(format!("Result sent to printer: {}", path.display())),
            Err(err) => self.fail("Print failed", err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FontScale, Theme};
    use crate::service::{MockTriageService, ServiceError};
    use crate::state::test_support::{filled_form, sample_result};
    use crate::state::{ids, FieldPhase, FieldValues, SUBMIT_ERROR_SUMMARY};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn alt(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT)
    }

    fn app_with(mock: MockTriageService) -> (App, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences {
            export_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let mut app = App::with_service(Box::new(mock), prefs);
        app.state.navigate(View::Triage);
        (app, dir)
    }

    fn messages(app: &App) -> Vec<String> {
        app.announcer.history().map(|a| a.message.clone()).collect()
    }

    mod submit_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_empty_required_field_blocks_submit() {
            let mut mock = MockTriageService::new();
            mock.expect_submit_triage().times(0);
            let (mut app, _dir) = app_with(mock);
            app.state.form = filled_form();
            app.state.form.field_mut(ids::HEART_RATE).unwrap().clear();

            app.handle_key(ctrl('s')).await.unwrap();

            assert_eq!(app.state.current_view, View::Triage);
            assert_eq!(messages(&app), vec![SUBMIT_ERROR_SUMMARY.to_string()]);
            assert_eq!(app.state.form.active_field_id(), Some(ids::HEART_RATE));
            assert!(app.state.result.is_none());
        }

        #[tokio::test]
        async fn test_valid_form_shows_result() {
            let mut mock = MockTriageService::new();
            mock.expect_submit_triage()
                .times(1)
                .withf(|p| p.idade == 45 && p.sexo == "F")
                .returning(|_| Ok(sample_result()));
            let (mut app, _dir) = app_with(mock);
            app.state.form = filled_form();

            app.submit().await;

            assert_eq!(app.state.current_view, View::Result);
            assert_eq!(app.state.result, Some(sample_result()));
            assert!(app.announcer.text().starts_with("Classification complete"));
        }

        #[tokio::test]
        async fn test_service_error_alerts_and_stays() {
            let mut mock = MockTriageService::new();
            mock.expect_submit_triage().returning(|_| {
                Err(ServiceError::Status {
                    status: 500,
                    message: "model not loaded".to_string(),
                })
            });
            let (mut app, _dir) = app_with(mock);
            app.state.form = filled_form();

            app.submit().await;

            assert_eq!(app.state.current_view, View::Triage);
            assert!(matches!(app.state.modal, Some(Modal::Alert { .. })));
            assert!(app.announcer.text().contains("model not loaded"));
        }

        #[tokio::test]
        async fn test_submit_button() {
            let mut mock = MockTriageService::new();
            mock.expect_submit_triage().times(0);
            let (mut app, _dir) = app_with(mock);
            let buttons = app.state.form.buttons_row_index();
            app.state.form.set_active_field(buttons);

            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(app.state.form.active_field_id(), Some(ids::AGE));
            assert_eq!(app.announcer.history().count(), 1);
        }
    }

    mod field_event_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_tab_blurs_and_validates() {
            let (mut app, _dir) = app_with(MockTriageService::new());
            app.handle_key(key(KeyCode::Tab)).await.unwrap();

            assert_eq!(app.state.form.active_field_id(), Some(ids::SEX));
            assert_eq!(
                app.orchestrator.phase(ids::AGE),
                FieldPhase::Validated { valid: false }
            );
            assert!(app.state.document.error_marker(ids::AGE).is_some());
        }

        #[tokio::test]
        async fn test_typing_clears_error() {
            let (mut app, _dir) = app_with(MockTriageService::new());
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(key(KeyCode::BackTab)).await.unwrap();
            app.handle_key(key(KeyCode::Char('4'))).await.unwrap();

            assert_eq!(app.state.form.raw_value(ids::AGE), Some("4"));
            assert!(app.state.document.error_marker(ids::AGE).is_none());
            assert_eq!(app.orchestrator.phase(ids::AGE), FieldPhase::Pristine);
        }

        #[tokio::test]
        async fn test_arrows_stay_in_radio_group() {
            let (mut app, _dir) = app_with(MockTriageService::new());
            app.state.form.focus_field(ids::SEX);

            app.handle_key(key(KeyCode::Down)).await.unwrap();
            app.handle_key(key(KeyCode::Down)).await.unwrap();

            assert_eq!(app.state.form.active_field_id(), Some(ids::SEX));
            assert_eq!(app.state.form.raw_value(ids::SEX), Some("O"));
        }

        #[tokio::test]
        async fn test_space_toggles_checkbox() {
            let (mut app, _dir) = app_with(MockTriageService::new());
            app.state.form.focus_field(ids::FEVER);
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            assert!(app.state.form.field(ids::FEVER).unwrap().is_checked());
        }

        #[tokio::test]
        async fn test_typing_ignored_on_checkbox() {
            let (mut app, _dir) = app_with(MockTriageService::new());
            app.state.form.focus_field(ids::FEVER);
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            assert!(!app.state.form.field(ids::FEVER).unwrap().is_checked());
        }
    }

    mod example_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_load_example_fills_and_announces() {
            let mut mock = MockTriageService::new();
            mock.expect_fetch_example_patient().times(1).returning(|| {
                Ok(json!({
                    "idade": 30, "sexo": "M", "pressao_sistolica": 118,
                    "pressao_diastolica": 76, "frequencia_cardiaca": 70,
                    "saturacao_oxigenio": 99, "temperatura": 36.6,
                    "dor_peito": false, "true_risk": "VERDE"
                }))
            });
            let (mut app, _dir) = app_with(mock);
            app.state.document.present(
                ids::AGE,
                &crate::state::ValidationResult::invalid("This field is required"),
            );

            app.handle_key(ctrl('l')).await.unwrap();

            assert_eq!(app.state.form.raw_value(ids::AGE), Some("30"));
            assert!(app.state.document.invalid_fields().is_empty());
            assert_eq!(app.announcer.text(), EXAMPLE_LOADED);
        }

        #[tokio::test]
        async fn test_fetch_failure_leaves_form() {
            let mut mock = MockTriageService::new();
            mock.expect_fetch_example_patient()
                .returning(|| Err(ServiceError::Network("connection refused".to_string())));
            let (mut app, _dir) = app_with(mock);

            app.load_example().await;

            assert!(app.state.form.fields.iter().all(|f| f.raw_value().is_empty()));
            assert!(matches!(app.state.modal, Some(Modal::Alert { .. })));
        }

        #[tokio::test]
        async fn test_bad_payload_leaves_form() {
            let mut mock = MockTriageService::new();
            mock.expect_fetch_example_patient()
                .returning(|| Ok(json!({ "idade": 30, "temperatura": "warm" })));
            let (mut app, _dir) = app_with(mock);

            app.load_example().await;

            assert_eq!(app.state.form.raw_value(ids::AGE), Some(""));
            assert!(matches!(app.state.modal, Some(Modal::Alert { .. })));
        }
    }

    mod shortcut_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_escape_asks_then_clears() {
            let (mut app, _dir) = app_with(MockTriageService::new());
            app.state.form = filled_form();

            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert_eq!(
                app.state.modal,
                Some(Modal::ConfirmReset {
                    confirm_selected: false
                })
            );

            app.handle_key(key(KeyCode::Right)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert!(app.state.modal.is_none());
            assert!(app.state.form.fields.iter().all(|f| f.raw_value().is_empty()));
            assert_eq!(app.announcer.text(), FORM_CLEARED);
        }

        #[tokio::test]
        async fn test_escape_closes_modal_without_clearing() {
            let (mut app, _dir) = app_with(MockTriageService::new());
            app.state.form = filled_form();

            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            app.handle_key(key(KeyCode::Esc)).await.unwrap();

            assert!(app.state.modal.is_none());
            assert_eq!(app.state.form.raw_value(ids::AGE), Some("45"));
        }

        #[tokio::test]
        async fn test_escape_off_form_is_noop() {
            let (mut app, _dir) = app_with(MockTriageService::new());
            app.state.navigate(View::About);
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(app.state.modal.is_none());
            assert_eq!(app.state.current_view, View::About);
        }

        #[tokio::test]
        async fn test_result_shortcut_needs_result() {
            let (mut app, _dir) = app_with(MockTriageService::new());
            app.handle_key(alt('r')).await.unwrap();
            assert_eq!(app.state.current_view, View::Triage);

            app.state.result = Some(sample_result());
            app.handle_key(alt('r')).await.unwrap();
            assert_eq!(app.state.current_view, View::Result);
        }

        #[tokio::test]
        async fn test_shortcut_never_reaches_field() {
            let (mut app, _dir) = app_with(MockTriageService::new());
            app.handle_key(alt('h')).await.unwrap();
            assert_eq!(app.state.current_view, View::Home);
            assert_eq!(app.state.form.raw_value(ids::AGE), Some(""));
        }

        #[tokio::test]
        async fn test_theme_and_font() {
            let (mut app, _dir) = app_with(MockTriageService::new());
            app.handle_key(ctrl('t')).await.unwrap();
            assert_eq!(app.prefs.theme, Theme::Light);
            app.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::CONTROL))
                .await
                .unwrap();
            assert_eq!(app.prefs.font_size, FontScale::Large);
            assert_eq!(app.announcer.text(), "Text size: large");
        }
    }

    mod report_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_export_without_result() {
            let (mut app, dir) = app_with(MockTriageService::new());
            app.handle_key(ctrl('e')).await.unwrap();

            assert!(matches!(app.state.modal, Some(Modal::Alert { .. })));
            assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        }

        #[tokio::test]
        async fn test_export_writes_dated_file() {
            let (mut app, dir) = app_with(MockTriageService::new());
            app.state.result = Some(sample_result());

            app.export();

            let name = report::file_name(Local::now().date_naive(), "json");
            assert!(dir.path().join(name).exists());
            assert!(app.announcer.text().starts_with("Result saved to"));
        }

        struct OfflinePrinter;

        impl Printer for OfflinePrinter {
            fn print(
                &self,
                _document: &str,
                _date: chrono::NaiveDate,
            ) -> Result<PathBuf, report::ExportError> {
                Err(std::io::Error::other("printer offline").into())
            }
        }

        #[tokio::test]
        async fn test_print_failure_alerts() {
            let (mut app, _dir) = app_with(MockTriageService::new());
            app.state.result = Some(sample_result());
            app.printer = Box::new(OfflinePrinter);

            app.print();

            assert!(matches!(app.state.modal, Some(Modal::Alert { .. })));
            assert!(app.announcer.text().contains("printer offline"));
        }

        #[tokio::test]
        async fn test_print_spools_text() {
            let (mut app, dir) = app_with(MockTriageService::new());
            app.state.result = Some(sample_result());

            app.handle_key(ctrl('p')).await.unwrap();

            let name = report::file_name(Local::now().date_naive(), "txt");
            let text = std::fs::read_to_string(dir.path().join(name)).unwrap();
            assert!(text.contains("TRIAGE RESULT"));
        }
    }

    mod home_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_menu_enter_navigates() {
            let mut app = App::with_service(
                Box::new(MockTriageService::new()),
                Preferences::default(),
            );
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.current_view, View::Triage);
        }

        #[test]
        fn test_q_quits() {
            let mut app = App::with_service(
                Box::new(MockTriageService::new()),
                Preferences::default(),
            );
            tokio_test::block_on(app.handle_key(key(KeyCode::Char('q')))).unwrap();
            assert!(app.should_quit());
        }

        #[tokio::test]
        async fn test_new_patient_starts_from_empty_form() {
            let (mut app, _dir) = app_with(MockTriageService::new());
            app.state.form = filled_form();
            app.state.result = Some(sample_result());
            app.state.navigate(View::Result);

            app.handle_key(key(KeyCode::Char('n'))).await.unwrap();

            assert_eq!(app.state.current_view, View::Triage);
            assert!(app
                .state
                .form
                .fields
                .iter()
                .all(|f| f.raw_value().is_empty()));
            assert_eq!(app.orchestrator.phase(ids::AGE), FieldPhase::Pristine);
            assert_eq!(app.announcer.text(), FORM_CLEARED);
        }
    }

    #[test]
    fn test_tick_clears_announcement() {
        let mut app = App::with_service(Box::new(MockTriageService::new()), Preferences::default());
        let now = Instant::now();
        app.announcer.announce("hello", now);
        assert!(app.tick(now + crate::state::CLEAR_AFTER));
        assert_eq!(app.announcer.text(), "");
    }

    #[test]
    fn test_invalid_key_binding_override_is_skipped() {
        let prefs = Preferences {
            key_bindings: [("Hyper+X".to_string(), "print".to_string())]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        let app = App::with_service(Box::new(MockTriageService::new()), prefs);
        assert_eq!(
            app.dispatcher.bindings().len(),
            KeyDispatcher::with_default_bindings().bindings().len()
        );
    }
}
