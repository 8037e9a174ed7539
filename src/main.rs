//! Triage TUI - terminal intake client for hospital triage
//!
//! A Ratatui-based form that validates vital signs, announces feedback for
//! screen readers and sends the patient to the classification service.

mod app;
mod config;
mod platform;
mod report;
mod service;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Log to a file in the data directory; stderr belongs to the terminal UI
fn init_logging() -> Result<()> {
    let Some(dirs) = ProjectDirs::from("br", "triagem", "triage-tui") else {
        return Ok(());
    };
    fs::create_dir_all(dirs.data_dir())?;
    let file = File::create(dirs.data_dir().join("triage-tui.log"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triage_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(err) = init_logging() {
        eprintln!("Logging disabled: {err:#}");
    }

    let mut app = App::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("{err:?}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        let event = if event::poll(POLL_INTERVAL)? {
            Some(event::read()?)
        } else {
            None
        };

        if step(app, event, Instant::now()).await? {
            return Ok(());
        }
    }
}

/// Handle one polled event, then fire due announcer clears.
///
/// Returns true when the app should exit.
async fn step(app: &mut App, event: Option<Event>, now: Instant) -> Result<bool> {
    match event {
        Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            // Global quit: Ctrl+C
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(true);
            }
            app.handle_key(key).await?;
        }
        _ => {}
    }

    app.tick(now);
    Ok(app.should_quit())
}
