//! Runboard - a terminal runner progress board.
//!
//! Shows how far each participant has run towards a shared goal: a progress
//! bar, one marker per runner along it and a ranked leaderboard, refreshed
//! from the backend every few minutes.

mod app;
mod refresh;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use runboard_core::{ApiClient, Config, RunnerDataManager};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file name inside the log directory
const LOG_FILE: &str = "runboard.log";

const USAGE: &str = "\
Usage: runboard [OPTIONS]

Options:
  --dump-rankings   Fetch the leaderboard once and print it as JSON
  --init-config     Write a config file with default values
  -h, --help        Show this help

Environment:
  RUNBOARD_BASE_URL  Backend base URL (overrides the config file)
  RUST_LOG           Log filter, e.g. RUST_LOG=debug";

/// Initialize the tracing subscriber.
///
/// The TUI owns the terminal, so logs go to a file under the cache directory.
/// Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug).
fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = match Config::log_dir().and_then(|dir| {
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            return None;
        }
    };

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

/// Logging for one-shot CLI commands, which may use stderr freely.
fn init_cli_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load_config() -> Config {
    match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--dump-rankings") => {
            init_cli_tracing();
            return dump_rankings().await;
        }
        Some("--init-config") => {
            init_cli_tracing();
            return init_config();
        }
        Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(other) => {
            eprintln!("Unknown option: {}\n\n{}", other, USAGE);
            std::process::exit(2);
        }
        None => {}
    }

    let _log_guard = init_tracing();
    info!("Runboard starting");

    let config = load_config();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = match App::new(&config) {
        Ok(mut app) => {
            let result = run_app(&mut terminal, &mut app).await;
            app.shutdown().await;
            result
        }
        Err(e) => Err(e),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
    }

    info!("Runboard shutting down");
    Ok(())
}

/// Fetch the leaderboard once and print it to stdout as JSON.
async fn dump_rankings() -> Result<()> {
    let config = load_config();
    let base_url = config.base_url();
    eprintln!("Fetching runner distances from {}...", base_url);

    let api = ApiClient::new(base_url)?;
    let mut manager = RunnerDataManager::with_ttl(api, config.cache_ttl());
    let dataset = manager
        .fetch_data()
        .await
        .context("Failed to fetch runner distances")?;

    println!("{}", serde_json::to_string_pretty(&*dataset)?);
    eprintln!("Done! {} runners ranked.", dataset.len());
    Ok(())
}

/// Write a starter config file unless one already exists.
fn init_config() -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() {
        eprintln!("Config already exists at {}", path.display());
        return Ok(());
    }

    let written = Config::with_defaults().save()?;
    eprintln!("Wrote default config to {}", written.display());
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        // Apply results from the refresh worker
        app.check_background_tasks();

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
