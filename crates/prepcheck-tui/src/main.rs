//! prepcheck - a terminal wizard for disaster-preparedness assessments.
//!
//! Walks the user through four short steps describing a disaster, their
//! shelter, the people with them and their supplies, then asks a watsonx.ai
//! model for a risk assessment. Without a working integration a fixed demo
//! assessment is shown instead.

mod app;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use prepcheck_core::prompt::format_prompt;
use prepcheck_core::{Assessor, Config, Integration, Navigation, SessionStore, Step, Wizard};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Environment variable holding the log filter directive
const LOG_ENV: &str = "PREPCHECK_LOG";

const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_FILE_PREFIX: &str = "prepcheck.log";

const USAGE: &str = "\
Usage: prepcheck [OPTIONS]

Options:
  --demo           Never call watsonx.ai; always show demo results
  --print-prompt   Print the prompt built from default answers and exit
  --version        Print version and exit
  --help           Print this help and exit

Environment:
  WATSONX_URL, WATSONX_APIKEY, projectID, spaceID   watsonx.ai credentials
  PREPCHECK_LOG                                     log filter (default: info)";

/// Initialize the tracing subscriber for logging.
///
/// The terminal belongs to the UI, so logs go to a daily file in the cache
/// directory. The returned guard flushes the writer when dropped.
fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let appender = Config::log_dir().and_then(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .build(dir)
            .map_err(anyhow::Error::from)
    });

    match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Some(guard)
        }
        Err(e) => {
            // Nowhere to write; run without logs rather than corrupt the screen
            eprintln!("Logging disabled: {}", e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI flags
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut force_demo = false;
    for arg in &args {
        match arg.as_str() {
            "--demo" => force_demo = true,
            "--print-prompt" => return print_prompt(),
            "--version" | "-V" => {
                println!("prepcheck {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(());
            }
            other => {
                eprintln!("Unknown option: {}\n\n{}", other, USAGE);
                std::process::exit(2);
            }
        }
    }

    // Initialize logging
    let _log_guard = init_tracing();
    info!(version = env!("CARGO_PKG_VERSION"), "prepcheck starting");

    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Could not load config, using defaults");
        Config::default()
    });
    let assessor = Assessor::watsonx(Integration::detect(force_demo), config.model_settings());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(assessor);

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("prepcheck shutting down");
    Ok(())
}

/// Print the prompt a user who accepts every default would send.
fn print_prompt() -> Result<()> {
    let mut session = SessionStore::new();
    loop {
        let section = Wizard::form(&session).section();
        Wizard::record(&mut session, &section)?;
        if Wizard::current_step(&session) == Step::Supplies {
            break;
        }
        Wizard::navigate(&mut session, Navigation::Next)?;
    }
    println!("{}", format_prompt(&Wizard::draft(&session)));
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout so finished assessments show up
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        // Check for a completed assessment
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
