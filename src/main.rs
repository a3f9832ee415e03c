//! Harbor Weather CLI - live weather dashboard for Gig Harbor, WA
//!
//! Fetches current conditions and a short forecast from wttr.in and redraws a
//! bordered panel in the terminal until `q` is pressed.

use std::io;
use std::panic;
use std::time::{Duration, Instant};

use chrono::Local;
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use harborwx::app::App;
use harborwx::cli::{no_color_requested, Cli, Settings};
use harborwx::data::{WeatherClient, DEFAULT_TIMEOUT};
use harborwx::logging;

/// Input poll timeout; one loop iteration per tick
const TICK: Duration = Duration::from_secs(1);

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Runs the dashboard until a quit key is pressed.
///
/// Draw and input errors are logged and the loop carries on.
async fn run(terminal: &mut Tui, app: &mut App<WeatherClient>) {
    loop {
        app.tick(Instant::now(), Local::now().naive_local()).await;

        // Terminal size is re-read by every draw
        let now = Local::now().naive_local();
        if let Err(err) = terminal.draw(|f| app.render(f, now)) {
            warn!(error = %err, "draw failed");
        }

        // Poll for keyboard events with a one-tick timeout
        match event::poll(TICK) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => app.handle_key(key),
                Ok(_) => {}
                Err(err) => warn!(error = %err, "failed to read input event"),
            },
            Ok(false) => {}
            Err(err) => warn!(error = %err, "failed to poll input"),
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = match Settings::from_cli(&cli, no_color_requested()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    match logging::init(settings.log_file.as_deref(), &settings.log_level) {
        Ok(path) => info!(log_file = %path.display(), "harborwx starting"),
        Err(err) => eprintln!("warning: logging disabled: {err}"),
    }

    let client = WeatherClient::new(DEFAULT_TIMEOUT)?;
    let mut app = App::new(client, settings.palette, Local::now().naive_local());

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;

    info!(cycles = app.refresh_state().cycles(), "harborwx stopped");
    Ok(())
}
