//! Application state for Harbor Weather CLI
//!
//! The loop driver's state lives here: the latest weather snapshot, the
//! refresh bookkeeping and the quit flag. `main` calls [`App::tick`] once per
//! loop iteration, draws, then feeds key presses to [`App::handle_key`].

use std::time::Instant;

use chrono::NaiveDateTime;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use tracing::{info, warn};

use crate::data::{WeatherProvider, WeatherSnapshot};
use crate::refresh::{RefreshState, SchedulerPhase};
use crate::ui::{self, Palette};

/// Main application struct managing state and data
pub struct App<P> {
    /// Latest successfully fetched snapshot, kept across failed fetches
    snapshot: Option<WeatherSnapshot>,
    /// Fetch cadence, cycle count and uptime
    refresh: RefreshState,
    /// Styles for the panel
    palette: Palette,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Weather data source
    provider: P,
}

impl<P: WeatherProvider> App<P> {
    /// Creates a new App with nothing fetched yet
    pub fn new(provider: P, palette: Palette, started_at: NaiveDateTime) -> Self {
        Self {
            snapshot: None,
            refresh: RefreshState::new(started_at),
            palette,
            should_quit: false,
            provider,
        }
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn refresh_state(&self) -> &RefreshState {
        &self.refresh
    }

    /// Fetches once if the refresh interval has elapsed.
    ///
    /// A failed fetch keeps the previous snapshot and resets the interval to
    /// the base; it never propagates.
    ///
    /// # Returns
    /// `true` if a fetch was attempted
    pub async fn tick(&mut self, now: Instant, wall_now: NaiveDateTime) -> bool {
        if self.refresh.phase(now) == SchedulerPhase::Waiting {
            return false;
        }

        let fetched = match self.provider.fetch().await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(error = %err, "weather fetch failed; keeping previous data");
                None
            }
        };

        self.refresh.record_fetch(now, wall_now, fetched.as_ref());
        if let Some(snapshot) = fetched {
            self.snapshot = Some(snapshot);
        }

        info!(
            cycle = self.refresh.cycles(),
            next_interval_secs = self.refresh.interval_secs(),
            has_data = self.snapshot.is_some(),
            "refresh cycle complete"
        );
        true
    }

    /// Draws the dashboard into `frame`
    pub fn render(&self, frame: &mut Frame, now: NaiveDateTime) {
        ui::render(frame, self.snapshot(), &self.refresh, self.palette, now);
    }

    /// Handles a key press; `q`, `Q`, `Esc` and `Ctrl+C` quit
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }
        if is_quit_key(&key_event) {
            info!("quit requested");
            self.should_quit = true;
        }
    }
}

/// Whether a key event asks the dashboard to exit
pub fn is_quit_key(key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key_event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
