//! UI rendering module for Harbor Weather CLI
//!
//! The panel is laid out as plain positioned text by [`panel::layout`] and then
//! painted onto the frame through the bounds-checked [`canvas::Canvas`].

pub mod canvas;
pub mod palette;
pub mod panel;

use chrono::NaiveDateTime;
use ratatui::Frame;

use crate::data::WeatherSnapshot;
use crate::metrics::DerivedMetrics;
use crate::refresh::RefreshState;

pub use canvas::Canvas;
pub use palette::{Palette, Tone};
pub use panel::{layout, PanelGeometry, PanelInput, PanelWrite};

/// Renders the dashboard for one tick at the frame's current size
pub fn render(
    frame: &mut Frame,
    snapshot: Option<&WeatherSnapshot>,
    refresh: &RefreshState,
    palette: Palette,
    now: NaiveDateTime,
) {
    let area = frame.area();
    let mut canvas = Canvas::new(frame.buffer_mut(), area);
    let (rows, cols) = canvas.dimensions();

    let metrics = DerivedMetrics::derive(snapshot, now);
    let input = PanelInput {
        snapshot,
        metrics: &metrics,
        refresh,
        now,
    };
    let writes = layout(&input, cols, rows);

    canvas.clear();
    canvas.paint(&writes, palette);
}
