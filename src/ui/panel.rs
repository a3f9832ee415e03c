//! Weather panel layout
//!
//! Turns the current snapshot, derived metrics and refresh state into an
//! ordered list of positioned text writes for a terminal of a given size.
//! Sections are laid out top to bottom; when rows run short the forecast and
//! footer are dropped first and the title and conditions block are kept.

use chrono::NaiveDateTime;

use super::palette::Tone;
use crate::data::{CurrentCondition, WeatherSnapshot};
use crate::metrics::{format_hours_minutes, DerivedMetrics, PLACEHOLDER};
use crate::refresh::RefreshState;

/// Display name of the fixed station
pub const STATION_DISPLAY: &str = "GIG HARBOR, WA";

/// Widest the panel ever gets
pub const MAX_PANEL_WIDTH: u16 = 62;

/// Offset of labels from the panel's left edge
const CONTENT_INSET: usize = 3;

/// Offset of values from the panel's left edge
const VALUE_INSET: usize = 18;

/// Offset of the forecast entries from the content column
const FORECAST_INSET: usize = 11;

/// Offset of the sunset column from the content column
const SUNSET_INSET: usize = 24;

const BANNER: [&str; 6] = [
    "██╗    ██╗███████╗ █████╗ ████████╗██╗  ██╗███████╗██████╗ ",
    "██║    ██║██╔════╝██╔══██╗╚══██╔══╝██║  ██║██╔════╝██╔══██╗",
    "██║ █╗ ██║█████╗  ███████║   ██║   ███████║█████╗  ██████╔╝",
    "██║███╗██║██╔══╝  ██╔══██║   ██║   ██╔══██║██╔══╝  ██╔══██╗",
    "╚███╔███╔╝███████╗██║  ██║   ██║   ██║  ██║███████╗██║  ██║",
    " ╚══╝╚══╝ ╚══════╝╚═╝  ╚═╝   ╚═╝   ╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝",
];

const NO_TIME: &str = "--:--:--";

/// One positioned piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelWrite {
    pub row: u16,
    pub col: u16,
    pub text: String,
    pub tone: Tone,
}

/// Horizontal placement of the panel for a terminal width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    /// Panel width in cells, borders included
    pub width: usize,
    /// Column of the left border
    pub left: usize,
    /// Column where labels start
    pub content_left: usize,
    /// Column where values start
    pub value_left: usize,
}

impl PanelGeometry {
    /// `min(62, width - 2)`, centered
    pub fn for_width(term_width: u16) -> Self {
        let term_width = usize::from(term_width);
        let width = usize::from(MAX_PANEL_WIDTH).min(term_width.saturating_sub(2));
        let left = (term_width - width) / 2;
        Self {
            width,
            left,
            content_left: left + CONTENT_INSET,
            value_left: left + VALUE_INSET,
        }
    }

    /// Column of the right border
    pub fn right_border(&self) -> usize {
        self.left + self.width.saturating_sub(1)
    }

    fn divider(&self) -> String {
        "═".repeat(self.width.saturating_sub(2))
    }
}

/// Everything a render pass needs
#[derive(Debug, Clone, Copy)]
pub struct PanelInput<'a> {
    pub snapshot: Option<&'a WeatherSnapshot>,
    pub metrics: &'a DerivedMetrics,
    pub refresh: &'a RefreshState,
    pub now: NaiveDateTime,
}

/// Collects writes, dropping rows past the bottom and clipping text at a column
struct PanelWriter {
    writes: Vec<PanelWrite>,
    height: usize,
}

impl PanelWriter {
    fn new(height: usize) -> Self {
        Self {
            writes: Vec::new(),
            height,
        }
    }

    /// Writes `text` at (row, col), cut off before column `limit`
    fn put(&mut self, row: usize, col: usize, text: &str, tone: Tone, limit: usize) {
        if row >= self.height || col >= limit {
            return;
        }
        let (Ok(row), Ok(col)) = (u16::try_from(row), u16::try_from(col)) else {
            return;
        };
        let text: String = text.chars().take(limit - usize::from(col)).collect();
        if text.is_empty() {
            return;
        }
        self.writes.push(PanelWrite { row, col, text, tone });
    }
}

/// Panel rows, with the frame drawn around whatever content they hold
struct Panel {
    out: PanelWriter,
    geo: PanelGeometry,
}

impl Panel {
    /// Anything at or past this column would hit the panel's right edge
    fn outer_limit(&self) -> usize {
        self.geo.left + self.geo.width
    }

    /// Content stops before the right border
    fn inner_limit(&self) -> usize {
        self.geo.right_border()
    }

    fn rule(&mut self, row: usize, open: &str, close: &str) {
        let text = format!("{open}{}{close}", self.geo.divider());
        let limit = self.outer_limit();
        self.out.put(row, self.geo.left, &text, Tone::Border, limit);
    }

    fn text(&mut self, row: usize, col: usize, text: &str, tone: Tone) {
        let limit = self.inner_limit();
        self.out.put(row, col, text, tone, limit);
    }

    /// Left and right borders of a content row
    fn sides(&mut self, row: usize) {
        let limit = self.outer_limit();
        self.out.put(row, self.geo.left, "║", Tone::Border, limit);
        if self.geo.width >= 2 {
            let right = self.geo.right_border();
            self.out.put(row, right, "║", Tone::Border, limit);
        }
    }
}

/// Lays out the whole panel for a `width` x `height` terminal.
///
/// Never fails and never emits a row at or past `height`.
pub fn layout(input: &PanelInput<'_>, width: u16, height: u16) -> Vec<PanelWrite> {
    let geo = PanelGeometry::for_width(width);
    let h = usize::from(height);
    let mut panel = Panel {
        out: PanelWriter::new(h),
        geo,
    };
    let mut row = 0;

    // Banner
    panel.rule(row, " ", "");
    row += 1;
    for line in BANNER {
        if row + 1 >= h {
            break;
        }
        let art_left = geo.left + geo.width.saturating_sub(line.chars().count()) / 2;
        let limit = panel.outer_limit();
        panel.out.put(row, art_left, line, Tone::Art, limit);
        row += 1;
    }
    panel.rule(row, " ", "");
    row += 1;

    if row + 2 >= h {
        return panel.out.writes;
    }

    // Title bar with live clock
    panel.rule(row, "╔", "╗");
    row += 1;
    panel.sides(row);
    panel.text(row, geo.content_left, STATION_DISPLAY, Tone::Title);
    let clock = input.now.format("%a %b %d  %H:%M:%S").to_string();
    let clock_left = (geo.left + geo.width).checked_sub(clock.chars().count() + 2);
    if let Some(col) = clock_left.filter(|col| *col > geo.left) {
        panel.text(row, col, &clock, Tone::Dim);
    }
    row += 1;
    panel.rule(row, "╠", "╣");
    row += 1;

    // Conditions
    let current = input.snapshot.and_then(|s| s.current.as_ref());
    for (label, value) in condition_rows(current, input.metrics) {
        if row + 1 >= h {
            break;
        }
        panel.sides(row);
        panel.text(row, geo.content_left, &format!("{label}:"), Tone::Label);
        panel.text(row, geo.value_left, &value, Tone::Value);
        row += 1;
    }

    if row + 1 >= h {
        return panel.out.writes;
    }
    panel.rule(row, "╠", "╣");
    row += 1;

    // Astronomy
    let metrics = input.metrics;
    if row + 4 < h {
        panel.sides(row);
        panel.text(
            row,
            geo.content_left,
            &format!("Sunrise: {}", metrics.sunrise),
            Tone::Value,
        );
        panel.text(
            row,
            geo.content_left + SUNSET_INSET,
            &format!("Sunset: {}", metrics.sunset),
            Tone::Value,
        );
        row += 1;

        panel.sides(row);
        if let Some((countdown, event)) = &metrics.countdown {
            panel.text(
                row,
                geo.content_left,
                &format!("{countdown} to {}", event.label()),
                Tone::Dim,
            );
        }
        row += 1;
    }

    if row + 4 < h {
        panel.rule(row, "╠", "╣");
        row += 1;
    }

    // Forecast
    if !metrics.forecast.is_empty() && row + 3 < h {
        panel.sides(row);
        panel.text(row, geo.content_left, "Forecast:", Tone::Label);
        panel.text(
            row,
            geo.content_left + FORECAST_INSET,
            &metrics.forecast_text(),
            Tone::Value,
        );
        row += 1;
    }

    if row + 3 < h {
        panel.rule(row, "╠", "╣");
        row += 1;
    }

    // Status footer
    let refresh = input.refresh;
    if row + 2 < h {
        let sync = refresh
            .last_sync()
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| NO_TIME.to_string());
        let next = refresh
            .next_sync()
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| NO_TIME.to_string());
        panel.sides(row);
        panel.text(
            row,
            geo.content_left,
            &format!("Sync: {sync}  Next: ~{next}"),
            Tone::Dim,
        );
        row += 1;
    }

    if row + 1 < h {
        let uptime = format_hours_minutes(refresh.uptime(input.now));
        panel.sides(row);
        panel.text(
            row,
            geo.content_left,
            &format!("Up: {uptime}  Cycles: {}", refresh.cycles()),
            Tone::Dim,
        );
        row += 1;
    }

    panel.rule(row, "╚", "╝");

    panel.out.writes
}

/// The ten label/value rows of the conditions block
fn condition_rows(
    current: Option<&CurrentCondition>,
    metrics: &DerivedMetrics,
) -> [(&'static str, String); 10] {
    let field = |pick: fn(&CurrentCondition) -> Option<&String>| -> String {
        current
            .and_then(pick)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .unwrap_or(PLACEHOLDER)
            .to_string()
    };

    let condition = current
        .and_then(CurrentCondition::condition_text)
        .unwrap_or(PLACEHOLDER)
        .to_string();

    [
        ("Condition", condition),
        (
            "Temp",
            format!(
                "{}F  (Feels {}F)",
                field(|c| c.temp_f.as_ref()),
                field(|c| c.feels_like_f.as_ref())
            ),
        ),
        ("Humidity", format!("{}%", field(|c| c.humidity.as_ref()))),
        ("Dew Point", metrics.dew_point_text()),
        (
            "Wind",
            format!(
                "{} {} mph",
                field(|c| c.wind_dir.as_ref()),
                field(|c| c.wind_speed_mph.as_ref())
            ),
        ),
        ("Pressure", format!("{} inHg", field(|c| c.pressure_in.as_ref()))),
        ("Visibility", format!("{} mi", field(|c| c.visibility_mi.as_ref()))),
        ("Cloud Cover", format!("{}%", field(|c| c.cloud_cover.as_ref()))),
        ("UV Index", field(|c| c.uv_index.as_ref())),
        ("Precip", format!("{} in", field(|c| c.precip_in.as_ref()))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Astronomy, DayForecast, HourlyPoint};
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn sample_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            current: Some(CurrentCondition {
                temp_f: Some("68".to_string()),
                feels_like_f: Some("67".to_string()),
                humidity: Some("55".to_string()),
                wind_speed_mph: Some("7".to_string()),
                wind_dir: Some("SW".to_string()),
                ..Default::default()
            }),
            days: vec![DayForecast {
                astronomy: vec![Astronomy {
                    sunrise: Some("06:45 AM".to_string()),
                    sunset: Some("08:10 PM".to_string()),
                }],
                hourly: vec![
                    HourlyPoint {
                        time: Some("1500".to_string()),
                        temp_f: Some("68".to_string()),
                    },
                    HourlyPoint {
                        time: Some("1800".to_string()),
                        temp_f: Some("64".to_string()),
                    },
                    HourlyPoint {
                        time: Some("2100".to_string()),
                        temp_f: Some("58".to_string()),
                    },
                ],
            }],
            current_record: None,
        }
    }

    fn render(
        snapshot: Option<&WeatherSnapshot>,
        refresh: &RefreshState,
        now: NaiveDateTime,
        width: u16,
        height: u16,
    ) -> Vec<PanelWrite> {
        let metrics = DerivedMetrics::derive(snapshot, now);
        let input = PanelInput {
            snapshot,
            metrics: &metrics,
            refresh,
            now,
        };
        layout(&input, width, height)
    }

    fn texts(writes: &[PanelWrite]) -> Vec<&str> {
        writes.iter().map(|w| w.text.as_str()).collect()
    }

    #[test]
    fn test_geometry_wide_terminal() {
        let geo = PanelGeometry::for_width(80);
        assert_eq!(geo.width, 62);
        assert_eq!(geo.left, 9);
        assert_eq!(geo.content_left, 12);
        assert_eq!(geo.value_left, 27);
        assert_eq!(geo.right_border(), 70);
    }

    #[test]
    fn test_geometry_narrow_terminal() {
        let geo = PanelGeometry::for_width(40);
        assert_eq!(geo.width, 38);
        assert_eq!(geo.left, 1);
        assert_eq!(PanelGeometry::for_width(0).width, 0);
        assert_eq!(PanelGeometry::for_width(1).left, 0);
    }

    #[test]
    fn test_full_panel_contains_every_section() {
        let snapshot = sample_snapshot();
        let refresh = RefreshState::new(at(12, 0));
        let writes = render(Some(&snapshot), &refresh, at(15, 0), 80, 40);
        let all = texts(&writes).join("\n");

        assert!(all.contains(STATION_DISPLAY));
        assert!(all.contains("Dew Point:"));
        assert!(all.contains("68F  (Feels 67F)"));
        assert!(all.contains("SW 7 mph"));
        assert!(all.contains("Sunrise: 06:45 AM"));
        assert!(all.contains("Sunset: 08:10 PM"));
        assert!(all.contains("5h 10m to sunset"));
        assert!(all.contains("3PM:68F  6PM:64F  9PM:58F"));
        assert!(all.contains("Up: 3h 00m  Cycles: 0"));
        assert!(all.contains("Sync: --:--:--  Next: ~--:--:--"));
        assert!(writes.iter().any(|w| w.text.starts_with('╚')));
    }

    #[test]
    fn test_no_snapshot_renders_placeholders() {
        let refresh = RefreshState::new(at(12, 0));
        let writes = render(None, &refresh, at(12, 0), 80, 40);
        let all = texts(&writes).join("\n");

        assert!(all.contains("Condition:"));
        assert!(all.contains("--F  (Feels --F)"));
        assert!(all.contains("--%"));
        assert!(all.contains("Sunrise: --"));
        assert!(!all.contains("Forecast:"));
    }

    #[test]
    fn test_tiny_terminal_keeps_whole_banner_rows() {
        let refresh = RefreshState::new(at(12, 0));
        let writes = render(None, &refresh, at(12, 0), 80, 3);

        assert!(writes.iter().all(|w| w.row < 3));
        let divider = format!(" {}", "═".repeat(60));
        let rows: Vec<u16> = writes.iter().map(|w| w.row).collect();
        assert_eq!(rows, [0, 1, 2]);
        assert_eq!(writes[0].text, divider);
        assert_eq!(writes[2].text, divider);
        assert_eq!(writes[1].tone, Tone::Art);
        assert!(!texts(&writes).join("").contains(STATION_DISPLAY));
    }

    #[test]
    fn test_zero_height_emits_nothing() {
        let refresh = RefreshState::new(at(12, 0));
        assert!(render(None, &refresh, at(12, 0), 80, 0).is_empty());
        assert!(render(None, &refresh, at(12, 0), 0, 0).is_empty());
    }

    #[test]
    fn test_short_terminal_drops_footer_before_conditions() {
        let snapshot = sample_snapshot();
        let refresh = RefreshState::new(at(12, 0));
        let writes = render(Some(&snapshot), &refresh, at(15, 0), 80, 22);
        let all = texts(&writes).join("\n");

        assert!(all.contains(STATION_DISPLAY));
        assert!(all.contains("Precip:"));
        assert!(!all.contains("Forecast:"));
        assert!(!all.contains("Cycles:"));
        assert!(writes.iter().all(|w| w.row < 22));
    }

    #[test]
    fn test_rows_never_exceed_height() {
        let snapshot = sample_snapshot();
        let refresh = RefreshState::new(at(12, 0));
        for height in 0..45 {
            for width in [0, 1, 5, 20, 64, 120] {
                let writes = render(Some(&snapshot), &refresh, at(15, 0), width, height);
                assert!(writes.iter().all(|w| w.row < height), "{width}x{height}");
            }
        }
    }

    #[test]
    fn test_text_is_clipped_to_panel() {
        let mut snapshot = sample_snapshot();
        if let Some(current) = snapshot.current.as_mut() {
            current.description = vec![crate::data::TextValue {
                value: Some("x".repeat(200)),
            }];
        }
        let refresh = RefreshState::new(at(12, 0));
        let writes = render(Some(&snapshot), &refresh, at(15, 0), 80, 40);
        let geo = PanelGeometry::for_width(80);
        for w in &writes {
            let end = usize::from(w.col) + w.text.chars().count();
            assert!(end <= geo.left + geo.width, "{:?} overflows the panel", w.text);
        }
    }

    #[test]
    fn test_narrow_terminal_lays_out_without_panicking() {
        let snapshot = sample_snapshot();
        let refresh = RefreshState::new(at(12, 0));
        let writes = render(Some(&snapshot), &refresh, at(15, 0), 12, 40);
        assert!(!writes.is_empty());
        assert!(writes.iter().all(|w| usize::from(w.col) < 12));
    }

    #[test]
    fn test_countdown_absent_after_both_events() {
        let snapshot = sample_snapshot();
        let refresh = RefreshState::new(at(12, 0));
        let writes = render(Some(&snapshot), &refresh, at(21, 0), 80, 40);
        assert!(!texts(&writes).join("\n").contains(" to sun"));
    }
}
