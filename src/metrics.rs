//! Derived weather metrics
//!
//! Pure functions that turn a [`WeatherSnapshot`] into the secondary values the
//! panel shows: dew point, sunrise/sunset, the short hourly forecast window and
//! countdowns. None of them fail; an unusable input yields a placeholder or
//! `None`.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::data::WeatherSnapshot;

/// Placeholder shown for any value that could not be derived
pub const PLACEHOLDER: &str = "--";

/// Magnus formula coefficients (Celsius)
const MAGNUS_A: f64 = 17.27;
const MAGNUS_B: f64 = 237.7;

/// Denominators closer to zero than this are treated as unusable
const MIN_DENOMINATOR: f64 = 1e-9;

/// Number of entries in the hourly forecast window
pub const FORECAST_WINDOW: usize = 3;

/// Only today and tomorrow feed the hourly window
const FORECAST_DAYS: usize = 2;

/// Dew point in Fahrenheit from temperature (F) and relative humidity (%).
///
/// Returns `None` when humidity is outside (0, 100], an input is not finite,
/// or the formula's denominators vanish.
pub fn dew_point(temp_f: f64, humidity_pct: f64) -> Option<f64> {
    if !temp_f.is_finite() || !humidity_pct.is_finite() {
        return None;
    }
    if humidity_pct <= 0.0 || humidity_pct > 100.0 {
        return None;
    }

    let temp_c = (temp_f - 32.0) * 5.0 / 9.0;
    let base = MAGNUS_B + temp_c;
    if base.abs() < MIN_DENOMINATOR {
        return None;
    }

    let alpha = (MAGNUS_A * temp_c) / base + (humidity_pct / 100.0).ln();
    let denominator = MAGNUS_A - alpha;
    if denominator.abs() < MIN_DENOMINATOR {
        return None;
    }

    let dew_c = (MAGNUS_B * alpha) / denominator;
    let dew_f = dew_c * 9.0 / 5.0 + 32.0;
    if !dew_f.is_finite() {
        return None;
    }
    // Saturated air can round a hair above the air temperature.
    Some(dew_f.min(temp_f))
}

/// [`dew_point`] over the provider's text fields
pub fn dew_point_from_text(temp_f: Option<&str>, humidity_pct: Option<&str>) -> Option<f64> {
    let temp = temp_f?.trim().parse().ok()?;
    let humidity = humidity_pct?.trim().parse().ok()?;
    dew_point(temp, humidity)
}

/// Sunrise and sunset for today, both or neither.
pub fn astronomy(snapshot: Option<&WeatherSnapshot>) -> (String, String) {
    let pair = snapshot
        .and_then(|s| s.days.first())
        .and_then(|day| day.astronomy.first())
        .and_then(|astro| {
            let sunrise = astro.sunrise.as_deref().filter(|s| !s.trim().is_empty())?;
            let sunset = astro.sunset.as_deref().filter(|s| !s.trim().is_empty())?;
            Some((sunrise.to_string(), sunset.to_string()))
        });

    pair.unwrap_or_else(|| (PLACEHOLDER.to_string(), PLACEHOLDER.to_string()))
}

/// One entry of the hourly forecast window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastEntry {
    /// 12-hour label without leading zero, e.g. "3PM"
    pub label: String,
    /// Temperature text in Fahrenheit, "?" when missing
    pub temp_f: String,
}

impl std::fmt::Display for ForecastEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}F", self.label, self.temp_f)
    }
}

/// Picks the next three hourly points from today and tomorrow.
///
/// Starts at the first point whose hour is at or after `now_hour` and takes
/// it plus the two that follow. When fewer than three remain from there, the
/// last three points of the whole list are used instead. Points whose time is
/// not an integer are skipped.
pub fn hourly_window(snapshot: Option<&WeatherSnapshot>, now_hour: u32) -> Vec<ForecastEntry> {
    let Some(snapshot) = snapshot else {
        return Vec::new();
    };

    let points: Vec<(u32, Option<&str>)> = snapshot
        .days
        .iter()
        .take(FORECAST_DAYS)
        .flat_map(|day| day.hourly.iter())
        .filter_map(|point| Some((point.hour()?, point.temp_f.as_deref())))
        .collect();

    let upcoming = points
        .iter()
        .position(|(hour, _)| *hour >= now_hour)
        .map(|start| &points[start..])
        .filter(|rest| rest.len() >= FORECAST_WINDOW)
        .map(|rest| &rest[..FORECAST_WINDOW])
        .unwrap_or_else(|| &points[points.len().saturating_sub(FORECAST_WINDOW)..]);

    upcoming
        .iter()
        .map(|(hour, temp)| ForecastEntry {
            label: hour_label(*hour),
            temp_f: temp
                .filter(|t| !t.trim().is_empty())
                .unwrap_or("?")
                .to_string(),
        })
        .collect()
}

/// "3PM", "12AM", "11AM"
pub fn hour_label(hour: u32) -> String {
    match NaiveTime::from_hms_opt(hour % 24, 0, 0) {
        Some(time) => time.format("%-I%p").to_string(),
        None => "?".to_string(),
    }
}

/// Parses a 12-hour time of day such as "07:12 AM"
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%I:%M %p").ok()
}

/// Time remaining until `event` today, as "Xh YYm".
///
/// The event is anchored to `now`'s date; an event already past returns
/// `None` rather than rolling over to tomorrow.
pub fn time_until(event: &str, now: NaiveDateTime) -> Option<String> {
    let event_time = parse_time_of_day(event)?;
    let delta = now.date().and_time(event_time) - now;
    if delta < Duration::zero() {
        return None;
    }
    Some(format_hours_minutes(delta))
}

/// Which astronomy event a countdown refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunEvent {
    Sunrise,
    Sunset,
}

impl SunEvent {
    pub fn label(self) -> &'static str {
        match self {
            SunEvent::Sunrise => "sunrise",
            SunEvent::Sunset => "sunset",
        }
    }
}

/// Countdown to the next of today's events, sunset first.
pub fn next_sun_event(sunrise: &str, sunset: &str, now: NaiveDateTime) -> Option<(String, SunEvent)> {
    time_until(sunset, now)
        .map(|c| (c, SunEvent::Sunset))
        .or_else(|| time_until(sunrise, now).map(|c| (c, SunEvent::Sunrise)))
}

/// Formats a non-negative duration as "Xh YYm", truncating seconds
pub fn format_hours_minutes(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!("{}h {:02}m", total / 3600, (total % 3600) / 60)
}

/// Values derived from the current snapshot for one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    pub dew_point_f: Option<f64>,
    pub sunrise: String,
    pub sunset: String,
    pub countdown: Option<(String, SunEvent)>,
    pub forecast: Vec<ForecastEntry>,
}

impl DerivedMetrics {
    /// Computes every derived value; never cached across frames
    pub fn derive(snapshot: Option<&WeatherSnapshot>, now: NaiveDateTime) -> Self {
        let current = snapshot.and_then(|s| s.current.as_ref());
        let dew_point_f = current.and_then(|c| {
            dew_point_from_text(c.temp_f.as_deref(), c.humidity.as_deref())
        });

        let (sunrise, sunset) = astronomy(snapshot);
        let countdown = next_sun_event(&sunrise, &sunset, now);
        let forecast = hourly_window(snapshot, chrono::Timelike::hour(&now));

        Self {
            dew_point_f,
            sunrise,
            sunset,
            countdown,
            forecast,
        }
    }

    /// Dew point to one decimal with the unit, or the placeholder
    pub fn dew_point_text(&self) -> String {
        match self.dew_point_f {
            Some(dp) => format!("{:.1}F", dp),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// Forecast entries joined for a single row
    pub fn forecast_text(&self) -> String {
        self.forecast
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("  ")
    }
}
