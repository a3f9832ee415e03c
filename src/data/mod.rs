//! Core data models for Harbor Weather CLI
//!
//! This module contains the weather snapshot produced by one successful fetch,
//! shaped after the wttr.in `j1` document: a current-condition record, and a
//! list of day records each carrying hourly points and astronomy.

pub mod wttr;

pub use wttr::{WeatherClient, WeatherError, WeatherProvider, DEFAULT_TIMEOUT};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One complete fetched weather document.
///
/// Immutable once built. The loop driver replaces it wholesale on the next
/// successful fetch and keeps it through failed ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    /// Current conditions (first `current_condition` record), if present
    pub current: Option<CurrentCondition>,
    /// The same record exactly as received, every field included
    pub current_record: Option<Value>,
    /// Per-day forecast records in chronological order
    pub days: Vec<DayForecast>,
}

/// Current-condition record
///
/// Every scalar is kept as the provider's text so values render exactly as
/// received; fields the provider omitted are `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentCondition {
    #[serde(rename = "temp_F", default, deserialize_with = "lenient_string")]
    pub temp_f: Option<String>,
    #[serde(rename = "FeelsLikeF", default, deserialize_with = "lenient_string")]
    pub feels_like_f: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub humidity: Option<String>,
    #[serde(rename = "windspeedMiles", default, deserialize_with = "lenient_string")]
    pub wind_speed_mph: Option<String>,
    #[serde(rename = "winddir16Point", default, deserialize_with = "lenient_string")]
    pub wind_dir: Option<String>,
    #[serde(rename = "pressureInches", default, deserialize_with = "lenient_string")]
    pub pressure_in: Option<String>,
    #[serde(rename = "visibilityMiles", default, deserialize_with = "lenient_string")]
    pub visibility_mi: Option<String>,
    #[serde(rename = "cloudcover", default, deserialize_with = "lenient_string")]
    pub cloud_cover: Option<String>,
    #[serde(rename = "uvIndex", default, deserialize_with = "lenient_string")]
    pub uv_index: Option<String>,
    #[serde(rename = "precipInches", default, deserialize_with = "lenient_string")]
    pub precip_in: Option<String>,
    #[serde(rename = "weatherDesc", default)]
    pub description: Vec<TextValue>,
}

impl CurrentCondition {
    /// Text description of the condition ("Partly cloudy"), if any
    pub fn condition_text(&self) -> Option<&str> {
        self.description
            .first()
            .and_then(|d| d.value.as_deref())
            .filter(|v| !v.is_empty())
    }
}

/// wttr.in wraps free text as `[{"value": "..."}]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextValue {
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

/// Forecast for a single calendar day
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DayForecast {
    #[serde(default)]
    pub astronomy: Vec<Astronomy>,
    #[serde(default)]
    pub hourly: Vec<HourlyPoint>,
}

/// Sunrise and sunset as 12-hour "HH:MM AM" strings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Astronomy {
    #[serde(default, deserialize_with = "lenient_string")]
    pub sunrise: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sunset: Option<String>,
}

/// One hourly forecast point
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HourlyPoint {
    /// Time of day as an "HHMM"-style integer string ("0", "300", "1500")
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: Option<String>,
    #[serde(rename = "tempF", default, deserialize_with = "lenient_string")]
    pub temp_f: Option<String>,
}

impl HourlyPoint {
    /// Hour of day encoded in `time`, or `None` when it is not an integer
    pub fn hour(&self) -> Option<u32> {
        let raw: u32 = self.time.as_deref()?.trim().parse().ok()?;
        Some(raw / 100)
    }
}

/// Raw wttr.in `j1` document
#[derive(Debug, Deserialize)]
struct WttrDocument {
    #[serde(default)]
    current_condition: Vec<Value>,
    #[serde(default)]
    weather: Vec<DayForecast>,
}

impl WeatherSnapshot {
    /// Parses a wttr.in `j1` JSON document.
    ///
    /// Missing or oddly-typed fields never fail the parse; only text that is
    /// not a JSON object does. A current-condition entry that is not an object
    /// is kept as `current_record` but yields no `current`.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let doc: WttrDocument = serde_json::from_str(text)?;
        let current_record = doc.current_condition.into_iter().next();
        let current = current_record
            .as_ref()
            .and_then(|record| CurrentCondition::deserialize(record).ok());
        Ok(Self {
            current,
            current_record,
            days: doc.weather,
        })
    }
}

/// Accepts a string, number, or bool and keeps its text; anything else is absent
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
