//! Refresh scheduling
//!
//! Decides when the dashboard re-fetches weather data and how long it waits
//! until the next fetch. The wait is derived from the fetched payload itself,
//! so consecutive fetches are not perfectly periodic yet stay deterministic
//! for a given document.

use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::data::WeatherSnapshot;

/// Interval used before the first fetch and after any failed fetch (seconds)
pub const BASE_INTERVAL_SECS: u64 = 60;

/// Hard floor for the derived interval (seconds)
pub const MIN_INTERVAL_SECS: u64 = 38;

/// Hard ceiling for the derived interval (seconds)
pub const MAX_INTERVAL_SECS: u64 = 82;

/// Number of distinct jitter offsets; offsets are centered on zero
const JITTER_SPAN: u64 = 45;

/// Scheduler phase for a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    /// Interval not yet elapsed
    Waiting,
    /// Interval elapsed; a fetch is due
    Fetching,
}

/// Process-lifetime refresh bookkeeping owned by the loop driver
#[derive(Debug, Clone)]
pub struct RefreshState {
    /// Monotonic time of the last fetch attempt
    last_fetch: Option<Instant>,
    /// Wall-clock time of the last fetch attempt, for display
    last_sync: Option<NaiveDateTime>,
    /// Seconds to wait after the last fetch
    interval_secs: u64,
    /// Fetch attempts so far, successful or not
    cycles: u64,
    /// Wall-clock process start, for uptime
    started_at: NaiveDateTime,
}

impl RefreshState {
    /// Fresh state: nothing fetched yet, base interval, zero cycles
    pub fn new(started_at: NaiveDateTime) -> Self {
        Self {
            last_fetch: None,
            last_sync: None,
            interval_secs: BASE_INTERVAL_SECS,
            cycles: 0,
            started_at,
        }
    }

    /// Whether a fetch is due at `now`; always due before the first fetch
    pub fn phase(&self, now: Instant) -> SchedulerPhase {
        match self.last_fetch {
            None => SchedulerPhase::Fetching,
            Some(last) if now.saturating_duration_since(last) >= self.interval() => {
                SchedulerPhase::Fetching
            }
            Some(_) => SchedulerPhase::Waiting,
        }
    }

    /// Records one fetch attempt and recomputes the interval from its outcome
    pub fn record_fetch(
        &mut self,
        now: Instant,
        wall_now: NaiveDateTime,
        outcome: Option<&WeatherSnapshot>,
    ) {
        self.cycles += 1;
        self.last_fetch = Some(now);
        self.last_sync = Some(wall_now);
        self.interval_secs = next_interval(outcome);
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    pub fn last_sync(&self) -> Option<NaiveDateTime> {
        self.last_sync
    }

    /// Estimated wall-clock time of the next fetch
    pub fn next_sync(&self) -> Option<NaiveDateTime> {
        let interval = chrono::Duration::seconds(self.interval_secs as i64);
        self.last_sync.map(|last| last + interval)
    }

    /// Time since process start, never negative
    pub fn uptime(&self, now: NaiveDateTime) -> chrono::Duration {
        (now - self.started_at).max(chrono::Duration::zero())
    }
}

/// Interval to wait after a fetch with the given outcome
///
/// # Returns
/// * the payload-derived interval when the fetch produced a current-condition record
/// * exactly [`BASE_INTERVAL_SECS`] on failure or when that record is missing
pub fn next_interval(outcome: Option<&WeatherSnapshot>) -> u64 {
    match outcome.and_then(|s| s.current_record.as_ref()) {
        Some(record) => interval_for_text(&checksum_input(record)),
        None => BASE_INTERVAL_SECS,
    }
}

/// Compact JSON text of the whole received record, the input to the jitter
pub fn checksum_input(record: &Value) -> String {
    record.to_string()
}

/// Maps text onto [`MIN_INTERVAL_SECS`]..=[`MAX_INTERVAL_SECS`] around the base.
///
/// The offset is the sum of the text's character codes folded into
/// `JITTER_SPAN` buckets centered on zero.
pub fn interval_for_text(text: &str) -> u64 {
    let checksum = text
        .chars()
        .fold(0u64, |acc, c| (acc + u64::from(c as u32)) % JITTER_SPAN);
    let offset = checksum as i64 - (JITTER_SPAN / 2) as i64;
    let interval = BASE_INTERVAL_SECS as i64 + offset;
    interval.clamp(MIN_INTERVAL_SECS as i64, MAX_INTERVAL_SECS as i64) as u64
}
