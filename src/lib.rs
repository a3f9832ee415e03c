//! Harbor Weather CLI Library
//!
//! A terminal dashboard that periodically fetches weather for Gig Harbor, WA,
//! derives a few secondary metrics and redraws a bordered panel every second.
//! Modules are exposed for integration tests.

pub mod app;
pub mod cli;
pub mod data;
pub mod logging;
pub mod metrics;
pub mod refresh;
pub mod ui;
