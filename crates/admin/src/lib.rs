//! Admin tool for trade timelines: loads a fixture, replays offer commands
//! against it and renders the resulting view.

pub mod app;
pub mod config;

pub use app::{ReplaySummary, load_commands, parse_commands, replay, run};
pub use config::{AdminConfig, ConfigError};
