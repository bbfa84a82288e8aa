//! Shared library for the timetable dial
//!
//! Holds the pieces with no rendering dependencies: the whole-second
//! time-of-day model, per-day anchor persistence, and app-config persistence.

pub mod config;
pub mod store;
pub mod time_engine;

pub use config::{config_path, load_config, save_config, ConfigError};
pub use store::{day_path, load_day, save_day, StoreError, StoredAnchor};
pub use time_engine::{
    sample_clock, sample_clock_at, TickData, TimeOfDay, DAY_SECS, HALF_DAY_SECS,
};
