//! Time Engine - whole-second time-of-day model for the dial
//!
//! Everything downstream works in whole seconds within a single calendar day.
//! The wall clock is sampled in exactly one place (`sample_clock`) so tests
//! can substitute a fixed instant via `sample_clock_at`.

use chrono::{DateTime, Local, NaiveDate, Timelike};

/// Seconds in a full day.
pub const DAY_SECS: u32 = 86_400;
/// Seconds in one 12-hour ring.
pub const HALF_DAY_SECS: u32 = 43_200;

/// A wall-clock time within one day, truncated to whole seconds.
///
/// Field order gives the derived `Ord` chronological meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    /// Hour (0-23)
    pub hour: u32,
    /// Minute (0-59)
    pub minute: u32,
    /// Second (0-59)
    pub second: u32,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay {
        hour: 0,
        minute: 0,
        second: 0,
    };

    pub const NOON: TimeOfDay = TimeOfDay {
        hour: 12,
        minute: 0,
        second: 0,
    };

    /// Create a time of day, rejecting out-of-range components.
    pub fn new(hour: u32, minute: u32, second: u32) -> Option<TimeOfDay> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(TimeOfDay {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    /// Build from seconds since midnight, wrapping modulo one day.
    pub fn from_seconds(secs: u32) -> TimeOfDay {
        let secs = secs % DAY_SECS;
        TimeOfDay {
            hour: secs / 3600,
            minute: (secs % 3600) / 60,
            second: secs % 60,
        }
    }

    /// Seconds since midnight (0-86399).
    pub fn seconds(&self) -> u32 {
        self.hour * 3600 + self.minute * 60 + self.second
    }

    /// Parse a "HH:MM:SS" string.
    pub fn parse(s: &str) -> Result<TimeOfDay, String> {
        let mut parts = s.split(':');
        let (h, m, sec) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(m), Some(s), None) => (h, m, s),
            _ => return Err(format!("Invalid time: {}", s)),
        };
        let parse_part = |p: &str| p.parse::<u32>().map_err(|_| format!("Invalid time: {}", s));
        TimeOfDay::new(parse_part(h)?, parse_part(m)?, parse_part(sec)?)
            .ok_or_else(|| format!("Time out of range: {}", s))
    }

    /// Whether this time falls in the afternoon ring (>= 12:00:00).
    pub fn is_afternoon(&self) -> bool {
        self.seconds() >= HALF_DAY_SECS
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Snapshot of the wall clock for one update tick.
#[derive(Debug, Clone, Copy)]
pub struct TickData {
    /// Calendar date of the sample
    pub date: NaiveDate,
    /// Time of day, whole seconds
    pub time: TimeOfDay,
    /// Fractional seconds (0.0-1.0) for smooth hand animation
    pub second_fraction: f64,
}

/// Sample the current wall clock.
pub fn sample_clock() -> TickData {
    sample_clock_at(Local::now())
}

/// Build a clock sample from a specific local instant.
pub fn sample_clock_at(now: DateTime<Local>) -> TickData {
    let nanos = now.nanosecond();
    TickData {
        date: now.date_naive(),
        time: TimeOfDay {
            hour: now.hour(),
            minute: now.minute(),
            second: now.second(),
        },
        // chrono folds leap seconds into nanos >= 1e9
        second_fraction: (nanos % 1_000_000_000) as f64 / 1_000_000_000.0,
    }
}
