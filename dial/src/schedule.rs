//! Scheduled task primitives driven from the frame loop
//!
//! The dial runs everything on the nannou event loop; recurring work is
//! expressed as owned `Periodic` values polled each update rather than
//! timer callbacks. The same primitive covers the coarse rollover check,
//! the hover-resolution throttle, and the stale-hover watchdog.

use std::time::{Duration, Instant};

/// Fires at most once per interval.
#[derive(Debug)]
pub struct Periodic {
    every: Duration,
    last: Option<Instant>,
}

impl Periodic {
    pub fn new(every: Duration) -> Self {
        Self { every, last: None }
    }

    /// True when the interval has elapsed since the last firing (or the
    /// task has never fired). Records `now` as the new firing time.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(prev) if now.duration_since(prev) < self.every => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_immediately_then_waits() {
        let mut task = Periodic::new(Duration::from_millis(50));
        let t0 = Instant::now();
        assert!(task.due(t0));
        assert!(!task.due(t0 + Duration::from_millis(10)));
        assert!(!task.due(t0 + Duration::from_millis(49)));
        assert!(task.due(t0 + Duration::from_millis(50)));
    }

    #[test]
    fn test_interval_restarts_after_firing() {
        let mut task = Periodic::new(Duration::from_millis(100));
        let t0 = Instant::now();
        assert!(task.due(t0));
        assert!(task.due(t0 + Duration::from_millis(250)));
        // The clock restarts at the firing instant, not on a fixed grid
        assert!(!task.due(t0 + Duration::from_millis(300)));
        assert!(task.due(t0 + Duration::from_millis(350)));
    }
}
