//! Day session - the anchor store for one calendar day
//!
//! Owns the ordered anchor list, its load/seed/append lifecycle, and the
//! mapping to the stored wire form. Day rollover is "construct a new
//! DaySession" rather than mutating one in place.

use chrono::NaiveDate;
use shared::store::{self, StoreError, StoredAnchor};
use shared::TimeOfDay;

/// Label applied to the seed anchor and to blank user input.
pub const DEFAULT_LABEL: &str = "unnamed";

/// A stored timestamp+label marking the start of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub time: TimeOfDay,
    pub label: String,
}

impl Anchor {
    /// The anchor every fresh day starts with.
    fn seed() -> Anchor {
        Anchor {
            time: TimeOfDay::MIDNIGHT,
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

/// Result of loading a day: the session plus any non-fatal warning.
#[derive(Debug)]
pub struct LoadOutcome {
    pub session: DaySession,
    pub warning: Option<StoreError>,
}

/// The anchor list for one calendar day, sorted ascending by time.
#[derive(Debug)]
pub struct DaySession {
    pub date: NaiveDate,
    anchors: Vec<Anchor>,
}

impl DaySession {
    /// Load the session for `date`.
    ///
    /// A read failure falls back to an empty in-memory list and is surfaced
    /// as a warning; the session itself always comes up. A day with no
    /// usable anchors is seeded with a single midnight anchor and persisted
    /// immediately, so a day never renders with zero anchors.
    pub fn load(date: NaiveDate) -> LoadOutcome {
        let (stored, mut warning) = match store::load_day(date) {
            Ok(Some(stored)) => (stored, None),
            Ok(None) => (Vec::new(), None),
            Err(e) => (Vec::new(), Some(e)),
        };

        let mut anchors = parse_stored(&stored);
        anchors.sort_by_key(|a| a.time);
        let seeded = ensure_seeded(&mut anchors);

        let session = DaySession { date, anchors };
        if seeded {
            if let Err(e) = session.persist() {
                warning.get_or_insert(e);
            }
        }

        LoadOutcome { session, warning }
    }

    /// Build a session from already-parsed anchors, sorting them.
    #[cfg(test)]
    pub fn from_anchors(date: NaiveDate, mut anchors: Vec<Anchor>) -> DaySession {
        anchors.sort_by_key(|a| a.time);
        DaySession { date, anchors }
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Record a new anchor at `now` and persist the day.
    ///
    /// The in-memory list is updated before the disk write, so a failed
    /// save costs nothing but the warning returned to the caller.
    pub fn append(&mut self, label: &str, now: TimeOfDay) -> Result<(), StoreError> {
        let anchor = Anchor {
            time: now,
            label: normalize_label(label),
        };
        insert_sorted(&mut self.anchors, anchor);
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let stored: Vec<StoredAnchor> = self
            .anchors
            .iter()
            .map(|a| StoredAnchor {
                time: a.time.to_string(),
                label: a.label.clone(),
            })
            .collect();
        store::save_day(self.date, &stored)
    }
}

/// Blank or whitespace-only labels become the default; others are trimmed.
pub fn normalize_label(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        DEFAULT_LABEL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Seed an empty day with the single midnight anchor. Returns true when the
/// seed was added and needs persisting.
fn ensure_seeded(anchors: &mut Vec<Anchor>) -> bool {
    if anchors.is_empty() {
        anchors.push(Anchor::seed());
        true
    } else {
        false
    }
}

/// Insert keeping the list sorted; equal times land after existing entries
/// so render order follows insertion order.
fn insert_sorted(anchors: &mut Vec<Anchor>, anchor: Anchor) {
    let idx = anchors.partition_point(|a| a.time <= anchor.time);
    anchors.insert(idx, anchor);
}

/// Parse stored anchors, skipping entries whose time fails to parse.
fn parse_stored(stored: &[StoredAnchor]) -> Vec<Anchor> {
    stored
        .iter()
        .filter_map(|s| match TimeOfDay::parse(&s.time) {
            Ok(time) => Some(Anchor {
                time,
                label: s.label.clone(),
            }),
            Err(e) => {
                eprintln!("Skipping malformed anchor: {}", e);
                None
            }
        })
        .collect()
}
