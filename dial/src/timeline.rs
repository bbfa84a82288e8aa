//! Timeline derivation - anchors to events
//!
//! Events are the gaps between consecutive anchors: each event runs from its
//! anchor to the next anchor, and the last runs to "now". Pure functions of
//! the anchor list and a clock sample, recomputed every tick because the
//! final event's end tracks the clock.

use shared::TimeOfDay;

use crate::session::Anchor;

/// Number of distinct event colors before reuse starts.
pub const PALETTE_SIZE: usize = 20;

/// Label reported for the span before the first anchor of the day.
pub const UNDEFINED_LABEL: &str = "undefined";

/// A derived start/end/label/color interval. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub label: String,
    pub color_index: usize,
}

/// Derive the full event list for the day.
///
/// The last event ends at `now`; if the clock reads earlier than the last
/// anchor (clock skew), it is clamped to zero length rather than producing
/// a reversed arc.
pub fn derive_events(anchors: &[Anchor], now: TimeOfDay) -> Vec<Event> {
    anchors
        .iter()
        .enumerate()
        .map(|(i, _)| build_event(anchors, i, now))
        .collect()
}

/// All events except the in-progress final one.
pub fn historical_events(events: &[Event]) -> &[Event] {
    &events[..events.len().saturating_sub(1)]
}

/// Look up the event active at `target_seconds` since midnight.
///
/// Returns `None` for times after `now` - the dial never reports on events
/// that have not happened yet. Times before the first anchor map to a
/// synthetic placeholder spanning midnight to the first anchor, since the
/// dial always shows from midnight.
pub fn event_at(anchors: &[Anchor], target_seconds: u32, now: TimeOfDay) -> Option<Event> {
    let first = anchors.first()?;
    if target_seconds > now.seconds() {
        return None;
    }
    if target_seconds < first.time.seconds() {
        return Some(Event {
            start: TimeOfDay::MIDNIGHT,
            end: first.time,
            label: UNDEFINED_LABEL.to_string(),
            color_index: 0,
        });
    }
    let idx = anchors.partition_point(|a| a.time.seconds() <= target_seconds) - 1;
    Some(build_event(anchors, idx, now))
}

fn build_event(anchors: &[Anchor], idx: usize, now: TimeOfDay) -> Event {
    let anchor = &anchors[idx];
    let end = match anchors.get(idx + 1) {
        Some(next) => next.time,
        None => now.max(anchor.time),
    };
    Event {
        start: anchor.time,
        end,
        label: anchor.label.clone(),
        color_index: idx % PALETTE_SIZE,
    }
}
