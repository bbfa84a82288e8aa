//! Render cache - the static scene, rebuilt only on invalidation
//!
//! The historical portion of the dial (face ticks, corner buttons, and every
//! completed arc segment) only changes when an anchor is added, the day
//! rolls over, or the window resizes. Its geometry is cached here and
//! replayed each frame; the live segment and the hands are recomputed every
//! tick without touching the cache.

use shared::TimeOfDay;

use crate::geometry::{self, ArcSegment, ButtonLayout, RingGeometry, TickMark};
use crate::timeline::Event;

use nannou::prelude::*;

/// Everything the static layer needs to draw, precomputed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticScene {
    pub ticks: Vec<TickMark>,
    pub button_strokes: Vec<(Point2, Point2)>,
    pub segments: Vec<ArcSegment>,
}

#[derive(Debug, Default)]
pub struct RenderCache {
    scene: StaticScene,
    valid: bool,
    rebuilds: u32,
}

impl RenderCache {
    pub fn new() -> RenderCache {
        RenderCache::default()
    }

    /// Mark the scene stale. Called on: new anchor, day change, resize.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    #[allow(dead_code)]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// How many times the scene has been rebuilt; the idempotence tests
    /// watch this to prove a valid cache is returned untouched.
    #[allow(dead_code)]
    pub fn rebuild_count(&self) -> u32 {
        self.rebuilds
    }

    /// Return the cached scene, rebuilding it first if anything invalidated
    /// it since the last call. Only events completed by `now` are included;
    /// the in-progress event is the live layer's responsibility.
    pub fn ensure_fresh(
        &mut self,
        geom: &RingGeometry,
        historical: &[Event],
        now: TimeOfDay,
    ) -> &StaticScene {
        if !self.valid {
            self.scene = build_scene(geom, historical, now);
            self.valid = true;
            self.rebuilds += 1;
        }
        &self.scene
    }

    pub fn scene(&self) -> &StaticScene {
        &self.scene
    }
}

fn build_scene(geom: &RingGeometry, historical: &[Event], now: TimeOfDay) -> StaticScene {
    let segments = historical
        .iter()
        .filter(|e| e.end <= now)
        .flat_map(geometry::segments_for)
        .collect();
    StaticScene {
        ticks: geom.tick_marks(),
        button_strokes: ButtonLayout::compute(geom.window).strokes(),
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> TimeOfDay {
        TimeOfDay::new(h, m, s).unwrap()
    }

    fn event(start: TimeOfDay, end: TimeOfDay, color_index: usize) -> Event {
        Event {
            start,
            end,
            label: "test".to_string(),
            color_index,
        }
    }

    fn geom() -> RingGeometry {
        RingGeometry::compute(Rect::from_w_h(320.0, 360.0), 36.0)
    }

    #[test]
    fn test_ensure_fresh_is_idempotent() {
        let geom = geom();
        let events = vec![
            event(t(0, 0, 0), t(9, 0, 0), 0),
            event(t(9, 0, 0), t(13, 0, 0), 1),
        ];
        let now = t(15, 0, 0);

        let mut cache = RenderCache::new();
        let first = cache.ensure_fresh(&geom, &events, now).clone();
        let second = cache.ensure_fresh(&geom, &events, now).clone();

        assert_eq!(first, second);
        assert_eq!(cache.rebuild_count(), 1);
    }

    #[test]
    fn test_invalidate_triggers_rebuild() {
        let geom = geom();
        let events = vec![event(t(0, 0, 0), t(9, 0, 0), 0)];
        let now = t(10, 0, 0);

        let mut cache = RenderCache::new();
        cache.ensure_fresh(&geom, &events, now);
        assert!(cache.is_valid());

        cache.invalidate();
        assert!(!cache.is_valid());
        cache.ensure_fresh(&geom, &events, now);
        assert_eq!(cache.rebuild_count(), 2);
    }

    #[test]
    fn test_scene_splits_straddling_events() {
        let geom = geom();
        // 9-13 straddles noon, so the scene carries three arcs for two events
        let events = vec![
            event(t(0, 0, 0), t(9, 0, 0), 0),
            event(t(9, 0, 0), t(13, 0, 0), 1),
        ];
        let mut cache = RenderCache::new();
        let scene = cache.ensure_fresh(&geom, &events, t(15, 0, 0));
        assert_eq!(scene.segments.len(), 3);
        assert_eq!(scene.ticks.len(), 60);
        assert!(!scene.button_strokes.is_empty());
    }

    #[test]
    fn test_scene_excludes_unfinished_events() {
        let geom = geom();
        // An end past "now" only happens under clock skew; it must not be
        // drawn as historical
        let events = vec![
            event(t(0, 0, 0), t(9, 0, 0), 0),
            event(t(9, 0, 0), t(11, 0, 0), 1),
        ];
        let mut cache = RenderCache::new();
        let scene = cache.ensure_fresh(&geom, &events, t(10, 0, 0));
        assert_eq!(scene.segments.len(), 1);
    }
}
