//! Hover resolver - maps a pointer position to the event under it
//!
//! Classifies the point against the ring bands, converts the angle back to
//! a time of day (outer ring shifts into the afternoon half), and bisects
//! the anchor list for the owning event. Points in the future or off the
//! rings resolve to nothing.

use nannou::prelude::*;
use shared::{TimeOfDay, HALF_DAY_SECS};

use crate::geometry::{RingGeometry, RingHit};
use crate::session::Anchor;
use crate::timeline::{self, Event};

/// The event under the pointer plus its tooltip rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo {
    pub event: Event,
}

impl HoverInfo {
    pub fn tooltip_text(&self) -> String {
        format!(
            "{} - {}\n{}",
            self.event.start, self.event.end, self.event.label
        )
    }
}

/// Resolve a pointer position to the event occupying that time, if any.
pub fn resolve(
    geom: &RingGeometry,
    anchors: &[Anchor],
    point: Point2,
    now: TimeOfDay,
) -> Option<HoverInfo> {
    let hit = geom.classify(point);
    let ring_offset = match hit {
        RingHit::Inner => 0,
        RingHit::Outer => HALF_DAY_SECS,
        RingHit::Face | RingHit::Outside => return None,
    };

    let angle = geom.angle_of(point);
    let target_seconds = (angle / 360.0 * HALF_DAY_SECS as f32) as u32 + ring_offset;

    timeline::event_at(anchors, target_seconds, now).map(|event| HoverInfo { event })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point_at;

    fn t(h: u32, m: u32, s: u32) -> TimeOfDay {
        TimeOfDay::new(h, m, s).unwrap()
    }

    fn anchor(h: u32, m: u32, s: u32, label: &str) -> Anchor {
        Anchor {
            time: t(h, m, s),
            label: label.to_string(),
        }
    }

    fn geom() -> RingGeometry {
        RingGeometry {
            window: Rect::from_w_h(300.0, 300.0),
            center: pt2(0.0, 0.0),
            dial_radius: 100.0,
            ring_width: 15.0,
        }
    }

    fn anchors() -> Vec<Anchor> {
        vec![anchor(0, 0, 0, "sleep"), anchor(6, 0, 0, "work")]
    }

    #[test]
    fn test_inner_ring_maps_to_morning() {
        let geom = geom();
        // 90 degrees on the inner ring = 03:00
        let point = point_at(geom.center, geom.inner_radius(), 90.0);
        let info = resolve(&geom, &anchors(), point, t(20, 0, 0)).unwrap();
        assert_eq!(info.event.label, "sleep");
    }

    #[test]
    fn test_outer_ring_maps_to_afternoon() {
        let geom = geom();
        // 180 degrees on the outer ring = 18:00
        let point = point_at(geom.center, geom.outer_radius(), 180.0);
        let info = resolve(&geom, &anchors(), point, t(20, 0, 0)).unwrap();
        assert_eq!(info.event.label, "work");
        assert_eq!(info.event.start, t(6, 0, 0));
    }

    #[test]
    fn test_future_point_resolves_to_none() {
        let geom = geom();
        // 18:00 on the outer ring, but it is only noon
        let point = point_at(geom.center, geom.outer_radius(), 180.0);
        assert!(resolve(&geom, &anchors(), point, TimeOfDay::NOON).is_none());
    }

    #[test]
    fn test_off_ring_points_resolve_to_none() {
        let geom = geom();
        let face = pt2(0.0, 10.0);
        let outside = pt2(0.0, geom.outer_band_outer() + 50.0);
        assert!(resolve(&geom, &anchors(), face, t(20, 0, 0)).is_none());
        assert!(resolve(&geom, &anchors(), outside, t(20, 0, 0)).is_none());
    }

    #[test]
    fn test_before_first_anchor_gets_placeholder() {
        let geom = geom();
        let late_start = vec![anchor(8, 0, 0, "first")];
        // 03:00 on the inner ring precedes the first anchor
        let point = point_at(geom.center, geom.inner_radius(), 90.0);
        let info = resolve(&geom, &late_start, point, t(20, 0, 0)).unwrap();
        assert_eq!(info.event.label, timeline::UNDEFINED_LABEL);
        assert_eq!(info.event.end, t(8, 0, 0));
    }

    #[test]
    fn test_tooltip_text_format() {
        let info = HoverInfo {
            event: Event {
                start: t(9, 0, 0),
                end: t(10, 30, 0),
                label: "review".to_string(),
                color_index: 2,
            },
        };
        assert_eq!(info.tooltip_text(), "09:00:00 - 10:30:00\nreview");
    }
}
