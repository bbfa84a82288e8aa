//! Ring geometry engine
//!
//! One `RingGeometry` value, recomputed per resize, is the single source of
//! truth for every angle/radius conversion: the static renderer, the live
//! compositor, and the hover hit test all read the same radii, so what is
//! drawn and what is hit-tested never drift apart.
//!
//! Angle convention: 0 degrees at the 12 o'clock position, increasing
//! clockwise; one full ring is 12 hours (43 200 seconds).

use nannou::prelude::*;
use shared::{TimeOfDay, HALF_DAY_SECS};

use crate::timeline::Event;

/// Dial radius as a fraction of the smaller usable window dimension.
const DIAL_RADIUS_RATIO: f32 = 0.35;
/// Ring stroke width as a fraction of the dial radius.
const RING_WIDTH_RATIO: f32 = 0.15;
/// Floor for degenerate window sizes.
const MIN_DIAL_RADIUS: f32 = 8.0;
/// Slack in pixels on the hit-test boundaries.
const HIT_TOLERANCE: f32 = 5.0;
/// Inner-ring arcs stop this many seconds short of noon so a split event
/// never collapses into a single full-looking ring.
pub const NOON_TRIM_SECS: u32 = 1;

/// Which of the two 12-hour rings an arc lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ring {
    /// 00:00-12:00
    Inner,
    /// 12:00-24:00
    Outer,
}

/// The drawable (ring, start-angle, span-angle, color) tuple for one arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub ring: Ring,
    /// Degrees in [0, 360)
    pub start_angle: f32,
    /// Degrees in (0, 360]; zero means "draw nothing"
    pub span_angle: f32,
    pub color_index: usize,
}

/// Result of classifying a pointer position against the rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingHit {
    /// Beyond the outer ring
    Outside,
    /// Inside the dial face
    Face,
    Inner,
    Outer,
}

/// Resize-derived layout for the dial and both rings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub window: Rect,
    pub center: Point2,
    pub dial_radius: f32,
    pub ring_width: f32,
}

impl RingGeometry {
    /// Compute the layout for a window, leaving room for the input bar at
    /// the bottom. Degenerate sizes clamp to a minimum radius instead of
    /// collapsing to zero.
    pub fn compute(window: Rect, input_bar_height: f32) -> RingGeometry {
        let usable_h = (window.h() - input_bar_height).max(0.0);
        let center = pt2(window.x(), window.y() + input_bar_height / 2.0);
        let dial_radius = (window.w().min(usable_h) * DIAL_RADIUS_RATIO).max(MIN_DIAL_RADIUS);
        RingGeometry {
            window,
            center,
            dial_radius,
            ring_width: dial_radius * RING_WIDTH_RATIO,
        }
    }

    /// Centerline radius of the inner (AM) ring.
    pub fn inner_radius(&self) -> f32 {
        self.dial_radius + self.ring_width / 2.0
    }

    /// Centerline radius of the outer (PM) ring.
    pub fn outer_radius(&self) -> f32 {
        self.inner_radius() + self.ring_width
    }

    /// Outer edge of the inner ring's stroke.
    pub fn inner_band_outer(&self) -> f32 {
        self.inner_radius() + self.ring_width / 2.0
    }

    /// Outer edge of the outer ring's stroke.
    pub fn outer_band_outer(&self) -> f32 {
        self.outer_radius() + self.ring_width / 2.0
    }

    /// Centerline radius for a given ring.
    pub fn ring_radius(&self, ring: Ring) -> f32 {
        match ring {
            Ring::Inner => self.inner_radius(),
            Ring::Outer => self.outer_radius(),
        }
    }

    /// Classify a point against the rings, with a few pixels of slack on
    /// the outermost and innermost boundaries.
    pub fn classify(&self, point: Point2) -> RingHit {
        let d = point.distance(self.center);
        if d < self.dial_radius - HIT_TOLERANCE {
            RingHit::Face
        } else if d <= self.inner_band_outer() {
            RingHit::Inner
        } else if d <= self.outer_band_outer() + HIT_TOLERANCE {
            RingHit::Outer
        } else {
            RingHit::Outside
        }
    }

    /// Angle of a point in dial convention: 0 at 12 o'clock, clockwise.
    pub fn angle_of(&self, point: Point2) -> f32 {
        let d = point - self.center;
        d.x.atan2(d.y).to_degrees().rem_euclid(360.0)
    }

    /// Tick marks around the dial face, majors every five minutes.
    pub fn tick_marks(&self) -> Vec<TickMark> {
        (0..60)
            .map(|i| {
                let angle = i as f32 * 6.0;
                let major = i % 5 == 0;
                let len = if major {
                    self.dial_radius * 0.17
                } else {
                    self.dial_radius * 0.09
                };
                TickMark {
                    start: point_at(self.center, self.dial_radius - len, angle),
                    end: point_at(self.center, self.dial_radius, angle),
                    major,
                }
            })
            .collect()
    }
}

/// One tick line on the dial face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    pub start: Point2,
    pub end: Point2,
    pub major: bool,
}

/// Corner buttons, computed from the window so drawing and hit-testing
/// agree. The menu button toggles the settings window, X quits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonLayout {
    pub close: Rect,
    pub menu: Rect,
}

impl ButtonLayout {
    pub fn compute(window: Rect) -> ButtonLayout {
        let button_size = window.w() * 0.07;
        let margin = window.w() * 0.03;

        let close_size = button_size * 0.7;
        let close = Rect::from_x_y_w_h(
            window.right() - margin - close_size / 2.0,
            window.top() - margin - close_size / 2.0,
            close_size,
            close_size,
        );

        let menu_size = button_size * 1.3;
        let menu = Rect::from_x_y_w_h(
            close.left() - 5.0 - menu_size / 2.0,
            window.top() - margin - menu_size / 2.0,
            menu_size,
            menu_size,
        );

        ButtonLayout { close, menu }
    }

    /// Glyph strokes: an X for close, three bars for the menu.
    pub fn strokes(&self) -> Vec<(Point2, Point2)> {
        let c = self.close;
        let m = self.menu;
        let inset = m.w() * 0.25;
        let mut strokes = vec![
            (pt2(c.left(), c.top()), pt2(c.right(), c.bottom())),
            (pt2(c.left(), c.bottom()), pt2(c.right(), c.top())),
        ];
        for i in 0..3 {
            let y = m.top() - m.h() * (0.3 + 0.2 * i as f32);
            strokes.push((pt2(m.left() + inset, y), pt2(m.right() - inset, y)));
        }
        strokes
    }
}

/// Map seconds-within-half-day to a ring angle in degrees.
pub fn seconds_to_angle(secs: u32) -> f32 {
    (secs % HALF_DAY_SECS) as f32 / HALF_DAY_SECS as f32 * 360.0
}

/// Point at `angle_deg` (dial convention) and `radius` from `center`.
pub fn point_at(center: Point2, radius: f32, angle_deg: f32) -> Point2 {
    let rad = angle_deg.to_radians();
    center + vec2(rad.sin(), rad.cos()) * radius
}

/// Sample an arc into polyline points, ~3 degrees per step.
pub fn arc_points(center: Point2, radius: f32, start_angle: f32, span_angle: f32) -> Vec<Point2> {
    let steps = ((span_angle / 3.0).ceil() as usize).max(1);
    (0..=steps)
        .map(|i| {
            let angle = start_angle + span_angle * i as f32 / steps as f32;
            point_at(center, radius, angle)
        })
        .collect()
}

/// Split an event into its arc segments: one per ring, two when it
/// straddles noon. The inner part of a split stops one second before noon.
pub fn segments_for(event: &Event) -> Vec<ArcSegment> {
    let noon = TimeOfDay::NOON;
    let mut segments = Vec::with_capacity(2);

    if event.start < noon && event.end > noon {
        segments.push(arc_segment(
            Ring::Inner,
            event.start.seconds(),
            noon.seconds() - NOON_TRIM_SECS,
            event.color_index,
        ));
        segments.push(arc_segment(
            Ring::Outer,
            noon.seconds(),
            event.end.seconds(),
            event.color_index,
        ));
    } else if event.start >= noon {
        segments.push(arc_segment(
            Ring::Outer,
            event.start.seconds(),
            event.end.seconds(),
            event.color_index,
        ));
    } else {
        segments.push(arc_segment(
            Ring::Inner,
            event.start.seconds(),
            event.end.seconds(),
            event.color_index,
        ));
    }

    segments
}

fn arc_segment(ring: Ring, start_secs: u32, end_secs: u32, color_index: usize) -> ArcSegment {
    let start_angle = seconds_to_angle(start_secs);
    let end_angle = seconds_to_angle(end_secs);
    let mut span_angle = (end_angle - start_angle).rem_euclid(360.0);
    // A zero modulo with distinct endpoints is a full 12-hour wrap, not an
    // empty arc
    if span_angle == 0.0 && start_secs != end_secs {
        span_angle = 360.0;
    }
    ArcSegment {
        ring,
        start_angle,
        span_angle,
        color_index,
    }
}

/// Clock-hand angles in dial convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour_deg: f32,
    pub minute_deg: f32,
    pub second_deg: f32,
}

/// Hand angles for a clock sample. The second hand sweeps smoothly unless
/// reduced motion snaps it to whole seconds.
pub fn hand_angles(time: TimeOfDay, second_fraction: f64, reduced_motion: bool) -> HandAngles {
    let second = if reduced_motion {
        time.second as f32
    } else {
        time.second as f32 + second_fraction as f32
    };
    HandAngles {
        hour_deg: ((time.hour % 12) as f32 + time.minute as f32 / 60.0) * 30.0,
        minute_deg: (time.minute as f32 + time.second as f32 / 60.0) * 6.0,
        second_deg: second * 6.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> TimeOfDay {
        TimeOfDay::new(h, m, s).unwrap()
    }

    fn event(start: TimeOfDay, end: TimeOfDay) -> Event {
        Event {
            start,
            end,
            label: "test".to_string(),
            color_index: 3,
        }
    }

    fn test_geometry() -> RingGeometry {
        RingGeometry {
            window: Rect::from_w_h(300.0, 300.0),
            center: pt2(0.0, 0.0),
            dial_radius: 100.0,
            ring_width: 15.0,
        }
    }

    #[test]
    fn test_compute_clamps_degenerate_window() {
        let geom = RingGeometry::compute(Rect::from_w_h(0.0, 0.0), 36.0);
        assert!(geom.dial_radius >= MIN_DIAL_RADIUS);
        assert!(geom.ring_width > 0.0);
    }

    #[test]
    fn test_radii_are_consistent() {
        let geom = test_geometry();
        assert_eq!(geom.inner_radius(), 107.5);
        assert_eq!(geom.outer_radius(), 122.5);
        assert_eq!(geom.inner_band_outer(), 115.0);
        assert_eq!(geom.outer_band_outer(), 130.0);
    }

    #[test]
    fn test_seconds_to_angle() {
        assert_eq!(seconds_to_angle(0), 0.0);
        assert_eq!(seconds_to_angle(21_600), 180.0); // 06:00 on the ring
        assert_eq!(seconds_to_angle(43_200), 0.0); // noon wraps
        assert_eq!(seconds_to_angle(64_800), 180.0); // 18:00, same position
    }

    #[test]
    fn test_angle_of_cardinal_points() {
        let geom = test_geometry();
        assert!((geom.angle_of(pt2(0.0, 10.0)) - 0.0).abs() < 1e-4);
        assert!((geom.angle_of(pt2(10.0, 0.0)) - 90.0).abs() < 1e-4);
        assert!((geom.angle_of(pt2(0.0, -10.0)) - 180.0).abs() < 1e-4);
        assert!((geom.angle_of(pt2(-10.0, 0.0)) - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_point_at_round_trips_through_angle_of() {
        let geom = test_geometry();
        for deg in [0.0_f32, 45.0, 123.4, 270.0, 359.0] {
            let p = point_at(geom.center, geom.inner_radius(), deg);
            assert!((geom.angle_of(p) - deg).abs() < 1e-3);
        }
    }

    #[test]
    fn test_morning_event_is_one_inner_segment() {
        let segments = segments_for(&event(t(8, 0, 0), t(9, 30, 0)));
        assert_eq!(segments.len(), 1);
        let seg = segments[0];
        assert_eq!(seg.ring, Ring::Inner);
        assert!((seg.start_angle - 240.0).abs() < 1e-4);
        assert!((seg.span_angle - 45.0).abs() < 1e-4); // 1.5h of a 12h ring
        assert_eq!(seg.color_index, 3);
    }

    #[test]
    fn test_afternoon_event_is_one_outer_segment() {
        let segments = segments_for(&event(t(13, 0, 0), t(14, 0, 0)));
        assert_eq!(segments.len(), 1);
        let seg = segments[0];
        assert_eq!(seg.ring, Ring::Outer);
        assert!((seg.start_angle - 30.0).abs() < 1e-4);
        assert!((seg.span_angle - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_noon_straddle_splits_across_rings() {
        let segments = segments_for(&event(t(11, 0, 0), t(13, 0, 0)));
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].ring, Ring::Inner);
        assert_eq!(segments[1].ring, Ring::Outer);

        let duration_angle = seconds_to_angle(2 * 3600);
        let trim_angle = NOON_TRIM_SECS as f32 / HALF_DAY_SECS as f32 * 360.0;
        let total = segments[0].span_angle + segments[1].span_angle;
        assert!((total - (duration_angle - trim_angle)).abs() < 1e-3);
    }

    #[test]
    fn test_full_ring_wrap_is_360_not_zero() {
        // Exactly 12:00:00 to midnight: the whole outer ring
        let segments = segments_for(&event(t(12, 0, 0), TimeOfDay::MIDNIGHT));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].ring, Ring::Outer);
        assert_eq!(segments[0].span_angle, 360.0);

        // Midnight to noon: the whole inner ring
        let segments = segments_for(&event(TimeOfDay::MIDNIGHT, TimeOfDay::NOON));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].ring, Ring::Inner);
        assert_eq!(segments[0].span_angle, 360.0);
    }

    #[test]
    fn test_zero_length_event_has_zero_span() {
        let segments = segments_for(&event(t(10, 0, 0), t(10, 0, 0)));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].span_angle, 0.0);
    }

    #[test]
    fn test_classify_bands() {
        let geom = test_geometry();
        assert_eq!(geom.classify(pt2(0.0, 50.0)), RingHit::Face);
        assert_eq!(geom.classify(pt2(0.0, 96.0)), RingHit::Inner); // tolerance
        assert_eq!(geom.classify(pt2(0.0, 110.0)), RingHit::Inner);
        assert_eq!(geom.classify(pt2(0.0, 120.0)), RingHit::Outer);
        assert_eq!(geom.classify(pt2(0.0, 133.0)), RingHit::Outer); // tolerance
        assert_eq!(geom.classify(pt2(0.0, 140.0)), RingHit::Outside);
    }

    #[test]
    fn test_tick_marks() {
        let geom = test_geometry();
        let ticks = geom.tick_marks();
        assert_eq!(ticks.len(), 60);
        assert_eq!(ticks.iter().filter(|t| t.major).count(), 12);
        // Every tick's outer end sits on the dial edge
        for tick in &ticks {
            assert!((tick.end.distance(geom.center) - geom.dial_radius).abs() < 1e-3);
        }
    }

    #[test]
    fn test_hand_angles() {
        let hands = hand_angles(t(15, 30, 0), 0.0, true);
        assert!((hands.hour_deg - 105.0).abs() < 1e-4);
        assert!((hands.minute_deg - 180.0).abs() < 1e-4);
        assert!((hands.second_deg - 0.0).abs() < 1e-4);

        // Smooth sweep advances the second hand between ticks
        let smooth = hand_angles(t(15, 30, 0), 0.5, false);
        assert!((smooth.second_deg - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_arc_points_span_endpoints() {
        let center = pt2(0.0, 0.0);
        let points = arc_points(center, 100.0, 240.0, 45.0);
        assert!(points.len() >= 2);
        let first = *points.first().unwrap();
        let last = *points.last().unwrap();
        assert!(first.distance(point_at(center, 100.0, 240.0)) < 1e-3);
        assert!(last.distance(point_at(center, 100.0, 285.0)) < 1e-3);
    }

    #[test]
    fn test_button_layout_inside_window() {
        let window = Rect::from_w_h(320.0, 360.0);
        let buttons = ButtonLayout::compute(window);
        assert!(buttons.close.right() <= window.right());
        assert!(buttons.close.top() <= window.top());
        assert!(buttons.menu.right() < buttons.close.left());
        assert!(!buttons.strokes().is_empty());
    }
}
