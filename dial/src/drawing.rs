//! Drawing module - dial face, arcs, hands, tooltip rendering
//!
//! Renders the dial visual elements using nannou's Draw API. Static content
//! comes in precomputed from the render cache; the live segment and hands
//! are computed fresh each frame.

use nannou::prelude::*;
use std::time::Instant;

use crate::cache::StaticScene;
use crate::geometry::{self, ArcSegment, HandAngles, RingGeometry};

/// A toast notification message
pub struct ToastMessage {
    pub text: String,
    pub created_at: Instant,
    pub duration_secs: f32,
}

impl ToastMessage {
    pub fn new(text: String) -> ToastMessage {
        ToastMessage {
            text,
            created_at: Instant::now(),
            duration_secs: 4.0,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs_f32() > self.duration_secs
    }
}

/// Color palette for the dial
pub mod colors {
    use nannou::prelude::*;

    const fn rgb8(red: u8, green: u8, blue: u8) -> Srgb<u8> {
        Srgb {
            red,
            green,
            blue,
            standard: std::marker::PhantomData,
        }
    }

    pub const BACKGROUND: Srgb<u8> = rgb8(240, 240, 240);
    pub const DIAL_FACE: Srgb<u8> = rgb8(255, 255, 224);
    pub const TICK: Srgb<u8> = rgb8(130, 130, 130);
    pub const HAND_DARK: Srgb<u8> = rgb8(20, 20, 20);
    pub const HAND_SECOND: Srgb<u8> = rgb8(255, 0, 0);
    pub const BUTTON: Srgb<u8> = rgb8(50, 50, 50);
    pub const TOOLTIP_BG: Srgb<u8> = rgb8(255, 255, 255);
    pub const TOOLTIP_BORDER: Srgb<u8> = rgb8(204, 204, 204);
    pub const TOOLTIP_TEXT: Srgb<u8> = rgb8(51, 51, 51);
    pub const TOAST_BG: Srgb<u8> = rgb8(60, 60, 60);
    pub const TOAST_TEXT: Srgb<u8> = rgb8(240, 240, 240);

    /// 20 event colors, assigned by anchor position and reused after 20.
    pub const EVENT_PALETTE: [Srgb<u8>; 20] = [
        rgb8(64, 222, 90),   // grass green
        rgb8(0, 193, 127),   // emerald
        rgb8(0, 179, 164),   // teal stone
        rgb8(0, 227, 201),   // pale jade
        rgb8(76, 187, 255),  // sky blue
        rgb8(106, 143, 255), // mint blue
        rgb8(155, 76, 255),  // soft violet
        rgb8(222, 26, 173),  // magenta
        rgb8(255, 76, 143),  // rose
        rgb8(247, 236, 181), // soft sand
        rgb8(228, 192, 126), // wheat
        rgb8(196, 154, 103), // warm camel
        rgb8(183, 139, 58),  // khaki
        rgb8(166, 92, 42),   // sepia
        rgb8(218, 58, 27),   // deep vermilion
        rgb8(255, 79, 0),    // vermilion
        rgb8(255, 140, 26),  // orange
        rgb8(255, 184, 0),   // amber
        rgb8(196, 211, 19),  // yellow green
        rgb8(153, 216, 75),  // lime
    ];

    pub fn event_color(color_index: usize) -> Srgb<u8> {
        EVENT_PALETTE[color_index % EVENT_PALETTE.len()]
    }
}

/// Draw the cached static layer: dial face, ticks, buttons, and every
/// completed arc segment.
pub fn draw_static(draw: &Draw, geom: &RingGeometry, scene: &StaticScene) {
    draw.ellipse()
        .xy(geom.center)
        .radius(geom.dial_radius)
        .color(colors::DIAL_FACE);

    for tick in &scene.ticks {
        draw.line()
            .start(tick.start)
            .end(tick.end)
            .color(colors::TICK)
            .weight(if tick.major { 2.0 } else { 1.0 });
    }

    for (start, end) in &scene.button_strokes {
        draw.line()
            .start(*start)
            .end(*end)
            .color(colors::BUTTON)
            .weight(2.0);
    }

    for segment in &scene.segments {
        draw_arc_segment(draw, geom, segment);
    }
}

/// Draw one arc segment as a thick polyline on its ring's centerline.
pub fn draw_arc_segment(draw: &Draw, geom: &RingGeometry, segment: &ArcSegment) {
    if segment.span_angle <= 0.0 {
        return;
    }
    let radius = geom.ring_radius(segment.ring);
    let points = geometry::arc_points(geom.center, radius, segment.start_angle, segment.span_angle);
    draw.polyline()
        .weight(geom.ring_width)
        .color(colors::event_color(segment.color_index))
        .points(points);
}

/// Draw the three clock hands and the hub.
pub fn draw_hands(draw: &Draw, geom: &RingGeometry, hands: &HandAngles) {
    draw_hand(
        draw,
        geom,
        hands.hour_deg,
        geom.dial_radius * 0.6,
        4.0,
        colors::HAND_DARK,
    );
    draw_hand(
        draw,
        geom,
        hands.minute_deg,
        geom.dial_radius * 0.8,
        2.0,
        colors::HAND_DARK,
    );
    draw_hand(
        draw,
        geom,
        hands.second_deg,
        geom.dial_radius * 0.9,
        1.0,
        colors::HAND_SECOND,
    );

    draw.ellipse()
        .xy(geom.center)
        .radius(3.0)
        .color(colors::HAND_DARK);
}

fn draw_hand(
    draw: &Draw,
    geom: &RingGeometry,
    angle_deg: f32,
    length: f32,
    weight: f32,
    color: Srgb<u8>,
) {
    let end = geometry::point_at(geom.center, length, angle_deg);
    draw.line()
        .start(geom.center)
        .end(end)
        .color(color)
        .weight(weight);
}

/// Draw the hover tooltip near the pointer.
pub fn draw_tooltip(draw: &Draw, text: &str, pointer: Point2) {
    let width = 150.0;
    let height = 40.0;
    let pos = pointer + vec2(15.0 + width / 2.0, 15.0 + height / 2.0);

    draw.rect()
        .xy(pos)
        .w_h(width, height)
        .color(colors::TOOLTIP_BG)
        .stroke(colors::TOOLTIP_BORDER)
        .stroke_weight(1.0);

    draw.text(text)
        .xy(pos)
        .color(colors::TOOLTIP_TEXT)
        .font_size(12)
        .w(width - 12.0);
}

/// Draw toast notifications stacked up from the bottom-right corner.
pub fn draw_toasts(draw: &Draw, toasts: &[ToastMessage], window_rect: Rect) {
    let toast_width = 240.0;
    let toast_height = 32.0;
    let margin = 12.0;

    for (i, toast) in toasts.iter().enumerate() {
        let elapsed = toast.created_at.elapsed().as_secs_f32();
        let progress = elapsed / toast.duration_secs;

        // Fade out over the last fifth of the lifetime
        let alpha = if progress > 0.8 {
            ((1.0 - progress) / 0.2 * 255.0).clamp(0.0, 255.0) as u8
        } else {
            255u8
        };

        let y_offset = i as f32 * (toast_height + margin);
        let pos = pt2(
            window_rect.right() - toast_width / 2.0 - margin,
            window_rect.bottom() + toast_height / 2.0 + margin + y_offset,
        );

        draw.rect().xy(pos).w_h(toast_width, toast_height).color(srgba(
            colors::TOAST_BG.red,
            colors::TOAST_BG.green,
            colors::TOAST_BG.blue,
            alpha,
        ));

        draw.text(&toast.text)
            .xy(pos)
            .color(srgba(
                colors::TOAST_TEXT.red,
                colors::TOAST_TEXT.green,
                colors::TOAST_TEXT.blue,
                alpha,
            ))
            .font_size(12)
            .w(toast_width - 16.0);
    }
}

#[cfg(test)]
mod tests {
    use super::colors;

    #[test]
    fn test_palette_has_twenty_entries() {
        assert_eq!(colors::EVENT_PALETTE.len(), 20);
    }

    #[test]
    fn test_event_color_wraps() {
        assert_eq!(colors::event_color(0), colors::EVENT_PALETTE[0]);
        assert_eq!(colors::event_color(20), colors::EVENT_PALETTE[0]);
        assert_eq!(colors::event_color(23), colors::EVENT_PALETTE[3]);
    }
}
