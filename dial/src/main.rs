//! Timetable Dial
//!
//! A day of labeled time intervals on a dual-ring 24-hour clock face:
//! the inner ring is the morning, the outer ring the afternoon. Typing a
//! label starts a new event at the current second; hovering over a ring
//! shows which event owned that moment.

mod cache;
mod drawing;
mod geometry;
mod hover;
mod schedule;
mod session;
mod timeline;
mod ui;

use std::time::{Duration, Instant};

use nannou::prelude::*;
use nannou_egui::{self, Egui};
use serde::{Deserialize, Serialize};
use shared::{sample_clock, TickData};

use crate::cache::RenderCache;
use crate::drawing::{colors, ToastMessage};
use crate::geometry::{ButtonLayout, RingGeometry, RingHit};
use crate::hover::HoverInfo;
use crate::schedule::Periodic;
use crate::session::{DaySession, LoadOutcome};
use crate::timeline::Event;

fn main() {
    nannou::app(model).update(update).run();
}

/// Persisted configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    reduced_motion: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reduced_motion: false,
        }
    }
}

/// Application state
struct Model {
    /// Anchor store for the loaded day
    session: DaySession,
    /// Derived event list, refreshed once per second
    events: Vec<Event>,
    /// Latest clock sample
    tick: TickData,
    /// Seconds-since-midnight of the last event derivation
    last_tick_secs: Option<u32>,

    /// Resize-derived dial layout
    geometry: RingGeometry,
    /// Static-scene cache
    cache: RenderCache,

    /// Active hover result, if any
    hover: Option<HoverInfo>,
    /// Last pointer position inside the window
    last_mouse: Option<Point2>,
    /// Pointer moved since the last hover resolution
    hover_dirty: bool,

    /// Scheduled tasks
    rollover_check: Periodic,
    hover_throttle: Periodic,
    hover_watchdog: Periodic,

    /// Persisted settings
    config: Config,
    /// egui widget state
    ui: ui::UiState,
    /// Transient warnings
    toasts: Vec<ToastMessage>,

    /// egui integration
    egui: Egui,
}

impl Model {
    fn show_toast(&mut self, message: String) {
        self.toasts.push(ToastMessage::new(message));
    }

    fn prune_toasts(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    /// Record a new anchor at the current second. The event list and the
    /// static scene are stale afterwards whether or not the save worked.
    fn append_anchor(&mut self, label: &str) {
        if let Err(e) = self.session.append(label, self.tick.time) {
            eprintln!("Failed to save day file: {}", e);
            self.show_toast(format!("Save failed: {}", e));
        }
        self.events = timeline::derive_events(self.session.anchors(), self.tick.time);
        self.cache.invalidate();
    }

    /// Switch to a new day. Idempotence lives in the caller's date check.
    fn reload_session(&mut self, date: chrono::NaiveDate) {
        let LoadOutcome { session, warning } = DaySession::load(date);
        self.session = session;
        if let Some(e) = warning {
            eprintln!("Failed to load day file: {}", e);
            self.show_toast(format!("Load failed: {}", e));
        }
        self.events = timeline::derive_events(self.session.anchors(), self.tick.time);
        self.last_tick_secs = Some(self.tick.time.seconds());
        self.cache.invalidate();
        self.hover = None;
    }

    fn save_config(&self) {
        if let Err(e) = shared::save_config(&self.config) {
            eprintln!("Failed to save config: {}", e);
        }
    }
}

fn model(app: &App) -> Model {
    app.set_exit_on_escape(false);

    let window_id = app
        .new_window()
        .title("Timetable Dial")
        .size(320, 360)
        .min_size(240, 280)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_moved(mouse_moved)
        .mouse_exited(mouse_exited)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let config: Config = shared::load_config().ok().flatten().unwrap_or_default();

    let tick = sample_clock();
    let LoadOutcome { session, warning } = DaySession::load(tick.date);
    let mut toasts = Vec::new();
    if let Some(e) = warning {
        eprintln!("Failed to load day file: {}", e);
        toasts.push(ToastMessage::new(format!("Load failed: {}", e)));
    }

    let events = timeline::derive_events(session.anchors(), tick.time);
    let geometry = RingGeometry::compute(app.window_rect(), ui::INPUT_BAR_HEIGHT);

    Model {
        session,
        events,
        tick,
        last_tick_secs: Some(tick.time.seconds()),
        geometry,
        cache: RenderCache::new(),
        hover: None,
        last_mouse: None,
        hover_dirty: false,
        rollover_check: Periodic::new(Duration::from_secs(60)),
        hover_throttle: Periodic::new(Duration::from_millis(50)),
        hover_watchdog: Periodic::new(Duration::from_millis(200)),
        config,
        ui: ui::UiState::default(),
        toasts,
        egui,
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    let tick = sample_clock();
    let frame_now = Instant::now();
    model.tick = tick;

    // Day rollover on a coarse timer; a no-op while the date is unchanged
    if model.rollover_check.due(frame_now) && tick.date != model.session.date {
        model.reload_session(tick.date);
    }

    // 1 Hz tick: the live event's end tracks the clock, so the event list
    // is rederived when the second changes
    let secs = tick.time.seconds();
    if model.last_tick_secs != Some(secs) {
        model.last_tick_secs = Some(secs);
        model.events = timeline::derive_events(model.session.anchors(), tick.time);
    }

    // Geometry follows the window; a change invalidates the static scene
    let geometry = RingGeometry::compute(app.window_rect(), ui::INPUT_BAR_HEIGHT);
    if geometry != model.geometry {
        model.geometry = geometry;
        model.cache.invalidate();
    }

    // Rebuild the static scene only if something invalidated it
    let historical = timeline::historical_events(&model.events);
    model.cache.ensure_fresh(&model.geometry, historical, tick.time);

    // egui frame: input bar and settings
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();
    let submitted = ui::draw_input_bar(&ctx, &mut model.ui);
    let settings_changed = ui::draw_settings_window(
        &ctx,
        &mut model.ui.settings_open,
        &mut model.config.reduced_motion,
    );
    drop(ctx);

    if let Some(label) = submitted {
        model.append_anchor(&label);
    }
    if settings_changed {
        model.save_config();
    }

    // Throttled hover resolution, plus a watchdog that clears a tooltip
    // left behind when the pointer drifted off the rings
    if model.hover_dirty && model.hover_throttle.due(frame_now) {
        model.hover_dirty = false;
        model.hover = model.last_mouse.and_then(|pos| {
            hover::resolve(&model.geometry, model.session.anchors(), pos, tick.time)
        });
    }
    if model.hover_watchdog.due(frame_now) {
        if let Some(pos) = model.last_mouse {
            if !matches!(
                model.geometry.classify(pos),
                RingHit::Inner | RingHit::Outer
            ) {
                model.hover = None;
            }
        }
    }

    model.prune_toasts();
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(colors::BACKGROUND);

    // Cached historical layer
    drawing::draw_static(&draw, &model.geometry, model.cache.scene());

    // Live layer: the in-progress event and the hands, fresh every frame
    if let Some(live) = model.events.last() {
        for segment in geometry::segments_for(live) {
            drawing::draw_arc_segment(&draw, &model.geometry, &segment);
        }
    }
    let hands = geometry::hand_angles(
        model.tick.time,
        model.tick.second_fraction,
        model.config.reduced_motion,
    );
    drawing::draw_hands(&draw, &model.geometry, &hands);

    if let (Some(info), Some(pos)) = (&model.hover, model.last_mouse) {
        drawing::draw_tooltip(&draw, &info.tooltip_text(), pos);
    }

    drawing::draw_toasts(&draw, &model.toasts, app.window_rect());

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // R toggles reduced motion, unless the input bar is typing
        Key::R if !model.ui.input_has_focus => {
            model.config.reduced_motion = !model.config.reduced_motion;
            model.save_config();
        }
        Key::Escape => {
            model.ui.settings_open = false;
        }
        _ => {}
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    let pos = app.mouse.position();
    let buttons = ButtonLayout::compute(model.geometry.window);
    if buttons.close.contains(pos) {
        app.quit();
    } else if buttons.menu.contains(pos) {
        model.ui.settings_open = !model.ui.settings_open;
    }
}

fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.last_mouse = Some(pos);
    model.hover_dirty = true;
}

fn mouse_exited(_app: &App, model: &mut Model) {
    model.last_mouse = None;
    model.hover = None;
    model.hover_dirty = false;
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
