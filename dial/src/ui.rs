//! UI module - egui input bar and settings window
//!
//! The input bar is the only way to create anchors: type a label, press
//! Enter, and a new event starts at the current second.

use nannou_egui::egui;

/// Height reserved at the bottom of the window for the input bar.
pub const INPUT_BAR_HEIGHT: f32 = 36.0;

/// State for the egui widgets
#[derive(Default)]
pub struct UiState {
    /// Text currently in the input bar
    pub input_text: String,
    /// Whether the settings window is showing
    pub settings_open: bool,
    /// Whether the input bar owns the keyboard this frame
    pub input_has_focus: bool,
}

/// Draw the bottom input bar. Returns the submitted label when the user
/// pressed Enter.
pub fn draw_input_bar(ctx: &egui::Context, state: &mut UiState) -> Option<String> {
    let mut submitted = None;

    egui::TopBottomPanel::bottom("input_bar")
        .exact_height(INPUT_BAR_HEIGHT)
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            let response = ui.add_sized(
                [ui.available_width(), 24.0],
                egui::TextEdit::singleline(&mut state.input_text).hint_text("event name..."),
            );
            state.input_has_focus = response.has_focus();

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submitted = Some(std::mem::take(&mut state.input_text));
                // Keep the bar ready for the next event
                response.request_focus();
            }
        });

    submitted
}

/// Draw the settings window when open. Returns true when a setting changed.
pub fn draw_settings_window(
    ctx: &egui::Context,
    open: &mut bool,
    reduced_motion: &mut bool,
) -> bool {
    if !*open {
        return false;
    }

    let mut changed = false;
    let mut keep_open = true;

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(false)
        .open(&mut keep_open)
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 40.0])
        .show(ctx, |ui| {
            if ui
                .checkbox(reduced_motion, "Reduced motion")
                .on_hover_text("Snap the second hand instead of sweeping. Keyboard: R")
                .changed()
            {
                changed = true;
            }
        });

    *open = keep_open;
    changed
}
