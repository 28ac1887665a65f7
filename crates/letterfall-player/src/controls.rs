//! On-screen controls
//!
//! A text field with a "Drop Letters" button centered at the top, and a
//! column of action buttons and sling sliders in the top right corner.
//! Widgets never touch the sandbox; they return events for it.

use letterfall_runtime::{SandboxEvent, SimulationState};
use letterfall_sandbox::sling::{POWER_RANGE, POWER_STEP, RADIUS_RANGE};
use letterfall_sandbox::SlingConfig;

const BUTTON_TEXT_SIZE: f32 = 20.0;

/// Widget state kept between frames
#[derive(Debug, Clone)]
pub struct ControlsState {
    pub text: String,
    pub radius: f32,
    pub power: f32,
}

impl ControlsState {
    pub fn new(sling: SlingConfig) -> Self {
        Self {
            text: String::new(),
            radius: sling.radius(),
            power: sling.power(),
        }
    }

    /// Turn the field's contents into a submission and empty the field
    pub fn take_submission(&mut self) -> SandboxEvent {
        SandboxEvent::Submit(std::mem::take(&mut self.text))
    }
}

/// Draw the controls and collect what the user did this frame
pub fn controls_ui(
    ctx: &egui::Context,
    state: &mut ControlsState,
    simulation: SimulationState,
) -> Vec<SandboxEvent> {
    let mut events = Vec::new();

    egui::Area::new(egui::Id::new("drop_form"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 20.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let field = ui.add(
                    egui::TextEdit::singleline(&mut state.text)
                        .hint_text("Type something...")
                        .font(egui::FontId::proportional(BUTTON_TEXT_SIZE))
                        .desired_width(260.0),
                );
                let entered =
                    field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if big_button(ui, "Drop Letters").clicked() || entered {
                    events.push(state.take_submission());
                }
            });
        });

    egui::Area::new(egui::Id::new("sandbox_actions"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-20.0, 20.0))
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 10.0;
            if big_button(ui, "Reset Letters").clicked() {
                events.push(SandboxEvent::Reset);
            }
            if big_button(ui, "Toggle Hitboxes").clicked() {
                events.push(SandboxEvent::ToggleHitboxes);
            }
            if big_button(ui, simulation.toggle_label()).clicked() {
                events.push(SandboxEvent::TogglePause);
            }

            ui.label(
                egui::RichText::new(format!("Sling Radius: {}", state.radius.round()))
                    .color(egui::Color32::WHITE),
            );
            let radius = ui.add(
                egui::Slider::new(&mut state.radius, RADIUS_RANGE)
                    .step_by(1.0)
                    .show_value(false),
            );
            if radius.changed() {
                events.push(SandboxEvent::SetSlingRadius(state.radius));
            }

            ui.label(
                egui::RichText::new(format!("Sling Power: {:.2}", state.power))
                    .color(egui::Color32::WHITE),
            );
            let power = ui.add(
                egui::Slider::new(&mut state.power, POWER_RANGE)
                    .step_by(POWER_STEP as f64)
                    .show_value(false),
            );
            if power.changed() {
                events.push(SandboxEvent::SetSlingPower(state.power));
            }
        });

    events
}

fn big_button(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(egui::Button::new(
        egui::RichText::new(label).size(BUTTON_TEXT_SIZE),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_clears_field() {
        let mut state = ControlsState::new(SlingConfig::default());
        state.text = "Hi there".into();
        assert_eq!(state.take_submission(), SandboxEvent::Submit("Hi there".into()));
        assert!(state.text.is_empty());
    }

    #[test]
    fn test_sliders_start_at_sling_values() {
        let state = ControlsState::new(SlingConfig::default());
        assert_eq!(state.radius, 200.0);
        assert_eq!(state.power, 0.25);
    }

    #[test]
    fn test_idle_frame_emits_nothing() {
        let ctx = egui::Context::default();
        let mut state = ControlsState::new(SlingConfig::default());
        let mut events = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            events = controls_ui(ctx, &mut state, SimulationState::Running);
        });
        assert!(events.is_empty());
    }
}
