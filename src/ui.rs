//! Egui panel for editing galaxy parameters.

use crate::params::{ranges, GalaxyParams, ParamRange};
use crate::presets::PRESETS;

/// What the user asked for this frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanelResponse {
    /// Some parameter widget changed value.
    pub changed: bool,
    /// The "Regenerate" button was clicked.
    pub regenerate: bool,
    /// The "Save" button was clicked.
    pub save: bool,
    /// A preset was picked from the list.
    pub preset: Option<&'static str>,
}

// Typed values apply on Enter or focus loss, not per keystroke
fn slider<'a>(value: &'a mut f32, range: ParamRange, text: &str) -> egui::Slider<'a> {
    egui::Slider::new(value, range.min as f32..=range.max as f32)
        .step_by(range.step)
        .update_while_editing(false)
        .text(text)
}

pub fn render_params_panel(ui: &mut egui::Ui, params: &mut GalaxyParams) -> PanelResponse {
    let mut response = PanelResponse::default();

    ui.heading("Galaxy");

    ui.horizontal(|ui| {
        ui.label("Preset:");
        egui::ComboBox::from_id_salt("galaxy_preset")
            .selected_text("Choose...")
            .show_ui(ui, |ui| {
                for preset in PRESETS {
                    if ui
                        .selectable_label(false, preset.name)
                        .on_hover_text(preset.description)
                        .clicked()
                    {
                        response.preset = Some(preset.name);
                    }
                }
            });
    });

    ui.add_space(4.0);

    response.changed |= ui
        .add(
            egui::Slider::new(
                &mut params.count,
                ranges::COUNT.min as u32..=ranges::COUNT.max as u32,
            )
            .step_by(ranges::COUNT.step)
            .logarithmic(true)
            .update_while_editing(false)
            .text("Count"),
        )
        .changed();

    response.changed |= ui
        .add(slider(&mut params.size, ranges::SIZE, "Size"))
        .changed();

    response.changed |= ui
        .add(slider(&mut params.radius, ranges::RADIUS, "Radius"))
        .changed();

    response.changed |= ui
        .add(
            egui::Slider::new(
                &mut params.branches,
                ranges::BRANCHES.min as u32..=ranges::BRANCHES.max as u32,
            )
            .update_while_editing(false)
            .text("Branches"),
        )
        .changed();

    response.changed |= ui
        .add(slider(&mut params.spin, ranges::SPIN, "Spin"))
        .on_hover_text("Radians of twist per unit radius")
        .changed();

    response.changed |= ui
        .add(slider(&mut params.randomness, ranges::RANDOMNESS, "Randomness"))
        .changed();

    response.changed |= ui
        .add(slider(
            &mut params.randomness_power,
            ranges::RANDOMNESS_POWER,
            "Randomness Power",
        ))
        .on_hover_text("Higher values pull particles closer to the arms")
        .changed();

    ui.add_space(4.0);

    ui.horizontal(|ui| {
        let mut inside = params.inside_color.to_array();
        if ui.color_edit_button_rgb(&mut inside).changed() {
            params.inside_color = inside.into();
            response.changed = true;
        }
        ui.label("Inside");

        let mut outside = params.outside_color.to_array();
        if ui.color_edit_button_rgb(&mut outside).changed() {
            params.outside_color = outside.into();
            response.changed = true;
        }
        ui.label("Outside");
    });

    ui.add_space(4.0);

    response.changed |= ui
        .add(slider(&mut params.rotation, ranges::ROTATION, "Rotation"))
        .on_hover_text("Angular velocity around Y (rad/s)")
        .changed();

    response.changed |= ui.checkbox(&mut params.waviness, "Waviness").changed();

    ui.separator();

    ui.horizontal(|ui| {
        response.regenerate = ui.button("Regenerate").clicked();
        response.save = ui.button("Save").clicked();
    });

    if response.changed {
        // Typed values can bypass slider limits
        params.clamp_to_ranges();
    }

    response
}
