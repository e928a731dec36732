use egui::Ui;
use glam::Vec3;

use super::orientation::{AZIMUTH_RANGE, ELEVATION_RANGE};
use super::{DirectionalLightElement, ElementId, GroupElement, PointLightElement, SceneElement, SceneTree};

const MAX_VISUAL_SCALE: f32 = 100.0;

impl SceneElement {
    /// Draws the element's edit controls. Returns true when a field changed;
    /// derived data is stale until the owning tree updates the element.
    pub fn add_edit_section(&mut self, ui: &mut Ui) -> bool {
        let mut changed = ui
            .horizontal(|ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut self.base_mut().name).changed()
            })
            .inner;
        changed |= match self {
            SceneElement::DirectionalLight(element) => directional_light_section(element, ui),
            SceneElement::PointLight(element) => point_light_section(element, ui),
            SceneElement::Group(element) => group_section(element, ui),
        };
        changed
    }
}

impl SceneTree {
    /// Inspector panel for one element; re-derives it and its children after edits.
    pub fn show_inspector(&mut self, id: ElementId, ui: &mut Ui) -> bool {
        let Some(element) = self.get_mut(id) else {
            ui.label("No element selected");
            return false;
        };
        ui.heading("Element Inspector");
        ui.small(element.element_type_name());
        let changed = element.add_edit_section(ui);
        if changed {
            self.update_instance_data(id);
        }
        changed
    }
}

fn directional_light_section(light: &mut DirectionalLightElement, ui: &mut Ui) -> bool {
    let mut changed = false;

    let mut position = light.position();
    if vec3_row(ui, "Position", &mut position, 0.01) {
        light.set_position(position);
        changed = true;
    }

    ui.separator();
    ui.label("Orientation");
    let mut angles = light.angles();
    let angles_changed = ui
        .add(
            egui::Slider::new(&mut angles.elevation, ELEVATION_RANGE.0..=ELEVATION_RANGE.1)
                .text("Elevation")
                .suffix(" deg"),
        )
        .changed()
        | ui
            .add(
                egui::Slider::new(&mut angles.azimuth, AZIMUTH_RANGE.0..=AZIMUTH_RANGE.1)
                    .text("Azimuth")
                    .suffix(" deg"),
            )
            .changed();
    if angles_changed {
        light.set_angles(angles);
        changed = true;
    }

    let mut direction = light.direction();
    if vec3_row(ui, "Direction", &mut direction, 0.01) && light.set_direction(direction) {
        changed = true;
    }

    ui.separator();
    let mut colour = light.colour().to_array();
    if ui.horizontal(|ui| {
        ui.label("Colour");
        ui.color_edit_button_rgb(&mut colour).changed()
    })
    .inner
    {
        light.set_colour(Vec3::from_array(colour));
        changed = true;
    }

    let mut visible = light.visible();
    if ui.checkbox(&mut visible, "Show indicator").changed() {
        light.set_visible(visible);
        changed = true;
    }

    let mut visual_scale = light.visual_scale();
    if visual_scale_row(ui, &mut visual_scale) {
        light.set_visual_scale(visual_scale);
        changed = true;
    }
    changed
}

fn point_light_section(light: &mut PointLightElement, ui: &mut Ui) -> bool {
    let mut changed = false;

    let mut position = light.position();
    if vec3_row(ui, "Position", &mut position, 0.01) {
        light.set_position(position);
        changed = true;
    }

    let mut colour = light.colour().to_array();
    if ui.horizontal(|ui| {
        ui.label("Colour");
        ui.color_edit_button_rgb(&mut colour).changed()
    })
    .inner
    {
        light.set_colour(Vec3::from_array(colour));
        changed = true;
    }

    let mut visible = light.visible();
    if ui.checkbox(&mut visible, "Show indicator").changed() {
        light.set_visible(visible);
        changed = true;
    }

    let mut visual_scale = light.visual_scale();
    if visual_scale_row(ui, &mut visual_scale) {
        light.set_visual_scale(visual_scale);
        changed = true;
    }
    changed
}

fn group_section(group: &mut GroupElement, ui: &mut Ui) -> bool {
    vec3_row(ui, "Position", &mut group.position, 0.01)
        | vec3_row(ui, "Rotation (deg)", &mut group.rotation, 1.0)
        | vec3_row(ui, "Scale", &mut group.scale, 0.01)
}

fn vec3_row(ui: &mut Ui, label: &str, value: &mut Vec3, speed: f64) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::DragValue::new(&mut value.x).speed(speed)).changed()
            | ui.add(egui::DragValue::new(&mut value.y).speed(speed)).changed()
            | ui.add(egui::DragValue::new(&mut value.z).speed(speed)).changed()
    })
    .inner
}

fn visual_scale_row(ui: &mut Ui, visual_scale: &mut f32) -> bool {
    ui.horizontal(|ui| {
        ui.label("Visual scale");
        ui.add(egui::DragValue::new(visual_scale).speed(0.01).range(0.0..=MAX_VISUAL_SCALE)).changed()
    })
    .inner
}
