use anyhow::{bail, Context, Result};
use glam::{Mat4, Vec3};
use serde::Deserialize;
use std::f32::consts::PI;

use super::orientation::{angles_to_direction, direction_to_angles, SunAngles};
use super::{expect_element_type, ElementBase, SceneContext};
use crate::config::HiddenIndicatorMode;
use crate::handle::Shared;
use crate::light::DirectionalLight;
use crate::render::{EmissiveEntity, EmissiveInstanceData, MasterRenderScene, RenderData};
use crate::scene::DirectionalLightRecord;

/// Axis the indicator mesh points along before any rotation.
const INDICATOR_AXIS: Vec3 = Vec3::NEG_Y;
/// Above this |dot| the cross product with the indicator axis is too short to
/// give a stable rotation axis.
const PARALLEL_THRESHOLD: f32 = 0.999;
/// Shorter direction edits carry no usable orientation.
const MIN_DIRECTION_LENGTH: f32 = 0.001;

/// Editor node for a directional light and the cone that visualizes it.
#[derive(Debug)]
pub struct DirectionalLightElement {
    pub base: ElementBase,
    position: Vec3,
    direction: Vec3,
    angles: SunAngles,
    light: Shared<DirectionalLight>,
    light_cone: Shared<EmissiveEntity>,
    visible: bool,
    visual_scale: f32,
    standoff_distance: f32,
    hidden_mode: HiddenIndicatorMode,
}

impl DirectionalLightElement {
    pub const ELEMENT_TYPE_NAME: &'static str = "directional_light";
    pub const DEFAULT_NAME: &'static str = "New Directional Light";

    pub fn new(
        ctx: &SceneContext,
        name: impl Into<String>,
        position: Vec3,
        direction: Vec3,
        colour: Vec3,
    ) -> Result<Self> {
        let Some(direction) = unit_direction(direction) else {
            bail!("Directional light direction {direction} has no usable length");
        };
        let indicator = &ctx.config.indicator;
        let mesh = ctx
            .assets
            .load_model(&indicator.directional_mesh)
            .context("Loading directional light indicator mesh")?;
        let light_cone = EmissiveEntity::create(
            mesh,
            EmissiveInstanceData::new(colour.extend(1.0)),
            RenderData::new(ctx.assets.default_white_texture()),
        );

        let mut element = Self {
            base: ElementBase::new(name, None),
            position,
            direction,
            angles: direction_to_angles(direction),
            light: DirectionalLight::create(position, direction, colour),
            light_cone,
            visible: true,
            visual_scale: indicator.default_visual_scale.max(0.0),
            standoff_distance: indicator.standoff_distance,
            hidden_mode: indicator.hidden_mode,
        };
        element.update_instance_data(None);
        Ok(element)
    }

    /// White light two units above the origin, shining straight down.
    pub fn new_default(ctx: &SceneContext) -> Result<Self> {
        Self::new(ctx, Self::DEFAULT_NAME, Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, Vec3::ONE)
    }

    pub fn from_json(ctx: &SceneContext, value: &serde_json::Value) -> Result<Self> {
        let record = DirectionalLightRecord::deserialize(value)
            .context("Decoding directional light record")?;
        expect_element_type(&record.element_type, Self::ELEMENT_TYPE_NAME)?;
        let mut element = Self::new(
            ctx,
            record.name,
            record.position.into(),
            record.direction.into(),
            record.colour.into(),
        )?;
        element.visible = record.visible;
        element.visual_scale = record.visual_scale.max(0.0);
        element.update_instance_data(None);
        Ok(element)
    }

    pub fn to_record(&self) -> DirectionalLightRecord {
        DirectionalLightRecord {
            name: self.base.name.clone(),
            element_type: Self::ELEMENT_TYPE_NAME.to_string(),
            position: self.position.into(),
            direction: self.direction.into(),
            colour: self.light.borrow().colour.into(),
            visible: self.visible,
            visual_scale: self.visual_scale,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self.to_record()).context("Encoding directional light record")
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Normalizes and stores `direction`, re-deriving the sun angles. Vectors
    /// that are too short or too long to normalize are ignored and `false` is
    /// returned.
    pub fn set_direction(&mut self, direction: Vec3) -> bool {
        let Some(unit) = unit_direction(direction) else {
            log::debug!("[light] '{}' ignored degenerate direction {direction}", self.base.name);
            return false;
        };
        self.direction = unit;
        self.angles = direction_to_angles(self.direction);
        true
    }

    pub fn angles(&self) -> SunAngles {
        self.angles
    }

    pub fn elevation(&self) -> f32 {
        self.angles.elevation
    }

    pub fn azimuth(&self) -> f32 {
        self.angles.azimuth
    }

    /// Clamps the angles into the control range and derives the direction from them.
    pub fn set_angles(&mut self, angles: SunAngles) {
        self.angles = angles.clamped();
        self.direction = angles_to_direction(self.angles);
    }

    pub fn colour(&self) -> Vec3 {
        self.light.borrow().colour
    }

    pub fn set_colour(&mut self, colour: Vec3) {
        self.light.borrow_mut().colour = colour;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn visual_scale(&self) -> f32 {
        self.visual_scale
    }

    pub fn set_visual_scale(&mut self, visual_scale: f32) {
        self.visual_scale = visual_scale.max(0.0);
    }

    pub fn light(&self) -> &Shared<DirectionalLight> {
        &self.light
    }

    pub fn indicator(&self) -> &Shared<EmissiveEntity> {
        &self.light_cone
    }

    pub fn transform(&self) -> Mat4 {
        self.base.transform
    }

    /// Where the cone sits: upstream of the light, pointing along it.
    pub fn visual_position(&self) -> Vec3 {
        self.position - self.direction * self.standoff_distance
    }

    /// Rebuilds the light and indicator from the editable state.
    pub fn update_instance_data(&mut self, parent_transform: Option<Mat4>) {
        self.base.transform =
            ElementBase::compose(parent_transform, Mat4::from_translation(self.visual_position()));

        let colour = {
            let mut light = self.light.borrow_mut();
            light.position = self.position;
            light.direction = self.direction.normalize();
            light.colour
        };

        let mut cone = self.light_cone.borrow_mut();
        let instance = &mut cone.instance_data;
        if self.visible {
            instance.draw = true;
            instance.model_matrix = self.base.transform * indicator_model(self.direction, self.visual_scale);
        } else {
            match self.hidden_mode {
                HiddenIndicatorMode::SkipDraw => instance.draw = false,
                HiddenIndicatorMode::InfiniteScale => {
                    instance.draw = true;
                    instance.model_matrix = Mat4::from_scale(Vec3::splat(f32::INFINITY));
                }
            }
        }
        instance.material.emission_tint = colour.extend(1.0);
    }

    pub fn add_to_render_scene(&self, render_scene: &mut MasterRenderScene) {
        render_scene.insert_entity(self.light_cone.clone());
        render_scene.insert_light(self.light.clone());
    }

    pub fn remove_from_render_scene(&self, render_scene: &mut MasterRenderScene) {
        render_scene.remove_entity(&self.light_cone);
        render_scene.remove_light(&self.light);
    }
}

/// Unit vector along `direction`, or `None` when it is near zero or its length
/// overflows. Vectors already of unit length come back untouched so persisted
/// directions reload bit for bit.
fn unit_direction(direction: Vec3) -> Option<Vec3> {
    if direction.is_normalized() {
        return Some(direction);
    }
    if direction.length() <= MIN_DIRECTION_LENGTH {
        return None;
    }
    direction.try_normalize()
}

/// Local model matrix of the indicator cone for a unit light direction.
pub fn indicator_model(direction: Vec3, visual_scale: f32) -> Mat4 {
    Mat4::from_scale(Vec3::splat(visual_scale)) * Mat4::from_rotation_x(PI) * indicator_alignment(direction)
}

/// Rotation taking the indicator axis onto `direction`.
pub fn indicator_alignment(direction: Vec3) -> Mat4 {
    let alignment = INDICATOR_AXIS.dot(direction);
    if alignment.abs() > PARALLEL_THRESHOLD {
        if direction.y > 0.0 {
            Mat4::from_rotation_x(PI)
        } else {
            Mat4::IDENTITY
        }
    } else {
        let axis = INDICATOR_AXIS.cross(direction).normalize();
        Mat4::from_axis_angle(axis, alignment.clamp(-1.0, 1.0).acos())
    }
}
