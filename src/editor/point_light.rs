use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use serde::Deserialize;

use super::{expect_element_type, ElementBase, SceneContext};
use crate::handle::Shared;
use crate::light::PointLight;
use crate::render::{EmissiveEntity, EmissiveInstanceData, MasterRenderScene, RenderData};
use crate::scene::PointLightRecord;

/// Editor node for a point light, drawn as a small emissive sphere at the light.
#[derive(Debug)]
pub struct PointLightElement {
    pub base: ElementBase,
    position: Vec3,
    light: Shared<PointLight>,
    light_sphere: Shared<EmissiveEntity>,
    visible: bool,
    visual_scale: f32,
}

impl PointLightElement {
    pub const ELEMENT_TYPE_NAME: &'static str = "point_light";
    pub const DEFAULT_NAME: &'static str = "New Point Light";

    pub fn new(ctx: &SceneContext, name: impl Into<String>, position: Vec3, colour: Vec3) -> Result<Self> {
        let mesh = ctx
            .assets
            .load_model(&ctx.config.indicator.point_mesh)
            .context("Loading point light indicator mesh")?;
        let light_sphere = EmissiveEntity::create(
            mesh,
            EmissiveInstanceData::new(colour.extend(1.0)),
            RenderData::new(ctx.assets.default_white_texture()),
        );
        let mut element = Self {
            base: ElementBase::new(name, None),
            position,
            light: PointLight::create(position, colour),
            light_sphere,
            visible: true,
            visual_scale: ctx.config.indicator.default_visual_scale.max(0.0),
        };
        element.update_instance_data(None);
        Ok(element)
    }

    pub fn new_default(ctx: &SceneContext) -> Result<Self> {
        Self::new(ctx, Self::DEFAULT_NAME, Vec3::new(0.0, 1.0, 0.0), Vec3::ONE)
    }

    pub fn from_json(ctx: &SceneContext, value: &serde_json::Value) -> Result<Self> {
        let record = PointLightRecord::deserialize(value).context("Decoding point light record")?;
        expect_element_type(&record.element_type, Self::ELEMENT_TYPE_NAME)?;
        let mut element = Self::new(ctx, record.name, record.position.into(), record.colour.into())?;
        element.visible = record.visible;
        element.visual_scale = record.visual_scale.max(0.0);
        element.update_instance_data(None);
        Ok(element)
    }

    pub fn to_record(&self) -> PointLightRecord {
        PointLightRecord {
            name: self.base.name.clone(),
            element_type: Self::ELEMENT_TYPE_NAME.to_string(),
            position: self.position.into(),
            colour: self.colour().into(),
            visible: self.visible,
            visual_scale: self.visual_scale,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self.to_record()).context("Encoding point light record")
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
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

    pub fn light(&self) -> &Shared<PointLight> {
        &self.light
    }

    pub fn indicator(&self) -> &Shared<EmissiveEntity> {
        &self.light_sphere
    }

    pub fn update_instance_data(&mut self, parent_transform: Option<Mat4>) {
        self.base.transform = ElementBase::compose(parent_transform, Mat4::from_translation(self.position));

        let colour = {
            let mut light = self.light.borrow_mut();
            light.position = self.position;
            light.colour
        };

        let mut sphere = self.light_sphere.borrow_mut();
        let instance = &mut sphere.instance_data;
        instance.draw = self.visible;
        if self.visible {
            instance.model_matrix = self.base.transform * Mat4::from_scale(Vec3::splat(self.visual_scale));
        }
        instance.material.emission_tint = colour.extend(1.0);
    }

    pub fn add_to_render_scene(&self, render_scene: &mut MasterRenderScene) {
        render_scene.insert_entity(self.light_sphere.clone());
        render_scene.insert_light(self.light.clone());
    }

    pub fn remove_from_render_scene(&self, render_scene: &mut MasterRenderScene) {
        render_scene.remove_entity(&self.light_sphere);
        render_scene.remove_light(&self.light);
    }
}
