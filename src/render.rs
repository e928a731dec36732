//! CPU-side render scenes: which entities and lights exist, and the camera
//! state each entity category renders with.

pub mod entity;
pub mod registry;

use crate::camera::{CameraInterface, CameraState};
use crate::handle::Shared;
use crate::light::{DirectionalLight, PointLight};

pub use entity::{
    AnimatedEntity, AnimatedInstanceData, EmissiveEntity, EmissiveInstanceData, EmissiveMaterial, Entity,
    EntityInstanceData, EntityMaterial, RenderData, RenderEntity,
};
pub use registry::RenderRegistry;

/// Per-sub-scene data shared by every draw in that category.
#[derive(Debug, Clone, Default)]
pub struct GlobalData {
    pub camera: CameraState,
}

impl GlobalData {
    pub fn use_camera(&mut self, camera: &dyn CameraInterface) {
        self.camera = CameraState::capture(camera);
    }
}

pub struct RenderScene<E> {
    pub global_data: GlobalData,
    pub entities: RenderRegistry<E>,
}

impl<E> Default for RenderScene<E> {
    fn default() -> Self {
        Self { global_data: GlobalData::default(), entities: RenderRegistry::new() }
    }
}

#[derive(Default)]
pub struct LightScene {
    pub point_lights: RenderRegistry<PointLight>,
    pub directional_lights: RenderRegistry<DirectionalLight>,
}

/// Entity types with a dedicated sub-scene in [`MasterRenderScene`].
pub trait EntityCategory: Sized {
    const LABEL: &'static str;

    fn scene(master: &MasterRenderScene) -> &RenderScene<Self>;
    fn scene_mut(master: &mut MasterRenderScene) -> &mut RenderScene<Self>;
}

/// Light types with a dedicated registry in [`MasterRenderScene`].
pub trait LightCategory: Sized {
    const LABEL: &'static str;

    fn registry(lights: &LightScene) -> &RenderRegistry<Self>;
    fn registry_mut(lights: &mut LightScene) -> &mut RenderRegistry<Self>;
}

#[derive(Default)]
pub struct MasterRenderScene {
    pub entity_scene: RenderScene<Entity>,
    pub animated_entity_scene: RenderScene<AnimatedEntity>,
    pub emissive_entity_scene: RenderScene<EmissiveEntity>,
    pub light_scene: LightScene,
}

impl MasterRenderScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes the camera state into every entity sub-scene.
    pub fn use_camera(&mut self, camera: &dyn CameraInterface) {
        self.entity_scene.global_data.use_camera(camera);
        self.animated_entity_scene.global_data.use_camera(camera);
        self.emissive_entity_scene.global_data.use_camera(camera);
    }

    pub fn camera_states(&self) -> [CameraState; 3] {
        [
            self.entity_scene.global_data.camera,
            self.animated_entity_scene.global_data.camera,
            self.emissive_entity_scene.global_data.camera,
        ]
    }

    pub fn insert_entity<E: EntityCategory>(&mut self, entity: Shared<E>) -> bool {
        let inserted = E::scene_mut(self).entities.insert(entity);
        if !inserted {
            log::debug!("[render] {} entity already registered", E::LABEL);
        }
        inserted
    }

    pub fn remove_entity<E: EntityCategory>(&mut self, entity: &Shared<E>) -> bool {
        E::scene_mut(self).entities.remove(entity)
    }

    pub fn contains_entity<E: EntityCategory>(&self, entity: &Shared<E>) -> bool {
        E::scene(self).entities.contains(entity)
    }

    pub fn entities<E: EntityCategory>(&self) -> &RenderRegistry<E> {
        &E::scene(self).entities
    }

    pub fn insert_light<L: LightCategory>(&mut self, light: Shared<L>) -> bool {
        let inserted = L::registry_mut(&mut self.light_scene).insert(light);
        if !inserted {
            log::debug!("[render] {} light already registered", L::LABEL);
        }
        inserted
    }

    pub fn remove_light<L: LightCategory>(&mut self, light: &Shared<L>) -> bool {
        L::registry_mut(&mut self.light_scene).remove(light)
    }

    pub fn contains_light<L: LightCategory>(&self, light: &Shared<L>) -> bool {
        L::registry(&self.light_scene).contains(light)
    }

    pub fn lights<L: LightCategory>(&self) -> &RenderRegistry<L> {
        L::registry(&self.light_scene)
    }
}

impl EntityCategory for Entity {
    const LABEL: &'static str = "plain";

    fn scene(master: &MasterRenderScene) -> &RenderScene<Self> {
        &master.entity_scene
    }

    fn scene_mut(master: &mut MasterRenderScene) -> &mut RenderScene<Self> {
        &mut master.entity_scene
    }
}

impl EntityCategory for AnimatedEntity {
    const LABEL: &'static str = "animated";

    fn scene(master: &MasterRenderScene) -> &RenderScene<Self> {
        &master.animated_entity_scene
    }

    fn scene_mut(master: &mut MasterRenderScene) -> &mut RenderScene<Self> {
        &mut master.animated_entity_scene
    }
}

impl EntityCategory for EmissiveEntity {
    const LABEL: &'static str = "emissive";

    fn scene(master: &MasterRenderScene) -> &RenderScene<Self> {
        &master.emissive_entity_scene
    }

    fn scene_mut(master: &mut MasterRenderScene) -> &mut RenderScene<Self> {
        &mut master.emissive_entity_scene
    }
}

impl LightCategory for PointLight {
    const LABEL: &'static str = "point";

    fn registry(lights: &LightScene) -> &RenderRegistry<Self> {
        &lights.point_lights
    }

    fn registry_mut(lights: &mut LightScene) -> &mut RenderRegistry<Self> {
        &mut lights.point_lights
    }
}

impl LightCategory for DirectionalLight {
    const LABEL: &'static str = "directional";

    fn registry(lights: &LightScene) -> &RenderRegistry<Self> {
        &lights.directional_lights
    }

    fn registry_mut(lights: &mut LightScene) -> &mut RenderRegistry<Self> {
        &mut lights.directional_lights
    }
}
