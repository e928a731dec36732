use std::rc::Rc;

use glam::{Mat4, Vec3, Vec4};

use crate::assets::TextureAsset;
use crate::handle::Shared;
use crate::mesh::Mesh;

/// One drawable instance: shared mesh, per-instance data, per-draw bindings.
#[derive(Debug, Clone)]
pub struct RenderEntity<I> {
    pub mesh: Rc<Mesh>,
    pub instance_data: I,
    pub render_data: RenderData,
}

impl<I> RenderEntity<I> {
    pub fn new(mesh: Rc<Mesh>, instance_data: I, render_data: RenderData) -> Self {
        Self { mesh, instance_data, render_data }
    }

    pub fn create(mesh: Rc<Mesh>, instance_data: I, render_data: RenderData) -> Shared<Self> {
        Shared::new(Self::new(mesh, instance_data, render_data))
    }
}

#[derive(Debug, Clone)]
pub struct RenderData {
    pub texture: Rc<TextureAsset>,
}

impl RenderData {
    pub fn new(texture: Rc<TextureAsset>) -> Self {
        Self { texture }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityMaterial {
    pub diffuse_tint: Vec4,
    pub specular_tint: Vec3,
    pub ambient_tint: Vec3,
    pub shininess: f32,
}

impl Default for EntityMaterial {
    fn default() -> Self {
        Self { diffuse_tint: Vec4::ONE, specular_tint: Vec3::ONE, ambient_tint: Vec3::ONE, shininess: 16.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityInstanceData {
    pub model_matrix: Mat4,
    pub material: EntityMaterial,
}

impl Default for EntityInstanceData {
    fn default() -> Self {
        Self { model_matrix: Mat4::IDENTITY, material: EntityMaterial::default() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedInstanceData {
    pub model_matrix: Mat4,
    pub material: EntityMaterial,
    /// Skinning palette in joint order.
    pub bone_transforms: Vec<Mat4>,
}

impl Default for AnimatedInstanceData {
    fn default() -> Self {
        Self { model_matrix: Mat4::IDENTITY, material: EntityMaterial::default(), bone_transforms: Vec::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissiveMaterial {
    pub emission_tint: Vec4,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmissiveInstanceData {
    pub model_matrix: Mat4,
    pub material: EmissiveMaterial,
    /// Draw gate checked by the render pipeline.
    pub draw: bool,
}

impl EmissiveInstanceData {
    pub fn new(emission_tint: Vec4) -> Self {
        Self { model_matrix: Mat4::IDENTITY, material: EmissiveMaterial { emission_tint }, draw: true }
    }

    /// True when the instance should reach rasterization at all.
    pub fn is_drawable(&self) -> bool {
        self.draw && self.model_matrix.is_finite()
    }
}

impl Default for EmissiveInstanceData {
    fn default() -> Self {
        Self::new(Vec4::ONE)
    }
}

pub type Entity = RenderEntity<EntityInstanceData>;
pub type AnimatedEntity = RenderEntity<AnimatedInstanceData>;
pub type EmissiveEntity = RenderEntity<EmissiveInstanceData>;
