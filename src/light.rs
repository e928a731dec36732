use glam::Vec3;

use crate::handle::Shared;

/// Light travelling along one direction from an editor-placed origin.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    /// Unit length; -Y shines straight down.
    pub direction: Vec3,
    /// Linear RGB, each channel expected in [0, 1].
    pub colour: Vec3,
}

impl DirectionalLight {
    pub fn new(position: Vec3, direction: Vec3, colour: Vec3) -> Self {
        Self { position, direction: direction.try_normalize().unwrap_or(Vec3::NEG_Y), colour }
    }

    pub fn create(position: Vec3, direction: Vec3, colour: Vec3) -> Shared<Self> {
        Shared::new(Self::new(position, direction, colour))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub colour: Vec3,
}

impl PointLight {
    pub fn new(position: Vec3, colour: Vec3) -> Self {
        Self { position, colour }
    }

    pub fn create(position: Vec3, colour: Vec3) -> Shared<Self> {
        Shared::new(Self::new(position, colour))
    }
}
