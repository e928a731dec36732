use anyhow::{Context, Result};
use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::Deserialize;

use super::{expect_element_type, ElementBase};
use crate::scene::GroupRecord;

/// Transform-only node used to parent other elements.
#[derive(Debug, Clone)]
pub struct GroupElement {
    pub base: ElementBase,
    pub position: Vec3,
    /// Euler degrees, XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl GroupElement {
    pub const ELEMENT_TYPE_NAME: &'static str = "group";
    pub const DEFAULT_NAME: &'static str = "New Group";

    pub fn new(name: impl Into<String>) -> Self {
        Self { base: ElementBase::new(name, None), position: Vec3::ZERO, rotation: Vec3::ZERO, scale: Vec3::ONE }
    }

    pub fn new_default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }

    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let record = GroupRecord::deserialize(value).context("Decoding group record")?;
        expect_element_type(&record.element_type, Self::ELEMENT_TYPE_NAME)?;
        let mut element = Self {
            base: ElementBase::new(record.name, None),
            position: record.position.into(),
            rotation: record.rotation.into(),
            scale: record.scale.into(),
        };
        element.update_instance_data(None);
        Ok(element)
    }

    pub fn to_record(&self) -> GroupRecord {
        GroupRecord {
            name: self.base.name.clone(),
            element_type: Self::ELEMENT_TYPE_NAME.to_string(),
            position: self.position.into(),
            rotation: self.rotation.into(),
            scale: self.scale.into(),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self.to_record()).context("Encoding group record")
    }

    pub fn local_transform(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }

    pub fn update_instance_data(&mut self, parent_transform: Option<Mat4>) {
        self.base.transform = ElementBase::compose(parent_transform, self.local_transform());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_is_translate_rotate_scale() {
        let mut group = GroupElement::new("Rig");
        group.position = Vec3::new(0.0, 0.0, 5.0);
        group.rotation = Vec3::new(0.0, 90.0, 0.0);
        group.scale = Vec3::splat(2.0);
        group.update_instance_data(None);
        let moved = group.base.transform.transform_point3(Vec3::X);
        assert!(moved.abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-5));
    }

    #[test]
    fn parent_composes_on_the_left() {
        let mut group = GroupElement::new("Child");
        group.position = Vec3::new(1.0, 0.0, 0.0);
        group.update_instance_data(Some(Mat4::from_scale(Vec3::splat(3.0))));
        assert!(group.base.transform.w_axis.truncate().abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn rejects_foreign_tag() {
        let value = serde_json::json!({
            "name": "Rig", "type": "directional_light",
            "position": [0.0, 0.0, 0.0], "rotation": [0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0]
        });
        assert!(GroupElement::from_json(&value).is_err());
    }
}
