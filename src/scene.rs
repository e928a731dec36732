//! Persisted scene formats.
//!
//! Element records carry editable state only; derived transforms and material
//! fields are rebuilt after loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Whole scene file: a forest of element records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDocument {
    pub elements: Vec<SceneNodeRecord>,
}

/// One element plus its children. The element body stays untyped here so the
/// tree loader can dispatch on its `type` tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneNodeRecord {
    pub element: serde_json::Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNodeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectionalLightRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub element_type: String,
    pub position: Vec3Data,
    pub direction: Vec3Data,
    pub colour: Vec3Data,
    pub visible: bool,
    pub visual_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointLightRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub element_type: String,
    pub position: Vec3Data,
    pub colour: Vec3Data,
    pub visible: bool,
    pub visual_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub element_type: String,
    pub position: Vec3Data,
    /// Euler angles in degrees, XYZ order.
    pub rotation: Vec3Data,
    pub scale: Vec3Data,
}

/// Vector persisted as a `[x, y, z]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vec3Data {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SceneDocument {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("Reading scene file {}", path.display()))?;
        let document = serde_json::from_slice::<SceneDocument>(&bytes)
            .with_context(|| format!("Parsing scene file {}", path.display()))?;
        Ok(document)
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Creating scene directory {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json.as_bytes()).with_context(|| format!("Writing scene file {}", path.display()))?;
        Ok(())
    }

    /// Total number of element records, children included.
    pub fn element_count(&self) -> usize {
        fn count(nodes: &[SceneNodeRecord]) -> usize {
            nodes.iter().map(|node| 1 + count(&node.children)).sum()
        }
        count(&self.elements)
    }
}

impl SceneNodeRecord {
    pub fn element_type(&self) -> Option<&str> {
        self.element.get("type").and_then(|value| value.as_str())
    }

    pub fn element_name(&self) -> Option<&str> {
        self.element.get("name").and_then(|value| value.as_str())
    }
}

impl From<[f32; 3]> for Vec3Data {
    fn from(value: [f32; 3]) -> Self {
        Self { x: value[0], y: value[1], z: value[2] }
    }
}

impl From<Vec3Data> for [f32; 3] {
    fn from(value: Vec3Data) -> Self {
        [value.x, value.y, value.z]
    }
}

impl From<glam::Vec3> for Vec3Data {
    fn from(value: glam::Vec3) -> Self {
        Self { x: value.x, y: value.y, z: value.z }
    }
}

impl From<Vec3Data> for glam::Vec3 {
    fn from(value: Vec3Data) -> Self {
        glam::Vec3::new(value.x, value.y, value.z)
    }
}
