//! Editable scene elements and the tree that owns them.

pub mod directional_light;
pub mod group;
#[cfg(feature = "editor")]
pub mod inspector;
pub mod orientation;
pub mod point_light;
pub mod tree;

use anyhow::{anyhow, Result};
use glam::Mat4;

use crate::assets::AssetCatalog;
use crate::config::SceneConfig;
use crate::render::MasterRenderScene;

pub use directional_light::DirectionalLightElement;
pub use group::GroupElement;
pub use orientation::SunAngles;
pub use point_light::PointLightElement;
pub use tree::SceneTree;

/// Slot of an element inside a [`SceneTree`]. Slots are never reused, so an id
/// that outlives its element resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Services elements need at construction time.
#[derive(Default)]
pub struct SceneContext {
    pub assets: AssetCatalog,
    pub config: SceneConfig,
}

impl SceneContext {
    pub fn new(assets: AssetCatalog, config: SceneConfig) -> Self {
        Self { assets, config }
    }
}

/// State every element kind carries.
#[derive(Debug, Clone)]
pub struct ElementBase {
    pub name: String,
    /// Lookup into the owning tree, never an ownership edge.
    pub parent: Option<ElementId>,
    /// World transform, rebuilt by `update_instance_data`.
    pub transform: Mat4,
}

impl ElementBase {
    pub fn new(name: impl Into<String>, parent: Option<ElementId>) -> Self {
        Self { name: name.into(), parent, transform: Mat4::IDENTITY }
    }

    /// `parent * local`, or `local` for roots.
    pub fn compose(parent_transform: Option<Mat4>, local: Mat4) -> Mat4 {
        match parent_transform {
            Some(parent) => parent * local,
            None => local,
        }
    }
}

/// Closed set of element kinds the editor knows how to build and persist.
#[derive(Debug)]
pub enum SceneElement {
    DirectionalLight(DirectionalLightElement),
    PointLight(PointLightElement),
    Group(GroupElement),
}

impl SceneElement {
    /// Rebuilds an element from its persisted record, dispatching on `type`.
    /// The element comes back as a root; the tree attaches it and re-derives
    /// its transform.
    pub fn from_json(ctx: &SceneContext, value: &serde_json::Value) -> Result<Self> {
        let tag = value
            .get("type")
            .and_then(|tag| tag.as_str())
            .ok_or_else(|| anyhow!("Element record has no 'type' tag"))?;
        let element = match tag {
            DirectionalLightElement::ELEMENT_TYPE_NAME => {
                SceneElement::DirectionalLight(DirectionalLightElement::from_json(ctx, value)?)
            }
            PointLightElement::ELEMENT_TYPE_NAME => SceneElement::PointLight(PointLightElement::from_json(ctx, value)?),
            GroupElement::ELEMENT_TYPE_NAME => SceneElement::Group(GroupElement::from_json(value)?),
            other => return Err(anyhow!("Unknown element type '{other}'")),
        };
        Ok(element)
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            SceneElement::DirectionalLight(element) => element.to_json(),
            SceneElement::PointLight(element) => element.to_json(),
            SceneElement::Group(element) => element.to_json(),
        }
    }

    pub fn element_type_name(&self) -> &'static str {
        match self {
            SceneElement::DirectionalLight(_) => DirectionalLightElement::ELEMENT_TYPE_NAME,
            SceneElement::PointLight(_) => PointLightElement::ELEMENT_TYPE_NAME,
            SceneElement::Group(_) => GroupElement::ELEMENT_TYPE_NAME,
        }
    }

    pub fn base(&self) -> &ElementBase {
        match self {
            SceneElement::DirectionalLight(element) => &element.base,
            SceneElement::PointLight(element) => &element.base,
            SceneElement::Group(element) => &element.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut ElementBase {
        match self {
            SceneElement::DirectionalLight(element) => &mut element.base,
            SceneElement::PointLight(element) => &mut element.base,
            SceneElement::Group(element) => &mut element.base,
        }
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.base().parent
    }

    pub fn transform(&self) -> Mat4 {
        self.base().transform
    }

    pub fn update_instance_data(&mut self, parent_transform: Option<Mat4>) {
        match self {
            SceneElement::DirectionalLight(element) => element.update_instance_data(parent_transform),
            SceneElement::PointLight(element) => element.update_instance_data(parent_transform),
            SceneElement::Group(element) => element.update_instance_data(parent_transform),
        }
    }

    pub fn add_to_render_scene(&self, render_scene: &mut MasterRenderScene) {
        match self {
            SceneElement::DirectionalLight(element) => element.add_to_render_scene(render_scene),
            SceneElement::PointLight(element) => element.add_to_render_scene(render_scene),
            SceneElement::Group(_) => {}
        }
    }

    pub fn remove_from_render_scene(&self, render_scene: &mut MasterRenderScene) {
        match self {
            SceneElement::DirectionalLight(element) => element.remove_from_render_scene(render_scene),
            SceneElement::PointLight(element) => element.remove_from_render_scene(render_scene),
            SceneElement::Group(_) => {}
        }
    }

    pub fn as_directional_light(&self) -> Option<&DirectionalLightElement> {
        match self {
            SceneElement::DirectionalLight(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_directional_light_mut(&mut self) -> Option<&mut DirectionalLightElement> {
        match self {
            SceneElement::DirectionalLight(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_point_light(&self) -> Option<&PointLightElement> {
        match self {
            SceneElement::PointLight(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_point_light_mut(&mut self) -> Option<&mut PointLightElement> {
        match self {
            SceneElement::PointLight(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupElement> {
        match self {
            SceneElement::Group(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut GroupElement> {
        match self {
            SceneElement::Group(element) => Some(element),
            _ => None,
        }
    }
}

impl From<DirectionalLightElement> for SceneElement {
    fn from(element: DirectionalLightElement) -> Self {
        SceneElement::DirectionalLight(element)
    }
}

impl From<PointLightElement> for SceneElement {
    fn from(element: PointLightElement) -> Self {
        SceneElement::PointLight(element)
    }
}

impl From<GroupElement> for SceneElement {
    fn from(element: GroupElement) -> Self {
        SceneElement::Group(element)
    }
}

/// Fails unless a decoded record carries the expected `type` tag.
pub(crate) fn expect_element_type(found: &str, expected: &str) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(anyhow!("Expected element type '{expected}', found '{found}'"))
    }
}
