//! Arena-backed hierarchy of editor elements.
//!
//! Parent links are `ElementId`s into the arena. Transforms are derived top
//! down: updating an element re-derives every descendant.

use anyhow::{anyhow, bail, Context, Result};
use glam::Mat4;
use serde::Deserialize;
use std::path::Path;

use super::{ElementId, SceneContext, SceneElement};
use crate::render::MasterRenderScene;
use crate::scene::{SceneDocument, SceneNodeRecord};

#[derive(Debug)]
struct SceneNode {
    element: SceneElement,
    children: Vec<ElementId>,
}

#[derive(Debug, Default)]
pub struct SceneTree {
    nodes: Vec<Option<SceneNode>>,
    roots: Vec<ElementId>,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `element` under `parent`, registers its render handles and
    /// derives its transform.
    pub fn insert(
        &mut self,
        element: impl Into<SceneElement>,
        parent: Option<ElementId>,
        render_scene: &mut MasterRenderScene,
    ) -> Result<ElementId> {
        let mut element = element.into();
        if let Some(parent) = parent {
            if !self.contains(parent) {
                bail!("Parent element {} does not exist", parent.index());
            }
        }
        let id = ElementId(self.nodes.len());
        element.base_mut().parent = parent;
        element.add_to_render_scene(render_scene);
        log::debug!("[scene] inserted {} '{}' as {}", element.element_type_name(), element.name(), id.index());
        self.nodes.push(Some(SceneNode { element, children: Vec::new() }));
        match parent.and_then(|parent| self.node_mut(parent)) {
            Some(parent_node) => parent_node.children.push(id),
            None => self.roots.push(id),
        }
        self.update_instance_data(id);
        Ok(id)
    }

    /// Drops `id` and its descendants, withdrawing their handles from the
    /// render scene. Returns false for unknown ids.
    pub fn remove(&mut self, id: ElementId, render_scene: &mut MasterRenderScene) -> bool {
        let Some(parent) = self.get(id).map(|element| element.parent()) else {
            return false;
        };
        match parent.and_then(|parent| self.node_mut(parent)) {
            Some(parent_node) => parent_node.children.retain(|child| *child != id),
            None => self.roots.retain(|root| *root != id),
        }

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(next.0).and_then(Option::take) {
                node.element.remove_from_render_scene(render_scene);
                log::debug!("[scene] removed '{}'", node.element.name());
                pending.extend(node.children);
            }
        }
        true
    }

    /// Removes every element.
    pub fn clear(&mut self, render_scene: &mut MasterRenderScene) {
        for root in std::mem::take(&mut self.roots) {
            self.remove(root, render_scene);
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ElementId) -> Option<&SceneElement> {
        self.nodes.get(id.0).and_then(Option::as_ref).map(|node| &node.element)
    }

    /// Edits through this reference take effect after `update_instance_data(id)`.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut SceneElement> {
        self.node_mut(id).map(|node| &mut node.element)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes.get(id.0).and_then(Option::as_ref).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Live elements in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &SceneElement)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| node.as_ref().map(|node| (ElementId(index), &node.element)))
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn find_by_name(&self, name: &str) -> Option<ElementId> {
        self.iter().find(|(_, element)| element.name() == name).map(|(id, _)| id)
    }

    /// World transform of the parent of `id`, if it has one.
    pub fn parent_transform(&self, id: ElementId) -> Option<Mat4> {
        let parent = self.get(id)?.parent()?;
        self.get(parent).map(SceneElement::transform)
    }

    /// Re-derives `id` from its parent, then its descendants depth first.
    pub fn update_instance_data(&mut self, id: ElementId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let parent_transform = self.parent_transform(next);
            if let Some(node) = self.node_mut(next) {
                node.element.update_instance_data(parent_transform);
                pending.extend(node.children.iter().rev().copied());
            }
        }
        true
    }

    /// Element by slot index, for callers holding a raw index.
    pub fn id_at(&self, index: usize) -> Result<ElementId> {
        let id = ElementId(index);
        if self.contains(id) {
            Ok(id)
        } else {
            Err(anyhow!("No element at slot {index}"))
        }
    }

    pub fn to_document(&self) -> Result<SceneDocument> {
        let elements = self.roots.iter().map(|root| self.node_record(*root)).collect::<Result<_>>()?;
        Ok(SceneDocument { elements })
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self.to_document()?).context("Encoding scene document")
    }

    /// Builds a tree from a document. Nothing stays registered in
    /// `render_scene` when loading fails.
    pub fn from_document(
        ctx: &SceneContext,
        document: &SceneDocument,
        render_scene: &mut MasterRenderScene,
    ) -> Result<Self> {
        let mut tree = SceneTree::new();
        let mut path = Vec::new();
        if let Err(err) = tree.load_nodes(ctx, &document.elements, None, &mut path, render_scene) {
            tree.clear(render_scene);
            return Err(err);
        }
        Ok(tree)
    }

    pub fn from_json(
        ctx: &SceneContext,
        value: &serde_json::Value,
        render_scene: &mut MasterRenderScene,
    ) -> Result<Self> {
        let document = SceneDocument::deserialize(value).context("Decoding scene document")?;
        Self::from_document(ctx, &document, render_scene)
    }

    pub fn load_from_path(
        ctx: &SceneContext,
        path: impl AsRef<Path>,
        render_scene: &mut MasterRenderScene,
    ) -> Result<Self> {
        let path = path.as_ref();
        let document = SceneDocument::load_from_path(path)?;
        let tree = Self::from_document(ctx, &document, render_scene)
            .with_context(|| format!("Loading scene {}", path.display()))?;
        log::info!("[scene] loaded {} elements from {}", tree.len(), path.display());
        Ok(tree)
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_document()?.save_to_path(path)?;
        log::info!("[scene] saved {} elements to {}", self.len(), path.display());
        Ok(())
    }

    fn load_nodes(
        &mut self,
        ctx: &SceneContext,
        records: &[SceneNodeRecord],
        parent: Option<ElementId>,
        path: &mut Vec<usize>,
        render_scene: &mut MasterRenderScene,
    ) -> Result<()> {
        for (index, record) in records.iter().enumerate() {
            path.push(index);
            let element = SceneElement::from_json(ctx, &record.element)
                .with_context(|| element_label(path, record))?;
            let id = self.insert(element, parent, render_scene)?;
            self.load_nodes(ctx, &record.children, Some(id), path, render_scene)?;
            path.pop();
        }
        Ok(())
    }

    fn node_record(&self, id: ElementId) -> Result<SceneNodeRecord> {
        let node = self
            .nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or_else(|| anyhow!("No element at slot {}", id.index()))?;
        let element = node.element.to_json().with_context(|| format!("Saving element '{}'", node.element.name()))?;
        let children = node.children.iter().map(|child| self.node_record(*child)).collect::<Result<_>>()?;
        Ok(SceneNodeRecord { element, children })
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }
}

fn element_label(path: &[usize], record: &SceneNodeRecord) -> String {
    let path = path.iter().map(|index| index.to_string()).collect::<Vec<_>>().join("/");
    match record.element_name() {
        Some(name) => format!("Loading element {path} ('{name}')"),
        None => format!("Loading element {path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{DirectionalLightElement, GroupElement, PointLightElement};
    use crate::light::DirectionalLight;
    use crate::render::EmissiveEntity;
    use glam::Vec3;
    use serde_json::json;

    fn rig(ctx: &SceneContext, scene: &mut MasterRenderScene) -> (SceneTree, ElementId, ElementId) {
        let mut tree = SceneTree::new();
        let mut group = GroupElement::new("Rig");
        group.position = Vec3::new(4.0, 0.0, 0.0);
        let group_id = tree.insert(group, None, scene).expect("group");
        let sun = DirectionalLightElement::new_default(ctx).expect("sun");
        let sun_id = tree.insert(sun, Some(group_id), scene).expect("sun");
        (tree, group_id, sun_id)
    }

    #[test]
    fn child_light_composes_group_transform() {
        let ctx = SceneContext::default();
        let mut scene = MasterRenderScene::new();
        let (mut tree, group_id, sun_id) = rig(&ctx, &mut scene);

        let translation = tree.get(sun_id).expect("sun").transform().w_axis.truncate();
        assert!(translation.abs_diff_eq(Vec3::new(4.0, 12.0, 0.0), 1e-5));

        tree.get_mut(group_id).and_then(SceneElement::as_group_mut).expect("group").position =
            Vec3::new(-1.0, 1.0, 0.0);
        assert!(tree.update_instance_data(group_id));
        let translation = tree.get(sun_id).expect("sun").transform().w_axis.truncate();
        assert!(translation.abs_diff_eq(Vec3::new(-1.0, 13.0, 0.0), 1e-5));
    }

    #[test]
    fn insert_rejects_unknown_parent() {
        let ctx = SceneContext::default();
        let mut scene = MasterRenderScene::new();
        let mut tree = SceneTree::new();
        let sun = DirectionalLightElement::new_default(&ctx).expect("sun");
        assert!(tree.insert(sun, Some(ElementId(7)), &mut scene).is_err());
        assert!(scene.lights::<DirectionalLight>().is_empty());
    }

    #[test]
    fn removing_subtree_withdraws_every_handle() {
        let ctx = SceneContext::default();
        let mut scene = MasterRenderScene::new();
        let (mut tree, group_id, sun_id) = rig(&ctx, &mut scene);
        let lamp = PointLightElement::new_default(&ctx).expect("lamp");
        let lamp_id = tree.insert(lamp, Some(sun_id), &mut scene).expect("lamp");
        assert_eq!(scene.entities::<EmissiveEntity>().len(), 2);

        assert!(tree.remove(group_id, &mut scene));
        assert!(scene.entities::<EmissiveEntity>().is_empty());
        assert!(scene.lights::<DirectionalLight>().is_empty());
        assert!(tree.get(lamp_id).is_none());
        assert!(tree.is_empty());
        assert!(!tree.remove(group_id, &mut scene));
    }

    #[test]
    fn stale_ids_are_not_reused() {
        let mut scene = MasterRenderScene::new();
        let mut tree = SceneTree::new();
        let first = tree.insert(GroupElement::new("A"), None, &mut scene).expect("a");
        tree.remove(first, &mut scene);
        let second = tree.insert(GroupElement::new("B"), None, &mut scene).expect("b");
        assert_ne!(first, second);
        assert!(tree.get(first).is_none());
        assert!(tree.id_at(first.index()).is_err());
        assert_eq!(tree.find_by_name("B"), Some(second));
    }

    #[test]
    fn json_round_trip_rebuilds_hierarchy() {
        let ctx = SceneContext::default();
        let mut scene = MasterRenderScene::new();
        let (tree, _, _) = rig(&ctx, &mut scene);
        let json = tree.to_json().expect("encode");
        assert_eq!(json["elements"][0]["children"][0]["element"]["type"], "directional_light");

        let mut restored_scene = MasterRenderScene::new();
        let restored = SceneTree::from_json(&ctx, &json, &mut restored_scene).expect("reload");
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.to_json().expect("encode"), json);
        let sun_id = restored.find_by_name(DirectionalLightElement::DEFAULT_NAME).expect("sun");
        let translation = restored.get(sun_id).expect("sun").transform().w_axis.truncate();
        assert!(translation.abs_diff_eq(Vec3::new(4.0, 12.0, 0.0), 1e-5));
        assert_eq!(restored_scene.lights::<DirectionalLight>().len(), 1);
    }

    #[test]
    fn misspelled_document_keys_are_rejected() {
        let ctx = SceneContext::default();
        let mut scene = MasterRenderScene::new();
        let err = SceneTree::from_json(&ctx, &json!({ "elemnts": [] }), &mut scene).unwrap_err();
        assert!(format!("{err:#}").contains("elemnts"), "{err:#}");

        let value = json!({
            "elements": [{
                "element": { "name": "Rig", "type": "group", "position": [0.0, 0.0, 0.0],
                             "rotation": [0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0] },
                "childern": []
            }]
        });
        assert!(SceneTree::from_json(&ctx, &value, &mut scene).is_err());
        assert!(SceneTree::from_json(&ctx, &json!({}), &mut scene).is_err());
    }

    #[test]
    fn malformed_child_names_its_path_and_leaves_no_handles() {
        let ctx = SceneContext::default();
        let mut scene = MasterRenderScene::new();
        let value = json!({
            "elements": [{
                "element": {
                    "name": "Lamp", "type": "point_light", "position": [0.0, 1.0, 0.0],
                    "colour": [1.0, 1.0, 1.0], "visible": true, "visual_scale": 1.0
                },
                "children": [{ "element": { "name": "Broken", "type": "directional_light" } }]
            }]
        });
        let err = SceneTree::from_json(&ctx, &value, &mut scene).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("0/0"), "{message}");
        assert!(message.contains("Broken"), "{message}");
        assert!(scene.entities::<EmissiveEntity>().is_empty());
    }
}
