use glam::Vec3;
use kestrel_scene::editor::{
    DirectionalLightElement, GroupElement, PointLightElement, SceneContext, SceneElement, SceneTree, SunAngles,
};
use kestrel_scene::light::{DirectionalLight, PointLight};
use kestrel_scene::render::{EmissiveEntity, MasterRenderScene};
use kestrel_scene::scene::SceneDocument;

fn build_scene(ctx: &SceneContext, render_scene: &mut MasterRenderScene) -> SceneTree {
    let mut tree = SceneTree::new();
    let mut rig = GroupElement::new("Rig");
    rig.position = Vec3::new(2.0, 0.0, -3.0);
    rig.rotation = Vec3::new(0.0, 45.0, 0.0);
    let rig_id = tree.insert(rig, None, render_scene).expect("rig");

    let mut sun = DirectionalLightElement::new_default(ctx).expect("sun");
    sun.base.name = "Sun".to_string();
    sun.set_angles(SunAngles::new(-35.0, 120.0));
    sun.set_colour(Vec3::new(1.0, 0.9, 0.7));
    sun.set_visual_scale(1.5);
    tree.insert(sun, Some(rig_id), render_scene).expect("sun");

    let mut lamp = PointLightElement::new_default(ctx).expect("lamp");
    lamp.set_position(Vec3::new(0.0, 1.5, 0.5));
    lamp.set_visible(false);
    tree.insert(lamp, None, render_scene).expect("lamp");
    tree
}

#[test]
fn scene_roundtrip_preserves_elements_and_handles() {
    let ctx = SceneContext::default();
    let mut render_scene = MasterRenderScene::new();
    let tree = build_scene(&ctx, &mut render_scene);
    assert_eq!(tree.len(), 3);

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("scenes/lighting.json");
    tree.save_to_path(&path).expect("scene save should succeed");

    let document = SceneDocument::load_from_path(&path).expect("scene file parses");
    assert_eq!(document.element_count(), 3);
    assert_eq!(document.elements[0].children.len(), 1);

    let mut restored_scene = MasterRenderScene::new();
    let restored = SceneTree::load_from_path(&ctx, &path, &mut restored_scene).expect("scene load should succeed");
    assert_eq!(restored.to_json().expect("encode"), tree.to_json().expect("encode"));
    assert_eq!(restored_scene.entities::<EmissiveEntity>().len(), 2);
    assert_eq!(restored_scene.lights::<DirectionalLight>().len(), 1);
    assert_eq!(restored_scene.lights::<PointLight>().len(), 1);

    let original_sun = tree.get(tree.find_by_name("Sun").expect("sun id")).expect("sun");
    let restored_sun = restored.get(restored.find_by_name("Sun").expect("sun id")).expect("sun");
    assert!(restored_sun.transform().abs_diff_eq(original_sun.transform(), 1e-5));
    let sun = restored_sun.as_directional_light().expect("directional light");
    assert!((sun.elevation() + 35.0).abs() < 1e-3);
    assert!((sun.azimuth() - 120.0).abs() < 1e-3);
}

#[test]
fn hidden_point_light_stays_hidden_after_reload() {
    let ctx = SceneContext::default();
    let mut render_scene = MasterRenderScene::new();
    let tree = build_scene(&ctx, &mut render_scene);

    let mut restored_scene = MasterRenderScene::new();
    let json = tree.to_json().expect("encode");
    let restored = SceneTree::from_json(&ctx, &json, &mut restored_scene).expect("reload");
    let lamp_id = restored.find_by_name(PointLightElement::DEFAULT_NAME).expect("lamp");
    let Some(SceneElement::PointLight(lamp)) = restored.get(lamp_id) else {
        panic!("lamp should load as a point light");
    };
    assert!(!lamp.visible());
    assert!(!lamp.indicator().borrow().instance_data.is_drawable());
}

#[test]
fn unknown_element_type_fails_to_load() {
    let ctx = SceneContext::default();
    let mut render_scene = MasterRenderScene::new();
    let value = serde_json::json!({
        "elements": [{ "element": { "name": "Spot", "type": "spot_light" } }]
    });
    let err = SceneTree::from_json(&ctx, &value, &mut render_scene).unwrap_err();
    assert!(format!("{err:#}").contains("spot_light"));
}

#[test]
fn misspelled_elements_key_fails_to_load() {
    let ctx = SceneContext::default();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("typo.json");
    std::fs::write(&path, r#"{ "elemnts": [] }"#).expect("write scene");

    assert!(SceneDocument::load_from_path(&path).is_err());
    let mut render_scene = MasterRenderScene::new();
    let err = SceneTree::load_from_path(&ctx, &path, &mut render_scene).unwrap_err();
    assert!(format!("{err:#}").contains("typo.json"));
}

#[test]
fn missing_scene_file_reports_path() {
    let ctx = SceneContext::default();
    let mut render_scene = MasterRenderScene::new();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");
    let err = SceneTree::load_from_path(&ctx, &path, &mut render_scene).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
}
