use glam::{Mat4, Vec3};
use kestrel_scene::camera::{Camera3D, CameraInterface};
use kestrel_scene::editor::{DirectionalLightElement, GroupElement, SceneContext, SceneTree, SunAngles};
use kestrel_scene::light::DirectionalLight;
use kestrel_scene::render::{EmissiveEntity, MasterRenderScene};

#[test]
fn default_light_end_to_end() {
    let ctx = SceneContext::default();
    let mut render_scene = MasterRenderScene::new();
    let mut tree = SceneTree::new();
    let sun = DirectionalLightElement::new_default(&ctx).expect("default light");
    let id = tree.insert(sun, None, &mut render_scene).expect("insert");

    let sun = tree.get(id).and_then(|element| element.as_directional_light()).expect("sun");
    assert_eq!(sun.position(), Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(sun.direction(), Vec3::NEG_Y);
    assert!(sun.elevation().abs() < 1e-4);
    assert_eq!(sun.azimuth(), 0.0);
    assert!(sun.transform().w_axis.truncate().abs_diff_eq(Vec3::new(0.0, 12.0, 0.0), 1e-5));

    assert!(render_scene.contains_entity(sun.indicator()));
    assert!(render_scene.contains_light(sun.light()));
    let drawn = render_scene
        .entities::<EmissiveEntity>()
        .iter()
        .filter(|cone| cone.borrow().instance_data.is_drawable())
        .count();
    assert_eq!(drawn, 1);
}

#[test]
fn editing_angles_through_the_tree_moves_the_indicator() {
    let ctx = SceneContext::default();
    let mut render_scene = MasterRenderScene::new();
    let mut tree = SceneTree::new();
    let rig = tree.insert(GroupElement::new("Rig"), None, &mut render_scene).expect("rig");
    let sun = DirectionalLightElement::new_default(&ctx).expect("default light");
    let id = tree.insert(sun, Some(rig), &mut render_scene).expect("insert");

    let sun = tree.get_mut(id).and_then(|element| element.as_directional_light_mut()).expect("sun");
    sun.set_angles(SunAngles::new(-90.0, 0.0));
    assert!(tree.update_instance_data(id));

    let sun = tree.get(id).and_then(|element| element.as_directional_light()).expect("sun");
    assert!(sun.direction().abs_diff_eq(Vec3::Z, 1e-5));
    // Standoff puts the cone ten units behind the light along -Z.
    assert!(sun.visual_position().abs_diff_eq(Vec3::new(0.0, 2.0, -10.0), 1e-4));
    assert!(sun.light().borrow().direction.abs_diff_eq(Vec3::Z, 1e-5));

    let cone_tip = sun.indicator().borrow().instance_data.model_matrix.transform_vector3(Vec3::NEG_Y);
    assert!(cone_tip.normalize().abs_diff_eq(-Vec3::Z, 1e-4), "{cone_tip:?}");
}

#[test]
fn hiding_and_showing_restores_the_indicator() {
    let ctx = SceneContext::default();
    let mut render_scene = MasterRenderScene::new();
    let mut tree = SceneTree::new();
    let sun = DirectionalLightElement::new_default(&ctx).expect("default light");
    let id = tree.insert(sun, None, &mut render_scene).expect("insert");

    let visible_model = tree
        .get(id)
        .and_then(|element| element.as_directional_light())
        .map(|sun| sun.indicator().borrow().instance_data.model_matrix)
        .expect("sun");

    tree.get_mut(id).and_then(|element| element.as_directional_light_mut()).expect("sun").set_visible(false);
    tree.update_instance_data(id);
    assert!(render_scene
        .entities::<EmissiveEntity>()
        .iter()
        .all(|cone| !cone.borrow().instance_data.is_drawable()));

    tree.get_mut(id).and_then(|element| element.as_directional_light_mut()).expect("sun").set_visible(true);
    tree.update_instance_data(id);
    let sun = tree.get(id).and_then(|element| element.as_directional_light()).expect("sun");
    let model = sun.indicator().borrow().instance_data.model_matrix;
    assert!(model.abs_diff_eq(visible_model, 1e-6));
}

#[test]
fn overflowing_direction_record_fails_to_load() {
    let ctx = SceneContext::default();
    let mut render_scene = MasterRenderScene::new();
    let value = serde_json::json!({
        "elements": [{ "element": {
            "name": "Sun", "type": "directional_light",
            "position": [0.0, 2.0, 0.0], "direction": [1e30, 1e30, 1e30], "colour": [1.0, 1.0, 1.0],
            "visible": true, "visual_scale": 1.0
        } }]
    });
    assert!(SceneTree::from_json(&ctx, &value, &mut render_scene).is_err());
    assert!(render_scene.lights::<DirectionalLight>().is_empty());
    assert!(render_scene.entities::<EmissiveEntity>().is_empty());
}

#[test]
fn removing_the_light_clears_both_registries() {
    let ctx = SceneContext::default();
    let mut render_scene = MasterRenderScene::new();
    let mut tree = SceneTree::new();
    let id = tree
        .insert(DirectionalLightElement::new_default(&ctx).expect("light"), None, &mut render_scene)
        .expect("insert");
    assert!(tree.remove(id, &mut render_scene));
    assert!(render_scene.entities::<EmissiveEntity>().is_empty());
    assert!(render_scene.lights::<DirectionalLight>().is_empty());
}

#[test]
fn camera_reaches_every_entity_sub_scene() {
    let mut render_scene = MasterRenderScene::new();
    let camera = Camera3D::new(Vec3::new(0.0, 3.0, 8.0), Vec3::ZERO, 60f32.to_radians(), 0.1, 100.0);
    render_scene.use_camera(&camera);
    let expected = camera.projection_matrix() * camera.view_matrix();
    for state in render_scene.camera_states() {
        assert_eq!(state.view, camera.view_matrix());
        assert!(state.view_projection.abs_diff_eq(expected, 1e-6));
        assert_eq!(state.position, camera.position());
        assert_ne!(state.view, Mat4::IDENTITY);
    }
}
