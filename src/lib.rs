pub mod assets;
pub mod camera;
pub mod config;
pub mod editor;
pub mod handle;
pub mod light;
pub mod mesh;
pub mod mesh_registry;
pub mod render;
pub mod scene;

pub use editor::{
    DirectionalLightElement, ElementId, GroupElement, PointLightElement, SceneContext, SceneElement, SceneTree,
};
pub use handle::Shared;
pub use render::MasterRenderScene;
