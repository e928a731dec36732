use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{anyhow, Result};

use crate::mesh::Mesh;

pub const CONE_MESH: &str = "cone";
pub const SPHERE_MESH: &str = "sphere";
pub const CUBE_MESH: &str = "cube";

/// Meshes addressed by logical name. Handles are shared; the registry keeps
/// one reference alive for as long as the entry exists.
pub struct MeshRegistry {
    entries: HashMap<String, Rc<Mesh>>,
}

impl MeshRegistry {
    pub fn new() -> Self {
        let mut registry = MeshRegistry { entries: HashMap::new() };
        registry.insert(CUBE_MESH, Mesh::cube(1.0));
        registry.insert(CONE_MESH, Mesh::cone(0.5, 24));
        registry.insert(SPHERE_MESH, Mesh::uv_sphere(0.5, 12, 24));
        registry
    }

    /// Adds or replaces a mesh. Handles returned before a replacement keep
    /// pointing at the old mesh.
    pub fn insert(&mut self, key: impl Into<String>, mesh: Mesh) {
        let key = key.into();
        if self.entries.insert(key.clone(), Rc::new(mesh)).is_some() {
            log::debug!("[mesh] replaced '{key}'");
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Result<Rc<Mesh>> {
        self.entries.get(key).cloned().ok_or_else(|| anyhow!("Mesh '{key}' not registered in registry"))
    }
}

impl Default for MeshRegistry {
    fn default() -> Self {
        Self::new()
    }
}
