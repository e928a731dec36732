use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use image::{Rgba, RgbaImage};

use crate::mesh::Mesh;
use crate::mesh_registry::MeshRegistry;

/// CPU-side texture; GPU upload belongs to the render pipeline.
#[derive(Debug, Clone)]
pub struct TextureAsset {
    pub key: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl TextureAsset {
    pub fn from_image(key: impl Into<String>, image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self { key: key.into(), width, height, data: image.into_raw() }
    }

    pub fn solid(key: impl Into<String>, rgba: [u8; 4]) -> Self {
        Self::from_image(key, RgbaImage::from_pixel(1, 1, Rgba(rgba)))
    }

    pub fn load(key: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).with_context(|| format!("Failed to load texture {}", path.display()))?;
        Ok(Self::from_image(key, image.to_rgba8()))
    }
}

/// Meshes and textures handed to scene elements at construction.
pub struct AssetCatalog {
    meshes: MeshRegistry,
    textures: HashMap<String, Rc<TextureAsset>>,
    white_texture: Rc<TextureAsset>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self {
            meshes: MeshRegistry::new(),
            textures: HashMap::new(),
            white_texture: Rc::new(TextureAsset::solid("texture::default_white", [255, 255, 255, 255])),
        }
    }

    pub fn load_model(&self, key: &str) -> Result<Rc<Mesh>> {
        self.meshes.get(key)
    }

    pub fn default_white_texture(&self) -> Rc<TextureAsset> {
        Rc::clone(&self.white_texture)
    }

    /// Loads `path` under `key` unless the key is already cached.
    pub fn load_texture(&mut self, key: &str, path: impl AsRef<Path>) -> Result<Rc<TextureAsset>> {
        if let Some(texture) = self.textures.get(key) {
            return Ok(Rc::clone(texture));
        }
        let texture = Rc::new(TextureAsset::load(key, path)?);
        log::debug!("[assets] loaded texture '{key}' ({}x{})", texture.width, texture.height);
        self.textures.insert(key.to_string(), Rc::clone(&texture));
        Ok(texture)
    }

    pub fn texture(&self, key: &str) -> Result<Rc<TextureAsset>> {
        self.textures.get(key).cloned().ok_or_else(|| anyhow!("Texture '{key}' not loaded"))
    }

    pub fn register_mesh(&mut self, key: impl Into<String>, mesh: Mesh) {
        self.meshes.insert(key, mesh);
    }

    pub fn meshes(&self) -> &MeshRegistry {
        &self.meshes
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new()
    }
}
