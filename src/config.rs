use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::mesh_registry::{CONE_MESH, SPHERE_MESH};

/// How a light indicator is kept off screen while its element is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HiddenIndicatorMode {
    /// Clear the indicator's draw gate.
    #[default]
    SkipDraw,
    /// Scale the model matrix by +inf, for renderers without a draw gate.
    InfiniteScale,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorConfig {
    #[serde(default = "IndicatorConfig::default_standoff_distance")]
    pub standoff_distance: f32,
    #[serde(default = "IndicatorConfig::default_visual_scale")]
    pub default_visual_scale: f32,
    #[serde(default)]
    pub hidden_mode: HiddenIndicatorMode,
    #[serde(default = "IndicatorConfig::default_directional_mesh")]
    pub directional_mesh: String,
    #[serde(default = "IndicatorConfig::default_point_mesh")]
    pub point_mesh: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SceneConfig {
    #[serde(default)]
    pub indicator: IndicatorConfig,
}

impl IndicatorConfig {
    const fn default_standoff_distance() -> f32 {
        10.0
    }

    const fn default_visual_scale() -> f32 {
        1.0
    }

    fn default_directional_mesh() -> String {
        CONE_MESH.to_string()
    }

    fn default_point_mesh() -> String {
        SPHERE_MESH.to_string()
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            standoff_distance: Self::default_standoff_distance(),
            default_visual_scale: Self::default_visual_scale(),
            hidden_mode: HiddenIndicatorMode::default(),
            directional_mesh: Self::default_directional_mesh(),
            point_mesh: Self::default_point_mesh(),
        }
    }
}

impl SceneConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("[config] load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }
}
