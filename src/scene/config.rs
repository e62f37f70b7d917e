// Scene configuration.
//
// Defaults match the observed walkthrough layout; any field can be
// overridden from a TOML file at startup. Values are taken as-is: degenerate
// numbers (zero spacing, inverted extents) produce degenerate, possibly
// empty, placement output rather than an error.

use serde::Deserialize;
use thiserror::Error;

use super::zone::{ExclusionZone, Rect};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub landmark: String,
    pub bush: String,
    pub tree: String,
    pub npc: String,
    pub player: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            landmark: "asset/pisa_tower.glb".to_string(),
            bush: "asset/bush.glb".to_string(),
            tree: "asset/tree.glb".to_string(),
            npc: "asset/walker.fbx".to_string(),
            player: "asset/player.fbx".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Side length of the square ground plane.
    pub ground_extent: f32,
    /// Half-width of the pedestrian path running along Z.
    pub path_half_width: f32,
    /// Clearance kept between scenery and the path/base edges.
    pub clearance: f32,
    /// Half-extent of the landmark base square.
    pub base_half: f32,
    /// Half-width of the reserved approach interval on X.
    pub forbidden_half: f32,

    pub landmark_scale: f32,

    pub bush_spacing: f32,
    pub bush_height: f32,
    pub bush_scale: f32,

    pub tree_count: usize,
    pub tree_scale_min: f32,
    pub tree_scale_max: f32,

    pub npc_count: usize,
    /// NPC ground speed, world units per second.
    pub npc_speed: f32,
    /// Fixed Y at which NPCs walk.
    pub npc_height: f32,
    /// Side length of the square catchment region wander targets are drawn
    /// from.
    pub catchment_extent: f32,

    pub player_start: [f32; 3],
    pub camera_offset: [f32; 3],

    /// Seed for the placement/wander RNG. Unset means a fresh entropy seed
    /// per run; set it for reproducible scenes.
    pub seed: Option<u64>,

    pub assets: AssetPaths,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ground_extent: 7000.0,
            path_half_width: 50.0,
            clearance: 20.0,
            base_half: 375.0,
            forbidden_half: 75.0,
            landmark_scale: 7.0,
            bush_spacing: 10.0,
            bush_height: 1.0,
            bush_scale: 0.2,
            tree_count: 60,
            tree_scale_min: 0.8,
            tree_scale_max: 1.6,
            npc_count: 8,
            npc_speed: 30.0,
            npc_height: 5.0,
            catchment_extent: 3000.0,
            player_start: [80.0, 5.0, 40.0],
            camera_offset: [0.0, 10.0, 30.0],
            seed: None,
            assets: AssetPaths::default(),
        }
    }
}

impl SceneConfig {
    /// Load overrides from a TOML file.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn zone(&self) -> ExclusionZone {
        ExclusionZone {
            path_half_width: self.path_half_width,
            clearance: self.clearance,
            base_half: self.base_half,
            forbidden_half: self.forbidden_half,
        }
    }

    pub fn ground(&self) -> Rect {
        Rect::from_extent(self.ground_extent)
    }

    pub fn catchment(&self) -> Rect {
        Rect::from_extent(self.catchment_extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_observed_layout() {
        let config = SceneConfig::default();
        assert_eq!(config.ground_extent, 7000.0);
        assert_eq!(config.bush_spacing, 10.0);
        assert_eq!(config.npc_speed, 30.0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn partial_toml_overrides_keep_remaining_defaults() {
        let config: SceneConfig = toml::from_str(
            r#"
            npc_count = 3
            seed = 7

            [assets]
            bush = "models/hedge.glb"
            "#,
        )
        .unwrap();
        assert_eq!(config.npc_count, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.assets.bush, "models/hedge.glb");
        assert_eq!(config.assets.tree, AssetPaths::default().tree);
        assert_eq!(config.ground_extent, 7000.0);
    }
}
