//! # Biome Profile
//!
//! The terrain shape and the ordered list of vein definitions the generator uses.

use log::warn;
use serde::Deserialize;

use crate::engine_state::voxels::block::{BlockCatalog, BlockId, FALLBACK_BLOCK_ID};
use crate::error::VoxelError;

const DEFAULT_BIOME_JSON: &str = include_str!("../../../../assets/biome.json");

/// A vein of one block type scattered through the stone layer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Vein {
    /// Name for logging and debugging.
    #[serde(default)]
    pub name: String,
    /// Block placed where the vein matches.
    pub block_id: BlockId,
    /// Exclusive `(min, max)` height bounds; the vein applies where `min < y < max`.
    pub height_range: (i32, i32),
    /// Frequency of the vein's 3D noise.
    pub scale: f64,
    /// Noise value in `[0, 1]` a sample must exceed to place the vein.
    pub threshold: f64,
    /// Offset that decorrelates this vein's noise from other veins.
    pub noise_offset: f64,
}

impl Vein {
    /// Whether `y` lies strictly inside the vein's height range.
    pub fn contains_height(&self, y: i32) -> bool {
        y > self.height_range.0 && y < self.height_range.1
    }
}

/// Configuration describing the shape of the terrain.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BiomeProfile {
    /// Name shown by debugging tools.
    #[serde(default)]
    pub name: String,
    /// Height below which the ground is always solid.
    pub solid_ground_height: i32,
    /// Amplitude of the height noise added on top of the solid ground.
    pub terrain_height: i32,
    /// Horizontal frequency of the height noise.
    pub terrain_scale: f64,
    /// Veins in evaluation order. When several match the same voxel, the last one wins.
    #[serde(default)]
    pub veins: Vec<Vein>,
}

impl BiomeProfile {
    /// Parses a biome profile from JSON.
    pub fn from_json(json: &str) -> Result<Self, VoxelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The biome bundled with the crate.
    pub fn default_biome() -> Result<Self, VoxelError> {
        Self::from_json(DEFAULT_BIOME_JSON)
    }

    /// A flat biome: every column's surface sits at `solid_ground_height`.
    pub fn flat(name: &str, solid_ground_height: i32) -> Self {
        BiomeProfile {
            name: name.to_string(),
            solid_ground_height,
            terrain_height: 0,
            terrain_scale: 1.0,
            veins: Vec::new(),
        }
    }

    /// Checks the profile against a catalog, substituting what cannot be used.
    ///
    /// Veins naming a block the catalog does not have are redirected to
    /// [`FALLBACK_BLOCK_ID`]. Thresholds are clamped to `[0, 1]`.
    pub fn validated(mut self, catalog: &BlockCatalog) -> Self {
        for vein in &mut self.veins {
            if !catalog.contains(vein.block_id) {
                warn!(
                    "Vein {} in biome {} uses block id {} which is not in the catalog, using id {}",
                    vein.name, self.name, vein.block_id, FALLBACK_BLOCK_ID
                );
                vein.block_id = FALLBACK_BLOCK_ID;
            }
            if !(0.0..=1.0).contains(&vein.threshold) {
                warn!(
                    "Vein {} in biome {} has threshold {} outside [0, 1]",
                    vein.name, self.name, vein.threshold
                );
                vein.threshold = vein.threshold.clamp(0.0, 1.0);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_biome_parses() {
        let biome = BiomeProfile::default_biome().unwrap();
        assert_eq!(biome.name, "Grasslands");
        assert!(!biome.veins.is_empty());
    }

    #[test]
    fn test_height_range_is_exclusive() {
        let vein = Vein {
            name: "test".to_string(),
            block_id: 2,
            height_range: (5, 10),
            scale: 0.1,
            threshold: 0.5,
            noise_offset: 0.0,
        };
        assert!(!vein.contains_height(5));
        assert!(vein.contains_height(6));
        assert!(vein.contains_height(9));
        assert!(!vein.contains_height(10));
    }

    #[test]
    fn test_unknown_vein_block_is_replaced() {
        let catalog = BlockCatalog::default_catalog(4).unwrap();
        let json = r#"{
            "solid_ground_height": 10,
            "terrain_height": 5,
            "terrain_scale": 0.2,
            "veins": [
                { "block_id": 200, "height_range": [1, 20], "scale": 0.1, "threshold": 1.5, "noise_offset": 0.0 }
            ]
        }"#;
        let biome = BiomeProfile::from_json(json).unwrap().validated(&catalog);
        assert_eq!(biome.veins[0].block_id, FALLBACK_BLOCK_ID);
        assert_eq!(biome.veins[0].threshold, 1.0);
    }
}
