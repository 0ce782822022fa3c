//! # Terrain Generation
//!
//! This module maps a world voxel position to a block id. Generation is a pure
//! function of the position, the biome profile and the noise provider: the same
//! position always yields the same block, whichever chunk asks and whenever.
//!
//! ## Layers
//!
//! From the bottom of a column up:
//! * `y == 0` is always the unbreakable floor
//! * stone, possibly overwritten by veins, up to four blocks below the surface
//! * three layers of dirt
//! * a single grass block at the surface height
//! * air above

use cgmath::Point3;
use log::debug;

use crate::config::WorldConfig;

use super::block::{BlockCatalog, BlockId};

pub mod biome;
pub mod noise;

use biome::BiomeProfile;
use noise::NoiseProvider;

/// Number of dirt layers between the surface grass and the stone below.
pub const DIRT_DEPTH: i32 = 3;

/// Block ids the generator places, resolved by name once at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainBlocks {
    /// Empty space.
    pub air: BlockId,
    /// The world floor.
    pub unbreakable: BlockId,
    /// Bulk underground block, the only layer veins apply to.
    pub stone: BlockId,
    /// Surface block.
    pub grass: BlockId,
    /// Sub-surface block.
    pub dirt: BlockId,
}

impl TerrainBlocks {
    /// Looks up the generator's blocks by name. Misses fall back to id 0 with a warning.
    pub fn resolve(catalog: &BlockCatalog) -> Self {
        TerrainBlocks {
            air: catalog.id_by_name("Air"),
            unbreakable: catalog.id_by_name("Unbreakable"),
            stone: catalog.id_by_name("Stone"),
            grass: catalog.id_by_name("Grass"),
            dirt: catalog.id_by_name("Dirt"),
        }
    }
}

/// Procedural terrain generator.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    biome: BiomeProfile,
    noise: NoiseProvider,
    blocks: TerrainBlocks,
    chunk_width: i32,
    chunk_height: i32,
    world_size_in_voxels: i32,
}

impl TerrainGenerator {
    /// Creates a generator for the given world dimensions, catalog and biome.
    ///
    /// The biome is validated against the catalog so that every id the generator
    /// can return addresses the catalog.
    pub fn new(config: &WorldConfig, catalog: &BlockCatalog, biome: BiomeProfile) -> Self {
        let biome = biome.validated(catalog);
        let blocks = TerrainBlocks::resolve(catalog);
        debug!(
            "Terrain generator for biome {} with {} veins: {:?}",
            biome.name,
            biome.veins.len(),
            blocks
        );

        TerrainGenerator {
            biome,
            noise: NoiseProvider::new(),
            blocks,
            chunk_width: config.chunk_width,
            chunk_height: config.chunk_height,
            world_size_in_voxels: config.world_size_in_voxels(),
        }
    }

    /// The biome this generator shapes terrain with.
    pub fn biome(&self) -> &BiomeProfile {
        &self.biome
    }

    /// The block ids this generator places.
    pub fn blocks(&self) -> TerrainBlocks {
        self.blocks
    }

    /// Whether a voxel position lies inside the finite world volume.
    pub fn is_voxel_in_world(&self, position: Point3<i32>) -> bool {
        (0..self.world_size_in_voxels).contains(&position.x)
            && (0..self.chunk_height).contains(&position.y)
            && (0..self.world_size_in_voxels).contains(&position.z)
    }

    /// Height of the grass block in the column at `(x, z)`.
    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        let sample = self.noise.sample_2d(
            f64::from(x),
            f64::from(z),
            0.0,
            self.biome.terrain_scale,
            self.chunk_width,
        );
        (f64::from(self.biome.terrain_height) * sample).floor() as i32 + self.biome.solid_ground_height
    }

    /// Returns the block at a world voxel position.
    pub fn generate_voxel(&self, position: Point3<i32>) -> BlockId {
        if !self.is_voxel_in_world(position) {
            return self.blocks.air;
        }

        let y = position.y;
        if y == 0 {
            return self.blocks.unbreakable;
        }

        let terrain_height = self.surface_height(position.x, position.z);
        let candidate = if y == terrain_height {
            self.blocks.grass
        } else if y < terrain_height && y > terrain_height - (DIRT_DEPTH + 1) {
            self.blocks.dirt
        } else if y > terrain_height {
            return self.blocks.air;
        } else {
            self.blocks.stone
        };

        if candidate != self.blocks.stone {
            return candidate;
        }

        let sample_position = Point3::new(
            f64::from(position.x),
            f64::from(position.y),
            f64::from(position.z),
        );
        let mut block = candidate;
        for vein in &self.biome.veins {
            if vein.contains_height(y)
                && self.noise.sample_3d(sample_position, vein.noise_offset, vein.scale) > vein.threshold
            {
                block = vein.block_id;
            }
        }
        block
    }
}
