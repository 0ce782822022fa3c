//! # Configuration
//!
//! World dimensions, streaming distance and the world seed.
//!
//! Everything here is loaded once at startup. `WorldConfig` can be read from JSON;
//! any field missing from the document takes its default value.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::error::VoxelError;

/// Length of a generated seed string.
pub const GENERATED_SEED_LENGTH: usize = 16;

/// Dimensions of the world and its chunks.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width and depth of a chunk, in voxels.
    pub chunk_width: i32,
    /// Height of a chunk, in voxels. Height is not chunked.
    pub chunk_height: i32,
    /// Width and depth of the world, in chunks.
    pub world_size_in_chunks: i32,
    /// Chebyshev radius, in chunks, of the region kept active around the observer.
    pub view_distance_in_chunks: i32,
    /// Width and height of the texture atlas, in tiles.
    pub texture_atlas_size_in_blocks: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            chunk_width: 16,
            chunk_height: 128,
            world_size_in_chunks: 100,
            view_distance_in_chunks: 5,
            texture_atlas_size_in_blocks: 4,
        }
    }
}

impl WorldConfig {
    /// Parses a configuration from JSON and sanitizes it.
    pub fn from_json(json: &str) -> Result<Self, VoxelError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VoxelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Replaces values that cannot describe a world with their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = WorldConfig::default();
        if self.chunk_width < 1 {
            warn!("chunk_width {} is not positive, using {}", self.chunk_width, defaults.chunk_width);
            self.chunk_width = defaults.chunk_width;
        }
        if self.chunk_height < 1 {
            warn!("chunk_height {} is not positive, using {}", self.chunk_height, defaults.chunk_height);
            self.chunk_height = defaults.chunk_height;
        }
        if self.world_size_in_chunks < 1 {
            warn!(
                "world_size_in_chunks {} is not positive, using {}",
                self.world_size_in_chunks, defaults.world_size_in_chunks
            );
            self.world_size_in_chunks = defaults.world_size_in_chunks;
        }
        if self.view_distance_in_chunks < 0 {
            warn!("view_distance_in_chunks {} is negative, using 0", self.view_distance_in_chunks);
            self.view_distance_in_chunks = 0;
        }
        if self.view_distance_in_chunks > self.world_size_in_chunks {
            warn!(
                "view_distance_in_chunks {} exceeds the world, using {}",
                self.view_distance_in_chunks, self.world_size_in_chunks
            );
            self.view_distance_in_chunks = self.world_size_in_chunks;
        }
        if self.texture_atlas_size_in_blocks == 0 {
            warn!(
                "texture_atlas_size_in_blocks is zero, using {}",
                defaults.texture_atlas_size_in_blocks
            );
            self.texture_atlas_size_in_blocks = defaults.texture_atlas_size_in_blocks;
        }
        self
    }

    /// Width and depth of the world, in voxels.
    pub fn world_size_in_voxels(&self) -> i32 {
        self.world_size_in_chunks * self.chunk_width
    }

    /// Number of voxels stored by a single chunk.
    pub fn chunk_volume(&self) -> usize {
        (self.chunk_width * self.chunk_height * self.chunk_width) as usize
    }
}

/// The world seed.
///
/// The seed only drives non-terrain randomness. Terrain noise is sampled from
/// fixed coordinates, so two worlds with the same biome look the same whatever
/// their seeds are.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldSeed {
    text: String,
}

impl WorldSeed {
    /// Uses the given seed string, or generates a random alphanumeric one.
    pub fn new(seed: Option<String>) -> Self {
        let text = match seed {
            Some(text) => text,
            None => std::iter::repeat_with(fastrand::alphanumeric)
                .take(GENERATED_SEED_LENGTH)
                .collect(),
        };
        WorldSeed { text }
    }

    /// The seed as typed or generated.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The seed hashed to a number suitable for seeding an RNG.
    pub fn hash_value(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.text.hash(&mut hasher);
        hasher.finish()
    }

    /// A general-purpose RNG seeded from this seed.
    pub fn rng(&self) -> fastrand::Rng {
        fastrand::Rng::with_seed(self.hash_value())
    }
}
