//! # Noise Provider
//!
//! Deterministic 2D and 3D coherent noise for terrain generation.
//!
//! Samples are remapped from Perlin's signed range into `[0, 1)`. A small epsilon
//! is added to every input coordinate because Perlin noise is exactly zero on
//! integer lattice points, and voxel coordinates are integers.

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

/// Offset added to sample coordinates to keep them off the integer lattice.
pub const LATTICE_EPSILON: f64 = 0.1;

/// Seed of the underlying Perlin permutation table. Fixed on purpose: terrain
/// does not depend on the world seed.
pub const NOISE_SEED: u32 = 0;

const LARGEST_SAMPLE: f64 = 1.0 - f64::EPSILON;

/// Coherent noise sampler shared by the terrain generator.
#[derive(Clone, Debug)]
pub struct NoiseProvider {
    perlin: Perlin,
}

impl Default for NoiseProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseProvider {
    /// Creates a noise provider over the fixed permutation table.
    pub fn new() -> Self {
        NoiseProvider {
            perlin: Perlin::new(NOISE_SEED),
        }
    }

    /// Samples 2D noise for a horizontal world position.
    ///
    /// The position is measured in chunks (`position / chunk_width`) before
    /// scaling, so `scale` reads as "features per chunk".
    pub fn sample_2d(&self, x: f64, z: f64, offset: f64, scale: f64, chunk_width: i32) -> f64 {
        let width = f64::from(chunk_width);
        let sample = self.perlin.get([
            (x + LATTICE_EPSILON) / width * scale + offset,
            (z + LATTICE_EPSILON) / width * scale + offset,
        ]);
        to_unit_range(sample)
    }

    /// Samples 3D noise at a world position.
    pub fn sample_3d(&self, position: Point3<f64>, offset: f64, scale: f64) -> f64 {
        let sample = self.perlin.get([
            (position.x + offset + LATTICE_EPSILON) * scale,
            (position.y + offset + LATTICE_EPSILON) * scale,
            (position.z + offset + LATTICE_EPSILON) * scale,
        ]);
        to_unit_range(sample)
    }
}

fn to_unit_range(sample: f64) -> f64 {
    ((sample + 1.0) * 0.5).clamp(0.0, LARGEST_SAMPLE)
}
