//! # Error Types
//!
//! All errors that can be returned by the voxel world.
//!
//! Most problems in the world are deliberately not errors: configuration misses
//! are logged and substituted, and world-level queries treat anything outside the
//! world as air. What remains are bounds violations on explicit chunk operations,
//! edits with ids the catalog does not know, and failures to load configuration.

use cgmath::Point3;
use thiserror::Error;

use crate::engine_state::voxels::chunk::ChunkCoord;

/// Errors that can occur while loading or editing the voxel world.
#[derive(Error, Debug)]
pub enum VoxelError {
    /// A position was handed to a chunk that does not contain it.
    #[error("voxel {position:?} does not lie in chunk {chunk}")]
    OutOfChunk {
        /// The offending global voxel position.
        position: Point3<i32>,
        /// The chunk the position was sent to.
        chunk: ChunkCoord,
    },

    /// A position lies outside the finite world volume.
    #[error("voxel {0:?} lies outside the world")]
    OutOfWorld(Point3<i32>),

    /// A block id that does not address the block catalog.
    #[error("block id {id} is not in the catalog ({catalog_len} entries)")]
    UnknownBlock {
        /// The id that was used.
        id: u8,
        /// Number of entries in the catalog.
        catalog_len: usize,
    },

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
