//! # Chunk Iteration Module
//!
//! This module provides an iterator over every voxel of a chunk, in the chunk's
//! fixed order: `y` outermost, then `x`, then `z`.
//!
//! The order matches the layout of the voxel map, so iteration is a linear walk
//! over memory and the position is maintained incrementally instead of being
//! recomputed from the flat index.

use cgmath::Point3;

use crate::engine_state::voxels::block::BlockId;

use super::Chunk;

/// An iterator over all voxels in a chunk.
///
/// Yields the chunk-local position of each voxel together with its block id.
pub struct ChunkVoxelIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Current offset in the voxel map
    offset: usize,
    /// Current X position within the chunk
    local_x: i32,
    /// Current Y position within the chunk
    local_y: i32,
    /// Current Z position within the chunk
    local_z: i32,
}

impl<'a> ChunkVoxelIterator<'a> {
    /// Creates a new iterator positioned at the chunk's `(0, 0, 0)` voxel.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkVoxelIterator {
            chunk_ref,
            offset: 0,
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }
}

impl Iterator for ChunkVoxelIterator<'_> {
    type Item = (Point3<i32>, BlockId);

    fn next(&mut self) -> Option<Self::Item> {
        let block = *self.chunk_ref.voxel_map.get(self.offset)?;
        let position = Point3::new(self.local_x, self.local_y, self.local_z);

        self.offset += 1;
        self.local_z += 1;

        // End of a row along Z
        if self.local_z == self.chunk_ref.width {
            self.local_z = 0;
            self.local_x += 1;

            // End of a horizontal layer
            if self.local_x == self.chunk_ref.width {
                self.local_x = 0;
                self.local_y += 1;
            }
        }

        Some((position, block))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.chunk_ref.voxel_map.len() - self.offset;
        (remaining, Some(remaining))
    }
}
