//! # Chunk Module
//!
//! This module provides the `Chunk` struct: one column of the world, stored as a
//! dense grid of block ids together with the geometry last built from it.
//!
//! ## Storage
//!
//! The voxel map holds `width * height * width` block ids laid out `y`-major,
//! then `x`, then `z`. Every voxel costs one byte, so lookups and edits are O(1).
//!
//! ## Lifecycle
//!
//! A chunk starts out allocated but empty. Its voxel map is populated once from the
//! terrain generator, after which it only changes through explicit edits. Visibility
//! is a separate flag: deactivating a chunk hides it without discarding voxels or
//! geometry, so reactivation needs no regeneration.
//!
//! A chunk never reaches into other chunks. Neighbour lookups for meshing go
//! through the world, and an edit on a seam only *reports* which neighbours need
//! rebuilding; the world issues those rebuilds.

use cgmath::Point3;
use log::trace;

use crate::config::WorldConfig;
use crate::engine_state::rendering::meshing::{ChunkMesh, MeshBuilder, VoxelQuery};
use crate::error::VoxelError;

use super::block::{block_face::BlockFace, BlockCatalog, BlockId};
use super::generation::TerrainGenerator;

mod chunk_coord;
pub mod chunk_iteration;

pub use chunk_coord::{voxel_position, ChunkCoord};
use chunk_iteration::ChunkVoxelIterator;

/// One column of the voxel world.
pub struct Chunk {
    /// Position of this chunk in the world grid.
    pub coord: ChunkCoord,
    /// Width and depth of the chunk, in voxels.
    width: i32,
    /// Height of the chunk, in voxels.
    height: i32,
    /// Dense block ids, indexed by [`Chunk::local_index`].
    voxel_map: Vec<BlockId>,
    /// Geometry built from the voxel map.
    mesh: ChunkMesh,
    /// Whether the voxel map has been filled from the terrain generator.
    voxel_map_populated: bool,
    /// Whether the chunk is currently visible.
    active: bool,
}

impl Chunk {
    /// Allocates an unpopulated, inactive chunk. Every voxel reads as id 0 until
    /// [`Chunk::populate_voxel_map`] runs.
    pub fn new(coord: ChunkCoord, config: &WorldConfig) -> Self {
        Chunk {
            coord,
            width: config.chunk_width,
            height: config.chunk_height,
            voxel_map: vec![0; config.chunk_volume()],
            mesh: ChunkMesh::default(),
            voxel_map_populated: false,
            active: false,
        }
    }

    /// Width and depth of the chunk, in voxels.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the chunk, in voxels.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// World voxel position of the chunk's `(0, 0, 0)` corner.
    pub fn origin(&self) -> Point3<i32> {
        self.coord.origin(self.width)
    }

    /// Whether the voxel map has been filled from the terrain generator.
    pub fn is_voxel_map_populated(&self) -> bool {
        self.voxel_map_populated
    }

    /// Whether the chunk is currently visible.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Shows or hides the chunk. Voxel and mesh data are kept either way.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// The geometry last built for this chunk.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// Fills the voxel map from the terrain generator, once.
    ///
    /// Returns `false` without doing anything if the map is already populated.
    pub fn populate_voxel_map(&mut self, generator: &TerrainGenerator) -> bool {
        if self.voxel_map_populated {
            return false;
        }

        let origin = self.origin();
        let mut offset = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                for z in 0..self.width {
                    self.voxel_map[offset] =
                        generator.generate_voxel(Point3::new(origin.x + x, y, origin.z + z));
                    offset += 1;
                }
            }
        }

        self.voxel_map_populated = true;
        true
    }

    /// Builds this chunk's geometry without storing it.
    ///
    /// `neighbours` answers for voxels outside this chunk.
    pub fn build_mesh(
        &self,
        catalog: &BlockCatalog,
        neighbours: &impl VoxelQuery,
        atlas_size_in_blocks: u32,
    ) -> ChunkMesh {
        MeshBuilder::new(catalog, atlas_size_in_blocks).build(self, neighbours)
    }

    /// Replaces the stored geometry.
    pub fn set_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = mesh;
    }

    /// Whether a chunk-local position lies inside the chunk.
    pub fn contains_local(&self, local: Point3<i32>) -> bool {
        (0..self.width).contains(&local.x)
            && (0..self.height).contains(&local.y)
            && (0..self.width).contains(&local.z)
    }

    /// Converts a world voxel position to a chunk-local one.
    pub fn to_local(&self, position: Point3<i32>) -> Result<Point3<i32>, VoxelError> {
        let origin = self.origin();
        let local = Point3::new(position.x - origin.x, position.y, position.z - origin.z);
        if self.contains_local(local) {
            Ok(local)
        } else {
            Err(VoxelError::OutOfChunk {
                position,
                chunk: self.coord,
            })
        }
    }

    /// Flat index of a chunk-local position in the voxel map.
    fn local_index(&self, local: Point3<i32>) -> usize {
        ((local.y * self.width + local.x) * self.width + local.z) as usize
    }

    /// Block id at a chunk-local position, or `None` outside the chunk.
    pub fn local_voxel(&self, local: Point3<i32>) -> Option<BlockId> {
        if self.contains_local(local) {
            Some(self.voxel_map[self.local_index(local)])
        } else {
            None
        }
    }

    /// Block id at a world voxel position.
    pub fn voxel_at(&self, position: Point3<i32>) -> Result<BlockId, VoxelError> {
        let local = self.to_local(position)?;
        Ok(self.voxel_map[self.local_index(local)])
    }

    /// Writes a block into the chunk.
    ///
    /// Returns the neighbouring chunks whose seam faces the edited voxel, in
    /// [`BlockFace`] order. Their meshes are stale after this edit, and so is this
    /// chunk's; rebuilding is up to the caller.
    pub fn edit_voxel(
        &mut self,
        position: Point3<i32>,
        block: BlockId,
        catalog: &BlockCatalog,
    ) -> Result<Vec<ChunkCoord>, VoxelError> {
        if !catalog.contains(block) {
            return Err(VoxelError::UnknownBlock {
                id: block,
                catalog_len: catalog.len(),
            });
        }

        let local = self.to_local(position)?;
        let index = self.local_index(local);
        self.voxel_map[index] = block;
        trace!("Chunk {} voxel {:?} set to {}", self.coord, position, block);

        let mut seams = Vec::new();
        for face in BlockFace::all().into_iter().filter(|face| face.is_horizontal()) {
            let neighbour = local + face.neighbour_offset();
            if !self.contains_local(neighbour) {
                seams.push(ChunkCoord::from_voxel(position + face.neighbour_offset(), self.width));
            }
        }
        Ok(seams)
    }

    /// Iterates over every voxel as `(local position, block id)`.
    pub fn voxels(&self) -> ChunkVoxelIterator<'_> {
        ChunkVoxelIterator::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::generation::biome::BiomeProfile;
    use cgmath::EuclideanSpace;

    fn small_config() -> WorldConfig {
        WorldConfig {
            chunk_width: 5,
            chunk_height: 10,
            world_size_in_chunks: 4,
            view_distance_in_chunks: 1,
            texture_atlas_size_in_blocks: 4,
        }
    }

    fn populated(coord: ChunkCoord) -> (Chunk, TerrainGenerator, BlockCatalog) {
        let config = small_config();
        let catalog = BlockCatalog::default_catalog(4).unwrap();
        let generator = TerrainGenerator::new(&config, &catalog, BiomeProfile::flat("flat", 1));
        let mut chunk = Chunk::new(coord, &config);
        assert!(chunk.populate_voxel_map(&generator));
        (chunk, generator, catalog)
    }

    #[test]
    fn test_new_chunk_is_empty_and_inactive() {
        let chunk = Chunk::new(ChunkCoord::new(1, 2), &small_config());
        assert!(!chunk.is_voxel_map_populated());
        assert!(!chunk.is_active());
        assert_eq!(chunk.voxels().count(), 250);
        assert!(chunk.mesh().is_empty());
    }

    #[test]
    fn test_population_matches_generator() {
        let (chunk, generator, _) = populated(ChunkCoord::new(1, 2));
        for (local, block) in chunk.voxels() {
            let global = chunk.origin() + local.to_vec();
            assert_eq!(block, generator.generate_voxel(global));
        }
    }

    #[test]
    fn test_population_is_idempotent() {
        let (mut chunk, generator, catalog) = populated(ChunkCoord::new(1, 1));
        let position = Point3::new(7, 5, 7);
        chunk.edit_voxel(position, 2, &catalog).unwrap();
        assert!(!chunk.populate_voxel_map(&generator));
        assert_eq!(chunk.voxel_at(position).unwrap(), 2);
    }

    #[test]
    fn test_iteration_order_is_y_then_x_then_z() {
        let chunk = Chunk::new(ChunkCoord::new(0, 0), &small_config());
        let positions: Vec<Point3<i32>> = chunk.voxels().take(7).map(|(p, _)| p).collect();
        assert_eq!(positions[0], Point3::new(0, 0, 0));
        assert_eq!(positions[1], Point3::new(0, 0, 1));
        assert_eq!(positions[5], Point3::new(1, 0, 0));
        let last = chunk.voxels().last().unwrap().0;
        assert_eq!(last, Point3::new(4, 9, 4));
    }

    #[test]
    fn test_lookup_outside_chunk_fails() {
        let (chunk, _, _) = populated(ChunkCoord::new(1, 1));
        assert!(chunk.voxel_at(Point3::new(5, 1, 5)).is_ok());
        assert!(matches!(
            chunk.voxel_at(Point3::new(4, 1, 5)),
            Err(VoxelError::OutOfChunk { .. })
        ));
        assert!(chunk.voxel_at(Point3::new(5, 10, 5)).is_err());
        assert!(chunk.voxel_at(Point3::new(5, -1, 5)).is_err());
    }

    #[test]
    fn test_edit_round_trip() {
        let (mut chunk, _, catalog) = populated(ChunkCoord::new(1, 1));
        let position = Point3::new(6, 4, 8);
        let seams = chunk.edit_voxel(position, 3, &catalog).unwrap();
        assert!(seams.is_empty());
        assert_eq!(chunk.voxel_at(position).unwrap(), 3);
    }

    #[test]
    fn test_edit_with_unknown_block_is_rejected() {
        let (mut chunk, _, catalog) = populated(ChunkCoord::new(1, 1));
        let unknown = catalog.len() as BlockId;
        let result = chunk.edit_voxel(Point3::new(6, 4, 8), unknown, &catalog);
        assert!(matches!(result, Err(VoxelError::UnknownBlock { .. })));
        assert_eq!(chunk.voxel_at(Point3::new(6, 4, 8)).unwrap(), 0);
    }

    #[test]
    fn test_edit_on_corner_reports_both_seams() {
        let (mut chunk, _, catalog) = populated(ChunkCoord::new(1, 1));
        // Local (0, 1, 4): on the left seam and the front seam.
        let seams = chunk.edit_voxel(Point3::new(5, 1, 9), 0, &catalog).unwrap();
        assert_eq!(seams, vec![ChunkCoord::new(1, 2), ChunkCoord::new(0, 1)]);
    }
}
