//! Mesh generation for voxel chunks.
//!
//! This module turns a chunk's voxel map into renderable geometry with per-face
//! culling: every solid voxel contributes one quad per side whose neighbour is
//! transparent. There is no face merging, so a chunk mesh always holds exactly
//! four vertices and six indices per visible face.
//!
//! # Architecture
//! - `MeshBuilder`: walks a chunk and emits faces
//! - `VoxelQuery`: answers for voxels outside the chunk being meshed
//! - `mesh/`: the `ChunkMesh` container and per-face quad construction
//!
//! # Neighbours
//! Voxels on a chunk's seam look across into the next chunk. The builder never
//! holds a reference to other chunks; it asks the `VoxelQuery` instead, which the
//! world implements by reading populated chunks and falling back to the terrain
//! generator for everything else.

use cgmath::{EuclideanSpace, Point3};
use log::trace;

use crate::engine_state::voxels::{
    block::{block_face::BlockFace, BlockCatalog, BlockId},
    chunk::Chunk,
};

mod mesh;

pub use mesh::*;

/// Read access to voxels by world position.
///
/// Implementors must answer for any position, including ones outside the world,
/// which should read as air.
pub trait VoxelQuery {
    /// Block id at a world voxel position.
    fn block_at(&self, position: Point3<i32>) -> BlockId;
}

/// Builds a [`ChunkMesh`] from a chunk's voxel map.
pub struct MeshBuilder<'a> {
    /// Block definitions used for solidity, transparency and textures
    catalog: &'a BlockCatalog,
    /// Tiles per row and column of the texture atlas
    atlas_size_in_blocks: u32,
}

impl<'a> MeshBuilder<'a> {
    /// Creates a builder for a given catalog and atlas layout.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Block definitions
    /// * `atlas_size_in_blocks` - Number of tiles along one edge of the texture atlas
    pub fn new(catalog: &'a BlockCatalog, atlas_size_in_blocks: u32) -> Self {
        MeshBuilder {
            catalog,
            atlas_size_in_blocks,
        }
    }

    /// Builds the full mesh of a chunk.
    ///
    /// Voxels are visited in the chunk's y, x, z order and faces in
    /// [`BlockFace`] order, so the output is deterministic for a given voxel map.
    ///
    /// # Arguments
    ///
    /// * `chunk` - The chunk to mesh
    /// * `neighbours` - Lookup for voxels beyond the chunk's bounds
    ///
    /// # Returns
    ///
    /// The chunk's geometry, with vertices in chunk-local coordinates
    pub fn build(&self, chunk: &Chunk, neighbours: &impl VoxelQuery) -> ChunkMesh {
        let mut mesh = ChunkMesh::default();
        let origin = chunk.origin().to_vec();

        for (local, block) in chunk.voxels() {
            if !self.catalog.is_solid(block) {
                continue;
            }

            let descriptor = self.catalog.descriptor(block);
            for face in BlockFace::all() {
                let neighbour_local = local + face.neighbour_offset();
                let neighbour = match chunk.local_voxel(neighbour_local) {
                    Some(neighbour) => neighbour,
                    None => neighbours.block_at(neighbour_local + origin),
                };

                if !self.catalog.is_transparent(neighbour) {
                    continue;
                }

                let quad = Face::new(
                    local,
                    face,
                    descriptor.texture_id(face),
                    self.atlas_size_in_blocks,
                );
                mesh.add_face(&quad, descriptor.transparent);
            }
        }

        trace!(
            "Built mesh for chunk {}: {} faces",
            chunk.coord,
            mesh.face_count()
        );
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::engine_state::voxels::chunk::ChunkCoord;

    /// Everything outside the chunk is air.
    struct OpenAir;

    impl VoxelQuery for OpenAir {
        fn block_at(&self, _position: Point3<i32>) -> BlockId {
            0
        }
    }

    /// Everything outside the chunk is stone.
    struct Buried;

    impl VoxelQuery for Buried {
        fn block_at(&self, _position: Point3<i32>) -> BlockId {
            2
        }
    }

    const STONE: BlockId = 2;
    const GLASS: BlockId = 6;

    fn setup() -> (Chunk, BlockCatalog) {
        let config = WorldConfig {
            chunk_width: 5,
            chunk_height: 10,
            world_size_in_chunks: 4,
            view_distance_in_chunks: 1,
            texture_atlas_size_in_blocks: 4,
        };
        let catalog = BlockCatalog::default_catalog(16).unwrap();
        (Chunk::new(ChunkCoord::new(0, 0), &config), catalog)
    }

    fn build(chunk: &Chunk, catalog: &BlockCatalog, neighbours: &impl VoxelQuery) -> ChunkMesh {
        MeshBuilder::new(catalog, 4).build(chunk, neighbours)
    }

    #[test]
    fn test_empty_chunk_has_empty_mesh() {
        let (chunk, catalog) = setup();
        assert!(build(&chunk, &catalog, &OpenAir).is_empty());
    }

    #[test]
    fn test_single_voxel_emits_six_faces() {
        let (mut chunk, catalog) = setup();
        chunk.edit_voxel(Point3::new(2, 4, 2), STONE, &catalog).unwrap();

        let mesh = build(&chunk, &catalog, &OpenAir);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.opaque_indices.len(), 36);
        assert!(mesh.transparent_indices.is_empty());
    }

    #[test]
    fn test_shared_face_is_culled() {
        let (mut chunk, catalog) = setup();
        chunk.edit_voxel(Point3::new(2, 4, 2), STONE, &catalog).unwrap();
        chunk.edit_voxel(Point3::new(3, 4, 2), STONE, &catalog).unwrap();

        let mesh = build(&chunk, &catalog, &OpenAir);
        assert_eq!(mesh.face_count(), 10);
        assert_eq!(mesh.opaque_indices.len(), 60);
    }

    #[test]
    fn test_transparent_voxel_goes_to_transparent_list() {
        let (mut chunk, catalog) = setup();
        chunk.edit_voxel(Point3::new(2, 4, 2), GLASS, &catalog).unwrap();

        let mesh = build(&chunk, &catalog, &OpenAir);
        assert!(mesh.opaque_indices.is_empty());
        assert_eq!(mesh.transparent_indices.len(), 36);
    }

    #[test]
    fn test_face_against_transparent_neighbour_is_kept() {
        let (mut chunk, catalog) = setup();
        chunk.edit_voxel(Point3::new(2, 4, 2), STONE, &catalog).unwrap();
        chunk.edit_voxel(Point3::new(3, 4, 2), GLASS, &catalog).unwrap();

        let mesh = build(&chunk, &catalog, &OpenAir);
        // Stone keeps all six faces, glass loses the one facing the stone.
        assert_eq!(mesh.opaque_indices.len(), 36);
        assert_eq!(mesh.transparent_indices.len(), 30);
    }

    #[test]
    fn test_indices_reference_valid_vertices() {
        let (mut chunk, catalog) = setup();
        chunk.edit_voxel(Point3::new(0, 0, 0), STONE, &catalog).unwrap();
        chunk.edit_voxel(Point3::new(1, 0, 0), GLASS, &catalog).unwrap();
        chunk.edit_voxel(Point3::new(4, 9, 4), 3, &catalog).unwrap();

        let mesh = build(&chunk, &catalog, &OpenAir);
        assert_eq!(mesh.vertex_count() % 4, 0);
        assert_eq!(mesh.uvs.len(), mesh.vertex_count());
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
        let total = mesh.opaque_indices.len() + mesh.transparent_indices.len();
        assert_eq!(total, mesh.face_count() * 6);
        for index in mesh.opaque_indices.iter().chain(&mesh.transparent_indices) {
            assert!((*index as usize) < mesh.vertex_count());
        }
    }

    #[test]
    fn test_uvs_follow_face_texture() {
        let (mut chunk, catalog) = setup();
        // Planks use atlas tile 4: row 1, column 0 of a 4x4 atlas.
        chunk.edit_voxel(Point3::new(2, 4, 2), 7, &catalog).unwrap();

        let mesh = build(&chunk, &catalog, &OpenAir);
        assert_eq!(&mesh.uvs[..4], &atlas_uvs(4, 4));
        assert_eq!(mesh.uvs[0], [0.0, 0.5]);
    }

    #[test]
    fn test_neighbour_query_culls_seam_faces() {
        let (mut chunk, catalog) = setup();
        chunk.edit_voxel(Point3::new(0, 4, 0), STONE, &catalog).unwrap();

        // Left and back faces lie on the seam; buried they are hidden.
        let open = build(&chunk, &catalog, &OpenAir);
        let buried = build(&chunk, &catalog, &Buried);
        assert_eq!(open.face_count(), 6);
        assert_eq!(buried.face_count(), 4);
    }
}
