//! Chunk geometry handed to the rendering collaborator.
//!
//! A [`ChunkMesh`] is a plain indexed triangle list in chunk-local coordinates,
//! with one UV and one normal per vertex and two index lists: one for opaque
//! blocks and one for transparent blocks, so that the renderer can draw them with
//! different materials.

mod face;

pub use face::{atlas_uvs, Face};

use crate::engine_state::rendering::vertex::ChunkVertex;
use crate::engine_state::voxels::block::block_face::FACE_TRIANGLES;

/// Geometry for one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex positions, chunk-local.
    pub vertices: Vec<[f32; 3]>,
    /// Per-vertex normals: the direction of the face each vertex belongs to.
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex atlas coordinates.
    pub uvs: Vec<[f32; 2]>,
    /// Triangles of opaque blocks.
    pub opaque_indices: Vec<u32>,
    /// Triangles of transparent blocks.
    pub transparent_indices: Vec<u32>,
}

impl ChunkMesh {
    /// Whether the mesh has no geometry at all.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of quads emitted.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Appends a quad, routing its triangles by the owning voxel's transparency.
    pub fn add_face(&mut self, face: &Face, transparent: bool) {
        let vertex_index = self.vertices.len() as u32;
        let normal = face.block_face.normal();

        self.vertices.extend_from_slice(&face.corners);
        self.uvs.extend_from_slice(&face.uvs);
        self.normals.extend_from_slice(&[normal; 4]);

        let indices = if transparent {
            &mut self.transparent_indices
        } else {
            &mut self.opaque_indices
        };
        indices.extend(FACE_TRIANGLES.iter().map(|offset| vertex_index + offset));
    }

    /// Interleaves positions, normals and UVs into GPU vertices.
    pub fn interleaved(&self) -> Vec<ChunkVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((position, normal), uv)| ChunkVertex::new(*position, *normal, *uv))
            .collect()
    }
}
