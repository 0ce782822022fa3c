//! Geometry side of the voxel engine.
//!
//! This module turns chunk voxel data into meshes and defines the vertex format
//! those meshes are uploaded in. Drawing them is left to the host application.

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use meshing::{ChunkMesh, MeshBuilder, VoxelQuery};
pub use vertex::ChunkVertex;
