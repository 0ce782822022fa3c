//! # Block Face Module
//!
//! This module defines the six faces of a voxel block, in the fixed order used by
//! the block catalog's texture table and by the mesh builder's face templates.

use cgmath::Vector3;
use num_derive::FromPrimitive;

/// Represents the six possible faces of a voxel block.
///
/// The discriminants are the face indices used by [`BlockDescriptor::face_textures`]
/// and by the mesh templates, so the order is load-bearing:
/// Back, Front, Top, Bottom, Left, Right.
///
/// [`BlockDescriptor::face_textures`]: super::BlockDescriptor::face_textures
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, FromPrimitive)]
pub enum BlockFace {
    /// The back face (facing negative Z)
    BACK = 0,

    /// The front face (facing positive Z)
    FRONT = 1,

    /// The top face (facing positive Y)
    TOP = 2,

    /// The bottom face (facing negative Y)
    BOTTOM = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

/// Corners of a unit voxel, indexed by the face vertex templates.
pub const VOXEL_CORNERS: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Triangle order over the four vertices of a face quad.
pub const FACE_TRIANGLES: [u32; 6] = [0, 1, 2, 2, 1, 3];

impl BlockFace {
    /// Returns all six faces in index order.
    pub fn all() -> [BlockFace; 6] {
        [
            BlockFace::BACK,
            BlockFace::FRONT,
            BlockFace::TOP,
            BlockFace::BOTTOM,
            BlockFace::LEFT,
            BlockFace::RIGHT,
        ]
    }

    /// Converts a raw face index into a face.
    ///
    /// Returns `None` for anything outside `0..6`.
    pub fn from_index(index: u8) -> Option<BlockFace> {
        num::FromPrimitive::from_u8(index)
    }

    /// Offset from a voxel to the neighbour that shares this face.
    pub fn neighbour_offset(self) -> Vector3<i32> {
        match self {
            BlockFace::BACK => Vector3::new(0, 0, -1),
            BlockFace::FRONT => Vector3::new(0, 0, 1),
            BlockFace::TOP => Vector3::new(0, 1, 0),
            BlockFace::BOTTOM => Vector3::new(0, -1, 0),
            BlockFace::LEFT => Vector3::new(-1, 0, 0),
            BlockFace::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// Unit normal of the face, pointing out of the voxel.
    pub fn normal(self) -> [f32; 3] {
        let offset = self.neighbour_offset();
        [offset.x as f32, offset.y as f32, offset.z as f32]
    }

    /// Indices into [`VOXEL_CORNERS`] for the four vertices of this face.
    ///
    /// Combined with [`FACE_TRIANGLES`] the winding is counter-clockwise when
    /// viewed from outside the voxel.
    pub fn corner_template(self) -> [usize; 4] {
        match self {
            BlockFace::BACK => [0, 3, 1, 2],
            BlockFace::FRONT => [5, 6, 4, 7],
            BlockFace::TOP => [3, 7, 2, 6],
            BlockFace::BOTTOM => [1, 5, 0, 4],
            BlockFace::LEFT => [4, 7, 0, 3],
            BlockFace::RIGHT => [1, 2, 5, 6],
        }
    }

    /// Whether this face points along the horizontal plane, i.e. across a chunk seam.
    pub fn is_horizontal(self) -> bool {
        !matches!(self, BlockFace::TOP | BlockFace::BOTTOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_index_round_trip() {
        for face in BlockFace::all() {
            assert_eq!(BlockFace::from_index(face as u8), Some(face));
        }
        assert_eq!(BlockFace::from_index(6), None);
    }

    #[test]
    fn test_offsets_are_opposed_in_pairs() {
        let pairs = [
            (BlockFace::BACK, BlockFace::FRONT),
            (BlockFace::TOP, BlockFace::BOTTOM),
            (BlockFace::LEFT, BlockFace::RIGHT),
        ];
        for (a, b) in pairs {
            assert_eq!(a.neighbour_offset() + b.neighbour_offset(), Vector3::new(0, 0, 0));
        }
    }

    #[test]
    fn test_corner_templates_lie_on_their_face() {
        for face in BlockFace::all() {
            let offset = face.neighbour_offset();
            // Every corner of the quad sits on the plane the face points out of.
            let (axis, side) = if offset.x != 0 {
                (0, offset.x)
            } else if offset.y != 0 {
                (1, offset.y)
            } else {
                (2, offset.z)
            };
            let expected = if side > 0 { 1.0 } else { 0.0 };
            for corner in face.corner_template() {
                assert_eq!(VOXEL_CORNERS[corner][axis], expected, "{:?}", face);
            }
        }
    }
}
