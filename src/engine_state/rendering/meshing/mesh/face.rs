use cgmath::Point3;

use crate::engine_state::voxels::block::block_face::{BlockFace, VOXEL_CORNERS};

/// A single quad emitted for one visible face of a voxel.
///
/// The four corners follow the face's corner template, so combined with
/// [`FACE_TRIANGLES`](crate::engine_state::voxels::block::block_face::FACE_TRIANGLES)
/// they form two consistently wound triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Corner positions, chunk-local
    pub corners: [[f32; 3]; 4],
    /// Atlas coordinates for each corner
    pub uvs: [[f32; 2]; 4],
    /// Which side of the voxel this face represents
    pub block_face: BlockFace,
}

impl Face {
    /// Creates the quad for `block_face` of the voxel at a chunk-local position,
    /// textured with atlas tile `texture_id`.
    pub fn new(
        position: Point3<i32>,
        block_face: BlockFace,
        texture_id: u8,
        atlas_size_in_blocks: u32,
    ) -> Self {
        let origin = [position.x as f32, position.y as f32, position.z as f32];
        let corners = block_face.corner_template().map(|corner| {
            let offset = VOXEL_CORNERS[corner];
            [
                origin[0] + offset[0],
                origin[1] + offset[1],
                origin[2] + offset[2],
            ]
        });

        Face {
            corners,
            uvs: atlas_uvs(texture_id, atlas_size_in_blocks),
            block_face,
        }
    }
}

/// Atlas coordinates of a tile's four corners, in quad order.
///
/// Tiles are numbered row by row from the top-left of the atlas, while `v`
/// grows upwards, hence the flip.
pub fn atlas_uvs(texture_id: u8, atlas_size_in_blocks: u32) -> [[f32; 2]; 4] {
    let atlas_size = atlas_size_in_blocks.max(1);
    let size = 1.0 / atlas_size as f32;
    let row = u32::from(texture_id) / atlas_size;
    let column = u32::from(texture_id) - row * atlas_size;

    let u = column as f32 * size;
    let v = 1.0 - (row + 1) as f32 * size;

    [[u, v], [u, v + size], [u + size, v], [u + size, v + size]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_uvs_first_tile() {
        let uvs = atlas_uvs(0, 4);
        assert_eq!(uvs, [[0.0, 0.75], [0.0, 1.0], [0.25, 0.75], [0.25, 1.0]]);
    }

    #[test]
    fn test_atlas_uvs_second_row() {
        // Tile 7 in a 4x4 atlas: row 1, column 3.
        let uvs = atlas_uvs(7, 4);
        assert_eq!(uvs, [[0.75, 0.5], [0.75, 0.75], [1.0, 0.5], [1.0, 0.75]]);
    }

    #[test]
    fn test_face_corners_are_offset_by_position() {
        let face = Face::new(Point3::new(2, 3, 4), BlockFace::TOP, 0, 4);
        for corner in face.corners {
            assert_eq!(corner[1], 4.0);
            assert!(corner[0] == 2.0 || corner[0] == 3.0);
            assert!(corner[2] == 4.0 || corner[2] == 5.0);
        }
    }
}
