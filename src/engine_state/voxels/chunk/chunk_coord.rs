//! Chunk coordinates: a chunk's position in the world grid, measured in chunks.

use std::fmt;

use cgmath::Point3;

/// Position of a chunk in the world grid.
///
/// Chunks are columns: they span the full world height, so only `x` and `z`
/// identify one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    /// Column index along the world X axis.
    pub x: i32,
    /// Column index along the world Z axis.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a chunk coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// The chunk containing a world voxel position.
    pub fn from_voxel(position: Point3<i32>, chunk_width: i32) -> Self {
        ChunkCoord {
            x: position.x.div_euclid(chunk_width),
            z: position.z.div_euclid(chunk_width),
        }
    }

    /// The chunk containing a continuous world position.
    pub fn from_world_position(position: Point3<f32>, chunk_width: i32) -> Self {
        Self::from_voxel(voxel_position(position), chunk_width)
    }

    /// World voxel position of this chunk's `(0, 0, 0)` corner.
    pub fn origin(&self, chunk_width: i32) -> Point3<i32> {
        Point3::new(self.x * chunk_width, 0, self.z * chunk_width)
    }

    /// Chebyshev (box) distance between two chunks.
    pub fn distance(&self, other: &ChunkCoord) -> i32 {
        let distance = self.x.abs_diff(other.x).max(self.z.abs_diff(other.z));
        i32::try_from(distance).unwrap_or(i32::MAX)
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Floors a continuous world position onto the voxel grid.
pub fn voxel_position(position: Point3<f32>) -> Point3<i32> {
    Point3::new(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_voxel_floors_negative_positions() {
        assert_eq!(ChunkCoord::from_voxel(Point3::new(0, 5, 15), 16), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_voxel(Point3::new(16, 5, 31), 16), ChunkCoord::new(1, 1));
        assert_eq!(ChunkCoord::from_voxel(Point3::new(-1, 5, -16), 16), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::from_voxel(Point3::new(-17, 5, 0), 16), ChunkCoord::new(-2, 0));
    }

    #[test]
    fn test_from_world_position() {
        let coord = ChunkCoord::from_world_position(Point3::new(9.99, 70.0, -0.5), 5);
        assert_eq!(coord, ChunkCoord::new(1, -1));
    }

    #[test]
    fn test_box_distance() {
        let centre = ChunkCoord::new(3, 3);
        assert_eq!(centre.distance(&ChunkCoord::new(3, 3)), 0);
        assert_eq!(centre.distance(&ChunkCoord::new(4, 2)), 1);
        assert_eq!(centre.distance(&ChunkCoord::new(0, 5)), 3);
        assert_eq!(centre.distance(&ChunkCoord::new(i32::MIN, 3)), i32::MAX);
    }
}
