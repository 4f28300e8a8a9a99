use glam::IVec3;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    #[default]
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
}

/// The six faces of a block, named by the world axis they point along:
/// east/west are +x/-x, north/south are +z/-z.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Face {
    Up,
    Down,
    East,
    West,
    North,
    South,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Down,
        Face::East,
        Face::West,
        Face::North,
        Face::South,
    ];

    /// Unit step from a block to the neighbor this face looks at.
    pub fn offset(self) -> IVec3 {
        match self {
            Face::Up => IVec3::Y,
            Face::Down => IVec3::NEG_Y,
            Face::East => IVec3::X,
            Face::West => IVec3::NEG_X,
            Face::North => IVec3::Z,
            Face::South => IVec3::NEG_Z,
        }
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::Up => Face::Down,
            Face::Down => Face::Up,
            Face::East => Face::West,
            Face::West => Face::East,
            Face::North => Face::South,
            Face::South => Face::North,
        }
    }
}

impl BlockType {
    /// Whether the given face of this block occludes the neighbor behind it.
    /// Current variants are uniformly solid or empty; the face argument
    /// matters once partially solid shapes (slopes, slabs) exist.
    pub fn is_face_solid(self, _face: Face) -> bool {
        !matches!(self, BlockType::Air)
    }

    /// Cell of this face's texture in the 4x4 atlas, as (column, row).
    pub fn atlas_tile(self, face: Face) -> (u32, u32) {
        match (self, face) {
            (BlockType::Grass, Face::Up) => (2, 0),
            (BlockType::Grass, Face::Down) => (1, 0),
            (BlockType::Grass, _) => (0, 0),
            (BlockType::Dirt, _) => (1, 0),
            (BlockType::Stone, _) => (0, 1),
            // Air never reaches the mesher; any tile works.
            (BlockType::Air, _) => (0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_is_solid_on_no_face() {
        for face in Face::ALL {
            assert!(!BlockType::Air.is_face_solid(face));
        }
    }

    #[test]
    fn test_filled_blocks_are_solid_on_every_face() {
        for block in [BlockType::Grass, BlockType::Dirt, BlockType::Stone] {
            for face in Face::ALL {
                assert!(block.is_face_solid(face));
            }
        }
    }

    #[test]
    fn test_opposite_faces_cancel() {
        for face in Face::ALL {
            assert_eq!(face.offset() + face.opposite().offset(), IVec3::ZERO);
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn test_grass_tiles_differ_per_face() {
        assert_eq!(BlockType::Grass.atlas_tile(Face::Up), (2, 0));
        assert_eq!(BlockType::Grass.atlas_tile(Face::Down), (1, 0));
        for face in [Face::East, Face::West, Face::North, Face::South] {
            assert_eq!(BlockType::Grass.atlas_tile(face), (0, 0));
        }
    }

    #[test]
    fn test_uniform_tiles() {
        for face in Face::ALL {
            assert_eq!(BlockType::Dirt.atlas_tile(face), (1, 0));
            assert_eq!(BlockType::Stone.atlas_tile(face), (0, 1));
        }
    }
}
