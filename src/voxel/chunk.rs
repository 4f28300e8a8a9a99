use crate::constants::{CHUNK_SIZE, CHUNK_SIZE_I32, CHUNK_VOLUME};
use crate::voxel::types::BlockType;
use glam::IVec3;

pub struct Chunk {
    blocks: [BlockType; CHUNK_VOLUME],
    dirty: bool,
    // World coords of the chunk's minimum corner, a multiple of CHUNK_SIZE
    // on every axis.
    origin: IVec3,
}

impl Chunk {
    pub fn new(origin: IVec3) -> Self {
        debug_assert_eq!(
            origin.rem_euclid(IVec3::splat(CHUNK_SIZE_I32)),
            IVec3::ZERO,
            "chunk origin must be grid-aligned"
        );
        Self {
            blocks: [BlockType::Air; CHUNK_VOLUME],
            dirty: true,
            origin,
        }
    }

    /// Block at a chunk-local position. Any position outside
    /// [0, CHUNK_SIZE) reads as Air, so neighbor checks at the chunk
    /// boundary need no special casing.
    pub fn block(&self, local: IVec3) -> BlockType {
        if !Self::inside(local) {
            return BlockType::Air;
        }
        self.blocks[Self::index(local)]
    }

    /// Writes a block at a chunk-local position and marks the chunk dirty
    /// when the content changed. Out-of-range positions are ignored.
    /// Returns whether the stored value changed.
    pub fn set_block(&mut self, local: IVec3, block: BlockType) -> bool {
        if !Self::inside(local) {
            return false;
        }
        let index = Self::index(local);
        if self.blocks[index] == block {
            return false;
        }
        self.blocks[index] = block;
        self.dirty = true;
        true
    }

    pub fn origin(&self) -> IVec3 {
        self.origin
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    fn inside(local: IVec3) -> bool {
        local.cmpge(IVec3::ZERO).all() && local.cmplt(IVec3::splat(CHUNK_SIZE_I32)).all()
    }

    fn index(local: IVec3) -> usize {
        let (x, y, z) = (local.x as usize, local.y as usize, local.z as usize);
        x + (y * CHUNK_SIZE) + (z * CHUNK_SIZE * CHUNK_SIZE)
    }
}
