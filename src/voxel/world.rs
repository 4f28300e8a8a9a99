use std::collections::HashMap;

use glam::{IVec3, Vec3};
use log::{debug, info};

use crate::config::WorldConfig;
use crate::constants::CHUNK_SIZE_I32;
use crate::voxel::chunk::Chunk;
use crate::voxel::meshing::{ChunkMesh, generate_chunk_mesh};
use crate::voxel::terrain::TerrainGenerator;
use crate::voxel::types::BlockType;

/// The chunk registry. Chunks are keyed by their origin in world
/// coordinates (the minimum corner, grid-aligned), one chunk per origin.
pub struct VoxelWorld {
    chunks: HashMap<IVec3, Chunk>,
    generator: TerrainGenerator,
}

impl VoxelWorld {
    pub fn new(generator: TerrainGenerator) -> Self {
        Self {
            chunks: HashMap::new(),
            generator,
        }
    }

    /// Builds the full configured grid of chunks, each populated by the
    /// terrain generator.
    pub fn generate(config: &WorldConfig) -> Self {
        let mut world = Self::new(TerrainGenerator::new(config.terrain.clone()));
        let size = config.size_chunks;
        for x in 0..size.x {
            for z in 0..size.z {
                for y in 0..size.y {
                    world.create_chunk(IVec3::new(x, y, z) * CHUNK_SIZE_I32);
                }
            }
        }
        info!(
            "generated {} chunks ({}x{}x{})",
            world.chunks.len(),
            size.x,
            size.y,
            size.z
        );
        world
    }

    /// Origin of the chunk owning a world position: per-axis floor
    /// division (not truncation, so negative coordinates resolve to the
    /// chunk below them) scaled back to world units.
    pub fn chunk_origin(world_pos: IVec3) -> IVec3 {
        world_pos.div_euclid(IVec3::splat(CHUNK_SIZE_I32)) * CHUNK_SIZE_I32
    }

    pub fn get_chunk(&self, origin: IVec3) -> Option<&Chunk> {
        self.chunks.get(&origin)
    }

    pub fn get_chunk_mut(&mut self, origin: IVec3) -> Option<&mut Chunk> {
        self.chunks.get_mut(&origin)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Creates and populates the chunk at `origin` if none exists yet.
    /// The new chunk starts dirty.
    pub fn create_chunk(&mut self, origin: IVec3) {
        if self.chunks.contains_key(&origin) {
            return;
        }
        let mut chunk = Chunk::new(origin);
        self.generator.populate(&mut chunk);
        debug!("created chunk at {origin}");
        self.chunks.insert(origin, chunk);
    }

    /// Block at a world position; Air when no chunk backs it.
    pub fn get_block(&self, world_pos: IVec3) -> BlockType {
        let origin = Self::chunk_origin(world_pos);
        match self.chunks.get(&origin) {
            Some(chunk) => chunk.block(world_pos - origin),
            None => BlockType::Air,
        }
    }

    /// Writes a block at a world position; no-op when no chunk backs it.
    /// When the content changed and the block sits on a chunk face, the
    /// chunk sharing that face is marked dirty too, so seam geometry it
    /// exposes or covers gets rebuilt.
    pub fn set_block(&mut self, world_pos: IVec3, block: BlockType) {
        let origin = Self::chunk_origin(world_pos);
        let local = world_pos - origin;
        let Some(chunk) = self.chunks.get_mut(&origin) else {
            return;
        };
        if !chunk.set_block(local, block) {
            return;
        }
        for axis in 0..3 {
            if local[axis] == 0 {
                self.mark_dirty_at(world_pos - IVec3::AXES[axis]);
            } else if local[axis] == CHUNK_SIZE_I32 - 1 {
                self.mark_dirty_at(world_pos + IVec3::AXES[axis]);
            }
        }
    }

    /// Origins of chunks whose mesh is stale.
    pub fn dirty_chunks(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.chunks
            .iter()
            .filter(|(_, chunk)| chunk.is_dirty())
            .map(|(origin, _)| *origin)
    }

    /// Rebuilds the mesh of the chunk at `origin` if it is stale, clears
    /// the dirty flag, and hands the buffers out. Returns None when the
    /// chunk is clean or absent. Consumers call this for each chunk they
    /// are about to draw; nothing in the world polls on its own.
    pub fn rebuild_if_dirty(&mut self, origin: IVec3) -> Option<ChunkMesh> {
        let chunk = self.chunks.get_mut(&origin)?;
        if !chunk.is_dirty() {
            return None;
        }
        let mesh = generate_chunk_mesh(chunk);
        chunk.clear_dirty();
        debug!("rebuilt chunk at {origin}: {} faces", mesh.face_count());
        Some(mesh)
    }

    fn mark_dirty_at(&mut self, world_pos: IVec3) {
        if let Some(chunk) = self.chunks.get_mut(&Self::chunk_origin(world_pos)) {
            chunk.mark_dirty();
        }
    }
}

/// Reduces a surface hit (point + outward normal, as reported by the
/// consumer's raycast) to the solid block that was struck: nudge half a
/// unit against the normal, then round to the cell center grid.
pub fn block_pos_from_hit(point: Vec3, normal: Vec3) -> IVec3 {
    (point - normal / 2.0).round().as_ivec3()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::terrain::TerrainParams;
    use crate::voxel::types::Face;

    // Terrain that produces no blocks at all, so tests control every cell.
    fn air_params() -> TerrainParams {
        TerrainParams {
            stone_base: -1000.0,
            stone_amplitude: 0.0,
            dirt_amplitude: 0.0,
            grass_amplitude: 0.0,
            ..TerrainParams::default()
        }
    }

    fn air_world(origins: &[IVec3]) -> VoxelWorld {
        let mut world = VoxelWorld::new(TerrainGenerator::new(air_params()));
        for &origin in origins {
            world.create_chunk(origin);
            world.get_chunk_mut(origin).unwrap().clear_dirty();
        }
        world
    }

    #[test]
    fn test_chunk_origin_floors_negative_coordinates() {
        assert_eq!(VoxelWorld::chunk_origin(IVec3::new(0, 0, 0)), IVec3::ZERO);
        assert_eq!(
            VoxelWorld::chunk_origin(IVec3::new(15, 16, 17)),
            IVec3::new(0, 16, 16)
        );
        assert_eq!(
            VoxelWorld::chunk_origin(IVec3::new(-1, -16, -17)),
            IVec3::new(-16, -16, -32)
        );
    }

    #[test]
    fn test_origin_bounds_every_position_it_owns() {
        for w in [-33, -16, -1, 0, 7, 15, 16, 100] {
            let pos = IVec3::new(w, -w, w * 3);
            let origin = VoxelWorld::chunk_origin(pos);
            assert!(origin.cmple(pos).all(), "{pos}");
            assert!(pos.cmplt(origin + IVec3::splat(CHUNK_SIZE_I32)).all(), "{pos}");
        }
    }

    #[test]
    fn test_missing_chunk_reads_air_and_ignores_writes() {
        let mut world = air_world(&[]);
        let pos = IVec3::new(5, 5, 5);
        assert_eq!(world.get_block(pos), BlockType::Air);
        world.set_block(pos, BlockType::Stone);
        assert_eq!(world.get_block(pos), BlockType::Air);
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn test_place_then_read_round_trip() {
        let mut world = air_world(&[IVec3::ZERO]);
        world.set_block(IVec3::ZERO, BlockType::Stone);
        let block = world.get_block(IVec3::ZERO);
        for face in Face::ALL {
            assert!(block.is_face_solid(face));
        }
    }

    #[test]
    fn test_boundary_edit_marks_the_sharing_neighbor_only() {
        let origins = [
            IVec3::ZERO,
            IVec3::new(-16, 0, 0),
            IVec3::new(16, 0, 0),
            IVec3::new(0, -16, 0),
            IVec3::new(0, 16, 0),
            IVec3::new(0, 0, -16),
            IVec3::new(0, 0, 16),
        ];
        let mut world = air_world(&origins);

        // x = 0 face, y and z interior
        world.set_block(IVec3::new(0, 5, 5), BlockType::Stone);
        assert!(world.get_chunk(IVec3::ZERO).unwrap().is_dirty());
        assert!(world.get_chunk(IVec3::new(-16, 0, 0)).unwrap().is_dirty());
        for origin in &origins[2..] {
            assert!(!world.get_chunk(*origin).unwrap().is_dirty(), "{origin}");
        }
    }

    #[test]
    fn test_edit_at_far_face_marks_the_positive_neighbor() {
        let mut world = air_world(&[IVec3::ZERO, IVec3::new(16, 0, 0)]);
        world.set_block(IVec3::new(15, 5, 5), BlockType::Stone);
        assert!(world.get_chunk(IVec3::new(16, 0, 0)).unwrap().is_dirty());
    }

    #[test]
    fn test_corner_edit_marks_all_three_neighbors() {
        let origins = [
            IVec3::ZERO,
            IVec3::new(-16, 0, 0),
            IVec3::new(0, -16, 0),
            IVec3::new(0, 0, -16),
        ];
        let mut world = air_world(&origins);
        world.set_block(IVec3::ZERO, BlockType::Dirt);
        for origin in origins {
            assert!(world.get_chunk(origin).unwrap().is_dirty(), "{origin}");
        }
    }

    #[test]
    fn test_interior_edit_marks_no_neighbor() {
        let mut world = air_world(&[IVec3::ZERO, IVec3::new(16, 0, 0)]);
        world.set_block(IVec3::new(8, 8, 8), BlockType::Stone);
        assert!(!world.get_chunk(IVec3::new(16, 0, 0)).unwrap().is_dirty());
    }

    #[test]
    fn test_unchanged_write_leaves_everything_clean() {
        let mut world = air_world(&[IVec3::ZERO, IVec3::new(-16, 0, 0)]);
        world.set_block(IVec3::new(0, 5, 5), BlockType::Air);
        assert!(!world.get_chunk(IVec3::ZERO).unwrap().is_dirty());
        assert!(!world.get_chunk(IVec3::new(-16, 0, 0)).unwrap().is_dirty());
    }

    #[test]
    fn test_rebuild_if_dirty_rebuilds_once() {
        let mut world = air_world(&[IVec3::ZERO]);
        world.set_block(IVec3::new(8, 8, 8), BlockType::Stone);

        let mesh = world.rebuild_if_dirty(IVec3::ZERO).unwrap();
        assert_eq!(mesh.face_count(), 6);
        assert!(world.rebuild_if_dirty(IVec3::ZERO).is_none());

        world.set_block(IVec3::new(8, 9, 8), BlockType::Stone);
        let mesh = world.rebuild_if_dirty(IVec3::ZERO).unwrap();
        assert_eq!(mesh.face_count(), 10);
    }

    #[test]
    fn test_rebuild_of_absent_chunk_is_none() {
        let mut world = air_world(&[]);
        assert!(world.rebuild_if_dirty(IVec3::ZERO).is_none());
    }

    #[test]
    fn test_fresh_chunks_are_listed_dirty() {
        let mut world = VoxelWorld::new(TerrainGenerator::new(air_params()));
        world.create_chunk(IVec3::ZERO);
        world.create_chunk(IVec3::new(16, 0, 0));
        let mut dirty: Vec<_> = world.dirty_chunks().collect();
        dirty.sort_by_key(|origin| origin.x);
        assert_eq!(dirty, vec![IVec3::ZERO, IVec3::new(16, 0, 0)]);

        world.rebuild_if_dirty(IVec3::ZERO);
        assert_eq!(world.dirty_chunks().count(), 1);
    }

    #[test]
    fn test_create_chunk_keeps_the_existing_one() {
        let mut world = air_world(&[IVec3::ZERO]);
        world.set_block(IVec3::new(1, 1, 1), BlockType::Stone);
        world.create_chunk(IVec3::ZERO);
        assert_eq!(world.get_block(IVec3::new(1, 1, 1)), BlockType::Stone);
    }

    #[test]
    fn test_generate_builds_the_configured_grid() {
        let config = WorldConfig {
            size_chunks: IVec3::new(2, 1, 2),
            terrain: TerrainParams {
                stone_base: 4.0,
                stone_amplitude: 0.0,
                dirt_amplitude: 0.0,
                grass_amplitude: 0.0,
                ..TerrainParams::default()
            },
        };
        let world = VoxelWorld::generate(&config);
        assert_eq!(world.chunk_count(), 4);
        for origin in [
            IVec3::ZERO,
            IVec3::new(16, 0, 0),
            IVec3::new(0, 0, 16),
            IVec3::new(16, 0, 16),
        ] {
            assert!(world.get_chunk(origin).is_some(), "{origin}");
        }
        assert_eq!(world.get_block(IVec3::new(20, 4, 20)), BlockType::Stone);
        assert_eq!(world.get_block(IVec3::new(20, 5, 20)), BlockType::Air);
    }

    #[test]
    fn test_hit_reduction_steps_into_the_struck_block() {
        // +x face of the block at the origin
        let pos = block_pos_from_hit(Vec3::new(0.5, 0.2, -0.3), Vec3::X);
        assert_eq!(pos, IVec3::ZERO);
        // top face of a block further out
        let pos = block_pos_from_hit(Vec3::new(3.2, 5.5, 7.8), Vec3::Y);
        assert_eq!(pos, IVec3::new(3, 5, 8));
        // bottom face reached from below
        let pos = block_pos_from_hit(Vec3::new(3.2, 4.5, 7.8), Vec3::NEG_Y);
        assert_eq!(pos, IVec3::new(3, 5, 8));
    }
}
