use crate::constants::{CHUNK_SIZE_I32, TILE_UV_SIZE};
use crate::voxel::chunk::Chunk;
use crate::voxel::types::{BlockType, Face};
use glam::{IVec3, Vec3};

/// Geometry buffers for one chunk, rebuilt from scratch on every update.
/// The collider buffers receive the same vertices and triangles in
/// lock-step with the render buffers, so indices coincide; the consumer
/// may hand them to physics as a separate, coarser mesh.
pub struct ChunkMesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub uvs: Vec<[f32; 2]>,
    pub collider_positions: Vec<[f32; 3]>,
    pub collider_indices: Vec<u32>,
}

impl ChunkMesh {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
            uvs: Vec::new(),
            collider_positions: Vec::new(),
            collider_indices: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn face_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// Appends one quad. Corners must arrive upper-left, upper-right,
    /// lower-right, lower-left — clockwise seen from outside the block.
    /// The two triangles fan from that order, so reversing it flips the
    /// implied surface normal.
    pub fn add_face(&mut self, corners: [Vec3; 4]) {
        for corner in corners {
            self.positions.push(corner.to_array());
            self.collider_positions.push(corner.to_array());
        }
        let n = self.positions.len() as u32;
        // upper-right triangle, then lower-left triangle
        self.add_triangle(n - 4, n - 3, n - 2);
        self.add_triangle(n - 2, n - 1, n - 4);
    }

    /// Appends the four texture coordinates of the face just added.
    /// Exactly one call per add_face, in the same corner order.
    pub fn add_face_uvs(&mut self, uvs: [[f32; 2]; 4]) {
        debug_assert_eq!(
            self.uvs.len() + 4,
            self.positions.len(),
            "one add_face_uvs per add_face"
        );
        self.uvs.extend(uvs);
    }

    fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend([a, b, c]);
        self.collider_indices.extend([a, b, c]);
    }
}

/// The four corners of a block face, in the fixed clockwise-from-outside
/// order add_face expects. `pos` is the block's cell center; corners sit
/// half a unit away on each axis.
pub fn face_corners(pos: IVec3, face: Face) -> [Vec3; 4] {
    let p = pos.as_vec3();
    let (x0, x1) = (p.x - 0.5, p.x + 0.5);
    let (y0, y1) = (p.y - 0.5, p.y + 0.5);
    let (z0, z1) = (p.z - 0.5, p.z + 0.5);

    match face {
        Face::Up => [
            Vec3::new(x0, y1, z1),
            Vec3::new(x1, y1, z1),
            Vec3::new(x1, y1, z0),
            Vec3::new(x0, y1, z0),
        ],
        Face::Down => [
            Vec3::new(x0, y0, z0),
            Vec3::new(x1, y0, z0),
            Vec3::new(x1, y0, z1),
            Vec3::new(x0, y0, z1),
        ],
        Face::East => [
            Vec3::new(x1, y1, z0),
            Vec3::new(x1, y1, z1),
            Vec3::new(x1, y0, z1),
            Vec3::new(x1, y0, z0),
        ],
        Face::West => [
            Vec3::new(x0, y1, z1),
            Vec3::new(x0, y1, z0),
            Vec3::new(x0, y0, z0),
            Vec3::new(x0, y0, z1),
        ],
        Face::North => [
            Vec3::new(x1, y1, z1),
            Vec3::new(x0, y1, z1),
            Vec3::new(x0, y0, z1),
            Vec3::new(x1, y0, z1),
        ],
        Face::South => [
            Vec3::new(x0, y1, z0),
            Vec3::new(x1, y1, z0),
            Vec3::new(x1, y0, z0),
            Vec3::new(x0, y0, z0),
        ],
    }
}

/// Texture coordinates for a face, matching the corner order of
/// face_corners one-to-one: upper-left, upper-right, lower-right,
/// lower-left of the block's atlas tile.
pub fn face_uvs(block: BlockType, face: Face) -> [[f32; 2]; 4] {
    let (col, row) = block.atlas_tile(face);
    let u = col as f32 * TILE_UV_SIZE;
    let v = row as f32 * TILE_UV_SIZE;

    [
        [u, v + TILE_UV_SIZE],
        [u + TILE_UV_SIZE, v + TILE_UV_SIZE],
        [u + TILE_UV_SIZE, v],
        [u, v],
    ]
}

/// Builds the surface mesh of a chunk: for every non-Air block, a face is
/// emitted toward each neighbor that is not solid on the side pointing
/// back at the block. Neighbor lookups stay within this chunk (anything
/// past the boundary reads as Air), so faces on the chunk seam are always
/// emitted even when an adjacent chunk covers them.
pub fn generate_chunk_mesh(chunk: &Chunk) -> ChunkMesh {
    let mut mesh = ChunkMesh::new();

    for x in 0..CHUNK_SIZE_I32 {
        for z in 0..CHUNK_SIZE_I32 {
            for y in 0..CHUNK_SIZE_I32 {
                let local = IVec3::new(x, y, z);
                let block = chunk.block(local);
                if block == BlockType::Air {
                    continue;
                }

                for face in Face::ALL {
                    let neighbor = chunk.block(local + face.offset());
                    if !neighbor.is_face_solid(face.opposite()) {
                        mesh.add_face(face_corners(local, face));
                        mesh.add_face_uvs(face_uvs(block, face));
                    }
                }
            }
        }
    }

    mesh
}
