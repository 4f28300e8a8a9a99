// Chunk dimensions
pub const CHUNK_SIZE: usize = 16;
pub const CHUNK_SIZE_I32: i32 = 16;
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

// World defaults (overridden by config)
pub const DEFAULT_WORLD_CHUNKS_X: i32 = 10;
pub const DEFAULT_WORLD_CHUNKS_Y: i32 = 2;
pub const DEFAULT_WORLD_CHUNKS_Z: i32 = 10;

// Texture atlas
pub const ATLAS_TILES_PER_SIDE: u32 = 4;
pub const TILE_UV_SIZE: f32 = 1.0 / ATLAS_TILES_PER_SIDE as f32;
