use crate::constants::CHUNK_SIZE_I32;
use crate::voxel::chunk::Chunk;
use crate::voxel::types::BlockType;
use glam::IVec3;
use noise::{NoiseFn, Perlin};
use serde::Deserialize;

/// Tuning for the stacked height bands. Scale controls smoothness
/// (higher = smoother), amplitude controls how thick a band can get.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    pub seed: u32,
    pub stone_base: f64,
    pub stone_scale: f64,
    pub stone_amplitude: f64,
    pub dirt_scale: f64,
    pub dirt_amplitude: f64,
    pub grass_scale: f64,
    pub grass_amplitude: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 0,
            stone_base: -20.0,
            stone_scale: 150.0,
            stone_amplitude: 5.0,
            dirt_scale: 80.0,
            dirt_amplitude: 30.0,
            grass_scale: 80.0,
            grass_amplitude: 5.0,
        }
    }
}

/// World heights of the top of each band in one (x, z) column. Each band
/// rests on the previous one, so stone <= dirt <= grass always.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnHeights {
    pub stone: i32,
    pub dirt: i32,
    pub grass: i32,
}

impl ColumnHeights {
    /// Block type at world height `h`. The comparisons are inclusive
    /// upward from below, so every height lands in exactly one band.
    pub fn classify(&self, h: i32) -> BlockType {
        if h <= self.stone {
            BlockType::Stone
        } else if h <= self.dirt {
            BlockType::Dirt
        } else if h <= self.grass {
            BlockType::Grass
        } else {
            BlockType::Air
        }
    }
}

pub struct TerrainGenerator {
    perlin: Perlin,
    params: TerrainParams,
}

impl TerrainGenerator {
    pub fn new(params: TerrainParams) -> Self {
        Self {
            perlin: Perlin::new(params.seed),
            params,
        }
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Band thickness at (x, z): a 2D slice of 3D Perlin noise remapped
    /// from [-1, 1] to [0, amplitude] and floored to a whole number of
    /// blocks.
    fn noise_band(&self, x: i32, z: i32, scale: f64, amplitude: f64) -> i32 {
        let n = self
            .perlin
            .get([f64::from(x) / scale, 0.0, f64::from(z) / scale]);
        (((n + 1.0) * amplitude) / 2.0).floor() as i32
    }

    pub fn column(&self, x: i32, z: i32) -> ColumnHeights {
        let p = &self.params;
        let stone = p.stone_base.floor() as i32
            + self.noise_band(x, z, p.stone_scale, p.stone_amplitude);
        let dirt = stone + self.noise_band(x, z, p.dirt_scale, p.dirt_amplitude);
        let grass = dirt + self.noise_band(x, z, p.grass_scale, p.grass_amplitude);
        ColumnHeights { stone, dirt, grass }
    }

    /// Fills a freshly created chunk from the height bands. One column
    /// lookup per (x, z) pair, shared by the whole y extent.
    pub fn populate(&self, chunk: &mut Chunk) {
        let origin = chunk.origin();
        for x in 0..CHUNK_SIZE_I32 {
            for z in 0..CHUNK_SIZE_I32 {
                let heights = self.column(origin.x + x, origin.z + z);
                for y in 0..CHUNK_SIZE_I32 {
                    let block = heights.classify(origin.y + y);
                    chunk.set_block(IVec3::new(x, y, z), block);
                }
            }
        }
    }
}
