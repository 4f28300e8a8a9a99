use glam::IVec3;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

use crate::constants::{DEFAULT_WORLD_CHUNKS_X, DEFAULT_WORLD_CHUNKS_Y, DEFAULT_WORLD_CHUNKS_Z};
use crate::voxel::terrain::TerrainParams;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// World build settings. Every field defaults, so a partial (or absent)
/// config file yields the canonical world.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World extent, in chunks per axis.
    pub size_chunks: IVec3,
    pub terrain: TerrainParams,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size_chunks: IVec3::new(
                DEFAULT_WORLD_CHUNKS_X,
                DEFAULT_WORLD_CHUNKS_Y,
                DEFAULT_WORLD_CHUNKS_Z,
            ),
            terrain: TerrainParams::default(),
        }
    }
}

pub fn load_config<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_yaml::from_reader(reader)?;
    Ok(config)
}
