use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Location of the user's configuration file, if the platform has a configuration directory.
pub fn path() -> Option<PathBuf> {
    Some(
        dirs::config_dir()?
            .join("maze-obstacles")
            .join("config.toml"),
    )
}

/// Settings for building obstacles from a tile grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Edge length of one tile in pixels. Must be positive and even.
    pub tile_size: i32,

    /// Maximum number of tracing steps for a single obstacle.
    pub iteration_cap: usize,

    /// Merge runs of straight segments after tracing.
    pub optimize: bool,

    /// Name of the grid property holding the top left tile of the ghost house.
    pub house_origin_property: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tile_size: 8,
            iteration_cap: 1000,
            optimize: true,
            house_origin_property: "pos_house_min_tile".into(),
        }
    }
}

impl Config {
    /// Half a tile, in pixels.
    #[inline]
    pub fn half_tile(&self) -> i32 {
        self.tile_size / 2
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.tile_size <= 0 || self.tile_size % 2 != 0 {
            return Err(Error::InvalidTileSize(self.tile_size));
        }
        if self.iteration_cap == 0 {
            return Err(Error::ZeroIterationCap);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), Error> {
        self.save_to(&path().ok_or(Error::NoConfigDir)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let serialized = toml::ser::to_string_pretty(self)?;
        std::fs::write(path, serialized.as_bytes()).map_err(Into::into)
    }

    pub fn load() -> Result<Self, Error> {
        Self::load_from(&path().ok_or(Error::NoConfigDir)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the user's configuration, falling back to the defaults when there is none.
    pub fn load_or_default() -> Result<Self, Error> {
        match Self::load() {
            Err(Error::NoConfigDir) => Ok(Self::default()),
            Err(Error::CouldNotLoad(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no configuration file; using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration could not be loaded")]
    CouldNotLoad(#[from] std::io::Error),
    #[error("malformed configuration")]
    Malformed(#[from] toml::de::Error),
    #[error("failed to serialize")]
    CouldNotSerialize(#[from] toml::ser::Error),
    #[error("no configuration directory on this platform")]
    NoConfigDir,
    #[error("tile size must be positive and even; got {0}")]
    InvalidTileSize(i32),
    #[error("iteration cap must be positive")]
    ZeroIterationCap,
}
