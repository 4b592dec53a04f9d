//! A tile grid together with the obstacles traced from it.

use crate::{
    config::{self, Config},
    geometry::Tile,
    obstacle::{BuildOutcome, Obstacle, ObstacleBuilder},
    terrain::{world_file, TileGrid, WorldFileError},
};
use std::{cell::OnceCell, path::Path};

/// Terrain owns its grid and lazily traces the grid's obstacles.
///
/// The traced obstacles are cached until the grid is borrowed mutably through
/// [`Terrain::grid_mut`].
#[derive(Debug)]
pub struct Terrain {
    grid: TileGrid,
    config: Config,
    builder: ObstacleBuilder,
    cache: OnceCell<BuildOutcome>,
}

impl Terrain {
    pub fn new(grid: TileGrid, config: Config) -> Result<Terrain, config::Error> {
        let builder = ObstacleBuilder::new(&config)?;
        Ok(Terrain {
            grid,
            config,
            builder,
            cache: OnceCell::new(),
        })
    }

    /// Load a world file and pair it with the given configuration.
    pub fn load(path: impl AsRef<Path>, config: Config) -> Result<Terrain, TerrainError> {
        let grid = world_file::load(path.as_ref())?;
        Terrain::new(grid, config).map_err(Into::into)
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Mutable access to the grid. Any cached obstacles are discarded.
    pub fn grid_mut(&mut self) -> &mut TileGrid {
        self.cache.take();
        &mut self.grid
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn outcome(&self) -> &BuildOutcome {
        self.cache.get_or_init(|| self.builder.build(&self.grid))
    }

    /// The obstacles of this terrain, traced on first access.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.outcome().obstacles
    }

    /// Tiles at which the most recent trace found unexpected terrain.
    pub fn tracing_errors(&self) -> &[Tile] {
        &self.outcome().errors
    }

    /// Trace the obstacles again, replacing any cached ones.
    ///
    /// Returns the tiles at which tracing found unexpected terrain.
    pub fn build_obstacle_list(&mut self) -> &[Tile] {
        self.cache.take();
        self.tracing_errors()
    }

    /// The top-left tile of the ghost house, if the grid names one.
    pub fn house_origin(&self) -> Option<Tile> {
        self.grid.tile_property(&self.config.house_origin_property)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    #[error("loading world file")]
    WorldFile(#[from] WorldFileError),
    #[error("invalid configuration")]
    Config(#[from] config::Error),
}
