//! Extract polygonal wall obstacles from tile-based maze maps.
//!
//! A [`TileGrid`] is traced into [`Obstacle`]s: chains of straight and diagonal segments
//! following the centerlines of wall tiles. Closed obstacles additionally know the
//! rectangles which cover their interior.

pub mod config;
pub mod geometry;
pub mod obstacle;
pub mod terrain;
pub mod world;

pub use config::Config;
pub use obstacle::{BuildOutcome, Obstacle, ObstacleBuilder, ObstacleSegment};
pub use terrain::{TileCode, TileGrid};
pub use world::Terrain;
