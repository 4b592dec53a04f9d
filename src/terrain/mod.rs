//! The tile grid a maze is drawn on.

mod edge;
mod grid;
pub mod tile;
pub mod world_file;

pub use edge::Edge;
pub use grid::{GridConversionErr, GridError, TileGrid};
pub use tile::{DisplayWidth, TileCode, UnknownTileCode};
pub use world_file::WorldFileError;
