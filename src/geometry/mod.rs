pub mod decompose;
pub mod direction;
pub mod point;
pub mod rect;
pub mod tile;

pub use decompose::DecompositionError;
pub use direction::Direction;
pub use point::Point;
pub use rect::Rect;
pub use tile::Tile;
