use super::{Direction, Point};
use std::ops::{Add, AddAssign};

/// Position of one grid cell, addressed by row and column.
///
/// Row `0` is the top of the grid.
///
/// The textual form `(row,col)` is how tile coordinates appear in map properties.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display("({row},{col})")]
#[from_str(regex = r"\(\s*(?P<row>-?\d+)\s*,\s*(?P<col>-?\d+)\s*\)")]
pub struct Tile {
    pub row: i32,
    pub col: i32,
}

impl Tile {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Tile {
        Tile { row, col }
    }

    /// Pixel position of the top left corner of this tile.
    #[inline]
    pub fn origin(self, tile_size: i32) -> Point {
        Point::new(self.col * tile_size, self.row * tile_size)
    }

    /// Pixel position of the center of this tile.
    #[inline]
    pub fn center(self, tile_size: i32) -> Point {
        let half = tile_size / 2;
        self.origin(tile_size) + Point::new(half, half)
    }
}

impl AddAssign<Direction> for Tile {
    fn add_assign(&mut self, rhs: Direction) {
        let delta = rhs.vector();
        self.col += delta.x;
        self.row += delta.y;
    }
}

impl Add<Direction> for Tile {
    type Output = Tile;

    fn add(mut self, rhs: Direction) -> Tile {
        self += rhs;
        self
    }
}
