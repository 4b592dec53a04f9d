use crate::geometry::{Direction, Tile};

/// Remembers where a trace came from and where it is now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    previous: Option<Tile>,
    current: Tile,
}

impl Cursor {
    pub fn new(current: Tile) -> Cursor {
        Cursor {
            previous: None,
            current,
        }
    }

    /// A cursor which has just stepped onto `tile` while moving in `heading`.
    pub fn entering(tile: Tile, heading: Direction) -> Cursor {
        Cursor {
            previous: Some(tile + heading.reverse()),
            current: tile,
        }
    }

    #[inline]
    pub fn current(&self) -> Tile {
        self.current
    }

    #[inline]
    pub fn previous(&self) -> Option<Tile> {
        self.previous
    }

    /// `true` when the last step was exactly one tile in `direction`.
    pub fn points(&self, direction: Direction) -> bool {
        self.previous
            .map_or(false, |previous| previous + direction == self.current)
    }

    /// Advance one tile.
    pub fn step(&mut self, direction: Direction) {
        self.previous = Some(self.current);
        self.current += direction;
    }
}
