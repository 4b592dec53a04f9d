use crate::geometry::{Direction, Tile};

/// Iterator over tiles on one border of a [`TileGrid`][super::TileGrid].
///
/// Created by the [`TileGrid::edge`][super::TileGrid::edge] function. See there for more details.
pub struct Edge {
    pub(crate) from: Tile,
    pub(crate) to: Tile,
    pub(crate) direction: Direction,
    pub(crate) done: bool,
}

impl Edge {
    fn remaining(&self) -> usize {
        if self.done {
            return 0;
        }
        ((self.to.row - self.from.row).abs() + (self.to.col - self.from.col).abs()) as usize + 1
    }
}

impl Iterator for Edge {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let next = self.from;
        self.from += self.direction;
        self.done = next == self.to;

        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.remaining();
        (size, Some(size))
    }
}

impl std::iter::ExactSizeIterator for Edge {}

impl std::iter::DoubleEndedIterator for Edge {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let next = self.to;
        self.to += self.direction.reverse();
        self.done = next == self.from;

        Some(next)
    }
}
