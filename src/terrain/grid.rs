use super::{
    tile::{DisplayWidth, TileCode},
    Edge,
};
use crate::geometry::{Direction, Tile};
use std::{
    collections::HashMap,
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

/// A TileGrid keeps track of the terrain of a maze.
///
/// Tiles are addressed by `(row, col)`, with row `0` at the top. Alongside the tiles, a grid
/// carries a string-keyed property map; some properties hold tile coordinates which mark
/// configured positions such as the ghost house.
///
/// The dimensions are fixed at construction; only the contents may change.
///
/// ## Entry Points
///
/// - [`TileGrid::new`] creates an empty grid.
/// - When a grid is drawn as a text picture, use [`TileGrid::try_from`] or [`TileGrid::from_reader`].
/// - Map files are loaded with [`crate::terrain::world_file`].
///
/// ## Panics
///
/// Indexing with a tile outside the grid panics. Use [`TileGrid::get`] and [`TileGrid::set`]
/// for checked access.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TileGrid {
    tiles: Vec<TileCode>,
    rows: usize,
    cols: usize,
    properties: HashMap<String, String>,
}

impl TileGrid {
    /// Create a grid of the given dimensions where every tile is [`TileCode::Empty`].
    pub fn new(rows: usize, cols: usize) -> TileGrid {
        TileGrid {
            tiles: vec![TileCode::Empty; rows * cols],
            rows,
            cols,
            properties: HashMap::new(),
        }
    }

    /// Procedurally create a new `TileGrid` from a function.
    pub fn procedural(rows: usize, cols: usize, procedure: impl Fn(Tile) -> TileCode) -> TileGrid {
        let area = rows * cols;
        let mut grid = TileGrid {
            tiles: Vec::with_capacity(area),
            rows,
            cols,
            properties: HashMap::new(),
        };
        for idx in 0..area {
            let tile = grid.index2tile(idx);
            grid.tiles.push(procedure(tile));
        }
        grid
    }

    /// Create a grid from rows of tile codes.
    ///
    /// `source[0]` is the top row.
    pub fn from_rows<Row>(source: &[Row]) -> Result<TileGrid, GridConversionErr>
    where
        Row: AsRef<[TileCode]>,
    {
        let rows = source.len();
        let cols = source.first().map_or(0, |row| row.as_ref().len());
        if !source.iter().all(|row| row.as_ref().len() == cols) {
            return Err(GridConversionErr::NotRectangular);
        }

        let mut tiles = Vec::with_capacity(rows * cols);
        for row in source {
            tiles.extend_from_slice(row.as_ref());
        }

        Ok(TileGrid {
            tiles,
            rows,
            cols,
            properties: HashMap::new(),
        })
    }

    /// Number of rows in this grid.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in this grid.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of tiles in this grid.
    #[inline]
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    /// `true` when a tile is legal within the bounds of this grid.
    #[inline]
    pub fn in_bounds(&self, tile: Tile) -> bool {
        tile.row >= 0
            && tile.col >= 0
            && (tile.row as usize) < self.rows
            && (tile.col as usize) < self.cols
    }

    /// Checked read access.
    pub fn get(&self, row: i32, col: i32) -> Result<TileCode, GridError> {
        self.checked_index(Tile::new(row, col))
            .map(|idx| self.tiles[idx])
    }

    /// Checked write access.
    pub fn set(&mut self, row: i32, col: i32, code: TileCode) -> Result<(), GridError> {
        let idx = self.checked_index(Tile::new(row, col))?;
        self.tiles[idx] = code;
        Ok(())
    }

    /// Iterate over the tiles and their codes, row by row.
    pub fn iter(&self) -> impl '_ + Iterator<Item = (Tile, TileCode)> {
        let index2tile = self.make_index2tile();
        self.tiles
            .iter()
            .enumerate()
            .map(move |(idx, code)| (index2tile(idx), *code))
    }

    /// Create an iterator over the tiles on one border of this grid.
    ///
    /// `Left` and `Right` traverse a border column from top to bottom; `Up` and `Down`
    /// traverse a border row from left to right. It is a [`DoubleEndedIterator`], so it can
    /// be reversed if desired.
    ///
    /// An empty grid has empty borders.
    pub fn edge(&self, direction: Direction) -> Edge {
        let last_row = self.rows as i32 - 1;
        let last_col = self.cols as i32 - 1;
        let (from, to, step) = match direction {
            Direction::Left => (Tile::new(0, 0), Tile::new(last_row, 0), Direction::Down),
            Direction::Right => (
                Tile::new(0, last_col),
                Tile::new(last_row, last_col),
                Direction::Down,
            ),
            Direction::Up => (Tile::new(0, 0), Tile::new(0, last_col), Direction::Right),
            Direction::Down => (
                Tile::new(last_row, 0),
                Tile::new(last_row, last_col),
                Direction::Right,
            ),
        };

        Edge {
            from,
            to,
            direction: step,
            done: self.tiles.is_empty(),
        }
    }

    /// Raw value of a property.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    /// All properties, in no particular order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Interpret a property as a tile coordinate of the form `(row,col)`.
    ///
    /// A property which is present but malformed is logged and treated as absent.
    pub fn tile_property(&self, name: &str) -> Option<Tile> {
        let value = self.property(name)?;
        match Tile::from_str(value) {
            Ok(tile) => Some(tile),
            Err(err) => {
                log::warn!("property {} = {:?} is not a tile: {}", name, value, err);
                None
            }
        }
    }

    fn checked_index(&self, tile: Tile) -> Result<usize, GridError> {
        if self.in_bounds(tile) {
            Ok(self.tile2index(tile))
        } else {
            Err(GridError::OutOfBounds {
                tile,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// convert a 2d tile into a 1d index into the tiles
    pub(crate) fn tile2index(&self, tile: Tile) -> usize {
        tile.col as usize + (tile.row as usize * self.cols)
    }

    /// convert a 1d index in the tiles into a 2d tile
    fn index2tile(&self, idx: usize) -> Tile {
        Tile::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    /// make a function which converts a 1d index in the tiles into a tile without borrowing self
    fn make_index2tile(&self) -> impl Fn(usize) -> Tile {
        let cols = self.cols;
        move |idx| Tile::new((idx / cols) as i32, (idx % cols) as i32)
    }
}

impl fmt::Debug for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileGrid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("properties", &self.properties)
            .field("tiles", &format_args!("[...; {}]", self.tiles.len()))
            .finish()
    }
}

impl TileGrid {
    /// Try to convert the contents of a reader into a grid.
    ///
    /// Each line is one row, drawn with the [`TileCode`] symbols. Surrounding whitespace and
    /// blank lines are ignored.
    ///
    /// This is not `impl<R> TryFrom<R> for TileGrid` because there's a
    /// coherence conflict with the stdlib blanket impl
    ///
    /// ```rust,ignore
    /// impl<T, U> std::convert::TryFrom<U> for T where U: std::convert::Into<T>;
    /// ```
    pub fn from_reader<R>(input: R) -> Result<Self, GridConversionErr>
    where
        R: std::io::BufRead,
    {
        let mut arr = Vec::new();

        for line in input.lines() {
            let line = line?;

            let mut row = Vec::with_capacity(line.len() / TileCode::DISPLAY_WIDTH);
            for chunk in TileCode::chunks(line.trim()) {
                row.push(TileCode::from_str(&chunk).map_err(|err| {
                    GridConversionErr::TileConversion(Box::new(err), chunk.to_string())
                })?);
            }
            if !row.is_empty() {
                arr.push(row);
            }
        }

        TileGrid::from_rows(&arr)
    }
}

impl TryFrom<&str> for TileGrid {
    type Error = GridConversionErr;

    /// the input should be in natural graphical order:
    /// its first characters are the top left.
    fn try_from(input: &str) -> Result<Self, Self::Error> {
        Self::from_reader(input.as_bytes())
    }
}

impl Index<Tile> for TileGrid {
    type Output = TileCode;

    /// Panics if the tile is out of bounds.
    fn index(&self, tile: Tile) -> &TileCode {
        assert!(self.in_bounds(tile), "tile {} is out of bounds", tile);
        self.tiles.index(self.tile2index(tile))
    }
}

impl IndexMut<Tile> for TileGrid {
    /// Panics if the tile is out of bounds.
    fn index_mut(&mut self, tile: Tile) -> &mut TileCode {
        assert!(self.in_bounds(tile), "tile {} is out of bounds", tile);
        let idx = self.tile2index(tile);
        self.tiles.index_mut(idx)
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.cols.max(1)) {
            for code in row {
                write!(f, "{:width$}", code, width = TileCode::DISPLAY_WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Checked access to a tile outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("tile {tile} is outside the {rows}x{cols} grid")]
    OutOfBounds { tile: Tile, rows: usize, cols: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum GridConversionErr {
    #[error("converting tile from {1:?}")]
    TileConversion(
        #[source] Box<dyn 'static + std::error::Error + Send + Sync>,
        String,
    ),
    #[error("grid must be rectangular")]
    NotRectangular,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ROOM: &str = "
╭─╮
│.│
╰─╯
";

    #[test]
    fn test_procedural() {
        let grid = TileGrid::procedural(2, 3, |tile| {
            if tile.row == 0 {
                TileCode::WallHorizontal
            } else {
                TileCode::Empty
            }
        });
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert!(grid
            .iter()
            .all(|(tile, code)| (tile.row == 0) == (code == TileCode::WallHorizontal)));
    }

    #[test]
    fn test_tile_index_conversion() {
        const ROWS: usize = 31;
        const COLS: usize = 28;

        let grid = TileGrid::new(ROWS, COLS);
        let mut emitted = HashSet::new();
        for idx in 0..ROWS * COLS {
            let tile = grid.index2tile(idx);
            assert!(emitted.insert(tile), "no duplicate tile should ever be emitted");
            assert_eq!(idx, grid.tile2index(tile));
        }
    }

    #[test]
    fn test_checked_access() {
        let mut grid = TileGrid::new(2, 3);
        assert_eq!(grid.set(1, 2, TileCode::Door), Ok(()));
        assert_eq!(grid.get(1, 2), Ok(TileCode::Door));
        assert_eq!(grid[Tile::new(1, 2)], TileCode::Door);

        for &(row, col) in &[(-1, 0), (0, -1), (2, 0), (0, 3)] {
            assert_eq!(
                grid.get(row, col),
                Err(GridError::OutOfBounds {
                    tile: Tile::new(row, col),
                    rows: 2,
                    cols: 3
                })
            );
            assert!(grid.set(row, col, TileCode::Tunnel).is_err());
        }
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds_panics() {
        let grid = TileGrid::new(2, 2);
        let _ = grid[Tile::new(0, 2)];
    }

    #[test]
    fn test_parse_and_display() {
        let grid = TileGrid::try_from(ROOM.trim()).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid[Tile::new(0, 0)], TileCode::ArcNW);
        assert_eq!(grid[Tile::new(1, 2)], TileCode::WallVertical);
        assert_eq!(grid[Tile::new(2, 2)], TileCode::ArcSE);
        assert_eq!(grid.to_string().trim(), ROOM.trim());
    }

    #[test]
    fn test_parse_rejects_ragged_input() {
        let err = TileGrid::try_from("──\n─").unwrap_err();
        assert!(matches!(err, GridConversionErr::NotRectangular));
        let err = TileGrid::try_from("─?").unwrap_err();
        assert!(matches!(err, GridConversionErr::TileConversion(_, ref chunk) if chunk == "?"));
    }

    #[test]
    fn test_edges() {
        let grid = TileGrid::new(3, 4);
        let left: Vec<_> = grid.edge(Direction::Left).collect();
        assert_eq!(left, vec![Tile::new(0, 0), Tile::new(1, 0), Tile::new(2, 0)]);
        let right: Vec<_> = grid.edge(Direction::Right).rev().collect();
        assert_eq!(right, vec![Tile::new(2, 3), Tile::new(1, 3), Tile::new(0, 3)]);
        assert_eq!(grid.edge(Direction::Down).len(), 4);
        assert_eq!(TileGrid::new(0, 0).edge(Direction::Left).count(), 0);
    }

    #[test]
    fn test_tile_property() {
        let mut grid = TileGrid::new(1, 1);
        grid.set_property("pos_house_min_tile", "(15,10)");
        grid.set_property("pos_pac", "nowhere");
        assert_eq!(grid.tile_property("pos_house_min_tile"), Some(Tile::new(15, 10)));
        assert_eq!(grid.tile_property("pos_pac"), None);
        assert_eq!(grid.tile_property("missing"), None);
        assert_eq!(grid.property("pos_pac"), Some("nowhere"));
    }
}
