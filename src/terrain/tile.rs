use smallstr::SmallString;
use std::marker::PhantomData;

/// Number of characters below which the [`Chunks`] iterator does not allocate.
pub const CHUNK_WIDTH: usize = 4;

/// A type implementing `DisplayWidth` has a constant width for display and parsing.
///
/// This makes it suitable for writing grids as text pictures.
pub trait DisplayWidth {
    const DISPLAY_WIDTH: usize;

    /// Split a string into an iterator of chunks of characters of length `DISPLAY_WIDTH`
    fn chunks(s: &str) -> Chunks<Self> {
        Chunks(s.chars(), PhantomData)
    }
}

/// Iterator of chunks of equal width from a string.
///
/// Created with [`DisplayWidth::chunks`]. Never heap-allocates if `T::DISPLAY_WIDTH <= CHUNK_WIDTH`.
pub struct Chunks<'a, T: ?Sized>(std::str::Chars<'a>, PhantomData<T>);

impl<T: DisplayWidth> Iterator for Chunks<'_, T> {
    // 4 bytes in a max-width char
    type Item = SmallString<[u8; 4 * CHUNK_WIDTH]>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut s = SmallString::new();
        for _ in 0..T::DISPLAY_WIDTH {
            s.push(self.0.next()?);
        }
        Some(s)
    }
}

/// Terrain content of a single grid cell.
///
/// The discriminants are the stable numeric encoding used by map files.
///
/// Each code also has a one-character symbol so that grids can be drawn as text.
/// Rounded arcs use rounded box-drawing corners, angular arcs use square ones.
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
#[repr(u8)]
pub enum TileCode {
    #[display(".")]
    #[default]
    Empty = 0,
    #[display("─")]
    WallHorizontal = 1,
    #[display("│")]
    WallVertical = 2,
    #[display("╭")]
    ArcNW = 3,
    #[display("╮")]
    ArcNE = 4,
    #[display("╯")]
    ArcSE = 5,
    #[display("╰")]
    ArcSW = 6,
    #[display("T")]
    Tunnel = 7,
    #[display("=")]
    Door = 8,
    #[display("┌")]
    AngularArcNW = 9,
    #[display("┐")]
    AngularArcNE = 10,
    #[display("┘")]
    AngularArcSE = 11,
    #[display("└")]
    AngularArcSW = 12,
    #[display("^")]
    OneWayUp = 13,
    #[display(">")]
    OneWayRight = 14,
    #[display("v")]
    OneWayDown = 15,
    #[display("<")]
    OneWayLeft = 16,
}

impl TileCode {
    pub const ALL: [TileCode; 17] = [
        TileCode::Empty,
        TileCode::WallHorizontal,
        TileCode::WallVertical,
        TileCode::ArcNW,
        TileCode::ArcNE,
        TileCode::ArcSE,
        TileCode::ArcSW,
        TileCode::Tunnel,
        TileCode::Door,
        TileCode::AngularArcNW,
        TileCode::AngularArcNE,
        TileCode::AngularArcSE,
        TileCode::AngularArcSW,
        TileCode::OneWayUp,
        TileCode::OneWayRight,
        TileCode::OneWayDown,
        TileCode::OneWayLeft,
    ];

    /// Straight walls and every corner arc.
    ///
    /// Doors and tunnels are not unconditionally blocked.
    pub fn is_blocked(self) -> bool {
        self.is_straight_wall() || self.is_corner()
    }

    /// Any tile a wall trace can pass through: straight walls, doors and corner arcs.
    pub fn is_wall(self) -> bool {
        self.is_blocked() || self == TileCode::Door
    }

    pub fn is_straight_wall(self) -> bool {
        matches!(self, TileCode::WallHorizontal | TileCode::WallVertical)
    }

    pub fn is_corner(self) -> bool {
        self.is_nw_corner() || self.is_ne_corner() || self.is_se_corner() || self.is_sw_corner()
    }

    pub fn is_nw_corner(self) -> bool {
        matches!(self, TileCode::ArcNW | TileCode::AngularArcNW)
    }

    pub fn is_ne_corner(self) -> bool {
        matches!(self, TileCode::ArcNE | TileCode::AngularArcNE)
    }

    pub fn is_se_corner(self) -> bool {
        matches!(self, TileCode::ArcSE | TileCode::AngularArcSE)
    }

    pub fn is_sw_corner(self) -> bool {
        matches!(self, TileCode::ArcSW | TileCode::AngularArcSW)
    }
}

impl DisplayWidth for TileCode {
    const DISPLAY_WIDTH: usize = 1;
}

impl From<TileCode> for u8 {
    fn from(code: TileCode) -> Self {
        code as u8
    }
}

/// The byte does not encode any known tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown tile code {0}")]
pub struct UnknownTileCode(pub u8);

impl TryFrom<u8> for TileCode {
    type Error = UnknownTileCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TileCode::ALL
            .get(value as usize)
            .copied()
            .ok_or(UnknownTileCode(value))
    }
}
