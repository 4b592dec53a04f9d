use crate::{geometry::Point, terrain::TileCode};

/// One edge or corner arc of an obstacle contour.
///
/// Straight segments span a whole tile along one axis. Corner segments cut diagonally across
/// their tile, half a tile along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObstacleSegment {
    start_point: Point,
    vector: Point,
    counter_clockwise: bool,
    tile_code: TileCode,
}

impl ObstacleSegment {
    pub fn new(
        start_point: Point,
        vector: Point,
        counter_clockwise: bool,
        tile_code: TileCode,
    ) -> ObstacleSegment {
        ObstacleSegment {
            start_point,
            vector,
            counter_clockwise,
            tile_code,
        }
    }

    #[inline]
    pub fn start_point(&self) -> Point {
        self.start_point
    }

    #[inline]
    pub fn vector(&self) -> Point {
        self.vector
    }

    #[inline]
    pub fn end_point(&self) -> Point {
        self.start_point + self.vector
    }

    /// Winding of the contour at this segment.
    ///
    /// For a corner this is the sense of its turn as seen on screen; a straight segment
    /// keeps the winding of the corner before it.
    #[inline]
    pub fn counter_clockwise(&self) -> bool {
        self.counter_clockwise
    }

    #[inline]
    pub fn tile_code(&self) -> TileCode {
        self.tile_code
    }

    pub fn is_straight_line(&self) -> bool {
        self.vector.is_axis_aligned() && self.tile_code.is_straight_wall()
    }

    pub fn is_corner(&self) -> bool {
        self.tile_code.is_corner()
    }

    pub fn is_nw_corner(&self) -> bool {
        self.tile_code.is_nw_corner()
    }

    pub fn is_ne_corner(&self) -> bool {
        self.tile_code.is_ne_corner()
    }

    pub fn is_se_corner(&self) -> bool {
        self.tile_code.is_se_corner()
    }

    pub fn is_sw_corner(&self) -> bool {
        self.tile_code.is_sw_corner()
    }
}
