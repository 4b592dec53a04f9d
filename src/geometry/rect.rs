use super::Point;

/// An axis-aligned rectangle in pixel space.
///
/// `min` is the top left corner and `max` the bottom right one. Edges are shared between
/// neighbors, so two rectangles which only touch do not overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, parse_display::Display)]
#[display("[{min} .. {max}]")]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Create a rectangle spanning two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Rect {
        Rect {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// `true` when the point lies inside or on the border of this rectangle.
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// `true` when the two rectangles share some area.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}
