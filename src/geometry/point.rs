use super::Direction;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A point or displacement in pixel space.
///
/// The origin is the top left corner of the grid; `y` grows downward.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, parse_display::Display,
)]
#[display("({x}, {y})")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    /// The vector pointing the opposite way.
    #[inline]
    pub fn inverse(self) -> Point {
        -self
    }

    /// `true` when `other` exactly cancels out `self`.
    #[inline]
    pub fn is_inverse_of(self, other: Point) -> bool {
        self + other == Point::default()
    }

    /// Component-wise sign.
    #[inline]
    pub fn signum(self) -> Point {
        Point::new(self.x.signum(), self.y.signum())
    }

    /// `true` when at most one component is non-zero.
    #[inline]
    pub fn is_axis_aligned(self) -> bool {
        self.x == 0 || self.y == 0
    }

    /// Manhattan length of this vector.
    #[inline]
    pub fn manhattan(self) -> i32 {
        self.x.abs() + self.y.abs()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Add<Direction> for Point {
    type Output = Point;

    fn add(self, rhs: Direction) -> Point {
        self + rhs.vector()
    }
}

impl AddAssign<Direction> for Point {
    fn add_assign(&mut self, rhs: Direction) {
        *self += rhs.vector();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse() {
        let p = Point::new(4, -8);
        assert_eq!(p.inverse(), Point::new(-4, 8));
        assert!(p.is_inverse_of(p.inverse()));
        assert!(!p.is_inverse_of(p));
    }

    #[test]
    fn test_signum_and_alignment() {
        assert_eq!(Point::new(16, 0).signum(), Point::new(1, 0));
        assert_eq!(Point::new(-4, 4).signum(), Point::new(-1, 1));
        assert!(Point::new(0, -3).is_axis_aligned());
        assert!(!Point::new(4, 4).is_axis_aligned());
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(3, -2).to_string(), "(3, -2)");
    }
}
