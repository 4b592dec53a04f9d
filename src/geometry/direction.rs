use super::Point;

/// Orthogonal direction on the screen.
///
/// Rows grow downward, so `Down` increases `y` and `Up` decreases it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display(style = "snake_case")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Iterate through all `Direction`s, clockwise from `Up`.
    pub fn iter() -> impl Iterator<Item = Direction> {
        std::iter::successors(Some(Direction::Up), |direction| match direction {
            Direction::Left => None,
            _ => Some(direction.turn_right()),
        })
    }

    /// Unit displacement of one step in this direction.
    #[inline]
    pub fn vector(self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::Right => Point::new(1, 0),
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// The direction after a counter-clockwise quarter turn, as seen on screen.
    pub fn turn_left(self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// The direction after a clockwise quarter turn, as seen on screen.
    pub fn turn_right(self) -> Direction {
        self.turn_left().reverse()
    }
}
