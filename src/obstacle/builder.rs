//! Trace the walls of a [`TileGrid`] into [`Obstacle`]s.
//!
//! Tracing walks from tile to tile along a wall. Each wall tile is entered through the middle
//! of one of its edges and left through the middle of another, so a straight wall contributes
//! a whole-tile segment and a corner arc contributes a diagonal half-tile segment.

use super::{Contour, Cursor, Obstacle};
use crate::{
    config::{self, Config},
    geometry::{Direction, Point, Tile},
    terrain::{TileCode, TileGrid},
};
use bitvec::{bitvec, vec::BitVec};

/// Which of the four corner shapes a corner tile has.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Corner {
    Nw = 0,
    Ne = 1,
    Se = 2,
    Sw = 3,
}

impl Corner {
    fn of(code: TileCode) -> Option<Corner> {
        if code.is_nw_corner() {
            Some(Corner::Nw)
        } else if code.is_ne_corner() {
            Some(Corner::Ne)
        } else if code.is_se_corner() {
            Some(Corner::Se)
        } else if code.is_sw_corner() {
            Some(Corner::Sw)
        } else {
            None
        }
    }

    fn turns(self) -> &'static [Turn; 2] {
        &CORNER_TURNS[self as usize]
    }
}

/// One way through a corner tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Turn {
    incoming: Direction,
    outgoing: Direction,
}

impl Turn {
    const fn new(incoming: Direction, outgoing: Direction) -> Turn {
        Turn { incoming, outgoing }
    }

    /// `true` when the trace turns counter-clockwise, as seen on screen.
    fn counter_clockwise(self) -> bool {
        self.outgoing == self.incoming.turn_left()
    }
}

/// Each corner shape can be passed through in exactly two ways, one per connected edge.
///
/// Indexed by `Corner as usize`.
const CORNER_TURNS: [[Turn; 2]; 4] = {
    use Direction::*;
    [
        // ╭ connects the right and bottom edges
        [Turn::new(Left, Down), Turn::new(Up, Right)],
        // ╮ connects the left and bottom edges
        [Turn::new(Right, Down), Turn::new(Up, Left)],
        // ╯ connects the left and top edges
        [Turn::new(Right, Up), Turn::new(Down, Left)],
        // ╰ connects the right and top edges
        [Turn::new(Left, Up), Turn::new(Down, Right)],
    ]
};

/// The segment emitted by a single tracing step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Step {
    vector: Point,
    outgoing: Direction,
    /// `None` for straight segments, which keep the current winding.
    counter_clockwise: Option<bool>,
}

/// The obstacles of a grid, plus every tile at which tracing found something unexpected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutcome {
    pub obstacles: Vec<Obstacle>,
    pub errors: Vec<Tile>,
}

/// Traces obstacles from a tile grid.
///
/// The builder holds only configuration; all per-build state lives inside [`Self::build`],
/// so one builder can be reused for any number of grids.
#[derive(Debug, Clone)]
pub struct ObstacleBuilder {
    config: Config,
}

impl ObstacleBuilder {
    pub fn new(config: &Config) -> Result<ObstacleBuilder, config::Error> {
        config.validate()?;
        Ok(ObstacleBuilder {
            config: config.clone(),
        })
    }

    #[inline]
    fn tile_size(&self) -> i32 {
        self.config.tile_size
    }

    #[inline]
    fn half_tile(&self) -> i32 {
        self.config.half_tile()
    }

    /// Start point of the closed obstacle seeded at the given NW corner tile.
    pub fn closed_start_point(&self, tile: Tile) -> Point {
        self.entry_point(tile, Direction::Left)
    }

    /// The middle of the edge through which a trace moving in `heading` enters `tile`.
    fn entry_point(&self, tile: Tile, heading: Direction) -> Point {
        tile.center(self.tile_size()) - heading.vector() * self.half_tile()
    }

    /// Trace every obstacle in the grid.
    ///
    /// Border-crossing obstacles are traced first, row by row from the left and right borders,
    /// then closed ones. Malformed terrain never fails the build; the offending tiles are
    /// listed in [`BuildOutcome::errors`].
    pub fn build(&self, grid: &TileGrid) -> BuildOutcome {
        let mut explored = bitvec![0; grid.area()];
        let mut contours = Vec::new();
        let mut errors = Vec::new();

        // open obstacles must be claimed before closed ones
        let border_seeds = grid
            .edge(Direction::Left)
            .zip(grid.edge(Direction::Right))
            .flat_map(|(left, right)| [(left, Direction::Right), (right, Direction::Left)]);
        for (tile, heading) in border_seeds {
            if explored[grid.tile2index(tile)] || !self.is_seed(grid[tile], heading) {
                continue;
            }
            let contour = self.trace(grid, tile, heading, &mut explored, &mut errors);
            log::debug!(
                "open obstacle from {} with {} segments",
                tile,
                contour.segments().len()
            );
            contours.push(contour);
        }

        for (tile, code) in grid.iter() {
            if explored[grid.tile2index(tile)] || !code.is_nw_corner() {
                continue;
            }
            let contour = self.trace(grid, tile, Direction::Left, &mut explored, &mut errors);
            if !contour.is_closed() {
                log::warn!("obstacle starting at {} does not close", tile);
            }
            log::debug!(
                "closed obstacle from {} with {} segments",
                tile,
                contour.segments().len()
            );
            contours.push(contour);
        }

        self.remove_house(grid, &mut contours);

        let obstacles: Vec<Obstacle> = contours
            .into_iter()
            .map(|contour| {
                if self.config.optimize {
                    contour.optimized().build()
                } else {
                    contour.build()
                }
            })
            .collect();

        log::info!(
            "built {} obstacles from {}x{} grid; {} tracing errors",
            obstacles.len(),
            grid.rows(),
            grid.cols(),
            errors.len()
        );

        BuildOutcome { obstacles, errors }
    }

    /// Drop the ghost house outline, which is handled separately from the other obstacles.
    fn remove_house(&self, grid: &TileGrid, contours: &mut Vec<Contour>) {
        let name = &self.config.house_origin_property;
        let house_origin = match grid.tile_property(name) {
            Some(tile) => tile,
            None => {
                log::info!("no house origin in property {:?}", name);
                return;
            }
        };

        let start = self.closed_start_point(house_origin);
        match contours
            .iter()
            .position(|contour| contour.start_point() == start)
        {
            Some(idx) => {
                contours.remove(idx);
            }
            None => log::warn!("no obstacle starts at house origin {}", house_origin),
        }
    }

    /// Follow a wall from `start`, which is entered moving in `heading`.
    fn trace(
        &self,
        grid: &TileGrid,
        start: Tile,
        heading: Direction,
        explored: &mut BitVec,
        errors: &mut Vec<Tile>,
    ) -> Contour {
        let mut contour = Contour::new(self.entry_point(start, heading));
        let mut cursor = Cursor::entering(start, heading);
        let mut counter_clockwise = false;

        for _ in 0..self.config.iteration_cap {
            let tile = cursor.current();
            if !grid.in_bounds(tile) {
                break;
            }
            let idx = grid.tile2index(tile);
            if explored[idx] {
                break;
            }
            explored.set(idx, true);

            let code = grid[tile];
            let step = match Direction::iter()
                .filter(|&direction| cursor.points(direction))
                .find_map(|direction| self.step(code, direction))
            {
                Some(step) => step,
                None => {
                    log::warn!("unexpected {:?} at {} while tracing from {}", code, tile, start);
                    errors.push(tile);
                    continue;
                }
            };

            if let Some(ccw) = step.counter_clockwise {
                counter_clockwise = ccw;
            }
            if let Err(err) = contour.add_segment(step.vector, counter_clockwise, code) {
                log::warn!("{} at {}", err, tile);
                errors.push(tile);
                break;
            }
            cursor.step(step.outgoing);
        }

        contour
    }

    /// Whether an open obstacle can be traced from a border tile entered moving in `heading`.
    fn is_seed(&self, code: TileCode, heading: Direction) -> bool {
        (code == TileCode::WallHorizontal || code.is_corner()) && self.step(code, heading).is_some()
    }

    /// What happens when a trace moving in `heading` passes through a tile.
    ///
    /// `None` when the tile cannot be passed through that way.
    fn step(&self, code: TileCode, heading: Direction) -> Option<Step> {
        let straight = |vertical: bool| {
            let horizontal_heading = matches!(heading, Direction::Left | Direction::Right);
            (horizontal_heading != vertical).then(|| Step {
                vector: heading.vector() * self.tile_size(),
                outgoing: heading,
                counter_clockwise: None,
            })
        };

        match code {
            TileCode::WallVertical => straight(true),
            TileCode::WallHorizontal | TileCode::Door => straight(false),
            _ => {
                let corner = Corner::of(code)?;
                corner
                    .turns()
                    .iter()
                    .find(|turn| turn.incoming == heading)
                    .map(|turn| Step {
                        vector: (turn.incoming.vector() + turn.outgoing.vector()) * self.half_tile(),
                        outgoing: turn.outgoing,
                        counter_clockwise: Some(turn.counter_clockwise()),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ObstacleBuilder {
        ObstacleBuilder::new(&Config {
            optimize: false,
            ..Config::default()
        })
        .unwrap()
    }

    fn grid(picture: &str) -> TileGrid {
        TileGrid::try_from(picture.trim()).unwrap()
    }

    #[test]
    fn test_corner_table_is_consistent() {
        for (idx, turns) in CORNER_TURNS.iter().enumerate() {
            for turn in turns {
                // a corner always turns by a quarter
                assert_ne!(turn.incoming, turn.outgoing);
                assert_ne!(turn.incoming, turn.outgoing.reverse());
            }
            // the two ways through a corner are the same path walked in opposite directions
            assert_eq!(turns[0].incoming, turns[1].outgoing.reverse());
            assert_eq!(turns[0].outgoing, turns[1].incoming.reverse());
            assert_ne!(turns[0].counter_clockwise(), turns[1].counter_clockwise());
            assert_eq!(
                Corner::of(TileCode::ALL[3 + idx]).map(|c| c as usize),
                Some(idx)
            );
        }
    }

    #[test]
    fn test_step_through_corners() {
        let b = builder();
        let step = b.step(TileCode::ArcNW, Direction::Left).unwrap();
        assert_eq!(step.vector, Point::new(-4, 4));
        assert_eq!(step.outgoing, Direction::Down);
        assert_eq!(step.counter_clockwise, Some(true));

        let step = b.step(TileCode::AngularArcSE, Direction::Down).unwrap();
        assert_eq!(step.vector, Point::new(-4, 4));
        assert_eq!(step.outgoing, Direction::Left);
        assert_eq!(step.counter_clockwise, Some(false));

        assert_eq!(b.step(TileCode::ArcNW, Direction::Right), None);
        assert_eq!(b.step(TileCode::ArcNW, Direction::Down), None);
    }

    #[test]
    fn test_step_through_walls() {
        let b = builder();
        assert_eq!(
            b.step(TileCode::WallVertical, Direction::Up).map(|s| s.vector),
            Some(Point::new(0, -8))
        );
        assert_eq!(b.step(TileCode::WallVertical, Direction::Left), None);
        assert_eq!(
            b.step(TileCode::Door, Direction::Left).map(|s| s.vector),
            Some(Point::new(-8, 0))
        );
        assert_eq!(b.step(TileCode::WallHorizontal, Direction::Down), None);
        assert_eq!(b.step(TileCode::Tunnel, Direction::Right), None);
        assert_eq!(b.step(TileCode::Empty, Direction::Right), None);
    }

    #[test]
    fn test_entry_points() {
        let b = builder();
        assert_eq!(b.closed_start_point(Tile::new(0, 0)), Point::new(8, 4));
        assert_eq!(b.entry_point(Tile::new(2, 0), Direction::Right), Point::new(0, 20));
        assert_eq!(b.entry_point(Tile::new(2, 5), Direction::Left), Point::new(48, 20));
    }

    #[test]
    fn test_room_trace() {
        let outcome = builder().build(&grid(
            "
╭─╮
│.│
╰─╯
",
        ));
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.obstacles.len(), 1);
        let room = &outcome.obstacles[0];
        assert!(room.is_closed());
        assert_eq!(room.start_point(), Point::new(8, 4));
        assert_eq!(room.num_segments(), 8);
        assert!(room.segments().iter().all(|s| s.counter_clockwise()));
        assert_eq!(
            room.points(),
            [
                (8, 4),
                (4, 8),
                (4, 16),
                (8, 20),
                (16, 20),
                (20, 16),
                (20, 8),
                (16, 4),
                (8, 4)
            ]
            .iter()
            .copied()
            .map(Point::from)
            .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_open_obstacle_turning_down() {
        let outcome = builder().build(&grid(
            "
──╮
..│
",
        ));
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.obstacles.len(), 1);
        let wall = &outcome.obstacles[0];
        assert!(!wall.is_closed());
        assert_eq!(wall.start_point(), Point::new(0, 4));
        assert_eq!(wall.end_point(), Point::new(20, 16));
        let windings: Vec<_> = wall.segments().iter().map(|s| s.counter_clockwise()).collect();
        assert_eq!(windings, vec![false, false, false, false]);
    }

    #[test]
    fn test_right_border_seeds() {
        // nothing on the left border; ╰ on the right border leads up, ╭ leads down
        let outcome = builder().build(&grid(
            "
.│
.╰
..
.╭
.│
",
        ));
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.obstacles.len(), 2);
        assert_eq!(
            outcome.obstacles[0].points(),
            vec![Point::new(16, 12), Point::new(12, 8), Point::new(12, 0)]
        );
        assert!(!outcome.obstacles[0].segments()[0].counter_clockwise());
        assert_eq!(
            outcome.obstacles[1].points(),
            vec![Point::new(16, 28), Point::new(12, 32), Point::new(12, 40)]
        );
        assert!(outcome.obstacles[1].segments()[0].counter_clockwise());
    }

    #[test]
    fn test_left_border_seeds() {
        // ╯ on the left border leads up, ╮ leads down
        let outcome = builder().build(&grid(
            "
│..
╯..
...
╮..
│..
",
        ));
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.obstacles.len(), 2);
        let windings = |idx: usize| -> Vec<bool> {
            outcome.obstacles[idx]
                .segments()
                .iter()
                .map(|s| s.counter_clockwise())
                .collect()
        };
        assert_eq!(
            outcome.obstacles[0].points(),
            vec![Point::new(0, 12), Point::new(4, 8), Point::new(4, 0)]
        );
        assert_eq!(windings(0), vec![true, true]);
        assert_eq!(
            outcome.obstacles[1].points(),
            vec![Point::new(0, 28), Point::new(4, 32), Point::new(4, 40)]
        );
        assert_eq!(windings(1), vec![false, false]);
    }

    #[test]
    fn test_borders_are_scanned_row_by_row() {
        // the right border seed in row 0 comes before the left border seed in row 2
        let outcome = builder().build(&grid(
            "
..╭─
..│.
──╯.
",
        ));
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.obstacles.len(), 1);
        let wall = &outcome.obstacles[0];
        assert_eq!(
            wall.points(),
            vec![
                Point::new(32, 4),
                Point::new(24, 4),
                Point::new(20, 8),
                Point::new(20, 16),
                Point::new(16, 20),
                Point::new(8, 20),
                Point::new(0, 20),
            ]
        );
        let windings: Vec<_> = wall.segments().iter().map(|s| s.counter_clockwise()).collect();
        assert_eq!(windings, vec![false, true, true, false, false, false]);
    }

    #[test]
    fn test_doors_do_not_seed() {
        assert!(builder().is_seed(TileCode::WallHorizontal, Direction::Right));
        assert!(builder().is_seed(TileCode::AngularArcSW, Direction::Left));
        assert!(!builder().is_seed(TileCode::Door, Direction::Right));
        assert!(!builder().is_seed(TileCode::WallVertical, Direction::Right));
        assert!(!builder().is_seed(TileCode::ArcNE, Direction::Left));
    }

    #[test]
    fn test_unexpected_tile_is_reported() {
        let outcome = builder().build(&grid(
            "
╭─╮
│.│
╭─╯
",
        ));
        assert_eq!(outcome.errors, vec![Tile::new(2, 0)]);
        assert_eq!(outcome.obstacles.len(), 1);
        assert!(!outcome.obstacles[0].is_closed());
    }

    #[test]
    fn test_iteration_cap_truncates_trace() {
        let b = ObstacleBuilder::new(&Config {
            iteration_cap: 3,
            optimize: false,
            ..Config::default()
        })
        .unwrap();
        let outcome = b.build(&grid("──────"));
        assert_eq!(outcome.obstacles[0].num_segments(), 3);
        // the untouched right end is traced from the other side
        assert_eq!(outcome.obstacles.len(), 2);
        assert_eq!(outcome.obstacles[1].num_segments(), 3);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = Config {
            tile_size: 3,
            ..Config::default()
        };
        assert!(ObstacleBuilder::new(&config).is_err());
    }
}
