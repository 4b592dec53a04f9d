//! Polygonal obstacles traced from the walls of a tile grid.
//!
//! A [`Contour`] is grown one segment at a time while a trace is running. Once the trace
//! ends, [`Contour::build`] turns it into an immutable [`Obstacle`]. Closed obstacles compute
//! their interior rectangles at that point, exactly once.

mod builder;
mod cursor;
mod inner;
mod segment;

pub use builder::{BuildOutcome, ObstacleBuilder};
pub use cursor::Cursor;
pub use segment::ObstacleSegment;

use crate::{
    geometry::{decompose, Point, Rect},
    terrain::TileCode,
};
use itertools::Itertools;

/// A contour cannot accept any more segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ObstacleError {
    #[error("contour starting at {0} is already closed")]
    AlreadyClosed(Point),
}

/// An obstacle under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    start_point: Point,
    segments: Vec<ObstacleSegment>,
}

impl Contour {
    pub fn new(start_point: Point) -> Contour {
        Contour {
            start_point,
            segments: Vec::new(),
        }
    }

    #[inline]
    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn end_point(&self) -> Point {
        self.segments
            .last()
            .map_or(self.start_point, ObstacleSegment::end_point)
    }

    /// A contour is closed once it returns to its start point.
    ///
    /// An empty contour is not closed.
    pub fn is_closed(&self) -> bool {
        !self.segments.is_empty() && self.end_point() == self.start_point
    }

    pub fn segments(&self) -> &[ObstacleSegment] {
        &self.segments
    }

    /// Append a segment beginning where the contour currently ends.
    pub fn add_segment(
        &mut self,
        vector: Point,
        counter_clockwise: bool,
        tile_code: TileCode,
    ) -> Result<(), ObstacleError> {
        if self.is_closed() {
            return Err(ObstacleError::AlreadyClosed(self.start_point));
        }
        let segment = ObstacleSegment::new(self.end_point(), vector, counter_clockwise, tile_code);
        self.segments.push(segment);
        Ok(())
    }

    /// Merge each run of consecutive straight segments into one.
    ///
    /// A merged segment keeps the winding and tile code of the first segment of its run.
    /// Corners are never merged.
    pub fn optimized(&self) -> Contour {
        let segments = self
            .segments
            .iter()
            .copied()
            .coalesce(|a, b| {
                if a.is_straight_line() && b.is_straight_line() {
                    Ok(ObstacleSegment::new(
                        a.start_point(),
                        a.vector() + b.vector(),
                        a.counter_clockwise(),
                        a.tile_code(),
                    ))
                } else {
                    Err((a, b))
                }
            })
            .collect();
        Contour {
            start_point: self.start_point,
            segments,
        }
    }

    /// Finish this contour.
    ///
    /// For a closed contour this computes the inner polygon and partitions it into
    /// rectangles. If the partition fails, the failure is logged and the obstacle keeps its
    /// contour with no rectangles.
    pub fn build(self) -> Obstacle {
        let inner_area = if self.is_closed() {
            let polygon = inner::inner_polygon(self.start_point, &self.segments);
            match decompose::rectangles(&polygon, Rect::from_corners) {
                Ok(rects) => rects,
                Err(err) => {
                    log::warn!(
                        "no inner area for obstacle starting at {}: {}",
                        self.start_point,
                        err
                    );
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Obstacle {
            start_point: self.start_point,
            segments: self.segments,
            inner_area,
        }
    }
}

/// A traced wall structure: an ordered, contiguous chain of segments.
///
/// Open obstacles cross the border of the grid; closed obstacles return to their start point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obstacle {
    start_point: Point,
    segments: Vec<ObstacleSegment>,
    inner_area: Vec<Rect>,
}

impl Obstacle {
    #[inline]
    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn end_point(&self) -> Point {
        self.segments
            .last()
            .map_or(self.start_point, ObstacleSegment::end_point)
    }

    pub fn is_closed(&self) -> bool {
        !self.segments.is_empty() && self.end_point() == self.start_point
    }

    pub fn segments(&self) -> &[ObstacleSegment] {
        &self.segments
    }

    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// The start point followed by the end point of each segment.
    pub fn points(&self) -> Vec<Point> {
        std::iter::once(self.start_point)
            .chain(self.segments.iter().map(ObstacleSegment::end_point))
            .collect()
    }

    /// The contour pulled in by half a tile toward the interior, for closed obstacles.
    pub fn inner_polygon(&self) -> Option<Vec<Point>> {
        self.is_closed()
            .then(|| inner::inner_polygon(self.start_point, &self.segments))
    }

    /// Non-overlapping rectangles covering the inner polygon.
    ///
    /// Empty for open obstacles, and for closed ones whose inner polygon could not be
    /// partitioned.
    pub fn inner_area_rectangles(&self) -> &[Rect] {
        &self.inner_area
    }

    /// This obstacle with runs of straight segments merged.
    pub fn optimized(&self) -> Obstacle {
        self.to_contour().optimized().build()
    }

    fn to_contour(&self) -> Contour {
        Contour {
            start_point: self.start_point,
            segments: self.segments.clone(),
        }
    }
}
