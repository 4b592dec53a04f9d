//! Partition a rectilinear polygon into non-overlapping rectangles.

use super::Point;
use itertools::Itertools;

/// A polygon could not be partitioned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecompositionError {
    #[error("a polygon needs at least 4 vertices; got {0}")]
    TooFewVertices(usize),
    #[error("edge from {0} to {1} is not axis-aligned")]
    NotRectilinear(Point, Point),
}

/// Partition a closed rectilinear polygon into rectangles.
///
/// The polygon is given by its vertices in order; the edge from the last vertex back to the
/// first is implied, so the first vertex should not be repeated at the end.
///
/// The interior is found with the even-odd rule, one horizontal slab at a time, where slabs
/// are bounded by consecutive distinct vertex y-coordinates. Intervals which continue unchanged
/// through adjacent slabs are merged into a single rectangle.
///
/// For each rectangle, `make_rect` is called with its top left and bottom right corners.
/// Rectangles are produced in order of their top edge, then their left edge.
pub fn rectangles<R>(
    polygon: &[Point],
    mut make_rect: impl FnMut(Point, Point) -> R,
) -> Result<Vec<R>, DecompositionError> {
    if polygon.len() < 4 {
        return Err(DecompositionError::TooFewVertices(polygon.len()));
    }

    // (x, top, bottom)
    let mut verticals = Vec::new();
    for (from, to) in polygon.iter().copied().circular_tuple_windows() {
        if from.x != to.x && from.y != to.y {
            return Err(DecompositionError::NotRectilinear(from, to));
        }
        if from.x == to.x && from.y != to.y {
            verticals.push((from.x, from.y.min(to.y), from.y.max(to.y)));
        }
    }

    let ys: Vec<i32> = polygon.iter().map(|point| point.y).sorted().dedup().collect();

    // (left, right, top) of strips which may continue into the next slab
    let mut open: Vec<(i32, i32, i32)> = Vec::new();
    let mut finished: Vec<(Point, Point)> = Vec::new();

    for (top, bottom) in ys.iter().copied().tuple_windows() {
        let crossings: Vec<i32> = verticals
            .iter()
            .filter(|&&(_, low, high)| low <= top && high >= bottom)
            .map(|&(x, _, _)| x)
            .sorted()
            .collect();
        // every slab boundary is a vertex y, so each vertical edge spans a slab entirely or
        // not at all, and a closed polygon crosses it an even number of times
        debug_assert!(crossings.len() % 2 == 0);

        let intervals: Vec<(i32, i32)> = crossings
            .into_iter()
            .tuples::<(i32, i32)>()
            .filter(|(left, right)| left < right)
            .collect();

        open.retain(|&(left, right, strip_top)| {
            let continues = intervals.contains(&(left, right));
            if !continues {
                finished.push((Point::new(left, strip_top), Point::new(right, top)));
            }
            continues
        });

        for &(left, right) in &intervals {
            if !open.iter().any(|&(l, r, _)| l == left && r == right) {
                open.push((left, right, top));
            }
        }
    }

    if let Some(&last) = ys.last() {
        finished.extend(
            open.into_iter()
                .map(|(left, right, top)| (Point::new(left, top), Point::new(right, last))),
        );
    }

    finished.sort_by_key(|(min, _)| (min.y, min.x));
    Ok(finished
        .into_iter()
        .map(|(min, max)| make_rect(min, max))
        .collect())
}
