//! The contour of a closed obstacle, pulled in toward its interior.

use super::ObstacleSegment;
use crate::geometry::Point;
use itertools::Itertools;
use std::collections::VecDeque;

/// Axis-aligned edges for one segment.
///
/// A corner arc becomes two half-tile edges. For NW and SE corners the vertical part comes
/// first; for NE and SW corners the horizontal part does.
fn orthogonal_edges(segment: &ObstacleSegment) -> impl Iterator<Item = Point> {
    let vector = segment.vector();
    let vertical = Point::new(0, vector.y);
    let horizontal = Point::new(vector.x, 0);
    let edges = if !segment.is_corner() {
        [Some(vector), None]
    } else if segment.is_nw_corner() || segment.is_se_corner() {
        [Some(vertical), Some(horizontal)]
    } else {
        [Some(horizontal), Some(vertical)]
    };
    edges.into_iter().flatten()
}

/// Compute the inner polygon of a closed contour.
///
/// Returns its vertices in order, starting from a point on the contour. The closing vertex
/// is not repeated.
pub(crate) fn inner_polygon(start_point: Point, segments: &[ObstacleSegment]) -> Vec<Point> {
    // back-and-forth edges cancel out
    let mut stack: Vec<Point> = Vec::with_capacity(segments.len() * 2);
    for edge in segments.iter().flat_map(orthogonal_edges) {
        match stack.last() {
            Some(&top) if top.is_inverse_of(edge) => {
                stack.pop();
            }
            _ => stack.push(edge),
        }
    }

    // the same can happen across the seam between the last and first edges
    let mut start = start_point;
    let mut edges: VecDeque<Point> = stack.into();
    while edges.len() >= 2 {
        match (edges.front(), edges.back()) {
            (Some(&first), Some(&last)) if first.is_inverse_of(last) => {
                start += first;
                edges.pop_front();
                edges.pop_back();
            }
            _ => break,
        }
    }

    let mut points = Vec::with_capacity(edges.len() + 1);
    points.push(start);
    let mut current = start;
    for edge in edges.into_iter().coalesce(|a, b| {
        if a.signum() == b.signum() {
            Ok(a + b)
        } else {
            Err((a, b))
        }
    }) {
        current += edge;
        points.push(current);
    }

    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}
