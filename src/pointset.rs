//! Post-processing of rasterized point sequences.
//!
//! Sorting, deduplication, greedy nearest-neighbour reordering and
//! reflections. Every operation is pure and allocates a new sequence.

use std::cmp::Ordering;

use crate::geometry::{Point, PointSequence, SequenceOrder};
use crate::math;

/// Total order on points: x, then y, then z.
#[must_use]
pub fn lex_cmp(a: &Point, b: &Point) -> Ordering {
    a.x.total_cmp(&b.x)
        .then_with(|| a.y.total_cmp(&b.y))
        .then_with(|| a.z.total_cmp(&b.z))
}

/// Sort lexicographically by x, then y, then z.
#[must_use]
pub fn lex_sort(seq: &PointSequence) -> PointSequence {
    let mut points = seq.points().to_vec();
    points.sort_by(lex_cmp);
    PointSequence::new(points, SequenceOrder::Lexicographic)
}

/// Remove adjacent equal points. Applied after [`lex_sort`] this yields a set.
#[must_use]
pub fn dedup(seq: &PointSequence) -> PointSequence {
    let mut points = seq.points().to_vec();
    points.dedup();
    PointSequence::new(points, seq.order())
}

/// Reorder into a greedy nearest-neighbour traversal.
///
/// Starts at `seq[0]`; each following point is the unvisited point nearest
/// (Euclidean) to the one emitted before it. Equal distances resolve to the
/// earliest index in the input. Points are tracked by index, so duplicates
/// survive and the result is always a permutation of the input.
///
/// # Example
///
/// ```
/// use trueno_raster::geometry::{Point, PointSequence};
/// use trueno_raster::pointset::reorder_adjacent;
///
/// let seq = PointSequence::native(vec![
///     Point::xy(0.0, 0.0),
///     Point::xy(2.0, 0.0),
///     Point::xy(1.0, 0.0),
/// ]);
/// assert_eq!(reorder_adjacent(&seq).to_xy(), vec![(0, 0), (1, 0), (2, 0)]);
/// ```
#[must_use]
pub fn reorder_adjacent(seq: &PointSequence) -> PointSequence {
    let input = seq.points();
    let Some(&first) = input.first() else {
        return PointSequence::new(Vec::new(), SequenceOrder::Adjacent);
    };

    let mut visited = vec![false; input.len()];
    visited[0] = true;
    let mut result = Vec::with_capacity(input.len());
    result.push(first);
    let mut last = first;

    while result.len() < input.len() {
        let mut best: Option<(usize, f64)> = None;
        for (i, &p) in input.iter().enumerate() {
            if visited[i] {
                continue;
            }
            let d = math::distance(last, p);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        let Some((i, _)) = best else { break };
        visited[i] = true;
        last = input[i];
        result.push(last);
    }

    PointSequence::new(result, SequenceOrder::Adjacent)
}

/// Ordering regime after an isometry: adjacency survives, sortedness does not.
fn reflected_order(order: SequenceOrder) -> SequenceOrder {
    match order {
        SequenceOrder::Adjacent => SequenceOrder::Adjacent,
        SequenceOrder::Native | SequenceOrder::Lexicographic => SequenceOrder::Native,
    }
}

/// Mirror across the vertical line `x = cx`: `(x, y, z) -> (2cx - x, y, z)`.
#[must_use]
pub fn reflect_horizontal(seq: &PointSequence, cx: f64) -> PointSequence {
    let points = seq.iter().map(|p| Point::new(2.0 * cx - p.x, p.y, p.z)).collect();
    PointSequence::new(points, reflected_order(seq.order()))
}

/// Mirror across the horizontal line `y = cy`: `(x, y, z) -> (x, 2cy - y, z)`.
#[must_use]
pub fn reflect_vertical(seq: &PointSequence, cy: f64) -> PointSequence {
    let points = seq.iter().map(|p| Point::new(p.x, 2.0 * cy - p.y, p.z)).collect();
    PointSequence::new(points, reflected_order(seq.order()))
}
