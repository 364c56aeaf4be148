//! Circle rasterization kernels.
//!
//! Both kernels walk one octant with an integer decision variable and rely
//! on the circle's eight-fold symmetry for the rest.

use log::debug;

use crate::geometry::{CircleInput, Point, PointSequence};
use crate::pointset;

fn point(x: i64, y: i64) -> Point {
    Point::xy(x as f64, y as f64)
}

/// Rasterize the first-quadrant arc of a circle with the midpoint algorithm.
///
/// Emits the axis crossings `(cx + r, cy)` and `(cx, cy + r)` (or only the
/// centre when `r == 0`), then walks from `(r, 0)` with `P0 = 1 - r`:
/// `y` advances every step; when `P <= 0` then `P += 2y + 1`, otherwise `x`
/// retreats and `P += 2y - 2x + 1`. Each step emits `(cx + x, cy + y)` and,
/// off the diagonal, its mirror `(cx + y, cy + x)`. The walk stops once
/// `x < y`.
///
/// The output covers the first quadrant only; [`crate::scene`] mirrors it into
/// the other three.
///
/// # Example
///
/// ```
/// use trueno_raster::geometry::CircleInput;
/// use trueno_raster::raster::midpoint_circle;
///
/// let arc = midpoint_circle(&CircleInput::new(0, 0, 2).unwrap());
/// assert_eq!(arc.to_xy(), vec![(2, 0), (0, 2), (2, 1), (1, 2)]);
/// ```
#[must_use]
pub fn midpoint_circle(input: &CircleInput) -> PointSequence {
    let CircleInput { cx, cy, r } = *input;
    let mut points = Vec::new();

    if r > 0 {
        points.push(point(cx + r, cy));
        points.push(point(cx, cy + r));
    } else {
        points.push(point(cx, cy));
    }

    let (mut x, mut y) = (r, 0i64);
    let mut p = 1 - r;
    while x > y {
        y += 1;
        if p <= 0 {
            p += 2 * y + 1;
        } else {
            x -= 1;
            p += 2 * y - 2 * x + 1;
        }

        if x < y {
            break;
        }

        points.push(point(cx + x, cy + y));
        if x != y {
            points.push(point(cx + y, cy + x));
        }
    }

    debug!("midpoint circle r={r}: {} arc points", points.len());
    PointSequence::native(points)
}

/// The eight points symmetric to `(x, y)` about the centre.
fn octants(cx: i64, cy: i64, x: i64, y: i64) -> [Point; 8] {
    [
        point(cx + x, cy + y),
        point(cx - x, cy + y),
        point(cx + x, cy - y),
        point(cx - x, cy - y),
        point(cx + y, cy + x),
        point(cx - y, cy + x),
        point(cx + y, cy - x),
        point(cx - y, cy - x),
    ]
}

/// Rasterize a full circle with Bresenham's circle algorithm.
///
/// Starts at `(0, r)` with `d = 3 - 2r` and, while `y >= x`, emits the eight
/// symmetric points. The decision is taken against the current column: when
/// `d > 0` the row retreats and `d += 4(x - y) + 10`, otherwise
/// `d += 4x + 6`; then `x` advances. Advancing `x` before the update instead
/// lets points such as `(4, 2)` onto an `r = 5` ring, outside
/// `|x² + y² - r²| <= r`. The raw emission is sorted
/// lexicographically and deduplicated, so the result is a closed ring with
/// no repeated points.
///
/// # Example
///
/// ```
/// use trueno_raster::geometry::CircleInput;
/// use trueno_raster::raster::bresenham_circle;
///
/// let ring = bresenham_circle(&CircleInput::new(0, 0, 1).unwrap());
/// assert_eq!(ring.to_xy(), vec![(-1, 0), (0, -1), (0, 1), (1, 0)]);
/// ```
#[must_use]
pub fn bresenham_circle(input: &CircleInput) -> PointSequence {
    let CircleInput { cx, cy, r } = *input;
    let mut raw = Vec::new();

    let (mut x, mut y) = (0i64, r);
    let mut d = 3 - 2 * r;
    while y >= x {
        raw.extend_from_slice(&octants(cx, cy, x, y));
        if d > 0 {
            d += 4 * (x - y) + 10;
            y -= 1;
        } else {
            d += 4 * x + 6;
        }
        x += 1;
    }

    let raw_len = raw.len();
    let ring = pointset::dedup(&pointset::lex_sort(&PointSequence::native(raw)));
    debug!("bresenham circle r={r}: {raw_len} emitted, {} unique", ring.len());
    ring
}
