//! Line rasterization kernels.
//!
//! Three classical algorithms enumerate the lattice points approximating a
//! segment:
//!
//! - **Basic incremental**: floating slope, `y` rounded after every step.
//! - **DDA**: unit steps along the major axis, fractional steps along the minor.
//! - **Bresenham**: integer decision variable, no floating point at all.
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//!   *IBM Systems Journal*, 4(1), 25-30.

use log::debug;

use crate::error::{Error, Result};
use crate::geometry::{LineInput, Point, PointSequence};

/// Terminal-pixel policy of the basic incremental kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endpoint {
    /// Keep stepping while `x < x2`; the final pixel is omitted when `x2` is integral.
    #[default]
    Exclusive,
    /// Keep stepping while `x <= floor(x2)`; the final column is always emitted.
    Inclusive,
}

// ============================================================================
// Basic incremental
// ============================================================================

/// Rasterize a line with the basic incremental algorithm.
///
/// Emits `(floor(x1), floor(y1))`, then for each subsequent column updates
/// `y <- round(y + m)` (ties away from zero) and emits `(x, y)`. The running
/// `y` starts from the exact `y1`.
///
/// # Errors
///
/// Returns [`Error::Domain`] unless `x2 > x1`.
///
/// # Example
///
/// ```
/// use trueno_raster::geometry::LineInput;
/// use trueno_raster::raster::{basic_incremental_line, Endpoint};
///
/// let line = LineInput::new(0.0, 0.0, 4.0, 4.0).unwrap();
/// let pts = basic_incremental_line(&line, Endpoint::Exclusive).unwrap();
/// assert_eq!(pts.to_xy(), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
/// ```
pub fn basic_incremental_line(input: &LineInput, endpoint: Endpoint) -> Result<PointSequence> {
    if input.x2 <= input.x1 {
        return Err(Error::domain(format!(
            "basic incremental line requires x2 > x1, got x1={} x2={}",
            input.x1, input.x2
        )));
    }

    let m = input.dy() / input.dx();
    let start = input.x1.floor() as i64;
    let last = input.x2.floor() as i64;
    let within = |x: i64| match endpoint {
        Endpoint::Exclusive => (x as f64) < input.x2,
        Endpoint::Inclusive => x <= last,
    };

    let mut points = vec![Point::xy(start as f64, input.y1.floor())];
    let mut y = input.y1;
    let mut x = start + 1;
    while within(x) {
        y = (y + m).round();
        points.push(Point::xy(x as f64, y));
        x += 1;
    }

    debug!("basic incremental line: {} points", points.len());
    Ok(PointSequence::native(points))
}

// ============================================================================
// DDA
// ============================================================================

/// Rasterize a line with the digital differential analyzer.
///
/// Endpoints are snapped to the lattice with `floor`. The major axis is `x`
/// when `|dx| >= |dy|`, else `y`; it advances one unit per step while the
/// minor axis advances `minor / major`. The minor coordinate of step `i` is
/// evaluated as `start + delta * i / steps`, so no error accumulates, and is
/// rounded to nearest with ties toward positive infinity (`floor(v + 0.5)`).
/// Both endpoints are emitted; a degenerate line yields its single point.
///
/// # Example
///
/// ```
/// use trueno_raster::geometry::LineInput;
/// use trueno_raster::raster::dda_line;
///
/// let line = LineInput::new(0.0, 0.0, 5.0, 2.0).unwrap();
/// assert_eq!(
///     dda_line(&line).to_xy(),
///     vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]
/// );
/// ```
#[must_use]
pub fn dda_line(input: &LineInput) -> PointSequence {
    let (x0, y0) = (input.x1.floor(), input.y1.floor());
    let (x1, y1) = (input.x2.floor(), input.y2.floor());
    let (dx, dy) = (x1 - x0, y1 - y0);
    let steps = dx.abs().max(dy.abs());

    if steps == 0.0 {
        return PointSequence::native(vec![Point::xy(x0, y0)]);
    }

    let round = |v: f64| (v + 0.5).floor();
    let points: Vec<Point> = (0..=steps as i64)
        .map(|i| {
            let t = i as f64;
            Point::xy(round(x0 + dx * t / steps), round(y0 + dy * t / steps))
        })
        .collect();

    debug!("dda line: {} points over {} steps", points.len(), steps);
    PointSequence::native(points)
}

// ============================================================================
// Bresenham
// ============================================================================

/// Iterator over the lattice points of a Bresenham line between integer endpoints.
///
/// Any octant is accepted: the endpoints are symmetrised into the first octant
/// by an optional axis swap and sign flips around the start point, the
/// first-octant core runs, and each offset is mapped back. The first item is
/// always the start point and the last item the end point.
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    x0: i64,
    y0: i64,
    sx: i64,
    sy: i64,
    swap: bool,
    u: i64,
    v: i64,
    du: i64,
    dv: i64,
    p: i64,
}

impl BresenhamLine {
    /// Create an iterator from `(x0, y0)` to `(x1, y1)` inclusive.
    #[must_use]
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        let (dx, dy) = (x1 - x0, y1 - y0);
        let swap = dy.abs() > dx.abs();
        let (du, dv) = if swap { (dy.abs(), dx.abs()) } else { (dx.abs(), dy.abs()) };
        Self {
            x0,
            y0,
            sx: if dx < 0 { -1 } else { 1 },
            sy: if dy < 0 { -1 } else { 1 },
            swap,
            u: 0,
            v: 0,
            du,
            dv,
            p: 2 * dv - du,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<(i64, i64)> {
        if self.u > self.du {
            return None;
        }

        let (ox, oy) = if self.swap { (self.v, self.u) } else { (self.u, self.v) };
        let item = (self.x0 + self.sx * ox, self.y0 + self.sy * oy);

        if self.p >= 0 {
            self.v += 1;
            self.p += 2 * (self.dv - self.du);
        } else {
            self.p += 2 * self.dv;
        }
        self.u += 1;

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.du - self.u + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BresenhamLine {}

fn lattice_endpoints(input: &LineInput) -> (i64, i64, i64, i64) {
    (
        input.x1.floor() as i64,
        input.y1.floor() as i64,
        input.x2.floor() as i64,
        input.y2.floor() as i64,
    )
}

/// Rasterize a first-octant line with Bresenham's decision variable.
///
/// With `dx = x2 - x1`, `dy = y2 - y1` and `p0 = 2dy - dx`, every column
/// from `x1` to `x2` inclusive is emitted; when `p >= 0` the row advances and
/// `p += 2(dy - dx)`, otherwise `p += 2dy`. Endpoints are snapped with `floor`.
///
/// # Errors
///
/// Returns [`Error::Domain`] unless `x2 >= x1` and `0 <= dy <= dx`.
///
/// # Example
///
/// ```
/// use trueno_raster::geometry::LineInput;
/// use trueno_raster::raster::bresenham_line_first_octant;
///
/// let line = LineInput::new(0.0, 0.0, 5.0, 2.0).unwrap();
/// let pts = bresenham_line_first_octant(&line).unwrap();
/// assert_eq!(pts.to_xy(), vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]);
/// ```
pub fn bresenham_line_first_octant(input: &LineInput) -> Result<PointSequence> {
    let (x1, y1, x2, y2) = lattice_endpoints(input);
    let (dx, dy) = (x2 - x1, y2 - y1);
    if dx < 0 || dy < 0 || dy > dx {
        return Err(Error::domain(format!(
            "first-octant Bresenham requires x2 >= x1 and 0 <= dy <= dx, got dx={dx} dy={dy}"
        )));
    }
    Ok(collect_bresenham(x1, y1, x2, y2))
}

/// Rasterize a line in any octant with Bresenham's algorithm.
///
/// See [`BresenhamLine`] for the symmetrisation. Endpoints are snapped with `floor`.
#[must_use]
pub fn bresenham_line(input: &LineInput) -> PointSequence {
    let (x1, y1, x2, y2) = lattice_endpoints(input);
    collect_bresenham(x1, y1, x2, y2)
}

fn collect_bresenham(x1: i64, y1: i64, x2: i64, y2: i64) -> PointSequence {
    let points: Vec<Point> = BresenhamLine::new(x1, y1, x2, y2)
        .map(|(x, y)| Point::xy(x as f64, y as f64))
        .collect();
    debug!("bresenham line: {} points", points.len());
    PointSequence::native(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> LineInput {
        LineInput::new(x1, y1, x2, y2).unwrap()
    }

    #[test]
    fn test_basic_incremental_diagonal_exclusive() {
        let pts = basic_incremental_line(&line(0.0, 0.0, 4.0, 4.0), Endpoint::Exclusive).unwrap();
        assert_eq!(pts.to_xy(), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_basic_incremental_diagonal_inclusive() {
        let pts = basic_incremental_line(&line(0.0, 0.0, 4.0, 4.0), Endpoint::Inclusive).unwrap();
        assert_eq!(pts.to_xy(), vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn test_basic_incremental_fractional_end_reaches_floor() {
        // x2 = 3.5: both policies stop at column 3.
        let ex = basic_incremental_line(&line(0.0, 0.0, 3.5, 0.0), Endpoint::Exclusive).unwrap();
        let inc = basic_incremental_line(&line(0.0, 0.0, 3.5, 0.0), Endpoint::Inclusive).unwrap();
        assert_eq!(ex, inc);
        assert_eq!(ex.last().unwrap().x, 3.0);
    }

    #[test]
    fn test_basic_incremental_negative_slope() {
        let pts = basic_incremental_line(&line(0.0, 4.0, 4.0, 0.0), Endpoint::Inclusive).unwrap();
        assert_eq!(pts.to_xy(), vec![(0, 4), (1, 3), (2, 2), (3, 1), (4, 0)]);
    }

    #[test]
    fn test_basic_incremental_rejects_vertical_and_reversed() {
        assert!(matches!(
            basic_incremental_line(&line(2.0, 0.0, 2.0, 5.0), Endpoint::Exclusive),
            Err(Error::Domain(_))
        ));
        assert!(matches!(
            basic_incremental_line(&line(5.0, 0.0, 2.0, 5.0), Endpoint::Exclusive),
            Err(Error::Domain(_))
        ));
    }

    #[test]
    fn test_basic_incremental_all_z_zero() {
        let pts = basic_incremental_line(&line(-3.0, 1.0, 7.0, 4.0), Endpoint::Exclusive).unwrap();
        assert!(pts.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn test_dda_shallow() {
        let pts = dda_line(&line(0.0, 0.0, 5.0, 2.0));
        assert_eq!(pts.to_xy(), vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]);
    }

    #[test]
    fn test_dda_steep_steps_over_y() {
        let pts = dda_line(&line(0.0, 0.0, 2.0, 5.0));
        assert_eq!(pts.len(), 6);
        let ys: Vec<i64> = pts.to_xy().iter().map(|&(_, y)| y).collect();
        assert_eq!(ys, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(pts.last().unwrap(), Point::xy(2.0, 5.0));
    }

    #[test]
    fn test_dda_half_ties_round_up() {
        let pts = dda_line(&line(0.0, 0.0, 4.0, 2.0));
        assert_eq!(pts.to_xy(), vec![(0, 0), (1, 1), (2, 1), (3, 2), (4, 2)]);
    }

    #[test]
    fn test_dda_degenerate_single_point() {
        let pts = dda_line(&line(3.2, 4.9, 3.7, 4.1));
        assert_eq!(pts.to_xy(), vec![(3, 4)]);
    }

    #[test]
    fn test_dda_snaps_endpoints() {
        let pts = dda_line(&line(0.7, 0.2, 6.9, 3.3));
        assert_eq!(pts.first().unwrap(), Point::xy(0.0, 0.0));
        assert_eq!(pts.last().unwrap(), Point::xy(6.0, 3.0));
    }

    #[test]
    fn test_bresenham_canonical() {
        let pts = bresenham_line_first_octant(&line(0.0, 0.0, 5.0, 2.0)).unwrap();
        assert_eq!(pts.to_xy(), vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]);
    }

    #[test]
    fn test_bresenham_first_octant_rejects_steep() {
        assert!(matches!(
            bresenham_line_first_octant(&line(0.0, 0.0, 2.0, 5.0)),
            Err(Error::Domain(_))
        ));
        assert!(matches!(
            bresenham_line_first_octant(&line(5.0, 0.0, 0.0, 0.0)),
            Err(Error::Domain(_))
        ));
    }

    #[test]
    fn test_bresenham_all_octants_hit_endpoints() {
        let ends = [(5, 2), (2, 5), (-2, 5), (-5, 2), (-5, -2), (-2, -5), (2, -5), (5, -2)];
        for (ex, ey) in ends {
            let pts: Vec<_> = BresenhamLine::new(1, 1, 1 + ex, 1 + ey).collect();
            assert_eq!(pts.first(), Some(&(1, 1)));
            assert_eq!(pts.last(), Some(&(1 + ex, 1 + ey)));
            assert_eq!(pts.len() as i64, ex.abs().max(ey.abs()) + 1);
            for w in pts.windows(2) {
                assert!((w[1].0 - w[0].0).abs() <= 1 && (w[1].1 - w[0].1).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_bresenham_iterator_len() {
        let it = BresenhamLine::new(0, 0, 10, 3);
        assert_eq!(it.len(), 11);
        assert_eq!(BresenhamLine::new(4, 4, 4, 4).collect::<Vec<_>>(), vec![(4, 4)]);
    }

    #[test]
    fn test_bresenham_line_matches_first_octant_core() {
        let input = line(2.0, 3.0, 17.0, 9.0);
        assert_eq!(bresenham_line(&input), bresenham_line_first_octant(&input).unwrap());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// First-octant output: one point per column, monotone, endpoints exact.
        #[test]
        fn prop_bresenham_first_octant_shape(
            x1 in -100i64..100,
            y1 in -100i64..100,
            dx in 1i64..200,
            frac in 0.0..=1.0f64,
        ) {
            let dy = ((dx as f64) * frac).floor() as i64;
            let input = LineInput::new(
                x1 as f64, y1 as f64, (x1 + dx) as f64, (y1 + dy) as f64,
            ).unwrap();
            let pts = bresenham_line_first_octant(&input).unwrap().to_xy();

            prop_assert_eq!(pts.len() as i64, dx + 1);
            prop_assert_eq!(pts[0], (x1, y1));
            prop_assert_eq!(*pts.last().unwrap(), (x1 + dx, y1 + dy));
            for w in pts.windows(2) {
                prop_assert_eq!(w[1].0, w[0].0 + 1);
                prop_assert!(w[1].1 == w[0].1 || w[1].1 == w[0].1 + 1);
            }
        }

        /// DDA and Bresenham agree on the lattice endpoints and point count.
        #[test]
        fn prop_dda_endpoints(
            x1 in -50i64..50, y1 in -50i64..50, x2 in -50i64..50, y2 in -50i64..50,
        ) {
            let input = LineInput::new(x1 as f64, y1 as f64, x2 as f64, y2 as f64).unwrap();
            let dda = dda_line(&input).to_xy();
            prop_assert_eq!(dda[0], (x1, y1));
            prop_assert_eq!(*dda.last().unwrap(), (x2, y2));
            prop_assert_eq!(dda.len(), bresenham_line(&input).len());
        }

        /// Basic incremental starts at the floored start point and stays left of x2.
        #[test]
        fn prop_basic_incremental_bounds(
            x1 in -50.0..50.0f64, y1 in -50.0..50.0f64, len in 0.5..80.0f64, y2 in -50.0..50.0f64,
        ) {
            let input = LineInput::new(x1, y1, x1 + len, y2).unwrap();
            let pts = basic_incremental_line(&input, Endpoint::Exclusive).unwrap();
            prop_assert_eq!(pts.first().unwrap(), Point::xy(x1.floor(), y1.floor()));
            for p in pts.iter().skip(1) {
                prop_assert!(p.x < input.x2);
            }
        }
    }
}
