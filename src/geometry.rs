//! Geometric value types shared by the rasterizer, point-set operations and scene.
//!
//! Provides points, oriented segments, ordered point sequences and the
//! validated inputs of the line and circle kernels.

use crate::error::{Error, Result};
use crate::math::Vec3;

/// Largest accepted magnitude of a line endpoint or circle centre coordinate.
pub const MAX_COORDINATE: f64 = (1u64 << 20) as f64;

/// Largest accepted circle radius. Circle scenes are reordered in quadratic time.
pub const MAX_RADIUS: i64 = 1 << 12;

/// A lattice point produced by rasterization. Components are integer-valued with `z = 0`.
pub type Point = Vec3;

/// Ordering regime of a [`PointSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceOrder {
    /// Kernel emission order (or no particular order).
    #[default]
    Native,
    /// Sorted by x, then y, then z.
    Lexicographic,
    /// Greedy nearest-neighbour traversal.
    Adjacent,
}

/// An ordered, finite sequence of points that carries its ordering regime.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointSequence {
    points: Vec<Point>,
    order: SequenceOrder,
}

impl PointSequence {
    /// Create a sequence with an explicit ordering regime.
    #[must_use]
    pub fn new(points: Vec<Point>, order: SequenceOrder) -> Self {
        Self { points, order }
    }

    /// Create a sequence in kernel emission order.
    #[must_use]
    pub fn native(points: Vec<Point>) -> Self {
        Self::new(points, SequenceOrder::Native)
    }

    /// The points as a slice.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Ordering regime.
    #[must_use]
    pub const fn order(&self) -> SequenceOrder {
        self.order
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point, if any.
    #[must_use]
    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Iterate over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Points as `(x, y)` integer pairs.
    #[must_use]
    pub fn to_xy(&self) -> Vec<(i64, i64)> {
        self.points.iter().map(|p| (p.x as i64, p.y as i64)).collect()
    }

    /// Segments between consecutive points.
    #[must_use]
    pub fn polyline(&self) -> Vec<Segment> {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1])).collect()
    }
}

impl<'a> IntoIterator for &'a PointSequence {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// An oriented pair of points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    /// Start point.
    pub origin: Point,
    /// End point.
    pub tip: Point,
}

impl Segment {
    /// Create a new segment.
    #[must_use]
    pub const fn new(origin: Point, tip: Point) -> Self {
        Self { origin, tip }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        crate::math::distance(self.origin, self.tip)
    }
}

/// Endpoints of a line kernel invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineInput {
    /// Start x.
    pub x1: f64,
    /// Start y.
    pub y1: f64,
    /// End x.
    pub x2: f64,
    /// End y.
    pub y2: f64,
}

impl LineInput {
    /// Create a line input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] if any coordinate is NaN, infinite or larger
    /// in magnitude than [`MAX_COORDINATE`].
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        if ![x1, y1, x2, y2].iter().all(|v| v.abs() <= MAX_COORDINATE) {
            return Err(Error::domain(format!(
                "line endpoints must be finite and within ±{MAX_COORDINATE}, got ({x1}, {y1}) -> ({x2}, {y2})"
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// `x2 - x1`.
    #[must_use]
    pub fn dx(&self) -> f64 {
        self.x2 - self.x1
    }

    /// `y2 - y1`.
    #[must_use]
    pub fn dy(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// Centre and radius of a circle kernel invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleInput {
    /// Centre x.
    pub cx: i64,
    /// Centre y.
    pub cy: i64,
    /// Radius (non-negative).
    pub r: i64,
}

impl CircleInput {
    /// Create a circle input from integer values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] if the radius is negative or above
    /// [`MAX_RADIUS`], or the centre lies outside ±[`MAX_COORDINATE`].
    pub fn new(cx: i64, cy: i64, r: i64) -> Result<Self> {
        if r < 0 {
            return Err(Error::domain(format!("radius must be >= 0, got {r}")));
        }
        if r > MAX_RADIUS {
            return Err(Error::domain(format!("radius must be <= {MAX_RADIUS}, got {r}")));
        }
        let limit = MAX_COORDINATE as i64;
        if !(-limit..=limit).contains(&cx) || !(-limit..=limit).contains(&cy) {
            return Err(Error::domain(format!(
                "circle centre must be within ±{limit}, got ({cx}, {cy})"
            )));
        }
        Ok(Self { cx, cy, r })
    }

    /// Create a circle input from real-valued prompt answers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] if a value is not a finite integer or the radius is negative.
    pub fn from_f64(cx: f64, cy: f64, r: f64) -> Result<Self> {
        let cx = integral(cx, "circle centre x")?;
        let cy = integral(cy, "circle centre y")?;
        let r = integral(r, "radius")?;
        Self::new(cx, cy, r)
    }
}

fn integral(v: f64, what: &str) -> Result<i64> {
    if !v.is_finite() || v.fract() != 0.0 {
        return Err(Error::domain(format!("{what} must be an integer, got {v}")));
    }
    if v.abs() > MAX_COORDINATE {
        return Err(Error::domain(format!("{what} must be within ±{MAX_COORDINATE}, got {v}")));
    }
    Ok(v as i64)
}

/// Axis-aligned bounds on the xy plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum x.
    pub min_x: f64,
    /// Minimum y.
    pub min_y: f64,
    /// Maximum x.
    pub max_x: f64,
    /// Maximum y.
    pub max_y: f64,
}

impl Bounds {
    /// Bounds of a point set, `None` when empty.
    #[must_use]
    pub fn of<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Self>, p| {
            Some(match acc {
                None => Self { min_x: p.x, min_y: p.y, max_x: p.x, max_y: p.y },
                Some(b) => b.include(*p),
            })
        })
    }

    /// Grow to include a point.
    #[must_use]
    pub fn include(self, p: Point) -> Self {
        Self {
            min_x: self.min_x.min(p.x),
            min_y: self.min_y.min(p.y),
            max_x: self.max_x.max(p.x),
            max_y: self.max_y.max(p.y),
        }
    }

    /// Union of two bounds.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        self.include(Point::xy(other.min_x, other.min_y))
            .include(Point::xy(other.max_x, other.max_y))
    }

    /// Expand on every side by `pad`.
    #[must_use]
    pub fn padded(self, pad: f64) -> Self {
        Self {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            max_x: self.max_x + pad,
            max_y: self.max_y + pad,
        }
    }

    /// Width of the bounds.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounds.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::xy((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }
}
