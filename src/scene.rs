//! Scene assembly: turns an algorithm choice and its parameters into drawable products.
//!
//! A [`Scene`] carries two products of a kernel run:
//!
//! - `pixels`: the point set to draw as discrete pixels
//! - `polyline`: the segments joining those pixels for line rendering
//!
//! Lines connect consecutive kernel points. Circles are completed to a full
//! ring, ordered once with [`crate::pointset::reorder_adjacent`] and closed
//! with a segment from the last point back to the first.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::geometry::{Bounds, CircleInput, LineInput, Point, PointSequence, Segment};
use crate::pointset;
use crate::raster::{self, Endpoint};

/// Minimum exclusive extent of each Cartesian axis.
pub const MIN_AXIS_EXTENT: f64 = 50.0;

/// Rasterization algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Basic incremental line (`BIA`).
    BasicIncrementalLine,
    /// Digital differential analyzer line (`DDA`).
    DdaLine,
    /// Bresenham line (`BA`).
    BresenhamLine,
    /// Midpoint circle (`MPC`).
    MidpointCircle,
    /// Bresenham circle (`BCA`).
    BresenhamCircle,
}

impl Algorithm {
    /// All algorithms in prompt order.
    pub const ALL: [Self; 5] = [
        Self::BasicIncrementalLine,
        Self::DdaLine,
        Self::BresenhamLine,
        Self::MidpointCircle,
        Self::BresenhamCircle,
    ];

    /// The prompt token for this algorithm.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BasicIncrementalLine => "BIA",
            Self::DdaLine => "DDA",
            Self::BresenhamLine => "BA",
            Self::MidpointCircle => "MPC",
            Self::BresenhamCircle => "BCA",
        }
    }

    /// Human-readable algorithm name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BasicIncrementalLine => "Basic incremental algorithm",
            Self::DdaLine => "Digital differential analyzer",
            Self::BresenhamLine => "Bresenham algorithm",
            Self::MidpointCircle => "Midpoint circle algorithm",
            Self::BresenhamCircle => "Bresenham circle algorithm",
        }
    }

    /// Whether this algorithm takes circle parameters.
    #[must_use]
    pub const fn is_circle(self) -> bool {
        matches!(self, Self::MidpointCircle | Self::BresenhamCircle)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|a| a.code() == token)
            .ok_or_else(|| {
                Error::parse(format!(
                    "unknown algorithm '{}', expected one of BIA, DDA, BA, MPC, BCA",
                    s.trim()
                ))
            })
    }
}

/// Kernel parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Line endpoints.
    Line(LineInput),
    /// Circle centre and radius.
    Circle(CircleInput),
}

/// A validated request to build a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneRequest {
    /// Selected algorithm.
    pub algorithm: Algorithm,
    /// Kernel parameters; must match the algorithm's kind.
    pub primitive: Primitive,
    /// Terminal-pixel policy for the basic incremental kernel.
    pub endpoint: Endpoint,
}

impl SceneRequest {
    /// Request a line scene.
    #[must_use]
    pub fn line(algorithm: Algorithm, input: LineInput) -> Self {
        Self { algorithm, primitive: Primitive::Line(input), endpoint: Endpoint::default() }
    }

    /// Request a circle scene.
    #[must_use]
    pub fn circle(algorithm: Algorithm, input: CircleInput) -> Self {
        Self { algorithm, primitive: Primitive::Circle(input), endpoint: Endpoint::default() }
    }

    /// Set the basic incremental endpoint policy.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }
}

/// The drawable products of one kernel run.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    algorithm: Algorithm,
    pixels: PointSequence,
    polyline: Vec<Segment>,
}

impl Scene {
    /// Build a scene from a request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] when the primitive kind does not match the
    /// algorithm or the kernel rejects its input. Kernel errors are surfaced
    /// unchanged.
    pub fn build(request: &SceneRequest) -> Result<Self> {
        let scene = match (request.algorithm, request.primitive) {
            (Algorithm::BasicIncrementalLine, Primitive::Line(l)) => {
                Self::from_line(request.algorithm, raster::basic_incremental_line(&l, request.endpoint)?)
            }
            (Algorithm::DdaLine, Primitive::Line(l)) => {
                Self::from_line(request.algorithm, raster::dda_line(&l))
            }
            (Algorithm::BresenhamLine, Primitive::Line(l)) => {
                Self::from_line(request.algorithm, raster::bresenham_line(&l))
            }
            (Algorithm::MidpointCircle, Primitive::Circle(c)) => Self::midpoint_circle(&c),
            (Algorithm::BresenhamCircle, Primitive::Circle(c)) => Self::bresenham_circle(&c),
            (algorithm, _) => {
                let expected = if algorithm.is_circle() { "circle" } else { "line" };
                return Err(Error::domain(format!("{algorithm} requires {expected} parameters")));
            }
        };

        info!(
            "built {} scene: {} pixels, {} segments",
            scene.algorithm,
            scene.pixel_count(),
            scene.segment_count()
        );
        Ok(scene)
    }

    fn from_line(algorithm: Algorithm, points: PointSequence) -> Self {
        let polyline = points.polyline();
        Self { algorithm, pixels: points, polyline }
    }

    /// Quadrant-1 arc mirrored into a full ring, then ordered once.
    fn midpoint_circle(c: &CircleInput) -> Self {
        let (cx, cy) = (c.cx as f64, c.cy as f64);
        let arc = raster::midpoint_circle(c);
        let upper: Vec<Point> = arc
            .iter()
            .chain(pointset::reflect_horizontal(&arc, cx).iter())
            .copied()
            .collect();
        let upper = PointSequence::native(upper);
        let full: Vec<Point> = upper
            .iter()
            .chain(pointset::reflect_vertical(&upper, cy).iter())
            .copied()
            .collect();
        let ring = pointset::dedup(&pointset::lex_sort(&PointSequence::native(full)));
        debug!("midpoint ring: {} arc points, {} ring points", arc.len(), ring.len());
        Self::closed_ring(Algorithm::MidpointCircle, &ring)
    }

    fn bresenham_circle(c: &CircleInput) -> Self {
        Self::closed_ring(Algorithm::BresenhamCircle, &raster::bresenham_circle(c))
    }

    /// Reorder a ring into a traversal and close it with a last-to-first segment.
    fn closed_ring(algorithm: Algorithm, set: &PointSequence) -> Self {
        let ring = pointset::reorder_adjacent(set);
        let mut polyline = ring.polyline();
        if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
            if ring.len() > 1 {
                polyline.push(Segment::new(last, first));
            }
        }
        Self { algorithm, pixels: ring, polyline }
    }

    /// Algorithm that produced this scene.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Points to draw as pixels.
    #[must_use]
    pub fn pixels(&self) -> &PointSequence {
        &self.pixels
    }

    /// Segments to draw as lines.
    #[must_use]
    pub fn polyline(&self) -> &[Segment] {
        &self.polyline
    }

    /// Number of pixels.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Number of polyline segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.polyline.len()
    }

    /// Bounds over pixels and polyline endpoints.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let ends: Vec<Point> = self.polyline.iter().flat_map(|s| [s.origin, s.tip]).collect();
        match (Bounds::of(self.pixels.iter()), Bounds::of(ends.iter())) {
            (Some(pixels), Some(ends)) => Some(pixels.union(ends)),
            (pixels, ends) => pixels.or(ends),
        }
    }
}

/// The fixed Cartesian axes overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianAxes {
    x: f64,
    y: f64,
    z: f64,
}

impl CartesianAxes {
    /// Create axes with per-axis extents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] unless every extent is finite and exceeds
    /// [`MIN_AXIS_EXTENT`].
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        for (name, d) in [("x", x), ("y", y), ("z", z)] {
            if !(d > MIN_AXIS_EXTENT && d.is_finite()) {
                return Err(Error::domain(format!(
                    "{name} axis extent must be greater than {MIN_AXIS_EXTENT}, got {d}"
                )));
            }
        }
        Ok(Self { x, y, z })
    }

    /// Axes with the same extent on every axis.
    ///
    /// # Errors
    ///
    /// See [`CartesianAxes::new`].
    pub fn uniform(extent: f64) -> Result<Self> {
        Self::new(extent, extent, extent)
    }

    /// Per-axis extents.
    #[must_use]
    pub const fn extents(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// The three axis segments from `-D` to `+D`.
    #[must_use]
    pub fn segments(&self) -> [Segment; 3] {
        [
            Segment::new(Point::new(-self.x, 0.0, 0.0), Point::new(self.x, 0.0, 0.0)),
            Segment::new(Point::new(0.0, -self.y, 0.0), Point::new(0.0, self.y, 0.0)),
            Segment::new(Point::new(0.0, 0.0, -self.z), Point::new(0.0, 0.0, self.z)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn circle_scene(algorithm: Algorithm, cx: i64, cy: i64, r: i64) -> Scene {
        Scene::build(&SceneRequest::circle(algorithm, CircleInput::new(cx, cy, r).unwrap()))
            .unwrap()
    }

    #[test]
    fn test_algorithm_codes_case_insensitive() {
        assert_eq!("bia".parse::<Algorithm>().unwrap(), Algorithm::BasicIncrementalLine);
        assert_eq!(" Dda ".parse::<Algorithm>().unwrap(), Algorithm::DdaLine);
        assert_eq!("BA".parse::<Algorithm>().unwrap(), Algorithm::BresenhamLine);
        assert_eq!("mpc".parse::<Algorithm>().unwrap(), Algorithm::MidpointCircle);
        assert_eq!("bCa".parse::<Algorithm>().unwrap(), Algorithm::BresenhamCircle);
        assert!(matches!("xyz".parse::<Algorithm>(), Err(Error::InputParse(_))));
    }

    #[test]
    fn test_algorithm_display_roundtrips_code() {
        for a in Algorithm::ALL {
            assert_eq!(a.to_string().parse::<Algorithm>().unwrap(), a);
        }
    }

    #[test]
    fn test_line_scene_polyline() {
        let input = LineInput::new(0.0, 0.0, 5.0, 2.0).unwrap();
        let scene = Scene::build(&SceneRequest::line(Algorithm::BresenhamLine, input)).unwrap();
        assert_eq!(scene.pixel_count(), 6);
        assert_eq!(scene.segment_count(), 5);
        assert_eq!(scene.polyline()[0].origin, Point::xy(0.0, 0.0));
        assert_eq!(scene.polyline()[4].tip, Point::xy(5.0, 2.0));
    }

    #[test]
    fn test_basic_line_endpoint_policy() {
        let input = LineInput::new(0.0, 0.0, 4.0, 4.0).unwrap();
        let req = SceneRequest::line(Algorithm::BasicIncrementalLine, input);
        assert_eq!(Scene::build(&req).unwrap().pixel_count(), 4);
        let req = req.endpoint(Endpoint::Inclusive);
        assert_eq!(Scene::build(&req).unwrap().pixel_count(), 5);
    }

    #[test]
    fn test_basic_line_domain_error_surfaces() {
        let input = LineInput::new(3.0, 0.0, 3.0, 4.0).unwrap();
        let err = Scene::build(&SceneRequest::line(Algorithm::BasicIncrementalLine, input))
            .unwrap_err();
        assert!(matches!(err, Error::Domain(_)));
    }

    #[test]
    fn test_mismatched_primitive() {
        let circle = CircleInput::new(0, 0, 3).unwrap();
        let err = Scene::build(&SceneRequest::circle(Algorithm::DdaLine, circle)).unwrap_err();
        assert!(err.to_string().contains("line parameters"));
    }

    #[test]
    fn test_midpoint_scene_ring() {
        let scene = circle_scene(Algorithm::MidpointCircle, 0, 0, 2);
        assert_eq!(scene.pixel_count(), 12);
        assert_eq!(scene.segment_count(), 12);
        assert!(scene.polyline().iter().all(|s| s.length() <= 2f64.sqrt() + 1e-12));

        let pixels: HashSet<_> = scene.pixels().to_xy().into_iter().collect();
        assert_eq!(pixels.len(), scene.pixel_count());
        for p in [(2, 0), (0, 2), (-2, 0), (0, -2), (1, 2), (-1, -2), (2, -1), (-2, 1)] {
            assert!(pixels.contains(&p), "missing {p:?}");
        }
    }

    #[test]
    fn test_midpoint_scene_closed_ring() {
        let scene = circle_scene(Algorithm::MidpointCircle, 3, -4, 7);
        assert_eq!(scene.segment_count(), scene.pixel_count());
        assert!(scene.polyline().iter().all(|s| s.length() <= 2f64.sqrt() + 1e-12));
        let mut degree = std::collections::HashMap::new();
        for s in scene.polyline() {
            for p in [s.origin, s.tip] {
                *degree.entry((p.x as i64, p.y as i64)).or_insert(0) += 1;
            }
        }
        for p in scene.pixels().to_xy() {
            assert_eq!(degree.get(&p).copied(), Some(2), "{p:?} is not on the ring once");
        }
    }

    #[test]
    fn test_midpoint_scene_zero_radius() {
        let scene = circle_scene(Algorithm::MidpointCircle, 2, 2, 0);
        assert_eq!(scene.pixels().to_xy(), vec![(2, 2)]);
        assert_eq!(scene.segment_count(), 0);
    }

    #[test]
    fn test_bresenham_scene_closed_ring() {
        let scene = circle_scene(Algorithm::BresenhamCircle, 0, 0, 1);
        assert_eq!(scene.pixels().to_xy(), vec![(-1, 0), (0, -1), (1, 0), (0, 1)]);
        assert_eq!(scene.segment_count(), 4);
        let last = scene.polyline()[3];
        assert_eq!(last.origin, Point::xy(0.0, 1.0));
        assert_eq!(last.tip, Point::xy(-1.0, 0.0));
    }

    #[test]
    fn test_bresenham_scene_segments_are_short() {
        let scene = circle_scene(Algorithm::BresenhamCircle, 10, 10, 12);
        assert_eq!(scene.segment_count(), scene.pixel_count());
        for s in scene.polyline() {
            assert!(s.length() <= 2f64.sqrt() + 1e-12, "long segment {s:?}");
        }
    }

    #[test]
    fn test_bresenham_scene_single_point() {
        let scene = circle_scene(Algorithm::BresenhamCircle, 0, 0, 0);
        assert_eq!(scene.pixel_count(), 1);
        assert_eq!(scene.segment_count(), 0);
    }

    #[test]
    fn test_scene_bounds() {
        let scene = circle_scene(Algorithm::BresenhamCircle, 5, -5, 3);
        let b = scene.bounds().unwrap();
        assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (2.0, 8.0, -8.0, -2.0));
    }

    #[test]
    fn test_axes_threshold() {
        assert!(matches!(CartesianAxes::uniform(50.0), Err(Error::Domain(_))));
        assert!(CartesianAxes::uniform(51.0).is_ok());
        assert!(CartesianAxes::new(51.0, 99.9, 50.0).is_err());
        assert!(CartesianAxes::uniform(f64::NAN).is_err());
        assert!(CartesianAxes::uniform(f64::INFINITY).is_err());
        assert!(CartesianAxes::uniform(1e12).is_ok());
    }

    #[test]
    fn test_axes_segments() {
        let axes = CartesianAxes::new(51.0, 60.0, 70.0).unwrap();
        let [x, y, z] = axes.segments();
        assert_eq!(x.origin, Point::new(-51.0, 0.0, 0.0));
        assert_eq!(x.tip, Point::new(51.0, 0.0, 0.0));
        assert_eq!(y.tip, Point::new(0.0, 60.0, 0.0));
        assert_eq!(z.origin, Point::new(0.0, 0.0, -70.0));
    }
}
