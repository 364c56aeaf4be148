//! World-to-pixel mapping for the software render host.
//!
//! A [`Viewport`] is an orthographic projection built from two
//! [`LinearScale`]s sharing one pixels-per-unit factor, so circles stay round
//! whatever the surface aspect ratio. World y points up; pixel y points down.

use crate::error::{Error, Result};
use crate::geometry::{Bounds, Point};

/// Maps domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Domain extent.
    fn domain(&self) -> (D, D);

    /// Range extent.
    fn range(&self) -> (R, R);
}

/// Linear continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] if the domain is empty or not finite.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        let width = domain.1 - domain.0;
        if !width.is_finite() || width.abs() < f64::EPSILON {
            return Err(Error::domain(format!(
                "scale domain [{}, {}] is empty",
                domain.0, domain.1
            )));
        }
        Ok(Self { domain_min: domain.0, domain_max: domain.1, range_min: range.0, range_max: range.1 })
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Orthographic projection from world units to a `width` x `height` surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    x: LinearScale,
    y: LinearScale,
    pixels_per_unit: f64,
}

impl Viewport {
    /// Fit `bounds`, grown by `padding` world units on every side, inside the
    /// surface. The tighter axis decides the scale; the other axis is centred.
    ///
    /// Degenerate bounds (a single point or a horizontal line) are widened to
    /// one world unit so the scale stays finite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a zero-sized surface and
    /// [`Error::Domain`] for non-finite bounds or negative padding.
    pub fn fit(bounds: Bounds, width: u32, height: u32, padding: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        if !(padding >= 0.0) {
            return Err(Error::domain(format!("viewport padding must be >= 0, got {padding}")));
        }

        let b = bounds.padded(padding);
        let center = b.center();
        let (w, h) = (f64::from(width), f64::from(height));
        let span_x = b.width().max(1.0);
        let span_y = b.height().max(1.0);
        let pixels_per_unit = (w / span_x).min(h / span_y);
        if !(pixels_per_unit.is_finite() && pixels_per_unit > 0.0) {
            return Err(Error::domain("viewport bounds are not finite"));
        }

        let half_x = w / pixels_per_unit / 2.0;
        let half_y = h / pixels_per_unit / 2.0;
        let x = LinearScale::new((center.x - half_x, center.x + half_x), (0.0, w))?;
        let y = LinearScale::new((center.y - half_y, center.y + half_y), (h, 0.0))?;
        Ok(Self { x, y, pixels_per_unit })
    }

    /// Pixel column and row containing the projection of `p`.
    #[must_use]
    pub fn project(&self, p: Point) -> (i64, i64) {
        (self.x.scale(p.x).floor() as i64, self.y.scale(p.y).floor() as i64)
    }

    /// World point at the centre of pixel `(px, py)`.
    #[must_use]
    pub fn unproject(&self, px: i64, py: i64) -> Point {
        Point::xy(self.x.invert(px as f64 + 0.5), self.y.invert(py as f64 + 0.5))
    }

    /// Pixels per world unit.
    #[must_use]
    pub const fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }

    /// Visible world region.
    #[must_use]
    pub fn visible(&self) -> Bounds {
        let (x0, x1) = self.x.domain();
        let (y0, y1) = self.y.domain();
        Bounds { min_x: x0, min_y: y0, max_x: x1, max_y: y1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Bounds {
        Bounds { min_x, min_y, max_x, max_y }
    }

    #[test]
    fn test_linear_scale() {
        let s = LinearScale::new((0.0, 10.0), (0.0, 100.0)).unwrap();
        assert_relative_eq!(s.scale(5.0), 50.0);
        assert_relative_eq!(s.invert(25.0), 2.5);
        assert_eq!(s.domain(), (0.0, 10.0));
        assert!(LinearScale::new((1.0, 1.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_fit_uniform_scale() {
        // 20 x 10 world units on a 400 x 400 surface: x is the tight axis.
        let vp = Viewport::fit(bounds(-10.0, -5.0, 10.0, 5.0), 400, 400, 0.0).unwrap();
        assert_relative_eq!(vp.pixels_per_unit(), 20.0);
        let visible = vp.visible();
        assert_relative_eq!(visible.min_x, -10.0);
        assert_relative_eq!(visible.min_y, -10.0);
    }

    #[test]
    fn test_project_flips_y() {
        let vp = Viewport::fit(bounds(0.0, 0.0, 10.0, 10.0), 100, 100, 0.0).unwrap();
        assert_eq!(vp.project(Point::xy(0.0, 0.0)), (0, 100));
        assert_eq!(vp.project(Point::xy(0.5, 9.5)), (5, 5));
        assert_eq!(vp.project(Point::xy(10.0, 10.0)), (100, 0));
    }

    #[test]
    fn test_unproject_inverts_project() {
        let vp = Viewport::fit(bounds(-3.0, -3.0, 3.0, 3.0), 640, 480, 2.0).unwrap();
        for (px, py) in [(0, 0), (320, 240), (639, 479)] {
            assert_eq!(vp.project(vp.unproject(px, py)), (px, py));
        }
    }

    #[test]
    fn test_fit_single_point() {
        let vp = Viewport::fit(bounds(4.0, 4.0, 4.0, 4.0), 100, 50, 0.0).unwrap();
        assert_eq!(vp.project(Point::xy(4.0, 4.0)), (50, 25));
    }

    #[test]
    fn test_fit_errors() {
        let b = bounds(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(Viewport::fit(b, 0, 10, 0.0), Err(Error::InvalidDimensions { .. })));
        assert!(matches!(Viewport::fit(b, 10, 10, -1.0), Err(Error::Domain(_))));
        assert!(Viewport::fit(bounds(0.0, 0.0, f64::INFINITY, 1.0), 10, 10, 0.0).is_err());
    }
}
