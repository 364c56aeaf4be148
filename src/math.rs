//! Three-component vector arithmetic and affine matrix construction.
//!
//! All functions are pure. Fallible operations ([`divide`], [`normalize`],
//! [`angle_between`]) report degenerate input instead of producing
//! infinities or NaN.

use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{Error, Result};

/// A 3-component vector (or point) with double-precision components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a vector on the z = 0 plane.
    #[must_use]
    pub const fn xy(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Components as an array.
    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        sum(self, rhs)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        sub(self, rhs)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        scale(self, k)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Componentwise `a + b`.
#[must_use]
pub fn sum(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x + b.x, a.y + b.y, a.z + b.z)
}

/// Componentwise `a - b`.
#[must_use]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x - b.x, a.y - b.y, a.z - b.z)
}

/// Multiply every component by `k`.
#[must_use]
pub fn scale(a: Vec3, k: f64) -> Vec3 {
    Vec3::new(a.x * k, a.y * k, a.z * k)
}

/// Divide every component by `k`.
///
/// # Errors
///
/// Returns [`Error::DivisionByZero`] when `k == 0`.
pub fn divide(a: Vec3, k: f64) -> Result<Vec3> {
    if k == 0.0 {
        return Err(Error::DivisionByZero);
    }
    Ok(Vec3::new(a.x / k, a.y / k, a.z / k))
}

/// Dot product.
#[must_use]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Right-handed cross product.
#[must_use]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

/// Euclidean length.
#[must_use]
pub fn length(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Vec3, b: Vec3) -> f64 {
    length(sub(a, b))
}

/// Unit vector in the direction of `a`.
///
/// # Errors
///
/// Returns [`Error::ZeroVector`] when `a` has zero length.
pub fn normalize(a: Vec3) -> Result<Vec3> {
    let len = length(a);
    if len == 0.0 {
        return Err(Error::ZeroVector);
    }
    divide(a, len)
}

/// Angle between two vectors in radians, in `[0, π]`.
///
/// The cosine is clamped to `[-1, 1]` before `acos`.
///
/// # Errors
///
/// Returns [`Error::ZeroVector`] when either operand has zero length.
pub fn angle_between(a: Vec3, b: Vec3) -> Result<f64> {
    let len_a = length(a);
    let len_b = length(b);
    if len_a == 0.0 || len_b == 0.0 {
        return Err(Error::ZeroVector);
    }
    let cos_theta = (dot(a, b) / (len_a * len_b)).clamp(-1.0, 1.0);
    Ok(cos_theta.acos())
}

/// A 4×4 matrix stored column-major, `cols[c][r]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    cols: [[f64; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Element at `(row, col)`.
    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> f64 {
        self.cols[col][row]
    }

    /// Column `col` as `[r0, r1, r2, r3]`.
    #[must_use]
    pub const fn column(&self, col: usize) -> [f64; 4] {
        self.cols[col]
    }

    /// Apply the matrix to a point (w = 1) and drop the homogeneous coordinate.
    #[must_use]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let v = [p.x, p.y, p.z, 1.0];
        let row = |r: usize| (0..4).map(|c| self.cols[c][r] * v[c]).sum::<f64>();
        Vec3::new(row(0), row(1), row(2))
    }
}

/// Affine translation matrix: identity with its fourth column set to `(tx, ty, tz, 1)`.
#[must_use]
pub fn translate(t: Vec3) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.cols[3] = [t.x, t.y, t.z, 1.0];
    m
}
