//! Planar points used for vertex positions

use serde::{Serialize, Deserialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A point (or vector) in the plane
#[derive(Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point2 {
    /// The origin
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    /// Create a point from coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }

    /// Arithmetic midpoint of two points
    pub fn midpoint(self, other: Point2) -> Point2 {
        Point2::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Place local coordinates `self` into the plane: `anchor + x*d1 + y*d2`
    pub fn affine(self, anchor: Point2, d1: Point2, d2: Point2) -> Point2 {
        anchor + d1 * self.x + d2 * self.y
    }

    /// Euclidean norm
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Rescale to the given length, keeping direction
    ///
    /// A zero vector stays zero.
    pub fn with_length(self, length: f64) -> Point2 {
        let n = self.norm();
        if n == 0.0 {
            self
        } else {
            self * (length / n)
        }
    }

    /// Distance between two points
    pub fn distance(self, other: Point2) -> f64 {
        (self - other).norm()
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;

    fn mul(self, rhs: f64) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Point2::new(x, y)
    }
}

impl From<Point2> for [f64; 2] {
    fn from(p: Point2) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Debug for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        let m = Point2::new(-1.0, 0.0).midpoint(Point2::new(1.0, 2.0));
        assert_eq!(m, Point2::new(0.0, 1.0));
    }

    #[test]
    fn test_affine() {
        let local = Point2::new(2.0, -1.0);
        let placed = local.affine(
            Point2::new(1.0, 1.0),
            Point2::new(0.5, 0.0),
            Point2::new(0.0, 0.25),
        );
        assert_eq!(placed, Point2::new(2.0, 0.75));
    }

    #[test]
    fn test_with_length() {
        let v = Point2::new(3.0, 4.0).with_length(10.0);
        assert!((v.x - 6.0).abs() < 1e-12);
        assert!((v.y - 8.0).abs() < 1e-12);
        assert_eq!(Point2::ORIGIN.with_length(2.0), Point2::ORIGIN);
    }
}
