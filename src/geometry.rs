// src/geometry.rs

//! Plane points and the component-wise arithmetic used by numerical
//! differentiation.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// A point (or vector) in the plane.
///
/// Used both for curve-space values produced by evaluating a curve and for
/// device-space (pixel) positions after the view transform.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both components are finite (neither NaN nor infinite).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;

    fn mul(self, rhs: f64) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point2D {
    type Output = Point2D;

    fn div(self, rhs: f64) -> Point2D {
        Point2D::new(self.x / rhs, self.y / rhs)
    }
}

/// Values that can be differenced and divided by a scalar, component-wise.
///
/// This is all the derivative engine needs from the codomain of `f`, so it
/// works the same for scalar functions, plane curves and `real^n` curves.
pub trait Coordinate: Copy {
    /// `self - other`, component-wise.
    fn difference(self, other: Self) -> Self;

    /// `self / divisor`, component-wise.
    fn divide(self, divisor: f64) -> Self;
}

impl Coordinate for f64 {
    fn difference(self, other: Self) -> Self {
        self - other
    }

    fn divide(self, divisor: f64) -> Self {
        self / divisor
    }
}

impl Coordinate for Point2D {
    fn difference(self, other: Self) -> Self {
        self - other
    }

    fn divide(self, divisor: f64) -> Self {
        self / divisor
    }
}

impl<const N: usize> Coordinate for [f64; N] {
    fn difference(mut self, other: Self) -> Self {
        for (lhs, rhs) in self.iter_mut().zip(other) {
            *lhs -= rhs;
        }
        self
    }

    fn divide(mut self, divisor: f64) -> Self {
        for component in self.iter_mut() {
            *component /= divisor;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic_is_component_wise() {
        let a = Point2D::new(1.5, -2.0);
        let b = Point2D::new(0.5, 4.0);
        assert_eq!(a + b, Point2D::new(2.0, 2.0));
        assert_eq!(a - b, Point2D::new(1.0, -6.0));
        assert_eq!(a * 2.0, Point2D::new(3.0, -4.0));
        assert_eq!(b / 0.5, Point2D::new(1.0, 8.0));
    }

    #[test]
    fn array_coordinates_difference_and_divide_each_component() {
        let a = [3.0, 5.0, -1.0];
        let b = [1.0, 1.0, 1.0];
        assert_eq!(a.difference(b), [2.0, 4.0, -2.0]);
        assert_eq!(a.divide(2.0), [1.5, 2.5, -0.5]);
    }

    #[test]
    fn non_finite_points_are_detected() {
        assert!(Point2D::new(0.0, 1.0).is_finite());
        assert!(!Point2D::new(f64::NAN, 1.0).is_finite());
        assert!(!Point2D::new(0.0, f64::INFINITY).is_finite());
    }
}
