// src/curve.rs

//! The `Curve` capability and the stock example curves.

use crate::derivative;
use crate::error::{CurveError, DerivativeError};
use crate::geometry::Point2D;

/// A parametric plane curve `f: s -> (x, y)`.
///
/// The animator only ever sees a curve through this trait, so tests can
/// substitute analytic functions without any rendering dependency.
pub trait Curve {
    /// Evaluates the curve at parameter `s`.
    fn evaluate(&self, s: f64) -> Result<Point2D, CurveError>;

    /// Derivative of the given order at `s` (order 0 is the curve itself),
    /// computed from point evaluations only.
    fn derivative(&self, s: f64, ds: f64, order: i32) -> Result<Point2D, DerivativeError> {
        derivative::derivative(|t| self.evaluate(t), s, ds, order)
    }
}

impl<C: Curve + ?Sized> Curve for &C {
    fn evaluate(&self, s: f64) -> Result<Point2D, CurveError> {
        (**self).evaluate(s)
    }
}

impl<C: Curve + ?Sized> Curve for Box<C> {
    fn evaluate(&self, s: f64) -> Result<Point2D, CurveError> {
        (**self).evaluate(s)
    }
}

/// The curve point and its first two derivatives at one parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    pub s: f64,
    pub position: Point2D,
    pub velocity: Point2D,
    pub acceleration: Point2D,
}

/// Adapts an infallible closure `s -> (x, y)`.
///
/// Plain closures cannot raise, so a NaN or infinite component (the result of
/// dividing by zero or leaving the domain of `sqrt`, `ln`, ...) is reported as
/// `CurveError::NonFinite`.
pub struct FnCurve<F> {
    f: F,
}

impl<F> FnCurve<F>
where
    F: Fn(f64) -> (f64, f64),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Curve for FnCurve<F>
where
    F: Fn(f64) -> (f64, f64),
{
    fn evaluate(&self, s: f64) -> Result<Point2D, CurveError> {
        let point = Point2D::from((self.f)(s));
        if point.is_finite() {
            Ok(point)
        } else {
            Err(CurveError::NonFinite {
                x: point.x,
                y: point.y,
            })
        }
    }
}

/// Adapts a closure that reports its own evaluation errors.
pub struct FallibleCurve<F> {
    f: F,
}

impl<F> FallibleCurve<F>
where
    F: Fn(f64) -> Result<Point2D, CurveError>,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Curve for FallibleCurve<F>
where
    F: Fn(f64) -> Result<Point2D, CurveError>,
{
    fn evaluate(&self, s: f64) -> Result<Point2D, CurveError> {
        (self.f)(s)
    }
}

/// Curves shipped with the binary and selectable by name on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleCurve {
    Circle,
    Astroid,
    Lemniscate,
}

impl ExampleCurve {
    pub const ALL: [ExampleCurve; 3] = [
        ExampleCurve::Circle,
        ExampleCurve::Astroid,
        ExampleCurve::Lemniscate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExampleCurve::Circle => "circle",
            ExampleCurve::Astroid => "astroid",
            ExampleCurve::Lemniscate => "lemniscate",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.name().eq_ignore_ascii_case(name))
    }
}

impl Curve for ExampleCurve {
    fn evaluate(&self, s: f64) -> Result<Point2D, CurveError> {
        let (sin, cos) = s.sin_cos();
        let point = match self {
            ExampleCurve::Circle => Point2D::new(cos, sin),
            ExampleCurve::Astroid => Point2D::new(cos.powi(3), sin.powi(3)),
            ExampleCurve::Lemniscate => {
                // Bernoulli's lemniscate; 1 + sin^2 >= 1 so the division is safe.
                let denom = 1.0 + sin * sin;
                Point2D::new(cos / denom, sin * cos / denom)
            }
        };
        Ok(point)
    }
}
