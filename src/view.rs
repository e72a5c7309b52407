// src/view.rs

//! The affine map from curve space to device pixels.

use crate::geometry::Point2D;
use log::debug;

/// Relative change in scale per scroll step.
pub const ZOOM_STEP: f64 = 0.08;

/// Lower bound for `scale`; repeated zoom-out stops here instead of reaching
/// zero.
pub const MIN_SCALE: f64 = 1e-6;

/// Upper bound for `scale`; repeated zoom-in stops here instead of
/// overflowing to infinity.
pub const MAX_SCALE: f64 = 1e6;

/// Origin offset plus uniform scale, with the y axis flipped so curve-space
/// "up" is screen-space "up".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Device position of the curve-space origin, in pixels.
    pub origin: Point2D,
    scale: f64,
}

impl ViewTransform {
    /// Returns `None` unless `scale` is finite and strictly positive.
    pub fn new(origin: Point2D, scale: f64) -> Option<Self> {
        if scale.is_finite() && scale > 0.0 {
            Some(Self { origin, scale })
        } else {
            None
        }
    }

    /// A view with the curve-space origin at the centre of a window.
    pub fn centered(width: u32, height: u32, scale: f64) -> Option<Self> {
        let origin = Point2D::new(f64::from(width / 2), f64::from(height / 2));
        Self::new(origin, scale)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// `(origin.x + scale * p.x, origin.y - scale * p.y)`.
    pub fn to_device(&self, p: Point2D) -> Point2D {
        Point2D::new(
            self.origin.x + self.scale * p.x,
            self.origin.y - self.scale * p.y,
        )
    }

    /// Moves the origin by a device-space delta; the delta is not scaled.
    pub fn pan(&mut self, delta: Point2D) {
        self.origin = self.origin + delta;
    }

    pub fn zoom_in(&mut self) {
        self.scale = (self.scale + self.scale * ZOOM_STEP).min(MAX_SCALE);
        debug!("View: zoom in, scale={}", self.scale);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale - self.scale * ZOOM_STEP).max(MIN_SCALE);
        debug!("View: zoom out, scale={}", self.scale);
    }
}
