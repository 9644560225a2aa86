//! Data-space to render-space mapping.
//!
//! `render = (data - reference) * scale + origin`, per axis. A frame builds
//! one [`AffineTransform`] and maps every element through it: scatter
//! markers, contour points and gridlines alike. Recomputing or rounding the
//! scale per element breaks registration between a point cloud and its
//! ellipse.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::geometry::Point2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AffineTransform {
    /// Data-space point that lands on `origin`.
    pub reference: Point2,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Render-space position of `reference`.
    pub origin: Point2,
}

impl AffineTransform {
    /// Scales must be finite and non-zero so the map stays invertible.
    pub fn new(
        reference: Point2,
        scale_x: f64,
        scale_y: f64,
        origin: Point2,
    ) -> Result<Self, CoreError> {
        let valid = |s: f64| s.is_finite() && s != 0.0;
        if !valid(scale_x) || !valid(scale_y) {
            return Err(CoreError::InvalidTransform { scale_x, scale_y });
        }
        Ok(Self {
            reference,
            scale_x,
            scale_y,
            origin,
        })
    }

    #[must_use]
    pub fn apply(&self, data: Point2) -> Point2 {
        Point2::new(
            (data.x - self.reference.x).mul_add(self.scale_x, self.origin.x),
            (data.y - self.reference.y).mul_add(self.scale_y, self.origin.y),
        )
    }

    #[must_use]
    pub fn invert(&self, render: Point2) -> Point2 {
        Point2::new(
            (render.x - self.origin.x) / self.scale_x + self.reference.x,
            (render.y - self.origin.y) / self.scale_y + self.reference.y,
        )
    }

    /// Render-space x of a vertical gridline at data `x`.
    #[must_use]
    pub fn apply_x(&self, x: f64) -> f64 {
        (x - self.reference.x).mul_add(self.scale_x, self.origin.x)
    }

    /// Render-space y of a horizontal gridline at data `y`.
    #[must_use]
    pub fn apply_y(&self, y: f64) -> f64 {
        (y - self.reference.y).mul_add(self.scale_y, self.origin.y)
    }

    pub fn apply_all<I>(&self, points: I) -> Vec<Point2>
    where
        I: IntoIterator<Item = Point2>,
    {
        points.into_iter().map(|p| self.apply(p)).collect()
    }
}
