//! Ellipse boundary sampling.
//!
//! Both the chart and the map draw the same polyline, so boundary points are
//! produced in data space here and mapped to pixels by each frame's
//! transform.

use std::f64::consts::TAU;
use std::iter::FusedIterator;

use crate::ellipse::EllipseParameters;
use crate::errors::CoreError;
use crate::geometry::Point2;

pub const DEFAULT_CONTOUR_POINTS: usize = 64;
pub const MIN_CONTOUR_POINTS: usize = 8;

/// A closed boundary of `len()` points, evenly spaced in parametric angle.
///
/// `Contour` is `Copy`; every call to [`Contour::points`] restarts from
/// `theta = 0` and yields the same sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contour {
    center: Point2,
    semi_major: f64,
    semi_minor: f64,
    cos_r: f64,
    sin_r: f64,
    count: usize,
}

impl Contour {
    /// Sample `ellipse` with `count` points (at least [`MIN_CONTOUR_POINTS`]).
    pub fn new(ellipse: &EllipseParameters, count: usize) -> Result<Self, CoreError> {
        if count < MIN_CONTOUR_POINTS {
            return Err(CoreError::InvalidContourPoints {
                requested: count,
                min: MIN_CONTOUR_POINTS,
            });
        }
        let (sin_r, cos_r) = ellipse.rotation.sin_cos();
        Ok(Self {
            center: ellipse.center(),
            semi_major: ellipse.semi_major,
            semi_minor: ellipse.semi_minor,
            cos_r,
            sin_r,
            count,
        })
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Boundary point `index` (taken modulo `len()`).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn point(&self, index: usize) -> Point2 {
        let theta = TAU * (index % self.count) as f64 / self.count as f64;
        let (sin_t, cos_t) = theta.sin_cos();
        let ex = self.semi_major * cos_t;
        let ey = self.semi_minor * sin_t;
        Point2::new(
            self.center.x + ex * self.cos_r - ey * self.sin_r,
            self.center.y + ex * self.sin_r + ey * self.cos_r,
        )
    }

    #[must_use]
    pub const fn points(&self) -> ContourPoints {
        ContourPoints {
            contour: *self,
            front: 0,
            back: self.count,
        }
    }

    /// Collect the boundary, appending the first point again to close the
    /// ring for renderers that draw open polylines.
    #[must_use]
    pub fn closed_ring(&self) -> Vec<Point2> {
        let mut ring: Vec<Point2> = self.points().collect();
        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }
        ring
    }
}

impl IntoIterator for &Contour {
    type Item = Point2;
    type IntoIter = ContourPoints;

    fn into_iter(self) -> Self::IntoIter {
        self.points()
    }
}

/// Lazy iterator over a [`Contour`].
#[derive(Debug, Clone)]
pub struct ContourPoints {
    contour: Contour,
    front: usize,
    back: usize,
}

impl Iterator for ContourPoints {
    type Item = Point2;

    fn next(&mut self) -> Option<Point2> {
        if self.front >= self.back {
            return None;
        }
        let p = self.contour.point(self.front);
        self.front += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for ContourPoints {
    fn next_back(&mut self) -> Option<Point2> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.contour.point(self.back))
    }
}

impl ExactSizeIterator for ContourPoints {}

impl FusedIterator for ContourPoints {}

/// Boundary of `ellipse` with `count` points.
pub fn contour(ellipse: &EllipseParameters, count: usize) -> Result<Contour, CoreError> {
    Contour::new(ellipse, count)
}
