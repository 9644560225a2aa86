//! Error types for invalid arguments passed to the engine.
//!
//! Degenerate statistical input is not an error: too few samples or a
//! single-point cluster yields `None` from the ellipse fit. The variants here
//! cover arguments that no caller should ever construct.

use thiserror::Error;

/// Errors returned by `caddie-core` constructors and frame builders.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A contour was requested with too few boundary points.
    #[error("Contour needs at least {min} points, got {requested}")]
    InvalidContourPoints { requested: usize, min: usize },

    /// A transform scale is zero or not finite, so it cannot be inverted.
    #[error("Invalid transform scale ({scale_x}, {scale_y}): both axes must be finite and non-zero")]
    InvalidTransform { scale_x: f64, scale_y: f64 },

    /// A value failed validation (non-finite zoom, empty viewport, ...).
    #[error("Validation error: {0}")]
    Validation(String),
}
