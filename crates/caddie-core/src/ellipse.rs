//! Confidence ellipses from the sample covariance of a club's shots.
//!
//! The fit assumes lateral offset and carry are jointly bivariate-normal. The
//! covariance eigenvalues give the variance along the principal axes; scaling
//! them by a chi-squared quantile (2 dof) turns them into squared semi-axes
//! enclosing the requested probability mass.
//!
//! ```
//! use caddie_core::ellipse::fit_ellipse;
//! use caddie_core::enums::ConfidenceLevel;
//! use caddie_core::geometry::Point2;
//!
//! let shots = [(-2.0, 150.0), (2.0, 152.0), (0.0, 149.0), (-1.0, 151.0)].map(Point2::from);
//! let e = fit_ellipse(&shots, ConfidenceLevel::P95).expect("non-degenerate");
//! assert!(e.semi_major >= e.semi_minor);
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ConfidenceLevel, ShotFilter};
use crate::geometry::Point2;
use crate::shot::{ShotSample, sample_points};

/// Fitted ellipse in data units (yards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EllipseParameters {
    pub center_x: f64,
    pub center_y: f64,
    /// Always `>= semi_minor`.
    pub semi_major: f64,
    /// Always `>= 0`.
    pub semi_minor: f64,
    /// Tilt of the major axis from the lateral axis, radians.
    pub rotation: f64,
    pub confidence: ConfidenceLevel,
}

impl EllipseParameters {
    #[must_use]
    pub const fn center(&self) -> Point2 {
        Point2::new(self.center_x, self.center_y)
    }

    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation.to_degrees()
    }
}

/// Unbiased 2x2 sample covariance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Covariance2 {
    pub xx: f64,
    pub xy: f64,
    pub yy: f64,
}

/// Eigen-decomposition of a [`Covariance2`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalAxes {
    /// Larger eigenvalue.
    pub major_variance: f64,
    /// Smaller eigenvalue, clamped to `>= 0`.
    pub minor_variance: f64,
    /// Angle of the major eigenvector from the x axis, radians.
    pub angle: f64,
}

impl Covariance2 {
    /// Mean and covariance (n-1 divisor). `None` below two samples.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_points(points: &[Point2]) -> Option<(Point2, Self)> {
        let n = points.len();
        if n < 2 {
            return None;
        }
        let nf = n as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        let mean = Point2::new(sx / nf, sy / nf);

        let (mut xx, mut xy, mut yy) = (0.0, 0.0, 0.0);
        for p in points {
            let dx = p.x - mean.x;
            let dy = p.y - mean.y;
            xx += dx * dx;
            xy += dx * dy;
            yy += dy * dy;
        }
        let d = nf - 1.0;
        Some((
            mean,
            Self {
                xx: xx / d,
                xy: xy / d,
                yy: yy / d,
            },
        ))
    }

    /// Closed-form eigen-decomposition of the symmetric matrix.
    #[must_use]
    pub fn principal_axes(self) -> PrincipalAxes {
        let half_trace = (self.xx + self.yy) / 2.0;
        let det = self.xx.mul_add(self.yy, -(self.xy * self.xy));
        let disc = half_trace.mul_add(half_trace, -det).max(0.0).sqrt();

        let major_variance = (half_trace + disc).max(0.0);
        let minor_variance = (half_trace - disc).max(0.0);

        // Eigenvector for the major eigenvalue: (l1 - yy, xy). With no
        // correlation the matrix is already diagonal.
        let angle = if self.xy == 0.0 {
            if self.xx >= self.yy {
                0.0
            } else {
                std::f64::consts::FRAC_PI_2
            }
        } else {
            self.xy.atan2(major_variance - self.yy)
        };

        PrincipalAxes {
            major_variance,
            minor_variance,
            angle,
        }
    }
}

/// Fit a confidence ellipse to `points`.
///
/// Returns `None` for fewer than two points or when every point coincides;
/// both are "nothing to draw", not failures.
#[must_use]
pub fn fit_ellipse(points: &[Point2], confidence: ConfidenceLevel) -> Option<EllipseParameters> {
    let first = *points.first()?;
    if points.iter().all(|p| *p == first) {
        tracing::debug!(samples = points.len(), "all samples coincide; no ellipse");
        return None;
    }

    let (mean, cov) = Covariance2::from_points(points)?;
    let axes = cov.principal_axes();
    if axes.major_variance == 0.0 && axes.minor_variance == 0.0 {
        tracing::debug!(samples = points.len(), "zero sample variance; no ellipse");
        return None;
    }

    let q = confidence.quantile();
    Some(EllipseParameters {
        center_x: mean.x,
        center_y: mean.y,
        semi_major: (axes.major_variance * q).sqrt(),
        semi_minor: (axes.minor_variance * q).sqrt(),
        rotation: axes.angle,
        confidence,
    })
}

/// The 50% and 95% ellipses for one club, as handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClubDispersion {
    pub club_id: String,
    pub filter: ShotFilter,
    pub sample_count: usize,
    pub p50: Option<EllipseParameters>,
    pub p95: Option<EllipseParameters>,
}

impl ClubDispersion {
    /// Fit both confidence levels to the shots admitted by `filter`.
    #[must_use]
    pub fn analyze(club_id: &str, shots: &[ShotSample], filter: ShotFilter) -> Self {
        let points = sample_points(shots, filter);
        Self {
            club_id: club_id.to_string(),
            filter,
            sample_count: points.len(),
            p50: fit_ellipse(&points, ConfidenceLevel::P50),
            p95: fit_ellipse(&points, ConfidenceLevel::P95),
        }
    }

    #[must_use]
    pub const fn get(&self, confidence: ConfidenceLevel) -> Option<&EllipseParameters> {
        match confidence {
            ConfidenceLevel::P50 => self.p50.as_ref(),
            ConfidenceLevel::P95 => self.p95.as_ref(),
        }
    }

    /// Available ellipses, inner first.
    pub fn ellipses(&self) -> impl Iterator<Item = &EllipseParameters> {
        self.p50.iter().chain(self.p95.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ShotType;
    use crate::shot::shot;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point2> {
        raw.iter().copied().map(Point2::from).collect()
    }

    fn scenario() -> Vec<Point2> {
        pts(&[(-2.0, 150.0), (2.0, 152.0), (0.0, 149.0), (-1.0, 151.0)])
    }

    #[test]
    fn fewer_than_two_samples_has_no_ellipse() {
        assert_eq!(fit_ellipse(&[], ConfidenceLevel::P95), None);
        assert_eq!(fit_ellipse(&pts(&[(1.0, 150.0)]), ConfidenceLevel::P95), None);
    }

    #[test]
    fn identical_points_have_no_ellipse() {
        let same = pts(&[(0.1, 150.3); 7]);
        assert_eq!(fit_ellipse(&same, ConfidenceLevel::P50), None);
        assert_eq!(fit_ellipse(&same, ConfidenceLevel::P95), None);
    }

    #[test]
    fn scenario_center_and_axis_order() {
        let e = fit_ellipse(&scenario(), ConfidenceLevel::P95).unwrap();
        assert!((e.center_x - -0.25).abs() < 1e-12);
        assert!((e.center_y - 150.5).abs() < 1e-12);
        assert!(e.semi_major > e.semi_minor);
        assert!(e.semi_minor > 0.0);
        assert!(e.semi_major.is_finite() && e.rotation.is_finite());
    }

    #[test]
    fn scenario_covariance_matches_hand_computation() {
        // dx = -1.75, 2.25, 0.25, -0.75 ; dy = -0.5, 1.5, -1.5, 0.5
        let (_, cov) = Covariance2::from_points(&scenario()).unwrap();
        assert!((cov.xx - 8.75 / 3.0).abs() < 1e-12);
        assert!((cov.xy - 3.5 / 3.0).abs() < 1e-12);
        assert!((cov.yy - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn wider_confidence_scales_axes_by_quantile_ratio() {
        let inner = fit_ellipse(&scenario(), ConfidenceLevel::P50).unwrap();
        let outer = fit_ellipse(&scenario(), ConfidenceLevel::P95).unwrap();
        let ratio = (ConfidenceLevel::P95.quantile() / ConfidenceLevel::P50.quantile()).sqrt();

        assert!(outer.semi_major > inner.semi_major);
        assert!(outer.semi_minor > inner.semi_minor);
        assert!((outer.semi_major / inner.semi_major - ratio).abs() < 1e-12);
        assert!((outer.semi_minor / inner.semi_minor - ratio).abs() < 1e-12);
        assert!((ratio - 2.078).abs() < 2e-3);
        assert_eq!(inner.center(), outer.center());
        assert_eq!(inner.rotation, outer.rotation);
    }

    #[test]
    fn collinear_samples_give_flat_ellipse() {
        let line = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let e = fit_ellipse(&line, ConfidenceLevel::P95).unwrap();
        assert!(e.semi_minor < 1e-6 * e.semi_major);
        assert!((e.rotation - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn uncorrelated_axes_pick_the_wider_spread() {
        let carry_heavy = pts(&[(0.0, 140.0), (1.0, 160.0), (0.0, 160.0), (1.0, 140.0)]);
        let e = fit_ellipse(&carry_heavy, ConfidenceLevel::P50).unwrap();
        assert!((e.rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let lateral_heavy = pts(&[(-10.0, 150.0), (10.0, 151.0), (-10.0, 151.0), (10.0, 150.0)]);
        let e = fit_ellipse(&lateral_heavy, ConfidenceLevel::P50).unwrap();
        assert_eq!(e.rotation, 0.0);
    }

    #[test]
    fn axis_order_holds_on_assorted_clouds() {
        let clouds = [
            pts(&[(5.0, 1.0), (-3.0, 2.0), (0.5, -4.0)]),
            pts(&[(0.0, 0.0), (0.0, 3.0)]),
            pts(&[(-7.0, 210.0), (4.0, 221.0), (12.0, 219.5), (-1.0, 214.0), (3.3, 216.2)]),
        ];
        for cloud in &clouds {
            let e = fit_ellipse(cloud, ConfidenceLevel::P95).unwrap();
            assert!(e.semi_major >= e.semi_minor && e.semi_minor >= 0.0, "{e:?}");
        }
    }

    #[test]
    fn fit_does_not_depend_on_call_count() {
        let points = scenario();
        let before = points.clone();
        let a = fit_ellipse(&points, ConfidenceLevel::P95);
        let b = fit_ellipse(&points, ConfidenceLevel::P95);
        assert_eq!(a, b);
        assert_eq!(points, before);
    }

    #[test]
    fn club_dispersion_respects_filter() {
        let shots = vec![
            shot("7-iron", -2.0, 150.0, ShotType::Clean),
            shot("7-iron", 2.0, 152.0, ShotType::Clean),
            shot("7-iron", 25.0, 110.0, ShotType::Mishit),
        ];
        let clean = ClubDispersion::analyze("7-iron", &shots, ShotFilter::CleanOnly);
        let all = ClubDispersion::analyze("7-iron", &shots, ShotFilter::All);

        assert_eq!(clean.sample_count, 2);
        assert_eq!(all.sample_count, 3);
        assert!(all.p95.unwrap().semi_major > clean.p95.unwrap().semi_major);
        assert_eq!(clean.ellipses().count(), 2);
        assert_eq!(clean.get(ConfidenceLevel::P50), clean.p50.as_ref());
    }
}
