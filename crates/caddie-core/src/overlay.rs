//! Physically scaled dispersion overlay for the satellite map.
//!
//! The overlay is pinned to the viewport center (the aim point) and sized
//! from the current ground resolution, so it always covers the same area on
//! the ground as the user zooms.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::contour::Contour;
use crate::ellipse::ClubDispersion;
use crate::enums::ConfidenceLevel;
use crate::errors::CoreError;
use crate::geo::GeoPoint;
use crate::geometry::Point2;
use crate::map_scale::MapProjection;
use crate::transform::AffineTransform;
use crate::units::meters_to_yards;

/// Camera state of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MapView {
    pub zoom: f64,
    pub center: GeoPoint,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl MapView {
    fn validate(&self) -> Result<(), CoreError> {
        if !self.zoom.is_finite() {
            return Err(CoreError::Validation(format!("zoom must be finite, got {}", self.zoom)));
        }
        if !(-90.0..=90.0).contains(&self.center.latitude) {
            return Err(CoreError::Validation(format!(
                "latitude must be within [-90, 90], got {}",
                self.center.latitude
            )));
        }
        if !self.center.longitude.is_finite() {
            return Err(CoreError::Validation(format!(
                "longitude must be finite, got {}",
                self.center.longitude
            )));
        }
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(CoreError::Validation(format!(
                "viewport must be positive, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn viewport_center(&self) -> Point2 {
        Point2::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }
}

/// One confidence ellipse in viewport pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OverlayLayer {
    pub confidence: ConfidenceLevel,
    pub semi_major_px: f64,
    pub semi_minor_px: f64,
    /// Clockwise screen rotation in degrees (screen y points down).
    pub rotation_deg: f64,
    pub contour: Vec<Point2>,
}

/// Footprint of the 95% region on the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Footprint {
    /// Full major-axis length in yards.
    pub length_yards: f64,
    /// Full minor-axis length in yards.
    pub width_yards: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MapOverlay {
    pub club_id: String,
    pub view: MapView,
    pub meters_per_pixel: f64,
    pub yards_per_pixel: f64,
    pub transform: AffineTransform,
    /// Inner ellipse first. Empty when the club has nothing to draw.
    pub layers: Vec<OverlayLayer>,
    pub footprint: Option<Footprint>,
}

impl MapOverlay {
    /// Size `dispersion` for `view`.
    ///
    /// Data yards become pixels through one transform: the ellipse center
    /// lands on the viewport center, one yard spans `1 / yards_per_pixel`
    /// pixels, and carry points up the screen.
    pub fn build(
        dispersion: &ClubDispersion,
        view: &MapView,
        projection: MapProjection,
        contour_points: usize,
    ) -> Result<Self, CoreError> {
        view.validate()?;

        let meters_per_pixel = projection.meters_per_pixel(view.zoom, view.center.latitude);
        let yards_per_pixel = meters_to_yards(meters_per_pixel);
        let px_per_yard = yards_per_pixel.recip();

        let reference = dispersion
            .ellipses()
            .next()
            .map_or_else(Point2::default, |e| e.center());
        let transform =
            AffineTransform::new(reference, px_per_yard, -px_per_yard, view.viewport_center())?;

        let layers = dispersion
            .ellipses()
            .map(|e| {
                Contour::new(e, contour_points).map(|c| OverlayLayer {
                    confidence: e.confidence,
                    semi_major_px: e.semi_major * px_per_yard,
                    semi_minor_px: e.semi_minor * px_per_yard,
                    rotation_deg: -e.rotation_degrees(),
                    contour: transform.apply_all(c.points()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let footprint = dispersion.p95.map(|e| Footprint {
            length_yards: 2.0 * e.semi_major,
            width_yards: 2.0 * e.semi_minor,
        });

        tracing::debug!(
            club = %dispersion.club_id,
            zoom = view.zoom,
            meters_per_pixel,
            layers = layers.len(),
            "sized map overlay"
        );

        Ok(Self {
            club_id: dispersion.club_id.clone(),
            view: *view,
            meters_per_pixel,
            yards_per_pixel,
            transform,
            layers,
            footprint,
        })
    }

    #[must_use]
    pub fn layer(&self, confidence: ConfidenceLevel) -> Option<&OverlayLayer> {
        self.layers.iter().find(|l| l.confidence == confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::DEFAULT_CONTOUR_POINTS;
    use crate::enums::{ShotFilter, ShotType};
    use crate::geometry::centroid;
    use crate::shot::{ShotSample, shot};

    fn seven_iron() -> Vec<ShotSample> {
        [(-2.0, 150.0), (2.0, 152.0), (0.0, 149.0), (-1.0, 151.0), (4.0, 153.0)]
            .iter()
            .map(|&(x, y)| shot("7-iron", x, y, ShotType::Clean))
            .collect()
    }

    fn view(zoom: f64) -> MapView {
        MapView {
            zoom,
            center: GeoPoint::new(37.5485, -121.9242),
            viewport_width: 390.0,
            viewport_height: 844.0,
        }
    }

    fn overlay(zoom: f64) -> MapOverlay {
        let d = ClubDispersion::analyze("7-iron", &seven_iron(), ShotFilter::CleanOnly);
        MapOverlay::build(&d, &view(zoom), MapProjection::default(), DEFAULT_CONTOUR_POINTS)
            .unwrap()
    }

    #[test]
    fn zooming_in_doubles_pixel_size() {
        let z17 = overlay(17.0);
        let z18 = overlay(18.0);
        let a17 = z17.layer(ConfidenceLevel::P95).unwrap().semi_major_px;
        let a18 = z18.layer(ConfidenceLevel::P95).unwrap().semi_major_px;
        assert!((a18 / a17 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn pixel_axes_match_ground_size() {
        let o = overlay(18.5);
        let layer = o.layer(ConfidenceLevel::P95).unwrap();
        let footprint = o.footprint.unwrap();
        let ground_yards = layer.semi_major_px * o.yards_per_pixel * 2.0;
        assert!((ground_yards - footprint.length_yards).abs() < 1e-9);
    }

    #[test]
    fn contour_is_centered_on_viewport() {
        let o = overlay(19.0);
        for layer in &o.layers {
            assert_eq!(layer.contour.len(), DEFAULT_CONTOUR_POINTS);
            let c = centroid(&layer.contour).unwrap();
            assert!(c.distance_to(o.view.viewport_center()) < 1e-6);
        }
    }

    #[test]
    fn screen_rotation_is_mirrored_for_downward_y() {
        let o = overlay(17.0);
        let d = ClubDispersion::analyze("7-iron", &seven_iron(), ShotFilter::CleanOnly);
        let e = d.p95.unwrap();
        let layer = o.layer(ConfidenceLevel::P95).unwrap();
        assert!((layer.rotation_deg + e.rotation.to_degrees()).abs() < 1e-12);
    }

    #[test]
    fn empty_club_has_no_layers() {
        let d = ClubDispersion::analyze("driver", &[], ShotFilter::CleanOnly);
        let o = MapOverlay::build(&d, &view(17.0), MapProjection::default(), 64).unwrap();
        assert!(o.layers.is_empty());
        assert_eq!(o.footprint, None);
    }

    #[test]
    fn invalid_view_is_rejected() {
        let d = ClubDispersion::analyze("7-iron", &seven_iron(), ShotFilter::CleanOnly);
        let mut v = view(17.0);
        v.viewport_width = 0.0;
        assert!(MapOverlay::build(&d, &v, MapProjection::default(), 64).is_err());
        let mut v = view(f64::NAN);
        v.viewport_width = 390.0;
        assert!(MapOverlay::build(&d, &v, MapProjection::default(), 64).is_err());

        for center in [
            GeoPoint::new(120.0, 0.0),
            GeoPoint::new(-90.5, 0.0),
            GeoPoint::new(f64::NAN, 0.0),
            GeoPoint::new(37.5, f64::INFINITY),
        ] {
            let v = MapView { center, ..view(17.0) };
            let err = MapOverlay::build(&d, &v, MapProjection::default(), 64).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "{center:?}: {err}");
        }
    }

    #[test]
    fn polar_view_keeps_axes_non_negative() {
        let d = ClubDispersion::analyze("7-iron", &seven_iron(), ShotFilter::CleanOnly);
        let v = MapView { center: GeoPoint::new(90.0, 0.0), ..view(17.0) };
        let o = MapOverlay::build(&d, &v, MapProjection::default(), 64).unwrap();
        for layer in &o.layers {
            assert!(layer.semi_major_px >= layer.semi_minor_px);
            assert!(layer.semi_minor_px >= 0.0);
        }
    }
}
