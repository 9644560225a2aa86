//! Great-circle distance on a spherical Earth.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::units::Meters;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Latitude/longitude in degrees, WGS-84.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> Meters {
        Meters(haversine_meters(self, other))
    }
}

/// Haversine distance in meters. No ellipsoidal correction; the error is
/// negligible at golf-course distances.
#[must_use]
pub fn haversine_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let dphi = (b.latitude - a.latitude).to_radians();
    let dlambda = (b.longitude - a.longitude).to_radians();

    // Rounding can push `h` just past 1 near the antipode.
    let h = ((dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEBBLE: GeoPoint = GeoPoint::new(37.5485, -121.9242);

    #[test]
    fn distance_to_self_is_zero() {
        for p in [PEBBLE, GeoPoint::new(0.0, 0.0), GeoPoint::new(-89.9, 179.9)] {
            assert_eq!(haversine_meters(p, p), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let other = GeoPoint::new(37.5490, -121.9230);
        assert!((haversine_meters(PEBBLE, other) - haversine_meters(other, PEBBLE)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = haversine_meters(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert!((d - 111_194.93).abs() < 1.0, "got {d}");
    }

    #[test]
    fn antipodal_points_stay_finite() {
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_M;
        for i in 0..2_000_u32 {
            let lat = f64::from(i % 181) - 90.0 + f64::from(i) * 1e-4;
            let lon = f64::from(i % 360) - 180.0 + f64::from(i) * 3e-4;
            let a = GeoPoint::new(lat.clamp(-90.0, 90.0), lon);
            let b = GeoPoint::new(-a.latitude, lon + 180.0);
            let d = haversine_meters(a, b);
            assert!(d.is_finite(), "NaN for {a:?} -> {b:?}");
            assert!((d - half_circumference).abs() < 1.0, "got {d} for {a:?}");
        }
    }

    #[test]
    fn short_north_step_matches_arc_length() {
        // 0.0005 degrees of latitude is ~55.6 m.
        let north = GeoPoint::new(PEBBLE.latitude + 0.0005, PEBBLE.longitude);
        let d = PEBBLE.distance_to(north).value();
        assert!((d - 55.597).abs() < 0.01, "got {d}");
    }
}
