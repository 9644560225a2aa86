//! Recorded shots and the launch metrics that travel with them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ShotFilter, ShotType};
use crate::geometry::Point2;

/// One recorded shot.
///
/// `lateral_offset_yards` is already sign-normalized by ingestion: right of
/// the target line is negative. Nothing downstream flips it again.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ShotSample {
    pub club_id: String,
    pub session_id: String,
    pub shot_number: Option<u32>,
    pub lateral_offset_yards: f64,
    pub carry_distance_yards: f64,
    pub shot_type: ShotType,
    #[serde(default, skip_serializing_if = "LaunchMetrics::is_empty")]
    pub metrics: LaunchMetrics,
}

/// Extra launch-monitor columns. Kept with the shot, never used by the
/// dispersion statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LaunchMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ball_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landing_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hang_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<f64>,
}

impl LaunchMetrics {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ball_speed.is_none()
            && self.launch_angle.is_none()
            && self.height.is_none()
            && self.landing_angle.is_none()
            && self.hang_time.is_none()
            && self.curve.is_none()
    }
}

impl ShotSample {
    /// `(lateral offset, carry)` in yards.
    #[must_use]
    pub const fn point(&self) -> Point2 {
        Point2::new(self.lateral_offset_yards, self.carry_distance_yards)
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        matches!(self.shot_type, ShotType::Clean)
    }
}

/// Data-space points of the shots admitted by `filter`, in input order.
#[must_use]
pub fn sample_points(shots: &[ShotSample], filter: ShotFilter) -> Vec<Point2> {
    shots
        .iter()
        .filter(|shot| filter.admits(shot.shot_type))
        .map(ShotSample::point)
        .collect()
}

#[cfg(test)]
pub(crate) fn shot(club: &str, offset: f64, carry: f64, shot_type: ShotType) -> ShotSample {
    ShotSample {
        club_id: club.to_string(),
        session_id: "range".to_string(),
        shot_number: None,
        lateral_offset_yards: offset,
        carry_distance_yards: carry,
        shot_type,
        metrics: LaunchMetrics::default(),
    }
}
