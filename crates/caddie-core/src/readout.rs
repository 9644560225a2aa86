//! Live "distance to target" readout.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::units::meters_to_yards;

/// Distance from the player's fix to the aim point, or an explicit
/// `Unavailable` when the location collaborator has no fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetDistance {
    Available { meters: f64, yards: f64 },
    Unavailable,
}

impl TargetDistance {
    #[must_use]
    pub fn between(fix: Option<GeoPoint>, target: GeoPoint) -> Self {
        fix.map_or(Self::Unavailable, |position| {
            let meters = position.distance_to(target).value();
            Self::Available {
                meters,
                yards: meters_to_yards(meters),
            }
        })
    }

    #[must_use]
    pub const fn yards(self) -> Option<f64> {
        match self {
            Self::Available { yards, .. } => Some(yards),
            Self::Unavailable => None,
        }
    }

    /// Whole yards as shown on the HUD.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded_yards(self) -> Option<i64> {
        self.yards().map(|y| y.round() as i64)
    }

    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available { .. })
    }
}
