//! Meter/yard conversion.
//!
//! Shot samples are stored in yards while geodesy and map resolution work in
//! meters. The newtypes keep the two from mixing silently.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Yards in one meter.
pub const YARDS_PER_METER: f64 = 1.093_613_3;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Meters(pub f64);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Yards(pub f64);

impl Meters {
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn to_yards(self) -> Yards {
        Yards(meters_to_yards(self.0))
    }
}

impl Yards {
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn to_meters(self) -> Meters {
        Meters(yards_to_meters(self.0))
    }
}

impl From<Meters> for Yards {
    fn from(m: Meters) -> Self {
        m.to_yards()
    }
}

impl From<Yards> for Meters {
    fn from(y: Yards) -> Self {
        y.to_meters()
    }
}

#[must_use]
pub fn meters_to_yards(meters: f64) -> f64 {
    meters * YARDS_PER_METER
}

#[must_use]
pub fn yards_to_meters(yards: f64) -> f64 {
    yards / YARDS_PER_METER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_meters_in_yards() {
        assert!((meters_to_yards(100.0) - 109.361_33).abs() < 1e-9);
    }

    #[test]
    fn newtypes_convert_both_ways() {
        let y: Yards = Meters(50.0).into();
        let back: Meters = y.into();
        assert!((back.value() - 50.0).abs() < 1e-12);
    }
}
