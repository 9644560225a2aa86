//! Per-club summary shown next to the chart.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::shot::ShotSample;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShotStats {
    pub total: usize,
    pub clean: usize,
    pub mishits: usize,
    /// Share of clean strikes, 0-100. Zero when there are no shots.
    pub clean_pct: f64,
    pub mishit_pct: f64,
    pub clean_mean_carry: Option<f64>,
    pub clean_carry_std: Option<f64>,
    pub clean_mean_offline: Option<f64>,
    pub clean_offline_std: Option<f64>,
    pub mishit_mean_carry: Option<f64>,
    /// Clean mean carry minus mishit mean carry.
    pub mishit_carry_loss: Option<f64>,
}

impl ShotStats {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_shots(shots: &[ShotSample]) -> Self {
        let (clean, mishit): (Vec<&ShotSample>, Vec<&ShotSample>) =
            shots.iter().partition(|s| s.is_clean());

        let carry = |s: &&ShotSample| s.carry_distance_yards;
        let offline = |s: &&ShotSample| s.lateral_offset_yards;

        let clean_carry: Vec<f64> = clean.iter().map(carry).collect();
        let clean_offline: Vec<f64> = clean.iter().map(offline).collect();
        let mishit_carry: Vec<f64> = mishit.iter().map(carry).collect();

        let total = shots.len();
        let pct = |n: usize| {
            if total == 0 {
                0.0
            } else {
                n as f64 / total as f64 * 100.0
            }
        };

        let clean_mean_carry = mean(&clean_carry);
        let mishit_mean_carry = mean(&mishit_carry);

        Self {
            total,
            clean: clean.len(),
            mishits: mishit.len(),
            clean_pct: pct(clean.len()),
            mishit_pct: pct(mishit.len()),
            clean_mean_carry,
            clean_carry_std: sample_std(&clean_carry),
            clean_mean_offline: mean(&clean_offline),
            clean_offline_std: sample_std(&clean_offline),
            mishit_mean_carry,
            mishit_carry_loss: clean_mean_carry.zip(mishit_mean_carry).map(|(c, m)| c - m),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with the n-1 divisor. `None` below two values.
#[allow(clippy::cast_precision_loss)]
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::enums::ShotType;
    use crate::shot::shot;

    #[test]
    fn empty_club_has_no_statistics() {
        let stats = ShotStats::from_shots(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.clean_pct, 0.0);
        assert_eq!(stats.clean_mean_carry, None);
        assert_eq!(stats.mishit_carry_loss, None);
    }

    #[test]
    fn summary_splits_clean_and_mishit() {
        let shots = vec![
            shot("7-iron", -2.0, 150.0, ShotType::Clean),
            shot("7-iron", 2.0, 152.0, ShotType::Clean),
            shot("7-iron", 0.0, 149.0, ShotType::Clean),
            shot("7-iron", 8.0, 131.0, ShotType::Mishit),
        ];
        let stats = ShotStats::from_shots(&shots);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.clean, 3);
        assert_eq!(stats.mishits, 1);
        assert!((stats.clean_pct - 75.0).abs() < 1e-12);
        assert!((stats.clean_mean_carry.unwrap() - 451.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.clean_mean_offline, Some(0.0));
        assert!((stats.clean_offline_std.unwrap() - 2.0).abs() < 1e-12);
        assert!((stats.clean_carry_std.unwrap() - (7.0_f64 / 3.0).sqrt()).abs() < 1e-9);
        assert_eq!(stats.mishit_mean_carry, Some(131.0));
        assert!((stats.mishit_carry_loss.unwrap() - (451.0 / 3.0 - 131.0)).abs() < 1e-9);
    }

    #[test]
    fn single_clean_shot_has_mean_but_no_spread() {
        let stats = ShotStats::from_shots(&[shot("LW", 0.5, 88.8, ShotType::Clean)]);
        assert_eq!(stats.clean_mean_carry, Some(88.8));
        assert_eq!(stats.clean_carry_std, None);
    }
}
