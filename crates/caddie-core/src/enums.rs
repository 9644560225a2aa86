//! Shot classification, confidence levels and sample filters.
//!
//! Enums serialize as `snake_case` except [`ShotType`], which keeps the
//! `Clean`/`Mishit` spelling used by simulator exports.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ShotType
// ---------------------------------------------------------------------------

/// Strike quality reported by the launch monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ShotType {
    Clean,
    Mishit,
}

impl ShotType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "Clean",
            Self::Mishit => "Mishit",
        }
    }

    /// Parse the export spelling, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("clean") {
            Some(Self::Clean)
        } else if trimmed.eq_ignore_ascii_case("mishit") {
            Some(Self::Mishit)
        } else {
            None
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConfidenceLevel
// ---------------------------------------------------------------------------

/// Chi-squared critical value (2 degrees of freedom) for 50% probability mass.
pub const CHI2_2DOF_50: f64 = 1.3863;

/// Chi-squared critical value (2 degrees of freedom) for 95% probability mass.
pub const CHI2_2DOF_95: f64 = 5.9915;

/// Probability mass enclosed by a confidence ellipse.
///
/// Lateral offset and carry are treated as jointly bivariate-normal, so the
/// squared Mahalanobis radius of the boundary is a chi-squared quantile with
/// two degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ConfidenceLevel {
    #[serde(rename = "p50")]
    P50,
    #[serde(rename = "p95")]
    P95,
}

impl ConfidenceLevel {
    /// Both levels, inner ellipse first.
    pub const ALL: [Self; 2] = [Self::P50, Self::P95];

    /// Chi-squared quantile used to scale covariance eigenvalues.
    #[must_use]
    pub const fn quantile(self) -> f64 {
        match self {
            Self::P50 => CHI2_2DOF_50,
            Self::P95 => CHI2_2DOF_95,
        }
    }

    #[must_use]
    pub const fn percent(self) -> u8 {
        match self {
            Self::P50 => 50,
            Self::P95 => 95,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P50 => "p50",
            Self::P95 => "p95",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

// ---------------------------------------------------------------------------
// ShotFilter
// ---------------------------------------------------------------------------

/// Which shots feed a fit. The caller decides; the engine never filters on
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShotFilter {
    #[default]
    CleanOnly,
    All,
}

impl ShotFilter {
    #[must_use]
    pub const fn admits(self, shot_type: ShotType) -> bool {
        match self {
            Self::All => true,
            Self::CleanOnly => matches!(shot_type, ShotType::Clean),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CleanOnly => "clean_only",
            Self::All => "all",
        }
    }
}

impl fmt::Display for ShotFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shot_type_parses_case_insensitively() {
        assert_eq!(ShotType::parse(" clean "), Some(ShotType::Clean));
        assert_eq!(ShotType::parse("MISHIT"), Some(ShotType::Mishit));
        assert_eq!(ShotType::parse("topped"), None);
    }

    #[test]
    fn wider_confidence_has_larger_quantile() {
        assert!(ConfidenceLevel::P95.quantile() > ConfidenceLevel::P50.quantile());
        assert_eq!(ConfidenceLevel::P50.to_string(), "50%");
    }

    #[test]
    fn clean_only_filter_rejects_mishits() {
        assert!(ShotFilter::CleanOnly.admits(ShotType::Clean));
        assert!(!ShotFilter::CleanOnly.admits(ShotType::Mishit));
        assert!(ShotFilter::All.admits(ShotType::Mishit));
    }

    #[test]
    fn confidence_serializes_with_short_names() {
        let json = serde_json::to_string(&ConfidenceLevel::P95).unwrap();
        assert_eq!(json, "\"p95\"");
    }
}
