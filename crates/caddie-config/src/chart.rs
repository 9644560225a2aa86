//! Dispersion chart configuration.

use caddie_core::chart::{ChartLayout, Padding, SceneOptions};
use caddie_core::contour::{DEFAULT_CONTOUR_POINTS, MIN_CONTOUR_POINTS};
use caddie_core::enums::ShotFilter;
use caddie_core::jitter::DEFAULT_JITTER_SEED;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_width() -> f64 {
    ChartLayout::default().width
}

fn default_height() -> f64 {
    ChartLayout::default().height
}

fn default_padding() -> Padding {
    ChartLayout::default().padding
}

const fn default_jitter_seed() -> u64 {
    DEFAULT_JITTER_SEED
}

const fn default_contour_points() -> usize {
    DEFAULT_CONTOUR_POINTS
}

const fn default_include_mishits() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: f64,

    #[serde(default = "default_height")]
    pub height: f64,

    #[serde(default = "default_padding")]
    pub padding: Padding,

    #[serde(default = "default_jitter_seed")]
    pub jitter_seed: u64,

    /// Boundary points per ellipse.
    #[serde(default = "default_contour_points")]
    pub contour_points: usize,

    /// Plot mishits alongside clean strikes.
    #[serde(default = "default_include_mishits")]
    pub include_mishits: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            padding: default_padding(),
            jitter_seed: default_jitter_seed(),
            contour_points: default_contour_points(),
            include_mishits: default_include_mishits(),
        }
    }
}

impl ChartConfig {
    pub const fn layout(&self) -> ChartLayout {
        ChartLayout {
            width: self.width,
            height: self.height,
            padding: self.padding,
        }
    }

    pub const fn filter(&self) -> ShotFilter {
        if self.include_mishits {
            ShotFilter::All
        } else {
            ShotFilter::CleanOnly
        }
    }

    pub const fn scene_options(&self) -> SceneOptions {
        SceneOptions {
            filter: self.filter(),
            jitter_seed: self.jitter_seed,
            contour_points: self.contour_points,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.contour_points < MIN_CONTOUR_POINTS {
            return Err(ConfigError::invalid(
                "chart.contour_points",
                format!("{} is below the minimum of {MIN_CONTOUR_POINTS}", self.contour_points),
            ));
        }
        let layout = self.layout();
        let (w, h) = (layout.plot_width(), layout.plot_height());
        if !(w > 0.0 && h > 0.0) {
            return Err(ConfigError::invalid(
                "chart.padding",
                format!("plot area {w}x{h} leaves no room to draw"),
            ));
        }
        Ok(())
    }
}
