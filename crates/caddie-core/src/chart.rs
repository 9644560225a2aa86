//! Scatter chart frame: bounds, gridline ticks and render-space geometry.
//!
//! The frame is fitted around the visible shots and their 95% boundary,
//! padded by 35% on each side of the mean so the ellipse never touches the
//! plot edge. One [`AffineTransform`] is derived from the bounds and every
//! element in the [`ChartScene`] goes through it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::contour::{Contour, DEFAULT_CONTOUR_POINTS};
use crate::ellipse::{ClubDispersion, EllipseParameters};
use crate::enums::{ConfidenceLevel, ShotFilter, ShotType};
use crate::errors::CoreError;
use crate::geometry::{Point2, centroid};
use crate::jitter::{
    CARRY_SPREAD_YARDS, DEFAULT_JITTER_SEED, DeterministicJitter, LATERAL_SPREAD_YARDS,
};
use crate::shot::ShotSample;
use crate::transform::AffineTransform;

/// Extent multiplier applied to the farthest element from the mean.
pub const BOUNDS_MARGIN: f64 = 1.35;

/// Half-width used when nothing spreads laterally.
pub const FALLBACK_HALF_X: f64 = 40.0;

/// Half-height used when nothing spreads in carry.
pub const FALLBACK_HALF_Y: f64 = 20.0;

/// Target number of gridline intervals per axis.
pub const TICK_DIVISIONS: u32 = 6;

const EMPTY_SCALE: f64 = 10.0;
const EMPTY_X_MIN: f64 = -40.0;
const EMPTY_Y_MAX: f64 = 200.0;
const EMPTY_MEAN: Point2 = Point2::new(0.0, 160.0);
const MAX_TICKS: usize = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Pixel size of the chart and its axis gutters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 680.0,
            height: 520.0,
            padding: Padding {
                top: 40.0,
                right: 40.0,
                bottom: 60.0,
                left: 70.0,
            },
        }
    }
}

impl ChartLayout {
    #[must_use]
    pub fn plot_width(&self) -> f64 {
        self.width - self.padding.left - self.padding.right
    }

    #[must_use]
    pub fn plot_height(&self) -> f64 {
        self.height - self.padding.top - self.padding.bottom
    }

    fn validate(&self) -> Result<(), CoreError> {
        let (w, h) = (self.plot_width(), self.plot_height());
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(CoreError::Validation(format!(
                "chart plot area must be positive, got {w}x{h}"
            )));
        }
        Ok(())
    }
}

/// Data-space window shown by the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Bounds, ticks and the shared transform for one chart render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartFrame {
    pub layout: ChartLayout,
    pub bounds: ChartBounds,
    /// Mean of the visible points.
    pub mean: Point2,
    pub transform: AffineTransform,
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
}

impl ChartFrame {
    /// Fit a frame around `points` and, when present, the boundary of the
    /// outermost ellipse.
    pub fn fit(
        layout: ChartLayout,
        points: &[Point2],
        outer: Option<&EllipseParameters>,
    ) -> Result<Self, CoreError> {
        layout.validate()?;
        let (plot_w, plot_h) = (layout.plot_width(), layout.plot_height());

        let Some(mean) = centroid(points) else {
            let bounds = ChartBounds {
                x_min: EMPTY_X_MIN,
                x_max: EMPTY_X_MIN + plot_w / EMPTY_SCALE,
                y_min: EMPTY_Y_MAX - plot_h / EMPTY_SCALE,
                y_max: EMPTY_Y_MAX,
            };
            return Ok(Self {
                layout,
                bounds,
                mean: EMPTY_MEAN,
                transform: frame_transform(&layout, &bounds, EMPTY_SCALE, EMPTY_SCALE)?,
                x_ticks: Vec::new(),
                y_ticks: Vec::new(),
            });
        };

        let boundary: Vec<Point2> = match outer {
            Some(e) => Contour::new(e, DEFAULT_CONTOUR_POINTS)?.points().collect(),
            None => Vec::new(),
        };
        let extent = points.iter().chain(boundary.iter());
        let (max_dx, max_dy) = extent.fold((0.0_f64, 0.0_f64), |(mx, my), p| {
            (mx.max((p.x - mean.x).abs()), my.max((p.y - mean.y).abs()))
        });

        let half_x = nonzero_or(max_dx * BOUNDS_MARGIN, FALLBACK_HALF_X);
        let half_y = nonzero_or(max_dy * BOUNDS_MARGIN, FALLBACK_HALF_Y);
        let bounds = ChartBounds {
            x_min: mean.x - half_x,
            x_max: mean.x + half_x,
            y_min: mean.y - half_y,
            y_max: mean.y + half_y,
        };

        let scale_x = plot_w / (bounds.x_max - bounds.x_min);
        let scale_y = plot_h / (bounds.y_max - bounds.y_min);

        Ok(Self {
            layout,
            bounds,
            mean,
            transform: frame_transform(&layout, &bounds, scale_x, scale_y)?,
            x_ticks: ticks(bounds.x_min, bounds.x_max),
            y_ticks: ticks(bounds.y_min, bounds.y_max),
        })
    }

    /// Vertical gridlines, one per x tick, spanning the plot area.
    #[must_use]
    pub fn vertical_gridlines(&self) -> Vec<Gridline> {
        self.x_ticks.iter().map(|&v| self.vertical_line(v)).collect()
    }

    /// Horizontal gridlines, one per y tick, spanning the plot area.
    #[must_use]
    pub fn horizontal_gridlines(&self) -> Vec<Gridline> {
        self.y_ticks
            .iter()
            .map(|&v| self.horizontal_line(v))
            .collect()
    }

    #[must_use]
    pub fn vertical_line(&self, x: f64) -> Gridline {
        let p = &self.layout.padding;
        let sx = self.transform.apply_x(x);
        Gridline {
            value: x,
            from: Point2::new(sx, p.top),
            to: Point2::new(sx, p.top + self.layout.plot_height()),
        }
    }

    #[must_use]
    pub fn horizontal_line(&self, y: f64) -> Gridline {
        let p = &self.layout.padding;
        let sy = self.transform.apply_y(y);
        Gridline {
            value: y,
            from: Point2::new(p.left, sy),
            to: Point2::new(p.left + self.layout.plot_width(), sy),
        }
    }
}

fn frame_transform(
    layout: &ChartLayout,
    bounds: &ChartBounds,
    scale_x: f64,
    scale_y: f64,
) -> Result<AffineTransform, CoreError> {
    // Screen y grows downward, carry grows upward.
    AffineTransform::new(
        Point2::new(bounds.x_min, bounds.y_max),
        scale_x,
        -scale_y,
        Point2::new(layout.padding.left, layout.padding.top),
    )
}

fn nonzero_or(value: f64, fallback: f64) -> f64 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Gridline spacing of 1, 2, 5 or 10 times a power of ten giving roughly
/// `divisions` intervals over `range`.
#[must_use]
pub fn nice_step(range: f64, divisions: u32) -> f64 {
    let raw = range / f64::from(divisions);
    let magnitude = 10f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let unit = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    };
    unit * magnitude
}

/// Tick values from the first multiple of the step at or above `min` through
/// `max`, rounded to four decimals.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ticks(min: f64, max: f64) -> Vec<f64> {
    let step = nice_step(max - min, TICK_DIVISIONS);
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let start = (min / step).ceil() * step;
    (0..MAX_TICKS)
        .map(|i| (i as f64).mul_add(step, start))
        .take_while(|v| *v <= max)
        .map(|v| (v * 1e4).round() / 1e4)
        .collect()
}

/// Straight segment in render space tagged with the data value it marks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Gridline {
    pub value: f64,
    pub from: Point2,
    pub to: Point2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScatterMarker {
    /// Recorded position (yards), before jitter.
    pub data: Point2,
    /// Jittered position in pixels.
    pub render: Point2,
    pub shot_type: ShotType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RenderedContour {
    pub confidence: ConfidenceLevel,
    pub ellipse: EllipseParameters,
    pub points: Vec<Point2>,
}

/// Knobs for [`ChartScene::build`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SceneOptions {
    pub filter: ShotFilter,
    pub jitter_seed: u64,
    pub contour_points: usize,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            filter: ShotFilter::All,
            jitter_seed: DEFAULT_JITTER_SEED,
            contour_points: DEFAULT_CONTOUR_POINTS,
        }
    }
}

/// Everything a chart renderer draws for one club, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartScene {
    pub club_id: String,
    pub frame: ChartFrame,
    pub dispersion: ClubDispersion,
    pub markers: Vec<ScatterMarker>,
    /// Inner ellipse first.
    pub contours: Vec<RenderedContour>,
    pub vertical_gridlines: Vec<Gridline>,
    pub horizontal_gridlines: Vec<Gridline>,
    /// Zero lateral offset.
    pub target_line: Gridline,
    pub mean_carry_line: Gridline,
}

impl ChartScene {
    /// Lay out the chart for `shots` of one club.
    ///
    /// The ellipses are fitted to the shots admitted by `options.filter`, the
    /// same set that is plotted. Jitter only moves markers.
    pub fn build(
        club_id: &str,
        shots: &[ShotSample],
        layout: ChartLayout,
        options: SceneOptions,
    ) -> Result<Self, CoreError> {
        let visible: Vec<&ShotSample> = shots
            .iter()
            .filter(|s| options.filter.admits(s.shot_type))
            .collect();
        let points: Vec<Point2> = visible.iter().map(|s| s.point()).collect();

        let dispersion = ClubDispersion::analyze(club_id, shots, options.filter);
        let frame = ChartFrame::fit(layout, &points, dispersion.p95.as_ref())?;
        let t = frame.transform;

        let contours = dispersion
            .ellipses()
            .map(|e| {
                Contour::new(e, options.contour_points).map(|c| RenderedContour {
                    confidence: e.confidence,
                    ellipse: *e,
                    points: t.apply_all(c.points()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let spread = Point2::new(LATERAL_SPREAD_YARDS, CARRY_SPREAD_YARDS);
        let mut jitter = DeterministicJitter::new(options.jitter_seed);
        let markers = visible
            .iter()
            .map(|shot| {
                let data = shot.point();
                ScatterMarker {
                    data,
                    render: t.apply(jitter.nudge(data, spread)),
                    shot_type: shot.shot_type,
                }
            })
            .collect();

        tracing::debug!(
            club = club_id,
            visible = points.len(),
            ellipses = contours.len(),
            "built chart scene"
        );

        Ok(Self {
            club_id: club_id.to_string(),
            vertical_gridlines: frame.vertical_gridlines(),
            horizontal_gridlines: frame.horizontal_gridlines(),
            target_line: frame.vertical_line(0.0),
            mean_carry_line: frame.horizontal_line(frame.mean.y),
            frame,
            dispersion,
            markers,
            contours,
        })
    }
}
