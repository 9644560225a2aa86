use std::path::PathBuf;

use caddie_core::enums::ConfidenceLevel;
use caddie_core::geo::GeoPoint;
use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Import a launch-monitor CSV into the shot library.
    Import(ImportArgs),
    /// List clubs in the library in bag order.
    Clubs,
    /// List imported sessions with shot counts.
    Sessions,
    /// Remove every shot and session from the library, or replace them with
    /// a baseline library.
    Reset(ResetArgs),
    /// Fit confidence ellipses for a club.
    Ellipse(EllipseArgs),
    /// Sample ellipse boundaries as closed polylines.
    Contour(ContourArgs),
    /// Lay out the dispersion chart for a club.
    Chart(ChartArgs),
    /// Carry and offline summary for a club.
    Stats(ClubArgs),
    /// Size the dispersion overlay for the satellite map.
    Overlay(OverlayArgs),
    /// Distance from a position fix to the aim point.
    Distance(DistanceArgs),
    /// Ground distance covered by one map pixel.
    Scale(ScaleArgs),
    /// Print the JSON schema of an output type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// CSV export to import.
    pub csv: PathBuf,

    /// Session name (defaults to the file name).
    #[arg(long)]
    pub session: Option<String>,

    /// Show what would change without saving.
    #[arg(long)]
    pub dry_run: bool,

    /// Keep the Offline column as exported instead of negating it.
    #[arg(long)]
    pub keep_offline_sign: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ClubArgs {
    /// Club label as it appears in the library.
    #[arg(short, long)]
    pub club: String,
}

/// Which confidence regions to report.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ConfidenceArg {
    #[value(name = "50")]
    P50,
    #[value(name = "95")]
    P95,
    #[default]
    Both,
}

impl ConfidenceArg {
    pub fn levels(self) -> &'static [ConfidenceLevel] {
        match self {
            Self::P50 => &[ConfidenceLevel::P50],
            Self::P95 => &[ConfidenceLevel::P95],
            Self::Both => &ConfidenceLevel::ALL,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct EllipseArgs {
    #[command(flatten)]
    pub club: ClubArgs,

    #[arg(long, value_enum, default_value_t)]
    pub confidence: ConfidenceArg,

    /// Fit mishits too (clean strikes only by default).
    #[arg(long)]
    pub all_shots: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ContourArgs {
    #[command(flatten)]
    pub ellipse: EllipseArgs,

    /// Boundary points per ellipse (defaults to chart.contour_points).
    #[arg(long)]
    pub points: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub club: ClubArgs,

    /// Plot and fit clean strikes only.
    #[arg(long)]
    pub clean_only: bool,

    /// Jitter seed (defaults to chart.jitter_seed).
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, Args)]
pub struct ResetArgs {
    /// Library JSON to restore instead of emptying the library.
    #[arg(long)]
    pub baseline: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct OverlayArgs {
    #[command(flatten)]
    pub club: ClubArgs,

    /// Map zoom. Without it the zoom follows the distance from --from, or
    /// map.default_zoom.
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Aim point latitude (defaults to map.default_latitude).
    #[arg(long, value_parser = parse_latitude, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Aim point longitude (defaults to map.default_longitude).
    #[arg(long, value_parser = parse_longitude, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Player position as LAT,LON, used to pick a zoom.
    #[arg(long, value_parser = parse_geo_point, allow_hyphen_values = true)]
    pub from: Option<GeoPoint>,

    #[arg(long, default_value_t = 390.0)]
    pub width: f64,

    #[arg(long, default_value_t = 844.0)]
    pub height: f64,

    /// Fit mishits too.
    #[arg(long)]
    pub all_shots: bool,
}

#[derive(Clone, Debug, Args)]
pub struct DistanceArgs {
    /// Position fix as LAT,LON. Omit when no fix is available.
    #[arg(long, value_parser = parse_geo_point, allow_hyphen_values = true)]
    pub from: Option<GeoPoint>,

    /// Aim point as LAT,LON.
    #[arg(long, value_parser = parse_geo_point, allow_hyphen_values = true)]
    pub to: GeoPoint,
}

#[derive(Clone, Debug, Args)]
pub struct ScaleArgs {
    #[arg(long)]
    pub zoom: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Renderer tile size in pixels.
    #[arg(long, default_value_t = caddie_core::map_scale::VECTOR_TILE_SIZE)]
    pub tile_size: u32,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name: chart, contour, ellipse, overlay, stats, distance, shot, scale
    pub type_name: String,
}

/// Parse `LAT,LON` in decimal degrees.
pub fn parse_geo_point(raw: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{raw}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(format!("coordinates out of range: {lat},{lon}"));
    }
    Ok(GeoPoint::new(lat, lon))
}

fn parse_bounded(raw: &str, what: &str, limit: f64) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid {what} '{}'", raw.trim()))?;
    if !(-limit..=limit).contains(&value) {
        return Err(format!("{what} must be within [-{limit}, {limit}], got {value}"));
    }
    Ok(value)
}

pub fn parse_latitude(raw: &str) -> Result<f64, String> {
    parse_bounded(raw, "latitude", 90.0)
}

pub fn parse_longitude(raw: &str) -> Result<f64, String> {
    parse_bounded(raw, "longitude", 180.0)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::Cli;

    #[test]
    fn geo_point_parses_signed_pairs() {
        let p = parse_geo_point("37.5485, -121.9242").expect("should parse");
        assert_eq!(p, GeoPoint::new(37.5485, -121.9242));
        assert!(parse_geo_point("37.5485").is_err());
        assert!(parse_geo_point("97,0").is_err());
        assert!(parse_geo_point("north,0").is_err());
    }

    #[test]
    fn confidence_accepts_percent_names() {
        let cli = Cli::try_parse_from(["caddie", "ellipse", "--club", "7-iron", "--confidence", "50"])
            .expect("cli should parse");
        let Commands::Ellipse(args) = cli.command else {
            panic!("expected ellipse");
        };
        assert_eq!(args.confidence.levels(), &[ConfidenceLevel::P50]);
        assert!(!args.all_shots);
    }

    #[test]
    fn distance_without_fix_parses() {
        let cli = Cli::try_parse_from(["caddie", "distance", "--to", "37.549,-121.924"])
            .expect("cli should parse");
        let Commands::Distance(args) = cli.command else {
            panic!("expected distance");
        };
        assert_eq!(args.from, None);
    }

    #[test]
    fn overlay_accepts_negative_longitude() {
        let cli = Cli::try_parse_from([
            "caddie", "overlay", "--club", "LW", "--lat", "36.56", "--lon", "-121.95",
        ])
        .expect("cli should parse");
        let Commands::Overlay(args) = cli.command else {
            panic!("expected overlay");
        };
        assert_eq!(args.lon, Some(-121.95));
        assert_eq!(args.zoom, None);
    }

    #[test]
    fn overlay_rejects_out_of_range_aim_point() {
        for (flag, value) in [("--lat", "120"), ("--lat", "-90.5"), ("--lon", "181"), ("--lat", "NaN")] {
            let parsed = Cli::try_parse_from(["caddie", "overlay", "--club", "LW", flag, value]);
            assert!(parsed.is_err(), "{flag} {value} should be rejected");
        }
    }
}
