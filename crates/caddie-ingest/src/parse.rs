//! Launch-monitor CSV parsing.
//!
//! Required columns are `Club`, `Flat_Carry`, `Offline` and `Type`; header
//! matching ignores case and surrounding whitespace. Rows that cannot become
//! a [`ShotSample`] are skipped and reported, never fatal.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use caddie_core::enums::ShotType;
use caddie_core::shot::{LaunchMetrics, ShotSample};
use serde::Serialize;

use crate::error::IngestError;

pub const REQUIRED_COLUMNS: [&str; 4] = ["Club", "Flat_Carry", "Offline", "Type"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Negate `Offline` so right of the target line is negative.
    pub flip_offline_sign: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            flip_offline_sign: true,
        }
    }
}

/// A data row that was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based data row position (the header is not counted).
    pub row: usize,
    pub reason: String,
}

/// Result of parsing one CSV upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportBatch {
    pub session: String,
    pub shots: Vec<ShotSample>,
    pub skipped: Vec<SkippedRow>,
}

struct Columns {
    club: usize,
    carry: usize,
    offline: usize,
    shot_type: usize,
    shot_no: Option<usize>,
    ball_speed: Option<usize>,
    launch_angle: Option<usize>,
    height: Option<usize>,
    landing_angle: Option<usize>,
    hang_time: Option<usize>,
    curve: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, IngestError> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (normalize(h), i))
            .collect();
        let find = |name: &str| index.get(&normalize(name)).copied();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(c).is_none())
            .map(ToString::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns(missing));
        }

        let required = |name: &str| {
            find(name).ok_or_else(|| IngestError::MissingColumns(vec![name.to_string()]))
        };
        Ok(Self {
            club: required("Club")?,
            carry: required("Flat_Carry")?,
            offline: required("Offline")?,
            shot_type: required("Type")?,
            shot_no: find("Shot_No"),
            ball_speed: find("Ball_Speed"),
            launch_angle: find("Launch_Angle"),
            height: find("Height"),
            landing_angle: find("Landing_Angle"),
            hang_time: find("Hang_Time"),
            curve: find("Curve"),
        })
    }
}

fn normalize(header: &str) -> String {
    header.trim().to_ascii_lowercase()
}

fn field<'r>(record: &'r csv::StringRecord, column: usize) -> &'r str {
    record.get(column).map_or("", str::trim)
}

fn number(record: &csv::StringRecord, column: usize, name: &str) -> Result<f64, String> {
    let raw = field(record, column);
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("{name} is not a number: {raw:?}")),
    }
}

fn optional_number(record: &csv::StringRecord, column: Option<usize>) -> Option<f64> {
    column
        .map(|c| field(record, c))
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn shot_number(record: &csv::StringRecord, column: Option<usize>) -> Option<u32> {
    let raw = column.map(|c| field(record, c))?;
    raw.parse::<u32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| v as u32)
    })
}

fn shot_from_record(
    record: &csv::StringRecord,
    columns: &Columns,
    row: usize,
    session: &str,
    options: ParseOptions,
) -> Result<ShotSample, String> {
    let club = field(record, columns.club);
    if club.is_empty() {
        return Err("Club is empty".to_string());
    }
    let carry = number(record, columns.carry, "Flat_Carry")?;
    let offline = number(record, columns.offline, "Offline")?;
    let raw_type = field(record, columns.shot_type);
    let shot_type = ShotType::parse(raw_type)
        .ok_or_else(|| format!("Type must be Clean or Mishit, got {raw_type:?}"))?;

    let position = u32::try_from(row).unwrap_or(u32::MAX);

    Ok(ShotSample {
        club_id: club.to_string(),
        session_id: session.to_string(),
        shot_number: Some(shot_number(record, columns.shot_no).unwrap_or(position)),
        lateral_offset_yards: if options.flip_offline_sign { -offline } else { offline },
        carry_distance_yards: carry,
        shot_type,
        metrics: LaunchMetrics {
            ball_speed: optional_number(record, columns.ball_speed),
            launch_angle: optional_number(record, columns.launch_angle),
            height: optional_number(record, columns.height),
            landing_angle: optional_number(record, columns.landing_angle),
            hang_time: optional_number(record, columns.hang_time),
            curve: optional_number(record, columns.curve),
        },
    })
}

/// Parse CSV text from `reader`, tagging every shot with `session`.
pub fn parse_csv<R: Read>(
    reader: R,
    session: &str,
    options: ParseOptions,
) -> Result<ImportBatch, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let columns = Columns::resolve(rdr.headers()?)?;

    let mut shots = Vec::new();
    let mut skipped = Vec::new();
    let mut rows = 0usize;

    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows += 1;
        let row = i + 1;
        match shot_from_record(&record, &columns, row, session, options) {
            Ok(shot) => shots.push(shot),
            Err(reason) => {
                tracing::warn!(row, %reason, "skipping CSV row");
                skipped.push(SkippedRow { row, reason });
            }
        }
    }

    if rows == 0 {
        return Err(IngestError::Empty);
    }

    tracing::info!(
        session,
        parsed = shots.len(),
        skipped = skipped.len(),
        "parsed shot CSV"
    );

    Ok(ImportBatch {
        session: session.to_string(),
        shots,
        skipped,
    })
}

/// Parse a CSV file. The session defaults to the file stem.
pub fn read_csv_file(
    path: &Path,
    session: Option<&str>,
    options: ParseOptions,
) -> Result<ImportBatch, IngestError> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let session = session
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| default_session_name(path), ToString::to_string);
    parse_csv(file, &session, options)
}

fn default_session_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "Imported".to_string(), |s| s.to_string_lossy().into_owned())
}
