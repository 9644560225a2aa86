//! The persisted shot library: every imported shot plus the session list.

use std::collections::{HashMap, HashSet};

use caddie_core::shot::ShotSample;
use serde::{Deserialize, Serialize};

use crate::clubs::sort_clubs;

/// What a merge will do (or did) to the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergePreview {
    pub session: String,
    pub new_count: usize,
    pub updated_count: usize,
    /// Whether the session is not yet in the library.
    pub new_session: bool,
}

/// Shots keyed by (session, club, shot number). Two rows with the same key
/// are the same shot re-uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ShotKey {
    session: String,
    club: String,
    shot_number: Option<u32>,
}

impl From<&ShotSample> for ShotKey {
    fn from(shot: &ShotSample) -> Self {
        Self {
            session: shot.session_id.clone(),
            club: shot.club_id.clone(),
            shot_number: shot.shot_number,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotLibrary {
    #[serde(default)]
    sessions: Vec<String>,
    #[serde(default)]
    shots: Vec<ShotSample>,
}

impl ShotLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shots(&self) -> &[ShotSample] {
        &self.shots
    }

    /// Sessions in import order.
    pub fn sessions(&self) -> &[String] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Count new and updated shots for `session` without touching the library.
    pub fn preview(&self, session: &str, rows: &[ShotSample]) -> MergePreview {
        let mut seen: HashSet<ShotKey> = self.shots.iter().map(ShotKey::from).collect();
        let mut preview = self.empty_preview(session);
        for row in rows {
            if seen.insert(ShotKey::from(row)) {
                preview.new_count += 1;
            } else {
                preview.updated_count += 1;
            }
        }
        preview
    }

    /// Merge `rows` into the library.
    ///
    /// A row replaces the existing shot with the same session, club and shot
    /// number; anything else is appended. Every row's session is registered.
    pub fn merge(&mut self, session: &str, rows: Vec<ShotSample>) -> MergePreview {
        let mut index: HashMap<ShotKey, usize> = self
            .shots
            .iter()
            .enumerate()
            .map(|(i, s)| (ShotKey::from(s), i))
            .collect();
        let mut preview = self.empty_preview(session);

        for row in rows {
            self.register_session(&row.session_id);
            let key = ShotKey::from(&row);
            if let Some(&i) = index.get(&key) {
                self.shots[i] = row;
                preview.updated_count += 1;
            } else {
                index.insert(key, self.shots.len());
                self.shots.push(row);
                preview.new_count += 1;
            }
        }
        self.register_session(session);

        tracing::info!(
            session,
            new = preview.new_count,
            updated = preview.updated_count,
            total = self.shots.len(),
            "merged shots into library"
        );
        preview
    }

    /// Drop every shot and session.
    pub fn reset(&mut self) {
        self.shots.clear();
        self.sessions.clear();
    }

    /// Replace the whole library with `baseline`, e.g. a known-good reference
    /// session kept next to the working library.
    pub fn reset_to(&mut self, baseline: Self) {
        tracing::info!(
            dropped = self.shots.len(),
            restored = baseline.shots.len(),
            "library reset to baseline"
        );
        *self = baseline;
    }

    /// Distinct clubs in bag order.
    pub fn clubs(&self) -> Vec<String> {
        let mut clubs: Vec<String> = self
            .shots
            .iter()
            .map(|s| s.club_id.as_str())
            .collect::<HashSet<_>>()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        sort_clubs(&mut clubs);
        clubs
    }

    /// All shots hit with `club`, in library order.
    pub fn shots_for(&self, club: &str) -> Vec<ShotSample> {
        self.shots
            .iter()
            .filter(|s| s.club_id == club)
            .cloned()
            .collect()
    }

    /// Shots grouped per club, clubs in bag order.
    pub fn by_club(&self) -> Vec<(String, Vec<ShotSample>)> {
        self.clubs()
            .into_iter()
            .map(|club| {
                let shots = self.shots_for(&club);
                (club, shots)
            })
            .collect()
    }

    /// Shot count per session, in import order.
    pub fn session_counts(&self) -> Vec<(String, usize)> {
        self.sessions
            .iter()
            .map(|session| {
                let n = self.shots.iter().filter(|s| &s.session_id == session).count();
                (session.clone(), n)
            })
            .collect()
    }

    fn empty_preview(&self, session: &str) -> MergePreview {
        MergePreview {
            session: session.to_string(),
            new_count: 0,
            updated_count: 0,
            new_session: !self.sessions.iter().any(|s| s == session),
        }
    }

    fn register_session(&mut self, session: &str) {
        if !self.sessions.iter().any(|s| s == session) {
            self.sessions.push(session.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caddie_core::enums::ShotType;
    use caddie_core::shot::LaunchMetrics;
    use pretty_assertions::assert_eq;

    fn shot(session: &str, club: &str, n: u32, carry: f64) -> ShotSample {
        ShotSample {
            club_id: club.into(),
            session_id: session.into(),
            shot_number: Some(n),
            lateral_offset_yards: 0.0,
            carry_distance_yards: carry,
            shot_type: ShotType::Clean,
            metrics: LaunchMetrics::default(),
        }
    }

    fn seeded() -> ShotLibrary {
        let mut lib = ShotLibrary::new();
        lib.merge(
            "Jan",
            vec![shot("Jan", "7-iron", 1, 150.0), shot("Jan", "7-iron", 2, 151.0)],
        );
        lib
    }

    #[test]
    fn reupload_replaces_matching_shots() {
        let mut lib = seeded();
        let rows = vec![shot("Jan", "7-iron", 2, 155.0), shot("Jan", "7-iron", 3, 149.0)];

        let preview = lib.preview("Jan", &rows);
        assert_eq!((preview.new_count, preview.updated_count), (1, 1));
        assert!(!preview.new_session);

        let merged = lib.merge("Jan", rows);
        assert_eq!(merged, preview);
        assert_eq!(lib.len(), 3);
        assert_eq!(lib.shots()[1].carry_distance_yards, 155.0);
        assert_eq!(lib.sessions(), ["Jan".to_string()]);
    }

    #[test]
    fn same_shot_number_in_another_session_is_new() {
        let mut lib = seeded();
        let preview = lib.merge("Feb", vec![shot("Feb", "7-iron", 1, 148.0)]);
        assert_eq!(preview.new_count, 1);
        assert!(preview.new_session);
        assert_eq!(lib.session_counts(), vec![("Jan".to_string(), 2), ("Feb".to_string(), 1)]);
    }

    #[test]
    fn duplicate_rows_in_one_upload_collapse() {
        let mut lib = ShotLibrary::new();
        let rows = vec![shot("Jan", "LW", 1, 88.0), shot("Jan", "LW", 1, 90.0)];
        let preview = lib.preview("Jan", &rows);
        let merged = lib.merge("Jan", rows);
        assert_eq!(preview, merged);
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.shots()[0].carry_distance_yards, 90.0);
    }

    #[test]
    fn clubs_and_groups_follow_bag_order() {
        let mut lib = ShotLibrary::new();
        lib.merge(
            "Jan",
            vec![
                shot("Jan", "LW", 1, 88.0),
                shot("Jan", "Driver", 2, 230.0),
                shot("Jan", "7-iron", 3, 150.0),
                shot("Jan", "LW", 4, 87.0),
            ],
        );
        assert_eq!(lib.clubs(), vec!["Driver", "7-iron", "LW"]);
        let groups = lib.by_club();
        assert_eq!(groups[2].0, "LW");
        assert_eq!(groups[2].1.len(), 2);
        assert_eq!(lib.shots_for("Driver").len(), 1);
        assert!(lib.shots_for("Putter").is_empty());
    }

    #[test]
    fn reset_empties_everything() {
        let mut lib = seeded();
        lib.reset();
        assert!(lib.is_empty());
        assert!(lib.sessions().is_empty());
        assert!(lib.clubs().is_empty());
    }

    #[test]
    fn reset_to_restores_baseline_sessions() {
        let mut baseline = ShotLibrary::new();
        baseline.merge("Baseline", vec![shot("Baseline", "7-iron", 1, 150.0)]);

        let mut lib = seeded();
        lib.reset_to(baseline.clone());
        assert_eq!(lib, baseline);
        assert_eq!(lib.sessions(), ["Baseline".to_string()]);
        assert_eq!(lib.shots_for("7-iron").len(), 1);
    }
}
