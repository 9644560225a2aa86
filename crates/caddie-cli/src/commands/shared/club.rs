use anyhow::bail;
use caddie_core::shot::ShotSample;
use caddie_ingest::ShotLibrary;

/// Shots for `club`, matching the label case-insensitively when there is no
/// exact match. Returns the label as stored in the library.
pub fn club_shots(library: &ShotLibrary, club: &str) -> anyhow::Result<(String, Vec<ShotSample>)> {
    let exact = library.shots_for(club);
    if !exact.is_empty() {
        return Ok((club.to_string(), exact));
    }

    let clubs = library.clubs();
    if let Some(name) = clubs.iter().find(|c| c.eq_ignore_ascii_case(club.trim())) {
        return Ok((name.clone(), library.shots_for(name)));
    }

    if clubs.is_empty() {
        bail!("the shot library is empty. Run 'caddie import <csv>' first.");
    }
    bail!("no shots for club '{club}'. Known clubs: {}", clubs.join(", "))
}
