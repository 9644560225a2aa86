//! Canonical bag order for club names.
//!
//! Launch monitors export free-form club labels ("Driver", "5-Wood",
//! "10-Iron (PW)", "LW"). Lists are shown longest club first: driver, woods,
//! hybrids, irons, wedges, then anything unrecognized alphabetically.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Family {
    Driver,
    Wood,
    Hybrid,
    Iron,
    Wedge,
    Other,
}

/// Sort key for a club label. Lower sorts first.
fn rank(club: &str) -> (Family, u32) {
    let name = club.trim().to_ascii_lowercase();
    let number = leading_number(&name);

    if name == "dr" || name.contains("driver") {
        return (Family::Driver, 0);
    }
    if name.contains("wood") || is_numbered(&name, 'w') {
        return (Family::Wood, number.unwrap_or(0));
    }
    if name.contains("hybrid") || is_numbered(&name, 'h') {
        return (Family::Hybrid, number.unwrap_or(0));
    }
    if name.contains("iron") || is_numbered(&name, 'i') {
        return (Family::Iron, number.unwrap_or(0));
    }
    if let Some(loft) = wedge_slot(&name) {
        return (Family::Wedge, loft);
    }
    (Family::Other, 0)
}

fn wedge_slot(name: &str) -> Option<u32> {
    let slot = match name {
        "pw" | "pitching wedge" => 0,
        "gw" | "aw" | "gap wedge" | "approach wedge" => 1,
        "sw" | "sand wedge" => 2,
        "lw" | "lob wedge" => 3,
        _ if name.contains("wedge") => 4 + leading_number(name).unwrap_or(0),
        _ => return None,
    };
    Some(slot)
}

fn leading_number(name: &str) -> Option<u32> {
    let digits: String = name.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// "3w", "4h", "7i" style shorthand.
fn is_numbered(name: &str, suffix: char) -> bool {
    name.strip_suffix(suffix)
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Order two club labels in bag order.
pub fn compare_clubs(a: &str, b: &str) -> Ordering {
    rank(a)
        .cmp(&rank(b))
        .then_with(|| a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()))
        .then_with(|| a.cmp(b))
}

pub fn sort_clubs(clubs: &mut [String]) {
    clubs.sort_by(|a, b| compare_clubs(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut clubs: Vec<String> = names.iter().map(ToString::to_string).collect();
        sort_clubs(&mut clubs);
        clubs
    }

    #[test]
    fn bag_order_runs_driver_to_wedges() {
        assert_eq!(
            sorted(&["LW", "7-Iron", "Driver", "10-Iron (PW)", "5-Wood", "4-Iron", "4H", "SW"]),
            vec!["Driver", "5-Wood", "4H", "4-Iron", "7-Iron", "10-Iron (PW)", "SW", "LW"]
        );
    }

    #[test]
    fn unknown_clubs_follow_alphabetically() {
        assert_eq!(
            sorted(&["Putter", "Chipper", "9i", "gap wedge"]),
            vec!["9i", "gap wedge", "Chipper", "Putter"]
        );
    }

    #[test]
    fn numbered_wedges_sort_by_loft_after_named_ones() {
        assert_eq!(
            sorted(&["60 wedge", "52 wedge", "PW"]),
            vec!["PW", "52 wedge", "60 wedge"]
        );
    }
}
