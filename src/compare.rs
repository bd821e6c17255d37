//! Season-over-season comparison of player rows

use crate::model::{ComparisonRecord, Row};
use indexmap::IndexMap;

/// Parse a free-text season input. Blank input, or input that is not an
/// integer in full (`"2020.0"`, `"2020abc"`), yields `None`.
pub fn parse_season(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

struct Pairing<'a> {
    position: &'a str,
    from: Option<&'a Row>,
    to: Option<&'a Row>,
}

/// Pair every player's `from` and `to` season rows and compute deltas.
///
/// Players missing either season are dropped. Output follows the order in
/// which players first appear among rows of either season. When both inputs
/// name the same season, each matching row is assigned to the `to` side, so
/// no player has a `from` row and the result is empty. A later duplicate row
/// for the same player and season replaces the earlier one.
pub fn compare(rows: &[Row], from_season: &str, to_season: &str) -> Vec<ComparisonRecord> {
    let (Some(from), Some(to)) = (parse_season(from_season), parse_season(to_season)) else {
        log::debug!(
            "Comparison skipped: seasons '{}' and '{}' are not both integers",
            from_season,
            to_season
        );
        return Vec::new();
    };

    if from == to {
        log::debug!("Comparison of season {} with itself yields no pairs", from);
    }

    let mut pairings: IndexMap<&str, Pairing<'_>> = IndexMap::new();
    for row in rows {
        let Some(season) = row.season else { continue };
        if season != from && season != to {
            continue;
        }

        let entry = pairings.entry(row.name.as_str()).or_insert_with(|| Pairing {
            position: row.position.as_str(),
            from: None,
            to: None,
        });

        if season == to {
            entry.to = Some(row);
        } else {
            entry.from = Some(row);
        }
    }

    let records: Vec<ComparisonRecord> = pairings
        .values()
        .filter_map(|pairing| match (pairing.from, pairing.to) {
            (Some(a), Some(b)) => Some(ComparisonRecord::from_pair(a, b, pairing.position)),
            _ => None,
        })
        .collect();

    log::debug!(
        "Compared seasons {} -> {}: {} of {} players present in both",
        from,
        to,
        records.len(),
        pairings.len()
    );
    records
}
