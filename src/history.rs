//! Per-player history and picker lists

use crate::model::{PlayerOption, Row};
use indexmap::IndexSet;
use std::collections::BTreeSet;

/// All rows of one player ordered by season.
///
/// Matching is exact on the identifier. Rows sharing a season keep their
/// load order; rows without a season come first.
pub fn history<'a>(rows: &'a [Row], player: Option<&str>) -> Vec<&'a Row> {
    let Some(player) = player.filter(|p| !p.trim().is_empty()) else {
        return Vec::new();
    };

    let mut matches: Vec<&Row> = rows.iter().filter(|row| row.name == player).collect();
    matches.sort_by_key(|row| row.season);
    matches
}

/// Deduplicated picker entries in first-seen order
pub fn player_options(rows: &[Row]) -> Vec<PlayerOption> {
    let names: IndexSet<&str> = rows.iter().map(|row| row.name.as_str()).collect();
    names
        .into_iter()
        .map(|name| PlayerOption {
            value: name.to_string(),
            label: name.to_string(),
        })
        .collect()
}

/// Distinct seasons present in the rows, ascending
pub fn seasons(rows: &[Row]) -> Vec<i64> {
    rows.iter()
        .filter_map(|row| row.season)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
