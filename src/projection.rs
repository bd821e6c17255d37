//! Filtering and sorting of comparison records for display

use crate::model::ComparisonRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Sortable columns of the comparison table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Position,
    OverallDiff,
    PotentialDiff,
    FromOverall,
    ToOverall,
    FromPotential,
    ToPotential,
}

impl SortField {
    pub const ALL: [SortField; 8] = [
        SortField::Name,
        SortField::Position,
        SortField::OverallDiff,
        SortField::PotentialDiff,
        SortField::FromOverall,
        SortField::ToOverall,
        SortField::FromPotential,
        SortField::ToPotential,
    ];

    /// Parse a column key, ignoring case and `-`/`_` separators
    pub fn parse(s: &str) -> Result<Self, String> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "name" => Ok(Self::Name),
            "position" | "pos" => Ok(Self::Position),
            "overalldiff" => Ok(Self::OverallDiff),
            "potentialdiff" => Ok(Self::PotentialDiff),
            "fromoverall" => Ok(Self::FromOverall),
            "tooverall" => Ok(Self::ToOverall),
            "frompotential" => Ok(Self::FromPotential),
            "topotential" => Ok(Self::ToPotential),
            _ => Err(format!(
                "Invalid sort field: {}. Use one of: {}",
                s,
                Self::ALL.iter().map(|f| f.key()).collect::<Vec<_>>().join(", ")
            )),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Position => "position",
            Self::OverallDiff => "overallDiff",
            Self::PotentialDiff => "potentialDiff",
            Self::FromOverall => "fromOverall",
            Self::ToOverall => "toOverall",
            Self::FromPotential => "fromPotential",
            Self::ToPotential => "toPotential",
        }
    }

    fn value<'a>(&self, record: &'a ComparisonRecord) -> SortValue<'a> {
        match self {
            Self::Name => SortValue::Text(&record.name),
            Self::Position => SortValue::Text(&record.position),
            Self::OverallDiff => SortValue::Number(record.overall_diff),
            Self::PotentialDiff => SortValue::Number(record.potential_diff),
            Self::FromOverall => SortValue::Number(record.from_overall),
            Self::ToOverall => SortValue::Number(record.to_overall),
            Self::FromPotential => SortValue::Number(record.from_potential),
            Self::ToPotential => SortValue::Number(record.to_potential),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

enum SortValue<'a> {
    Text(&'a str),
    Number(Option<f64>),
}

impl SortValue<'_> {
    /// Missing numbers order after every present number
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => match (a, b) {
                (Some(a), Some(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            // a field never mixes kinds
            _ => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The single active sort key and its direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    /// Header-click semantics: the same field while ascending flips to
    /// descending, anything else starts ascending.
    pub fn request(current: Option<SortConfig>, field: SortField) -> Self {
        match current {
            Some(SortConfig {
                field: active,
                direction: SortDirection::Asc,
            }) if active == field => Self {
                field,
                direction: SortDirection::Desc,
            },
            _ => Self::ascending(field),
        }
    }

    /// Fold a sequence of clicks starting from no sort
    pub fn from_clicks(fields: &[SortField]) -> Option<Self> {
        fields
            .iter()
            .fold(None, |current, field| Some(Self::request(current, *field)))
    }
}

impl fmt::Display for SortConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{} {}", self.field, arrow)
    }
}

/// Split a comma separated filter into lowercase tokens
fn filter_tokens(filter: &str) -> Vec<String> {
    filter
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .collect()
}

/// Keep records whose name contains any of the comma separated tokens,
/// case-insensitively. A blank filter keeps everything. An empty token
/// (as in `"aa,"`) is contained in every name, so it keeps everything too.
pub fn filter_records<'a>(records: &'a [ComparisonRecord], filter: &str) -> Vec<&'a ComparisonRecord> {
    if filter.trim().is_empty() {
        return records.iter().collect();
    }

    let tokens = filter_tokens(filter);
    records
        .iter()
        .filter(|record| {
            let name = record.name.to_lowercase();
            tokens.iter().any(|token| name.contains(token.as_str()))
        })
        .collect()
}

/// Stable sort by the configured field; `None` leaves order unchanged
pub fn sort_records(records: &mut [&ComparisonRecord], sort: Option<SortConfig>) {
    let Some(sort) = sort else { return };

    records.sort_by(|a, b| {
        let ordering = sort.field.value(a).compare(&sort.field.value(b));
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Filter then sort, without touching the input
pub fn project(records: &[ComparisonRecord], filter: &str, sort: Option<SortConfig>) -> Vec<ComparisonRecord> {
    let mut visible = filter_records(records, filter);
    sort_records(&mut visible, sort);
    visible.into_iter().cloned().collect()
}
