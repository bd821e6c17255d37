//! Core data types: generic records, typed rows and comparison records

use crate::config::ColumnMapping;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell as produced by the tabular loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Integer view used for season columns
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Finite numeric view used for rating columns
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            CellValue::Int(i) => *i as f64,
            CellValue::Float(f) => *f,
            CellValue::Text(s) => s.trim().parse().ok()?,
            _ => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Text view; numbers are rendered, null is `None`
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Float(f) => Some(f.to_string()),
            CellValue::Text(s) => Some(s.clone()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => write!(f, "{}", text),
            None => Ok(()),
        }
    }
}

/// One loaded row as ordered column → value pairs
pub type Record = IndexMap<String, CellValue>;

/// One observation of one player in one season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub name: String,
    pub position: String,
    pub season: Option<i64>,
    pub overall: Option<f64>,
    pub potential: Option<f64>,
    /// Every other column, in file order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: Record,
}

impl Row {
    /// Build a typed row from a generic record. Returns `None` when the
    /// record carries no identifier, since such rows cannot be grouped.
    pub fn from_record(record: &Record, columns: &ColumnMapping) -> Option<Self> {
        let name = record
            .get(&columns.name)
            .and_then(CellValue::as_text)
            .filter(|n| !n.trim().is_empty())?;

        let position = record
            .get(&columns.position)
            .and_then(CellValue::as_text)
            .unwrap_or_default();

        let mapped = [
            &columns.name,
            &columns.position,
            &columns.season,
            &columns.overall,
            &columns.potential,
        ];
        let extra = record
            .iter()
            .filter(|(key, _)| !mapped.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Some(Self {
            name,
            position,
            season: record.get(&columns.season).and_then(CellValue::as_i64),
            overall: record.get(&columns.overall).and_then(CellValue::as_f64),
            potential: record.get(&columns.potential).and_then(CellValue::as_f64),
            extra,
        })
    }
}

/// Convert a batch of records, skipping those without an identifier
pub fn rows_from_records(records: &[Record], columns: &ColumnMapping) -> Vec<Row> {
    let rows: Vec<Row> = records
        .iter()
        .filter_map(|record| Row::from_record(record, columns))
        .collect();

    let skipped = records.len() - rows.len();
    if skipped > 0 {
        log::debug!("Skipped {} records without a '{}' value", skipped, columns.name);
    }
    rows
}

/// One player's pairing across the two compared seasons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRecord {
    pub name: String,
    pub position: String,
    pub overall_diff: Option<f64>,
    pub potential_diff: Option<f64>,
    pub from_overall: Option<f64>,
    pub to_overall: Option<f64>,
    pub from_potential: Option<f64>,
    pub to_potential: Option<f64>,
}

impl ComparisonRecord {
    pub fn from_pair(from: &Row, to: &Row, position: &str) -> Self {
        Self {
            name: from.name.clone(),
            position: position.to_string(),
            overall_diff: delta(from.overall, to.overall),
            potential_diff: delta(from.potential, to.potential),
            from_overall: from.overall,
            to_overall: to.overall,
            from_potential: from.potential,
            to_potential: to.potential,
        }
    }
}

fn delta(from: Option<f64>, to: Option<f64>) -> Option<f64> {
    Some(to? - from?)
}

/// Entry of the player picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOption {
    pub value: String,
    pub label: String,
}
