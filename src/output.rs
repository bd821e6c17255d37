//! Output formatting utilities

use crate::error::Result;
use crate::model::{ComparisonRecord, PlayerOption, Row};
use crate::projection::SortConfig;
use crate::tier::RatingTier;
use serde::Serialize;

/// Headers of the comparison table, in display order
const COMPARISON_HEADERS: [&str; 8] = [
    "Name",
    "Position",
    "Overall diff",
    "Potential diff",
    "From overall",
    "To overall",
    "From potential",
    "To potential",
];

/// Ratings are shown with one decimal place; missing values as `-`
pub fn format_rating(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}

/// Tier of a comparison row, taken from its to-overall rating
pub fn row_tier(record: &ComparisonRecord) -> Option<RatingTier> {
    record.to_overall.map(RatingTier::from_overall)
}

/// Pretty printer for rosterdiff output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Render the comparison table
    pub fn render_comparison(
        records: &[ComparisonRecord],
        from: &str,
        to: &str,
        sort: Option<SortConfig>,
    ) -> String {
        let mut out = format!("🔍 Comparison: {} → {}", from.trim(), to.trim());
        if let Some(sort) = sort {
            out.push_str(&format!(" (sorted by {})", sort));
        }
        out.push('\n');

        if records.is_empty() {
            out.push_str("No players present in both seasons.\n");
            return out;
        }

        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|r| {
                let marker = row_tier(r).map(|t| t.marker()).unwrap_or("  ");
                vec![
                    format!("{} {}", marker, r.name),
                    r.position.clone(),
                    format_rating(r.overall_diff),
                    format_rating(r.potential_diff),
                    format_rating(r.from_overall),
                    format_rating(r.to_overall),
                    format_rating(r.from_potential),
                    format_rating(r.to_potential),
                ]
            })
            .collect();

        let mut headers = COMPARISON_HEADERS.map(String::from).to_vec();
        headers[0] = format!("   {}", headers[0]);
        out.push_str(&render_table(&headers, &rows));
        out.push_str(&format!("└─ {} players\n", records.len()));
        out
    }

    /// Render one player's history table
    pub fn render_history(player: Option<&str>, rows: &[&Row]) -> String {
        let Some(player) = player else {
            return "No player selected.\n".to_string();
        };

        let mut out = format!("📈 History: {}\n", player);
        if rows.is_empty() {
            out.push_str("No rows found for this player.\n");
            return out;
        }

        let headers = vec!["Season".to_string(), "Overall".to_string(), "Potential".to_string()];
        let body: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                vec![
                    r.season.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
                    format_rating(r.overall),
                    format_rating(r.potential),
                ]
            })
            .collect();
        out.push_str(&render_table(&headers, &body));
        out
    }

    /// Render the player picker list
    pub fn render_players(options: &[PlayerOption]) -> String {
        if options.is_empty() {
            return "No players loaded.\n".to_string();
        }

        let mut out = format!("👥 Players ({}):\n", options.len());
        for (i, option) in options.iter().enumerate() {
            let prefix = if i == options.len() - 1 { "└─" } else { "├─" };
            out.push_str(&format!("{} {}\n", prefix, option.label));
        }
        out
    }

    pub fn render_seasons(seasons: &[i64]) -> String {
        if seasons.is_empty() {
            return "No seasons loaded.\n".to_string();
        }
        let list: Vec<String> = seasons.iter().map(|s| s.to_string()).collect();
        format!("📅 Seasons: {}\n", list.join(", "))
    }
}

/// Left-aligned text table with a header rule
fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        format!("{}\n", padded.join(" │ ").trim_end())
    };

    let mut out = format_line(headers);
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("─┼─")));
    for row in rows {
        out.push_str(&format_line(row.as_slice()));
    }
    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TieredRecord<'a> {
    #[serde(flatten)]
    record: &'a ComparisonRecord,
    tier: Option<RatingTier>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonReport<'a> {
    from_season: &'a str,
    to_season: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<SortConfig>,
    #[serde(skip_serializing_if = "str::is_empty")]
    filter: &'a str,
    generated_at: chrono::DateTime<chrono::Utc>,
    players: Vec<TieredRecord<'a>>,
}

#[derive(Serialize)]
struct HistoryEntry {
    season: Option<i64>,
    overall: Option<f64>,
    potential: Option<f64>,
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    pub fn format_comparison(
        records: &[ComparisonRecord],
        from: &str,
        to: &str,
        filter: &str,
        sort: Option<SortConfig>,
    ) -> Result<String> {
        let report = ComparisonReport {
            from_season: from.trim(),
            to_season: to.trim(),
            sort,
            filter: filter.trim(),
            generated_at: chrono::Utc::now(),
            players: records
                .iter()
                .map(|record| TieredRecord {
                    record,
                    tier: row_tier(record),
                })
                .collect(),
        };
        Self::format(&report)
    }

    pub fn format_history(player: &str, rows: &[&Row]) -> Result<String> {
        let entries: Vec<HistoryEntry> = rows
            .iter()
            .map(|r| HistoryEntry {
                season: r.season,
                overall: r.overall,
                potential: r.potential,
            })
            .collect();
        Self::format(&serde_json::json!({
            "player": player,
            "history": entries,
        }))
    }
}
