//! Tabular file loading using DuckDB, with workbooks read through calamine

use crate::config::ViewerConfig;
use crate::error::{Result, RosterError};
use crate::model::{rows_from_records, CellValue, Record, Row};
use calamine::{open_workbook_auto, Data, Reader};
use duckdb::types::ValueRef;
use duckdb::Connection;
use std::path::{Path, PathBuf};

/// File formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Tsv,
    Json,
    JsonLines,
    Parquet,
    Excel,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "tsv" | "txt" => Some(Self::Tsv),
            "json" => Some(Self::Json),
            "jsonl" | "ndjson" => Some(Self::JsonLines),
            "parquet" => Some(Self::Parquet),
            "xlsx" | "xlsm" | "xlsb" | "xls" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Table function expression reading `path`; workbooks have none
    fn table_expr(&self, path: &str) -> Option<String> {
        match self {
            Self::Csv => Some(format!("read_csv_auto('{}', header = true)", path)),
            Self::Tsv => Some(format!("read_csv_auto('{}', header = true, delim = '\\t')", path)),
            Self::Json => Some(format!("read_json_auto('{}')", path)),
            Self::JsonLines => Some(format!("read_json_auto('{}', format = 'newline_delimited')", path)),
            Self::Parquet => Some(format!("read_parquet('{}')", path)),
            Self::Excel => None,
        }
    }
}

/// Column name and engine type as reported by DESCRIBE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

/// Everything read from one input file
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub source: PathBuf,
    pub columns: Vec<ColumnInfo>,
    pub records: Vec<Record>,
}

impl LoadedTable {
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Reads tabular files into generic key/value records
pub struct DataProcessor {
    connection: Connection,
}

impl DataProcessor {
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        connection.execute(&format!("SET memory_limit='{}'", config.memory_limit), [])?;
        connection.execute("SET enable_progress_bar=false", [])?;
        // Row order is significant for grouping and stable sorts downstream
        connection.execute("SET preserve_insertion_order=true", [])?;
        Ok(Self { connection })
    }

    /// Check if file format is supported
    pub fn is_supported_format(file_path: &Path) -> bool {
        InputFormat::from_path(file_path).is_some()
    }

    /// Load every row of `file_path` in file order
    pub fn load_records(&self, file_path: &Path) -> Result<LoadedTable> {
        if !file_path.exists() {
            return Err(RosterError::invalid_input(format!(
                "File not found: {}",
                file_path.display()
            )));
        }
        if !file_path.is_file() {
            return Err(RosterError::invalid_input(format!(
                "Not a regular file: {}",
                file_path.display()
            )));
        }

        let format = InputFormat::from_path(file_path).ok_or_else(|| RosterError::UnsupportedFormat {
            path: file_path.to_path_buf(),
        })?;

        let (columns, records) = match format.table_expr(&file_path.to_string_lossy().replace('\'', "''")) {
            Some(expr) => self.load_through_view(&expr, file_path)?,
            None => read_workbook(file_path)?,
        };

        log::info!(
            "Loaded {} rows with {} columns from {}",
            records.len(),
            columns.len(),
            file_path.display()
        );

        Ok(LoadedTable {
            source: file_path.to_path_buf(),
            columns,
            records,
        })
    }

    fn load_through_view(&self, table_expr: &str, file_path: &Path) -> Result<(Vec<ColumnInfo>, Vec<Record>)> {
        let create_view_sql = format!("CREATE OR REPLACE VIEW data_view AS SELECT * FROM {}", table_expr);
        self.connection
            .execute(&create_view_sql, [])
            .map_err(|e| self.convert_duckdb_error(e, file_path))?;

        let columns = self.get_column_info()?;
        let records = self
            .extract_records(&columns)
            .map_err(|e| match e {
                RosterError::DuckDb(inner) => self.convert_duckdb_error(inner, file_path),
                other => other,
            })?;
        Ok((columns, records))
    }

    /// Convert DuckDB errors to appropriate RosterError types
    fn convert_duckdb_error(&self, error: duckdb::Error, file_path: &Path) -> RosterError {
        let error_msg = error.to_string();

        if error_msg.contains("CSV Error")
            || error_msg.contains("Could not convert")
            || error_msg.contains("Invalid CSV")
            || error_msg.contains("Unterminated quoted field")
        {
            RosterError::parse_failed(file_path, format!("Malformed CSV: {}", error_msg))
        } else if error_msg.contains("JSON") {
            RosterError::parse_failed(file_path, format!("Malformed JSON: {}", error_msg))
        } else if error_msg.contains("No files found") || error_msg.contains("does not exist") {
            RosterError::invalid_input(format!("File not found: {}", file_path.display()))
        } else if error_msg.contains("Permission denied") {
            RosterError::invalid_input(format!(
                "Permission denied accessing file: {}",
                file_path.display()
            ))
        } else if error_msg.contains("UTF-8") || error_msg.contains("encoding") {
            RosterError::parse_failed(file_path, format!("File encoding error: {}", error_msg))
        } else {
            RosterError::DuckDb(error)
        }
    }

    fn get_column_info(&self) -> Result<Vec<ColumnInfo>> {
        let mut stmt = self.connection.prepare("DESCRIBE data_view").map_err(|e| {
            RosterError::data_processing(format!("Failed to prepare describe query: {}", e))
        })?;

        let rows = stmt.query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get::<_, String>(0)?,
                data_type: row.get::<_, String>(1)?,
            })
        })?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row?);
        }
        Ok(columns)
    }

    fn extract_records(&self, columns: &[ColumnInfo]) -> Result<Vec<Record>> {
        if columns.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.connection.prepare("SELECT * FROM data_view")?;
        let rows = stmt.query_map([], |row| {
            let mut record = Record::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                record.insert(column.name.clone(), cell_from_value(row.get_ref(i)?));
            }
            Ok(record)
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}

/// Read the first sheet of a workbook; its first row is the header.
/// Blank header cells are named after their position and fully empty
/// rows are skipped.
fn read_workbook(path: &Path) -> Result<(Vec<ColumnInfo>, Vec<Record>)> {
    let mut workbook = open_workbook_auto(path).map_err(|e| RosterError::parse_failed(path, e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| RosterError::parse_failed(path, "Workbook has no sheets"))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| RosterError::parse_failed(path, format!("Cannot read sheet '{}': {}", sheet_name, e)))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        log::debug!("Sheet '{}' of {} is empty", sheet_name, path.display());
        return Ok((Vec::new(), Vec::new()));
    };

    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = cell.to_string();
            match name.trim() {
                "" => format!("column{}", i),
                trimmed => trimmed.to_string(),
            }
        })
        .collect();

    let records: Vec<Record> = rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            names
                .iter()
                .zip(row.iter())
                .map(|(name, cell)| (name.clone(), cell_from_spreadsheet(cell)))
                .collect()
        })
        .collect();

    let columns = names
        .into_iter()
        .map(|name| {
            let data_type = records
                .iter()
                .filter_map(|record| record.get(&name))
                .find(|cell| !matches!(cell, CellValue::Null))
                .map(spreadsheet_type)
                .unwrap_or("NULL");
            ColumnInfo {
                name,
                data_type: data_type.to_string(),
            }
        })
        .collect();

    log::debug!("Read sheet '{}' of {}", sheet_name, path.display());
    Ok((columns, records))
}

fn spreadsheet_type(cell: &CellValue) -> &'static str {
    match cell {
        CellValue::Null => "NULL",
        CellValue::Bool(_) => "BOOLEAN",
        CellValue::Int(_) => "BIGINT",
        CellValue::Float(_) => "DOUBLE",
        CellValue::Text(_) => "VARCHAR",
    }
}

fn cell_from_spreadsheet(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Read `path` and convert its records into typed rows
pub fn load_rows(config: &ViewerConfig, path: &Path) -> Result<Vec<Row>> {
    let processor = DataProcessor::new(config)?;
    let table = processor.load_records(path)?;
    Ok(rows_from_records(&table.records, &config.columns))
}

fn cell_from_value(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Boolean(b) => CellValue::Bool(b),
        ValueRef::TinyInt(i) => CellValue::Int(i.into()),
        ValueRef::SmallInt(i) => CellValue::Int(i.into()),
        ValueRef::Int(i) => CellValue::Int(i.into()),
        ValueRef::BigInt(i) => CellValue::Int(i),
        ValueRef::HugeInt(i) => i64::try_from(i)
            .map(CellValue::Int)
            .unwrap_or_else(|_| CellValue::Float(i as f64)),
        ValueRef::UTinyInt(i) => CellValue::Int(i.into()),
        ValueRef::USmallInt(i) => CellValue::Int(i.into()),
        ValueRef::UInt(i) => CellValue::Int(i.into()),
        ValueRef::UBigInt(i) => i64::try_from(i)
            .map(CellValue::Int)
            .unwrap_or_else(|_| CellValue::Float(i as f64)),
        ValueRef::Float(f) => CellValue::Float(f.into()),
        ValueRef::Double(f) => CellValue::Float(f),
        ValueRef::Decimal(d) => {
            let text = d.to_string();
            match text.parse::<f64>() {
                Ok(f) => CellValue::Float(f),
                Err(_) => CellValue::Text(text),
            }
        }
        ValueRef::Text(s) => CellValue::Text(String::from_utf8_lossy(s).to_string()),
        _ => CellValue::Null,
    }
}
