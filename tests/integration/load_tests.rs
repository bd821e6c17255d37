//! Integration tests for loading roster files into typed rows

use crate::common::{sample_data, TestFixture};
use rosterdiff::config::ViewerConfig;
use rosterdiff::data::{load_rows, DataProcessor};
use rosterdiff::model::CellValue;

#[test]
fn test_csv_rows_are_typed() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_roster().unwrap();

    let rows = load_rows(&ViewerConfig::default(), &path).unwrap();
    assert_eq!(rows.len(), 6);

    let first = &rows[0];
    assert_eq!(first.name, "Aaron");
    assert_eq!(first.position, "QB");
    assert_eq!(first.season, Some(2020));
    assert_eq!(first.overall, Some(65.0));
    assert_eq!(first.potential, Some(70.0));
    assert_eq!(first.extra.get("pid"), Some(&CellValue::Int(1)));

    assert_eq!(rows[4].overall, Some(52.5));
}

#[test]
fn test_xlsx_rows_are_typed() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_workbook("roster.xlsx", &sample_data::roster_csv_data())
        .unwrap();

    let rows = load_rows(&ViewerConfig::default(), &path).unwrap();
    assert_eq!(rows.len(), 6);

    let first = &rows[0];
    assert_eq!(first.name, "Aaron");
    assert_eq!(first.position, "QB");
    assert_eq!(first.season, Some(2020));
    assert_eq!(first.overall, Some(65.0));
    assert_eq!(first.potential, Some(70.0));
    assert_eq!(first.extra.get("pid").and_then(CellValue::as_i64), Some(1));

    assert_eq!(rows[4].overall, Some(52.5));
    assert_eq!(
        rosterdiff::compare(&rows, "2020", "2021")
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Aaron", "Cole"]
    );
}

#[test]
fn test_json_rows_are_typed() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_json("roster.json", &sample_data::roster_json_data())
        .unwrap();

    let rows = load_rows(&ViewerConfig::default(), &path).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].season, Some(2021));
    assert_eq!(rows[1].overall, Some(72.0));
}

#[test]
fn test_tsv_rows_are_typed() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_raw("roster.tsv", "Name\tPos\tSeason\tOvr\tPot\nDana\tK\t2019\t44\t50\n")
        .unwrap();

    let rows = load_rows(&ViewerConfig::default(), &path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Dana");
    assert_eq!(rows[0].season, Some(2019));
}

#[test]
fn test_custom_column_mapping() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_csv(
            "custom.csv",
            &[
                vec!["Player", "Position", "Year", "OVR", "POT"],
                vec!["Eve", "LB", "2023", "61", "66"],
            ],
        )
        .unwrap();

    let mut config = ViewerConfig::default();
    config.columns.name = "Player".into();
    config.columns.position = "Position".into();
    config.columns.season = "Year".into();
    config.columns.overall = "OVR".into();
    config.columns.potential = "POT".into();

    let rows = load_rows(&config, &path).unwrap();
    assert_eq!(rows[0].name, "Eve");
    assert_eq!(rows[0].position, "LB");
    assert_eq!(rows[0].season, Some(2023));
    assert_eq!(rows[0].potential, Some(66.0));
    assert!(rows[0].extra.is_empty());
}

#[test]
fn test_loaded_table_reports_columns() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_roster().unwrap();

    let processor = DataProcessor::new(&ViewerConfig::default()).unwrap();
    let table = processor.load_records(&path).unwrap();
    assert_eq!(table.column_names(), vec!["pid", "Name", "Pos", "Season", "Ovr", "Pot"]);
    assert_eq!(table.row_count(), 6);
}
