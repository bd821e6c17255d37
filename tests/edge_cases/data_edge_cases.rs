//! Edge case tests for data-related scenarios

use crate::common::{CliTestRunner, TestFixture};
use rosterdiff::config::ViewerConfig;
use rosterdiff::data::load_rows;
use rosterdiff::{compare, history, RosterError};

#[test]
fn test_unsupported_extension_fails_cleanly() {
    let runner = CliTestRunner::new().unwrap();
    let path = runner.fixture().create_raw("roster.ods", "not a supported sheet").unwrap();

    let error = runner.expect_failure(&["players", path.to_str().unwrap()]);
    assert!(matches!(error, RosterError::UnsupportedFormat { .. }));
}

#[test]
fn test_fake_xls_is_a_parse_failure() {
    let runner = CliTestRunner::new().unwrap();
    let path = runner.fixture().create_raw("roster.xls", "not really excel").unwrap();

    let error = runner.expect_failure(&["players", path.to_str().unwrap()]);
    assert!(matches!(error, RosterError::ParseFailed { .. }));
}

#[test]
fn test_missing_file_fails_cleanly() {
    let runner = CliTestRunner::new().unwrap();
    let path = runner.fixture().root().join("nope.csv");

    let error = runner.expect_failure(&["seasons", path.to_str().unwrap()]);
    assert!(error.to_string().contains("File not found"));
}

#[test]
fn test_corrupted_json_fails() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_raw("broken.json", "[{\"Name\": \"A\", ").unwrap();

    let error = load_rows(&ViewerConfig::default(), &path).unwrap_err();
    assert!(matches!(error, RosterError::ParseFailed { .. }));
}

#[test]
fn test_missing_rating_columns_surface_as_none() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_csv(
            "sparse.csv",
            &[
                vec!["Name", "Season"],
                vec!["Aaron", "2020"],
                vec!["Aaron", "2021"],
            ],
        )
        .unwrap();

    let rows = load_rows(&ViewerConfig::default(), &path).unwrap();
    let records = compare(&rows, "2020", "2021");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].position, "");
    assert_eq!(records[0].overall_diff, None);
    assert_eq!(records[0].from_overall, None);
}

#[test]
fn test_rows_without_name_are_dropped() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_raw(
            "blank_names.csv",
            "Name,Pos,Season,Ovr,Pot\n,QB,2020,50,55\nAaron,QB,2020,60,65\n",
        )
        .unwrap();

    let rows = load_rows(&ViewerConfig::default(), &path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Aaron");
}

#[test]
fn test_text_seasons_are_parsed() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_raw(
            "text_seasons.csv",
            "Name,Pos,Season,Ovr,Pot\nAaron,QB,2020,50,55\nAaron,QB,unknown,60,65\nAaron,QB,2021,61,66\n",
        )
        .unwrap();

    let rows = load_rows(&ViewerConfig::default(), &path).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].season, None);

    let records = compare(&rows, "2020", "2021");
    assert_eq!(records[0].overall_diff, Some(11.0));

    let seasons: Vec<Option<i64>> = history(&rows, Some("Aaron")).iter().map(|r| r.season).collect();
    assert_eq!(seasons, vec![None, Some(2020), Some(2021)]);
}

#[test]
fn test_unicode_names() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_raw(
            "unicode.csv",
            "Name,Pos,Season,Ovr,Pot\nJosé,QB,2020,50,55\nJosé,QB,2021,52,56\n北京,K,2020,40,41\n",
        )
        .unwrap();

    let rows = load_rows(&ViewerConfig::default(), &path).unwrap();
    let records = rosterdiff::project(&compare(&rows, "2020", "2021"), "JOSÉ", None);
    assert_eq!(records.len(), 1);
    assert_eq!(history(&rows, Some("北京")).len(), 1);
}

#[test]
fn test_header_only_file() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_raw("empty.csv", "Name,Pos,Season,Ovr,Pot\n").unwrap();

    let rows = load_rows(&ViewerConfig::default(), &path).unwrap();
    assert!(rows.is_empty());
    assert!(compare(&rows, "2020", "2021").is_empty());
}
