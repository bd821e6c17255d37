//! Integration tests for the session state and background loading

use crate::common::TestFixture;
use rosterdiff::config::ViewerConfig;
use rosterdiff::projection::SortField;
use rosterdiff::view::run_view;
use rosterdiff::Session;

#[test]
fn test_background_load_then_compare() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_roster().unwrap();

    let mut session = Session::new(ViewerConfig::default());
    session.load_in_background(&path);
    session.wait_for_loads();

    assert_eq!(session.rows().len(), 6);
    assert!(session.last_error().is_none());

    session.set_from_season("2020");
    session.set_to_season("2021");
    let records = session.comparison();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Aaron", "Cole"]);
}

#[test]
fn test_newest_load_wins() {
    let fixture = TestFixture::new().unwrap();
    let first = fixture.create_roster().unwrap();
    let second = fixture
        .create_csv(
            "second.csv",
            &[
                vec!["Name", "Pos", "Season", "Ovr", "Pot"],
                vec!["Zed", "K", "2020", "40", "45"],
            ],
        )
        .unwrap();

    let mut session = Session::new(ViewerConfig::default());
    session.load_in_background(&first);
    let newest = session.load_in_background(&second);
    session.wait_for_loads();

    assert_eq!(session.store().generation(), newest.generation());
    assert_eq!(session.rows().len(), 1);
    assert_eq!(session.rows()[0].name, "Zed");
    assert_eq!(session.store().source(), Some(second.as_path()));
}

#[test]
fn test_failed_load_after_success_keeps_data() {
    let fixture = TestFixture::new().unwrap();
    let good = fixture.create_roster().unwrap();
    let bad = fixture.create_corrupted_file("broken.parquet").unwrap();

    let mut session = Session::new(ViewerConfig::default());
    session.load_blocking(&good).unwrap();
    session.load_in_background(&bad);
    session.wait_for_loads();

    assert!(session.last_error().is_some());
    assert_eq!(session.rows().len(), 6);
    assert!(!session.store().is_loading());
}

#[test]
fn test_sort_state_cycles() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_roster().unwrap();

    let mut session = Session::new(ViewerConfig::default());
    session.load_blocking(&path).unwrap();
    session.set_from_season("2020");
    session.set_to_season("2021");

    session.request_sort(SortField::OverallDiff);
    let asc: Vec<String> = session.comparison().into_iter().map(|r| r.name).collect();
    session.request_sort(SortField::OverallDiff);
    let desc: Vec<String> = session.comparison().into_iter().map(|r| r.name).collect();
    session.request_sort(SortField::OverallDiff);
    let again: Vec<String> = session.comparison().into_iter().map(|r| r.name).collect();

    assert_eq!(asc, vec!["Cole", "Aaron"]);
    assert_eq!(desc, vec!["Aaron", "Cole"]);
    assert_eq!(again, asc);
}

#[test]
fn test_interactive_view_with_load() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_roster().unwrap();

    let script = format!(
        "load {}\nwait\nfrom 2020\nto 2021\nfilter col\nplayer Barry\nshow\nstatus\nquit\n",
        path.display()
    );
    let mut session = Session::new(ViewerConfig::default());
    let mut out = Vec::new();
    run_view(&mut session, script.as_bytes(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("6 rows loaded"));
    assert!(text.contains("Cole"));
    assert!(!text.contains("🟣 Aaron"));
    assert!(text.contains("History: Barry"));
    assert!(text.contains("2022"));
    assert!(text.contains("Filter: col"));
}
