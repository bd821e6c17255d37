//! Common test utilities and helpers

use rosterdiff::config::ViewerConfig;
use rosterdiff::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding roster files and a default configuration
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("rosterdiff.json");
        ViewerConfig::default().write_to(&config_path, true)?;

        Ok(Self {
            temp_dir,
            config_path,
        })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a test CSV file with sample data
    pub fn create_csv(&self, name: &str, data: &[Vec<&str>]) -> Result<PathBuf> {
        let mut content = String::new();
        for row in data {
            content.push_str(&row.join(","));
            content.push('\n');
        }
        self.create_raw(name, &content)
    }

    /// Create a file with raw string content
    pub fn create_raw(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Create a test JSON file with sample data
    pub fn create_json(&self, name: &str, data: &serde_json::Value) -> Result<PathBuf> {
        let content = serde_json::to_string_pretty(data)?;
        self.create_raw(name, &content)
    }

    /// Create a corrupted file for testing error handling
    pub fn create_corrupted_file(&self, name: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, b"\x00\x01\x02\x03invalid_data\xff\xfe")?;
        Ok(path)
    }

    /// Create a single-sheet workbook; cells that parse as numbers are
    /// written as numbers
    pub fn create_workbook(&self, name: &str, data: &[Vec<&str>]) -> Result<PathBuf> {
        let path = self.root().join(name);
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in data.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let written = match cell.parse::<f64>() {
                    Ok(number) => sheet.write_number(r as u32, c as u16, number),
                    Err(_) => sheet.write_string(r as u32, c as u16, *cell),
                };
                written.map_err(|e| rosterdiff::RosterError::invalid_input(e.to_string()))?;
            }
        }
        workbook
            .save(&path)
            .map_err(|e| rosterdiff::RosterError::invalid_input(e.to_string()))?;
        Ok(path)
    }

    pub fn create_roster(&self) -> Result<PathBuf> {
        self.create_csv("roster.csv", &sample_data::roster_csv_data())
    }
}

/// Helper for running CLI commands in tests
pub struct CliTestRunner {
    fixture: TestFixture,
}

impl CliTestRunner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fixture: TestFixture::new()?,
        })
    }

    pub fn fixture(&self) -> &TestFixture {
        &self.fixture
    }

    /// Run a rosterdiff command against the fixture configuration
    pub fn run_command(&self, args: &[&str]) -> Result<()> {
        use clap::Parser;
        use rosterdiff::cli::Cli;
        use rosterdiff::commands::execute_command;

        let mut cmd_args = vec!["rosterdiff"];
        cmd_args.extend(args);

        let cli = Cli::try_parse_from(cmd_args)
            .map_err(|e| rosterdiff::RosterError::invalid_input(e.to_string()))?;

        let config_path = cli.config.clone().unwrap_or_else(|| self.fixture.config_path.clone());
        execute_command(cli.command, Some(&config_path))
    }

    pub fn expect_success(&self, args: &[&str]) {
        self.run_command(args).expect("Command should succeed");
    }

    pub fn expect_failure(&self, args: &[&str]) -> rosterdiff::RosterError {
        self.run_command(args).expect_err("Command should fail")
    }
}

/// Sample data generators for testing
pub mod sample_data {
    use serde_json::json;

    pub fn roster_csv_data() -> Vec<Vec<&'static str>> {
        vec![
            vec!["pid", "Name", "Pos", "Season", "Ovr", "Pot"],
            vec!["1", "Aaron", "QB", "2020", "65", "70"],
            vec!["1", "Aaron", "QB", "2021", "72", "75"],
            vec!["2", "Barry", "RB", "2020", "55", "60"],
            vec!["3", "Cole", "WR", "2020", "48", "58"],
            vec!["3", "Cole", "WR", "2021", "52.5", "57"],
            vec!["2", "Barry", "RB", "2022", "57", "59"],
        ]
    }

    pub fn roster_json_data() -> serde_json::Value {
        json!([
            {"pid": 1, "Name": "Aaron", "Pos": "QB", "Season": 2020, "Ovr": 65, "Pot": 70},
            {"pid": 1, "Name": "Aaron", "Pos": "QB", "Season": 2021, "Ovr": 72, "Pot": 75},
            {"pid": 2, "Name": "Barry", "Pos": "RB", "Season": 2020, "Ovr": 55, "Pot": 60}
        ])
    }
}
