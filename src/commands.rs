//! Command implementations for rosterdiff CLI

use crate::cli::{Commands, OutputFormat};
use crate::compare::compare;
use crate::config::{ViewerConfig, DEFAULT_CONFIG_FILE};
use crate::data::load_rows;
use crate::error::{Result, RosterError};
use crate::history::{history, player_options, seasons};
use crate::model::Row;
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::progress::ProgressReporter;
use crate::projection::{project, SortConfig, SortField};
use crate::session::Session;
use crate::view::run_view;
use std::io;
use std::path::{Path, PathBuf};

/// Execute a command
pub fn execute_command(command: Commands, config_path: Option<&Path>) -> Result<()> {
    // init must work before any configuration file exists
    let config = || ViewerConfig::resolve(config_path);

    match command {
        Commands::Init { force } => init_command(config_path, force),
        Commands::Compare {
            input,
            from,
            to,
            filter,
            sort,
            format,
        } => compare_command(&config()?, &input, &from, &to, &filter, &sort, &format),
        Commands::History {
            input,
            player,
            format,
        } => history_command(&config()?, &input, &player, &format),
        Commands::Players { input, format } => players_command(&config()?, &input, &format),
        Commands::Seasons { input, format } => seasons_command(&config()?, &input, &format),
        Commands::View { input } => view_command(config()?, input.as_deref()),
    }
}

fn parse_format(format: &str) -> Result<OutputFormat> {
    OutputFormat::parse(format).map_err(RosterError::invalid_input)
}

/// Load rows with a spinner unless the output is machine-readable
fn load_with_progress(config: &ViewerConfig, input: &Path, format: OutputFormat) -> Result<Vec<Row>> {
    let mut progress = match format {
        OutputFormat::Pretty => ProgressReporter::new_for_load(input),
        OutputFormat::Json => ProgressReporter::new_minimal(),
    };
    let rows = load_rows(config, input)?;
    progress.finish_load(rows.len());
    Ok(rows)
}

/// Write the default configuration file
fn init_command(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    ViewerConfig::default().write_to(&path, force)?;
    println!("✅ Wrote configuration to: {}", path.display());
    Ok(())
}

fn compare_command(
    config: &ViewerConfig,
    input: &Path,
    from: &str,
    to: &str,
    filter: &str,
    sort_clicks: &[SortField],
    format: &str,
) -> Result<()> {
    let format = parse_format(format)?;
    let rows = load_with_progress(config, input, format)?;

    let sort = SortConfig::from_clicks(sort_clicks);
    let records = project(&compare(&rows, from, to), filter, sort);

    match format {
        OutputFormat::Pretty => print!("{}", PrettyPrinter::render_comparison(&records, from, to, sort)),
        OutputFormat::Json => println!("{}", JsonFormatter::format_comparison(&records, from, to, filter, sort)?),
    }
    Ok(())
}

fn history_command(config: &ViewerConfig, input: &Path, player: &str, format: &str) -> Result<()> {
    let format = parse_format(format)?;
    let rows = load_with_progress(config, input, format)?;
    let matches = history(&rows, Some(player));

    match format {
        OutputFormat::Pretty => print!("{}", PrettyPrinter::render_history(Some(player), &matches)),
        OutputFormat::Json => println!("{}", JsonFormatter::format_history(player, &matches)?),
    }
    Ok(())
}

fn players_command(config: &ViewerConfig, input: &Path, format: &str) -> Result<()> {
    let format = parse_format(format)?;
    let rows = load_with_progress(config, input, format)?;
    let options = player_options(&rows);

    match format {
        OutputFormat::Pretty => print!("{}", PrettyPrinter::render_players(&options)),
        OutputFormat::Json => println!("{}", JsonFormatter::format(&options)?),
    }
    Ok(())
}

fn seasons_command(config: &ViewerConfig, input: &Path, format: &str) -> Result<()> {
    let format = parse_format(format)?;
    let rows = load_with_progress(config, input, format)?;
    let seasons = seasons(&rows);

    match format {
        OutputFormat::Pretty => print!("{}", PrettyPrinter::render_seasons(&seasons)),
        OutputFormat::Json => println!("{}", JsonFormatter::format(&seasons)?),
    }
    Ok(())
}

fn view_command(config: ViewerConfig, input: Option<&Path>) -> Result<()> {
    let mut session = Session::new(config);
    if let Some(path) = input {
        session.load_in_background(path);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_view(&mut session, stdin.lock(), stdout.lock())
}
