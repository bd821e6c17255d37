//! Line-oriented interactive view over a `Session`

use crate::error::Result;
use crate::output::PrettyPrinter;
use crate::projection::SortField;
use crate::session::Session;
use std::io::{BufRead, Write};
use std::path::Path;

const HELP: &str = "\
Commands:
  load <file>       start loading a roster file in the background
  wait              block until pending loads finish
  from <season>     set the season to compare from
  to <season>       set the season to compare to
  filter [names]    comma separated name filter (empty clears)
  sort <column>     sort by column; repeat to toggle descending
  unsort            clear sorting
  player <name>     select a player for the history table
  unplayer          clear the selected player
  players           list players
  seasons           list seasons
  show              print the comparison and history tables
  status            print session state
  help              this text
  quit              leave
";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    Load(String),
    Wait,
    From(String),
    To(String),
    Filter(String),
    Sort(SortField),
    Unsort,
    Player(String),
    Unplayer,
    Players,
    Seasons,
    Show,
    Status,
    Help,
    Quit,
}

impl ViewCommand {
    /// Parse one line; blank lines yield `Ok(None)`
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let require = |what: &str| -> std::result::Result<String, String> {
            if arg.is_empty() {
                Err(format!("'{}' needs {}", verb, what))
            } else {
                Ok(arg.to_string())
            }
        };

        let command = match verb.to_lowercase().as_str() {
            "load" => Self::Load(require("a file path")?),
            "wait" => Self::Wait,
            "from" => Self::From(arg.to_string()),
            "to" => Self::To(arg.to_string()),
            "filter" => Self::Filter(arg.to_string()),
            "sort" => Self::Sort(SortField::parse(&require("a column")?)?),
            "unsort" => Self::Unsort,
            "player" => Self::Player(require("a player name")?),
            "unplayer" => Self::Unplayer,
            "players" => Self::Players,
            "seasons" => Self::Seasons,
            "show" => Self::Show,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("Unknown command: {} (try 'help')", other)),
        };
        Ok(Some(command))
    }
}

/// Drive `session` from `input` until EOF or `quit`
pub fn run_view<R: BufRead, W: Write>(session: &mut Session, input: R, mut output: W) -> Result<()> {
    writeln!(output, "rosterdiff interactive view. Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;
        session.poll_loads();

        let command = match ViewCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(output, "❌ {}", message)?;
                continue;
            }
        };

        if command == ViewCommand::Quit {
            break;
        }
        apply(session, command, &mut output)?;
    }

    output.flush()?;
    Ok(())
}

fn apply<W: Write>(session: &mut Session, command: ViewCommand, output: &mut W) -> Result<()> {
    match command {
        ViewCommand::Load(path) => {
            let ticket = session.load_in_background(Path::new(&path));
            writeln!(output, "⏳ Loading {} (load #{})", path, ticket.generation())?;
        }
        ViewCommand::Wait => {
            session.wait_for_loads();
            match session.last_error() {
                Some(error) => writeln!(output, "❌ Load failed: {}", error)?,
                None => writeln!(output, "✅ {} rows loaded", session.rows().len())?,
            }
        }
        ViewCommand::From(season) => session.set_from_season(season),
        ViewCommand::To(season) => session.set_to_season(season),
        ViewCommand::Filter(filter) => session.set_filter(filter),
        ViewCommand::Sort(field) => {
            let sort = session.request_sort(field);
            writeln!(output, "Sorted by {}", sort)?;
        }
        ViewCommand::Unsort => session.clear_sort(),
        ViewCommand::Player(name) => session.select_player(name),
        ViewCommand::Unplayer => session.clear_player(),
        ViewCommand::Players => write!(output, "{}", PrettyPrinter::render_players(&session.player_options()))?,
        ViewCommand::Seasons => write!(output, "{}", PrettyPrinter::render_seasons(&session.seasons()))?,
        ViewCommand::Show => {
            if session.store().is_loading() {
                writeln!(output, "⏳ A load is still in progress; showing previous data")?;
            }
            let (from, to) = session.seasons_selected();
            write!(
                output,
                "{}",
                PrettyPrinter::render_comparison(&session.comparison(), from, to, session.sort())
            )?;
            if session.selected_player().is_some() {
                write!(
                    output,
                    "{}",
                    PrettyPrinter::render_history(session.selected_player(), &session.history())
                )?;
            }
        }
        ViewCommand::Status => write_status(session, output)?,
        ViewCommand::Help => write!(output, "{}", HELP)?,
        ViewCommand::Quit => {}
    }
    Ok(())
}

fn write_status<W: Write>(session: &Session, output: &mut W) -> Result<()> {
    let store = session.store();
    let (from, to) = session.seasons_selected();
    let source = store
        .source()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    writeln!(output, "📊 Session")?;
    writeln!(output, "├─ Source: {}", source)?;
    writeln!(output, "├─ Rows: {}", store.rows().len())?;
    writeln!(output, "├─ Pending loads: {}", session.pending_loads())?;
    writeln!(output, "├─ Seasons: {} → {}", from, to)?;
    writeln!(output, "├─ Filter: {}", session.filter())?;
    match session.sort() {
        Some(sort) => writeln!(output, "├─ Sort: {}", sort)?,
        None => writeln!(output, "├─ Sort: none")?,
    }
    writeln!(output, "├─ Player: {}", session.selected_player().unwrap_or("(none)"))?;
    writeln!(output, "└─ Last error: {}", session.last_error().unwrap_or("none"))?;
    Ok(())
}
